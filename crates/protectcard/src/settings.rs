//! User settings persisted in the preference store.
//!
//! Each field lives under its own fixed key. Booleans are stored as the
//! strings `"true"`/`"false"`; anything other than `"true"` reads back as
//! false. Reading never fails: unreadable or unexpected values fall back to
//! defaults.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::prefs::PreferenceStore;

/// Preference keys, one per settings field.
pub mod keys {
    /// Trusted contact name.
    pub const CONTACT_NAME: &str = "protectcard_contact_name";
    /// Trusted contact phone number.
    pub const CONTACT_PHONE: &str = "protectcard_contact_phone";
    /// Large text display toggle.
    pub const LARGE_TEXT: &str = "protectcard_large_text";
    /// High contrast display toggle.
    pub const HIGH_CONTRAST: &str = "protectcard_high_contrast";
    /// Id of the last opened scenario.
    pub const LAST_SCENARIO: &str = "protectcard_last_scenario";

    /// All keys, in field order.
    pub const ALL: [&str; 5] = [
        CONTACT_NAME,
        CONTACT_PHONE,
        LARGE_TEXT,
        HIGH_CONTRAST,
        LAST_SCENARIO,
    ];
}

/// Persisted user settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Trusted contact name, may be empty.
    pub contact_name: String,
    /// Trusted contact phone, may be empty.
    pub contact_phone: String,
    /// Render with larger text.
    pub large_text: bool,
    /// Render with high contrast colours.
    pub high_contrast: bool,
    /// Last opened scenario id, empty if none.
    pub last_scenario: String,
}

impl Settings {
    /// Load settings from the store, defaulting anything absent or unreadable.
    pub fn load(store: &impl PreferenceStore) -> Self {
        let settings = Self {
            contact_name: read_string(store, keys::CONTACT_NAME),
            contact_phone: read_string(store, keys::CONTACT_PHONE),
            large_text: read_bool(store, keys::LARGE_TEXT),
            high_contrast: read_bool(store, keys::HIGH_CONTRAST),
            last_scenario: read_string(store, keys::LAST_SCENARIO),
        };
        debug!(?settings, "Loaded settings");
        settings
    }

    /// Write every field back to the store in one batch.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    pub fn save(&self, store: &mut impl PreferenceStore) -> Result<()> {
        store.set_all(&[
            (keys::CONTACT_NAME, self.contact_name.as_str()),
            (keys::CONTACT_PHONE, self.contact_phone.as_str()),
            (keys::LARGE_TEXT, encode_bool(self.large_text)),
            (keys::HIGH_CONTRAST, encode_bool(self.high_contrast)),
            (keys::LAST_SCENARIO, self.last_scenario.as_str()),
        ])
    }

    /// Whether a trusted contact has been configured.
    #[must_use]
    pub fn has_contact(&self) -> bool {
        !self.contact_name.is_empty() || !self.contact_phone.is_empty()
    }
}

fn encode_bool(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

fn read_string(store: &impl PreferenceStore, key: &str) -> String {
    match store.get(key) {
        Ok(value) => value.unwrap_or_default(),
        Err(e) => {
            warn!("Could not read preference {key}, using default: {e}");
            String::new()
        }
    }
}

fn read_bool(store: &impl PreferenceStore, key: &str) -> bool {
    read_string(store, key) == "true"
}
