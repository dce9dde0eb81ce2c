//! Blocking, user-facing notices.
//!
//! Errors are never shown raw. Anything the user needs to know is mapped to
//! one of these fixed messages.

use std::fmt;

use serde::Serialize;

/// A message the user has to acknowledge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Notice {
    /// The trusted contact was written to the preference store.
    ContactSaved,
    /// Text reached the clipboard.
    Copied,
    /// The clipboard was missing or refused the write.
    CopyFailed,
    /// The device has no geolocation.
    GeolocationUnavailable,
    /// Geolocation failed, was denied or timed out.
    LocationFailed,
    /// The content document could not be loaded.
    LoadFailed,
}

impl Notice {
    /// The message shown to the user.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::ContactSaved => "Trusted contact saved.",
            Self::Copied => "Copied to clipboard.",
            Self::CopyFailed => "Could not copy automatically. Please copy manually.",
            Self::GeolocationUnavailable => "Geolocation is not available on this device.",
            Self::LocationFailed => "Unable to get your location.",
            Self::LoadFailed => "Unable to load app data. Please try again.",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
