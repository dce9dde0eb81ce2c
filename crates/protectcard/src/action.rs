//! The closed set of user actions.
//!
//! Views attach an [`Action`] to every interactive element. The HTML
//! back-end writes it out as a `data-action` tag plus data attributes, and
//! [`Action::from_dom`] reads it back when the user clicks.

use serde::Serialize;

use crate::links::{decode_uri_component, encode_uri_component};
use crate::session::Tab;

/// Something the user asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Action {
    /// Show a scenario.
    OpenScenario {
        /// Scenario id.
        id: String,
    },
    /// Back to the home screen.
    GoHome,
    /// Switch the scenario tab.
    SwitchTab {
        /// Target tab.
        tab: Tab,
    },
    /// Save the trusted contact from the form. `None` means the field was
    /// absent and saves as empty.
    SaveContact {
        /// Contact name input.
        name: Option<String>,
        /// Contact phone input.
        phone: Option<String>,
    },
    /// Forget the trusted contact.
    ClearContact,
    /// Flip the large text setting.
    ToggleLargeText,
    /// Flip the high contrast setting.
    ToggleHighContrast,
    /// Copy one line to the clipboard.
    CopyLine {
        /// The line.
        text: String,
    },
    /// Copy every say-this line of the active scenario.
    CopyAllSay,
    /// Share the current location.
    ShareLocation,
}

impl Action {
    /// The action identifier.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::OpenScenario { .. } => "open-scenario",
            Self::GoHome => "go-home",
            Self::SwitchTab { .. } => "switch-tab",
            Self::SaveContact { .. } => "save-contact",
            Self::ClearContact => "clear-contact",
            Self::ToggleLargeText => "toggle-large-text",
            Self::ToggleHighContrast => "toggle-high-contrast",
            Self::CopyLine { .. } => "copy-line",
            Self::CopyAllSay => "copy-all-say",
            Self::ShareLocation => "share-location",
        }
    }

    /// Data attributes carried next to the tag, without the `data-` prefix.
    ///
    /// Form values are not included; they are read from the inputs at click
    /// time.
    #[must_use]
    pub fn data(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::OpenScenario { id } => vec![("id", id.clone())],
            Self::SwitchTab { tab } => vec![("tab", tab.id().to_string())],
            Self::CopyLine { text } => vec![("line", encode_uri_component(text))],
            _ => Vec::new(),
        }
    }

    /// Whether this action only has an external side effect and leaves the
    /// view as it is.
    #[must_use]
    pub fn is_fire_and_forget(&self) -> bool {
        matches!(
            self,
            Self::CopyLine { .. } | Self::CopyAllSay | Self::ShareLocation
        )
    }

    /// Rebuild an action from its tag and a data attribute lookup.
    ///
    /// `data` is asked for `id`, `tab`, `line`, `name` and `phone`. Returns
    /// `None` for unknown tags and for missing or malformed data.
    pub fn from_dom<F>(tag: &str, data: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let action = match tag {
            "open-scenario" => Self::OpenScenario { id: data("id")? },
            "go-home" => Self::GoHome,
            "switch-tab" => Self::SwitchTab {
                tab: Tab::parse(&data("tab")?)?,
            },
            "save-contact" => Self::SaveContact {
                name: data("name"),
                phone: data("phone"),
            },
            "clear-contact" => Self::ClearContact,
            "toggle-large-text" => Self::ToggleLargeText,
            "toggle-high-contrast" => Self::ToggleHighContrast,
            "copy-line" => Self::CopyLine {
                text: decode_uri_component(&data("line")?).ok()?,
            },
            "copy-all-say" => Self::CopyAllSay,
            "share-location" => Self::ShareLocation,
            _ => return None,
        };
        Some(action)
    }
}
