//! Session view state.
//!
//! One [`Session`] exists per running client. It is created by bootstrap,
//! mutated only by the dispatcher and read by the renderer; nothing else
//! holds a reference to it.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::content::{ContentDocument, Scenario};
use crate::settings::Settings;

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    /// Scenario grid, contact form and display options.
    #[default]
    Home,
    /// One scenario with its tabs.
    Scenario,
}

/// The four fixed tabs of the scenario screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    /// Rights in plain language.
    #[default]
    Rights,
    /// Scripted phrases.
    Say,
    /// What to do.
    Steps,
    /// Legal citations.
    Legal,
}

impl Tab {
    /// All tabs in strip order.
    pub const ALL: [Tab; 4] = [Tab::Rights, Tab::Say, Tab::Steps, Tab::Legal];

    /// Identifier used in action data.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Rights => "rights",
            Self::Say => "say",
            Self::Steps => "steps",
            Self::Legal => "legal",
        }
    }

    /// Label shown on the tab.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Rights => "Your Rights",
            Self::Say => "Say This",
            Self::Steps => "What To Do",
            Self::Legal => "Legal Basis",
        }
    }

    /// Parse a tab identifier.
    #[must_use]
    pub fn parse(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tab| tab.id() == id)
    }
}

impl std::fmt::Display for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Mutable, process-local view state.
#[derive(Debug, Clone, Default)]
pub struct Session {
    content: Option<ContentDocument>,
    screen: Screen,
    active_scenario_id: Option<String>,
    active_tab: Tab,
    settings: Settings,
}

impl Session {
    /// A session with loaded settings and no content yet.
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Attach the content document.
    #[must_use]
    pub fn with_content(mut self, content: ContentDocument) -> Self {
        self.content = Some(content);
        self
    }

    /// The content document, if loaded.
    #[must_use]
    pub fn content(&self) -> Option<&ContentDocument> {
        self.content.as_ref()
    }

    /// Current screen.
    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Active tab on the scenario screen.
    #[must_use]
    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    /// Id of the selected scenario, if any.
    #[must_use]
    pub fn active_scenario_id(&self) -> Option<&str> {
        self.active_scenario_id.as_deref()
    }

    /// The selected scenario, if it resolves against the loaded content.
    #[must_use]
    pub fn active_scenario(&self) -> Option<&Scenario> {
        let id = self.active_scenario_id.as_deref()?;
        self.content.as_ref()?.scenario(id)
    }

    /// Current settings.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Mutable settings. Callers are responsible for persisting changes.
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Select a scenario without leaving the current screen.
    ///
    /// Returns false, leaving the state untouched, if `id` does not resolve.
    pub fn preselect(&mut self, id: &str) -> bool {
        if !self.content.as_ref().is_some_and(|c| c.contains(id)) {
            return false;
        }
        self.active_scenario_id = Some(id.to_string());
        true
    }

    /// Show a scenario on its first tab and remember it as the last one.
    ///
    /// Returns false, leaving the state untouched, if `id` does not resolve.
    pub fn open_scenario(&mut self, id: &str) -> bool {
        if !self.preselect(id) {
            debug!("Ignoring unknown scenario {id}");
            return false;
        }
        self.screen = Screen::Scenario;
        self.active_tab = Tab::Rights;
        self.settings.last_scenario = id.to_string();
        debug!("Opened scenario {id}");
        true
    }

    /// Return to the home screen. The selected scenario is kept.
    pub fn go_home(&mut self) {
        self.screen = Screen::Home;
    }

    /// Switch the active tab.
    pub fn set_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    /// Fall back to the home screen if the scenario screen has nothing to show.
    ///
    /// Returns true if the screen changed.
    pub fn normalize(&mut self) -> bool {
        if self.screen == Screen::Scenario && self.active_scenario().is_none() {
            debug!(
                id = ?self.active_scenario_id,
                "Active scenario no longer resolves, falling back to home"
            );
            self.screen = Screen::Home;
            return true;
        }
        false
    }
}
