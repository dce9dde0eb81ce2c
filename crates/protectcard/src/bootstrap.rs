//! Session start-up.

use tracing::{debug, info, warn};

use crate::content::ContentSource;
use crate::error::Error;
use crate::prefs::PreferenceStore;
use crate::session::Session;
use crate::settings::Settings;

/// Result of starting a session.
#[derive(Debug)]
pub enum Boot {
    /// Content loaded; the session is ready to render.
    Ready(Session),
    /// Content could not be loaded. Only the failure notice is shown.
    Failed(Error),
}

impl Boot {
    /// The session, if start-up succeeded.
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::Ready(session) => Some(session),
            Self::Failed(_) => None,
        }
    }
}

/// Load settings, fetch content and build the initial session.
///
/// Settings never fail to load. A remembered scenario that still exists is
/// selected, but the session starts on the home screen.
pub async fn bootstrap(prefs: &impl PreferenceStore, source: &dyn ContentSource) -> Boot {
    let settings = Settings::load(prefs);

    let content = match source.fetch().await {
        Ok(content) => content,
        Err(e) => {
            warn!("Failed to load content from {}: {e}", source.describe());
            return Boot::Failed(e);
        }
    };
    info!(
        "Loaded {} scenarios from {}",
        content.scenarios.len(),
        source.describe()
    );

    let last = settings.last_scenario.clone();
    let mut session = Session::new(settings).with_content(content);
    if !last.is_empty() {
        if session.preselect(&last) {
            debug!("Restored last scenario {last}");
        } else {
            debug!("Last scenario {last} no longer exists");
        }
    }

    Boot::Ready(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{fixtures, ContentDocument, FileSource};
    use crate::prefs::MemoryStore;
    use crate::session::Screen;
    use crate::settings::keys;

    struct StaticSource(Option<ContentDocument>);

    #[async_trait::async_trait]
    impl ContentSource for StaticSource {
        fn describe(&self) -> String {
            "static".to_string()
        }

        async fn fetch(&self) -> crate::error::Result<ContentDocument> {
            self.0
                .clone()
                .ok_or_else(|| Error::content_fetch("static", "offline"))
        }
    }

    fn ready(boot: Boot) -> Session {
        match boot {
            Boot::Ready(session) => session,
            Boot::Failed(e) => panic!("bootstrap failed: {e}"),
        }
    }

    #[tokio::test]
    async fn test_fresh_start() {
        let source = StaticSource(Some(fixtures::document()));
        let session = ready(bootstrap(&MemoryStore::new(), &source).await);

        assert_eq!(session.screen(), Screen::Home);
        assert!(session.active_scenario_id().is_none());
        assert_eq!(session.settings(), &Settings::default());
    }

    #[tokio::test]
    async fn test_restores_last_scenario_on_home() {
        let mut prefs = MemoryStore::new();
        prefs.set(keys::LAST_SCENARIO, "door-knock").unwrap();
        prefs.set(keys::LARGE_TEXT, "true").unwrap();

        let source = StaticSource(Some(fixtures::document()));
        let session = ready(bootstrap(&prefs, &source).await);

        assert_eq!(session.screen(), Screen::Home);
        assert_eq!(session.active_scenario_id(), Some("door-knock"));
        assert!(session.settings().large_text);
    }

    #[tokio::test]
    async fn test_stale_last_scenario_is_ignored() {
        let mut prefs = MemoryStore::new();
        prefs.set(keys::LAST_SCENARIO, "removed-scenario").unwrap();

        let source = StaticSource(Some(fixtures::document()));
        let session = ready(bootstrap(&prefs, &source).await);

        assert_eq!(session.screen(), Screen::Home);
        assert!(session.active_scenario_id().is_none());
    }

    #[tokio::test]
    async fn test_fetch_failure() {
        let boot = bootstrap(&MemoryStore::new(), &StaticSource(None)).await;
        assert!(boot.session().is_none());
        assert!(matches!(boot, Boot::Failed(ref e) if e.is_content_error()));
    }

    #[tokio::test]
    async fn test_missing_file_fails() {
        let source = FileSource::new("/nonexistent/protectcard/scenarios.json");
        let boot = bootstrap(&MemoryStore::new(), &source).await;
        assert!(matches!(boot, Boot::Failed(Error::ContentRead { .. })));
    }
}
