//! The client run loop.
//!
//! [`App`] owns the session, the preference store and the capabilities.
//! Every handled action yields a [`Frame`]: the next view if the session
//! changed, and a notice if there is something to tell the user.

use serde::Serialize;
use tracing::debug;

use crate::action::Action;
use crate::bootstrap::{bootstrap, Boot};
use crate::capability::Capabilities;
use crate::content::ContentSource;
use crate::dispatch::dispatch;
use crate::error::Result;
use crate::notice::Notice;
use crate::prefs::PreferenceStore;
use crate::render::{render, render_failure, View};
use crate::session::Session;

/// What to show after start-up or an action.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Frame {
    /// Replacement view, if the screen changed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<View>,
    /// Notice to display, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

impl Frame {
    /// Whether there is nothing to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.view.is_none() && self.notice.is_none()
    }
}

/// A running client.
#[derive(Debug)]
pub struct App<P: PreferenceStore> {
    session: Option<Session>,
    prefs: P,
    capabilities: Capabilities,
}

impl<P: PreferenceStore> App<P> {
    /// Bootstrap a session and produce the first frame.
    ///
    /// If content fails to load the first frame is the failure notice and
    /// the app ignores every later action.
    pub async fn start(
        prefs: P,
        source: &dyn ContentSource,
        capabilities: Capabilities,
    ) -> (Self, Frame) {
        let (session, view) = match bootstrap(&prefs, source).await {
            Boot::Ready(session) => {
                let view = render(&session);
                (Some(session), view)
            }
            Boot::Failed(_) => (None, render_failure()),
        };

        let app = Self {
            session,
            prefs,
            capabilities,
        };
        let frame = Frame {
            view: Some(view),
            notice: None,
        };
        (app, frame)
    }

    /// Handle one action.
    ///
    /// # Errors
    ///
    /// Returns an error if settings could not be persisted.
    pub async fn handle(&mut self, action: Action) -> Result<Frame> {
        let Some(session) = self.session.as_mut() else {
            debug!(action = action.tag(), "Ignoring action, content never loaded");
            return Ok(Frame::default());
        };

        let outcome = dispatch(session, &mut self.prefs, &self.capabilities, action).await?;
        Ok(Frame {
            view: outcome.rerender.then(|| render(session)),
            notice: outcome.notice,
        })
    }

    /// The session, unless start-up failed.
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// The current view.
    #[must_use]
    pub fn view(&self) -> View {
        self.session.as_ref().map_or_else(render_failure, render)
    }

    /// The preference store.
    #[must_use]
    pub fn prefs(&self) -> &P {
        &self.prefs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::fakes::RecordingClipboard;
    use crate::content::{fixtures, ContentDocument};
    use crate::error::Error;
    use crate::prefs::MemoryStore;
    use crate::render::LARGE_TEXT_CLASS;
    use crate::session::{Screen, Tab};
    use crate::settings::keys;

    struct StaticSource(Option<ContentDocument>);

    #[async_trait::async_trait]
    impl crate::content::ContentSource for StaticSource {
        fn describe(&self) -> String {
            "static".to_string()
        }

        async fn fetch(&self) -> Result<ContentDocument> {
            self.0
                .clone()
                .ok_or_else(|| Error::content_fetch("static", "offline"))
        }
    }

    async fn started(caps: Capabilities) -> App<MemoryStore> {
        let (app, frame) = App::start(
            MemoryStore::new(),
            &StaticSource(Some(fixtures::document())),
            caps,
        )
        .await;
        assert!(frame.view.is_some());
        app
    }

    #[tokio::test]
    async fn test_start_renders_home() {
        let (app, frame) = App::start(
            MemoryStore::new(),
            &StaticSource(Some(fixtures::document())),
            Capabilities::none(),
        )
        .await;

        let view = frame.view.unwrap();
        assert_eq!(view.with_class("card").len(), 3);
        assert_eq!(app.view(), view);
    }

    #[tokio::test]
    async fn test_failed_start_shows_one_notice_and_ignores_actions() {
        let (mut app, frame) =
            App::start(MemoryStore::new(), &StaticSource(None), Capabilities::none()).await;

        assert_eq!(frame.view, Some(render_failure()));
        assert!(app.session().is_none());

        let frame = app
            .handle(Action::OpenScenario {
                id: "traffic-stop".to_string(),
            })
            .await
            .unwrap();
        assert!(frame.is_empty());
        assert!(app.prefs().is_empty());
    }

    #[tokio::test]
    async fn test_navigation_frames() {
        let mut app = started(Capabilities::none()).await;

        let frame = app
            .handle(Action::OpenScenario {
                id: "traffic-stop".to_string(),
            })
            .await
            .unwrap();
        assert!(frame.notice.is_none());
        assert_eq!(frame.view.unwrap().with_class("tab").len(), 4);

        let frame = app.handle(Action::SwitchTab { tab: Tab::Legal }).await.unwrap();
        assert!(frame
            .view
            .unwrap()
            .root
            .text_content()
            .contains("Fourth Amendment"));

        app.handle(Action::GoHome).await.unwrap();
        assert_eq!(app.session().unwrap().screen(), Screen::Home);
    }

    #[tokio::test]
    async fn test_toggle_rerenders_with_body_class() {
        let mut app = started(Capabilities::none()).await;

        let frame = app.handle(Action::ToggleLargeText).await.unwrap();
        assert_eq!(frame.view.unwrap().body_classes, vec![LARGE_TEXT_CLASS]);
        assert_eq!(
            app.prefs().get(keys::LARGE_TEXT).unwrap().as_deref(),
            Some("true")
        );
    }

    #[tokio::test]
    async fn test_copy_has_notice_without_view() {
        let clipboard = RecordingClipboard::default();
        let mut app = started(Capabilities::none().with_clipboard(clipboard.clone())).await;

        let frame = app
            .handle(Action::CopyLine {
                text: "hello".to_string(),
            })
            .await
            .unwrap();
        assert!(frame.view.is_none());
        assert_eq!(frame.notice, Some(Notice::Copied));
        assert_eq!(clipboard.count(), 1);
    }

    #[tokio::test]
    async fn test_save_contact_frame() {
        let mut app = started(Capabilities::none()).await;

        let frame = app
            .handle(Action::SaveContact {
                name: Some("Ana".to_string()),
                phone: Some("555 0100".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(frame.notice, Some(Notice::ContactSaved));

        let view = frame.view.unwrap();
        let inputs: Vec<_> = view
            .root
            .elements()
            .into_iter()
            .filter_map(|e| e.get_attr("value"))
            .collect();
        assert_eq!(inputs, vec!["Ana", "555 0100"]);
    }
}
