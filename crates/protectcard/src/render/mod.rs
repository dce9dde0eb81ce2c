//! Renderer: session state to declarative views.
//!
//! Rendering is a pure function of the session. The output is a [`View`]
//! tree that knows nothing about the DOM; [`html`] turns it into markup and
//! serde turns it into JSON. Every field access tolerates empty sequences,
//! so no scenario can make rendering fail.

pub mod html;
mod screens;

use serde::Serialize;

use crate::action::Action;
use crate::notice::Notice;
use crate::session::{Screen, Session};

pub use screens::{render_home, render_scenario};

/// Body class applied when large text is on.
pub const LARGE_TEXT_CLASS: &str = "large-text";

/// Body class applied when high contrast is on.
pub const HIGH_CONTRAST_CLASS: &str = "high-contrast";

/// A rendered screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View {
    /// Classes for the document body (display preferences).
    pub body_classes: Vec<&'static str>,
    /// Screen content.
    pub root: Node,
}

/// One node of a view tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Node {
    /// An element with optional action.
    Element(Element),
    /// Literal text.
    Text {
        /// The text, unescaped.
        text: String,
    },
    /// Siblings without a wrapper element.
    Fragment {
        /// The siblings.
        children: Vec<Node>,
    },
}

/// An element node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    /// Tag name.
    pub tag: &'static str,
    /// CSS classes.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<&'static str>,
    /// Other attributes, in insertion order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attrs: Vec<(&'static str, String)>,
    /// The action triggered by activating this element.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,
    /// Child nodes.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Element {
    /// A bare element.
    #[must_use]
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            classes: Vec::new(),
            attrs: Vec::new(),
            action: None,
            children: Vec::new(),
        }
    }

    /// Add a class.
    #[must_use]
    pub fn class(mut self, class: &'static str) -> Self {
        self.classes.push(class);
        self
    }

    /// Add a class if `on`.
    #[must_use]
    pub fn class_if(self, class: &'static str, on: bool) -> Self {
        if on {
            self.class(class)
        } else {
            self
        }
    }

    /// Add an attribute.
    #[must_use]
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    /// Attach an action.
    #[must_use]
    pub fn action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    /// Append a child.
    #[must_use]
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append a text child.
    #[must_use]
    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::text(text))
    }

    /// Append several children.
    #[must_use]
    pub fn children<I, N>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Look up an attribute value.
    #[must_use]
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Whether the element carries `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| *c == class)
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl Node {
    /// A text node.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Sibling nodes without a wrapper.
    #[must_use]
    pub fn fragment(children: Vec<Node>) -> Self {
        Self::Fragment { children }
    }

    /// This node and all its descendants, depth first.
    #[must_use]
    pub fn descendants(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        self.collect(&mut out);
        out
    }

    fn collect<'a>(&'a self, out: &mut Vec<&'a Node>) {
        out.push(self);
        let children = match self {
            Self::Element(element) => &element.children,
            Self::Fragment { children } => children,
            Self::Text { .. } => return,
        };
        for child in children {
            child.collect(out);
        }
    }

    /// All elements in the tree, depth first.
    #[must_use]
    pub fn elements(&self) -> Vec<&Element> {
        self.descendants()
            .into_iter()
            .filter_map(|node| match node {
                Self::Element(element) => Some(element),
                _ => None,
            })
            .collect()
    }

    /// Concatenated text of the tree.
    #[must_use]
    pub fn text_content(&self) -> String {
        self.descendants()
            .into_iter()
            .filter_map(|node| match node {
                Self::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl View {
    /// Every action reachable from the view, in document order.
    #[must_use]
    pub fn actions(&self) -> Vec<&Action> {
        self.root
            .elements()
            .into_iter()
            .filter_map(|e| e.action.as_ref())
            .collect()
    }

    /// Elements carrying `class`.
    #[must_use]
    pub fn with_class(&self, class: &str) -> Vec<&Element> {
        self.root
            .elements()
            .into_iter()
            .filter(|e| e.has_class(class))
            .collect()
    }
}

/// Render whatever the session is showing.
///
/// A session without content renders a loading placeholder. A scenario
/// screen whose scenario does not resolve renders the home screen.
#[must_use]
pub fn render(session: &Session) -> View {
    let Some(content) = session.content() else {
        return loading();
    };

    let root = match (session.screen(), session.active_scenario()) {
        (Screen::Scenario, Some(scenario)) => render_scenario(
            &content.app,
            scenario,
            session.active_tab(),
            session.settings(),
        ),
        _ => render_home(&content.app, &content.scenarios, session.settings()),
    };

    let settings = session.settings();
    let mut body_classes = Vec::new();
    if settings.large_text {
        body_classes.push(LARGE_TEXT_CLASS);
    }
    if settings.high_contrast {
        body_classes.push(HIGH_CONTRAST_CLASS);
    }

    View { body_classes, root }
}

/// Placeholder while content is loading.
#[must_use]
pub fn loading() -> View {
    View {
        body_classes: Vec::new(),
        root: Element::new("p").text("Loading…").into(),
    }
}

/// The only thing shown when content failed to load.
#[must_use]
pub fn render_failure() -> View {
    View {
        body_classes: Vec::new(),
        root: Element::new("p")
            .class("error-notice")
            .attr("role", "alert")
            .text(Notice::LoadFailed.message())
            .into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::fixtures;
    use crate::settings::Settings;

    fn session() -> Session {
        Session::new(Settings::default()).with_content(fixtures::document())
    }

    #[test]
    fn test_render_without_content_is_loading() {
        let view = render(&Session::new(Settings::default()));
        assert_eq!(view.root.text_content(), "Loading…");
        assert!(view.actions().is_empty());
    }

    #[test]
    fn test_render_home_by_default() {
        let view = render(&session());
        assert_eq!(view.with_class("card").len(), 3);
    }

    #[test]
    fn test_render_scenario_screen() {
        let mut session = session();
        session.open_scenario("door-knock");

        let view = render(&session);
        assert!(view.root.text_content().contains("Knock at the Door"));
        assert_eq!(view.with_class("tab").len(), 4);
    }

    #[test]
    fn test_render_falls_back_to_home_without_mutating() {
        let mut session = session();
        session.open_scenario("door-knock");
        let stale = session.clone().with_content(crate::content::ContentDocument::default());

        let view = render(&stale);
        assert!(view.with_class("tab").is_empty());
        assert!(view.root.text_content().contains("Choose a scenario"));
    }

    #[test]
    fn test_body_classes_follow_settings() {
        let mut session = session();
        assert!(render(&session).body_classes.is_empty());

        session.settings_mut().large_text = true;
        assert_eq!(render(&session).body_classes, vec![LARGE_TEXT_CLASS]);

        session.settings_mut().high_contrast = true;
        assert_eq!(
            render(&session).body_classes,
            vec![LARGE_TEXT_CLASS, HIGH_CONTRAST_CLASS]
        );
    }

    #[test]
    fn test_render_failure_is_single_notice() {
        let view = render_failure();
        assert_eq!(view.root.descendants().len(), 2);
        assert_eq!(view.root.elements().len(), 1);
        assert_eq!(
            view.root.text_content(),
            "Unable to load app data. Please try again."
        );
    }

    #[test]
    fn test_element_builder() {
        let element = Element::new("button")
            .class("btn")
            .class_if("active", false)
            .class_if("toggle", true)
            .attr("type", "button")
            .action(Action::GoHome)
            .text("Back");

        assert_eq!(element.classes, vec!["btn", "toggle"]);
        assert_eq!(element.get_attr("type"), Some("button"));
        assert_eq!(element.get_attr("href"), None);
        assert!(element.has_class("toggle"));
        assert_eq!(Node::from(element).text_content(), "Back");
    }

    #[test]
    fn test_view_serializes_to_json() {
        let json = serde_json::to_value(render(&session())).unwrap();
        assert_eq!(json["root"]["kind"], "element");
        assert_eq!(json["root"]["tag"], "section");
    }
}
