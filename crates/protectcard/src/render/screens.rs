//! Home and scenario screens.

use crate::action::Action;
use crate::content::{AppDescriptor, Scenario};
use crate::links::{sms_link, EMERGENCY_DIAL};
use crate::session::Tab;
use crate::settings::Settings;

use super::{Element, Node};

const ACTIVE: &str = "active";

/// Placeholder for scenarios without legal citations.
pub const NO_LEGAL_BASIS: &str = "No legal basis details for this emergency-focused screen.";

fn button(label: impl Into<String>, action: Action) -> Element {
    Element::new("button")
        .class("btn")
        .attr("type", "button")
        .action(action)
        .text(label)
}

fn heading(text: &str) -> Element {
    Element::new("h2").class("section-title").text(text)
}

fn bullets(items: &[String]) -> Element {
    Element::new("ul")
        .class("list")
        .children(items.iter().map(|item| Element::new("li").text(item.as_str())))
}

fn title_with_icon(icon: &str, title: &str) -> String {
    if icon.is_empty() {
        title.to_string()
    } else {
        format!("{icon} {title}")
    }
}

/// The home screen: scenario grid, trusted contact form and display toggles.
#[must_use]
pub fn render_home(app: &AppDescriptor, scenarios: &[Scenario], settings: &Settings) -> Node {
    let cards = scenarios.iter().map(|scenario| {
        Element::new("button")
            .class("card")
            .attr("type", "button")
            .action(Action::OpenScenario {
                id: scenario.id.clone(),
            })
            .child(
                Element::new("span")
                    .class("card-icon")
                    .attr("aria-hidden", "true")
                    .text(scenario.icon.as_str()),
            )
            .child(Element::new("span").class("card-title").text(scenario.title.as_str()))
    });

    let contact_form = Element::new("div")
        .class("form-grid")
        .child(
            Element::new("input")
                .class("input")
                .attr("id", "contactName")
                .attr("type", "text")
                .attr("autocomplete", "name")
                .attr("placeholder", "Contact name")
                .attr("value", settings.contact_name.as_str()),
        )
        .child(
            Element::new("input")
                .class("input")
                .attr("id", "contactPhone")
                .attr("type", "tel")
                .attr("autocomplete", "tel")
                .attr("placeholder", "Phone number")
                .attr("value", settings.contact_phone.as_str()),
        )
        .child(
            Element::new("div")
                .class("row")
                .child(
                    button(
                        "Save",
                        Action::SaveContact {
                            name: None,
                            phone: None,
                        },
                    )
                    .class("btn-primary"),
                )
                .child(button("Clear", Action::ClearContact)),
        );

    let toggles = Element::new("div")
        .class("toggle-group")
        .child(
            button("A+ Large text", Action::ToggleLargeText)
                .class("toggle")
                .class_if(ACTIVE, settings.large_text)
                .attr("aria-pressed", settings.large_text.to_string()),
        )
        .child(
            button("High contrast", Action::ToggleHighContrast)
                .class("toggle")
                .class_if(ACTIVE, settings.high_contrast)
                .attr("aria-pressed", settings.high_contrast.to_string()),
        );

    Element::new("section")
        .class("screen")
        .child(Element::new("h1").class("header-title").text(app.name.as_str()))
        .child(Element::new("p").class("disclaimer").text(app.disclaimer.as_str()))
        .child(heading("Choose a scenario"))
        .child(Element::new("div").class("scenario-grid").children(cards))
        .child(heading("Trusted contact"))
        .child(contact_form)
        .child(heading("Display options"))
        .child(toggles)
        .into()
}

fn say_panel(scenario: &Scenario) -> Element {
    let rows = scenario.say_this.iter().map(|line| {
        Element::new("div")
            .class("say-row")
            .child(Element::new("p").class("say-line").text(line.as_str()))
            .child(
                button("Copy", Action::CopyLine { text: line.clone() })
                    .class("btn-small")
                    .attr("aria-label", format!("Copy: {line}")),
            )
    });

    let mut panel = Element::new("div")
        .class("say-panel")
        .child(button("Copy Say This", Action::CopyAllSay).class("btn-primary"))
        .children(rows);

    if !scenario.important_notes.is_empty() {
        panel = panel.child(
            Element::new("div")
                .class("note")
                .child(Element::new("strong").text("Important:"))
                .text(format!(" {}", scenario.important_notes.join(" "))),
        );
    }
    panel
}

fn legal_panel(scenario: &Scenario) -> Element {
    if scenario.legal_basis.is_empty() {
        return Element::new("p").class("muted").text(NO_LEGAL_BASIS);
    }
    Element::new("div").class("legal-list").children(scenario.legal_basis.iter().map(|basis| {
        Element::new("article")
            .class("legal-item")
            .child(Element::new("h3").text(basis.title.as_str()))
            .child(Element::new("p").text(basis.summary.as_str()))
    }))
}

fn panel(scenario: &Scenario, tab: Tab) -> Element {
    let body = match tab {
        Tab::Rights => bullets(&scenario.rights_plain),
        Tab::Say => say_panel(scenario),
        Tab::Steps => bullets(&scenario.steps),
        Tab::Legal => legal_panel(scenario),
    };
    Element::new("div")
        .class("panel")
        .attr("role", "tabpanel")
        .attr("data-tab", tab.id())
        .child(body)
}

fn action_bar(scenario: &Scenario, settings: &Settings) -> Element {
    let link = |label: &str, href: String| {
        Element::new("a").class("btn").attr("href", href).text(label)
    };

    Element::new("nav")
        .class("sticky-bar")
        .attr("aria-label", "Emergency actions")
        .child(
            Element::new("div")
                .class("sticky-grid")
                .child(link("Call 911", EMERGENCY_DIAL.to_string()).class("btn-danger"))
                .child(link("Text contact", sms_link(settings, &scenario.title)))
                .child(button("Share location", Action::ShareLocation))
                .child(button("Copy \u{201c}Say This\u{201d}", Action::CopyAllSay)),
        )
}

/// A scenario screen with its tab strip, active panel and action bar.
#[must_use]
pub fn render_scenario(
    app: &AppDescriptor,
    scenario: &Scenario,
    tab: Tab,
    settings: &Settings,
) -> Node {
    let tabs = Tab::ALL.into_iter().map(|t| {
        Element::new("button")
            .class("tab")
            .class_if(ACTIVE, t == tab)
            .attr("type", "button")
            .attr("role", "tab")
            .attr("aria-selected", (t == tab).to_string())
            .action(Action::SwitchTab { tab: t })
            .text(t.label())
    });

    let section = Element::new("section")
        .class("screen")
        .child(
            Element::new("div")
                .class("nav-head")
                .child(button("\u{2190} Back", Action::GoHome).class("back-btn")),
        )
        .child(
            Element::new("h1")
                .class("header-title")
                .text(title_with_icon(&scenario.icon, &scenario.title)),
        )
        .child(Element::new("p").class("disclaimer").text(app.disclaimer.as_str()))
        .child(Element::new("div").class("tabs").attr("role", "tablist").children(tabs))
        .child(panel(scenario, tab))
        .child(Element::new("div").class("footer-space").attr("aria-hidden", "true"));

    Node::fragment(vec![section.into(), action_bar(scenario, settings).into()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::fixtures;
    use crate::render::View;

    fn view(root: Node) -> View {
        View {
            body_classes: Vec::new(),
            root,
        }
    }

    fn scenario_view(id: &str, tab: Tab, settings: &Settings) -> View {
        let doc = fixtures::document();
        let scenario = doc.scenario(id).unwrap();
        view(render_scenario(&doc.app, scenario, tab, settings))
    }

    #[test]
    fn test_home_cards_in_document_order() {
        let doc = fixtures::document();
        let home = view(render_home(&doc.app, &doc.scenarios, &Settings::default()));

        let ids: Vec<_> = home
            .actions()
            .into_iter()
            .filter_map(|a| match a {
                Action::OpenScenario { id } => Some(id.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(ids, vec!["traffic-stop", "door-knock", "medical"]);
    }

    #[test]
    fn test_home_prefills_contact_inputs() {
        let doc = fixtures::document();
        let settings = Settings {
            contact_name: "Ana".to_string(),
            contact_phone: "555 0100".to_string(),
            ..Settings::default()
        };
        let home = view(render_home(&doc.app, &doc.scenarios, &settings));

        let inputs: Vec<_> = home
            .root
            .elements()
            .into_iter()
            .filter(|e| e.tag == "input")
            .map(|e| e.get_attr("value").unwrap_or_default())
            .collect();
        assert_eq!(inputs, vec!["Ana", "555 0100"]);
    }

    #[test]
    fn test_home_toggles_marked_active() {
        let doc = fixtures::document();
        let mut settings = Settings::default();
        let home = view(render_home(&doc.app, &doc.scenarios, &settings));
        assert!(home.with_class(ACTIVE).is_empty());

        settings.high_contrast = true;
        let home = view(render_home(&doc.app, &doc.scenarios, &settings));
        let active = home.with_class(ACTIVE);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].action, Some(Action::ToggleHighContrast));
    }

    #[test]
    fn test_every_scenario_and_tab_renders() {
        let doc = fixtures::document();
        for scenario in &doc.scenarios {
            for tab in Tab::ALL {
                let v = view(render_scenario(&doc.app, scenario, tab, &Settings::default()));
                assert!(!v.root.text_content().is_empty());
                assert_eq!(v.with_class("panel").len(), 1);
                assert!(v.actions().contains(&&Action::GoHome));
            }
        }
    }

    #[test]
    fn test_active_tab_marked() {
        let v = scenario_view("traffic-stop", Tab::Steps, &Settings::default());
        let tabs = v.with_class("tab");
        assert_eq!(tabs.len(), 4);

        let active: Vec<_> = tabs.iter().filter(|e| e.has_class(ACTIVE)).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].action, Some(Action::SwitchTab { tab: Tab::Steps }));
    }

    #[test]
    fn test_rights_tab_lists_items() {
        let v = scenario_view("traffic-stop", Tab::Rights, &Settings::default());
        let items: Vec<_> = v
            .root
            .elements()
            .into_iter()
            .filter(|e| e.tag == "li")
            .collect();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_say_tab_has_copy_per_line_and_notes() {
        let v = scenario_view("traffic-stop", Tab::Say, &Settings::default());

        let copies = v
            .actions()
            .into_iter()
            .filter(|a| matches!(a, Action::CopyLine { .. }))
            .count();
        assert_eq!(copies, 2);

        let text = v.root.text_content();
        assert!(text.contains("Important: Keep your hands visible. Do not resist."));
        assert!(text.contains("Copy Say This"));
    }

    #[test]
    fn test_say_tab_without_notes_has_no_note_block() {
        let v = scenario_view("door-knock", Tab::Say, &Settings::default());
        assert!(v.with_class("note").is_empty());
    }

    #[test]
    fn test_legal_tab_placeholder_when_empty() {
        let v = scenario_view("door-knock", Tab::Legal, &Settings::default());
        assert!(v.root.text_content().contains(NO_LEGAL_BASIS));

        let v = scenario_view("traffic-stop", Tab::Legal, &Settings::default());
        assert_eq!(v.with_class("legal-item").len(), 1);
        assert!(!v.root.text_content().contains(NO_LEGAL_BASIS));
    }

    #[test]
    fn test_action_bar_links() {
        let settings = Settings {
            contact_phone: "555 0100".to_string(),
            ..Settings::default()
        };
        let v = scenario_view("medical", Tab::Rights, &settings);

        let hrefs: Vec<_> = v
            .root
            .elements()
            .into_iter()
            .filter_map(|e| e.get_attr("href"))
            .collect();
        assert_eq!(hrefs.len(), 2);
        assert_eq!(hrefs[0], "tel:911");
        assert!(hrefs[1].starts_with("sms:5550100?body="));

        let actions = v.actions();
        assert!(actions.contains(&&Action::ShareLocation));
        assert!(actions.contains(&&Action::CopyAllSay));
    }

    #[test]
    fn test_heading_includes_icon() {
        let v = scenario_view("traffic-stop", Tab::Rights, &Settings::default());
        let h1 = v.root.elements().into_iter().find(|e| e.tag == "h1").unwrap();
        assert_eq!(Node::from(h1.clone()).text_content(), "🚗 Traffic Stop");
    }
}
