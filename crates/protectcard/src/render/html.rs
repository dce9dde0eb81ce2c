//! HTML back-end.
//!
//! Turns a [`View`] into markup. Every text node and attribute value is
//! escaped. An element's action is written as `data-action` followed by the
//! action's data attributes.

use std::fmt::Write as _;

use super::{Element, Node, View};

/// Elements that never have children or a closing tag.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "meta", "link"];

/// Escape text for use in element content or a quoted attribute value.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_into(&mut out, text);
    out
}

fn escape_into(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}

fn write_attr(out: &mut String, name: &str, value: &str) {
    let _ = write!(out, " {name}=\"");
    escape_into(out, value);
    out.push('"');
}

fn write_element(out: &mut String, element: &Element) {
    out.push('<');
    out.push_str(element.tag);

    if !element.classes.is_empty() {
        write_attr(out, "class", &element.classes.join(" "));
    }
    for (name, value) in &element.attrs {
        write_attr(out, name, value);
    }
    if let Some(action) = &element.action {
        write_attr(out, "data-action", action.tag());
        for (key, value) in action.data() {
            write_attr(out, &format!("data-{key}"), &value);
        }
    }

    if VOID_ELEMENTS.contains(&element.tag) {
        out.push_str(" />");
        return;
    }

    out.push('>');
    for child in &element.children {
        write_node(out, child);
    }
    let _ = write!(out, "</{}>", element.tag);
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Element(element) => write_element(out, element),
        Node::Text { text } => escape_into(out, text),
        Node::Fragment { children } => {
            for child in children {
                write_node(out, child);
            }
        }
    }
}

/// Markup for the view's content.
#[must_use]
pub fn to_html(view: &View) -> String {
    let mut out = String::new();
    write_node(&mut out, &view.root);
    out
}

/// A standalone HTML page around the view, with body classes applied.
#[must_use]
pub fn to_document(view: &View, title: &str) -> String {
    let mut out = String::from("<!doctype html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("<meta charset=\"utf-8\" />\n");
    out.push_str(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\n",
    );
    out.push_str("<title>");
    escape_into(&mut out, title);
    out.push_str("</title>\n</head>\n<body");
    if !view.body_classes.is_empty() {
        write_attr(&mut out, "class", &view.body_classes.join(" "));
    }
    out.push_str(">\n<main id=\"app\">");
    out.push_str(&to_html(view));
    out.push_str("</main>\n</body>\n</html>\n");
    out
}
