//! Scenario content model.
//!
//! The content document is a single JSON file holding the app descriptor and
//! the ordered list of scenarios. It is loaded once per session and never
//! mutated afterwards.

pub mod source;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub use source::{ContentSource, FileSource, HttpSource};

/// App-wide name and legal disclaimer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppDescriptor {
    /// Display name shown as the home screen title.
    pub name: String,
    /// Disclaimer shown under every title.
    pub disclaimer: String,
}

/// A legal citation backing a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalBasis {
    /// Short name of the law or ruling.
    pub title: String,
    /// Plain-language summary.
    pub summary: String,
}

/// One guidance profile, such as a type of encounter.
///
/// Sequence fields keep their document order. Missing sequences decode as
/// empty so that every scenario can be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    /// Unique key within the document.
    pub id: String,
    /// Emoji or short glyph shown on cards and headings.
    #[serde(default)]
    pub icon: String,
    /// Human-readable title.
    pub title: String,
    /// Rights in plain language.
    #[serde(default)]
    pub rights_plain: Vec<String>,
    /// Scripted phrases to say out loud.
    #[serde(default)]
    pub say_this: Vec<String>,
    /// Extra warnings shown under the scripted phrases.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub important_notes: Vec<String>,
    /// What to do, in order.
    #[serde(default)]
    pub steps: Vec<String>,
    /// Supporting legal citations.
    #[serde(default)]
    pub legal_basis: Vec<LegalBasis>,
}

impl Scenario {
    /// All say-this lines joined by newlines, as copied to the clipboard.
    #[must_use]
    pub fn say_this_text(&self) -> String {
        self.say_this.join("\n")
    }
}

/// The whole content document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentDocument {
    /// App descriptor.
    pub app: AppDescriptor,
    /// Scenarios in display order.
    #[serde(default)]
    pub scenarios: Vec<Scenario>,
}

impl ContentDocument {
    /// Parse a document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid content document.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a document from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::ContentRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Look up a scenario by id. The first match wins.
    #[must_use]
    pub fn scenario(&self, id: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.id == id)
    }

    /// Check whether a scenario id resolves.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.scenario(id).is_some()
    }
}
