//! `protectcard` - Know-your-rights cards for emergency encounters
//!
//! This library provides the content server for the scenario document and
//! the client core that renders it: session state, a declarative view tree,
//! the action dispatcher, persisted display and contact preferences, and
//! injected device capabilities (clipboard, geolocation, share sheet).

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod action;
pub mod app;
pub mod bootstrap;
pub mod capability;
pub mod cli;
pub mod config;
pub mod content;
pub mod dispatch;
pub mod error;
pub mod links;
pub mod logging;
pub mod notice;
pub mod prefs;
pub mod render;
pub mod server;
pub mod session;
pub mod settings;

pub use action::Action;
pub use app::{App, Frame};
pub use bootstrap::{bootstrap, Boot};
pub use capability::{Capabilities, Capability};
pub use config::Config;
pub use content::{ContentDocument, Scenario};
pub use dispatch::{dispatch, Outcome};
pub use error::{Error, Result};
pub use logging::init_logging;
pub use notice::Notice;
pub use prefs::{MemoryStore, PreferenceStore, SqliteStore};
pub use render::View;
pub use session::{Screen, Session, Tab};
pub use settings::Settings;
