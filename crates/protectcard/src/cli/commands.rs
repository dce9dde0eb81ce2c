//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::session::Tab;

/// Serve command arguments.
#[derive(Debug, Args)]
pub struct ServeCommand {
    /// Port to listen on (overrides configuration and `PORT`)
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Scenario to open (home screen if omitted)
    #[arg(short, long)]
    pub scenario: Option<String>,

    /// Tab to show on the scenario screen
    #[arg(short, long, value_enum, default_value = "rights")]
    pub tab: TabArg,

    /// Output format
    #[arg(short, long, value_enum, default_value = "html")]
    pub format: OutputFormat,
}

/// Trusted contact commands.
#[derive(Debug, Subcommand)]
pub enum ContactCommand {
    /// Show the saved trusted contact
    Show,

    /// Save the trusted contact
    Set {
        /// Contact name
        #[arg(short, long)]
        name: Option<String>,

        /// Contact phone number
        #[arg(short, long)]
        phone: Option<String>,
    },

    /// Forget the trusted contact
    Clear,
}

/// Display preference commands. Each one flips the setting.
#[derive(Debug, Subcommand)]
pub enum DisplayCommand {
    /// Toggle large text
    LargeText,

    /// Toggle high contrast
    HighContrast,
}

/// Copy command arguments.
#[derive(Debug, Args)]
pub struct CopyCommand {
    /// Scenario to copy from
    #[arg(short, long)]
    pub scenario: String,

    /// Copy only this "Say This" line (1-based)
    #[arg(short, long)]
    pub line: Option<usize>,
}

/// SMS link command arguments.
#[derive(Debug, Args)]
pub struct SmsLinkCommand {
    /// Scenario named in the message
    #[arg(short, long)]
    pub scenario: String,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Scenario tab argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TabArg {
    /// Your Rights
    #[default]
    Rights,
    /// Say This
    Say,
    /// What To Do
    Steps,
    /// Legal Basis
    Legal,
}

impl From<TabArg> for Tab {
    fn from(arg: TabArg) -> Self {
        match arg {
            TabArg::Rights => Self::Rights,
            TabArg::Say => Self::Say,
            TabArg::Steps => Self::Steps,
            TabArg::Legal => Self::Legal,
        }
    }
}

/// Output format for rendered views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Standalone HTML page
    #[default]
    Html,
    /// View tree as JSON
    Json,
}
