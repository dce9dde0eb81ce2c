//! Command-line interface for protectcard.
//!
//! This module provides the CLI structure for the `protectcard` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ConfigCommand, ContactCommand, CopyCommand, DisplayCommand, OutputFormat, ServeCommand,
    ShowCommand, SmsLinkCommand, TabArg,
};

/// protectcard - Know your rights, fast
///
/// Serves the ProtectCard scenario cards and drives a client session from
/// the terminal: render screens, manage the trusted contact and display
/// options, and copy scripted phrases.
#[derive(Debug, Parser)]
#[command(name = "protectcard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the content server
    Serve(ServeCommand),

    /// Render a screen
    Show(ShowCommand),

    /// Manage the trusted contact
    #[command(subcommand)]
    Contact(ContactCommand),

    /// Toggle display options
    #[command(subcommand)]
    Display(DisplayCommand),

    /// Copy "Say This" lines to the clipboard
    Copy(CopyCommand),

    /// Print the "Text contact" link for a scenario
    SmsLink(SmsLinkCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
