//! `protectcard` - CLI for ProtectCard
//!
//! This binary runs the content server and drives a client session from the
//! terminal.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::{bail, Context};
use clap::Parser;
use tracing::debug;

use protectcard::cli::{
    Cli, Command, ConfigCommand, ContactCommand, CopyCommand, DisplayCommand, OutputFormat,
    ShowCommand, SmsLinkCommand,
};
use protectcard::content::{ContentSource, FileSource, HttpSource};
use protectcard::render::html;
use protectcard::{
    dispatch, init_logging, links, Action, App, Capabilities, Config, Error, Notice, Session,
    Settings, SqliteStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let mut config = Config::load_from(cli.config.clone())?;

    // Execute the command
    match cli.command {
        Command::Serve(serve_cmd) => {
            if let Some(port) = serve_cmd.port {
                config.server.port = port;
                config.validate()?;
            }
            protectcard::server::serve(&config).await?;
            Ok(())
        }
        Command::Show(show_cmd) => handle_show(&config, show_cmd).await,
        Command::Contact(contact_cmd) => handle_contact(&config, contact_cmd).await,
        Command::Display(display_cmd) => handle_display(&config, &display_cmd).await,
        Command::Copy(copy_cmd) => handle_copy(&config, copy_cmd).await,
        Command::SmsLink(sms_cmd) => handle_sms_link(&config, &sms_cmd).await,
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    }
}

fn content_source(config: &Config) -> Box<dyn ContentSource> {
    match &config.client.content_url {
        Some(url) => Box::new(HttpSource::new(url)),
        None => Box::new(FileSource::new(config.server.content_path.clone())),
    }
}

fn open_prefs(config: &Config) -> anyhow::Result<SqliteStore> {
    let path = config.preferences_path();
    SqliteStore::open(&path).with_context(|| format!("opening preferences at {}", path.display()))
}

/// Start a client session. Fails with the load notice if content is missing.
async fn start_app(config: &Config) -> anyhow::Result<App<SqliteStore>> {
    let prefs = open_prefs(config)?;
    let source = content_source(config);
    debug!("Starting session with content from {}", source.describe());
    let capabilities =
        Capabilities::desktop().with_geolocation_timeout(config.geolocation_timeout());

    let (app, _frame) = App::start(prefs, source.as_ref(), capabilities).await;
    if app.session().is_none() {
        bail!(Notice::LoadFailed.message());
    }
    Ok(app)
}

/// Open `id` in the app, failing if it does not exist.
async fn open_scenario(app: &mut App<SqliteStore>, id: &str) -> anyhow::Result<()> {
    let known = app
        .session()
        .and_then(Session::content)
        .is_some_and(|content| content.contains(id));
    if !known {
        return Err(Error::UnknownScenario(id.to_string()).into());
    }
    app.handle(Action::OpenScenario { id: id.to_string() })
        .await?;
    Ok(())
}

fn print_notice(notice: Option<Notice>) {
    if let Some(notice) = notice {
        println!("{notice}");
    }
}

fn print_contact(settings: &Settings) {
    if settings.has_contact() {
        let name = if settings.contact_name.is_empty() {
            links::FALLBACK_CONTACT_NAME
        } else {
            settings.contact_name.as_str()
        };
        println!("Name:  {name}");
        println!("Phone: {}", settings.contact_phone);
    } else {
        println!("No trusted contact saved.");
    }
}

async fn handle_show(config: &Config, cmd: ShowCommand) -> anyhow::Result<()> {
    let mut app = start_app(config).await?;

    if let Some(id) = &cmd.scenario {
        open_scenario(&mut app, id).await?;
        app.handle(Action::SwitchTab {
            tab: cmd.tab.into(),
        })
        .await?;
    }

    let view = app.view();
    match cmd.format {
        OutputFormat::Html => {
            let title = app
                .session()
                .and_then(Session::content)
                .map_or("ProtectCard", |content| content.app.name.as_str());
            print!("{}", html::to_document(&view, title));
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
    }
    Ok(())
}

/// Contact and display commands only touch settings, so they run without
/// content.
async fn run_settings_action(config: &Config, action: Action) -> anyhow::Result<Settings> {
    let mut prefs = open_prefs(config)?;
    let mut session = Session::new(Settings::load(&prefs));
    let outcome = dispatch(&mut session, &mut prefs, &Capabilities::none(), action).await?;
    print_notice(outcome.notice);
    Ok(session.settings().clone())
}

async fn handle_contact(config: &Config, cmd: ContactCommand) -> anyhow::Result<()> {
    match cmd {
        ContactCommand::Show => {
            print_contact(&Settings::load(&open_prefs(config)?));
        }
        ContactCommand::Set { name, phone } => {
            let settings = run_settings_action(config, Action::SaveContact { name, phone }).await?;
            print_contact(&settings);
        }
        ContactCommand::Clear => {
            run_settings_action(config, Action::ClearContact).await?;
            println!("Trusted contact cleared.");
        }
    }
    Ok(())
}

async fn handle_display(config: &Config, cmd: &DisplayCommand) -> anyhow::Result<()> {
    let on_off = |on: bool| if on { "on" } else { "off" };
    match cmd {
        DisplayCommand::LargeText => {
            let settings = run_settings_action(config, Action::ToggleLargeText).await?;
            println!("Large text: {}", on_off(settings.large_text));
        }
        DisplayCommand::HighContrast => {
            let settings = run_settings_action(config, Action::ToggleHighContrast).await?;
            println!("High contrast: {}", on_off(settings.high_contrast));
        }
    }
    Ok(())
}

async fn handle_copy(config: &Config, cmd: CopyCommand) -> anyhow::Result<()> {
    let mut app = start_app(config).await?;
    open_scenario(&mut app, &cmd.scenario).await?;

    let (action, text) = {
        let scenario = app
            .session()
            .and_then(Session::active_scenario)
            .ok_or_else(|| Error::UnknownScenario(cmd.scenario.clone()))?;
        match cmd.line {
            Some(n) => {
                let line = n
                    .checked_sub(1)
                    .and_then(|i| scenario.say_this.get(i))
                    .with_context(|| {
                        format!(
                            "line {n} out of range, {} has {} \"Say This\" lines",
                            scenario.id,
                            scenario.say_this.len()
                        )
                    })?
                    .clone();
                (Action::CopyLine { text: line.clone() }, line)
            }
            None => (Action::CopyAllSay, scenario.say_this_text()),
        }
    };

    let frame = app.handle(action).await?;
    print_notice(frame.notice);
    if frame.notice == Some(Notice::CopyFailed) {
        println!("{text}");
    }
    Ok(())
}

async fn handle_sms_link(config: &Config, cmd: &SmsLinkCommand) -> anyhow::Result<()> {
    let app = start_app(config).await?;
    let session = app.session().context("session not started")?;
    let scenario = session
        .content()
        .and_then(|content| content.scenario(&cmd.scenario))
        .ok_or_else(|| Error::UnknownScenario(cmd.scenario.clone()))?;

    println!("{}", links::sms_link(session.settings(), &scenario.title));
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Server]");
                println!("  Host:               {}", config.server.host);
                println!("  Port:               {}", config.server.port);
                println!("  Public dir:         {}", config.server.public_dir.display());
                println!(
                    "  Content path:       {}",
                    config.server.content_path.display()
                );
                println!();
                println!("[Client]");
                println!(
                    "  Content URL:        {}",
                    config.client.content_url.as_deref().unwrap_or("(read file)")
                );
                println!(
                    "  Preferences:        {}",
                    config.preferences_path().display()
                );
                println!(
                    "  Geolocation wait:   {}s",
                    config.client.geolocation_timeout_secs
                );
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
