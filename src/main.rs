//! LazyUsers - A terminal user interface for a remote user directory
//!
//! Lists users fetched from a REST API, shows per-user details, and supports
//! adding, editing and deleting users in a local in-memory copy.

mod api;
mod app;
mod config;
mod error;
mod events;
mod logging;
mod tasks;
mod tui;
mod ui;
mod users;
mod validation;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::api::UsersClient;
use crate::app::{App, Route};
use crate::config::Config;
use crate::error::AppError;
use crate::events::EventHandler;
use crate::tasks::{ApiMessage, TaskSpawner};
use crate::tui::Tui;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "lazyusers", version, about)]
struct Cli {
    /// Base URL of the users API (overrides the config file)
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Path to the configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Route to open at start-up, e.g. `/user/3`
    #[arg(long, value_name = "PATH", default_value = "/")]
    route: String,

    /// Log filter, e.g. `lazyusers=debug` (defaults to RUST_LOG)
    #[arg(long, value_name = "FILTER")]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging failures must not stop the app; report them before the TUI owns the screen
    if let Err(e) = logging::init(cli.log_level.as_deref()) {
        eprintln!("Warning: logging disabled: {:#}", e);
    }

    let route: Route = cli
        .route
        .parse()
        .with_context(|| format!("Invalid --route '{}'", cli.route))?;

    // An explicit config file must be valid; the default one falls back
    let mut config_warning = None;
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load config, using defaults");
            config_warning = Some(AppError::from(e).user_message());
            Config::default()
        }),
    };
    if let Some(base_url) = cli.base_url {
        config.settings.api_base_url = base_url;
        config.validate().context("Invalid --base-url")?;
    }

    let client = UsersClient::from_settings(&config.settings)
        .context("Failed to create the API client")?;
    info!(base_url = client.base_url(), "Using users API");

    let mut terminal = tui::enter().context("Failed to initialize the terminal")?;

    let mut app = App::with_route(route);
    if let Some(message) = config_warning {
        app.notify_warning(message);
    }

    let result = run(&mut terminal, &mut app, client, config.settings.tick_rate_ms);

    tui::exit(&mut terminal).context("Failed to restore the terminal")?;
    logging::shutdown();

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application error");
    }
    result.context("Application error")
}

/// Run the main loop until the app asks to quit.
fn run(
    terminal: &mut Tui,
    app: &mut App,
    client: UsersClient,
    tick_rate_ms: u64,
) -> error::Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<ApiMessage>();
    let spawner = TaskSpawner::new(client, tx);
    let events = EventHandler::with_tick_rate(tick_rate_ms);

    while !app.should_quit() {
        // Results from background fetches
        while let Ok(message) = rx.try_recv() {
            app.handle_api_message(message);
        }

        if let Some(generation) = app.take_pending_fetch_users() {
            spawner.spawn_fetch_users(generation);
        }
        if let Some(id) = app.take_pending_fetch_user() {
            let handle = spawner.spawn_fetch_user(id);
            app.set_detail_task(handle);
        }

        terminal.draw(|frame| app.view(frame))?;

        let event = events.next()?;
        app.update(event);
    }

    Ok(())
}
