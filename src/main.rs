mod app;
mod components;
mod config;
mod error;
mod event;
mod handler;
mod listing;
mod service;
mod telemetry;
mod theme;
mod tui;
mod ui;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::info;

use crate::app::App;
use crate::config::{AppConfig, ListingConfig, ServiceConfig, ThemeConfig};
use crate::event::{Event, EventHandler};
use crate::service::client::{self, ListingClient};
use crate::tui::{install_panic_hook, Tui};

/// Browse a remote file listing page by page.
#[derive(Parser, Debug)]
#[command(name = "eb", version, about)]
struct Cli {
    /// GraphQL endpoint serving `listEntries`
    #[arg(long)]
    endpoint: Option<String>,

    /// Path to a config file (overrides discovered configs)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Use the light color scheme
    #[arg(long)]
    light: bool,

    /// Disable mouse capture
    #[arg(long)]
    no_mouse: bool,

    /// Write logs here instead of the cache directory
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Flags as a partial config layered over every file.
    fn overrides(&self) -> AppConfig {
        AppConfig {
            service: ServiceConfig {
                endpoint: self.endpoint.clone(),
                ..Default::default()
            },
            listing: ListingConfig {
                mouse: self.no_mouse.then_some(false),
                ..Default::default()
            },
            theme: ThemeConfig {
                scheme: self.light.then(|| "light".to_string()),
            },
            ..Default::default()
        }
    }
}

#[tokio::main]
async fn main() -> error::Result<()> {
    let cli = Cli::parse();

    telemetry::init_logging(cli.log_file.as_deref());

    let overrides = cli.overrides();
    let config = AppConfig::load(cli.config.as_deref(), Some(&overrides));
    let client = Arc::new(ListingClient::new(config.endpoint(), config.timeout())?);
    let theme = theme::resolve_theme(&config.theme);
    info!(
        endpoint = client.endpoint(),
        theme = config.theme_scheme(),
        "starting"
    );

    install_panic_hook();

    let mut tui = Tui::new(config.mouse_enabled())?;
    let mut app = App::new(config.initial_filters(), config.rows_per_page());
    let mut events = EventHandler::new(Duration::from_millis(16));
    let event_tx = events.sender();

    loop {
        if let Some(ticket) = app.poll_request() {
            client::spawn_fetch(client.clone(), ticket, event_tx.clone());
        }

        tui.terminal_mut().draw(|frame| {
            ui::render(&mut app, frame, &theme);
        })?;

        match events.next().await? {
            Event::Key(key) => handler::handle_key_event(&mut app, key),
            Event::Mouse(mouse) => {
                let body = app.table_body;
                handler::handle_mouse_event(&mut app, mouse, body);
            }
            Event::Tick => app.clear_expired_status(),
            Event::Resize(_, _) => {}
            Event::ListingLoaded { generation, result } => {
                app.handle_listing_loaded(generation, result)
            }
        }

        if app.should_quit {
            break;
        }
    }

    tui.restore()?;
    info!("exiting");
    Ok(())
}
