mod app;
mod components;
mod config;
mod error;
mod event;
mod handler;
mod logging;
mod model;
mod theme;
mod tui;
mod ui;
mod view;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing::info;

use crate::app::App;
use crate::config::{AppConfig, DemoConfig, GeneralConfig, LogConfig, ThemeConfig, ViewConfig};
use crate::event::{Event, EventHandler};
use crate::tui::{install_panic_hook, Tui};

/// A virtualized tree view over a large demo tree.
#[derive(Parser, Debug)]
#[command(name = "tree_view_tui", version, about)]
struct Cli {
    /// Number of leaves (flat demo) or groups (nested demo)
    #[arg(long)]
    nodes: Option<usize>,

    /// Show a nested demo tree instead of the flat fixture
    #[arg(long)]
    nested: bool,

    /// Explicit config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Disable mouse capture
    #[arg(long)]
    no_mouse: bool,

    /// Color scheme: dark, light, or custom
    #[arg(long)]
    theme: Option<String>,

    /// Scroll keyboard-selected rows into view
    #[arg(long)]
    follow: bool,

    /// Write tracing output to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Partial config holding only what was given on the command line.
    fn overrides(&self) -> AppConfig {
        AppConfig {
            general: GeneralConfig {
                mouse: self.no_mouse.then_some(false),
            },
            view: ViewConfig {
                follow_selection: self.follow.then_some(true),
                ..Default::default()
            },
            demo: DemoConfig {
                nodes: self.nodes,
                nested: self.nested.then_some(true),
            },
            theme: ThemeConfig {
                scheme: self.theme.clone(),
                custom: None,
            },
            log: LogConfig {
                file: self
                    .log_file
                    .as_ref()
                    .map(|p| p.to_string_lossy().into_owned()),
                level: None,
            },
        }
    }
}

#[tokio::main]
async fn main() -> error::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref(), Some(&cli.overrides()));

    logging::init(config.log_file(), config.log_level())?;
    info!(?config, "configuration resolved");

    install_panic_hook();

    let mut tui = Tui::new(config.mouse_enabled())?;
    let mut app = App::new(&config);
    let mut events = EventHandler::new(Duration::from_millis(16));

    loop {
        tui.terminal_mut().draw(|frame| {
            ui::render(&mut app, frame);
        })?;

        match events.next().await? {
            Event::Key(key) => handler::handle_key_event(&mut app, key),
            Event::Mouse(mouse) => handler::handle_mouse_event(&mut app, mouse),
            Event::Tick => app.clear_expired_status(),
            // The next draw re-measures the panel and rebuilds the paint list.
            Event::Resize(w, h) => tracing::debug!(w, h, "terminal resized"),
        }

        if app.should_quit {
            break;
        }
    }

    tui.restore()?;
    info!("exiting");
    Ok(())
}
