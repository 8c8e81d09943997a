//! mailboard: a keyboard-driven terminal dashboard for mail, calendar,
//! contacts and webhooks.

mod app;
mod commands;
mod config;
mod dispatch;
mod error;
mod events;
mod logging;
mod navigation;
mod source;
mod tasks;
mod terminal;
mod ui;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{error, info};

use crate::app::App;
use crate::config::Config;
use crate::error::AppError;
use crate::events::EventHandler;
use crate::source::{DemoSource, ResourceSource};
use crate::tasks::{create_task_channel, ApiMessage, TaskSpawner};
use crate::terminal::Tui;

#[derive(Debug, Parser)]
#[command(name = "mailboard", version, about)]
struct Cli {
    /// View to open at startup, e.g. "messages".
    view: Option<String>,

    /// Auto-refresh interval in seconds; 0 disables it.
    #[arg(long, value_name = "SECS")]
    refresh: Option<u64>,

    /// Config file to use instead of the default location.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the log directory and exit.
    #[arg(long)]
    log_path: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.log_path {
        match logging::log_directory() {
            Some(dir) => println!("{}", dir.display()),
            None => println!("no log directory available on this platform"),
        }
        return Ok(());
    }

    if let Err(e) = logging::init() {
        eprintln!("Warning: logging disabled: {e}");
    }

    let config = load_config(&cli).map_err(|e| anyhow::anyhow!(e.user_message()))?;
    let settings = config.settings.clone();
    let mut app = App::new(config).map_err(|e| anyhow::anyhow!(e.user_message()))?;

    let source: Arc<dyn ResourceSource> = Arc::new(DemoSource::new());
    let (mut rx, spawner) = create_task_channel(source, settings.request_timeout());
    let events = EventHandler::with_tick_rate(settings.tick_rate_ms);

    terminal::install_panic_hook();
    let mut tui = terminal::enter().map_err(|e| AppError::terminal(e.to_string()))?;
    let result = run(&mut tui, &mut app, &events, &spawner, &mut rx);
    terminal::leave(&mut tui);

    if let Err(e) = &result {
        error!(error = %e, "Exited with error");
    }
    logging::shutdown();
    result
}

fn load_config(cli: &Cli) -> Result<Config, AppError> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(view) = &cli.view {
        config.settings.default_view = view.trim().to_lowercase();
    }
    if let Some(secs) = cli.refresh {
        config.settings.refresh_interval_secs = secs;
    }
    config.settings.validate()?;
    Ok(config)
}

fn run(
    tui: &mut Tui,
    app: &mut App,
    events: &EventHandler,
    spawner: &TaskSpawner,
    rx: &mut UnboundedReceiver<ApiMessage>,
) -> anyhow::Result<()> {
    info!("Entering main loop");
    loop {
        for job in app.take_jobs() {
            spawner.spawn(job);
        }
        while let Ok(message) = rx.try_recv() {
            app.handle_api_message(message);
        }

        tui.draw(|frame| app.view(frame))?;
        if app.should_quit() {
            return Ok(());
        }
        app.update(events.next()?);
    }
}
