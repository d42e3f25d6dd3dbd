//! launchshop - Terminal Storefront
//!
//! Counts down to launch at local midnight, then opens purchasing. The cart
//! is saved on every change and orders are sent as a prefilled WhatsApp
//! message.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use launchshop::application::{self, App, Services};
use launchshop::infrastructure::{
    CartStore, FileBlobStore, ShopConfig, SystemClipboard, SystemOpener,
};
use launchshop::presentation::{render_ui, InputHandler};

#[derive(Debug, Parser)]
#[command(name = "launchshop", about = "Terminal storefront with a launch countdown")]
struct Args {
    /// Storefront configuration file (TOML); defaults apply when missing
    #[arg(long, default_value = "launchshop.toml")]
    config: PathBuf,

    /// Directory holding the saved cart and the log file
    #[arg(long, default_value = ".launchshop")]
    data_dir: PathBuf,
}

fn init_logging(data_dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(data_dir)
        .with_context(|| format!("creating data directory {}", data_dir.display()))?;
    let log_path = data_dir.join("launchshop.log");
    let log_file = File::options()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("opening log file {}", log_path.display()))?;

    // The terminal is in raw mode, so logs go to a file.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Entry point for the storefront.
///
/// Loads configuration, restores the saved cart, sets up the terminal and
/// runs the event loop until the user quits.
fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.data_dir)?;

    let config = ShopConfig::load(&args.config)
        .with_context(|| format!("loading configuration from {}", args.config.display()))?;
    info!(shop = %config.shop_name, products = config.products.len(), "starting storefront");

    let services = Services {
        store: CartStore::new(
            Box::new(FileBlobStore::new(args.data_dir.clone())),
            config.storage_key.clone(),
        ),
        opener: Box::new(SystemOpener),
        clipboard: Box::new(SystemClipboard::default()),
    };
    let mut app = App::new(&config, services, &Local::now(), Instant::now());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    info!("storefront closed");
    Ok(())
}

/// Main application event loop.
///
/// Waits for a key press or the next timer deadline (countdown tick or
/// toast expiry). Once the launch has happened and no toast is showing,
/// there is no deadline and the loop blocks on input alone.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        let ready = match app.poll_timeout(Instant::now()) {
            Some(timeout) => event::poll(timeout)?,
            None => true,
        };

        if ready {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') if matches!(app.mode, application::AppMode::Browsing) => return Ok(()),
                        _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
                    }
                }
            }
        }

        app.on_timer(Instant::now(), &Local::now());
    }
}
