//! SmartDay terminal client entry point.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context as _, Result};
use clap::Parser;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::EnvFilter;

use smartday_api::BackendClient;
use smartday_application::auth::AuthUseCase;
use smartday_infrastructure::{
    load_config, FilePreferenceStore, JsonSessionStore, SmartdayPaths,
};

mod app;
mod events;
mod map_surface;
mod ui;

use app::App;

#[derive(Parser)]
#[command(
    name = "smartday",
    version,
    about = "Terminal client for the SmartDay chat, preference, and map backend"
)]
struct Cli {
    /// Backend base URL, overriding the config file.
    #[arg(long)]
    backend_url: Option<String>,

    /// Log filter when RUST_LOG is unset, e.g. "info" or "smartday=debug".
    #[arg(long, default_value = "info")]
    log_filter: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_filter)?;

    let mut config = load_config().context("failed to load config.toml")?;
    if let Some(url) = cli.backend_url {
        config.base_url = url;
    }

    let client = Arc::new(
        BackendClient::from_config(&config).context("failed to build the backend client")?,
    );
    let sessions = Arc::new(JsonSessionStore::new()?);
    let preferences = Arc::new(FilePreferenceStore::new()?);
    let auth = Arc::new(AuthUseCase::new(client.clone(), sessions.clone()));

    let app = App::new(
        auth,
        client.clone(),
        client.clone(),
        client,
        preferences,
        sessions,
    );
    run(app).await
}

/// Logs go to a file; stderr would fight the alternate screen.
fn init_tracing(fallback_filter: &str) -> Result<()> {
    let logs_dir = SmartdayPaths::logs_dir()?;
    std::fs::create_dir_all(&logs_dir)?;
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(logs_dir.join("smartday.log"))?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(fallback_filter.to_string()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(file))
        .init();
    Ok(())
}

async fn run(mut app: App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    while !app.should_quit {
        app.on_tick();
        app.drain_events();
        terminal.draw(|frame| ui::draw(frame, app))?;

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }
    }
    Ok(())
}
