//! Wordify - a terminal client for the Wordify vocabulary service.
//!
//! Runs a keyboard-driven TUI for looking up words and phrases, keeping a
//! personal collection and generating practice sentences. A few one-shot
//! commands cover scripting use.

mod app;
mod ui;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use wordify_core::api::user_message;
use wordify_core::cache::CacheManager;
use wordify_core::models::TermKind;
use wordify_core::{ApiClient, Config, CredentialStore, SessionGate};

use app::{App, AppState};
use ui::input::handle_input;
use ui::render::render;

// ============================================================================
// Constants
// ============================================================================

/// Timeout for polling terminal events (in milliseconds)
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

/// File name prefix for the rolling TUI log
const LOG_FILE_NAME: &str = "wordify.log";

#[derive(Debug, Parser)]
#[command(name = "wordify", version, about = "Look up, collect and practise words and phrases")]
struct Cli {
    /// Backend base URL (overrides config and WORDIFY_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start the interactive terminal UI (default)
    Tui,
    /// Print the backend health report as JSON
    Health,
    /// Look up a word, or a phrase with --phrase
    Define {
        #[arg(required = true)]
        text: Vec<String>,
        #[arg(long)]
        phrase: bool,
    },
    /// Log in and store the session
    Login {
        #[arg(long)]
        email: Option<String>,
    },
    /// Clear the stored session and saved password
    Logout,
}

fn env_filter() -> EnvFilter {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Log to a daily file in the cache directory; the terminal belongs to the UI.
fn init_file_tracing(log_dir: &Path) -> Option<WorkerGuard> {
    if let Err(e) = std::fs::create_dir_all(log_dir) {
        eprintln!("failed to create log directory {}: {}", log_dir.display(), e);
        return None;
    }

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_NAME);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_writer(file_writer).with_ansi(false))
        .init();

    Some(guard)
}

fn init_stderr_tracing() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Warning: could not read config ({}), using defaults", e);
        Config::default()
    });
    let cache_dir = config.cache_dir().unwrap_or_else(|_| PathBuf::from("./cache"));

    let command = cli.command.unwrap_or(Command::Tui);
    let _log_guard = match command {
        Command::Tui => init_file_tracing(&cache_dir),
        _ => {
            init_stderr_tracing();
            None
        }
    };

    let gate = SessionGate::restore(cache_dir.clone());
    let api = match cli.api_url {
        Some(ref url) => ApiClient::new(
            url,
            Duration::from_secs(config.request_timeout_secs()),
            gate,
        )?,
        None => ApiClient::from_config(&config, gate)?,
    };

    match command {
        Command::Tui => run_tui(config, api, cache_dir).await,
        Command::Health => print_health(&api).await,
        Command::Define { text, phrase } => {
            let kind = if phrase { TermKind::Phrase } else { TermKind::Word };
            print_definition(&api, kind, &text.join(" ")).await
        }
        Command::Login { email } => login(config, &api, email).await,
        Command::Logout => logout(&config, &api, &cache_dir),
    }
}

async fn run_tui(config: Config, api: ApiClient, cache_dir: PathBuf) -> Result<()> {
    info!(base_url = api.base_url(), "Wordify starting");

    // Create app before touching the terminal so setup errors print normally
    let mut app = App::new(config, api, cache_dir)?;

    // Load cached lists first (for display behind login)
    app.load_from_cache();
    app.check_health();

    if !app.is_authenticated() {
        app.prefill_saved_password();
        app.start_login();
    } else {
        app.refresh_collections();
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    info!("Wordify shutting down");
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Draw UI
        terminal.draw(|f| render(f, app))?;

        // Poll for events with timeout to allow background updates
        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            if let Event::Key(key) = event::read()? {
                // Ctrl+C to quit
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }

                if handle_input(app, key) {
                    return Ok(());
                }
            }
        }

        // Check for completed background tasks and session changes
        app.check_background_tasks();

        if matches!(app.state, AppState::Quitting) {
            return Ok(());
        }
    }
}

async fn print_health(api: &ApiClient) -> Result<()> {
    let health = api.health().await.map_err(|e| anyhow!(user_message(&e)))?;
    println!("{}", serde_json::to_string_pretty(&health)?);
    Ok(())
}

async fn print_definition(api: &ApiClient, kind: TermKind, text: &str) -> Result<()> {
    if !api.gate().is_authenticated() {
        return Err(anyhow!("Not logged in. Run `wordify login` first."));
    }

    let definition = api
        .define(kind, text)
        .await
        .map_err(|e| anyhow!(user_message(&e)))?;

    println!("{}", definition.text);
    for (i, meaning) in definition.meanings.iter().enumerate() {
        println!();
        println!(
            "{}. [{}] {}",
            i + 1,
            meaning.category_display(),
            meaning.definition
        );
        for example in &meaning.examples {
            println!("   \"{}\"", example);
        }
        if !meaning.related.is_empty() {
            println!("   {}: {}", kind.related_label(), meaning.related.join(", "));
        }
    }
    Ok(())
}

fn prompt_line(label: &str) -> Result<String> {
    eprint!("{}", label);
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

async fn login(mut config: Config, api: &ApiClient, email: Option<String>) -> Result<()> {
    let email = match email.or_else(|| config.last_email.clone()) {
        Some(email) => email,
        None => prompt_line("Email: ")?,
    };
    let password = rpassword::prompt_password(format!("Password for {}: ", email))?;

    let session = api
        .login(&email, &password)
        .await
        .map_err(|e| anyhow!(user_message(&e)))?;

    if let Err(e) = CredentialStore::store(&email, &password) {
        warn!(error = %e, "Could not save password to keychain");
    }
    config.last_email = Some(email);
    if let Err(e) = config.save() {
        warn!(error = %e, "Could not save config");
    }

    eprintln!("Logged in as {}", session.greeting_name());
    Ok(())
}

fn logout(config: &Config, api: &ApiClient, cache_dir: &Path) -> Result<()> {
    let email = api
        .gate()
        .current()
        .map(|s| s.email)
        .or_else(|| config.last_email.clone());
    if let Some(email) = email {
        if let Err(e) = CredentialStore::delete(&email) {
            warn!(error = %e, "Could not remove saved password");
        }
    }

    let mut cache = CacheManager::new(cache_dir.to_path_buf())?;
    let user_id = api.gate().current().map(|s| s.user_id);
    cache.set_user(user_id.as_deref())?;
    cache.clear()?;
    api.logout();

    eprintln!("Logged out");
    Ok(())
}
