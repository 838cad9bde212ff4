//! # Verdant Storefront
//!
//! Orchestration layer of the plant storefront: configuration, shared
//! state, simulated backend services and the commands a presentation layer
//! calls. Business rules live in `verdant-core`; reference data in
//! `verdant-catalog`.
//!
//! ## Module Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  main.rs ────► parses --config, starts the runtime, calls run()        │
//! │                                                                         │
//! │  lib.rs ─────► tracing setup, config load, stdin loop                  │
//! │                                                                         │
//! │  shell.rs ───► parse_line() ──► ShellCommand ──► execute()             │
//! │                                                      │                  │
//! │  commands/ ──► browse, cart, checkout, tracking,  ◄──┘                  │
//! │                profile, admin, navigation                               │
//! │                                                                         │
//! │  services/ ──► OrderProcessor, ShipmentTracker (simulated)             │
//! │                                                                         │
//! │  state/ ─────► CartState, CatalogState, ConfigState, SessionState      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logs go to stderr, the shell owns stdout)
//! 2. Load configuration (defaults → file → environment)
//! 3. Build [`AppState`] with a seeded catalog and simulated services
//! 4. Read commands from stdin until `quit` or end of input

pub mod commands;
pub mod config;
pub mod error;
pub mod services;
pub mod shell;
pub mod state;

use std::error::Error;
use std::path::PathBuf;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::StorefrontConfig;
use shell::ShellCommand;
use state::AppState;

const PROMPT: &[u8] = b"verdant> ";

/// Runs the storefront shell on stdin/stdout.
///
/// An explicit `config_path` must load cleanly; without one a broken
/// platform config file is logged and defaults are used.
pub async fn run(config_path: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
    init_tracing();

    let config = match config_path {
        Some(path) => StorefrontConfig::load(Some(path))?,
        None => StorefrontConfig::load_or_default(None),
    };
    info!(
        store = %config.store.name,
        failure_rate = config.checkout.failure_rate,
        "Starting storefront shell"
    );

    let state = AppState::new(config);
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let banner = format!(
        "Welcome to {}. Type 'help' for commands.\n",
        state.config.store.name
    );
    stdout.write_all(banner.as_bytes()).await?;
    stdout.write_all(PROMPT).await?;
    stdout.flush().await?;

    while let Some(line) = lines.next_line().await? {
        if !line.trim().is_empty() {
            let output = match shell::parse_line(&line) {
                Ok(ShellCommand::Quit) => break,
                Ok(command) => match shell::execute(&state, command).await {
                    Ok(text) => text,
                    Err(err) => format!("error: {}", err.message),
                },
                Err(message) => message,
            };
            if !output.is_empty() {
                stdout.write_all(output.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
            }
        }
        stdout.write_all(PROMPT).await?;
        stdout.flush().await?;
    }

    info!("Storefront shell closed");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=verdant=trace` - Show trace for verdant crates only
/// - Default: INFO, DEBUG for verdant crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,verdant=debug"));

    // try_init: a second call (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
