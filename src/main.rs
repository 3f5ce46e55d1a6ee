//! basicgen — C64 BASIC generation service entry point.
//!
//! Startup sequence:
//!   1. Load .env (if present)
//!   2. Parse CLI args
//!   3. Load config
//!   4. Resolve effective log level (CLI `-v` flags > env > config)
//!   5. Init logger once
//!   6. Build the LLM provider and generator
//!   7. Spawn Ctrl-C → shutdown signal watcher
//!   8. Run the HTTP server until shutdown

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use basicgen::config;
use basicgen::error::AppError;
use basicgen::generate::{Generator, shortcircuit};
use basicgen::llm::providers;
use basicgen::logger;
use basicgen::server;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    // Load .env if present — ignore errors (file is optional).
    let _ = dotenvy::dotenv();

    let args = parse_cli_args();

    let config = config::load(args.config_path.as_deref())?;

    let effective_log_level = args.log_level.unwrap_or(config.log_level.as_str());
    let force_cli_level = args.log_level.is_some();

    logger::init(effective_log_level, force_cli_level)?;

    info!(
        service = %config.service_name,
        bind = %config.http.bind,
        provider = %config.llm.provider,
        shortcircuit = config.generate.shortcircuit,
        configured_log_level = %config.log_level,
        effective_log_level = %effective_log_level,
        "config loaded"
    );

    if config.llm.provider == "anthropic" && config.llm_api_key.is_none() {
        warn!("ANTHROPIC_API_KEY not set — generation requests will fail with 'Server not configured'");
    }

    let provider = providers::build(&config.llm, config.llm_api_key.clone())
        .map_err(|e| AppError::Config(e.to_string()))?;

    let generator = Arc::new(Generator::new(
        provider,
        shortcircuit::default_rules(),
        config.generate.shortcircuit,
    ));

    // Shared shutdown token — Ctrl-C cancels it, the server watches it.
    let shutdown = CancellationToken::new();
    let ctrlc_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("ctrl-c received — initiating shutdown");
            ctrlc_token.cancel();
        }
    });

    server::run(config.http.bind.clone(), generator, shutdown).await
}

// ── CLI ───────────────────────────────────────────────────────────────────────

struct CliArgs {
    config_path: Option<String>,
    log_level: Option<&'static str>,
}

fn parse_cli_args() -> CliArgs {
    let mut verbosity = 0u8;
    let mut config_path = None;

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--" {
            break;
        }

        match arg.as_str() {
            "-h" | "--help" => {
                println!("Usage: basicgen [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -h, --help             Print help");
                println!("  -c, --config <PATH>    Config file (default: config/default.toml)");
                println!("  -v                     Increase log verbosity (-v debug, -vv trace)");
                std::process::exit(0);
            }
            "-c" | "--config" => {
                config_path = iter.next();
                if config_path.is_none() {
                    eprintln!("error: {arg} requires a path argument");
                    std::process::exit(2);
                }
            }
            "-v" => verbosity = verbosity.saturating_add(1),
            "-vv" => verbosity = verbosity.saturating_add(2),
            other => {
                eprintln!("error: unrecognised argument: {other}");
                std::process::exit(2);
            }
        }
    }

    let log_level = match verbosity {
        0 => None,
        1 => Some("debug"),
        _ => Some("trace"),
    };

    CliArgs { config_path, log_level }
}
