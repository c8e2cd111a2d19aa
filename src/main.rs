//! A bot that's very excited to hear from you.
//!
//! Receives webhook notifications of messages sent to the bot, fetches each
//! message, and replies to its sender. See [notification] for the flow and
//! [config] for how the process is configured.

use config::{Args, Config, Mode, StartupError};
use dotenvy::dotenv;
use router::Deps;
use spark::api::SparkClient;
use std::{env, fs::OpenOptions, future::Future, io, process::ExitCode};
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{filter::Targets, layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod de;
mod notification;
mod router;
mod spark;

/// Where logs are written, relative to the working directory.
const LOG_FILE: &str = "bot-server.log";

/// Application entrypoint. Initialises tracing, checks for environment
/// variables, binds, and starts the server.
#[tokio::main]
async fn main() -> ExitCode {
    // Before parsing, as `PORT` may be set in `.env`.
    let (args, has_dotenv) =
        Args::parse_after(|| dotenv().is_ok(), env::args_os()).unwrap_or_else(|e| e.exit());

    let _guard = match init_tracing(Mode::from_dev_flag(args.dev)) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Could not open {}: {}", LOG_FILE, e);
            return ExitCode::FAILURE;
        }
    };

    if !has_dotenv {
        debug!("No .env found");
    }

    match run(&args, |k| env::var(k).ok(), shutdown_signal()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

/// Log to [LOG_FILE], and in development mode to stderr as well. Our own
/// events are kept from DEBUG upwards, everyone else's from INFO.
fn init_tracing(mode: Mode) -> io::Result<WorkerGuard> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(LOG_FILE)?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    let filter = Targets::new()
        .with_default(Level::INFO)
        .with_target(env!("CARGO_CRATE_NAME"), Level::DEBUG);

    let console = match mode {
        Mode::Development => Some(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .compact(),
        ),
        Mode::Production => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .with(console)
        .init();

    Ok(guard)
}

/// Load configuration and serve until `shutdown` resolves. Nothing is bound
/// until configuration, the bot's credential included, has been loaded.
async fn run<F>(
    args: &Args,
    lookup: F,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), StartupError>
where
    F: Fn(&str) -> Option<String>,
{
    let config = Config::load(args, lookup)?;

    if config.webhook_secret.is_none() {
        warn!("No $BOT_WEBHOOK_SECRET environment variable found, signatures won't be verified");
    }

    let deps = Deps {
        client: SparkClient::new(config.api_base, config.token)?,
        webhook_secret: config.webhook_secret,
        mode: config.mode,
    };

    info!("Starting up");

    let listener = TcpListener::bind(config.addr)
        .await
        .map_err(|e| StartupError::Bind(config.addr, e))?;

    server(listener, deps, shutdown)
        .await
        .map_err(StartupError::Serve)
}

/// Initialise a server with graceful shutdown via `shutdown`.
async fn server(
    listener: TcpListener,
    deps: Deps,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> io::Result<()> {
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router::new(deps).into_make_service())
        .with_graceful_shutdown(shutdown)
        .await
}

/// Resolves on Ctrl+C. Should we fail to listen for it, never resolve rather
/// than shutting down straight away.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Exiting on Ctrl+C"),
        Err(e) => {
            error!("Could not listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await
        }
    }
}
