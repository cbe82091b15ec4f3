//! Stacks console entry point
//!
//! Exit status: 0 when the user quits (or input ends at the menu), 1 when the
//! program cannot get to the menu (configuration, logging, database connection,
//! login) or the console itself fails.

use std::{io, process::ExitCode, sync::Arc};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::{self, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use stacks_console::{
    config::{AppConfig, LoggingConfig},
    console::{self, Console},
    error::{exit_status, AppResult},
    repository::{self, Repository},
    services::Services,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::from(1);
        }
    };

    let _log_guard = match init_tracing(&config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {:#}", e);
            return ExitCode::from(1);
        }
    };

    tracing::info!("Starting Stacks console v{}", env!("CARGO_PKG_VERSION"));

    let outcome = run(config).await;
    if let Err(e) = &outcome {
        tracing::error!(error = %e, "Exiting after failure");
        eprintln!("{}", e);
    }
    ExitCode::from(exit_status(&outcome))
}

async fn run(config: AppConfig) -> AppResult<()> {
    let pool = repository::connect(&config.database).await?;
    tracing::info!("Connected to database");
    println!("Connected to the database.");

    let repository = Repository::new(pool);
    let services = Services::new(Arc::new(repository.clone()));
    let mut term = Console::new(io::stdin().lock(), io::stdout());

    let result = async {
        let session = console::login(&services.auth, &mut term, config.auth.max_attempts).await?;
        console::run(&services, &session, &mut term).await
    }
    .await;

    repository.close().await;
    tracing::info!("Disconnected from database");

    result
}

/// Logs go to stderr, or to a daily file when a directory is configured, so they
/// never mix with the menu on stdout
fn init_tracing(config: &LoggingConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("stacks_console={},sqlx=warn", config.level).into());

    let (writer, guard) = match &config.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, "stacks.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(writer), Some(guard))
        }
        None => (BoxMakeWriter::new(io::stderr), None),
    };

    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(config.directory.is_none());
    let registry = tracing_subscriber::registry().with(filter);

    if config.format == "json" {
        registry.with(layer.json()).try_init()?;
    } else {
        registry.with(layer).try_init()?;
    }

    Ok(guard)
}
