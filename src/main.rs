use anyhow::Context;
use clap::{Parser, Subcommand};
use configuration::{ServerOverrides, StoreBackend};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// The main entry point for the school locator service.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from a .env file, if there is one.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();
    let _guard = init_tracing(cli.log_dir.as_deref())?;

    // Execute the appropriate command
    match cli.command {
        Commands::Serve(overrides) => serve(overrides).await,
        Commands::Migrate => migrate().await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Registers schools and lists them by distance from a point.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Also write logs to a daily-rotated file in this directory.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API.
    Serve(ServerOverrides),
    /// Create the schools table in a PostgreSQL store.
    Migrate,
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn serve(overrides: ServerOverrides) -> anyhow::Result<()> {
    let mut settings = configuration::load_config().context("Failed to load configuration")?;
    settings.apply_overrides(overrides);
    settings.validate().context("Invalid configuration")?;

    web_server::run_server(&settings).await
}

async fn migrate() -> anyhow::Result<()> {
    let settings = configuration::load_config().context("Failed to load configuration")?;
    if settings.store.backend()? != StoreBackend::Postgres {
        anyhow::bail!(
            "migrations need a postgres:// store URL; apply crates/database/migrations \
             through the hosted service's SQL editor instead"
        );
    }

    let pool = database::connect_pool(&settings.store)
        .await
        .context("Failed to connect to the database")?;
    database::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("Migrations applied.");
    Ok(())
}

/// Sets up console logging, plus a rolling log file when `log_dir` is given.
///
/// The returned guard must be held until exit so buffered file output is flushed.
fn init_tracing(log_dir: Option<&std::path::Path>) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(
            "info,school_locator=debug,web_server=debug,database=debug,locator=debug,tower_http=debug",
        )
    });

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "school-locator.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(file_layer)
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(guard)
}
