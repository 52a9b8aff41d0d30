// The Mound Report entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Load the pitch dataset and player-id table
// 4. Build the player data loader
// 5. Create mpsc channels
// 6. Spawn app logic task
// 7. Run the TUI until the user quits
// 8. Cleanup on exit

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{error, info};

use mound_core::catalog::{Catalog, Pagination};
use mound_core::config;
use mound_core::dataset::{Dataset, PlayerIdTable};
use mound_core::loader::PlayerDataLoader;
use mound_report::app;
use mound_report::tui;

const LOG_FILE: &str = "mound-report.log";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing
    let log_path = init_tracing()?;
    info!("The Mound Report starting up (logging to {})", log_path.display());

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: pitches={}, player_ids={}, team source={:?}",
        config.dataset.pitches, config.dataset.player_ids, config.teams.source
    );

    // 3. Load data
    let dataset = Dataset::load(&config.pitches_path()).context("failed to load pitch dataset")?;
    let ids = PlayerIdTable::load(&config.player_ids_path())
        .context("failed to load player id table")?;
    let catalog = Arc::new(Catalog::new(dataset));
    let ids = Arc::new(ids);

    // 4. Player data loader
    let loader = PlayerDataLoader::from_config(&config, Arc::clone(&catalog), ids)
        .context("failed to build player data loader")?;

    // 5. Channels
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, ui_rx) = mpsc::channel(256);

    // 6. App logic task
    let app_state = app::AppState::new(Arc::new(loader));
    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(cmd_rx, ui_tx, app_state).await {
            error!("Application loop error: {}", e);
        }
    });

    // 7. TUI
    let view_state = tui::ViewState::new(
        catalog,
        Pagination::new(config.display.page_size, config.display.load_more_increment),
        config.dataset.as_of,
    );
    info!("Application ready");
    if let Err(e) = tui::run(ui_rx, cmd_tx, view_state).await {
        error!("TUI error: {}", e);
    }

    // 8. Cleanup: the app loop exits once the command channel closes.
    let _ = tokio::time::timeout(std::time::Duration::from_secs(5), app_handle).await;

    info!("The Mound Report shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by
/// the TUI). Uses `./logs/`, falling back to the platform data directory.
fn init_tracing() -> anyhow::Result<PathBuf> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = log_dir()?;
    let log_path = log_dir.join(LOG_FILE);
    let log_file = std::fs::File::create(&log_path)
        .with_context(|| format!("failed to create log file {}", log_path.display()))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("mound_report=info,mound_core=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(log_path)
}

fn log_dir() -> anyhow::Result<PathBuf> {
    let local = std::env::current_dir()?.join("logs");
    if std::fs::create_dir_all(&local).is_ok() {
        return Ok(local);
    }

    let dirs = directories::ProjectDirs::from("", "", "mound-report")
        .context("no home directory for log fallback")?;
    let fallback = dirs.data_local_dir().join("logs");
    std::fs::create_dir_all(&fallback)
        .with_context(|| format!("failed to create log directory {}", fallback.display()))?;
    Ok(fallback)
}
