// App orchestrator: receives commands from the TUI, runs player loads on
// background tasks, and pushes the results back as `UiUpdate`s.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use mound_core::loader::PlayerDataLoader;

use crate::protocol::{UiUpdate, UserCommand};

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub loader: Arc<PlayerDataLoader>,
}

impl AppState {
    pub fn new(loader: Arc<PlayerDataLoader>) -> Self {
        AppState { loader }
    }
}

// ---------------------------------------------------------------------------
// Event loop
// ---------------------------------------------------------------------------

/// Run until a `Quit` command arrives or the command channel closes.
///
/// Each `LoadPlayer` spawns its own task so a slow lookup never blocks the
/// loop. In-flight loads are aborted on quit.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    ui_tx: mpsc::Sender<UiUpdate>,
    state: AppState,
) -> anyhow::Result<()> {
    info!("Application event loop started");

    let mut loads = JoinSet::new();

    loop {
        tokio::select! {
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UserCommand::LoadPlayer(player)) => {
                        debug!("load requested for {player:?}");
                        let loader = Arc::clone(&state.loader);
                        let ui_tx = ui_tx.clone();
                        loads.spawn(async move {
                            let result = loader.load(&player).await.map_err(|e| e.to_string());
                            if ui_tx.send(UiUpdate::PlayerData { player, result }).await.is_err() {
                                debug!("UI channel closed, dropping player data");
                            }
                        });
                    }
                    Some(UserCommand::Quit) => {
                        info!("Quit requested");
                        break;
                    }
                    None => {
                        info!("Command channel closed");
                        break;
                    }
                }
            }

            Some(joined) = loads.join_next(), if !loads.is_empty() => {
                if let Err(e) = joined {
                    warn!("player load task failed: {e}");
                }
            }
        }
    }

    loads.abort_all();
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
