// Message types passed between the TUI and the app orchestrator.

use mound_core::loader::PlayerData;

/// Commands from the TUI to the app orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    /// Resolve auxiliary data (headshot, team, heatmaps) for a player.
    LoadPlayer(String),
    Quit,
}

/// Updates pushed from the app orchestrator to the TUI.
#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    /// A player load finished. Errors are carried as display strings.
    PlayerData {
        player: String,
        result: Result<PlayerData, String>,
    },
}
