// TUI data browser: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` holding the catalog plus the user's filter,
// pagination and selection. Player loads are requested from the app
// orchestrator over an mpsc channel; results come back as `UiUpdate`s and
// settle the per-player `LoadStatus`. The screen re-renders at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use mound_core::catalog::{Catalog, CatalogView, FilterState, Pagination, TeamEntry};
use mound_core::divisions::{group_by_division, Division};
use mound_core::loader::LoadStatus;

use crate::protocol::{UiUpdate, UserCommand};

use layout::build_layout;

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

/// Which surface currently receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Moving through the player list.
    #[default]
    Browse,
    /// Typing into the name search.
    Search,
    /// The division/team picker overlay.
    Teams,
    /// The metrics guide overlay.
    Help,
}

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state. The filtered list is recomputed from `catalog`,
/// `filter` and `pagination` on every frame.
pub struct ViewState {
    pub catalog: Arc<Catalog>,
    pub filter: FilterState,
    pub pagination: Pagination,
    /// Index of the highlighted player within the visible list.
    pub selected: usize,
    pub mode: Mode,
    /// Whether the quit confirmation overlay is shown.
    pub confirm_quit: bool,
    /// Teams grouped by division, fixed for the session.
    pub divisions: Vec<Division>,
    /// Cursor into the flattened team list of the picker.
    pub team_cursor: usize,
    /// Vertical scroll of the player card.
    pub card_scroll: u16,
    /// Load status per player name. Absent means not yet requested.
    pub player_status: HashMap<String, LoadStatus>,
    /// Dataset snapshot date for the status bar.
    pub as_of: Option<NaiveDate>,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState::new(Arc::new(Catalog::default()), Pagination::default(), None)
    }
}

impl ViewState {
    pub fn new(catalog: Arc<Catalog>, pagination: Pagination, as_of: Option<NaiveDate>) -> Self {
        let divisions = group_by_division(&catalog.unique_teams());
        ViewState {
            catalog,
            filter: FilterState::default(),
            pagination,
            selected: 0,
            mode: Mode::Browse,
            confirm_quit: false,
            divisions,
            team_cursor: 0,
            card_scroll: 0,
            player_status: HashMap::new(),
            as_of,
        }
    }

    pub fn view(&self) -> CatalogView<'_> {
        self.catalog.view(&self.filter, &self.pagination)
    }

    /// Name of the highlighted player, if any are visible.
    pub fn selected_player(&self) -> Option<String> {
        self.view()
            .visible_players()
            .get(self.selected)
            .map(|name| name.to_string())
    }

    /// Move the highlight by `delta`, clamped to the visible list.
    pub fn move_selection(&mut self, delta: isize) {
        let visible = self.view().visible_players().len();
        if visible == 0 {
            self.selected = 0;
            return;
        }
        let next = self.selected.saturating_add_signed(delta);
        self.select(next.min(visible - 1));
    }

    pub fn select_last(&mut self) {
        let visible = self.view().visible_players().len();
        self.select(visible.saturating_sub(1));
    }

    fn select(&mut self, index: usize) {
        if index != self.selected {
            self.selected = index;
            self.card_scroll = 0;
        }
    }

    /// Search text or team selection changed: back to the first page and the
    /// top of the list.
    pub fn on_filter_changed(&mut self) {
        self.pagination.reset();
        self.selected = 0;
        self.card_scroll = 0;
    }

    /// Show another page of players if there are more to show.
    pub fn load_more(&mut self) -> bool {
        if self.view().has_more() {
            self.pagination.load_more();
            true
        } else {
            false
        }
    }

    /// All teams in picker order (divisions sorted by name, teams in
    /// dataset order within each).
    pub fn team_choices(&self) -> Vec<&TeamEntry> {
        self.divisions.iter().flat_map(|d| d.teams.iter()).collect()
    }

    pub fn move_team_cursor(&mut self, delta: isize) {
        let count = self.team_choices().len();
        if count == 0 {
            self.team_cursor = 0;
            return;
        }
        self.team_cursor = self.team_cursor.saturating_add_signed(delta).min(count - 1);
    }

    /// Toggle the team under the picker cursor.
    pub fn toggle_team_at_cursor(&mut self) {
        let Some(name) = self
            .team_choices()
            .get(self.team_cursor)
            .map(|t| t.name.clone())
        else {
            return;
        };
        self.filter.toggle_team(&name);
        self.on_filter_changed();
    }

    pub fn selected_status(&self) -> Option<&LoadStatus> {
        let player = self.selected_player()?;
        self.player_status.get(&player)
    }

    /// Forget a failed load for the highlighted player so it is requested
    /// again. Returns whether there was a failure to clear.
    pub fn retry_selected(&mut self) -> bool {
        let Some(player) = self.selected_player() else {
            return false;
        };
        match self.player_status.get(&player) {
            Some(LoadStatus::Failed(_)) => {
                self.player_status.remove(&player);
                true
            }
            _ => false,
        }
    }

    /// A load command for the highlighted player if it has never been
    /// requested. Marks it pending.
    pub fn next_load_request(&mut self) -> Option<UserCommand> {
        let player = self.selected_player()?;
        if self.player_status.contains_key(&player) {
            return None;
        }
        self.player_status.insert(player.clone(), LoadStatus::Pending);
        Some(UserCommand::LoadPlayer(player))
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::PlayerData { player, result } => {
            let status = state.player_status.entry(player).or_default();
            if !status.settle(result) {
                debug!("ignoring duplicate player data");
            }
        }
    }
}

/// Status message for cards that can no longer be requested.
pub(crate) const APP_STOPPED: &str = "app loop stopped";

/// Ask the app loop for the highlighted card if it was never requested. If
/// the loop is gone the card fails instead of staying pending.
async fn request_selected_card(state: &mut ViewState, cmd_tx: &mpsc::Sender<UserCommand>) {
    let Some(cmd) = state.next_load_request() else {
        return;
    };
    if let Err(mpsc::error::SendError(UserCommand::LoadPlayer(player))) = cmd_tx.send(cmd).await {
        warn!("cannot request {player:?}: {APP_STOPPED}");
        state
            .player_status
            .entry(player)
            .or_default()
            .settle(Err(APP_STOPPED.to_string()));
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete browser frame, overlays last.
fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, state);
    widgets::search_bar::render(frame, layout.search_bar, state);
    widgets::player_list::render(frame, layout.player_list, state);
    widgets::player_card::render(frame, layout.player_card, state);
    widgets::help_bar::render(frame, layout.help_bar, state);

    match state.mode {
        Mode::Teams => widgets::team_filter::render(frame, frame.area(), state),
        Mode::Help => widgets::metrics_help::render(frame, frame.area()),
        Mode::Browse | Mode::Search => {}
    }

    if state.confirm_quit {
        widgets::quit_confirm::render(frame, frame.area());
    }
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// 1. Initializes the terminal (raw mode, alternate screen).
/// 2. Installs a panic hook to restore the terminal on crash.
/// 3. Runs an async select loop: UI updates, keyboard input, render ticks.
/// 4. Restores the terminal on exit.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
    mut view_state: ViewState,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    request_selected_card(&mut view_state, &cmd_tx).await;

    let result = loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    None => break Ok(()),
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            let quit = cmd == UserCommand::Quit;
                            let _ = cmd_tx.send(cmd).await;
                            if quit {
                                break Ok(());
                            }
                        }
                        request_selected_card(&mut view_state, &cmd_tx).await;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        warn!("terminal input error: {e}");
                        break Err(e.into());
                    }
                    None => break Ok(()),
                }
            }

            _ = render_tick.tick() => {
                if let Err(e) = terminal.draw(|frame| render_frame(frame, &view_state)) {
                    break Err(e.into());
                }
            }
        }
    };

    ratatui::restore();
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
