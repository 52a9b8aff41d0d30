// Keyboard input handling.
//
// Translates crossterm key events into local ViewState mutations (selection,
// search, team picker, overlays). Only quitting produces a UserCommand here;
// player loads are requested by the run loop after each key.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::{Mode, ViewState};
use crate::protocol::UserCommand;

/// Lines moved by PageUp/PageDown in the player list.
const PAGE_STEP: isize = 10;

/// Handle a keyboard event. Returns `Some(UserCommand::Quit)` when the user
/// confirmed quitting; everything else is handled locally.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Windows emits Release events as well; only act on Press.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C always quits immediately regardless of mode.
    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    if view_state.confirm_quit {
        return handle_confirm_quit(key_event, view_state);
    }

    match view_state.mode {
        Mode::Search => handle_search(key_event, view_state),
        Mode::Teams => handle_team_picker(key_event, view_state),
        Mode::Help => handle_help(key_event, view_state),
        Mode::Browse => handle_browse(key_event, view_state),
    }
}

fn handle_browse(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Up | KeyCode::Char('k') => view_state.move_selection(-1),
        KeyCode::Down | KeyCode::Char('j') => view_state.move_selection(1),
        KeyCode::PageUp => view_state.move_selection(-PAGE_STEP),
        KeyCode::PageDown => view_state.move_selection(PAGE_STEP),
        KeyCode::Home | KeyCode::Char('g') => view_state.move_selection(isize::MIN),
        KeyCode::End | KeyCode::Char('G') => view_state.select_last(),

        // Card scrolling
        KeyCode::Char('J') => view_state.card_scroll = view_state.card_scroll.saturating_add(1),
        KeyCode::Char('K') => view_state.card_scroll = view_state.card_scroll.saturating_sub(1),

        KeyCode::Char('m') => {
            view_state.load_more();
        }
        KeyCode::Char('r') => {
            view_state.retry_selected();
        }

        KeyCode::Char('/') => view_state.mode = Mode::Search,
        KeyCode::Char('t') => view_state.mode = Mode::Teams,
        KeyCode::Char('?') => view_state.mode = Mode::Help,

        // Clear all filters
        KeyCode::Esc => {
            if !view_state.filter.search.is_empty() || !view_state.filter.selected_teams.is_empty()
            {
                view_state.filter.search.clear();
                view_state.filter.clear_teams();
                view_state.on_filter_changed();
            }
        }

        // Quit: enter confirmation mode instead of quitting immediately
        KeyCode::Char('q') => view_state.confirm_quit = true,

        _ => {}
    }
    None
}

/// In quit confirmation mode `y`/`q` confirm, `n`/Esc cancel, and all other
/// keys are blocked.
fn handle_confirm_quit(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('q') | KeyCode::Char('Q') => {
            Some(UserCommand::Quit)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view_state.confirm_quit = false;
            None
        }
        _ => None,
    }
}

/// Search mode: printable characters edit the search text; Enter keeps it,
/// Esc clears it.
fn handle_search(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Esc => {
            view_state.mode = Mode::Browse;
            if !view_state.filter.search.is_empty() {
                view_state.filter.search.clear();
                view_state.on_filter_changed();
            }
        }
        KeyCode::Enter => view_state.mode = Mode::Browse,
        KeyCode::Backspace => {
            if view_state.filter.search.pop().is_some() {
                view_state.on_filter_changed();
            }
        }
        KeyCode::Char(c) => {
            view_state.filter.search.push(c);
            view_state.on_filter_changed();
        }
        _ => {}
    }
    None
}

fn handle_team_picker(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Up | KeyCode::Char('k') => view_state.move_team_cursor(-1),
        KeyCode::Down | KeyCode::Char('j') => view_state.move_team_cursor(1),
        KeyCode::Char(' ') | KeyCode::Enter => view_state.toggle_team_at_cursor(),
        KeyCode::Char('c') => {
            if !view_state.filter.selected_teams.is_empty() {
                view_state.filter.clear_teams();
                view_state.on_filter_changed();
            }
        }
        KeyCode::Esc | KeyCode::Char('t') => view_state.mode = Mode::Browse,
        KeyCode::Char('q') => view_state.confirm_quit = true,
        _ => {}
    }
    None
}

fn handle_help(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter => view_state.mode = Mode::Browse,
        KeyCode::Char('q') => view_state.confirm_quit = true,
        _ => {}
    }
    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
