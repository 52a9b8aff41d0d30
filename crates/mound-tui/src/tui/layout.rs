// Screen layout: panel arrangement and sizing.
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// +--------------------------------------------------+
// | Search Bar (3 rows)                               |
// +-------------------+------------------------------+
// | Player List (32%) | Player Card (68%)            |
// +-------------------+------------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Top row: title, player counts, dataset date.
    pub status_bar: Rect,
    /// Search text and active team filter.
    pub search_bar: Rect,
    /// Left: the paginated player list.
    pub player_list: Rect,
    /// Right: the highlighted player's card.
    pub player_card: Rect,
    /// Bottom row: keyboard shortcut hints.
    pub help_bar: Rect,
}

/// Build the layout from the available terminal area.
pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Length(3), // search bar
            Constraint::Min(8),    // list + card
            Constraint::Length(1), // help bar
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(32), Constraint::Percentage(68)])
        .split(vertical[2]);

    AppLayout {
        status_bar: vertical[0],
        search_bar: vertical[1],
        player_list: horizontal[0],
        player_card: horizontal[1],
        help_bar: vertical[3],
    }
}

/// A `width` x `height` overlay centered in `area`, shrunk to fit it.
pub fn overlay_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
