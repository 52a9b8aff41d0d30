// Search bar widget: name search input and the active team filter.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::tui::{Mode, ViewState};

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let [search_area, teams_area] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area);

    let editing = state.mode == Mode::Search;
    let border = if editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let search_line = if editing {
        Line::from(vec![
            Span::raw(state.filter.search.clone()),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ])
    } else if state.filter.search.is_empty() {
        Line::from(Span::styled(
            "Search pitchers... (/)",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(state.filter.search.clone())
    };

    let search = Paragraph::new(search_line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title("Search"),
    );
    frame.render_widget(search, search_area);

    let teams = Paragraph::new(teams_summary(state)).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Teams (t)"),
    );
    frame.render_widget(teams, teams_area);
}

/// Selected team names, or "All teams" when none are selected.
pub fn teams_summary(state: &ViewState) -> String {
    if state.filter.selected_teams.is_empty() {
        "All teams".to_string()
    } else {
        state
            .filter
            .selected_teams
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
