// Status bar widget: title, visible/total pitcher counts, dataset date.

use chrono::NaiveDate;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let view = state.view();

    let mut spans = vec![
        Span::styled(
            " THE MOUND REPORT ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            count_label(view.visible_players().len(), view.total_players()),
            Style::default().fg(Color::White),
        ),
    ];

    if let Some(label) = team_filter_label(state.filter.selected_teams.len()) {
        spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
        spans.push(Span::styled(label, Style::default().fg(Color::Cyan)));
    }

    if let Some(date) = state.as_of {
        spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
        spans.push(Span::styled(
            as_of_label(date),
            Style::default().fg(Color::Gray),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// E.g. "Showing 50 of 212 pitchers".
pub fn count_label(visible: usize, total: usize) -> String {
    let noun = if total == 1 { "pitcher" } else { "pitchers" };
    format!("Showing {visible} of {total} {noun}")
}

pub fn team_filter_label(selected: usize) -> Option<String> {
    match selected {
        0 => None,
        1 => Some("1 team selected".to_string()),
        n => Some(format!("{n} teams selected")),
    }
}

/// E.g. "Data as of Aug 23, 2025".
pub fn as_of_label(date: NaiveDate) -> String {
    format!("Data as of {}", date.format("%b %-d, %Y"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
