// Team picker overlay: dataset teams grouped by division, with checkboxes.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::tui::layout::overlay_rect;
use crate::tui::ViewState;

const PICKER_WIDTH: u16 = 48;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let (lines, cursor_line) = picker_lines(state);

    let height = (lines.len() as u16).saturating_add(2).min(area.height.saturating_sub(2));
    let picker_area = overlay_rect(PICKER_WIDTH, height, area);
    frame.render_widget(Clear, picker_area);

    // Keep the cursor row inside the visible window.
    let inner_height = picker_area.height.saturating_sub(2) as usize;
    let scroll = (cursor_line + 1).saturating_sub(inner_height) as u16;

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Filter by team "),
        )
        .style(Style::default().bg(Color::Black))
        .scroll((scroll, 0));
    frame.render_widget(paragraph, picker_area);
}

/// Division headers and team rows, plus the line index of the cursor row.
pub fn picker_lines(state: &ViewState) -> (Vec<Line<'static>>, usize) {
    let mut lines = Vec::new();
    let mut cursor_line = 0;
    let mut team_index = 0;

    if state.divisions.is_empty() {
        lines.push(Line::from(Span::styled(
            "No teams in dataset",
            Style::default().fg(Color::DarkGray),
        )));
    }

    for division in &state.divisions {
        lines.push(Line::from(Span::styled(
            division.name.clone(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        for team in &division.teams {
            let checked = if state.filter.is_team_selected(&team.name) {
                "[x]"
            } else {
                "[ ]"
            };
            let style = if team_index == state.team_cursor {
                cursor_line = lines.len();
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            lines.push(Line::from(Span::styled(
                format!("  {checked} {}", team.name),
                style,
            )));
            team_index += 1;
        }
    }

    (lines, cursor_line)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
