// Metrics guide overlay: what each column on a player card measures.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::tui::layout::overlay_rect;

/// (metric, explanation) pairs in display order.
pub const METRICS: &[(&str, &str)] = &[
    (
        "Velocity (Velo)",
        "Speed of the pitch out of the hand, in MPH. Fastballs usually sit 90-100+; \
         breaking balls run 10-15 MPH slower.",
    ),
    (
        "Spin Rate",
        "Revolutions per minute. High spin adds carry to fastballs and bite to breaking \
         balls; low spin means more sink and weaker contact.",
    ),
    (
        "Horizontal Break",
        "Inches of side-to-side movement from the pitcher's view. Positive values move \
         toward the glove side.",
    ),
    (
        "Vertical Break",
        "Induced vertical break: rise or sink in inches compared to a spinless pitch. \
         Positive values ride upward.",
    ),
    (
        "Usage",
        "Share of the pitcher's pitches of this type against this batter side.",
    ),
    (
        "Zone%",
        "Share of these pitches thrown in the strike zone. Higher means better command.",
    ),
    (
        "Arm Slot",
        "Average release arm angle in degrees, shown beside the throwing hand.",
    ),
];

pub fn render(frame: &mut Frame, area: Rect) {
    let width = area.width.saturating_sub(8).min(72);
    let height = area.height.saturating_sub(4).min(24);
    let help_area = overlay_rect(width, height, area);
    frame.render_widget(Clear, help_area);

    let paragraph = Paragraph::new(help_lines())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Pitching metrics explained "),
        )
        .style(Style::default().bg(Color::Black))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, help_area);
}

pub fn help_lines() -> Vec<Line<'static>> {
    METRICS
        .iter()
        .flat_map(|(metric, text)| {
            [
                Line::from(Span::styled(
                    *metric,
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(*text),
            ]
        })
        .collect()
}
