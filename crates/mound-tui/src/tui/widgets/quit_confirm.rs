// Quit dialog: a small bordered prompt drawn over the browser while
// `ViewState::confirm_quit` is set. Input is handled in `input.rs`.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::tui::layout::overlay_rect;

pub const PROMPT: &str = "Leave the Mound?";

/// Answer keys offered under the prompt.
const ANSWERS: [(&str, &str, Color); 2] = [
    ("y", "quit", Color::Green),
    ("n", "stay", Color::Red),
];

pub fn render(frame: &mut Frame, area: Rect) {
    let lines = prompt_lines();
    let text_width = lines.iter().map(Line::width).max().unwrap_or(0) as u16;
    let dialog = overlay_rect(text_width + 6, lines.len() as u16 + 2, area);

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Quit "),
    );
    frame.render_widget(Clear, dialog);
    frame.render_widget(paragraph, dialog);
}

/// The prompt line and the answer-key line, both centered.
pub fn prompt_lines() -> Vec<Line<'static>> {
    let mut answers = Vec::new();
    for (i, (key, action, color)) in ANSWERS.into_iter().enumerate() {
        if i > 0 {
            answers.push(Span::raw("   "));
        }
        answers.push(Span::styled(
            key,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
        answers.push(Span::raw(format!(" {action}")));
    }

    vec![
        Line::from(Span::styled(
            PROMPT,
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .centered(),
        Line::from(answers).centered(),
    ]
}
