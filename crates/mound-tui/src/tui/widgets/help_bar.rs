// Help bar widget: key hints for the current mode.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::{Mode, ViewState};

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        hints(state.mode),
        Style::default().fg(Color::White).add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

pub fn hints(mode: Mode) -> &'static str {
    match mode {
        Mode::Browse => {
            " q:Quit | j/k:Select | J/K:Scroll card | /:Search | t:Teams | m:Load more | r:Retry | Esc:Clear | ?:Metrics"
        }
        Mode::Search => " Type to search | Enter:Done | Esc:Clear",
        Mode::Teams => " j/k:Move | Space:Toggle | c:Clear all | Esc:Close",
        Mode::Help => " Esc:Close",
    }
}
