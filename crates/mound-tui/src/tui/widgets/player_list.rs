// Player list widget: the filtered, paginated pitcher list.
//
// One line per unique player in dataset order, highlighted selection, a
// "load more" hint while more players remain, and an empty-state message.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use mound_core::format::format_player_name;
use mound_core::loader::LoadStatus;

use crate::tui::ViewState;

pub const EMPTY_MESSAGE: &str = "No pitchers found matching your criteria";

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let view = state.view();
    let players = view.visible_players();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Pitchers ({}/{})", players.len(), view.total_players()));

    if players.is_empty() {
        let empty = Paragraph::new(EMPTY_MESSAGE)
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let mut items: Vec<ListItem> = players
        .iter()
        .map(|name| {
            let marker = status_marker(state.player_status.get(*name));
            let team = state.catalog.team_info(name).team_name;
            ListItem::new(Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::DarkGray)),
                Span::raw(format_player_name(name)),
                Span::styled(format!("  {team}"), Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect();

    if view.has_more() {
        let remaining = view.total_players() - players.len();
        items.push(ListItem::new(Line::from(Span::styled(
            load_more_label(remaining, state.pagination.increment()),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
        ))));
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut list_state = ListState::default().with_selected(Some(state.selected));
    frame.render_stateful_widget(list, area, &mut list_state);
}

/// E.g. "Load more (m) - next 50 of 120 remaining".
pub fn load_more_label(remaining: usize, increment: usize) -> String {
    format!(
        "Load more (m) - next {} of {remaining} remaining",
        increment.min(remaining)
    )
}

fn status_marker(status: Option<&LoadStatus>) -> &'static str {
    match status {
        Some(LoadStatus::Failed(_)) => "! ",
        Some(LoadStatus::Pending) => "~ ",
        _ => "  ",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::tests::sample_state;

    fn rendered_text(state: &ViewState) -> String {
        let backend = ratatui::backend::TestBackend::new(60, 12);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), state))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn load_more_label_caps_at_remaining() {
        assert_eq!(load_more_label(3, 50), "Load more (m) - next 3 of 3 remaining");
        assert_eq!(load_more_label(120, 50), "Load more (m) - next 50 of 120 remaining");
    }

    #[test]
    fn status_marker_values() {
        assert_eq!(status_marker(None), "  ");
        assert_eq!(status_marker(Some(&LoadStatus::Pending)), "~ ");
        assert_eq!(status_marker(Some(&LoadStatus::Failed("x".into()))), "! ");
    }

    #[test]
    fn renders_formatted_names_and_load_more() {
        let text = rendered_text(&sample_state());
        assert!(text.contains("John Smith"));
        assert!(text.contains("Jane Doe"));
        assert!(!text.contains("Pablo Lopez"));
        assert!(text.contains("Load more"));
    }

    #[test]
    fn no_load_more_when_everything_is_visible() {
        let mut state = sample_state();
        state.load_more();
        let text = rendered_text(&state);
        assert!(text.contains("Pablo Lopez"));
        assert!(!text.contains("Load more"));
    }

    #[test]
    fn empty_state_message() {
        let mut state = sample_state();
        state.filter.search = "zzz".into();
        let text = rendered_text(&state);
        assert!(text.contains("No pitchers found"));
    }
}
