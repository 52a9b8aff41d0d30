// Player card widget: header, pitch tables split by batter side, heatmaps.
//
// The pitch tables show the player's rows that pass the active filter.
// Headshot, team and heatmap paths come from the player's `LoadStatus` and
// show a loading or error line until it settles. The header is drawn in the
// team's colors.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use mound_core::catalog::{split_by_side, PlayerSummary};
use mound_core::dataset::{Hand, PitchRecord};
use mound_core::format::{format_break, format_display, format_spin, hand_slot_label};
use mound_core::loader::{LoadStatus, PlayerData};
use mound_core::teams::{parse_hex_color, team_colors, TeamColors, UNKNOWN_TEAM};

use crate::tui::ViewState;

pub const VS_RIGHT_TITLE: &str = "VS RIGHT HANDED HITTERS";
pub const VS_LEFT_TITLE: &str = "VS LEFT HANDED HITTERS";
pub const NO_DATA: &str = "No data";

/// Column headers and widths of the pitch tables.
const COLUMNS: [(&str, usize); 7] = [
    ("Pitch", 20),
    ("Velo", 9),
    ("Usage", 8),
    ("Zone%", 8),
    ("Spin", 7),
    ("Horizontal Break", 18),
    ("Vertical Break", 16),
];

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let Some(player) = state.selected_player() else {
        let empty = Paragraph::new("No pitcher selected")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title("Pitcher"));
        frame.render_widget(empty, area);
        return;
    };

    let summary = state.catalog.summary(&player);
    let status = state.player_status.get(&player);
    let data = status.and_then(LoadStatus::data);

    let team_name = data.map_or(UNKNOWN_TEAM, |d| d.team_info.team_name.as_str());
    let colors = team_colors(team_name);
    let primary = hex_to_color(colors.primary);

    let view = state.view();
    let rows = view.rows_for(&player);
    let (vs_right, vs_left) = split_by_side(&rows);

    let mut lines = header_lines(&summary, status, colors);
    lines.push(Line::default());
    lines.extend(pitch_table_lines(VS_RIGHT_TITLE, &vs_right));
    lines.push(Line::default());
    lines.extend(pitch_table_lines(VS_LEFT_TITLE, &vs_left));
    lines.push(Line::default());
    lines.extend(heat_map_lines(&vs_right, status));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(primary))
        .title(Span::styled(
            format!(" {} ", summary.display_name),
            Style::default()
                .fg(Color::White)
                .bg(primary)
                .add_modifier(Modifier::BOLD),
        ));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((state.card_scroll, 0));
    frame.render_widget(paragraph, area);
}

/// `#RRGGBB` as a terminal color; gray when unparseable.
pub fn hex_to_color(hex: &str) -> Color {
    parse_hex_color(hex)
        .map(|(r, g, b)| Color::Rgb(r, g, b))
        .unwrap_or(Color::Gray)
}

/// Team, handedness/slot badge, headshot and logo.
pub fn header_lines(
    summary: &PlayerSummary,
    status: Option<&LoadStatus>,
    colors: TeamColors,
) -> Vec<Line<'static>> {
    let badge = Span::styled(
        format!(" {} ", hand_slot_label(summary.throws, &summary.arm_angle)),
        Style::default()
            .fg(Color::White)
            .bg(hex_to_color(colors.secondary)),
    );

    let mut lines = Vec::new();
    match status {
        Some(LoadStatus::Ready(data)) => {
            lines.push(Line::from(vec![
                Span::styled(
                    data.team_info.team_name.clone(),
                    Style::default()
                        .fg(hex_to_color(colors.primary))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                badge,
            ]));
            lines.push(labeled("Headshot", data.image.clone()));
            lines.push(labeled(
                "Logo",
                format_display(&data.team_info.team_logo).to_string(),
            ));
        }
        Some(LoadStatus::Failed(message)) => {
            lines.push(Line::from(vec![badge]));
            lines.push(Line::from(Span::styled(
                format!("Could not load player data: {message} (r to retry)"),
                Style::default().fg(Color::Red),
            )));
        }
        Some(LoadStatus::Pending) | None => {
            lines.push(Line::from(vec![badge]));
            lines.push(Line::from(Span::styled(
                "Loading player data...",
                Style::default().fg(Color::DarkGray),
            )));
        }
    }
    lines
}

fn labeled(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(Color::DarkGray)),
        Span::raw(value),
    ])
}

/// Section title, header row and one row per pitch; "No data" when empty.
pub fn pitch_table_lines(title: &str, rows: &[&PitchRecord]) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        title.to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    ))];

    if rows.is_empty() {
        lines.push(Line::from(Span::styled(
            NO_DATA,
            Style::default().fg(Color::DarkGray),
        )));
        return lines;
    }

    let header: Vec<String> = COLUMNS.iter().map(|(name, _)| name.to_string()).collect();
    lines.push(Line::from(Span::styled(
        pad_columns(&header),
        Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::UNDERLINED),
    )));
    lines.extend(rows.iter().map(|r| Line::from(pad_columns(&pitch_row(r)))));
    lines
}

/// Display values of one pitch row, in column order.
pub fn pitch_row(record: &PitchRecord) -> Vec<String> {
    vec![
        record.pitch_type.display_name().to_string(),
        format_display(&record.velocity_range).to_string(),
        format_display(&record.usage_rate).to_string(),
        format_display(&record.zone_rate).to_string(),
        format_spin(record.avg_spin_rate),
        format_break(record.avg_horz_break),
        format_break(record.avg_induced_vert_break),
    ]
}

fn pad_columns(cells: &[String]) -> String {
    cells
        .iter()
        .zip(COLUMNS.iter())
        .map(|(cell, &(_, width))| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" ")
        .trim_end()
        .to_string()
}

/// One line per vs-right pitch with its R and L heatmap paths.
pub fn heat_map_lines(
    vs_right: &[&PitchRecord],
    status: Option<&LoadStatus>,
) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        "HEAT MAPS",
        Style::default().add_modifier(Modifier::BOLD),
    ))];

    let Some(data) = status.and_then(LoadStatus::data) else {
        lines.push(Line::from(Span::styled(
            "Loading...",
            Style::default().fg(Color::DarkGray),
        )));
        return lines;
    };

    if vs_right.is_empty() {
        lines.push(Line::from(Span::styled(
            NO_DATA,
            Style::default().fg(Color::DarkGray),
        )));
        return lines;
    }

    for record in vs_right {
        lines.push(Line::from(Span::styled(
            record.pitch_type.display_name().to_string(),
            Style::default().fg(Color::Gray),
        )));
        for side in [Hand::R, Hand::L] {
            lines.push(labeled(
                &format!("  vs {side}"),
                heat_map_for(data, record, side).to_string(),
            ));
        }
    }
    lines
}

fn heat_map_for<'a>(data: &'a PlayerData, record: &PitchRecord, side: Hand) -> &'a str {
    data.heat_maps
        .get(&record.pitch_type)
        .and_then(|pair| pair.get(side))
        .unwrap_or(NO_DATA)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::tests::{sample_data, sample_state};
    use mound_core::catalog::{Catalog, Pagination};
    use mound_core::dataset::{Dataset, PitchType};
    use mound_core::loader::HeatMapPair;
    use std::sync::Arc;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn rendered_text(state: &ViewState) -> String {
        let backend = ratatui::backend::TestBackend::new(110, 40);
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
    fn hex_to_color_parses_rgb() {
        assert_eq!(hex_to_color("#BD3039"), Color::Rgb(0xBD, 0x30, 0x39));
        assert_eq!(hex_to_color("nonsense"), Color::Gray);
    }

    #[test]
    fn pitch_row_formats_values() {
        let state = sample_state();
        let rows = state.catalog.records_for("Smith, John");
        assert_eq!(
            pitch_row(rows[0]),
            vec!["Four-Seam Fastball", "94-97", "48.1%", "55.0%", "2,398", "-7.4", "16.1"]
        );
    }

    #[test]
    fn pitch_row_missing_values_show_dash() {
        let state = sample_state();
        let rows = state.catalog.records_for("Doe, Jane");
        let row = pitch_row(rows[0]);
        assert_eq!(row[0], "Knuckleball");
        assert!(row[1..].iter().all(|cell| cell == "-"));
    }

    #[test]
    fn empty_side_shows_no_data() {
        let lines = pitch_table_lines(VS_LEFT_TITLE, &[]);
        assert_eq!(line_text(&lines[0]), VS_LEFT_TITLE);
        assert_eq!(line_text(&lines[1]), NO_DATA);
    }

    #[test]
    fn table_header_lists_columns() {
        let state = sample_state();
        let rows = state.catalog.records_for("Smith, John");
        let lines = pitch_table_lines(VS_RIGHT_TITLE, &rows[..1]);
        let header = line_text(&lines[1]);
        for (name, _) in COLUMNS {
            assert!(header.contains(name), "missing column {name}");
        }
    }

    #[test]
    fn heat_maps_fall_back_to_no_data() {
        let state = sample_state();
        let rows = state.catalog.records_for("Smith, John");
        let (vs_right, _) = split_by_side(&rows);

        let mut data = sample_data();
        data.heat_maps.insert(
            PitchType::FF,
            HeatMapPair {
                right: Some("/heatmaps/Smith_John_FF_R.png".into()),
                left: None,
            },
        );
        let status = LoadStatus::Ready(data);
        let lines: Vec<String> = heat_map_lines(&vs_right, Some(&status))
            .iter()
            .map(line_text)
            .collect();

        assert_eq!(lines[1], "Four-Seam Fastball");
        assert_eq!(lines[2], "  vs R: /heatmaps/Smith_John_FF_R.png");
        assert_eq!(lines[3], "  vs L: No data");
    }

    #[test]
    fn heat_maps_wait_for_data() {
        let lines = heat_map_lines(&[], Some(&LoadStatus::Pending));
        assert_eq!(line_text(&lines[1]), "Loading...");
    }

    #[test]
    fn header_shows_slot_badge() {
        let state = sample_state();
        let summary = state.catalog.summary("Smith, John");
        let lines = header_lines(
            &summary,
            Some(&LoadStatus::Ready(sample_data())),
            team_colors("Boston Red Sox"),
        );
        let first = line_text(&lines[0]);
        assert!(first.contains("Boston Red Sox"));
        assert!(first.contains("RHP • 43.0° slot"));
        assert_eq!(line_text(&lines[1]), "Headshot: https://img/1.jpg");
    }

    #[test]
    fn header_shows_failure() {
        let state = sample_state();
        let summary = state.catalog.summary("Smith, John");
        let status = LoadStatus::Failed("timed out".into());
        let lines = header_lines(&summary, Some(&status), team_colors(UNKNOWN_TEAM));
        assert!(line_text(&lines[1]).contains("timed out"));
    }

    #[test]
    fn render_ready_card() {
        let mut state = sample_state();
        state
            .player_status
            .insert("Smith, John".into(), LoadStatus::Ready(sample_data()));
        let text = rendered_text(&state);
        assert!(text.contains("John Smith"));
        assert!(text.contains(VS_RIGHT_TITLE));
        assert!(text.contains(VS_LEFT_TITLE));
        assert!(text.contains("Slider"));
    }

    #[test]
    fn card_only_shows_rows_passing_the_team_filter() {
        let rows = serde_json::json!([
            {"player_name": "Traded, Guy", "team_name": "Boston Red Sox",
             "stand_side": "R", "pitch_type": "FF", "throws": "R"},
            {"player_name": "Traded, Guy", "team_name": "Chicago Cubs",
             "stand_side": "R", "pitch_type": "KN", "throws": "R"}
        ]);
        let dataset = Dataset::from_reader(rows.to_string().as_bytes()).unwrap();
        let mut state = ViewState::new(
            Arc::new(Catalog::new(dataset)),
            Pagination::default(),
            None,
        );
        state.filter.toggle_team("Chicago Cubs");
        state.on_filter_changed();

        let text = rendered_text(&state);
        assert!(text.contains("Knuckleball"));
        assert!(!text.contains("Four-Seam Fastball"));
    }

    #[test]
    fn render_without_selection_does_not_panic() {
        let mut state = sample_state();
        state.filter.search = "nobody".into();
        let text = rendered_text(&state);
        assert!(text.contains("No pitcher selected"));
    }
}
