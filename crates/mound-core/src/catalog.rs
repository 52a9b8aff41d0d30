// Catalog view: filtering, unique-player derivation, and pagination over the
// static dataset, plus the per-player summaries shown in card headers.
//
// The mutable bits (search text, selected teams, visible count) live in
// `FilterState` and `Pagination`, owned by the UI. Everything else here is a
// pure function of those values and the dataset.

use std::collections::{BTreeSet, HashSet};

use crate::dataset::{Dataset, Hand, PitchRecord};
use crate::format::{average_arm_angle, format_player_name};
use crate::teams::TeamInfo;

/// Default number of players visible before any "load more".
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Players added per "load more".
pub const DEFAULT_LOAD_MORE_INCREMENT: usize = 50;

// ---------------------------------------------------------------------------
// Filter and pagination state
// ---------------------------------------------------------------------------

/// User-controlled filter inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Free-text name search; compared trimmed and lower-cased.
    pub search: String,
    /// Selected team names. Empty means all teams.
    pub selected_teams: BTreeSet<String>,
}

impl FilterState {
    /// Add the team if absent, remove it if present. Returns whether the team
    /// is selected afterwards.
    pub fn toggle_team(&mut self, team: &str) -> bool {
        if self.selected_teams.remove(team) {
            false
        } else {
            self.selected_teams.insert(team.to_string());
            true
        }
    }

    pub fn clear_teams(&mut self) {
        self.selected_teams.clear();
    }

    pub fn is_team_selected(&self, team: &str) -> bool {
        self.selected_teams.contains(team)
    }
}

/// "Load more" pagination over the unique-player list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page_size: usize,
    increment: usize,
    visible: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination::new(DEFAULT_PAGE_SIZE, DEFAULT_LOAD_MORE_INCREMENT)
    }
}

impl Pagination {
    pub fn new(page_size: usize, increment: usize) -> Self {
        Pagination {
            page_size,
            increment,
            visible: page_size,
        }
    }

    /// The current visible-count threshold. May exceed the number of players;
    /// use [`visible_prefix`] to cap it.
    pub fn visible(&self) -> usize {
        self.visible
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn increment(&self) -> usize {
        self.increment
    }

    pub fn load_more(&mut self) {
        self.visible = self.visible.saturating_add(self.increment);
    }

    /// Back to the first page (used when the filter changes).
    pub fn reset(&mut self) {
        self.visible = self.page_size;
    }

    pub fn has_more(&self, total_players: usize) -> bool {
        self.visible < total_players
    }
}

// ---------------------------------------------------------------------------
// Pure filter functions
// ---------------------------------------------------------------------------

/// Records whose player name contains `search` (case-insensitive, trimmed)
/// and whose team is in `selected_teams` (no team filter when empty).
/// Dataset order is preserved.
pub fn filter_records<'a>(
    records: &'a [PitchRecord],
    search: &str,
    selected_teams: &BTreeSet<String>,
) -> Vec<&'a PitchRecord> {
    let needle = search.trim().to_lowercase();
    records
        .iter()
        .filter(|r| needle.is_empty() || r.player_name.to_lowercase().contains(&needle))
        .filter(|r| selected_teams.is_empty() || selected_teams.contains(&r.team_name))
        .collect()
}

/// Distinct player names in first-seen order.
pub fn unique_players<'a>(records: &[&'a PitchRecord]) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    records
        .iter()
        .map(|r| r.player_name.as_str())
        .filter(|name| seen.insert(*name))
        .collect()
}

/// The first `visible` items, never more than there are.
pub fn visible_prefix<T>(items: &[T], visible: usize) -> &[T] {
    &items[..visible.min(items.len())]
}

/// Split a player's rows into (vs right-handed batters, vs left-handed
/// batters), each in input order.
pub fn split_by_side<'a>(rows: &[&'a PitchRecord]) -> (Vec<&'a PitchRecord>, Vec<&'a PitchRecord>) {
    rows.iter().copied().partition(|r| r.stand_side == Hand::R)
}

// ---------------------------------------------------------------------------
// CatalogView
// ---------------------------------------------------------------------------

/// The result of applying a filter and pagination to the dataset.
#[derive(Debug, Clone)]
pub struct CatalogView<'a> {
    /// All matching records in dataset order.
    pub records: Vec<&'a PitchRecord>,
    /// Unique player names among `records`, first-seen order.
    pub players: Vec<&'a str>,
    visible: usize,
}

impl<'a> CatalogView<'a> {
    pub fn visible_players(&self) -> &[&'a str] {
        visible_prefix(&self.players, self.visible)
    }

    pub fn total_players(&self) -> usize {
        self.players.len()
    }

    pub fn has_more(&self) -> bool {
        self.visible < self.players.len()
    }

    /// The filtered rows belonging to one player.
    pub fn rows_for(&self, player_name: &str) -> Vec<&'a PitchRecord> {
        self.records
            .iter()
            .copied()
            .filter(|r| r.player_name == player_name)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// A team as offered by the team filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamEntry {
    pub name: String,
    pub logo: String,
}

/// Header values derived for one player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerSummary {
    pub player_name: String,
    pub display_name: String,
    pub throws: Hand,
    pub arm_angle: String,
}

/// Read-only access to the dataset with the derivations the views need.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    dataset: Dataset,
}

impl Catalog {
    pub fn new(dataset: Dataset) -> Self {
        Catalog { dataset }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn records(&self) -> &[PitchRecord] {
        self.dataset.records()
    }

    pub fn view(&self, filter: &FilterState, pagination: &Pagination) -> CatalogView<'_> {
        let records = filter_records(self.records(), &filter.search, &filter.selected_teams);
        let players = unique_players(&records);
        CatalogView {
            records,
            players,
            visible: pagination.visible(),
        }
    }

    /// Every record for the player, ignoring any filter.
    pub fn records_for(&self, player_name: &str) -> Vec<&PitchRecord> {
        self.records()
            .iter()
            .filter(|r| r.player_name == player_name)
            .collect()
    }

    /// Throwing hand from the player's first record; `R` when that record
    /// has none or the player is unknown.
    pub fn throw_hand(&self, player_name: &str) -> Hand {
        self.records()
            .iter()
            .find(|r| r.player_name == player_name)
            .and_then(|r| r.throws)
            .unwrap_or_default()
    }

    /// Mean arm angle over all of the player's records, one decimal.
    pub fn arm_angle(&self, player_name: &str) -> String {
        average_arm_angle(
            self.records()
                .iter()
                .filter(|r| r.player_name == player_name)
                .map(|r| r.arm_angle),
        )
    }

    /// Team fields embedded on the player's first record, or the
    /// "Unknown Team" sentinel.
    pub fn team_info(&self, player_name: &str) -> TeamInfo {
        match self.records().iter().find(|r| r.player_name == player_name) {
            Some(r) if !r.team_name.trim().is_empty() => {
                TeamInfo::new(r.team_name.clone(), r.team_logo.clone())
            }
            _ => TeamInfo::unknown(),
        }
    }

    /// Distinct non-empty team names in dataset order, each with the logo of
    /// its first record.
    pub fn unique_teams(&self) -> Vec<TeamEntry> {
        let mut seen = HashSet::new();
        self.records()
            .iter()
            .filter(|r| !r.team_name.trim().is_empty())
            .filter(|r| seen.insert(r.team_name.as_str()))
            .map(|r| TeamEntry {
                name: r.team_name.clone(),
                logo: r.team_logo.clone(),
            })
            .collect()
    }

    pub fn summary(&self, player_name: &str) -> PlayerSummary {
        PlayerSummary {
            player_name: player_name.to_string(),
            display_name: format_player_name(player_name),
            throws: self.throw_hand(player_name),
            arm_angle: self.arm_angle(player_name),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::PitchType;

    fn record(name: &str, team: &str, side: Hand, pitch: &str) -> PitchRecord {
        PitchRecord {
            player_name: name.to_string(),
            team_name: team.to_string(),
            team_logo: format!("/logos/{}.svg", team.to_lowercase().replace(' ', "-")),
            stand_side: side,
            pitch_type: PitchType::from(pitch),
            velocity_range: "93-96".to_string(),
            usage_rate: "40%".to_string(),
            zone_rate: "50%".to_string(),
            avg_spin_rate: Some(2300.0),
            avg_horz_break: Some(-6.0),
            avg_induced_vert_break: Some(15.0),
            throws: Some(Hand::R),
            arm_angle: Some(40.0),
        }
    }

    fn sample() -> Vec<PitchRecord> {
        vec![
            record("Smith, John", "Boston Red Sox", Hand::R, "FF"),
            record("Smith, John", "Boston Red Sox", Hand::L, "FF"),
            record("Ohtani, Shohei", "Los Angeles Dodgers", Hand::R, "ST"),
            record("Smithers, Al", "Durham Bulls", Hand::R, "SI"),
            record("Smith, John", "Boston Red Sox", Hand::R, "SL"),
        ]
    }

    fn teams(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_search_matches_everything() {
        let records = sample();
        assert_eq!(filter_records(&records, "", &BTreeSet::new()).len(), 5);
        assert_eq!(filter_records(&records, "   ", &BTreeSet::new()).len(), 5);
    }

    #[test]
    fn search_is_case_insensitive_substring_and_trimmed() {
        let records = sample();
        let hits = filter_records(&records, "  SMITH ", &BTreeSet::new());
        assert_eq!(hits.len(), 4);
        assert!(hits
            .iter()
            .all(|r| r.player_name.to_lowercase().contains("smith")));
    }

    #[test]
    fn team_filter_restricts_to_selection() {
        let records = sample();
        let hits = filter_records(&records, "", &teams(&["Durham Bulls", "Los Angeles Dodgers"]));
        let names: Vec<&str> = hits.iter().map(|r| r.player_name.as_str()).collect();
        assert_eq!(names, vec!["Ohtani, Shohei", "Smithers, Al"]);
    }

    #[test]
    fn search_and_team_filter_combine() {
        let records = sample();
        let hits = filter_records(&records, "smith", &teams(&["Durham Bulls"]));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].player_name, "Smithers, Al");
    }

    #[test]
    fn unique_players_first_seen_order_without_duplicates() {
        let records = sample();
        let filtered = filter_records(&records, "", &BTreeSet::new());
        assert_eq!(
            unique_players(&filtered),
            vec!["Smith, John", "Ohtani, Shohei", "Smithers, Al"]
        );
    }

    #[test]
    fn players_without_matching_rows_are_absent() {
        let records = sample();
        let filtered = filter_records(&records, "", &teams(&["Boston Red Sox"]));
        assert_eq!(unique_players(&filtered), vec!["Smith, John"]);
    }

    #[test]
    fn visible_prefix_is_capped() {
        let items = [1, 2, 3];
        assert_eq!(visible_prefix(&items, 2), &[1, 2]);
        assert_eq!(visible_prefix(&items, 50), &[1, 2, 3]);
        assert!(visible_prefix(&items, 0).is_empty());
    }

    #[test]
    fn pagination_load_more_and_reset() {
        let mut page = Pagination::default();
        assert_eq!(page.visible(), 50);
        assert!(page.has_more(51));
        assert!(!page.has_more(50));
        page.load_more();
        assert_eq!(page.visible(), 100);
        page.reset();
        assert_eq!(page.visible(), 50);
    }

    #[test]
    fn view_applies_pagination() {
        let catalog = Catalog::new(Dataset::new(sample()));
        let view = catalog.view(&FilterState::default(), &Pagination::new(2, 1));
        assert_eq!(view.total_players(), 3);
        assert_eq!(view.visible_players(), &["Smith, John", "Ohtani, Shohei"]);
        assert!(view.has_more());

        let mut page = Pagination::new(2, 1);
        page.load_more();
        let view = catalog.view(&FilterState::default(), &page);
        assert_eq!(view.visible_players().len(), 3);
        assert!(!view.has_more());
    }

    #[test]
    fn view_rows_for_player_respect_filter() {
        let catalog = Catalog::new(Dataset::new(sample()));
        let filter = FilterState {
            search: "smith, john".to_string(),
            selected_teams: BTreeSet::new(),
        };
        let view = catalog.view(&filter, &Pagination::default());
        assert_eq!(view.rows_for("Smith, John").len(), 3);
        assert!(view.rows_for("Ohtani, Shohei").is_empty());
    }

    #[test]
    fn split_by_side_partitions_in_order() {
        let records = sample();
        let rows: Vec<&PitchRecord> = records
            .iter()
            .filter(|r| r.player_name == "Smith, John")
            .collect();
        let (vs_right, vs_left) = split_by_side(&rows);
        assert_eq!(vs_right.len(), 2);
        assert_eq!(vs_right[0].pitch_type, PitchType::FF);
        assert_eq!(vs_right[1].pitch_type, PitchType::SL);
        assert_eq!(vs_left.len(), 1);
    }

    #[test]
    fn toggle_team_adds_and_removes() {
        let mut filter = FilterState::default();
        assert!(filter.toggle_team("Athletics"));
        assert!(filter.is_team_selected("Athletics"));
        assert!(!filter.toggle_team("Athletics"));
        assert!(filter.selected_teams.is_empty());
    }

    #[test]
    fn throw_hand_uses_first_record_and_defaults_to_right() {
        let mut records = sample();
        records[0].throws = Some(Hand::L);
        records[2].throws = None;
        let catalog = Catalog::new(Dataset::new(records));
        assert_eq!(catalog.throw_hand("Smith, John"), Hand::L);
        assert_eq!(catalog.throw_hand("Ohtani, Shohei"), Hand::R);
        assert_eq!(catalog.throw_hand("Nobody"), Hand::R);
    }

    #[test]
    fn arm_angle_averages_player_records() {
        let mut records = sample();
        records[0].arm_angle = Some(92.0);
        records[1].arm_angle = Some(94.0);
        records[4].arm_angle = None;
        records.push(PitchRecord {
            arm_angle: Some(96.0),
            ..record("Smith, John", "Boston Red Sox", Hand::L, "SL")
        });
        let catalog = Catalog::new(Dataset::new(records));
        assert_eq!(catalog.arm_angle("Smith, John"), "94.0");
        assert_eq!(catalog.arm_angle("Nobody"), "0.0");
    }

    #[test]
    fn team_info_prefers_dataset_fields() {
        let mut records = sample();
        records[3].team_name = String::new();
        let catalog = Catalog::new(Dataset::new(records));
        let info = catalog.team_info("Smith, John");
        assert_eq!(info.team_name, "Boston Red Sox");
        assert_eq!(info.team_logo, "/logos/boston-red-sox.svg");
        assert!(catalog.team_info("Smithers, Al").is_unknown());
        assert!(catalog.team_info("Nobody").is_unknown());
    }

    #[test]
    fn unique_teams_in_dataset_order_with_first_logo() {
        let catalog = Catalog::new(Dataset::new(sample()));
        let names: Vec<String> = catalog.unique_teams().into_iter().map(|t| t.name).collect();
        assert_eq!(
            names,
            vec!["Boston Red Sox", "Los Angeles Dodgers", "Durham Bulls"]
        );
    }

    #[test]
    fn summary_formats_display_name() {
        let catalog = Catalog::new(Dataset::new(sample()));
        let summary = catalog.summary("Smith, John");
        assert_eq!(summary.display_name, "John Smith");
        assert_eq!(summary.throws, Hand::R);
        assert_eq!(summary.arm_angle, "40.0");
    }
}
