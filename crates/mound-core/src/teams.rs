// Team branding: the resolved team info shown on a card, and the color
// palette used for card headers.

use serde::{Deserialize, Serialize};

/// Sentinel team name used whenever a team cannot be resolved.
pub const UNKNOWN_TEAM: &str = "Unknown Team";

/// Team name and logo location as displayed on a player card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamInfo {
    pub team_name: String,
    /// Logo path or URL; empty when there is no logo.
    pub team_logo: String,
}

impl TeamInfo {
    pub fn new(team_name: impl Into<String>, team_logo: impl Into<String>) -> Self {
        TeamInfo {
            team_name: team_name.into(),
            team_logo: team_logo.into(),
        }
    }

    /// The "Unknown Team" sentinel with no logo.
    pub fn unknown() -> Self {
        TeamInfo::new(UNKNOWN_TEAM, "")
    }

    pub fn is_unknown(&self) -> bool {
        self.team_name == UNKNOWN_TEAM
    }
}

/// Header gradient colors as `#RRGGBB` strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamColors {
    pub primary: &'static str,
    pub secondary: &'static str,
}

const fn colors(primary: &'static str, secondary: &'static str) -> TeamColors {
    TeamColors { primary, secondary }
}

const UNKNOWN_COLORS: TeamColors = colors("#1E3A8A", "#3B82F6");

const TEAM_COLORS: &[(&str, TeamColors)] = &[
    ("Arizona Diamondbacks", colors("#A71930", "#E3D4AD")),
    ("Atlanta Braves", colors("#13274F", "#CE1141")),
    ("Baltimore Orioles", colors("#DF4601", "#000000")),
    ("Boston Red Sox", colors("#BD3039", "#0C2340")),
    ("Chicago Cubs", colors("#0E3386", "#CC3433")),
    ("Chicago White Sox", colors("#27251F", "#C4CED4")),
    ("Cincinnati Reds", colors("#C6011F", "#000000")),
    ("Cleveland Guardians", colors("#0C2340", "#E31937")),
    ("Colorado Rockies", colors("#33006F", "#C4CED4")),
    ("Detroit Tigers", colors("#0C2340", "#FA4616")),
    ("Houston Astros", colors("#002D62", "#EB6E1F")),
    ("Kansas City Royals", colors("#004687", "#BD9B60")),
    ("Los Angeles Angels", colors("#003263", "#BA0021")),
    ("Los Angeles Dodgers", colors("#005A9C", "#A5ACAF")),
    ("Miami Marlins", colors("#00A3E0", "#EF3340")),
    ("Milwaukee Brewers", colors("#12284B", "#FFC52F")),
    ("Minnesota Twins", colors("#002B5C", "#D31145")),
    ("New York Mets", colors("#002D72", "#FF5910")),
    ("New York Yankees", colors("#0C2340", "#C4CED4")),
    ("Athletics", colors("#003831", "#EFB21E")),
    ("Philadelphia Phillies", colors("#E81828", "#002D72")),
    ("Pittsburgh Pirates", colors("#FDB827", "#27251F")),
    ("San Diego Padres", colors("#2F241D", "#FFC425")),
    ("San Francisco Giants", colors("#FD5A1E", "#27251F")),
    ("Seattle Mariners", colors("#0C2C56", "#005C5C")),
    ("St. Louis Cardinals", colors("#C41E3A", "#0C2340")),
    ("Tampa Bay Rays", colors("#092C5C", "#8FBCE6")),
    ("Texas Rangers", colors("#003278", "#C0111F")),
    ("Toronto Blue Jays", colors("#134A8E", "#E8291C")),
    ("Washington Nationals", colors("#AB0003", "#14225A")),
    (UNKNOWN_TEAM, UNKNOWN_COLORS),
];

/// Palette for a team name; teams without an entry get the "Unknown Team"
/// palette.
pub fn team_colors(team_name: &str) -> TeamColors {
    TEAM_COLORS
        .iter()
        .find(|(name, _)| *name == team_name)
        .map(|(_, c)| *c)
        .unwrap_or(UNKNOWN_COLORS)
}

/// Parse `#RRGGBB` into its components.
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some((r, g, b))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_team_colors() {
        let c = team_colors("Boston Red Sox");
        assert_eq!(c.primary, "#BD3039");
        assert_eq!(c.secondary, "#0C2340");
    }

    #[test]
    fn unknown_team_falls_back_to_default_palette() {
        assert_eq!(team_colors("Durham Bulls"), team_colors(UNKNOWN_TEAM));
        assert_eq!(team_colors(""), UNKNOWN_COLORS);
    }

    #[test]
    fn parse_hex_color_components() {
        assert_eq!(parse_hex_color("#BD3039"), Some((0xBD, 0x30, 0x39)));
        assert_eq!(parse_hex_color("BD3039"), None);
        assert_eq!(parse_hex_color("#BD30"), None);
        assert_eq!(parse_hex_color("#GG0000"), None);
    }

    #[test]
    fn every_palette_entry_parses() {
        for (name, c) in TEAM_COLORS {
            assert!(parse_hex_color(c.primary).is_some(), "{name} primary");
            assert!(parse_hex_color(c.secondary).is_some(), "{name} secondary");
        }
    }

    #[test]
    fn unknown_sentinel() {
        let info = TeamInfo::unknown();
        assert_eq!(info.team_name, "Unknown Team");
        assert!(info.team_logo.is_empty());
        assert!(info.is_unknown());
        assert!(!TeamInfo::new("Athletics", "").is_unknown());
    }
}
