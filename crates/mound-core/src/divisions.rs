// Team division grouping for the team filter.
//
// Major-league clubs and their Triple-A affiliates are enumerated per
// division. Any other team name lands in the catch-all "Non-MLB" bucket.

use std::collections::BTreeMap;

use crate::catalog::TeamEntry;

/// Catch-all bucket for teams outside the enumerated divisions.
pub const NON_MLB: &str = "Non-MLB";

pub const MLB_DIVISIONS: &[(&str, &[&str])] = &[
    (
        "AL West",
        &[
            "Houston Astros",
            "Sugar Land Space Cowboys",
            "Los Angeles Angels",
            "Salt Lake Bees",
            "Athletics",
            "Las Vegas Aviators",
            "Seattle Mariners",
            "Tacoma Rainiers",
            "Texas Rangers",
            "Round Rock Express",
        ],
    ),
    (
        "AL Central",
        &[
            "Chicago White Sox",
            "Charlotte Knights",
            "Cleveland Guardians",
            "Columbus Clippers",
            "Detroit Tigers",
            "Toledo Mud Hens",
            "Kansas City Royals",
            "Omaha Storm Chasers",
            "Minnesota Twins",
            "St. Paul Saints",
        ],
    ),
    (
        "AL East",
        &[
            "Baltimore Orioles",
            "Norfolk Tides",
            "Boston Red Sox",
            "Worcester Red Sox",
            "New York Yankees",
            "Scranton/Wilkes-Barre RailRiders",
            "Tampa Bay Rays",
            "Durham Bulls",
            "Toronto Blue Jays",
            "Buffalo Bisons",
        ],
    ),
    (
        "NL West",
        &[
            "Arizona Diamondbacks",
            "Reno Aces",
            "Colorado Rockies",
            "Albuquerque Isotopes",
            "Los Angeles Dodgers",
            "Oklahoma City Dodgers",
            "San Diego Padres",
            "El Paso Chihuahuas",
            "San Francisco Giants",
            "Sacramento River Cats",
        ],
    ),
    (
        "NL Central",
        &[
            "Chicago Cubs",
            "Iowa Cubs",
            "Cincinnati Reds",
            "Louisville Bats",
            "Milwaukee Brewers",
            "Nashville Sounds",
            "Pittsburgh Pirates",
            "Indianapolis Indians",
            "St. Louis Cardinals",
            "Memphis Redbirds",
        ],
    ),
    (
        "NL East",
        &[
            "Atlanta Braves",
            "Gwinnett Stripers",
            "Miami Marlins",
            "Jacksonville Jumbo Shrimp",
            "New York Mets",
            "Syracuse Mets",
            "Philadelphia Phillies",
            "Lehigh Valley IronPigs",
            "Washington Nationals",
            "Rochester Red Wings",
        ],
    ),
];

/// A division and the dataset teams that belong to it, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Division {
    pub name: String,
    pub teams: Vec<TeamEntry>,
}

/// The division a team belongs to, or [`NON_MLB`].
pub fn division_of(team_name: &str) -> &'static str {
    MLB_DIVISIONS
        .iter()
        .find(|(_, members)| members.contains(&team_name))
        .map(|(division, _)| *division)
        .unwrap_or(NON_MLB)
}

/// Partition teams into divisions, sorted by division name. Only divisions
/// with at least one team are returned.
pub fn group_by_division(teams: &[TeamEntry]) -> Vec<Division> {
    let mut grouped: BTreeMap<&'static str, Vec<TeamEntry>> = BTreeMap::new();
    for team in teams {
        grouped
            .entry(division_of(&team.name))
            .or_default()
            .push(team.clone());
    }
    grouped
        .into_iter()
        .map(|(name, teams)| Division {
            name: name.to_string(),
            teams,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
