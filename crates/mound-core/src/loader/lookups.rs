// The three per-player lookups: headshot URL, team branding, heatmap paths.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use super::LookupError;
use crate::catalog::Catalog;
use crate::config::{ImagesConfig, TeamsConfig};
use crate::dataset::{Hand, PitchRecord, PitchType, PlayerIdTable};
use crate::format::sanitize_heatmap_name;
use crate::teams::TeamInfo;

// ---------------------------------------------------------------------------
// Headshots
// ---------------------------------------------------------------------------

/// Builds headshot URLs from the player-id table.
#[derive(Debug, Clone)]
pub struct HeadshotResolver {
    ids: Arc<PlayerIdTable>,
    url_template: String,
    default_path: String,
}

impl HeadshotResolver {
    pub fn new(
        ids: Arc<PlayerIdTable>,
        url_template: impl Into<String>,
        default_path: impl Into<String>,
    ) -> Self {
        HeadshotResolver {
            ids,
            url_template: url_template.into(),
            default_path: default_path.into(),
        }
    }

    pub fn from_config(ids: Arc<PlayerIdTable>, images: &ImagesConfig) -> Self {
        Self::new(ids, &images.headshot_url, &images.default_headshot)
    }

    /// Headshot URL for the player, or the placeholder path when the name
    /// has no id.
    pub fn resolve(&self, player_name: &str) -> String {
        match self.ids.lookup(player_name) {
            Some(id) => self.url_template.replace("{id}", &id.to_string()),
            None => {
                warn!("no player id for {player_name:?}, using default headshot");
                self.default_path.clone()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Team sources
// ---------------------------------------------------------------------------

/// Resolves the team shown on a player's card.
#[async_trait]
pub trait TeamSource: Send + Sync {
    async fn team_info(&self, player_name: &str) -> Result<TeamInfo, LookupError>;
}

/// Team fields embedded in the player's own pitch rows.
pub struct DatasetTeams {
    catalog: Arc<Catalog>,
}

impl DatasetTeams {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        DatasetTeams { catalog }
    }
}

#[async_trait]
impl TeamSource for DatasetTeams {
    async fn team_info(&self, player_name: &str) -> Result<TeamInfo, LookupError> {
        Ok(self.catalog.team_info(player_name))
    }
}

/// `GET {base}/people/{id}?hydrate=currentTeam` response, reduced to the
/// fields we read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PeopleResponse {
    #[serde(default)]
    pub people: Vec<Person>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Person {
    #[serde(rename = "currentTeam", default)]
    pub current_team: Option<CurrentTeam>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentTeam {
    pub id: u64,
    pub name: String,
}

/// Team name plus templated logo URL for the first person's current team.
pub fn current_team_info(response: &PeopleResponse, logo_template: &str) -> Option<TeamInfo> {
    let team = response.people.first()?.current_team.as_ref()?;
    Some(TeamInfo::new(
        team.name.clone(),
        logo_template.replace("{id}", &team.id.to_string()),
    ))
}

/// Current team from the MLB Stats API. Misses and transport failures fall
/// back to the "Unknown Team" sentinel rather than failing the card.
pub struct StatsApiTeams {
    http: reqwest::Client,
    base_url: String,
    logo_template: String,
    ids: Arc<PlayerIdTable>,
}

impl StatsApiTeams {
    pub fn new(ids: Arc<PlayerIdTable>, teams: &TeamsConfig) -> Result<Self, LookupError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(teams.request_timeout_secs))
            .user_agent(concat!("mound-report/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(StatsApiTeams {
            http,
            base_url: teams.stats_api_base.trim_end_matches('/').to_string(),
            logo_template: teams.logo_url.clone(),
            ids,
        })
    }

    async fn fetch_current_team(&self, player_id: u64) -> Result<Option<TeamInfo>, LookupError> {
        let url = format!("{}/people/{player_id}", self.base_url);
        debug!("fetching current team from {url}");

        let resp = self
            .http
            .get(&url)
            .query(&[("hydrate", "currentTeam")])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(LookupError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = resp.text().await?;
        let people: PeopleResponse =
            serde_json::from_str(&body).map_err(|source| LookupError::Decode {
                url: url.clone(),
                source,
            })?;
        Ok(current_team_info(&people, &self.logo_template))
    }
}

#[async_trait]
impl TeamSource for StatsApiTeams {
    async fn team_info(&self, player_name: &str) -> Result<TeamInfo, LookupError> {
        let Some(player_id) = self.ids.lookup(player_name) else {
            warn!("no player id for {player_name:?}, team unknown");
            return Ok(TeamInfo::unknown());
        };

        match self.fetch_current_team(player_id).await {
            Ok(Some(info)) => Ok(info),
            Ok(None) => {
                warn!("no current team for {player_name:?} (id {player_id})");
                Ok(TeamInfo::unknown())
            }
            Err(e) => {
                warn!("team lookup failed for {player_name:?} (id {player_id}): {e}");
                Ok(TeamInfo::unknown())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Heat maps
// ---------------------------------------------------------------------------

/// Heatmap image paths for one pitch type, per batter side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeatMapPair {
    pub right: Option<String>,
    pub left: Option<String>,
}

impl HeatMapPair {
    pub fn get(&self, side: Hand) -> Option<&str> {
        match side {
            Hand::R => self.right.as_deref(),
            Hand::L => self.left.as_deref(),
        }
    }

    fn set(&mut self, side: Hand, path: String) {
        match side {
            Hand::R => self.right = Some(path),
            Hand::L => self.left = Some(path),
        }
    }
}

pub type HeatMaps = BTreeMap<PitchType, HeatMapPair>;

/// `{dir}/{sanitized name}_{pitch}_{side}.png`. Whether the file exists is
/// not checked.
pub fn heat_map_path(dir: &str, player_name: &str, pitch: &PitchType, side: Hand) -> String {
    format!(
        "{}/{}_{}_{}.png",
        dir.trim_end_matches('/'),
        sanitize_heatmap_name(player_name),
        pitch.code(),
        side
    )
}

/// One path per (pitch type, side) present in the player's rows.
pub fn heat_map_paths(player_name: &str, rows: &[&PitchRecord], dir: &str) -> HeatMaps {
    let mut maps = HeatMaps::new();
    for row in rows {
        let path = heat_map_path(dir, player_name, &row.pitch_type, row.stand_side);
        maps
            .entry(row.pitch_type.clone())
            .or_default()
            .set(row.stand_side, path);
    }
    maps
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
