// Per-player auxiliary data: headshot, team branding and heatmap paths,
// resolved concurrently and memoized per (kind, player name).

pub mod cache;
pub mod lookups;

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::config::{Config, TeamSourceKind};
use crate::dataset::PlayerIdTable;
use crate::teams::TeamInfo;

pub use cache::{CacheKey, LookupCache, LookupKind};
pub use lookups::{
    DatasetTeams, HeadshotResolver, HeatMapPair, HeatMaps, StatsApiTeams, TeamSource,
};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        source: serde_json::Error,
    },

    #[error("{0}")]
    Source(String),
}

// ---------------------------------------------------------------------------
// Result and status types
// ---------------------------------------------------------------------------

/// Everything a player card needs beyond the pitch rows.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerData {
    pub image: String,
    pub team_info: TeamInfo,
    pub heat_maps: HeatMaps,
}

/// Load state of one player's card.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadStatus {
    #[default]
    Pending,
    Ready(PlayerData),
    Failed(String),
}

impl LoadStatus {
    /// Move out of `Pending`. Returns false, leaving the status unchanged,
    /// if it has already settled.
    pub fn settle(&mut self, result: Result<PlayerData, String>) -> bool {
        if !self.is_pending() {
            return false;
        }
        *self = match result {
            Ok(data) => LoadStatus::Ready(data),
            Err(message) => LoadStatus::Failed(message),
        };
        true
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, LoadStatus::Pending)
    }

    pub fn data(&self) -> Option<&PlayerData> {
        match self {
            LoadStatus::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadStatus::Failed(message) => Some(message),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// PlayerDataLoader
// ---------------------------------------------------------------------------

pub struct PlayerDataLoader {
    catalog: Arc<Catalog>,
    headshots: HeadshotResolver,
    teams: Arc<dyn TeamSource>,
    heatmap_dir: String,
    images: LookupCache<String>,
    team_infos: LookupCache<TeamInfo>,
    heat_maps: LookupCache<HeatMaps>,
}

impl PlayerDataLoader {
    /// `cache_capacity` bounds each of the three caches; 0 is unbounded.
    pub fn new(
        catalog: Arc<Catalog>,
        headshots: HeadshotResolver,
        teams: Arc<dyn TeamSource>,
        heatmap_dir: impl Into<String>,
        cache_capacity: usize,
    ) -> Self {
        PlayerDataLoader {
            catalog,
            headshots,
            teams,
            heatmap_dir: heatmap_dir.into(),
            images: LookupCache::with_capacity(cache_capacity),
            team_infos: LookupCache::with_capacity(cache_capacity),
            heat_maps: LookupCache::with_capacity(cache_capacity),
        }
    }

    /// Wire up the loader from config, choosing the team source by
    /// `teams.source`.
    pub fn from_config(
        config: &Config,
        catalog: Arc<Catalog>,
        ids: Arc<PlayerIdTable>,
    ) -> Result<Self, LookupError> {
        let teams: Arc<dyn TeamSource> = match config.teams.source {
            TeamSourceKind::Dataset => Arc::new(DatasetTeams::new(Arc::clone(&catalog))),
            TeamSourceKind::StatsApi => {
                Arc::new(StatsApiTeams::new(Arc::clone(&ids), &config.teams)?)
            }
        };
        let headshots = HeadshotResolver::from_config(ids, &config.images);
        Ok(Self::new(
            catalog,
            headshots,
            teams,
            &config.images.heatmap_dir,
            config.cache.capacity,
        ))
    }

    /// Resolve all three lookups for the player. They run concurrently and
    /// the result is available only once all three succeed; the first
    /// failure fails the whole load.
    pub async fn load(&self, player_name: &str) -> Result<PlayerData, LookupError> {
        debug!("loading player data for {player_name:?}");

        let image = self
            .images
            .get_or_try_fetch(CacheKey::new(LookupKind::Image, player_name), || async {
                Ok::<_, LookupError>(self.headshots.resolve(player_name))
            });
        let team_info = self
            .team_infos
            .get_or_try_fetch(CacheKey::new(LookupKind::Team, player_name), || {
                self.teams.team_info(player_name)
            });
        let heat_maps = self
            .heat_maps
            .get_or_try_fetch(CacheKey::new(LookupKind::HeatMaps, player_name), || async {
                let rows = self.catalog.records_for(player_name);
                Ok::<_, LookupError>(lookups::heat_map_paths(
                    player_name,
                    &rows,
                    &self.heatmap_dir,
                ))
            });

        let (image, team_info, heat_maps) = tokio::try_join!(image, team_info, heat_maps)
            .inspect_err(|e| warn!("player data for {player_name:?} failed: {e}"))?;

        Ok(PlayerData {
            image,
            team_info,
            heat_maps,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
