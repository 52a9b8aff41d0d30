// Configuration loading and parsing (config/report.toml).

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use crate::catalog::{DEFAULT_LOAD_MORE_INCREMENT, DEFAULT_PAGE_SIZE};

/// Name of the single config file under `config/` (and `defaults/`).
pub const CONFIG_FILE: &str = "report.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory relative paths in the config are resolved against.
    pub base_dir: PathBuf,
    pub dataset: DatasetConfig,
    pub display: DisplayConfig,
    pub images: ImagesConfig,
    pub teams: TeamsConfig,
    pub cache: CacheConfig,
}

impl Config {
    pub fn pitches_path(&self) -> PathBuf {
        self.base_dir.join(&self.dataset.pitches)
    }

    pub fn player_ids_path(&self) -> PathBuf {
        self.base_dir.join(&self.dataset.player_ids)
    }
}

// ---------------------------------------------------------------------------
// report.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the whole report.toml file.
#[derive(Debug, Clone, Deserialize)]
struct ReportFile {
    dataset: DatasetConfig,
    #[serde(default)]
    display: DisplayConfig,
    #[serde(default)]
    images: ImagesConfig,
    #[serde(default)]
    teams: TeamsConfig,
    #[serde(default)]
    cache: CacheConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatasetConfig {
    pub pitches: String,
    pub player_ids: String,
    /// Snapshot date of the dataset, `YYYY-MM-DD`.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub page_size: usize,
    pub load_more_increment: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            page_size: DEFAULT_PAGE_SIZE,
            load_more_increment: DEFAULT_LOAD_MORE_INCREMENT,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImagesConfig {
    /// Headshot URL template; `{id}` is replaced with the player id.
    pub headshot_url: String,
    pub default_headshot: String,
    pub heatmap_dir: String,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        ImagesConfig {
            headshot_url: "https://img.mlbstatic.com/mlb-photos/image/upload/w_180,q_100/v1/people/{id}/headshot/67/current.jpg".into(),
            default_headshot: "/default_player.png".into(),
            heatmap_dir: "/heatmaps".into(),
        }
    }
}

/// Where team name and logo come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamSourceKind {
    /// Team fields embedded in the player's own pitch rows.
    Dataset,
    /// Current team from the MLB Stats API, keyed by player id.
    StatsApi,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TeamsConfig {
    pub source: TeamSourceKind,
    pub stats_api_base: String,
    /// Logo URL template; `{id}` is replaced with the team id.
    pub logo_url: String,
    pub request_timeout_secs: u64,
}

impl Default for TeamsConfig {
    fn default() -> Self {
        TeamsConfig {
            source: TeamSourceKind::Dataset,
            stats_api_base: "https://statsapi.mlb.com/api/v1".into(),
            logo_url: "https://www.mlbstatic.com/team-logos/{id}.svg".into(),
            request_timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Entries kept per lookup kind; 0 means unbounded.
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig { capacity: 512 }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/report.toml` relative to `base_dir`.
///
/// Does not copy defaults; prefer `load_config()` which does.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    let file: ReportFile = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    let config = Config {
        base_dir: base_dir.to_path_buf(),
        dataset: file.dataset,
        display: file.display,
        images: file.images,
        teams: file.teams,
        cache: file.cache,
    };

    validate(&config)?;

    Ok(config)
}

/// Ensure all config files exist by copying missing ones from `defaults/`.
/// Returns the list of files that were copied. Skips `.example` files and
/// never overwrites an existing file.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the project root or ensure defaults/ is present",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    let mut copied = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };
        if file_name.to_str().is_some_and(|n| n.ends_with(".example")) {
            continue;
        }
        let target = config_dir.join(file_name);

        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
        {
            Ok(mut dest) => {
                let content = std::fs::read(&path).map_err(|e| ConfigError::DefaultsCopyError {
                    message: format!("failed to read {}: {e}", path.display()),
                })?;
                std::io::Write::write_all(&mut dest, &content).map_err(|e| {
                    ConfigError::DefaultsCopyError {
                        message: format!("failed to write {}: {e}", target.display()),
                    }
                })?;
                copied.push(target);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {}
            Err(e) => {
                return Err(ConfigError::DefaultsCopyError {
                    message: format!("failed to create {}: {e}", target.display()),
                });
            }
        }
    }

    Ok(copied)
}

/// Convenience wrapper: loads config relative to the current working
/// directory, copying defaults first.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        field: field.into(),
        message: message.into(),
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let paths: &[(&str, &str)] = &[
        ("dataset.pitches", config.dataset.pitches.as_str()),
        ("dataset.player_ids", config.dataset.player_ids.as_str()),
    ];
    for (name, val) in paths {
        if val.trim().is_empty() {
            return Err(invalid(name, "must not be empty"));
        }
    }

    let counts: &[(&str, usize)] = &[
        ("display.page_size", config.display.page_size),
        ("display.load_more_increment", config.display.load_more_increment),
    ];
    for (name, val) in counts {
        if *val == 0 {
            return Err(invalid(name, "must be > 0"));
        }
    }

    if config.teams.request_timeout_secs == 0 {
        return Err(invalid("teams.request_timeout_secs", "must be > 0"));
    }

    let templates: &[(&str, &str)] = &[
        ("images.headshot_url", config.images.headshot_url.as_str()),
        ("teams.logo_url", config.teams.logo_url.as_str()),
    ];
    for (name, val) in templates {
        if !val.contains("{id}") {
            return Err(invalid(
                name,
                format!("must contain an {{id}} placeholder, got {val:?}"),
            ));
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// The workspace root, where `defaults/` lives.
    fn project_root() -> PathBuf {
        let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
        assert!(
            root.join("defaults").join(CONFIG_FILE).exists(),
            "Cannot locate defaults/{CONFIG_FILE} from {root:?}"
        );
        root
    }

    fn default_text() -> String {
        fs::read_to_string(project_root().join("defaults").join(CONFIG_FILE)).unwrap()
    }

    /// Fresh temp dir containing `config/report.toml` with the given text.
    fn temp_with_config(name: &str, text: &str) -> PathBuf {
        let tmp = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();
        fs::write(tmp.join("config").join(CONFIG_FILE), text).unwrap();
        tmp
    }

    #[test]
    fn load_default_config() {
        let tmp = temp_with_config("mound_config_defaults", &default_text());
        let config = load_config_from(&tmp).expect("should load default config");

        assert_eq!(config.dataset.pitches, "data/pitchers.json");
        assert_eq!(config.dataset.player_ids, "data/pitcher_ids.json");
        assert_eq!(
            config.dataset.as_of,
            Some(NaiveDate::from_ymd_opt(2025, 8, 23).unwrap())
        );
        assert_eq!(config.display.page_size, 50);
        assert_eq!(config.display.load_more_increment, 50);
        assert_eq!(config.images.default_headshot, "/default_player.png");
        assert_eq!(config.images.heatmap_dir, "/heatmaps");
        assert_eq!(config.teams.source, TeamSourceKind::Dataset);
        assert_eq!(config.teams.request_timeout_secs, 10);
        assert_eq!(config.cache.capacity, 512);
        assert_eq!(config.pitches_path(), tmp.join("data/pitchers.json"));

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn optional_sections_fall_back_to_defaults() {
        let text = r#"
[dataset]
pitches = "p.json"
player_ids = "ids.csv"
"#;
        let tmp = temp_with_config("mound_config_minimal", text);
        let config = load_config_from(&tmp).expect("should load minimal config");
        assert!(config.dataset.as_of.is_none());
        assert_eq!(config.display.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.teams.source, TeamSourceKind::Dataset);
        assert!(config.images.headshot_url.contains("{id}"));
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn stats_api_source_parses() {
        let text = default_text().replace("source = \"dataset\"", "source = \"stats_api\"");
        let tmp = temp_with_config("mound_config_stats_api", &text);
        let config = load_config_from(&tmp).unwrap();
        assert_eq!(config.teams.source, TeamSourceKind::StatsApi);
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_zero_page_size() {
        let text = default_text().replace("page_size = 50", "page_size = 0");
        let tmp = temp_with_config("mound_config_zero_page", &text);
        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "display.page_size");
            }
            other => panic!("expected ValidationError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_headshot_template_without_placeholder() {
        let text = default_text().replace("people/{id}/headshot", "people/headshot");
        let tmp = temp_with_config("mound_config_bad_template", &text);
        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "images.headshot_url");
            }
            other => panic!("expected ValidationError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_zero_timeout() {
        let text = default_text().replace("request_timeout_secs = 10", "request_timeout_secs = 0");
        let tmp = temp_with_config("mound_config_zero_timeout", &text);
        let err = load_config_from(&tmp).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ValidationError { ref field, .. } if field == "teams.request_timeout_secs"
        ));
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn file_not_found_for_missing_config() {
        let tmp = std::env::temp_dir().join("mound_config_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::FileNotFound { path } => {
                assert!(path.ends_with(CONFIG_FILE));
            }
            other => panic!("expected FileNotFound, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn parse_error_for_invalid_toml() {
        let tmp = temp_with_config("mound_config_invalid", "this is not valid [[[ toml");
        let err = load_config_from(&tmp).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn parse_error_for_bad_team_source() {
        let text = default_text().replace("source = \"dataset\"", "source = \"espn\"");
        let tmp = temp_with_config("mound_config_bad_source", &text);
        let err = load_config_from(&tmp).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_copies_missing_files() {
        let tmp = std::env::temp_dir().join("mound_config_ensure_copies");
        let _ = fs::remove_dir_all(&tmp);
        let defaults_dir = tmp.join("defaults");
        fs::create_dir_all(&defaults_dir).unwrap();
        fs::write(defaults_dir.join(CONFIG_FILE), default_text()).unwrap();
        fs::write(defaults_dir.join("report.toml.example"), "# example\n").unwrap();

        let copied = ensure_config_files(&tmp).expect("should succeed");
        assert_eq!(copied.len(), 1);
        assert!(tmp.join("config").join(CONFIG_FILE).exists());
        assert!(!tmp.join("config/report.toml.example").exists());

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_skips_existing() {
        let tmp = temp_with_config("mound_config_ensure_skips", "# custom\n");
        let defaults_dir = tmp.join("defaults");
        fs::create_dir_all(&defaults_dir).unwrap();
        fs::write(defaults_dir.join(CONFIG_FILE), default_text()).unwrap();

        let copied = ensure_config_files(&tmp).expect("should succeed");
        assert!(copied.is_empty());
        let content = fs::read_to_string(tmp.join("config").join(CONFIG_FILE)).unwrap();
        assert_eq!(content, "# custom\n");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_errors_when_both_dirs_missing() {
        let tmp = std::env::temp_dir().join("mound_config_both_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        let err = ensure_config_files(&tmp).unwrap_err();
        match &err {
            ConfigError::DefaultsCopyError { message } => {
                assert!(message.contains("neither defaults/ nor config/"));
            }
            other => panic!("expected DefaultsCopyError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }
}
