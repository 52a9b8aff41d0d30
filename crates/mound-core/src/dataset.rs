// Pitch dataset and player-id table loading.
//
// The pitch dataset is a JSON array with one object per (player, pitch type,
// batter side). Numeric columns arrive as numbers or as numeric strings
// depending on the export, so they are parsed leniently. Rows that fail to
// deserialize are skipped with a warning rather than failing the load.

use std::collections::HashMap;
use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{info, warn};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON error in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },
}

// ---------------------------------------------------------------------------
// Hand / side
// ---------------------------------------------------------------------------

/// Right or left. Used both for the pitcher's throwing hand and for the
/// batter's stand side.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Hand {
    #[default]
    #[serde(alias = "r")]
    R,
    #[serde(alias = "l")]
    L,
}

impl Hand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Hand::R => "R",
            Hand::L => "L",
        }
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Pitch type
// ---------------------------------------------------------------------------

/// Statcast pitch type code. Codes outside the known set are kept verbatim
/// in `Other` so they still display and still key heatmap paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
#[allow(clippy::upper_case_acronyms)]
pub enum PitchType {
    FF,
    SL,
    CH,
    CU,
    SI,
    FC,
    KC,
    FS,
    KN,
    EP,
    SC,
    ST,
    Other(String),
}

impl PitchType {
    /// The raw code as it appears in the dataset and in heatmap file names.
    pub fn code(&self) -> &str {
        match self {
            PitchType::FF => "FF",
            PitchType::SL => "SL",
            PitchType::CH => "CH",
            PitchType::CU => "CU",
            PitchType::SI => "SI",
            PitchType::FC => "FC",
            PitchType::KC => "KC",
            PitchType::FS => "FS",
            PitchType::KN => "KN",
            PitchType::EP => "EP",
            PitchType::SC => "SC",
            PitchType::ST => "ST",
            PitchType::Other(code) => code,
        }
    }

    /// Human-readable pitch name, falling back to the raw code.
    pub fn display_name(&self) -> &str {
        match self {
            PitchType::FF => "Four-Seam Fastball",
            PitchType::SL => "Slider",
            PitchType::CH => "Changeup",
            PitchType::CU => "Curveball",
            PitchType::SI => "Sinker",
            PitchType::FC => "Cutter",
            PitchType::KC => "Knuckle Curve",
            PitchType::FS => "Splitter",
            PitchType::KN => "Knuckleball",
            PitchType::EP => "Eephus",
            PitchType::SC => "Screwball",
            PitchType::ST => "Sweeper",
            PitchType::Other(code) => code,
        }
    }
}

impl From<String> for PitchType {
    fn from(code: String) -> Self {
        match code.trim() {
            "FF" => PitchType::FF,
            "SL" => PitchType::SL,
            "CH" => PitchType::CH,
            "CU" => PitchType::CU,
            "SI" => PitchType::SI,
            "FC" => PitchType::FC,
            "KC" => PitchType::KC,
            "FS" => PitchType::FS,
            "KN" => PitchType::KN,
            "EP" => PitchType::EP,
            "SC" => PitchType::SC,
            "ST" => PitchType::ST,
            other => PitchType::Other(other.to_string()),
        }
    }
}

impl From<&str> for PitchType {
    fn from(code: &str) -> Self {
        PitchType::from(code.to_string())
    }
}

impl From<PitchType> for String {
    fn from(pitch: PitchType) -> Self {
        pitch.code().to_string()
    }
}

impl fmt::Display for PitchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ---------------------------------------------------------------------------
// Pitch record
// ---------------------------------------------------------------------------

/// One row of the dataset: a pitcher's metrics for one pitch type against
/// one batter side. Identified by (player name, pitch type, stand side).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitchRecord {
    pub player_name: String,
    #[serde(default, deserialize_with = "display_string")]
    pub team_name: String,
    #[serde(default, deserialize_with = "display_string")]
    pub team_logo: String,
    pub stand_side: Hand,
    pub pitch_type: PitchType,
    #[serde(default, deserialize_with = "display_string")]
    pub velocity_range: String,
    #[serde(default, deserialize_with = "display_string")]
    pub usage_rate: String,
    #[serde(default, deserialize_with = "display_string")]
    pub zone_rate: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub avg_spin_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub avg_horz_break: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub avg_induced_vert_break: Option<f64>,
    #[serde(default, deserialize_with = "lenient_hand")]
    pub throws: Option<Hand>,
    /// `None` when absent or not parseable as a finite number.
    #[serde(default, deserialize_with = "lenient_number")]
    pub arm_angle: Option<f64>,
}

/// Parse a JSON value as a finite number. Numeric strings are accepted;
/// anything else (including "NaN") yields `None`.
pub fn parse_number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

fn display_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(parse_number))
}

fn lenient_hand<'de, D>(deserializer: D) -> Result<Option<Hand>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => match s.trim() {
            "R" | "r" => Some(Hand::R),
            "L" | "l" => Some(Hand::L),
            _ => None,
        },
        _ => None,
    })
}

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

/// The full, immutable set of pitch records in file order.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<PitchRecord>,
}

impl Dataset {
    pub fn new(records: Vec<PitchRecord>) -> Self {
        Dataset { records }
    }

    /// Load the dataset from a JSON file.
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let file = std::fs::File::open(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset =
            Self::from_reader(std::io::BufReader::new(file)).map_err(|source| DatasetError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        info!("Loaded {} pitch records from {}", dataset.len(), path.display());
        Ok(dataset)
    }

    /// Parse a JSON array of pitch rows. Only a non-array document is an
    /// error; individual bad rows are skipped.
    pub fn from_reader<R: Read>(rdr: R) -> Result<Self, serde_json::Error> {
        let rows: Vec<Value> = serde_json::from_reader(rdr)?;
        let mut records = Vec::with_capacity(rows.len());
        for (index, row) in rows.into_iter().enumerate() {
            match serde_json::from_value::<PitchRecord>(row) {
                Ok(record) if record.player_name.trim().is_empty() => {
                    warn!("skipping pitch row {index}: empty player_name");
                }
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!("skipping malformed pitch row {index}: {e}");
                }
            }
        }
        Ok(Dataset { records })
    }

    pub fn records(&self) -> &[PitchRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Player-id table
// ---------------------------------------------------------------------------

/// A (player name, MLBAM id) pair from the id lookup file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlayerIdEntry {
    pub player_name: String,
    /// `None` (or zero in the source) means the player has no usable id.
    #[serde(default, deserialize_with = "lenient_id")]
    pub player_id: Option<u64>,
}

/// CSV rows carry everything as text; ids are parsed after the fact.
#[derive(Debug, Deserialize)]
struct RawIdRow {
    player_name: String,
    #[serde(default)]
    player_id: String,
}

fn parse_id(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok().filter(|id| *id != 0)
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_u64().filter(|id| *id != 0),
        Some(Value::String(s)) => parse_id(&s),
        _ => None,
    })
}

/// Case-insensitive exact-match lookup from player name to id.
///
/// When a name occurs more than once the first row wins, even if that row
/// has no id.
#[derive(Debug, Clone, Default)]
pub struct PlayerIdTable {
    by_name: HashMap<String, Option<u64>>,
}

impl PlayerIdTable {
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = PlayerIdEntry>,
    {
        let mut by_name = HashMap::new();
        for entry in entries {
            by_name
                .entry(entry.player_name.to_lowercase())
                .or_insert(entry.player_id);
        }
        PlayerIdTable { by_name }
    }

    /// Load from a `.csv` file (header `player_name,player_id`) or, for any
    /// other extension, a JSON array of objects.
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let file = std::fs::File::open(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = std::io::BufReader::new(file);
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

        let table = if is_csv {
            Self::from_csv_reader(reader).map_err(|source| DatasetError::Csv {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            Self::from_json_reader(reader).map_err(|source| DatasetError::Json {
                path: path.to_path_buf(),
                source,
            })?
        };
        info!("Loaded {} player ids from {}", table.len(), path.display());
        Ok(table)
    }

    pub fn from_json_reader<R: Read>(rdr: R) -> Result<Self, serde_json::Error> {
        let rows: Vec<Value> = serde_json::from_reader(rdr)?;
        let entries = rows
            .into_iter()
            .enumerate()
            .filter_map(|(index, row)| match serde_json::from_value::<PlayerIdEntry>(row) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("skipping malformed player id row {index}: {e}");
                    None
                }
            });
        Ok(Self::from_entries(entries))
    }

    pub fn from_csv_reader<R: Read>(rdr: R) -> Result<Self, csv::Error> {
        let mut reader = csv::Reader::from_reader(rdr);
        let mut entries = Vec::new();
        for result in reader.deserialize::<RawIdRow>() {
            match result {
                Ok(raw) => entries.push(PlayerIdEntry {
                    player_name: raw.player_name.trim().to_string(),
                    player_id: parse_id(&raw.player_id),
                }),
                Err(e) => {
                    warn!("skipping malformed player id row: {}", e);
                }
            }
        }
        Ok(Self::from_entries(entries))
    }

    pub fn lookup(&self, player_name: &str) -> Option<u64> {
        self.by_name
            .get(&player_name.to_lowercase())
            .copied()
            .flatten()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {
            "player_name": "Smith, John",
            "team_name": "Boston Red Sox",
            "team_logo": "/logos/bos.svg",
            "stand_side": "R",
            "pitch_type": "FF",
            "velocity_range": "94-97",
            "usage_rate": "45.2%",
            "zone_rate": 52.1,
            "avg_spin_rate": 2345,
            "avg_horz_break": -7.44,
            "avg_induced_vert_break": "16.1",
            "throws": "R",
            "arm_angle": "41.3"
        },
        {
            "player_name": "Smith, John",
            "stand_side": "L",
            "pitch_type": "SV",
            "arm_angle": "bad"
        }
    ]"#;

    #[test]
    fn parses_mixed_numeric_and_string_columns() {
        let dataset = Dataset::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 2);

        let first = &dataset.records()[0];
        assert_eq!(first.stand_side, Hand::R);
        assert_eq!(first.pitch_type, PitchType::FF);
        assert_eq!(first.zone_rate, "52.1");
        assert_eq!(first.avg_spin_rate, Some(2345.0));
        assert_eq!(first.avg_induced_vert_break, Some(16.1));
        assert_eq!(first.arm_angle, Some(41.3));
        assert_eq!(first.throws, Some(Hand::R));
    }

    #[test]
    fn missing_and_unparseable_fields_become_none_or_empty() {
        let dataset = Dataset::from_reader(SAMPLE.as_bytes()).unwrap();
        let second = &dataset.records()[1];
        assert_eq!(second.team_name, "");
        assert_eq!(second.velocity_range, "");
        assert_eq!(second.avg_spin_rate, None);
        assert_eq!(second.throws, None);
        assert_eq!(second.arm_angle, None);
        assert_eq!(second.pitch_type, PitchType::Other("SV".to_string()));
    }

    #[test]
    fn malformed_rows_are_skipped() {
        let json = r#"[
            {"player_name": "A", "stand_side": "R", "pitch_type": "FF"},
            {"player_name": "B", "stand_side": "X", "pitch_type": "FF"},
            {"stand_side": "R", "pitch_type": "FF"},
            {"player_name": "  ", "stand_side": "R", "pitch_type": "FF"}
        ]"#;
        let dataset = Dataset::from_reader(json.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records()[0].player_name, "A");
    }

    #[test]
    fn non_array_document_is_an_error() {
        assert!(Dataset::from_reader(r#"{"player_name": "A"}"#.as_bytes()).is_err());
    }

    #[test]
    fn parse_number_rejects_non_finite_and_text() {
        assert_eq!(parse_number(&Value::from(92)), Some(92.0));
        assert_eq!(parse_number(&Value::from(" 94.5 ")), Some(94.5));
        assert_eq!(parse_number(&Value::from("bad")), None);
        assert_eq!(parse_number(&Value::from("NaN")), None);
        assert_eq!(parse_number(&Value::Null), None);
    }

    #[test]
    fn pitch_type_display_names() {
        assert_eq!(PitchType::FF.display_name(), "Four-Seam Fastball");
        assert_eq!(PitchType::ST.display_name(), "Sweeper");
        assert_eq!(PitchType::from("KC").display_name(), "Knuckle Curve");
        assert_eq!(PitchType::from("FO").display_name(), "FO");
        assert_eq!(PitchType::from("FO").code(), "FO");
    }

    #[test]
    fn id_lookup_is_case_insensitive_exact_match() {
        let json = r#"[
            {"player_name": "Shohei Ohtani", "player_id": 660271},
            {"player_name": "Smith, John", "player_id": "123456"},
            {"player_name": "No Id", "player_id": null}
        ]"#;
        let table = PlayerIdTable::from_json_reader(json.as_bytes()).unwrap();
        assert_eq!(table.lookup("shohei ohtani"), Some(660271));
        assert_eq!(table.lookup("SMITH, JOHN"), Some(123456));
        assert_eq!(table.lookup("Shohei"), None);
        assert_eq!(table.lookup("No Id"), None);
    }

    #[test]
    fn id_table_first_row_wins() {
        let table = PlayerIdTable::from_entries(vec![
            PlayerIdEntry {
                player_name: "Dup".into(),
                player_id: Some(1),
            },
            PlayerIdEntry {
                player_name: "dup".into(),
                player_id: Some(2),
            },
        ]);
        assert_eq!(table.lookup("DUP"), Some(1));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn id_table_from_csv() {
        let csv = "player_name,player_id\nShohei Ohtani,660271\nZero Id,0\nBlank Id,\n";
        let table = PlayerIdTable::from_csv_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.lookup("Shohei Ohtani"), Some(660271));
        assert_eq!(table.lookup("Zero Id"), None);
        assert_eq!(table.lookup("Blank Id"), None);
    }
}
