use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum League {
    Nfl,
    Nba,
    Mlb,
    Wnba,
}

impl League {
    pub const ALL: [League; 4] = [League::Nfl, League::Nba, League::Mlb, League::Wnba];

    pub fn label(self) -> &'static str {
        match self {
            League::Nfl => "NFL",
            League::Nba => "NBA",
            League::Mlb => "MLB",
            League::Wnba => "WNBA",
        }
    }
}

impl fmt::Display for League {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for League {
    type Err = RosterError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        League::ALL
            .into_iter()
            .find(|league| league.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| RosterError::UnknownLeague(trimmed.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub full_name: String,
    pub league: League,
}

#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("failed to read roster {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("roster is missing required column `{0}`")]
    MissingColumn(&'static str),

    #[error("unknown league `{0}`")]
    UnknownLeague(String),
}

/// Case-folded lookup key shared by the roster index and the matcher.
pub fn fold_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Read-only reference table of known athletes.
///
/// Entries are de-duplicated on their case-folded `full_name` at construction;
/// the first occurrence wins, so every lookup resolves to at most one entry.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    entries: Vec<RosterEntry>,
    index: HashMap<String, usize>,
}

impl Roster {
    pub fn from_entries(entries: impl IntoIterator<Item = RosterEntry>) -> Self {
        let mut roster = Roster::default();
        for entry in entries {
            let key = fold_name(&entry.full_name);
            if roster.index.contains_key(&key) {
                continue;
            }
            roster.index.insert(key, roster.entries.len());
            roster.entries.push(entry);
        }
        roster
    }

    pub fn lookup(&self, name: &str) -> Option<&RosterEntry> {
        self.index
            .get(&fold_name(name))
            .and_then(|idx| self.entries.get(*idx))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Columns a roster file must carry. `id` and `api_id` are required but unused.
const REQUIRED_COLUMNS: [&str; 4] = ["id", "full_name", "league", "api_id"];

#[derive(Debug, Deserialize)]
struct RawRosterRow {
    full_name: String,
    league: String,
}

fn load_roster_from_reader<R: Read>(rdr: R, source_name: &str) -> Result<Roster, RosterError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(rdr);
    let headers = reader
        .headers()
        .map_err(|source| RosterError::Csv {
            path: source_name.to_string(),
            source,
        })?
        .clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(RosterError::MissingColumn(column));
        }
    }

    let mut entries = Vec::new();
    for row in reader.deserialize::<RawRosterRow>() {
        let row = row.map_err(|source| RosterError::Csv {
            path: source_name.to_string(),
            source,
        })?;
        entries.push(RosterEntry {
            full_name: row.full_name.trim().to_string(),
            league: row.league.parse()?,
        });
    }
    Ok(Roster::from_entries(entries))
}

/// Load and de-duplicate the roster CSV. Any malformed row fails the whole load.
pub fn load_roster(path: &Path) -> Result<Roster, RosterError> {
    let file = File::open(path).map_err(|source| RosterError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_roster_from_reader(file, &path.display().to_string())
}
