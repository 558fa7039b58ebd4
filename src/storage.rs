pub mod memory;
pub mod sqlite;

use std::error::Error;
use std::fmt;

use crate::model::{DrawnTeam, GolferMatchup, Handicap, Points, Round, SeasonData, WeekId};

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

#[derive(Debug, Clone)]
pub struct StorageError {
    message: String,
}

impl StorageError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for StorageError {}

impl From<String> for StorageError {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for StorageError {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::new(format!("sqlite: {value}"))
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::new(format!("json: {value}"))
    }
}

/// Regenerated engine output for one week. Applying it replaces whatever
/// golfer matchups, points and rounds the week had before.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeekResults {
    pub week: WeekId,
    pub golfer_matchups: Vec<GolferMatchup>,
    pub points: Vec<Points>,
    pub rounds: Vec<Round>,
    /// Draws made while building this week; stored only if none exists yet.
    pub drawn_teams: Vec<DrawnTeam>,
}

/// Everything one trigger writes. Stores apply a batch all-or-nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteBatch {
    pub season: i32,
    pub handicaps: Vec<Handicap>,
    pub weeks: Vec<WeekResults>,
}

impl WriteBatch {
    #[must_use]
    pub fn new(season: i32) -> Self {
        Self {
            season,
            ..Self::default()
        }
    }
}

/// The engine's view of the data store: read a season, write a batch.
pub trait LeagueStore {
    /// # Errors
    ///
    /// Will return `Err` if the season does not exist or cannot be read
    fn load_season(&self, year: i32) -> Result<SeasonData, StorageError>;

    /// Handicaps are upserted by golfer and week, each week in the batch has
    /// its golfer matchups, points and rounds replaced, and drawn teams are
    /// inserted only where the week has none for that absent team.
    ///
    /// # Errors
    ///
    /// Will return `Err` if any write fails; nothing from the batch is kept
    fn apply(&mut self, batch: &WriteBatch) -> Result<(), StorageError>;
}

/// Writer for the shell-owned records (golfers, schedule, scores, subs).
pub trait LeagueImport {
    /// # Errors
    ///
    /// Will return `Err` if the season cannot be written
    fn import_season(&mut self, data: &SeasonData) -> Result<(), StorageError>;
}

/// Applies a batch to an in-memory snapshot with the same semantics every
/// store must honor.
pub fn apply_to_snapshot(data: &mut SeasonData, batch: &WriteBatch) {
    for handicap in &batch.handicaps {
        match data
            .handicaps
            .iter_mut()
            .find(|h| h.golfer == handicap.golfer && h.week == handicap.week)
        {
            Some(existing) => existing.value = handicap.value,
            None => data.handicaps.push(handicap.clone()),
        }
    }

    for week in &batch.weeks {
        data.golfer_matchups.retain(|gm| gm.week != week.week);
        data.points.retain(|p| p.week != week.week);
        data.rounds.retain(|r| r.week != week.week);
        data.golfer_matchups.extend(week.golfer_matchups.iter().cloned());
        data.points.extend(week.points.iter().cloned());
        data.rounds.extend(week.rounds.iter().cloned());
        for drawn in &week.drawn_teams {
            let exists = data
                .drawn_teams
                .iter()
                .any(|d| d.week == drawn.week && d.absent_team == drawn.absent_team);
            if !exists {
                data.drawn_teams.push(drawn.clone());
            }
        }
    }
}
