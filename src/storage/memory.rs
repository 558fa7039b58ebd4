use std::collections::BTreeMap;

use super::{LeagueImport, LeagueStore, StorageError, WriteBatch, apply_to_snapshot};
use crate::model::SeasonData;

/// Seasons held in memory. Batches are applied to a copy that replaces the
/// stored season only once the whole batch went through.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    seasons: BTreeMap<i32, SeasonData>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_season(data: SeasonData) -> Self {
        let mut store = Self::new();
        store.seasons.insert(data.year(), data);
        store
    }

    #[must_use]
    pub fn season(&self, year: i32) -> Option<&SeasonData> {
        self.seasons.get(&year)
    }

    /// Shell-side access for editing inputs (scores, subs, schedule).
    pub fn season_mut(&mut self, year: i32) -> Option<&mut SeasonData> {
        self.seasons.get_mut(&year)
    }
}

impl LeagueStore for MemoryStore {
    fn load_season(&self, year: i32) -> Result<SeasonData, StorageError> {
        self.seasons
            .get(&year)
            .cloned()
            .ok_or_else(|| StorageError::new(format!("season {year} not found")))
    }

    fn apply(&mut self, batch: &WriteBatch) -> Result<(), StorageError> {
        let current = self
            .seasons
            .get(&batch.season)
            .ok_or_else(|| StorageError::new(format!("season {} not found", batch.season)))?;
        for week in &batch.weeks {
            if current.week(week.week).is_none() {
                return Err(StorageError::new(format!(
                    "week {} is not part of season {}",
                    week.week, batch.season
                )));
            }
        }
        let mut next = current.clone();
        apply_to_snapshot(&mut next, batch);
        self.seasons.insert(batch.season, next);
        Ok(())
    }
}

impl LeagueImport for MemoryStore {
    fn import_season(&mut self, data: &SeasonData) -> Result<(), StorageError> {
        self.seasons.insert(data.year(), data.clone());
        Ok(())
    }
}
