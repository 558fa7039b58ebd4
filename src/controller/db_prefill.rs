use log::info;
use serde::Deserialize;
use serde_json::Value;

use crate::error::LeagueError;
use crate::model::{Golfer, SeasonData};
use crate::storage::LeagueImport;

/// format we have is this:
/// { "golfers": [{"id": <int>, "name": "Firstname Lastname"}, ...]
/// , "seasons": [{ "season": {"year": <int>}, "weeks": [...], "teams": [...], "holes": [...]
///               , "scores": [...], "subs": [...], "matchups": [...], "skin_entries": [...] }]
/// }
/// Golfers listed at the top level are shared by every season that does not
/// list its own.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct LeaguePrefill {
    #[serde(default)]
    pub golfers: Vec<Golfer>,
    pub seasons: Vec<SeasonData>,
}

impl LeaguePrefill {
    /// # Errors
    ///
    /// Will return `Err` if the json does not match the prefill format
    pub fn from_json(json: &Value) -> Result<Self, LeagueError> {
        Ok(serde_json::from_value(json.clone())?)
    }
}

/// Writes every season in the prefill document through `store`; returns how
/// many seasons were imported.
///
/// # Errors
///
/// Will return `Err` if the json is malformed or a season cannot be written
pub fn db_prefill<S: LeagueImport>(json: &Value, store: &mut S) -> Result<usize, LeagueError> {
    let prefill = LeaguePrefill::from_json(json)?;
    for season in &prefill.seasons {
        if season.golfers.is_empty() && !prefill.golfers.is_empty() {
            let mut with_golfers = season.clone();
            with_golfers.golfers.clone_from(&prefill.golfers);
            store.import_season(&with_golfers)?;
        } else {
            store.import_season(season)?;
        }
        info!(
            "prefilled season {}: {} weeks, {} teams, {} scores",
            season.year(),
            season.weeks.len(),
            season.teams.len(),
            season.scores.len()
        );
    }
    Ok(prefill.seasons.len())
}
