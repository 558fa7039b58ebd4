use ::function_name::named;
use log::info;

use super::handicap::season_handicaps;
use super::pairing::{TeamDrawer, generate_pairings};
use super::playoffs::{PlayoffSeed, seed_playoffs};
use super::points::{WeekScoring, score_week};
use super::skins::{SkinWin, skin_winners};
use super::standings::{TeamStanding, standings};
use super::triggers::{LeagueEvent, TriggerDecision, evaluate_trigger};
use crate::error::LeagueError;
use crate::model::{LeagueConfig, ProcessReport, SeasonData, SeasonIndex, Week};
use crate::storage::{LeagueStore, WeekResults, WriteBatch};

/// Runs the league triggers against a store.
///
/// The engine holds the store exclusively for as long as it lives, and every
/// write operation reads one snapshot, computes everything in memory, and
/// hands the store a single batch.
pub struct LeagueEngine<'s, S: LeagueStore> {
    store: &'s mut S,
    config: LeagueConfig,
}

fn find_week(data: &SeasonData, number: i32) -> Result<&Week, LeagueError> {
    data.week_by_number(number)
        .ok_or_else(|| LeagueError::not_found("week", format!("{} of {}", number, data.year())))
}

/// Pairings and, once the week has any scores, points and rounds.
fn week_results(
    index: &SeasonIndex<'_>,
    week: &Week,
    drawer: &mut TeamDrawer,
    report: &mut ProcessReport,
) -> WeekResults {
    let pairings = generate_pairings(index, week, drawer, report);
    let scoring = if index.score_count(week.id) > 0 {
        score_week(index, week, &pairings.golfer_matchups, report)
    } else {
        WeekScoring::default()
    };
    report.weeks_processed.push(week.id);
    report.golfer_matchups_written += pairings.golfer_matchups.len();
    report.rounds_written += scoring.rounds.len();
    WeekResults {
        week: week.id,
        golfer_matchups: pairings.golfer_matchups,
        points: scoring.points,
        rounds: scoring.rounds,
        drawn_teams: pairings.drawn_teams,
    }
}

impl<'s, S: LeagueStore> LeagueEngine<'s, S> {
    pub fn new(store: &'s mut S, config: LeagueConfig) -> Self {
        Self { store, config }
    }

    #[must_use]
    pub fn config(&self) -> &LeagueConfig {
        &self.config
    }

    fn load(&self, season: i32) -> Result<SeasonData, LeagueError> {
        Ok(self.store.load_season(season)?)
    }

    /// Recomputes and stores every handicap of the season.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the season cannot be loaded or the batch cannot be written
    #[named]
    pub fn recompute_handicaps(&mut self, season: i32) -> Result<ProcessReport, LeagueError> {
        let data = self.load(season)?;
        let index = SeasonIndex::new(&data, self.config.default_nine_par);
        let mut batch = WriteBatch::new(season);
        batch.handicaps = season_handicaps(&index, &self.config);

        let report = ProcessReport {
            handicaps_written: batch.handicaps.len(),
            ..ProcessReport::default()
        };
        self.store.apply(&batch)?;
        info!(
            "{}: season {season}, {} handicaps",
            function_name!(),
            report.handicaps_written
        );
        Ok(report)
    }

    /// Rebuilds one week's golfer matchups, points and rounds from the
    /// stored handicaps. A rained-out week is left alone.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the season or week does not exist or the batch cannot be written
    #[named]
    pub fn regenerate_pairings(
        &mut self,
        season: i32,
        week_number: i32,
    ) -> Result<ProcessReport, LeagueError> {
        let data = self.load(season)?;
        let week = find_week(&data, week_number)?;
        if week.rained_out {
            info!(
                "{}: season {season} week {week_number} is rained out, nothing to pair",
                function_name!()
            );
            return Ok(ProcessReport::default());
        }
        let index = SeasonIndex::new(&data, self.config.default_nine_par);
        let mut drawer = TeamDrawer::new(self.config.draw_seed, &data.drawn_teams);
        let mut report = ProcessReport::default();

        let mut batch = WriteBatch::new(season);
        batch
            .weeks
            .push(week_results(&index, week, &mut drawer, &mut report));
        self.store.apply(&batch)?;
        info!(
            "{}: season {season} week {week_number}, {} matchups, {} rounds, {} skipped",
            function_name!(),
            report.golfer_matchups_written,
            report.rounds_written,
            report.skipped.len()
        );
        Ok(report)
    }

    /// Recomputes the season's handicaps, then rebuilds every played week
    /// up to and including `week_number`, oldest first, all in one batch.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the season or week does not exist or the batch cannot be written
    #[named]
    pub fn process_week(
        &mut self,
        season: i32,
        week_number: i32,
    ) -> Result<ProcessReport, LeagueError> {
        let data = self.load(season)?;
        find_week(&data, week_number)?;
        let mut index = SeasonIndex::new(&data, self.config.default_nine_par);
        let handicaps = season_handicaps(&index, &self.config);
        index.set_handicaps(&handicaps);

        let mut drawer = TeamDrawer::new(self.config.draw_seed, &data.drawn_teams);
        let mut report = ProcessReport {
            handicaps_written: handicaps.len(),
            ..ProcessReport::default()
        };
        let mut batch = WriteBatch::new(season);
        let weeks: Vec<&Week> = index
            .weeks()
            .iter()
            .copied()
            .filter(|w| w.number <= week_number && !w.rained_out)
            .collect();
        for week in weeks {
            let results = week_results(&index, week, &mut drawer, &mut report);
            batch.weeks.push(results);
        }
        batch.handicaps = handicaps;

        self.store.apply(&batch)?;
        info!(
            "{}: season {season} through week {week_number}, {} weeks, {} rounds, {} skipped",
            function_name!(),
            report.weeks_processed.len(),
            report.rounds_written,
            report.skipped.len()
        );
        Ok(report)
    }

    /// # Errors
    ///
    /// Will return `Err` if the season cannot be loaded
    pub fn seed_playoffs(
        &self,
        season: i32,
        slots: Option<usize>,
    ) -> Result<Vec<PlayoffSeed>, LeagueError> {
        let data = self.load(season)?;
        let index = SeasonIndex::new(&data, self.config.default_nine_par);
        Ok(seed_playoffs(
            &index,
            &self.config,
            slots.unwrap_or(self.config.playoff_slots),
        ))
    }

    /// # Errors
    ///
    /// Will return `Err` if the season cannot be loaded
    pub fn standings(
        &self,
        season: i32,
        through_week: Option<i32>,
    ) -> Result<Vec<TeamStanding>, LeagueError> {
        let data = self.load(season)?;
        let index = SeasonIndex::new(&data, self.config.default_nine_par);
        Ok(standings(&index, &self.config, through_week))
    }

    /// # Errors
    ///
    /// Will return `Err` if the season or week does not exist
    pub fn skins(&self, season: i32, week_number: i32) -> Result<Vec<SkinWin>, LeagueError> {
        let data = self.load(season)?;
        let week = find_week(&data, week_number)?;
        let index = SeasonIndex::new(&data, self.config.default_nine_par);
        Ok(skin_winners(&index, week))
    }

    /// # Errors
    ///
    /// Will return `Err` if the season or week does not exist
    pub fn check_trigger(
        &self,
        season: i32,
        week_number: i32,
        event: LeagueEvent,
    ) -> Result<TriggerDecision, LeagueError> {
        let data = self.load(season)?;
        let week = find_week(&data, week_number)?;
        let index = SeasonIndex::new(&data, self.config.default_nine_par);
        Ok(evaluate_trigger(&index, week, event))
    }
}
