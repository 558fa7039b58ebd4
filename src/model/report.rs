use serde::Serialize;
use std::fmt;

use crate::model::types::WeekId;

/// Why an item was left out of a batch. None of these stop the rest of the
/// week or season from being processed.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    MatchupTeamCount,
    TeamGolferCount,
    MissingScore,
    MissingHandicap,
    MissingHoles,
    InvalidSub,
    DoubleAbsence,
    NoDrawCandidates,
    DrawnTeamInMatchup,
    MissingTeamMatchup,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SkipReason::MatchupTeamCount => "matchup does not have two teams",
            SkipReason::TeamGolferCount => "team does not have two golfers",
            SkipReason::MissingScore => "missing score",
            SkipReason::MissingHandicap => "missing handicap",
            SkipReason::MissingHoles => "missing holes for the nine",
            SkipReason::InvalidSub => "sub has neither a golfer nor no_sub",
            SkipReason::DoubleAbsence => "both teams fully absent",
            SkipReason::NoDrawCandidates => "no team to draw a virtual opponent from",
            SkipReason::DrawnTeamInMatchup => "recorded draw names a team in the matchup",
            SkipReason::MissingTeamMatchup => "no matchup for the golfer's team",
        };
        write!(f, "{s}")
    }
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct SkippedItem {
    /// Function that gave up on the item.
    pub stage: &'static str,
    pub week: Option<WeekId>,
    pub detail: String,
    pub reason: SkipReason,
}

#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub struct ProcessReport {
    pub weeks_processed: Vec<WeekId>,
    pub handicaps_written: usize,
    pub golfer_matchups_written: usize,
    pub rounds_written: usize,
    pub skipped: Vec<SkippedItem>,
}

impl ProcessReport {
    /// Records a skip and logs it.
    pub fn skip(
        &mut self,
        stage: &'static str,
        week: Option<WeekId>,
        detail: impl Into<String>,
        reason: SkipReason,
    ) {
        let detail = detail.into();
        log::warn!("{stage}: skipped {detail} ({reason})");
        self.skipped.push(SkippedItem {
            stage,
            week,
            detail,
            reason,
        });
    }

    #[must_use]
    pub fn skipped_for(&self, reason: SkipReason) -> usize {
        self.skipped.iter().filter(|s| s.reason == reason).count()
    }
}
