use serde::Serialize;

use crate::model::{SeasonIndex, Week};

/// A change the surrounding application made to a week's inputs.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeagueEvent {
    /// A team matchup was added or edited.
    ScheduleChanged,
    /// A sub record was created or deleted.
    SubChanged,
    ScorePosted,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerAction {
    None,
    RegeneratePairings,
    ProcessWeek,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerDecision {
    pub action: TriggerAction,
    /// Score rows the week needs once every playing golfer has a full nine;
    /// the caller keeps `Week::num_scores` in step with it.
    pub expected_scores: usize,
}

/// `(teams * 2 - no-sub absences) * 9`.
#[must_use]
pub fn expected_scores(index: &SeasonIndex<'_>, week: &Week) -> usize {
    (index.teams().len() * 2).saturating_sub(index.no_sub_count(week.id)) * 9
}

/// What the engine should run after `event` touched `week`.
#[must_use]
pub fn evaluate_trigger(index: &SeasonIndex<'_>, week: &Week, event: LeagueEvent) -> TriggerDecision {
    let expected = expected_scores(index, week);
    let action = match event {
        LeagueEvent::ScheduleChanged => {
            let scheduled = index.matchups_for(week.id).len();
            if scheduled > 0 && scheduled == index.teams().len() / 2 {
                TriggerAction::RegeneratePairings
            } else {
                TriggerAction::None
            }
        }
        LeagueEvent::SubChanged => TriggerAction::RegeneratePairings,
        LeagueEvent::ScorePosted => {
            let count = index.score_count(week.id);
            if count > 0 && count % 9 == 0 && count == expected {
                TriggerAction::ProcessWeek
            } else {
                TriggerAction::None
            }
        }
    };
    TriggerDecision {
        action,
        expected_scores: expected,
    }
}
