use crate::model::{SeasonIndex, Week};

/// Every team is scheduled: at least half as many matchups as teams.
#[must_use]
pub fn is_schedule_complete(index: &SeasonIndex<'_>, week: &Week) -> bool {
    let teams = index.teams().len();
    teams > 0 && index.matchups_for(week.id).len() >= teams / 2
}

/// First week still to be played: not rained out, no scores yet.
#[must_use]
pub fn next_week<'a>(index: &SeasonIndex<'a>) -> Option<&'a Week> {
    index
        .weeks()
        .iter()
        .copied()
        .find(|w| !w.rained_out && index.score_count(w.id) == 0)
}

/// Latest week with any scores posted.
#[must_use]
pub fn last_played_week<'a>(index: &SeasonIndex<'a>) -> Option<&'a Week> {
    index
        .weeks()
        .iter()
        .rev()
        .copied()
        .find(|w| index.score_count(w.id) > 0)
}

#[must_use]
pub fn earliest_incomplete_schedule<'a>(index: &SeasonIndex<'a>) -> Option<&'a Week> {
    index
        .weeks()
        .iter()
        .copied()
        .find(|w| !w.rained_out && !is_schedule_complete(index, w))
}
