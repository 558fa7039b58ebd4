pub mod season;

pub use season::season_handicaps;

use crate::model::{GolferId, HandicapRules, LeagueConfig, SeasonIndex, Week, round_half_even};

/// Members of a team this season get the member rules, everyone else the
/// sub rules.
#[must_use]
pub fn rules_for<'c>(
    index: &SeasonIndex<'_>,
    golfer: GolferId,
    config: &'c LeagueConfig,
) -> &'c HandicapRules {
    if index.is_member(golfer) {
        &config.member_rules
    } else {
        &config.sub_rules
    }
}

/// Strokes over par for one played week.
#[must_use]
pub fn week_delta(index: &SeasonIndex<'_>, golfer: GolferId, week: &Week) -> Option<i32> {
    index
        .weekly_total(golfer, week.id)
        .map(|total| total.sum - index.nine_par(week.is_front))
}

/// Mean of the deltas after the drop rule; `None` when there are none.
#[must_use]
pub fn average_delta(deltas: &[i32], rules: &HandicapRules) -> Option<f64> {
    if deltas.is_empty() {
        return None;
    }
    let mut sorted: Vec<f64> = deltas.iter().map(|d| f64::from(*d)).collect();
    if rules.drops_apply(sorted.len()) {
        sorted.sort_by(f64::total_cmp);
        let end = sorted.len().saturating_sub(rules.drop_worst);
        if rules.drop_best < end {
            return crate::model::mean(&sorted[rules.drop_best..end]);
        }
    }
    crate::model::mean(&sorted)
}

/// Most recent complete weeks strictly before `week`, newest first, at most
/// `max_weeks` of them.
#[must_use]
pub fn qualifying_weeks<'a>(
    index: &SeasonIndex<'a>,
    golfer: GolferId,
    week: &Week,
    rules: &HandicapRules,
) -> Vec<&'a Week> {
    let mut weeks: Vec<&Week> = index
        .weeks_before(week)
        .filter(|w| index.is_complete(golfer, w.id, rules.required_holes))
        .collect();
    weeks.reverse();
    weeks.truncate(rules.max_weeks);
    weeks
}

/// Handicap going into `week`, looking only at earlier weeks. A golfer with
/// no qualifying history gets 0.
#[must_use]
pub fn compute_handicap(
    index: &SeasonIndex<'_>,
    golfer: GolferId,
    week: &Week,
    rules: &HandicapRules,
) -> f64 {
    let deltas: Vec<i32> = qualifying_weeks(index, golfer, week, rules)
        .into_iter()
        .filter_map(|w| week_delta(index, golfer, w))
        .collect();
    match average_delta(&deltas, rules) {
        Some(avg) => round_half_even(avg * rules.adjust_factor, rules.round_precision),
        None => 0.0,
    }
}

/// Establishment value: average over the given played weeks with no drop
/// rule applied.
#[must_use]
pub fn seeded_handicap(
    index: &SeasonIndex<'_>,
    golfer: GolferId,
    played: &[&Week],
    rules: &HandicapRules,
) -> f64 {
    let deltas: Vec<f64> = played
        .iter()
        .rev()
        .take(rules.max_weeks)
        .filter_map(|w| week_delta(index, golfer, w))
        .map(f64::from)
        .collect();
    match crate::model::mean(&deltas) {
        Some(avg) => round_half_even(avg * rules.adjust_factor, rules.round_precision),
        None => 0.0,
    }
}
