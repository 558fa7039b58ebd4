use log::debug;

use super::{compute_handicap, rules_for, seeded_handicap};
use crate::model::{FastMap, Handicap, LeagueConfig, SeasonIndex, Week, WeekId};

/// Handicaps for every relevant golfer and every week of the season, in
/// golfer then week order.
///
/// Each week first gets the prior-only value. While a golfer's count of
/// complete weeks is between 1 and `establish_after`, every complete week so
/// far is overwritten with a value seeded from those weeks, the current one
/// included. After that the prior-only values stand.
#[must_use]
pub fn season_handicaps(index: &SeasonIndex<'_>, config: &LeagueConfig) -> Vec<Handicap> {
    let mut out = Vec::new();
    for golfer in index.relevant_golfers() {
        let rules = rules_for(index, golfer, config);
        let mut values: FastMap<WeekId, f64> = FastMap::default();
        let mut played: Vec<&Week> = Vec::new();

        for week in index.weeks() {
            values.insert(week.id, compute_handicap(index, golfer, week, rules));

            if index.is_complete(golfer, week.id, rules.required_holes) {
                played.push(week);
            }
            if (1..=rules.establish_after).contains(&played.len()) {
                let seeded = seeded_handicap(index, golfer, &played, rules);
                debug!(
                    "golfer {golfer} establishing at week {}: {seeded} over {} weeks",
                    week.number,
                    played.len()
                );
                for w in &played {
                    values.insert(w.id, seeded);
                }
            }
        }

        out.extend(index.weeks().iter().map(|week| Handicap {
            golfer,
            week: week.id,
            value: values.get(&week.id).copied().unwrap_or(0.0),
        }));
    }
    out
}
