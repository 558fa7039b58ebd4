use serde::Serialize;

use crate::model::{GolferId, SeasonIndex, Week};

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SkinWin {
    pub golfer: GolferId,
    /// Hole number, 1 to 18.
    pub hole: i32,
    pub score: i32,
}

/// Skins for a week: a hole's skin goes to the entrant who alone posted the
/// lowest gross score on it. Holes nobody scored, or where the low score is
/// shared, carry no winner.
#[must_use]
pub fn skin_winners(index: &SeasonIndex<'_>, week: &Week) -> Vec<SkinWin> {
    let entrants: Vec<GolferId> = index
        .data()
        .skin_entries
        .iter()
        .filter(|e| e.week == week.id)
        .map(|e| e.golfer)
        .collect();
    if entrants.is_empty() {
        return Vec::new();
    }

    let mut wins = Vec::new();
    for hole in index.nine(week.is_front) {
        let scores: Vec<(GolferId, i32)> = entrants
            .iter()
            .filter_map(|g| index.hole_score(*g, week.id, hole.id).map(|s| (*g, s)))
            .collect();
        let Some(best) = scores.iter().map(|(_, s)| *s).min() else {
            continue;
        };
        let mut leaders = scores.iter().filter(|(_, s)| *s == best);
        if let (Some((golfer, score)), None) = (leaders.next(), leaders.next()) {
            wins.push(SkinWin {
                golfer: *golfer,
                hole: hole.number,
                score: *score,
            });
        }
    }
    wins
}
