pub mod round;
pub mod strokes;

pub use round::build_round;
pub use strokes::{Receiver, StrokeAllocation, stroke_allocation};

use ::function_name::named;
use log::debug;
use serde::Serialize;

use crate::model::{
    FastMap, GolferId, GolferMatchup, HoleId, Points, ProcessReport, Round, SeasonIndex,
    SkipReason, Week, WeekId, conventional_round,
};

/// Which rule decided the three round points.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    /// Opponent is a drawn stand-in: the real golfer takes the points.
    Virtual,
    BothSubbing,
    GolferSubbing,
    OpponentSubbing,
    Net,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct HoleResult {
    pub hole: HoleId,
    pub number: i32,
    pub golfer_gross: i32,
    pub opponent_gross: i32,
    pub golfer_net: i32,
    pub opponent_net: i32,
    pub golfer_points: f64,
    pub opponent_points: f64,
}

/// Both sides of one golfer matchup, scored.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MatchupScore {
    pub golfer: GolferId,
    pub opponent: GolferId,
    pub golfer_handicap: i32,
    pub opponent_handicap: i32,
    pub golfer_gross: i32,
    pub opponent_gross: i32,
    pub golfer_net: i32,
    pub opponent_net: i32,
    pub holes: Vec<HoleResult>,
    pub hole_points: f64,
    pub opponent_hole_points: f64,
    pub round_points: f64,
    pub opponent_round_points: f64,
    pub outcome: RoundOutcome,
}

impl MatchupScore {
    #[must_use]
    pub fn golfer_points(&self) -> f64 {
        self.hole_points + self.round_points
    }

    #[must_use]
    pub fn opponent_points(&self) -> f64 {
        self.opponent_hole_points + self.opponent_round_points
    }
}

fn award_round_points(
    gm: &GolferMatchup,
    opponent_teammate_subbing: bool,
    net: i32,
    opponent_net: i32,
) -> (f64, f64, RoundOutcome) {
    if gm.opponent_team_no_subs {
        (3.0, 0.0, RoundOutcome::Virtual)
    } else if gm.is_teammate_subbing && opponent_teammate_subbing {
        (0.0, 0.0, RoundOutcome::BothSubbing)
    } else if gm.is_teammate_subbing {
        (0.0, 3.0, RoundOutcome::GolferSubbing)
    } else if opponent_teammate_subbing {
        (3.0, 0.0, RoundOutcome::OpponentSubbing)
    } else {
        let (mine, theirs) = match net.cmp(&opponent_net) {
            std::cmp::Ordering::Less => (3.0, 0.0),
            std::cmp::Ordering::Equal => (1.5, 1.5),
            std::cmp::Ordering::Greater => (0.0, 3.0),
        };
        (mine, theirs, RoundOutcome::Net)
    }
}

/// Scores one golfer matchup from its golfer's point of view.
///
/// `opponent_teammate_subbing` is whether the opponent's own matchup marks
/// them as covering for an absent teammate.
///
/// # Errors
///
/// Will return `Err` if the week's nine has no holes, or either side is
/// missing a hole score or a handicap
pub fn score_matchup(
    index: &SeasonIndex<'_>,
    week: &Week,
    gm: &GolferMatchup,
    opponent_teammate_subbing: bool,
) -> Result<MatchupScore, SkipReason> {
    let holes = index.nine(week.is_front);
    if holes.is_empty() {
        return Err(SkipReason::MissingHoles);
    }
    let mut scores = Vec::with_capacity(holes.len());
    for hole in holes {
        let mine = index.hole_score(gm.golfer, week.id, hole.id);
        let theirs = index.hole_score(gm.opponent, week.id, hole.id);
        match (mine, theirs) {
            (Some(mine), Some(theirs)) => scores.push((*hole, mine, theirs)),
            _ => return Err(SkipReason::MissingScore),
        }
    }
    let golfer_hcp = index
        .handicap(gm.golfer, week.id)
        .ok_or(SkipReason::MissingHandicap)?;
    let opponent_hcp = index
        .handicap(gm.opponent, week.id)
        .ok_or(SkipReason::MissingHandicap)?;
    let golfer_handicap = conventional_round(golfer_hcp);
    let opponent_handicap = conventional_round(opponent_hcp);
    let alloc = stroke_allocation(golfer_handicap, opponent_handicap);

    let mut holes_out = Vec::with_capacity(scores.len());
    let (mut hole_points, mut opponent_hole_points) = (0.0, 0.0);
    for (hole, golfer_gross, opponent_gross) in scores {
        let golfer_net = golfer_gross - alloc.strokes_for(Receiver::Golfer, hole.handicap9);
        let opponent_net = opponent_gross - alloc.strokes_for(Receiver::Opponent, hole.handicap9);
        let (mine, theirs) = match golfer_net.cmp(&opponent_net) {
            std::cmp::Ordering::Less => (1.0, 0.0),
            std::cmp::Ordering::Greater => (0.0, 1.0),
            // a stand-in cannot take half points back
            std::cmp::Ordering::Equal if gm.opponent_team_no_subs => (0.5, 0.0),
            std::cmp::Ordering::Equal => (0.5, 0.5),
        };
        hole_points += mine;
        opponent_hole_points += theirs;
        holes_out.push(HoleResult {
            hole: hole.id,
            number: hole.number,
            golfer_gross,
            opponent_gross,
            golfer_net,
            opponent_net,
            golfer_points: mine,
            opponent_points: theirs,
        });
    }

    let golfer_gross: i32 = holes_out.iter().map(|h| h.golfer_gross).sum();
    let opponent_gross: i32 = holes_out.iter().map(|h| h.opponent_gross).sum();
    let golfer_net = golfer_gross - golfer_handicap;
    let opponent_net = opponent_gross - opponent_handicap;
    let (round_points, opponent_round_points, outcome) =
        award_round_points(gm, opponent_teammate_subbing, golfer_net, opponent_net);

    Ok(MatchupScore {
        golfer: gm.golfer,
        opponent: gm.opponent,
        golfer_handicap,
        opponent_handicap,
        golfer_gross,
        opponent_gross,
        golfer_net,
        opponent_net,
        holes: holes_out,
        hole_points,
        opponent_hole_points,
        round_points,
        opponent_round_points,
        outcome,
    })
}

/// Whether the opponent's mirror matchup (same flight, roles swapped) marks
/// them as covering for a teammate.
#[must_use]
pub fn opponent_teammate_subbing(all: &[GolferMatchup], gm: &GolferMatchup) -> bool {
    all.iter().any(|other| {
        other.week == gm.week
            && other.is_a == gm.is_a
            && other.golfer == gm.opponent
            && other.opponent == gm.golfer
            && other.is_teammate_subbing
    })
}

/// Points rows keyed by golfer, week, hole and opponent. A later row for the
/// same key replaces the earlier one in place.
#[derive(Debug, Default)]
struct PointsTable {
    rows: Vec<Points>,
    position: FastMap<(GolferId, WeekId, HoleId, GolferId), usize>,
}

impl PointsTable {
    fn upsert(&mut self, row: Points) {
        let key = (row.golfer, row.week, row.hole, row.opponent);
        match self.position.get(&key) {
            Some(&at) => self.rows[at] = row,
            None => {
                self.position.insert(key, self.rows.len());
                self.rows.push(row);
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeekScoring {
    pub points: Vec<Points>,
    pub rounds: Vec<Round>,
}

/// Scores every golfer matchup of a week into points rows and rounds.
///
/// Each matchup yields a round for its own golfer. Points rows are written
/// for both sides, except that a stand-in opponent gets none.
#[named]
pub fn score_week(
    index: &SeasonIndex<'_>,
    week: &Week,
    golfer_matchups: &[GolferMatchup],
    report: &mut ProcessReport,
) -> WeekScoring {
    let mut table = PointsTable::default();
    let mut rounds = Vec::with_capacity(golfer_matchups.len());

    for gm in golfer_matchups {
        let describe = || {
            format!(
                "golfer {} vs {} ({} flight)",
                gm.golfer,
                gm.opponent,
                gm.flight()
            )
        };
        let score = match score_matchup(
            index,
            week,
            gm,
            opponent_teammate_subbing(golfer_matchups, gm),
        ) {
            Ok(score) => score,
            Err(reason) => {
                report.skip(function_name!(), Some(week.id), describe(), reason);
                continue;
            }
        };

        for hole in &score.holes {
            table.upsert(Points {
                golfer: gm.golfer,
                week: week.id,
                hole: hole.hole,
                opponent: gm.opponent,
                score: hole.golfer_gross,
                points: hole.golfer_points,
            });
            if !gm.opponent_team_no_subs {
                table.upsert(Points {
                    golfer: gm.opponent,
                    week: week.id,
                    hole: hole.hole,
                    opponent: gm.golfer,
                    score: hole.opponent_gross,
                    points: hole.opponent_points,
                });
            }
        }

        match build_round(index, gm, &score) {
            Ok(round) => {
                debug!(
                    "week {}: golfer {} gross {} net {} points {}",
                    week.number, round.golfer, round.gross, round.net, round.total_points
                );
                rounds.push(round);
            }
            Err(reason) => report.skip(function_name!(), Some(week.id), describe(), reason),
        }
    }

    WeekScoring {
        points: table.rows,
        rounds,
    }
}
