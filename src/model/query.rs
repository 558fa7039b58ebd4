use ahash::RandomState;
use std::collections::{BTreeSet, HashMap};

use crate::model::types::{
    GolferId, Handicap, Hole, HoleId, Matchup, SeasonData, Sub, Team, TeamId, Week, WeekId,
};

pub type FastMap<K, V> = HashMap<K, V, RandomState>;

/// One golfer's posted strokes for one week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeeklyTotal {
    pub golfer: GolferId,
    pub week: WeekId,
    pub sum: i32,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NinePar {
    pub front: i32,
    pub back: i32,
}

impl NinePar {
    #[must_use]
    pub fn for_nine(&self, is_front: bool) -> i32 {
        if is_front { self.front } else { self.back }
    }
}

/// Lookups over a [`SeasonData`] snapshot, built in a single pass.
///
/// Handicaps are owned so a freshly recomputed set can be swapped in with
/// [`SeasonIndex::set_handicaps`] without rebuilding the rest.
pub struct SeasonIndex<'a> {
    data: &'a SeasonData,
    weeks: Vec<&'a Week>,
    week_by_id: FastMap<WeekId, &'a Week>,
    team_by_id: FastMap<TeamId, &'a Team>,
    team_of_golfer: FastMap<GolferId, TeamId>,
    holes_by_id: FastMap<HoleId, &'a Hole>,
    front: Vec<&'a Hole>,
    back: Vec<&'a Hole>,
    nine_par: NinePar,
    totals: FastMap<(GolferId, WeekId), WeeklyTotal>,
    hole_scores: FastMap<(GolferId, WeekId, HoleId), i32>,
    score_counts: FastMap<WeekId, usize>,
    subs: FastMap<(WeekId, GolferId), &'a Sub>,
    matchups_by_week: FastMap<WeekId, Vec<&'a Matchup>>,
    handicaps: FastMap<(GolferId, WeekId), f64>,
}

impl<'a> SeasonIndex<'a> {
    #[must_use]
    pub fn new(data: &'a SeasonData, default_nine_par: i32) -> Self {
        let mut weeks: Vec<&Week> = data.weeks.iter().collect();
        weeks.sort_by_key(|w| (w.number, w.id));
        let week_by_id = weeks.iter().map(|w| (w.id, *w)).collect();

        let mut team_by_id = FastMap::default();
        let mut team_of_golfer = FastMap::default();
        for team in &data.teams {
            team_by_id.insert(team.id, team);
            for golfer in &team.golfers {
                team_of_golfer.entry(*golfer).or_insert(team.id);
            }
        }

        let holes_by_id: FastMap<HoleId, &Hole> = data.holes.iter().map(|h| (h.id, h)).collect();
        let mut front: Vec<&Hole> = data.holes.iter().filter(|h| h.is_front()).collect();
        let mut back: Vec<&Hole> = data
            .holes
            .iter()
            .filter(|h| (10..=18).contains(&h.number))
            .collect();
        front.sort_by_key(|h| h.number);
        back.sort_by_key(|h| h.number);
        let par_of = |holes: &[&Hole]| {
            if holes.is_empty() {
                default_nine_par
            } else {
                holes.iter().map(|h| h.par).sum()
            }
        };
        let nine_par = NinePar {
            front: par_of(&front),
            back: par_of(&back),
        };

        let mut totals: FastMap<(GolferId, WeekId), WeeklyTotal> = FastMap::default();
        let mut hole_scores = FastMap::default();
        let mut score_counts: FastMap<WeekId, usize> = FastMap::default();
        for score in &data.scores {
            let total = totals
                .entry((score.golfer, score.week))
                .or_insert(WeeklyTotal {
                    golfer: score.golfer,
                    week: score.week,
                    sum: 0,
                    count: 0,
                });
            total.sum += score.score;
            total.count += 1;
            hole_scores.insert((score.golfer, score.week, score.hole), score.score);
            *score_counts.entry(score.week).or_insert(0) += 1;
        }

        let subs = data
            .subs
            .iter()
            .map(|s| ((s.week, s.absent_golfer), s))
            .collect();

        let mut matchups_by_week: FastMap<WeekId, Vec<&Matchup>> = FastMap::default();
        for matchup in &data.matchups {
            matchups_by_week.entry(matchup.week).or_default().push(matchup);
        }
        for matchups in matchups_by_week.values_mut() {
            matchups.sort_by_key(|m| m.id);
        }

        let handicaps = data
            .handicaps
            .iter()
            .map(|h| ((h.golfer, h.week), h.value))
            .collect();

        Self {
            data,
            weeks,
            week_by_id,
            team_by_id,
            team_of_golfer,
            holes_by_id,
            front,
            back,
            nine_par,
            totals,
            hole_scores,
            score_counts,
            subs,
            matchups_by_week,
            handicaps,
        }
    }

    #[must_use]
    pub fn data(&self) -> &'a SeasonData {
        self.data
    }

    #[must_use]
    pub fn year(&self) -> i32 {
        self.data.season.year
    }

    /// Weeks in ascending number order.
    #[must_use]
    pub fn weeks(&self) -> &[&'a Week] {
        &self.weeks
    }

    #[must_use]
    pub fn week(&self, week: WeekId) -> Option<&'a Week> {
        self.week_by_id.get(&week).copied()
    }

    pub fn weeks_before(&self, week: &Week) -> impl Iterator<Item = &'a Week> + '_ {
        let number = week.number;
        self.weeks.iter().copied().filter(move |w| w.number < number)
    }

    #[must_use]
    pub fn weekly_total(&self, golfer: GolferId, week: WeekId) -> Option<&WeeklyTotal> {
        self.totals.get(&(golfer, week))
    }

    #[must_use]
    pub fn played(&self, golfer: GolferId, week: WeekId) -> bool {
        self.totals.contains_key(&(golfer, week))
    }

    #[must_use]
    pub fn is_complete(&self, golfer: GolferId, week: WeekId, required_holes: usize) -> bool {
        self.weekly_total(golfer, week)
            .is_some_and(|t| t.count >= required_holes)
    }

    #[must_use]
    pub fn hole_score(&self, golfer: GolferId, week: WeekId, hole: HoleId) -> Option<i32> {
        self.hole_scores.get(&(golfer, week, hole)).copied()
    }

    #[must_use]
    pub fn score_count(&self, week: WeekId) -> usize {
        self.score_counts.get(&week).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn hole(&self, hole: HoleId) -> Option<&'a Hole> {
        self.holes_by_id.get(&hole).copied()
    }

    /// The nine holes played on a front or back week, in hole order.
    #[must_use]
    pub fn nine(&self, is_front: bool) -> &[&'a Hole] {
        if is_front { &self.front } else { &self.back }
    }

    #[must_use]
    pub fn nine_par(&self, is_front: bool) -> i32 {
        self.nine_par.for_nine(is_front)
    }

    #[must_use]
    pub fn teams(&self) -> &'a [Team] {
        &self.data.teams
    }

    #[must_use]
    pub fn team(&self, team: TeamId) -> Option<&'a Team> {
        self.team_by_id.get(&team).copied()
    }

    #[must_use]
    pub fn team_of(&self, golfer: GolferId) -> Option<&'a Team> {
        self.team_of_golfer
            .get(&golfer)
            .and_then(|id| self.team(*id))
    }

    /// Rostered on a team this season (as opposed to a sub).
    #[must_use]
    pub fn is_member(&self, golfer: GolferId) -> bool {
        self.team_of_golfer.contains_key(&golfer)
    }

    #[must_use]
    pub fn sub_for(&self, week: WeekId, absent_golfer: GolferId) -> Option<&'a Sub> {
        self.subs.get(&(week, absent_golfer)).copied()
    }

    #[must_use]
    pub fn no_sub_count(&self, week: WeekId) -> usize {
        self.data
            .subs
            .iter()
            .filter(|s| s.week == week && s.no_sub)
            .count()
    }

    #[must_use]
    pub fn matchups_for(&self, week: WeekId) -> &[&'a Matchup] {
        self.matchups_by_week
            .get(&week)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    #[must_use]
    pub fn matchup_for_team(&self, week: WeekId, team: TeamId) -> Option<&'a Matchup> {
        self.matchups_for(week)
            .iter()
            .copied()
            .find(|m| m.involves(team))
    }

    #[must_use]
    pub fn handicap(&self, golfer: GolferId, week: WeekId) -> Option<f64> {
        self.handicaps.get(&(golfer, week)).copied()
    }

    /// Stored handicap, or 0 for a golfer with no row yet.
    #[must_use]
    pub fn handicap_or_zero(&self, golfer: GolferId, week: WeekId) -> f64 {
        self.handicap(golfer, week).unwrap_or(0.0)
    }

    pub fn set_handicaps(&mut self, handicaps: &[Handicap]) {
        self.handicaps = handicaps
            .iter()
            .map(|h| ((h.golfer, h.week), h.value))
            .collect();
    }

    /// Golfers whose handicaps the season tracks: rostered members, anyone
    /// who posted a score, and anyone named on a sub record.
    #[must_use]
    pub fn relevant_golfers(&self) -> Vec<GolferId> {
        let mut golfers: BTreeSet<GolferId> = self.team_of_golfer.keys().copied().collect();
        golfers.extend(self.totals.keys().map(|(golfer, _)| *golfer));
        for sub in &self.data.subs {
            golfers.insert(sub.absent_golfer);
            if let Some(sub_golfer) = sub.sub_golfer {
                golfers.insert(sub_golfer);
            }
        }
        golfers.into_iter().collect()
    }
}
