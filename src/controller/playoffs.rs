use serde::Serialize;
use std::fmt;

use super::standings::{TeamStanding, standings, standings_by_team, team_points};
use crate::model::{FastMap, LeagueConfig, SeasonIndex, TeamId, WeekId};

pub const HALF_WINNER_TIE_NOTE: &str = "Seeding determined by head-to-head among tied half winners";
pub const WILDCARD_TIE_NOTE: &str = "Wildcard tie resolved by head-to-head";

const EPSILON: f64 = 1e-9;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedSource {
    FirstHalf,
    SecondHalf,
    BothHalves,
    Wildcard,
}

impl fmt::Display for SeedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SeedSource::FirstHalf => "first_half",
            SeedSource::SecondHalf => "second_half",
            SeedSource::BothHalves => "both_halves",
            SeedSource::Wildcard => "wildcard",
        };
        write!(f, "{s}")
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PlayoffSeed {
    pub rank: usize,
    pub team: TeamId,
    pub team_name: String,
    pub source: SeedSource,
    pub first_half_points: f64,
    pub second_half_points: f64,
    pub total_points: f64,
    pub tiebreak_note: Option<String>,
}

/// Weeks in which the two teams were scheduled against each other.
fn weeks_between(index: &SeasonIndex<'_>, a: TeamId, b: TeamId) -> Vec<WeekId> {
    index
        .data()
        .matchups
        .iter()
        .filter(|m| m.involves(a) && m.involves(b))
        .map(|m| m.week)
        .collect()
}

/// Points each team scored in the weeks it met the other.
#[must_use]
pub fn head_to_head(index: &SeasonIndex<'_>, a: TeamId, b: TeamId) -> (f64, f64) {
    let weeks = weeks_between(index, a, b);
    let points = |team: TeamId| {
        index
            .team(team)
            .map_or(0.0, |t| team_points(index, t, &weeks))
    };
    (points(a), points(b))
}

/// Orders a tied group by the head-to-head points each team piled up
/// against the rest of the group, higher first; then higher team id.
#[must_use]
pub fn rank_by_head_to_head(index: &SeasonIndex<'_>, group: &[TeamId]) -> Vec<TeamId> {
    let mut score: FastMap<TeamId, f64> = FastMap::default();
    for (i, a) in group.iter().enumerate() {
        for b in &group[i + 1..] {
            let (a_pts, b_pts) = head_to_head(index, *a, *b);
            *score.entry(*a).or_insert(0.0) += a_pts;
            *score.entry(*b).or_insert(0.0) += b_pts;
        }
    }
    let mut ranked = group.to_vec();
    let score_of = |t: &TeamId| score.get(t).copied().unwrap_or(0.0);
    ranked.sort_by(|a, b| score_of(b).total_cmp(&score_of(a)).then(b.cmp(a)));
    ranked
}

fn half_winners(by_team: &[(TeamId, f64)]) -> Vec<TeamId> {
    let best = by_team
        .iter()
        .map(|(_, pts)| *pts)
        .fold(f64::NEG_INFINITY, f64::max);
    by_team
        .iter()
        .filter(|(_, pts)| *pts > 0.0 && (*pts - best).abs() < EPSILON)
        .map(|(team, _)| *team)
        .collect()
}

/// Playoff seeds for the season.
///
/// Half winners (every team tied for a half's best score) seed first: two of
/// them by season total, more than two by head-to-head within the group. The
/// remaining slots go to wildcards by total, with exact ties settled
/// head-to-head.
#[must_use]
pub fn seed_playoffs(
    index: &SeasonIndex<'_>,
    config: &LeagueConfig,
    slots: usize,
) -> Vec<PlayoffSeed> {
    let table = standings(index, config, None);
    if table.is_empty() {
        return Vec::new();
    }
    let by_team = standings_by_team(&table);

    let mut team_ids: Vec<TeamId> = table.iter().map(|s| s.team).collect();
    team_ids.sort_unstable();
    let first: Vec<(TeamId, f64)> = team_ids
        .iter()
        .filter_map(|t| by_team.get(t).map(|s| (*t, s.first_half)))
        .collect();
    let second: Vec<(TeamId, f64)> = team_ids
        .iter()
        .filter_map(|t| by_team.get(t).map(|s| (*t, s.second_half)))
        .collect();
    let first_winners = half_winners(&first);
    let second_winners = half_winners(&second);

    let mut winners: Vec<TeamId> = Vec::new();
    for team in first_winners.iter().chain(second_winners.iter()) {
        if !winners.contains(team) {
            winners.push(*team);
        }
    }

    let total_of = |t: &TeamId| by_team.get(t).map_or(0.0, |s| s.total);
    let (ordered, note) = match winners.len() {
        2 => {
            let mut ordered = winners.clone();
            ordered.sort_by(|a, b| total_of(b).total_cmp(&total_of(a)).then(b.cmp(a)));
            (ordered, None)
        }
        n if n > 2 => (
            rank_by_head_to_head(index, &winners),
            Some(HALF_WINNER_TIE_NOTE.to_string()),
        ),
        _ => (winners.clone(), None),
    };

    let make_seed = |rank: usize, team: TeamId, source: SeedSource, note: Option<String>| {
        let standing: Option<&&TeamStanding> = by_team.get(&team);
        PlayoffSeed {
            rank,
            team,
            team_name: standing.map_or_else(|| format!("Team {team}"), |s| s.name.clone()),
            source,
            first_half_points: standing.map_or(0.0, |s| s.first_half),
            second_half_points: standing.map_or(0.0, |s| s.second_half),
            total_points: standing.map_or(0.0, |s| s.total),
            tiebreak_note: note,
        }
    };

    let mut seeds: Vec<PlayoffSeed> = Vec::new();
    for team in ordered.iter().take(slots) {
        let source = match (first_winners.contains(team), second_winners.contains(team)) {
            (true, true) => SeedSource::BothHalves,
            (true, false) => SeedSource::FirstHalf,
            (false, true) => SeedSource::SecondHalf,
            (false, false) => SeedSource::Wildcard,
        };
        seeds.push(make_seed(seeds.len() + 1, *team, source, note.clone()));
    }

    // standings are already sorted by total, then higher id
    let wildcards: Vec<TeamId> = table
        .iter()
        .map(|s| s.team)
        .filter(|t| !ordered.contains(t))
        .collect();
    let mut i = 0;
    while seeds.len() < slots && i < wildcards.len() {
        let points = total_of(&wildcards[i]);
        let mut j = i + 1;
        while j < wildcards.len() && (total_of(&wildcards[j]) - points).abs() < EPSILON {
            j += 1;
        }
        let group = &wildcards[i..j];
        let (ranked, note) = if group.len() == 1 {
            (group.to_vec(), None)
        } else {
            (
                rank_by_head_to_head(index, group),
                Some(WILDCARD_TIE_NOTE.to_string()),
            )
        };
        for team in ranked {
            if seeds.len() >= slots {
                break;
            }
            seeds.push(make_seed(
                seeds.len() + 1,
                team,
                SeedSource::Wildcard,
                note.clone(),
            ));
        }
        i = j;
    }

    seeds
}
