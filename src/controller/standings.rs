use serde::Serialize;

use crate::model::{FastMap, LeagueConfig, Round, SeasonIndex, Team, TeamId, WeekId};

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TeamStanding {
    pub team: TeamId,
    pub name: String,
    pub first_half: f64,
    pub second_half: f64,
    pub total: f64,
}

/// "First / Second" from the team's golfers, or the team id when the
/// roster is short.
#[must_use]
pub fn team_name(index: &SeasonIndex<'_>, team: &Team) -> String {
    let data = index.data();
    match team.golfers.as_slice() {
        [g1, g2, ..] => format!("{} / {}", data.golfer_name(*g1), data.golfer_name(*g2)),
        _ => format!("Team {}", team.id),
    }
}

/// Whether a round counts for `team`: the team's own golfer playing their own
/// slot, or anyone playing a slot that belongs to one of its golfers.
#[must_use]
pub fn round_counts_for(team: &Team, round: &Round) -> bool {
    match round.subbing_for {
        Some(absent) => team.has_golfer(absent),
        None => team.has_golfer(round.golfer),
    }
}

/// Total round points a team earned in the given weeks.
#[must_use]
pub fn team_points(index: &SeasonIndex<'_>, team: &Team, weeks: &[WeekId]) -> f64 {
    index
        .data()
        .rounds
        .iter()
        .filter(|r| weeks.contains(&r.week) && round_counts_for(team, r))
        .map(|r| r.total_points)
        .sum()
}

/// Non-rained-out week ids split into halves, up to `through_week` if given.
#[must_use]
pub fn half_weeks(
    index: &SeasonIndex<'_>,
    config: &LeagueConfig,
    through_week: Option<i32>,
) -> (Vec<WeekId>, Vec<WeekId>) {
    let mut first = Vec::new();
    let mut second = Vec::new();
    for week in index.weeks() {
        if week.rained_out || through_week.is_some_and(|n| week.number > n) {
            continue;
        }
        if week.number <= config.first_half_last_week {
            first.push(week.id);
        } else {
            second.push(week.id);
        }
    }
    (first, second)
}

/// Standings for every team, best total first. Equal totals put the higher
/// team id ahead.
#[must_use]
pub fn standings(
    index: &SeasonIndex<'_>,
    config: &LeagueConfig,
    through_week: Option<i32>,
) -> Vec<TeamStanding> {
    let (first, second) = half_weeks(index, config, through_week);
    let mut out: Vec<TeamStanding> = index
        .teams()
        .iter()
        .map(|team| {
            let first_half = team_points(index, team, &first);
            let second_half = team_points(index, team, &second);
            TeamStanding {
                team: team.id,
                name: team_name(index, team),
                first_half,
                second_half,
                total: first_half + second_half,
            }
        })
        .collect();
    out.sort_by(|a, b| b.total.total_cmp(&a.total).then(b.team.cmp(&a.team)));
    out
}

/// Standings keyed by team, for lookups.
#[must_use]
pub fn standings_by_team(standings: &[TeamStanding]) -> FastMap<TeamId, &TeamStanding> {
    standings.iter().map(|s| (s.team, s)).collect()
}
