pub mod drawn;

pub use drawn::TeamDrawer;

use ::function_name::named;
use log::{debug, info};

use crate::model::{
    DrawnTeam, GolferId, GolferMatchup, ProcessReport, SeasonIndex, SkipReason, Sub, Team, TeamId,
    Week,
};

/// Who fills one of a team's two slots this week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    /// Rostered golfer the slot belongs to.
    pub original: GolferId,
    /// Golfer actually playing it.
    pub golfer: GolferId,
    pub subbing_for: Option<GolferId>,
    pub teammate_subbing: bool,
}

/// A team's slots resolved against the week's sub records, already ordered
/// A then B.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTeam {
    pub team: TeamId,
    pub a: Slot,
    pub b: Slot,
    /// Both golfers out with no sub; the team fields nobody.
    pub fully_absent: bool,
}

impl ResolvedTeam {
    #[must_use]
    pub fn slots(&self) -> [Slot; 2] {
        [self.a, self.b]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Absence {
    Present,
    Replaced(GolferId),
    NoSub,
}

fn absence(sub: Option<&Sub>) -> Result<Absence, SkipReason> {
    match sub {
        None => Ok(Absence::Present),
        Some(s) if s.no_sub => Ok(Absence::NoSub),
        Some(s) => s.sub_golfer.map(Absence::Replaced).ok_or(SkipReason::InvalidSub),
    }
}

/// Resolves a team's two slots for `week` and orders them into flights.
///
/// With a no-sub absence the flights follow the rostered golfers' handicaps
/// so the pairing keeps its usual shape; otherwise the golfers on the course
/// are ranked. Equal handicaps keep the listed order.
///
/// # Errors
///
/// Will return `Err` if the team does not have two golfers or a sub record
/// names no golfer without being a no-sub
pub fn resolve_team(
    index: &SeasonIndex<'_>,
    week: &Week,
    team: &Team,
) -> Result<ResolvedTeam, SkipReason> {
    let (g1, g2) = team.pair().ok_or(SkipReason::TeamGolferCount)?;
    let abs1 = absence(index.sub_for(week.id, g1))?;
    let abs2 = absence(index.sub_for(week.id, g2))?;

    let on_course = |original: GolferId, abs: Absence| match abs {
        Absence::Replaced(sub) => sub,
        _ => original,
    };
    let playing1 = on_course(g1, abs1);
    let playing2 = on_course(g2, abs2);

    let slot = |original: GolferId, abs: Absence, own: GolferId, teammate: GolferId| match abs {
        Absence::Present => Slot {
            original,
            golfer: own,
            subbing_for: None,
            teammate_subbing: false,
        },
        Absence::Replaced(sub) => Slot {
            original,
            golfer: sub,
            subbing_for: Some(original),
            teammate_subbing: false,
        },
        Absence::NoSub => Slot {
            original,
            golfer: teammate,
            subbing_for: Some(original),
            teammate_subbing: true,
        },
    };
    let slot1 = slot(g1, abs1, playing1, playing2);
    let slot2 = slot(g2, abs2, playing2, playing1);

    let has_no_sub = abs1 == Absence::NoSub || abs2 == Absence::NoSub;
    let (rank1, rank2) = if has_no_sub {
        (
            index.handicap_or_zero(g1, week.id),
            index.handicap_or_zero(g2, week.id),
        )
    } else {
        (
            index.handicap_or_zero(slot1.golfer, week.id),
            index.handicap_or_zero(slot2.golfer, week.id),
        )
    };
    let (a, b) = if rank1 <= rank2 {
        (slot1, slot2)
    } else {
        (slot2, slot1)
    };

    Ok(ResolvedTeam {
        team: team.id,
        a,
        b,
        fully_absent: abs1 == Absence::NoSub && abs2 == Absence::NoSub,
    })
}

fn golfer_matchup(week: &Week, slot: &Slot, opponent: GolferId, is_a: bool) -> GolferMatchup {
    GolferMatchup {
        week: week.id,
        golfer: slot.golfer,
        opponent,
        is_a,
        subbing_for: slot.subbing_for,
        is_teammate_subbing: slot.teammate_subbing,
        opponent_team_no_subs: false,
    }
}

/// Golfer matchups for one week, plus any stand-in draws made for it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeekPairings {
    pub golfer_matchups: Vec<GolferMatchup>,
    pub drawn_teams: Vec<DrawnTeam>,
}

/// Builds every golfer matchup for `week` from its team schedule and subs.
///
/// Ordinary pairings give four matchups (A and B from each side). When one
/// team is fully absent, the other plays a virtual matchup against a drawn
/// stand-in team and only its own two matchups are made. Anything
/// structurally broken is skipped into `report`.
#[named]
pub fn generate_pairings(
    index: &SeasonIndex<'_>,
    week: &Week,
    drawer: &mut TeamDrawer,
    report: &mut ProcessReport,
) -> WeekPairings {
    let mut out = WeekPairings::default();
    let mut ordinary: Vec<ResolvedTeam> = Vec::new();
    let mut virtual_pairings: Vec<(ResolvedTeam, TeamId)> = Vec::new();

    for matchup in index.matchups_for(week.id) {
        let [t1, t2] = matchup.teams.as_slice() else {
            report.skip(
                function_name!(),
                Some(week.id),
                format!("matchup {} with {} teams", matchup.id, matchup.teams.len()),
                SkipReason::MatchupTeamCount,
            );
            continue;
        };
        let (Some(team1), Some(team2)) = (index.team(*t1), index.team(*t2)) else {
            report.skip(
                function_name!(),
                Some(week.id),
                format!("matchup {} names a team not in the season", matchup.id),
                SkipReason::MatchupTeamCount,
            );
            continue;
        };

        let sides = resolve_team(index, week, team1).and_then(|side1| {
            resolve_team(index, week, team2).map(|side2| (side1, side2))
        });
        let (side1, side2) = match sides {
            Ok(sides) => sides,
            Err(reason) => {
                report.skip(
                    function_name!(),
                    Some(week.id),
                    format!("matchup {} (teams {t1} and {t2})", matchup.id),
                    reason,
                );
                continue;
            }
        };

        match (side1.fully_absent, side2.fully_absent) {
            (true, true) => {
                info!(
                    "week {}: teams {t1} and {t2} are both out, nothing to pair",
                    week.number
                );
                report.skip(
                    function_name!(),
                    Some(week.id),
                    format!("matchup {} (teams {t1} and {t2})", matchup.id),
                    SkipReason::DoubleAbsence,
                );
            }
            (false, true) => virtual_pairings.push((side1, side2.team)),
            (true, false) => virtual_pairings.push((side2, side1.team)),
            (false, false) => {
                for (is_a, s1, s2) in [(true, side1.a, side2.a), (false, side1.b, side2.b)] {
                    out.golfer_matchups
                        .push(golfer_matchup(week, &s1, s2.golfer, is_a));
                    out.golfer_matchups
                        .push(golfer_matchup(week, &s2, s1.golfer, is_a));
                    debug!(
                        "week {}: {} {} vs {}",
                        week.number,
                        if is_a { "A" } else { "B" },
                        s1.golfer,
                        s2.golfer
                    );
                }
                ordinary.push(side1);
                ordinary.push(side2);
            }
        }
    }

    for (present, absent_team) in virtual_pairings {
        let candidates: Vec<TeamId> = ordinary
            .iter()
            .map(|side| side.team)
            .filter(|team| *team != present.team && *team != absent_team)
            .collect();
        let drawn = drawer.draw(week.id, absent_team, &candidates);
        if let Some(drawn) = drawn.filter(|d| *d == present.team || *d == absent_team) {
            report.skip(
                function_name!(),
                Some(week.id),
                format!(
                    "virtual opponent for team {} (recorded draw is team {drawn})",
                    present.team
                ),
                SkipReason::DrawnTeamInMatchup,
            );
            continue;
        }
        let stand_in = drawn
            .and_then(|drawn| index.team(drawn))
            .and_then(|drawn| resolve_team(index, week, drawn).ok())
            .filter(|drawn| !drawn.fully_absent);
        let Some(stand_in) = stand_in else {
            report.skip(
                function_name!(),
                Some(week.id),
                format!("virtual opponent for team {} (absent team {absent_team})", present.team),
                SkipReason::NoDrawCandidates,
            );
            continue;
        };
        info!(
            "week {}: team {} plays team {} in place of absent team {absent_team}",
            week.number, present.team, stand_in.team
        );
        for (is_a, mine, theirs) in [
            (true, present.a, stand_in.a),
            (false, present.b, stand_in.b),
        ] {
            let mut gm = golfer_matchup(week, &mine, theirs.golfer, is_a);
            gm.opponent_team_no_subs = true;
            out.golfer_matchups.push(gm);
        }
    }

    out.drawn_teams = drawer.take_new();
    out
}
