use super::MatchupScore;
use crate::model::{GolferMatchup, Round, SeasonIndex, SkipReason, conventional_round};

/// Summarizes a scored matchup into its golfer's round. The round hangs off
/// the team matchup of the rostered golfer whose slot it is.
///
/// # Errors
///
/// Will return `Err` if that golfer's team has no matchup this week
pub fn build_round(
    index: &SeasonIndex<'_>,
    gm: &GolferMatchup,
    score: &MatchupScore,
) -> Result<Round, SkipReason> {
    let matchup = index
        .team_of(gm.original_golfer())
        .and_then(|team| index.matchup_for_team(gm.week, team.id))
        .ok_or(SkipReason::MissingTeamMatchup)?;
    let handicap = index
        .handicap(gm.golfer, gm.week)
        .ok_or(SkipReason::MissingHandicap)?;

    Ok(Round {
        golfer: gm.golfer,
        week: gm.week,
        matchup: matchup.id,
        golfer_matchup: gm.key(),
        handicap,
        gross: score.golfer_gross,
        net: score.golfer_gross - conventional_round(handicap),
        round_points: score.round_points,
        total_points: score.golfer_points(),
        is_sub: gm.subbing_for.is_some(),
        subbing_for: gm.subbing_for,
    })
}
