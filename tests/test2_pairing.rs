mod common;

use common::*;
use rusty_league::controller::pairing::{TeamDrawer, WeekPairings, generate_pairings, resolve_team};
use rusty_league::model::{
    DrawnTeam, GolferMatchup, Matchup, ProcessReport, SeasonData, SeasonIndex, SkipReason,
};

/// Two scheduled matchups in week 1 with distinct handicaps:
/// g1 10, g2 5, g3 8, g4 12, g9 2, everyone else 5.
fn week_one() -> SeasonData {
    let mut data = league(2);
    schedule(&mut data, 1, &[(1, 2), (3, 4)]);
    for (golfer, value) in [(1, 10.0), (2, 5.0), (3, 8.0), (4, 12.0)] {
        set_handicap(&mut data, golfer, 1, value);
    }
    for golfer in 5..=8 {
        set_handicap(&mut data, golfer, 1, 5.0);
    }
    set_handicap(&mut data, 9, 1, 2.0);
    data
}

fn pair(data: &SeasonData, drawer: &mut TeamDrawer) -> (WeekPairings, ProcessReport) {
    let index = SeasonIndex::new(data, 36);
    let mut report = ProcessReport::default();
    let week = &data.weeks[0];
    let pairings = generate_pairings(&index, week, drawer, &mut report);
    (pairings, report)
}

fn find(gms: &[GolferMatchup], golfer: i64, is_a: bool) -> Option<&GolferMatchup> {
    gms.iter().find(|gm| gm.golfer == golfer && gm.is_a == is_a)
}

#[test]
fn test_ordinary_matchups_pair_flights() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let data = week_one();
    let (pairings, report) = pair(&data, &mut TeamDrawer::new(Some(7), &[]));

    assert!(report.skipped.is_empty());
    assert_eq!(pairings.golfer_matchups.len(), 8);
    assert!(pairings.drawn_teams.is_empty());

    // lower handicap plays A
    let a = find(&pairings.golfer_matchups, 2, true).ok_or("no A matchup for g2")?;
    assert_eq!(a.opponent, 3);
    let b = find(&pairings.golfer_matchups, 1, false).ok_or("no B matchup for g1")?;
    assert_eq!(b.opponent, 4);
    let mirror = find(&pairings.golfer_matchups, 4, false).ok_or("no B matchup for g4")?;
    assert_eq!(mirror.opponent, 1);
    assert!(pairings.golfer_matchups.iter().all(|gm| gm.subbing_for.is_none()));
    Ok(())
}

#[test]
fn test_sub_takes_the_slot_and_is_ranked_by_own_handicap() -> Result<(), Box<dyn std::error::Error>> {
    let mut data = week_one();
    add_sub(&mut data, 1, 1, Some(9), false);
    let (pairings, _) = pair(&data, &mut TeamDrawer::new(Some(7), &[]));

    // g9 (2.0) now ranks ahead of g2 (5.0)
    let a = find(&pairings.golfer_matchups, 9, true).ok_or("no A matchup for g9")?;
    assert_eq!(a.subbing_for, Some(1));
    assert!(!a.is_teammate_subbing);
    assert_eq!(a.opponent, 3);
    let b = find(&pairings.golfer_matchups, 2, false).ok_or("no B matchup for g2")?;
    assert_eq!(b.opponent, 4);
    Ok(())
}

#[test]
fn test_no_sub_teammate_plays_both_slots() -> Result<(), Box<dyn std::error::Error>> {
    let mut data = week_one();
    add_sub(&mut data, 1, 1, None, true);
    let (pairings, report) = pair(&data, &mut TeamDrawer::new(Some(7), &[]));

    assert!(report.skipped.is_empty());
    assert_eq!(pairings.golfer_matchups.len(), 8);
    // flights follow the rostered golfers: g2 (5.0) A, g1's slot (10.0) B
    let a = find(&pairings.golfer_matchups, 2, true).ok_or("no A matchup for g2")?;
    assert_eq!(a.subbing_for, None);
    let b = find(&pairings.golfer_matchups, 2, false).ok_or("no B matchup for g2")?;
    assert_eq!(b.subbing_for, Some(1));
    assert!(b.is_teammate_subbing);
    assert_eq!(b.opponent, 4);
    Ok(())
}

#[test]
fn test_fully_absent_team_gets_a_virtual_opponent() -> Result<(), Box<dyn std::error::Error>> {
    let mut data = week_one();
    add_sub(&mut data, 1, 3, None, true);
    add_sub(&mut data, 1, 4, None, true);
    let (pairings, report) = pair(&data, &mut TeamDrawer::new(Some(7), &[]));

    assert!(report.skipped.is_empty());
    // four from 3 vs 4, two for team 1 against the stand-in
    assert_eq!(pairings.golfer_matchups.len(), 6);
    assert_eq!(pairings.drawn_teams.len(), 1);
    let drawn = &pairings.drawn_teams[0];
    assert_eq!(drawn.absent_team, 2);
    assert!([3, 4].contains(&drawn.drawn_team));

    let virtual_gms: Vec<&GolferMatchup> = pairings
        .golfer_matchups
        .iter()
        .filter(|gm| gm.opponent_team_no_subs)
        .collect();
    assert_eq!(virtual_gms.len(), 2);
    assert!(virtual_gms.iter().all(|gm| [1, 2].contains(&gm.golfer)));
    let stand_ins = if drawn.drawn_team == 3 { [5, 6] } else { [7, 8] };
    assert!(virtual_gms.iter().all(|gm| stand_ins.contains(&gm.opponent)));
    Ok(())
}

#[test]
fn test_recorded_draw_is_reused() -> Result<(), Box<dyn std::error::Error>> {
    let mut data = week_one();
    add_sub(&mut data, 1, 3, None, true);
    add_sub(&mut data, 1, 4, None, true);
    let existing = [DrawnTeam {
        week: week_id(1),
        absent_team: 2,
        drawn_team: 4,
    }];
    let (pairings, _) = pair(&data, &mut TeamDrawer::new(None, &existing));

    assert!(pairings.drawn_teams.is_empty());
    let a = find(&pairings.golfer_matchups, 2, true).ok_or("no A matchup for g2")?;
    assert!(a.opponent_team_no_subs);
    assert_eq!(a.opponent, 7);
    Ok(())
}

#[test]
fn test_recorded_draw_naming_the_matchup_is_skipped() -> Result<(), Box<dyn std::error::Error>> {
    let mut data = week_one();
    add_sub(&mut data, 1, 3, None, true);
    add_sub(&mut data, 1, 4, None, true);
    // drawn before the schedule changed, team 1 now plays team 2
    let existing = [DrawnTeam {
        week: week_id(1),
        absent_team: 2,
        drawn_team: 1,
    }];
    let (pairings, report) = pair(&data, &mut TeamDrawer::new(None, &existing));

    assert_eq!(report.skipped_for(SkipReason::DrawnTeamInMatchup), 1);
    assert!(pairings.drawn_teams.is_empty());
    assert!(pairings.golfer_matchups.iter().all(|gm| gm.golfer >= 5));
    assert!(!pairings.golfer_matchups.iter().any(|gm| gm.opponent_team_no_subs));
    Ok(())
}

#[test]
fn test_double_absence_is_skipped() -> Result<(), Box<dyn std::error::Error>> {
    let mut data = week_one();
    for golfer in 1..=4 {
        add_sub(&mut data, 1, golfer, None, true);
    }
    let (pairings, report) = pair(&data, &mut TeamDrawer::new(Some(7), &[]));

    assert_eq!(report.skipped_for(SkipReason::DoubleAbsence), 1);
    assert_eq!(pairings.golfer_matchups.len(), 4);
    assert!(pairings.golfer_matchups.iter().all(|gm| gm.golfer >= 5));
    Ok(())
}

#[test]
fn test_virtual_pairing_without_candidates_is_skipped() -> Result<(), Box<dyn std::error::Error>> {
    let mut data = league(1);
    schedule(&mut data, 1, &[(1, 2)]);
    add_sub(&mut data, 1, 3, None, true);
    add_sub(&mut data, 1, 4, None, true);
    let (pairings, report) = pair(&data, &mut TeamDrawer::new(Some(7), &[]));

    assert_eq!(report.skipped_for(SkipReason::NoDrawCandidates), 1);
    assert!(pairings.golfer_matchups.is_empty());
    Ok(())
}

#[test]
fn test_broken_inputs_are_skipped_not_fatal() -> Result<(), Box<dyn std::error::Error>> {
    let mut data = week_one();
    // g5 is out with neither a sub nor no_sub
    add_sub(&mut data, 1, 5, None, false);
    data.matchups.push(Matchup {
        id: 99,
        week: week_id(1),
        teams: vec![1],
    });
    let (pairings, report) = pair(&data, &mut TeamDrawer::new(Some(7), &[]));

    assert_eq!(report.skipped_for(SkipReason::InvalidSub), 1);
    assert_eq!(report.skipped_for(SkipReason::MatchupTeamCount), 1);
    // 1 vs 2 still paired
    assert_eq!(pairings.golfer_matchups.len(), 4);
    Ok(())
}

#[test]
fn test_equal_handicaps_keep_listed_order() -> Result<(), Box<dyn std::error::Error>> {
    let data = week_one();
    let index = SeasonIndex::new(&data, 36);
    let week = &data.weeks[0];
    let team = index.team(3).ok_or("no team 3")?;

    let resolved = resolve_team(&index, week, team).map_err(|e| e.to_string())?;
    assert_eq!(resolved.a.golfer, 5);
    assert_eq!(resolved.b.golfer, 6);
    assert!(!resolved.fully_absent);
    Ok(())
}
