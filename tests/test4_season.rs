mod common;

use common::*;
use rusty_league::LeagueEngine;
use rusty_league::error::LeagueError;
use rusty_league::model::{LeagueConfig, SeasonData};
use rusty_league::storage::{LeagueImport, LeagueStore, MemoryStore, SqliteStore};

/// Five weeks, 1 vs 2 and 3 vs 4 every week. Week 3 is rained out, week 5
/// has no scores yet; golfer g shoots 36 + g everywhere else.
fn season() -> SeasonData {
    let mut data = league(5);
    for number in 1..=5 {
        schedule(&mut data, number, &[(1, 2), (3, 4)]);
    }
    data.weeks[2].rained_out = true;
    for number in [1, 2, 4] {
        for golfer in 1..=8 {
            post_total(&mut data, golfer, number, 36 + golfer as i32);
        }
    }
    data
}

#[test]
fn test_process_week_builds_every_played_week() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let mut store = MemoryStore::with_season(season());
    let mut engine = LeagueEngine::new(&mut store, config());

    let report = engine.process_week(SEASON, 4)?;
    assert!(report.skipped.is_empty(), "{:?}", report.skipped);
    assert_eq!(report.weeks_processed, vec![week_id(1), week_id(2), week_id(4)]);
    assert_eq!(report.handicaps_written, 8 * 5);
    assert_eq!(report.golfer_matchups_written, 8 * 3);
    assert_eq!(report.rounds_written, 8 * 3);

    let data = store.load_season(SEASON)?;
    assert!(data.rounds.iter().all(|r| r.week != week_id(3)));
    // 12 points per flight, two flights per team matchup, two team matchups
    let week1: f64 = data
        .rounds
        .iter()
        .filter(|r| r.week == week_id(1))
        .map(|r| r.total_points)
        .sum();
    assert!(approx(week1, 48.0), "got {week1}");
    Ok(())
}

#[test]
fn test_process_week_is_idempotent() -> Result<(), Box<dyn std::error::Error>> {
    let mut store = MemoryStore::with_season(season());
    LeagueEngine::new(&mut store, config()).process_week(SEASON, 4)?;
    let first = store.load_season(SEASON)?;

    LeagueEngine::new(&mut store, config()).process_week(SEASON, 4)?;
    let second = store.load_season(SEASON)?;

    assert_eq!(first.handicaps, second.handicaps);
    assert_eq!(first.golfer_matchups, second.golfer_matchups);
    assert_eq!(first.points, second.points);
    assert_eq!(first.rounds, second.rounds);
    Ok(())
}

#[test]
fn test_unplayed_week_gets_pairings_only() -> Result<(), Box<dyn std::error::Error>> {
    let mut store = MemoryStore::with_season(season());
    let mut engine = LeagueEngine::new(&mut store, config());
    engine.recompute_handicaps(SEASON)?;

    let report = engine.regenerate_pairings(SEASON, 5)?;
    assert_eq!(report.golfer_matchups_written, 8);
    assert_eq!(report.rounds_written, 0);

    let data = store.load_season(SEASON)?;
    assert_eq!(
        data.golfer_matchups
            .iter()
            .filter(|gm| gm.week == week_id(5))
            .count(),
        8
    );
    assert!(data.points.is_empty());
    Ok(())
}

#[test]
fn test_rained_out_week_is_not_paired() -> Result<(), Box<dyn std::error::Error>> {
    let mut store = MemoryStore::with_season(season());
    let mut engine = LeagueEngine::new(&mut store, config());
    engine.recompute_handicaps(SEASON)?;

    let report = engine.regenerate_pairings(SEASON, 3)?;
    assert_eq!(report.golfer_matchups_written, 0);
    assert!(report.weeks_processed.is_empty());

    let data = store.load_season(SEASON)?;
    assert!(data.golfer_matchups.iter().all(|gm| gm.week != week_id(3)));
    Ok(())
}

#[test]
fn test_regenerate_replaces_stale_output() -> Result<(), Box<dyn std::error::Error>> {
    let mut store = MemoryStore::with_season(season());
    LeagueEngine::new(&mut store, config()).process_week(SEASON, 2)?;

    // golfer 1 is replaced by 9 in week 2 after the fact
    if let Some(data) = store.season_mut(SEASON) {
        add_sub(data, 2, 1, Some(9), false);
        data.scores.retain(|s| !(s.golfer == 1 && s.week == week_id(2)));
        post_total(data, 9, 2, 40);
    }
    let report = LeagueEngine::new(&mut store, config()).process_week(SEASON, 2)?;
    assert!(report.skipped.is_empty(), "{:?}", report.skipped);

    let data = store.load_season(SEASON)?;
    let week2: Vec<_> = data
        .rounds
        .iter()
        .filter(|r| r.week == week_id(2))
        .collect();
    assert_eq!(week2.len(), 8);
    assert!(week2.iter().all(|r| r.golfer != 1));
    let sub_round = week2
        .iter()
        .find(|r| r.golfer == 9)
        .ok_or("no round for the sub")?;
    assert!(sub_round.is_sub);
    assert_eq!(sub_round.subbing_for, Some(1));
    Ok(())
}

#[test]
fn test_drawn_opponent_sticks_across_runs() -> Result<(), Box<dyn std::error::Error>> {
    // team 2 is out with no subs, everyone else shoots par
    let mut data = league(1);
    schedule(&mut data, 1, &[(1, 2), (3, 4)]);
    add_sub(&mut data, 1, 3, None, true);
    add_sub(&mut data, 1, 4, None, true);
    for golfer in [1, 2, 5, 6, 7, 8] {
        post_total(&mut data, golfer, 1, 36);
    }
    let mut store = SqliteStore::open_in_memory()?;
    store.import_season(&data)?;
    let unseeded = LeagueConfig {
        draw_seed: None,
        ..LeagueConfig::default()
    };

    let mut opponents = Vec::new();
    for _ in 0..5 {
        let report = LeagueEngine::new(&mut store, unseeded.clone()).process_week(SEASON, 1)?;
        assert!(report.skipped.is_empty(), "{:?}", report.skipped);

        let data = store.load_season(SEASON)?;
        assert_eq!(data.drawn_teams.len(), 1);
        let mut virtual_gms: Vec<(i64, i64)> = data
            .golfer_matchups
            .iter()
            .filter(|gm| gm.opponent_team_no_subs)
            .map(|gm| (gm.golfer, gm.opponent))
            .collect();
        virtual_gms.sort_unstable();
        assert_eq!(virtual_gms.len(), 2);
        opponents.push(virtual_gms);

        for golfer in [1, 2] {
            let round = data
                .rounds
                .iter()
                .find(|r| r.golfer == golfer)
                .ok_or("no round for a golfer facing a drawn team")?;
            assert!(approx(round.round_points, 3.0));
        }
    }
    assert!(opponents.windows(2).all(|w| w[0] == w[1]));

    let rows: i64 = store
        .connection()
        .query_row("SELECT COUNT(*) FROM drawn_team", [], |row| row.get(0))?;
    assert_eq!(rows, 1);
    Ok(())
}

#[test]
fn test_unknown_week_and_season_are_errors() -> Result<(), Box<dyn std::error::Error>> {
    let mut store = MemoryStore::with_season(season());
    let mut engine = LeagueEngine::new(&mut store, config());

    let missing_week = engine.process_week(SEASON, 12);
    assert!(matches!(
        missing_week,
        Err(LeagueError::NotFound { what: "week", .. })
    ));
    assert!(matches!(
        engine.process_week(1999, 1),
        Err(LeagueError::Storage(_))
    ));
    Ok(())
}
