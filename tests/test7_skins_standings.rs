mod common;

use common::*;
use rusty_league::LeagueEngine;
use rusty_league::controller::skins::skin_winners;
use rusty_league::controller::standings::{standings, team_name};
use rusty_league::model::{
    GolferId, GolferMatchupKey, LeagueConfig, Round, SeasonData, SeasonIndex, SkinEntry,
};
use rusty_league::storage::MemoryStore;

fn halves() -> (SeasonData, LeagueConfig) {
    let mut data = league(4);
    schedule(&mut data, 1, &[(1, 2), (3, 4)]);
    schedule(&mut data, 3, &[(1, 4), (2, 3)]);
    let config = LeagueConfig {
        first_half_last_week: 2,
        ..config()
    };
    (data, config)
}

fn round(golfer: GolferId, number: i32, points: f64, subbing_for: Option<GolferId>) -> Round {
    Round {
        golfer,
        week: week_id(number),
        matchup: week_id(number) + 1,
        golfer_matchup: GolferMatchupKey {
            week: week_id(number),
            golfer,
            opponent: 0,
            is_a: true,
        },
        handicap: 0.0,
        gross: 36,
        net: 36,
        round_points: 0.0,
        total_points: points,
        is_sub: subbing_for.is_some(),
        subbing_for,
    }
}

#[test]
fn test_skins_need_a_unique_low_score() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let mut data = league(1);
    post_nine(&mut data, 1, 1, [3, 4, 4, 5, 4, 4, 4, 4, 4]);
    post_nine(&mut data, 2, 1, [4, 4, 3, 5, 4, 4, 4, 4, 5]);
    post_nine(&mut data, 3, 1, [4, 4, 4, 3, 4, 4, 4, 4, 4]);
    post_nine(&mut data, 4, 1, [2, 2, 2, 2, 2, 2, 2, 2, 2]);
    // golfer 4 did not enter
    for golfer in 1..=3 {
        data.skin_entries.push(SkinEntry {
            golfer,
            week: week_id(1),
        });
    }
    let index = SeasonIndex::new(&data, 36);

    let wins = skin_winners(&index, &data.weeks[0]);
    let holes: Vec<(i64, i32, i32)> = wins.iter().map(|w| (w.golfer, w.hole, w.score)).collect();
    assert_eq!(holes, vec![(1, 1, 3), (2, 3, 3), (3, 4, 3)]);
    Ok(())
}

#[test]
fn test_no_entrants_no_skins() -> Result<(), Box<dyn std::error::Error>> {
    let mut data = league(1);
    post_total(&mut data, 1, 1, 36);
    let mut store = MemoryStore::with_season(data);
    let engine = LeagueEngine::new(&mut store, config());
    assert!(engine.skins(SEASON, 1)?.is_empty());
    Ok(())
}

#[test]
fn test_sub_rounds_count_for_the_absent_golfers_team() -> Result<(), Box<dyn std::error::Error>> {
    let (mut data, config) = halves();
    data.rounds.push(round(9, 1, 7.0, Some(2)));
    data.rounds.push(round(3, 1, 4.0, None));
    // a teammate covering a no-sub slot still counts for the team
    data.rounds.push(round(4, 3, 5.0, Some(3)));
    let index = SeasonIndex::new(&data, 36);

    let table = standings(&index, &config, None);
    let team1 = table.iter().find(|s| s.team == 1).ok_or("no team 1")?;
    let team2 = table.iter().find(|s| s.team == 2).ok_or("no team 2")?;
    assert!(approx(team1.total, 7.0));
    assert!(approx(team2.first_half, 4.0));
    assert!(approx(team2.second_half, 5.0));
    assert_eq!(table[0].team, 2);

    let through_two = standings(&index, &config, Some(2));
    let team2 = through_two.iter().find(|s| s.team == 2).ok_or("no team 2")?;
    assert!(approx(team2.total, 4.0));
    Ok(())
}

#[test]
fn test_rained_out_weeks_and_names() -> Result<(), Box<dyn std::error::Error>> {
    let (mut data, config) = halves();
    data.rounds.push(round(1, 1, 6.0, None));
    data.rounds.push(round(1, 3, 9.0, None));
    data.weeks[2].rained_out = true;
    data.teams[3].golfers.pop();
    let index = SeasonIndex::new(&data, 36);

    let table = standings(&index, &config, None);
    let team1 = table.iter().find(|s| s.team == 1).ok_or("no team 1")?;
    assert!(approx(team1.total, 6.0));
    assert_eq!(team1.name, "Golfer 1 / Golfer 2");
    let team4 = index.team(4).ok_or("no team 4")?;
    assert_eq!(team_name(&index, team4), "Team 4");
    Ok(())
}
