#![allow(dead_code)]

use chrono::NaiveDate;
use rusty_league::model::{
    Golfer, GolferId, Handicap, Hole, LeagueConfig, Matchup, Score, Season, SeasonData, Sub, Team,
    TeamId, Week, WeekId,
};

pub const SEASON: i32 = 2024;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Week ids differ from week numbers so mixing them up shows in tests.
pub fn week_id(number: i32) -> WeekId {
    i64::from(number) * 10
}

/// Seeded draws so virtual pairings are repeatable.
pub fn config() -> LeagueConfig {
    LeagueConfig {
        draw_seed: Some(7),
        ..LeagueConfig::default()
    }
}

/// Eight golfers on four teams (1-2, 3-4, 5-6, 7-8), an 18 hole course of
/// par fours, and `weeks` weeks alternating front (odd) and back (even).
/// Nothing is scheduled.
pub fn league(weeks: i32) -> SeasonData {
    let golfers = (1..=9)
        .map(|id| Golfer {
            id,
            name: format!("Golfer {id}"),
        })
        .collect();
    let teams = (1..=4)
        .map(|id| Team {
            id,
            season: SEASON,
            golfers: vec![id * 2 - 1, id * 2],
        })
        .collect();
    let holes = (1..=18)
        .map(|number| Hole {
            id: i64::from(number),
            season: SEASON,
            number,
            par: 4,
            handicap: number,
            handicap9: if number <= 9 { number } else { number - 9 },
            yards: 350,
        })
        .collect();
    let start = NaiveDate::from_ymd_opt(SEASON, 4, 2).unwrap_or_default();
    let weeks = (1..=weeks)
        .map(|number| Week {
            id: week_id(number),
            season: SEASON,
            number,
            date: start + chrono::Duration::days(7 * i64::from(number - 1)),
            is_front: number % 2 == 1,
            rained_out: false,
            num_scores: 0,
        })
        .collect();
    SeasonData {
        season: Season { year: SEASON },
        golfers,
        weeks,
        teams,
        holes,
        ..SeasonData::default()
    }
}

pub fn schedule(data: &mut SeasonData, number: i32, pairs: &[(TeamId, TeamId)]) {
    for (i, (t1, t2)) in pairs.iter().enumerate() {
        data.matchups.push(Matchup {
            id: week_id(number) + i as i64 + 1,
            week: week_id(number),
            teams: vec![*t1, *t2],
        });
    }
}

fn hole_ids(number: i32) -> std::ops::RangeInclusive<i64> {
    if number % 2 == 1 { 1..=9 } else { 10..=18 }
}

pub fn post_nine(data: &mut SeasonData, golfer: GolferId, number: i32, strokes: [i32; 9]) {
    for (hole, score) in hole_ids(number).zip(strokes) {
        data.scores.push(Score {
            golfer,
            week: week_id(number),
            hole,
            score,
        });
    }
}

/// Posts a full nine adding up to `total`, spread as evenly as possible.
pub fn post_total(data: &mut SeasonData, golfer: GolferId, number: i32, total: i32) {
    let mut strokes = [total / 9; 9];
    for s in strokes.iter_mut().take((total % 9) as usize) {
        *s += 1;
    }
    post_nine(data, golfer, number, strokes);
}

pub fn add_sub(
    data: &mut SeasonData,
    number: i32,
    absent: GolferId,
    sub: Option<GolferId>,
    no_sub: bool,
) {
    data.subs.push(Sub {
        week: week_id(number),
        absent_golfer: absent,
        sub_golfer: sub,
        no_sub,
    });
}

pub fn set_handicap(data: &mut SeasonData, golfer: GolferId, number: i32, value: f64) {
    data.handicaps.push(Handicap {
        golfer,
        week: week_id(number),
        value,
    });
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
