mod common;

use common::*;
use rusty_league::controller::handicap::{compute_handicap, season_handicaps};
use rusty_league::model::{Handicap, HandicapRules, SeasonIndex, WeekId};

fn value_at(handicaps: &[Handicap], golfer: i64, week: WeekId) -> Option<f64> {
    handicaps
        .iter()
        .find(|h| h.golfer == golfer && h.week == week)
        .map(|h| h.value)
}

#[test]
fn test_prior_weeks_drop_best_and_worst() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let mut data = league(6);
    for (number, delta) in (1..=5).zip([20, 15, 10, 5, 0]) {
        post_total(&mut data, 1, number, 36 + delta);
    }
    let index = SeasonIndex::new(&data, 36);
    let week6 = data.week_by_number(6).ok_or("no week 6")?;

    // 0 and 20 are dropped, mean of 5, 10, 15 is 10, times 0.8
    let value = compute_handicap(&index, 1, week6, &HandicapRules::member());
    assert!(approx(value, 8.0), "got {value}");

    // four qualifying weeks: no drop, mean 12.5
    let week5 = data.week_by_number(5).ok_or("no week 5")?;
    let value = compute_handicap(&index, 1, week5, &HandicapRules::member());
    assert!(approx(value, 10.0), "got {value}");
    Ok(())
}

#[test]
fn test_incomplete_weeks_do_not_qualify() -> Result<(), Box<dyn std::error::Error>> {
    let mut data = league(3);
    post_total(&mut data, 1, 1, 46);
    // only eight holes in week 2
    post_nine(&mut data, 1, 2, [4, 4, 4, 4, 4, 4, 4, 4, 4]);
    data.scores.pop();
    let index = SeasonIndex::new(&data, 36);
    let week3 = data.week_by_number(3).ok_or("no week 3")?;

    let value = compute_handicap(&index, 1, week3, &HandicapRules::member());
    assert!(approx(value, 8.0), "got {value}");
    Ok(())
}

#[test]
fn test_established_weeks_share_one_value() -> Result<(), Box<dyn std::error::Error>> {
    let mut data = league(5);
    for (number, delta) in (1..=3).zip([10, 5, 0]) {
        post_total(&mut data, 1, number, 36 + delta);
    }
    let index = SeasonIndex::new(&data, 36);
    let handicaps = season_handicaps(&index, &config());

    // mean of 10, 5, 0 is 5, times 0.8
    for number in 1..=4 {
        let value = value_at(&handicaps, 1, week_id(number)).ok_or("missing handicap")?;
        assert!(approx(value, 4.0), "week {number}: {value}");
    }
    Ok(())
}

#[test]
fn test_prior_only_after_establishment() -> Result<(), Box<dyn std::error::Error>> {
    let mut data = league(6);
    for (number, delta) in (1..=4).zip([10, 5, 0, 20]) {
        post_total(&mut data, 1, number, 36 + delta);
    }
    let index = SeasonIndex::new(&data, 36);
    let handicaps = season_handicaps(&index, &config());

    // week 4 still looks only at weeks 1 to 3
    let week4 = value_at(&handicaps, 1, week_id(4)).ok_or("missing handicap")?;
    assert!(approx(week4, 4.0), "got {week4}");
    // week 5 sees all four: mean 8.75, times 0.8
    let week5 = value_at(&handicaps, 1, week_id(5)).ok_or("missing handicap")?;
    assert!(approx(week5, 7.0), "got {week5}");
    // the established weeks were not touched by week 4's score
    let week1 = value_at(&handicaps, 1, week_id(1)).ok_or("missing handicap")?;
    assert!(approx(week1, 4.0), "got {week1}");
    Ok(())
}

#[test]
fn test_golfer_without_history_is_zero() -> Result<(), Box<dyn std::error::Error>> {
    let mut data = league(3);
    post_total(&mut data, 1, 1, 40);
    let index = SeasonIndex::new(&data, 36);
    let handicaps = season_handicaps(&index, &config());

    for number in 1..=3 {
        assert_eq!(value_at(&handicaps, 3, week_id(number)), Some(0.0));
    }
    // one row per relevant golfer and week: eight members
    assert_eq!(handicaps.len(), 8 * 3);
    Ok(())
}

#[test]
fn test_sub_establishes_after_one_week() -> Result<(), Box<dyn std::error::Error>> {
    let mut data = league(3);
    add_sub(&mut data, 1, 1, Some(9), false);
    post_total(&mut data, 9, 1, 41);
    let index = SeasonIndex::new(&data, 36);
    let handicaps = season_handicaps(&index, &config());

    for number in 1..=3 {
        let value = value_at(&handicaps, 9, week_id(number)).ok_or("missing handicap")?;
        assert!(approx(value, 4.0), "week {number}: {value}");
    }
    Ok(())
}
