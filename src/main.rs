use log::info;
use rusty_league::args::{self, Command};
use rusty_league::controller::db_prefill;
use rusty_league::LeagueEngine;
use serde::Serialize;

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = match args::args_checks() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    let config = args.league_config()?;
    let mut store = args.open_store()?;

    if let Some(json) = &args.db_populate_json {
        let seasons = db_prefill::db_prefill(json, &mut store)?;
        info!("prefilled {seasons} season(s) into {}", args.db_name);
    }

    let mut engine = LeagueEngine::new(&mut store, config);
    match args.command {
        Command::RecomputeHandicaps { season } => {
            print_json(&engine.recompute_handicaps(season)?)?;
        }
        Command::RegeneratePairings { season, week } => {
            print_json(&engine.regenerate_pairings(season, week)?)?;
        }
        Command::ProcessWeek { season, week } => {
            print_json(&engine.process_week(season, week)?)?;
        }
        Command::SeedPlayoffs { season, slots } => {
            print_json(&engine.seed_playoffs(season, slots)?)?;
        }
        Command::Standings {
            season,
            through_week,
        } => {
            print_json(&engine.standings(season, through_week)?)?;
        }
        Command::Skins { season, week } => {
            print_json(&engine.skins(season, week)?)?;
        }
        Command::CheckTrigger {
            season,
            week,
            event,
        } => {
            print_json(&engine.check_trigger(season, week, event.into())?)?;
        }
    }
    Ok(())
}
