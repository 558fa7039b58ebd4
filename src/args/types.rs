use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;

use crate::controller::triggers::LeagueEvent;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// The sqlite filename, or :memory: for a throwaway database.
    #[arg(short = 'n', long, value_name = "DATABASE_NAME", default_value = ":memory:")]
    pub db_name: String,
    /// If specified, the seasons in this json are written to the database on startup.
    #[arg(
        long,
        value_name = "DATABASE_POPULATE_JSON",
        value_parser = crate::args::validation::check_readable_file_and_json
    )]
    pub db_populate_json: Option<Value>,
    /// League config json (handicap rules, half split, playoff slots, draw seed).
    #[arg(
        short = 'c',
        long,
        value_name = "CONFIG_JSON",
        value_parser = crate::args::validation::check_readable_json
    )]
    pub config: Option<Value>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Recompute and store every handicap of a season.
    RecomputeHandicaps {
        #[arg(long)]
        season: i32,
    },
    /// Rebuild golfer matchups, points and rounds for one week.
    RegeneratePairings {
        #[arg(long)]
        season: i32,
        #[arg(long)]
        week: i32,
    },
    /// Recompute handicaps and rebuild every played week through this one.
    ProcessWeek {
        #[arg(long)]
        season: i32,
        #[arg(long)]
        week: i32,
    },
    SeedPlayoffs {
        #[arg(long)]
        season: i32,
        /// Defaults to the configured number of playoff slots.
        #[arg(long)]
        slots: Option<usize>,
    },
    Standings {
        #[arg(long)]
        season: i32,
        #[arg(long)]
        through_week: Option<i32>,
    },
    Skins {
        #[arg(long)]
        season: i32,
        #[arg(long)]
        week: i32,
    },
    /// Report what a schedule, sub or score change to a week should trigger.
    CheckTrigger {
        #[arg(long)]
        season: i32,
        #[arg(long)]
        week: i32,
        #[arg(long, value_enum)]
        event: EventKind,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Schedule,
    Sub,
    Score,
}

impl From<EventKind> for LeagueEvent {
    fn from(kind: EventKind) -> Self {
        match kind {
            EventKind::Schedule => LeagueEvent::ScheduleChanged,
            EventKind::Sub => LeagueEvent::SubChanged,
            EventKind::Score => LeagueEvent::ScorePosted,
        }
    }
}
