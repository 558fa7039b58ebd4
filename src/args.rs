pub mod database;
pub mod types;
pub mod validation;

use clap::Parser;

use crate::error::LeagueError;
use crate::model::LeagueConfig;

pub use types::{Args, Command, EventKind};

/// # Errors
///
/// Will return `Err` if the arguments do not pass validation
pub fn args_checks() -> Result<Args, String> {
    let args = Args::parse();
    args.validate()?;
    Ok(args)
}

impl Args {
    /// League config from `--config`, or the defaults.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the config json does not describe a league config
    pub fn league_config(&self) -> Result<LeagueConfig, LeagueError> {
        match &self.config {
            Some(json) => {
                LeagueConfig::from_json(json).map_err(|e| LeagueError::Config(e.to_string()))
            }
            None => Ok(LeagueConfig::default()),
        }
    }
}
