pub mod args;
pub mod error;
pub mod model;
pub mod storage;
pub mod controller {
    pub mod db_prefill;
    pub mod handicap;
    pub mod pairing;
    pub mod playoffs;
    pub mod points;
    pub mod season;
    pub mod skins;
    pub mod standings;
    pub mod triggers;
    pub mod weeks;
}

pub use controller::season::LeagueEngine;
pub use error::LeagueError;
