pub mod config;
pub mod query;
pub mod report;
pub mod types;
pub mod utils;

pub use config::*;
pub use query::*;
pub use report::*;
pub use types::*;
pub use utils::*;
