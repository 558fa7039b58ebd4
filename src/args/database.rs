use std::path::Path;

use super::types::Args;
use crate::storage::{SqliteStore, StorageError};

const MEMORY_DB: &str = ":memory:";

impl Args {
    /// # Errors
    ///
    /// Will return `Err` if the database name is empty or its directory does not exist
    pub fn validate(&self) -> Result<(), String> {
        if self.db_name.trim().is_empty() {
            return Err("A database name is required".to_string());
        }
        if self.db_name != MEMORY_DB {
            let parent = Path::new(&self.db_name).parent();
            if let Some(dir) = parent.filter(|d| !d.as_os_str().is_empty()) {
                if !dir.is_dir() {
                    return Err(format!(
                        "The directory for database '{}' does not exist.",
                        self.db_name
                    ));
                }
            }
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Will return `Err` if the database cannot be opened or its schema cannot be created
    pub fn open_store(&self) -> Result<SqliteStore, StorageError> {
        if self.db_name == MEMORY_DB {
            SqliteStore::open_in_memory()
        } else {
            SqliteStore::open(&self.db_name)
        }
    }
}
