//! Persistence configuration

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::Error;

/// Name the whole selection table is persisted under.
pub const DEFAULT_STORAGE_KEY: &str = "selection-storage";

/// File name of the database inside the platform data directory.
const DATABASE_FILE: &str = "selections.db";

/// Platform database location for durable selections.
///
/// `$XDG_DATA_HOME/keyselect/selections.db` on Linux, the application data
/// directory elsewhere. `None` when no home directory can be found.
pub fn default_database_path() -> Option<PathBuf> {
    ProjectDirs::from("dev", "keyselect", "keyselect")
        .map(|dirs| dirs.data_dir().join(DATABASE_FILE))
}

/// Where and under which name durable selections are stored.
///
/// # Example
///
/// ```
/// use keyselect::PersistConfig;
///
/// let config = PersistConfig::default()
///     .with_storage_key("file-browser")
///     .with_path("/tmp/selections.db");
/// ```
#[derive(Debug, Clone)]
pub struct PersistConfig {
    /// Name of the single durable entry holding every selection key.
    ///
    /// Default: `"selection-storage"`
    pub storage_key: String,

    /// Database file. `None` means the platform data directory.
    pub path: Option<PathBuf>,

    /// Keep the database in memory (nothing survives a restart).
    pub in_memory: bool,
}

impl Default for PersistConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            path: None,
            in_memory: false,
        }
    }
}

impl PersistConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the storage key.
    pub fn with_storage_key(mut self, storage_key: impl Into<String>) -> Self {
        self.storage_key = storage_key.into();
        self
    }

    /// Sets the database path.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Creates a config backed by an in-memory database.
    pub fn in_memory() -> Self {
        Self {
            in_memory: true,
            ..Self::default()
        }
    }

    /// Resolve the database file, falling back to the platform data directory.
    pub fn resolve_path(&self) -> Result<PathBuf, Error> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => default_database_path().ok_or(Error::NoDataDir),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_path_wins() {
        let config = PersistConfig::new().with_path("/tmp/picks.db");
        assert_eq!(config.resolve_path().unwrap(), PathBuf::from("/tmp/picks.db"));
    }

    #[test]
    fn test_default_path_is_the_data_file() {
        if let Some(path) = default_database_path() {
            assert_eq!(path.file_name().unwrap(), DATABASE_FILE);
            assert_eq!(PersistConfig::default().resolve_path().unwrap(), path);
        }
    }
}
