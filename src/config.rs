use std::env;
use std::path::PathBuf;

use crate::storage::StorageError;

/// Environment variable overriding where the log store lives.
pub const DATA_DIR_VAR: &str = "DAYBOOK_DATA_DIR";

/// Default `tracing` filter when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "daybook=warn";

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding the log store.
    pub data_dir: PathBuf,
}

impl Config {
    /// Loads configuration from the environment.
    ///
    /// A `.env` file in the working directory is read first if present.
    /// `DAYBOOK_DATA_DIR` wins; otherwise the platform data directory is used
    /// (`~/.local/share/daybook` on Linux).
    pub fn from_env() -> Result<Self, StorageError> {
        dotenvy::dotenv().ok();
        Self::resolve(env::var_os(DATA_DIR_VAR).map(PathBuf::from), dirs::data_dir())
    }

    fn resolve(
        override_dir: Option<PathBuf>,
        platform_dir: Option<PathBuf>,
    ) -> Result<Self, StorageError> {
        let data_dir = match override_dir.filter(|p| !p.as_os_str().is_empty()) {
            Some(dir) => dir,
            None => platform_dir.ok_or(StorageError::NoDataDir)?.join("daybook"),
        };
        Ok(Self { data_dir })
    }
}
