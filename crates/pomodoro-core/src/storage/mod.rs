pub mod config;
pub mod profile;
pub mod store;

pub use config::Config;
pub use profile::{
    merge_and_save, today_key, DayRecord, SettingField, SettingUpdate, Settings, UserProfile,
    DATE_FORMAT, DEFAULT_USER,
};
pub use store::{load_or_create, JsonStore, MemoryStore, ProfileStore};

use std::path::{Path, PathBuf};

use crate::error::StorageError;

/// Returns `~/.config/cli-pomodoro[-dev]/` based on CLI_POMODORO_ENV, or
/// `override_dir` when one is given. The directory is created if missing.
///
/// Set CLI_POMODORO_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir(override_dir: Option<&Path>) -> Result<PathBuf, StorageError> {
    let dir = match override_dir {
        Some(dir) => dir.to_path_buf(),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("CLI_POMODORO_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("cli-pomodoro-dev")
            } else {
                base_dir.join("cli-pomodoro")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StorageError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
