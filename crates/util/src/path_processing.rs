use std::env;
use std::path::PathBuf;

use dirs_next::{config_dir, data_local_dir, home_dir};

/// Directory name used under the platform config/data directories.
pub const APP_DIR_NAME: &str = "quill";

/// Environment variable overriding the TUI log file path.
pub const LOG_PATH_ENV: &str = "QUILL_LOG_PATH";

const LOG_FILE_NAME: &str = "quill.log";

pub fn expand_tilde(path: &str) -> PathBuf {
    let p = path.trim();
    if p == "~" {
        return home_dir().unwrap_or_else(|| PathBuf::from("~"));
    }
    if let Some(rest) = p.strip_prefix("~/") {
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }
    if let Some(rest) = p.strip_prefix("~\\") {
        // Windows-style
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }
    PathBuf::from(p)
}

/// `<config dir>/quill/<file_name>`, falling back to the working directory.
pub fn config_file_path(file_name: &str) -> PathBuf {
    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
        .join(file_name)
}

/// Where the TUI writes tracing output.
///
/// `QUILL_LOG_PATH` wins when set and non-empty; otherwise the file lives in
/// the platform's local data directory.
pub fn log_file_path() -> PathBuf {
    if let Ok(path) = env::var(LOG_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return expand_tilde(trimmed);
        }
    }

    data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
        .join(LOG_FILE_NAME)
}
