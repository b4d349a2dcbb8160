pub mod clipboard;
pub mod config;
pub mod path_processing;

pub use clipboard::{ClipboardError, ClipboardSink, SystemClipboard};
pub use config::{API_BASE_ENV, CONFIG_PATH_ENV, ConfigError, ConfigSource, DEFAULT_API_BASE, QuillConfig};
pub use path_processing::{APP_DIR_NAME, LOG_PATH_ENV, config_file_path, expand_tilde, log_file_path};
