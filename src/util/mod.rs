//! Shared utilities: logging setup and the clipboard sink

pub mod clipboard;
pub mod logging;

pub use clipboard::copy_to_clipboard;
pub use logging::{init_from_env, init_logging, LoggingConfig};
