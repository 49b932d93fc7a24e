//! Project path functions - single source of truth for all file paths.
//!
//! ## Environment Variables
//!
//! - `DATA_DIR`: Override the base data directory (default: "data")
//!
//! This allows running isolated instances side by side:
//! ```bash
//! DATA_DIR=data/test PORT=3001 cargo run
//! ```

use std::env;
use std::sync::OnceLock;

/// Lazily initialized data directory from DATA_DIR env var
static DATA_DIR_VALUE: OnceLock<String> = OnceLock::new();

/// Get the base data directory (from DATA_DIR env var or default "data")
pub fn data_dir() -> &'static str {
    DATA_DIR_VALUE.get_or_init(|| env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()))
}

/// SQLite content store path
pub fn content_db_path() -> String {
    format!("{}/content.db", data_dir())
}

/// Static assets served alongside the API (placeholder image) - not under DATA_DIR
pub const STATIC_DIR: &str = "static";

/// Placeholder asset file
pub fn placeholder_file() -> String {
    format!("{}/placeholder.svg", STATIC_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;

    // OnceLock initializes once, so only the default shape is checked

    #[test]
    fn test_data_dir_default() {
        let dir = data_dir();
        assert!(!dir.is_empty());
    }

    #[test]
    fn test_content_db_path_format() {
        assert!(content_db_path().ends_with("/content.db"));
    }

    #[test]
    fn test_placeholder_file() {
        assert_eq!(placeholder_file(), "static/placeholder.svg");
    }
}
