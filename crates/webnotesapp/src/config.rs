//! # Configuration
//!
//! Webnotes configuration is managed by [`clapfig`], which handles layered loading
//! from TOML files, environment variables, and programmatic overrides.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Collection Config**: `webnotes.toml` in the collection root.
//! 2. **Global Config**: `webnotes.toml` in the OS-appropriate config directory
//!    (via `directories` crate), or `WEBNOTES_CONFIG_DIR` when set.
//! 3. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `file_ext` | `.wn` | Extension of webnote files |
//! | `index_dir` | `wn_index` | Directory the index is rebuilt into, relative to the root |
//! | `field_order` | `title, description, author, date, tags, status, error` | Fields written first, in this order |
//! | `date_format` | `%Y-%m-%d` | `chrono` format for `--today` |
//! | `http_timeout_secs` | `30` | Timeout for page fetches |

use crate::error::{Result, WebnotesError};
use chrono::format::{Item, StrftimeItems};
use confique::Config;
use serde::{Deserialize, Serialize};

use crate::serializer::DEFAULT_FIELD_ORDER;

/// Configuration for webnotes, stored in `webnotes.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct WebnotesConfig {
    /// Extension of webnote files (e.g. ".wn")
    #[config(default = ".wn")]
    pub file_ext: String,

    /// Directory for the rebuilt index, relative to the collection root
    #[config(default = "wn_index")]
    pub index_dir: String,

    /// Fields rendered first, in this order. When absent, the built-in order.
    pub field_order: Option<Vec<String>>,

    /// Format of dates written by --today
    #[config(default = "%Y-%m-%d")]
    pub date_format: String,

    /// Timeout for HTTP requests, in seconds
    #[config(default = 30)]
    pub http_timeout_secs: u64,
}

impl Default for WebnotesConfig {
    fn default() -> Self {
        Self {
            file_ext: ".wn".to_string(),
            index_dir: "wn_index".to_string(),
            field_order: None,
            date_format: "%Y-%m-%d".to_string(),
            http_timeout_secs: 30,
        }
    }
}

impl WebnotesConfig {
    /// Get the file extension, normalized to start with a dot.
    pub fn file_ext(&self) -> String {
        if self.file_ext.starts_with('.') {
            self.file_ext.clone()
        } else {
            format!(".{}", self.file_ext)
        }
    }

    pub fn field_order(&self) -> Vec<String> {
        self.field_order.clone().unwrap_or_else(|| {
            DEFAULT_FIELD_ORDER.iter().map(|s| s.to_string()).collect()
        })
    }

    /// Today's date in the configured format. An unknown specifier in
    /// `date_format` is an error.
    pub fn today(&self) -> Result<String> {
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(WebnotesError::Api(format!(
                "Invalid date_format: {}",
                self.date_format
            )));
        }
        Ok(chrono::Local::now().format(&self.date_format).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WebnotesConfig::default();
        assert_eq!(config.file_ext(), ".wn");
        assert_eq!(config.index_dir, "wn_index");
        assert_eq!(config.field_order()[0], "title");
        assert_eq!(config.field_order().len(), 7);
    }

    #[test]
    fn test_file_ext_normalization_without_dot() {
        let config = WebnotesConfig {
            file_ext: "notes".to_string(),
            ..Default::default()
        };
        assert_eq!(config.file_ext(), ".notes");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: WebnotesConfig = toml::from_str(
            r#"
index_dir = "idx"
field_order = ["author", "title"]
"#,
        )
        .unwrap();
        assert_eq!(config.index_dir, "idx");
        assert_eq!(config.field_order(), vec!["author", "title"]);
        assert_eq!(config.file_ext, ".wn");
        assert_eq!(config.http_timeout_secs, 30);
    }

    #[test]
    fn test_today_uses_format() {
        let config = WebnotesConfig {
            date_format: "%Y".to_string(),
            ..Default::default()
        };
        assert_eq!(config.today().unwrap().len(), 4);
        assert_eq!(WebnotesConfig::default().today().unwrap().len(), 10);
    }

    #[test]
    fn test_today_rejects_bad_format() {
        let config = WebnotesConfig {
            date_format: "%Q".to_string(),
            ..Default::default()
        };
        assert!(config.today().is_err());
    }
}
