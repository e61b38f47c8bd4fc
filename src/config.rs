//! Configuration management for the contributions dashboard.
//!
//! Handles loading and saving configuration from JSONC files and applying
//! command-line overrides.

use crate::contributions::Direction;
use anyhow::{Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory name under the user config dir.
const APP_DIR: &str = "contrib-tui";

/// Application configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// GraphQL v2 endpoint
    pub api_url: String,
    /// Website base URL used for links and edit workflows
    pub website_url: String,
    /// Personal token sent with API requests
    pub personal_token: Option<String>,
    /// Slug of the account whose contributions are managed
    pub account_slug: String,
    /// Which contributions to list
    pub direction: Direction,
    /// Rows per page
    pub page_size: u32,
    /// Terminal width (columns) above which the table layout is used
    pub table_breakpoint: u16,
    /// HTTP request timeout in seconds
    pub request_timeout_secs: u64,
    /// Session file path (relative to config dir or absolute)
    pub session_path: String,
    /// Log file path (relative to config dir or absolute)
    pub log_path: String,
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "https://api.opencollective.com/graphql/v2".to_string(),
            website_url: "https://opencollective.com".to_string(),
            personal_token: None,
            account_slug: String::new(),
            direction: Direction::Outgoing,
            page_size: 20,
            table_breakpoint: 120,
            request_timeout_secs: 30,
            session_path: "session.json".to_string(),
            log_path: "contrib-tui.log".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file.
    ///
    /// # Arguments
    /// * `path` - Optional path to config file. If None, uses default location.
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    ///
    /// # Details
    /// Reads `$XDG_CONFIG_HOME/contrib-tui/config.jsonc` unless a path is given.
    /// If no config file exists, returns default configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_config_path()?,
        };

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: Config = serde_json::from_str(&strip_jsonc_comments(&content))
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

        Ok(config)
    }

    /// Save configuration to file, creating the parent directory if needed.
    pub fn save(&self, path: Option<&Path>) -> Result<()> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_config_path()?,
        };

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, json)
            .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

        Ok(())
    }

    /// Check the values the list view cannot work without.
    pub fn validate(&self) -> Result<()> {
        if self.account_slug.trim().is_empty() {
            return Err(anyhow::anyhow!(
                "account_slug is required (set it in config.jsonc or pass --account)"
            ));
        }
        if self.page_size == 0 {
            return Err(anyhow::anyhow!("page_size must be at least 1"));
        }
        Ok(())
    }

    /// Get default configuration file path.
    pub fn default_config_path() -> Result<PathBuf> {
        Ok(app_config_dir()?.join("config.jsonc"))
    }

    /// Resolved session file path.
    pub fn session_file_path(&self) -> Result<PathBuf> {
        resolve_in_config_dir(&self.session_path)
    }

    /// Resolved log file path.
    pub fn log_file_path(&self) -> Result<PathBuf> {
        resolve_in_config_dir(&self.log_path)
    }
}

fn app_config_dir() -> Result<PathBuf> {
    let dir = config_dir().ok_or_else(|| anyhow::anyhow!("Failed to determine config directory"))?;
    Ok(dir.join(APP_DIR))
}

/// Absolute paths are returned as-is, relative ones land in the config dir.
fn resolve_in_config_dir(raw: &str) -> Result<PathBuf> {
    let path = Path::new(raw);
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(app_config_dir()?.join(path))
    }
}

/// Strip `//` line comments that are not inside a string literal.
fn strip_jsonc_comments(content: &str) -> String {
    content
        .lines()
        .map(|line| {
            let mut in_string = false;
            let mut escaped = false;
            let mut prev_slash = false;
            for (idx, ch) in line.char_indices() {
                match ch {
                    _ if escaped => escaped = false,
                    '\\' if in_string => escaped = true,
                    '"' => in_string = !in_string,
                    '/' if !in_string && prev_slash => {
                        return line[..idx - 1].trim_end();
                    }
                    _ => {}
                }
                prev_slash = ch == '/' && !in_string;
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.account_slug.is_empty());
        assert!(config.personal_token.is_none());
        assert_eq!(config.page_size, 20);
        assert_eq!(config.direction, Direction::Outgoing);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.jsonc");

        let config = Config {
            account_slug: "webpack".to_string(),
            direction: Direction::Incoming,
            ..Config::default()
        };

        config.save(Some(&config_path)).unwrap();
        assert!(config_path.exists());

        let loaded = Config::load(Some(&config_path)).unwrap();
        assert_eq!(loaded.account_slug, "webpack");
        assert_eq!(loaded.direction, Direction::Incoming);
        assert!(loaded.validate().is_ok());
    }

    #[test]
    fn test_config_jsonc_with_comments() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.jsonc");

        let jsonc_content = r#"{
            // Account to manage
            "account_slug": "babel", // trailing comment
            "website_url": "https://opencollective.com",
            "direction": "INCOMING",
            "page_size": 10
        }"#;

        fs::write(&config_path, jsonc_content).unwrap();

        let loaded = Config::load(Some(&config_path)).unwrap();
        assert_eq!(loaded.account_slug, "babel");
        assert_eq!(loaded.website_url, "https://opencollective.com");
        assert_eq!(loaded.direction, Direction::Incoming);
        assert_eq!(loaded.page_size, 10);
    }

    #[test]
    fn test_missing_config_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let loaded = Config::load(Some(&temp_dir.path().join("absent.jsonc"))).unwrap();
        assert_eq!(loaded.table_breakpoint, 120);
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        let config = Config {
            account_slug: "webpack".to_string(),
            page_size: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_absolute_session_path_is_kept() {
        let temp_dir = TempDir::new().unwrap();
        let absolute = temp_dir.path().join("s.json");
        let config = Config {
            session_path: absolute.display().to_string(),
            ..Config::default()
        };
        assert_eq!(config.session_file_path().unwrap(), absolute);
    }
}
