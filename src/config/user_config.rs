//! User configuration for ColorSnaps
//!
//! Settings live in settings.json and may be overridden by
//! `COLORSNAPS_*` environment variables.

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::Paths;
use crate::core::DEFAULT_MAX_COLORS;
use crate::utils::network::USER_AGENT;

const ENV_PREFIX: &str = "COLORSNAPS";

/// User configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConfig {
    /// Relay templates tried in order when loading a cross-origin image.
    /// `{url}` is replaced with the encoded target.
    #[serde(default = "default_cors_relays")]
    pub cors_relays: Vec<String>,

    /// Relay used to fetch a page as raw text
    #[serde(default = "default_page_relay")]
    pub page_relay: String,

    /// Screenshot service template
    #[serde(default = "default_screenshot_endpoint")]
    pub screenshot_endpoint: String,

    #[serde(default = "default_max_colors")]
    pub max_colors: usize,

    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            cors_relays: default_cors_relays(),
            page_relay: default_page_relay(),
            screenshot_endpoint: default_screenshot_endpoint(),
            max_colors: default_max_colors(),
            max_upload_bytes: default_max_upload_bytes(),
            request_timeout_secs: default_request_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl UserConfig {
    /// Load configuration from the global settings file.
    /// Writes the defaults out when no file exists yet.
    pub fn load() -> Result<Self> {
        let paths = Paths::get()?;
        let settings_path = paths.settings_path();

        if !settings_path.exists() {
            Self::default().save()?;
        }

        Self::load_from(&settings_path)
    }

    /// Load configuration from `path` layered under the environment
    pub fn load_from(path: &Path) -> Result<Self> {
        Self::load_with_env(path, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_with_env(path: &Path, env: Environment) -> Result<Self> {
        let env = env
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("cors_relays");

        Config::builder()
            .add_source(File::from(path).format(FileFormat::Json).required(false))
            .add_source(env)
            .build()
            .with_context(|| format!("Failed to read settings from {}", path.display()))?
            .try_deserialize()
            .context("Failed to parse settings")
    }

    /// Save configuration to the global settings file
    pub fn save(&self) -> Result<()> {
        let paths = Paths::get()?;
        self.save_to(&paths.settings_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        std::fs::write(path, content).context("Failed to write settings file")?;
        Ok(())
    }
}

// Default value functions for serde

fn default_cors_relays() -> Vec<String> {
    vec![
        "https://corsproxy.io/?{url}".to_string(),
        "https://api.allorigins.win/raw?url={url}".to_string(),
    ]
}

fn default_page_relay() -> String {
    "https://api.allorigins.win/raw?url={url}".to_string()
}

fn default_screenshot_endpoint() -> String {
    "https://image.thum.io/get/width/1280/crop/800/noanimate/{url}".to_string()
}

fn default_max_colors() -> usize {
    DEFAULT_MAX_COLORS
}

fn default_max_upload_bytes() -> u64 {
    10 * 1024 * 1024
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    USER_AGENT.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn no_env() -> Environment {
        Environment::with_prefix(ENV_PREFIX).source(Some(HashMap::new()))
    }

    #[test]
    fn test_default_config() {
        let config = UserConfig::default();
        assert_eq!(config.cors_relays.len(), 2);
        assert!(config.cors_relays[0].contains("corsproxy.io"));
        assert_eq!(config.max_colors, 8);
        assert_eq!(config.max_upload_bytes, 10_485_760);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");

        let config = UserConfig::load_with_env(&path, no_env()).unwrap();
        assert_eq!(config, UserConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "max_colors": 5, "page_relay": "https://r.test/{url}" }"#)
            .unwrap();

        let config = UserConfig::load_with_env(&path, no_env()).unwrap();
        assert_eq!(config.max_colors, 5);
        assert_eq!(config.page_relay, "https://r.test/{url}");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_environment_overrides_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "max_colors": 5 }"#).unwrap();

        let vars = HashMap::from([
            ("COLORSNAPS_MAX_COLORS".to_string(), "3".to_string()),
            (
                "COLORSNAPS_CORS_RELAYS".to_string(),
                "https://a.test/{url},https://b.test/{url}".to_string(),
            ),
        ]);
        let env = Environment::with_prefix(ENV_PREFIX).source(Some(vars));

        let config = UserConfig::load_with_env(&path, env).unwrap();
        assert_eq!(config.max_colors, 3);
        assert_eq!(
            config.cors_relays,
            vec!["https://a.test/{url}", "https://b.test/{url}"]
        );
    }

    #[test]
    fn test_save_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");

        let config = UserConfig {
            max_colors: 6,
            ..UserConfig::default()
        };
        config.save_to(&path).unwrap();

        let loaded = UserConfig::load_with_env(&path, no_env()).unwrap();
        assert_eq!(loaded, config);
    }
}
