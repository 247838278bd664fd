//! Configuration handling for the editor

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Environment override for the data directory
pub const DATA_DIR_ENV: &str = "FORMSMITH_DATA_DIR";

/// Default origin used when building share links
pub const DEFAULT_SHARE_BASE_URL: &str = "http://localhost:3000";

/// User configuration for the editor
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EditorConfig {
    /// Directory holding saved fields, templates, shares and responses
    pub data_dir: Option<String>,
    /// Origin prepended to share links
    pub share_base_url: Option<String>,
    /// Save the field list after every settled change
    pub autosave: Option<bool>,
}

impl EditorConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("dev", "formsmith", "formsmith")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: EditorConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(self)?;
            fs::write(&path, content)?;
        }
        Ok(())
    }

    /// Resolve the data directory: environment, then config, then the
    /// platform data directory
    pub fn resolve_data_dir(&self) -> Option<PathBuf> {
        self.resolve_data_dir_with(std::env::var(DATA_DIR_ENV).ok())
    }

    fn resolve_data_dir_with(&self, env_override: Option<String>) -> Option<PathBuf> {
        env_override
            .filter(|dir| !dir.is_empty())
            .or_else(|| self.data_dir.clone())
            .map(PathBuf::from)
            .or_else(|| Self::project_dirs().map(|dirs| dirs.data_dir().to_path_buf()))
    }

    pub fn share_base_url(&self) -> &str {
        self.share_base_url
            .as_deref()
            .unwrap_or(DEFAULT_SHARE_BASE_URL)
    }

    pub fn autosave(&self) -> bool {
        self.autosave.unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EditorConfig::default();
        assert!(config.data_dir.is_none());
        assert!(config.share_base_url.is_none());
        assert!(config.autosave.is_none());
        assert!(config.autosave());
        assert_eq!(config.share_base_url(), DEFAULT_SHARE_BASE_URL);
    }

    #[test]
    fn test_serialization() {
        let config = EditorConfig {
            data_dir: Some("/tmp/forms".to_string()),
            share_base_url: Some("https://forms.example.com".to_string()),
            autosave: Some(false),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: EditorConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.data_dir, Some("/tmp/forms".to_string()));
        assert_eq!(parsed.share_base_url(), "https://forms.example.com");
        assert!(!parsed.autosave());
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: EditorConfig = serde_json::from_str("{}").unwrap();
        assert!(parsed.data_dir.is_none());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"autosave": false, "unknown_field": "value"}"#;
        let parsed: EditorConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.autosave, Some(false));
    }

    #[test]
    fn test_env_override_wins() {
        let config = EditorConfig {
            data_dir: Some("/from/config".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.resolve_data_dir_with(Some("/from/env".to_string())),
            Some(PathBuf::from("/from/env"))
        );
        assert_eq!(
            config.resolve_data_dir_with(Some(String::new())),
            Some(PathBuf::from("/from/config"))
        );
        assert_eq!(
            config.resolve_data_dir_with(None),
            Some(PathBuf::from("/from/config"))
        );
    }

    #[test]
    fn test_load_returns_default_when_no_file() {
        // Passes whether or not a config file exists
        let result = EditorConfig::load();
        assert!(result.is_ok());
    }
}
