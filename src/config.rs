use crate::error::{VoxError, VoxResult};
use crate::utils::fuzzy::{validate_cutoff, Scorer};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // Language
    pub lang: String,

    // Matching
    pub match_cutoff: f64,
    pub max_matches: usize,
    pub scorer: Scorer,

    // Meta
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lang: crate::i18n::FALLBACK_LANG.to_string(),
            match_cutoff: 0.6,
            max_matches: 3,
            scorer: Scorer::Ratio,
            log_level: "INFO".to_string(),
        }
    }
}

impl Config {
    /// Load config from the default path, or use defaults
    pub fn load() -> VoxResult<Self> {
        Self::load_from(&config_path())
    }

    /// Load config from `path`; a missing file yields the defaults
    pub fn load_from(path: &Path) -> VoxResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        match serde_json::from_str::<Self>(&content) {
            Ok(config) => match config.validate() {
                Ok(()) => Ok(config),
                Err(e) => {
                    // Out-of-range values: keep the file, run on defaults
                    tracing::warn!("⚠️ Config file has invalid values, using defaults: {}", e);
                    Ok(Self::default())
                }
            },
            Err(e) => {
                // Graceful degradation: log warning and use defaults
                tracing::warn!("⚠️ Config file corrupted or invalid, using defaults: {}", e);
                // Backup corrupt file for debugging
                let backup_path = path.with_extension("json.corrupt");
                let _ = std::fs::rename(path, &backup_path);
                Ok(Self::default())
            }
        }
    }

    /// Save config to the default path
    pub fn save(&self) -> VoxResult<()> {
        self.save_to(&config_path())
    }

    /// Save config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> VoxResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check value ranges
    pub fn validate(&self) -> VoxResult<()> {
        validate_cutoff(self.match_cutoff).map_err(|_| {
            VoxError::Config(format!(
                "match_cutoff must be in range [0.0, 1.0], got {}",
                self.match_cutoff
            ))
        })?;
        if self.max_matches == 0 {
            return Err(VoxError::Config("max_matches must be at least 1".to_string()));
        }
        Ok(())
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("voxparse")
        .join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.lang, "en-us");
        assert_eq!(config.match_cutoff, 0.6);
        assert_eq!(config.max_matches, 3);
        assert_eq!(config.scorer, Scorer::Ratio);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config {
            scorer: Scorer::JaroWinkler,
            ..Config::default()
        };
        let json = serde_json::to_string(&config).expect("Failed to serialize");
        assert!(json.contains("\"jaro_winkler\""));
        let restored: Config = serde_json::from_str(&json).expect("Failed to deserialize");
        assert_eq!(config, restored);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let restored: Config = serde_json::from_str(r#"{"lang": "de"}"#).unwrap();
        assert_eq!(restored.lang, "de");
        assert_eq!(restored.max_matches, 3);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.json");

        let config = Config {
            lang: "pt-br".to_string(),
            match_cutoff: 0.75,
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_corrupt_json_handling() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not valid json").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(!path.exists());
        assert!(dir.path().join("config.json.corrupt").exists());
    }

    #[test]
    fn test_out_of_range_values_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"match_cutoff": 1.5}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config, Config::default());
        // Only unparseable files are moved aside
        assert!(path.exists());
        assert!(!dir.path().join("config.json.corrupt").exists());

        let config = Config {
            max_matches: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(VoxError::Config(_))));
    }
}
