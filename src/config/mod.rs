use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    errors::ConfigError,
    utils::{ensure_dir, persistence::write_atomic},
};

pub const HOME_ENV: &str = "EXPENSE_CATEGORIZER_HOME";
const DEFAULT_DIR_NAME: &str = ".expense_categorizer";
const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";

pub const DEFAULT_MAX_EDIT_DISTANCE: usize = 2;
pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// Runtime settings for the categorizer and its CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub extractor_path: PathBuf,
    pub classifier_path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dictionary_path: Option<PathBuf>,
    pub ledger_path: PathBuf,
    pub owner: String,
    pub max_edit_distance: usize,
    pub recent_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extractor_path: PathBuf::from("models/extractor.json"),
            classifier_path: PathBuf::from("models/classifier.json"),
            dictionary_path: None,
            ledger_path: PathBuf::from("ledger.json"),
            owner: "local".into(),
            max_edit_distance: DEFAULT_MAX_EDIT_DISTANCE,
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }
}

impl Config {
    /// Returns a copy whose relative paths are anchored at `base`.
    pub fn resolved_against(&self, base: &Path) -> Config {
        let anchor = |path: &Path| {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                base.join(path)
            }
        };
        Config {
            extractor_path: anchor(&self.extractor_path),
            classifier_path: anchor(&self.classifier_path),
            dictionary_path: self.dictionary_path.as_deref().map(anchor),
            ledger_path: anchor(&self.ledger_path),
            ..self.clone()
        }
    }
}

/// Resolves the application data directory.
pub struct PathResolver;

impl PathResolver {
    /// `EXPENSE_CATEGORIZER_HOME` when set, otherwise `~/.expense_categorizer`.
    pub fn base_dir() -> PathBuf {
        if let Some(custom) = env::var_os(HOME_ENV) {
            return PathBuf::from(custom);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        base.join(CONFIG_DIR).join(CONFIG_FILE)
    }
}

/// Loads and saves [`Config`] under the application data directory.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_base_dir(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        ensure_dir(&base)?;
        let path = PathResolver::config_file_in(&base);
        Ok(Self { base, path })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Config, ConfigError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    /// Loads the configuration with every relative path anchored at the base directory.
    pub fn load_resolved(&self) -> Result<Config, ConfigError> {
        Ok(self.load()?.resolved_against(&self.base))
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_returns_defaults_when_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        assert_eq!(manager.load().unwrap(), Config::default());
    }

    #[test]
    fn save_then_load_preserves_settings() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let config = Config {
            owner: "asha".into(),
            dictionary_path: Some(PathBuf::from("models/dictionary.json")),
            max_edit_distance: 1,
            ..Config::default()
        };
        manager.save(&config).unwrap();
        assert_eq!(manager.load().unwrap(), config);
    }

    #[test]
    fn partial_config_files_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        write_atomic(manager.path(), r#"{ "owner": "ravi" }"#).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config.owner, "ravi");
        assert_eq!(config.recent_limit, DEFAULT_RECENT_LIMIT);
    }

    #[test]
    fn resolved_paths_are_anchored_at_base() {
        let config = Config {
            classifier_path: PathBuf::from("/opt/models/classifier.json"),
            ..Config::default()
        };
        let resolved = config.resolved_against(Path::new("/home/app"));
        assert_eq!(
            resolved.extractor_path,
            PathBuf::from("/home/app/models/extractor.json")
        );
        assert_eq!(
            resolved.classifier_path,
            PathBuf::from("/opt/models/classifier.json")
        );
        assert_eq!(resolved.ledger_path, PathBuf::from("/home/app/ledger.json"));
    }
}
