use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;
use crate::error::Result;
use crate::pattern::{Pattern, PatternField};

/// Row shape a new session starts from. The round is not part of it: every
/// launch starts at round 1 unless `--round` says otherwise.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PatternPreset {
    pub standard_per_rep: u32,
    pub increased_per_rep: u32,
    pub decreased_per_rep: u32,
    pub reps_count: u32,
}

impl Default for PatternPreset {
    fn default() -> Self {
        Pattern::default().into()
    }
}

impl From<Pattern> for PatternPreset {
    fn from(p: Pattern) -> Self {
        Self {
            standard_per_rep: p.standard_per_rep,
            increased_per_rep: p.increased_per_rep,
            decreased_per_rep: p.decreased_per_rep,
            reps_count: p.reps_count,
        }
    }
}

impl PatternPreset {
    pub fn value(&self, field: PatternField) -> Option<u32> {
        match field {
            PatternField::Round => None,
            PatternField::Standard => Some(self.standard_per_rep),
            PatternField::Increased => Some(self.increased_per_rep),
            PatternField::Decreased => Some(self.decreased_per_rep),
            PatternField::Reps => Some(self.reps_count),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub pattern: PatternPreset,
    pub log_level: Option<String>,
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        if let Ok(bytes) = fs::read(&self.path) {
            match serde_json::from_slice::<Config>(&bytes) {
                Ok(cfg) => return cfg,
                Err(e) => {
                    tracing::warn!(path = %self.path.display(), error = %e, "ignoring unreadable preferences")
                }
            }
        }
        Config::default()
    }

    fn save(&self, cfg: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_default_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config::default();
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn save_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config {
            pattern: PatternPreset {
                standard_per_rep: 5,
                increased_per_rep: 0,
                decreased_per_rep: 2,
                reps_count: 12,
            },
            log_level: Some("debug".into()),
        };
        store.save(&cfg).unwrap();
        assert!(path.exists());
        assert_eq!(store.load(), cfg);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("absent.json"));
        assert_eq!(store.load(), Config::default());
    }

    #[test]
    fn malformed_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, b"{ not json").unwrap();
        assert_eq!(FileConfigStore::with_path(&path).load(), Config::default());
    }

    #[test]
    fn partial_file_fills_missing_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, br#"{ "pattern": { "reps_count": 8 } }"#).unwrap();
        let cfg = FileConfigStore::with_path(&path).load();
        assert_eq!(cfg.pattern.reps_count, 8);
        assert_eq!(cfg.pattern.standard_per_rep, 2);
        assert_eq!(cfg.log_level, None);
    }

    #[test]
    fn preset_values_skip_round() {
        let preset = PatternPreset::default();
        assert_eq!(preset.value(PatternField::Round), None);
        assert_eq!(preset.value(PatternField::Reps), Some(6));
        assert_eq!(preset.value(PatternField::Increased), Some(1));
    }
}
