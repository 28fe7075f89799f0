use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("", "", "stitchcount")
            .map(|pd| pd.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from("stitchcount_config.json"))
    }

    pub fn log_path() -> PathBuf {
        if let Ok(home) = std::env::var("HOME") {
            PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("stitchcount")
                .join("stitchcount.log")
        } else {
            ProjectDirs::from("", "", "stitchcount")
                .map(|pd| pd.data_local_dir().join("stitchcount.log"))
                .unwrap_or_else(|| PathBuf::from("stitchcount.log"))
        }
    }
}
