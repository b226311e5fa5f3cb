use std::path::PathBuf;

/// Relative directory downloads land in until the user picks another one.
pub const DEFAULT_DOWNLOAD_DIR: &str = "resultdownload_preniv";

pub const CONFIG_DIR_ENV: &str = "PRENIVDL_CONFIG_DIR";

pub trait AppPaths: Send + Sync {
    fn downloads_dir(&self) -> PathBuf;
    fn config_dir(&self) -> PathBuf;
}

pub struct CliPaths;

impl AppPaths for CliPaths {
    fn downloads_dir(&self) -> PathBuf {
        PathBuf::from(DEFAULT_DOWNLOAD_DIR)
    }

    fn config_dir(&self) -> PathBuf {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            if !dir.trim().is_empty() {
                return PathBuf::from(dir);
            }
        }
        dirs::config_dir()
            .map(|d| d.join("prenivdl"))
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
