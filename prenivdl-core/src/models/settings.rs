use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::fs_paths::{AppPaths, CliPaths, DEFAULT_DOWNLOAD_DIR};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    #[serde(default)]
    pub download: DownloadSettings,
    #[serde(default)]
    pub providers: ProviderSettings,
    #[serde(default)]
    pub proxy: ProxySettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadSettings {
    #[serde(default = "default_output_dir")]
    pub default_output_dir: PathBuf,
    /// Size guard applied to audio variants. `None` disables it.
    #[serde(default = "default_max_audio_size_bytes")]
    pub max_audio_size_bytes: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSettings {
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_output_dir() -> PathBuf {
    CliPaths.downloads_dir()
}

fn default_max_audio_size_bytes() -> Option<u64> {
    Some(35 * 1024 * 1024)
}

pub fn default_api_base() -> String {
    "https://api.siputzx.my.id".into()
}

impl Default for DownloadSettings {
    fn default() -> Self {
        Self {
            default_output_dir: default_output_dir(),
            max_audio_size_bytes: default_max_audio_size_bytes(),
        }
    }
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxySettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_proxy_type")]
    pub proxy_type: String,
    #[serde(default)]
    pub host: String,
    #[serde(default = "default_proxy_port")]
    pub port: u16,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

fn default_proxy_type() -> String {
    "http".into()
}

fn default_proxy_port() -> u16 {
    8080
}

impl Default for ProxySettings {
    fn default() -> Self {
        Self {
            enabled: false,
            proxy_type: default_proxy_type(),
            host: String::new(),
            port: default_proxy_port(),
            username: String::new(),
            password: String::new(),
        }
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            download: DownloadSettings::default(),
            providers: ProviderSettings::default(),
            proxy: ProxySettings::default(),
        }
    }
}

/// The active download directory.
///
/// Owned by whoever drives the pipeline and passed by reference into every
/// invocation; the download step reads it once, when the transfer starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadPathConfig {
    current: PathBuf,
}

impl DownloadPathConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            current: path.into(),
        }
    }

    pub fn current(&self) -> &Path {
        &self.current
    }

    pub fn set(&mut self, path: impl Into<PathBuf>) {
        self.current = path.into();
    }
}

impl Default for DownloadPathConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DOWNLOAD_DIR)
    }
}

impl From<&DownloadSettings> for DownloadPathConfig {
    fn from(settings: &DownloadSettings) -> Self {
        Self::new(settings.default_output_dir.clone())
    }
}
