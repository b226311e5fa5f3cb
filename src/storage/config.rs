use std::path::{Path, PathBuf};

use crate::models::settings::AppSettings;
use prenivdl_core::fs_paths::{AppPaths, CliPaths};

const STORE_FILE: &str = "settings.json";

pub fn settings_path() -> PathBuf {
    CliPaths.config_dir().join(STORE_FILE)
}

/// Missing or unreadable files yield defaults; an unparsable file is left
/// untouched and also yields defaults.
pub fn load_settings(path: &Path) -> AppSettings {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(_) => return AppSettings::default(),
    };

    match serde_json::from_str::<AppSettings>(&raw) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("Ignoring invalid settings at {}: {}", path.display(), e);
            AppSettings::default()
        }
    }
}

pub fn save_settings(path: &Path, settings: &AppSettings) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Loads the user's settings, writing a default file on first run.
pub fn load_or_init() -> AppSettings {
    let path = settings_path();
    if !path.exists() {
        let settings = AppSettings::default();
        if let Err(e) = save_settings(&path, &settings) {
            tracing::debug!("Could not create {}: {}", path.display(), e);
        }
        return settings;
    }
    load_settings(&path)
}
