//! Display settings persisted as a small JSON document next to the server.
//!
//! The file is created lazily by the first save and overwritten wholesale on
//! every save. There is no lock: concurrent writers race and the last one wins.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct DisplaySettings {
    /// Libraries the idle slideshow draws from. Empty means every library.
    pub library_ids: BTreeSet<String>,
    /// Include TV series alongside movies in the slideshow.
    pub include_tv: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to write settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode settings: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Read the settings file. A missing, unreadable or malformed file yields the
/// defaults; only the malformed and unreadable cases are logged.
pub fn load(path: &Path) -> DisplaySettings {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return DisplaySettings::default(),
        Err(e) => {
            tracing::warn!("Cannot read settings {}: {} -- using defaults", path.display(), e);
            return DisplaySettings::default();
        }
    };
    match serde_json::from_str(&content) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("Cannot parse settings {}: {} -- using defaults", path.display(), e);
            DisplaySettings::default()
        }
    }
}

/// Overwrite the settings file with pretty-printed JSON.
pub fn save(path: &Path, settings: &DisplaySettings) -> Result<(), SettingsError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, json)?;
    tracing::debug!("Saved settings to {}", path.display());
    Ok(())
}
