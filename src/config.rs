use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_JELLYFIN_URL: &str = "http://jellyfin:8096";
const DEFAULT_POLL_INTERVAL: u64 = 5;
const DEFAULT_IDLE_AFTER: u64 = 30;
const DEFAULT_SETTINGS_PATH: &str = "config.json";

/// The external HTTP contract served by the process. The two `/api/now`
/// shapes are incompatible, so exactly one is mounted.
#[derive(Deserialize, clap::ValueEnum, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Flavor {
    /// Marquee with idle library slideshow, settings page and image proxy.
    #[default]
    Display,
    /// Marquee with clock times and a plain poster list.
    Classic,
}

impl Flavor {
    pub fn as_str(self) -> &'static str {
        match self {
            Flavor::Display => "display",
            Flavor::Classic => "classic",
        }
    }
}

#[derive(Deserialize, Default, Debug)]
pub struct FileConfig {
    pub jellyfin_url: Option<String>,
    pub api_key: Option<String>,
    pub user_id: Option<String>,
    pub poll_interval: Option<u64>,
    pub idle_after: Option<u64>,
    pub settings_path: Option<PathBuf>,
    pub flavor: Option<Flavor>,
    pub port: Option<u16>,
    pub localhost: Option<bool>,
}

/// Immutable runtime configuration, resolved once at startup and handed to
/// each component.
#[derive(Debug, Clone)]
pub struct Config {
    pub jellyfin_url: String,
    pub api_key: Option<String>,
    pub user_id: Option<String>,
    pub poll_interval: u64,
    pub idle_after: u64,
    pub settings_path: PathBuf,
    pub flavor: Flavor,
    pub port: u16,
    pub localhost: bool,
}

impl Config {
    pub fn resolve(file: Option<FileConfig>, args: &crate::cli::Args) -> Self {
        let file = file.unwrap_or_default();
        Config {
            jellyfin_url: args
                .jellyfin_url
                .clone()
                .or(file.jellyfin_url)
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_JELLYFIN_URL.to_string()),
            api_key: non_empty(args.api_key.clone().or(file.api_key)),
            user_id: non_empty(args.user_id.clone().or(file.user_id)),
            poll_interval: args.poll_interval.or(file.poll_interval).unwrap_or(DEFAULT_POLL_INTERVAL),
            idle_after: args.idle_after.or(file.idle_after).unwrap_or(DEFAULT_IDLE_AFTER),
            settings_path: args
                .settings
                .clone()
                .or(file.settings_path)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH)),
            flavor: args.flavor.or(file.flavor).unwrap_or_default(),
            port: args.port.or(file.port).unwrap_or(DEFAULT_PORT),
            localhost: args.localhost || file.localhost.unwrap_or(false),
        }
    }
}

// An exported-but-empty env var means "not configured".
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

pub fn find_config_file(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_owned());
    }
    let cwd_config = PathBuf::from("nowshowing.toml");
    if cwd_config.exists() {
        return Some(cwd_config);
    }
    if let Some(config_dir) = dirs::config_dir() {
        let xdg_config = config_dir.join("nowshowing").join("config.toml");
        if xdg_config.exists() {
            return Some(xdg_config);
        }
    }
    None
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

pub fn load_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: FileConfig = toml::from_str(&content)?;
    Ok(config)
}
