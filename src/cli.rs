use clap::Parser;
use std::path::PathBuf;

use crate::config::Flavor;

#[derive(Parser, Debug, Default)]
#[command(
    name = "nowshowing",
    about = "Now-playing marquee backend for Jellyfin — point it at your server and open a browser",
    long_about = None,
    version,
)]
pub struct Args {
    /// Base URL of the Jellyfin server [default: http://jellyfin:8096]
    #[arg(long, env = "JELLYFIN_URL")]
    pub jellyfin_url: Option<String>,

    /// API key sent as X-Emby-Token on every upstream request
    #[arg(long, env = "JELLYFIN_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Jellyfin user whose libraries are listed
    #[arg(long, env = "JELLYFIN_USER_ID")]
    pub user_id: Option<String>,

    /// Seconds between front-end polls of /api/now [default: 5]
    #[arg(long, env = "POLL_INTERVAL")]
    pub poll_interval: Option<u64>,

    /// Seconds of idleness before the display switches to the library slideshow [default: 30]
    #[arg(long, env = "IDLE_SWITCH_SECONDS")]
    pub idle_after: Option<u64>,

    /// JSON file holding the selected libraries [default: config.json]
    #[arg(long, env = "CONFIG_PATH", value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Which HTTP contract to serve [default: display]
    #[arg(long, env = "NOWSHOWING_FLAVOR", value_enum)]
    pub flavor: Option<Flavor>,

    /// HTTP port to listen on [default: 5000]
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// Path to TOML config file (overrides default search: ./nowshowing.toml, ~/.config/nowshowing/config.toml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Bind to localhost only (127.0.0.1) instead of all interfaces (0.0.0.0)
    #[arg(long)]
    pub localhost: bool,
}
