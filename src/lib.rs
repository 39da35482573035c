//! Now-playing marquee backend — poll Jellyfin sessions and republish a simplified view.

pub mod cli;
pub mod config;
pub mod http;
pub mod jellyfin;
pub mod now_playing;
pub mod settings;
