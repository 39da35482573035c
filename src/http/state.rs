use std::sync::Arc;

use crate::config::Config;
use crate::jellyfin::Jellyfin;

/// Shared application state injected into all route handlers via axum::extract::State.
/// Nothing in here changes after startup; the settings file is the only mutable resource
/// and it is read from disk on demand.
#[derive(Clone)]
pub struct AppState {
    pub jellyfin: Jellyfin,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(jellyfin: Jellyfin, config: Config) -> Self {
        Self {
            jellyfin,
            config: Arc::new(config),
        }
    }
}
