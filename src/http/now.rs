use axum::{extract::State, Json};

use crate::http::error::ApiError;
use crate::http::state::AppState;
use crate::now_playing::{self, ClassicNow, NowShowing};

/// GET /api/now (display) — playing snapshot, or the idle library listing.
pub async fn now_showing(State(state): State<AppState>) -> Result<Json<NowShowing>, ApiError> {
    let config = &state.config;
    let now = now_playing::resolve(
        &state.jellyfin,
        config.user_id.as_deref(),
        &config.settings_path,
    )
    .await?;
    Ok(Json(now))
}

/// GET /api/now (classic) — `{title, poster, duration, position, end_time, start_time}`
/// or `{title: null}`.
pub async fn classic_now(State(state): State<AppState>) -> Result<Json<ClassicNow>, ApiError> {
    Ok(Json(now_playing::resolve_classic(&state.jellyfin).await?))
}

/// GET /api/library (classic) — poster URLs for every movie, ignoring display settings.
pub async fn classic_library(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    let posters =
        now_playing::classic_library(&state.jellyfin, state.config.user_id.as_deref()).await?;
    Ok(Json(posters))
}
