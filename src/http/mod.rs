pub mod error;
pub mod image;
pub mod index;
pub mod now;
pub mod settings_form;
pub mod state;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::config::Flavor;
use crate::http::state::AppState;

/// Mount the routes of the configured flavor. The two `/api/now` shapes never
/// coexist in one router.
pub fn build_router(state: AppState) -> Router {
    let router = Router::new().route("/", get(index::index));
    let router = match state.config.flavor {
        Flavor::Display => router
            .route("/api/now", get(now::now_showing))
            .route(
                "/config",
                get(settings_form::show_settings).post(settings_form::update_settings),
            )
            .route("/image/{id}", get(image::proxy_image)),
        Flavor::Classic => router
            .route("/api/now", get(now::classic_now))
            .route("/api/library", get(now::classic_library)),
    };
    router.layer(TraceLayer::new_for_http()).with_state(state)
}
