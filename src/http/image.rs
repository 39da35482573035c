use axum::{
    body::Body,
    extract::{rejection::QueryRejection, Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};

use crate::http::error::ApiError;
use crate::http::state::AppState;

/// Sizing/quality parameters passed through to upstream. Anything else is dropped.
pub const FORWARDED_PARAMS: &[&str] = &["maxWidth", "maxHeight", "minWidth", "quality"];

const IMAGE_TYPE: &str = "Primary";
const FALLBACK_CONTENT_TYPE: &str = "image/jpeg";
const CACHE_CONTROL: &str = "public, max-age=86400";

/// Keep whitelisted query parameters, in request order.
pub fn forwarded_params(query: Vec<(String, String)>) -> Vec<(String, String)> {
    query
        .into_iter()
        .filter(|(key, _)| FORWARDED_PARAMS.contains(&key.as_str()))
        .collect()
}

/// Jellyfin ids are hex GUIDs, with or without dashes. Rejecting anything else keeps
/// the path from reaching other upstream endpoints with our token attached.
fn is_item_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// GET /image/{id} — stream the item's primary image from upstream.
pub async fn proxy_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query?;
    if !is_item_id(&id) {
        return Err(ApiError::BadRequest(format!("invalid item id: {}", id)));
    }

    let params = forwarded_params(query);
    let image = state.jellyfin.get_image(&id, IMAGE_TYPE, &params).await?;
    let content_type = image
        .content_type
        .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string());
    let body = Body::from_stream(image.response.bytes_stream());

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, CACHE_CONTROL.to_string()),
        ],
        body,
    )
        .into_response())
}
