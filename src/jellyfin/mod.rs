//! Minimal Jellyfin REST client: sessions, user views, items and images.

pub mod model;

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::jellyfin::model::{Item, Library, QueryResult, Session};

/// Fixed per-call timeout. There are no retries; the front-end polls again.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const TOKEN_HEADER: &str = "X-Emby-Token";
const USER_AGENT: &str = concat!("nowshowing/", env!("CARGO_PKG_VERSION"));
const NO_QUERY: &[(&str, &str)] = &[];

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("upstream unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream returned status {code} for {path}")]
    Status { code: u16, path: String },

    #[error("invalid upstream response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Filter for `get_items`. Without a user the server-wide `/Items` endpoint
/// is queried.
#[derive(Debug, Clone, Default)]
pub struct ItemFilter {
    pub user_id: Option<String>,
    pub include_types: Vec<&'static str>,
    pub parent_id: Option<String>,
    pub limit: Option<usize>,
}

impl ItemFilter {
    fn path(&self) -> String {
        match &self.user_id {
            Some(user_id) => format!("/Users/{}/Items", user_id),
            None => "/Items".to_string(),
        }
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("Recursive", "true".to_string()),
            ("SortBy", "SortName".to_string()),
        ];
        if !self.include_types.is_empty() {
            query.push(("IncludeItemTypes", self.include_types.join(",")));
        }
        if let Some(parent_id) = &self.parent_id {
            query.push(("ParentId", parent_id.clone()));
        }
        if let Some(limit) = self.limit {
            query.push(("Limit", limit.to_string()));
        }
        query
    }
}

/// A streaming image response from upstream.
pub struct UpstreamImage {
    pub content_type: Option<String>,
    pub response: Response,
}

#[derive(Debug, Clone)]
pub struct Jellyfin {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl Jellyfin {
    pub fn new(base_url: &str, token: Option<&str>) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.map(str::to_string),
        })
    }

    /// All sessions in upstream order, idle ones included.
    pub async fn get_sessions(&self) -> Result<Vec<Session>, UpstreamError> {
        let values: Vec<Value> = self.get_json("/Sessions", NO_QUERY).await?;
        Ok(model::parse_list(values))
    }

    /// Top-level library folders visible to `user_id`.
    pub async fn get_user_views(&self, user_id: &str) -> Result<Vec<Library>, UpstreamError> {
        let path = format!("/Users/{}/Views", user_id);
        let result: QueryResult<Library> = self.get_json(&path, NO_QUERY).await?;
        Ok(result.items)
    }

    pub async fn get_items(&self, filter: &ItemFilter) -> Result<Vec<Item>, UpstreamError> {
        let result: QueryResult<Item> = self.get_json(&filter.path(), &filter.query()).await?;
        Ok(result.items)
    }

    /// Fetch an item image. The body is not read here so callers can stream it.
    pub async fn get_image(
        &self,
        item_id: &str,
        image_type: &str,
        params: &[(String, String)],
    ) -> Result<UpstreamImage, UpstreamError> {
        let path = format!("/Items/{}/Images/{}", item_id, image_type);
        let response = self.send(&path, params).await?;
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        Ok(UpstreamImage { content_type, response })
    }

    /// Absolute poster URL with the token embedded, for clients that load
    /// images straight from the media server.
    pub fn poster_url(&self, item_id: &str) -> String {
        format!(
            "{}/Items/{}/Images/Primary?api_key={}",
            self.base_url,
            item_id,
            self.token.as_deref().unwrap_or_default()
        )
    }

    fn request(&self, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        tracing::debug!("GET {}", url);
        let request = self.client.get(url);
        match &self.token {
            Some(token) => request.header(TOKEN_HEADER, token),
            None => request,
        }
    }

    async fn send<Q>(&self, path: &str, query: &[Q]) -> Result<Response, UpstreamError>
    where
        Q: serde::Serialize,
    {
        let response = self.request(path).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Upstream {} answered {}", path, status);
            return Err(UpstreamError::Status {
                code: status.as_u16(),
                path: path.to_string(),
            });
        }
        Ok(response)
    }

    async fn get_json<T, Q>(&self, path: &str, query: &[Q]) -> Result<T, UpstreamError>
    where
        T: DeserializeOwned,
        Q: serde::Serialize,
    {
        let bytes = self.send(path, query).await?.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
