//! Reshape upstream sessions into what the marquee shows.
//!
//! The first session, in upstream order, carrying a now-playing item wins.
//! Nothing else is ranked. When no session is playing, the display flavor falls
//! back to a capped listing of the configured libraries.

use std::fmt::Display;
use std::path::Path;

use chrono::{DateTime, TimeZone};
use serde::Serialize;

use crate::jellyfin::model::{Item, Session};
use crate::jellyfin::{ItemFilter, Jellyfin, UpstreamError};
use crate::settings::{self, DisplaySettings};

/// Upstream times are 100ns ticks.
pub const TICKS_PER_SECOND: f64 = 10_000_000.0;

/// Upper bound on the idle slideshow listing, across all libraries.
pub const LIBRARY_CAP: usize = 300;

const UNKNOWN_TITLE: &str = "Unknown Title";

pub fn ticks_to_seconds(ticks: u64) -> f64 {
    ticks as f64 / TICKS_PER_SECOND
}

/// First session with a now-playing item, together with that item.
pub fn first_playing(sessions: &[Session]) -> Option<(&Session, &Item)> {
    sessions
        .iter()
        .find_map(|s| {
            s.now_playing_item
                .as_ref()
                .filter(|item| !item.is_empty())
                .map(|item| (s, item))
        })
}

fn non_empty(text: &Option<String>) -> Option<&str> {
    text.as_deref().filter(|t| !t.is_empty())
}

pub fn display_title(item: &Item) -> String {
    non_empty(&item.name)
        .or_else(|| non_empty(&item.original_title))
        .unwrap_or(UNKNOWN_TITLE)
        .to_string()
}

/// Epoch milliseconds, attached to every display response so the front-end
/// can detect stale data.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

// ── Display flavor ────────────────────────────────────────────────────────────

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PlaybackSnapshot {
    pub playing: bool,
    pub title: String,
    pub poster_url: Option<String>,
    pub position_seconds: Option<f64>,
    pub runtime_seconds: Option<f64>,
    pub timestamp: i64,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LibraryEntry {
    pub id: String,
    pub title: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct IdleSnapshot {
    pub playing: bool,
    pub movies: Vec<LibraryEntry>,
    pub timestamp: i64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum NowShowing {
    Playing(PlaybackSnapshot),
    Idle(IdleSnapshot),
}

/// Local proxy path for an item's poster (served by `/image/{id}`).
pub fn proxy_poster_url(item_id: &str) -> String {
    format!("/image/{}", item_id)
}

pub fn snapshot(session: &Session, item: &Item, timestamp: i64) -> PlaybackSnapshot {
    PlaybackSnapshot {
        playing: true,
        title: display_title(item),
        poster_url: item.id.as_deref().map(proxy_poster_url),
        position_seconds: session.position_ticks().map(ticks_to_seconds),
        runtime_seconds: item.run_time_ticks.map(ticks_to_seconds),
        timestamp,
    }
}

/// One filter per configured library, or a single server-wide filter when
/// none are selected.
pub fn library_filters(settings: &DisplaySettings, user_id: Option<&str>) -> Vec<ItemFilter> {
    let mut include_types = vec!["Movie"];
    if settings.include_tv {
        include_types.push("Series");
    }
    let base = ItemFilter {
        user_id: user_id.map(str::to_string),
        include_types,
        parent_id: None,
        limit: Some(LIBRARY_CAP),
    };
    if settings.library_ids.is_empty() {
        return vec![base];
    }
    settings
        .library_ids
        .iter()
        .map(|id| ItemFilter {
            parent_id: Some(id.clone()),
            ..base.clone()
        })
        .collect()
}

/// Flatten items to `{id, title}`, dropping those without an id.
pub fn flatten_items(items: Vec<Item>, cap: usize) -> Vec<LibraryEntry> {
    items
        .into_iter()
        .filter_map(|item| {
            let title = display_title(&item);
            item.id.filter(|id| !id.is_empty()).map(|id| LibraryEntry { id, title })
        })
        .take(cap)
        .collect()
}

pub async fn idle_library(
    client: &Jellyfin,
    settings: &DisplaySettings,
    user_id: Option<&str>,
) -> Result<Vec<LibraryEntry>, UpstreamError> {
    let mut entries = Vec::new();
    for mut filter in library_filters(settings, user_id) {
        let remaining = LIBRARY_CAP - entries.len();
        if remaining == 0 {
            break;
        }
        filter.limit = Some(remaining);
        let items = client.get_items(&filter).await?;
        entries.extend(flatten_items(items, remaining));
    }
    Ok(entries)
}

/// Resolve `/api/now` for the display flavor. Settings are only read when
/// nothing is playing.
pub async fn resolve(
    client: &Jellyfin,
    user_id: Option<&str>,
    settings_path: &Path,
) -> Result<NowShowing, UpstreamError> {
    let sessions = client.get_sessions().await?;
    if let Some((session, item)) = first_playing(&sessions) {
        tracing::debug!(
            "Now playing {:?} on {:?} ({:?})",
            item.name,
            session.device_name,
            session.user_name
        );
        return Ok(NowShowing::Playing(snapshot(session, item, now_millis())));
    }

    let settings = settings::load(settings_path);
    let movies = idle_library(client, &settings, user_id).await?;
    Ok(NowShowing::Idle(IdleSnapshot {
        playing: false,
        movies,
        timestamp: now_millis(),
    }))
}

// ── Classic flavor ────────────────────────────────────────────────────────────

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ClassicSnapshot {
    pub title: String,
    pub poster: String,
    pub duration: f64,
    pub position: f64,
    pub end_time: String,
    pub start_time: String,
}

/// Serializes as `{"title": null}`.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct ClassicIdle {
    pub title: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ClassicNow {
    Playing(ClassicSnapshot),
    Idle(ClassicIdle),
}

/// Absent ticks count as zero here. Start and end are wall-clock `HH:MM`
/// derived from `now`.
pub fn classic_snapshot<Tz>(
    session: &Session,
    item: &Item,
    poster: String,
    now: DateTime<Tz>,
) -> ClassicSnapshot
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let duration = ticks_to_seconds(item.run_time_ticks.unwrap_or(0));
    let position = ticks_to_seconds(session.position_ticks().unwrap_or(0));
    let remaining = chrono::Duration::milliseconds(((duration - position) * 1000.0) as i64);
    let elapsed = chrono::Duration::milliseconds((position * 1000.0) as i64);

    ClassicSnapshot {
        title: display_title(item),
        poster,
        duration,
        position,
        end_time: (now.clone() + remaining).format("%H:%M").to_string(),
        start_time: (now - elapsed).format("%H:%M").to_string(),
    }
}

pub async fn resolve_classic(client: &Jellyfin) -> Result<ClassicNow, UpstreamError> {
    let sessions = client.get_sessions().await?;
    Ok(match first_playing(&sessions) {
        Some((session, item)) => {
            // Items without an id get an empty poster.
            let poster = non_empty(&item.id)
                .map(|id| client.poster_url(id))
                .unwrap_or_default();
            ClassicNow::Playing(classic_snapshot(session, item, poster, chrono::Local::now()))
        }
        None => ClassicNow::Idle(ClassicIdle::default()),
    })
}

/// Poster URLs for every movie visible to the user, in upstream order.
pub async fn classic_library(
    client: &Jellyfin,
    user_id: Option<&str>,
) -> Result<Vec<String>, UpstreamError> {
    let filter = ItemFilter {
        user_id: user_id.map(str::to_string),
        include_types: vec!["Movie"],
        ..ItemFilter::default()
    };
    let items = client.get_items(&filter).await?;
    Ok(items
        .iter()
        .filter_map(|item| non_empty(&item.id))
        .map(|id| client.poster_url(id))
        .collect())
}
