use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Keep every entry that deserializes and skip the rest, so one odd session or
/// item does not blank the whole display.
pub fn parse_list<T: DeserializeOwned>(values: Vec<Value>) -> Vec<T> {
    values
        .into_iter()
        .filter_map(|value| match T::deserialize(value) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Skipping malformed upstream entry: {}", e);
                None
            }
        })
        .collect()
}

fn deserialize_skip_errors<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let values = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(parse_list(values))
}

/// A field of the wrong JSON type reads as absent instead of failing the
/// whole entry.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    match T::deserialize(value) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) => {
            tracing::debug!("Ignoring malformed upstream field: {}", e);
            Ok(None)
        }
    }
}

/// An active playback session. Only the fields the display needs are read;
/// all of them are optional upstream.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Session {
    #[serde(deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub user_name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub device_name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub now_playing_item: Option<Item>,
    #[serde(deserialize_with = "lenient")]
    pub play_state: Option<PlayState>,
}

impl Session {
    pub fn position_ticks(&self) -> Option<u64> {
        self.play_state.as_ref().and_then(|p| p.position_ticks)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PlayState {
    #[serde(deserialize_with = "lenient")]
    pub position_ticks: Option<u64>,
}

/// A movie, series or episode.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Item {
    #[serde(deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub original_title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub run_time_ticks: Option<u64>,
}

impl Item {
    /// `{}` from upstream: nothing to show.
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.name.is_none() && self.original_title.is_none()
    }
}

/// A user view (top-level library folder).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Library {
    #[serde(deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub name: Option<String>,
}

/// `{"Items": [...]}` envelope used by list endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase", bound(deserialize = "T: DeserializeOwned"))]
pub struct QueryResult<T> {
    #[serde(default = "Vec::new", deserialize_with = "deserialize_skip_errors")]
    pub items: Vec<T>,
}
