use std::fmt::Write;

use axum::{extract::State, response::Html};
use axum_extra::extract::{Form, FormRejection};
use quick_xml::escape::escape;
use serde::Deserialize;

use crate::http::error::ApiError;
use crate::http::state::AppState;
use crate::jellyfin::model::Library;
use crate::settings::{self, DisplaySettings};

/// Body of `POST /config`. Checkboxes are only submitted when ticked, so both
/// fields may be missing.
#[derive(Deserialize, Debug, Default)]
pub struct SettingsForm {
    #[serde(default)]
    pub library_ids: Vec<String>,
    #[serde(default)]
    pub include_tv: Option<String>,
}

impl SettingsForm {
    pub fn into_settings(self) -> DisplaySettings {
        DisplaySettings {
            library_ids: self
                .library_ids
                .into_iter()
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty())
                .collect(),
            include_tv: matches!(self.include_tv.as_deref(), Some("on" | "true" | "1")),
        }
    }
}

/// One checkbox per upstream library, then one per saved id upstream no longer lists.
pub fn render_settings_form(libraries: &[Library], saved: &DisplaySettings) -> String {
    let mut rows = String::new();
    let mut listed = Vec::new();
    for library in libraries {
        let Some(id) = library.id.as_deref() else { continue };
        let name = library.name.as_deref().unwrap_or(id);
        push_checkbox(&mut rows, id, name, saved.library_ids.contains(id));
        listed.push(id);
    }
    for id in saved.library_ids.iter().filter(|id| !listed.contains(&id.as_str())) {
        push_checkbox(&mut rows, id, id, true);
    }
    if rows.is_empty() {
        rows.push_str("      <p>No libraries found; every library is shown.</p>\n");
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>nowshowing settings</title></head>
<body>
  <form method="post" action="/config">
    <fieldset>
      <legend>Libraries</legend>
{rows}    </fieldset>
    <label><input type="checkbox" name="include_tv"{tv}> Include TV shows</label>
    <button type="submit">Save</button>
  </form>
</body>
</html>
"#,
        rows = rows,
        tv = if saved.include_tv { " checked" } else { "" },
    )
}

fn push_checkbox(out: &mut String, id: &str, label: &str, checked: bool) {
    let _ = writeln!(
        out,
        r#"      <label><input type="checkbox" name="library_ids" value="{}"{}> {}</label><br>"#,
        escape(id),
        if checked { " checked" } else { "" },
        escape(label),
    );
}

/// GET /config — settings form. Library names come from the configured user's views.
pub async fn show_settings(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let saved = settings::load(&state.config.settings_path);
    let libraries = match state.config.user_id.as_deref() {
        Some(user_id) => state.jellyfin.get_user_views(user_id).await?,
        None => {
            tracing::debug!("No user id configured; listing saved library ids only");
            Vec::new()
        }
    };
    Ok(Html(render_settings_form(&libraries, &saved)))
}

/// POST /config — overwrite the settings file.
pub async fn update_settings(
    State(state): State<AppState>,
    form: Result<Form<SettingsForm>, FormRejection>,
) -> Result<&'static str, ApiError> {
    let Form(form) = form?;
    let new_settings = form.into_settings();
    settings::save(&state.config.settings_path, &new_settings)?;
    tracing::info!(
        "Settings updated: {} libraries, include_tv={}",
        new_settings.library_ids.len(),
        new_settings.include_tv
    );
    Ok("Saved.")
}
