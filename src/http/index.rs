use axum::{extract::State, response::Html};

use crate::http::state::AppState;

/// GET / — HTML shell for the front-end. Presentation lives client-side; the shell
/// only carries the polling parameters.
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let config = &state.config;
    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Now Showing</title></head>
<body>
  <main id="marquee"
        data-flavor="{flavor}"
        data-poll-interval="{poll}"
        data-idle-after="{idle}"
        data-now-url="/api/now"></main>
</body>
</html>
"#,
        flavor = config.flavor.as_str(),
        poll = config.poll_interval,
        idle = config.idle_after,
    ))
}
