use std::sync::Arc;

use askama::Template;
use axum::{Router, extract::State, http::StatusCode, response::Html, routing::get};

use crate::state::AppState;

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    project_name: String,
    translation_enabled: bool,
}

type HtmlError = (StatusCode, Html<String>);

pub fn router(state: Arc<AppState>) -> Router {
    Router::new().route("/", get(index)).with_state(state)
}

async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, HtmlError> {
    let rendered = IndexTemplate {
        project_name: project_name(),
        translation_enabled: state.translator.is_some(),
    }
    .render()
    .map_err(|err| {
        tracing::error!(error = %err, "failed to render index");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html("failed to render index".to_string()),
        )
    })?;
    Ok(Html(rendered))
}

/// `todo_api` -> `Todo Api`.
fn project_name() -> String {
    env!("CARGO_PKG_NAME")
        .split(['_', '-'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
