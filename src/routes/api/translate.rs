use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::post,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::{
    error::AppError,
    response::{ApiResponse, ApiResult},
    state::AppState,
};

pub const UNAVAILABLE_MESSAGE: &str =
    "Translation service not available. API key might be missing or invalid.";

#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
    pub target_language: String,
}

#[derive(Debug, Serialize)]
pub struct TranslateResponse {
    pub translated_text: String,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/translate", post(translate))
        .with_state(state)
}

// The body is taken as a `Result` so an unconfigured backend answers 503
// before the payload is looked at.
async fn translate(
    State(state): State<Arc<AppState>>,
    body: Result<Json<TranslateRequest>, JsonRejection>,
) -> ApiResult<TranslateResponse> {
    let Some(translator) = state.translator.as_ref() else {
        return Err(AppError::service_unavailable(UNAVAILABLE_MESSAGE));
    };
    let Json(body) = body.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;

    match translator
        .translate(&body.text, &body.target_language)
        .await
    {
        Ok(translated_text) => {
            info!(target_language = %body.target_language, "translated text");
            ApiResponse::ok(TranslateResponse { translated_text })
        }
        Err(err) => {
            error!(error = %err, "translation failed");
            Err(AppError::internal(format!("Failed to translate text: {err}")))
        }
    }
}
