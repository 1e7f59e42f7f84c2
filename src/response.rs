use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::error::AppError;

pub type ApiResult<T> = Result<ApiResponse<T>, AppError>;

/// A successful JSON payload paired with its status code.
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub status: StatusCode,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> ApiResult<T> {
        Self::with_status(StatusCode::OK, data)
    }

    pub fn created(data: T) -> ApiResult<T> {
        Self::with_status(StatusCode::CREATED, data)
    }

    pub fn with_status(status: StatusCode, data: T) -> ApiResult<T> {
        Ok(Self { status, data })
    }
}

impl ApiResponse<()> {
    pub fn no_content() -> ApiResult<()> {
        Self::with_status(StatusCode::NO_CONTENT, ())
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        if self.status == StatusCode::NO_CONTENT {
            return self.status.into_response();
        }
        (self.status, Json(self.data)).into_response()
    }
}
