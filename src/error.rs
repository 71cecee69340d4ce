use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::tmdb::TmdbError;

#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for AppError {}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self(err)
    }
}

impl From<TmdbError> for AppError {
    fn from(err: TmdbError) -> Self {
        Self(anyhow::Error::new(err))
    }
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self.0.downcast_ref::<TmdbError>() {
            Some(TmdbError::NotFound) => StatusCode::NOT_FOUND,
            Some(TmdbError::RateLimited) => StatusCode::SERVICE_UNAVAILABLE,
            Some(_) => StatusCode::BAD_GATEWAY,
            None => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
