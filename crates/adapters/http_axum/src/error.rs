//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use homedeck_app::services::refusal;
use homedeck_domain::error::HomeError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`HomeError`] to an HTTP response with appropriate status code.
///
/// The body carries the same polite wording a conversational front end
/// would show, so callers never have to phrase errors themselves.
#[derive(Debug)]
pub struct ApiError(HomeError);

impl From<HomeError> for ApiError {
    fn from(err: HomeError) -> Self {
        Self(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            HomeError::UnknownOperation(_)
            | HomeError::UnknownLocation(_)
            | HomeError::UnknownCategory(_) => StatusCode::NOT_FOUND,
            HomeError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!(error = %self.0, %status, "request rejected");
        let body = ErrorBody {
            error: refusal(&self.0),
        };
        (status, Json(body)).into_response()
    }
}
