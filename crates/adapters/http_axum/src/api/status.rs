//! JSON handlers for device status snapshots.

use axum::Json;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};

use homedeck_app::ports::EventPublisher;
use homedeck_domain::status::{StatusCategory, StatusReport};

use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the status endpoints.
pub enum StatusResponse {
    Ok(Json<StatusReport>),
}

impl IntoResponse for StatusResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/status`
pub async fn all<EP>(State(state): State<AppState<EP>>) -> StatusResponse
where
    EP: EventPublisher + Send + Sync + 'static,
{
    StatusResponse::Ok(Json(state.store().status_of(StatusCategory::All)))
}

/// `GET /api/status/{category}`
pub async fn category<EP>(
    State(state): State<AppState<EP>>,
    Path(category): Path<String>,
) -> Result<StatusResponse, ApiError>
where
    EP: EventPublisher + Send + Sync + 'static,
{
    let report = state.store().status(Some(category.as_str()))?;
    Ok(StatusResponse::Ok(Json(report)))
}
