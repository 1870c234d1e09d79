//! JSON handlers for the operation catalog and tool calls.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde_json::Value;

use homedeck_app::catalog::tool_definitions;
use homedeck_app::command::ToolCall;
use homedeck_app::ports::EventPublisher;
use homedeck_app::services::Reply;

use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Value>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the call endpoint.
pub enum CallResponse {
    Ok(Json<Reply>),
}

impl IntoResponse for CallResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/operations`
pub async fn list<EP>(State(_state): State<AppState<EP>>) -> ListResponse
where
    EP: EventPublisher + Send + Sync + 'static,
{
    ListResponse::Ok(Json(tool_definitions()))
}

/// `POST /api/operations/call`
pub async fn call<EP>(
    State(state): State<AppState<EP>>,
    Json(call): Json<ToolCall>,
) -> Result<CallResponse, ApiError>
where
    EP: EventPublisher + Send + Sync + 'static,
{
    let reply = state.dispatcher.dispatch(&call).await?;
    Ok(CallResponse::Ok(Json(reply)))
}
