//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod operations;
pub mod sse;
#[allow(clippy::missing_errors_doc)]
pub mod status;

use axum::Router;
use axum::routing::{get, post};

use homedeck_app::ports::EventPublisher;

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<EP>() -> Router<AppState<EP>>
where
    EP: EventPublisher + Send + Sync + 'static,
{
    Router::new()
        // Status
        .route("/status", get(status::all::<EP>))
        .route("/status/{category}", get(status::category::<EP>))
        // Operations
        .route("/operations", get(operations::list::<EP>))
        .route("/operations/call", post(operations::call::<EP>))
        // Events
        .route("/events/stream", get(sse::stream::<EP>))
}
