//! # homedeck-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a **JSON API** over the command surface
//!   (`/api/status`, `/api/operations`, `/api/operations/call`)
//! - Stream domain events as **Server-Sent Events** (`/api/events/stream`)
//! - Map HTTP requests into dispatcher calls (driving adapter)
//! - Map [`HomeError`](homedeck_domain::error::HomeError) into status codes
//!   with a polite JSON error body
//!
//! ## Dependency rule
//! Depends on `homedeck-app` (for the dispatcher and the event bus) and
//! `homedeck-domain` (for types used in request/response mapping). Never leaks
//! axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
