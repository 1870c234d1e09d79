//! # homedeck-app
//!
//! Application layer — the device store, the operation catalog and the
//! command dispatcher.
//!
//! ## Responsibilities
//! - Own the house state behind one lock ([`store::DeviceStore`]) so every
//!   primitive, bulk operation and scene is applied atomically
//! - Describe every invocable operation ([`catalog::Operation`]) and render
//!   the catalog as tool definitions
//! - Parse tool calls into typed commands ([`command::Command`])
//! - Dispatch commands and publish the resulting events
//!   ([`services::dispatcher::Dispatcher`])
//! - Define the **port trait** adapters implement (`EventPublisher`) and
//!   provide the in-process event bus
//!
//! ## Dependency rule
//! Depends on `homedeck-domain` only (plus `tokio::sync` for channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod catalog;
pub mod command;
pub mod event_bus;
pub mod ports;
pub mod services;
pub mod store;
