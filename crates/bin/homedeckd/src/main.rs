//! # homedeckd — homedeck daemon
//!
//! Composition root that wires the core and the HTTP adapter together and
//! starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialise `tracing` from the configured filter
//! - Construct the device store, the event bus and the dispatcher
//! - Log every published event from a background subscriber
//! - Build the axum router, bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing_subscriber::EnvFilter;

use homedeck_adapter_http_axum::state::AppState;
use homedeck_app::event_bus::InProcessEventBus;
use homedeck_app::services::Dispatcher;
use homedeck_app::store::DeviceStore;
use homedeck_domain::event::{Event, EventPayload};

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    // Event bus
    let event_bus = Arc::new(InProcessEventBus::new(config.events.capacity));
    tokio::spawn(log_events(event_bus.subscribe()));

    // Core
    let store = Arc::new(DeviceStore::new());
    let dispatcher = Dispatcher::new(store, Arc::clone(&event_bus));

    // HTTP
    let state = AppState::new(dispatcher, event_bus);
    let app = homedeck_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "homedeckd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("homedeckd stopped");
    Ok(())
}

/// Log every event published on the bus until it closes.
async fn log_events(mut rx: broadcast::Receiver<Event>) {
    loop {
        match rx.recv().await {
            Ok(event) => match &event.payload {
                EventPayload::StateChanged(change) => {
                    tracing::debug!(call_id = %event.call_id, %change, "event: state changed");
                }
                EventPayload::SceneActivated { scene } => {
                    tracing::debug!(call_id = %event.call_id, %scene, "event: scene activated");
                }
            },
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "event logger lagged, some events were dropped");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

/// Resolve on Ctrl-C, or on SIGTERM where available.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(%err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(%err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received, draining connections");
}
