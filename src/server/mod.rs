//! # TCP Front End
//!
//! The accept loop and the per-connection machinery:
//!
//! - [`serve`]: accepts sockets and spawns one [`handle_connection`] task each.
//! - [`Dispatcher`]: maps decoded commands onto the registry and scheduler.
//! - [`ConnectionError`]: why a connection was closed by the server.

pub mod dispatch;
pub mod error;
pub mod handler;

pub use dispatch::Dispatcher;
pub use error::ConnectionError;
pub use handler::handle_connection;

use crate::lifecycle::Shutdown;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::{debug, info, info_span, warn, Instrument};

/// Pause after a failed `accept` (for example when out of file descriptors).
pub const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// Accepts connections until shutdown is requested.
///
/// With `max_connections` set, a slot is reserved *before* accepting, so
/// excess clients wait in the listen backlog instead of being refused.
pub async fn serve(
    listener: TcpListener,
    dispatcher: Dispatcher,
    max_connections: Option<usize>,
    mut shutdown: Shutdown,
) {
    let limit = max_connections.map(|n| Arc::new(Semaphore::new(n)));
    info!(?max_connections, "Accepting connections");

    loop {
        let permit = tokio::select! {
            permit = reserve_slot(limit.clone()) => permit,
            _ = shutdown.requested() => break,
        };

        let accepted = tokio::select! {
            accepted = listener.accept() => accepted,
            _ = shutdown.requested() => break,
        };

        let (stream, peer) = match accepted {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!(error = %e, "Accept failed");
                drop(permit);
                if !back_off(&mut shutdown).await {
                    break;
                }
                continue;
            }
        };

        let dispatcher = dispatcher.clone();
        let shutdown = shutdown.clone();
        tokio::spawn(
            async move {
                let _permit = permit;
                if let Err(e) = handle_connection(stream, peer, dispatcher, shutdown).await {
                    warn!(error = %e, "Connection dropped");
                }
            }
            .instrument(info_span!("connection", %peer)),
        );
    }

    debug!("Accept loop stopped");
}

/// Waits out [`ACCEPT_BACKOFF`]; `false` if shutdown arrived first.
async fn back_off(shutdown: &mut Shutdown) -> bool {
    tokio::select! {
        _ = tokio::time::sleep(ACCEPT_BACKOFF) => true,
        _ = shutdown.requested() => false,
    }
}

async fn reserve_slot(limit: Option<Arc<Semaphore>>) -> Option<OwnedSemaphorePermit> {
    match limit {
        // The semaphore is never closed, so acquiring only waits
        Some(limit) => limit.acquire_owned().await.ok(),
        None => None,
    }
}
