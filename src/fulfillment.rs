//! # Fulfillment Scheduler
//!
//! Every accepted order gets its own background task that waits out the
//! preparation delay, flips the order to `ready` and notifies the client.
//!
//! Cancellation never touches these tasks. Whether the order still exists is
//! decided only when the delay has elapsed: a cancelled order simply makes the
//! task a no-op.
//!
//! ```text
//! ADD_ORDER ──> schedule(id) ──> sleep(delay) ──> registry.mark_ready(id)
//!                                                   ├─ Ready(binding) ──> notify(id, binding)
//!                                                   └─ NotFound       ──> (cancelled, nothing)
//! ```

use crate::lifecycle::Shutdown;
use crate::model::OrderId;
use crate::notifier::{self, Delivery};
use crate::protocol::Notification;
use crate::registry::{MarkedReady, RegistryClient};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info_span, warn, Instrument};

/// Reference preparation time.
pub const DEFAULT_DELAY: Duration = Duration::from_secs(10);

/// How a fulfillment task ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fulfillment {
    /// The order was marked ready; the notification went as described.
    Ready(Delivery),
    /// The order was gone when the delay elapsed.
    Cancelled,
    /// The service shut down first, or the registry was unreachable.
    Abandoned,
}

#[derive(Clone)]
pub struct FulfillmentScheduler {
    registry: RegistryClient,
    delay: Duration,
    shutdown: Shutdown,
}

impl FulfillmentScheduler {
    pub fn new(registry: RegistryClient, delay: Duration, shutdown: Shutdown) -> Self {
        Self {
            registry,
            delay,
            shutdown,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Spawns the fulfillment task for `id`.
    ///
    /// The task is detached from the caller: it keeps running after the
    /// connection that placed the order has closed.
    pub fn schedule(&self, id: OrderId) -> JoinHandle<Fulfillment> {
        let span = info_span!("fulfillment", order_id = %id);
        tokio::spawn(self.clone().fulfil(id).instrument(span))
    }

    async fn fulfil(mut self, id: OrderId) -> Fulfillment {
        debug!(delay_ms = self.delay.as_millis() as u64, "Scheduled");

        tokio::select! {
            _ = tokio::time::sleep(self.delay) => {}
            _ = self.shutdown.requested() => {
                debug!("Shutdown before fulfillment");
                return Fulfillment::Abandoned;
            }
        }

        match self.registry.mark_ready(id).await {
            Ok(MarkedReady::Ready(binding)) => {
                let message = Notification::OrderReady(id).to_string();
                Fulfillment::Ready(notifier::notify(id, binding, &message))
            }
            Ok(MarkedReady::NotFound) => {
                debug!("Order no longer exists");
                Fulfillment::Cancelled
            }
            Err(e) => {
                warn!(error = %e, "Could not mark order ready");
                Fulfillment::Abandoned
            }
        }
    }
}
