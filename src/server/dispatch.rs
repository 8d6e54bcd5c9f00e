//! # Command Dispatch
//!
//! Turns one decoded [`Command`] into registry calls and a [`Reply`]. Kept free
//! of socket I/O so the request path can be exercised directly in tests.

use crate::connection::ConnectionHandle;
use crate::fulfillment::FulfillmentScheduler;
use crate::model::OrderId;
use crate::protocol::{Command, Reply};
use crate::registry::{RegistryClient, RegistryError};
use tracing::{debug, info, instrument};

#[derive(Clone)]
pub struct Dispatcher {
    registry: RegistryClient,
    scheduler: FulfillmentScheduler,
}

impl Dispatcher {
    pub fn new(registry: RegistryClient, scheduler: FulfillmentScheduler) -> Self {
        Self {
            registry,
            scheduler,
        }
    }

    /// Applies `command` on behalf of `connection`.
    ///
    /// Every outcome the client can cause is a [`Reply`]; an `Err` only means
    /// the registry is no longer running.
    #[instrument(skip_all)]
    pub async fn dispatch(
        &self,
        command: Command,
        connection: &ConnectionHandle,
    ) -> Result<Reply, RegistryError> {
        debug!(?command, "Dispatch");

        match command {
            Command::AddOrder(params) => {
                let id = self.registry.create_for(params, connection.clone()).await?;
                // Detached: the task outlives this connection
                self.scheduler.schedule(id);
                info!(%id, "Order accepted");
                Ok(Reply::OrderAdded(id))
            }
            Command::CheckStatus { order_id } => {
                let Ok(id) = OrderId::try_from(order_id) else {
                    return Ok(Reply::NotFound);
                };
                Ok(match self.registry.get(id).await? {
                    Some(order) => Reply::Status(order.id, order.status),
                    None => Reply::NotFound,
                })
            }
            Command::CancelOrder { order_id } => {
                let Ok(id) = OrderId::try_from(order_id) else {
                    return Ok(Reply::CouldNotCancel);
                };
                Ok(match self.registry.remove(id).await? {
                    Some(order) => {
                        info!(id = %order.id, "Order cancelled");
                        Reply::Cancelled(order.id)
                    }
                    None => Reply::CouldNotCancel,
                })
            }
            Command::Invalid { command } => {
                debug!(?command, "Invalid command");
                Ok(Reply::InvalidCommand)
            }
        }
    }
}
