//! # Order Registry Actor
//!
//! The `OrderRegistry` is the sole owner of every [`Order`] in the service. It
//! runs in its own Tokio task and processes [`RegistryRequest`]s one at a time,
//! so the store needs no `Mutex`: exclusive ownership inside the task is the
//! synchronization.

use super::client::RegistryClient;
use super::message::{MarkedReady, RegistryRequest};
use crate::directory::ConnectionDirectory;
use crate::model::{Order, OrderId};
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// The actor that owns the order store and the id counter.
///
/// # Operations
///
/// * **Create**:
///     1. Takes the next id from the counter (starting at 1, never reused).
///     2. Builds the order with status `received` and inserts it.
///     3. Binds the requesting connection, if any, in the
///        [`ConnectionDirectory`].
///
/// * **Get**: returns a clone of the order, or `None`.
///
/// * **Remove**: removes the order and unbinds its connection in one step, so
///   no other request observes an order that is gone but still bound.
///
/// * **MarkReady**: flips the status to `ready` and takes the order's binding
///   out of the directory in one step, so no order that is `ready` is ever
///   still bound. Answers `NotFound` (not an error) when the order is gone.
pub struct OrderRegistry {
    receiver: mpsc::Receiver<RegistryRequest>,
    store: HashMap<OrderId, Order>,
    next_id: u64,
}

impl OrderRegistry {
    /// Creates a new `OrderRegistry` and its associated `RegistryClient`.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - The capacity of the MPSC channel. If the channel is full,
    ///   calls to the client will wait until there is space.
    pub fn new(buffer_size: usize) -> (Self, RegistryClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id: 1,
        };
        (actor, RegistryClient::new(sender))
    }

    /// Runs the actor's event loop until every client has been dropped.
    ///
    /// # Context Injection
    /// The `directory` is handed in here rather than at construction so the
    /// registry and the rest of the service can be wired in any order.
    pub async fn run(mut self, directory: ConnectionDirectory) {
        info!("Registry started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                RegistryRequest::Create {
                    params,
                    bind_to,
                    respond_to,
                } => {
                    debug!(?params, "Create");
                    let id = OrderId(self.next_id);
                    self.next_id += 1;

                    self.store.insert(id, Order::from_create_params(id, params));
                    if let Some(connection) = bind_to {
                        directory.bind(id, connection);
                    }
                    info!(%id, size = self.store.len(), "Created");
                    let _ = respond_to.send(id);
                }
                RegistryRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(%id, found = item.is_some(), "Get");
                    let _ = respond_to.send(item);
                }
                RegistryRequest::Remove { id, respond_to } => {
                    let removed = self.store.remove(&id);
                    if removed.is_some() {
                        directory.unbind(&id);
                        info!(%id, size = self.store.len(), "Removed");
                    } else {
                        debug!(%id, "Remove: not found");
                    }
                    let _ = respond_to.send(removed);
                }
                RegistryRequest::MarkReady { id, respond_to } => {
                    let answer = match self.store.get_mut(&id) {
                        Some(order) => {
                            if order.mark_ready() {
                                info!(%id, "Ready");
                            } else {
                                debug!(%id, "Already ready");
                            }
                            MarkedReady::Ready(directory.unbind(&id))
                        }
                        None => {
                            debug!(%id, "MarkReady: not found");
                            MarkedReady::NotFound
                        }
                    };
                    let _ = respond_to.send(answer);
                }
            }
        }

        info!(size = self.store.len(), "Registry shutdown");
    }
}
