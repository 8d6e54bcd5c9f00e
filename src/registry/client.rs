//! # Registry Client
//!
//! The cloneable handle every other component uses to reach the
//! [`OrderRegistry`](super::OrderRegistry).

use super::error::RegistryError;
use super::message::{MarkedReady, RegistryRequest};
use crate::connection::ConnectionHandle;
use crate::model::{Order, OrderCreate, OrderId};
use tokio::sync::{mpsc, oneshot};
use tracing::instrument;

/// A type-safe client for interacting with the `OrderRegistry`.
///
/// Holds only the sending half of the actor's channel, so cloning is cheap.
/// The actor stops once every clone has been dropped.
#[derive(Clone, Debug)]
pub struct RegistryClient {
    sender: mpsc::Sender<RegistryRequest>,
}

impl RegistryClient {
    pub fn new(sender: mpsc::Sender<RegistryRequest>) -> Self {
        Self { sender }
    }

    /// Stores a new order without binding any connection to it.
    pub async fn create(&self, params: OrderCreate) -> Result<OrderId, RegistryError> {
        self.send_create(params, None).await
    }

    /// Stores a new order and binds `connection` to it for the ready notification.
    #[instrument(skip_all, fields(peer = %connection.peer()))]
    pub async fn create_for(
        &self,
        params: OrderCreate,
        connection: ConnectionHandle,
    ) -> Result<OrderId, RegistryError> {
        self.send_create(params, Some(connection)).await
    }

    async fn send_create(
        &self,
        params: OrderCreate,
        bind_to: Option<ConnectionHandle>,
    ) -> Result<OrderId, RegistryError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(RegistryRequest::Create {
                params,
                bind_to,
                respond_to,
            })
            .await
            .map_err(|_| RegistryError::ActorClosed)?;
        response.await.map_err(|_| RegistryError::ActorDropped)
    }

    pub async fn get(&self, id: OrderId) -> Result<Option<Order>, RegistryError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(RegistryRequest::Get { id, respond_to })
            .await
            .map_err(|_| RegistryError::ActorClosed)?;
        response.await.map_err(|_| RegistryError::ActorDropped)
    }

    /// Removes the order and its connection binding.
    pub async fn remove(&self, id: OrderId) -> Result<Option<Order>, RegistryError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(RegistryRequest::Remove { id, respond_to })
            .await
            .map_err(|_| RegistryError::ActorClosed)?;
        response.await.map_err(|_| RegistryError::ActorDropped)
    }

    /// Marks the order ready and hands back the connection bound to it.
    ///
    /// [`MarkedReady::NotFound`] when the order no longer exists.
    pub async fn mark_ready(&self, id: OrderId) -> Result<MarkedReady, RegistryError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(RegistryRequest::MarkReady { id, respond_to })
            .await
            .map_err(|_| RegistryError::ActorClosed)?;
        response.await.map_err(|_| RegistryError::ActorDropped)
    }
}
