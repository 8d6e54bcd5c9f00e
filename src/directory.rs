//! # Connection Directory
//!
//! Maps an order to the connection that should receive its ready notification.
//! The directory holds bindings, never connections: every entry is a weak
//! [`ConnectionHandle`].
//!
//! Bindings are written and removed only by the registry actor: bound on
//! create, removed on cancel and when the order is marked ready.

use crate::connection::ConnectionHandle;
use crate::model::OrderId;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

#[derive(Clone, Default)]
pub struct ConnectionDirectory {
    bindings: Arc<DashMap<OrderId, ConnectionHandle>>,
}

impl ConnectionDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Associates `id` with `connection`, returning any binding it replaced.
    pub fn bind(&self, id: OrderId, connection: ConnectionHandle) -> Option<ConnectionHandle> {
        debug!(%id, peer = %connection.peer(), "Bind");
        self.bindings.insert(id, connection)
    }

    /// Removes the binding for `id` and hands it back.
    pub fn unbind(&self, id: &OrderId) -> Option<ConnectionHandle> {
        let removed = self.bindings.remove(id).map(|(_, connection)| connection);
        debug!(%id, found = removed.is_some(), "Unbind");
        removed
    }

    pub fn lookup(&self, id: &OrderId) -> Option<ConnectionHandle> {
        self.bindings.get(id).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn handle(port: u16, tx: &mpsc::Sender<String>) -> ConnectionHandle {
        let peer = format!("127.0.0.1:{}", port).parse().unwrap();
        ConnectionHandle::new(peer, tx)
    }

    #[test]
    fn test_bind_lookup_unbind() {
        let (tx, _rx) = mpsc::channel(4);
        let directory = ConnectionDirectory::new();

        assert!(directory.bind(OrderId(1), handle(5001, &tx)).is_none());
        assert_eq!(directory.len(), 1);

        let found = directory.lookup(&OrderId(1)).expect("binding should exist");
        assert_eq!(found.peer().port(), 5001);
        // Lookup is read-only
        assert_eq!(directory.len(), 1);

        let removed = directory.unbind(&OrderId(1)).expect("binding should exist");
        assert_eq!(removed.peer().port(), 5001);
        assert!(directory.is_empty());
        assert!(directory.unbind(&OrderId(1)).is_none());
    }

    #[test]
    fn test_bind_overwrites_previous_binding() {
        let (tx, _rx) = mpsc::channel(4);
        let directory = ConnectionDirectory::new();

        directory.bind(OrderId(3), handle(5001, &tx));
        let previous = directory
            .bind(OrderId(3), handle(5002, &tx))
            .expect("first binding should be returned");
        assert_eq!(previous.peer().port(), 5001);

        assert_eq!(directory.lookup(&OrderId(3)).unwrap().peer().port(), 5002);
        assert_eq!(directory.len(), 1);
    }

    #[test]
    fn test_bindings_are_independent_per_order() {
        let (tx, _rx) = mpsc::channel(4);
        let directory = ConnectionDirectory::new();

        directory.bind(OrderId(1), handle(5001, &tx));
        directory.bind(OrderId(2), handle(5002, &tx));
        directory.unbind(&OrderId(1));

        assert!(directory.lookup(&OrderId(1)).is_none());
        assert_eq!(directory.lookup(&OrderId(2)).unwrap().peer().port(), 5002);
    }

    #[test]
    fn test_clones_share_bindings() {
        let (tx, _rx) = mpsc::channel(4);
        let directory = ConnectionDirectory::new();
        let other = directory.clone();

        directory.bind(OrderId(9), handle(5009, &tx));
        assert!(other.lookup(&OrderId(9)).is_some());
    }
}
