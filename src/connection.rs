//! # Connection Handles
//!
//! A [`ConnectionHandle`] is the capability to push one line of text to a live
//! client connection. The connection handler owns the only strong sender of
//! its outbound queue; every handle holds a *weak* sender, so a handle parked
//! in the [`ConnectionDirectory`](crate::directory::ConnectionDirectory) never
//! keeps a finished connection alive.
//!
//! ```text
//! handler ──(strong Sender)──┐
//!                            ├──> outbound queue (bounded) ──> writer task ──> socket
//! directory ──(weak Sender)──┘
//! ```
//!
//! The queue is bounded. The handler waits for room before queuing a reply,
//! so a client that stops reading only stalls its own connection. Pushes
//! through a handle never wait: a full queue drops the line.

use std::fmt::Debug;
use std::net::SocketAddr;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

/// Lines a connection may have queued for its writer.
pub const OUTBOUND_CAPACITY: usize = 64;

/// Why a line could not be pushed to a connection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PushError {
    /// The handler finished or the writer stopped.
    #[error("Connection to {peer} is closed")]
    Closed { peer: SocketAddr },
    /// The client is not reading; its outbound queue is full.
    #[error("Outbound queue for {peer} is full")]
    Full { peer: SocketAddr },
}

#[derive(Clone)]
pub struct ConnectionHandle {
    peer: SocketAddr,
    outbound: mpsc::WeakSender<String>,
}

impl ConnectionHandle {
    /// Creates a handle that pushes into `outbound` without owning it.
    pub fn new(peer: SocketAddr, outbound: &mpsc::Sender<String>) -> Self {
        Self {
            peer,
            outbound: outbound.downgrade(),
        }
    }

    pub fn peer(&self) -> SocketAddr {
        self.peer
    }

    /// Queues `line` for the connection's writer.
    ///
    /// Never waits. Fails once the owning handler has dropped its sender, the
    /// writer has stopped, or the queue is full.
    pub fn send(&self, line: impl Into<String>) -> Result<(), PushError> {
        let peer = self.peer;
        let sender = self
            .outbound
            .upgrade()
            .ok_or(PushError::Closed { peer })?;
        sender.try_send(line.into()).map_err(|e| match e {
            TrySendError::Full(_) => PushError::Full { peer },
            TrySendError::Closed(_) => PushError::Closed { peer },
        })
    }

    pub fn is_open(&self) -> bool {
        self.outbound
            .upgrade()
            .is_some_and(|sender| !sender.is_closed())
    }
}

impl Debug for ConnectionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionHandle")
            .field("peer", &self.peer)
            .finish()
    }
}
