//! Reasons a connection is closed by the server.

use crate::protocol::ProtocolError;
use crate::registry::RegistryError;

#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("Registry unavailable: {0}")]
    Registry(#[from] RegistryError),

    #[error("Connection writer stopped")]
    WriterClosed,
}
