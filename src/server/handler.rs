//! # Connection Handler
//!
//! One task per accepted socket. The socket is split in two:
//!
//! - the **reader loop** (this task) reads one line, decodes it, dispatches
//!   it and queues the reply before reading the next line;
//! - the **writer task** drains the connection's outbound queue into the
//!   socket. Replies and ready notifications share that queue, so every
//!   line is written whole and replies keep their request order.
//!
//! The queue is bounded. When the client stops reading, the reader loop waits
//! for room before taking the next request, so unread replies never pile up.
//!
//! The reader loop ends on end of stream, on a malformed line, when the writer
//! has failed, or on service shutdown. Queued lines are then flushed unless
//! shutdown arrives first, in which case the writer is aborted. Orders placed
//! on the connection keep being fulfilled afterwards; their notifications
//! fail quietly.

use super::dispatch::Dispatcher;
use super::error::ConnectionError;
use crate::connection::{ConnectionHandle, OUTBOUND_CAPACITY};
use crate::lifecycle::Shutdown;
use crate::protocol;
use std::net::SocketAddr;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::OwnedWriteHalf;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tracing::{debug, info, warn, Instrument, Span};

/// Serves one client until the connection closes.
pub async fn handle_connection(
    stream: TcpStream,
    peer: SocketAddr,
    dispatcher: Dispatcher,
    mut shutdown: Shutdown,
) -> Result<(), ConnectionError> {
    info!("Connection opened");
    stream.set_nodelay(true)?;

    let (read_half, write_half) = stream.into_split();
    let (outbound, outbound_rx) = mpsc::channel::<String>(OUTBOUND_CAPACITY);
    let mut writer = tokio::spawn(write_lines(write_half, outbound_rx).instrument(Span::current()));
    let connection = ConnectionHandle::new(peer, &outbound);

    let mut lines = BufReader::new(read_half).lines();
    let result = loop {
        let line = tokio::select! {
            line = lines.next_line() => line,
            _ = shutdown.requested() => {
                debug!("Closing for shutdown");
                break Ok(());
            }
        };

        let line = match line {
            Ok(Some(line)) => line,
            Ok(None) => break Ok(()),
            Err(e) => break Err(e.into()),
        };

        let command = match protocol::decode(&line) {
            Ok(command) => command,
            Err(e) => break Err(e.into()),
        };

        let reply = match dispatcher.dispatch(command, &connection).await {
            Ok(reply) => reply,
            Err(e) => break Err(e.into()),
        };

        // Waits while the client is not reading its replies
        let queued = tokio::select! {
            queued = outbound.send(reply.to_string()) => queued,
            _ = shutdown.requested() => {
                debug!("Closing for shutdown");
                break Ok(());
            }
        };
        if queued.is_err() {
            break Err(ConnectionError::WriterClosed);
        }
    };

    // Dropping the only strong sender lets the writer flush what is queued and stop
    drop(outbound);
    let written = tokio::select! {
        biased;
        written = &mut writer => Some(written),
        _ = shutdown.requested() => None,
    };
    match written {
        Some(Ok(Ok(()))) => {}
        Some(Ok(Err(e))) => warn!(error = %e, "Write failed"),
        Some(Err(e)) => warn!(error = %e, "Writer task failed"),
        None => {
            debug!("Writer aborted for shutdown");
            writer.abort();
        }
    }

    info!("Connection closed");
    result
}

async fn write_lines(
    mut socket: OwnedWriteHalf,
    mut outbound: mpsc::Receiver<String>,
) -> std::io::Result<()> {
    while let Some(mut line) = outbound.recv().await {
        line.push('\n');
        socket.write_all(line.as_bytes()).await?;
    }
    socket.shutdown().await
}
