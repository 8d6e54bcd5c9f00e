//! # Shutdown Signal
//!
//! A one-way broadcast telling long-running tasks (the accept loop, connection
//! handlers, pending fulfillments) that the service is going away.

use tokio::sync::watch;

/// Creates a linked trigger/listener pair.
pub fn channel() -> (ShutdownTrigger, Shutdown) {
    let (sender, receiver) = watch::channel(false);
    (ShutdownTrigger { sender }, Shutdown { receiver })
}

/// The firing side, held by [`OrderService`](super::OrderService).
#[derive(Debug)]
pub struct ShutdownTrigger {
    sender: watch::Sender<bool>,
}

impl ShutdownTrigger {
    pub fn fire(&self) {
        self.sender.send_replace(true);
    }

    pub fn subscribe(&self) -> Shutdown {
        Shutdown {
            receiver: self.sender.subscribe(),
        }
    }
}

/// The listening side. Cheap to clone into every task.
#[derive(Debug, Clone)]
pub struct Shutdown {
    receiver: watch::Receiver<bool>,
}

impl Shutdown {
    pub fn is_requested(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Resolves once shutdown has been fired, or the trigger has been dropped.
    ///
    /// Cancel safe; meant to be used as a `tokio::select!` branch.
    pub async fn requested(&mut self) {
        // An Err means the trigger is gone, which is as final as firing it
        let _ = self.receiver.wait_for(|fired| *fired).await;
    }
}
