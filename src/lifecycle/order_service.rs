use super::shutdown::{self, Shutdown, ShutdownTrigger};
use crate::config::ServiceConfig;
use crate::directory::ConnectionDirectory;
use crate::fulfillment::FulfillmentScheduler;
use crate::registry::{self, RegistryClient};
use crate::server::{self, Dispatcher};
use std::io;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{error, info};

/// A service task panicked or was aborted.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Service task failed: {0}")]
    TaskFailed(String),
}

/// The runtime orchestrator for one order-tracking service instance.
///
/// `OrderService` is responsible for:
/// - **Lifecycle Management**: Starting the registry actor and accept loops, and stopping them
/// - **Dependency Wiring**: Handing the directory to the registry, and the registry to the scheduler and dispatcher
/// - **Isolation**: Every instance owns its own orders, bindings and id counter
///
/// # Example
///
/// ```ignore
/// let mut service = OrderService::new(&ServiceConfig::default());
/// let addr = service.listen(TcpListener::bind("127.0.0.1:0").await?)?;
///
/// // ... clients talk to `addr` ...
///
/// service.shutdown().await?;
/// ```
pub struct OrderService {
    /// Client for the registry actor
    pub registry: RegistryClient,

    /// Order-to-connection bindings shared with the registry and notifier
    pub directory: ConnectionDirectory,

    /// Spawns one fulfillment task per accepted order
    pub scheduler: FulfillmentScheduler,

    max_connections: Option<usize>,
    trigger: ShutdownTrigger,

    /// Task handles for the registry and accept loops (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl OrderService {
    /// Creates and starts a new `OrderService`.
    ///
    /// This method:
    /// 1. Creates the connection directory and the shutdown signal
    /// 2. Spawns the registry actor with the directory injected as its context
    /// 3. Builds the fulfillment scheduler on top of the registry client
    ///
    /// No socket is opened; see [`OrderService::listen`].
    pub fn new(config: &ServiceConfig) -> Self {
        let directory = ConnectionDirectory::new();
        let (trigger, shutdown) = shutdown::channel();

        let (registry_actor, registry) = registry::new(config.registry_buffer);
        let registry_handle = tokio::spawn(registry_actor.run(directory.clone()));

        let scheduler = FulfillmentScheduler::new(registry.clone(), config.fulfillment_delay(), shutdown);

        info!(
            delay_ms = config.fulfillment_delay_ms,
            max_connections = ?config.max_connections,
            "Order service started"
        );

        Self {
            registry,
            directory,
            scheduler,
            max_connections: config.max_connections,
            trigger,
            handles: vec![registry_handle],
        }
    }

    /// The request path shared by every connection of this service.
    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher::new(self.registry.clone(), self.scheduler.clone())
    }

    pub fn shutdown_signal(&self) -> Shutdown {
        self.trigger.subscribe()
    }

    /// Starts accepting connections on `listener` and returns its address.
    pub fn listen(&mut self, listener: TcpListener) -> io::Result<SocketAddr> {
        let addr = listener.local_addr()?;
        info!(%addr, "Listening");

        let accept_loop = server::serve(
            listener,
            self.dispatcher(),
            self.max_connections,
            self.shutdown_signal(),
        );
        self.handles.push(tokio::spawn(accept_loop));
        Ok(addr)
    }

    /// Gracefully shuts down the service.
    ///
    /// # Shutdown Process
    ///
    /// 1. Fire the shutdown signal: accept loops stop, connections close,
    ///    pending fulfillments are abandoned.
    /// 2. Drop this instance's registry clients.
    /// 3. Wait for the registry actor and accept loops to finish. The registry
    ///    exits once the last connection and fulfillment task let go of it.
    ///
    /// All order state is discarded.
    pub async fn shutdown(self) -> Result<(), ServiceError> {
        info!("Shutting down order service...");

        self.trigger.fire();
        drop(self.registry);
        drop(self.scheduler);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Service task failed: {:?}", e);
                return Err(ServiceError::TaskFailed(e.to_string()));
            }
        }

        info!("Order service shutdown complete.");
        Ok(())
    }
}
