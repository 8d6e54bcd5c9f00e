//! # Service Configuration
//!
//! Every setting is a command-line flag that can also come from the
//! environment:
//!
//! ```bash
//! order-tracker --bind 127.0.0.1:5500 --fulfillment-delay-ms 2000
//! ORDER_TRACKER_MAX_CONNECTIONS=256 order-tracker
//! ```

use crate::fulfillment::DEFAULT_DELAY;
use crate::registry::DEFAULT_BUFFER;
use clap::Parser;
use std::time::Duration;

pub const DEFAULT_BIND: &str = "0.0.0.0:5500";

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(author, version, about = "Restaurant order tracking server", long_about = None)]
pub struct ServiceConfig {
    /// Address the order listener binds to
    #[arg(long, env = "ORDER_TRACKER_BIND", default_value = DEFAULT_BIND)]
    pub bind: String,

    /// Simulated preparation time before an order becomes ready
    #[arg(long, env = "ORDER_TRACKER_FULFILLMENT_DELAY_MS", default_value_t = DEFAULT_DELAY.as_millis() as u64)]
    pub fulfillment_delay_ms: u64,

    /// Capacity of the registry's request queue
    #[arg(long, env = "ORDER_TRACKER_REGISTRY_BUFFER", default_value_t = DEFAULT_BUFFER)]
    pub registry_buffer: usize,

    /// Maximum number of simultaneously served connections (unlimited when unset)
    #[arg(long, env = "ORDER_TRACKER_MAX_CONNECTIONS")]
    pub max_connections: Option<usize>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            fulfillment_delay_ms: DEFAULT_DELAY.as_millis() as u64,
            registry_buffer: DEFAULT_BUFFER,
            max_connections: None,
        }
    }
}

impl ServiceConfig {
    pub fn fulfillment_delay(&self) -> Duration {
        Duration::from_millis(self.fulfillment_delay_ms)
    }

    pub fn with_fulfillment_delay(mut self, delay: Duration) -> Self {
        self.fulfillment_delay_ms = delay.as_millis() as u64;
        self
    }
}
