//! # Utility Modules
//!
//! Supporting utilities for logging, metrics and deadlines.
//!
//! ## Components
//! - **Logging**: Structured logging configuration
//! - **Metrics**: Thread-safe exchange counters
//! - **Timeout**: Optional deadline around a blocking receive

pub mod logging;
pub mod metrics;
pub mod timeout;

pub use metrics::{Metrics, MetricsSnapshot};
