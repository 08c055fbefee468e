//! Exchange Metrics
//!
//! Counters for the serving loop: how many datagrams arrived, how many were
//! answered, refused or thrown away, and which classes were asked for.
//!
//! Uses atomic counters so a server handle can be shared with a reporter task.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::{debug, info};

use crate::password::PasswordClass;

/// Metrics collector for one server
#[derive(Debug)]
pub struct Metrics {
    /// Well-formed requests decoded
    pub requests_received: AtomicU64,
    /// Responses carrying a password
    pub responses_sent: AtomicU64,
    /// Requests answered with a rejection
    pub requests_rejected: AtomicU64,
    /// Datagrams of the wrong size or encoding
    pub malformed_datagrams: AtomicU64,
    /// Send/receive failures
    pub transport_errors: AtomicU64,
    /// Bytes received in well-formed requests
    pub bytes_received: AtomicU64,
    /// Bytes sent in responses
    pub bytes_sent: AtomicU64,
    /// Generated passwords, indexed like [`PasswordClass::ALL`]
    per_class: [AtomicU64; 5],
    start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            requests_received: AtomicU64::new(0),
            responses_sent: AtomicU64::new(0),
            requests_rejected: AtomicU64::new(0),
            malformed_datagrams: AtomicU64::new(0),
            transport_errors: AtomicU64::new(0),
            bytes_received: AtomicU64::new(0),
            bytes_sent: AtomicU64::new(0),
            per_class: Default::default(),
            start_time: Instant::now(),
        }
    }

    pub fn request_received(&self, byte_count: u64) {
        self.requests_received.fetch_add(1, Ordering::Relaxed);
        self.bytes_received.fetch_add(byte_count, Ordering::Relaxed);
    }

    /// Record a password generated for `class` and sent back
    pub fn response_sent(&self, class: PasswordClass, byte_count: u64) {
        self.responses_sent.fetch_add(1, Ordering::Relaxed);
        self.bytes_sent.fetch_add(byte_count, Ordering::Relaxed);
        self.per_class[class_index(class)].fetch_add(1, Ordering::Relaxed);
    }

    pub fn request_rejected(&self, byte_count: u64) {
        self.requests_rejected.fetch_add(1, Ordering::Relaxed);
        self.bytes_sent.fetch_add(byte_count, Ordering::Relaxed);
    }

    pub fn malformed_datagram(&self) {
        self.malformed_datagrams.fetch_add(1, Ordering::Relaxed);
    }

    pub fn transport_error(&self) {
        self.transport_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn generated(&self, class: PasswordClass) -> u64 {
        self.per_class[class_index(class)].load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests_received: self.requests_received.load(Ordering::Relaxed),
            responses_sent: self.responses_sent.load(Ordering::Relaxed),
            requests_rejected: self.requests_rejected.load(Ordering::Relaxed),
            malformed_datagrams: self.malformed_datagrams.load(Ordering::Relaxed),
            transport_errors: self.transport_errors.load(Ordering::Relaxed),
            bytes_received: self.bytes_received.load(Ordering::Relaxed),
            bytes_sent: self.bytes_sent.load(Ordering::Relaxed),
            generated: PasswordClass::ALL.map(|class| (class, self.generated(class))),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }

    pub fn log_summary(&self) {
        let snapshot = self.snapshot();
        info!(
            requests_received = snapshot.requests_received,
            responses_sent = snapshot.responses_sent,
            requests_rejected = snapshot.requests_rejected,
            malformed_datagrams = snapshot.malformed_datagrams,
            transport_errors = snapshot.transport_errors,
            bytes_received = snapshot.bytes_received,
            bytes_sent = snapshot.bytes_sent,
            uptime_seconds = snapshot.uptime_seconds,
            "Exchange metrics snapshot"
        );
        for (class, count) in snapshot.generated {
            debug!(class = %class, count, "Generated passwords by class");
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

fn class_index(class: PasswordClass) -> usize {
    match class {
        PasswordClass::Numeric => 0,
        PasswordClass::Alpha => 1,
        PasswordClass::Mixed => 2,
        PasswordClass::Secure => 3,
        PasswordClass::Unambiguous => 4,
    }
}

/// Snapshot of metrics at a point in time
#[derive(Debug, Clone)]
pub struct MetricsSnapshot {
    pub requests_received: u64,
    pub responses_sent: u64,
    pub requests_rejected: u64,
    pub malformed_datagrams: u64,
    pub transport_errors: u64,
    pub bytes_received: u64,
    pub bytes_sent: u64,
    pub generated: [(PasswordClass, u64); 5],
    pub uptime_seconds: u64,
}
