//! Optional deadlines around blocking transport calls.
//!
//! The protocol itself never times out; callers that want a bound pass one in.

use std::future::Future;
use std::time::Duration;

use crate::error::{ProtocolError, Result};

/// Await `fut`, failing with [`ProtocolError::Timeout`] if `limit` elapses first.
/// `None` waits indefinitely.
pub async fn with_optional_timeout<F, T>(limit: Option<Duration>, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match limit {
        Some(limit) => tokio::time::timeout(limit, fut)
            .await
            .map_err(|_| ProtocolError::Timeout)?,
        None => fut.await,
    }
}
