//! Timeout guard for upstream calls

use super::fetcher::UpstreamError;
use std::future::Future;
use std::time::Duration;

/// Race `operation` against a deadline
///
/// Returns the operation's own outcome if it settles first, otherwise
/// [`UpstreamError::Timeout`]. The losing operation is dropped, not awaited:
/// for reqwest futures that abandons the connection. Nothing is spawned, so a
/// late failure of the abandoned call can never surface anywhere.
pub async fn with_timeout<T, F>(operation: F, limit: Duration) -> Result<T, UpstreamError>
where
    F: Future<Output = Result<T, UpstreamError>>,
{
    match tokio::time::timeout(limit, operation).await {
        Ok(outcome) => outcome,
        Err(_) => Err(UpstreamError::Timeout(limit)),
    }
}
