//! Element Waiter: poll the document for a structural marker, with a timeout.
//!
//! The host is a single-page application that streams DOM structure in
//! asynchronously after navigation, so a one-shot query would race the host's
//! own rendering. Everything downstream gates on this primitive.

use std::time::Duration;

use tokio::time::{Instant, sleep};

use crate::host::{HostPage, NodeId};
use crate::{Error, Result};

/// How often the waiter re-queries the document.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(300);

/// How long the waiter keeps trying before giving up.
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Wait until a node matching `selector` appears in the document.
///
/// Returns the first match as soon as one is found. Fails with
/// [`Error::Timeout`] — naming the selector, for diagnosability — if nothing
/// matches before `timeout` elapses. Read-only: no side effects beyond queries.
pub async fn wait_for(
    host: &dyn HostPage,
    selector: &str,
    timeout: Duration,
    poll_interval: Duration,
) -> Result<NodeId> {
    let deadline = Instant::now() + timeout;

    loop {
        if let Some(node) = host.query(selector) {
            return Ok(node);
        }

        if Instant::now() + poll_interval >= deadline {
            return Err(Error::Timeout {
                selector: selector.to_string(),
            });
        }

        sleep(poll_interval).await;
    }
}
