//! Live Mutation Watcher: keep the panel consistent with the transcript subtree
//! without re-running the full open/extract pipeline.
//!
//! One subscription is live per mounted session. Navigation replaces the
//! transcript subtree wholesale, and watching a detached node is a silent no-op
//! that would desynchronize the view — so the orchestrator drops the previous
//! handle before attaching a new one.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::debug;

use crate::extract;
use crate::host::{HostPage, NodeId};
use crate::render::Binder;

/// Owning handle for one live subtree subscription.
///
/// Dropping the handle aborts the subscription task, which is how the engine
/// invalidates a watch whose target has left the document.
pub struct SubtreeWatch {
    task: JoinHandle<()>,
}

impl SubtreeWatch {
    /// Tear the subscription down explicitly.
    pub fn invalidate(self) {
        self.task.abort();
    }
}

impl Drop for SubtreeWatch {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Subscribe to structural changes under `container` and re-extract-and-render
/// on every observed change.
///
/// Returns `None` when the container can't be subscribed (already gone); the
/// engine then holds no subscription and relies on the navigation watcher's
/// scheduled resync to re-attempt attachment.
pub fn attach(host: Arc<dyn HostPage>, binder: Binder, container: NodeId) -> Option<SubtreeWatch> {
    let mut changes = host.watch_children(container)?;

    let task = tokio::spawn(async move {
        while changes.recv().await.is_some() {
            let snapshot = extract::extract(host.as_ref());
            binder.render(&snapshot);
            debug!(segments = snapshot.len(), "subtree changed; re-rendered");
        }
        // Channel closed: the subtree was removed wholesale. The next
        // navigation cycle attaches a fresh watch.
        debug!("subtree watch ended; container left the document");
    });

    Some(SubtreeWatch { task })
}
