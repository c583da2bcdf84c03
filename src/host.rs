//! Traits describing the uncontrolled host page and its environment.
//!
//! The engine never talks to a real browser directly; everything it needs from
//! the outside world goes through these traits:
//! - [`HostPage`]: the third-party document (queries, clicks, mutation feeds)
//! - [`Clipboard`]: the async, may-reject clipboard
//!
//! The host's schema is uncontrolled: any query may come back empty at any time,
//! and implementations must never be assumed to succeed. The engine treats every
//! accessor here as fallible-by-absence.

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::Result;

pub mod scripted;

/// Opaque identity of a live node in the host document.
///
/// Node ids are only meaningful to the [`HostPage`] that issued them, and only
/// for as long as the node stays in the document. A stale id degrades to
/// "absent" behavior (clicks fail, watches end) rather than panicking.
pub type NodeId = u64;

/// A button-like element found in the host document.
#[derive(Debug, Clone)]
pub struct ButtonRef {
    pub node: NodeId,
    /// The button's visible label text, as rendered (untrimmed).
    pub label: String,
}

/// Read/write access to the continuously-mutating host document.
///
/// All methods are synchronous snapshots of "the document right now"; there is
/// no coherence guarantee between two consecutive calls, which is exactly the
/// situation a content script faces against a streaming single-page app.
pub trait HostPage: Send + Sync {
    /// The navigation address of the currently displayed content item.
    ///
    /// This can change without a full document reload; the navigation watcher
    /// samples it to detect item changes.
    fn address(&self) -> String;

    /// A markup snapshot of the current document, for structured extraction.
    fn document_html(&self) -> String;

    /// Find the first node matching a CSS-style selector, if any.
    fn query(&self, selector: &str) -> Option<NodeId>;

    /// All button-like elements currently in the document.
    fn buttons(&self) -> Vec<ButtonRef>;

    /// Whether the node currently has a layout box (is rendered and visible).
    fn is_visible(&self, node: NodeId) -> bool;

    /// Invoke the node's activation behavior. Returns `false` if the node is
    /// gone or not clickable; callers treat that as "not found", never as fatal.
    fn click(&self, node: NodeId) -> bool;

    /// Subscribe to structural changes (child additions/removals, at any depth)
    /// under `node`. Returns `None` if the node is no longer in the document.
    ///
    /// The channel closes when the watched subtree is removed wholesale, which
    /// is how navigation replaces the transcript container.
    fn watch_children(&self, node: NodeId) -> Option<UnboundedReceiver<()>>;

    /// Open a destination address in a new browsing context. Fire-and-forget:
    /// there is no return channel.
    fn open_external(&self, url: &str);
}

/// Write-only clipboard access. The write is async and may be rejected by the
/// environment (permissions, focus), so it returns a `Result`.
#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<()>;
}
