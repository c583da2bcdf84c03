//! An in-memory, scriptable [`HostPage`] implementation.
//!
//! Real deployments sit behind a browser bridge; for tests and embedding
//! experiments we want a host whose structure, controls, and mutations can be
//! staged precisely. `ScriptedPage` models the pieces of a document the engine
//! actually touches:
//! - named structural nodes (found via `query`)
//! - button-like elements with labels and click effects
//! - a markup snapshot (what extraction sees)
//! - per-node mutation feeds (what the live watcher sees)
//!
//! It makes no attempt to be a DOM. Click effects are declarative
//! ([`ClickEffect`]) so a test can script "clicking 'Show transcript' makes the
//! transcript markup appear" without closures borrowing the page state.

use std::collections::HashMap;

use parking_lot::Mutex;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::host::{ButtonRef, HostPage, NodeId};

/// What happens when a scripted node is clicked.
#[derive(Debug, Clone)]
pub enum ClickEffect {
    /// Replace the whole document markup and notify every subtree watcher,
    /// the way a host UI materializes transcript markup after a disclosure.
    SwapDocument(String),
    /// Make the node registered under the given selector visible.
    Reveal(String),
    /// No observable effect.
    Nothing,
}

#[derive(Default)]
struct PageState {
    address: String,
    html: String,
    next_node: NodeId,
    /// selector -> node for structural nodes registered via `add_node`.
    nodes: HashMap<String, NodeId>,
    hidden: HashMap<NodeId, bool>,
    buttons: Vec<(NodeId, String)>,
    effects: HashMap<NodeId, ClickEffect>,
    watchers: HashMap<NodeId, Vec<UnboundedSender<()>>>,
    opened: Vec<String>,
    clicked: Vec<NodeId>,
}

impl PageState {
    fn alloc(&mut self) -> NodeId {
        self.next_node += 1;
        self.next_node
    }

    fn exists(&self, node: NodeId) -> bool {
        self.nodes.values().any(|&n| n == node) || self.buttons.iter().any(|(n, _)| *n == node)
    }

    fn notify_watchers(&mut self) {
        for senders in self.watchers.values_mut() {
            senders.retain(|tx| tx.send(()).is_ok());
        }
    }
}

/// A scriptable in-memory host page. Cheap to share (`Arc<ScriptedPage>`), with
/// interior mutability so tests can mutate it while the engine runs.
#[derive(Default)]
pub struct ScriptedPage {
    state: Mutex<PageState>,
}

impl ScriptedPage {
    pub fn new(address: impl Into<String>) -> Self {
        let page = Self::default();
        page.state.lock().address = address.into();
        page
    }

    /// Change the navigation address, as a single-page navigation would.
    /// Deliberately does *not* touch the markup: content swaps lag navigation
    /// on real hosts, and tests stage that lag explicitly.
    pub fn set_address(&self, address: impl Into<String>) {
        self.state.lock().address = address.into();
    }

    /// Replace the document markup and fire every subtree watcher.
    pub fn set_html(&self, html: impl Into<String>) {
        let mut state = self.state.lock();
        state.html = html.into();
        state.notify_watchers();
    }

    /// Register a structural node reachable via `query(selector)`.
    pub fn add_node(&self, selector: impl Into<String>, visible: bool) -> NodeId {
        let mut state = self.state.lock();
        let node = state.alloc();
        state.nodes.insert(selector.into(), node);
        state.hidden.insert(node, !visible);
        node
    }

    /// Remove a structural node. Its watchers' channels close, mirroring a
    /// subtree being dropped wholesale from the document.
    pub fn remove_node(&self, selector: &str) {
        let mut state = self.state.lock();
        if let Some(node) = state.nodes.remove(selector) {
            state.hidden.remove(&node);
            state.watchers.remove(&node);
        }
    }

    /// Register a visible button with a label and a click effect.
    pub fn add_button(&self, label: impl Into<String>, effect: ClickEffect) -> NodeId {
        let mut state = self.state.lock();
        let node = state.alloc();
        state.buttons.push((node, label.into()));
        state.hidden.insert(node, false);
        state.effects.insert(node, effect);
        node
    }

    /// Attach a click effect to an existing structural node.
    pub fn set_effect(&self, node: NodeId, effect: ClickEffect) {
        self.state.lock().effects.insert(node, effect);
    }

    /// Emit one mutation event under `node` without changing the markup.
    pub fn touch_subtree(&self, node: NodeId) {
        let mut state = self.state.lock();
        if let Some(senders) = state.watchers.get_mut(&node) {
            senders.retain(|tx| tx.send(()).is_ok());
        }
    }

    /// Addresses handed to `open_external`, in call order.
    pub fn opened_urls(&self) -> Vec<String> {
        self.state.lock().opened.clone()
    }

    /// Nodes clicked so far, in call order.
    pub fn clicks(&self) -> Vec<NodeId> {
        self.state.lock().clicked.clone()
    }
}

impl HostPage for ScriptedPage {
    fn address(&self) -> String {
        self.state.lock().address.clone()
    }

    fn document_html(&self) -> String {
        self.state.lock().html.clone()
    }

    fn query(&self, selector: &str) -> Option<NodeId> {
        self.state.lock().nodes.get(selector).copied()
    }

    fn buttons(&self) -> Vec<ButtonRef> {
        self.state
            .lock()
            .buttons
            .iter()
            .map(|(node, label)| ButtonRef {
                node: *node,
                label: label.clone(),
            })
            .collect()
    }

    fn is_visible(&self, node: NodeId) -> bool {
        let state = self.state.lock();
        state.exists(node) && !state.hidden.get(&node).copied().unwrap_or(true)
    }

    fn click(&self, node: NodeId) -> bool {
        let effect = {
            let mut state = self.state.lock();
            if !state.exists(node) {
                return false;
            }
            state.clicked.push(node);
            state.effects.get(&node).cloned()
        };

        match effect {
            Some(ClickEffect::SwapDocument(html)) => self.set_html(html),
            Some(ClickEffect::Reveal(selector)) => {
                let mut state = self.state.lock();
                if let Some(target) = state.nodes.get(&selector).copied() {
                    state.hidden.insert(target, false);
                }
            }
            Some(ClickEffect::Nothing) | None => {}
        }

        true
    }

    fn watch_children(&self, node: NodeId) -> Option<UnboundedReceiver<()>> {
        let mut state = self.state.lock();
        if !state.exists(node) {
            return None;
        }
        let (tx, rx) = mpsc::unbounded_channel();
        state.watchers.entry(node).or_default().push(tx);
        Some(rx)
    }

    fn open_external(&self, url: &str) {
        self.state.lock().opened.push(url.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_finds_registered_nodes_only() {
        let page = ScriptedPage::new("https://example.test/watch?v=1");
        let node = page.add_node("#primary", true);

        assert_eq!(page.query("#primary"), Some(node));
        assert_eq!(page.query("#missing"), None);
    }

    #[test]
    fn click_applies_swap_document_effect_and_notifies_watchers() {
        let page = ScriptedPage::new("a");
        let container = page.add_node("#segments-container", true);
        let button = page.add_button("Show transcript", ClickEffect::SwapDocument("<p>hi</p>".into()));

        let mut rx = page.watch_children(container).unwrap();
        assert!(page.click(button));
        assert_eq!(page.document_html(), "<p>hi</p>");
        assert!(rx.try_recv().is_ok());
    }

    #[test]
    fn removed_node_closes_its_watch_channel() {
        let page = ScriptedPage::new("a");
        let container = page.add_node("#segments-container", true);
        let mut rx = page.watch_children(container).unwrap();

        page.remove_node("#segments-container");
        assert!(matches!(
            rx.try_recv(),
            Err(mpsc::error::TryRecvError::Disconnected)
        ));
    }

    #[test]
    fn hidden_nodes_are_not_visible_until_revealed() {
        let page = ScriptedPage::new("a");
        let expand = page.add_node("tp-yt-paper-button#expand", false);
        let button = page.add_button("more", ClickEffect::Reveal("tp-yt-paper-button#expand".into()));

        assert!(!page.is_visible(expand));
        page.click(button);
        assert!(page.is_visible(expand));
    }
}
