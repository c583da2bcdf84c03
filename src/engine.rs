//! Synchronization Orchestrator: the overall lifecycle.
//!
//! One cycle runs strictly in order: wait for structural markers → best-effort
//! panel open → extract → render → attach live watch. The navigation watcher
//! re-enters the post-mount phase whenever the tracked address changes.
//!
//! Session state (current address, mounted singletons, the live watch handle)
//! is an explicit [`SyncSession`] owned by the engine — never ambient
//! module-level state — with the previous watch handle invalidated before a new
//! one is created.

use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::host::HostPage;
use crate::render::{Binder, PanelSurface};
use crate::watch::SubtreeWatch;
use crate::{extract, nav, opener, wait, watch};

/// Every timing constant and locator the engine uses, in one place.
///
/// `Default` carries the production values; tests shrink the durations so a
/// full lifecycle runs in milliseconds.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Structural markers that must appear before a cycle proceeds. All of
    /// them are awaited, in order.
    pub marker_locators: Vec<String>,
    /// How long each marker may take to appear before the cycle fails.
    pub wait_timeout: Duration,
    /// Element waiter poll interval.
    pub poll_interval: Duration,
    /// Settle delay after each host interaction in the open sequence.
    pub settle_delay: Duration,
    /// How often the navigation watcher samples the address.
    pub nav_poll_interval: Duration,
    /// Delay between a detected navigation and the scheduled resync, giving
    /// the host's own content swap time to complete.
    pub navigation_settle: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            marker_locators: vec![
                "#primary #info-contents".to_string(),
                "ytd-watch-flexy".to_string(),
            ],
            wait_timeout: wait::DEFAULT_WAIT_TIMEOUT,
            poll_interval: wait::DEFAULT_POLL_INTERVAL,
            settle_delay: opener::DEFAULT_SETTLE_DELAY,
            nav_poll_interval: nav::DEFAULT_NAV_POLL_INTERVAL,
            navigation_settle: nav::DEFAULT_NAVIGATION_SETTLE,
        }
    }
}

/// Lifecycle state of the current synchronization cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Idle,
    /// Waiting for the host's structural markers to stream in.
    Waiting,
    /// Running the best-effort panel open sequence.
    Opening,
    Extracting,
    Rendered,
    /// Terminal success: a live subtree watch is active.
    Watching,
    /// Terminal failure for this cycle (markers never appeared). The next
    /// navigation gives the engine another full attempt.
    Failed,
}

/// Explicit per-session state. Lives behind a mutex that is never held across
/// an await.
struct SyncSession {
    current_address: String,
    state: SyncState,
    watch: Option<SubtreeWatch>,
}

/// The synchronization engine: mounts the UI surfaces once, keeps the panel
/// eventually consistent with the host's transcript markup, and re-enters the
/// cycle on navigation.
pub struct SyncEngine {
    host: Arc<dyn HostPage>,
    binder: Binder,
    config: EngineConfig,
    session: Mutex<SyncSession>,
    nav_task: Mutex<Option<JoinHandle<()>>>,
    /// Self-handle so `start` can hand an owning clone to the spawned
    /// navigation watcher.
    weak_self: Weak<SyncEngine>,
}

impl SyncEngine {
    pub fn new(
        host: Arc<dyn HostPage>,
        surface: Arc<dyn PanelSurface>,
        config: EngineConfig,
    ) -> Arc<Self> {
        let current_address = host.address();
        Arc::new_cyclic(|weak_self| Self {
            host,
            binder: Binder::new(surface),
            config,
            session: Mutex::new(SyncSession {
                current_address,
                state: SyncState::Idle,
                watch: None,
            }),
            nav_task: Mutex::new(None),
            weak_self: weak_self.clone(),
        })
    }

    /// Start the session: mount the singleton surfaces, run the initial cycle,
    /// then hand lifetime ownership of re-entry to the navigation watcher.
    pub async fn start(&self) {
        self.binder.mount_all();
        self.run_cycle().await;

        if let Some(engine) = self.weak_self.upgrade() {
            let handle = nav::spawn(engine);
            let previous = self.nav_task.lock().replace(handle);
            if let Some(previous) = previous {
                previous.abort();
            }
        }
    }

    /// Re-run the post-mount phase of the lifecycle. Safe to call at any time;
    /// overlapping cycles resolve last-writer-wins on the rendered panel.
    pub async fn resync(&self) {
        self.run_cycle().await;
    }

    /// Stop the session: the navigation watcher and any live subtree watch are
    /// torn down. The engine can be started again afterwards.
    pub fn stop(&self) {
        if let Some(task) = self.nav_task.lock().take() {
            task.abort();
        }
        let mut session = self.session.lock();
        session.watch = None;
        session.state = SyncState::Idle;
    }

    /// The state the current (or last) cycle reached.
    pub fn state(&self) -> SyncState {
        self.session.lock().state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub(crate) fn binder(&self) -> &Binder {
        &self.binder
    }

    /// Sample the host address against the session's last-seen value,
    /// recording the new one on change. Returns whether it changed.
    pub(crate) fn address_changed(&self) -> bool {
        let address = self.host.address();
        let mut session = self.session.lock();
        if session.current_address == address {
            return false;
        }
        debug!(from = %session.current_address, to = %address, "navigation detected");
        session.current_address = address;
        true
    }

    fn set_state(&self, next: SyncState) {
        let mut session = self.session.lock();
        debug!(from = ?session.state, to = ?next, "sync state");
        session.state = next;
    }

    async fn run_cycle(&self) {
        self.set_state(SyncState::Waiting);
        for locator in &self.config.marker_locators {
            let waited = wait::wait_for(
                self.host.as_ref(),
                locator,
                self.config.wait_timeout,
                self.config.poll_interval,
            )
            .await;

            if let Err(err) = waited {
                warn!(%err, "structural marker never appeared; aborting cycle");
                self.set_state(SyncState::Failed);
                return;
            }
        }

        self.set_state(SyncState::Opening);
        let report = opener::open_panel(self.host.as_ref(), self.config.settle_delay).await;
        debug!(?report, "panel open sequence finished");

        self.set_state(SyncState::Extracting);
        let snapshot = extract::extract(self.host.as_ref());

        self.set_state(SyncState::Rendered);
        self.binder.render(&snapshot);

        // Invalidate the previous subscription before creating a new one: its
        // target subtree is replaced wholesale on navigation.
        let previous = self.session.lock().watch.take();
        drop(previous);

        let attached = extract::container_node(self.host.as_ref())
            .and_then(|container| watch::attach(Arc::clone(&self.host), self.binder.clone(), container));

        match attached {
            Some(subscription) => {
                self.session.lock().watch = Some(subscription);
                self.set_state(SyncState::Watching);
            }
            None => {
                // Expected when no transcript exists; the navigation watcher's
                // next resync re-attempts attachment.
                debug!("no transcript container to watch");
            }
        }
    }
}
