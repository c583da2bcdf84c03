//! Render/Bind Layer: singleton mounting and panel repaints.
//!
//! The engine owns a handful of UI surfaces inside the host document. This
//! layer guarantees two things:
//! - each surface is mounted at most once, however many times the orchestrator
//!   is re-entered (`mount_once`)
//! - the panel's content region is always a full repaint of the latest
//!   extraction result, never an incremental patch (`render`)

use std::sync::Arc;

use tracing::debug;

use crate::segment::{Snapshot, TranscriptSegment};

/// Status shown when an extraction came back empty. "Not yet loaded" and
/// "confirmed unavailable" are the same empty-snapshot render; only the text
/// distinguishes them for the user.
pub const STATUS_UNAVAILABLE: &str = "Transcript not available or not loaded.";

/// Transient status shown while a navigation's content swap settles.
pub const STATUS_LOADING: &str = "Loading new video transcript...";

/// Identity of a singleton UI surface. At most one of each exists in the
/// document at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceId {
    /// The control that shows/hides the panel.
    ToggleControl,
    /// The side panel itself (content and status regions included).
    Panel,
    /// The summarize entry point placed near the host's own controls.
    SummarizeEntry,
}

impl SurfaceId {
    /// All surfaces the engine mounts, in mount order.
    pub const ALL: [SurfaceId; 3] = [
        SurfaceId::Panel,
        SurfaceId::ToggleControl,
        SurfaceId::SummarizeEntry,
    ];
}

/// The rendered panel's mount points, owned exclusively by this layer.
///
/// Implementations handle the actual widget construction and styling; the
/// engine only cares about identity checks, repaints, and user notices.
pub trait PanelSurface: Send + Sync {
    /// Whether the singleton identified by `id` already exists in the document.
    fn is_mounted(&self, id: SurfaceId) -> bool;

    /// Construct and insert the singleton. Only called when absent.
    fn mount(&self, id: SurfaceId);

    /// Repaint the content region with these segments, replacing whatever was
    /// there.
    fn set_segments(&self, segments: &[TranscriptSegment]);

    /// Empty the content region.
    fn clear_segments(&self);

    /// Show a message in the status region.
    fn show_status(&self, text: &str);

    /// Hide the status region.
    fn clear_status(&self);

    /// Surface a blocking user notice (the host equivalent of an alert).
    fn notify(&self, message: &str);

    /// Open the settings form inside the panel.
    fn open_settings_form(&self);
}

/// Binds the engine to a [`PanelSurface`], enforcing mount-once semantics and
/// full-replacement rendering. Cheap to clone; clones share the surface.
#[derive(Clone)]
pub struct Binder {
    surface: Arc<dyn PanelSurface>,
}

impl Binder {
    pub fn new(surface: Arc<dyn PanelSurface>) -> Self {
        Self { surface }
    }

    pub fn surface(&self) -> &Arc<dyn PanelSurface> {
        &self.surface
    }

    /// Mount the singleton once: an already-present surface is left untouched.
    pub fn mount_once(&self, id: SurfaceId) {
        if self.surface.is_mounted(id) {
            debug!(surface = ?id, "surface already mounted; skipping");
            return;
        }
        self.surface.mount(id);
    }

    /// Mount every engine-owned surface.
    pub fn mount_all(&self) {
        for id in SurfaceId::ALL {
            self.mount_once(id);
        }
    }

    /// Fully repaint the panel from a snapshot. An empty snapshot renders the
    /// unavailable-status message instead of an empty content region.
    pub fn render(&self, snapshot: &Snapshot) {
        if snapshot.is_empty() {
            self.surface.show_status(STATUS_UNAVAILABLE);
            self.surface.clear_segments();
            return;
        }

        self.surface.clear_status();
        self.surface.set_segments(snapshot.segments());
    }

    /// Clear the previous item's transcript and show the loading status, ahead
    /// of a scheduled resynchronization.
    pub fn clear_for_navigation(&self) {
        self.surface.clear_segments();
        self.surface.show_status(STATUS_LOADING);
    }
}
