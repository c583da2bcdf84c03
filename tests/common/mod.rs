//! Shared fixtures for the integration suite: a recording panel surface, a
//! scriptable clipboard, and transcript markup builders.

// Each integration target compiles its own copy; not every target uses every helper.
#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use tubeside::host::Clipboard;
use tubeside::render::{PanelSurface, SurfaceId};
use tubeside::segment::TranscriptSegment;

/// Everything the engine did to the surface, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    Mounted(SurfaceId),
    Segments(Vec<TranscriptSegment>),
    ClearedSegments,
    Status(String),
    ClearedStatus,
    Notice(String),
    OpenedSettings,
}

/// A [`PanelSurface`] that records every call and tracks current panel state.
#[derive(Default)]
pub struct RecordingSurface {
    events: Mutex<Vec<SurfaceEvent>>,
    mounted: Mutex<Vec<SurfaceId>>,
    segments: Mutex<Vec<TranscriptSegment>>,
    status: Mutex<Option<String>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SurfaceEvent> {
        self.events.lock().clone()
    }

    pub fn mounted_surfaces(&self) -> Vec<SurfaceId> {
        self.mounted.lock().clone()
    }

    pub fn current_segments(&self) -> Vec<TranscriptSegment> {
        self.segments.lock().clone()
    }

    pub fn current_status(&self) -> Option<String> {
        self.status.lock().clone()
    }

    pub fn notices(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SurfaceEvent::Notice(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    /// How many full content repaints happened.
    pub fn render_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, SurfaceEvent::Segments(_)))
            .count()
    }

    pub fn settings_opened_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, SurfaceEvent::OpenedSettings))
            .count()
    }

    fn push(&self, event: SurfaceEvent) {
        self.events.lock().push(event);
    }
}

impl PanelSurface for RecordingSurface {
    fn is_mounted(&self, id: SurfaceId) -> bool {
        self.mounted.lock().contains(&id)
    }

    fn mount(&self, id: SurfaceId) {
        self.mounted.lock().push(id);
        self.push(SurfaceEvent::Mounted(id));
    }

    fn set_segments(&self, segments: &[TranscriptSegment]) {
        *self.segments.lock() = segments.to_vec();
        self.push(SurfaceEvent::Segments(segments.to_vec()));
    }

    fn clear_segments(&self) {
        self.segments.lock().clear();
        self.push(SurfaceEvent::ClearedSegments);
    }

    fn show_status(&self, text: &str) {
        *self.status.lock() = Some(text.to_string());
        self.push(SurfaceEvent::Status(text.to_string()));
    }

    fn clear_status(&self) {
        *self.status.lock() = None;
        self.push(SurfaceEvent::ClearedStatus);
    }

    fn notify(&self, message: &str) {
        self.push(SurfaceEvent::Notice(message.to_string()));
    }

    fn open_settings_form(&self) {
        self.push(SurfaceEvent::OpenedSettings);
    }
}

/// A clipboard that records writes, and can be told to reject them.
#[derive(Default)]
pub struct RecordingClipboard {
    writes: Mutex<Vec<String>>,
    rejecting: AtomicBool,
}

impl RecordingClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting() -> Self {
        let clipboard = Self::default();
        clipboard.rejecting.store(true, Ordering::SeqCst);
        clipboard
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().clone()
    }
}

#[async_trait]
impl Clipboard for RecordingClipboard {
    async fn write_text(&self, text: &str) -> tubeside::Result<()> {
        if self.rejecting.load(Ordering::SeqCst) {
            return Err(tubeside::Error::Message(
                "clipboard rejected the write".to_string(),
            ));
        }
        self.writes.lock().push(text.to_string());
        Ok(())
    }
}

/// Build host-shaped transcript markup for the given (position, text) pairs.
pub fn transcript_html(entries: &[(&str, &str)]) -> String {
    let segments: String = entries
        .iter()
        .map(|(position, text)| {
            format!(
                "<ytd-transcript-segment-renderer><div class=\"segment\">\
                 <div class=\"segment-timestamp\">{position}</div>\
                 <yt-formatted-string class=\"segment-text\">{text}</yt-formatted-string>\
                 </div></ytd-transcript-segment-renderer>"
            )
        })
        .collect();

    format!("<div id=\"segments-container\">{segments}</div>")
}

pub fn segment(position: &str, text: &str) -> TranscriptSegment {
    TranscriptSegment::new(position, text)
}
