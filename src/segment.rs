use serde::Serialize;

/// One (position marker, text) unit of spoken content as exposed by the host page.
///
/// `position` is a display-formatted time marker. It is an opaque string — not
/// guaranteed to parse as a duration — so document order, not this field, is the
/// source of truth for transcript ordering. Absent sub-values are normalized to
/// the empty string; neither field is ever "null".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptSegment {
    pub position: String,
    pub text: String,
}

impl TranscriptSegment {
    pub fn new(position: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            position: position.into(),
            text: text.into(),
        }
    }
}

/// An ordered sequence of [`TranscriptSegment`]s in document order.
///
/// An empty snapshot means "unavailable". Snapshots are produced fresh on every
/// extraction and carry no identity across extractions: consumers must treat each
/// one as a full replacement, never a diff.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    segments: Vec<TranscriptSegment>,
}

impl Snapshot {
    pub fn new(segments: Vec<TranscriptSegment>) -> Self {
        Self { segments }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn segments(&self) -> &[TranscriptSegment] {
        &self.segments
    }

    /// Join segment texts into a plain-text transcript, one segment per line.
    ///
    /// Returns an empty string when the snapshot is empty — callers use that to
    /// distinguish "nothing to copy/summarize" without re-checking `is_empty`.
    pub fn plain_text(&self) -> String {
        if self.segments.is_empty() {
            return String::new();
        }

        self.segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl From<Vec<TranscriptSegment>> for Snapshot {
    fn from(segments: Vec<TranscriptSegment>) -> Self {
        Self::new(segments)
    }
}
