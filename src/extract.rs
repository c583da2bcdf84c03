//! Segment Extractor: turn whatever transcript markup is currently present into
//! a structured [`Snapshot`].
//!
//! Absence is an expected, common state — many videos have no transcript, or it
//! hasn't been opened yet — so a total miss returns an empty snapshot, never an
//! error. Partial or malformed segment nodes degrade field-by-field instead of
//! blanking out otherwise-good siblings.

use scraper::{ElementRef, Html, Selector};

use crate::host::{HostPage, NodeId};
use crate::segment::{Snapshot, TranscriptSegment};

/// Candidate transcript-container locators, tried in order: the current host
/// markup first, then the legacy fallback.
pub const CONTAINER_LOCATORS: [&str; 2] =
    ["#segments-container", "ytd-transcript-body-renderer #segments"];

const SEGMENT_LOCATOR: &str = "ytd-transcript-segment-renderer .segment";
const POSITION_LOCATOR: &str = ".segment-timestamp";
const TEXT_LOCATOR: &str = ".segment-text";

/// Extract a snapshot from the host's current document state.
pub fn extract(host: &dyn HostPage) -> Snapshot {
    extract_from_html(&host.document_html())
}

/// Find the live transcript container node, if the host currently has one.
///
/// Uses the same candidate locators as extraction so the subtree watch and the
/// extractor always agree on which container is "the" transcript.
pub fn container_node(host: &dyn HostPage) -> Option<NodeId> {
    CONTAINER_LOCATORS
        .iter()
        .find_map(|locator| host.query(locator))
}

/// Parse transcript segments out of a markup snapshot.
///
/// Ordering of the returned segments is strictly document order; the position
/// markers are opaque display strings and play no part in ordering.
pub fn extract_from_html(html: &str) -> Snapshot {
    let document = Html::parse_document(html);

    let Some(container) = find_container(&document) else {
        return Snapshot::empty();
    };

    let Ok(segment_sel) = Selector::parse(SEGMENT_LOCATOR) else {
        return Snapshot::empty();
    };
    let Ok(position_sel) = Selector::parse(POSITION_LOCATOR) else {
        return Snapshot::empty();
    };
    let Ok(text_sel) = Selector::parse(TEXT_LOCATOR) else {
        return Snapshot::empty();
    };

    let segments = container
        .select(&segment_sel)
        .map(|node| TranscriptSegment {
            position: first_text(node, &position_sel),
            text: first_text(node, &text_sel),
        })
        .collect();

    Snapshot::new(segments)
}

fn find_container<'a>(document: &'a Html) -> Option<ElementRef<'a>> {
    for locator in CONTAINER_LOCATORS {
        let Ok(selector) = Selector::parse(locator) else {
            continue;
        };
        if let Some(element) = document.select(&selector).next() {
            return Some(element);
        }
    }
    None
}

/// Collect the trimmed text of the first match under `scope`, or an empty
/// string when the sub-node is absent. Either sub-node may legitimately be
/// missing on a given segment; that never aborts the extraction.
fn first_text(scope: ElementRef<'_>, selector: &Selector) -> String {
    scope
        .select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment_markup(position: &str, text: &str) -> String {
        format!(
            "<ytd-transcript-segment-renderer><div class=\"segment\">\
             <div class=\"segment-timestamp\">{position}</div>\
             <yt-formatted-string class=\"segment-text\">{text}</yt-formatted-string>\
             </div></ytd-transcript-segment-renderer>"
        )
    }

    #[test]
    fn extracts_segments_in_document_order() {
        let html = format!(
            "<div id=\"segments-container\">{}{}{}</div>",
            segment_markup("0:00", "first"),
            segment_markup("0:04", "second"),
            segment_markup("0:09", "third"),
        );

        let snapshot = extract_from_html(&html);

        assert_eq!(
            snapshot.segments(),
            &[
                TranscriptSegment::new("0:00", "first"),
                TranscriptSegment::new("0:04", "second"),
                TranscriptSegment::new("0:09", "third"),
            ]
        );
    }

    #[test]
    fn missing_container_yields_empty_snapshot() {
        let snapshot = extract_from_html("<body><div id=\"unrelated\"></div></body>");
        assert!(snapshot.is_empty());
    }

    #[test]
    fn empty_document_yields_empty_snapshot() {
        assert!(extract_from_html("").is_empty());
    }

    #[test]
    fn falls_back_to_the_legacy_container_locator() {
        let html = format!(
            "<ytd-transcript-body-renderer><div id=\"segments\">{}</div></ytd-transcript-body-renderer>",
            segment_markup("1:23", "legacy markup"),
        );

        let snapshot = extract_from_html(&html);

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.segments()[0].text, "legacy markup");
    }

    #[test]
    fn missing_sub_nodes_become_empty_fields_without_hurting_siblings() {
        let html = format!(
            "<div id=\"segments-container\">\
             {}\
             <ytd-transcript-segment-renderer><div class=\"segment\">\
             <div class=\"segment-timestamp\">0:07</div>\
             </div></ytd-transcript-segment-renderer>\
             <ytd-transcript-segment-renderer><div class=\"segment\">\
             <yt-formatted-string class=\"segment-text\">text only</yt-formatted-string>\
             </div></ytd-transcript-segment-renderer>\
             {}</div>",
            segment_markup("0:00", "intact"),
            segment_markup("0:12", "also intact"),
        );

        let snapshot = extract_from_html(&html);

        assert_eq!(
            snapshot.segments(),
            &[
                TranscriptSegment::new("0:00", "intact"),
                TranscriptSegment::new("0:07", ""),
                TranscriptSegment::new("", "text only"),
                TranscriptSegment::new("0:12", "also intact"),
            ]
        );
    }

    #[test]
    fn whitespace_around_marker_and_text_is_trimmed() {
        let html = "<div id=\"segments-container\">\
                    <ytd-transcript-segment-renderer><div class=\"segment\">\
                    <div class=\"segment-timestamp\">  0:01\n</div>\
                    <yt-formatted-string class=\"segment-text\">\n  spaced out  </yt-formatted-string>\
                    </div></ytd-transcript-segment-renderer></div>";

        let snapshot = extract_from_html(html);

        assert_eq!(
            snapshot.segments(),
            &[TranscriptSegment::new("0:01", "spaced out")]
        );
    }

    #[test]
    fn container_without_segment_nodes_yields_empty_snapshot() {
        let snapshot =
            extract_from_html("<div id=\"segments-container\"><p>no transcript here</p></div>");
        assert!(snapshot.is_empty());
    }
}
