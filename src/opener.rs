//! Panel Opener: drive the host UI so transcript markup materializes.
//!
//! The host's control set is outside our control and may rename, relocate, or
//! omit controls across versions. Every step here is best-effort: the opener
//! degrades to a no-op rather than fail the pipeline, and callers get a
//! tri-state outcome per step so "already satisfied" stays distinguishable from
//! "could not satisfy".

use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::host::HostPage;

/// Locator for the description-expand control. Expanding the collapsed
/// description can shift or create the disclosure control found in step two.
pub const DESCRIPTION_EXPAND_LOCATOR: &str = "tp-yt-paper-button#expand";

/// Visible label of the transcript disclosure button, compared
/// case-insensitively against trimmed button text.
pub const DISCLOSURE_LABEL: &str = "show transcript";

/// Fixed wait after triggering a host-page action, letting that action's
/// asynchronous effects materialize before the next read.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(700);

/// Outcome of one independently-failable interaction step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The control was found and invoked.
    Done,
    /// The control exists but invoking it wasn't applicable (e.g. hidden).
    NotApplicable,
    /// No such control right now.
    NotFound,
}

/// What the opener managed to do, step by step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenReport {
    pub expand_description: StepOutcome,
    pub disclose_transcript: StepOutcome,
}

/// Run the fixed open sequence: expand the collapsed description, then trigger
/// the transcript disclosure. Idempotent and infallible from the caller's point
/// of view — a missing disclosure control just means the transcript might
/// already be open, or genuinely unavailable.
pub async fn open_panel(host: &dyn HostPage, settle_delay: Duration) -> OpenReport {
    let expand_description = expand_description(host, settle_delay).await;
    debug!(outcome = ?expand_description, "description expand step");

    let disclose_transcript = disclose_transcript(host, settle_delay).await;
    if disclose_transcript == StepOutcome::NotFound {
        warn!("show-transcript button not found");
    }

    OpenReport {
        expand_description,
        disclose_transcript,
    }
}

async fn expand_description(host: &dyn HostPage, settle_delay: Duration) -> StepOutcome {
    match host.query(DESCRIPTION_EXPAND_LOCATOR) {
        Some(node) if host.is_visible(node) => {
            if !host.click(node) {
                // Vanished between query and click; the host mutates freely.
                return StepOutcome::NotFound;
            }
            sleep(settle_delay).await;
            StepOutcome::Done
        }
        Some(_) => StepOutcome::NotApplicable,
        None => StepOutcome::NotFound,
    }
}

async fn disclose_transcript(host: &dyn HostPage, settle_delay: Duration) -> StepOutcome {
    let target = host
        .buttons()
        .into_iter()
        .find(|button| button.label.trim().eq_ignore_ascii_case(DISCLOSURE_LABEL));

    match target {
        Some(button) => {
            if !host.click(button.node) {
                return StepOutcome::NotFound;
            }
            sleep(settle_delay).await;
            StepOutcome::Done
        }
        None => StepOutcome::NotFound,
    }
}
