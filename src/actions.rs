//! User-initiated panel actions: summarize and copy-transcript.
//!
//! Unlike the best-effort sync pipeline, failures here are always surfaced to
//! the user synchronously — a user who clicked a button deserves an answer.
//! None of them are fatal to the session.

use std::sync::Arc;

use tracing::debug;

use crate::extract;
use crate::host::{Clipboard, HostPage};
use crate::render::PanelSurface;
use crate::settings::{self, AiPlatform};
use crate::store::SettingsStore;
use crate::{Error, Result};

/// The substitution token inside a prompt template.
pub const PROMPT_TOKEN: &str = "[transcript]";

const NOTICE_NO_PLATFORM: &str = "Please select an AI platform in settings first.";
const NOTICE_EMPTY_TRANSCRIPT: &str = "Transcript is empty or unavailable.";
const NOTICE_COPIED: &str = "Transcript copied to clipboard!";
const NOTICE_COPY_FAILED: &str = "Failed to copy transcript.";

/// Substitute the transcript into a prompt template.
///
/// Exactly the first occurrence of the token is replaced, and the substituted
/// text is never re-scanned — a transcript containing the token literal stays
/// literal in the composed prompt.
pub fn compose_prompt(template: &str, transcript: &str) -> String {
    template.replacen(PROMPT_TOKEN, transcript, 1)
}

fn prefill_notice(platform: AiPlatform) -> String {
    format!(
        "{} does not support prompt prefill via URL. After the page opens, paste your prompt.\n\nPrompt copied to clipboard.",
        platform.label()
    )
}

/// The actions wired to the panel's buttons.
pub struct PanelActions {
    host: Arc<dyn HostPage>,
    surface: Arc<dyn PanelSurface>,
    store: Arc<dyn SettingsStore>,
    clipboard: Arc<dyn Clipboard>,
}

impl PanelActions {
    pub fn new(
        host: Arc<dyn HostPage>,
        surface: Arc<dyn PanelSurface>,
        store: Arc<dyn SettingsStore>,
        clipboard: Arc<dyn Clipboard>,
    ) -> Self {
        Self {
            host,
            surface,
            store,
            clipboard,
        }
    }

    /// Compose the configured prompt around the current transcript and hand it
    /// to the configured destination: prompt to the clipboard, destination
    /// opened in a new page.
    ///
    /// With no destination configured, this surfaces a notice, opens the
    /// settings form, and returns [`Error::UserActionRequired`] without
    /// touching the clipboard or opening anything.
    pub async fn summarize(&self) -> Result<()> {
        let settings = settings::load(self.store.as_ref()).await?;

        let Some(platform) = settings.ai_platform else {
            self.surface.notify(NOTICE_NO_PLATFORM);
            self.surface.open_settings_form();
            return Err(Error::UserActionRequired(NOTICE_NO_PLATFORM.to_string()));
        };

        let transcript = extract::extract(self.host.as_ref()).plain_text();
        if transcript.is_empty() {
            self.surface.notify(NOTICE_EMPTY_TRANSCRIPT);
            return Err(Error::UserActionRequired(
                NOTICE_EMPTY_TRANSCRIPT.to_string(),
            ));
        }

        let prompt = compose_prompt(&settings.prompt, &transcript);
        debug!(destination = platform.label(), "handing prompt off");

        self.surface.notify(&prefill_notice(platform));
        if let Err(err) = self.clipboard.write_text(&prompt).await {
            self.surface.notify(NOTICE_COPY_FAILED);
            return Err(Error::External(format!("clipboard write failed: {err}")));
        }

        self.host.open_external(platform.destination());
        Ok(())
    }

    /// Copy the plain-text transcript to the clipboard.
    pub async fn copy_transcript(&self) -> Result<()> {
        let transcript = extract::extract(self.host.as_ref()).plain_text();
        if transcript.is_empty() {
            self.surface.notify(NOTICE_EMPTY_TRANSCRIPT);
            return Err(Error::UserActionRequired(
                NOTICE_EMPTY_TRANSCRIPT.to_string(),
            ));
        }

        match self.clipboard.write_text(&transcript).await {
            Ok(()) => {
                self.surface.notify(NOTICE_COPIED);
                Ok(())
            }
            Err(err) => {
                self.surface.notify(NOTICE_COPY_FAILED);
                Err(Error::External(format!("clipboard write failed: {err}")))
            }
        }
    }
}
