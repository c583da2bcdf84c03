//! Persisted user settings: the summarize destination and the prompt template.
//!
//! The record lives under a single storage key, serialized with the same field
//! names earlier deployments persisted (`aiPlatform`, `prompt`), so existing
//! records keep loading. Absent or undecodable records resolve to defaults;
//! settings are only ever mutated through `save`.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::Result;
use crate::store::SettingsStore;

/// The one key the settings record is persisted under.
pub const STORAGE_KEY: &str = "ytTranscriptSidebarSettings";

/// Default prompt template. `[transcript]` is the substitution token.
pub const DEFAULT_PROMPT: &str = "Summarize this YouTube video transcript:\n\n[transcript]";

/// A supported summarize destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiPlatform {
    ChatGpt,
    Gemini,
    Claude,
}

impl AiPlatform {
    /// Destination address opened in a new browsing context. None of these
    /// support prompt prefill via URL; the prompt is handed off via clipboard.
    pub fn destination(&self) -> &'static str {
        match self {
            AiPlatform::ChatGpt => "https://chat.openai.com/chat",
            AiPlatform::Gemini => "https://gemini.google.com/",
            AiPlatform::Claude => "https://claude.ai/",
        }
    }

    /// Human-readable name used in user notices.
    pub fn label(&self) -> &'static str {
        match self {
            AiPlatform::ChatGpt => "ChatGPT",
            AiPlatform::Gemini => "Gemini",
            AiPlatform::Claude => "Claude",
        }
    }
}

/// The persisted settings record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    #[serde(default)]
    pub ai_platform: Option<AiPlatform>,
    #[serde(default = "default_prompt")]
    pub prompt: String,
}

fn default_prompt() -> String {
    DEFAULT_PROMPT.to_string()
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            ai_platform: None,
            prompt: default_prompt(),
        }
    }
}

impl UserSettings {
    /// A copy with an empty or whitespace-only prompt reverted to the default
    /// template. Applied on save so a cleared form never persists a prompt the
    /// summarize action can't use.
    pub fn normalized(&self) -> Self {
        let prompt = self.prompt.trim();
        Self {
            ai_platform: self.ai_platform,
            prompt: if prompt.is_empty() {
                default_prompt()
            } else {
                self.prompt.clone()
            },
        }
    }
}

/// Load the settings record, creating defaults when the store has none.
///
/// An undecodable record is treated like an absent one (logged, defaults
/// returned) — a corrupt record must not wedge every user-initiated action.
pub async fn load(store: &dyn SettingsStore) -> Result<UserSettings> {
    match store.get(STORAGE_KEY).await? {
        Some(value) => match serde_json::from_value(value) {
            Ok(settings) => Ok(settings),
            Err(err) => {
                warn!(%err, "undecodable settings record; falling back to defaults");
                Ok(UserSettings::default())
            }
        },
        None => Ok(UserSettings::default()),
    }
}

/// Persist the (normalized) settings record as a whole-record replacement.
pub async fn save(store: &dyn SettingsStore, settings: &UserSettings) -> Result<()> {
    let normalized = settings.normalized();
    store
        .set(STORAGE_KEY, serde_json::to_value(&normalized)?)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn absent_record_loads_as_defaults() -> anyhow::Result<()> {
        let store = MemoryStore::new();

        let settings = load(&store).await?;

        assert_eq!(settings, UserSettings::default());
        assert!(settings.ai_platform.is_none());
        assert_eq!(settings.prompt, DEFAULT_PROMPT);
        Ok(())
    }

    #[tokio::test]
    async fn save_then_load_round_trips() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        let settings = UserSettings {
            ai_platform: Some(AiPlatform::Claude),
            prompt: "Q: [transcript]".to_string(),
        };

        save(&store, &settings).await?;

        assert_eq!(load(&store).await?, settings);
        Ok(())
    }

    #[tokio::test]
    async fn record_uses_the_historical_field_names() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        let settings = UserSettings {
            ai_platform: Some(AiPlatform::ChatGpt),
            prompt: "p".to_string(),
        };

        save(&store, &settings).await?;

        let raw = store.get(STORAGE_KEY).await?.unwrap();
        assert_eq!(raw["aiPlatform"], "chatgpt");
        assert_eq!(raw["prompt"], "p");
        Ok(())
    }

    #[tokio::test]
    async fn undecodable_record_falls_back_to_defaults() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        store
            .set(STORAGE_KEY, serde_json::json!({"aiPlatform": "smalltalk-9000"}))
            .await?;

        assert_eq!(load(&store).await?, UserSettings::default());
        Ok(())
    }

    #[tokio::test]
    async fn blank_prompt_is_normalized_to_the_default_on_save() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        let settings = UserSettings {
            ai_platform: Some(AiPlatform::Gemini),
            prompt: "   \n".to_string(),
        };

        save(&store, &settings).await?;

        assert_eq!(load(&store).await?.prompt, DEFAULT_PROMPT);
        Ok(())
    }
}
