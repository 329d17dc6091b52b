use serde::{Deserialize, Serialize};

use crate::i18n::Locale;
use crate::repository::PromptSource;

pub const PROMPTS_KEY: &str = "prompts";
pub const THEME_KEY: &str = "theme";
pub const CONFIG_PATH: &str = "gallery.json";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct GalleryConfig {
    pub known_paths: Vec<String>,
    pub fetch_timeout_ms: u32,
    pub copy_feedback_ms: u32,
    pub default_locale: Locale,
    pub log_level: String,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            known_paths: vec![
                "public/prompt1.md".to_string(),
                "public/prompt2.md".to_string(),
                "private/prompt1.md".to_string(),
                "private/prompt2.md".to_string(),
            ],
            fetch_timeout_ms: 10_000,
            copy_feedback_ms: 2_000,
            default_locale: Locale::En,
            log_level: "info".to_string(),
        }
    }
}

impl GalleryConfig {
    /// Reads a config document, keeping defaults for anything it omits.
    /// An unreadable document yields the defaults.
    pub fn from_json(text: &str) -> Self {
        match serde_json::from_str(text) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("ignoring invalid {CONFIG_PATH}: {err}");
                Self::default()
            }
        }
    }

    pub fn log_level(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

/// Fetches [`CONFIG_PATH`] next to the page. The file is optional.
pub async fn load(source: &impl PromptSource) -> GalleryConfig {
    match source.fetch_text(CONFIG_PATH).await {
        Ok(text) => GalleryConfig::from_json(&text),
        Err(err) => {
            log::debug!("using default config: {err}");
            GalleryConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;
    use crate::error::{GalleryError, Result};

    struct OneFile(Option<&'static str>);

    impl PromptSource for OneFile {
        async fn fetch_text(&self, path: &str) -> Result<String> {
            assert_eq!(path, CONFIG_PATH);
            self.0.map(str::to_string).ok_or(GalleryError::Status {
                path: path.to_string(),
                status: 404,
            })
        }
    }

    #[test]
    fn missing_file_loads_defaults() {
        assert_eq!(block_on(load(&OneFile(None))), GalleryConfig::default());
        let custom = block_on(load(&OneFile(Some(r#"{"known_paths": ["only.md"]}"#))));
        assert_eq!(custom.known_paths, vec!["only.md"]);
    }

    #[test]
    fn partial_document_keeps_defaults() {
        let config = GalleryConfig::from_json(r#"{"fetch_timeout_ms": 500, "default_locale": "de"}"#);
        assert_eq!(config.fetch_timeout_ms, 500);
        assert_eq!(config.default_locale, Locale::De);
        assert_eq!(config.known_paths.len(), 4);
        assert_eq!(config.copy_feedback_ms, 2_000);
    }

    #[test]
    fn invalid_document_falls_back_to_defaults() {
        assert_eq!(GalleryConfig::from_json("{not json"), GalleryConfig::default());
        assert_eq!(GalleryConfig::from_json("[]"), GalleryConfig::default());
    }

    #[test]
    fn parses_log_level() {
        let config = GalleryConfig {
            log_level: "debug".to_string(),
            ..GalleryConfig::default()
        };
        assert_eq!(config.log_level(), log::LevelFilter::Debug);
        let bad = GalleryConfig {
            log_level: "loud".to_string(),
            ..GalleryConfig::default()
        };
        assert_eq!(bad.log_level(), log::LevelFilter::Info);
    }
}
