use serde::{Deserialize, Serialize};

use super::history::HISTORY_CAP;

pub const DEFAULT_THEME: &str = "default";

/// Client preferences, persisted under the `settings` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Summarize YouTube watch pages as videos rather than as web pages.
    #[serde(rename = "autoDetectYouTube")]
    pub auto_detect_youtube: bool,
    pub max_history_items: usize,
    pub theme: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_detect_youtube: true,
            max_history_items: HISTORY_CAP,
            theme: DEFAULT_THEME.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_extension_key_names() {
        let value = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(value["autoDetectYouTube"], true);
        assert_eq!(value["maxHistoryItems"], 5);
        assert_eq!(value["theme"], "default");
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"theme":"dark"}"#).unwrap();
        assert!(settings.auto_detect_youtube);
        assert_eq!(settings.max_history_items, 5);
        assert_eq!(settings.theme, "dark");
    }
}
