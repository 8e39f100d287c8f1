use serde::{Serialize, Deserialize};
use uuid::Uuid;
use super::types::{Language, TranslationResult};
use crate::core::menu::{MenuModel, StatusIndicator};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationReady {
    pub display_id: Uuid,
    pub original: String,
    pub translated: String,
    pub source_lang: String,
    pub target_lang: String,
    pub show_both: bool,
}

/// Notifications for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload")] // Tagged enum for easier frontend parsing
pub enum AppEvent {
    #[serde(rename = "settings://target-language")]
    TargetLanguageChanged(Language),

    #[serde(rename = "settings://modes")]
    ModesChanged { auto_copy: bool, paused: bool },

    #[serde(rename = "history://updated")]
    HistoryChanged(Vec<TranslationResult>),

    #[serde(rename = "translation://ready")]
    TranslationReady(TranslationReady),

    #[serde(rename = "info://message")]
    InfoMessage { display_id: Uuid, text: String },

    #[serde(rename = "display://closed")]
    DisplayClosed(Uuid),

    #[serde(rename = "menu://updated")]
    MenuUpdated { menu: MenuModel, status: StatusIndicator },

    #[serde(rename = "app://shutdown")]
    ShuttingDown,
}

impl AppEvent {
    /// Event name as seen by subscribers
    pub fn name(&self) -> &'static str {
        match self {
            AppEvent::TargetLanguageChanged(_) => "settings://target-language",
            AppEvent::ModesChanged { .. } => "settings://modes",
            AppEvent::HistoryChanged(_) => "history://updated",
            AppEvent::TranslationReady(_) => "translation://ready",
            AppEvent::InfoMessage { .. } => "info://message",
            AppEvent::DisplayClosed(_) => "display://closed",
            AppEvent::MenuUpdated { .. } => "menu://updated",
            AppEvent::ShuttingDown => "app://shutdown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_tag_matches_name() {
        let event = AppEvent::ModesChanged { auto_copy: true, paused: false };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], event.name());
        assert_eq!(json["payload"]["auto_copy"], true);
    }

    #[test]
    fn test_target_language_payload_is_code() {
        let json = serde_json::to_value(AppEvent::TargetLanguageChanged(Language::Ja)).unwrap();
        assert_eq!(json["payload"], "ja");
    }
}
