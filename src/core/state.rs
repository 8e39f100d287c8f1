use serde::{Deserialize, Serialize};
use crate::shared::types::Language;

/// User-adjustable configuration.
///
/// Only the controller task writes to it, through the named methods below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    target_lang: Language,
    auto_copy: bool,
    paused: bool,
}

impl Configuration {
    pub fn new(target_lang: Language, auto_copy: bool) -> Self {
        Self {
            target_lang,
            auto_copy,
            paused: false,
        }
    }

    pub fn target_lang(&self) -> Language {
        self.target_lang
    }

    pub fn auto_copy_enabled(&self) -> bool {
        self.auto_copy
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Returns true when the target changed
    pub fn select_target(&mut self, lang: Language) -> bool {
        let changed = self.target_lang != lang;
        self.target_lang = lang;
        changed
    }

    /// Returns the new state
    pub fn toggle_auto_copy(&mut self) -> bool {
        self.auto_copy = !self.auto_copy;
        self.auto_copy
    }

    /// Returns the new state
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// Adopt a detected language as the new target.
    ///
    /// Codes outside the supported set leave the target untouched.
    pub fn learn_target(&mut self, detected: &str) -> Option<Language> {
        let lang = Language::from_code(detected)?;
        if self.select_target(lang) {
            Some(lang)
        } else {
            None
        }
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new(Language::En, false)
    }
}
