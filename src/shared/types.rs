use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_segmentation::UnicodeSegmentation;

use super::error::{AppError, AppResult};

/// Target languages the user can pick from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Es,
    Ko,
    Vi,
    Ja,
    De,
    Fr,
}

impl Language {
    /// Menu order
    pub const ALL: [Language; 7] = [
        Language::En,
        Language::Es,
        Language::Ko,
        Language::Vi,
        Language::Ja,
        Language::De,
        Language::Fr,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
            Language::Ko => "ko",
            Language::Vi => "vi",
            Language::Ja => "ja",
            Language::De => "de",
            Language::Fr => "fr",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Es => "Spanish",
            Language::Ko => "Korean",
            Language::Vi => "Vietnamese",
            Language::Ja => "Japanese",
            Language::De => "German",
            Language::Fr => "French",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim().to_ascii_lowercase();
        Self::ALL.iter().copied().find(|lang| lang.code() == code)
    }

    /// Like `from_code`, but reports unsupported codes as a validation error
    pub fn parse(code: &str) -> AppResult<Self> {
        Self::from_code(code)
            .ok_or_else(|| AppError::Validation(format!("Unsupported language: {}", code.trim())))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Text observed on the clipboard during a poll tick
#[derive(Debug, Clone, PartialEq)]
pub struct ClipboardSnapshot {
    pub text: String,
    pub observed_at: DateTime<Utc>,
}

impl ClipboardSnapshot {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            observed_at: Utc::now(),
        }
    }
}

/// A single translation attempt. Built once, never modified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub text: String,
    pub source_lang: String,
    pub target_lang: String,
}

impl TranslationRequest {
    pub fn new(text: impl Into<String>, source_lang: impl Into<String>, target_lang: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
        }
    }
}

/// A completed translation as kept in history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub original: String,
    pub translated: String,
    pub source_lang: String,
    pub target_lang: String,
    pub completed_at: DateTime<Utc>,
}

impl TranslationResult {
    pub fn from_request(request: &TranslationRequest, translated: String) -> Self {
        Self {
            original: request.text.clone(),
            translated,
            source_lang: request.source_lang.clone(),
            target_lang: request.target_lang.clone(),
            completed_at: Utc::now(),
        }
    }

    /// "FR → EN"
    pub fn direction_label(&self) -> String {
        format!(
            "{} → {}",
            self.source_lang.to_uppercase(),
            self.target_lang.to_uppercase()
        )
    }
}

/// Number of user-perceived characters
pub fn char_count(text: &str) -> usize {
    text.graphemes(true).count()
}

/// Short single-line preview for log output
pub fn preview(text: &str, max: usize) -> String {
    let flat = text.replace('\n', " ");
    if char_count(&flat) > max {
        let head: String = flat.graphemes(true).take(max).collect();
        format!("{}...", head)
    } else {
        flat
    }
}
