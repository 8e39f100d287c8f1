//! Translator feature
//!
//! Translation over the unofficial Google Translate endpoint, plus the
//! routing policy and the rolling history of results.

pub mod history;
pub mod router;

use crate::shared::error::{AppError, AppResult};
use crate::shared::settings::TranslationSettings;
use crate::shared::types::TranslationRequest;
use async_trait::async_trait;

pub use history::HistoryStore;
pub use router::{route, Route};

#[async_trait]
pub trait TranslationClient: Send + Sync {
    /// Single attempt, no retries
    async fn translate(&self, request: &TranslationRequest) -> AppResult<String>;
}

pub struct GoogleTranslateClient {
    http: reqwest::Client,
    endpoint: String,
}

impl GoogleTranslateClient {
    pub fn new(settings: &TranslationSettings) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout())
            .user_agent(settings.user_agent.as_str())
            .build()
            .map_err(|e| AppError::Network(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: settings.endpoint.clone(),
        })
    }

    fn request_url(&self, request: &TranslationRequest) -> String {
        format!(
            "{}?client=gtx&sl={}&tl={}&dt=t&q={}",
            self.endpoint,
            urlencoding::encode(&request.source_lang),
            urlencoding::encode(&request.target_lang),
            urlencoding::encode(&request.text)
        )
    }
}

#[async_trait]
impl TranslationClient for GoogleTranslateClient {
    async fn translate(&self, request: &TranslationRequest) -> AppResult<String> {
        let url = self.request_url(request);

        let response = self.http.get(&url).send().await.map_err(|e| {
            log::warn!("[Translator] Request failed: {}", e);
            AppError::from(e)
        })?;

        if !response.status().is_success() {
            log::warn!("[Translator] API returned error: {}", response.status());
            return Err(AppError::Network(format!("Translation API error: {}", response.status())));
        }

        let body = response.text().await?;
        parse_translation_body(&body)
    }
}

/// Join the translated fragments of a `[[["frag", "src", ...], ...], ...]` body
pub fn parse_translation_body(body: &str) -> AppResult<String> {
    let json: serde_json::Value = serde_json::from_str(body)?;

    let segments = json
        .get(0)
        .and_then(|v| v.as_array())
        .ok_or_else(|| AppError::Parse("Invalid response format from translation API".to_string()))?;

    let mut translated = String::new();
    for segment in segments {
        if let Some(fragment) = segment.get(0).and_then(|v| v.as_str()) {
            translated.push_str(fragment);
        }
    }

    if translated.is_empty() {
        return Err(AppError::Parse("Translation API returned no text".to_string()));
    }
    Ok(translated)
}
