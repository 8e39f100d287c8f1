use serde::{Deserialize, Serialize};
use tokio::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use directories::ProjectDirs;

use super::error::{AppError, AppResult};
use super::types::Language;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub translation: TranslationSettings,
    pub connectivity: ConnectivitySettings,
    pub monitor: MonitorSettings,
    pub preferences: UserPreferences,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationSettings {
    pub endpoint: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectivitySettings {
    pub probe_host: String,
    pub probe_port: u16,
    pub probe_timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorSettings {
    pub poll_interval_ms: u64,
    /// Counted in graphemes
    pub max_length: usize,
    pub history_size: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPreferences {
    pub default_target_lang: String,
    pub auto_copy: bool,
    pub min_detection_confidence: f64,
}

impl Default for TranslationSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://translate.googleapis.com/translate_a/single".to_string(),
            timeout_secs: 10,
            user_agent: "Mozilla/5.0".to_string(),
        }
    }
}

impl Default for ConnectivitySettings {
    fn default() -> Self {
        Self {
            probe_host: "www.google.com".to_string(),
            probe_port: 443,
            probe_timeout_secs: 5,
        }
    }
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: 400,
            max_length: 4000,
            history_size: 3,
        }
    }
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            default_target_lang: "en".to_string(),
            auto_copy: false,
            min_detection_confidence: 0.0,
        }
    }
}

impl TranslationSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl ConnectivitySettings {
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}

impl MonitorSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl AppSettings {
    pub fn get_settings_path() -> AppResult<PathBuf> {
        ProjectDirs::from("com", "antigravity", "clipboard-translator")
            .map(|dirs| dirs.config_dir().join("settings.json"))
            .ok_or_else(|| AppError::Config("Failed to determine config directory".to_string()))
    }

    /// Load from the default location, creating the file on first run
    pub async fn load() -> AppResult<Self> {
        let path = Self::get_settings_path()?;
        Self::load_from(&path).await
    }

    pub async fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            let settings = Self::default();
            settings.save_to_disk(path).await?;
            log::info!("[Settings] Wrote default settings to {}", path.display());
            return Ok(settings);
        }

        let content = fs::read_to_string(path).await
            .map_err(|e| AppError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Self = serde_json::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse settings: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    pub async fn save_to_disk(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await
                .map_err(|e| AppError::Io(format!("Failed to create config directory: {}", e)))?;
        }

        let content = serde_json::to_string_pretty(self)?;

        fs::write(path, content).await
            .map_err(|e| AppError::Io(format!("Failed to write settings file: {}", e)))
    }

    pub fn validate(&self) -> AppResult<()> {
        Language::from_code(&self.preferences.default_target_lang).ok_or_else(|| {
            AppError::Config(format!(
                "Unsupported default_target_lang: {}",
                self.preferences.default_target_lang
            ))
        })?;
        if self.monitor.poll_interval_ms == 0 {
            return Err(AppError::Config("poll_interval_ms must be greater than zero".to_string()));
        }
        if self.monitor.max_length == 0 {
            return Err(AppError::Config("max_length must be greater than zero".to_string()));
        }
        if self.monitor.history_size == 0 {
            return Err(AppError::Config("history_size must be greater than zero".to_string()));
        }
        if self.translation.timeout_secs == 0 {
            return Err(AppError::Config("timeout_secs must be greater than zero".to_string()));
        }
        if self.translation.endpoint.trim().is_empty() {
            return Err(AppError::Config("endpoint must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn target_language(&self) -> AppResult<Language> {
        Language::from_code(&self.preferences.default_target_lang)
            .ok_or_else(|| AppError::Config("Unsupported default_target_lang".to_string()))
    }
}
