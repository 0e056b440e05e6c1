//! Local dashboard settings
//!
//! Stored as JSON in `<config_dir>/callboard/settings.json`. Settings are
//! never sent to the backend.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    Ollama,
    OpenAi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WhisperModel {
    Tiny,
    Base,
    Small,
    Medium,
    Large,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    pub company_name: String,
    pub company_phone: String,
    pub business_hours: String,
    pub llm_provider: LlmProvider,
    pub llm_model: String,
    pub whisper_model: WhisperModel,
    /// Seconds
    pub max_call_duration: u32,
    /// Seconds
    pub silence_timeout: u32,
    pub call_recording: bool,
    pub analytics_enabled: bool,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            company_name: "AI Call Center".to_string(),
            company_phone: "+1234567890".to_string(),
            business_hours: "Monday-Friday 9AM-5PM".to_string(),
            llm_provider: LlmProvider::Ollama,
            llm_model: "llama3.2:3b".to_string(),
            whisper_model: WhisperModel::Base,
            max_call_duration: 600,
            silence_timeout: 10,
            call_recording: true,
            analytics_enabled: true,
        }
    }
}

impl DashboardSettings {
    /// `<config_dir>/callboard`, if the platform has a config dir
    pub fn default_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("callboard"))
    }

    /// Load from `<dir>/settings.json`.
    /// Returns defaults on any I/O or parse error (graceful degradation).
    pub fn load(dir: &Path) -> Self {
        let path = dir.join(SETTINGS_FILE);
        match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring malformed settings");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Persist to `<dir>/settings.json`
    pub fn save(&self, dir: &Path) -> Result<(), CoreError> {
        let path = dir.join(SETTINGS_FILE);
        let write = |path: &Path| -> std::io::Result<()> {
            std::fs::create_dir_all(dir)?;
            let content = serde_json::to_string_pretty(self)?;
            std::fs::write(path, content)
        };
        write(&path).map_err(|source| CoreError::SettingsWrite { path, source })
    }

    /// Field names accepted by [`Self::set`]
    pub const KEYS: [&'static str; 10] = [
        "company_name",
        "company_phone",
        "business_hours",
        "llm_provider",
        "llm_model",
        "whisper_model",
        "max_call_duration",
        "silence_timeout",
        "call_recording",
        "analytics_enabled",
    ];

    /// Set one field from its text form
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        let value = value.trim();
        match key {
            "company_name" => self.company_name = value.to_string(),
            "company_phone" => self.company_phone = value.to_string(),
            "business_hours" => self.business_hours = value.to_string(),
            "llm_model" => self.llm_model = value.to_string(),
            "llm_provider" => self.llm_provider = parse_enum(key, value)?,
            "whisper_model" => self.whisper_model = parse_enum(key, value)?,
            "max_call_duration" => self.max_call_duration = parse_value(key, value)?,
            "silence_timeout" => self.silence_timeout = parse_value(key, value)?,
            "call_recording" => self.call_recording = parse_value(key, value)?,
            "analytics_enabled" => self.analytics_enabled = parse_value(key, value)?,
            other => {
                return Err(CoreError::InvalidConfig {
                    message: format!(
                        "unknown setting '{}' (expected one of: {})",
                        other,
                        Self::KEYS.join(", ")
                    ),
                });
            }
        }
        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, CoreError> {
    value.parse().map_err(|_| CoreError::InvalidConfig {
        message: format!("invalid value '{}' for {}", value, key),
    })
}

/// Lowercase enum names share their serde form
fn parse_enum<T: serde::de::DeserializeOwned>(key: &str, value: &str) -> Result<T, CoreError> {
    serde_json::from_value(serde_json::Value::String(value.to_ascii_lowercase())).map_err(|_| {
        CoreError::InvalidConfig {
            message: format!("invalid value '{}' for {}", value, key),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = DashboardSettings::default();
        assert_eq!(settings.company_name, "AI Call Center");
        assert_eq!(settings.llm_provider, LlmProvider::Ollama);
        assert_eq!(settings.whisper_model, WhisperModel::Base);
        assert_eq!(settings.max_call_duration, 600);
        assert!(settings.call_recording);
    }

    #[test]
    fn test_load_missing_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(DashboardSettings::load(dir.path()), DashboardSettings::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("callboard");
        let settings = DashboardSettings {
            company_name: "Acme Support".to_string(),
            llm_provider: LlmProvider::OpenAi,
            whisper_model: WhisperModel::Small,
            call_recording: false,
            ..Default::default()
        };
        settings.save(&nested).unwrap();

        let loaded = DashboardSettings::load(&nested);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(SETTINGS_FILE),
            r#"{"company_name": "Acme", "llm_provider": "openai"}"#,
        )
        .unwrap();

        let loaded = DashboardSettings::load(dir.path());
        assert_eq!(loaded.company_name, "Acme");
        assert_eq!(loaded.llm_provider, LlmProvider::OpenAi);
        assert_eq!(loaded.llm_model, "llama3.2:3b");
    }

    #[test]
    fn test_malformed_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(SETTINGS_FILE), "{ not json").unwrap();
        assert_eq!(DashboardSettings::load(dir.path()), DashboardSettings::default());
    }

    #[test]
    fn test_set_fields_from_text() {
        let mut settings = DashboardSettings::default();
        settings.set("company_name", " Acme Support ").unwrap();
        settings.set("llm_provider", "OpenAI").unwrap();
        settings.set("whisper_model", "large").unwrap();
        settings.set("silence_timeout", "25").unwrap();
        settings.set("call_recording", "false").unwrap();

        assert_eq!(settings.company_name, "Acme Support");
        assert_eq!(settings.llm_provider, LlmProvider::OpenAi);
        assert_eq!(settings.whisper_model, WhisperModel::Large);
        assert_eq!(settings.silence_timeout, 25);
        assert!(!settings.call_recording);
    }

    #[test]
    fn test_set_rejects_bad_input() {
        let mut settings = DashboardSettings::default();
        for (key, value) in [
            ("color", "blue"),
            ("max_call_duration", "-1"),
            ("llm_provider", "claude"),
            ("analytics_enabled", "yes"),
        ] {
            let err = settings.set(key, value).unwrap_err();
            assert!(matches!(err, CoreError::InvalidConfig { .. }), "{}", key);
        }
        assert_eq!(settings, DashboardSettings::default());
    }

    #[test]
    fn test_set_then_save_persists() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = DashboardSettings::load(dir.path());
        settings.set("max_call_duration", "900").unwrap();
        settings.save(dir.path()).unwrap();

        assert_eq!(DashboardSettings::load(dir.path()).max_call_duration, 900);
    }

    #[test]
    fn test_save_into_file_path_fails() {
        let file = tempfile::NamedTempFile::new().unwrap();
        // A regular file cannot be used as the settings directory
        let err = DashboardSettings::default().save(file.path()).unwrap_err();
        assert!(matches!(err, CoreError::SettingsWrite { .. }));
    }
}
