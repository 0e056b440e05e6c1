//! Settings view: grouped fields for display

use crate::settings::{DashboardSettings, LlmProvider, WhisperModel};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingField {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingsGroup {
    pub title: &'static str,
    pub fields: Vec<SettingField>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingsView {
    pub groups: Vec<SettingsGroup>,
}

fn field(label: &'static str, value: impl Into<String>) -> SettingField {
    SettingField {
        label,
        value: value.into(),
    }
}

fn enabled(flag: bool) -> &'static str {
    if flag {
        "Enabled"
    } else {
        "Disabled"
    }
}

impl SettingsView {
    pub fn from_settings(settings: &DashboardSettings) -> Self {
        let provider = match settings.llm_provider {
            LlmProvider::Ollama => "Ollama",
            LlmProvider::OpenAi => "OpenAI",
        };
        let whisper = match settings.whisper_model {
            WhisperModel::Tiny => "Tiny",
            WhisperModel::Base => "Base",
            WhisperModel::Small => "Small",
            WhisperModel::Medium => "Medium",
            WhisperModel::Large => "Large",
        };

        Self {
            groups: vec![
                SettingsGroup {
                    title: "System Configuration",
                    fields: vec![
                        field("Company Name", settings.company_name.as_str()),
                        field("Company Phone", settings.company_phone.as_str()),
                        field("Business Hours", settings.business_hours.as_str()),
                    ],
                },
                SettingsGroup {
                    title: "AI Configuration",
                    fields: vec![
                        field("LLM Provider", provider),
                        field("LLM Model", settings.llm_model.as_str()),
                        field("Whisper Model", whisper),
                    ],
                },
                SettingsGroup {
                    title: "Call Settings",
                    fields: vec![
                        field(
                            "Max Call Duration",
                            format!("{}s", settings.max_call_duration),
                        ),
                        field("Silence Timeout", format!("{}s", settings.silence_timeout)),
                        field("Call Recording", enabled(settings.call_recording)),
                        field("Analytics", enabled(settings.analytics_enabled)),
                    ],
                },
            ],
        }
    }

    pub fn value(&self, label: &str) -> Option<&str> {
        self.groups
            .iter()
            .flat_map(|g| g.fields.iter())
            .find(|f| f.label == label)
            .map(|f| f.value.as_str())
    }
}
