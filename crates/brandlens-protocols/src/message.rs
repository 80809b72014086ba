//! Message contract between UI surfaces and the analysis backend.
//!
//! A message is an action name plus a free-form JSON payload. The reply
//! carries either `data` or a human-readable `error`, never both.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Known actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    Ping,
    Extract,
    Analyze,
    AnalyzePage,
    GetSettings,
    SaveSettings,
    ClearCache,
    CacheStats,
}

impl Action {
    pub const ALL: [Action; 8] = [
        Action::Ping,
        Action::Extract,
        Action::Analyze,
        Action::AnalyzePage,
        Action::GetSettings,
        Action::SaveSettings,
        Action::ClearCache,
        Action::CacheStats,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ping => "ping",
            Self::Extract => "extract",
            Self::Analyze => "analyze",
            Self::AnalyzePage => "analyzePage",
            Self::GetSettings => "getSettings",
            Self::SaveSettings => "saveSettings",
            Self::ClearCache => "clearCache",
            Self::CacheStats => "cacheStats",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == name)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Incoming message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub action: String,
    #[serde(default)]
    pub payload: Value,
}

impl Request {
    pub fn new(action: Action, payload: Value) -> Self {
        Self {
            id: Some(uuid::Uuid::new_v4().to_string()),
            action: action.as_str().to_string(),
            payload,
        }
    }
}

/// Reply to a [`Request`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    pub fn ok(id: Option<String>, data: Value) -> Self {
        Self {
            id,
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(id: Option<String>, error: impl Into<String>) -> Self {
        let mut error = error.into();
        if error.trim().is_empty() {
            error = "Unknown error".to_string();
        }
        Self {
            id,
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
