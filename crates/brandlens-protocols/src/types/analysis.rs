//! Analysis results returned by the model.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The twelve brand archetypes the prompt asks the model to choose from.
pub const ARCHETYPES: [&str; 12] = [
    "Innocent", "Everyman", "Hero", "Outlaw", "Explorer", "Creator", "Ruler", "Magician",
    "Lover", "Caregiver", "Jester", "Sage",
];

/// Result of one analysis: the JSON object from the model plus bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub analysis: Value,
    pub model: String,
    pub analyzed_at: DateTime<Utc>,
    #[serde(default)]
    pub cached: bool,
}

impl AnalysisResult {
    pub fn new(analysis: Value, model: impl Into<String>) -> Self {
        Self {
            analysis,
            model: model.into(),
            analyzed_at: Utc::now(),
            cached: false,
        }
    }

    /// Typed view over the raw JSON.
    pub fn brand(&self) -> BrandAnalysis {
        BrandAnalysis::from_value(&self.analysis)
    }
}

/// Archetype classification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Archetype {
    pub primary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u8>,
}

/// Lenient typed view of a model reply. Missing fields default, unknown
/// fields are ignored, tone scores are clamped to 0..=100.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrandAnalysis {
    pub archetype: Option<Archetype>,
    pub tone_scores: BTreeMap<String, u8>,
    pub summary: String,
    pub keywords: Vec<String>,
    pub strengths: Vec<String>,
    pub recommendations: Vec<String>,
}

impl BrandAnalysis {
    pub fn from_value(value: &Value) -> Self {
        Self {
            archetype: value.get("archetype").and_then(parse_archetype),
            tone_scores: value
                .get("tone_scores")
                .or_else(|| value.get("tone"))
                .map(parse_scores)
                .unwrap_or_default(),
            summary: value
                .get("summary")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .trim()
                .to_string(),
            keywords: string_list(value.get("keywords")),
            strengths: string_list(value.get("strengths")),
            recommendations: string_list(value.get("recommendations")),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.archetype.is_none()
            && self.tone_scores.is_empty()
            && self.summary.is_empty()
            && self.keywords.is_empty()
            && self.strengths.is_empty()
            && self.recommendations.is_empty()
    }
}

fn parse_archetype(value: &Value) -> Option<Archetype> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(Archetype {
            primary: s.trim().to_string(),
            ..Default::default()
        }),
        Value::Object(map) => {
            let primary = map
                .get("primary")
                .or_else(|| map.get("name"))
                .and_then(Value::as_str)?
                .trim()
                .to_string();
            if primary.is_empty() {
                return None;
            }
            Some(Archetype {
                primary,
                secondary: map
                    .get("secondary")
                    .and_then(Value::as_str)
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty()),
                confidence: map.get("confidence").and_then(score),
            })
        }
        _ => None,
    }
}

fn parse_scores(value: &Value) -> BTreeMap<String, u8> {
    let Some(map) = value.as_object() else {
        return BTreeMap::new();
    };
    map.iter()
        .filter_map(|(axis, v)| score(v).map(|s| (axis.to_lowercase(), s)))
        .collect()
}

/// Read a 0..=100 score from a number or numeric string.
fn score(value: &Value) -> Option<u8> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().trim_end_matches('%').parse::<f64>().ok()?,
        _ => return None,
    };
    if !n.is_finite() {
        return None;
    }
    Some(n.round().clamp(0.0, 100.0) as u8)
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        Some(Value::String(s)) => s
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
#[path = "analysis_tests.rs"]
mod tests;
