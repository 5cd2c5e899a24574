//! Wire shapes consumed from the evaluation service.
//!
//! Deserialization is forgiving: absent or `null` lists become
//! empty, absent strings become empty, and numbers may arrive as floats.
//! Only a body that is not JSON at all (or lacks `evaluation`) is an error.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// The structured feedback object returned by the evaluation service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    #[serde(default, deserialize_with = "lenient_int")]
    pub score: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub positives: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub feedback_tips: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub missing_keywords_or_sections: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub suggested_improvements: Vec<SuggestedImprovement>,
    /// Set by the service when it fell back to a degraded evaluation
    /// (model call failed, or the model produced unreadable JSON).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One before/after rewrite suggestion.
///
/// Older service versions name the rewritten text `improved_text`, newer ones
/// `suggested_rewrite`. Both are folded into `rewrite` at parse time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawImprovement")]
pub struct SuggestedImprovement {
    pub original_text: String,
    #[serde(rename = "suggested_rewrite")]
    pub rewrite: String,
    pub reasoning: String,
    pub potential_score_increase: i64,
}

#[derive(Deserialize)]
struct RawImprovement {
    #[serde(default, deserialize_with = "null_as_default")]
    original_text: String,
    #[serde(default)]
    improved_text: Option<String>,
    #[serde(default)]
    suggested_rewrite: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    reasoning: String,
    #[serde(default, deserialize_with = "lenient_int")]
    potential_score_increase: i64,
}

impl From<RawImprovement> for SuggestedImprovement {
    fn from(raw: RawImprovement) -> Self {
        let rewrite = raw
            .suggested_rewrite
            .filter(|s| !s.trim().is_empty())
            .or(raw.improved_text)
            .unwrap_or_default();

        Self {
            original_text: raw.original_text,
            rewrite,
            reasoning: raw.reasoning,
            potential_score_increase: raw.potential_score_increase,
        }
    }
}

/// Success envelope of `POST /api/evaluate`.
#[derive(Debug, Deserialize)]
pub struct EvaluateResponse {
    #[serde(default)]
    pub success: Option<bool>,
    /// Identifier of the stored record; string or number depending on the backend.
    #[serde(default)]
    pub record_id: Option<Value>,
    pub evaluation: Evaluation,
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

/// Pulls a user-facing message out of an error body.
///
/// Accepts `{"detail": "..."}` as well as the list form produced by request
/// validation failures: `{"detail": [{"msg": "..."}, ...]}`.
pub fn error_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let detail = match value.get("detail")? {
        Value::String(s) => s.trim().to_string(),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.as_str()),
                other => other.get("msg").and_then(Value::as_str),
            })
            .collect::<Vec<_>>()
            .join("; "),
        _ => return None,
    };
    (!detail.is_empty()).then_some(detail)
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Integer that tolerates `72.0`, `"72"` and `null`.
fn lenient_int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.round() as i64))
            .unwrap_or_default(),
        Some(Value::String(s)) => s.trim().parse::<f64>().map(|f| f.round() as i64).unwrap_or_default(),
        _ => 0,
    })
}
