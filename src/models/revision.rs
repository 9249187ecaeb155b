//! Revision proposal model.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

use super::timestamp;

/// Author recorded when a create request names nobody.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// A proposed change tracked on the shared board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Revision {
    pub id: i64,
    pub text: String,
    #[serde(default, deserialize_with = "null_as_false")]
    pub completed: bool,
    pub created_by: String,
    #[serde(with = "timestamp::compact")]
    pub created_at: NaiveDateTime,
}

impl Revision {
    /// Build a fresh, not yet completed revision.
    pub fn new(id: i64, text: &str, created_by: Option<String>, created_at: NaiveDateTime) -> Self {
        Self {
            id,
            text: text.trim().to_string(),
            completed: false,
            created_by: or_fallback(created_by, UNKNOWN_AUTHOR),
            created_at,
        }
    }
}

/// Request body for creating a revision.
///
/// Nothing is required: a missing `text` becomes an empty string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRevisionRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
}

/// Request body for toggling a revision.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRevisionRequest {
    /// Absent or null means not completed.
    #[serde(default)]
    pub completed: Option<bool>,
}

/// Older files can hold `"completed": null`; read it as not completed.
fn null_as_false<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or_default())
}

/// Use `value` unless it is missing or empty.
pub(crate) fn or_fallback(value: Option<String>, fallback: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}
