//! Access-history model.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::revision::or_fallback;
use super::timestamp;

/// Name recorded when a visitor does not give one.
pub const ANONYMOUS_VISITOR: &str = "Anonymous";

/// One recorded page visit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    pub user_name: String,
    #[serde(with = "timestamp::padded")]
    pub timestamp: NaiveDateTime,
    /// Position in the log at insertion time, starting at 1.
    pub visit_number: u64,
}

impl Visit {
    pub fn new(user_name: Option<String>, timestamp: NaiveDateTime, visit_number: u64) -> Self {
        Self {
            user_name: or_fallback(user_name, ANONYMOUS_VISITOR),
            timestamp,
            visit_number,
        }
    }
}

/// Request body for recording a visit.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordVisitRequest {
    #[serde(default)]
    pub user_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_anonymous_default() {
        let visit = Visit::new(None, timestamp::now(), 1);
        assert_eq!(visit.user_name, ANONYMOUS_VISITOR);
    }

    #[test]
    fn test_wire_shape_uses_padded_timestamp() {
        let at = timestamp::parse("2024/1/5 9:03:04").unwrap();
        let visit = Visit::new(Some("Sato".to_string()), at, 2);

        let value = serde_json::to_value(&visit).unwrap();
        assert_eq!(
            value,
            json!({
                "userName": "Sato",
                "timestamp": "2024/01/05 09:03:04",
                "visitNumber": 2
            })
        );
    }
}
