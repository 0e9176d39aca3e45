//! API response types

use crate::types::PropertyId;
use serde::{Deserialize, Deserializer, Serialize};

/// Response of the create / update endpoints
///
/// ```json
/// { "success": true, "message": "Property created", "id": 42 }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmitResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Some server versions send the id as a string
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_id"
    )]
    pub id: Option<PropertyId>,
}

impl SubmitResponse {
    pub fn ok(id: PropertyId) -> Self {
        Self {
            success: true,
            message: None,
            id: Some(id),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            id: None,
        }
    }
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<PropertyId>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::Number(n) => n.as_i64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_id_accepted() {
        let resp: SubmitResponse =
            serde_json::from_str(r#"{"success":true,"id":"17"}"#).unwrap();
        assert!(resp.success);
        assert_eq!(resp.id, Some(17));
    }

    #[test]
    fn test_missing_fields_default() {
        let resp: SubmitResponse = serde_json::from_str(r#"{"message":"nope"}"#).unwrap();
        assert!(!resp.success);
        assert_eq!(resp.message.as_deref(), Some("nope"));
        assert_eq!(resp.id, None);
    }
}
