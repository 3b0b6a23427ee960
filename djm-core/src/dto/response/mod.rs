//! Response envelopes

use serde::{Deserialize, Serialize};

/// Success envelope: `{"message": "...", "data": ...}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub message: String,
    pub data: T,
}

/// Error body returned alongside non-2xx statuses
///
/// The services are not consistent about the key, so both are accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiErrorBody {
    /// Extract a human readable message from a raw error body
    ///
    /// Falls back to the trimmed body text when it is not a JSON envelope.
    pub fn message_from(body: &str) -> String {
        serde_json::from_str::<ApiErrorBody>(body)
            .ok()
            .and_then(|b| b.error.or(b.message))
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| {
                let trimmed = body.trim();
                if trimmed.is_empty() {
                    "Unknown error".to_string()
                } else {
                    trimmed.to_string()
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_unwraps_data() {
        let resp: ApiResponse<Vec<u32>> =
            serde_json::from_str(r#"{"message": "ok", "data": [1, 2]}"#).unwrap();
        assert_eq!(resp.data, vec![1, 2]);
        assert_eq!(resp.message, "ok");
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(
            ApiErrorBody::message_from(r#"{"error": "no job id provided"}"#),
            "no job id provided"
        );
        assert_eq!(
            ApiErrorBody::message_from(r#"{"message": "forbidden"}"#),
            "forbidden"
        );
        assert_eq!(ApiErrorBody::message_from("  gateway down \n"), "gateway down");
        assert_eq!(ApiErrorBody::message_from(""), "Unknown error");
    }
}
