/// Provider response schemas
use serde::{Deserialize, Serialize};

/// Body Mailgun returns for an accepted message
///
/// `{"id": "<20240101.1@example.com>", "message": "Queued. Thank you."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendReceipt {
    pub id: String,
    #[serde(default)]
    pub message: String,
}

/// Error body Mailgun returns for rejected requests
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_deserialization() {
        let json = r#"{"id": "<20240101.1@example.com>", "message": "Queued. Thank you."}"#;
        let receipt: SendReceipt = serde_json::from_str(json).unwrap();
        assert_eq!(receipt.id, "<20240101.1@example.com>");
        assert_eq!(receipt.message, "Queued. Thank you.");
    }

    #[test]
    fn test_receipt_requires_id() {
        let json = r#"{"message": "'from' parameter is missing"}"#;
        assert!(serde_json::from_str::<SendReceipt>(json).is_err());

        let body: ErrorBody = serde_json::from_str(json).unwrap();
        assert_eq!(body.message, "'from' parameter is missing");
    }
}
