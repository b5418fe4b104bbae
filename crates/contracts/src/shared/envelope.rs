use serde::{Deserialize, Serialize};

/// Success envelope: `{ "success": true, ...payload }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(flatten)]
    pub data: T,
}

impl<T> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Failure envelope: `{ "success": false, "error": "..." }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub success: bool,
    pub error: String,
}

impl ApiErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Payload {
        count: usize,
    }

    #[test]
    fn test_envelope_flattens_payload() {
        let json = serde_json::to_value(ApiEnvelope::ok(Payload { count: 3 })).unwrap();
        assert_eq!(json, serde_json::json!({"success": true, "count": 3}));
    }

    #[test]
    fn test_error_body_shape() {
        let json = serde_json::to_value(ApiErrorBody::new("Bidder not found")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": false, "error": "Bidder not found"})
        );
    }
}
