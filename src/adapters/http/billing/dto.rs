//! Request/response DTOs for the billing endpoints.

use serde::{Deserialize, Serialize};

/// POST /api/billing/checkout request body.
///
/// The email is optional; the token claim is used when absent.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CheckoutRequest {
    #[serde(default)]
    pub customer_email: Option<String>,
}

/// Successful checkout response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CheckoutResponse {
    /// Hosted payment page to redirect the user to.
    pub url: String,
}

/// Standard error response body.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkout_request_tolerates_missing_email() {
        let req: CheckoutRequest = serde_json::from_str("{}").unwrap();
        assert!(req.customer_email.is_none());
    }

    #[test]
    fn checkout_response_roundtrips() {
        let json = serde_json::to_string(&CheckoutResponse {
            url: "https://pay.example/cs_1".to_string(),
        })
        .unwrap();
        assert_eq!(json, r#"{"url":"https://pay.example/cs_1"}"#);
    }
}
