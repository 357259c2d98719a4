//! Payment webhook signature verification.
//!
//! HMAC-SHA256 over `<timestamp>.<payload>` with a replay window, compared
//! in constant time.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::errors::WebhookError;
use super::payment_event::PaymentEvent;

/// Maximum allowed age for webhook events (5 minutes).
const MAX_EVENT_AGE_SECS: i64 = 300;

/// Maximum allowed clock skew for future events (1 minute).
const MAX_CLOCK_SKEW_SECS: i64 = 60;

/// Parsed components of the provider's signature header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    /// Unix timestamp when the signature was generated.
    pub timestamp: i64,
    /// HMAC-SHA256 signature bytes.
    pub signature: Vec<u8>,
}

impl SignatureHeader {
    /// Parses a signature header of the form `t=<timestamp>,v1=<hex>`.
    ///
    /// Unknown fields are ignored for forward compatibility.
    pub fn parse(header: &str) -> Result<Self, WebhookError> {
        let mut timestamp: Option<i64> = None;
        let mut signature: Option<Vec<u8>> = None;

        for part in header.split(',') {
            let (key, value) = part
                .split_once('=')
                .ok_or_else(|| WebhookError::parse("invalid header format"))?;

            match key {
                "t" => {
                    timestamp = Some(
                        value
                            .parse()
                            .map_err(|_| WebhookError::parse("invalid timestamp"))?,
                    );
                }
                "v1" => {
                    signature = Some(
                        hex::decode(value)
                            .map_err(|_| WebhookError::parse("invalid signature hex"))?,
                    );
                }
                _ => {}
            }
        }

        let timestamp = timestamp.ok_or_else(|| WebhookError::parse("missing timestamp"))?;
        let signature = signature.ok_or_else(|| WebhookError::parse("missing v1 signature"))?;

        Ok(SignatureHeader {
            timestamp,
            signature,
        })
    }
}

/// Verifier for payment webhook signatures.
pub struct WebhookVerifier {
    secret: String,
}

impl WebhookVerifier {
    /// Creates a verifier with the given signing secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Verifies the signature and parses the event from the raw payload.
    ///
    /// # Errors
    ///
    /// - `InvalidSignature` - signature does not match the payload
    /// - `TimestampOutOfRange` - event is older than the replay window
    /// - `InvalidTimestamp` - event timestamp is too far in the future
    /// - `ParseError` - header or JSON payload is malformed
    pub fn verify_and_parse(
        &self,
        payload: &[u8],
        signature_header: &str,
    ) -> Result<PaymentEvent, WebhookError> {
        let header = SignatureHeader::parse(signature_header)?;

        self.validate_timestamp(header.timestamp)?;

        let expected = self.compute_signature(header.timestamp, payload);
        if !constant_time_compare(&expected, &header.signature) {
            return Err(WebhookError::InvalidSignature);
        }

        serde_json::from_slice(payload).map_err(|e| WebhookError::parse(e.to_string()))
    }

    fn validate_timestamp(&self, timestamp: i64) -> Result<(), WebhookError> {
        let now = chrono::Utc::now().timestamp();
        let age = now - timestamp;

        if age > MAX_EVENT_AGE_SECS {
            return Err(WebhookError::TimestampOutOfRange);
        }
        if age < -MAX_CLOCK_SKEW_SECS {
            return Err(WebhookError::InvalidTimestamp);
        }

        Ok(())
    }

    fn compute_signature(&self, timestamp: i64, payload: &[u8]) -> Vec<u8> {
        let signed_payload = format!("{}.{}", timestamp, String::from_utf8_lossy(payload));

        let mut mac =
            Hmac::<Sha256>::new_from_slice(self.secret.as_bytes()).expect("HMAC accepts any key");
        mac.update(signed_payload.as_bytes());
        mac.finalize().into_bytes().to_vec()
    }
}

fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

/// Computes a valid signature for test fixtures.
#[cfg(test)]
pub fn compute_test_signature(secret: &str, timestamp: i64, payload: &str) -> String {
    let signed_payload = format!("{}.{}", timestamp, payload);
    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key");
    mac.update(signed_payload.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}
