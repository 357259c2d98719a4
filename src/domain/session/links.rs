//! Deep-link parsing for password-recovery and email-verification flows.
//!
//! Recovery links carry a one-time code in the query string; verification
//! links carry tokens in the URL fragment. Both arrive as opaque strings
//! from email clients, so parsing is tolerant of surrounding URL parts and
//! strict only about the parameters it needs.

use super::errors::LinkError;

/// A password-recovery link: `...?code=<one-time-code>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveryLink {
    pub code: String,
}

impl RecoveryLink {
    /// Parses a recovery link from a full URL or a bare query string.
    pub fn parse(url: &str) -> Result<Self, LinkError> {
        let query = query_of(url);
        let code = param(query, "code")
            .ok_or_else(|| LinkError::invalid("missing code parameter"))?;
        if code.is_empty() {
            return Err(LinkError::invalid("empty code parameter"));
        }
        Ok(Self { code: code.to_string() })
    }
}

/// An email-verification link: `...#access_token=...&refresh_token=...&type=signup`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationLink {
    pub access_token: String,
    pub refresh_token: String,
}

impl VerificationLink {
    /// Parses a verification link from a full URL.
    ///
    /// The provider places the tokens in the fragment so they never reach
    /// server logs; only `type=signup` fragments are accepted.
    pub fn parse(url: &str) -> Result<Self, LinkError> {
        let fragment = url
            .split_once('#')
            .map(|(_, f)| f)
            .ok_or_else(|| LinkError::invalid("missing fragment"))?;

        match param(fragment, "type") {
            Some("signup") => {}
            Some(other) => {
                return Err(LinkError::invalid(format!("unexpected link type: {other}")))
            }
            None => return Err(LinkError::invalid("missing type parameter")),
        }

        let access_token = param(fragment, "access_token")
            .filter(|t| !t.is_empty())
            .ok_or_else(|| LinkError::invalid("missing access_token"))?;
        let refresh_token = param(fragment, "refresh_token")
            .filter(|t| !t.is_empty())
            .ok_or_else(|| LinkError::invalid("missing refresh_token"))?;

        Ok(Self {
            access_token: access_token.to_string(),
            refresh_token: refresh_token.to_string(),
        })
    }
}

/// Everything after `?` and before any `#`, or the input itself when it has
/// no path part.
fn query_of(url: &str) -> &str {
    let without_fragment = url.split('#').next().unwrap_or(url);
    match without_fragment.split_once('?') {
        Some((_, query)) => query,
        None => without_fragment,
    }
}

/// Finds the value of `key` in an `a=b&c=d` parameter string.
fn param<'a>(params: &'a str, key: &str) -> Option<&'a str> {
    params.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=')?;
        (k == key).then_some(v)
    })
}
