//! Hosted backend clients (auth + record store).
//!
//! GPS Pay delegates identity and record persistence to a hosted
//! Supabase-compatible backend. Two REST surfaces are consumed:
//!
//! - **Auth** (`/auth/v1/*`): sign-up, password sign-in, verification-code
//!   exchange, user lookup, sign-out. See [`auth::AuthClient`].
//! - **Records** (`/rest/v1/{table}`): insert/upsert/select/update scoped by
//!   table name and equality filters. See [`records::RecordsClient`].
//!
//! Both clients sit behind traits ([`AccountApi`], [`RecordsApi`]) so the
//! registration commit path and the toll data layer can be exercised in tests
//! without a network. Error bodies from the backend are surfaced verbatim in
//! [`SupabaseError::Api`] - the registration flow shows them to the user
//! unchanged.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

pub mod auth;
pub mod records;

pub use auth::{AccountApi, AuthClient, AuthSession, AuthUser};
pub use records::{RecordsApi, RecordsClient, SelectFilter};

/// Client-level timeout for every backend call.
///
/// The wizard holds the user on a spinner during submission; a hung backend
/// call must resolve into a retryable error rather than wedge the flow.
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur when talking to the hosted backend.
#[derive(Debug, Error)]
pub enum SupabaseError {
    /// HTTP transport failed (includes timeouts).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend returned a non-success status.
    ///
    /// `message` is the backend's own description and is shown to users
    /// verbatim where the flow calls for it.
    #[error("{message}")]
    Api {
        /// HTTP status code of the response.
        status: u16,
        /// Error message extracted from the response body.
        message: String,
    },

    /// JSON (de)serialization failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A lookup matched no record.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl SupabaseError {
    /// Whether this error came from a request timing out.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_timeout())
    }
}

/// Extract a human-readable message from a backend error body.
///
/// The auth surface reports `error_description` or `msg`; the record surface
/// reports `message`; older deployments use a bare `error` field. Falls back
/// to a truncated raw body when none parse.
pub(crate) fn error_message(status: u16, body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        error_description: Option<String>,
        msg: Option<String>,
        message: Option<String>,
        error: Option<String>,
    }

    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(message) = parsed
            .error_description
            .or(parsed.msg)
            .or(parsed.message)
            .or(parsed.error)
        {
            return message;
        }
    }

    let snippet: String = body.chars().take(200).collect();
    if snippet.is_empty() {
        format!("HTTP {status}")
    } else {
        format!("HTTP {status}: {snippet}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_auth_shape() {
        let body = r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#;
        assert_eq!(error_message(400, body), "Invalid login credentials");
    }

    #[test]
    fn test_error_message_msg_shape() {
        let body = r#"{"code":422,"msg":"User already registered"}"#;
        assert_eq!(error_message(422, body), "User already registered");
    }

    #[test]
    fn test_error_message_records_shape() {
        let body = r#"{"code":"42501","message":"new row violates row-level security policy","details":null,"hint":null}"#;
        assert_eq!(
            error_message(403, body),
            "new row violates row-level security policy"
        );
    }

    #[test]
    fn test_error_message_unparseable_body() {
        assert_eq!(error_message(502, "<html>bad gateway</html>"), "HTTP 502: <html>bad gateway</html>");
    }

    #[test]
    fn test_error_message_empty_body() {
        assert_eq!(error_message(500, ""), "HTTP 500");
    }

    #[test]
    fn test_api_error_displays_message_only() {
        let err = SupabaseError::Api {
            status: 422,
            message: "User already registered".to_string(),
        };
        assert_eq!(err.to_string(), "User already registered");
    }
}
