//! Hosted auth client (sign-up, sign-in, verification, sign-out).
//!
//! Wraps the backend's auth REST surface. The portal never sees or stores
//! password hashes - credentials go straight to the identity provider and a
//! bearer token comes back.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use gps_pay_core::{AccountId, BusinessType};

use crate::config::SupabaseConfig;
use crate::supabase::{REQUEST_TIMEOUT, SupabaseError, error_message};

// =============================================================================
// Wire Types
// =============================================================================

/// An account as reported by the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    /// Backend-minted account id.
    pub id: AccountId,
    /// Account email, when the backend discloses it.
    pub email: Option<String>,
    /// Free-form signup metadata (carries the `user_type` tag).
    #[serde(default)]
    pub user_metadata: Value,
    /// Set once the email has been confirmed.
    #[serde(default)]
    pub email_confirmed_at: Option<DateTime<Utc>>,
}

impl AuthUser {
    /// The business vertical recorded in the account's signup metadata.
    #[must_use]
    pub fn business_type(&self) -> Option<BusinessType> {
        self.user_metadata
            .get("user_type")
            .and_then(Value::as_str)
            .and_then(|s| serde_json::from_value(Value::String(s.to_owned())).ok())
    }
}

/// A bearer session issued by the identity provider.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    /// Bearer token for user-scoped calls.
    pub access_token: String,
    /// Token used to mint a replacement session.
    pub refresh_token: String,
    /// Seconds until `access_token` expires.
    pub expires_in: i64,
    /// The authenticated account.
    pub user: AuthUser,
}

// =============================================================================
// AccountApi
// =============================================================================

/// Operations the portal consumes from the hosted identity provider.
///
/// [`AuthClient`] is the production implementation; tests substitute
/// in-memory fakes to script failures.
#[async_trait]
pub trait AccountApi: Send + Sync {
    /// Create an account. `metadata` is attached to the account verbatim.
    ///
    /// The backend sends the verification email itself; the returned user is
    /// unconfirmed until the emailed code is exchanged.
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: Value,
    ) -> Result<AuthUser, SupabaseError>;

    /// Authenticate with email and password.
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, SupabaseError>;

    /// Fetch the account a bearer token belongs to.
    async fn get_user(&self, access_token: &str) -> Result<AuthUser, SupabaseError>;

    /// Exchange an emailed one-time verification code for a session.
    async fn exchange_code(&self, code: &str) -> Result<AuthSession, SupabaseError>;

    /// Revoke a bearer token.
    async fn sign_out(&self, access_token: &str) -> Result<(), SupabaseError>;
}

// =============================================================================
// AuthClient
// =============================================================================

/// Client for the hosted auth REST surface.
#[derive(Clone)]
pub struct AuthClient {
    inner: Arc<AuthClientInner>,
}

struct AuthClientInner {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl AuthClient {
    /// Create a new auth client.
    ///
    /// # Panics
    ///
    /// Panics if the TLS backend cannot be initialized (startup-only).
    #[must_use]
    pub fn new(config: &SupabaseConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("reqwest client construction only fails on TLS backend misconfiguration");

        Self {
            inner: Arc::new(AuthClientInner {
                client,
                base_url: config.url.clone(),
                anon_key: config.anon_key.clone(),
            }),
        }
    }

    /// Execute an auth request and triage the response.
    ///
    /// Returns `Value::Null` for empty (204) success bodies.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        bearer: Option<&str>,
    ) -> Result<Value, SupabaseError> {
        let url = format!("{}{path}", self.inner.base_url);

        let mut request = self
            .inner
            .client
            .request(method, url)
            .header("apikey", &self.inner.anon_key)
            .header(
                "Authorization",
                format!("Bearer {}", bearer.unwrap_or(&self.inner.anon_key)),
            );

        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(SupabaseError::Api {
                status: status.as_u16(),
                message: error_message(status.as_u16(), &text),
            });
        }

        if text.is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&text)?)
    }
}

/// Pull the user out of a signup response.
///
/// With email confirmation enabled the signup endpoint returns the bare user;
/// with autoconfirm it returns a full session wrapping the user. Accept both.
fn user_from_signup_response(value: Value) -> Result<AuthUser, SupabaseError> {
    let user_value = if value.get("access_token").is_some() {
        value
            .get("user")
            .cloned()
            .ok_or_else(|| SupabaseError::NotFound("user missing from signup session".to_owned()))?
    } else {
        value
    };

    Ok(serde_json::from_value(user_value)?)
}

#[async_trait]
impl AccountApi for AuthClient {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: Value,
    ) -> Result<AuthUser, SupabaseError> {
        let body = serde_json::json!({
            "email": email,
            "password": password,
            "data": metadata,
        });

        let value = self
            .execute(Method::POST, "/auth/v1/signup", Some(body), None)
            .await?;

        user_from_signup_response(value)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, SupabaseError> {
        let body = serde_json::json!({
            "email": email,
            "password": password,
        });

        let value = self
            .execute(
                Method::POST,
                "/auth/v1/token?grant_type=password",
                Some(body),
                None,
            )
            .await?;

        Ok(serde_json::from_value(value)?)
    }

    async fn get_user(&self, access_token: &str) -> Result<AuthUser, SupabaseError> {
        let value = self
            .execute(Method::GET, "/auth/v1/user", None, Some(access_token))
            .await?;

        Ok(serde_json::from_value(value)?)
    }

    async fn exchange_code(&self, code: &str) -> Result<AuthSession, SupabaseError> {
        let body = serde_json::json!({ "auth_code": code });

        let value = self
            .execute(
                Method::POST,
                "/auth/v1/token?grant_type=pkce",
                Some(body),
                None,
            )
            .await?;

        Ok(serde_json::from_value(value)?)
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), SupabaseError> {
        self.execute(Method::POST, "/auth/v1/logout", None, Some(access_token))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_user_from_confirmation_pending_signup() {
        let value = serde_json::json!({
            "id": "7e5f7b52-2b53-4f2a-a5a8-0b91d2a66a15",
            "email": "merchant@example.com",
            "user_metadata": { "user_type": "toll" },
        });

        let user = user_from_signup_response(value).unwrap();
        assert_eq!(user.email.as_deref(), Some("merchant@example.com"));
        assert_eq!(user.business_type(), Some(BusinessType::Toll));
        assert!(user.email_confirmed_at.is_none());
    }

    #[test]
    fn test_user_from_autoconfirm_signup() {
        let value = serde_json::json!({
            "access_token": "token",
            "refresh_token": "refresh",
            "expires_in": 3600,
            "user": {
                "id": "7e5f7b52-2b53-4f2a-a5a8-0b91d2a66a15",
                "email": "merchant@example.com",
            },
        });

        let user = user_from_signup_response(value).unwrap();
        assert_eq!(user.email.as_deref(), Some("merchant@example.com"));
        assert_eq!(user.business_type(), None);
    }

    #[test]
    fn test_business_type_from_unknown_metadata() {
        let user = AuthUser {
            id: AccountId::new(uuid::Uuid::nil()),
            email: None,
            user_metadata: serde_json::json!({ "user_type": "spaceport" }),
            email_confirmed_at: None,
        };
        assert_eq!(user.business_type(), None);
    }
}
