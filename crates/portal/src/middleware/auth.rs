//! Authentication extractors over the session.
//!
//! The session is the single source of truth for "is a merchant signed in,
//! and who". These extractors are the only readers of the merchant key, and
//! the set/clear helpers the only writers, so every handler observes the
//! same whole-value identity. Store errors fail open to "no merchant" -
//! an unreachable session store must degrade to signed-out pages, never
//! error into the render path.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::{CurrentMerchant, keys};

/// Extractor that requires a signed-in merchant.
///
/// If nobody is signed in, the request is redirected to the login page.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireMerchant(merchant): RequireMerchant,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", merchant.email)
/// }
/// ```
pub struct RequireMerchant(pub CurrentMerchant);

/// Error returned when authentication is required but nobody is signed in.
pub enum AuthRejection {
    /// Redirect to login page.
    RedirectToLogin,
    /// Unauthorized response (session machinery missing entirely).
    Unauthorized,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/login").into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireMerchant
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AuthRejection::Unauthorized)?;

        // Fail open: a store error reads as "not signed in"
        let merchant: CurrentMerchant = session
            .get(keys::CURRENT_MERCHANT)
            .await
            .ok()
            .flatten()
            .ok_or(AuthRejection::RedirectToLogin)?;

        Ok(Self(merchant))
    }
}

/// Extractor that optionally gets the signed-in merchant.
///
/// Unlike [`RequireMerchant`], this never rejects the request.
pub struct OptionalMerchant(pub Option<CurrentMerchant>);

impl<S> FromRequestParts<S> for OptionalMerchant
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let merchant = match parts.extensions.get::<Session>() {
            Some(session) => session
                .get::<CurrentMerchant>(keys::CURRENT_MERCHANT)
                .await
                .ok()
                .flatten(),
            None => None,
        };

        Ok(Self(merchant))
    }
}

/// Helper to set the signed-in merchant in the session.
///
/// A single whole-value insert: readers either see the previous identity or
/// this one, never a mixture.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_merchant(
    session: &Session,
    merchant: &CurrentMerchant,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::CURRENT_MERCHANT, merchant).await
}

/// Helper to clear the signed-in merchant from the session (sign-out).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_merchant(
    session: &Session,
) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentMerchant>(keys::CURRENT_MERCHANT)
        .await?;
    Ok(())
}
