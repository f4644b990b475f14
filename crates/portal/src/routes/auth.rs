//! Authentication route handlers.
//!
//! Handles login, sign-out, and the email-verification callback against the
//! hosted identity provider. Registration lives in `super::register`.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use gps_pay_core::Email;

use crate::error::{clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{OptionalMerchant, clear_current_merchant, set_current_merchant};
use crate::models::CurrentMerchant;
use crate::services::events::AuthEvent;
use crate::state::AppState;
use crate::supabase::AccountApi;

// =============================================================================
// Form and Query Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Query parameters for error/success display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub verified: Option<String>,
}

/// Query parameters for the email-verification callback.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub success: Option<String>,
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
///
/// Already-authenticated visitors go straight to the dashboard. Arriving
/// with `?verified=true` (the verification callback's redirect) shows the
/// confirmation banner.
pub async fn login_page(
    OptionalMerchant(merchant): OptionalMerchant,
    Query(query): Query<MessageQuery>,
) -> Response {
    if merchant.is_some() {
        return Redirect::to("/dashboard").into_response();
    }

    let success = (query.verified.as_deref() == Some("true"))
        .then(|| "Email verified successfully! You can now log in.".to_owned());

    LoginTemplate {
        error: query.error,
        success,
    }
    .into_response()
}

/// Handle login form submission.
///
/// Authenticates against the hosted identity provider; the provider's error
/// message is surfaced verbatim on failure.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let Ok(email) = Email::parse(form.email.trim()) else {
        return redirect_with_error("/login", "Please enter a valid email address");
    };

    match state.accounts().sign_in(email.as_str(), &form.password).await {
        Ok(auth_session) => {
            let merchant = CurrentMerchant {
                id: auth_session.user.id,
                email: email.clone(),
                business_type: auth_session.user.business_type(),
                access_token: auth_session.access_token,
            };

            if let Err(e) = set_current_merchant(&session, &merchant).await {
                tracing::error!("Failed to set session: {}", e);
                return redirect_with_error("/login", "Could not start a session. Please try again.");
            }

            set_sentry_user(&merchant.id, Some(email.as_str()));
            state.events().publish(AuthEvent::SignedIn {
                account: merchant.id,
                email,
            });

            Redirect::to("/dashboard").into_response()
        }
        Err(e) => {
            tracing::warn!("Login failed: {}", e);
            redirect_with_error("/login", &e.to_string())
        }
    }
}

// =============================================================================
// Verification Callback
// =============================================================================

/// Handle the email-verification callback.
///
/// The verification email links here with a one-time code; exchange it for a
/// session and send the visitor to the login page with the success flag. A
/// failed exchange still redirects - the account may already be confirmed,
/// and login is the recovery path either way.
pub async fn verify_callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> Redirect {
    if let Some(code) = query.code {
        if let Err(e) = state.accounts().exchange_code(&code).await {
            tracing::warn!("Verification code exchange failed: {}", e);
        }
    }

    Redirect::to("/login?verified=true")
}

// =============================================================================
// Sign-out Route
// =============================================================================

/// Handle sign-out.
///
/// Revokes the backend token (best effort), clears the merchant, and
/// destroys the session.
pub async fn logout(State(state): State<AppState>, session: Session) -> Response {
    if let Ok(Some(merchant)) = session
        .get::<CurrentMerchant>(crate::models::keys::CURRENT_MERCHANT)
        .await
    {
        // Revoke the backend token (best effort)
        if let Err(e) = state.accounts().sign_out(&merchant.access_token).await {
            tracing::warn!("Failed to revoke backend token: {}", e);
        }

        state
            .events()
            .publish(AuthEvent::SignedOut { account: merchant.id });
    }

    if let Err(e) = clear_current_merchant(&session).await {
        tracing::error!("Failed to clear session: {}", e);
    }

    // Also destroy the entire session (drops wizards and drafts)
    if let Err(e) = session.flush().await {
        tracing::error!("Failed to flush session: {}", e);
    }

    clear_sentry_user();

    Redirect::to("/").into_response()
}

// =============================================================================
// Helpers
// =============================================================================

/// Redirect to `path` with a user-visible error message in the query.
pub(crate) fn redirect_with_error(path: &str, message: &str) -> Response {
    Redirect::to(&format!("{path}?error={}", urlencoding::encode(message))).into_response()
}
