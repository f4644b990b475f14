//! HTTP route handlers for the portal.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Home page
//! GET  /health                  - Health check
//!
//! # Auth
//! GET  /login                   - Login page (shows the verified banner)
//! POST /login                   - Login action
//! POST /logout                  - Sign-out action
//! GET  /auth/callback           - Email-verification code exchange
//!
//! # Registration
//! GET  /register                - Business-type selector
//! GET  /register/{vertical}     - Wizard (restaurant | toll | other)
//! POST /register/{vertical}     - Wizard action (next/back/add_item/remove_item/submit)
//!
//! # Dashboard (requires auth)
//! GET  /dashboard               - Session identity + drafts + toll data
//! POST /dashboard/transactions  - Record a toll transaction
//! POST /dashboard/vehicle-types - Add a vehicle type to the toll profile
//! ```

pub mod auth;
pub mod dashboard;
pub mod home;
pub mod register;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::auth_rate_limiter;
use crate::state::AppState;

/// Routes that accept credentials, behind the strict rate limiter.
pub fn credential_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route(
            "/register/{vertical}",
            get(register::wizard_page).post(register::wizard_action),
        )
        .layer(auth_rate_limiter())
}

/// Create the dashboard routes router.
pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::index))
        .route("/transactions", post(dashboard::record_transaction))
        .route("/vehicle-types", post(dashboard::add_vehicle_type))
}

/// Create all routes for the portal.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Sign-out and the email-verification callback
        .route("/logout", post(auth::logout))
        .route("/auth/callback", get(auth::verify_callback))
        // Business-type selector
        .route("/register", get(register::select_page))
        // Dashboard
        .nest("/dashboard", dashboard_routes())
        // Credential-bearing routes (rate limited)
        .merge(credential_routes())
}
