//! Registration route handlers.
//!
//! The type selector plus the three per-vertical wizard flows. The wizard
//! state machine lives in `crate::registration`; these handlers move it in
//! and out of the session, apply posted fields, and drive the commit on
//! submission. Non-submit actions follow POST-redirect-GET so a refresh
//! never replays a transition.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use serde::Deserialize;
use tower_sessions::Session;

use gps_pay_core::{BusinessType, ServiceCategory};

use crate::drafts::{DraftStore, RegistrationDraft};
use crate::error::AppError;
use crate::filters;
use crate::middleware::OptionalMerchant;
use crate::registration::{
    AccountFields, BusinessFields, MenuItemDraft, PaymentFields, WizardState, wizard_key,
};
use crate::services::events::AuthEvent;
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// One wizard form post.
///
/// Every step posts through this shape; absent fields belong to the other
/// steps and leave the stored wizard untouched.
#[derive(Debug, Deserialize)]
pub struct WizardForm {
    pub action: String,
    // Step 1
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
    // Step 2
    pub name: Option<String>,
    pub service_category: Option<String>,
    pub address: Option<String>,
    pub lat: Option<String>,
    pub lng: Option<String>,
    // Step 3
    pub upi_id: Option<String>,
    pub item_name: Option<String>,
    pub item_price: Option<String>,
    pub item_description: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Business-type selector template.
#[derive(Template, WebTemplate)]
#[template(path = "register/select.html")]
pub struct RegisterSelectTemplate;

/// Wizard page template.
#[derive(Template, WebTemplate)]
#[template(path = "register/wizard.html")]
pub struct WizardTemplate {
    pub vertical: &'static str,
    pub slug: &'static str,
    pub step: u8,
    pub error: Option<String>,
    pub account: AccountFields,
    pub business: BusinessFields,
    pub payment: PaymentFields,
    pub categories: Vec<(&'static str, &'static str)>,
    pub is_restaurant: bool,
    pub is_service: bool,
    pub submitting: bool,
}

impl WizardTemplate {
    fn from_wizard(wizard: &WizardState) -> Self {
        let business_type = wizard.business_type();
        Self {
            vertical: business_type.label(),
            slug: business_type.slug(),
            step: wizard.step_number(),
            error: wizard.error().map(ToOwned::to_owned),
            account: wizard.account.clone(),
            business: wizard.business.clone(),
            payment: wizard.payment.clone(),
            categories: ServiceCategory::ALL
                .into_iter()
                .map(|c| (c.as_str(), c.label()))
                .collect(),
            is_restaurant: business_type == BusinessType::Restaurant,
            is_service: business_type == BusinessType::Service,
            submitting: wizard.is_submitting(),
        }
    }
}

/// Verification notice template.
#[derive(Template, WebTemplate)]
#[template(path = "register/verification.html")]
pub struct VerificationTemplate {
    pub email: String,
    pub pending_setup: bool,
}

// =============================================================================
// Selector Route
// =============================================================================

/// Display the business-type selector.
pub async fn select_page(OptionalMerchant(merchant): OptionalMerchant) -> Response {
    if merchant.is_some() {
        return Redirect::to("/dashboard").into_response();
    }
    RegisterSelectTemplate.into_response()
}

// =============================================================================
// Wizard Routes
// =============================================================================

/// Display the current wizard step for a vertical.
pub async fn wizard_page(
    OptionalMerchant(merchant): OptionalMerchant,
    session: Session,
    Path(vertical): Path<String>,
) -> Result<Response, AppError> {
    let business_type = parse_vertical(&vertical)?;

    if merchant.is_some() {
        return Ok(Redirect::to("/dashboard").into_response());
    }

    let mut wizard = load_wizard(&session, business_type).await;

    // A submission locked the wizard but never resolved (interrupted
    // request); unlock it so the visitor is not wedged on a spinner.
    if wizard.is_submitting() {
        wizard.fail_submission("Registration was interrupted before completing. Please try again.");
        save_wizard(&session, business_type, &wizard).await?;
    }

    Ok(WizardTemplate::from_wizard(&wizard).into_response())
}

/// Apply a wizard form post and dispatch its action.
pub async fn wizard_action(
    State(state): State<AppState>,
    session: Session,
    Path(vertical): Path<String>,
    Form(form): Form<WizardForm>,
) -> Result<Response, AppError> {
    let business_type = parse_vertical(&vertical)?;
    let wizard_url = format!("/register/{}", business_type.slug());

    let mut wizard = load_wizard(&session, business_type).await;

    // While a submission is in flight the form is locked; bounce any
    // concurrent post back to the (disabled) wizard page.
    if wizard.is_submitting() {
        return Ok(Redirect::to(&wizard_url).into_response());
    }

    apply_form(&mut wizard, &form);

    match form.action.as_str() {
        "next" => {
            // Validation failures stay on the step with the error stored
            let _ = wizard.next();
        }
        "back" => {
            let _ = wizard.back();
        }
        "add_item" => {
            wizard.add_menu_item(MenuItemDraft {
                name: form.item_name.unwrap_or_default(),
                price: form.item_price.unwrap_or_default(),
                description: form.item_description.unwrap_or_default(),
            });
        }
        "submit" => {
            return submit_wizard(&state, &session, business_type, wizard).await;
        }
        // Each menu row's remove button carries its index: "remove_item:0"
        other => match other.strip_prefix("remove_item:").and_then(|i| i.parse().ok()) {
            Some(index) => wizard.remove_menu_item(index),
            None => {
                return Err(AppError::BadRequest(format!(
                    "unknown wizard action: {other}"
                )));
            }
        },
    }

    save_wizard(&session, business_type, &wizard).await?;
    Ok(Redirect::to(&wizard_url).into_response())
}

/// Drive a submission end to end.
///
/// The locked (`Submitting`) wizard is persisted before the remote calls so
/// a concurrent post from a double-clicked button sees the lock; whatever
/// the outcome, the stored state is updated before responding.
async fn submit_wizard(
    state: &AppState,
    session: &Session,
    business_type: BusinessType,
    mut wizard: WizardState,
) -> Result<Response, AppError> {
    let wizard_url = format!("/register/{}", business_type.slug());

    let request = match wizard.submit() {
        Ok(request) => request,
        Err(_) => {
            // Validation failed; the message is on the wizard
            save_wizard(session, business_type, &wizard).await?;
            return Ok(Redirect::to(&wizard_url).into_response());
        }
    };

    save_wizard(session, business_type, &wizard).await?;

    let email = request.credentials.email().clone();
    let profile = request.profile.clone();

    match state.registration().register(request).await {
        Ok(outcome) => {
            let draft = RegistrationDraft {
                id: outcome.account.id,
                created_at: Utc::now(),
                profile,
            };
            if let Err(e) = DraftStore::new(session).save_registration(&draft).await {
                tracing::warn!("Failed to save registration draft: {}", e);
            }

            // The wizard is done; drop it from the session
            let _ = session
                .remove::<WizardState>(wizard_key(business_type))
                .await;

            state.events().publish(AuthEvent::Registered {
                account: outcome.account.id,
                email: email.clone(),
                business_type,
            });

            wizard.complete();
            Ok(VerificationTemplate {
                email: email.into_inner(),
                pending_setup: outcome.is_degraded(),
            }
            .into_response())
        }
        Err(e) => {
            // The provider's message is shown verbatim on the payment step
            wizard.fail_submission(e.to_string());
            save_wizard(session, business_type, &wizard).await?;
            Ok(Redirect::to(&wizard_url).into_response())
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn parse_vertical(slug: &str) -> Result<BusinessType, AppError> {
    BusinessType::from_slug(slug)
        .ok_or_else(|| AppError::NotFound(format!("no such business type: {slug}")))
}

/// Load the session's wizard for a vertical, starting fresh when absent or
/// unreadable.
async fn load_wizard(session: &Session, business_type: BusinessType) -> WizardState {
    match session.get::<WizardState>(wizard_key(business_type)).await {
        Ok(Some(wizard)) => wizard,
        Ok(None) => WizardState::new(business_type),
        Err(e) => {
            tracing::warn!(error = %e, "discarding unreadable wizard state");
            WizardState::new(business_type)
        }
    }
}

async fn save_wizard(
    session: &Session,
    business_type: BusinessType,
    wizard: &WizardState,
) -> Result<(), AppError> {
    session
        .insert(wizard_key(business_type), wizard)
        .await
        .map_err(AppError::from)
}

/// Copy posted fields onto the wizard; fields the form did not carry are
/// left as stored.
fn apply_form(wizard: &mut WizardState, form: &WizardForm) {
    let WizardForm {
        email,
        password,
        confirm_password,
        name,
        service_category,
        address,
        lat,
        lng,
        upi_id,
        ..
    } = form;

    apply(&mut wizard.account.email, email);
    apply(&mut wizard.account.password, password);
    apply(&mut wizard.account.confirm_password, confirm_password);
    apply(&mut wizard.business.name, name);
    apply(&mut wizard.business.service_category, service_category);
    apply(&mut wizard.business.address, address);
    apply(&mut wizard.business.lat, lat);
    apply(&mut wizard.business.lng, lng);
    apply(&mut wizard.payment.upi_id, upi_id);
}

fn apply(target: &mut String, value: &Option<String>) {
    if let Some(value) = value {
        target.clone_from(value);
    }
}
