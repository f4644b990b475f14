//! Dashboard route handlers.
//!
//! Renders session identity plus whatever registration drafts are present,
//! and - for toll merchants - the authoritative profile and recent
//! transactions from the record store. Record-store failures degrade to the
//! draft-only view; they never break the page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tower_sessions::Session;

use gps_pay_core::{BusinessProfile, BusinessType};

use crate::drafts::DraftStore;
use crate::filters;
use crate::middleware::RequireMerchant;
use crate::models::records::VehicleType;
use crate::models::CurrentMerchant;
use crate::routes::auth::redirect_with_error;
use crate::services::toll::{NewTransaction, TollServiceError};
use crate::state::AppState;

// =============================================================================
// View Types
// =============================================================================

/// A draft menu item, formatted for display.
pub struct MenuItemView {
    pub name: String,
    pub price: Decimal,
    pub description: Option<String>,
}

/// The restaurant draft, as the dashboard shows it.
pub struct RestaurantView {
    pub name: String,
    pub address: String,
    pub menu_items: Vec<MenuItemView>,
}

/// A toll or service draft, as the dashboard shows it.
pub struct BusinessCardView {
    pub heading: &'static str,
    pub name: String,
    pub address: String,
    pub lat: String,
    pub lng: String,
    pub upi_id: String,
}

/// Live toll data pulled from the record store.
pub struct TollLiveView {
    pub vehicle_types: Vec<VehicleType>,
    pub transactions: Vec<TransactionView>,
}

/// One transaction row.
pub struct TransactionView {
    pub vehicle_number: String,
    pub vehicle_type: String,
    pub amount: Decimal,
    pub payment_status: String,
    pub payment_method: String,
    pub date: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Dashboard page template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub email: String,
    pub error: Option<String>,
    pub success: Option<String>,
    pub restaurant: Option<RestaurantView>,
    pub toll: Option<BusinessCardView>,
    pub service: Option<BusinessCardView>,
    pub toll_live: Option<TollLiveView>,
    pub is_toll_merchant: bool,
}

impl DashboardTemplate {
    fn has_data(&self) -> bool {
        self.restaurant.is_some() || self.toll.is_some() || self.service.is_some()
    }
}

// =============================================================================
// Form and Query Types
// =============================================================================

/// Feedback messages for dashboard actions.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Record-transaction form data.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    pub vehicle_number: String,
    pub vehicle_type: String,
    pub amount: String,
}

/// Add-vehicle-type form data.
#[derive(Debug, Deserialize)]
pub struct VehicleTypeForm {
    pub name: String,
    pub fee: String,
}

// =============================================================================
// Routes
// =============================================================================

/// Display the dashboard.
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    RequireMerchant(merchant): RequireMerchant,
    Query(query): Query<MessageQuery>,
) -> Response {
    let drafts = DraftStore::new(&session);

    let restaurant = drafts
        .load_registration(BusinessType::Restaurant)
        .await
        .and_then(|draft| restaurant_view(draft.profile));
    let toll = drafts
        .load_registration(BusinessType::Toll)
        .await
        .and_then(|draft| card_view(draft.profile, "Your Toll Booth"));
    let service = drafts
        .load_registration(BusinessType::Service)
        .await
        .and_then(|draft| card_view(draft.profile, "Your Service"));

    let is_toll_merchant =
        merchant.business_type == Some(BusinessType::Toll) || toll.is_some();
    let toll_live = if is_toll_merchant {
        load_toll_live(&state, &merchant).await
    } else {
        None
    };

    DashboardTemplate {
        email: merchant.email.into_inner(),
        error: query.error,
        success: query.success,
        restaurant,
        toll,
        service,
        toll_live,
        is_toll_merchant,
    }
    .into_response()
}

/// Record a toll transaction from the dashboard form.
pub async fn record_transaction(
    State(state): State<AppState>,
    RequireMerchant(merchant): RequireMerchant,
    Form(form): Form<TransactionForm>,
) -> Response {
    if form.vehicle_number.trim().is_empty() || form.vehicle_type.trim().is_empty() {
        return redirect_with_error("/dashboard", "Please fill in all transaction fields");
    }
    let Ok(amount) = form.amount.trim().parse::<Decimal>() else {
        return redirect_with_error("/dashboard", "Please enter a valid amount");
    };

    let toll = state.toll();
    let result = async {
        let profile = toll.get_profile(merchant.id).await?;
        let profile_id = profile.id.ok_or(TollServiceError::MissingProfileId)?;
        toll.record_transaction(
            profile_id,
            NewTransaction {
                vehicle_number: form.vehicle_number.trim().to_owned(),
                vehicle_type: form.vehicle_type.trim().to_owned(),
                amount,
                payment_status: None,
                payment_method: None,
            },
        )
        .await
    }
    .await;

    match result {
        Ok(_) => Redirect::to("/dashboard?success=Transaction%20recorded").into_response(),
        Err(e) => {
            tracing::warn!("Failed to record transaction: {}", e);
            redirect_with_error("/dashboard", "Could not record the transaction")
        }
    }
}

/// Add a vehicle type to the toll profile from the dashboard form.
pub async fn add_vehicle_type(
    State(state): State<AppState>,
    RequireMerchant(merchant): RequireMerchant,
    Form(form): Form<VehicleTypeForm>,
) -> Response {
    if form.name.trim().is_empty() {
        return redirect_with_error("/dashboard", "Please enter a vehicle type name");
    }
    let Ok(fee) = form.fee.trim().parse::<Decimal>() else {
        return redirect_with_error("/dashboard", "Please enter a valid fee");
    };

    let toll = state.toll();
    let result = async {
        let profile = toll.get_profile(merchant.id).await?;
        let profile_id = profile.id.ok_or(TollServiceError::MissingProfileId)?;
        toll.add_vehicle_type(
            profile_id,
            VehicleType {
                name: form.name.trim().to_owned(),
                fee,
            },
        )
        .await
    }
    .await;

    match result {
        Ok(_) => Redirect::to("/dashboard?success=Vehicle%20type%20added").into_response(),
        Err(e) => {
            tracing::warn!("Failed to add vehicle type: {}", e);
            redirect_with_error("/dashboard", "Could not add the vehicle type")
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn restaurant_view(profile: BusinessProfile) -> Option<RestaurantView> {
    match profile {
        BusinessProfile::Restaurant {
            name,
            address,
            menu_items,
            ..
        } => Some(RestaurantView {
            name,
            address,
            menu_items: menu_items
                .into_iter()
                .map(|item| MenuItemView {
                    name: item.name,
                    price: item.price,
                    description: item.description,
                })
                .collect(),
        }),
        _ => None,
    }
}

fn card_view(profile: BusinessProfile, heading: &'static str) -> Option<BusinessCardView> {
    match profile {
        BusinessProfile::Toll {
            name,
            address,
            coordinates,
            upi_id,
        } => Some(BusinessCardView {
            heading,
            name,
            address,
            lat: coordinates.lat.to_string(),
            lng: coordinates.lng.to_string(),
            upi_id: upi_id.into_inner(),
        }),
        BusinessProfile::Service {
            service_name,
            address,
            coordinates,
            upi_id,
            ..
        } => Some(BusinessCardView {
            heading,
            name: service_name,
            address,
            lat: coordinates.lat.to_string(),
            lng: coordinates.lng.to_string(),
            upi_id: upi_id.into_inner(),
        }),
        BusinessProfile::Restaurant { .. } => None,
    }
}

/// Pull live toll data; any failure degrades to the draft-only view.
async fn load_toll_live(state: &AppState, merchant: &CurrentMerchant) -> Option<TollLiveView> {
    let toll = state.toll();

    let profile = match toll.get_profile(merchant.id).await {
        Ok(profile) => profile,
        Err(TollServiceError::ProfileNotFound) => return None,
        Err(e) => {
            tracing::warn!("Failed to load toll profile: {}", e);
            return None;
        }
    };

    let transactions = match profile.id {
        Some(profile_id) => match toll.transactions(profile_id).await {
            Ok(transactions) => transactions,
            Err(e) => {
                tracing::warn!("Failed to load transactions: {}", e);
                Vec::new()
            }
        },
        None => Vec::new(),
    };

    Some(TollLiveView {
        vehicle_types: profile.vehicle_types,
        transactions: transactions
            .into_iter()
            .map(|t| TransactionView {
                vehicle_number: t.vehicle_number,
                vehicle_type: t.vehicle_type,
                amount: t.amount,
                payment_status: t.payment_status,
                payment_method: t.payment_method,
                date: t
                    .transaction_date
                    .map(|d| d.format("%d %b %Y %H:%M").to_string())
                    .unwrap_or_default(),
            })
            .collect(),
    })
}
