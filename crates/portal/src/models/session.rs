//! Session-related types.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use gps_pay_core::{AccountId, BusinessType, Email};

/// Session-stored merchant identity.
///
/// The per-request single source of truth for "is someone signed in, and
/// who". Replacement is always whole-value (one session insert), so readers
/// never observe a partially updated identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentMerchant {
    /// Account id minted by the hosted identity provider.
    pub id: AccountId,
    /// Merchant's email address.
    pub email: Email,
    /// Vertical recorded in the account's signup metadata, when present.
    pub business_type: Option<BusinessType>,
    /// Bearer token for user-scoped backend calls.
    pub access_token: String,
}

/// Session keys for portal state.
pub mod keys {
    /// Key for storing the signed-in merchant.
    pub const CURRENT_MERCHANT: &str = "current_merchant";

    /// Keys for in-progress registration wizards, one per vertical.
    pub const WIZARD_RESTAURANT: &str = "wizard_restaurant";
    pub const WIZARD_TOLL: &str = "wizard_toll";
    pub const WIZARD_SERVICE: &str = "wizard_service";

    /// Keys for completed-registration drafts, one per vertical.
    pub const DRAFT_RESTAURANT: &str = "restaurant_data";
    pub const DRAFT_TOLL: &str = "toll_data";
    pub const DRAFT_SERVICE: &str = "service_data";
}
