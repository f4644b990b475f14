//! The merchant registration wizard.
//!
//! Each vertical registers through the same fixed three-step flow: account
//! credentials, business information, then payment details. The state machine
//! in [`wizard`] owns the step gating and field validation; the commit
//! (account creation followed by the best-effort profile write) lives in
//! `crate::services::registration`.

pub mod wizard;

pub use wizard::{
    AccountFields, BusinessFields, MenuItemDraft, PaymentFields, RegistrationRequest, WizardError,
    WizardStage, WizardState,
};

use gps_pay_core::BusinessType;

use crate::models::keys;

/// Session key holding a vertical's in-progress wizard.
#[must_use]
pub const fn wizard_key(business_type: BusinessType) -> &'static str {
    match business_type {
        BusinessType::Restaurant => keys::WIZARD_RESTAURANT,
        BusinessType::Toll => keys::WIZARD_TOLL,
        BusinessType::Service => keys::WIZARD_SERVICE,
    }
}
