//! Registration wizard state machine.
//!
//! A wizard is created when a visitor opens a vertical's registration flow
//! and lives in their session until they submit successfully or walk away.
//! Fields are kept as the raw strings the form posted; validation runs when
//! a transition is attempted, and the typed [`RegistrationRequest`] is only
//! built once every rule passes at submission.
//!
//! Step gating:
//!
//! ```text
//! Account --next--> BusinessInfo --next--> PaymentDetails --submit--> Submitting
//!    ^                  |   ^                  |                         |
//!    +------back--------+   +-------back------+ <----fail_submission----+
//!                                                                       |
//!                                              VerificationPending <--complete
//! ```
//!
//! A failed validation stores its message on the wizard and leaves the step
//! unchanged; a successful transition clears it. `back` never loses data.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use gps_pay_core::{
    BusinessProfile, BusinessType, Coordinates, CoordinatesError, CredentialsError, MenuItem,
    ServiceCategory, SignupCredentials, UpiId,
};

// =============================================================================
// Inline validation messages
// =============================================================================

const MSG_FILL_ALL: &str = "Please fill in all fields";
const MSG_FILL_REQUIRED: &str = "Please fill in all required fields";
const MSG_PASSWORD_MISMATCH: &str = "Passwords do not match";
const MSG_PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters";
const MSG_EMAIL_INVALID: &str = "Please enter a valid email address";
const MSG_SET_COORDINATES: &str = "Please set your location coordinates";
const MSG_COORDINATES_INVALID: &str = "Please enter valid location coordinates";
const MSG_UPI_REQUIRED: &str = "Please enter your UPI ID";
const MSG_MENU_EMPTY: &str = "Please add at least one menu item";
const MSG_MENU_INCOMPLETE: &str = "Please fill in all required menu item fields";
const MSG_MENU_PRICE_INVALID: &str = "Please enter a valid price for each menu item";

// =============================================================================
// Errors
// =============================================================================

/// Errors raised by wizard transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    /// A field-level rule failed; the message is shown inline on the form.
    #[error("{0}")]
    Validation(String),

    /// `back()` was called on the first step.
    #[error("already at the first step")]
    AtFirstStep,

    /// `next()` was called on the last editable step.
    #[error("no further step to advance to")]
    NoNextStep,

    /// `submit()` was called away from the payment step.
    #[error("the wizard is not at the payment step")]
    NotReadyToSubmit,

    /// A submission is already in flight for this wizard.
    #[error("a submission is already in progress")]
    SubmissionInProgress,

    /// The wizard already reached the verification notice.
    #[error("the registration was already submitted")]
    AlreadyCompleted,
}

impl WizardError {
    fn validation(message: &str) -> Self {
        Self::Validation(message.to_owned())
    }
}

// =============================================================================
// Stages and fields
// =============================================================================

/// Where the wizard currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStage {
    /// Step 1: account credentials.
    Account,
    /// Step 2: business information.
    BusinessInfo,
    /// Step 3: payment details (and menu, for restaurants).
    PaymentDetails,
    /// The commit is in flight; the submit control is locked.
    Submitting,
    /// Terminal: the user is told to confirm their email.
    VerificationPending,
}

/// Step-1 form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountFields {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Step-2 form fields.
///
/// `name` doubles as the service name for the services vertical;
/// `service_category` is only consulted there.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessFields {
    pub name: String,
    pub service_category: String,
    pub address: String,
    pub lat: String,
    pub lng: String,
}

/// Step-3 form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentFields {
    pub upi_id: String,
    pub menu_items: Vec<MenuItemDraft>,
}

/// A menu item as entered, before price parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItemDraft {
    pub name: String,
    pub price: String,
    pub description: String,
}

/// The validated payload a successful `submit()` hands to the commit path.
#[derive(Debug, Clone)]
pub struct RegistrationRequest {
    pub credentials: SignupCredentials,
    pub profile: BusinessProfile,
}

// =============================================================================
// WizardState
// =============================================================================

/// Per-session wizard state for one vertical.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardState {
    business_type: BusinessType,
    stage: WizardStage,
    pub account: AccountFields,
    pub business: BusinessFields,
    pub payment: PaymentFields,
    error: Option<String>,
}

impl WizardState {
    /// Start a fresh wizard at the account step.
    #[must_use]
    pub fn new(business_type: BusinessType) -> Self {
        Self {
            business_type,
            stage: WizardStage::Account,
            account: AccountFields::default(),
            business: BusinessFields::default(),
            payment: PaymentFields::default(),
            error: None,
        }
    }

    /// The vertical this wizard registers.
    #[must_use]
    pub const fn business_type(&self) -> BusinessType {
        self.business_type
    }

    /// Current stage.
    #[must_use]
    pub const fn stage(&self) -> WizardStage {
        self.stage
    }

    /// The inline error from the last failed transition, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// 1-based step number for the progress indicator.
    #[must_use]
    pub const fn step_number(&self) -> u8 {
        match self.stage {
            WizardStage::Account => 1,
            WizardStage::BusinessInfo => 2,
            WizardStage::PaymentDetails
            | WizardStage::Submitting
            | WizardStage::VerificationPending => 3,
        }
    }

    /// Whether the submit control must be disabled.
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        matches!(self.stage, WizardStage::Submitting)
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Validate the current step and advance to the next one.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::Validation`] (also stored on the wizard for
    /// rendering) when the current step's rules fail, or a state error when
    /// there is no next step.
    pub fn next(&mut self) -> Result<(), WizardError> {
        match self.stage {
            WizardStage::Account => {
                self.checked(Self::validate_account)?;
                self.stage = WizardStage::BusinessInfo;
                Ok(())
            }
            WizardStage::BusinessInfo => {
                self.checked(Self::validate_business)?;
                self.stage = WizardStage::PaymentDetails;
                Ok(())
            }
            WizardStage::PaymentDetails => Err(WizardError::NoNextStep),
            WizardStage::Submitting => Err(WizardError::SubmissionInProgress),
            WizardStage::VerificationPending => Err(WizardError::AlreadyCompleted),
        }
    }

    /// Move back one step, clearing any error. Field data is untouched.
    ///
    /// # Errors
    ///
    /// Returns a state error when there is no previous step to return to.
    pub fn back(&mut self) -> Result<(), WizardError> {
        match self.stage {
            WizardStage::Account => Err(WizardError::AtFirstStep),
            WizardStage::BusinessInfo => {
                self.stage = WizardStage::Account;
                self.error = None;
                Ok(())
            }
            WizardStage::PaymentDetails => {
                self.stage = WizardStage::BusinessInfo;
                self.error = None;
                Ok(())
            }
            WizardStage::Submitting => Err(WizardError::SubmissionInProgress),
            WizardStage::VerificationPending => Err(WizardError::AlreadyCompleted),
        }
    }

    /// Validate everything and lock the wizard for submission.
    ///
    /// Re-validates all three steps - a session could have been mutated out
    /// of band, and the coordinates rule must hold at submit time no matter
    /// how the payment step looks. On success the stage moves to
    /// [`WizardStage::Submitting`] and the typed request is returned; the
    /// caller drives the remote commit and then calls
    /// [`Self::fail_submission`] or [`Self::complete`].
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::Validation`] when a rule fails (wizard stays
    /// editable at the payment step), [`WizardError::SubmissionInProgress`]
    /// when a commit is already in flight, or another state error when the
    /// wizard is not at the payment step.
    pub fn submit(&mut self) -> Result<RegistrationRequest, WizardError> {
        match self.stage {
            WizardStage::PaymentDetails => {}
            WizardStage::Submitting => return Err(WizardError::SubmissionInProgress),
            WizardStage::VerificationPending => return Err(WizardError::AlreadyCompleted),
            WizardStage::Account | WizardStage::BusinessInfo => {
                return Err(WizardError::NotReadyToSubmit);
            }
        }

        let credentials = self.checked(Self::validate_account)?;
        let (name, category, address, coordinates) = self.checked(Self::validate_business)?;
        let (upi_id, menu_items) = self.checked(Self::validate_payment)?;

        let profile = match self.business_type {
            BusinessType::Restaurant => BusinessProfile::Restaurant {
                name,
                address,
                coordinates,
                upi_id,
                menu_items,
            },
            BusinessType::Toll => BusinessProfile::Toll {
                name,
                address,
                coordinates,
                upi_id,
            },
            BusinessType::Service => BusinessProfile::Service {
                service_name: name,
                // validate_business always yields a category for this vertical
                category: category.unwrap_or(ServiceCategory::Other),
                address,
                coordinates,
                upi_id,
            },
        };

        self.stage = WizardStage::Submitting;
        Ok(RegistrationRequest {
            credentials,
            profile,
        })
    }

    /// Record a failed commit: surface the backend's message verbatim and
    /// return the wizard to the editable payment step.
    pub fn fail_submission(&mut self, message: impl Into<String>) {
        self.stage = WizardStage::PaymentDetails;
        self.error = Some(message.into());
    }

    /// Record a successful commit; the wizard becomes terminal.
    pub fn complete(&mut self) {
        self.stage = WizardStage::VerificationPending;
        self.error = None;
    }

    // =========================================================================
    // Menu editing (restaurant vertical)
    // =========================================================================

    /// Append a menu item row.
    pub fn add_menu_item(&mut self, item: MenuItemDraft) {
        self.payment.menu_items.push(item);
        self.error = None;
    }

    /// Remove the menu item row at `index`; out-of-range indexes are ignored.
    pub fn remove_menu_item(&mut self, index: usize) {
        if index < self.payment.menu_items.len() {
            self.payment.menu_items.remove(index);
        }
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Run a validator, mirroring its outcome onto the stored error.
    fn checked<T>(
        &mut self,
        validate: impl Fn(&Self) -> Result<T, WizardError>,
    ) -> Result<T, WizardError> {
        match validate(self) {
            Ok(value) => {
                self.error = None;
                Ok(value)
            }
            Err(e) => {
                if let WizardError::Validation(message) = &e {
                    self.error = Some(message.clone());
                }
                Err(e)
            }
        }
    }

    fn validate_account(&self) -> Result<SignupCredentials, WizardError> {
        SignupCredentials::new(
            self.account.email.trim(),
            &self.account.password,
            &self.account.confirm_password,
        )
        .map_err(|e| {
            WizardError::validation(match e {
                CredentialsError::MissingFields => MSG_FILL_ALL,
                CredentialsError::PasswordMismatch => MSG_PASSWORD_MISMATCH,
                CredentialsError::PasswordTooShort { .. } => MSG_PASSWORD_TOO_SHORT,
                CredentialsError::InvalidEmail(_) => MSG_EMAIL_INVALID,
            })
        })
    }

    #[allow(clippy::type_complexity)]
    fn validate_business(
        &self,
    ) -> Result<(String, Option<ServiceCategory>, String, Coordinates), WizardError> {
        let name = self.business.name.trim();
        let address = self.business.address.trim();

        if name.is_empty() || address.is_empty() {
            return Err(WizardError::validation(MSG_FILL_REQUIRED));
        }

        let category = if self.business_type == BusinessType::Service {
            let category = ServiceCategory::from_str_opt(self.business.service_category.trim())
                .ok_or_else(|| WizardError::validation(MSG_FILL_REQUIRED))?;
            Some(category)
        } else {
            None
        };

        let coordinates =
            Coordinates::parse(&self.business.lat, &self.business.lng).map_err(|e| {
                WizardError::validation(match e {
                    CoordinatesError::Missing => MSG_SET_COORDINATES,
                    _ => MSG_COORDINATES_INVALID,
                })
            })?;

        Ok((name.to_owned(), category, address.to_owned(), coordinates))
    }

    fn validate_payment(&self) -> Result<(UpiId, Vec<MenuItem>), WizardError> {
        let upi_id = UpiId::parse(&self.payment.upi_id)
            .map_err(|_| WizardError::validation(MSG_UPI_REQUIRED))?;

        if self.business_type != BusinessType::Restaurant {
            return Ok((upi_id, Vec::new()));
        }

        if self.payment.menu_items.is_empty() {
            return Err(WizardError::validation(MSG_MENU_EMPTY));
        }

        let mut menu_items = Vec::with_capacity(self.payment.menu_items.len());
        for item in &self.payment.menu_items {
            let name = item.name.trim();
            let price = item.price.trim();

            if name.is_empty() || price.is_empty() {
                return Err(WizardError::validation(MSG_MENU_INCOMPLETE));
            }

            let price: Decimal = price
                .parse()
                .map_err(|_| WizardError::validation(MSG_MENU_PRICE_INVALID))?;
            if price.is_sign_negative() {
                return Err(WizardError::validation(MSG_MENU_PRICE_INVALID));
            }

            let description = item.description.trim();
            menu_items.push(MenuItem {
                name: name.to_owned(),
                price,
                description: (!description.is_empty()).then(|| description.to_owned()),
            });
        }

        Ok((upi_id, menu_items))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn filled_account(wizard: &mut WizardState) {
        wizard.account = AccountFields {
            email: "a@b.com".to_owned(),
            password: "secret1".to_owned(),
            confirm_password: "secret1".to_owned(),
        };
    }

    fn filled_business(wizard: &mut WizardState) {
        wizard.business = BusinessFields {
            name: "NH-48 Plaza".to_owned(),
            service_category: String::new(),
            address: "NH-48, Gurugram".to_owned(),
            lat: "28.4595".to_owned(),
            lng: "77.0266".to_owned(),
        };
    }

    /// A toll wizard advanced to the payment step with valid data.
    fn at_payment_step() -> WizardState {
        let mut wizard = WizardState::new(BusinessType::Toll);
        filled_account(&mut wizard);
        wizard.next().unwrap();
        filled_business(&mut wizard);
        wizard.next().unwrap();
        wizard.payment.upi_id = "nh48@upi".to_owned();
        wizard
    }

    #[test]
    fn test_starts_at_account_step() {
        let wizard = WizardState::new(BusinessType::Restaurant);
        assert_eq!(wizard.stage(), WizardStage::Account);
        assert_eq!(wizard.step_number(), 1);
        assert!(wizard.error().is_none());
    }

    #[test]
    fn test_next_rejects_empty_account() {
        let mut wizard = WizardState::new(BusinessType::Toll);
        let err = wizard.next().unwrap_err();
        assert_eq!(err, WizardError::Validation(MSG_FILL_ALL.to_owned()));
        assert_eq!(wizard.stage(), WizardStage::Account);
        assert_eq!(wizard.error(), Some(MSG_FILL_ALL));
    }

    #[test]
    fn test_next_rejects_password_mismatch() {
        let mut wizard = WizardState::new(BusinessType::Toll);
        wizard.account = AccountFields {
            email: "a@b.com".to_owned(),
            password: "secret1".to_owned(),
            confirm_password: "secret2".to_owned(),
        };
        assert_eq!(
            wizard.next().unwrap_err(),
            WizardError::Validation(MSG_PASSWORD_MISMATCH.to_owned())
        );
        assert_eq!(wizard.stage(), WizardStage::Account);
    }

    #[test]
    fn test_next_rejects_short_password() {
        let mut wizard = WizardState::new(BusinessType::Toll);
        wizard.account = AccountFields {
            email: "a@b.com".to_owned(),
            password: "short".to_owned(),
            confirm_password: "short".to_owned(),
        };
        assert_eq!(
            wizard.next().unwrap_err(),
            WizardError::Validation(MSG_PASSWORD_TOO_SHORT.to_owned())
        );
    }

    #[test]
    fn test_valid_account_advances() {
        let mut wizard = WizardState::new(BusinessType::Toll);
        filled_account(&mut wizard);
        wizard.next().unwrap();
        assert_eq!(wizard.stage(), WizardStage::BusinessInfo);
        assert_eq!(wizard.step_number(), 2);
        assert!(wizard.error().is_none());
    }

    #[test]
    fn test_business_step_requires_coordinates() {
        let mut wizard = WizardState::new(BusinessType::Toll);
        filled_account(&mut wizard);
        wizard.next().unwrap();
        filled_business(&mut wizard);
        wizard.business.lng = String::new();

        assert_eq!(
            wizard.next().unwrap_err(),
            WizardError::Validation(MSG_SET_COORDINATES.to_owned())
        );
        assert_eq!(wizard.stage(), WizardStage::BusinessInfo);
    }

    #[test]
    fn test_business_step_rejects_garbage_coordinates() {
        let mut wizard = WizardState::new(BusinessType::Toll);
        filled_account(&mut wizard);
        wizard.next().unwrap();
        filled_business(&mut wizard);
        wizard.business.lat = "north of the river".to_owned();

        assert_eq!(
            wizard.next().unwrap_err(),
            WizardError::Validation(MSG_COORDINATES_INVALID.to_owned())
        );
    }

    #[test]
    fn test_service_vertical_requires_category() {
        let mut wizard = WizardState::new(BusinessType::Service);
        filled_account(&mut wizard);
        wizard.next().unwrap();
        filled_business(&mut wizard);

        assert_eq!(
            wizard.next().unwrap_err(),
            WizardError::Validation(MSG_FILL_REQUIRED.to_owned())
        );

        wizard.business.service_category = "educational".to_owned();
        wizard.next().unwrap();
        assert_eq!(wizard.stage(), WizardStage::PaymentDetails);
    }

    #[test]
    fn test_back_then_next_loses_nothing() {
        let mut wizard = at_payment_step();
        let before = wizard.clone();

        wizard.back().unwrap();
        assert_eq!(wizard.stage(), WizardStage::BusinessInfo);
        wizard.next().unwrap();

        assert_eq!(wizard.stage(), WizardStage::PaymentDetails);
        assert_eq!(wizard.account, before.account);
        assert_eq!(wizard.business, before.business);
        assert_eq!(wizard.payment, before.payment);
    }

    #[test]
    fn test_back_clears_error() {
        let mut wizard = WizardState::new(BusinessType::Toll);
        filled_account(&mut wizard);
        wizard.next().unwrap();
        let _ = wizard.next(); // fails, business fields empty
        assert!(wizard.error().is_some());

        wizard.back().unwrap();
        assert!(wizard.error().is_none());
    }

    #[test]
    fn test_back_from_first_step_errors() {
        let mut wizard = WizardState::new(BusinessType::Toll);
        assert_eq!(wizard.back().unwrap_err(), WizardError::AtFirstStep);
    }

    #[test]
    fn test_submit_requires_upi() {
        let mut wizard = at_payment_step();
        wizard.payment.upi_id = String::new();

        assert_eq!(
            wizard.submit().unwrap_err(),
            WizardError::Validation(MSG_UPI_REQUIRED.to_owned())
        );
        assert_eq!(wizard.stage(), WizardStage::PaymentDetails);
    }

    #[test]
    fn test_submit_rejects_unset_coordinates_regardless_of_payment_step() {
        // Coordinates were cleared after step 2 passed; the payment step is
        // fully valid, but submission must still refuse.
        let mut wizard = at_payment_step();
        wizard.business.lat = String::new();

        assert_eq!(
            wizard.submit().unwrap_err(),
            WizardError::Validation(MSG_SET_COORDINATES.to_owned())
        );
        assert_eq!(wizard.stage(), WizardStage::PaymentDetails);
    }

    #[test]
    fn test_restaurant_submit_requires_menu_items() {
        let mut wizard = WizardState::new(BusinessType::Restaurant);
        filled_account(&mut wizard);
        wizard.next().unwrap();
        filled_business(&mut wizard);
        wizard.next().unwrap();
        wizard.payment.upi_id = "dosa@upi".to_owned();

        assert_eq!(
            wizard.submit().unwrap_err(),
            WizardError::Validation(MSG_MENU_EMPTY.to_owned())
        );
    }

    #[test]
    fn test_restaurant_submit_rejects_incomplete_menu_item() {
        let mut wizard = WizardState::new(BusinessType::Restaurant);
        filled_account(&mut wizard);
        wizard.next().unwrap();
        filled_business(&mut wizard);
        wizard.next().unwrap();
        wizard.payment.upi_id = "dosa@upi".to_owned();
        wizard.add_menu_item(MenuItemDraft {
            name: "Masala Dosa".to_owned(),
            price: String::new(),
            description: String::new(),
        });

        assert_eq!(
            wizard.submit().unwrap_err(),
            WizardError::Validation(MSG_MENU_INCOMPLETE.to_owned())
        );
    }

    #[test]
    fn test_restaurant_submit_rejects_unparseable_price() {
        let mut wizard = WizardState::new(BusinessType::Restaurant);
        filled_account(&mut wizard);
        wizard.next().unwrap();
        filled_business(&mut wizard);
        wizard.next().unwrap();
        wizard.payment.upi_id = "dosa@upi".to_owned();
        wizard.add_menu_item(MenuItemDraft {
            name: "Masala Dosa".to_owned(),
            price: "one twenty".to_owned(),
            description: String::new(),
        });

        assert_eq!(
            wizard.submit().unwrap_err(),
            WizardError::Validation(MSG_MENU_PRICE_INVALID.to_owned())
        );
    }

    #[test]
    fn test_successful_submit_builds_request_and_locks() {
        let mut wizard = at_payment_step();
        let request = wizard.submit().unwrap();

        assert_eq!(wizard.stage(), WizardStage::Submitting);
        assert!(wizard.is_submitting());
        assert_eq!(request.credentials.email().as_str(), "a@b.com");
        assert_eq!(request.profile.name(), "NH-48 Plaza");
        assert_eq!(request.profile.business_type(), BusinessType::Toll);

        // The lock holds until the commit resolves
        assert_eq!(
            wizard.submit().unwrap_err(),
            WizardError::SubmissionInProgress
        );
    }

    #[test]
    fn test_failed_submission_returns_to_payment_step_verbatim() {
        let mut wizard = at_payment_step();
        wizard.submit().unwrap();

        wizard.fail_submission("User already registered");
        assert_eq!(wizard.stage(), WizardStage::PaymentDetails);
        assert_eq!(wizard.error(), Some("User already registered"));

        // Still editable: a retry validates again and re-locks
        assert!(wizard.submit().is_ok());
    }

    #[test]
    fn test_complete_is_terminal() {
        let mut wizard = at_payment_step();
        wizard.submit().unwrap();
        wizard.complete();

        assert_eq!(wizard.stage(), WizardStage::VerificationPending);
        assert_eq!(wizard.submit().unwrap_err(), WizardError::AlreadyCompleted);
        assert_eq!(wizard.next().unwrap_err(), WizardError::AlreadyCompleted);
    }

    #[test]
    fn test_menu_item_editing() {
        let mut wizard = WizardState::new(BusinessType::Restaurant);
        wizard.add_menu_item(MenuItemDraft {
            name: "Masala Dosa".to_owned(),
            price: "120".to_owned(),
            description: String::new(),
        });
        wizard.add_menu_item(MenuItemDraft {
            name: "Filter Coffee".to_owned(),
            price: "40".to_owned(),
            description: String::new(),
        });

        wizard.remove_menu_item(0);
        assert_eq!(wizard.payment.menu_items.len(), 1);
        assert_eq!(wizard.payment.menu_items[0].name, "Filter Coffee");

        // Out-of-range removal is a no-op
        wizard.remove_menu_item(5);
        assert_eq!(wizard.payment.menu_items.len(), 1);
    }

    #[test]
    fn test_menu_description_normalized_to_none() {
        let mut wizard = WizardState::new(BusinessType::Restaurant);
        filled_account(&mut wizard);
        wizard.next().unwrap();
        filled_business(&mut wizard);
        wizard.next().unwrap();
        wizard.payment.upi_id = "dosa@upi".to_owned();
        wizard.add_menu_item(MenuItemDraft {
            name: "Masala Dosa".to_owned(),
            price: "120".to_owned(),
            description: "   ".to_owned(),
        });

        let request = wizard.submit().unwrap();
        let items = request.profile.menu_items().unwrap();
        assert_eq!(items[0].description, None);
    }

    #[test]
    fn test_state_roundtrips_through_session_json() {
        let wizard = at_payment_step();
        let json = serde_json::to_string(&wizard).unwrap();
        let restored: WizardState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.stage(), wizard.stage());
        assert_eq!(restored.account, wizard.account);
        assert_eq!(restored.payment, wizard.payment);
    }
}
