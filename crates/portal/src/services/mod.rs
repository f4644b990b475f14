//! Application services.
//!
//! - [`events`] - auth-state-change broadcast bus
//! - [`registration`] - the two-phase registration commit
//! - [`toll`] - toll-vertical data access (profiles, vehicle types, transactions)

pub mod events;
pub mod registration;
pub mod toll;

pub use events::{AuthEvent, AuthEventBus};
pub use registration::{ProfileWrite, RegistrationOutcome, RegistrationService};
pub use toll::{NewTransaction, TollProfileUpdate, TollService, TollServiceError};
