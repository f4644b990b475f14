//! Domain models for the portal.
//!
//! - [`session`] - types and keys stored in the browser session
//! - [`records`] - row shapes exchanged with the hosted record store

pub mod records;
pub mod session;

pub use records::{
    ProfileRecord, RestaurantRecord, ServiceRecord, TollBoothRecord, TransactionRecord,
    VehicleType,
};
pub use session::{CurrentMerchant, keys};
