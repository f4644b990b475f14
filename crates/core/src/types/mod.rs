//! Core types for GPS Pay.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod business;
pub mod coordinates;
pub mod credentials;
pub mod email;
pub mod id;
pub mod upi;

pub use business::{BusinessProfile, BusinessType, MenuItem, ServiceCategory};
pub use coordinates::{Coordinates, CoordinatesError};
pub use credentials::{CredentialsError, SignupCredentials};
pub use email::{Email, EmailError};
pub use id::*;
pub use upi::{UpiId, UpiIdError};
