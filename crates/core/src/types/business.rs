//! Business verticals and the registration profile union.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::coordinates::Coordinates;
use crate::types::upi::UpiId;

/// The three merchant categories GPS Pay onboards.
///
/// The string form is carried to the hosted backend as the `user_type`
/// entry in the account's signup metadata, so the dashboard can recover the
/// vertical from the session alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessType {
    Restaurant,
    Toll,
    Service,
}

impl BusinessType {
    /// Metadata tag sent to the backend (`user_type`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Restaurant => "restaurant",
            Self::Toll => "toll",
            Self::Service => "service",
        }
    }

    /// URL path segment for the vertical's registration flow.
    ///
    /// The service vertical registers under `/register/other`.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Restaurant => "restaurant",
            Self::Toll => "toll",
            Self::Service => "other",
        }
    }

    /// Parse a registration URL segment.
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "restaurant" => Some(Self::Restaurant),
            "toll" => Some(Self::Toll),
            "other" => Some(Self::Service),
            _ => None,
        }
    }

    /// The record-store table the vertical's profile is written to.
    #[must_use]
    pub const fn table(self) -> &'static str {
        match self {
            Self::Restaurant => "restaurants",
            Self::Toll => "toll_booths",
            Self::Service => "other_services",
        }
    }

    /// Human-readable label for page headings.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Restaurant => "Restaurant",
            Self::Toll => "Toll Booth",
            Self::Service => "Other Services",
        }
    }
}

impl fmt::Display for BusinessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Categories for the "other services" vertical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceCategory {
    Utility,
    Maintenance,
    Subscription,
    Educational,
    Entertainment,
    Other,
}

impl ServiceCategory {
    /// All categories, in the order the form presents them.
    pub const ALL: [Self; 6] = [
        Self::Utility,
        Self::Maintenance,
        Self::Subscription,
        Self::Educational,
        Self::Entertainment,
        Self::Other,
    ];

    /// Form value / record-store representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Utility => "utility",
            Self::Maintenance => "maintenance",
            Self::Subscription => "subscription",
            Self::Educational => "educational",
            Self::Entertainment => "entertainment",
            Self::Other => "other",
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Utility => "Utility",
            Self::Maintenance => "Maintenance",
            Self::Subscription => "Subscription",
            Self::Educational => "Educational",
            Self::Entertainment => "Entertainment",
            Self::Other => "Other",
        }
    }

    /// Parse a form value.
    #[must_use]
    pub fn from_str_opt(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One item on a restaurant's menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Item name.
    pub name: String,
    /// Price in rupees.
    pub price: Decimal,
    /// Optional free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A completed registration profile, discriminated by vertical.
///
/// This is the tagged union that replaces the original application's
/// untyped draft payloads: a value of this type has already passed the
/// wizard's field validation, so consumers never re-check shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "business_type", rename_all = "snake_case")]
pub enum BusinessProfile {
    Restaurant {
        name: String,
        address: String,
        coordinates: Coordinates,
        upi_id: UpiId,
        menu_items: Vec<MenuItem>,
    },
    Toll {
        name: String,
        address: String,
        coordinates: Coordinates,
        upi_id: UpiId,
    },
    Service {
        service_name: String,
        category: ServiceCategory,
        address: String,
        coordinates: Coordinates,
        upi_id: UpiId,
    },
}

impl BusinessProfile {
    /// The vertical this profile belongs to.
    #[must_use]
    pub const fn business_type(&self) -> BusinessType {
        match self {
            Self::Restaurant { .. } => BusinessType::Restaurant,
            Self::Toll { .. } => BusinessType::Toll,
            Self::Service { .. } => BusinessType::Service,
        }
    }

    /// The display name of the business.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Restaurant { name, .. } | Self::Toll { name, .. } => name,
            Self::Service { service_name, .. } => service_name,
        }
    }

    /// The business address.
    #[must_use]
    pub fn address(&self) -> &str {
        match self {
            Self::Restaurant { address, .. }
            | Self::Toll { address, .. }
            | Self::Service { address, .. } => address,
        }
    }

    /// The business location.
    #[must_use]
    pub const fn coordinates(&self) -> Coordinates {
        match self {
            Self::Restaurant { coordinates, .. }
            | Self::Toll { coordinates, .. }
            | Self::Service { coordinates, .. } => *coordinates,
        }
    }

    /// The payment address.
    #[must_use]
    pub const fn upi_id(&self) -> &UpiId {
        match self {
            Self::Restaurant { upi_id, .. }
            | Self::Toll { upi_id, .. }
            | Self::Service { upi_id, .. } => upi_id,
        }
    }

    /// Menu items, for the restaurant vertical.
    #[must_use]
    pub fn menu_items(&self) -> Option<&[MenuItem]> {
        match self {
            Self::Restaurant { menu_items, .. } => Some(menu_items),
            _ => None,
        }
    }
}
