//! Row shapes exchanged with the hosted record store.
//!
//! One struct per table, matching the backend schema column-for-column.
//! Ids are optional on the way in (the backend mints them) and present on
//! the way out.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use gps_pay_core::{
    AccountId, BusinessProfile, BusinessType, Coordinates, Email, MenuItem, ProfileId,
    ServiceCategory, TransactionId,
};

/// Row in the `restaurants` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProfileId>,
    pub user_id: AccountId,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub upi_id: String,
    pub menu_items: Vec<MenuItem>,
}

/// Row in the `toll_booths` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TollBoothRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProfileId>,
    pub user_id: AccountId,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub upi_id: String,
    /// Vehicle classes and their fees; starts empty at registration.
    #[serde(default)]
    pub vehicle_types: Vec<VehicleType>,
    /// Free-form booth settings; starts empty at registration.
    #[serde(default)]
    pub settings: Value,
}

/// One vehicle class and its toll fee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleType {
    pub name: String,
    pub fee: Decimal,
}

/// Row in the `other_services` table.
///
/// Location is stored as a `POINT(lng lat)` text literal, matching the
/// backend's geography column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProfileId>,
    pub user_id: AccountId,
    pub name: String,
    pub service_type: ServiceCategory,
    pub address: String,
    pub location: String,
    pub upi_id: String,
}

/// Row in the `profile` table (minimal account-to-vertical mapping).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub id: AccountId,
    pub email: Email,
    pub user_type: BusinessType,
}

/// Row in the `transactions` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TransactionId>,
    pub profile_id: ProfileId,
    pub vehicle_number: String,
    pub vehicle_type: String,
    pub amount: Decimal,
    pub payment_status: String,
    pub payment_method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_date: Option<DateTime<Utc>>,
}

/// Build the vertical's record-store row from a completed profile.
///
/// This is the payload of the wizard's phase-two write, keyed by the
/// freshly minted account id.
#[must_use]
pub fn profile_record(profile: &BusinessProfile, account_id: AccountId) -> Value {
    let coordinates: Coordinates = profile.coordinates();

    match profile {
        BusinessProfile::Restaurant {
            name,
            address,
            upi_id,
            menu_items,
            ..
        } => serde_json::json!(RestaurantRecord {
            id: None,
            user_id: account_id,
            name: name.clone(),
            address: address.clone(),
            latitude: coordinates.lat,
            longitude: coordinates.lng,
            upi_id: upi_id.as_str().to_owned(),
            menu_items: menu_items.clone(),
        }),
        BusinessProfile::Toll {
            name,
            address,
            upi_id,
            ..
        } => serde_json::json!(TollBoothRecord {
            id: None,
            user_id: account_id,
            name: name.clone(),
            address: address.clone(),
            latitude: coordinates.lat,
            longitude: coordinates.lng,
            upi_id: upi_id.as_str().to_owned(),
            vehicle_types: Vec::new(),
            settings: Value::Object(serde_json::Map::new()),
        }),
        BusinessProfile::Service {
            service_name,
            category,
            address,
            upi_id,
            ..
        } => serde_json::json!(ServiceRecord {
            id: None,
            user_id: account_id,
            name: service_name.clone(),
            service_type: *category,
            address: address.clone(),
            location: format!("POINT({} {})", coordinates.lng, coordinates.lat),
            upi_id: upi_id.as_str().to_owned(),
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use gps_pay_core::UpiId;

    fn account() -> AccountId {
        AccountId::new(uuid::Uuid::nil())
    }

    #[test]
    fn test_toll_record_carries_account_as_foreign_key() {
        let profile = BusinessProfile::Toll {
            name: "NH-48 Plaza".to_owned(),
            address: "NH-48, Gurugram".to_owned(),
            coordinates: Coordinates::new(28.4595, 77.0266).unwrap(),
            upi_id: UpiId::parse("nh48@upi").unwrap(),
        };

        let record = profile_record(&profile, account());
        assert_eq!(record["user_id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(record["name"], "NH-48 Plaza");
        assert_eq!(record["vehicle_types"], serde_json::json!([]));
        assert!(record.get("id").is_none());
    }

    #[test]
    fn test_service_location_is_point_literal() {
        let profile = BusinessProfile::Service {
            service_name: "City Tuition".to_owned(),
            category: ServiceCategory::Educational,
            address: "Sector 14".to_owned(),
            coordinates: Coordinates::new(28.46, 77.03).unwrap(),
            upi_id: UpiId::parse("tuition@upi").unwrap(),
        };

        let record = profile_record(&profile, account());
        // Longitude first, as the geography column expects
        assert_eq!(record["location"], "POINT(77.03 28.46)");
        assert_eq!(record["service_type"], "educational");
    }

    #[test]
    fn test_restaurant_record_includes_menu() {
        let profile = BusinessProfile::Restaurant {
            name: "Dosa Corner".to_owned(),
            address: "MG Road".to_owned(),
            coordinates: Coordinates::new(12.97, 77.59).unwrap(),
            upi_id: UpiId::parse("dosa@upi").unwrap(),
            menu_items: vec![MenuItem {
                name: "Masala Dosa".to_owned(),
                price: Decimal::from(120),
                description: Some("Crisp, with chutney".to_owned()),
            }],
        };

        let record = profile_record(&profile, account());
        assert_eq!(record["menu_items"][0]["name"], "Masala Dosa");
    }
}
