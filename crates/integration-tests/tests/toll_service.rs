//! Toll-vertical data access against the in-memory record store.

use rust_decimal::Decimal;
use serde_json::json;

use gps_pay_core::{AccountId, ProfileId};
use gps_pay_integration_tests::{MockRecords, journal};
use gps_pay_portal::models::records::VehicleType;
use gps_pay_portal::services::toll::{NewTransaction, TollService, TollServiceError};

fn seeded_profile(records: &MockRecords) -> (AccountId, ProfileId) {
    let account = AccountId::new(uuid::Uuid::new_v4());
    let profile = ProfileId::new(uuid::Uuid::new_v4());
    records.seed(
        "toll_booths",
        json!({
            "id": profile.to_string(),
            "user_id": account.to_string(),
            "name": "NH-48 Plaza",
            "address": "NH-48, Gurugram",
            "latitude": 28.4595,
            "longitude": 77.0266,
            "upi_id": "nh48@upi",
            "vehicle_types": [],
            "settings": {},
        }),
    );
    (account, profile)
}

#[tokio::test]
async fn get_profile_finds_the_account_row() {
    let records = MockRecords::new(journal());
    let (account, profile_id) = seeded_profile(&records);
    let service = TollService::new(&records);

    let profile = service.get_profile(account).await.expect("profile exists");
    assert_eq!(profile.id, Some(profile_id));
    assert_eq!(profile.name, "NH-48 Plaza");
    assert!(profile.vehicle_types.is_empty());
}

#[tokio::test]
async fn get_profile_for_unknown_account_is_not_found() {
    let records = MockRecords::new(journal());
    let service = TollService::new(&records);

    let err = service
        .get_profile(AccountId::new(uuid::Uuid::new_v4()))
        .await
        .expect_err("no profile seeded");
    assert!(matches!(err, TollServiceError::ProfileNotFound));
}

#[tokio::test]
async fn update_profile_patches_only_the_given_fields() {
    let records = MockRecords::new(journal());
    let (account, profile_id) = seeded_profile(&records);
    let service = TollService::new(&records);

    let updated = service
        .update_profile(
            profile_id,
            gps_pay_portal::services::toll::TollProfileUpdate {
                upi_id: Some("plaza@newbank".to_owned()),
                ..Default::default()
            },
        )
        .await
        .expect("update succeeds");

    assert_eq!(updated.upi_id, "plaza@newbank");
    // Untouched fields survive the patch
    assert_eq!(updated.name, "NH-48 Plaza");

    let reread = service.get_profile(account).await.expect("profile exists");
    assert_eq!(reread.upi_id, "plaza@newbank");
}

#[tokio::test]
async fn add_vehicle_type_appends_to_the_fee_table() {
    let records = MockRecords::new(journal());
    let (_, profile_id) = seeded_profile(&records);
    let service = TollService::new(&records);

    service
        .add_vehicle_type(
            profile_id,
            VehicleType {
                name: "Car".to_owned(),
                fee: Decimal::from(65),
            },
        )
        .await
        .expect("append succeeds");

    let profile = service
        .add_vehicle_type(
            profile_id,
            VehicleType {
                name: "Truck".to_owned(),
                fee: Decimal::from(190),
            },
        )
        .await
        .expect("second append succeeds");

    let names: Vec<&str> = profile
        .vehicle_types
        .iter()
        .map(|v| v.name.as_str())
        .collect();
    assert_eq!(names, vec!["Car", "Truck"]);
}

#[tokio::test]
async fn record_transaction_applies_the_defaults() {
    let records = MockRecords::new(journal());
    let (_, profile_id) = seeded_profile(&records);
    let service = TollService::new(&records);

    let transaction = service
        .record_transaction(
            profile_id,
            NewTransaction {
                vehicle_number: "HR 26 AB 1234".to_owned(),
                vehicle_type: "Car".to_owned(),
                amount: Decimal::from(65),
                payment_status: None,
                payment_method: None,
            },
        )
        .await
        .expect("insert succeeds");

    assert_eq!(transaction.payment_status, "completed");
    assert_eq!(transaction.payment_method, "cash");
    assert_eq!(transaction.profile_id, profile_id);
}

#[tokio::test]
async fn transactions_come_back_newest_first() {
    let records = MockRecords::new(journal());
    let (_, profile_id) = seeded_profile(&records);
    let service = TollService::new(&records);

    for (number, date) in [
        ("HR 26 AB 1111", "2026-08-01T08:00:00Z"),
        ("HR 26 AB 3333", "2026-08-03T08:00:00Z"),
        ("HR 26 AB 2222", "2026-08-02T08:00:00Z"),
    ] {
        records.seed(
            "transactions",
            json!({
                "id": uuid::Uuid::new_v4().to_string(),
                "profile_id": profile_id.to_string(),
                "vehicle_number": number,
                "vehicle_type": "Car",
                "amount": "65",
                "payment_status": "completed",
                "payment_method": "cash",
                "transaction_date": date,
            }),
        );
    }

    let transactions = service
        .transactions(profile_id)
        .await
        .expect("select succeeds");

    let numbers: Vec<&str> = transactions
        .iter()
        .map(|t| t.vehicle_number.as_str())
        .collect();
    assert_eq!(numbers, vec!["HR 26 AB 3333", "HR 26 AB 2222", "HR 26 AB 1111"]);
}

#[tokio::test]
async fn transactions_are_scoped_to_the_profile() {
    let records = MockRecords::new(journal());
    let (_, profile_id) = seeded_profile(&records);
    let service = TollService::new(&records);

    records.seed(
        "transactions",
        json!({
            "id": uuid::Uuid::new_v4().to_string(),
            "profile_id": uuid::Uuid::new_v4().to_string(),
            "vehicle_number": "KA 01 ZZ 9999",
            "vehicle_type": "Car",
            "amount": "65",
            "payment_status": "completed",
            "payment_method": "cash",
        }),
    );

    let transactions = service
        .transactions(profile_id)
        .await
        .expect("select succeeds");
    assert!(transactions.is_empty());
}
