//! Draft-store behavior over a real (in-memory) session.

use std::sync::Arc;

use tower_sessions::{MemoryStore, Session};

use gps_pay_core::{AccountId, BusinessProfile, BusinessType, Coordinates, UpiId};
use gps_pay_portal::drafts::{DraftStore, RegistrationDraft, draft_key};
use gps_pay_portal::models::keys;

fn session() -> Session {
    Session::new(None, Arc::new(MemoryStore::default()), None)
}

fn toll_draft(name: &str) -> RegistrationDraft {
    RegistrationDraft {
        id: AccountId::new(uuid::Uuid::new_v4()),
        created_at: chrono::Utc::now(),
        profile: BusinessProfile::Toll {
            name: name.to_owned(),
            address: "NH-48, Gurugram".to_owned(),
            coordinates: Coordinates::new(28.4595, 77.0266).expect("valid coordinates"),
            upi_id: UpiId::parse("nh48@upi").expect("valid UPI id"),
        },
    }
}

#[tokio::test]
async fn saved_drafts_read_back() {
    let session = session();
    let drafts = DraftStore::new(&session);

    let draft = toll_draft("NH-48 Plaza");
    drafts
        .save_registration(&draft)
        .await
        .expect("draft saves");

    let loaded = drafts
        .load_registration(BusinessType::Toll)
        .await
        .expect("draft is present");
    assert_eq!(loaded.id, draft.id);
    assert_eq!(loaded.profile.name(), "NH-48 Plaza");

    // Other verticals' slots stay empty
    assert!(drafts.load_registration(BusinessType::Restaurant).await.is_none());
}

#[tokio::test]
async fn save_overwrites_the_previous_draft() {
    let session = session();
    let drafts = DraftStore::new(&session);

    drafts
        .save_registration(&toll_draft("First Plaza"))
        .await
        .expect("first save");
    drafts
        .save_registration(&toll_draft("Second Plaza"))
        .await
        .expect("second save");

    let loaded = drafts
        .load_registration(BusinessType::Toll)
        .await
        .expect("draft is present");
    assert_eq!(loaded.profile.name(), "Second Plaza");
}

#[tokio::test]
async fn scenario_d_malformed_draft_reads_as_absent() {
    let session = session();

    // Something that is not a registration draft lands under the known key
    session
        .insert(keys::DRAFT_RESTAURANT, "{not json at all")
        .await
        .expect("raw insert");

    let drafts = DraftStore::new(&session);
    let loaded = drafts.load_registration(BusinessType::Restaurant).await;
    assert!(loaded.is_none(), "malformed data must read as no draft");
}

#[tokio::test]
async fn wrong_shape_draft_reads_as_absent() {
    let session = session();

    // Valid JSON, wrong shape (missing the discriminant and every field)
    session
        .insert(keys::DRAFT_TOLL, serde_json::json!({ "surprise": 42 }))
        .await
        .expect("raw insert");

    let drafts = DraftStore::new(&session);
    assert!(drafts.load_registration(BusinessType::Toll).await.is_none());
}

#[test]
fn draft_keys_are_the_fixed_per_vertical_names() {
    assert_eq!(draft_key(BusinessType::Restaurant), "restaurant_data");
    assert_eq!(draft_key(BusinessType::Toll), "toll_data");
    assert_eq!(draft_key(BusinessType::Service), "service_data");
}
