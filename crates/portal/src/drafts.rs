//! Same-device registration drafts.
//!
//! A completed registration is written to the hosted record store, but that
//! write is best-effort - the dashboard still needs something to show on this
//! device before the backend copy is authoritative. Drafts fill that gap:
//! JSON snapshots saved into the browser session under one fixed key per
//! vertical and read back by the dashboard.
//!
//! A draft is a cache, never a source of truth: anything malformed reads as
//! absent (with a diagnostic), and saving over an existing draft replaces it
//! wholesale.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use gps_pay_core::{AccountId, BusinessProfile, BusinessType};

use crate::models::keys;

/// Snapshot of a completed registration, as the dashboard displays it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationDraft {
    /// Account the registration belongs to.
    pub id: AccountId,
    /// When the registration was submitted.
    pub created_at: DateTime<Utc>,
    /// The full collected profile.
    #[serde(flatten)]
    pub profile: BusinessProfile,
}

/// Session key for a vertical's draft.
#[must_use]
pub const fn draft_key(business_type: BusinessType) -> &'static str {
    match business_type {
        BusinessType::Restaurant => keys::DRAFT_RESTAURANT,
        BusinessType::Toll => keys::DRAFT_TOLL,
        BusinessType::Service => keys::DRAFT_SERVICE,
    }
}

/// Typed key-value facade over the session's draft slots.
pub struct DraftStore<'a> {
    session: &'a Session,
}

impl<'a> DraftStore<'a> {
    /// Wrap a request's session.
    #[must_use]
    pub const fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Save a value under `key`, replacing any prior value.
    ///
    /// # Errors
    ///
    /// Returns the session-store error if the write fails.
    pub async fn save<T: Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
    ) -> Result<(), tower_sessions::session::Error> {
        self.session.insert(key, value).await
    }

    /// Load the last value saved under `key`.
    ///
    /// Returns `None` when nothing was saved or when the stored data no
    /// longer deserializes (a diagnostic is logged; the reader must not
    /// crash on a corrupt draft).
    pub async fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.session.get::<T>(key).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "discarding malformed draft");
                None
            }
        }
    }

    /// Save a registration draft under its vertical's fixed key.
    ///
    /// # Errors
    ///
    /// Returns the session-store error if the write fails.
    pub async fn save_registration(
        &self,
        draft: &RegistrationDraft,
    ) -> Result<(), tower_sessions::session::Error> {
        self.save(draft_key(draft.profile.business_type()), draft)
            .await
    }

    /// Load the registration draft for a vertical, if one is present.
    pub async fn load_registration(
        &self,
        business_type: BusinessType,
    ) -> Option<RegistrationDraft> {
        self.load(draft_key(business_type)).await
    }
}
