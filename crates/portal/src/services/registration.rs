//! The registration commit: account creation plus best-effort profile write.
//!
//! Identity creation is authoritative; profile materialization is advisory.
//! Once the identity provider has accepted the sign-up, nothing that happens
//! to the record store may fail the registration - the account exists, the
//! verification email is on its way, and a lost profile row can be
//! reconstructed later. A failed phase two is therefore reported as
//! [`ProfileWrite::PendingReconciliation`] rather than an error.

use serde_json::json;

use gps_pay_core::BusinessType;

use crate::models::records::{ProfileRecord, profile_record};
use crate::registration::RegistrationRequest;
use crate::supabase::{AccountApi, AuthUser, RecordsApi, SupabaseError};

/// What happened to the phase-two profile write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileWrite {
    /// The vertical's record was created.
    Created,
    /// The record write failed after the account was created; the profile
    /// must be materialized out of band.
    PendingReconciliation {
        /// The record store's error, for the logs.
        reason: String,
    },
}

/// Result of a successful registration commit.
#[derive(Debug, Clone)]
pub struct RegistrationOutcome {
    /// The freshly created (unverified) account.
    pub account: AuthUser,
    /// Outcome of the profile write.
    pub profile_write: ProfileWrite,
}

impl RegistrationOutcome {
    /// Whether business setup still needs out-of-band completion.
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        matches!(self.profile_write, ProfileWrite::PendingReconciliation { .. })
    }
}

/// Drives the two-phase registration commit.
pub struct RegistrationService<'a> {
    accounts: &'a dyn AccountApi,
    records: &'a dyn RecordsApi,
}

impl<'a> RegistrationService<'a> {
    /// Create a new registration service.
    #[must_use]
    pub const fn new(accounts: &'a dyn AccountApi, records: &'a dyn RecordsApi) -> Self {
        Self { accounts, records }
    }

    /// Commit a validated registration.
    ///
    /// Issues exactly one sign-up call. On sign-up failure the error is
    /// returned unchanged - the caller surfaces the provider's message
    /// verbatim and the wizard stays editable. On sign-up success the
    /// vertical's record is inserted (and, for restaurants, the minimal
    /// `profile` row upserted) with the new account id as foreign key; both
    /// writes are best-effort.
    ///
    /// # Errors
    ///
    /// Returns [`SupabaseError`] only for the sign-up call. Record-store
    /// failures never surface as errors here.
    pub async fn register(
        &self,
        request: RegistrationRequest,
    ) -> Result<RegistrationOutcome, SupabaseError> {
        let business_type = request.profile.business_type();
        let metadata = json!({ "user_type": business_type.as_str() });

        let account = self
            .accounts
            .sign_up(
                request.credentials.email().as_str(),
                request.credentials.password(),
                metadata,
            )
            .await?;

        tracing::info!(account = %account.id, %business_type, "account created, verification pending");

        let record = profile_record(&request.profile, account.id);
        let profile_write = match self.records.insert(business_type.table(), record).await {
            Ok(_) => ProfileWrite::Created,
            Err(e) => {
                tracing::warn!(
                    account = %account.id,
                    table = business_type.table(),
                    error = %e,
                    "profile write failed after account creation; pending reconciliation"
                );
                ProfileWrite::PendingReconciliation {
                    reason: e.to_string(),
                }
            }
        };

        if business_type == BusinessType::Restaurant {
            // Minimal account-to-vertical mapping row; the backend trigger
            // normally creates it, so a conflict here must merge, not fail.
            let profile_row = json!(ProfileRecord {
                id: account.id,
                email: request.credentials.email().clone(),
                user_type: business_type,
            });
            if let Err(e) = self.records.upsert("profile", profile_row).await {
                tracing::warn!(account = %account.id, error = %e, "profile row upsert failed");
            }
        }

        Ok(RegistrationOutcome {
            account,
            profile_write,
        })
    }
}
