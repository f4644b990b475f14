//! Toll-vertical data access.
//!
//! Thin service over the record store for everything a toll booth does after
//! registration: reading and updating its profile, growing its vehicle-type
//! fee table, and recording/listing toll transactions.

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use gps_pay_core::{AccountId, ProfileId};

use crate::models::records::{TollBoothRecord, TransactionRecord, VehicleType};
use crate::supabase::{RecordsApi, SelectFilter, SupabaseError};

/// Errors raised by toll-vertical operations.
#[derive(Debug, Error)]
pub enum TollServiceError {
    /// The record store call failed.
    #[error(transparent)]
    Backend(#[from] SupabaseError),

    /// No toll profile exists for the account.
    #[error("no toll profile found for this account")]
    ProfileNotFound,

    /// The backend returned a profile row without an id.
    #[error("toll profile record has no id")]
    MissingProfileId,
}

/// Fields a toll booth may change on its profile.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TollProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upi_id: Option<String>,
}

/// A toll transaction as entered at the booth.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub vehicle_number: String,
    pub vehicle_type: String,
    pub amount: Decimal,
    /// Defaults to `"completed"`.
    pub payment_status: Option<String>,
    /// Defaults to `"cash"`.
    pub payment_method: Option<String>,
}

/// Toll-vertical operations over the record store.
pub struct TollService<'a> {
    records: &'a dyn RecordsApi,
}

impl<'a> TollService<'a> {
    /// Create a new toll service.
    #[must_use]
    pub const fn new(records: &'a dyn RecordsApi) -> Self {
        Self { records }
    }

    /// Fetch the toll profile owned by `account`.
    ///
    /// # Errors
    ///
    /// Returns [`TollServiceError::ProfileNotFound`] when the account has no
    /// toll profile, or a backend/parse error otherwise.
    pub async fn get_profile(&self, account: AccountId) -> Result<TollBoothRecord, TollServiceError> {
        let filter = SelectFilter::new().eq("user_id", account);
        let rows = self.records.select("toll_booths", &filter).await?;

        let row = rows
            .into_iter()
            .next()
            .ok_or(TollServiceError::ProfileNotFound)?;

        Ok(parse_row(row)?)
    }

    /// Update profile fields.
    ///
    /// # Errors
    ///
    /// Returns [`TollServiceError::ProfileNotFound`] when no row matched, or
    /// a backend/parse error otherwise.
    pub async fn update_profile(
        &self,
        profile_id: ProfileId,
        update: TollProfileUpdate,
    ) -> Result<TollBoothRecord, TollServiceError> {
        let rows = self
            .records
            .update("toll_booths", profile_id.as_uuid(), to_value(&update)?)
            .await?;

        let row = rows
            .into_iter()
            .next()
            .ok_or(TollServiceError::ProfileNotFound)?;

        Ok(parse_row(row)?)
    }

    /// Append a vehicle type to the profile's fee table.
    ///
    /// Read-modify-write on the `vehicle_types` column, mirroring how the
    /// record store models the list (a JSON array, not a child table).
    ///
    /// # Errors
    ///
    /// Returns [`TollServiceError::ProfileNotFound`] when the profile is
    /// gone, or a backend/parse error otherwise.
    pub async fn add_vehicle_type(
        &self,
        profile_id: ProfileId,
        vehicle_type: VehicleType,
    ) -> Result<TollBoothRecord, TollServiceError> {
        let filter = SelectFilter::new().eq("id", profile_id);
        let rows = self.records.select("toll_booths", &filter).await?;
        let profile: TollBoothRecord = parse_row(
            rows.into_iter()
                .next()
                .ok_or(TollServiceError::ProfileNotFound)?,
        )?;

        let mut vehicle_types = profile.vehicle_types;
        vehicle_types.push(vehicle_type);

        let patch = serde_json::json!({ "vehicle_types": vehicle_types });
        let rows = self
            .records
            .update("toll_booths", profile_id.as_uuid(), patch)
            .await?;

        let row = rows
            .into_iter()
            .next()
            .ok_or(TollServiceError::ProfileNotFound)?;

        Ok(parse_row(row)?)
    }

    /// Record a toll transaction against the profile.
    ///
    /// # Errors
    ///
    /// Returns a backend/parse error if the insert fails.
    pub async fn record_transaction(
        &self,
        profile_id: ProfileId,
        transaction: NewTransaction,
    ) -> Result<TransactionRecord, TollServiceError> {
        let record = TransactionRecord {
            id: None,
            profile_id,
            vehicle_number: transaction.vehicle_number,
            vehicle_type: transaction.vehicle_type,
            amount: transaction.amount,
            payment_status: transaction
                .payment_status
                .unwrap_or_else(|| "completed".to_owned()),
            payment_method: transaction
                .payment_method
                .unwrap_or_else(|| "cash".to_owned()),
            transaction_date: None,
        };

        let rows = self
            .records
            .insert("transactions", to_value(&record)?)
            .await?;

        let row = rows
            .into_iter()
            .next()
            .ok_or(TollServiceError::ProfileNotFound)?;

        Ok(parse_row(row)?)
    }

    /// List the profile's transactions, newest first.
    ///
    /// # Errors
    ///
    /// Returns a backend/parse error if the select fails.
    pub async fn transactions(
        &self,
        profile_id: ProfileId,
    ) -> Result<Vec<TransactionRecord>, TollServiceError> {
        let filter = SelectFilter::new()
            .eq("profile_id", profile_id)
            .order_desc("transaction_date");
        let rows = self.records.select("transactions", &filter).await?;

        rows.into_iter()
            .map(|row| parse_row(row).map_err(TollServiceError::from))
            .collect()
    }
}

fn parse_row<T: serde::de::DeserializeOwned>(row: Value) -> Result<T, SupabaseError> {
    Ok(serde_json::from_value(row)?)
}

fn to_value<T: Serialize>(value: &T) -> Result<Value, SupabaseError> {
    Ok(serde_json::to_value(value)?)
}
