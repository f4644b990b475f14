//! Integration-test support for GPS Pay.
//!
//! In-memory fakes for the hosted backend so the registration commit and the
//! toll data layer can be exercised without a network. Both fakes write into
//! a shared call journal, letting tests assert cross-client properties
//! (exactly one sign-up, record write only after sign-up, and so on).

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use gps_pay_core::AccountId;
use gps_pay_portal::supabase::{
    AccountApi, AuthSession, AuthUser, RecordsApi, SelectFilter, SupabaseError,
};

/// Ordered log of backend calls, shared by both fakes.
pub type CallJournal = Arc<Mutex<Vec<String>>>;

/// Create a fresh journal.
#[must_use]
pub fn journal() -> CallJournal {
    Arc::new(Mutex::new(Vec::new()))
}

/// Snapshot a journal's entries.
#[must_use]
pub fn journal_entries(journal: &CallJournal) -> Vec<String> {
    journal.lock().expect("journal mutex poisoned").clone()
}

fn log(journal: &CallJournal, entry: String) {
    journal.lock().expect("journal mutex poisoned").push(entry);
}

// =============================================================================
// MockAccounts
// =============================================================================

/// In-memory stand-in for the hosted identity provider.
pub struct MockAccounts {
    journal: CallJournal,
    account_id: AccountId,
    fail_sign_up: Option<String>,
}

impl MockAccounts {
    /// A provider that accepts every request.
    #[must_use]
    pub fn new(journal: CallJournal) -> Self {
        Self {
            journal,
            account_id: AccountId::new(uuid::Uuid::new_v4()),
            fail_sign_up: None,
        }
    }

    /// A provider whose sign-up fails with `message` (surfaced verbatim).
    #[must_use]
    pub fn failing_sign_up(journal: CallJournal, message: &str) -> Self {
        Self {
            fail_sign_up: Some(message.to_owned()),
            ..Self::new(journal)
        }
    }

    /// The account id minted for successful sign-ups.
    #[must_use]
    pub const fn account_id(&self) -> AccountId {
        self.account_id
    }

    fn session_for(&self, email: &str) -> AuthSession {
        let user = AuthUser {
            id: self.account_id,
            email: Some(email.to_owned()),
            user_metadata: Value::Null,
            email_confirmed_at: None,
        };
        // AuthSession has no constructor on purpose; build it from the wire shape
        serde_json::from_value(serde_json::json!({
            "access_token": "test-access-token",
            "refresh_token": "test-refresh-token",
            "expires_in": 3600,
            "user": user,
        }))
        .expect("mock session shape is valid")
    }
}

#[async_trait]
impl AccountApi for MockAccounts {
    async fn sign_up(
        &self,
        email: &str,
        _password: &str,
        metadata: Value,
    ) -> Result<AuthUser, SupabaseError> {
        log(&self.journal, format!("sign_up:{email}"));

        if let Some(message) = &self.fail_sign_up {
            return Err(SupabaseError::Api {
                status: 422,
                message: message.clone(),
            });
        }

        Ok(AuthUser {
            id: self.account_id,
            email: Some(email.to_owned()),
            user_metadata: metadata,
            email_confirmed_at: None,
        })
    }

    async fn sign_in(&self, email: &str, _password: &str) -> Result<AuthSession, SupabaseError> {
        log(&self.journal, format!("sign_in:{email}"));
        Ok(self.session_for(email))
    }

    async fn get_user(&self, _access_token: &str) -> Result<AuthUser, SupabaseError> {
        log(&self.journal, "get_user".to_owned());
        Ok(AuthUser {
            id: self.account_id,
            email: None,
            user_metadata: Value::Null,
            email_confirmed_at: None,
        })
    }

    async fn exchange_code(&self, code: &str) -> Result<AuthSession, SupabaseError> {
        log(&self.journal, format!("exchange_code:{code}"));
        Ok(self.session_for("verified@example.com"))
    }

    async fn sign_out(&self, _access_token: &str) -> Result<(), SupabaseError> {
        log(&self.journal, "sign_out".to_owned());
        Ok(())
    }
}

// =============================================================================
// MockRecords
// =============================================================================

/// In-memory stand-in for the hosted record store.
///
/// Rows live in a per-table vector; equality filters and descending order
/// are honored the way the tests use them.
pub struct MockRecords {
    journal: CallJournal,
    tables: Mutex<HashMap<String, Vec<Value>>>,
    fail_insert: Option<String>,
    fail_upsert: Option<String>,
}

impl MockRecords {
    /// A record store that accepts every request.
    #[must_use]
    pub fn new(journal: CallJournal) -> Self {
        Self {
            journal,
            tables: Mutex::new(HashMap::new()),
            fail_insert: None,
            fail_upsert: None,
        }
    }

    /// A record store whose inserts fail with `message`.
    #[must_use]
    pub fn failing_inserts(journal: CallJournal, message: &str) -> Self {
        Self {
            fail_insert: Some(message.to_owned()),
            ..Self::new(journal)
        }
    }

    /// A record store whose upserts fail with `message`.
    #[must_use]
    pub fn failing_upserts(journal: CallJournal, message: &str) -> Self {
        Self {
            fail_upsert: Some(message.to_owned()),
            ..Self::new(journal)
        }
    }

    /// Place a row in a table directly, bypassing the journal.
    pub fn seed(&self, table: &str, row: Value) {
        self.lock_tables()
            .entry(table.to_owned())
            .or_default()
            .push(row);
    }

    /// All rows currently in a table.
    #[must_use]
    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.lock_tables().get(table).cloned().unwrap_or_default()
    }

    fn lock_tables(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<Value>>> {
        self.tables.lock().expect("tables mutex poisoned")
    }

    fn store(&self, table: &str, mut row: Value) -> Value {
        // The backend mints an id when the row does not carry one
        if row.get("id").is_none() {
            if let Value::Object(object) = &mut row {
                object.insert(
                    "id".to_owned(),
                    Value::String(uuid::Uuid::new_v4().to_string()),
                );
            }
        }
        self.lock_tables()
            .entry(table.to_owned())
            .or_default()
            .push(row.clone());
        row
    }
}

fn field_matches(row: &Value, column: &str, expected: &str) -> bool {
    match row.get(column) {
        Some(Value::String(s)) => s == expected,
        Some(other) => other.to_string() == expected,
        None => false,
    }
}

#[async_trait]
impl RecordsApi for MockRecords {
    async fn insert(&self, table: &str, record: Value) -> Result<Vec<Value>, SupabaseError> {
        log(&self.journal, format!("insert:{table}"));

        if let Some(message) = &self.fail_insert {
            return Err(SupabaseError::Api {
                status: 403,
                message: message.clone(),
            });
        }

        Ok(vec![self.store(table, record)])
    }

    async fn upsert(&self, table: &str, record: Value) -> Result<Vec<Value>, SupabaseError> {
        log(&self.journal, format!("upsert:{table}"));

        if let Some(message) = &self.fail_upsert {
            return Err(SupabaseError::Api {
                status: 403,
                message: message.clone(),
            });
        }

        Ok(vec![self.store(table, record)])
    }

    async fn select(
        &self,
        table: &str,
        filter: &SelectFilter,
    ) -> Result<Vec<Value>, SupabaseError> {
        log(&self.journal, format!("select:{table}"));

        let mut rows = self.rows(table);

        let mut order: Option<(String, bool)> = None;
        for (key, value) in filter.to_query() {
            if key == "select" {
                continue;
            }
            if key == "order" {
                let descending = value.ends_with(".desc");
                let column = value
                    .trim_end_matches(".desc")
                    .trim_end_matches(".asc")
                    .to_owned();
                order = Some((column, descending));
                continue;
            }
            if let Some(expected) = value.strip_prefix("eq.") {
                let expected = expected.to_owned();
                rows.retain(|row| field_matches(row, &key, &expected));
            }
        }

        if let Some((column, descending)) = order {
            rows.sort_by_key(|row| row.get(&column).map(ToString::to_string));
            if descending {
                rows.reverse();
            }
        }

        Ok(rows)
    }

    async fn update(
        &self,
        table: &str,
        id: uuid::Uuid,
        patch: Value,
    ) -> Result<Vec<Value>, SupabaseError> {
        log(&self.journal, format!("update:{table}"));

        let id = id.to_string();
        let mut tables = self.lock_tables();
        let rows = tables.entry(table.to_owned()).or_default();

        let mut updated = Vec::new();
        for row in rows.iter_mut() {
            if field_matches(row, "id", &id) {
                if let (Value::Object(target), Value::Object(source)) = (&mut *row, &patch) {
                    for (key, value) in source {
                        target.insert(key.clone(), value.clone());
                    }
                }
                updated.push(row.clone());
            }
        }

        Ok(updated)
    }
}
