//! Hosted record-store client.
//!
//! Wraps the backend's table REST surface: insert, upsert, filtered select,
//! and update-by-id, all scoped by table name. Row shapes live in
//! `crate::models::records`; this layer moves `serde_json::Value`s so one
//! client serves every vertical.
//!
//! Select results are cached briefly (the dashboard re-reads the same
//! profile on every load); any write through this client drops the cache.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use reqwest::Method;
use serde_json::Value;
use uuid::Uuid;

use crate::config::SupabaseConfig;
use crate::supabase::{REQUEST_TIMEOUT, SupabaseError, error_message};

/// How long a cached select result stays fresh.
const CACHE_TTL: Duration = Duration::from_secs(60);

/// Maximum cached select results.
const CACHE_CAPACITY: u64 = 500;

// =============================================================================
// SelectFilter
// =============================================================================

/// Filter predicate for [`RecordsApi::select`].
///
/// Builds the equality/ordering query-string pairs the record surface
/// understands.
#[derive(Debug, Clone, Default)]
pub struct SelectFilter {
    eq: Vec<(String, String)>,
    order: Option<(String, bool)>,
}

impl SelectFilter {
    /// Empty filter (selects the whole table).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `column` to equal `value`.
    #[must_use]
    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.eq.push((column.to_owned(), value.to_string()));
        self
    }

    /// Order results by `column`, descending.
    #[must_use]
    pub fn order_desc(mut self, column: &str) -> Self {
        self.order = Some((column.to_owned(), true));
        self
    }

    /// Order results by `column`, ascending.
    #[must_use]
    pub fn order_asc(mut self, column: &str) -> Self {
        self.order = Some((column.to_owned(), false));
        self
    }

    /// Render the filter as query-string pairs.
    #[must_use]
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = vec![("select".to_owned(), "*".to_owned())];
        for (column, value) in &self.eq {
            pairs.push((column.clone(), format!("eq.{value}")));
        }
        if let Some((column, desc)) = &self.order {
            let direction = if *desc { "desc" } else { "asc" };
            pairs.push(("order".to_owned(), format!("{column}.{direction}")));
        }
        pairs
    }

    /// Stable string form, used as the cache key component.
    fn cache_key(&self, table: &str) -> String {
        let query: Vec<String> = self
            .to_query()
            .into_iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        format!("{table}?{}", query.join("&"))
    }
}

// =============================================================================
// RecordsApi
// =============================================================================

/// Operations the portal consumes from the hosted record store.
///
/// Every method returns the affected rows (the client asks the backend to
/// echo representations back).
#[async_trait]
pub trait RecordsApi: Send + Sync {
    /// Insert a record into `table`.
    async fn insert(&self, table: &str, record: Value) -> Result<Vec<Value>, SupabaseError>;

    /// Insert a record into `table`, merging on primary-key conflict.
    async fn upsert(&self, table: &str, record: Value) -> Result<Vec<Value>, SupabaseError>;

    /// Select rows from `table` matching `filter`.
    async fn select(&self, table: &str, filter: &SelectFilter)
    -> Result<Vec<Value>, SupabaseError>;

    /// Apply `patch` to the row of `table` with the given id.
    async fn update(&self, table: &str, id: Uuid, patch: Value)
    -> Result<Vec<Value>, SupabaseError>;
}

// =============================================================================
// RecordsClient
// =============================================================================

/// Client for the hosted record-store REST surface.
#[derive(Clone)]
pub struct RecordsClient {
    inner: Arc<RecordsClientInner>,
}

struct RecordsClientInner {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
    cache: Cache<String, Vec<Value>>,
}

impl RecordsClient {
    /// Create a new record-store client.
    ///
    /// # Panics
    ///
    /// Panics if the TLS backend cannot be initialized (startup-only).
    #[must_use]
    pub fn new(config: &SupabaseConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("reqwest client construction only fails on TLS backend misconfiguration");

        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(RecordsClientInner {
                client,
                base_url: config.url.clone(),
                anon_key: config.anon_key.clone(),
                cache,
            }),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.inner.base_url)
    }

    /// Execute a record request and triage the response into rows.
    async fn execute(
        &self,
        method: Method,
        table: &str,
        query: &[(String, String)],
        body: Option<Value>,
        prefer: &str,
    ) -> Result<Vec<Value>, SupabaseError> {
        let mut request = self
            .inner
            .client
            .request(method, self.table_url(table))
            .header("apikey", &self.inner.anon_key)
            .header("Authorization", format!("Bearer {}", self.inner.anon_key))
            .query(query);

        if !prefer.is_empty() {
            request = request.header("Prefer", prefer);
        }

        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(SupabaseError::Api {
                status: status.as_u16(),
                message: error_message(status.as_u16(), &text),
            });
        }

        if text.is_empty() {
            return Ok(Vec::new());
        }

        // The record surface returns either a row array or a single row
        match serde_json::from_str::<Value>(&text)? {
            Value::Array(rows) => Ok(rows),
            row => Ok(vec![row]),
        }
    }
}

#[async_trait]
impl RecordsApi for RecordsClient {
    async fn insert(&self, table: &str, record: Value) -> Result<Vec<Value>, SupabaseError> {
        let rows = self
            .execute(
                Method::POST,
                table,
                &[],
                Some(record),
                "return=representation",
            )
            .await?;
        self.inner.cache.invalidate_all();
        Ok(rows)
    }

    async fn upsert(&self, table: &str, record: Value) -> Result<Vec<Value>, SupabaseError> {
        let rows = self
            .execute(
                Method::POST,
                table,
                &[],
                Some(record),
                "resolution=merge-duplicates,return=representation",
            )
            .await?;
        self.inner.cache.invalidate_all();
        Ok(rows)
    }

    async fn select(
        &self,
        table: &str,
        filter: &SelectFilter,
    ) -> Result<Vec<Value>, SupabaseError> {
        let key = filter.cache_key(table);

        if let Some(rows) = self.inner.cache.get(&key).await {
            tracing::debug!(table, "record select served from cache");
            return Ok(rows);
        }

        let rows = self
            .execute(Method::GET, table, &filter.to_query(), None, "")
            .await?;

        self.inner.cache.insert(key, rows.clone()).await;
        Ok(rows)
    }

    async fn update(
        &self,
        table: &str,
        id: Uuid,
        patch: Value,
    ) -> Result<Vec<Value>, SupabaseError> {
        let query = vec![("id".to_owned(), format!("eq.{id}"))];
        let rows = self
            .execute(
                Method::PATCH,
                table,
                &query,
                Some(patch),
                "return=representation",
            )
            .await?;
        self.inner.cache.invalidate_all();
        Ok(rows)
    }
}
