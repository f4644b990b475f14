//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::PortalConfig;
use crate::services::events::AuthEventBus;
use crate::services::registration::RegistrationService;
use crate::services::toll::TollService;
use crate::supabase::{AuthClient, RecordsClient};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the hosted-backend clients and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: PortalConfig,
    pool: PgPool,
    accounts: AuthClient,
    records: RecordsClient,
    events: AuthEventBus,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Portal configuration
    /// * `pool` - `PostgreSQL` connection pool backing the session store
    #[must_use]
    pub fn new(config: PortalConfig, pool: PgPool) -> Self {
        let accounts = AuthClient::new(&config.supabase);
        let records = RecordsClient::new(&config.supabase);
        let events = AuthEventBus::new();

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                accounts,
                records,
                events,
            }),
        }
    }

    /// Get a reference to the portal configuration.
    #[must_use]
    pub fn config(&self) -> &PortalConfig {
        &self.inner.config
    }

    /// Get a reference to the session-store connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the hosted auth client.
    #[must_use]
    pub fn accounts(&self) -> &AuthClient {
        &self.inner.accounts
    }

    /// Get a reference to the hosted record-store client.
    #[must_use]
    pub fn records(&self) -> &RecordsClient {
        &self.inner.records
    }

    /// Get a reference to the auth event bus.
    #[must_use]
    pub fn events(&self) -> &AuthEventBus {
        &self.inner.events
    }

    /// Registration commit service over the live clients.
    #[must_use]
    pub fn registration(&self) -> RegistrationService<'_> {
        RegistrationService::new(&self.inner.accounts, &self.inner.records)
    }

    /// Toll-vertical service over the live record client.
    #[must_use]
    pub fn toll(&self) -> TollService<'_> {
        TollService::new(&self.inner.records)
    }
}
