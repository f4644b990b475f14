//! Auth-state-change notifications.
//!
//! Sign-in, sign-out, and registration publish onto a broadcast bus; anyone
//! holding a receiver observes every event published while subscribed, and
//! dropping the receiver unsubscribes. The binary subscribes at startup to
//! emit an audit log line per event; tests subscribe to assert delivery.

use tokio::sync::broadcast;

use gps_pay_core::{AccountId, BusinessType, Email};

/// Capacity of the event channel; an event is dropped for a receiver only if
/// that receiver lags this far behind.
const CHANNEL_CAPACITY: usize = 64;

/// A change in some merchant's authentication state.
#[derive(Debug, Clone)]
pub enum AuthEvent {
    /// A merchant signed in with email and password.
    SignedIn { account: AccountId, email: Email },
    /// A merchant signed out.
    SignedOut { account: AccountId },
    /// A new account was created through the registration wizard.
    Registered {
        account: AccountId,
        email: Email,
        business_type: BusinessType,
    },
}

/// Broadcast bus for [`AuthEvent`]s.
///
/// Cloning the bus clones a handle to the same channel.
#[derive(Debug, Clone)]
pub struct AuthEventBus {
    sender: broadcast::Sender<AuthEvent>,
}

impl AuthEventBus {
    /// Create a new bus.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Subscribe to all events published from now on.
    ///
    /// Dropping the returned receiver unsubscribes.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.sender.subscribe()
    }

    /// Publish an event to every current subscriber.
    ///
    /// Publishing with no subscribers is not an error - nobody was listening.
    pub fn publish(&self, event: AuthEvent) {
        let _ = self.sender.send(event);
    }

    /// Number of live subscribers (diagnostics only).
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for AuthEventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Log every auth event until the bus is dropped.
///
/// Spawned once from `main`; exits when the last bus handle goes away.
pub async fn log_auth_events(mut receiver: broadcast::Receiver<AuthEvent>) {
    loop {
        match receiver.recv().await {
            Ok(AuthEvent::SignedIn { account, email }) => {
                tracing::info!(%account, %email, "merchant signed in");
            }
            Ok(AuthEvent::SignedOut { account }) => {
                tracing::info!(%account, "merchant signed out");
            }
            Ok(AuthEvent::Registered {
                account,
                email,
                business_type,
            }) => {
                tracing::info!(%account, %email, %business_type, "merchant registered");
            }
            Err(broadcast::error::RecvError::Lagged(missed)) => {
                tracing::warn!(missed, "auth event log fell behind");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}
