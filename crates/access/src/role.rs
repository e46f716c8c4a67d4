//! Remote role reconciliation.
//!
//! The remote identity service reports a [`UserRole`] for a logged-in
//! principal. Fetching it is asynchronous, so the guard needs to tell
//! apart "haven't asked yet", "asked, still waiting", "asked and got an
//! answer", and "asked and the call failed". [`RoleState`] models exactly
//! those four, and [`RoleTracker`] owns the transitions.

use std::future::Future;
use std::sync::{Arc, Mutex};

use opi_core::UserRole;

/// Where the remote role lookup currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RoleState {
    /// No fetch has been started for the current identity.
    #[default]
    NotFetched,
    /// A fetch is in flight.
    Fetching,
    /// The service answered; this is the caller's role.
    Fetched(UserRole),
    /// The fetch completed with an error. Distinct from an answered
    /// "guest" - the caller should be told to re-authenticate, not that
    /// their role is insufficient.
    Failed(String),
}

impl RoleState {
    /// Whether the service has answered at all, successfully or not.
    #[must_use]
    pub const fn is_fetched(&self) -> bool {
        matches!(self, Self::Fetched(_) | Self::Failed(_))
    }

    /// Whether an answer is still outstanding.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::NotFetched | Self::Fetching)
    }
}

/// Source of the caller's remote role - implemented by the backend client.
pub trait RoleSource: Send + Sync {
    /// Error produced by a failed lookup.
    type Error: std::fmt::Display + Send;

    /// Fetch the role the remote service holds for the current caller.
    fn caller_role(&self) -> impl Future<Output = Result<UserRole, Self::Error>> + Send;
}

/// Shared, cloneable holder of the current [`RoleState`].
///
/// The tracker is the only writer of the state; guards read a snapshot
/// via [`state`](Self::state). Refreshes spawned with
/// [`spawn_refresh`](Self::spawn_refresh) are aborted when their handle
/// drops, so a caller navigating away mid-check leaves no write behind.
/// A refresh that loses that race anyway is a harmless overwrite - this
/// tracker is the single writer either way.
#[derive(Debug, Clone, Default)]
pub struct RoleTracker {
    state: Arc<Mutex<RoleState>>,
}

impl RoleTracker {
    /// Create a tracker in the [`RoleState::NotFetched`] state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current state.
    ///
    /// A poisoned lock reads as a failed fetch - fail closed, the guard
    /// will deny with "could not verify" rather than grant or hang.
    #[must_use]
    pub fn state(&self) -> RoleState {
        self.state.lock().map_or_else(
            |_| RoleState::Failed("role state lock poisoned".to_owned()),
            |state| state.clone(),
        )
    }

    /// Forget the current answer (identity changed or logged out).
    pub fn reset(&self) {
        self.set(RoleState::NotFetched);
    }

    /// Fetch the role from `source` and record the outcome.
    ///
    /// Transitions to `Fetching` first so concurrent guards report
    /// `Pending` instead of re-triggering or denying.
    pub async fn refresh<S: RoleSource>(&self, source: &S) {
        self.set(RoleState::Fetching);

        match source.caller_role().await {
            Ok(role) => {
                tracing::debug!(%role, "remote role fetched");
                self.set(RoleState::Fetched(role));
            }
            Err(err) => {
                tracing::warn!(error = %err, "remote role fetch failed");
                self.set(RoleState::Failed(err.to_string()));
            }
        }
    }

    /// Run [`refresh`](Self::refresh) on a background task.
    ///
    /// Dropping the returned handle aborts the task.
    pub fn spawn_refresh<S>(&self, source: Arc<S>) -> RefreshHandle
    where
        S: RoleSource + 'static,
    {
        let tracker = self.clone();
        let handle = tokio::spawn(async move {
            tracker.refresh(source.as_ref()).await;
        });

        RefreshHandle {
            handle: Some(handle),
        }
    }

    fn set(&self, next: RoleState) {
        if let Ok(mut state) = self.state.lock() {
            *state = next;
        }
    }
}

/// Abort-on-drop guard for a spawned role refresh.
#[derive(Debug)]
pub struct RefreshHandle {
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl RefreshHandle {
    /// Wait for the refresh to finish instead of aborting it.
    pub async fn join(mut self) {
        if let Some(handle) = self.handle.take() {
            // An aborted or panicked refresh already recorded Failed or
            // left the previous state; nothing to surface here.
            let _ = handle.await;
        }
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        if let Some(handle) = &self.handle {
            handle.abort();
        }
    }
}
