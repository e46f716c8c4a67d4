//! The access controller: single source of truth for the PIN session.
//!
//! Owns the in-memory session flags and the two-scope store. The write
//! ordering matters: `login` persists to storage *before* flipping the
//! in-memory flag, so an access check running immediately after login -
//! before any reactive state has propagated - still observes the session
//! through the direct storage read in [`AccessController::is_admin_session`].

use std::sync::{Arc, Mutex};

use opi_core::Email;

use crate::session::AdminSession;
use crate::store::SessionStore;

/// In-memory view of the PIN session.
#[derive(Debug, Default, Clone)]
struct SessionState {
    is_admin: bool,
    admin_email: Option<Email>,
}

/// Dual-mode admin session controller.
///
/// Cheaply cloneable; all clones share one state. The controller is the
/// only writer of the session record - callers read through
/// [`is_admin_session`](Self::is_admin_session) and
/// [`admin_email`](Self::admin_email).
///
/// Every operation here is synchronous. There is no suspension point
/// between the storage write and the in-memory update, so `login`,
/// `logout`, and the read accessors are mutually atomic with respect to
/// a single-threaded caller.
#[derive(Clone)]
pub struct AccessController {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    store: SessionStore,
    state: Mutex<SessionState>,
}

impl AccessController {
    /// Create a controller over the given store.
    ///
    /// Resyncs from storage immediately, so a controller constructed in
    /// a fresh process observes a session persisted by a previous one.
    #[must_use]
    pub fn new(store: SessionStore) -> Self {
        let state = store.load().map_or_else(SessionState::default, |session| {
            SessionState {
                is_admin: true,
                admin_email: Some(session.email),
            }
        });

        Self {
            inner: Arc::new(ControllerInner {
                store,
                state: Mutex::new(state),
            }),
        }
    }

    /// Record a successful admin login.
    ///
    /// The caller must already have verified the PIN against the remote
    /// service; this operation only records that decision. The record is
    /// persisted to both scopes first, then the in-memory flag flips. A
    /// storage fault degrades durability but never blocks the login - it
    /// is logged and swallowed.
    pub fn login(&self, email: Email) {
        let session = AdminSession::new(email.clone());

        if let Err(err) = self.inner.store.persist(&session) {
            tracing::warn!(error = %err, "admin session not fully persisted");
        }

        if let Ok(mut state) = self.inner.state.lock() {
            state.is_admin = true;
            state.admin_email = Some(email);
        }

        tracing::info!("admin PIN session established");
    }

    /// Clear the session from both scopes and from memory. Idempotent.
    ///
    /// Storage faults while clearing are swallowed: removing a possibly
    /// absent record is not an error, and the in-memory reset must
    /// happen regardless.
    pub fn logout(&self) {
        if let Err(err) = self.inner.store.clear() {
            tracing::warn!(error = %err, "admin session storage not fully cleared");
        }

        if let Ok(mut state) = self.inner.state.lock() {
            *state = SessionState::default();
        }

        tracing::info!("admin PIN session cleared");
    }

    /// Whether a PIN-admin session is currently active.
    ///
    /// Combines the in-memory flag with a direct storage read, recomputed
    /// on every call and never cached. The storage read is the defense
    /// against a caller racing ahead of reactive state propagation: right
    /// after `login`, the record is already in the mirror even if no
    /// in-memory observer has refreshed. Side-effect free.
    #[must_use]
    pub fn is_admin_session(&self) -> bool {
        let in_memory = self
            .inner
            .state
            .lock()
            .map(|state| state.is_admin)
            .unwrap_or(false);

        in_memory || self.inner.store.load().is_some()
    }

    /// Email of the current admin session, if any.
    ///
    /// Falls back to the storage record the same way `is_admin_session`
    /// does.
    #[must_use]
    pub fn admin_email(&self) -> Option<Email> {
        let in_memory = self
            .inner
            .state
            .lock()
            .ok()
            .and_then(|state| state.admin_email.clone());

        in_memory.or_else(|| self.inner.store.load().map(|session| session.email))
    }
}

impl std::fmt::Debug for AccessController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessController").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::store::{MemoryScope, SessionScope, SessionStore, StoreError};

    use super::*;

    struct BrokenScope;

    impl SessionScope for BrokenScope {
        fn read_raw(&self) -> Result<Option<String>, StoreError> {
            Err(StoreError::Io(std::io::Error::other("storage disabled")))
        }

        fn write_raw(&self, _payload: &str) -> Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::other("storage disabled")))
        }

        fn clear(&self) -> Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::other("storage disabled")))
        }
    }

    fn memory_controller() -> AccessController {
        AccessController::new(SessionStore::new(
            Box::new(MemoryScope::new()),
            Box::new(MemoryScope::new()),
        ))
    }

    fn email(s: &str) -> Email {
        Email::parse(s).unwrap()
    }

    #[test]
    fn test_fresh_controller_has_no_session() {
        let controller = memory_controller();
        assert!(!controller.is_admin_session());
        assert!(controller.admin_email().is_none());
    }

    #[test]
    fn test_login_then_session_active() {
        let controller = memory_controller();
        controller.login(email("owner@example.com"));

        assert!(controller.is_admin_session());
        assert_eq!(
            controller.admin_email().unwrap().as_str(),
            "owner@example.com"
        );
    }

    #[test]
    fn test_logout_idempotent() {
        let controller = memory_controller();
        // Logging out with no session must not panic and leaves the
        // default state in place.
        controller.logout();
        assert!(!controller.is_admin_session());
        assert!(controller.admin_email().is_none());

        controller.login(email("owner@example.com"));
        controller.logout();
        controller.logout();
        assert!(!controller.is_admin_session());
    }

    #[test]
    fn test_login_survives_broken_storage() {
        let controller = AccessController::new(SessionStore::new(
            Box::new(BrokenScope),
            Box::new(BrokenScope),
        ));

        // The decision was already made by the caller; a storage fault
        // must not revoke it for the current process.
        controller.login(email("owner@example.com"));
        assert!(controller.is_admin_session());
    }

    #[test]
    fn test_broken_storage_reads_fail_closed() {
        let controller = AccessController::new(SessionStore::new(
            Box::new(BrokenScope),
            Box::new(BrokenScope),
        ));
        assert!(!controller.is_admin_session());
    }

    #[test]
    fn test_controller_resyncs_from_store_on_construction() {
        let durable = MemoryScope::new();
        durable
            .write_raw(r#"{"email":"owner@example.com"}"#)
            .unwrap();

        let controller = AccessController::new(SessionStore::new(
            Box::new(MemoryScope::new()),
            Box::new(durable),
        ));
        assert!(controller.is_admin_session());
        assert_eq!(
            controller.admin_email().unwrap().as_str(),
            "owner@example.com"
        );
    }

    #[test]
    fn test_clones_share_state() {
        let controller = memory_controller();
        let clone = controller.clone();

        controller.login(email("owner@example.com"));
        assert!(clone.is_admin_session());

        clone.logout();
        assert!(!controller.is_admin_session());
    }
}
