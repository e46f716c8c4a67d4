//! Application state shared across services.

use std::sync::Arc;

use opi_access::{AccessController, RoleTracker, SessionStore};
use opi_backend::BackendClient;

use crate::config::AppConfig;

/// Application state: the composition root.
///
/// Owns the single [`AccessController`] and [`RoleTracker`] instances
/// for the process and hands them to services by reference. Cheaply
/// cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    backend: BackendClient,
    access: AccessController,
    roles: RoleTracker,
}

impl AppState {
    /// Create the application state from configuration.
    ///
    /// The access controller resyncs from the durable session file
    /// immediately, so an admin session persisted by a previous run is
    /// visible before any service asks.
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        let backend = BackendClient::new(&config.backend());
        let store = SessionStore::with_file(config.session_file());
        let access = AccessController::new(store);
        let roles = RoleTracker::new();

        Self {
            inner: Arc::new(AppStateInner {
                config,
                backend,
                access,
                roles,
            }),
        }
    }

    /// State with an explicitly injected controller and backend.
    ///
    /// Used by tests and by embedders that manage their own storage
    /// scopes.
    #[must_use]
    pub fn with_parts(config: AppConfig, backend: BackendClient, access: AccessController) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                backend,
                access,
                roles: RoleTracker::new(),
            }),
        }
    }

    /// Get a reference to the application configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get a reference to the backend client.
    #[must_use]
    pub fn backend(&self) -> &BackendClient {
        &self.inner.backend
    }

    /// Get a reference to the admin access controller.
    #[must_use]
    pub fn access(&self) -> &AccessController {
        &self.inner.access
    }

    /// Get a reference to the remote role tracker.
    #[must_use]
    pub fn roles(&self) -> &RoleTracker {
        &self.inner.roles
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}
