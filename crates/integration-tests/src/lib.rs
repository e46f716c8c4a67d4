//! Integration tests for OPI Paranormal.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p opi-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `access_properties` - the controller/store invariants (precedence,
//!   fail-closed storage, write-before-flag, idempotent logout,
//!   reload round-trip)
//! - `access_scenarios` - end-to-end authorization walks through the
//!   guard, including the remote-role reconciliation path
//! - `admin_service` - service-layer gating over the composition root
//!
//! Everything runs against in-process storage scopes and a stubbed role
//! source; no network or running service is required.

use std::path::PathBuf;

use opi_access::{
    AccessController, FileScope, MemoryScope, RoleSource, SessionScope, SessionStore, StoreError,
};
use opi_core::UserRole;

/// Controller over two fresh in-memory scopes.
#[must_use]
pub fn memory_controller() -> AccessController {
    AccessController::new(SessionStore::new(
        Box::new(MemoryScope::new()),
        Box::new(MemoryScope::new()),
    ))
}

/// A unique path for a durable session file under the system temp dir.
#[must_use]
pub fn temp_session_path() -> PathBuf {
    std::env::temp_dir()
        .join("opi-integration-tests")
        .join(format!("{}.json", uuid::Uuid::new_v4()))
}

/// Controller with a real durable file scope at `path`.
#[must_use]
pub fn file_controller(path: PathBuf) -> AccessController {
    AccessController::new(SessionStore::with_file(path))
}

/// Scope that fails every operation, simulating disabled storage.
pub struct BrokenScope;

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

/// Role source answering from a fixed result, standing in for the
/// remote identity service.
pub struct StubRoleSource(pub Result<UserRole, String>);

impl RoleSource for StubRoleSource {
    type Error = String;

    async fn caller_role(&self) -> Result<UserRole, String> {
        self.0.clone()
    }
}
