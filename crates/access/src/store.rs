//! Two-scope session persistence.
//!
//! The session record lives in two places with the same schema: a
//! process-local mirror (the fast path, analogous to tab-scoped storage)
//! and a durable scope that survives a restart. Writes go mirror first,
//! then durable; reads check the mirror first and fall back to durable.
//! Keeping one write order and one read order is what prevents the two
//! scopes from diverging.

use std::path::PathBuf;
use std::sync::Mutex;

use crate::session::AdminSession;

/// Errors from an individual storage scope.
///
/// These never reach an access decision - the store treats every erroring
/// read as "no session found" (fail closed) and callers of the write path
/// decide whether durability loss is fatal.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Filesystem operation failed.
    #[error("session storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The session record could not be serialized.
    #[error("session record serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The in-memory scope's lock was poisoned by a panicking writer.
    #[error("session storage lock poisoned")]
    Poisoned,
}

/// A single storage scope holding at most one session record.
///
/// Implementations must be cheap to read: `read_raw` runs on every access
/// decision.
pub trait SessionScope: Send + Sync {
    /// Read the raw payload, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the scope cannot be read at all.
    /// "Nothing stored" is `Ok(None)`, not an error.
    fn read_raw(&self) -> Result<Option<String>, StoreError>;

    /// Write the raw payload, replacing any existing record.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the write fails.
    fn write_raw(&self, payload: &str) -> Result<(), StoreError>;

    /// Remove the record. Clearing an absent record is not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the scope cannot be cleared.
    fn clear(&self) -> Result<(), StoreError>;
}

/// Process-local scope: the fast mirror.
///
/// Lives and dies with the process, like tab-scoped browser storage.
#[derive(Debug, Default)]
pub struct MemoryScope {
    slot: Mutex<Option<String>>,
}

impl MemoryScope {
    /// Create an empty in-memory scope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionScope for MemoryScope {
    fn read_raw(&self) -> Result<Option<String>, StoreError> {
        let slot = self.slot.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(slot.clone())
    }

    fn write_raw(&self, payload: &str) -> Result<(), StoreError> {
        let mut slot = self.slot.lock().map_err(|_| StoreError::Poisoned)?;
        *slot = Some(payload.to_owned());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut slot = self.slot.lock().map_err(|_| StoreError::Poisoned)?;
        *slot = None;
        Ok(())
    }
}

/// Durable scope: a JSON file that survives restarts.
#[derive(Debug)]
pub struct FileScope {
    path: PathBuf,
}

impl FileScope {
    /// Create a file-backed scope at the given path.
    ///
    /// The file is not created until the first write.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The path this scope persists to.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl SessionScope for FileScope {
    fn read_raw(&self) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(payload) => Ok(Some(payload)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write_raw(&self, payload: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, payload)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// The paired mirror + durable store.
///
/// Owns the write order (mirror, then durable) and the read precedence
/// (mirror, then durable). Only the access controller writes through
/// this; everything else reads through the controller's accessors.
pub struct SessionStore {
    mirror: Box<dyn SessionScope>,
    durable: Box<dyn SessionScope>,
}

impl SessionStore {
    /// Create a store from a mirror and a durable scope.
    #[must_use]
    pub fn new(mirror: Box<dyn SessionScope>, durable: Box<dyn SessionScope>) -> Self {
        Self { mirror, durable }
    }

    /// Convenience constructor: in-memory mirror + file durable scope.
    #[must_use]
    pub fn with_file(path: PathBuf) -> Self {
        Self::new(Box::new(MemoryScope::new()), Box::new(FileScope::new(path)))
    }

    /// Persist a session record to both scopes, mirror first.
    ///
    /// Both writes are attempted even if the first fails, so a transient
    /// mirror fault cannot silently skip the durable copy.
    ///
    /// # Errors
    ///
    /// Returns the first [`StoreError`] encountered, after attempting
    /// both writes.
    pub fn persist(&self, session: &AdminSession) -> Result<(), StoreError> {
        let payload = serde_json::to_string(session)?;

        let mirror_result = self.mirror.write_raw(&payload);
        let durable_result = self.durable.write_raw(&payload);

        mirror_result.and(durable_result)
    }

    /// Read the session record, mirror first, durable fallback.
    ///
    /// Fail closed: an unreadable scope is skipped, and a scope holding
    /// an unparseable or invalid record yields no session rather than
    /// falling through to a possibly stale durable copy.
    #[must_use]
    pub fn load(&self) -> Option<AdminSession> {
        for (name, scope) in [("mirror", &self.mirror), ("durable", &self.durable)] {
            match scope.read_raw() {
                Ok(Some(payload)) => {
                    let session = AdminSession::from_stored(&payload);
                    if session.is_none() {
                        tracing::debug!(scope = name, "discarding unparseable session record");
                    }
                    return session;
                }
                Ok(None) => {}
                Err(err) => {
                    tracing::debug!(scope = name, error = %err, "session scope unreadable");
                }
            }
        }
        None
    }

    /// Remove the record from both scopes.
    ///
    /// Both clears are attempted regardless of individual failures.
    ///
    /// # Errors
    ///
    /// Returns the first [`StoreError`] encountered, after attempting
    /// both clears.
    pub fn clear(&self) -> Result<(), StoreError> {
        let mirror_result = self.mirror.clear();
        let durable_result = self.durable.clear();

        mirror_result.and(durable_result)
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}
