use std::fmt;
use std::sync::Arc;

use tracing::warn;
use vida_core::model::Session;

use crate::repository::{KeyValueStore, StorageError};

/// Key holding the session token.
pub const TOKEN_KEY: &str = "vida-cidada-token";
/// Key holding the greeting name.
pub const DISPLAY_NAME_KEY: &str = "user-name";

/// Maps a [`Session`] onto its two key-value entries.
#[derive(Clone)]
pub struct SessionStore {
    backend: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    #[must_use]
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Snapshot of the stored session. Missing or empty entries read as absent,
    /// and so does a backend whose contents no longer decode.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be reached.
    pub fn load(&self) -> Result<Session, StorageError> {
        match self.read_raw() {
            Ok((token, name)) => Ok(Session::from_raw(token.as_deref(), name.as_deref())),
            Err(StorageError::Serialization(reason)) => {
                warn!(%reason, "stored session is unreadable, treating it as signed out");
                Ok(Session::anonymous())
            }
            Err(err) => Err(err),
        }
    }

    fn read_raw(&self) -> Result<(Option<String>, Option<String>), StorageError> {
        Ok((self.backend.get(TOKEN_KEY)?, self.backend.get(DISPLAY_NAME_KEY)?))
    }

    /// Write both entries in one backend write. Absent fields remove their key.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    pub fn save(&self, session: &Session) -> Result<(), StorageError> {
        self.backend.apply(&[
            (TOKEN_KEY, session.token().map(|t| t.as_str())),
            (DISPLAY_NAME_KEY, session.display_name()),
        ])
    }

    /// Remove both entries.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.backend.apply(&[(TOKEN_KEY, None), (DISPLAY_NAME_KEY, None)])
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}
