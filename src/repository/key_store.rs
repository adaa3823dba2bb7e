//! Persisted API key storage.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::domain::auth::PersistedAuth;
use crate::repository::KeyStore;
use crate::repository::errors::RepositoryResult;

/// Stores the key as a small JSON document on the operator's disk.
#[derive(Debug)]
pub struct FileKeyStore {
    path: PathBuf,
    // Serializes writers so a save never interleaves with a clear.
    lock: Mutex<()>,
}

impl FileKeyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyStore for FileKeyStore {
    fn load(&self) -> RepositoryResult<Option<PersistedAuth>> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(None),
            Ok(contents) => Ok(Some(serde_json::from_str(&contents)?)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, auth: &PersistedAuth) -> RepositoryResult<()> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(auth)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> RepositoryResult<()> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Volatile store, used when no state file is wanted and in tests.
#[derive(Debug, Default)]
pub struct MemoryKeyStore {
    inner: Mutex<Option<PersistedAuth>>,
}

impl MemoryKeyStore {
    pub fn with(auth: PersistedAuth) -> Self {
        Self {
            inner: Mutex::new(Some(auth)),
        }
    }
}

impl KeyStore for MemoryKeyStore {
    fn load(&self) -> RepositoryResult<Option<PersistedAuth>> {
        Ok(self
            .inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, auth: &PersistedAuth) -> RepositoryResult<()> {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = Some(auth.clone());
        Ok(())
    }

    fn clear(&self) -> RepositoryResult<()> {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}
