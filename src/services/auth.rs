//! Process-wide API key session.
//!
//! The [`AuthManager`] owns the single [`AuthSession`] of the running
//! application. Validations are tagged with a generation ticket and only the
//! most recently started one may update the session, so a slow response can
//! never overwrite a newer outcome.
//!
//! At startup `run` calls [`AuthManager::restore`] and revalidates the
//! restored key in the background; keys arriving later go through
//! [`AuthManager::set_api_key`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError, RwLock};

use crate::domain::auth::{AuthSession, PersistedAuth};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{ApiKeyProvider, KeyStore, KeyValidator};

/// Query parameters accepted as an API key, in priority order.
pub const API_KEY_QUERY_PARAMS: [&str; 2] = ["apiKey", "API_KEY"];

/// Generation number handed out when a validation starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationTicket(u64);

enum StoreWrite {
    Save(PersistedAuth),
    Clear,
}

/// Ends a validation whose future was dropped before the backend answered,
/// e.g. when the client disconnected mid-request.
struct PendingValidation<'a> {
    manager: &'a AuthManager,
    ticket: ValidationTicket,
    armed: bool,
}

impl PendingValidation<'_> {
    fn complete(mut self) -> ValidationTicket {
        self.armed = false;
        self.ticket
    }
}

impl Drop for PendingValidation<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.manager.abandon(self.ticket);
        }
    }
}

pub struct AuthManager {
    session: RwLock<AuthSession>,
    generation: AtomicU64,
    store: Box<dyn KeyStore>,
    // Generation of the last store write; older writes are skipped.
    persisted: Mutex<u64>,
}

impl AuthManager {
    pub fn new(store: impl KeyStore + 'static) -> Self {
        Self {
            session: RwLock::new(AuthSession::default()),
            generation: AtomicU64::new(0),
            store: Box::new(store),
            persisted: Mutex::new(0),
        }
    }

    pub fn snapshot(&self) -> AuthSession {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_admin(&self) -> bool {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_admin
    }

    pub fn api_key(&self) -> Option<String> {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .api_key
            .clone()
    }

    /// Adopts the persisted key and its cached admin flag, returning the key
    /// so the caller can revalidate it.
    pub fn restore(&self) -> Option<String> {
        let persisted = match self.store.load() {
            Ok(persisted) => persisted?,
            Err(err) => {
                log::error!("Failed to load persisted API key: {err}");
                return None;
            }
        };
        let api_key = persisted.api_key.clone();
        self.session
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .adopt_cached(persisted);
        Some(api_key)
    }

    fn begin(&self) -> PendingValidation<'_> {
        let mut session = self.session.write().unwrap_or_else(PoisonError::into_inner);
        let ticket = ValidationTicket(self.generation.fetch_add(1, Ordering::SeqCst) + 1);
        session.begin_validation();
        PendingValidation {
            manager: self,
            ticket,
            armed: true,
        }
    }

    fn is_current(&self, ticket: ValidationTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// Leaves the session as it was before an unfinished validation.
    fn abandon(&self, ticket: ValidationTicket) {
        let mut session = self.session.write().unwrap_or_else(PoisonError::into_inner);
        if self.is_current(ticket) {
            log::warn!("API key validation #{} abandoned", ticket.0);
            session.end_validation();
        }
    }

    /// Writes the store unless a newer generation already did.
    fn persist(&self, generation: u64, write: StoreWrite) {
        let mut last = self.persisted.lock().unwrap_or_else(PoisonError::into_inner);
        if generation < *last {
            log::debug!("Skipping persisted key write #{generation}, #{} is newer", *last);
            return;
        }
        *last = generation;

        let result = match write {
            StoreWrite::Save(auth) => self.store.save(&auth),
            StoreWrite::Clear => self.store.clear(),
        };
        if let Err(err) = result {
            log::error!("Failed to update persisted API key: {err}");
        }
    }

    /// Applies a validation outcome. Returns `false` when the ticket was
    /// superseded and the outcome discarded.
    fn finish(
        &self,
        ticket: ValidationTicket,
        api_key: String,
        outcome: RepositoryResult<bool>,
    ) -> bool {
        let write = {
            let mut session = self.session.write().unwrap_or_else(PoisonError::into_inner);
            if !self.is_current(ticket) {
                log::debug!("Discarding stale API key validation #{}", ticket.0);
                return false;
            }

            match outcome {
                Ok(is_admin) => {
                    log::info!("API key validated (admin: {is_admin})");
                    session.accept(api_key.clone(), is_admin);
                    StoreWrite::Save(PersistedAuth { api_key, is_admin })
                }
                Err(err) => {
                    log::warn!("API key validation failed: {err}");
                    let message = match err {
                        RepositoryError::ValidationError(_) => "Clé API invalide",
                        _ => "Impossible de valider la clé API",
                    };
                    session.reject(message);
                    StoreWrite::Clear
                }
            }
        };

        self.persist(ticket.0, write);
        true
    }

    /// Validates `api_key` against the backend and returns the resulting session.
    pub async fn validate<V>(&self, validator: &V, api_key: String) -> AuthSession
    where
        V: KeyValidator + ?Sized,
    {
        let pending = self.begin();
        let outcome = validator.validate_api_key(&api_key).await;
        self.finish(pending.complete(), api_key, outcome);
        self.snapshot()
    }

    /// Validates a new key and keeps it once accepted. A blank key clears
    /// the session.
    pub async fn set_api_key<V>(&self, validator: &V, api_key: &str) -> AuthSession
    where
        V: KeyValidator + ?Sized,
    {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            self.clear_api_key();
            return self.snapshot();
        }
        self.validate(validator, api_key.to_string()).await
    }

    /// Forgets the key immediately, superseding any in-flight validation.
    pub fn clear_api_key(&self) {
        let generation = {
            let mut session = self.session.write().unwrap_or_else(PoisonError::into_inner);
            session.clear();
            self.generation.fetch_add(1, Ordering::SeqCst) + 1
        };
        self.persist(generation, StoreWrite::Clear);
    }
}

impl ApiKeyProvider for AuthManager {
    fn current_api_key(&self) -> Option<String> {
        self.api_key()
    }
}
