//! API key session state and its transitions.

use serde::{Deserialize, Serialize};

/// State derived from an [`AuthSession`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum AuthState {
    Unauthenticated,
    Validating,
    Authenticated { is_admin: bool },
    /// Last validation was rejected; behaves like `Unauthenticated`.
    Invalid,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub api_key: Option<String>,
    pub is_admin: bool,
    pub validating: bool,
    pub error: Option<String>,
}

impl AuthSession {
    pub fn state(&self) -> AuthState {
        if self.validating {
            AuthState::Validating
        } else if self.api_key.is_some() {
            AuthState::Authenticated {
                is_admin: self.is_admin,
            }
        } else if self.error.is_some() {
            AuthState::Invalid
        } else {
            AuthState::Unauthenticated
        }
    }

    /// Optimistically adopts a previously persisted key and admin flag.
    pub fn adopt_cached(&mut self, persisted: PersistedAuth) {
        self.api_key = Some(persisted.api_key);
        self.is_admin = persisted.is_admin;
        self.error = None;
    }

    pub fn begin_validation(&mut self) {
        self.validating = true;
        self.error = None;
    }

    /// Drops the pending flag without touching the key or admin flag.
    pub fn end_validation(&mut self) {
        self.validating = false;
    }

    pub fn accept(&mut self, api_key: String, is_admin: bool) {
        self.api_key = Some(api_key);
        self.is_admin = is_admin;
        self.validating = false;
        self.error = None;
    }

    pub fn reject(&mut self, error: impl Into<String>) {
        self.api_key = None;
        self.is_admin = false;
        self.validating = false;
        self.error = Some(error.into());
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Key and cached admin flag kept in operator-local storage between runs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedAuth {
    pub api_key: String,
    #[serde(default)]
    pub is_admin: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unauthenticated() {
        assert_eq!(AuthSession::default().state(), AuthState::Unauthenticated);
    }

    #[test]
    fn validation_success_and_failure() {
        let mut session = AuthSession::default();
        session.begin_validation();
        assert_eq!(session.state(), AuthState::Validating);

        session.accept("ABC".to_string(), true);
        assert_eq!(session.state(), AuthState::Authenticated { is_admin: true });

        session.begin_validation();
        session.reject("Clé API invalide");
        assert_eq!(session.state(), AuthState::Invalid);
        assert!(!session.is_admin);
        assert!(session.api_key.is_none());
    }

    #[test]
    fn ended_validation_keeps_previous_key() {
        let mut session = AuthSession::default();
        session.accept("ABC".to_string(), true);
        session.begin_validation();
        session.end_validation();
        assert_eq!(session.state(), AuthState::Authenticated { is_admin: true });
        assert_eq!(session.api_key.as_deref(), Some("ABC"));
    }

    #[test]
    fn cached_flag_is_adopted_then_cleared() {
        let mut session = AuthSession::default();
        session.adopt_cached(PersistedAuth {
            api_key: "ABC".to_string(),
            is_admin: true,
        });
        assert_eq!(session.state(), AuthState::Authenticated { is_admin: true });

        session.clear();
        assert_eq!(session, AuthSession::default());
    }
}
