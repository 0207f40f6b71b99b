use std::fmt;

use storage::SessionStore;
use tracing::{info, warn};
use uuid::Uuid;
use vida_core::guard::{Decision, Route, guard_route};
use vida_core::login::{Cpf, Credentials};
use vida_core::model::{Session, SessionToken};

use crate::error::AuthError;

//
// ─── ACCOUNTS ──────────────────────────────────────────────────────────────────
//

/// A student who may sign in.
#[derive(Clone, PartialEq, Eq)]
pub struct Account {
    pub cpf: Cpf,
    pub password: String,
    pub display_name: String,
}

impl Account {
    /// The portal's demo student, `123.456.789-00` / `senha123`.
    #[must_use]
    pub fn demo() -> Self {
        Self {
            cpf: Cpf::from_digits([1, 2, 3, 4, 5, 6, 7, 8, 9, 0, 0]),
            password: "senha123".into(),
            display_name: "João da Silva".into(),
        }
    }

    fn matches(&self, credentials: &Credentials) -> bool {
        self.cpf == credentials.cpf && self.password == credentials.password
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("cpf", &self.cpf)
            .field("display_name", &self.display_name)
            .finish_non_exhaustive()
    }
}

//
// ─── SERVICE ───────────────────────────────────────────────────────────────────
//

/// Sign-in, sign-out and route checks against a session store.
#[derive(Debug, Clone)]
pub struct AuthService {
    store: SessionStore,
    accounts: Vec<Account>,
}

impl AuthService {
    #[must_use]
    pub fn new(store: SessionStore, accounts: Vec<Account>) -> Self {
        Self { store, accounts }
    }

    /// Service with only the demo account registered.
    #[must_use]
    pub fn with_demo_account(store: SessionStore) -> Self {
        Self::new(store, vec![Account::demo()])
    }

    /// Check credentials and, on success, persist a fresh session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` without touching the store when
    /// no account matches, or `AuthError::Storage` if the session cannot be saved.
    pub fn login(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        let Some(account) = self.accounts.iter().find(|a| a.matches(credentials)) else {
            warn!(cpf = %credentials.cpf, "login rejected");
            return Err(AuthError::InvalidCredentials);
        };

        let token = SessionToken::parse(Uuid::new_v4().simple().to_string())?;
        let session = Session::authenticated(token, Some(account.display_name.clone()));
        self.store.save(&session)?;

        info!(cpf = %account.cpf, "login succeeded");
        Ok(session)
    }

    /// Forget the stored session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the store cannot be written.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.store.clear()?;
        info!("logged out");
        Ok(())
    }

    /// Snapshot of the stored session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the store cannot be read.
    pub fn current_session(&self) -> Result<Session, AuthError> {
        Ok(self.store.load()?)
    }

    /// Decide whether `route` may render for the stored session.
    ///
    /// Public routes are decided without reading the store.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if a protected route's session cannot be read.
    pub fn authorize(&self, route: Route) -> Result<Decision, AuthError> {
        if !route.is_protected() {
            return Ok(guard_route(route, &Session::anonymous()));
        }
        let session = self.current_session()?;
        Ok(guard_route(route, &session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use storage::InMemoryStore;

    fn service() -> (InMemoryStore, AuthService) {
        let backend = InMemoryStore::new();
        let store = SessionStore::new(Arc::new(backend.clone()));
        (backend, AuthService::with_demo_account(store))
    }

    #[test]
    fn demo_login_issues_distinct_tokens() {
        let (_backend, auth) = service();
        let creds = Credentials::parse("123.456.789-00", "senha123").unwrap();
        let first = auth.login(&creds).unwrap();
        let second = auth.login(&creds).unwrap();
        assert_ne!(first.token(), second.token());
        assert_eq!(auth.current_session().unwrap(), second);
    }

    #[test]
    fn unmasked_cpf_matches_account() {
        let (_backend, auth) = service();
        let creds = Credentials::parse("12345678900", "senha123").unwrap();
        assert!(auth.login(&creds).is_ok());
    }

    /// Fails every call, like a backend whose disk has gone away.
    struct Unreachable;

    impl storage::KeyValueStore for Unreachable {
        fn get(&self, _key: &str) -> Result<Option<String>, storage::StorageError> {
            Err(storage::StorageError::Connection("offline".into()))
        }
        fn set(&self, _key: &str, _value: &str) -> Result<(), storage::StorageError> {
            Err(storage::StorageError::Connection("offline".into()))
        }
        fn remove(&self, _key: &str) -> Result<(), storage::StorageError> {
            Err(storage::StorageError::Connection("offline".into()))
        }
    }

    #[test]
    fn public_routes_do_not_touch_the_store() {
        let auth = AuthService::with_demo_account(SessionStore::new(Arc::new(Unreachable)));
        assert_eq!(auth.authorize(Route::Login).unwrap(), Decision::Allow);
        assert_eq!(
            auth.authorize(Route::FacialRecognition).unwrap(),
            Decision::Allow
        );
        assert!(matches!(
            auth.authorize(Route::Dashboard),
            Err(AuthError::Storage(_))
        ));
    }

    #[test]
    fn account_debug_hides_password() {
        let account = Account::demo();
        assert!(!format!("{account:?}").contains("senha123"));
    }
}
