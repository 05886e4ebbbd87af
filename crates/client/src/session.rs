//! Session state: who is logged in, and the token that proves it.
//!
//! The session owns the persisted bearer token and the current identity
//! snapshot. Identity changes are broadcast on a `watch` channel so other
//! holders (the cart, a UI) can react without polling.
//!
//! Outcomes are reported as [`Notice`]s; the boolean returns only say
//! whether the operation took effect. A failed login leaves both the
//! identity and the stored token exactly as they were.

use secrecy::SecretString;
use tokio::sync::watch;

use orchard_core::User;

use crate::api::{ApiClient, AuthResponse};
use crate::error::ApiError;
use crate::notify::{Notice, SharedNotifier};
use crate::store::LocalStore;

// =============================================================================
// Provider trait
// =============================================================================

/// The slice of the HTTP API the session needs.
///
/// Implementations must install the returned token into their own request
/// path on successful `login`/`signup`, and must drop it on `logout` even
/// when the server call fails.
#[allow(async_fn_in_trait)]
pub trait AuthApi: Send + Sync {
    fn install_token(&self, token: SecretString);
    fn clear_token(&self);
    async fn login(&self, username: &str, password: &str) -> Result<AuthResponse, ApiError>;
    async fn signup(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, ApiError>;
    async fn current_user(&self) -> Result<User, ApiError>;
    async fn logout(&self) -> Result<(), ApiError>;
}

impl AuthApi for ApiClient {
    fn install_token(&self, token: SecretString) {
        Self::install_token(self, token);
    }

    fn clear_token(&self) {
        Self::clear_token(self);
    }

    async fn login(&self, username: &str, password: &str) -> Result<AuthResponse, ApiError> {
        Self::login(self, username, password).await
    }

    async fn signup(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, ApiError> {
        Self::signup(self, username, email, password).await
    }

    async fn current_user(&self) -> Result<User, ApiError> {
        Self::current_user(self).await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        Self::logout(self).await
    }
}

// =============================================================================
// Session
// =============================================================================

/// Holds the current identity and keeps the stored token in sync with it.
pub struct Session<A = ApiClient> {
    api: A,
    store: LocalStore,
    notifier: SharedNotifier,
    identity: watch::Sender<Option<User>>,
}

impl<A: AuthApi> Session<A> {
    /// Create a session with no identity. Call [`Self::check_auth`] to
    /// resume one from a stored token.
    pub fn new(api: A, store: LocalStore, notifier: SharedNotifier) -> Self {
        let (identity, _) = watch::channel(None);
        Self {
            api,
            store,
            notifier,
            identity,
        }
    }

    /// Subscribe to identity changes. The receiver sees the current value
    /// immediately and every replacement after it.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<User>> {
        self.identity.subscribe()
    }

    /// Snapshot of the current identity.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.identity.borrow().clone()
    }

    /// Whether the current identity is an admin. Anonymous is not.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.identity
            .borrow()
            .as_ref()
            .is_some_and(User::is_admin)
    }

    /// The durable local store (token + wishlist).
    #[must_use]
    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    // ─────────────────────────────────────────────────────────────────────
    // Operations
    // ─────────────────────────────────────────────────────────────────────

    /// Resume a stored session, if there is one.
    ///
    /// Installs the stored token and exchanges it for an identity. When the
    /// server no longer accepts the token it is discarded and the session
    /// stays anonymous; that is a normal startup path, not an error.
    pub async fn check_auth(&self) {
        let Some(token) = self.store.token() else {
            return;
        };

        self.api.install_token(token);
        match self.api.current_user().await {
            Ok(user) => {
                self.identity.send_replace(Some(user));
            }
            Err(error) => {
                tracing::warn!(%error, "stored token no longer valid, discarding");
                self.api.clear_token();
                self.discard_stored_token();
                self.identity.send_replace(None);
            }
        }
    }

    /// Log in. Returns whether the session is now authenticated.
    pub async fn login(&self, username: &str, password: &str) -> bool {
        match self.api.login(username, password).await {
            Ok(response) => {
                self.persist_token(&response.token);
                self.notifier.notify(Notice::info(
                    "Welcome back!",
                    format!("Logged in as {}", response.user.role),
                ));
                self.identity.send_replace(Some(response.user));
                true
            }
            Err(error) => {
                self.notifier
                    .notify(Notice::error("Login failed", error.to_string()));
                false
            }
        }
    }

    /// Create an account and log in as it. Returns whether the session is
    /// now authenticated.
    pub async fn signup(&self, username: &str, email: &str, password: &str) -> bool {
        match self.api.signup(username, email, password).await {
            Ok(response) => {
                self.persist_token(&response.token);
                self.notifier
                    .notify(Notice::info("Account created!", "Welcome to our store"));
                self.identity.send_replace(Some(response.user));
                true
            }
            Err(error) => {
                self.notifier
                    .notify(Notice::error("Signup failed", error.to_string()));
                false
            }
        }
    }

    /// Log out. The server call is best-effort; the local session always
    /// ends, and the logout notice is always shown.
    pub async fn logout(&self) {
        if let Err(error) = self.api.logout().await {
            tracing::warn!(%error, "logout request failed");
        }
        self.discard_stored_token();
        self.identity.send_replace(None);
        self.notifier
            .notify(Notice::info("Logged out", "See you soon!"));
    }

    // ─────────────────────────────────────────────────────────────────────
    // Token persistence
    // ─────────────────────────────────────────────────────────────────────

    // A token that cannot be persisted still authenticates this process,
    // so store failures degrade to a warning rather than failing the login.
    fn persist_token(&self, token: &SecretString) {
        if let Err(error) = self.store.set_token(token) {
            tracing::warn!(%error, "failed to persist bearer token");
        }
    }

    fn discard_stored_token(&self) {
        if let Err(error) = self.store.clear_token() {
            tracing::warn!(%error, "failed to clear stored bearer token");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use reqwest::StatusCode;

    use orchard_core::{Role, UserId};

    use super::*;
    use crate::notify::NoticeLog;

    fn user(role: Role) -> User {
        User {
            id: UserId::new("u1"),
            username: "farida".to_owned(),
            email: "farida@example.com".to_owned(),
            role,
            created_at: None,
        }
    }

    /// In-memory stand-in for the auth endpoints.
    struct FakeAuth {
        user: User,
        accept_credentials: bool,
        accept_token: bool,
        logout_fails: bool,
        installed: Mutex<Option<String>>,
    }

    impl FakeAuth {
        fn accepting(user: User) -> Self {
            Self {
                user,
                accept_credentials: true,
                accept_token: true,
                logout_fails: false,
                installed: Mutex::new(None),
            }
        }

        fn rejecting() -> Self {
            Self {
                accept_credentials: false,
                accept_token: false,
                ..Self::accepting(user(Role::Buyer))
            }
        }

        fn has_token(&self) -> bool {
            self.installed.lock().unwrap().is_some()
        }

        fn unauthorized() -> ApiError {
            ApiError::Api {
                status: StatusCode::UNAUTHORIZED,
                message: "Invalid credentials".to_owned(),
            }
        }
    }

    impl AuthApi for &FakeAuth {
        fn install_token(&self, token: SecretString) {
            use secrecy::ExposeSecret;
            *self.installed.lock().unwrap() = Some(token.expose_secret().to_owned());
        }

        fn clear_token(&self) {
            *self.installed.lock().unwrap() = None;
        }

        async fn login(&self, _username: &str, _password: &str) -> Result<AuthResponse, ApiError> {
            if self.accept_credentials {
                AuthApi::install_token(self, SecretString::from("fake-token"));
                Ok(AuthResponse {
                    token: SecretString::from("fake-token"),
                    user: self.user.clone(),
                })
            } else {
                Err(FakeAuth::unauthorized())
            }
        }

        async fn signup(
            &self,
            username: &str,
            _email: &str,
            password: &str,
        ) -> Result<AuthResponse, ApiError> {
            self.login(username, password).await
        }

        async fn current_user(&self) -> Result<User, ApiError> {
            if self.accept_token && self.has_token() {
                Ok(self.user.clone())
            } else {
                Err(FakeAuth::unauthorized())
            }
        }

        async fn logout(&self) -> Result<(), ApiError> {
            AuthApi::clear_token(self);
            if self.logout_fails {
                Err(FakeAuth::unauthorized())
            } else {
                Ok(())
            }
        }
    }

    fn temp_store() -> LocalStore {
        let path = std::env::temp_dir()
            .join("orchard-session-tests")
            .join(format!("{}.json", uuid::Uuid::new_v4()));
        LocalStore::open(path).unwrap()
    }

    #[tokio::test]
    async fn test_login_sets_identity_and_persists_token() {
        let api = FakeAuth::accepting(user(Role::Buyer));
        let log = NoticeLog::new();
        let session = Session::new(&api, temp_store(), log.clone());

        assert!(session.login("farida", "hunter2").await);
        assert_eq!(session.current_user().unwrap().username, "farida");
        assert!(!session.is_admin());
        assert!(session.store().token().is_some());
        assert!(log.contains_title("Welcome back!"));
    }

    #[tokio::test]
    async fn test_failed_login_leaves_session_anonymous() {
        let api = FakeAuth::rejecting();
        let log = NoticeLog::new();
        let session = Session::new(&api, temp_store(), log.clone());

        assert!(!session.login("farida", "wrong").await);
        assert!(session.current_user().is_none());
        assert!(session.store().token().is_none());
        assert!(log.contains_title("Login failed"));
        let recorded = log.recorded();
        assert_eq!(recorded[0].body, "Invalid credentials");
    }

    #[tokio::test]
    async fn test_signup_notice_and_identity() {
        let api = FakeAuth::accepting(user(Role::Buyer));
        let log = NoticeLog::new();
        let session = Session::new(&api, temp_store(), log.clone());

        assert!(session.signup("farida", "farida@example.com", "hunter2").await);
        assert!(session.current_user().is_some());
        assert!(log.contains_title("Account created!"));
    }

    #[tokio::test]
    async fn test_check_auth_resumes_stored_session() {
        let api = FakeAuth::accepting(user(Role::Admin));
        let store = temp_store();
        store.set_token(&SecretString::from("stored")).unwrap();
        let session = Session::new(&api, store, NoticeLog::new());

        session.check_auth().await;
        assert!(session.is_admin());
    }

    #[tokio::test]
    async fn test_check_auth_discards_rejected_token() {
        let mut api = FakeAuth::accepting(user(Role::Buyer));
        api.accept_token = false;
        let store = temp_store();
        store.set_token(&SecretString::from("stale")).unwrap();
        let session = Session::new(&api, store, NoticeLog::new());

        session.check_auth().await;
        assert!(session.current_user().is_none());
        assert!(session.store().token().is_none());
        assert!(!api.has_token());
    }

    #[tokio::test]
    async fn test_check_auth_without_stored_token_is_a_no_op() {
        let api = FakeAuth::accepting(user(Role::Buyer));
        let session = Session::new(&api, temp_store(), NoticeLog::new());

        session.check_auth().await;
        assert!(session.current_user().is_none());
        assert!(!api.has_token());
    }

    #[tokio::test]
    async fn test_logout_is_fail_open() {
        let mut api = FakeAuth::accepting(user(Role::Buyer));
        api.logout_fails = true;
        let log = NoticeLog::new();
        let session = Session::new(&api, temp_store(), log.clone());

        assert!(session.login("farida", "hunter2").await);
        session.logout().await;

        assert!(session.current_user().is_none());
        assert!(session.store().token().is_none());
        assert!(log.contains_title("Logged out"));
    }

    #[tokio::test]
    async fn test_identity_changes_are_broadcast() {
        let api = FakeAuth::accepting(user(Role::Buyer));
        let session = Session::new(&api, temp_store(), NoticeLog::new());
        let mut watcher = session.subscribe();

        assert!(watcher.borrow().is_none());
        session.login("farida", "hunter2").await;
        watcher.changed().await.unwrap();
        assert!(watcher.borrow().is_some());
    }
}
