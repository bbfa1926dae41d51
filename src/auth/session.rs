//! Session lifecycle management.
//!
//! `SessionManager` owns the one session per process: it mediates credential
//! exchanges with the API, persists tokens through a `TokenStore`, and
//! publishes every state change on a watch channel. Consumers that need to
//! react to auth state (e.g. a navigation layer deciding which screens are
//! reachable) call `subscribe` and act on the snapshots they receive; the
//! manager never issues redirects itself.
//!
//! Per the error policy, nothing structured crosses this boundary: operations
//! report plain success/failure and the detail goes to the log.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::api::AuthApi;
use crate::models::{NewUser, TokenPair, UserProfile};

use super::store::{TokenStore, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_INFO_KEY};

/// Authentication state of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Startup check against persisted tokens has not finished yet
    Initializing,
    Anonymous,
    Authenticated,
    /// Transient: persisted keys are being cleared
    SigningOut,
}

/// Read-only snapshot of the current session.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub state: SessionState,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub profile: Option<UserProfile>,
}

impl Session {
    fn initializing() -> Self {
        Self {
            state: SessionState::Initializing,
            access_token: None,
            refresh_token: None,
            profile: None,
        }
    }

    fn anonymous() -> Self {
        Self {
            state: SessionState::Anonymous,
            access_token: None,
            refresh_token: None,
            profile: None,
        }
    }

    fn authenticated(pair: TokenPair, profile: Option<UserProfile>) -> Self {
        Self {
            state: SessionState::Authenticated,
            access_token: Some(pair.access_token),
            refresh_token: Some(pair.refresh_token),
            profile,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state == SessionState::Authenticated
    }

    /// True until the startup protocol has resolved the persisted tokens.
    pub fn is_loading(&self) -> bool {
        self.state == SessionState::Initializing
    }
}

/// Owns the session state and every mutation of it.
///
/// Collaborators are injected: any `AuthApi` for the network side, any
/// `TokenStore` for persistence. One instance per application.
pub struct SessionManager {
    api: Arc<dyn AuthApi>,
    store: Arc<dyn TokenStore>,
    tx: tokio::sync::watch::Sender<Session>,
}

impl SessionManager {
    pub fn new(api: Arc<dyn AuthApi>, store: Arc<dyn TokenStore>) -> Self {
        let (tx, _rx) = tokio::sync::watch::channel(Session::initializing());
        Self { api, store, tx }
    }

    /// Current session snapshot.
    pub fn current(&self) -> Session {
        self.tx.borrow().clone()
    }

    /// Subscribe to session state changes.
    /// The receiver yields a full snapshot on every transition.
    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<Session> {
        self.tx.subscribe()
    }

    /// Startup protocol: resolve persisted tokens into an initial state.
    ///
    /// With both tokens present, the access token is validated against the
    /// profile endpoint; on rejection a refresh exchange is attempted. If both
    /// fail the tokens are dead, so the persisted keys are purged rather than
    /// left around for the next startup to retry.
    pub async fn initialize(&self) {
        let access = self.read_key(ACCESS_TOKEN_KEY);
        let refresh = self.read_key(REFRESH_TOKEN_KEY);
        let profile = self.read_profile();

        let (access, refresh) = match (access, refresh) {
            (Some(access), Some(refresh)) => (access, refresh),
            _ => {
                debug!("No persisted session");
                self.publish(Session::anonymous());
                return;
            }
        };

        if self.validate_token(&access).await {
            info!("Persisted access token is valid");
            self.publish(Session::authenticated(
                TokenPair {
                    access_token: access,
                    refresh_token: refresh,
                },
                profile,
            ));
            return;
        }

        if let Some(pair) = self.refresh_tokens(&refresh).await {
            info!("Session restored via refresh exchange");
            self.publish(Session::authenticated(pair, profile));
            return;
        }

        warn!("Persisted tokens rejected and refresh failed, purging");
        self.clear_store();
        self.publish(Session::anonymous());
    }

    /// Exchange credentials for a session.
    ///
    /// On success all three keys are persisted and the state becomes
    /// `Authenticated`. On any failure nothing changes and `false` is
    /// returned; tokens written before a failed profile fetch are removed so
    /// storage only reflects complete sign-ins.
    pub async fn sign_in(&self, email: &str, password: &str) -> bool {
        let pair = match self.api.login(email, password).await {
            Ok(pair) => pair,
            Err(err) => {
                debug!(error = %err, "Login failed");
                return false;
            }
        };

        // Tokens are persisted before the profile fetch, so a published
        // Authenticated state always has a persisted copy behind it. A
        // half-written pair is never left behind.
        if let Err(err) = self.persist_tokens(&pair) {
            warn!(error = %err, "Failed to persist tokens");
            self.clear_store();
            return false;
        }

        let profile = match self.api.profile(&pair.access_token).await {
            Ok(profile) => profile,
            Err(err) => {
                debug!(error = %err, "Profile fetch after login failed");
                self.clear_store();
                return false;
            }
        };

        if let Err(err) = self.write_profile(&profile) {
            warn!(error = %err, "Failed to persist profile");
            self.clear_store();
            return false;
        }

        info!(email, "Signed in");
        self.publish(Session::authenticated(pair, Some(profile)));
        true
    }

    /// Register a new account, then sign in with the same credentials.
    ///
    /// Known asymmetry: if registration succeeds but the follow-up sign-in
    /// fails, this still returns `false` even though the account exists
    /// server-side. The caller retries sign-in explicitly.
    pub async fn sign_up(&self, name: &str, email: &str, password: &str) -> bool {
        let new_user = NewUser::new(name, email, password);

        if let Err(err) = self.api.register(&new_user).await {
            debug!(error = %err, "Registration failed");
            return false;
        }

        info!(email, "Account registered");
        self.sign_in(email, password).await
    }

    /// Clear the session. Idempotent; storage failures are logged, not
    /// surfaced.
    pub async fn sign_out(&self) {
        self.tx.send_modify(|session| session.state = SessionState::SigningOut);
        self.clear_store();
        info!("Signed out");
        self.publish(Session::anonymous());
    }

    /// Check a token against the profile endpoint. No state is touched.
    pub async fn validate_token(&self, token: &str) -> bool {
        self.api.profile(token).await.is_ok()
    }

    /// Exchange a refresh token for a new pair.
    /// The new pair is persisted on success; a failed exchange leaves the
    /// persisted state as it was. The pair is only returned once its
    /// persisted copy exists, so callers never publish tokens that storage
    /// does not hold; if the writes fail partway, the keys are cleared.
    pub async fn refresh_tokens(&self, old_refresh: &str) -> Option<TokenPair> {
        match self.api.refresh(old_refresh).await {
            Ok(pair) => {
                if let Err(err) = self.persist_tokens(&pair) {
                    warn!(error = %err, "Failed to persist refreshed tokens");
                    self.clear_store();
                    return None;
                }
                Some(pair)
            }
            Err(err) => {
                debug!(error = %err, "Refresh exchange failed");
                None
            }
        }
    }

    fn publish(&self, session: Session) {
        self.tx.send_replace(session);
    }

    fn read_key(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(err) => {
                warn!(key, error = %err, "Failed to read persisted key");
                None
            }
        }
    }

    fn read_profile(&self) -> Option<UserProfile> {
        let raw = self.read_key(USER_INFO_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(profile) => Some(profile),
            Err(err) => {
                warn!(error = %err, "Persisted profile is corrupt, ignoring");
                None
            }
        }
    }

    fn persist_tokens(&self, pair: &TokenPair) -> anyhow::Result<()> {
        self.store.set(ACCESS_TOKEN_KEY, &pair.access_token)?;
        self.store.set(REFRESH_TOKEN_KEY, &pair.refresh_token)?;
        Ok(())
    }

    fn write_profile(&self, profile: &UserProfile) -> anyhow::Result<()> {
        let raw = serde_json::to_string(profile)?;
        self.store.set(USER_INFO_KEY, &raw)
    }

    fn clear_store(&self) {
        for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_INFO_KEY] {
            if let Err(err) = self.store.remove(key) {
                warn!(key, error = %err, "Failed to remove persisted key");
            }
        }
    }
}
