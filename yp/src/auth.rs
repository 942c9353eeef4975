//! AuthStore - session token and user profile lifecycle
//!
//! A thin, reactive-record style wrapper over the auth endpoints: token and
//! user live in memory and are mirrored into local storage on every change.
//! A successful login invalidates the config store's session-loaded guard
//! and re-pulls the account's prompt rules, concurrently with a reload of
//! the external settings collaborator.

use std::sync::Arc;

use async_trait::async_trait;
use eyre::Result;
use keystore::LocalStore;
use tracing::{debug, info, warn};

use crate::api::{ApiError, AuthProviders, LoginData, RemoteApi, User};
use crate::store::PromptConfigStore;
use crate::{KEY_TOKEN, KEY_USER, LOGOUT_CACHE_KEYS, LOGOUT_SWEEP_PREFIXES};

/// Seam for the out-of-scope settings store that also reloads after login
#[async_trait]
pub trait SettingsSync: Send {
    async fn force_reload(&mut self) -> Result<()>;
}

/// SettingsSync that does nothing, for contexts with no settings collaborator
pub struct NoopSettings;

#[async_trait]
impl SettingsSync for NoopSettings {
    async fn force_reload(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Result of a registration attempt. `error` is the server's message
/// verbatim when it sent one, else a generic transport message.
#[derive(Debug, Clone, PartialEq)]
pub struct RegisterOutcome {
    pub success: bool,
    pub error: Option<String>,
}

/// Session state: logged-out (neither), or logged-in (token and user).
/// A failed login leaves the state untouched.
pub struct AuthStore {
    storage: LocalStore,
    api: Arc<dyn RemoteApi>,
    token: Option<String>,
    user: Option<User>,
}

impl AuthStore {
    /// Build the store, restoring a persisted token if one exists
    pub fn open(storage: LocalStore, api: Arc<dyn RemoteApi>) -> Self {
        let token = storage.get(KEY_TOKEN).ok().flatten();
        Self {
            storage,
            api,
            token,
            user: None,
        }
    }

    /// Restore the persisted user record (corrupt data is discarded and
    /// removed); with a token but no restorable user, fetch the profile.
    pub async fn initialize(&mut self) {
        match self.storage.get_json::<User>(KEY_USER) {
            Ok(user) => self.user = user,
            Err(e) => {
                warn!(error = %e, "Discarding corrupt persisted user record");
                if let Err(e) = self.storage.remove(KEY_USER) {
                    warn!(error = %e, "Failed to remove corrupt user record");
                }
            }
        }

        if self.token.is_some() && self.user.is_none() {
            debug!("initialize: token without user, fetching profile");
            self.fetch_user_info().await;
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Logged in means token AND user present
    pub fn is_logged_in(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    /// Set the token in memory and mirror it to storage. Mirror failures
    /// are logged, not surfaced: storage is a best-effort cache here.
    fn set_token(&mut self, token: Option<String>) {
        let result = match &token {
            Some(t) => self.storage.set(KEY_TOKEN, t),
            None => self.storage.remove(KEY_TOKEN),
        };
        if let Err(e) = result {
            warn!(error = %e, "Failed to mirror token to storage");
        }
        self.token = token;
    }

    fn set_user(&mut self, user: Option<User>) {
        let result = match &user {
            Some(u) => self.storage.set_json(KEY_USER, u),
            None => self.storage.remove(KEY_USER),
        };
        if let Err(e) = result {
            warn!(error = %e, "Failed to mirror user record to storage");
        }
        self.user = user;
    }

    /// OAuth-code login. Returns success; every failure collapses to false.
    pub async fn login_with_provider(
        &mut self,
        code: &str,
        config: &mut PromptConfigStore,
        settings: &mut dyn SettingsSync,
    ) -> bool {
        let result = self.api.login_with_provider(code).await;
        self.complete_login(result, config, settings).await
    }

    /// Username/password login. Returns success; every failure collapses to
    /// false.
    pub async fn login_with_credentials(
        &mut self,
        username: &str,
        password: &str,
        config: &mut PromptConfigStore,
        settings: &mut dyn SettingsSync,
    ) -> bool {
        let result = self.api.login_with_credentials(username, password).await;
        self.complete_login(result, config, settings).await
    }

    /// Store credentials, then reload the two remote-backed stores. The
    /// reloads run concurrently, strictly after credential storage; either
    /// failure is logged without aborting the other.
    async fn complete_login(
        &mut self,
        result: Result<LoginData, ApiError>,
        config: &mut PromptConfigStore,
        settings: &mut dyn SettingsSync,
    ) -> bool {
        let data = match result {
            Ok(data) => data,
            Err(e) => {
                debug!(error = %e, "Login failed");
                return false;
            }
        };

        info!(username = %data.user.username, "Logged in");
        self.set_token(Some(data.token));
        self.set_user(Some(data.user));

        let (rules_result, settings_result) = tokio::join!(config.force_reload(), settings.force_reload());
        if let Err(e) = rules_result {
            warn!(error = %e, "Post-login prompt rule reload failed");
        }
        if let Err(e) = settings_result {
            warn!(error = %e, "Post-login settings reload failed");
        }

        true
    }

    /// Register a local account
    pub async fn register(&self, username: &str, password: &str, name: Option<&str>) -> RegisterOutcome {
        match self.api.register(username, password, name).await {
            Ok(()) => RegisterOutcome {
                success: true,
                error: None,
            },
            Err(e) => {
                debug!(error = %e, "Registration failed");
                let error = e
                    .server_message()
                    .map(str::to_string)
                    .unwrap_or_else(|| "Network error, please try again later".to_string());
                RegisterOutcome {
                    success: false,
                    error: Some(error),
                }
            }
        }
    }

    /// Which login methods the server offers; `None` on any failure
    pub async fn fetch_auth_config(&self) -> Option<AuthProviders> {
        match self.api.auth_config().await {
            Ok(providers) => Some(providers),
            Err(e) => {
                debug!(error = %e, "Failed to fetch auth config");
                None
            }
        }
    }

    /// Replace the token, keeping the user untouched. False without a
    /// current token or on any failure.
    pub async fn refresh_token(&mut self) -> bool {
        let Some(token) = self.token.clone() else {
            return false;
        };
        match self.api.refresh_token(&token).await {
            Ok(new_token) => {
                debug!("Token refreshed");
                self.set_token(Some(new_token));
                true
            }
            Err(e) => {
                debug!(error = %e, "Token refresh failed");
                false
            }
        }
    }

    /// Fetch and replace the user record. False without a token or on any
    /// failure.
    pub async fn fetch_user_info(&mut self) -> bool {
        let Some(token) = self.token.clone() else {
            return false;
        };
        match self.api.user_info(&token).await {
            Ok(user) => {
                self.set_user(Some(user));
                true
            }
            Err(e) => {
                debug!(error = %e, "Failed to fetch user info");
                false
            }
        }
    }

    /// Log out: best-effort server notification, then unconditionally clear
    /// the session and every application cache key.
    pub async fn logout(&mut self, config: &mut PromptConfigStore) {
        if let Some(token) = &self.token {
            if let Err(e) = self.api.logout(token).await {
                debug!(error = %e, "Logout request failed, clearing local state anyway");
            }
        }

        self.set_token(None);
        self.set_user(None);

        // Next login must re-pull the account's prompt rules
        config.invalidate_session();

        for key in LOGOUT_CACHE_KEYS {
            if let Err(e) = self.storage.remove(key) {
                warn!(key, error = %e, "Failed to remove cache key");
            }
        }

        // Sweep anything else under the reserved prefixes. Token and user
        // keys match the prefix but are already gone.
        match self.storage.keys() {
            Ok(keys) => {
                for key in keys {
                    let reserved = LOGOUT_SWEEP_PREFIXES.iter().any(|p| key.starts_with(p));
                    if reserved && key != KEY_TOKEN && key != KEY_USER {
                        if let Err(e) = self.storage.remove(&key) {
                            warn!(key, error = %e, "Failed to sweep storage key");
                        }
                    }
                }
            }
            Err(e) => warn!(error = %e, "Failed to list storage keys for sweep"),
        }

        info!("Logged out");
    }
}
