//! RemoteApi trait definition

use async_trait::async_trait;

use super::{ApiError, AuthProviders, LoginData, RemoteRules, User};

/// Everything the stores need from the remote account store.
///
/// One method per REST endpoint, credentials passed explicitly: the client
/// itself holds no session state, that belongs to the stores.
#[async_trait]
pub trait RemoteApi: Send + Sync {
    /// OAuth-code login
    async fn login_with_provider(&self, code: &str) -> Result<LoginData, ApiError>;

    /// Username/password login
    async fn login_with_credentials(&self, username: &str, password: &str) -> Result<LoginData, ApiError>;

    /// Local account registration
    async fn register(&self, username: &str, password: &str, name: Option<&str>) -> Result<(), ApiError>;

    /// Which login methods the server offers
    async fn auth_config(&self) -> Result<AuthProviders, ApiError>;

    /// Exchange the current token for a fresh one
    async fn refresh_token(&self, token: &str) -> Result<String, ApiError>;

    /// Fetch the profile of the token's owner
    async fn user_info(&self, token: &str) -> Result<User, ApiError>;

    /// Invalidate the session server-side
    async fn logout(&self, token: &str) -> Result<(), ApiError>;

    /// Fetch the account's stored prompt rules; `None` when nothing is stored
    async fn fetch_prompt_rules(&self, token: &str) -> Result<Option<RemoteRules>, ApiError>;

    /// Write the given rules (partial update, remote keys)
    async fn save_prompt_rules(&self, token: &str, rules: &RemoteRules) -> Result<(), ApiError>;

    /// Delete stored rules; `None` deletes all, `Some` only the given remote keys
    async fn delete_prompt_rules(&self, token: &str, keys: Option<&[String]>) -> Result<(), ApiError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockState {
        login: Option<LoginData>,
        register_error: Option<String>,
        remote_rules: Option<RemoteRules>,
        user: Option<User>,
        refreshed_token: Option<String>,
        fail_fetch: bool,
        fail_save: bool,
        fail_auth_config: bool,
        fetch_calls: usize,
        save_calls: usize,
        logout_calls: usize,
        saved: Vec<RemoteRules>,
        deleted: Vec<Option<Vec<String>>>,
    }

    /// Scriptable RemoteApi for unit tests, with call counters
    #[derive(Default)]
    pub struct MockApi {
        state: Mutex<MockState>,
    }

    impl MockApi {
        pub fn new() -> Self {
            Self::default()
        }

        /// Next logins succeed with this payload
        pub fn set_login(&self, data: LoginData) {
            self.state.lock().unwrap().login = Some(data);
        }

        /// Next registrations fail with this server message
        pub fn set_register_error(&self, message: &str) {
            self.state.lock().unwrap().register_error = Some(message.to_string());
        }

        /// What fetch_prompt_rules returns as data
        pub fn set_remote_rules(&self, rules: RemoteRules) {
            self.state.lock().unwrap().remote_rules = Some(rules);
        }

        pub fn set_user(&self, user: User) {
            self.state.lock().unwrap().user = Some(user);
        }

        pub fn set_refreshed_token(&self, token: &str) {
            self.state.lock().unwrap().refreshed_token = Some(token.to_string());
        }

        pub fn fail_fetch(&self, fail: bool) {
            self.state.lock().unwrap().fail_fetch = fail;
        }

        pub fn fail_save(&self, fail: bool) {
            self.state.lock().unwrap().fail_save = fail;
        }

        pub fn fail_auth_config(&self, fail: bool) {
            self.state.lock().unwrap().fail_auth_config = fail;
        }

        pub fn fetch_calls(&self) -> usize {
            self.state.lock().unwrap().fetch_calls
        }

        pub fn save_calls(&self) -> usize {
            self.state.lock().unwrap().save_calls
        }

        pub fn logout_calls(&self) -> usize {
            self.state.lock().unwrap().logout_calls
        }

        /// Every payload passed to save_prompt_rules
        pub fn saved(&self) -> Vec<RemoteRules> {
            self.state.lock().unwrap().saved.clone()
        }

        /// Every key set passed to delete_prompt_rules
        pub fn deleted(&self) -> Vec<Option<Vec<String>>> {
            self.state.lock().unwrap().deleted.clone()
        }
    }

    fn server_error(message: &str) -> ApiError {
        ApiError::Server {
            code: 500,
            message: message.to_string(),
        }
    }

    #[async_trait]
    impl RemoteApi for MockApi {
        async fn login_with_provider(&self, _code: &str) -> Result<LoginData, ApiError> {
            self.state
                .lock()
                .unwrap()
                .login
                .clone()
                .ok_or_else(|| server_error("login rejected"))
        }

        async fn login_with_credentials(&self, _username: &str, _password: &str) -> Result<LoginData, ApiError> {
            self.state
                .lock()
                .unwrap()
                .login
                .clone()
                .ok_or_else(|| server_error("login rejected"))
        }

        async fn register(&self, _username: &str, _password: &str, _name: Option<&str>) -> Result<(), ApiError> {
            match self.state.lock().unwrap().register_error.clone() {
                Some(message) => Err(ApiError::Server { code: 400, message }),
                None => Ok(()),
            }
        }

        async fn auth_config(&self) -> Result<AuthProviders, ApiError> {
            if self.state.lock().unwrap().fail_auth_config {
                return Err(server_error("auth config unavailable"));
            }
            Ok(AuthProviders {
                local_auth_enabled: true,
                registration_enabled: true,
                ..Default::default()
            })
        }

        async fn refresh_token(&self, _token: &str) -> Result<String, ApiError> {
            self.state
                .lock()
                .unwrap()
                .refreshed_token
                .clone()
                .ok_or_else(|| server_error("refresh rejected"))
        }

        async fn user_info(&self, _token: &str) -> Result<User, ApiError> {
            self.state
                .lock()
                .unwrap()
                .user
                .clone()
                .ok_or_else(|| server_error("no user"))
        }

        async fn logout(&self, _token: &str) -> Result<(), ApiError> {
            self.state.lock().unwrap().logout_calls += 1;
            Ok(())
        }

        async fn fetch_prompt_rules(&self, _token: &str) -> Result<Option<RemoteRules>, ApiError> {
            let mut state = self.state.lock().unwrap();
            state.fetch_calls += 1;
            if state.fail_fetch {
                return Err(server_error("fetch failed"));
            }
            Ok(state.remote_rules.clone())
        }

        async fn save_prompt_rules(&self, _token: &str, rules: &RemoteRules) -> Result<(), ApiError> {
            let mut state = self.state.lock().unwrap();
            state.save_calls += 1;
            if state.fail_save {
                return Err(server_error("save failed"));
            }
            state.saved.push(rules.clone());
            Ok(())
        }

        async fn delete_prompt_rules(&self, _token: &str, keys: Option<&[String]>) -> Result<(), ApiError> {
            self.state.lock().unwrap().deleted.push(keys.map(|k| k.to_vec()));
            Ok(())
        }
    }
}
