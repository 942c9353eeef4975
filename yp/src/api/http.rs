//! reqwest-backed RemoteApi implementation

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use super::{ApiError, AuthProviders, Envelope, LoginData, RemoteApi, RemoteRules, TokenData, User};
use crate::config::Config;

/// HTTP client for the account store REST API
pub struct HttpApi {
    http: Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(timeout).build().map_err(ApiError::Network)?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client from application configuration
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Self::new(&config.base_url, Duration::from_millis(config.timeout_ms))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Registration body; the display name is omitted entirely when absent,
    /// not sent as null
    fn register_body(username: &str, password: &str, name: Option<&str>) -> serde_json::Value {
        let mut body = serde_json::json!({ "username": username, "password": password });
        if let Some(name) = name {
            body["name"] = serde_json::Value::String(name.to_string());
        }
        body
    }

    /// Send a prepared request and decode the response envelope.
    ///
    /// The server also wraps HTTP-level errors in the envelope, so decoding
    /// is attempted regardless of status; an undecodable non-2xx body is
    /// reported as a server error with the status.
    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<Envelope<T>, ApiError> {
        let response = request.send().await.map_err(ApiError::Network)?;
        let status = response.status();
        debug!(%status, "send: response received");
        match response.json::<Envelope<T>>().await {
            Ok(envelope) => Ok(envelope),
            Err(e) if status.is_success() => Err(ApiError::InvalidResponse(e.to_string())),
            Err(_) => Err(ApiError::Server {
                code: status.as_u16() as i64,
                message: status.to_string(),
            }),
        }
    }
}

#[async_trait]
impl RemoteApi for HttpApi {
    async fn login_with_provider(&self, code: &str) -> Result<LoginData, ApiError> {
        debug!("login_with_provider: called");
        let request = self
            .http
            .post(self.url("/api/auth/linux-do/login"))
            .json(&serde_json::json!({ "code": code }));
        self.send::<LoginData>(request).await?.into_data()
    }

    async fn login_with_credentials(&self, username: &str, password: &str) -> Result<LoginData, ApiError> {
        debug!(username, "login_with_credentials: called");
        let request = self
            .http
            .post(self.url("/api/auth/local/login"))
            .json(&serde_json::json!({ "username": username, "password": password }));
        self.send::<LoginData>(request).await?.into_data()
    }

    async fn register(&self, username: &str, password: &str, name: Option<&str>) -> Result<(), ApiError> {
        debug!(username, "register: called");
        let request = self
            .http
            .post(self.url("/api/auth/local/register"))
            .json(&Self::register_body(username, password, name));
        self.send::<serde_json::Value>(request).await?.require_success()
    }

    async fn auth_config(&self) -> Result<AuthProviders, ApiError> {
        debug!("auth_config: called");
        let request = self.http.get(self.url("/api/auth/config"));
        self.send::<AuthProviders>(request).await?.into_data()
    }

    async fn refresh_token(&self, token: &str) -> Result<String, ApiError> {
        debug!("refresh_token: called");
        let request = self.http.post(self.url("/api/auth/refresh")).bearer_auth(token);
        Ok(self.send::<TokenData>(request).await?.into_data()?.token)
    }

    async fn user_info(&self, token: &str) -> Result<User, ApiError> {
        debug!("user_info: called");
        let request = self.http.get(self.url("/api/auth/userinfo")).bearer_auth(token);
        self.send::<User>(request).await?.into_data()
    }

    async fn logout(&self, token: &str) -> Result<(), ApiError> {
        debug!("logout: called");
        let request = self.http.post(self.url("/api/auth/logout")).bearer_auth(token);
        self.send::<serde_json::Value>(request).await?.require_success()
    }

    async fn fetch_prompt_rules(&self, token: &str) -> Result<Option<RemoteRules>, ApiError> {
        debug!("fetch_prompt_rules: called");
        let request = self.http.get(self.url("/api/user-settings/prompt-rules")).bearer_auth(token);
        self.send::<RemoteRules>(request).await?.into_optional_data()
    }

    async fn save_prompt_rules(&self, token: &str, rules: &RemoteRules) -> Result<(), ApiError> {
        debug!(field_count = rules.len(), "save_prompt_rules: called");
        let request = self
            .http
            .post(self.url("/api/user-settings/prompt-rules"))
            .bearer_auth(token)
            .json(rules);
        self.send::<serde_json::Value>(request).await?.require_success()
    }

    async fn delete_prompt_rules(&self, token: &str, keys: Option<&[String]>) -> Result<(), ApiError> {
        debug!(?keys, "delete_prompt_rules: called");
        let body = match keys {
            Some(keys) => serde_json::json!({ "keys": keys }),
            None => serde_json::json!({}),
        };
        let request = self
            .http
            .delete(self.url("/api/user-settings/prompt-rules"))
            .bearer_auth(token)
            .json(&body);
        self.send::<serde_json::Value>(request).await?.require_success()
    }
}
