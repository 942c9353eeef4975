//! Wire types for the account store API

use serde::{Deserialize, Serialize};

use super::ApiError;

/// Prompt rules as the remote store sees them: remote (snake_case) keys to
/// JSON values. Non-string or empty values are treated as absent by readers.
pub type RemoteRules = serde_json::Map<String, serde_json::Value>;

/// The uniform `{code, message?, data?}` response envelope
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    pub code: i64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    fn check_code(code: i64, message: Option<String>) -> Result<(), ApiError> {
        if code == 200 {
            Ok(())
        } else {
            Err(ApiError::Server {
                code,
                message: message.unwrap_or_else(|| "Request failed".to_string()),
            })
        }
    }

    /// Success with a required payload
    pub fn into_data(self) -> Result<T, ApiError> {
        Self::check_code(self.code, self.message)?;
        self.data
            .ok_or_else(|| ApiError::InvalidResponse("Response missing data".to_string()))
    }

    /// Success where the payload is optional (e.g. no stored rules yet)
    pub fn into_optional_data(self) -> Result<Option<T>, ApiError> {
        Self::check_code(self.code, self.message)?;
        Ok(self.data)
    }

    /// Success where only the code matters
    pub fn require_success(self) -> Result<(), ApiError> {
        Self::check_code(self.code, self.message)
    }
}

/// User profile record as returned by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub name: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub email: Option<String>,
    /// "linux_do" or "local"
    pub auth_type: String,
    #[serde(default)]
    pub is_admin: i64,
    /// Opaque server-formatted timestamp
    #[serde(default)]
    pub last_login_time: Option<String>,
}

/// Payload of a successful login
#[derive(Debug, Clone, Deserialize)]
pub struct LoginData {
    pub token: String,
    pub user: User,
}

/// Payload of a token refresh
#[derive(Debug, Clone, Deserialize)]
pub struct TokenData {
    pub token: String,
}

/// Which authentication methods the server has enabled
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthProviders {
    pub linux_do_enabled: bool,
    pub linux_do_client_id: String,
    pub linux_do_redirect_uri: String,
    pub local_auth_enabled: bool,
    pub registration_enabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_success_with_data() {
        let env: Envelope<LoginData> = serde_json::from_str(
            r#"{"code":200,"data":{"token":"t1","user":{"id":1,"username":"u","name":"U","auth_type":"local"}}}"#,
        )
        .unwrap();
        let data = env.into_data().unwrap();
        assert_eq!(data.token, "t1");
        assert_eq!(data.user.username, "u");
        assert_eq!(data.user.is_admin, 0);
        assert_eq!(data.user.email, None);
    }

    #[test]
    fn test_envelope_error_carries_server_message() {
        let env: Envelope<TokenData> = serde_json::from_str(r#"{"code":401,"message":"Invalid credentials"}"#).unwrap();
        match env.into_data() {
            Err(ApiError::Server { code, message }) => {
                assert_eq!(code, 401);
                assert_eq!(message, "Invalid credentials");
            }
            other => panic!("expected server error, got {:?}", other.map(|d| d.token)),
        }
    }

    #[test]
    fn test_envelope_success_without_data() {
        let env: Envelope<RemoteRules> = serde_json::from_str(r#"{"code":200,"message":"No custom configuration"}"#).unwrap();
        assert!(env.into_optional_data().unwrap().is_none());
    }

    #[test]
    fn test_envelope_missing_required_data() {
        let env: Envelope<TokenData> = serde_json::from_str(r#"{"code":200}"#).unwrap();
        assert!(matches!(env.into_data(), Err(ApiError::InvalidResponse(_))));
    }
}
