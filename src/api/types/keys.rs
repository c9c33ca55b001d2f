//! Wire types for the key endpoints
//!
//! Request fields are optional so a missing field reaches the key store as
//! an empty value and is rejected there with the usual error mapping.

use serde::{Deserialize, Serialize};

use crate::domain::{IssuedKey, KeyEntry, LoginOutcome};

/// POST /register
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub api_key: String,
    pub expires_at: Option<i64>,
}

impl From<IssuedKey> for RegisterResponse {
    fn from(issued: IssuedKey) -> Self {
        Self {
            api_key: issued.api_key,
            expires_at: issued.expires_at,
        }
    }
}

/// POST /login
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub hwid: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    pub expires_at: Option<i64>,
}

impl From<LoginOutcome> for LoginResponse {
    fn from(outcome: LoginOutcome) -> Self {
        Self {
            success: true,
            expires_at: outcome.expires_at,
        }
    }
}

/// Body of POST /hwid-reset and DELETE /key
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyRequest {
    #[serde(default)]
    pub api_key: Option<String>,
}

/// One element of GET /list
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyEntryResponse {
    pub key: String,
    pub username: String,
    pub hwid: Option<String>,
    pub expires_at: Option<i64>,
}

impl From<KeyEntry> for KeyEntryResponse {
    fn from(entry: KeyEntry) -> Self {
        Self {
            key: entry.key,
            username: entry.username,
            hwid: entry.hwid,
            expires_at: entry.expires_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_camel_case() {
        let request: LoginRequest =
            serde_json::from_str(r#"{"apiKey":"abc","hwid":"H1"}"#).unwrap();

        assert_eq!(request.api_key.as_deref(), Some("abc"));
        assert_eq!(request.hwid.as_deref(), Some("H1"));
    }

    #[test]
    fn test_missing_fields_default_to_none() {
        let request: RegisterRequest = serde_json::from_str("{}").unwrap();
        assert!(request.username.is_none());
        assert!(request.time.is_none());

        let request: ApiKeyRequest = serde_json::from_str(r#"{"apiKey":null}"#).unwrap();
        assert!(request.api_key.is_none());
    }

    #[test]
    fn test_lifetime_expiry_serializes_as_null() {
        let response = RegisterResponse::from(IssuedKey {
            api_key: "k".to_string(),
            expires_at: None,
        });

        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"apiKey":"k","expiresAt":null}"#);
    }

    #[test]
    fn test_list_entry_shape() {
        let entry = KeyEntryResponse::from(KeyEntry {
            key: "k".to_string(),
            username: "alice".to_string(),
            hwid: Some("H1".to_string()),
            expires_at: Some(42),
        });

        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(
            json,
            r#"{"key":"k","username":"alice","hwid":"H1","expiresAt":42}"#
        );
    }
}
