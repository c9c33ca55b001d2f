//! License key records and operation results

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Full key mapping, API key -> record
pub type KeyMap = BTreeMap<String, KeyRecord>;

/// State of one issued API key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyRecord {
    username: String,
    #[serde(default)]
    hwid: Option<String>,
    #[serde(default, deserialize_with = "deserialize_expires_at")]
    expires_at: Option<i64>,
}

impl KeyRecord {
    /// Create a new, unbound record
    pub fn new(username: impl Into<String>, expires_at: Option<i64>) -> Self {
        Self {
            username: username.into(),
            hwid: None,
            expires_at,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn hwid(&self) -> Option<&str> {
        self.hwid.as_deref()
    }

    pub fn expires_at(&self) -> Option<i64> {
        self.expires_at
    }

    pub fn is_bound(&self) -> bool {
        self.hwid.is_some()
    }

    /// Lifetime keys never expire; others expire once `now_ms` passes the deadline
    pub fn is_expired(&self, now_ms: i64) -> bool {
        matches!(self.expires_at, Some(expires_at) if expires_at < now_ms)
    }

    /// Whether `hwid` is acceptable for this record
    ///
    /// Unbound records accept any device.
    pub fn accepts(&self, hwid: &str) -> bool {
        self.hwid.as_deref().is_none_or(|bound| bound == hwid)
    }

    /// Bind the record to a device; a bound record keeps its device
    pub fn bind(&mut self, hwid: impl Into<String>) -> bool {
        if self.hwid.is_some() {
            return false;
        }

        self.hwid = Some(hwid.into());
        true
    }

    pub fn reset_hwid(&mut self) {
        self.hwid = None;
    }
}

/// Accepts integers, floats and numeric strings, as older snapshots may hold any of them
fn deserialize_expires_at<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawExpiry {
        Int(i64),
        Float(f64),
        Text(String),
    }

    match Option::<RawExpiry>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawExpiry::Int(value)) => Ok(Some(value)),
        Some(RawExpiry::Float(value)) if value.is_finite() => Ok(Some(value as i64)),
        Some(RawExpiry::Float(value)) => {
            Err(D::Error::custom(format!("invalid expiresAt value: {}", value)))
        }
        Some(RawExpiry::Text(text)) => text
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid expiresAt value: {:?}", text))),
    }
}

/// Result of issuing a key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedKey {
    pub api_key: String,
    pub expires_at: Option<i64>,
}

/// Result of a successful login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub expires_at: Option<i64>,
    /// True when this login bound the key to the supplied device
    pub bound: bool,
}

/// One row of a key listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEntry {
    pub key: String,
    pub username: String,
    pub hwid: Option<String>,
    pub expires_at: Option<i64>,
}

impl KeyEntry {
    pub fn from_record(key: &str, record: &KeyRecord) -> Self {
        Self {
            key: key.to_string(),
            username: record.username.clone(),
            hwid: record.hwid.clone(),
            expires_at: record.expires_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_is_unbound() {
        let record = KeyRecord::new("alice", None);
        assert_eq!(record.username(), "alice");
        assert!(!record.is_bound());
        assert!(record.accepts("any-device"));
    }

    #[test]
    fn test_bind_only_once() {
        let mut record = KeyRecord::new("alice", None);

        assert!(record.bind("A"));
        assert!(!record.bind("B"));
        assert_eq!(record.hwid(), Some("A"));
        assert!(record.accepts("A"));
        assert!(!record.accepts("B"));

        record.reset_hwid();
        assert!(record.bind("B"));
        assert_eq!(record.hwid(), Some("B"));
    }

    #[test]
    fn test_expiry() {
        let lifetime = KeyRecord::new("alice", None);
        assert!(!lifetime.is_expired(i64::MAX));

        let limited = KeyRecord::new("bob", Some(1_000));
        assert!(!limited.is_expired(999));
        assert!(!limited.is_expired(1_000));
        assert!(limited.is_expired(1_001));
    }

    #[test]
    fn test_serialized_field_order() {
        let mut record = KeyRecord::new("alice", Some(42));
        record.bind("A");

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"username":"alice","hwid":"A","expiresAt":42}"#);
    }

    #[test]
    fn test_deserialize_lenient_expiry() {
        let from_float: KeyRecord =
            serde_json::from_str(r#"{"username":"a","hwid":null,"expiresAt":1700000000000.0}"#)
                .unwrap();
        assert_eq!(from_float.expires_at(), Some(1_700_000_000_000));

        let from_text: KeyRecord =
            serde_json::from_str(r#"{"username":"a","hwid":null,"expiresAt":"1700000000000"}"#)
                .unwrap();
        assert_eq!(from_text.expires_at(), Some(1_700_000_000_000));

        let missing: KeyRecord = serde_json::from_str(r#"{"username":"a"}"#).unwrap();
        assert_eq!(missing.expires_at(), None);
        assert_eq!(missing.hwid(), None);
    }

    #[test]
    fn test_deserialize_rejects_bad_expiry() {
        let result = serde_json::from_str::<KeyRecord>(
            r#"{"username":"a","hwid":null,"expiresAt":"tomorrow"}"#,
        );
        assert!(result.is_err());

        let result =
            serde_json::from_str::<KeyRecord>(r#"{"username":"a","expiresAt":[1,2]}"#);
        assert!(result.is_err());
    }
}
