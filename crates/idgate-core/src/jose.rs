//! JSON Web Key types.
//!
//! Minimal JWK model per RFC 7517: enough structure to fetch, store and
//! look up a client's published keys. Key material is carried as opaque
//! members; signature verification happens elsewhere.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The `kty` (key type) parameter, identifying the cryptographic algorithm
/// family used with the key.
///
/// Registered values: <https://www.iana.org/assignments/jose/jose.xhtml#web-key-types>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyType {
    /// Elliptic Curve.
    #[serde(rename = "EC")]
    Ec,
    /// RSA.
    #[serde(rename = "RSA")]
    Rsa,
    /// Octet sequence (symmetric keys).
    #[serde(rename = "oct")]
    Oct,
    /// Octet string key pairs (EdDSA).
    #[serde(rename = "OKP")]
    Okp,
}

impl KeyType {
    /// Returns the IANA-registered `kty` value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ec => "EC",
            Self::Rsa => "RSA",
            Self::Oct => "oct",
            Self::Okp => "OKP",
        }
    }
}

impl std::fmt::Display for KeyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single JSON Web Key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Jwk {
    /// Key type.
    pub kty: KeyType,

    /// Key identifier, unique within its set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,

    /// Intended use (`sig` or `enc`).
    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub key_use: Option<String>,

    /// Algorithm intended for this key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alg: Option<String>,

    /// Remaining key members (`n`, `e`, `crv`, `x`, `y`, ...), kept opaque.
    #[serde(flatten)]
    pub members: BTreeMap<String, serde_json::Value>,
}

/// A JSON Web Key Set.
///
/// A set is fetched and replaced as a whole; individual keys are never
/// mutated in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JwkSet {
    #[serde(default)]
    pub keys: Vec<Jwk>,
}

impl JwkSet {
    /// Returns `true` if the set contains no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Looks up a key by its `kid`.
    ///
    /// Returns `None` if the set is empty, the kid is blank, or no key
    /// matches.
    #[must_use]
    pub fn find_key(&self, kid: &str) -> Option<&Jwk> {
        if kid.trim().is_empty() {
            return None;
        }
        self.keys
            .iter()
            .find(|key| key.kid.as_deref() == Some(kid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_key(kid: &str, kty: KeyType) -> Jwk {
        Jwk {
            kty,
            kid: Some(kid.to_string()),
            key_use: Some("sig".to_string()),
            alg: None,
            members: BTreeMap::new(),
        }
    }

    #[test]
    fn test_key_type_strings() {
        assert_eq!(KeyType::Ec.as_str(), "EC");
        assert_eq!(KeyType::Rsa.as_str(), "RSA");
        assert_eq!(KeyType::Oct.as_str(), "oct");
        assert_eq!(KeyType::Okp.as_str(), "OKP");
    }

    #[test]
    fn test_find_key() {
        let set = JwkSet {
            keys: vec![make_key("key-1", KeyType::Rsa), make_key("key-2", KeyType::Ec)],
        };

        assert_eq!(set.find_key("key-2").unwrap().kty, KeyType::Ec);
        assert!(set.find_key("key-3").is_none());
    }

    #[test]
    fn test_find_key_blank_kid() {
        let set = JwkSet {
            keys: vec![make_key("key-1", KeyType::Rsa)],
        };
        assert!(set.find_key("").is_none());
        assert!(set.find_key("   ").is_none());
    }

    #[test]
    fn test_find_key_empty_set() {
        let set = JwkSet::default();
        assert!(set.is_empty());
        assert!(set.find_key("key-1").is_none());
    }

    #[test]
    fn test_jwk_deserialization_keeps_members() {
        let json = r#"{
            "kty": "RSA",
            "kid": "key-1",
            "use": "sig",
            "alg": "RS256",
            "n": "0vx7agoebGcQSuuPiLJXZptN",
            "e": "AQAB"
        }"#;

        let jwk: Jwk = serde_json::from_str(json).unwrap();
        assert_eq!(jwk.kty, KeyType::Rsa);
        assert_eq!(jwk.kid.as_deref(), Some("key-1"));
        assert_eq!(jwk.members.get("e").unwrap(), "AQAB");
    }

    #[test]
    fn test_jwk_set_deserialization() {
        let json = r#"{"keys": [{"kty": "EC", "kid": "ec-1", "crv": "P-256"}]}"#;
        let set: JwkSet = serde_json::from_str(json).unwrap();
        assert_eq!(set.keys.len(), 1);
        assert_eq!(set.keys[0].kty, KeyType::Ec);

        let empty: JwkSet = serde_json::from_str(r#"{"keys": []}"#).unwrap();
        assert!(empty.is_empty());
    }
}
