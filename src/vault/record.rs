//! The persisted vault record.
//!
//! A vault file is a single JSON document:
//!
//! ```text
//! {
//!   "version": "1.0",
//!   "kdfParams": { "salt": <32 hex>, "iterations": 3, "memory": 65536, "parallelism": 4 },
//!   "authHash": <64 hex>,
//!   "iv": <24 hex>,
//!   "tag": <32 hex>,
//!   "encryptedData": <hex>
//! }
//! ```
//!
//! Field names are fixed for compatibility with existing vault files.
//! Every binary field is lower-case hex.  The record never carries
//! plaintext or the derived key.

use serde::{Deserialize, Serialize};

use crate::crypto::auth::FINGERPRINT_LEN;
use crate::crypto::encryption::{IV_LEN, TAG_LEN};
use crate::crypto::kdf::{Argon2Params, SALT_LEN};
use crate::errors::{Result, SignumError};

/// Record format version written by this build.
pub const CURRENT_VERSION: &str = "1.0";

/// Versions this build can open.
const SUPPORTED_VERSIONS: &[&str] = &[CURRENT_VERSION];

/// Salt plus the Argon2id cost knobs that were used with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdfParams {
    #[serde(serialize_with = "hex_encode", deserialize_with = "hex_decode")]
    pub salt: [u8; SALT_LEN],
    pub iterations: u32,
    /// Memory cost in KiB.
    pub memory: u32,
    pub parallelism: u32,
}

impl KdfParams {
    /// Pair a salt with a set of cost parameters.
    pub fn new(salt: [u8; SALT_LEN], params: &Argon2Params) -> Self {
        Self {
            salt,
            iterations: params.iterations,
            memory: params.memory_kib,
            parallelism: params.parallelism,
        }
    }

    /// The cost parameters without the salt.
    pub fn argon2_params(&self) -> Argon2Params {
        Argon2Params {
            memory_kib: self.memory,
            iterations: self.iterations,
            parallelism: self.parallelism,
        }
    }
}

/// One sealed vault, exactly as it is written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultRecord {
    pub version: String,
    pub kdf_params: KdfParams,
    #[serde(serialize_with = "hex_encode", deserialize_with = "hex_decode")]
    pub auth_hash: [u8; FINGERPRINT_LEN],
    #[serde(serialize_with = "hex_encode", deserialize_with = "hex_decode")]
    pub iv: [u8; IV_LEN],
    #[serde(serialize_with = "hex_encode", deserialize_with = "hex_decode")]
    pub tag: [u8; TAG_LEN],
    #[serde(
        rename = "encryptedData",
        serialize_with = "hex_encode",
        deserialize_with = "hex_decode_vec"
    )]
    pub ciphertext: Vec<u8>,
}

impl VaultRecord {
    /// Parse a record from JSON text and check that this build can open it.
    pub fn from_json(json: &str) -> Result<Self> {
        let record: VaultRecord = serde_json::from_str(json)
            .map_err(|e| SignumError::InvalidVaultFormat(format!("record JSON: {e}")))?;
        record.validate()?;
        Ok(record)
    }

    /// Serialize the record as pretty-printed JSON (2-space indent).
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SignumError::SerializationError(format!("record: {e}")))
    }

    /// Reject records written by an unknown format version.
    ///
    /// Binary field lengths are already enforced by deserialization.
    pub fn validate(&self) -> Result<()> {
        if !SUPPORTED_VERSIONS.contains(&self.version.as_str()) {
            return Err(SignumError::InvalidVaultFormat(format!(
                "unsupported version {:?}, expected {CURRENT_VERSION:?}",
                self.version
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Serde helpers for hex-encoded byte fields
// ---------------------------------------------------------------------------

fn hex_encode<S, T>(data: T, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
    T: AsRef<[u8]>,
{
    serializer.serialize_str(&hex::encode(data))
}

fn hex_decode_vec<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    hex::decode(&s).map_err(serde::de::Error::custom)
}

fn hex_decode<'de, D, const N: usize>(deserializer: D) -> std::result::Result<[u8; N], D::Error>
where
    D: serde::Deserializer<'de>,
{
    let bytes = hex_decode_vec(deserializer)?;
    let len = bytes.len();
    bytes
        .try_into()
        .map_err(|_| serde::de::Error::custom(format!("expected {N} bytes, got {len}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> VaultRecord {
        VaultRecord {
            version: CURRENT_VERSION.to_string(),
            kdf_params: KdfParams::new([0x11; SALT_LEN], &Argon2Params::default()),
            auth_hash: [0xAB; FINGERPRINT_LEN],
            iv: [0x01; IV_LEN],
            tag: [0xFE; TAG_LEN],
            ciphertext: vec![0xDE, 0xAD, 0xBE, 0xEF],
        }
    }

    #[test]
    fn serializes_with_fixed_field_names() {
        let json: serde_json::Value = serde_json::from_str(&sample().to_json().unwrap()).unwrap();

        assert_eq!(json["version"], "1.0");
        assert_eq!(json["kdfParams"]["salt"], "11".repeat(SALT_LEN));
        assert_eq!(json["kdfParams"]["iterations"], 3);
        assert_eq!(json["kdfParams"]["memory"], 65_536);
        assert_eq!(json["kdfParams"]["parallelism"], 4);
        assert_eq!(json["authHash"], "ab".repeat(FINGERPRINT_LEN));
        assert_eq!(json["iv"].as_str().unwrap().len(), 24);
        assert_eq!(json["tag"], "fe".repeat(TAG_LEN));
        assert_eq!(json["encryptedData"], "deadbeef");
    }

    #[test]
    fn parses_its_own_output() {
        let record = sample();
        let parsed = VaultRecord::from_json(&record.to_json().unwrap()).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn rejects_wrong_iv_length() {
        let json = sample()
            .to_json()
            .unwrap()
            .replace(&"01".repeat(IV_LEN), "0101");
        let err = VaultRecord::from_json(&json).unwrap_err();
        assert!(matches!(err, SignumError::InvalidVaultFormat(_)));
    }

    #[test]
    fn rejects_non_hex_ciphertext() {
        let json = sample().to_json().unwrap().replace("deadbeef", "not-hex!");
        assert!(VaultRecord::from_json(&json).is_err());
    }

    #[test]
    fn rejects_unknown_version() {
        let json = sample().to_json().unwrap().replace("\"1.0\"", "\"9.9\"");
        let err = VaultRecord::from_json(&json).unwrap_err();
        assert!(err.to_string().contains("unsupported version"));
    }

    #[test]
    fn rejects_missing_fields() {
        assert!(VaultRecord::from_json(r#"{"version":"1.0"}"#).is_err());
    }
}
