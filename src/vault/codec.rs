//! Sealing and unsealing vault payloads.
//!
//! `seal` runs the whole pipeline: fresh salt, Argon2id, fingerprint,
//! AES-256-GCM under a fresh IV.  Opening is split in two so a wrong
//! password can be rejected by the fingerprint alone:
//!
//! 1. `verify` re-derives the key with the record's own KDF params and
//!    compares its fingerprint with `authHash`.
//! 2. `unseal` decrypts with that key and normalizes the payload.

use zeroize::Zeroize;

use crate::crypto::encryption;
use crate::crypto::kdf::{derive_key, generate_salt, Argon2Params};
use crate::crypto::keys::DerivedKey;
use crate::crypto::matches_fingerprint;
use crate::errors::{Result, SignumError};

use super::payload::{normalize, Payload};
use super::record::{KdfParams, VaultRecord, CURRENT_VERSION};

/// Encrypt `payload` under `password` into a brand-new record.
///
/// Every call draws a new salt and IV, so sealing the same payload twice
/// never produces the same record.
pub fn seal(payload: &Payload, password: &[u8], params: &Argon2Params) -> Result<VaultRecord> {
    params.check_sealing_floor()?;
    let salt = generate_salt();
    let key = DerivedKey::new(derive_key(password, &salt, params)?);
    let auth_hash = key.fingerprint();

    let mut plaintext = serde_json::to_vec(payload)
        .map_err(|e| SignumError::SerializationError(format!("payload: {e}")))?;
    let sealed = encryption::seal(&plaintext, key.as_bytes());
    plaintext.zeroize();
    let sealed = sealed?;

    Ok(VaultRecord {
        version: CURRENT_VERSION.to_string(),
        kdf_params: KdfParams::new(salt, params),
        auth_hash,
        iv: sealed.iv,
        tag: sealed.tag,
        ciphertext: sealed.ciphertext,
    })
}

/// Check `password` against a record.
///
/// Returns the derived key on a match and `None` otherwise.  A wrong
/// password is an ordinary outcome, not an error.  Derivation always
/// uses the params stored in the record, never the current defaults.
pub fn verify(password: &[u8], record: &VaultRecord) -> Option<DerivedKey> {
    let params = record.kdf_params.argon2_params();
    let key = match derive_key(password, &record.kdf_params.salt, &params) {
        Ok(bytes) => DerivedKey::new(bytes),
        Err(e) => {
            tracing::warn!(error = %e, "stored KDF parameters rejected during verification");
            return None;
        }
    };

    if matches_fingerprint(key.as_bytes(), &record.auth_hash) {
        Some(key)
    } else {
        None
    }
}

/// Decrypt a record with a key obtained from `verify` on the same record.
///
/// An unrelated key fails the GCM tag check with `AuthenticationFailed`.
pub fn unseal(record: &VaultRecord, key: &DerivedKey) -> Result<Payload> {
    let mut plaintext = encryption::open(&record.ciphertext, key.as_bytes(), &record.iv, &record.tag)?;
    let raw = serde_json::from_slice::<serde_json::Value>(&plaintext);
    plaintext.zeroize();

    let raw = raw.map_err(|e| SignumError::InvalidPayload(format!("not JSON: {e}")))?;
    normalize(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::kdf::MIN_MEMORY_KIB;

    fn cheap() -> Argon2Params {
        Argon2Params {
            memory_kib: MIN_MEMORY_KIB,
            iterations: 1,
            parallelism: 1,
        }
    }

    #[test]
    fn record_carries_the_params_it_was_sealed_with() {
        let record = seal(&Payload::default(), b"pw", &cheap()).unwrap();
        assert_eq!(record.version, CURRENT_VERSION);
        assert_eq!(record.kdf_params.argon2_params(), cheap());
    }

    #[test]
    fn auth_hash_is_fingerprint_of_verified_key() {
        let record = seal(&Payload::default(), b"pw", &cheap()).unwrap();
        let key = verify(b"pw", &record).unwrap();
        assert_eq!(key.fingerprint(), record.auth_hash);
    }

    #[test]
    fn corrupt_stored_params_verify_as_none() {
        let mut record = seal(&Payload::default(), b"pw", &cheap()).unwrap();
        record.kdf_params.parallelism = 0;
        assert!(verify(b"pw", &record).is_none());
    }

    #[test]
    fn seal_enforces_the_memory_floor() {
        let weak = Argon2Params {
            memory_kib: 4_096,
            ..cheap()
        };
        assert!(matches!(
            seal(&Payload::default(), b"pw", &weak),
            Err(SignumError::KeyDerivationFailed(_))
        ));
    }

    #[test]
    fn record_below_the_floor_still_verifies() {
        let stored = Argon2Params {
            memory_kib: 4_096,
            iterations: 1,
            parallelism: 1,
        };
        let salt = [9u8; 16];
        let key = DerivedKey::new(derive_key(b"pw", &salt, &stored).unwrap());
        let plaintext = serde_json::to_vec(&Payload::default()).unwrap();
        let sealed = encryption::seal(&plaintext, key.as_bytes()).unwrap();
        let record = VaultRecord {
            version: CURRENT_VERSION.to_string(),
            kdf_params: KdfParams::new(salt, &stored),
            auth_hash: key.fingerprint(),
            iv: sealed.iv,
            tag: sealed.tag,
            ciphertext: sealed.ciphertext,
        };

        let verified = verify(b"pw", &record).expect("correct password verifies");
        assert_eq!(unseal(&record, &verified).unwrap(), Payload::default());
        assert!(verify(b"wrong", &record).is_none());
    }

    #[test]
    fn unrelated_key_fails_authentication() {
        let record = seal(&Payload::default(), b"pw", &cheap()).unwrap();
        let other = DerivedKey::new([0x55; 32]);
        assert!(matches!(
            unseal(&record, &other),
            Err(SignumError::AuthenticationFailed)
        ));
    }

    #[test]
    fn non_json_plaintext_is_a_schema_error() {
        let key = DerivedKey::new([0x21; 32]);
        let sealed = encryption::seal(b"definitely not json", key.as_bytes()).unwrap();
        let record = VaultRecord {
            version: CURRENT_VERSION.to_string(),
            kdf_params: KdfParams::new([0; 16], &cheap()),
            auth_hash: key.fingerprint(),
            iv: sealed.iv,
            tag: sealed.tag,
            ciphertext: sealed.ciphertext,
        };
        assert!(matches!(
            unseal(&record, &key),
            Err(SignumError::InvalidPayload(_))
        ));
    }
}
