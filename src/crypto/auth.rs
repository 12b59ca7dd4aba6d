//! Password verification fingerprints.
//!
//! The vault stores `SHA-256(derived_key)` next to the ciphertext.  On
//! unlock the candidate key is re-derived and fingerprinted; a match
//! means the password is right without ever touching the ciphertext.
//! The hash adds no brute-force cost of its own, all of that comes from
//! Argon2id.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Length of a fingerprint in bytes.
pub const FINGERPRINT_LEN: usize = 32;

/// Compute the SHA-256 fingerprint of a derived key.
pub fn fingerprint(key: &[u8]) -> [u8; FINGERPRINT_LEN] {
    Sha256::digest(key).into()
}

/// Check a derived key against a stored fingerprint (exact match).
pub fn matches_fingerprint(key: &[u8], expected: &[u8; FINGERPRINT_LEN]) -> bool {
    fingerprint(key)[..].ct_eq(&expected[..]).into()
}
