//! In-memory holder for an Argon2id-derived vault key.

use zeroize::Zeroize;

use super::auth::{fingerprint, FINGERPRINT_LEN};
use super::kdf::KEY_LEN;

/// A wrapper around a 32-byte derived key that automatically zeroes
/// its memory when dropped.
///
/// `verify` hands one of these back on a correct password; it should
/// live only as long as the unseal call that consumes it.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct DerivedKey {
    bytes: [u8; KEY_LEN],
}

impl DerivedKey {
    /// Create a new `DerivedKey` from raw bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Access the raw key bytes (e.g. to pass to the cipher).
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }

    /// SHA-256 fingerprint of this key, as stored in `authHash`.
    pub fn fingerprint(&self) -> [u8; FINGERPRINT_LEN] {
        fingerprint(&self.bytes)
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKey(..)")
    }
}
