//! AES-256-GCM authenticated encryption.
//!
//! Each call to `seal` generates a fresh random 12-byte IV.  The IV,
//! ciphertext and 16-byte tag are returned as separate parts because
//! the vault record stores them as three distinct hex fields.

use aes_gcm::aead::{AeadInPlace, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce, Tag};
use zeroize::Zeroize;

use crate::errors::{Result, SignumError};

/// Size of the AES-256-GCM IV in bytes.
pub const IV_LEN: usize = 12;

/// Size of the GCM authentication tag in bytes.
pub const TAG_LEN: usize = 16;

/// Output of one authenticated-encryption call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedBox {
    pub iv: [u8; IV_LEN],
    pub ciphertext: Vec<u8>,
    pub tag: [u8; TAG_LEN],
}

/// Encrypt `plaintext` with a 32-byte `key` under a fresh random IV.
pub fn seal(plaintext: &[u8], key: &[u8]) -> Result<SealedBox> {
    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| SignumError::EncryptionFailed(format!("invalid key length: {e}")))?;

    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let mut buffer = plaintext.to_vec();
    let tag = match cipher.encrypt_in_place_detached(&nonce, b"", &mut buffer) {
        Ok(tag) => tag,
        Err(e) => {
            buffer.zeroize();
            return Err(SignumError::EncryptionFailed(format!(
                "encryption error: {e}"
            )));
        }
    };

    let mut iv = [0u8; IV_LEN];
    iv.copy_from_slice(&nonce);
    let mut tag_bytes = [0u8; TAG_LEN];
    tag_bytes.copy_from_slice(&tag);

    Ok(SealedBox {
        iv,
        ciphertext: buffer,
        tag: tag_bytes,
    })
}

/// Decrypt and authenticate a ciphertext produced by `seal`.
///
/// The tag is checked before any plaintext is handed back.  A wrong key,
/// a flipped bit or a swapped IV all end in `AuthenticationFailed`.
pub fn open(
    ciphertext: &[u8],
    key: &[u8],
    iv: &[u8; IV_LEN],
    tag: &[u8; TAG_LEN],
) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| SignumError::AuthenticationFailed)?;

    let mut buffer = ciphertext.to_vec();
    let verified = cipher.decrypt_in_place_detached(
        Nonce::from_slice(iv),
        b"",
        &mut buffer,
        Tag::from_slice(tag),
    );

    if verified.is_err() {
        buffer.zeroize();
        return Err(SignumError::AuthenticationFailed);
    }

    Ok(buffer)
}
