//! Cryptographic primitives for Signum.
//!
//! This module provides:
//! - Argon2id password-based key derivation (`kdf`)
//! - SHA-256 fingerprints of derived keys for password checks (`auth`)
//! - AES-256-GCM sealing and opening with a detached tag (`encryption`)
//! - A zeroize-on-drop key holder (`keys`)

pub mod auth;
pub mod encryption;
pub mod kdf;
pub mod keys;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{seal, open, derive_key, ...};
pub use auth::{fingerprint, matches_fingerprint};
pub use encryption::{open, seal, SealedBox};
pub use kdf::{derive_key, generate_salt, Argon2Params};
pub use keys::DerivedKey;
