//! Vault module — sealed credential storage.
//!
//! This module provides:
//! - The on-disk `VaultRecord` and its `KdfParams` (`record`)
//! - `Credential`, `Category`, `Payload` and schema normalization (`payload`)
//! - `seal` / `verify` / `unseal` over the crypto primitives (`codec`)
//! - The `VaultStorage` persistence contract and `FileStorage` (`storage`)
//! - `VaultManager` and the unlocked `Session` used by CLI commands (`manager`)

pub mod codec;
pub mod manager;
pub mod payload;
pub mod record;
pub mod storage;

// Re-export the most commonly used items.
pub use manager::{Session, VaultManager};
pub use payload::{normalize, Category, Credential, CredentialUpdate, NewCredential, Payload};
pub use record::{KdfParams, VaultRecord, CURRENT_VERSION};
pub use storage::{FileStorage, VaultStorage};
