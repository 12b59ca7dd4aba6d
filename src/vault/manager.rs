//! High-level vault operations used by CLI commands.
//!
//! `VaultManager` ties the codec to a storage backend and exposes the
//! three things a caller ever does with a vault: initialize it, unlock
//! it, and save it.  Unlocking yields a `Session`, the only place the
//! master password lives while the vault is open.

use std::path::PathBuf;

use zeroize::Zeroizing;

use crate::crypto::kdf::Argon2Params;
use crate::errors::{Result, SignumError};

use super::codec;
use super::payload::Payload;
use super::storage::{FileStorage, VaultStorage};

/// An unlocked vault.
///
/// Owns the master password (wiped on drop) and the decrypted payload.
/// Keep it alive only while the vault needs to stay open, then `lock`.
pub struct Session {
    password: Zeroizing<String>,
    payload: Payload,
}

impl Session {
    /// The decrypted vault contents.
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Mutable access for editing credentials and categories.
    pub fn payload_mut(&mut self) -> &mut Payload {
        &mut self.payload
    }

    /// Close the session, dropping the password and the plaintext.
    pub fn lock(self) {}

    fn password_bytes(&self) -> &[u8] {
        self.password.as_bytes()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("credentials", &self.payload.credentials.len())
            .field("categories", &self.payload.categories.len())
            .finish_non_exhaustive()
    }
}

/// Vault operations over a storage backend.
pub struct VaultManager<S: VaultStorage = FileStorage> {
    storage: S,
    /// Cost parameters for newly sealed records.
    params: Argon2Params,
}

impl<S: VaultStorage> VaultManager<S> {
    pub fn new(storage: S, params: Argon2Params) -> Self {
        Self { storage, params }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns `true` if a vault has already been created.
    pub fn is_initialized(&self) -> bool {
        self.storage.exists()
    }

    /// Create an empty vault protected by `password`.
    pub fn initialize(&self, password: &str) -> Result<()> {
        if self.storage.exists() {
            return Err(SignumError::VaultAlreadyExists(self.storage.location()));
        }
        let record = codec::seal(&Payload::default(), password.as_bytes(), &self.params)?;
        self.storage.save(&record)?;
        tracing::info!("vault initialized");
        Ok(())
    }

    /// Open the vault with `password`.
    ///
    /// A wrong password is reported as `WrongPassword` before any
    /// decryption is attempted.
    pub fn unlock(&self, password: &str) -> Result<Session> {
        let record = self.storage.load()?;
        tracing::debug!(
            iterations = record.kdf_params.iterations,
            memory_kib = record.kdf_params.memory,
            parallelism = record.kdf_params.parallelism,
            "deriving vault key"
        );

        let key = codec::verify(password.as_bytes(), &record).ok_or_else(|| {
            tracing::warn!("password verification failed");
            SignumError::WrongPassword
        })?;

        let payload = codec::unseal(&record, &key).map_err(|e| {
            tracing::warn!(error = %e, "vault could not be unsealed");
            e
        })?;

        Ok(Session {
            password: Zeroizing::new(password.to_string()),
            payload,
        })
    }

    /// Re-seal the session payload and overwrite the stored vault.
    ///
    /// Uses fresh randomness and the manager's current cost parameters, so
    /// an old vault picks up new defaults and the current schema here.
    pub fn save(&self, session: &Session) -> Result<()> {
        let record = codec::seal(&session.payload, session.password_bytes(), &self.params)?;
        self.storage.save(&record)
    }

    /// Re-seal the vault under a new master password.
    pub fn change_password(&self, session: &mut Session, new_password: &str) -> Result<()> {
        let record = codec::seal(&session.payload, new_password.as_bytes(), &self.params)?;
        self.storage.save(&record)?;
        session.password = Zeroizing::new(new_password.to_string());
        tracing::info!("master password changed");
        Ok(())
    }
}

impl VaultManager<FileStorage> {
    /// Convenience constructor for a vault file on disk.
    pub fn open_file(path: impl Into<PathBuf>, params: Argon2Params) -> Self {
        Self::new(FileStorage::new(path), params)
    }
}
