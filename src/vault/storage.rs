//! Persistence of the single vault record.
//!
//! The codec never touches the filesystem.  Anything that can hold one
//! `VaultRecord` implements `VaultStorage`; `FileStorage` keeps it as a
//! pretty-printed JSON file.

use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{Result, SignumError};

use super::record::VaultRecord;

/// Where a vault record lives between sessions.
pub trait VaultStorage {
    /// Returns `true` if a record has been saved.
    fn exists(&self) -> bool;

    /// Read the record.  Fails with `VaultNotFound` when absent and
    /// `InvalidVaultFormat` when the stored data cannot be parsed.
    fn load(&self) -> Result<VaultRecord>;

    /// Replace the stored record.
    fn save(&self, record: &VaultRecord) -> Result<()>;

    /// Where the record lives, for error messages.
    fn location(&self) -> PathBuf;
}

/// A vault record stored as one JSON file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the vault file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl VaultStorage for FileStorage {
    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn location(&self) -> PathBuf {
        self.path.clone()
    }

    fn load(&self) -> Result<VaultRecord> {
        if !self.path.exists() {
            return Err(SignumError::VaultNotFound(self.path.clone()));
        }

        let contents = fs::read_to_string(&self.path).map_err(|e| {
            SignumError::InvalidVaultFormat(format!("cannot read {}: {e}", self.path.display()))
        })?;
        let record = VaultRecord::from_json(&contents)?;
        tracing::debug!(
            path = %self.path.display(),
            ciphertext_len = record.ciphertext.len(),
            "loaded vault record"
        );
        Ok(record)
    }

    /// Write the record **atomically**.
    ///
    /// Writes to a temp file in the same directory, then renames it over
    /// the target so readers never see a half-written vault.
    fn save(&self, record: &VaultRecord) -> Result<()> {
        let json = record.to_json()?;

        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if !parent.exists() {
            fs::create_dir_all(&parent)?;
        }
        let tmp_path = parent.join(format!(
            ".{}.tmp",
            self.path.file_name().unwrap_or_default().to_string_lossy()
        ));

        fs::write(&tmp_path, json.as_bytes())?;

        // On Unix, restrict permissions to owner-only read/write.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp_path, fs::Permissions::from_mode(0o600))?;
        }

        fs::rename(&tmp_path, &self.path)?;
        tracing::debug!(path = %self.path.display(), "saved vault record");
        Ok(())
    }
}
