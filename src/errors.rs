use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in Signum.
#[derive(Debug, Error)]
pub enum SignumError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Authentication failed: ciphertext or tag rejected")]
    AuthenticationFailed,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    #[error("Invalid password")]
    WrongPassword,

    // --- Vault errors ---
    #[error("Vault not found at {0}")]
    VaultNotFound(PathBuf),

    #[error("Vault already exists at {0}")]
    VaultAlreadyExists(PathBuf),

    #[error("Invalid vault format: {0}")]
    InvalidVaultFormat(String),

    #[error("Unrecognized vault payload: {0}")]
    InvalidPayload(String),

    #[error("Credential '{0}' not found")]
    CredentialNotFound(String),

    #[error("Category '{0}' not found")]
    CategoryNotFound(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,
}

impl SignumError {
    /// The message shown to the person at the keyboard.
    ///
    /// Cryptographic and persistence failures collapse into a few generic
    /// sentences so the output never tells an attacker which check failed.
    /// The `Display` impl keeps the precise cause for logs.
    pub fn user_message(&self) -> String {
        match self {
            SignumError::WrongPassword => "Invalid password".to_string(),
            SignumError::AuthenticationFailed | SignumError::InvalidPayload(_) => {
                "Decryption failed".to_string()
            }
            SignumError::VaultNotFound(_) | SignumError::InvalidVaultFormat(_) => {
                "Could not read vault".to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Convenience type alias for Signum results.
pub type Result<T> = std::result::Result<T, SignumError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crypto_failures_share_one_user_message() {
        let auth = SignumError::AuthenticationFailed.user_message();
        let schema = SignumError::InvalidPayload("number".into()).user_message();
        assert_eq!(auth, "Decryption failed");
        assert_eq!(auth, schema);
    }

    #[test]
    fn persistence_failures_are_generic() {
        let missing = SignumError::VaultNotFound(PathBuf::from("/tmp/v.json")).user_message();
        let corrupt = SignumError::InvalidVaultFormat("bad hex".into()).user_message();
        assert_eq!(missing, "Could not read vault");
        assert_eq!(missing, corrupt);
        assert!(!missing.contains("/tmp"));
    }

    #[test]
    fn display_keeps_precise_cause() {
        let err = SignumError::InvalidVaultFormat("iv must be 12 bytes".into());
        assert!(err.to_string().contains("iv must be 12 bytes"));
    }
}
