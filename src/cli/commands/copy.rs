//! `signum copy` — put a credential's password on the clipboard.

use crate::cli::output;
use crate::cli::{unlock, Cli};
use crate::errors::{Result, SignumError};

/// Execute the `copy` command.
pub fn execute(cli: &Cli, id: &str) -> Result<()> {
    let (_manager, session) = unlock(cli)?;
    let payload = session.payload();

    let id = payload.resolve_credential_id(id)?;
    let cred = payload
        .credential(&id)
        .ok_or_else(|| SignumError::CredentialNotFound(id.clone()))?;
    let password = cred.password.as_deref().ok_or_else(|| {
        SignumError::CommandFailed(format!("'{}' has no stored password", cred.title))
    })?;

    let mut clipboard = arboard::Clipboard::new()
        .map_err(|e| SignumError::CommandFailed(format!("clipboard unavailable: {e}")))?;
    clipboard
        .set_text(password.to_string())
        .map_err(|e| SignumError::CommandFailed(format!("clipboard write failed: {e}")))?;

    output::success(&format!("Copied password for '{}' to clipboard", cred.title));
    session.lock();
    Ok(())
}
