//! `signum show` — print one credential.

use crate::cli::output;
use crate::cli::{unlock, Cli};
use crate::errors::{Result, SignumError};

/// Execute the `show` command.
pub fn execute(cli: &Cli, id: &str, reveal: bool) -> Result<()> {
    let (_manager, session) = unlock(cli)?;
    let payload = session.payload();

    let id = payload.resolve_credential_id(id)?;
    let cred = payload
        .credential(&id)
        .ok_or_else(|| SignumError::CredentialNotFound(id.clone()))?;
    output::print_credential(cred, payload, reveal);

    session.lock();
    Ok(())
}
