//! `signum delete` — remove a credential from the vault.

use crate::cli::output;
use crate::cli::{confirm, unlock, Cli};
use crate::errors::Result;

/// Execute the `delete` command.
pub fn execute(cli: &Cli, id: &str, force: bool) -> Result<()> {
    let (manager, mut session) = unlock(cli)?;

    let id = session.payload().resolve_credential_id(id)?;
    if !force {
        let title = session
            .payload()
            .credential(&id)
            .map(|c| c.title.clone())
            .unwrap_or_default();
        if !confirm(&format!("Delete '{title}'?"))? {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    let removed = session.payload_mut().remove_credential(&id)?;
    manager.save(&session)?;

    output::success(&format!("Deleted '{}'", removed.title));
    session.lock();
    Ok(())
}
