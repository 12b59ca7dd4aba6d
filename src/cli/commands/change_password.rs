//! `signum change-password` — re-seal the vault under a new master password.

use crate::cli::output;
use crate::cli::{prompt_new_password, unlock, Cli, NEW_PASSWORD_ENV};
use crate::errors::Result;

/// Execute the `change-password` command.
///
/// The current password comes from `SIGNUM_PASSWORD` or a prompt, the
/// new one from `SIGNUM_NEW_PASSWORD` or a confirmed prompt.
pub fn execute(cli: &Cli) -> Result<()> {
    let (manager, mut session) = unlock(cli)?;

    let new_password = prompt_new_password("Choose new master password", NEW_PASSWORD_ENV)?;
    manager.change_password(&mut session, &new_password)?;

    output::success("Master password changed.");
    session.lock();
    Ok(())
}
