//! `signum init` — create a new, empty vault.

use crate::cli::output;
use crate::cli::{manager, prompt_new_password, Cli, PASSWORD_ENV};
use crate::errors::{Result, SignumError};

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let manager = manager(cli)?;
    let path = manager.storage().path().to_path_buf();

    if manager.is_initialized() {
        output::tip("Use `signum add` to store credentials in the existing vault.");
        return Err(SignumError::VaultAlreadyExists(path));
    }

    let password = prompt_new_password("Choose master password", PASSWORD_ENV)?;
    manager.initialize(&password)?;

    output::success(&format!("Vault created at {}", path.display()));
    output::tip("Run `signum add <TITLE> -u <USERNAME>` to store a credential.");
    output::tip("Run `signum list` to see stored credentials.");

    Ok(())
}
