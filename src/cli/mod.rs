//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{Result, SignumError};
use crate::vault::{Session, VaultManager};

/// Minimum master password length to prevent trivially weak passwords.
const MIN_PASSWORD_LEN: usize = 8;

/// Environment variable consulted before prompting for the master password.
pub const PASSWORD_ENV: &str = "SIGNUM_PASSWORD";

/// Environment variable consulted before prompting for a replacement password.
pub const NEW_PASSWORD_ENV: &str = "SIGNUM_NEW_PASSWORD";

/// Signum CLI: local encrypted credential vault.
#[derive(Parser)]
#[command(name = "signum", about = "Secure local credential manager", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault file path (default: `vault_file` from .signum.toml)
    #[arg(long, env = "SIGNUM_VAULT", global = true)]
    pub vault: Option<String>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create a new, empty vault
    Init,

    /// List stored credentials
    List {
        /// Only show entries whose title or username contains this text
        #[arg(short, long)]
        search: Option<String>,
        /// Only show entries in this category (id or name)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Add a credential
    Add {
        /// Title (e.g. "GitHub")
        title: String,
        /// Login name
        #[arg(short, long)]
        username: String,
        /// Password (omit for interactive prompt)
        #[arg(short, long)]
        password: Option<String>,
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        /// API tokens or recovery codes
        #[arg(long)]
        tokens: Option<String>,
        /// Comma-separated tags
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,
        /// Category (id or name)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Show one credential
    Show {
        /// Credential id (or unique prefix)
        id: String,
        /// Print the password in clear text
        #[arg(long)]
        reveal: bool,
    },

    /// Copy a credential's password to the clipboard
    Copy {
        /// Credential id (or unique prefix)
        id: String,
    },

    /// Change fields of a credential
    Edit {
        /// Credential id (or unique prefix)
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(short, long)]
        username: Option<String>,
        #[arg(short, long)]
        password: Option<String>,
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long)]
        tokens: Option<String>,
        /// Replace tags (comma-separated)
        #[arg(long, value_delimiter = ',')]
        tags: Option<Vec<String>>,
        /// Move to category (id or name)
        #[arg(short, long, conflicts_with = "no_category")]
        category: Option<String>,
        /// Remove the entry from its category
        #[arg(long)]
        no_category: bool,
    },

    /// Delete a credential
    Delete {
        /// Credential id (or unique prefix)
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Manage categories
    Category {
        #[command(subcommand)]
        action: CategoryAction,
    },

    /// Change the vault's master password
    ChangePassword,
}

/// Category subcommands.
#[derive(clap::Subcommand)]
pub enum CategoryAction {
    /// List categories
    List,

    /// Add a category
    Add {
        name: String,
        /// Icon name shown next to the category
        #[arg(long)]
        icon: Option<String>,
    },

    /// Rename a category
    Rename {
        /// Category id or current name
        category: String,
        /// New name
        name: String,
    },

    /// Delete a category (entries in it become uncategorized)
    Delete {
        /// Category id or name
        category: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Get the master password, trying in order:
/// 1. `SIGNUM_PASSWORD` env var (scripts/CI)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter master password")
        .interact()
        .map_err(|e| SignumError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new master password with confirmation.
///
/// Also respects `env_var` for scripted usage.
/// Enforces a minimum password length.
pub fn prompt_new_password(prompt: &str, env_var: &str) -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(env_var) {
        if !pw.is_empty() {
            check_password_length(&pw)?;
            return Ok(Zeroizing::new(pw));
        }
    }

    loop {
        let password = dialoguer::Password::new()
            .with_prompt(prompt)
            .with_confirmation("Confirm master password", "Passwords do not match, try again")
            .interact()
            .map_err(|e| SignumError::CommandFailed(format!("password prompt: {e}")))?;

        if check_password_length(&password).is_err() {
            output::warning(&format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters. Try again."
            ));
            continue;
        }

        return Ok(Zeroizing::new(password));
    }
}

/// Prompt for the password of a stored entry (not the master password).
pub fn prompt_entry_password() -> Result<Zeroizing<String>> {
    let pw = dialoguer::Password::new()
        .with_prompt("Entry password")
        .allow_empty_password(true)
        .interact()
        .map_err(|e| SignumError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Ask a yes/no question, defaulting to "no".
pub fn confirm(prompt: &str) -> Result<bool> {
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| SignumError::CommandFailed(format!("confirm prompt: {e}")))
}

fn check_password_length(password: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(SignumError::CommandFailed(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

/// Resolve the vault path from `--vault` or `.signum.toml` in the cwd.
pub fn vault_path(cli: &Cli, settings: &Settings) -> Result<PathBuf> {
    match &cli.vault {
        Some(path) => Ok(PathBuf::from(path)),
        None => Ok(settings.vault_path(&std::env::current_dir()?)),
    }
}

/// Build a `VaultManager` for the vault this invocation targets.
pub fn manager(cli: &Cli) -> Result<VaultManager> {
    let settings = Settings::load(&std::env::current_dir()?)?;
    let path = vault_path(cli, &settings)?;
    Ok(VaultManager::open_file(path, settings.argon2_params()))
}

/// Prompt for the master password and unlock the vault.
pub fn unlock(cli: &Cli) -> Result<(VaultManager, Session)> {
    let manager = manager(cli)?;
    if !manager.is_initialized() {
        output::tip("Run `signum init` to create a vault.");
        return Err(SignumError::VaultNotFound(manager.storage().path().to_path_buf()));
    }

    let password = prompt_password()?;
    let session = manager.unlock(&password)?;
    Ok((manager, session))
}
