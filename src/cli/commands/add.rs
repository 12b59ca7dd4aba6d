//! `signum add` — store a new credential.

use crate::cli::output;
use crate::cli::{prompt_entry_password, unlock, Cli};
use crate::errors::Result;
use crate::vault::NewCredential;

/// Arguments of the `add` command, gathered from clap.
pub struct AddArgs<'a> {
    pub title: &'a str,
    pub username: &'a str,
    pub password: Option<&'a str>,
    pub url: Option<&'a str>,
    pub description: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub tokens: Option<&'a str>,
    pub tags: &'a [String],
    pub category: Option<&'a str>,
}

/// Execute the `add` command.
pub fn execute(cli: &Cli, args: AddArgs<'_>) -> Result<()> {
    let (manager, mut session) = unlock(cli)?;

    let category_id = match args.category {
        Some(c) => Some(session.payload().resolve_category_id(c)?),
        None => None,
    };
    let password = match args.password {
        Some(pw) => pw.to_string(),
        None => prompt_entry_password()?.to_string(),
    };

    let id = session.payload_mut().add_credential(NewCredential {
        title: args.title.to_string(),
        username: args.username.to_string(),
        password: (!password.is_empty()).then_some(password),
        url: args.url.map(str::to_string),
        notes: args.notes.map(str::to_string),
        tokens: args.tokens.map(str::to_string),
        tags: args.tags.to_vec(),
        category_id,
        description: args.description.map(str::to_string),
    })?;
    manager.save(&session)?;

    output::success(&format!(
        "Saved '{}' ({})",
        args.title.trim(),
        output::short_id(&id)
    ));
    session.lock();
    Ok(())
}
