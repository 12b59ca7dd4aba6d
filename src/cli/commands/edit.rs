//! `signum edit` — change fields of an existing credential.

use crate::cli::output;
use crate::cli::{unlock, Cli};
use crate::errors::Result;
use crate::vault::CredentialUpdate;

/// Arguments of the `edit` command, gathered from clap.
pub struct EditArgs<'a> {
    pub id: &'a str,
    pub title: Option<&'a str>,
    pub username: Option<&'a str>,
    pub password: Option<&'a str>,
    pub url: Option<&'a str>,
    pub description: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub tokens: Option<&'a str>,
    pub tags: Option<&'a [String]>,
    pub category: Option<&'a str>,
    pub no_category: bool,
}

/// Execute the `edit` command.
pub fn execute(cli: &Cli, args: EditArgs<'_>) -> Result<()> {
    let (manager, mut session) = unlock(cli)?;

    let id = session.payload().resolve_credential_id(args.id)?;
    let category_id = match (args.category, args.no_category) {
        (_, true) => Some(None),
        (Some(c), false) => Some(Some(session.payload().resolve_category_id(c)?)),
        (None, false) => None,
    };

    let update = CredentialUpdate {
        title: args.title.map(str::to_string),
        username: args.username.map(str::to_string),
        password: args.password.map(str::to_string),
        url: args.url.map(str::to_string),
        notes: args.notes.map(str::to_string),
        tokens: args.tokens.map(str::to_string),
        tags: args.tags.map(<[String]>::to_vec),
        category_id,
        description: args.description.map(str::to_string),
    };
    session.payload_mut().update_credential(&id, update)?;
    manager.save(&session)?;

    output::success(&format!("Updated {}", output::short_id(&id)));
    session.lock();
    Ok(())
}
