//! `signum list` — display credentials in a table.

use crate::cli::output;
use crate::cli::{unlock, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli, search: Option<&str>, category: Option<&str>) -> Result<()> {
    let (_manager, session) = unlock(cli)?;
    let payload = session.payload();

    let category_id = match category {
        Some(c) => Some(payload.resolve_category_id(c)?),
        None => None,
    };
    let hits = payload.search(search, category_id.as_deref());

    output::info(&format!("{} credential(s)", hits.len()));
    output::print_credentials_table(&hits, payload);

    session.lock();
    Ok(())
}
