//! `signum category` — list, add, rename and delete categories.

use crate::cli::output;
use crate::cli::{confirm, unlock, CategoryAction, Cli};
use crate::errors::Result;

/// Execute a `category` subcommand.
pub fn execute(cli: &Cli, action: &CategoryAction) -> Result<()> {
    let (manager, mut session) = unlock(cli)?;

    match action {
        CategoryAction::List => {
            let payload = session.payload();
            output::print_categories_table(&payload.categories, payload);
        }
        CategoryAction::Add { name, icon } => {
            let id = session.payload_mut().add_category(name, icon.clone())?;
            manager.save(&session)?;
            output::success(&format!(
                "Created category '{}' ({})",
                name.trim(),
                output::short_id(&id)
            ));
        }
        CategoryAction::Rename { category, name } => {
            let id = session.payload().resolve_category_id(category)?;
            session.payload_mut().rename_category(&id, name)?;
            manager.save(&session)?;
            output::success(&format!("Renamed category to '{}'", name.trim()));
        }
        CategoryAction::Delete { category, force } => {
            let id = session.payload().resolve_category_id(category)?;
            if !*force && !confirm(&format!("Delete category '{category}'?"))? {
                output::info("Cancelled.");
                return Ok(());
            }
            let detached = session.payload_mut().delete_category(&id)?;
            manager.save(&session)?;
            output::success(&format!("Deleted category '{category}'"));
            if detached > 0 {
                output::info(&format!("{detached} credential(s) are now uncategorized."));
            }
        }
    }

    session.lock();
    Ok(())
}
