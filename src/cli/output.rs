//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::{Category, Credential, Payload};

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Short form of an id for table display.
pub fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

/// Print a table of credentials (Id, Title, Username, Category, Updated).
/// Passwords are never shown here.
pub fn print_credentials_table(credentials: &[&Credential], payload: &Payload) {
    if credentials.is_empty() {
        info("No credentials found.");
        tip("Run `signum add <TITLE> -u <USERNAME>` to store one.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Title", "Username", "Category", "Updated"]);

    for c in credentials {
        let category = c
            .category_id
            .as_deref()
            .and_then(|id| payload.category(id))
            .map(|cat| cat.name.clone())
            .unwrap_or_default();
        table.add_row(vec![
            short_id(&c.id).to_string(),
            c.title.clone(),
            c.username.clone(),
            category,
            c.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ]);
    }

    println!("{table}");
}

/// Print a table of categories with how many entries each holds.
pub fn print_categories_table(categories: &[Category], payload: &Payload) {
    if categories.is_empty() {
        info("No categories yet.");
        tip("Run `signum category add <NAME>` to create one.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Name", "Icon", "Entries"]);

    for cat in categories {
        let count = payload.search(None, Some(cat.id.as_str())).len();
        table.add_row(vec![
            short_id(&cat.id).to_string(),
            cat.name.clone(),
            cat.icon.clone().unwrap_or_default(),
            count.to_string(),
        ]);
    }

    println!("{table}");
}

/// Print every field of one credential.
pub fn print_credential(cred: &Credential, payload: &Payload, reveal: bool) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let password = masked(cred.password.as_deref(), reveal).unwrap_or_default();
    let category = cred
        .category_id
        .as_deref()
        .and_then(|id| payload.category(id))
        .map(|c| c.name.clone());

    let mut rows: Vec<(&str, String)> = vec![
        ("Id", cred.id.clone()),
        ("Title", cred.title.clone()),
        ("Username", cred.username.clone()),
        ("Password", password),
    ];
    let optional = [
        ("URL", cred.url.clone()),
        ("Description", cred.description.clone()),
        ("Notes", cred.notes.clone()),
        ("Tokens", masked(cred.tokens.as_deref(), reveal)),
        ("Category", category),
        (
            "Tags",
            cred.tags.as_ref().filter(|t| !t.is_empty()).map(|t| t.join(", ")),
        ),
    ];
    rows.extend(optional.into_iter().filter_map(|(k, v)| v.map(|v| (k, v))));
    rows.push(("Created", cred.created_at.format("%Y-%m-%d %H:%M:%S").to_string()));
    rows.push(("Updated", cred.updated_at.format("%Y-%m-%d %H:%M:%S").to_string()));

    for (field, value) in rows {
        table.add_row(vec![field.to_string(), value]);
    }

    println!("{table}");
}

/// Hide a secret value unless `reveal` is set.
fn masked(secret: Option<&str>, reveal: bool) -> Option<String> {
    secret.map(|s| if reveal { s.to_string() } else { "********".to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secrets_are_masked_unless_revealed() {
        assert_eq!(masked(Some("tok-123"), false).as_deref(), Some("********"));
        assert_eq!(masked(Some("tok-123"), true).as_deref(), Some("tok-123"));
        assert_eq!(masked(None, true), None);
    }

    #[test]
    fn short_id_truncates_uuids_only() {
        assert_eq!(short_id("0f8fad5b-d9cb-469f-a165-70867728950e"), "0f8fad5b");
        assert_eq!(short_id("1"), "1");
    }
}
