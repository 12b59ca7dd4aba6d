//! The decrypted vault contents: credentials and categories.
//!
//! Two payload shapes exist in the wild.  Early vaults stored a bare
//! JSON array of credentials; current vaults store an object with
//! `credentials` and `categories`.  `normalize` accepts both and always
//! yields the structured `Payload`.  Sealing only ever writes the
//! structured shape, so a legacy vault is upgraded on its next save.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::errors::{Result, SignumError};

/// A stored login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    /// Assigned once at creation, never changed.
    pub id: String,
    pub title: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A named group of credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Canonical in-memory vault contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub credentials: Vec<Credential>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub categories: Vec<Category>,
}

/// A list that is missing or `null` reads as empty.
fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Every payload shape that has ever been sealed.
///
/// Variant order matters: the structured shape is tried first.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredPayload {
    Structured(Payload),
    Legacy(Vec<Credential>),
}

/// Reconcile a decrypted JSON value into the canonical `Payload`.
///
/// Anything that is neither a structured object nor a credential list
/// is reported as `InvalidPayload`.
pub fn normalize(raw: serde_json::Value) -> Result<Payload> {
    let kind = json_kind(&raw);
    match serde_json::from_value::<StoredPayload>(raw) {
        Ok(StoredPayload::Structured(payload)) => Ok(payload),
        Ok(StoredPayload::Legacy(credentials)) => Ok(Payload {
            credentials,
            categories: Vec::new(),
        }),
        Err(e) => Err(SignumError::InvalidPayload(format!("{kind}: {e}"))),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

// ---------------------------------------------------------------------------
// Editing
// ---------------------------------------------------------------------------

/// Fields supplied when creating a credential.
#[derive(Debug, Clone, Default)]
pub struct NewCredential {
    pub title: String,
    pub username: String,
    pub password: Option<String>,
    pub url: Option<String>,
    pub notes: Option<String>,
    pub tokens: Option<String>,
    pub tags: Vec<String>,
    pub category_id: Option<String>,
    pub description: Option<String>,
}

/// A partial update.  `None` leaves a field unchanged.
///
/// For `category_id`, `Some(None)` clears the category.
#[derive(Debug, Clone, Default)]
pub struct CredentialUpdate {
    pub title: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub url: Option<String>,
    pub notes: Option<String>,
    pub tokens: Option<String>,
    pub tags: Option<Vec<String>>,
    pub category_id: Option<Option<String>>,
    pub description: Option<String>,
}

impl Payload {
    /// Add a credential and return its freshly assigned id.
    pub fn add_credential(&mut self, new: NewCredential) -> Result<String> {
        let title = required("title", &new.title)?;
        let username = required("username", &new.username)?;
        if let Some(category_id) = new.category_id.as_deref() {
            self.require_category(category_id)?;
        }

        let now = Utc::now();
        let id = Uuid::new_v4().to_string();
        self.credentials.push(Credential {
            id: id.clone(),
            title,
            username,
            password: new.password,
            url: non_blank(new.url),
            notes: non_blank(new.notes),
            tokens: non_blank(new.tokens),
            tags: non_empty(new.tags),
            category_id: new.category_id,
            description: non_blank(new.description),
            created_at: now,
            updated_at: now,
        });
        Ok(id)
    }

    /// Apply a partial update, preserving `id` and `created_at`.
    pub fn update_credential(&mut self, id: &str, update: CredentialUpdate) -> Result<()> {
        if let Some(Some(category_id)) = update.category_id.as_ref() {
            self.require_category(category_id)?;
        }
        let title = update
            .title
            .as_deref()
            .map(|t| required("title", t))
            .transpose()?;
        let username = update
            .username
            .as_deref()
            .map(|u| required("username", u))
            .transpose()?;

        let cred = self
            .credentials
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| SignumError::CredentialNotFound(id.to_string()))?;

        if let Some(title) = title {
            cred.title = title;
        }
        if let Some(username) = username {
            cred.username = username;
        }
        if let Some(password) = update.password {
            cred.password = Some(password);
        }
        if let Some(url) = update.url {
            cred.url = non_blank(Some(url));
        }
        if let Some(notes) = update.notes {
            cred.notes = non_blank(Some(notes));
        }
        if let Some(tokens) = update.tokens {
            cred.tokens = non_blank(Some(tokens));
        }
        if let Some(tags) = update.tags {
            cred.tags = non_empty(tags);
        }
        if let Some(category_id) = update.category_id {
            cred.category_id = category_id;
        }
        if let Some(description) = update.description {
            cred.description = non_blank(Some(description));
        }
        cred.updated_at = Utc::now();
        Ok(())
    }

    /// Remove a credential and return it.
    pub fn remove_credential(&mut self, id: &str) -> Result<Credential> {
        let index = self
            .credentials
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| SignumError::CredentialNotFound(id.to_string()))?;
        Ok(self.credentials.remove(index))
    }

    pub fn credential(&self, id: &str) -> Option<&Credential> {
        self.credentials.iter().find(|c| c.id == id)
    }

    /// Resolve a full id or an unambiguous id prefix to a full id.
    pub fn resolve_credential_id(&self, id_or_prefix: &str) -> Result<String> {
        if let Some(cred) = self.credential(id_or_prefix) {
            return Ok(cred.id.clone());
        }
        if id_or_prefix.is_empty() {
            return Err(SignumError::CredentialNotFound(String::new()));
        }

        let mut matches = self
            .credentials
            .iter()
            .filter(|c| c.id.starts_with(id_or_prefix));
        match (matches.next(), matches.next()) {
            (Some(cred), None) => Ok(cred.id.clone()),
            (Some(_), Some(_)) => Err(SignumError::CommandFailed(format!(
                "id prefix '{id_or_prefix}' matches more than one credential"
            ))),
            (None, _) => Err(SignumError::CredentialNotFound(id_or_prefix.to_string())),
        }
    }

    /// Credentials whose title or username contains `query`
    /// (case-insensitive), optionally restricted to one category.
    pub fn search(&self, query: Option<&str>, category_id: Option<&str>) -> Vec<&Credential> {
        let needle = query.map(str::to_lowercase);
        self.credentials
            .iter()
            .filter(|c| match category_id {
                Some(cat) => c.category_id.as_deref() == Some(cat),
                None => true,
            })
            .filter(|c| match needle.as_deref() {
                Some(n) => {
                    c.title.to_lowercase().contains(n) || c.username.to_lowercase().contains(n)
                }
                None => true,
            })
            .collect()
    }

    /// Add a category and return its freshly assigned id.
    pub fn add_category(&mut self, name: &str, icon: Option<String>) -> Result<String> {
        let name = required("category name", name)?;
        let id = Uuid::new_v4().to_string();
        self.categories.push(Category {
            id: id.clone(),
            name,
            icon: non_blank(icon),
        });
        Ok(id)
    }

    pub fn rename_category(&mut self, id: &str, name: &str) -> Result<()> {
        let name = required("category name", name)?;
        let category = self
            .categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| SignumError::CategoryNotFound(id.to_string()))?;
        category.name = name;
        Ok(())
    }

    /// Delete a category and detach every credential that pointed at it.
    ///
    /// Returns the number of credentials that lost their category.
    pub fn delete_category(&mut self, id: &str) -> Result<usize> {
        let index = self
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| SignumError::CategoryNotFound(id.to_string()))?;
        self.categories.remove(index);

        let now = Utc::now();
        let mut detached = 0;
        for cred in self
            .credentials
            .iter_mut()
            .filter(|c| c.category_id.as_deref() == Some(id))
        {
            cred.category_id = None;
            cred.updated_at = now;
            detached += 1;
        }
        Ok(detached)
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Resolve a category id or a unique case-insensitive name to an id.
    pub fn resolve_category_id(&self, id_or_name: &str) -> Result<String> {
        if let Some(category) = self.category(id_or_name) {
            return Ok(category.id.clone());
        }
        let wanted = id_or_name.trim().to_lowercase();
        let mut matches = self
            .categories
            .iter()
            .filter(|c| c.name.to_lowercase() == wanted);
        match (matches.next(), matches.next()) {
            (Some(category), None) => Ok(category.id.clone()),
            (Some(_), Some(_)) => Err(SignumError::CommandFailed(format!(
                "more than one category is named '{id_or_name}', use its id"
            ))),
            (None, _) => Err(SignumError::CategoryNotFound(id_or_name.to_string())),
        }
    }

    fn require_category(&self, id: &str) -> Result<()> {
        match self.category(id) {
            Some(_) => Ok(()),
            None => Err(SignumError::CategoryNotFound(id.to_string())),
        }
    }
}

fn required(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SignumError::CommandFailed(format!("{field} cannot be empty")));
    }
    Ok(trimmed.to_string())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn non_empty(tags: Vec<String>) -> Option<Vec<String>> {
    (!tags.is_empty()).then_some(tags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn login(title: &str, username: &str) -> NewCredential {
        NewCredential {
            title: title.into(),
            username: username.into(),
            password: Some("pw".into()),
            ..NewCredential::default()
        }
    }

    #[test]
    fn normalize_legacy_array() {
        let raw = json!([{
            "id": "1",
            "title": "t",
            "username": "u",
            "createdAt": "2024-01-01T00:00:00.000Z",
            "updatedAt": "2024-01-01T00:00:00.000Z"
        }]);
        let payload = normalize(raw).unwrap();
        assert_eq!(payload.credentials.len(), 1);
        assert_eq!(payload.credentials[0].id, "1");
        assert_eq!(payload.credentials[0].title, "t");
        assert!(payload.categories.is_empty());
    }

    #[test]
    fn normalize_structured_object() {
        let raw = json!({
            "credentials": [],
            "categories": [{"id": "c1", "name": "Work"}]
        });
        let payload = normalize(raw).unwrap();
        assert!(payload.credentials.is_empty());
        assert_eq!(payload.categories[0].name, "Work");
    }

    #[test]
    fn normalize_object_with_missing_lists() {
        assert_eq!(normalize(json!({})).unwrap(), Payload::default());
        let only_creds = normalize(json!({"credentials": []})).unwrap();
        assert!(only_creds.categories.is_empty());
    }

    #[test]
    fn normalize_object_with_null_lists() {
        let both = normalize(json!({"credentials": null, "categories": null})).unwrap();
        assert_eq!(both, Payload::default());

        let raw = json!({
            "credentials": [{
                "id": "1",
                "title": "t",
                "username": "u",
                "createdAt": "2024-01-01T00:00:00.000Z",
                "updatedAt": "2024-01-01T00:00:00.000Z"
            }],
            "categories": null
        });
        let payload = normalize(raw).unwrap();
        assert_eq!(payload.credentials.len(), 1);
        assert!(payload.categories.is_empty());
    }

    #[test]
    fn normalize_rejects_other_shapes() {
        for raw in [json!(42), json!("vault"), json!(null), json!(true)] {
            let err = normalize(raw).unwrap_err();
            assert!(matches!(err, SignumError::InvalidPayload(_)));
        }
    }

    #[test]
    fn normalize_rejects_array_of_non_credentials() {
        let err = normalize(json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, SignumError::InvalidPayload(_)));
    }

    #[test]
    fn optional_fields_are_omitted_when_absent() {
        let mut payload = Payload::default();
        payload.add_credential(login("Mail", "me")).unwrap();
        let json = serde_json::to_value(&payload).unwrap();
        let cred = &json["credentials"][0];
        assert!(cred.get("url").is_none());
        assert!(cred.get("categoryId").is_none());
        assert!(cred.get("tags").is_none());
        assert!(cred.get("createdAt").is_some());
    }

    #[test]
    fn tags_are_kept_only_when_present() {
        let mut payload = Payload::default();
        let mut tagged = login("Mail", "me");
        tagged.tags = vec!["work".into()];
        let id = payload.add_credential(tagged).unwrap();
        assert_eq!(payload.credential(&id).unwrap().tags, Some(vec!["work".to_string()]));

        let update = CredentialUpdate {
            tags: Some(vec![]),
            ..CredentialUpdate::default()
        };
        payload.update_credential(&id, update).unwrap();
        assert_eq!(payload.credential(&id).unwrap().tags, None);
    }

    #[test]
    fn add_credential_assigns_uuid_and_timestamps() {
        let mut payload = Payload::default();
        let id = payload.add_credential(login("Mail", "me")).unwrap();
        assert!(Uuid::parse_str(&id).is_ok());
        let cred = payload.credential(&id).unwrap();
        assert_eq!(cred.created_at, cred.updated_at);
    }

    #[test]
    fn add_credential_rejects_blank_title_and_unknown_category() {
        let mut payload = Payload::default();
        assert!(payload.add_credential(login("  ", "me")).is_err());

        let mut with_cat = login("Mail", "me");
        with_cat.category_id = Some("missing".into());
        assert!(matches!(
            payload.add_credential(with_cat),
            Err(SignumError::CategoryNotFound(_))
        ));
    }

    #[test]
    fn update_keeps_id_and_created_at() {
        let mut payload = Payload::default();
        let id = payload.add_credential(login("Mail", "me")).unwrap();
        let created = payload.credential(&id).unwrap().created_at;

        payload
            .update_credential(
                &id,
                CredentialUpdate {
                    title: Some("Email".into()),
                    ..CredentialUpdate::default()
                },
            )
            .unwrap();

        let cred = payload.credential(&id).unwrap();
        assert_eq!(cred.id, id);
        assert_eq!(cred.title, "Email");
        assert_eq!(cred.created_at, created);
        assert!(cred.updated_at >= created);
    }

    #[test]
    fn delete_category_clears_references() {
        let mut payload = Payload::default();
        let work = payload.add_category("Work", None).unwrap();
        let home = payload.add_category("Home", None).unwrap();

        let mut a = login("A", "a");
        a.category_id = Some(work.clone());
        let mut b = login("B", "b");
        b.category_id = Some(home.clone());
        let a_id = payload.add_credential(a).unwrap();
        let b_id = payload.add_credential(b).unwrap();

        assert_eq!(payload.delete_category(&work).unwrap(), 1);
        assert!(payload.category(&work).is_none());
        assert_eq!(payload.credential(&a_id).unwrap().category_id, None);
        assert_eq!(
            payload.credential(&b_id).unwrap().category_id.as_deref(),
            Some(home.as_str())
        );
    }

    #[test]
    fn rename_and_delete_unknown_category_fail() {
        let mut payload = Payload::default();
        assert!(payload.rename_category("nope", "x").is_err());
        assert!(payload.delete_category("nope").is_err());
    }

    #[test]
    fn search_matches_title_or_username_case_insensitively() {
        let mut payload = Payload::default();
        payload.add_credential(login("GitHub", "octo")).unwrap();
        payload.add_credential(login("Bank", "alice")).unwrap();

        assert_eq!(payload.search(Some("git"), None).len(), 1);
        assert_eq!(payload.search(Some("ALICE"), None).len(), 1);
        assert_eq!(payload.search(None, None).len(), 2);
        assert!(payload.search(Some("zzz"), None).is_empty());
    }

    #[test]
    fn search_filters_by_category() {
        let mut payload = Payload::default();
        let work = payload.add_category("Work", None).unwrap();
        let mut a = login("Jira", "me");
        a.category_id = Some(work.clone());
        payload.add_credential(a).unwrap();
        payload.add_credential(login("Netflix", "me")).unwrap();

        let hits = payload.search(None, Some(work.as_str()));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Jira");
    }

    #[test]
    fn resolve_category_by_name_or_id() {
        let mut payload = Payload::default();
        let work = payload.add_category("Work", None).unwrap();
        assert_eq!(payload.resolve_category_id("work").unwrap(), work);
        assert_eq!(payload.resolve_category_id(&work).unwrap(), work);
        assert!(matches!(
            payload.resolve_category_id("Home"),
            Err(SignumError::CategoryNotFound(_))
        ));
    }

    #[test]
    fn resolve_credential_id_by_prefix() {
        let mut payload = Payload::default();
        let id = payload.add_credential(login("Mail", "me")).unwrap();
        assert_eq!(payload.resolve_credential_id(&id[..8]).unwrap(), id);
        assert!(payload.resolve_credential_id("zzzz").is_err());
    }
}
