//! Record creation paths.

use tracing::debug;

use crate::accounts::{AccountService, RoleService, UserLiteral};
use crate::collection::{Collection, Filter};
use crate::error::SeedingResult;
use crate::record::{RecordId, SeedRecord};

/// Builds the duplicate-user query: same email, or same username if one is given.
pub(crate) fn duplicate_user_filter(email: &str, username: Option<&str>) -> Filter {
	let by_email = Filter::eq("emails.address", email);
	match username {
		Some(username) => Filter::Or(vec![by_email, Filter::eq("username", username)]),
		None => by_email,
	}
}

/// Creates a user account unless one with the same email or username exists.
///
/// Returns `None` when the user was skipped as a duplicate.
pub(crate) async fn create_user(
	collection: &dyn Collection,
	accounts: &dyn AccountService,
	roles: Option<&dyn RoleService>,
	record: &SeedRecord,
) -> SeedingResult<Option<RecordId>> {
	let UserLiteral { user, roles: role_names } = UserLiteral::from_record(record)?;

	let filter = duplicate_user_filter(&user.email, user.username.as_deref());
	if collection.find_one(&filter).await?.is_some() {
		debug!(email = %user.email, "Skipping existing user");
		return Ok(None);
	}

	let user_id = accounts.create_user(user).await?;

	if !role_names.is_empty() {
		match roles {
			Some(roles) => roles.add_users_to_roles(&user_id, &role_names).await?,
			None => debug!(user_id = %user_id, "No role service configured; roles not assigned"),
		}
	}

	Ok(Some(user_id))
}

/// Inserts a record as-is.
pub(crate) async fn insert_record(
	collection: &dyn Collection,
	record: &SeedRecord,
) -> SeedingResult<RecordId> {
	collection.insert_one(record.fields().clone()).await
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;
	use std::sync::Arc;

	use crate::error::SeedingError;
	use crate::memory::{MemoryAccounts, MemoryCollection, MemoryRoles};

	#[rstest]
	fn test_duplicate_filter_email_only() {
		assert_eq!(
			duplicate_user_filter("a@example.com", None),
			Filter::eq("emails.address", "a@example.com")
		);
	}

	#[rstest]
	fn test_duplicate_filter_with_username() {
		assert_eq!(
			duplicate_user_filter("a@example.com", Some("alice")).to_document(),
			json!({ "$or": [{ "emails.address": "a@example.com" }, { "username": "alice" }] })
		);
	}

	#[rstest]
	#[tokio::test]
	async fn test_create_user_assigns_roles() {
		let users = MemoryCollection::shared("users");
		let accounts = MemoryAccounts::new(Arc::clone(&users));
		let roles = MemoryRoles::new();
		let record = SeedRecord::user("admin@example.com").roles(["admin"]);

		let id = create_user(&*users, &accounts, Some(&roles), &record)
			.await
			.unwrap()
			.unwrap();

		assert_eq!(roles.roles_for(&id), vec!["admin".to_string()]);
		assert_eq!(users.len(), 1);
	}

	#[rstest]
	#[tokio::test]
	async fn test_create_user_without_role_service() {
		let users = MemoryCollection::shared("users");
		let accounts = MemoryAccounts::new(Arc::clone(&users));
		let record = SeedRecord::user("admin@example.com").roles(["admin"]);

		let id = create_user(&*users, &accounts, None, &record)
			.await
			.unwrap();

		assert!(id.is_some());
		assert_eq!(accounts.created_count(), 1);
	}

	#[rstest]
	#[tokio::test]
	async fn test_create_user_skips_duplicate_username() {
		let users = MemoryCollection::shared("users");
		let accounts = MemoryAccounts::new(Arc::clone(&users));
		let first = SeedRecord::user("one@example.com").username("alice");
		let second = SeedRecord::user("two@example.com").username("alice");

		create_user(&*users, &accounts, None, &first)
			.await
			.unwrap();
		let skipped = create_user(&*users, &accounts, None, &second)
			.await
			.unwrap();

		assert!(skipped.is_none());
		assert_eq!(accounts.created_count(), 1);
	}

	#[rstest]
	#[tokio::test]
	async fn test_create_user_invalid_record() {
		let users = MemoryCollection::shared("users");
		let accounts = MemoryAccounts::new(Arc::clone(&users));
		let record = SeedRecord::default().field("name", "no email");

		let result = create_user(&*users, &accounts, None, &record).await;

		assert!(matches!(result, Err(SeedingError::ValidationError { .. })));
		assert!(users.is_empty());
	}

	#[rstest]
	#[tokio::test]
	async fn test_insert_record_copies_fields() {
		let documents = MemoryCollection::new("Documents");
		let record = SeedRecord::default().field("title", "Document #1");

		let id = insert_record(&documents, &record).await.unwrap();

		let stored = documents.documents();
		assert_eq!(stored.len(), 1);
		assert_eq!(stored[0].get("_id"), Some(&json!(id.as_str())));
		assert_eq!(stored[0].get("title"), Some(&json!("Document #1")));
		assert!(!record.fields().contains_key("_id"));
	}
}
