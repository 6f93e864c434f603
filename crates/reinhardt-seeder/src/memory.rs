//! In-memory collection and account backends.
//!
//! Useful for local development setups and tests. Nothing here is persisted.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::{Mutex, RwLock};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::accounts::{AccountService, NewUser, RoleService};
use crate::collection::{Collection, Filter};
use crate::error::{SeedingError, SeedingResult};
use crate::record::{Fields, RecordId};

/// Field holding a document's identifier.
pub const ID_FIELD: &str = "_id";

/// In-memory document collection.
///
/// # Example
///
/// ```
/// use reinhardt_seeder::{Collection, Filter, MemoryCollection};
/// use serde_json::json;
///
/// # tokio_test::block_on(async {
/// let posts = MemoryCollection::new("Posts");
/// let fields = json!({ "title": "Hello" }).as_object().cloned().unwrap();
/// let id = posts.insert_one(fields).await.unwrap();
/// assert_eq!(posts.count(&Filter::All).await.unwrap(), 1);
/// assert!(posts.find_one(&Filter::eq("_id", id.as_str())).await.unwrap().is_some());
/// # })
/// ```
#[derive(Debug)]
pub struct MemoryCollection {
	name: String,
	documents: RwLock<Vec<Fields>>,
}

impl MemoryCollection {
	/// Creates an empty collection.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			documents: RwLock::new(Vec::new()),
		}
	}

	/// Creates an empty collection wrapped in an [`Arc`].
	pub fn shared(name: impl Into<String>) -> Arc<Self> {
		Arc::new(Self::new(name))
	}

	/// Returns a snapshot of every document, in insertion order.
	pub fn documents(&self) -> Vec<Fields> {
		self.documents.read().clone()
	}

	/// Returns the number of documents.
	pub fn len(&self) -> usize {
		self.documents.read().len()
	}

	/// Returns true if the collection holds no documents.
	pub fn is_empty(&self) -> bool {
		self.documents.read().is_empty()
	}

	fn insert(&self, mut document: Fields) -> SeedingResult<RecordId> {
		let id = match document.get(ID_FIELD) {
			Some(Value::String(id)) => id.clone(),
			_ => Uuid::new_v4().simple().to_string(),
		};

		let mut documents = self.documents.write();
		if documents
			.iter()
			.any(|existing| existing.get(ID_FIELD).and_then(Value::as_str) == Some(id.as_str()))
		{
			return Err(SeedingError::DatabaseError(format!(
				"Duplicate key in {}: {}",
				self.name, id
			)));
		}
		document.insert(ID_FIELD.to_string(), Value::String(id.clone()));
		documents.push(document);
		Ok(RecordId::new(id))
	}
}

#[async_trait]
impl Collection for MemoryCollection {
	fn name(&self) -> &str {
		&self.name
	}

	fn driver(&self) -> Option<&str> {
		Some("memory")
	}

	async fn insert_one(&self, document: Fields) -> SeedingResult<RecordId> {
		self.insert(document)
	}

	async fn find_one(&self, filter: &Filter) -> SeedingResult<Option<Fields>> {
		Ok(self
			.documents
			.read()
			.iter()
			.find(|document| filter.matches(document))
			.cloned())
	}

	async fn count(&self, filter: &Filter) -> SeedingResult<u64> {
		let count = self
			.documents
			.read()
			.iter()
			.filter(|document| filter.matches(document))
			.count();
		Ok(count as u64)
	}

	async fn delete_many(&self, filter: &Filter) -> SeedingResult<u64> {
		let mut documents = self.documents.write();
		let before = documents.len();
		documents.retain(|document| !filter.matches(document));
		Ok((before - documents.len()) as u64)
	}
}

/// Account service storing users in a [`MemoryCollection`].
///
/// Documents follow the usual accounts layout:
/// `{ "_id", "emails": [{ "address", "verified" }], "username"?, "profile", "createdAt" }`.
/// Passwords are accepted but never stored.
#[derive(Debug)]
pub struct MemoryAccounts {
	users: Arc<MemoryCollection>,
	created: AtomicUsize,
}

impl MemoryAccounts {
	/// Creates an account service writing into `users`.
	pub fn new(users: Arc<MemoryCollection>) -> Self {
		Self {
			users,
			created: AtomicUsize::new(0),
		}
	}

	/// Returns how many accounts were created through this service.
	pub fn created_count(&self) -> usize {
		self.created.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl AccountService for MemoryAccounts {
	fn users(&self) -> &dyn Collection {
		&*self.users
	}

	async fn create_user(&self, user: NewUser) -> SeedingResult<RecordId> {
		let email_taken = Filter::eq("emails.address", user.email.as_str());
		if self.users.count(&email_taken).await? > 0 {
			return Err(SeedingError::AccountError(format!(
				"Email already exists: {}",
				user.email
			)));
		}
		if let Some(username) = &user.username {
			if self
				.users
				.count(&Filter::eq("username", username.as_str()))
				.await? > 0
			{
				return Err(SeedingError::AccountError(format!(
					"Username already exists: {}",
					username
				)));
			}
		}

		let mut document = user.extra;
		document.insert(
			"emails".to_string(),
			json!([{ "address": user.email, "verified": false }]),
		);
		if let Some(username) = user.username {
			document.insert("username".to_string(), Value::String(username));
		}
		document.insert("profile".to_string(), user.profile);
		document.insert(
			"createdAt".to_string(),
			Value::String(Utc::now().to_rfc3339()),
		);

		let id = self.users.insert_one(document).await?;
		self.created.fetch_add(1, Ordering::SeqCst);
		Ok(id)
	}
}

/// Role service recording assignments in memory.
///
/// Blank role names are rejected with [`SeedingError::RoleError`].
#[derive(Debug, Default)]
pub struct MemoryRoles {
	assignments: Mutex<Vec<(RecordId, Vec<String>)>>,
}

impl MemoryRoles {
	/// Creates an empty role service.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns every assignment in call order.
	pub fn assignments(&self) -> Vec<(RecordId, Vec<String>)> {
		self.assignments.lock().clone()
	}

	/// Returns the roles assigned to a user, across all calls.
	pub fn roles_for(&self, user_id: &RecordId) -> Vec<String> {
		let mut roles: Vec<String> = Vec::new();
		for (id, assigned) in self.assignments.lock().iter() {
			if id == user_id {
				for role in assigned {
					if !roles.contains(role) {
						roles.push(role.clone());
					}
				}
			}
		}
		roles
	}
}

#[async_trait]
impl RoleService for MemoryRoles {
	async fn add_users_to_roles(&self, user_id: &RecordId, roles: &[String]) -> SeedingResult<()> {
		if roles.iter().any(|role| role.trim().is_empty()) {
			return Err(SeedingError::RoleError(format!(
				"Invalid role name for user {}: role names must not be blank",
				user_id
			)));
		}
		self.assignments
			.lock()
			.push((user_id.clone(), roles.to_vec()));
		Ok(())
	}
}
