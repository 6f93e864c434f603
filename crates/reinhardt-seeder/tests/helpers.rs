//! Shared helpers for reinhardt-seeder integration tests.
//!
//! Provides recording and failing account/role services, dependent callbacks
//! that observe the parent collection, and a preconfigured seeder fixture.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use reinhardt_seeder::prelude::*;
use reinhardt_seeder::{Fields, USERS_COLLECTION};
use rstest::fixture;
use serde_json::{Value, json};

/// Environment every seeder built here runs in.
pub const ENVIRONMENT: &str = "development";

/// Account service that counts every call before delegating.
pub struct RecordingAccounts {
	inner: MemoryAccounts,
	calls: AtomicUsize,
	emails: Mutex<Vec<String>>,
}

impl RecordingAccounts {
	pub fn new(users: Arc<MemoryCollection>) -> Self {
		Self {
			inner: MemoryAccounts::new(users),
			calls: AtomicUsize::new(0),
			emails: Mutex::new(Vec::new()),
		}
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}

	pub fn emails(&self) -> Vec<String> {
		self.emails.lock().clone()
	}
}

#[async_trait]
impl AccountService for RecordingAccounts {
	fn users(&self) -> &dyn Collection {
		self.inner.users()
	}

	async fn create_user(&self, user: NewUser) -> SeedingResult<RecordId> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		self.emails.lock().push(user.email.clone());
		self.inner.create_user(user).await
	}
}

/// Dependent callback recording each parent id and whether the parent
/// record was already visible when it ran.
#[derive(Clone)]
pub struct ParentLookup {
	parents: Arc<MemoryCollection>,
	seen: Arc<Mutex<Vec<(RecordId, bool)>>>,
}

impl ParentLookup {
	pub fn new(parents: Arc<MemoryCollection>) -> Self {
		Self {
			parents,
			seen: Arc::new(Mutex::new(Vec::new())),
		}
	}

	pub fn seen(&self) -> Vec<(RecordId, bool)> {
		self.seen.lock().clone()
	}
}

#[async_trait]
impl DependentData for ParentLookup {
	async fn seed(&self, _seeder: &Seeder, parent_id: &RecordId) -> SeedingResult<()> {
		let visible = self
			.parents
			.find_one(&Filter::eq("_id", parent_id.as_str()))
			.await?
			.is_some();
		self.seen.lock().push((parent_id.clone(), visible));
		Ok(())
	}
}

/// Account service rejecting every user.
pub struct FailingAccounts {
	users: Arc<MemoryCollection>,
	calls: AtomicUsize,
}

impl FailingAccounts {
	pub fn new(users: Arc<MemoryCollection>) -> Self {
		Self {
			users,
			calls: AtomicUsize::new(0),
		}
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl AccountService for FailingAccounts {
	fn users(&self) -> &dyn Collection {
		&*self.users
	}

	async fn create_user(&self, user: NewUser) -> SeedingResult<RecordId> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		Err(SeedingError::AccountError(format!(
			"Account backend unavailable for {}",
			user.email
		)))
	}
}

/// Role service failing every assignment.
#[derive(Default)]
pub struct FailingRoles {
	calls: AtomicUsize,
}

impl FailingRoles {
	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl RoleService for FailingRoles {
	async fn add_users_to_roles(&self, user_id: &RecordId, _roles: &[String]) -> SeedingResult<()> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		Err(SeedingError::RoleError(format!("Role store unavailable for {}", user_id)))
	}
}

/// Dependent callback that seeds `per_parent` children, then records how many
/// parents and children are stored at that point.
#[derive(Clone)]
pub struct CascadeLog {
	parents: Arc<MemoryCollection>,
	children: Arc<MemoryCollection>,
	per_parent: usize,
	log: Arc<Mutex<Vec<(usize, usize)>>>,
}

impl CascadeLog {
	pub fn new(
		parents: Arc<MemoryCollection>,
		children: Arc<MemoryCollection>,
		per_parent: usize,
	) -> Self {
		Self {
			parents,
			children,
			per_parent,
			log: Arc::new(Mutex::new(Vec::new())),
		}
	}

	/// `(parents stored, children stored)` after each dependent pass.
	pub fn entries(&self) -> Vec<(usize, usize)> {
		self.log.lock().clone()
	}
}

#[async_trait]
impl DependentData for CascadeLog {
	async fn seed(&self, seeder: &Seeder, parent_id: &RecordId) -> SeedingResult<()> {
		let parent_id = parent_id.clone();
		let config = allowed()
			.seed_if_existing_data(true)
			.dynamic(self.per_parent, move |i, _| {
				SeedRecord::default()
					.field("parentId", parent_id.as_str())
					.field("n", i)
			});
		seeder.seed(&*self.children, &config).await?;
		self.log
			.lock()
			.push((self.parents.len(), self.children.len()));
		Ok(())
	}
}

/// A seeder wired to in-memory backends.
pub struct Harness {
	pub seeder: Seeder,
	pub users: Arc<MemoryCollection>,
	pub accounts: Arc<RecordingAccounts>,
	pub roles: Arc<MemoryRoles>,
}

impl Harness {
	/// Builds a harness whose current environment is `environment`.
	pub fn in_environment(environment: &str) -> Self {
		let users = MemoryCollection::shared(USERS_COLLECTION);
		let accounts = Arc::new(RecordingAccounts::new(Arc::clone(&users)));
		let roles = Arc::new(MemoryRoles::new());
		let seeder = Seeder::builder()
			.environment(FixedEnvironment::new(environment))
			.accounts(accounts.clone())
			.roles(roles.clone())
			.build();

		Self {
			seeder,
			users,
			accounts,
			roles,
		}
	}
}

#[fixture]
pub fn harness() -> Harness {
	Harness::in_environment(ENVIRONMENT)
}

/// Configuration allowed in [`ENVIRONMENT`].
pub fn allowed() -> SeedConfiguration {
	SeedConfiguration::new().environments([ENVIRONMENT])
}

/// Builds a record from a JSON object literal.
pub fn record(value: Value) -> SeedRecord {
	SeedRecord::from_value(value).expect("test records are JSON objects")
}

/// Inserts a pre-existing document directly, bypassing the seeder.
pub async fn prefill(collection: &MemoryCollection, value: Value) {
	let fields: Fields = value
		.as_object()
		.cloned()
		.expect("prefilled documents are JSON objects");
	collection.insert_one(fields).await.expect("insert succeeds");
}

/// Inserts a user document shaped like the account service writes them.
pub async fn prefill_user(users: &MemoryCollection, email: &str) {
	prefill(
		users,
		json!({ "emails": [{ "address": email, "verified": true }], "profile": {} }),
	)
	.await;
}
