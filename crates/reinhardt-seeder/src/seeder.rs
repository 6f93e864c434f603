//! Seeding orchestrator.
//!
//! One call to [`Seeder::seed`] is one seeding pass over one collection:
//!
//! 1. refuse to run outside a server runtime
//! 2. validate the collection handle and the configuration
//! 3. consult the environment gate (a denial skips the pass with a warning)
//! 4. optionally wipe the collection
//! 5. skip the pass if data already exists, unless told otherwise
//!
//! For user passes, steps 4 and 5 and the duplicate check run against the
//! account service's own store.
//! 6. seed static records, then dynamic records, one at a time
//!
//! Each record goes through the user or generic handler and, once created,
//! through its dependent callback. Everything is awaited in order, so a
//! record's dependent data exists before the next record is attempted.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::accounts::{AccountService, RoleService};
use crate::collection::{Collection, CollectionKind, Filter};
use crate::config::SeedConfiguration;
use crate::dependent;
use crate::environment::{EnvironmentGate, EnvironmentSource, HostRuntime};
use crate::error::{SeedingError, SeedingResult};
use crate::faker::FakeData;
use crate::handlers;
use crate::record::SeedRecord;

/// How a seeding pass ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
	/// The data sources were processed.
	Seeded,
	/// The current environment is not in the allow-list; nothing was touched.
	EnvironmentDenied,
	/// The collection already held records; nothing was seeded.
	ExistingData,
}

/// Statistics of one seeding pass.
///
/// Records created by dependent (child) passes are not counted here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedReport {
	/// Collection name.
	pub collection: String,
	/// How the pass ended.
	pub outcome: SeedOutcome,
	/// Records created in this collection.
	pub created: usize,
	/// User records skipped because the user already existed.
	pub skipped_duplicates: usize,
	/// Records removed by `reset_collection`.
	pub removed: u64,
}

impl SeedReport {
	fn new(collection: &str) -> Self {
		Self {
			collection: collection.to_string(),
			outcome: SeedOutcome::Seeded,
			created: 0,
			skipped_duplicates: 0,
			removed: 0,
		}
	}

	/// Returns true if the data sources were processed.
	pub fn is_seeded(&self) -> bool {
		self.outcome == SeedOutcome::Seeded
	}
}

/// Seeds collections.
///
/// # Example
///
/// ```
/// use reinhardt_seeder::{
///     FixedEnvironment, MemoryCollection, SeedConfiguration, SeedRecord, Seeder,
/// };
///
/// # tokio_test::block_on(async {
/// let seeder = Seeder::builder()
///     .environment(FixedEnvironment::new("development"))
///     .build();
/// let documents = MemoryCollection::new("Documents");
/// let config = SeedConfiguration::new()
///     .environments(["development"])
///     .dynamic(3, |i, _| SeedRecord::default().field("title", format!("Document #{}", i + 1)));
///
/// let report = seeder.seed(&documents, &config).await.unwrap();
/// assert_eq!(report.created, 3);
/// assert_eq!(documents.len(), 3);
/// # })
/// ```
pub struct Seeder {
	accounts: Option<Arc<dyn AccountService>>,
	roles: Option<Arc<dyn RoleService>>,
	gate: EnvironmentGate,
	runtime: HostRuntime,
	faker: FakeData,
}

impl Seeder {
	/// Starts building a seeder.
	pub fn builder() -> SeederBuilder {
		SeederBuilder::default()
	}

	/// Returns the environment gate.
	pub fn gate(&self) -> &EnvironmentGate {
		&self.gate
	}

	/// Runs one seeding pass.
	///
	/// # Errors
	///
	/// Configuration errors are returned before anything is written. A failure
	/// while creating a record aborts the pass with
	/// [`SeedingError::RecordFailed`]; records created before it are kept.
	pub async fn seed(
		&self,
		collection: &dyn Collection,
		config: &SeedConfiguration,
	) -> SeedingResult<SeedReport> {
		if !self.runtime.is_server() {
			return Err(SeedingError::ServerOnly);
		}
		self.validate_collection(collection)?;
		let (environments, data) = config.validate()?;

		let name = collection.name();
		let kind = config
			.kind
			.unwrap_or_else(|| CollectionKind::from_name(name));
		let accounts = match kind {
			CollectionKind::Users => Some(self.accounts.as_deref().ok_or_else(|| {
				SeedingError::MissingOption(format!(
					"account service (required to seed user collection \"{}\")",
					name
				))
			})?),
			CollectionKind::Generic => None,
		};

		// User passes reset, probe and deduplicate against the account store.
		let store: &dyn Collection = match accounts {
			Some(accounts) => accounts.users(),
			None => collection,
		};
		if store.name() != name {
			debug!(collection = name, store = store.name(), "Using account store for user pass");
		}

		let mut report = SeedReport::new(name);

		if !self.gate.allowed(environments) {
			warn!(
				collection = name,
				environment = ?self.gate.current(),
				allowed = ?environments,
				"Seeding skipped: environment not allowed"
			);
			report.outcome = SeedOutcome::EnvironmentDenied;
			return Ok(report);
		}

		if config.reset_collection {
			report.removed = store.delete_many(&Filter::All).await?;
			debug!(collection = name, removed = report.removed, "Collection reset");
		}

		if !config.seed_if_existing_data && self.has_existing_data(store).await? {
			debug!(collection = name, "Seeding skipped: collection already has data");
			report.outcome = SeedOutcome::ExistingData;
			return Ok(report);
		}

		info!(collection = name, %kind, "Seeding collection");

		if let Some(records) = &data.static_records {
			for (index, record) in records.iter().enumerate() {
				self.seed_record(store, accounts, record, index, &mut report)
					.await?;
			}
		}

		if let Some(dynamic) = &data.dynamic {
			let generator = dynamic.generator.resolve()?;
			for index in 0..dynamic.count {
				let record = generator(index, &self.faker);
				self.seed_record(store, accounts, &record, index, &mut report)
					.await?;
			}
		}

		info!(
			collection = name,
			created = report.created,
			skipped_duplicates = report.skipped_duplicates,
			"Seeding complete"
		);
		Ok(report)
	}

	/// Rejects handles that do not expose a storage driver.
	pub fn validate_collection<'a>(
		&self,
		collection: &'a dyn Collection,
	) -> SeedingResult<&'a dyn Collection> {
		match collection.driver() {
			Some(driver) if !driver.is_empty() => Ok(collection),
			_ => Err(SeedingError::InvalidCollection(collection.name().to_string())),
		}
	}

	/// Returns true if the collection holds at least one record.
	pub async fn has_existing_data(&self, collection: &dyn Collection) -> SeedingResult<bool> {
		Ok(collection.count(&Filter::All).await? > 0)
	}

	async fn seed_record(
		&self,
		store: &dyn Collection,
		accounts: Option<&dyn AccountService>,
		record: &SeedRecord,
		index: usize,
		report: &mut SeedReport,
	) -> SeedingResult<()> {
		self.create_record(store, accounts, record, report)
			.await
			.map_err(|source| SeedingError::RecordFailed {
				collection: report.collection.clone(),
				index,
				source: Box::new(source),
			})
	}

	async fn create_record(
		&self,
		store: &dyn Collection,
		accounts: Option<&dyn AccountService>,
		record: &SeedRecord,
		report: &mut SeedReport,
	) -> SeedingResult<()> {
		let id = match accounts {
			Some(accounts) => {
				handlers::create_user(store, accounts, self.roles.as_deref(), record).await?
			}
			None => Some(handlers::insert_record(store, record).await?),
		};

		match id {
			Some(id) => {
				report.created += 1;
				dependent::dispatch(self, record, &id).await
			}
			None => {
				report.skipped_duplicates += 1;
				Ok(())
			}
		}
	}
}

impl std::fmt::Debug for Seeder {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Seeder")
			.field("accounts", &self.accounts.is_some())
			.field("roles", &self.roles.is_some())
			.field("gate", &self.gate)
			.field("runtime", &self.runtime)
			.finish()
	}
}

/// Builder for [`Seeder`].
#[derive(Default)]
pub struct SeederBuilder {
	accounts: Option<Arc<dyn AccountService>>,
	roles: Option<Arc<dyn RoleService>>,
	gate: Option<EnvironmentGate>,
	runtime: HostRuntime,
	faker: FakeData,
}

impl SeederBuilder {
	/// Sets the account service used for user collections.
	pub fn accounts(mut self, accounts: Arc<dyn AccountService>) -> Self {
		self.accounts = Some(accounts);
		self
	}

	/// Sets the role service. Without one, roles on user records are ignored.
	pub fn roles(mut self, roles: Arc<dyn RoleService>) -> Self {
		self.roles = Some(roles);
		self
	}

	/// Sets the source of the current environment name.
	///
	/// Defaults to [`ProcessEnvironment`](crate::ProcessEnvironment).
	pub fn environment(mut self, source: impl EnvironmentSource + 'static) -> Self {
		self.gate = Some(EnvironmentGate::new(source));
		self
	}

	/// Sets the host runtime. Defaults to [`HostRuntime::Server`].
	pub fn runtime(mut self, runtime: HostRuntime) -> Self {
		self.runtime = runtime;
		self
	}

	/// Sets the fake data provider handed to generators.
	pub fn faker(mut self, faker: FakeData) -> Self {
		self.faker = faker;
		self
	}

	/// Builds the seeder.
	pub fn build(self) -> Seeder {
		Seeder {
			accounts: self.accounts,
			roles: self.roles,
			gate: self.gate.unwrap_or_default(),
			runtime: self.runtime,
			faker: self.faker,
		}
	}
}
