//! Seed configuration.
//!
//! A [`SeedConfiguration`] describes one seeding pass: where seeding may run,
//! which records to create and what to do with data already present. It is
//! read-only to the [`Seeder`](crate::Seeder) and may be reused.

use std::fmt;
use std::sync::Arc;

use crate::collection::CollectionKind;
use crate::error::{SeedingError, SeedingResult};
use crate::faker::FakeData;
use crate::record::SeedRecord;
use crate::registry;

/// Signature of a dynamic record generator.
///
/// Called with the zero-based index and the fake data provider.
pub type GeneratorFn = dyn Fn(usize, &FakeData) -> SeedRecord + Send + Sync;

/// Produces records for dynamic data.
#[derive(Clone)]
pub enum Generator {
	/// An inline function.
	Function(Arc<GeneratorFn>),
	/// A generator registered under a name with [`registry::register_generator`].
	Named(String),
}

impl Generator {
	/// Wraps a function.
	pub fn function<F>(generator: F) -> Self
	where
		F: Fn(usize, &FakeData) -> SeedRecord + Send + Sync + 'static,
	{
		Self::Function(Arc::new(generator))
	}

	/// Resolves the generator to a callable.
	///
	/// # Errors
	///
	/// Returns [`SeedingError::GeneratorNotFound`] if a named generator is
	/// not registered.
	pub fn resolve(&self) -> SeedingResult<Arc<GeneratorFn>> {
		match self {
			Self::Function(generator) => Ok(Arc::clone(generator)),
			Self::Named(name) => registry::get_generator(name)
				.ok_or_else(|| SeedingError::GeneratorNotFound(name.clone())),
		}
	}
}

impl fmt::Debug for Generator {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Function(_) => f.write_str("Generator::Function(..)"),
			Self::Named(name) => f.debug_tuple("Generator::Named").field(name).finish(),
		}
	}
}

/// Generated records: `count` invocations of `generator`.
#[derive(Debug, Clone)]
pub struct DynamicData {
	/// Number of records to generate.
	pub count: usize,
	/// Record generator.
	pub generator: Generator,
}

/// Data sources of a pass. Both run when both are present, static first.
#[derive(Debug, Clone, Default)]
pub struct SeedData {
	/// Records seeded verbatim, in order.
	pub static_records: Option<Vec<SeedRecord>>,
	/// Records produced by a generator.
	pub dynamic: Option<DynamicData>,
}

impl SeedData {
	/// Returns true if neither source is present.
	pub fn is_empty(&self) -> bool {
		self.static_records.is_none() && self.dynamic.is_none()
	}
}

/// Configuration of a single seeding pass.
///
/// # Example
///
/// ```
/// use reinhardt_seeder::{SeedConfiguration, SeedRecord};
/// use serde_json::json;
///
/// let config = SeedConfiguration::new()
///     .environments(["development"])
///     .static_records([
///         SeedRecord::from_value(json!({ "title": "Document #1" })).unwrap(),
///         SeedRecord::from_value(json!({ "title": "Document #2" })).unwrap(),
///     ]);
/// assert!(!config.reset_collection);
/// assert!(!config.seed_if_existing_data);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SeedConfiguration {
	/// Environment names in which seeding may run. Required.
	pub environments: Option<Vec<String>>,
	/// Data sources. Required.
	pub data: Option<SeedData>,
	/// Remove every existing record before seeding.
	pub reset_collection: bool,
	/// Seed even if the collection already holds records.
	pub seed_if_existing_data: bool,
	/// How records are created; inferred from the collection name when unset.
	pub kind: Option<CollectionKind>,
}

impl SeedConfiguration {
	/// Creates an empty configuration.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the environment allow-list.
	pub fn environments<I, S>(mut self, environments: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.environments = Some(environments.into_iter().map(Into::into).collect());
		self
	}

	/// Sets the static records.
	pub fn static_records(mut self, records: impl IntoIterator<Item = SeedRecord>) -> Self {
		self.data_mut().static_records = Some(records.into_iter().collect());
		self
	}

	/// Sets dynamic data backed by an inline generator.
	pub fn dynamic<F>(mut self, count: usize, generator: F) -> Self
	where
		F: Fn(usize, &FakeData) -> SeedRecord + Send + Sync + 'static,
	{
		self.data_mut().dynamic = Some(DynamicData {
			count,
			generator: Generator::function(generator),
		});
		self
	}

	/// Sets dynamic data backed by a registered generator.
	pub fn dynamic_named(mut self, count: usize, name: impl Into<String>) -> Self {
		self.data_mut().dynamic = Some(DynamicData {
			count,
			generator: Generator::Named(name.into()),
		});
		self
	}

	/// Sets whether existing records are removed first.
	pub fn reset_collection(mut self, reset: bool) -> Self {
		self.reset_collection = reset;
		self
	}

	/// Sets whether a populated collection is seeded anyway.
	pub fn seed_if_existing_data(mut self, seed: bool) -> Self {
		self.seed_if_existing_data = seed;
		self
	}

	/// Sets the collection kind explicitly.
	pub fn kind(mut self, kind: CollectionKind) -> Self {
		self.kind = Some(kind);
		self
	}

	fn data_mut(&mut self) -> &mut SeedData {
		self.data.get_or_insert_with(SeedData::default)
	}

	/// Checks that the required options are present.
	///
	/// Returns the allow-list and the data sources on success.
	pub fn validate(&self) -> SeedingResult<(&[String], &SeedData)> {
		let environments = self
			.environments
			.as_deref()
			.ok_or_else(|| SeedingError::MissingOption("environments".to_string()))?;
		if environments.is_empty() {
			return Err(SeedingError::invalid_option(
				"environments",
				"at least one environment name is required",
			));
		}

		let data = self
			.data
			.as_ref()
			.ok_or_else(|| SeedingError::MissingOption("data".to_string()))?;
		if data.is_empty() {
			return Err(SeedingError::invalid_option(
				"data",
				"either \"static\" or \"dynamic\" data is required",
			));
		}

		Ok((environments, data))
	}
}
