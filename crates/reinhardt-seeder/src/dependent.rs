//! Dependent seeding.
//!
//! A record may carry a [`DependentData`] callback. Once the record has been
//! created (duplicates skipped by the user handler never get here), the
//! callback runs exactly once with the new identifier and may seed other
//! collections through the [`Seeder`] it is given. The child pass completes
//! before the parent moves on to its next record, and any error it returns
//! aborts the parent pass as well.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::collection::Collection;
use crate::config::SeedConfiguration;
use crate::error::SeedingResult;
use crate::record::{RecordId, SeedRecord};
use crate::seeder::Seeder;

/// Callback run after its record has been created.
///
/// # Example
///
/// ```rust,ignore
/// struct SeedComments(Arc<MemoryCollection>);
///
/// #[async_trait]
/// impl DependentData for SeedComments {
///     async fn seed(&self, seeder: &Seeder, parent_id: &RecordId) -> SeedingResult<()> {
///         let config = SeedConfiguration::new()
///             .environments(["development"])
///             .seed_if_existing_data(true)
///             .dynamic(5, |i, _| SeedRecord::default().field("n", i));
///         seeder.seed(&*self.0, &config).await?;
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait DependentData: Send + Sync {
	/// Seeds data that depends on the record identified by `parent_id`.
	async fn seed(&self, seeder: &Seeder, parent_id: &RecordId) -> SeedingResult<()>;
}

/// Signature of the configuration factory used by [`DependentCollection`].
pub type ConfigureFn = dyn Fn(&RecordId) -> SeedConfiguration + Send + Sync;

/// Seeds one child collection with a configuration built from the parent id.
///
/// # Example
///
/// ```
/// use reinhardt_seeder::{DependentCollection, MemoryCollection, SeedConfiguration, SeedRecord};
///
/// let comments = MemoryCollection::shared("Comments");
/// let dependent = DependentCollection::new(comments, |document_id| {
///     let document_id = document_id.clone();
///     SeedConfiguration::new()
///         .environments(["development"])
///         .seed_if_existing_data(true)
///         .dynamic(5, move |i, _| {
///             SeedRecord::default()
///                 .field("documentId", document_id.as_str())
///                 .field("body", format!("Comment #{}", i + 1))
///         })
/// });
/// let document = SeedRecord::default()
///     .field("title", "Document #1")
///     .dependent_data(dependent);
/// assert!(document.dependent().is_some());
/// ```
#[derive(Clone)]
pub struct DependentCollection {
	collection: Arc<dyn Collection>,
	configure: Arc<ConfigureFn>,
}

impl DependentCollection {
	/// Creates a dependent seeding step for `collection`.
	pub fn new<F>(collection: Arc<dyn Collection>, configure: F) -> Self
	where
		F: Fn(&RecordId) -> SeedConfiguration + Send + Sync + 'static,
	{
		Self {
			collection,
			configure: Arc::new(configure),
		}
	}
}

impl fmt::Debug for DependentCollection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DependentCollection")
			.field("collection", &self.collection.name())
			.finish()
	}
}

#[async_trait]
impl DependentData for DependentCollection {
	async fn seed(&self, seeder: &Seeder, parent_id: &RecordId) -> SeedingResult<()> {
		let config = (self.configure)(parent_id);
		seeder.seed(self.collection.as_ref(), &config).await?;
		Ok(())
	}
}

/// Runs the record's dependent callback, if it has one.
pub(crate) async fn dispatch(
	seeder: &Seeder,
	record: &SeedRecord,
	id: &RecordId,
) -> SeedingResult<()> {
	if let Some(dependent) = record.dependent() {
		debug!(parent_id = %id, "Seeding dependent data");
		dependent.seed(seeder, id).await?;
	}
	Ok(())
}
