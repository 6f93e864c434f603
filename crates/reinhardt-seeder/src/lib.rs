//! Development-time seeding of document collections for the Reinhardt framework.
//!
//! This crate fills collections with records while developing:
//!
//! - **Static data**: a fixed list of records seeded verbatim, in order
//! - **Dynamic data**: a count plus a generator called once per index with a
//!   [`FakeData`] provider
//! - **Dependent data**: a per-record callback that seeds other collections
//!   once its record exists
//! - **User collections**: deduplicated by email/username, created through an
//!   [`AccountService`], with roles assigned through an optional [`RoleService`]
//!
//! # Features
//!
//! - `json` - JSON configuration documents (enabled by default)
//! - `yaml` - YAML configuration documents
//! - `full` - All features enabled
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//!
//! use reinhardt_seeder::prelude::*;
//!
//! # tokio_test::block_on(async {
//! let users = MemoryCollection::shared("users");
//! let seeder = Seeder::builder()
//!     .environment(FixedEnvironment::new("development"))
//!     .accounts(Arc::new(MemoryAccounts::new(Arc::clone(&users))))
//!     .roles(Arc::new(MemoryRoles::new()))
//!     .build();
//!
//! let config = SeedConfiguration::new()
//!     .environments(["development"])
//!     .dynamic(5, |i, _faker| {
//!         SeedRecord::user(format!("user+{}@test.com", i)).roles(["user"])
//!     });
//!
//! let report = seeder.seed(&*users, &config).await?;
//! assert_eq!(report.created, 5);
//!
//! // A second run is a no-op: the collection already holds data.
//! let report = seeder.seed(&*users, &config).await?;
//! assert_eq!(report.outcome, SeedOutcome::ExistingData);
//! # Ok::<(), SeedingError>(())
//! # }).unwrap();
//! ```
//!
//! # Seeding pass
//!
//! [`Seeder::seed`] runs, in order: the host-runtime guard, collection and
//! configuration validation, the environment gate, the optional reset, the
//! existing-data check, then static and dynamic records one at a time.
//!
//! - An environment outside the allow-list skips the pass with a warning
//!   ([`SeedOutcome::EnvironmentDenied`]); nothing is written.
//! - A failure while creating a record aborts the pass (and every enclosing
//!   dependent pass) with [`SeedingError::RecordFailed`].
//!
//! # Architecture
//!
//! - [`Collection`](collection::Collection) - storage seam, queried with [`Filter`]
//! - [`SeedConfiguration`](config::SeedConfiguration) - one pass worth of options
//! - [`Seeder`](seeder::Seeder) - the orchestrator
//! - [`DependentData`](dependent::DependentData) - post-creation callbacks
//! - [`FixtureParser`](fixtures::FixtureParser) - JSON/YAML configuration documents
//! - [`registry`] - named generators for configuration documents
//! - [`memory`] - in-memory collection, account and role backends

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod accounts;
pub mod collection;
pub mod config;
pub mod dependent;
pub mod environment;
pub mod error;
pub mod faker;
pub mod fixtures;
mod handlers;
pub mod memory;
pub mod prelude;
pub mod record;
pub mod registry;
pub mod seeder;

// Re-export commonly used types at crate root
pub use accounts::{AccountService, NewUser, RoleService};
pub use collection::{Collection, CollectionKind, Filter, USERS_COLLECTION};
pub use config::{DynamicData, Generator, SeedConfiguration, SeedData};
pub use dependent::{DependentCollection, DependentData};
pub use environment::{
	EnvironmentGate, EnvironmentSource, FixedEnvironment, HostRuntime, ProcessEnvironment,
};
pub use error::{SeedingError, SeedingResult};
pub use faker::{FakeData, FakerType};
pub use fixtures::{FixtureFormat, FixtureParser};
pub use memory::{MemoryAccounts, MemoryCollection, MemoryRoles};
pub use record::{Fields, RecordId, SeedRecord};
pub use seeder::{SeedOutcome, SeedReport, Seeder, SeederBuilder};
