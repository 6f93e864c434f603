//! Convenience re-exports for common usage.
//!
//! # Example
//!
//! ```ignore
//! use reinhardt_seeder::prelude::*;
//! ```

// Error types
pub use crate::error::{SeedingError, SeedingResult};

// Orchestration
pub use crate::config::{SeedConfiguration, SeedData};
pub use crate::seeder::{SeedOutcome, SeedReport, Seeder, SeederBuilder};

// Records and collections
pub use crate::collection::{Collection, CollectionKind, Filter};
pub use crate::record::{RecordId, SeedRecord};

// Collaborators
pub use crate::accounts::{AccountService, NewUser, RoleService};
pub use crate::dependent::{DependentCollection, DependentData};
pub use crate::environment::{FixedEnvironment, HostRuntime, ProcessEnvironment};
pub use crate::faker::{FakeData, FakerType};

// Configuration documents and generators
pub use crate::fixtures::{FixtureFormat, FixtureParser};
pub use crate::registry::{GeneratorRegistry, register_generator};

// In-memory backends
pub use crate::memory::{MemoryAccounts, MemoryCollection, MemoryRoles};
