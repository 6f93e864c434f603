//! Error types for the seeder.
//!
//! Configuration problems are reported before any record is touched (with the
//! exception of dynamic generator lookups, which happen when the dynamic step
//! is reached). Failures while creating a record abort the pass and are
//! wrapped in [`SeedingError::RecordFailed`] so the offending collection and
//! index are visible at the top-level caller.

use thiserror::Error;

/// Errors that can occur during seeding operations.
#[derive(Debug, Error)]
pub enum SeedingError {
	/// A required configuration option was not supplied.
	#[error("Missing required option: {0}")]
	MissingOption(String),

	/// A configuration option has the wrong shape or value.
	#[error("Invalid option: {field}: {message}")]
	InvalidOption {
		/// Option path (e.g. `data.dynamic.count`).
		field: String,
		/// What is wrong with it.
		message: String,
	},

	/// The collection handle does not expose a storage driver.
	#[error("Value passed for \"collection\" is not a document collection: {0}")]
	InvalidCollection(String),

	/// Seeding was invoked outside a server runtime.
	#[error("Seeding is only intended to be run in a server runtime")]
	ServerOnly,

	/// A dynamic configuration names a generator that is not registered.
	#[error("Generator not found: {0}")]
	GeneratorNotFound(String),

	/// A record literal failed validation.
	#[error("Validation error: {field}: {message}")]
	ValidationError {
		/// Field that failed validation.
		field: String,
		/// Validation error message.
		message: String,
	},

	/// Collection operation failed.
	#[error("Database error: {0}")]
	DatabaseError(String),

	/// The account-creation capability rejected a user.
	#[error("Account error: {0}")]
	AccountError(String),

	/// The role-assignment capability failed.
	#[error("Role assignment error: {0}")]
	RoleError(String),

	/// Creating a single record failed; the pass was aborted.
	#[error("Failed to seed record {index} of \"{collection}\": {source}")]
	RecordFailed {
		/// Name of the collection being seeded.
		collection: String,
		/// Zero-based position of the record within its data source.
		index: usize,
		/// Underlying failure.
		#[source]
		source: Box<SeedingError>,
	},

	/// Error parsing a configuration document.
	#[error("Parse error: {0}")]
	ParseError(String),

	/// I/O operation failed.
	#[error("IO error: {0}")]
	IoError(#[from] std::io::Error),

	/// JSON serialization/deserialization error.
	#[error("JSON error: {0}")]
	JsonError(#[from] serde_json::Error),

	/// YAML serialization/deserialization error (when yaml feature is enabled).
	#[cfg(feature = "yaml")]
	#[error("YAML error: {0}")]
	YamlError(#[from] serde_yaml::Error),

	/// Configuration file not found.
	#[error("Configuration file not found: {0}")]
	FileNotFound(String),

	/// Unsupported file extension.
	#[error("Unsupported file extension: {0}")]
	UnsupportedExtension(String),
}

impl SeedingError {
	/// Shorthand for [`SeedingError::InvalidOption`].
	pub fn invalid_option(field: impl Into<String>, message: impl Into<String>) -> Self {
		Self::InvalidOption {
			field: field.into(),
			message: message.into(),
		}
	}

	/// Shorthand for [`SeedingError::ValidationError`].
	pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
		Self::ValidationError {
			field: field.into(),
			message: message.into(),
		}
	}

	/// Returns true if the error describes a configuration mistake rather than
	/// a failure of the storage or account backends.
	///
	/// Errors raised by a nested (dependent) pass are looked through.
	pub fn is_configuration_error(&self) -> bool {
		match self {
			Self::MissingOption(_)
			| Self::InvalidOption { .. }
			| Self::InvalidCollection(_)
			| Self::ServerOnly
			| Self::GeneratorNotFound(_) => true,
			Self::RecordFailed { source, .. } => source.is_configuration_error(),
			_ => false,
		}
	}

	/// Returns the innermost error, unwrapping nested [`SeedingError::RecordFailed`].
	pub fn root_cause(&self) -> &SeedingError {
		let mut current = self;
		while let Self::RecordFailed { source, .. } = current {
			current = source;
		}
		current
	}
}

/// Result type alias for seeding operations.
pub type SeedingResult<T> = Result<T, SeedingError>;
