//! Collection abstraction consumed by the seeder.
//!
//! The seeder never creates or drops collections. It only needs enough of a
//! document store to insert records, look one up, count them and wipe them.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::SeedingResult;
use crate::record::{Fields, RecordId};

/// Name of the collection that is treated as user accounts when no explicit
/// [`CollectionKind`] is configured.
pub const USERS_COLLECTION: &str = "users";

/// Query filter understood by every [`Collection`].
///
/// Paths are dotted (`emails.address`). A path segment that lands on an array
/// matches if any element matches the rest of the path.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
	/// Matches every record.
	All,
	/// Matches records whose value at `path` equals `value`.
	Eq {
		/// Dotted field path.
		path: String,
		/// Expected value.
		value: Value,
	},
	/// Matches records that satisfy any of the inner filters.
	Or(Vec<Filter>),
}

impl Filter {
	/// Equality filter on a dotted path.
	pub fn eq(path: impl Into<String>, value: impl Into<Value>) -> Self {
		Self::Eq {
			path: path.into(),
			value: value.into(),
		}
	}

	/// Evaluates the filter against a document.
	pub fn matches(&self, document: &Fields) -> bool {
		match self {
			Self::All => true,
			Self::Eq { path, value } => {
				let segments: Vec<&str> = path.split('.').collect();
				match_path(document, &segments, value)
			}
			Self::Or(filters) => filters.iter().any(|filter| filter.matches(document)),
		}
	}

	/// Renders the filter as a MongoDB-style query document.
	///
	/// ```
	/// use reinhardt_seeder::Filter;
	/// use serde_json::json;
	///
	/// let filter = Filter::Or(vec![
	///     Filter::eq("emails.address", "a@example.com"),
	///     Filter::eq("username", "a"),
	/// ]);
	/// assert_eq!(
	///     filter.to_document(),
	///     json!({ "$or": [{ "emails.address": "a@example.com" }, { "username": "a" }] })
	/// );
	/// ```
	pub fn to_document(&self) -> Value {
		match self {
			Self::All => Value::Object(Map::new()),
			Self::Eq { path, value } => {
				let mut document = Map::new();
				document.insert(path.clone(), value.clone());
				Value::Object(document)
			}
			Self::Or(filters) => {
				let mut document = Map::new();
				document.insert(
					"$or".to_string(),
					Value::Array(filters.iter().map(Filter::to_document).collect()),
				);
				Value::Object(document)
			}
		}
	}
}

fn match_path(document: &Fields, segments: &[&str], expected: &Value) -> bool {
	let Some((head, rest)) = segments.split_first() else {
		return false;
	};
	match document.get(*head) {
		Some(value) => match_value(value, rest, expected),
		None => false,
	}
}

fn match_value(value: &Value, rest: &[&str], expected: &Value) -> bool {
	match value {
		Value::Array(items) => {
			if rest.is_empty() && value == expected {
				return true;
			}
			items.iter().any(|item| match_value(item, rest, expected))
		}
		Value::Object(object) if !rest.is_empty() => match_path(object, rest, expected),
		_ => rest.is_empty() && value == expected,
	}
}

/// How records of a collection are created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum CollectionKind {
	/// Plain insertion.
	#[default]
	Generic,
	/// User accounts: deduplicated and created through the account service.
	Users,
}

impl CollectionKind {
	/// Infers the kind from a collection name.
	///
	/// Only the exact name `"users"` selects [`CollectionKind::Users`].
	pub fn from_name(name: &str) -> Self {
		if name == USERS_COLLECTION {
			Self::Users
		} else {
			Self::Generic
		}
	}

	/// Parses a configured kind (`"users"` or `"generic"`).
	pub fn parse(value: &str) -> Option<Self> {
		match value.to_lowercase().as_str() {
			"users" | "user" => Some(Self::Users),
			"generic" => Some(Self::Generic),
			_ => None,
		}
	}
}

impl std::fmt::Display for CollectionKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Generic => write!(f, "generic"),
			Self::Users => write!(f, "users"),
		}
	}
}

/// A named, mutable set of documents owned by a storage backend.
///
/// # Example
///
/// ```rust,ignore
/// let id = collection.insert_one(fields).await?;
/// let found = collection.find_one(&Filter::eq("_id", id.as_str())).await?;
/// ```
#[async_trait]
pub trait Collection: Send + Sync {
	/// Symbolic collection name.
	fn name(&self) -> &str;

	/// Storage driver marker (e.g. `"mongodb"`).
	///
	/// Handles that return `None` are rejected before any mutation.
	fn driver(&self) -> Option<&str>;

	/// Inserts a document and returns its identifier.
	async fn insert_one(&self, document: Fields) -> SeedingResult<RecordId>;

	/// Returns the first document matching `filter`.
	async fn find_one(&self, filter: &Filter) -> SeedingResult<Option<Fields>>;

	/// Counts documents matching `filter`.
	async fn count(&self, filter: &Filter) -> SeedingResult<u64>;

	/// Removes every document matching `filter` and returns how many were removed.
	async fn delete_many(&self, filter: &Filter) -> SeedingResult<u64>;
}
