//! Record literals and identifiers.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::dependent::DependentData;
use crate::error::{SeedingError, SeedingResult};

/// Field mapping stored in a collection.
pub type Fields = Map<String, Value>;

/// Identifier assigned to a record by its collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
	/// Wraps a backend identifier.
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	/// Returns the identifier as a string slice.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for RecordId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<String> for RecordId {
	fn from(id: String) -> Self {
		Self(id)
	}
}

impl From<&str> for RecordId {
	fn from(id: &str) -> Self {
		Self(id.to_string())
	}
}

/// A single record to seed.
///
/// `fields` is what ends up in the collection. The optional dependent
/// callback is kept apart from the fields so it never reaches storage.
///
/// # Example
///
/// ```
/// use reinhardt_seeder::SeedRecord;
/// use serde_json::json;
///
/// let record = SeedRecord::from_value(json!({ "title": "Document #1" })).unwrap();
/// assert_eq!(record.get("title"), Some(&json!("Document #1")));
/// ```
#[derive(Clone, Default)]
pub struct SeedRecord {
	fields: Fields,
	dependent: Option<Arc<dyn DependentData>>,
}

impl SeedRecord {
	/// Creates a record from a field mapping.
	pub fn new(fields: Fields) -> Self {
		Self {
			fields,
			dependent: None,
		}
	}

	/// Creates a record from a JSON value, which must be an object.
	pub fn from_value(value: Value) -> SeedingResult<Self> {
		match value {
			Value::Object(fields) => Ok(Self::new(fields)),
			other => Err(SeedingError::validation(
				"record",
				format!("expected an object, found {}", value_kind(&other)),
			)),
		}
	}

	/// Starts a user record with the given email.
	pub fn user(email: impl Into<String>) -> Self {
		let mut fields = Fields::new();
		fields.insert("email".to_string(), Value::String(email.into()));
		Self::new(fields)
	}

	/// Sets a field, replacing any previous value.
	pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
		self.fields.insert(name.into(), value.into());
		self
	}

	/// Sets the `password` field of a user record.
	pub fn password(self, password: impl Into<String>) -> Self {
		self.field("password", Value::String(password.into()))
	}

	/// Sets the `username` field of a user record.
	pub fn username(self, username: impl Into<String>) -> Self {
		self.field("username", Value::String(username.into()))
	}

	/// Sets the `profile` field of a user record.
	pub fn profile(self, profile: Value) -> Self {
		self.field("profile", profile)
	}

	/// Sets the `roles` field of a user record.
	pub fn roles<I, S>(self, roles: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let roles = roles
			.into_iter()
			.map(|role| Value::String(role.into()))
			.collect();
		self.field("roles", Value::Array(roles))
	}

	/// Attaches a callback run once this record has been created.
	pub fn dependent_data(mut self, dependent: impl DependentData + 'static) -> Self {
		self.dependent = Some(Arc::new(dependent));
		self
	}

	/// Attaches an already shared dependent callback.
	pub fn with_dependent(mut self, dependent: Arc<dyn DependentData>) -> Self {
		self.dependent = Some(dependent);
		self
	}

	/// Returns the field mapping.
	pub fn fields(&self) -> &Fields {
		&self.fields
	}

	/// Returns a field value.
	pub fn get(&self, name: &str) -> Option<&Value> {
		self.fields.get(name)
	}

	/// Returns the dependent callback, if any.
	pub fn dependent(&self) -> Option<&Arc<dyn DependentData>> {
		self.dependent.as_ref()
	}
}

impl fmt::Debug for SeedRecord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SeedRecord")
			.field("fields", &self.fields)
			.field("dependent", &self.dependent.is_some())
			.finish()
	}
}

impl From<Fields> for SeedRecord {
	fn from(fields: Fields) -> Self {
		Self::new(fields)
	}
}

pub(crate) fn value_kind(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "a boolean",
		Value::Number(_) => "a number",
		Value::String(_) => "a string",
		Value::Array(_) => "an array",
		Value::Object(_) => "an object",
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_from_value_requires_object() {
		let result = SeedRecord::from_value(json!(["not", "a", "record"]));
		assert!(matches!(
			result,
			Err(SeedingError::ValidationError { ref field, .. }) if field == "record"
		));
	}

	#[rstest]
	fn test_user_builder_sets_fields() {
		let record = SeedRecord::user("admin@example.com")
			.password("secret")
			.username("admin")
			.roles(["admin", "editor"]);

		assert_eq!(record.get("email"), Some(&json!("admin@example.com")));
		assert_eq!(record.get("password"), Some(&json!("secret")));
		assert_eq!(record.get("username"), Some(&json!("admin")));
		assert_eq!(record.get("roles"), Some(&json!(["admin", "editor"])));
		assert!(record.dependent().is_none());
	}

	#[rstest]
	fn test_record_id_display() {
		let id = RecordId::new("abc123");
		assert_eq!(id.to_string(), "abc123");
		assert_eq!(id.as_str(), "abc123");
		assert_eq!(RecordId::from("abc123"), id);
	}
}
