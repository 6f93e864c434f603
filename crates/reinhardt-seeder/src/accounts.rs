//! Account-creation and role-assignment capabilities.
//!
//! The seeder never hashes passwords or writes user documents itself. User
//! records are handed to an [`AccountService`]; roles go to an optional
//! [`RoleService`]. Existing-data checks and duplicate lookups for user
//! passes run against [`AccountService::users`], the store accounts are
//! written to.

use async_trait::async_trait;
use serde_json::Value;

use crate::collection::Collection;
use crate::error::{SeedingError, SeedingResult};
use crate::record::{Fields, RecordId, SeedRecord, value_kind};

/// User data handed to [`AccountService::create_user`].
///
/// Built from a [`SeedRecord`] without its `roles` field. The source record
/// is left untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
	/// Primary email address.
	pub email: String,
	/// Optional login name.
	pub username: Option<String>,
	/// Optional clear-text password for the account backend to hash.
	pub password: Option<String>,
	/// Free-form profile document; `{}` when absent.
	pub profile: Value,
	/// Any other fields present on the record.
	pub extra: Fields,
}

/// A user record split into account data and roles.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct UserLiteral {
	pub(crate) user: NewUser,
	pub(crate) roles: Vec<String>,
}

impl UserLiteral {
	pub(crate) fn from_record(record: &SeedRecord) -> SeedingResult<Self> {
		let mut extra = record.fields().clone();

		let email = match extra.remove("email") {
			Some(Value::String(email)) => email,
			Some(other) => {
				return Err(SeedingError::validation(
					"email",
					format!("expected a string, found {}", value_kind(&other)),
				));
			}
			None => {
				return Err(SeedingError::validation(
					"email",
					"user records require an email address",
				));
			}
		};
		let username = optional_string(&mut extra, "username")?;
		let password = optional_string(&mut extra, "password")?;
		let profile = match extra.remove("profile") {
			None | Some(Value::Null) => Value::Object(Fields::new()),
			Some(profile) => profile,
		};
		let roles = match extra.remove("roles") {
			None | Some(Value::Null) => Vec::new(),
			Some(Value::Array(items)) => items
				.into_iter()
				.map(|item| match item {
					Value::String(role) => Ok(role),
					other => Err(SeedingError::validation(
						"roles",
						format!("role names must be strings, found {}", value_kind(&other)),
					)),
				})
				.collect::<SeedingResult<Vec<_>>>()?,
			Some(other) => {
				return Err(SeedingError::validation(
					"roles",
					format!("expected an array, found {}", value_kind(&other)),
				));
			}
		};

		Ok(Self {
			user: NewUser {
				email,
				username,
				password,
				profile,
				extra,
			},
			roles,
		})
	}
}

fn optional_string(fields: &mut Fields, name: &str) -> SeedingResult<Option<String>> {
	match fields.remove(name) {
		None | Some(Value::Null) => Ok(None),
		Some(Value::String(value)) => Ok(Some(value)),
		Some(other) => Err(SeedingError::validation(
			name,
			format!("expected a string, found {}", value_kind(&other)),
		)),
	}
}

/// Creates user accounts.
#[async_trait]
pub trait AccountService: Send + Sync {
	/// Collection the created accounts are stored in.
	fn users(&self) -> &dyn Collection;

	/// Creates an account and returns the new user's identifier.
	async fn create_user(&self, user: NewUser) -> SeedingResult<RecordId>;
}

/// Assigns roles to users.
#[async_trait]
pub trait RoleService: Send + Sync {
	/// Adds `roles` to the user identified by `user_id`.
	async fn add_users_to_roles(&self, user_id: &RecordId, roles: &[String]) -> SeedingResult<()>;
}
