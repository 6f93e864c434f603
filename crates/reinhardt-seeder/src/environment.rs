//! Environment gate and host-runtime guard.

use std::env;

/// Default variable holding the current environment name.
pub const DEFAULT_ENVIRONMENT_VARIABLE: &str = "REINHARDT_ENV";

/// Source of the current environment name.
pub trait EnvironmentSource: Send + Sync {
	/// Returns the current environment name, if one is set.
	fn current_environment(&self) -> Option<String>;
}

/// Reads the environment name from a process environment variable.
#[derive(Debug, Clone)]
pub struct ProcessEnvironment {
	variable: String,
}

impl ProcessEnvironment {
	/// Reads from [`DEFAULT_ENVIRONMENT_VARIABLE`].
	pub fn new() -> Self {
		Self::with_variable(DEFAULT_ENVIRONMENT_VARIABLE)
	}

	/// Reads from a custom variable.
	pub fn with_variable(variable: impl Into<String>) -> Self {
		Self {
			variable: variable.into(),
		}
	}

	/// Returns the variable name.
	pub fn variable(&self) -> &str {
		&self.variable
	}
}

impl Default for ProcessEnvironment {
	fn default() -> Self {
		Self::new()
	}
}

impl EnvironmentSource for ProcessEnvironment {
	fn current_environment(&self) -> Option<String> {
		env::var(&self.variable).ok().filter(|value| !value.is_empty())
	}
}

/// A fixed environment name, mostly for tests and embedded hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedEnvironment(pub String);

impl FixedEnvironment {
	/// Creates a fixed environment.
	pub fn new(name: impl Into<String>) -> Self {
		Self(name.into())
	}
}

impl EnvironmentSource for FixedEnvironment {
	fn current_environment(&self) -> Option<String> {
		Some(self.0.clone())
	}
}

/// Decides whether seeding may run in the current environment.
pub struct EnvironmentGate {
	source: Box<dyn EnvironmentSource>,
}

impl EnvironmentGate {
	/// Creates a gate over the given source.
	pub fn new(source: impl EnvironmentSource + 'static) -> Self {
		Self {
			source: Box::new(source),
		}
	}

	/// Returns the current environment name.
	pub fn current(&self) -> Option<String> {
		self.source.current_environment()
	}

	/// Returns true iff the current environment is one of `environments`.
	///
	/// An unset environment is never allowed.
	pub fn allowed<S: AsRef<str>>(&self, environments: &[S]) -> bool {
		match self.current() {
			Some(current) => environments.iter().any(|name| name.as_ref() == current),
			None => false,
		}
	}
}

impl Default for EnvironmentGate {
	fn default() -> Self {
		Self::new(ProcessEnvironment::new())
	}
}

impl std::fmt::Debug for EnvironmentGate {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("EnvironmentGate")
			.field("current", &self.current())
			.finish()
	}
}

/// Execution context of the hosting process.
///
/// Seeding mutates storage directly and may only run server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HostRuntime {
	/// Backend process with direct storage access.
	#[default]
	Server,
	/// Client-side (browser/WASM) context.
	Client,
}

impl HostRuntime {
	/// Returns true for [`HostRuntime::Server`].
	pub fn is_server(&self) -> bool {
		matches!(self, Self::Server)
	}
}
