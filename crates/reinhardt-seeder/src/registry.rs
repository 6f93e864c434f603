//! Generator registry for named dynamic data.
//!
//! Configuration documents cannot carry functions, so their dynamic data
//! refers to generators by name. This module provides the global registry
//! those names are looked up in.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::config::GeneratorFn;
use crate::faker::FakeData;
use crate::record::SeedRecord;

/// Global generator registry.
static GENERATOR_REGISTRY: Lazy<RwLock<HashMap<String, Arc<GeneratorFn>>>> =
	Lazy::new(|| RwLock::new(HashMap::new()));

/// Registers a generator under `name`, replacing any previous one.
///
/// # Example
///
/// ```
/// use reinhardt_seeder::{SeedRecord, registry::{has_generator, register_generator}};
///
/// register_generator("docs.Document", |index, _faker| {
///     SeedRecord::default().field("title", format!("Document #{}", index + 1))
/// });
/// assert!(has_generator("docs.Document"));
/// ```
pub fn register_generator<F>(name: impl Into<String>, generator: F)
where
	F: Fn(usize, &FakeData) -> SeedRecord + Send + Sync + 'static,
{
	GENERATOR_REGISTRY
		.write()
		.insert(name.into(), Arc::new(generator));
}

/// Gets a generator by name.
pub fn get_generator(name: &str) -> Option<Arc<GeneratorFn>> {
	GENERATOR_REGISTRY.read().get(name).cloned()
}

/// Checks if a generator is registered under `name`.
pub fn has_generator(name: &str) -> bool {
	GENERATOR_REGISTRY.read().contains_key(name)
}

/// Returns all registered generator names.
pub fn generator_names() -> Vec<String> {
	GENERATOR_REGISTRY.read().keys().cloned().collect()
}

/// Removes a generator, returning true if it was registered.
pub fn unregister_generator(name: &str) -> bool {
	GENERATOR_REGISTRY.write().remove(name).is_some()
}

/// Clears all registered generators.
///
/// This is primarily useful for testing.
pub fn clear_generators() {
	GENERATOR_REGISTRY.write().clear();
}

/// Registry handle for scoped operations.
#[derive(Debug, Default)]
pub struct GeneratorRegistry;

impl GeneratorRegistry {
	/// Creates a new registry handle.
	pub fn new() -> Self {
		Self
	}

	/// Registers a generator.
	pub fn register<F>(&self, name: impl Into<String>, generator: F)
	where
		F: Fn(usize, &FakeData) -> SeedRecord + Send + Sync + 'static,
	{
		register_generator(name, generator);
	}

	/// Gets a generator by name.
	pub fn get(&self, name: &str) -> Option<Arc<GeneratorFn>> {
		get_generator(name)
	}

	/// Checks if a generator is registered.
	pub fn has(&self, name: &str) -> bool {
		has_generator(name)
	}

	/// Returns all registered names.
	pub fn names(&self) -> Vec<String> {
		generator_names()
	}

	/// Returns the number of registered generators.
	pub fn len(&self) -> usize {
		GENERATOR_REGISTRY.read().len()
	}

	/// Returns true if no generators are registered.
	pub fn is_empty(&self) -> bool {
		GENERATOR_REGISTRY.read().is_empty()
	}

	/// Clears all generators (primarily for testing).
	pub fn clear(&self) {
		clear_generators();
	}
}
