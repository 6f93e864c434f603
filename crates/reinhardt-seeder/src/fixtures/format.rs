//! Configuration document formats.

use std::path::Path;

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum FixtureFormat {
	/// JSON documents.
	#[default]
	Json,
	/// YAML documents, parsed only with the `yaml` feature.
	Yaml,
}

impl FixtureFormat {
	/// Determines the format from a file extension.
	///
	/// # Example
	///
	/// ```
	/// # use reinhardt_seeder::fixtures::FixtureFormat;
	/// assert_eq!(FixtureFormat::from_extension("json"), Some(FixtureFormat::Json));
	/// assert_eq!(FixtureFormat::from_extension("yaml"), Some(FixtureFormat::Yaml));
	/// assert_eq!(FixtureFormat::from_extension("yml"), Some(FixtureFormat::Yaml));
	/// assert_eq!(FixtureFormat::from_extension("xml"), None);
	/// ```
	pub fn from_extension(ext: &str) -> Option<Self> {
		[("json", Self::Json), ("yaml", Self::Yaml), ("yml", Self::Yaml)]
			.into_iter()
			.find(|(known, _)| ext.eq_ignore_ascii_case(known))
			.map(|(_, format)| format)
	}

	/// Determines the format from a file path such as `seeds/users.yml`.
	pub fn from_path(path: &Path) -> Option<Self> {
		Self::from_extension(path.extension()?.to_str()?)
	}

	/// Returns the default file extension for this format.
	pub fn extension(&self) -> &'static str {
		match self {
			Self::Json => "json",
			Self::Yaml => "yaml",
		}
	}
}

impl std::fmt::Display for FixtureFormat {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(match self {
			Self::Json => "JSON",
			Self::Yaml => "YAML",
		})
	}
}
