//! Configuration document parsing.

use std::path::Path;

use serde_json::{Map, Value};
use tracing::debug;

use super::FixtureFormat;
use crate::collection::CollectionKind;
use crate::config::{DynamicData, Generator, SeedConfiguration, SeedData};
use crate::error::{SeedingError, SeedingResult};
use crate::record::{SeedRecord, value_kind};

/// Parser for seed configuration documents.
///
/// Recognized keys are `environments`, `resetCollection`,
/// `seedIfExistingData`, `kind`, `data.static`, `data.dynamic.count` and
/// `data.dynamic.seed`. Anything else is ignored. Missing required options
/// are left unset and reported when the configuration is used.
#[derive(Debug, Default)]
pub struct FixtureParser;

impl FixtureParser {
	/// Creates a new parser.
	pub fn new() -> Self {
		Self
	}

	/// Parses a configuration file.
	///
	/// The format is detected from the file extension.
	///
	/// # Errors
	///
	/// Returns an error if:
	/// - The file extension is not recognized
	/// - The file cannot be read
	/// - The content is not valid JSON/YAML
	/// - An option has the wrong shape
	pub fn parse_file(&self, path: &Path) -> SeedingResult<SeedConfiguration> {
		let format = FixtureFormat::from_path(path).ok_or_else(|| {
			SeedingError::UnsupportedExtension(
				path.extension()
					.and_then(|e| e.to_str())
					.unwrap_or("(none)")
					.to_string(),
			)
		})?;

		let content = std::fs::read_to_string(path).map_err(|e| {
			if e.kind() == std::io::ErrorKind::NotFound {
				SeedingError::FileNotFound(path.display().to_string())
			} else {
				SeedingError::IoError(e)
			}
		})?;

		debug!(path = %path.display(), %format, "Parsing seed configuration");
		self.parse_string(&content, format)
	}

	/// Parses configuration content in the given format.
	pub fn parse_string(
		&self,
		content: &str,
		format: FixtureFormat,
	) -> SeedingResult<SeedConfiguration> {
		let value = match format {
			FixtureFormat::Json => serde_json::from_str(content)?,
			FixtureFormat::Yaml => self.parse_yaml(content)?,
		};
		self.parse_value(value)
	}

	/// Parses YAML content.
	#[cfg(feature = "yaml")]
	fn parse_yaml(&self, content: &str) -> SeedingResult<Value> {
		Ok(serde_yaml::from_str(content)?)
	}

	/// Stub for YAML parsing when the feature is not enabled.
	#[cfg(not(feature = "yaml"))]
	fn parse_yaml(&self, _content: &str) -> SeedingResult<Value> {
		Err(SeedingError::UnsupportedExtension(
			"YAML support requires the 'yaml' feature".to_string(),
		))
	}

	/// Builds a configuration from an already decoded document.
	pub fn parse_value(&self, value: Value) -> SeedingResult<SeedConfiguration> {
		let mut root = match value {
			Value::Object(root) => root,
			other => {
				return Err(SeedingError::ParseError(format!(
					"Expected a configuration object, found {}",
					value_kind(&other)
				)));
			}
		};

		let mut config = SeedConfiguration::new();

		if let Some(environments) = root.remove("environments") {
			config.environments = Some(parse_environments(environments)?);
		}
		if let Some(reset) = root.remove("resetCollection") {
			config.reset_collection = parse_bool("resetCollection", reset)?;
		}
		if let Some(seed) = root.remove("seedIfExistingData") {
			config.seed_if_existing_data = parse_bool("seedIfExistingData", seed)?;
		}
		if let Some(kind) = root.remove("kind") {
			config.kind = Some(parse_kind(kind)?);
		}
		if let Some(data) = root.remove("data") {
			config.data = Some(parse_data(data)?);
		}

		Ok(config)
	}
}

fn parse_environments(value: Value) -> SeedingResult<Vec<String>> {
	let items = match value {
		Value::Array(items) => items,
		other => {
			return Err(SeedingError::invalid_option(
				"environments",
				format!("expected an array of names, found {}", value_kind(&other)),
			));
		}
	};
	items
		.into_iter()
		.map(|item| match item {
			Value::String(name) => Ok(name),
			other => Err(SeedingError::invalid_option(
				"environments",
				format!("environment names must be strings, found {}", value_kind(&other)),
			)),
		})
		.collect()
}

fn parse_bool(field: &str, value: Value) -> SeedingResult<bool> {
	match value {
		Value::Bool(flag) => Ok(flag),
		other => Err(SeedingError::invalid_option(
			field,
			format!("expected a boolean, found {}", value_kind(&other)),
		)),
	}
}

fn parse_kind(value: Value) -> SeedingResult<CollectionKind> {
	match &value {
		Value::String(kind) => CollectionKind::parse(kind).ok_or_else(|| {
			SeedingError::invalid_option(
				"kind",
				format!("unknown collection kind \"{}\" (expected \"users\" or \"generic\")", kind),
			)
		}),
		other => Err(SeedingError::invalid_option(
			"kind",
			format!("expected a string, found {}", value_kind(other)),
		)),
	}
}

fn parse_data(value: Value) -> SeedingResult<SeedData> {
	let mut data = match value {
		Value::Object(data) => data,
		other => {
			return Err(SeedingError::invalid_option(
				"data",
				format!("expected an object, found {}", value_kind(&other)),
			));
		}
	};

	let static_records = data.remove("static").map(parse_static).transpose()?;
	let dynamic = data.remove("dynamic").map(parse_dynamic).transpose()?;

	Ok(SeedData {
		static_records,
		dynamic,
	})
}

fn parse_static(value: Value) -> SeedingResult<Vec<SeedRecord>> {
	let items = match value {
		Value::Array(items) => items,
		other => {
			return Err(SeedingError::invalid_option(
				"data.static",
				format!("expected an array of records, found {}", value_kind(&other)),
			));
		}
	};
	items
		.into_iter()
		.enumerate()
		.map(|(idx, item)| match item {
			Value::Object(fields) => Ok(SeedRecord::new(fields)),
			other => Err(SeedingError::invalid_option(
				format!("data.static[{}]", idx),
				format!("expected an object, found {}", value_kind(&other)),
			)),
		})
		.collect()
}

fn parse_dynamic(value: Value) -> SeedingResult<DynamicData> {
	let mut dynamic = match value {
		Value::Object(dynamic) => dynamic,
		other => {
			return Err(SeedingError::invalid_option(
				"data.dynamic",
				format!("expected an object, found {}", value_kind(&other)),
			));
		}
	};

	let count = take_count(&mut dynamic)?;
	let generator = match dynamic.remove("seed") {
		Some(Value::String(name)) => Generator::Named(name),
		Some(other) => {
			return Err(SeedingError::invalid_option(
				"data.dynamic.seed",
				format!(
					"expected the name of a registered generator, found {}",
					value_kind(&other)
				),
			));
		}
		None => return Err(SeedingError::MissingOption("data.dynamic.seed".to_string())),
	};

	Ok(DynamicData { count, generator })
}

fn take_count(dynamic: &mut Map<String, Value>) -> SeedingResult<usize> {
	match dynamic.remove("count") {
		Some(Value::Number(number)) => number
			.as_u64()
			.and_then(|count| usize::try_from(count).ok())
			.ok_or_else(|| {
				SeedingError::invalid_option(
					"data.dynamic.count",
					format!("expected a non-negative integer, found {}", number),
				)
			}),
		Some(other) => Err(SeedingError::invalid_option(
			"data.dynamic.count",
			format!("expected a number, found {}", value_kind(&other)),
		)),
		None => Err(SeedingError::MissingOption("data.dynamic.count".to_string())),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;
	use std::io::Write;
	use tempfile::NamedTempFile;

	#[rstest]
	fn test_parse_full_document() {
		let parser = FixtureParser::new();
		let content = r#"{
            "environments": ["development", "staging"],
            "resetCollection": true,
            "seedIfExistingData": true,
            "kind": "users",
            "comment": "ignored",
            "data": {
                "static": [{"email": "admin@example.com", "roles": ["admin"]}],
                "dynamic": {"count": 5, "seed": "users.Random"}
            }
        }"#;

		let config = parser.parse_string(content, FixtureFormat::Json).unwrap();
		assert_eq!(
			config.environments,
			Some(vec!["development".to_string(), "staging".to_string()])
		);
		assert!(config.reset_collection);
		assert!(config.seed_if_existing_data);
		assert_eq!(config.kind, Some(CollectionKind::Users));

		let data = config.data.unwrap();
		let records = data.static_records.unwrap();
		assert_eq!(records.len(), 1);
		assert_eq!(records[0].get("email"), Some(&json!("admin@example.com")));

		let dynamic = data.dynamic.unwrap();
		assert_eq!(dynamic.count, 5);
		assert!(matches!(dynamic.generator, Generator::Named(ref name) if name == "users.Random"));
	}

	#[rstest]
	fn test_defaults_when_flags_absent() {
		let parser = FixtureParser::new();
		let config = parser
			.parse_value(json!({ "environments": ["development"], "data": { "static": [] } }))
			.unwrap();

		assert!(!config.reset_collection);
		assert!(!config.seed_if_existing_data);
		assert!(config.kind.is_none());
		assert!(config.validate().is_ok());
	}

	#[rstest]
	fn test_missing_environments_left_for_validation() {
		let parser = FixtureParser::new();
		let config = parser
			.parse_value(json!({ "data": { "static": [{ "title": "x" }] } }))
			.unwrap();

		assert!(matches!(
			config.validate(),
			Err(SeedingError::MissingOption(ref field)) if field == "environments"
		));
	}

	#[rstest]
	#[case(json!({ "data": { "static": { "title": "x" } } }), "data.static")]
	#[case(json!({ "data": { "static": ["x"] } }), "data.static[0]")]
	#[case(json!({ "data": { "dynamic": { "count": "ten", "seed": "g" } } }), "data.dynamic.count")]
	#[case(json!({ "data": { "dynamic": { "count": -1, "seed": "g" } } }), "data.dynamic.count")]
	#[case(json!({ "data": { "dynamic": { "count": 1.5, "seed": "g" } } }), "data.dynamic.count")]
	#[case(json!({ "data": { "dynamic": { "count": 2, "seed": 3 } } }), "data.dynamic.seed")]
	#[case(json!({ "data": [] }), "data")]
	#[case(json!({ "environments": "development" }), "environments")]
	#[case(json!({ "resetCollection": "yes" }), "resetCollection")]
	#[case(json!({ "kind": "posts" }), "kind")]
	fn test_invalid_options(#[case] document: Value, #[case] expected_field: &str) {
		let result = FixtureParser::new().parse_value(document);
		match result {
			Err(SeedingError::InvalidOption { field, .. }) => assert_eq!(field, expected_field),
			other => panic!("expected InvalidOption for {}, got {:?}", expected_field, other),
		}
	}

	#[rstest]
	fn test_dynamic_requires_seed() {
		let result = FixtureParser::new().parse_value(json!({ "data": { "dynamic": { "count": 2 } } }));
		assert!(matches!(
			result,
			Err(SeedingError::MissingOption(ref field)) if field == "data.dynamic.seed"
		));
	}

	#[rstest]
	fn test_root_must_be_object() {
		let result = FixtureParser::new().parse_string("[1, 2]", FixtureFormat::Json);
		assert!(matches!(result, Err(SeedingError::ParseError(_))));
	}

	#[rstest]
	fn test_invalid_json() {
		let result = FixtureParser::new().parse_string("{ not json", FixtureFormat::Json);
		assert!(matches!(result, Err(SeedingError::JsonError(_))));
	}

	#[rstest]
	fn test_parse_file() {
		let parser = FixtureParser::new();
		let mut file = NamedTempFile::with_suffix(".json").unwrap();
		writeln!(
			file,
			r#"{{"environments": ["test"], "data": {{"static": [{{"title": "Document #1"}}]}}}}"#
		)
		.unwrap();

		let config = parser.parse_file(file.path()).unwrap();
		assert_eq!(config.environments, Some(vec!["test".to_string()]));
	}

	#[rstest]
	fn test_parse_file_not_found() {
		let parser = FixtureParser::new();
		let result = parser.parse_file(Path::new("/nonexistent/seeds.json"));
		assert!(matches!(result, Err(SeedingError::FileNotFound(_))));
	}

	#[rstest]
	fn test_parse_unsupported_extension() {
		let parser = FixtureParser::new();
		let result = parser.parse_file(Path::new("seeds.xml"));
		assert!(matches!(result, Err(SeedingError::UnsupportedExtension(_))));
	}

	#[cfg(feature = "yaml")]
	#[rstest]
	fn test_parse_yaml() {
		let parser = FixtureParser::new();
		let content = r#"
environments:
  - development
seedIfExistingData: true
data:
  static:
    - title: "Document #1"
    - title: "Document #2"
"#;

		let config = parser.parse_string(content, FixtureFormat::Yaml).unwrap();
		assert!(config.seed_if_existing_data);
		assert_eq!(config.data.unwrap().static_records.unwrap().len(), 2);
	}
}
