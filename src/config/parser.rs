use crate::config::types::Config;
use crate::error::{RerouteError, Result};
use crate::rules::{Rule, validate_rules};
use std::path::Path;

/// Parse a config file from the given path.
pub fn parse_config_file(path: &Path) -> Result<Config> {
	let content = std::fs::read_to_string(path).map_err(|source| RerouteError::ConfigReadError {
		path: path.to_path_buf(),
		source,
	})?;

	parse_config_str(&content, path)
}

/// Parse a config from a string (useful for testing).
pub fn parse_config_str(content: &str, path: &Path) -> Result<Config> {
	toml::from_str(content).map_err(|source| RerouteError::ConfigParseError {
		path: path.to_path_buf(),
		source,
	})
}

/// Options for loading rewrite rules from a config file.
#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
	/// Validate rules after loading. On by default.
	pub validate: bool,
}

impl Default for LoadOptions {
	fn default() -> Self {
		LoadOptions { validate: true }
	}
}

/// Rules loaded from a config file, plus any advisory warnings.
#[derive(Debug, Clone, Default)]
pub struct LoadedRules {
	/// Rules in evaluation order.
	pub rules: Vec<Rule>,

	/// Validator warnings. Advisory only; the rules remain usable, but
	/// callers should surface these.
	pub warnings: Vec<String>,
}

/// Load rewrite rules from a config file.
///
/// With validation enabled, a rule set the validator rejects is a hard
/// failure carrying the accumulated error messages. Warnings never block;
/// they are returned alongside the rules.
pub fn load_rules(path: &Path, options: LoadOptions) -> Result<LoadedRules> {
	if !path.exists() {
		return Err(RerouteError::ConfigNotFound {
			path: path.to_path_buf(),
		});
	}

	let config = parse_config_file(path)?;
	let rules = config.into_rules();

	if !options.validate {
		return Ok(LoadedRules {
			rules,
			warnings: Vec::new(),
		});
	}

	let result = validate_rules(&rules);
	if !result.valid {
		return Err(RerouteError::ConfigInvalid {
			path: path.to_path_buf(),
			errors: result.errors,
		});
	}

	Ok(LoadedRules {
		rules,
		warnings: result.warnings,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::rules::SegmentSpec;
	use std::path::PathBuf;

	#[test]
	fn test_parse_empty_config() {
		let path = PathBuf::from("test.toml");
		let config = parse_config_str("", &path).unwrap();

		assert!(!config.root);
		assert!(config.rule.is_none());
		assert!(config.rules.is_empty());
	}

	#[test]
	fn test_parse_rules_array_of_tables() {
		let content = r#"
root = true

[[rules]]
name = "profile-certificates"
description = "Strip /certificates from username profile URLs"

[rules.pattern]
segments = ["*", "certificates"]
strip-segments = [1]

[[rules]]
name = "challenge-tabs"

[rules.pattern]
segments = ["community", "monthly-challenge", "*", "*"]
strip-segments = [3]

[[rules.pattern.allowed-values]]
segment = 3
values = ["submissions", "winners"]
"#;
		let path = PathBuf::from("test.toml");
		let config = parse_config_str(content, &path).unwrap();

		assert!(config.root);
		assert_eq!(config.rules.len(), 2);

		let rule1 = &config.rules[0];
		assert_eq!(rule1.name.as_deref(), Some("profile-certificates"));
		assert_eq!(rule1.pattern.segments, vec!["*", "certificates"]);
		assert_eq!(rule1.pattern.strip_segments, vec![1]);

		let rule2 = &config.rules[1];
		assert_eq!(rule2.pattern.allowed_values.len(), 1);
		assert_eq!(rule2.pattern.allowed_values[0].segment, 3);
		assert_eq!(
			rule2.pattern.allowed_values[0].values,
			vec!["submissions", "winners"]
		);
	}

	#[test]
	fn test_parse_single_rule_table() {
		let content = r#"
[rule]
name = "solo"

[rule.pattern]
segments = ["a", "*"]
strip-segments = [1]
"#;
		let path = PathBuf::from("test.toml");
		let config = parse_config_str(content, &path).unwrap();

		let rules = config.into_rules();
		assert_eq!(rules.len(), 1);
		assert_eq!(rules[0].name.as_deref(), Some("solo"));
		assert_eq!(rules[0].pattern.segments[1], SegmentSpec::Wildcard);
	}

	#[test]
	fn test_parse_invalid_toml() {
		let path = PathBuf::from("test.toml");
		let result = parse_config_str("rules = not-a-list", &path);

		assert!(matches!(
			result.unwrap_err(),
			RerouteError::ConfigParseError { .. }
		));
	}

	#[test]
	fn test_load_rules_valid_config() {
		let temp_dir = tempfile::tempdir().unwrap();
		let path = temp_dir.path().join(".reroute.toml");
		std::fs::write(
			&path,
			r#"
[[rules]]
name = "certs"

[rules.pattern]
segments = ["*", "certificates"]
strip-segments = [1]
"#,
		)
		.unwrap();

		let loaded = load_rules(&path, LoadOptions::default()).unwrap();

		assert_eq!(loaded.rules.len(), 1);
		assert!(loaded.warnings.is_empty());
	}

	#[test]
	fn test_load_rules_invalid_config_fails() {
		let temp_dir = tempfile::tempdir().unwrap();
		let path = temp_dir.path().join(".reroute.toml");
		std::fs::write(
			&path,
			r#"
[[rules]]
name = "broken"

[rules.pattern]
segments = ["a"]
strip-segments = [5]
"#,
		)
		.unwrap();

		let result = load_rules(&path, LoadOptions::default());

		match result.unwrap_err() {
			RerouteError::ConfigInvalid { errors, .. } => {
				assert!(errors.iter().any(|e| e.contains("exceeds pattern length")));
			}
			other => panic!("Expected ConfigInvalid error, got {other:?}"),
		}
	}

	#[test]
	fn test_load_rules_skip_validation() {
		let temp_dir = tempfile::tempdir().unwrap();
		let path = temp_dir.path().join(".reroute.toml");
		std::fs::write(
			&path,
			r#"
[[rules]]
[rules.pattern]
segments = ["a"]
strip-segments = [5]
"#,
		)
		.unwrap();

		let loaded = load_rules(&path, LoadOptions { validate: false }).unwrap();

		assert_eq!(loaded.rules.len(), 1);
	}

	#[test]
	fn test_load_rules_surfaces_warnings() {
		let temp_dir = tempfile::tempdir().unwrap();
		let path = temp_dir.path().join(".reroute.toml");
		std::fs::write(
			&path,
			r#"
[[rules]]
name = "specific"

[rules.pattern]
segments = ["user", "profile"]

[[rules]]
name = "wildcard"

[rules.pattern]
segments = ["*", "*"]
"#,
		)
		.unwrap();

		let loaded = load_rules(&path, LoadOptions::default()).unwrap();

		assert_eq!(loaded.rules.len(), 2);
		assert!(loaded.warnings.iter().any(|w| w.contains("may shadow")));
	}

	#[test]
	fn test_load_rules_missing_file() {
		let temp_dir = tempfile::tempdir().unwrap();
		let path = temp_dir.path().join("missing.toml");

		let result = load_rules(&path, LoadOptions::default());

		assert!(matches!(
			result.unwrap_err(),
			RerouteError::ConfigNotFound { .. }
		));
	}
}
