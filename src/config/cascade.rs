use crate::config::parser::parse_config_file;
use crate::config::types::LoadedConfig;
use crate::error::{RerouteError, Result};
use crate::rules::Rule;
use std::path::{Path, PathBuf};

/// Name of the config file looked up at each cascade level.
pub const CONFIG_FILE_NAME: &str = ".reroute.toml";

/// Discover and load all config files in the cascade.
///
/// The cascade order is:
/// 1. Start from `start_dir` and look for `.reroute.toml`
/// 2. Continue up the directory tree
/// 3. Stop early at a config with `root = true`
/// 4. Finally, check ~/.reroute.toml
///
/// Returns configs in cascade order (most specific first).
pub fn discover_configs(start_dir: &Path) -> Result<Vec<LoadedConfig>> {
	let mut configs = Vec::new();
	let mut current_dir = start_dir.to_path_buf();

	loop {
		let config_path = current_dir.join(CONFIG_FILE_NAME);

		if config_path.exists() {
			let config = parse_config_file(&config_path)?;
			let stop = config.root;

			configs.push(LoadedConfig {
				config,
				path: config_path,
			});

			if stop {
				break;
			}
		}

		if let Some(parent) = current_dir.parent() {
			current_dir = parent.to_path_buf();
		} else {
			break;
		}
	}

	// The user config participates last, so project rules take precedence.
	if let Ok(user_path) = user_config_path()
		&& user_path.exists()
		&& !configs.iter().any(|loaded| loaded.path == user_path)
	{
		let config = parse_config_file(&user_path)?;
		configs.push(LoadedConfig {
			config,
			path: user_path,
		});
	}

	Ok(configs)
}

/// Merge discovered configs into a single rule list in cascade order
/// (first match wins).
pub fn merge_rules(configs: &[LoadedConfig]) -> Vec<Rule> {
	configs
		.iter()
		.flat_map(|loaded| loaded.config.clone().into_rules())
		.collect()
}

/// Convenience function to discover configs from a directory and merge
/// their rules.
pub fn load_merged_rules(start_dir: &Path) -> Result<Vec<Rule>> {
	let configs = discover_configs(start_dir)?;
	Ok(merge_rules(&configs))
}

/// Get the path to the user's config file.
pub fn user_config_path() -> Result<PathBuf> {
	let home_dir = dirs::home_dir().ok_or(RerouteError::HomeDirectoryNotFound)?;
	Ok(home_dir.join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::types::{Config, RuleConfig};

	fn loaded(path: &str, rule_names: &[&str]) -> LoadedConfig {
		LoadedConfig {
			config: Config {
				rules: rule_names
					.iter()
					.map(|name| RuleConfig {
						name: Some(name.to_string()),
						..Default::default()
					})
					.collect(),
				..Default::default()
			},
			path: PathBuf::from(path),
		}
	}

	#[test]
	fn test_user_config_path() {
		let path = user_config_path();
		assert!(path.is_ok());
		assert!(path.unwrap().ends_with(CONFIG_FILE_NAME));
	}

	#[test]
	fn test_merge_rules_preserves_cascade_order() {
		let configs = vec![
			loaded("project/.reroute.toml", &["project-a", "project-b"]),
			loaded("home/.reroute.toml", &["user-a"]),
		];

		let rules = merge_rules(&configs);

		let names: Vec<_> = rules.iter().filter_map(|r| r.name.as_deref()).collect();
		assert_eq!(names, vec!["project-a", "project-b", "user-a"]);
	}

	#[test]
	fn test_merge_rules_empty() {
		assert!(merge_rules(&[]).is_empty());
	}

	#[test]
	fn test_discover_stops_at_root_config() {
		let temp_dir = tempfile::tempdir().unwrap();
		let outer = temp_dir.path().join("outer");
		let inner = outer.join("inner");
		std::fs::create_dir_all(&inner).unwrap();

		std::fs::write(
			outer.join(CONFIG_FILE_NAME),
			"[[rules]]\nname = \"outer\"\n",
		)
		.unwrap();
		std::fs::write(
			inner.join(CONFIG_FILE_NAME),
			"root = true\n\n[[rules]]\nname = \"inner\"\n",
		)
		.unwrap();

		let configs = discover_configs(&inner).unwrap();

		// The inner config's root flag stops the walk before `outer`; only
		// a pre-existing user config could follow it.
		assert_eq!(configs[0].path, inner.join(CONFIG_FILE_NAME));
		assert!(
			!configs
				.iter()
				.any(|loaded| loaded.path == outer.join(CONFIG_FILE_NAME))
		);
	}

	#[test]
	fn test_discover_walks_up_without_root() {
		let temp_dir = tempfile::tempdir().unwrap();
		let outer = temp_dir.path().join("outer");
		let inner = outer.join("inner");
		std::fs::create_dir_all(&inner).unwrap();

		std::fs::write(
			outer.join(CONFIG_FILE_NAME),
			"root = true\n\n[[rules]]\nname = \"outer\"\n",
		)
		.unwrap();
		std::fs::write(
			inner.join(CONFIG_FILE_NAME),
			"[[rules]]\nname = \"inner\"\n",
		)
		.unwrap();

		let configs = discover_configs(&inner).unwrap();

		assert_eq!(configs[0].path, inner.join(CONFIG_FILE_NAME));
		assert_eq!(configs[1].path, outer.join(CONFIG_FILE_NAME));
	}
}
