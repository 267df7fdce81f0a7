//! Configuration loading and parsing for reroute.
//!
//! This module handles:
//! - TOML config file parsing
//! - Directory cascade discovery
//! - Rule normalization and load-time validation

pub mod cascade;
pub mod parser;
pub mod types;

pub use cascade::{
	CONFIG_FILE_NAME, discover_configs, load_merged_rules, merge_rules, user_config_path,
};
pub use parser::{LoadOptions, LoadedRules, load_rules, parse_config_file, parse_config_str};
pub use types::{AllowedValuesConfig, Config, LoadedConfig, PatternConfig, RuleConfig};
