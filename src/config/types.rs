use crate::rules::{Pattern, Rule, SegmentSpec};
use serde::Deserialize;
use std::path::PathBuf;

/// Top-level configuration from a `.reroute.toml` file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
	/// If true, stop the directory cascade at this config.
	#[serde(default)]
	pub root: bool,

	/// A single rewrite rule. Normalized to a one-element list on load;
	/// mostly useful for small single-purpose configs.
	#[serde(default)]
	pub rule: Option<RuleConfig>,

	/// Rewrite rules in evaluation order. First matching rule wins.
	#[serde(default)]
	pub rules: Vec<RuleConfig>,
}

/// One rewrite rule as declared in a config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RuleConfig {
	/// Optional name for identification in results and logs.
	pub name: Option<String>,

	/// Optional description of what this rule does.
	pub description: Option<String>,

	/// Pattern matching and strip configuration.
	#[serde(default)]
	pub pattern: PatternConfig,
}

/// Pattern declaration: segment specifiers plus strip and constraint
/// directives.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PatternConfig {
	/// Segment specifiers; `"*"` denotes a wildcard.
	#[serde(default)]
	pub segments: Vec<String>,

	/// Zero-based positions to strip from matched paths.
	#[serde(default)]
	pub strip_segments: Vec<usize>,

	/// Allowed-value constraints on wildcard positions.
	#[serde(default)]
	pub allowed_values: Vec<AllowedValuesConfig>,
}

/// A closed value list constraining one wildcard position.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AllowedValuesConfig {
	/// Zero-based wildcard position this constraint applies to.
	pub segment: usize,

	/// Values the wildcard may match.
	#[serde(default)]
	pub values: Vec<String>,
}

/// A loaded configuration with its source path for debugging/display.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
	/// The parsed configuration.
	pub config: Config,

	/// The path this config was loaded from.
	pub path: PathBuf,
}

impl Config {
	/// All rules declared by this config, in evaluation order. A single
	/// `[rule]` table is normalized to a one-element list ahead of any
	/// `[[rules]]` entries.
	pub fn into_rules(self) -> Vec<Rule> {
		self.rule
			.into_iter()
			.chain(self.rules)
			.map(RuleConfig::into_rule)
			.collect()
	}
}

impl RuleConfig {
	/// Convert the declaration into the engine's rule representation.
	pub fn into_rule(self) -> Rule {
		Rule {
			name: self.name,
			description: self.description,
			pattern: self.pattern.into_pattern(),
		}
	}
}

impl PatternConfig {
	fn into_pattern(self) -> Pattern {
		Pattern {
			segments: self
				.segments
				.iter()
				.map(|s| SegmentSpec::from(s.as_str()))
				.collect(),
			strip_segments: self.strip_segments,
			allowed_values: self
				.allowed_values
				.into_iter()
				.map(|entry| (entry.segment, entry.values))
				.collect(),
		}
	}
}
