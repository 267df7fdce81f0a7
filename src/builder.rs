use crate::error::{RerouteError, Result};
use crate::rules::{Pattern, Rule, SegmentSpec};
use std::collections::HashMap;

/// Fluent builder for rewrite rules.
///
/// Accumulates into a local mutable draft and emits an immutable [`Rule`]
/// at [`build`](RuleBuilder::build). Template segments prefixed with `:`
/// become wildcards; both wildcard names (without the colon) and literal
/// segments can be referenced by name in [`when`](RuleBuilder::when) and
/// [`strip_segment`](RuleBuilder::strip_segment).
///
/// # Example
///
/// ```
/// use reroute::builder::rule;
///
/// let rule = rule()
///     .name("profile-certificates")
///     .matching("/:username/certificates")
///     .strip_segment("certificates")
///     .unwrap()
///     .build()
///     .unwrap();
///
/// assert_eq!(rule.pattern.strip_segments, vec![1]);
/// ```
#[derive(Debug, Default)]
pub struct RuleBuilder {
	name: Option<String>,
	description: Option<String>,
	template: Option<String>,
	segment_names: HashMap<String, usize>,
	allowed_values: HashMap<usize, Vec<String>>,
	strip_positions: Vec<usize>,
}

/// Start building a rewrite rule.
pub fn rule() -> RuleBuilder {
	RuleBuilder::default()
}

impl RuleBuilder {
	/// Set the rule name.
	pub fn name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	/// Set the rule description.
	pub fn description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}

	/// Set the path template to match, e.g. `/user/:username/profile`.
	///
	/// `:`-prefixed segments become wildcards. Every segment is registered
	/// under its name (colon stripped) for later reference; when a name
	/// appears twice, the later position wins.
	pub fn matching(mut self, template: impl Into<String>) -> Self {
		let template = template.into();
		self.segment_names = parse_template(&template);
		self.template = Some(template);
		self
	}

	/// Constrain a named wildcard segment to a closed set of values.
	///
	/// Fails if the name does not appear in the match template.
	pub fn when<I, S>(mut self, segment: &str, values: I) -> Result<Self>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let index = self.lookup(segment)?;
		self.allowed_values
			.insert(index, values.into_iter().map(Into::into).collect());
		Ok(self)
	}

	/// Mark a named segment to be stripped from matched paths.
	///
	/// Fails if the name does not appear in the match template.
	pub fn strip_segment(mut self, segment: &str) -> Result<Self> {
		let index = self.lookup(segment)?;
		self.strip_positions.push(index);
		Ok(self)
	}

	/// Mark a segment position to be stripped from matched paths.
	///
	/// The position is not range-checked here; the validator flags
	/// out-of-range positions.
	pub fn strip_index(mut self, index: usize) -> Self {
		self.strip_positions.push(index);
		self
	}

	/// Build the final rewrite rule.
	///
	/// Fails when no match template was supplied. Strip positions are
	/// deduplicated and sorted; deeper structural checks are left to the
	/// validator.
	pub fn build(self) -> Result<Rule> {
		let Some(template) = &self.template else {
			return Err(RerouteError::MissingMatchTemplate);
		};

		let segments = template
			.split('/')
			.filter(|part| !part.is_empty())
			.map(|part| {
				if part.starts_with(':') {
					SegmentSpec::Wildcard
				} else {
					SegmentSpec::Literal(part.to_string())
				}
			})
			.collect();

		let mut strip_segments = self.strip_positions;
		strip_segments.sort_unstable();
		strip_segments.dedup();

		Ok(Rule {
			name: self.name,
			description: self.description,
			pattern: Pattern {
				segments,
				strip_segments,
				allowed_values: self.allowed_values,
			},
		})
	}

	fn lookup(&self, segment: &str) -> Result<usize> {
		self.segment_names.get(segment).copied().ok_or_else(|| {
			let mut available: Vec<&str> =
				self.segment_names.keys().map(String::as_str).collect();
			available.sort_unstable();
			RerouteError::UnknownSegment {
				name: segment.to_string(),
				available: available.join(", "),
			}
		})
	}
}

/// Map segment names to their positions in the template.
fn parse_template(template: &str) -> HashMap<String, usize> {
	template
		.split('/')
		.filter(|part| !part.is_empty())
		.enumerate()
		.map(|(index, part)| (part.strip_prefix(':').unwrap_or(part).to_string(), index))
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_build_simple_rule() {
		let rule = rule()
			.matching("/user/:username/profile")
			.strip_segment("profile")
			.unwrap()
			.build()
			.unwrap();

		assert_eq!(
			rule.pattern.segments,
			vec![
				SegmentSpec::Literal("user".to_string()),
				SegmentSpec::Wildcard,
				SegmentSpec::Literal("profile".to_string()),
			]
		);
		assert_eq!(rule.pattern.strip_segments, vec![2]);
	}

	#[test]
	fn test_when_sets_allowed_values() {
		let rule = rule()
			.matching("/community/challenge/:id/:tab")
			.when("tab", ["submissions", "winners"])
			.unwrap()
			.strip_segment("tab")
			.unwrap()
			.build()
			.unwrap();

		assert_eq!(
			rule.pattern.allowed_values.get(&3),
			Some(&vec!["submissions".to_string(), "winners".to_string()])
		);
	}

	#[test]
	fn test_name_and_description() {
		let rule = rule()
			.name("test-rule")
			.description("This is a test")
			.matching("/test")
			.build()
			.unwrap();

		assert_eq!(rule.name.as_deref(), Some("test-rule"));
		assert_eq!(rule.description.as_deref(), Some("This is a test"));
	}

	#[test]
	fn test_strip_multiple_segments_by_name() {
		let rule = rule()
			.matching("/:user/posts/:category/archive")
			.strip_segment("category")
			.unwrap()
			.strip_segment("archive")
			.unwrap()
			.build()
			.unwrap();

		assert_eq!(rule.pattern.strip_segments, vec![2, 3]);
	}

	#[test]
	fn test_strip_by_index() {
		let rule = rule()
			.matching("/a/b/c/d")
			.strip_index(3)
			.strip_index(1)
			.build()
			.unwrap();

		assert_eq!(rule.pattern.strip_segments, vec![1, 3]);
	}

	#[test]
	fn test_duplicate_strip_positions_deduplicated() {
		let rule = rule()
			.matching("/a/:b")
			.strip_segment("b")
			.unwrap()
			.strip_index(1)
			.build()
			.unwrap();

		assert_eq!(rule.pattern.strip_segments, vec![1]);
	}

	#[test]
	fn test_build_without_matching_fails() {
		let result = rule().name("incomplete").build();

		assert!(matches!(
			result.unwrap_err(),
			RerouteError::MissingMatchTemplate
		));
	}

	#[test]
	fn test_when_unknown_segment_fails() {
		let result = rule()
			.matching("/user/:id")
			.when("nonexistent", ["value"]);

		match result.unwrap_err() {
			RerouteError::UnknownSegment { name, available } => {
				assert_eq!(name, "nonexistent");
				assert_eq!(available, "id, user");
			}
			other => panic!("Expected UnknownSegment error, got {other:?}"),
		}
	}

	#[test]
	fn test_strip_unknown_segment_fails() {
		let result = rule().matching("/user/:id").strip_segment("nonexistent");

		assert!(matches!(
			result.unwrap_err(),
			RerouteError::UnknownSegment { .. }
		));
	}

	#[test]
	fn test_chaining() {
		let rule = rule()
			.name("chain-test")
			.description("Testing chaining")
			.matching("/a/:b/c")
			.when("b", ["x", "y"])
			.unwrap()
			.strip_segment("c")
			.unwrap()
			.build()
			.unwrap();

		assert_eq!(rule.name.as_deref(), Some("chain-test"));
		assert_eq!(rule.pattern.segments.len(), 3);
		assert!(rule.pattern.allowed_values.contains_key(&1));
		assert_eq!(rule.pattern.strip_segments, vec![2]);
	}

	#[test]
	fn test_built_rule_round_trips_through_matcher() {
		let rule = rule()
			.matching("/:username/certificates")
			.strip_segment("certificates")
			.unwrap()
			.build()
			.unwrap();

		let result = crate::rules::rewrite_path("/john/certificates", &rule.pattern);

		assert!(result.matched);
		assert_eq!(result.rewritten.as_deref(), Some("/john"));
	}
}
