use std::collections::HashMap;

/// One specifier position in a [`Pattern`]: a literal segment value or a
/// wildcard matching any value. `"*"` is the config-file spelling of a
/// wildcard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentSpec {
	/// Requires exact string equality with the path segment.
	Literal(String),

	/// Matches any segment value, optionally constrained by the pattern's
	/// allowed-value lists.
	Wildcard,
}

impl SegmentSpec {
	pub fn is_wildcard(&self) -> bool {
		matches!(self, SegmentSpec::Wildcard)
	}
}

impl From<&str> for SegmentSpec {
	fn from(value: &str) -> Self {
		if value == "*" {
			SegmentSpec::Wildcard
		} else {
			SegmentSpec::Literal(value.to_string())
		}
	}
}

impl std::fmt::Display for SegmentSpec {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			SegmentSpec::Literal(value) => write!(f, "{value}"),
			SegmentSpec::Wildcard => write!(f, "*"),
		}
	}
}

/// Pattern configuration for URL matching and rewriting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pattern {
	/// Segment specifiers the path must match, one per path segment.
	/// Lengths must be equal for a match; there are no optional segments.
	pub segments: Vec<SegmentSpec>,

	/// Zero-based positions of segments to strip from a matched path.
	/// Duplicates are preserved here and flagged by the validator; the
	/// builder deduplicates before handing a pattern over.
	pub strip_segments: Vec<usize>,

	/// Allowed values per wildcard position. A position listed here only
	/// matches when the path segment is a member of its value list.
	pub allowed_values: HashMap<usize, Vec<String>>,
}

impl Pattern {
	/// Create a pattern from config-style specifier strings, where `"*"`
	/// denotes a wildcard.
	pub fn new<I>(segments: I) -> Self
	where
		I: IntoIterator,
		I::Item: AsRef<str>,
	{
		Pattern {
			segments: segments
				.into_iter()
				.map(|s| SegmentSpec::from(s.as_ref()))
				.collect(),
			..Default::default()
		}
	}
}

/// A complete rewrite rule: a pattern plus optional identification.
///
/// Rules are immutable once constructed. Rule lists are owned by the caller
/// and supplied per invocation; there is no persisted rule registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rule {
	/// Optional name used to identify the rule in results and logs.
	pub name: Option<String>,

	/// Optional description of what this rule does.
	pub description: Option<String>,

	/// Pattern matching and strip configuration.
	pub pattern: Pattern,
}

impl Rule {
	/// The rule's name, or a placeholder for display purposes.
	pub fn display_name(&self) -> &str {
		self.name.as_deref().unwrap_or("unnamed rule")
	}
}

/// One parsed pathname segment with its zero-based position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
	/// Original segment value.
	pub value: String,

	/// Zero-based position in the parsed path.
	pub index: usize,
}
