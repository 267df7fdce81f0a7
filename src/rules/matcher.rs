use crate::rules::types::{Pattern, Segment, SegmentSpec};

/// Result of matching a pathname against a single pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
	/// Whether the pathname matched the pattern.
	pub matched: bool,

	/// Parsed segments of the pathname, present on a successful match.
	/// The rewriter needs these to build the stripped path.
	pub segments: Option<Vec<Segment>>,
}

impl MatchResult {
	fn failure() -> Self {
		MatchResult {
			matched: false,
			segments: None,
		}
	}
}

/// Parse a pathname into its non-empty segments with zero-based positions.
///
/// Returns `None` for malformed pathnames containing consecutive separators
/// (e.g. `/a//b`): an empty interior segment signals an accidental double
/// slash and must never be silently normalized into a shorter valid path.
///
/// Leading and trailing separators are dropped, so `/a/b` and `/a/b/` parse
/// identically. A path consisting solely of separators parses to an empty
/// sequence.
pub fn parse_segments(pathname: &str) -> Option<Vec<Segment>> {
	if pathname.contains("//") {
		return None;
	}

	Some(
		pathname
			.split('/')
			.filter(|fragment| !fragment.is_empty())
			.enumerate()
			.map(|(index, value)| Segment {
				value: value.to_string(),
				index,
			})
			.collect(),
	)
}

/// Check a parsed segment value against the specifier at its position.
///
/// Allowed-value lists only constrain wildcards; a list attached to a
/// literal position is ignored (the validator flags it), and an empty list
/// constrains nothing.
fn segment_matches(value: &str, spec: &SegmentSpec, allowed: Option<&Vec<String>>) -> bool {
	match spec {
		SegmentSpec::Literal(literal) => value == literal,
		SegmentSpec::Wildcard => match allowed {
			Some(values) if !values.is_empty() => values.iter().any(|v| v == value),
			_ => true,
		},
	}
}

/// Match a URL pathname against a rewrite pattern.
///
/// The parsed segment count must equal the pattern's specifier count
/// exactly, and every position must satisfy its specifier. Matching is a
/// pure function of its inputs; on success the parsed segments are returned
/// for the rewriter.
pub fn match_pattern(pathname: &str, pattern: &Pattern) -> MatchResult {
	let Some(segments) = parse_segments(pathname) else {
		return MatchResult::failure();
	};

	if segments.len() != pattern.segments.len() {
		return MatchResult::failure();
	}

	for (segment, spec) in segments.iter().zip(&pattern.segments) {
		let allowed = pattern.allowed_values.get(&segment.index);
		if !segment_matches(&segment.value, spec, allowed) {
			return MatchResult::failure();
		}
	}

	MatchResult {
		matched: true,
		segments: Some(segments),
	}
}
