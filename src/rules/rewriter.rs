use crate::rules::matcher::match_pattern;
use crate::rules::types::Pattern;
use std::collections::HashSet;

/// Result of rewriting a pathname with a single pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteResult {
	/// Whether the pathname matched the pattern.
	pub matched: bool,

	/// Original pathname, always preserved unchanged.
	pub original: String,

	/// Rewritten pathname if matched, `None` otherwise. Callers can
	/// distinguish "not matched" from "matched but unchanged".
	pub rewritten: Option<String>,
}

/// Rewrite a pathname by stripping the pattern's designated segments.
///
/// Stripping is positional on the pattern, not value-based: the same
/// positions are removed regardless of which values matched there. A
/// pattern with an empty strip-set only trims a single trailing separator.
/// Stripping every segment yields the root path, never an empty string.
pub fn rewrite_path(pathname: &str, pattern: &Pattern) -> RewriteResult {
	let result = match_pattern(pathname, pattern);

	let Some(segments) = result.segments else {
		return RewriteResult {
			matched: false,
			original: pathname.to_string(),
			rewritten: None,
		};
	};

	if pattern.strip_segments.is_empty() {
		let rewritten = pathname.strip_suffix('/').unwrap_or(pathname);
		return RewriteResult {
			matched: true,
			original: pathname.to_string(),
			rewritten: Some(rewritten.to_string()),
		};
	}

	let strip: HashSet<usize> = pattern.strip_segments.iter().copied().collect();

	let kept: Vec<&str> = segments
		.iter()
		.filter(|segment| !strip.contains(&segment.index))
		.map(|segment| segment.value.as_str())
		.collect();

	let rewritten = if kept.is_empty() {
		"/".to_string()
	} else {
		format!("/{}", kept.join("/"))
	};

	RewriteResult {
		matched: true,
		original: pathname.to_string(),
		rewritten: Some(rewritten),
	}
}
