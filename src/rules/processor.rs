use crate::rules::rewriter::rewrite_path;
use crate::rules::types::Rule;

/// Result of dispatching a pathname through an ordered rule list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessResult {
	/// Whether any rule matched.
	pub matched: bool,

	/// Original pathname.
	pub original: String,

	/// Rewritten pathname from the first matching rule.
	pub rewritten: Option<String>,

	/// Name of the matching rule, when it has one.
	pub rule: Option<String>,
}

/// Apply the first matching rule from an ordered list.
///
/// Rules are evaluated strictly in list order; the order is entirely
/// caller-controlled and never reordered or deduplicated here. When no rule
/// matches (including an empty list) the result is the pass-through signal
/// for non-matching traffic, carrying only the original pathname. That is a
/// normal return value, not an error condition.
pub fn process_rules(pathname: &str, rules: &[Rule]) -> ProcessResult {
	for rule in rules {
		let result = rewrite_path(pathname, &rule.pattern);

		if result.matched {
			return ProcessResult {
				matched: true,
				original: result.original,
				rewritten: result.rewritten,
				rule: rule.name.clone(),
			};
		}
	}

	ProcessResult {
		matched: false,
		original: pathname.to_string(),
		rewritten: None,
		rule: None,
	}
}
