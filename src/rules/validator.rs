use crate::rules::types::{Rule, SegmentSpec};
use std::collections::HashSet;

/// Result of validating rewrite rules.
///
/// Errors are hard problems that should block use of the rule set; warnings
/// are advisory (shadowed rules, empty rule lists) and leave the set usable.
/// Validation is diagnostic only; callers decide whether to reject.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
	/// Whether no hard errors were found.
	pub valid: bool,

	/// Error messages. Non-empty means the rules should not be used.
	pub errors: Vec<String>,

	/// Warning messages. The rules remain usable.
	pub warnings: Vec<String>,
}

/// Validate a single rule's internal consistency.
///
/// All problems are collected rather than stopping at the first. A rule
/// that fails validation can still be matched against best-effort; nothing
/// here is enforced at match time.
pub fn validate_rule(rule: &Rule) -> ValidationResult {
	let mut errors = Vec::new();
	let name = rule.display_name();
	let len = rule.pattern.segments.len();

	if len == 0 {
		errors.push(format!("Rule '{name}': pattern must have at least one segment"));
	}

	let mut seen = HashSet::new();
	for &index in &rule.pattern.strip_segments {
		if index >= len {
			errors.push(format!(
				"Rule '{name}': strip position {index} exceeds pattern length {len}"
			));
		}
		if !seen.insert(index) {
			errors.push(format!("Rule '{name}': duplicate strip position {index}"));
		}
	}

	// Sorted for deterministic message order.
	let mut constrained: Vec<_> = rule.pattern.allowed_values.iter().collect();
	constrained.sort_by_key(|(index, _)| **index);

	for (&index, values) in constrained {
		if index >= len {
			errors.push(format!(
				"Rule '{name}': allowed-values position {index} exceeds pattern length {len}"
			));
			continue;
		}

		if let SegmentSpec::Literal(literal) = &rule.pattern.segments[index] {
			errors.push(format!(
				"Rule '{name}': allowed-values position {index} references non-wildcard segment '{literal}'"
			));
		}

		if values.is_empty() {
			errors.push(format!(
				"Rule '{name}': allowed-values position {index} has an empty value list"
			));
		}
	}

	ValidationResult {
		valid: errors.is_empty(),
		errors,
		warnings: Vec::new(),
	}
}

/// Whether `later` could match some concrete path that `earlier` also
/// matches: equal lengths and, at every position, a wildcard on either side
/// or equal literals. Conservative and intentionally approximate; it proves
/// an overlapping input exists, not that one pattern subsumes the other.
/// Allowed-value constraints are ignored.
fn could_shadow(earlier: &Rule, later: &Rule) -> bool {
	let a = &earlier.pattern.segments;
	let b = &later.pattern.segments;

	if a.len() != b.len() {
		return false;
	}

	a.iter().zip(b).all(|(s1, s2)| match (s1, s2) {
		(SegmentSpec::Wildcard, _) | (_, SegmentSpec::Wildcard) => true,
		(SegmentSpec::Literal(l1), SegmentSpec::Literal(l2)) => l1 == l2,
	})
}

/// Validate a rule list, including pairwise shadow detection.
///
/// An empty list is flagged with a warning, not an error. For every ordered
/// pair of rules, a warning names the later rule when it could claim paths
/// the earlier one matches, recommending a reorder. Never mutates the list.
pub fn validate_rules(rules: &[Rule]) -> ValidationResult {
	let mut errors = Vec::new();
	let mut warnings = Vec::new();

	if rules.is_empty() {
		warnings.push("No rewrite rules provided".to_string());
		return ValidationResult {
			valid: true,
			errors,
			warnings,
		};
	}

	for rule in rules {
		errors.extend(validate_rule(rule).errors);
	}

	for (i, earlier) in rules.iter().enumerate() {
		for (j, later) in rules.iter().enumerate().skip(i + 1) {
			if could_shadow(earlier, later) {
				let earlier_name = earlier
					.name
					.clone()
					.unwrap_or_else(|| format!("rule at index {i}"));
				let later_name = later
					.name
					.clone()
					.unwrap_or_else(|| format!("rule at index {j}"));
				warnings.push(format!(
					"Rule '{later_name}' may shadow rule '{earlier_name}' - consider reordering"
				));
			}
		}
	}

	ValidationResult {
		valid: errors.is_empty(),
		errors,
		warnings,
	}
}
