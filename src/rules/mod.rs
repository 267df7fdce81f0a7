//! Rule matching, rewriting, and validation for reroute.
//!
//! This module handles:
//! - Pathname parsing into positional segments
//! - Pattern matching with wildcards and value constraints
//! - Strip-based path rewriting and ordered rule dispatch
//! - Static rule validation including shadow detection

pub mod matcher;
pub mod processor;
pub mod rewriter;
pub mod types;
pub mod validator;

pub use matcher::{MatchResult, match_pattern, parse_segments};
pub use processor::{ProcessResult, process_rules};
pub use rewriter::{RewriteResult, rewrite_path};
pub use types::{Pattern, Rule, Segment, SegmentSpec};
pub use validator::{ValidationResult, validate_rule, validate_rules};
