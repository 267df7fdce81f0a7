//! Reroute - URL path rewrite engine with segment patterns and middleware
//! adapters.
//!
//! This library provides the core functionality for reroute, including:
//! - Pattern matching over slash-delimited path segments, with wildcards
//!   and allowed-value constraints
//! - Strip-based path rewriting with first-match-wins rule dispatch
//! - Static rule validation, including shadowed-rule detection
//! - A fluent rule builder, TOML config loading, and a middleware adapter
//!
//! # Example
//!
//! ```
//! use reroute::builder::rule;
//! use reroute::rules::process_rules;
//!
//! let rules = vec![
//!     rule()
//!         .name("profile-certificates")
//!         .matching("/:username/certificates")
//!         .strip_segment("certificates")
//!         .unwrap()
//!         .build()
//!         .unwrap(),
//! ];
//!
//! let result = process_rules("/john/certificates", &rules);
//! assert!(result.matched);
//! assert_eq!(result.rewritten.as_deref(), Some("/john"));
//! assert_eq!(result.rule.as_deref(), Some("profile-certificates"));
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod middleware;
pub mod rules;

pub use error::{RerouteError, Result};
