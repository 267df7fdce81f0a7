use std::path::PathBuf;

/// Library-level structured errors for reroute.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
///
/// Unmatched pathnames are never errors; the engine reports those through
/// result flags. Errors are reserved for collaborator misuse (builder calls
/// referencing unknown segments, skipped required steps) and config loading.
#[derive(Debug, thiserror::Error)]
pub enum RerouteError {
	#[error("Config file not found: {path}")]
	ConfigNotFound { path: PathBuf },

	#[error("Failed to read config file: {path}")]
	ConfigReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse config file: {path}")]
	ConfigParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Invalid rewrite rules in {path}:\n{}", .errors.join("\n"))]
	ConfigInvalid { path: PathBuf, errors: Vec<String> },

	#[error("A match template is required before build()")]
	MissingMatchTemplate,

	#[error("Segment '{name}' not found in pattern. Available: {available}")]
	UnknownSegment { name: String, available: String },

	#[error("Failed to resolve home directory")]
	HomeDirectoryNotFound,
}

/// Result type alias using RerouteError.
pub type Result<T> = std::result::Result<T, RerouteError>;
