use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use reroute::config::{
	CONFIG_FILE_NAME, LoadOptions, discover_configs, load_merged_rules, load_rules, merge_rules,
	user_config_path,
};
use reroute::rules::{Rule, process_rules, validate_rules};

#[derive(Parser)]
#[command(name = "reroute")]
#[command(
	author,
	version,
	about = "URL path rewrite engine with segment patterns and strip rules"
)]
#[command(arg_required_else_help = true)]
struct Cli {
	#[command(subcommand)]
	command: Option<Commands>,

	/// Create a template .reroute.toml in the current directory
	#[arg(long)]
	init: bool,

	/// Overwrite existing .reroute.toml when using --init
	#[arg(long, requires = "init")]
	force: bool,
}

#[derive(Subcommand)]
enum Commands {
	/// Apply the configured rewrite rules to one or more pathnames
	Check {
		/// Pathnames to run through the rule list
		#[arg(required = true)]
		paths: Vec<String>,

		/// Config file to use instead of the directory cascade
		#[arg(long, value_name = "FILE")]
		config: Option<PathBuf>,
	},
	/// Configuration management commands
	Config {
		#[command(subcommand)]
		action: ConfigAction,
	},
}

#[derive(Subcommand)]
enum ConfigAction {
	/// Display discovered configuration with source annotations
	Show,
	/// Check all config files for errors and shadowed rules
	Validate,
}

const INIT_TEMPLATE: &str = r#"# Reroute configuration
# Rules are evaluated in order; the first matching rule wins.
# Segments are matched exactly; "*" matches any single segment.

root = true

[[rules]]
name = "profile-certificates"
description = "Strip /certificates from username profile URLs"

[rules.pattern]
segments = ["*", "certificates"]
strip-segments = [1]

# Constrain a wildcard to a closed value list:
# [[rules.pattern.allowed-values]]
# segment = 0
# values = ["alice", "bob"]
"#;

fn main() -> ExitCode {
	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();

	if cli.init {
		return handle_init(cli.force);
	}

	if let Some(command) = cli.command {
		return match command {
			Commands::Check { paths, config } => handle_check(&paths, config.as_deref()),
			Commands::Config { action } => match action {
				ConfigAction::Show => handle_config_show(),
				ConfigAction::Validate => handle_config_validate(),
			},
		};
	}

	// No command specified - this shouldn't happen due to arg_required_else_help
	Ok(ExitCode::SUCCESS)
}

fn handle_init(force: bool) -> Result<ExitCode> {
	let config_path = PathBuf::from(CONFIG_FILE_NAME);

	if config_path.exists() && !force {
		anyhow::bail!("{CONFIG_FILE_NAME} already exists. Use --force to overwrite.");
	}

	std::fs::write(&config_path, INIT_TEMPLATE)
		.with_context(|| format!("Failed to write {}", config_path.display()))?;

	println!("Created {CONFIG_FILE_NAME}");
	Ok(ExitCode::SUCCESS)
}

fn handle_check(paths: &[String], config: Option<&std::path::Path>) -> Result<ExitCode> {
	let rules = load_effective_rules(config)?;

	for path in paths {
		let result = process_rules(path, &rules);

		if result.matched {
			let rewritten = result.rewritten.as_deref().unwrap_or(&result.original);
			match result.rule {
				Some(name) => println!("{} -> {} (rule: {})", result.original, rewritten, name),
				None => println!("{} -> {}", result.original, rewritten),
			}
		} else {
			println!("{} (no match)", result.original);
		}
	}

	Ok(ExitCode::SUCCESS)
}

/// Load the rule list for `check`: an explicit config file when given,
/// otherwise the directory cascade. Validation errors are fatal either way;
/// warnings go to stderr.
fn load_effective_rules(config: Option<&std::path::Path>) -> Result<Vec<Rule>> {
	if let Some(path) = config {
		let loaded = load_rules(path, LoadOptions::default())
			.with_context(|| format!("Failed to load {}", path.display()))?;
		for warning in &loaded.warnings {
			eprintln!("Warning: {warning}");
		}
		return Ok(loaded.rules);
	}

	let cwd = std::env::current_dir().context("Failed to get current directory")?;
	let rules = load_merged_rules(&cwd).context("Failed to load configuration")?;

	let validation = validate_rules(&rules);
	if !validation.valid {
		for error in &validation.errors {
			eprintln!("error: {error}");
		}
		anyhow::bail!("Configuration failed validation");
	}
	for warning in &validation.warnings {
		eprintln!("Warning: {warning}");
	}

	Ok(rules)
}

fn handle_config_show() -> Result<ExitCode> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;
	let configs = discover_configs(&cwd).context("Failed to discover config files")?;

	if configs.is_empty() {
		println!("No configuration files found.");
		return Ok(ExitCode::SUCCESS);
	}

	println!("Configuration files (in cascade order):\n");

	for loaded in &configs {
		println!("# Source: {}", loaded.path.display());
		println!("# root: {}", loaded.config.root);

		let rules: Vec<_> = loaded
			.config
			.rule
			.iter()
			.chain(&loaded.config.rules)
			.collect();
		println!("# rules: {}", rules.len());
		println!();

		for (i, rule) in rules.iter().enumerate() {
			println!("  Rule {}:", i + 1);
			if let Some(ref name) = rule.name {
				println!("    name: {name}");
			}
			if let Some(ref description) = rule.description {
				println!("    description: {description}");
			}
			println!("    segments: {}", rule.pattern.segments.join("/"));
			if !rule.pattern.strip_segments.is_empty() {
				let positions: Vec<String> = rule
					.pattern
					.strip_segments
					.iter()
					.map(|index| index.to_string())
					.collect();
				println!("    strip-segments: {}", positions.join(", "));
			}
			for entry in &rule.pattern.allowed_values {
				println!(
					"    allowed-values[{}]: {}",
					entry.segment,
					entry.values.join(", ")
				);
			}
			println!();
		}
	}

	if let Ok(user_path) = user_config_path() {
		println!("User config path: {}", user_path.display());
		if user_path.exists() {
			println!("  (exists)");
		} else {
			println!("  (not found)");
		}
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_config_validate() -> Result<ExitCode> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;

	let configs = match discover_configs(&cwd) {
		Ok(configs) => configs,
		Err(e) => {
			eprintln!("Configuration error: {e}");
			return Ok(ExitCode::FAILURE);
		}
	};

	if configs.is_empty() {
		println!("No configuration files found.");
		return Ok(ExitCode::SUCCESS);
	}

	let rules = merge_rules(&configs);
	let validation = validate_rules(&rules);

	for warning in &validation.warnings {
		println!("Warning: {warning}");
	}

	if !validation.valid {
		eprintln!("Configuration is invalid:");
		for error in &validation.errors {
			eprintln!("  {error}");
		}
		return Ok(ExitCode::FAILURE);
	}

	println!("All configuration files are valid:");
	for loaded in &configs {
		let count = loaded.config.rules.len() + usize::from(loaded.config.rule.is_some());
		println!("  {} ({} rules)", loaded.path.display(), count);
	}

	Ok(ExitCode::SUCCESS)
}
