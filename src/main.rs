//! ui-parity: semantic UI element matching and cross-app parity comparison
//!
//! Compares two captured UI snapshots and reports what differs.

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ui_parity::{
    cli,
    config::{self, AppConfig, BehaviorConfig, ConfigPreset, OutputConfig},
    matching::AssignmentMethod,
    pipeline::exit_codes,
    reports::ReportFormat,
    search::SearchQuery,
};

#[derive(Parser)]
#[command(name = "ui-parity")]
#[command(version)]
#[command(about = "Semantic UI element matching and cross-app parity comparison", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Parity OK (warnings allowed unless --fail-on-warning)
    1  Warnings found with --fail-on-warning / no search results
    2  Error severity, or parity below --min-parity
    3  Error occurred

EXAMPLES:
    # Compare a legacy app against its rewrite
    ui-parity compare legacy.json rewrite.json

    # CI/CD gate on overall parity
    ui-parity compare legacy.json rewrite.json -o json --min-parity 0.9

    # Explain element correspondences
    ui-parity match legacy.json rewrite.json --explain

    # Find the login button
    ui-parity search rewrite.json \"log in\" --role button")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = "UI_PARITY_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

// ============================================================================
// Command argument structs
// ============================================================================

/// Output arguments shared by every reporting subcommand
#[derive(Args)]
struct OutputArgs {
    /// Output format (auto: summary on a terminal, JSON otherwise)
    #[arg(short, long, default_value = "auto")]
    output: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

/// Arguments for the `compare` subcommand
#[derive(Args)]
struct CompareArgs {
    /// Source (reference) snapshot JSON
    source: PathBuf,

    /// Target snapshot JSON
    target: PathBuf,

    #[command(flatten)]
    output: OutputArgs,

    /// Configuration preset (default, strict, permissive, ci-cd)
    #[arg(long)]
    preset: Option<String>,

    /// Element match threshold (0.0-1.0)
    #[arg(long)]
    threshold: Option<f64>,

    /// Assignment algorithm
    #[arg(long)]
    assignment: Option<AssignmentMethod>,

    /// Exit with code 1 when the report severity is warning
    #[arg(long)]
    fail_on_warning: bool,

    /// Exit with code 2 when overall parity is below this value
    #[arg(long)]
    min_parity: Option<f64>,
}

/// Arguments for the `match` subcommand
#[derive(Args)]
struct MatchArgs {
    /// Source snapshot JSON
    source: PathBuf,

    /// Target snapshot JSON
    target: PathBuf,

    #[command(flatten)]
    output: OutputArgs,

    /// Element match threshold (0.0-1.0)
    #[arg(long)]
    threshold: Option<f64>,

    /// Assignment algorithm
    #[arg(long)]
    assignment: Option<AssignmentMethod>,

    /// Include a score breakdown for every matched pair
    #[arg(long)]
    explain: bool,
}

/// Arguments for the `search` subcommand
#[derive(Args)]
struct SearchArgs {
    /// Snapshot JSON to search
    snapshot: PathBuf,

    /// Free-text query
    query: String,

    #[command(flatten)]
    output: OutputArgs,

    /// Only consider elements with this role or tag
    #[arg(long)]
    role: Option<String>,

    /// Maximum number of results
    #[arg(long)]
    limit: Option<usize>,

    /// Minimum result score (0.0-1.0)
    #[arg(long)]
    min_score: Option<f64>,

    /// Include hidden elements
    #[arg(long)]
    include_hidden: bool,
}

/// Arguments for the `config` subcommand
#[derive(Args)]
#[group(multiple = false)]
struct ConfigArgs {
    /// Print the JSON Schema of the config file format
    #[arg(long)]
    schema: bool,

    /// Print a commented example config file
    #[arg(long)]
    example: bool,

    /// Print the effective configuration (defaults merged with the config file)
    #[arg(long)]
    show: bool,

    /// Print config file search paths and the discovered config file
    #[arg(long)]
    path: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two app snapshots and report parity
    Compare(CompareArgs),

    /// Match elements between two snapshots
    Match(MatchArgs),

    /// Rank the elements of a snapshot against a free-text query
    Search(SearchArgs),

    /// Show configuration, its schema or an example file
    Config(ConfigArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

// ============================================================================
// Configuration assembly
// ============================================================================

/// CLI-level overrides layered over the discovered config file.
fn cli_overrides(cli: &Cli, output: &OutputArgs, preset: Option<ConfigPreset>) -> AppConfig {
    let base = preset.map(AppConfig::from_preset).unwrap_or_default();
    AppConfig {
        output: OutputConfig {
            format: output.output,
            file: output.output_file.clone(),
            no_color: cli.no_color || base.output.no_color,
            ..base.output
        },
        behavior: BehaviorConfig {
            quiet: cli.quiet || base.behavior.quiet,
            ..base.behavior
        },
        comparison: base.comparison,
    }
}

fn resolve_config(cli: &Cli, overrides: &AppConfig) -> AppConfig {
    let (config, loaded_from) = AppConfig::from_file_with_overrides(cli.config.as_deref(), overrides);
    if let Some(path) = loaded_from {
        tracing::debug!("Loaded config from {}", path.display());
    }
    config
}

fn parse_preset(name: Option<&str>) -> Result<Option<ConfigPreset>> {
    name.map(|name| {
        ConfigPreset::from_name(name).with_context(|| {
            let valid: Vec<_> = ConfigPreset::all().iter().map(ConfigPreset::name).collect();
            format!("Unknown preset '{name}'. Valid options: {}", valid.join(", "))
        })
    })
    .transpose()
}

fn apply_matching_flags(
    config: &mut AppConfig,
    threshold: Option<f64>,
    assignment: Option<AssignmentMethod>,
) {
    if let Some(threshold) = threshold {
        config.comparison.matching.match_threshold = threshold;
    }
    if let Some(assignment) = assignment {
        config.comparison.matching.assignment = assignment;
    }
}

fn exit_with(code: i32) -> Result<()> {
    if code != exit_codes::SUCCESS {
        std::process::exit(code);
    }
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(exit_codes::ERROR);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    match &cli.command {
        Commands::Compare(args) => {
            let preset = parse_preset(args.preset.as_deref())?;
            let mut overrides = cli_overrides(&cli, &args.output, preset);
            overrides.behavior.fail_on_warning |= args.fail_on_warning;
            overrides.behavior.min_parity = args.min_parity.or(overrides.behavior.min_parity);

            let mut config = resolve_config(&cli, &overrides);
            if let Some(preset) = preset {
                config.apply_preset(preset);
            }
            apply_matching_flags(&mut config, args.threshold, args.assignment);

            exit_with(cli::run_compare(&config, &args.source, &args.target)?)
        }

        Commands::Match(args) => {
            let mut overrides = cli_overrides(&cli, &args.output, None);
            overrides.behavior.explain_matches = args.explain;

            let mut config = resolve_config(&cli, &overrides);
            apply_matching_flags(&mut config, args.threshold, args.assignment);

            exit_with(cli::run_match(&config, &args.source, &args.target)?)
        }

        Commands::Search(args) => {
            let config = resolve_config(&cli, &cli_overrides(&cli, &args.output, None));

            let mut query = SearchQuery::new(args.query.clone());
            if let Some(role) = &args.role {
                query = query.with_role(role.clone());
            }
            if let Some(limit) = args.limit {
                query = query.with_limit(limit);
            }
            if let Some(min_score) = args.min_score {
                query = query.with_min_score(min_score);
            }
            if args.include_hidden {
                query = query.include_hidden();
            }

            exit_with(cli::run_search(&config, &args.snapshot, &query)?)
        }

        Commands::Config(args) => {
            if args.schema {
                println!("{}", config::generate_json_schema());
            } else if args.example {
                print!("{}", config::generate_full_example_config());
            } else if args.path {
                let search_paths = [
                    std::env::current_dir().ok(),
                    dirs::config_dir().map(|p| p.join("ui-parity")),
                    dirs::home_dir(),
                ];
                eprintln!("Config file search paths (in order):");
                for path in search_paths.into_iter().flatten() {
                    eprintln!("  {}", path.display());
                }
                eprintln!();
                eprintln!("Recognized file names:");
                for name in config::CONFIG_FILE_NAMES {
                    eprintln!("  {name}");
                }
                eprintln!();
                match config::discover_config_file(cli.config.as_deref()) {
                    Some(path) => eprintln!("Active config file: {}", path.display()),
                    None => eprintln!("No config file found."),
                }
            } else {
                let (config, loaded_from) = config::load_or_default(cli.config.as_deref());
                match &loaded_from {
                    Some(path) => eprintln!("# Loaded from: {}", path.display()),
                    None => eprintln!("# No config file found; showing defaults"),
                }
                let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
                print!("{yaml}");
            }
            Ok(())
        }

        Commands::Completions { shell } => {
            generate(*shell, &mut Cli::command(), "ui-parity", &mut io::stdout());
            Ok(())
        }
    }
}
