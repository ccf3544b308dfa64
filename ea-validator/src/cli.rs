use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use ea_config::EaConfig;
use ea_validator::advisory::{filter_status, holiday_coverage, tuning_suggestions};
use ea_validator::output::{write_human, write_json};
use ea_validator::{
    Report, RuleCatalog, RuleContext, ScanConfig, check_project, validate_config_file,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Human,
    Json,
}

#[derive(Parser)]
#[command(name = "ea-validator", version, about = "Expert Advisor pre-deployment checks")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); `RUST_LOG` overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a parameter file's risk and filter settings
    Config {
        /// Parameter file (JSON, or YAML by extension)
        #[arg(short, long, default_value = "../config/params.default.json")]
        config: PathBuf,

        /// Year treated as current by holiday rules (default: local clock)
        #[arg(long)]
        year: Option<i32>,
    },
    /// Check a project's parameter file and MQL sources
    Check {
        /// Project root
        #[arg(default_value = ".")]
        root: PathBuf,

        /// Year treated as current by holiday rules (default: local clock)
        #[arg(long)]
        year: Option<i32>,

        /// Glob of source files to skip (repeatable)
        #[arg(long)]
        exclude: Vec<String>,

        /// Follow symbolic links inside `src/`
        #[arg(long)]
        follow_links: bool,

        /// Largest source file to read, in bytes
        #[arg(long, default_value_t = 10_485_760)]
        max_file_size: u64,
    },
    /// List every rule of the catalog
    Rules,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn rule_context(year: Option<i32>) -> RuleContext {
    year.map_or_else(RuleContext::current, RuleContext::for_year)
}

/// Run the CLI. `Ok(false)` means the checks found errors.
pub fn run() -> Result<bool> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let catalog = RuleCatalog::standard();

    match cli.command {
        Commands::Config { config, year } => {
            let ctx = rule_context(year);
            let (ea_config, report) = validate_config_file(&config, &catalog, &ctx)?;
            print_report(&report, "EA CONFIG VALIDATION", cli.format)?;
            if cli.format == OutputFormat::Human {
                print_advice(&ea_config, &ctx);
            }
            Ok(report.passed)
        }
        Commands::Check {
            root,
            year,
            exclude,
            follow_links,
            max_file_size,
        } => {
            let mut scan_config = ScanConfig::default();
            scan_config.exclude = exclude;
            scan_config.follow_links = follow_links;
            scan_config.max_file_size = max_file_size;

            let report = check_project(&root, &scan_config, &catalog, &rule_context(year))?;
            print_report(&report, "EA SANITY CHECKS", cli.format)?;
            Ok(report.passed)
        }
        Commands::Rules => {
            for rule in catalog.describe() {
                println!("{:<40} {:<14} {}", rule.id, rule.domain, rule.severity);
            }
            Ok(true)
        }
    }
}

fn print_report(report: &Report, title: &str, format: OutputFormat) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Human => write_human(report, title, &mut out)?,
        OutputFormat::Json => write_json(report, &mut out)?,
    }
    out.flush()?;
    Ok(())
}

fn print_advice(config: &EaConfig, ctx: &RuleContext) {
    let coverage = holiday_coverage(config, ctx);
    if !coverage.is_empty() {
        println!();
        println!("{}", "Holiday coverage:".bold());
        for line in coverage {
            println!("  {line}");
        }
    }

    let tips = tuning_suggestions(config);
    if !tips.is_empty() {
        println!();
        println!("{}", "Parameter suggestions:".bold());
        for tip in tips {
            println!("  {tip}");
        }
    }

    println!();
    println!("{}", "Filters:".bold());
    for (name, enabled) in filter_status(config) {
        let state = if enabled {
            "enabled".green()
        } else {
            "disabled".dimmed()
        };
        println!("  {name:<18} {state}");
    }
}
