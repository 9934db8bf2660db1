//! taylor CLI tool.
//!
//! Usage:
//! ```bash
//! taylor check [OPTIONS] [PATHS]...
//! taylor list-rules
//! taylor init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

use commands::output::ReporterSpec;

/// Code size and complexity metrics for Swift sources
#[derive(Parser)]
#[command(name = "taylor")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run metric checks
    Check {
        /// Files or directories to analyze (default: current directory)
        #[arg(default_value = ".")]
        paths: Vec<PathBuf>,

        /// Reporter as TYPE or TYPE:FILE, where TYPE is text, json, pmd or
        /// xcode (can be specified multiple times)
        #[arg(short, long, default_value = "text")]
        reporter: Vec<ReporterSpec>,

        /// Rule limit override as Rule=N (can be specified multiple times)
        #[arg(long = "rc", value_name = "RULE=LIMIT")]
        rule_limits: Vec<String>,

        /// Exclude patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Abort when a file or its structure dump cannot be loaded
        #[arg(long)]
        fail_on_parse_error: bool,
    },

    /// List available rules
    ListRules,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check {
            paths,
            reporter,
            rule_limits,
            exclude,
            fail_on_parse_error,
        } => {
            let project_dir = paths
                .iter()
                .find(|p| p.is_dir())
                .cloned()
                .unwrap_or_else(|| PathBuf::from("."));
            let source = config_resolver::resolve(&project_dir, cli.config.as_deref());
            let options = commands::check::CheckOptions {
                paths,
                reporters: reporter,
                rule_limits,
                exclude,
                fail_on_parse_error,
            };
            let clean = commands::check::run(&options, &source)?;
            if !clean {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::ListRules => {
            let project_dir = PathBuf::from(".");
            let source = config_resolver::resolve(&project_dir, cli.config.as_deref());
            commands::list_rules::run(&source)
        }
        Commands::Init { force } => commands::init::run(force),
    }
}
