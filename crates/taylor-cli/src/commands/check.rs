//! Check command implementation.

use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use taylor_core::{Analyzer, Config};
use taylor_rules::{all_rules, is_known_rule};
use tracing::{error, info, warn};

use super::output::{self, ReporterSpec};
use crate::config_resolver::ConfigSource;

/// Options of the check command.
#[derive(Debug, Clone)]
pub struct CheckOptions {
    /// Files or directories to analyze.
    pub paths: Vec<PathBuf>,
    /// Reports to produce.
    pub reporters: Vec<ReporterSpec>,
    /// `Rule=N` limit overrides.
    pub rule_limits: Vec<String>,
    /// Extra exclude patterns.
    pub exclude: Vec<String>,
    /// Abort on the first file that cannot be loaded.
    pub fail_on_parse_error: bool,
}

/// Runs the check command. Returns `true` when no violations were found.
///
/// # Errors
///
/// Returns an error if configuration, analysis or any reporter fails.
pub fn run(options: &CheckOptions, source: &ConfigSource) -> Result<bool> {
    let mut config = source.load()?;
    apply_rule_limits(&mut config, &options.rule_limits);

    let root = options
        .paths
        .iter()
        .find(|p| p.is_dir())
        .cloned()
        .unwrap_or_else(|| config.analyzer.root.clone());

    let analyzer = Analyzer::builder()
        .root(root)
        .rules(all_rules())
        .excludes(options.exclude.iter().cloned())
        .config(config)
        .fail_on_parse_error(options.fail_on_parse_error)
        .build()
        .context("Failed to build analyzer")?;

    info!(
        "Analyzing {} path(s) with {} rules",
        options.paths.len(),
        analyzer.rule_count()
    );

    let result = analyzer
        .analyze_inputs(&options.paths)
        .context("Analysis failed")?;

    for failure in &result.errors {
        warn!("Skipped {}: {}", failure.path.display(), failure.message);
    }

    let mut failed = 0;
    for spec in &options.reporters {
        if let Err(e) = output::emit(&result, spec) {
            error!("{e:#}");
            failed += 1;
        }
    }
    if failed > 0 {
        bail!("{failed} reporter(s) failed");
    }

    Ok(result.is_clean())
}

/// Merges `Rule=N` overrides into `config`. Malformed entries and unknown
/// rule names are skipped with a warning.
fn apply_rule_limits(config: &mut Config, overrides: &[String]) {
    for entry in overrides {
        let Some((rule, limit)) = entry.split_once('=') else {
            warn!("Ignoring rule override '{entry}', expected Rule=N");
            continue;
        };
        let rule = rule.trim();
        if !is_known_rule(rule) {
            warn!("Ignoring override for unknown rule: {rule}");
            continue;
        }
        match limit.trim().parse::<i64>() {
            Ok(limit) => config.set_limit(rule, limit),
            Err(_) => warn!("Ignoring rule override '{entry}', limit is not a number"),
        }
    }
}
