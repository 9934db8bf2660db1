//! Core analyzer for orchestrating lint execution.

use crate::component::Component;
use crate::config::{Config, ConfigError};
use crate::context::FileContext;
use crate::rule::{Rule, RuleBox};
use crate::source::{SourceError, SourceFile};
use crate::tree::TreeBuilder;
use crate::types::{ComponentSummary, LintResult, Violation, ViolationData};

use ignore::WalkBuilder;
use miette::Diagnostic;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Extension of the source files picked up by discovery.
pub const SOURCE_EXTENSION: &str = "swift";

/// Errors that can occur during analysis.
#[derive(Debug, Error, Diagnostic)]
pub enum AnalyzerError {
    /// IO error resolving paths.
    #[error("IO error: {0}")]
    #[diagnostic(code(taylor::analyzer::io))]
    Io(#[from] std::io::Error),

    /// A source file or its dumps could not be loaded.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Source(#[from] SourceError),

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    #[diagnostic(code(taylor::analyzer::glob))]
    Glob(#[from] glob::PatternError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    /// The worker pool could not be created.
    #[error("Failed to start worker pool: {0}")]
    #[diagnostic(code(taylor::analyzer::threads))]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<String>,
    config: Option<Config>,
    fail_on_parse_error: bool,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds several boxed rules.
    #[must_use]
    pub fn rules(mut self, rules: impl IntoIterator<Item = RuleBox>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets whether a file that cannot be loaded aborts the run (default: false).
    #[must_use]
    pub fn fail_on_parse_error(mut self, fail: bool) -> Self {
        self.fail_on_parse_error = fail;
        self
    }

    /// Builds the analyzer.
    ///
    /// Rule configuration is applied here: disabled rules are dropped and
    /// limit or priority overrides are handed to each rule.
    ///
    /// # Errors
    ///
    /// Returns an error if the root cannot be resolved or an exclude pattern is invalid.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let config = self.config.unwrap_or_default();
        let root = self.root.unwrap_or_else(|| config.analyzer.root.clone());
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        let mut patterns = self.exclude_patterns;
        patterns.extend(config.analyzer.exclude.iter().cloned());
        let exclude_patterns = patterns
            .iter()
            .map(|p| glob::Pattern::new(p))
            .collect::<Result<Vec<_>, _>>()?;

        let known: Vec<&str> = self.rules.iter().map(|r| r.name()).collect();
        for name in config.rules.keys() {
            if !known.contains(&name.as_str()) {
                warn!("Ignoring configuration for unknown rule: {name}");
            }
        }

        let rules = self
            .rules
            .into_iter()
            .filter(|rule| {
                let enabled = config.is_rule_enabled(rule.name());
                if !enabled {
                    debug!("Skipping disabled rule: {}", rule.name());
                }
                enabled
            })
            .map(|mut rule| {
                if let Some(rule_config) = config.rule_config(rule.name()) {
                    rule.configure(rule_config);
                }
                rule
            })
            .collect();

        Ok(Analyzer {
            root,
            rules,
            exclude_patterns,
            respect_gitignore: config.analyzer.respect_gitignore,
            parallelism: config.analyzer.parallelism,
            fail_on_parse_error: self.fail_on_parse_error,
        })
    }
}

/// The main analyzer that orchestrates lint execution.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<glob::Pattern>,
    respect_gitignore: bool,
    parallelism: Option<usize>,
    fail_on_parse_error: bool,
}

/// Outcome of one file, produced by a worker.
enum FileReport {
    Checked {
        relative_path: PathBuf,
        violations: Vec<Violation>,
    },
    Failed {
        path: PathBuf,
        error: SourceError,
    },
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root directory being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of active rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Returns the active rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[RuleBox] {
        &self.rules
    }

    /// Analyzes all source files below the root.
    ///
    /// # Errors
    ///
    /// Returns an error if the worker pool cannot start, or if a file fails
    /// to load while `fail_on_parse_error` is set.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis at {}", self.root.display());
        let files = self.discover_files(&self.root);
        self.analyze_paths(&files)
    }

    /// Analyzes the given files and directories.
    ///
    /// # Errors
    ///
    /// See [`Analyzer::analyze`].
    pub fn analyze_inputs(&self, inputs: &[PathBuf]) -> Result<LintResult, AnalyzerError> {
        let mut files = Vec::new();
        for input in inputs {
            if input.is_dir() {
                files.extend(self.discover_files(input));
            } else if !self.should_exclude(input) {
                files.push(input.clone());
            }
        }
        files.sort();
        files.dedup();
        self.analyze_paths(&files)
    }

    /// Analyzes exactly the given source files.
    ///
    /// Files are processed in parallel; results are merged in input order.
    ///
    /// # Errors
    ///
    /// See [`Analyzer::analyze`].
    pub fn analyze_paths(&self, files: &[PathBuf]) -> Result<LintResult, AnalyzerError> {
        info!("Found {} files to analyze", files.len());

        let reports = match self.parallelism {
            Some(threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()?
                .install(|| self.run_files(files)),
            None => self.run_files(files),
        };

        let mut result = LintResult::new();
        for report in reports {
            match report {
                FileReport::Checked {
                    relative_path,
                    violations,
                } => result.add_file(relative_path, violations),
                FileReport::Failed { path, error } => {
                    warn!("Failed to load {}: {}", path.display(), error);
                    if self.fail_on_parse_error {
                        return Err(error.into());
                    }
                    result.add_error(path, error.to_string());
                }
            }
        }

        info!(
            "Analysis complete: {} violations in {} files",
            result.violations.len(),
            result.statistics.total_files
        );

        Ok(result)
    }

    fn run_files(&self, files: &[PathBuf]) -> Vec<FileReport> {
        files
            .par_iter()
            .map(|path| match SourceFile::load(path) {
                Ok(source) => {
                    let ctx = FileContext::new(path, &self.root);
                    let violations = self.analyze_source(&ctx, &source);
                    FileReport::Checked {
                        relative_path: ctx.relative_path,
                        violations,
                    }
                }
                Err(error) => FileReport::Failed {
                    path: path.clone(),
                    error,
                },
            })
            .collect()
    }

    /// Builds the component tree of a loaded file and checks it.
    #[must_use]
    pub fn analyze_source(&self, ctx: &FileContext<'_>, source: &SourceFile) -> Vec<Violation> {
        debug!("Analyzing: {}", ctx.path.display());
        let tree = TreeBuilder::new(source).build();
        self.check_tree(ctx, &tree)
    }

    /// Evaluates every rule on every component below `root`, parents first.
    #[must_use]
    pub fn check_tree(&self, ctx: &FileContext<'_>, root: &Component) -> Vec<Violation> {
        let path = ctx.report_path();
        let mut violations = Vec::new();
        for child in &root.children {
            self.check_component(&path, child, None, &mut violations);
        }
        violations
    }

    fn check_component<'c>(
        &self,
        path: &str,
        component: &'c Component,
        enclosing: Option<&'c Component>,
        violations: &mut Vec<Violation>,
    ) {
        let enclosing = if component.kind.is_type_declaration() && component.name.is_some() {
            Some(component)
        } else {
            enclosing
        };

        for rule in &self.rules {
            let outcome = rule.check(component);
            if outcome.is_ok {
                continue;
            }
            if let (Some(message), Some(value)) = (outcome.message, outcome.value) {
                violations.push(Violation {
                    rule: rule.name().to_string(),
                    priority: rule.priority(),
                    external_info_url: rule.external_info_url().to_string(),
                    component: ComponentSummary::from(component),
                    class_name: enclosing.and_then(|c| c.name.clone()),
                    data: ViolationData::new(message, path, value),
                });
            }
        }

        for child in &component.children {
            self.check_component(path, child, enclosing, violations);
        }
    }

    /// Discovers all source files below `dir`.
    fn discover_files(&self, dir: &Path) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = WalkBuilder::new(dir)
            .git_ignore(self.respect_gitignore)
            .git_global(self.respect_gitignore)
            .git_exclude(self.respect_gitignore)
            .require_git(false)
            .hidden(false)
            .build()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_some_and(|ft| ft.is_file()))
            .map(ignore::DirEntry::into_path)
            .filter(|path| path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION))
            .filter(|path| {
                let excluded = self.should_exclude(path);
                if excluded {
                    debug!("Excluding: {}", path.display());
                }
                !excluded
            })
            .collect();
        files.sort();
        files
    }

    /// Checks if a path should be excluded.
    fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.exclude_patterns
            .iter()
            .any(|pattern| pattern.matches(&path_str))
    }
}
