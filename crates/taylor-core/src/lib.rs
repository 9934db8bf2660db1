//! # taylor-core
//!
//! Core framework for metric linting of Swift sources.
//!
//! Input is a source file plus the structural dumps produced by
//! `sourcekitten` (a declaration tree and a token stream). This crate turns
//! them into a line-addressed [`Component`] tree and evaluates metric rules
//! on it. It includes:
//!
//! - [`tree::TreeBuilder`] for assembling and normalizing the component tree
//! - [`Rule`] trait for per-component metric rules
//! - [`Analyzer`] for orchestrating lint execution over many files
//! - [`Violation`] and [`Statistics`] for reporting findings
//!
//! ## Example
//!
//! ```ignore
//! use taylor_core::Analyzer;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./Sources")
//!     .rules(taylor_rules::all_rules())
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! println!("{}", result.format_summary());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod component;
mod config;
mod context;
mod rule;
mod source;
mod types;

/// Construction of the component tree.
pub mod tree;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError, SOURCE_EXTENSION};
pub use component::{Component, ComponentRange, ComponentType};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig};
pub use context::FileContext;
pub use rule::{Rule, RuleBox, RuleOutcome, RuleSettings};
pub use source::{Declaration, SourceError, SourceFile, SyntaxToken};
pub use types::{
    ComponentSummary, FileOutcome, LintResult, Priority, ProcessingError, Statistics, Violation,
    ViolationData, ViolationRecord,
};
