//! # taylor-rules
//!
//! Built-in code size and complexity rules for taylor.
//!
//! ## Available Rules
//!
//! | Name | Measures | Default limit | Priority |
//! |------|----------|---------------|----------|
//! | `ExcessiveMethodLength` | Lines in a function, without comments and blank lines | 20 | 3 |
//! | `ExcessiveClassLength` | Lines in a class, without comments and blank lines | 400 | 3 |
//! | `TooManyMethods` | Functions declared directly in a class | 10 | 3 |
//! | `CyclomaticComplexity` | Decision points in a function, plus one | 5 | 2 |
//! | `NestedBlockDepth` | Nesting of control blocks in a function | 3 | 3 |
//! | `NPathComplexity` | Acyclic execution paths through a function | 100 | 2 |
//! | `ExcessiveParameterList` | Parameters of a function | 3 | 3 |
//!
//! ## Usage
//!
//! ```ignore
//! use taylor_core::Analyzer;
//! use taylor_rules::{NPathComplexity, NestedBlockDepth};
//!
//! let analyzer = Analyzer::builder()
//!     .root("./Sources")
//!     .rule(NPathComplexity::new())
//!     .rule(NestedBlockDepth::new())
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod class_length;
mod cyclomatic_complexity;
mod excessive_parameter_list;
mod factory;
mod lines;
mod method_length;
mod nested_block_depth;
mod npath_complexity;
mod too_many_methods;

pub use class_length::ExcessiveClassLength;
pub use cyclomatic_complexity::CyclomaticComplexity;
pub use excessive_parameter_list::ExcessiveParameterList;
pub use factory::{all_rules, configured_rules, is_known_rule, RULE_NAMES};
pub use lines::effective_lines;
pub use method_length::ExcessiveMethodLength;
pub use nested_block_depth::NestedBlockDepth;
pub use npath_complexity::NPathComplexity;
pub use too_many_methods::TooManyMethods;

/// Re-export core types for convenience.
pub use taylor_core::{Component, Rule, RuleOutcome, Violation};
