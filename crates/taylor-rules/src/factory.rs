//! Construction of the built-in rule set.

use taylor_core::{Config, RuleBox};
use tracing::debug;

use crate::{
    CyclomaticComplexity, ExcessiveClassLength, ExcessiveMethodLength, ExcessiveParameterList,
    NPathComplexity, NestedBlockDepth, TooManyMethods,
};

/// Names of all built-in rules, in evaluation order.
pub const RULE_NAMES: &[&str] = &[
    crate::method_length::NAME,
    crate::class_length::NAME,
    crate::too_many_methods::NAME,
    crate::cyclomatic_complexity::NAME,
    crate::nested_block_depth::NAME,
    crate::npath_complexity::NAME,
    crate::excessive_parameter_list::NAME,
];

/// Returns all built-in rules with their default settings.
///
/// Includes:
/// - `ExcessiveMethodLength` - Lines in a method
/// - `ExcessiveClassLength` - Lines in a class
/// - `TooManyMethods` - Methods in a class
/// - `CyclomaticComplexity` - Decision points in a method
/// - `NestedBlockDepth` - Nesting of blocks in a method
/// - `NPathComplexity` - Acyclic paths through a method
/// - `ExcessiveParameterList` - Parameters of a method
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(ExcessiveMethodLength::new()),
        Box::new(ExcessiveClassLength::new()),
        Box::new(TooManyMethods::new()),
        Box::new(CyclomaticComplexity::new()),
        Box::new(NestedBlockDepth::new()),
        Box::new(NPathComplexity::new()),
        Box::new(ExcessiveParameterList::new()),
    ]
}

/// Returns the enabled built-in rules with overrides from `config` applied.
#[must_use]
pub fn configured_rules(config: &Config) -> Vec<RuleBox> {
    all_rules()
        .into_iter()
        .filter(|rule| config.is_rule_enabled(rule.name()))
        .map(|mut rule| {
            if let Some(rule_config) = config.rule_config(rule.name()) {
                debug!("Configuring {}: {:?}", rule.name(), rule_config);
                rule.configure(rule_config);
            }
            rule
        })
        .collect()
}

/// Returns true if `name` is a built-in rule.
#[must_use]
pub fn is_known_rule(name: &str) -> bool {
    RULE_NAMES.contains(&name)
}
