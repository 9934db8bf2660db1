//! Rule to limit the cyclomatic complexity of methods.
//!
//! # Detected Patterns
//!
//! Every decision point below a function adds one path: `if`, `else if`,
//! `for`, `while`, `case`, ternary and nil-coalescing operators, `&&` and
//! `||`. Nested closures and local functions are included. A `guard` is not
//! a decision point itself; its conditions still count.
//!
//! # Configuration
//!
//! - `limit`: Maximum complexity (default: 5)

use taylor_core::{Component, ComponentType, Priority, Rule, RuleOutcome, RuleSettings};

/// Rule name for cyclomatic complexity.
pub const NAME: &str = "CyclomaticComplexity";

/// Documentation link.
pub const URL: &str = "http://phpmd.org/rules/codesize.html#cyclomaticcomplexity";

/// Default limit.
pub const DEFAULT_LIMIT: usize = 5;

const DECISION_KINDS: &[ComponentType] = &[
    ComponentType::If,
    ComponentType::ElseIf,
    ComponentType::For,
    ComponentType::While,
    ComponentType::Case,
    ComponentType::Ternary,
    ComponentType::NilCoalescing,
    ComponentType::And,
    ComponentType::Or,
];

/// Limits the number of independent paths through a function.
#[derive(Debug, Clone)]
pub struct CyclomaticComplexity {
    settings: RuleSettings,
}

impl Default for CyclomaticComplexity {
    fn default() -> Self {
        Self::new()
    }
}

impl CyclomaticComplexity {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            settings: RuleSettings::new(DEFAULT_LIMIT, Priority::P2),
        }
    }

    /// Complexity of a function: decision points below it plus one.
    #[must_use]
    pub fn complexity(component: &Component) -> usize {
        decisions(component) + 1
    }
}

fn decisions(component: &Component) -> usize {
    component
        .children
        .iter()
        .map(|child| usize::from(DECISION_KINDS.contains(&child.kind)) + decisions(child))
        .sum()
}

impl Rule for CyclomaticComplexity {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Limits the number of decision points in a method"
    }

    fn external_info_url(&self) -> &'static str {
        URL
    }

    fn settings(&self) -> &RuleSettings {
        &self.settings
    }

    fn settings_mut(&mut self) -> &mut RuleSettings {
        &mut self.settings
    }

    fn check(&self, component: &Component) -> RuleOutcome {
        if !component.is_a(ComponentType::Function) {
            return RuleOutcome::not_applicable();
        }
        let complexity = Self::complexity(component);
        let limit = self.limit();
        RuleOutcome::against_limit(complexity, limit, || {
            format!(
                "The method '{}' has a Cyclomatic Complexity of {complexity}. The allowed Cyclomatic Complexity is {limit}",
                component.display_name()
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taylor_core::ComponentRange;

    fn node(kind: ComponentType, start: usize, end: usize) -> Component {
        Component::new(kind, ComponentRange::new(start, end))
    }

    fn branchy_function() -> Component {
        node(ComponentType::Function, 3, 36)
            .with_child(
                node(ComponentType::If, 4, 11)
                    .with_child(node(ComponentType::If, 5, 7))
                    .with_child(node(ComponentType::ElseIf, 7, 9))
                    .with_child(node(ComponentType::Else, 9, 11)),
            )
            .with_child(node(ComponentType::ElseIf, 12, 15).with_child(node(ComponentType::While, 13, 15)))
            .with_child(node(ComponentType::ElseIf, 16, 19).with_child(node(ComponentType::For, 17, 19)))
            .with_child(
                node(ComponentType::Else, 20, 35).with_child(
                    node(ComponentType::Switch, 21, 34)
                        .with_child(node(ComponentType::Case, 22, 24))
                        .with_child(node(ComponentType::Case, 25, 27))
                        .with_child(node(ComponentType::Case, 28, 30))
                        .with_child(node(ComponentType::Case, 31, 33)),
                ),
            )
    }

    #[test]
    fn test_high_complexity_fails() {
        let outcome = CyclomaticComplexity::new().check(&branchy_function());
        assert!(!outcome.is_ok);
        assert_eq!(outcome.value, Some(12));
        assert_eq!(
            outcome.message.as_deref(),
            Some("The method 'unknown' has a Cyclomatic Complexity of 12. The allowed Cyclomatic Complexity is 5")
        );
    }

    #[test]
    fn test_low_complexity_passes() {
        let mut function = branchy_function();
        function.children.truncate(1);
        let outcome = CyclomaticComplexity::new().check(&function);
        assert!(outcome.is_ok);
        assert_eq!(outcome.value, Some(4));
        assert_eq!(outcome.message, None);
    }

    #[test]
    fn test_empty_function_is_one() {
        let outcome = CyclomaticComplexity::new().check(&node(ComponentType::Function, 1, 2));
        assert_eq!(outcome.value, Some(1));
    }

    #[test]
    fn test_logical_operators_inside_guard_count() {
        let function = node(ComponentType::Function, 1, 10).with_child(
            node(ComponentType::Guard, 2, 4)
                .with_child(node(ComponentType::And, 2, 2))
                .with_child(node(ComponentType::Or, 2, 2)),
        );
        assert_eq!(CyclomaticComplexity::complexity(&function), 3);
    }

    #[test]
    fn test_guard_alone_adds_nothing() {
        let function =
            node(ComponentType::Function, 1, 5).with_child(node(ComponentType::Guard, 2, 4));
        let outcome = CyclomaticComplexity::new().check(&function);
        assert!(outcome.is_ok);
        assert_eq!(outcome.value, Some(1));
    }

    #[test]
    fn test_non_functions_are_skipped() {
        let outcome = CyclomaticComplexity::new().check(&node(ComponentType::For, 0, 0));
        assert_eq!(outcome, RuleOutcome::not_applicable());
    }
}
