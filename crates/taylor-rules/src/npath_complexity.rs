//! Rule to limit the NPath complexity of methods.
//!
//! NPath counts acyclic execution paths: statements in sequence multiply,
//! alternatives of one branch (an `if` and its `else if`/`else` siblings,
//! the cases of a `switch`) add up. Every `&&` or `||` directly inside a
//! construct adds one path to it.
//!
//! # Configuration
//!
//! - `limit`: Maximum NPath complexity (default: 100)

use taylor_core::{Component, ComponentType, Priority, Rule, RuleOutcome, RuleSettings};

/// Rule name for NPath complexity.
pub const NAME: &str = "NPathComplexity";

/// Documentation link.
pub const URL: &str = "http://phpmd.org/rules/codesize.html#npathcomplexity";

/// Default limit.
pub const DEFAULT_LIMIT: usize = 100;

/// Limits the number of acyclic paths through a function.
#[derive(Debug, Clone)]
pub struct NPathComplexity {
    settings: RuleSettings,
}

impl Default for NPathComplexity {
    fn default() -> Self {
        Self::new()
    }
}

impl NPathComplexity {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            settings: RuleSettings::new(DEFAULT_LIMIT, Priority::P2),
        }
    }

    /// NPath complexity of the body of `component`.
    #[must_use]
    pub fn complexity(component: &Component) -> usize {
        range(component)
    }
}

/// Paths through the children of `component`.
fn range(component: &Component) -> usize {
    let children = &component.children;
    if component.is_a(ComponentType::Switch) {
        return (0..children.len())
            .map(|i| npath(children, i))
            .fold(0, usize::saturating_add);
    }
    (0..children.len())
        .filter(|&i| {
            !matches!(
                children[i].kind,
                ComponentType::And | ComponentType::Or | ComponentType::Else | ComponentType::ElseIf
            )
        })
        .map(|i| npath(children, i))
        .fold(1, usize::saturating_mul)
}

/// Number of `&&` and `||` directly inside `component`.
fn expression(component: &Component) -> usize {
    component
        .children
        .iter()
        .filter(|c| matches!(c.kind, ComponentType::And | ComponentType::Or))
        .count()
}

/// NPath of `siblings[index]`, which may depend on the sibling after it.
fn npath(siblings: &[Component], index: usize) -> usize {
    let component = &siblings[index];
    let next = siblings.get(index + 1);
    let own = || expression(component).saturating_add(range(component));

    match component.kind {
        ComponentType::Repeat | ComponentType::While | ComponentType::For => own().saturating_add(1),
        ComponentType::Else | ComponentType::Case | ComponentType::Brace => range(component),
        ComponentType::Switch => own(),
        ComponentType::If | ComponentType::Guard => match next {
            Some(n) if matches!(n.kind, ComponentType::Else | ComponentType::ElseIf) => {
                own().saturating_add(npath(siblings, index + 1))
            }
            _ => own().saturating_add(1),
        },
        ComponentType::ElseIf => match next {
            Some(n) if n.is_a(ComponentType::Else) => own().saturating_add(range(n)),
            _ => own(),
        },
        ComponentType::Ternary | ComponentType::NilCoalescing => {
            expression(component).saturating_add(2)
        }
        _ => 0,
    }
}

impl Rule for NPathComplexity {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Limits the number of acyclic execution paths through a method"
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
                "Method '{}' has a NPath Complexity of {complexity}. The allowed NPath Complexity is {limit}",
                component.display_name()
            )
        })
    }
}
