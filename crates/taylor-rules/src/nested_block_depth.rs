//! Rule to limit how deeply blocks nest inside a method.
//!
//! # Detected Patterns
//!
//! `if`, `guard`, `while`, `for`, `repeat`, `switch`, `case` and bare blocks
//! each open a level.
//!
//! # Configuration
//!
//! - `limit`: Maximum block depth (default: 3)

use taylor_core::{Component, ComponentType, Priority, Rule, RuleOutcome, RuleSettings};

/// Rule name for nested block depth.
pub const NAME: &str = "NestedBlockDepth";

/// Documentation link.
pub const URL: &str = "http://docs.oclint.org/en/dev/rules/size.html#nestedblockdepth";

/// Default limit.
pub const DEFAULT_LIMIT: usize = 3;

const BLOCK_KINDS: &[ComponentType] = &[
    ComponentType::If,
    ComponentType::Guard,
    ComponentType::While,
    ComponentType::For,
    ComponentType::Repeat,
    ComponentType::Switch,
    ComponentType::Case,
    ComponentType::Brace,
];

/// Limits the nesting depth of blocks in a function.
#[derive(Debug, Clone)]
pub struct NestedBlockDepth {
    settings: RuleSettings,
}

impl Default for NestedBlockDepth {
    fn default() -> Self {
        Self::new()
    }
}

impl NestedBlockDepth {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            settings: RuleSettings::new(DEFAULT_LIMIT, Priority::P3),
        }
    }

    /// Block depth below `component`.
    ///
    /// A level counts only when at least one direct child opens a block;
    /// once it does, the deepest child of any kind decides the rest.
    #[must_use]
    pub fn depth(component: &Component) -> usize {
        let opens_block = component
            .children
            .iter()
            .any(|child| BLOCK_KINDS.contains(&child.kind));
        if !opens_block {
            return 0;
        }
        component
            .children
            .iter()
            .map(Self::depth)
            .max()
            .map_or(0, |deepest| deepest + 1)
    }
}

impl Rule for NestedBlockDepth {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Limits how deeply control blocks nest inside a method"
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
        let depth = Self::depth(component);
        let limit = self.limit();
        RuleOutcome::against_limit(depth, limit, || {
            format!(
                "Method '{}' has a block depth of {depth}. The configured block depth is {limit}",
                component.display_name()
            )
        })
    }
}
