//! Rule to limit the length of methods.
//!
//! # Rationale
//!
//! Long methods usually do too much. Counting ignores comments and blank
//! lines so that documenting a method never pushes it over the limit.
//!
//! # Configuration
//!
//! - `limit`: Maximum effective lines in a function (default: 20)

use taylor_core::{Component, ComponentType, Priority, Rule, RuleOutcome, RuleSettings};

use crate::lines::effective_lines;

/// Rule name for excessive method length.
pub const NAME: &str = "ExcessiveMethodLength";

/// Documentation link.
pub const URL: &str = "http://phpmd.org/rules/codesize.html#excessivemethodlength";

/// Default limit.
pub const DEFAULT_LIMIT: usize = 20;

/// Limits the number of lines in a function.
#[derive(Debug, Clone)]
pub struct ExcessiveMethodLength {
    settings: RuleSettings,
}

impl Default for ExcessiveMethodLength {
    fn default() -> Self {
        Self::new()
    }
}

impl ExcessiveMethodLength {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            settings: RuleSettings::new(DEFAULT_LIMIT, Priority::P3),
        }
    }
}

impl Rule for ExcessiveMethodLength {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Limits the number of lines in a method, excluding comments and blank lines"
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
        let lines = effective_lines(component);
        let limit = self.limit();
        RuleOutcome::against_limit(lines, limit, || {
            format!(
                "Method '{}' has to many lines: {lines}. The configured number of lines in method is {limit}",
                component.display_name()
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taylor_core::ComponentRange;

    fn function(start: usize, end: usize) -> Component {
        Component::new(ComponentType::Function, ComponentRange::new(start, end)).named("load()")
    }

    #[test]
    fn test_short_method_passes() {
        let outcome = ExcessiveMethodLength::new().check(&function(10, 29));
        assert!(outcome.is_ok);
        assert_eq!(outcome.value, Some(20));
        assert_eq!(outcome.message, None);
    }

    #[test]
    fn test_long_method_fails() {
        let outcome = ExcessiveMethodLength::new().check(&function(10, 30));
        assert!(!outcome.is_ok);
        assert_eq!(outcome.value, Some(21));
        assert_eq!(
            outcome.message.as_deref(),
            Some("Method 'load()' has to many lines: 21. The configured number of lines in method is 20")
        );
    }

    #[test]
    fn test_comments_do_not_count() {
        let method = function(10, 40).with_child(Component::new(
            ComponentType::Comment,
            ComponentRange::new(11, 25),
        ));
        let outcome = ExcessiveMethodLength::new().check(&method);
        assert!(outcome.is_ok);
        assert_eq!(outcome.value, Some(16));
    }

    #[test]
    fn test_only_functions() {
        let class = Component::new(ComponentType::Class, ComponentRange::new(1, 500));
        assert_eq!(
            ExcessiveMethodLength::new().check(&class),
            RuleOutcome::not_applicable()
        );
    }
}
