//! Rule to limit the number of methods declared directly in a class.

use taylor_core::{Component, ComponentType, Priority, Rule, RuleOutcome, RuleSettings};

/// Rule name for too many methods.
pub const NAME: &str = "TooManyMethods";

/// Documentation link.
pub const URL: &str = "http://phpmd.org/rules/codesize.html#toomanymethods";

/// Default limit.
pub const DEFAULT_LIMIT: usize = 10;

/// Limits the number of methods in a class.
#[derive(Debug, Clone)]
pub struct TooManyMethods {
    settings: RuleSettings,
}

impl Default for TooManyMethods {
    fn default() -> Self {
        Self::new()
    }
}

impl TooManyMethods {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            settings: RuleSettings::new(DEFAULT_LIMIT, Priority::P3),
        }
    }
}

impl Rule for TooManyMethods {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Limits the number of methods declared in a class"
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
        if !component.is_a(ComponentType::Class) {
            return RuleOutcome::not_applicable();
        }
        let methods = component.count_children(ComponentType::Function);
        let limit = self.limit();
        RuleOutcome::against_limit(methods, limit, || {
            format!(
                "Class '{}' has to many methods: {methods}. The configured number of methods in class is {limit}",
                component.display_name()
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taylor_core::ComponentRange;

    fn class_with_methods(count: usize) -> Component {
        let mut class = Component::new(ComponentType::Class, ComponentRange::new(1, 500));
        for i in 0..count {
            let start = 2 + i * 3;
            class.push(
                Component::new(ComponentType::Function, ComponentRange::new(start, start + 2))
                    .with_child(Component::new(
                        ComponentType::Function,
                        ComponentRange::new(start + 1, start + 1),
                    )),
            );
        }
        class.push(Component::new(ComponentType::Variable, ComponentRange::new(400, 400)));
        class
    }

    #[test]
    fn test_within_limit() {
        let outcome = TooManyMethods::new().check(&class_with_methods(10));
        assert!(outcome.is_ok);
        assert_eq!(outcome.value, Some(10));
    }

    #[test]
    fn test_over_limit_counts_direct_children_only() {
        let outcome = TooManyMethods::new().check(&class_with_methods(11));
        assert!(!outcome.is_ok);
        assert_eq!(outcome.value, Some(11));
        assert_eq!(
            outcome.message.as_deref(),
            Some("Class 'unknown' has to many methods: 11. The configured number of methods in class is 10")
        );
    }
}
