//! Rule to limit the length of classes.
//!
//! # Configuration
//!
//! - `limit`: Maximum effective lines in a class (default: 400)

use taylor_core::{Component, ComponentType, Priority, Rule, RuleOutcome, RuleSettings};

use crate::lines::effective_lines;

/// Rule name for excessive class length.
pub const NAME: &str = "ExcessiveClassLength";

/// Documentation link.
pub const URL: &str = "http://phpmd.org/rules/codesize.html#excessiveclasslength";

/// Default limit.
pub const DEFAULT_LIMIT: usize = 400;

/// Limits the number of lines in a class.
#[derive(Debug, Clone)]
pub struct ExcessiveClassLength {
    settings: RuleSettings,
}

impl Default for ExcessiveClassLength {
    fn default() -> Self {
        Self::new()
    }
}

impl ExcessiveClassLength {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            settings: RuleSettings::new(DEFAULT_LIMIT, Priority::P3),
        }
    }
}

impl Rule for ExcessiveClassLength {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Limits the number of lines in a class, excluding comments and blank lines"
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
        let lines = effective_lines(component);
        let limit = self.limit();
        RuleOutcome::against_limit(lines, limit, || {
            format!(
                "Class '{}' has to many lines: {lines}. The configured number of lines in class is {limit}",
                component.display_name()
            )
        })
    }
}
