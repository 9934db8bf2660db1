//! Rule to limit the number of parameters of a method.

use taylor_core::{Component, ComponentType, Priority, Rule, RuleOutcome, RuleSettings};

/// Rule name for excessive parameter list.
pub const NAME: &str = "ExcessiveParameterList";

/// Documentation link.
pub const URL: &str = "http://phpmd.org/rules/codesize.html#excessiveparameterlist";

/// Default limit.
pub const DEFAULT_LIMIT: usize = 3;

/// Limits the number of parameters declared by a function.
#[derive(Debug, Clone)]
pub struct ExcessiveParameterList {
    settings: RuleSettings,
}

impl Default for ExcessiveParameterList {
    fn default() -> Self {
        Self::new()
    }
}

impl ExcessiveParameterList {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            settings: RuleSettings::new(DEFAULT_LIMIT, Priority::P3),
        }
    }
}

impl Rule for ExcessiveParameterList {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Limits the number of parameters of a method"
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
        let parameters = component.count_children(ComponentType::Parameter);
        let limit = self.limit();
        RuleOutcome::against_limit(parameters, limit, || {
            format!(
                "Method '{}' has {parameters} parameters. The allowed number of parameters is {limit}",
                component.display_name()
            )
        })
    }
}
