//! Rule trait for metric rules over the component tree.

use crate::component::Component;
use crate::config::RuleConfig;
use crate::types::Priority;
use tracing::warn;

/// Result of evaluating one rule on one component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    /// Whether the component satisfies the rule.
    pub is_ok: bool,
    /// Measured value; `None` when the rule does not apply.
    pub value: Option<usize>,
    /// Failure message; `None` unless the rule failed.
    pub message: Option<String>,
}

impl RuleOutcome {
    /// The rule does not apply to this kind of component.
    #[must_use]
    pub fn not_applicable() -> Self {
        Self {
            is_ok: true,
            value: None,
            message: None,
        }
    }

    /// The component was measured and is within the limit.
    #[must_use]
    pub fn pass(value: usize) -> Self {
        Self {
            is_ok: true,
            value: Some(value),
            message: None,
        }
    }

    /// The component was measured and exceeds the limit.
    #[must_use]
    pub fn fail(value: usize, message: impl Into<String>) -> Self {
        Self {
            is_ok: false,
            value: Some(value),
            message: Some(message.into()),
        }
    }

    /// Fails when `value` exceeds `limit`; the message is only built on failure.
    #[must_use]
    pub fn against_limit(value: usize, limit: usize, message: impl FnOnce() -> String) -> Self {
        if value > limit {
            Self::fail(value, message())
        } else {
            Self::pass(value)
        }
    }
}

/// Configurable threshold and priority of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSettings {
    limit: usize,
    priority: Priority,
}

impl RuleSettings {
    /// Creates settings with the rule's defaults.
    #[must_use]
    pub const fn new(limit: usize, priority: Priority) -> Self {
        Self { limit, priority }
    }

    /// Current limit.
    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Current priority.
    #[must_use]
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Overrides the limit. Non-positive values are ignored and `false` is returned.
    pub fn set_limit(&mut self, limit: i64) -> bool {
        match usize::try_from(limit) {
            Ok(limit) if limit > 0 => {
                self.limit = limit;
                true
            }
            _ => false,
        }
    }

    /// Overrides the priority. Values outside 1..=4 are ignored and `false` is returned.
    pub fn set_priority(&mut self, priority: i64) -> bool {
        match Priority::new(priority) {
            Some(priority) => {
                self.priority = priority;
                true
            }
            None => false,
        }
    }
}

/// A metric rule evaluated on every component of a file.
///
/// # Example
///
/// ```ignore
/// use taylor_core::{Component, ComponentType, Rule, RuleOutcome, RuleSettings, Priority};
///
/// pub struct TooManyCases {
///     settings: RuleSettings,
/// }
///
/// impl Rule for TooManyCases {
///     fn name(&self) -> &'static str { "TooManyCases" }
///     fn external_info_url(&self) -> &'static str { "https://example.com/cases" }
///     fn settings(&self) -> &RuleSettings { &self.settings }
///     fn settings_mut(&mut self) -> &mut RuleSettings { &mut self.settings }
///
///     fn check(&self, component: &Component) -> RuleOutcome {
///         if !component.is_a(ComponentType::Switch) {
///             return RuleOutcome::not_applicable();
///         }
///         let cases = component.count_children(ComponentType::Case);
///         RuleOutcome::against_limit(cases, self.limit(), || format!("{cases} cases"))
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the rule name used in reports and configuration (e.g., "NPathComplexity").
    fn name(&self) -> &'static str;

    /// Returns a brief description of what this rule measures.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the link to the rule documentation.
    fn external_info_url(&self) -> &'static str;

    /// Returns the current settings.
    fn settings(&self) -> &RuleSettings;

    /// Returns the settings for modification.
    fn settings_mut(&mut self) -> &mut RuleSettings;

    /// Current limit.
    fn limit(&self) -> usize {
        self.settings().limit()
    }

    /// Current priority.
    fn priority(&self) -> Priority {
        self.settings().priority()
    }

    /// Evaluates the rule on one component.
    ///
    /// Components of a kind the rule does not measure yield
    /// [`RuleOutcome::not_applicable`].
    fn check(&self, component: &Component) -> RuleOutcome;

    /// Applies limit and priority overrides. Invalid values are ignored.
    fn configure(&mut self, config: &RuleConfig) {
        let name = self.name();
        if let Some(limit) = config.limit {
            if !self.settings_mut().set_limit(limit) {
                warn!("Ignoring non-positive limit {limit} for {name}");
            }
        }
        if let Some(priority) = config.priority {
            if !self.settings_mut().set_priority(priority) {
                warn!("Ignoring priority {priority} for {name}, expected 1..=4");
            }
        }
    }
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
