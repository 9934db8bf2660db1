//! Core types for violations, statistics and results.

use crate::component::{Component, ComponentRange, ComponentType};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Rule priority, from 1 (most important) to 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Priority(u8);

impl Priority {
    /// Highest priority.
    pub const P1: Self = Self(1);
    /// High priority.
    pub const P2: Self = Self(2);
    /// Normal priority.
    pub const P3: Self = Self(3);
    /// Low priority.
    pub const P4: Self = Self(4);

    /// Creates a priority if `value` is within 1..=4.
    #[must_use]
    pub fn new(value: i64) -> Option<Self> {
        u8::try_from(value)
            .ok()
            .filter(|v| (1..=4).contains(v))
            .map(Self)
    }

    /// Numeric value.
    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Priority {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(i64::from(value)).ok_or_else(|| format!("priority must be 1..=4, got {value}"))
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority.0
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The component a violation is reported on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentSummary {
    /// Component kind.
    pub kind: ComponentType,
    /// Component name.
    pub name: Option<String>,
    /// Lines spanned.
    pub range: ComponentRange,
}

impl From<&Component> for ComponentSummary {
    fn from(component: &Component) -> Self {
        Self {
            kind: component.kind,
            name: component.name.clone(),
            range: component.range,
        }
    }
}

/// Measured data attached to a violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationData {
    /// Human readable message.
    pub message: String,
    /// File the component belongs to.
    pub path: String,
    /// Measured metric value.
    pub value: usize,
}

impl ViolationData {
    /// Creates violation data. Backslashes are stripped from `path`.
    #[must_use]
    pub fn new(message: impl Into<String>, path: &str, value: usize) -> Self {
        Self {
            message: message.into(),
            path: path.replace('\\', ""),
            value,
        }
    }
}

/// A rule failure on one component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Rule name (e.g., "NPathComplexity").
    pub rule: String,
    /// Priority of the rule at the time of the check.
    pub priority: Priority,
    /// Link to the rule documentation.
    pub external_info_url: String,
    /// The offending component.
    pub component: ComponentSummary,
    /// Name of the enclosing type declaration, if any.
    pub class_name: Option<String>,
    /// Message, path and value.
    pub data: ViolationData,
}

impl Violation {
    /// Name of the offending method when the component is a function.
    #[must_use]
    pub fn method(&self) -> Option<&str> {
        if self.component.kind == ComponentType::Function {
            self.component.name.as_deref()
        } else {
            None
        }
    }

    /// Flat record with the reporting field names.
    #[must_use]
    pub fn record(&self) -> ViolationRecord {
        ViolationRecord {
            path: self.data.path.clone(),
            rule: self.rule.clone(),
            message: self.data.message.clone(),
            priority: self.priority.get(),
            class: self.class_name.clone(),
            method: self.method().map(String::from),
            value: self.data.value,
            external_info_url: self.external_info_url.clone(),
            start_line: self.component.range.start_line,
            end_line: self.component.range.end_line,
        }
    }

    /// Plain text line: `path:line:Rule P<n> message`.
    #[must_use]
    pub fn format(&self) -> String {
        format!(
            "{}:{}:{} P{} {}",
            self.data.path, self.component.range.start_line, self.rule, self.priority, self.data.message
        )
    }

    /// Xcode warning line: `path:line:0: warning: Rule(P<n>):message`.
    #[must_use]
    pub fn xcode_line(&self) -> String {
        format!(
            "{}:{}:0: warning: {}(P{}):{}",
            self.data.path, self.component.range.start_line, self.rule, self.priority, self.data.message
        )
    }
}

/// Serialized form of a violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViolationRecord {
    /// File path.
    pub path: String,
    /// Rule name.
    pub rule: String,
    /// Message.
    pub message: String,
    /// Priority 1..=4.
    pub priority: u8,
    /// Enclosing type name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    /// Method name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Metric value.
    pub value: usize,
    /// Documentation link.
    pub external_info_url: String,
    /// First line of the component.
    pub start_line: usize,
    /// Last line of the component.
    pub end_line: usize,
}

/// Run-wide counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// Files analysed.
    pub total_files: usize,
    /// Files with at least one violation.
    pub files_with_violations: usize,
    /// Violations with priority 1.
    pub violations_with_p1: usize,
    /// Violations with priority 2.
    pub violations_with_p2: usize,
    /// Violations with priority 3 or lower.
    pub violations_with_p3: usize,
}

impl Statistics {
    /// Counts one analysed file and its violations.
    pub fn record_file(&mut self, violations: &[Violation]) {
        self.total_files += 1;
        if !violations.is_empty() {
            self.files_with_violations += 1;
        }
        for violation in violations {
            match violation.priority.get() {
                1 => self.violations_with_p1 += 1,
                2 => self.violations_with_p2 += 1,
                _ => self.violations_with_p3 += 1,
            }
        }
    }
}

/// Per-file summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileOutcome {
    /// Path relative to the analysis root.
    pub path: PathBuf,
    /// Number of violations in the file.
    pub warnings: usize,
}

/// A file that could not be analysed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingError {
    /// File that failed.
    pub path: PathBuf,
    /// Reason.
    pub message: String,
}

/// Result of a lint run.
#[derive(Debug, Default)]
pub struct LintResult {
    /// All violations, grouped by file in analysis order.
    pub violations: Vec<Violation>,
    /// Run-wide counters.
    pub statistics: Statistics,
    /// One entry per analysed file.
    pub files: Vec<FileOutcome>,
    /// Files that could not be analysed.
    pub errors: Vec<ProcessingError>,
}

impl LintResult {
    /// Creates an empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges the outcome of one file.
    pub fn add_file(&mut self, path: PathBuf, violations: Vec<Violation>) {
        self.statistics.record_file(&violations);
        self.files.push(FileOutcome {
            path,
            warnings: violations.len(),
        });
        self.violations.extend(violations);
    }

    /// Records a file that failed to load or analyse.
    pub fn add_error(&mut self, path: PathBuf, message: impl Into<String>) {
        self.errors.push(ProcessingError {
            path,
            message: message.into(),
        });
    }

    /// Returns true if any violation has at least the given priority.
    #[must_use]
    pub fn has_violations_at(&self, priority: Priority) -> bool {
        self.violations.iter().any(|v| v.priority <= priority)
    }

    /// Returns true if there are no violations.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    /// Summary header line.
    #[must_use]
    pub fn format_summary(&self) -> String {
        let s = &self.statistics;
        format!(
            "Summary: TotalFiles={} FilesWithViolations={} P1={} P2={} P3={}",
            s.total_files,
            s.files_with_violations,
            s.violations_with_p1,
            s.violations_with_p2,
            s.violations_with_p3
        )
    }
}
