//! Reporters for lint results.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Write as _;
use std::io::Write as _;
use std::path::PathBuf;
use std::str::FromStr;
use taylor_core::{LintResult, ViolationRecord};

/// Output format of a reporter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReporterKind {
    /// Summary header followed by one line per violation.
    #[default]
    Text,
    /// `{"violation": [...]}` document.
    Json,
    /// PMD XML.
    Pmd,
    /// Xcode build warnings, always on stderr.
    Xcode,
}

/// A reporter requested on the command line: `TYPE` or `TYPE:FILE`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReporterSpec {
    /// Output format.
    pub kind: ReporterKind,
    /// Destination file; stdout when absent.
    pub file: Option<PathBuf>,
}

impl FromStr for ReporterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "pmd" => Ok(Self::Pmd),
            "xcode" => Ok(Self::Xcode),
            other => Err(format!(
                "unknown reporter type '{other}', expected text, json, pmd or xcode"
            )),
        }
    }
}

impl FromStr for ReporterSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, file) = match s.split_once(':') {
            Some((kind, file)) => (kind, Some(file)),
            None => (s, None),
        };
        let kind: ReporterKind = kind.parse()?;
        let file = match (kind, file) {
            (_, None) => None,
            (ReporterKind::Xcode, Some(_)) => {
                return Err("the xcode reporter always writes to stderr".to_string())
            }
            (_, Some("")) => return Err(format!("no file name given in '{s}'")),
            (_, Some(file)) => Some(PathBuf::from(file)),
        };
        Ok(Self { kind, file })
    }
}

#[derive(Serialize)]
struct JsonReport {
    violation: Vec<ViolationRecord>,
}

/// Renders `result` in the given format.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render(result: &LintResult, kind: ReporterKind) -> Result<String> {
    Ok(match kind {
        ReporterKind::Text => render_text(result),
        ReporterKind::Json => render_json(result)?,
        ReporterKind::Pmd => render_pmd(result)?,
        ReporterKind::Xcode => render_xcode(result),
    })
}

/// Writes one report to its destination.
///
/// # Errors
///
/// Returns an error if rendering or writing fails.
pub fn emit(result: &LintResult, spec: &ReporterSpec) -> Result<()> {
    let content = render(result, spec.kind)?;
    match (&spec.file, spec.kind) {
        (_, ReporterKind::Xcode) => std::io::stderr()
            .write_all(content.as_bytes())
            .context("Failed to write to stderr"),
        (Some(path), _) => std::fs::write(path, content)
            .with_context(|| format!("Failed to write report: {}", path.display())),
        (None, _) => std::io::stdout()
            .write_all(content.as_bytes())
            .context("Failed to write to stdout"),
    }
}

fn render_text(result: &LintResult) -> String {
    let mut out = format!("\n{}\n\n", result.format_summary());
    for violation in &result.violations {
        out.push_str(&violation.format());
        out.push('\n');
    }
    out
}

fn render_json(result: &LintResult) -> Result<String> {
    let report = JsonReport {
        violation: result.violations.iter().map(taylor_core::Violation::record).collect(),
    };
    let mut json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
    json.push('\n');
    Ok(json)
}

fn render_xcode(result: &LintResult) -> String {
    result
        .violations
        .iter()
        .map(|v| format!("{}\n", v.xcode_line()))
        .collect()
}

fn render_pmd(result: &LintResult) -> Result<String> {
    let mut xml = String::new();
    write_pmd(&mut xml, result).context("Failed to render PMD report")?;
    Ok(xml)
}

fn write_pmd(xml: &mut String, result: &LintResult) -> std::fmt::Result {
    writeln!(xml, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>")?;
    writeln!(xml, "<pmd>")?;

    let mut paths: Vec<&str> = Vec::new();
    for violation in &result.violations {
        if !paths.contains(&violation.data.path.as_str()) {
            paths.push(&violation.data.path);
        }
    }

    for path in paths {
        writeln!(xml, "  <file name=\"{}\">", escape_xml(path))?;
        for record in result
            .violations
            .iter()
            .filter(|v| v.data.path == path)
            .map(taylor_core::Violation::record)
        {
            write!(
                xml,
                "    <violation beginline=\"{}\" endline=\"{}\" rule=\"{}\"",
                record.start_line,
                record.end_line,
                escape_xml(&record.rule)
            )?;
            if let Some(class) = &record.class {
                write!(xml, " class=\"{}\"", escape_xml(class))?;
            }
            if let Some(method) = &record.method {
                write!(xml, " method=\"{}\"", escape_xml(method))?;
            }
            writeln!(
                xml,
                " value=\"{}\" externalInfoUrl=\"{}\" priority=\"{}\">{}</violation>",
                record.value,
                escape_xml(&record.external_info_url),
                record.priority,
                escape_xml(&record.message)
            )?;
        }
        writeln!(xml, "  </file>")?;
    }

    writeln!(xml, "</pmd>")
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
