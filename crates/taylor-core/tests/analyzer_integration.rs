//! Integration test: discovery, loading and rule evaluation via Analyzer.

use std::fs;
use std::path::Path;

use taylor_core::{
    Analyzer, AnalyzerError, Component, ComponentType, Config, Priority, Rule, RuleOutcome,
    RuleSettings,
};

const SOURCE: &str = "func f() {\n    if a {\n        g()\n    } else {\n    }\n}\n";

const STRUCTURE: &str = r#"{
  "key.offset": 0,
  "key.length": 54,
  "key.substructure": [
    {
      "key.kind": "source.lang.swift.decl.function.free",
      "key.name": "f()",
      "key.offset": 0,
      "key.length": 53,
      "key.substructure": [
        {
          "key.kind": "source.lang.swift.stmt.if",
          "key.offset": 15,
          "key.length": 36,
          "key.substructure": [
            { "key.kind": "source.lang.swift.stmt.brace", "key.offset": 20, "key.length": 18 },
            { "key.kind": "source.lang.swift.stmt.brace", "key.offset": 45, "key.length": 6 }
          ]
        }
      ]
    }
  ]
}"#;

/// Counts the branches of a function; fails above the limit.
struct Branches {
    settings: RuleSettings,
}

impl Rule for Branches {
    fn name(&self) -> &'static str {
        "Branches"
    }

    fn external_info_url(&self) -> &'static str {
        "https://example.com/branches"
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
        let branches =
            component.count_children(ComponentType::If) + component.count_children(ComponentType::Else);
        RuleOutcome::against_limit(branches, self.limit(), || {
            format!("Method '{}' has {branches} branches", component.display_name())
        })
    }
}

fn branches(limit: usize) -> Branches {
    Branches {
        settings: RuleSettings::new(limit, Priority::P2),
    }
}

fn write_source(dir: &Path, name: &str) {
    let path = dir.join(name);
    fs::write(&path, SOURCE).expect("write source");
    fs::write(dir.join(format!("{name}.structure.json")), STRUCTURE).expect("write structure");
}

#[test]
fn analyzes_discovered_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::create_dir_all(dir.path().join("Sources")).expect("mkdir");
    write_source(&dir.path().join("Sources"), "A.swift");
    write_source(dir.path(), "B.swift");
    fs::write(dir.path().join("README.md"), "not swift").expect("write readme");

    let analyzer = Analyzer::builder()
        .root(dir.path())
        .rule(branches(1))
        .build()
        .expect("analyzer should build");
    let result = analyzer.analyze().expect("analysis should succeed");

    assert_eq!(result.statistics.total_files, 2);
    assert_eq!(result.statistics.files_with_violations, 2);
    assert_eq!(result.statistics.violations_with_p2, 2);
    assert!(result.errors.is_empty());

    let violation = &result.violations[0];
    assert_eq!(violation.rule, "Branches");
    assert_eq!(violation.data.value, 2);
    assert_eq!(violation.data.message, "Method 'f()' has 2 branches");
    assert_eq!(violation.method(), Some("f()"));
    assert_eq!(violation.component.range.start_line, 1);
}

#[test]
fn excluded_directories_are_skipped() {
    let dir = tempfile::tempdir().expect("tempdir");
    let pods = dir.path().join("Pods");
    fs::create_dir_all(&pods).expect("mkdir");
    write_source(&pods, "Vendor.swift");
    write_source(dir.path(), "App.swift");

    let analyzer = Analyzer::builder()
        .root(dir.path())
        .rule(branches(1))
        .build()
        .expect("analyzer should build");
    let result = analyzer.analyze().expect("analysis should succeed");

    assert_eq!(result.statistics.total_files, 1);
    assert_eq!(result.files[0].path, Path::new("App.swift"));
}

#[test]
fn configured_limit_silences_rule() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_source(dir.path(), "App.swift");

    let config = Config::parse("[rules.Branches]\nlimit = 5\n").expect("config should parse");
    let analyzer = Analyzer::builder()
        .root(dir.path())
        .rule(branches(1))
        .config(config)
        .build()
        .expect("analyzer should build");
    let result = analyzer.analyze().expect("analysis should succeed");

    assert!(result.is_clean());
    assert_eq!(result.statistics.total_files, 1);
}

#[test]
fn missing_structure_is_reported_per_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_source(dir.path(), "Good.swift");
    fs::write(dir.path().join("Bare.swift"), SOURCE).expect("write source");

    let analyzer = Analyzer::builder()
        .root(dir.path())
        .rule(branches(1))
        .build()
        .expect("analyzer should build");
    let result = analyzer.analyze().expect("analysis should succeed");

    assert_eq!(result.statistics.total_files, 1);
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].path.ends_with("Bare.swift"));
}

#[test]
fn missing_structure_fails_when_strict() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("Bare.swift"), SOURCE).expect("write source");

    let analyzer = Analyzer::builder()
        .root(dir.path())
        .rule(branches(1))
        .fail_on_parse_error(true)
        .build()
        .expect("analyzer should build");

    assert!(matches!(analyzer.analyze(), Err(AnalyzerError::Source(_))));
}

#[test]
fn explicit_inputs_mix_files_and_directories() {
    let dir = tempfile::tempdir().expect("tempdir");
    let nested = dir.path().join("Nested");
    fs::create_dir_all(&nested).expect("mkdir");
    write_source(&nested, "One.swift");
    write_source(dir.path(), "Two.swift");
    write_source(dir.path(), "Three.swift");

    let analyzer = Analyzer::builder()
        .root(dir.path())
        .rule(branches(1))
        .build()
        .expect("analyzer should build");
    let result = analyzer
        .analyze_inputs(&[nested, dir.path().join("Two.swift")])
        .expect("analysis should succeed");

    assert_eq!(result.statistics.total_files, 2);
}
