//! Integration test: built-in rules over trees built from structure dumps.

use std::path::Path;

use taylor_core::tree::TreeBuilder;
use taylor_core::{Analyzer, Declaration, FileContext, Priority, SourceFile};

const METHOD: &str = "source.lang.swift.decl.function.method.instance";
const PARAMETER: &str = "source.lang.swift.decl.var.parameter";

fn box_class() -> SourceFile {
    let text = "class Box {\n    func move(a: Int, b: Int, c: Int, d: Int) {\n    }\n}\n";
    let mut method = Declaration::new(METHOD, 16, 49).named("move(a:b:c:d:)");
    for (name, offset) in [("a", 26), ("b", 34), ("c", 42), ("d", 50)] {
        method = method.with_child(Declaration::new(PARAMETER, offset, 6).named(name).typed("Int"));
    }
    let structure = Declaration::new("", 0, text.len())
        .with_child(Declaration::new("source.lang.swift.decl.class", 0, 67).named("Box").with_child(method));
    SourceFile::new("/project/Box.swift", text, structure, Vec::new())
}

fn analyzer(config: &str) -> Analyzer {
    let config = taylor_core::Config::parse(config).expect("config should parse");
    Analyzer::builder()
        .root("/project")
        .rules(taylor_rules::all_rules())
        .config(config)
        .build()
        .expect("analyzer should build")
}

#[test]
fn reports_long_parameter_list_with_enclosing_class() {
    let source = box_class();
    let analyzer = analyzer("");
    let ctx = FileContext::new(Path::new("/project/Box.swift"), analyzer.root());
    let violations = analyzer.analyze_source(&ctx, &source);

    assert_eq!(violations.len(), 1, "{violations:#?}");
    let violation = &violations[0];
    assert_eq!(violation.rule, "ExcessiveParameterList");
    assert_eq!(violation.priority, Priority::P3);
    assert_eq!(violation.class_name.as_deref(), Some("Box"));
    assert_eq!(violation.method(), Some("move(a:b:c:d:)"));
    assert_eq!(violation.data.value, 4);
    assert_eq!(violation.component.range.start_line, 2);
    assert_eq!(
        violation.format(),
        "/project/Box.swift:2:ExcessiveParameterList P3 Method 'move(a:b:c:d:)' has 4 parameters. The allowed number of parameters is 3"
    );
}

#[test]
fn raised_limit_and_disabled_rule_silence_the_file() {
    let source = box_class();

    let raised = analyzer("[rules.ExcessiveParameterList]\nlimit = 4\n");
    let ctx = FileContext::new(Path::new("/project/Box.swift"), raised.root());
    assert!(raised.analyze_source(&ctx, &source).is_empty());

    let disabled = analyzer("[rules.ExcessiveParameterList]\nenabled = false\n");
    assert_eq!(disabled.rule_count(), 6);
    assert!(disabled.analyze_source(&ctx, &source).is_empty());
}

#[test]
fn every_rule_reports_a_value_for_its_kind() {
    let source = box_class();
    let tree = TreeBuilder::new(&source).build();
    let class = &tree.children[0];
    let method = &class.children[0];

    for rule in taylor_rules::all_rules() {
        let on_class = rule.check(class);
        let on_method = rule.check(method);
        let measured = usize::from(on_class.value.is_some()) + usize::from(on_method.value.is_some());
        assert_eq!(measured, 1, "{} should measure exactly one of class or method", rule.name());
    }
}
