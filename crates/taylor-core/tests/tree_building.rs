//! Integration test: component tree construction end-to-end.

use taylor_core::tree::{NodeId, TreeBuilder, WorkingTree};
use taylor_core::{Component, ComponentRange, ComponentType, Declaration, SourceFile, SyntaxToken};

const FUNCTION: &str = "source.lang.swift.decl.function.free";

/// A file of `count` three-line functions, with matching declarations.
fn many_functions(count: usize) -> SourceFile {
    let mut text = String::new();
    let mut root = Declaration::new("", 0, 0);
    for i in 0..count {
        let body = format!("func f{i}() {{\n    g()\n}}");
        root = root.with_child(Declaration::new(FUNCTION, text.len(), body.len()).named(format!("f{i}()")));
        text.push_str(&body);
        text.push('\n');
    }
    root.length = text.len();
    SourceFile::new("Many.swift", text, root, Vec::new())
}

fn assert_nested(component: &Component) {
    for child in &component.children {
        assert!(
            component.range.contains(&child.range),
            "{} {} does not contain {} {}",
            component.kind,
            component.range,
            child.kind,
            child.range
        );
        assert_nested(child);
    }
    for pair in component.children.windows(2) {
        assert!(pair[0].range.start_line <= pair[1].range.start_line);
    }
}

/// Checks byte containment and that adjacent siblings never share a byte.
fn assert_disjoint(tree: &WorkingTree, id: NodeId) {
    let node = tree.node(id);
    for &child in tree.children(id) {
        assert!(node.range.contains(&tree.node(child).range));
        assert_disjoint(tree, child);
    }
    for pair in tree.children(id).windows(2) {
        let (prev, next) = (tree.node(pair[0]).range, tree.node(pair[1]).range);
        assert!(prev.end < next.start, "{prev:?} overlaps {next:?}");
        assert!(!prev.overlaps(&next));
    }
}

#[test]
fn large_file_lines_are_translated_across_parts() {
    let source = many_functions(2000);
    let builder = TreeBuilder::new(&source);
    let tree = builder.working_tree();
    assert_disjoint(&tree, tree.root());
    let root = builder.build();

    assert_eq!(root.range, ComponentRange::new(1, 6000));
    assert_eq!(root.children.len(), 2000);
    for (i, function) in root.children.iter().enumerate() {
        assert_eq!(function.kind, ComponentType::Function);
        assert_eq!(function.name, Some(format!("f{i}()")));
        assert_eq!(function.range, ComponentRange::new(3 * i + 1, 3 * i + 3));
    }
}

#[test]
fn building_twice_gives_the_same_tree() {
    let source = many_functions(40);
    let first = TreeBuilder::new(&source).build();
    let second = TreeBuilder::new(&source).build();
    assert_eq!(first, second);
}

#[test]
fn class_with_branches_comments_and_blank_lines() {
    let text = concat!(
        "class Runner {\n",            // 0..15
        "    // runs things\n",         // 15..34
        "\n",                           // 34..35
        "\n",                           // 35..36
        "    func run(a: Int) {\n",     // 36..59
        "        if a > 0 && a < 9 {\n", // 59..87
        "            go()\n",           // 87..104
        "        } else {\n",           // 104..121
        "            stop()\n",         // 121..140
        "        }\n",                  // 140..150
        "    }\n",                      // 150..156
        "}\n",                          // 156..158
    );
    let structure = Declaration::new("", 0, text.len()).with_child(
        Declaration::new("source.lang.swift.decl.class", 0, 157)
            .named("Runner")
            .with_child(
                Declaration::new("source.lang.swift.decl.function.method.instance", 40, 115)
                    .named("run(a:)")
                    .with_child(
                        Declaration::new("source.lang.swift.decl.var.parameter", 49, 6)
                            .named("a")
                            .typed("Int"),
                    )
                    .with_child(
                        Declaration::new("source.lang.swift.stmt.if", 67, 82)
                            .with_child(Declaration::new("source.lang.swift.stmt.brace", 85, 28))
                            .with_child(Declaration::new("source.lang.swift.stmt.brace", 119, 30)),
                    ),
            ),
    );
    let tokens = vec![SyntaxToken::new("source.lang.swift.syntaxtype.comment", 19, 14)];
    let source = SourceFile::new("Runner.swift", text, structure, tokens);

    let builder = TreeBuilder::new(&source);
    let tree = builder.working_tree();
    assert_disjoint(&tree, tree.root());

    let root = builder.build();
    assert_nested(&root);

    let class = &root.children[0];
    assert_eq!(class.kind, ComponentType::Class);
    assert_eq!(class.range, ComponentRange::new(1, 12));

    let kinds: Vec<_> = class.children.iter().map(|c| c.kind).collect();
    assert_eq!(
        kinds,
        vec![ComponentType::Comment, ComponentType::EmptyLines, ComponentType::Function]
    );
    assert_eq!(class.children[1].range, ComponentRange::new(3, 4));

    let function = &class.children[2];
    assert_eq!(function.range, ComponentRange::new(5, 11));
    assert_eq!(function.count_children(ComponentType::Parameter), 1);
    assert_eq!(function.count_children(ComponentType::If), 1);
    assert_eq!(function.count_children(ComponentType::Else), 1);

    let branch = function
        .children
        .iter()
        .find(|c| c.is_a(ComponentType::If))
        .expect("if statement");
    assert_eq!(branch.range.start_line, 6);
    assert_eq!(branch.count_children(ComponentType::And), 1);
}
