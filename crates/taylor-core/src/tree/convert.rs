//! Conversion of the normalized working tree into the public component tree.

use super::chunk::Chunks;
use super::node::{NodeId, WorkingTree};
use crate::component::{Component, ComponentRange};

/// Rebuilds `tree` with line ranges. The root always spans the whole file.
#[must_use]
pub fn convert(tree: &WorkingTree, chunks: &Chunks) -> Component {
    let root = tree.root();
    let mut component = Component::new(
        tree.kind(root),
        ComponentRange::new(1, chunks.line_count()),
    );
    component.children = convert_children(tree, root, chunks);
    component
}

fn convert_children(tree: &WorkingTree, id: NodeId, chunks: &Chunks) -> Vec<Component> {
    tree.children(id)
        .iter()
        .map(|&child| {
            let node = tree.node(child);
            Component {
                kind: node.kind,
                range: chunks.to_component_range(node.range),
                name: node.name.clone(),
                children: convert_children(tree, child, chunks),
            }
        })
        .collect()
}
