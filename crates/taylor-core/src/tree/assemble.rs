//! Flattening of the declaration tree into working nodes.

use super::kind::component_type;
use super::node::WorkingNode;
use super::offset::OffsetRange;
use crate::component::ComponentType;
use crate::source::Declaration;

/// Flattens `declarations` depth-first, classifying each node relative to `parent`.
///
/// Nodes of unknown kind are dropped together with their substructure.
#[must_use]
pub fn flatten(declarations: &[Declaration], parent: ComponentType) -> Vec<WorkingNode> {
    let mut nodes = Vec::new();
    flatten_into(declarations, parent, &mut nodes);
    nodes
}

fn flatten_into(declarations: &[Declaration], parent: ComponentType, out: &mut Vec<WorkingNode>) {
    let mut braces = 0usize;
    let last = declarations.len().saturating_sub(1);

    for (index, declaration) in declarations.iter().enumerate() {
        let kind = classify(
            component_type(&declaration.kind),
            parent,
            braces,
            index == last,
        );
        match kind {
            ComponentType::Other => continue,
            ComponentType::Brace => braces += 1,
            _ => {}
        }

        let mut range = OffsetRange::declaration(declaration.offset, declaration.length);
        if kind == ComponentType::Variable
            && declaration.body_offset != 0
            && declaration.body_length != 0
        {
            range.end = declaration.body_offset + declaration.body_length;
        }

        let mut node = WorkingNode::new(kind, range);
        node.name.clone_from(&declaration.name);
        node.type_name.clone_from(&declaration.type_name);
        out.push(node);

        flatten_into(&declaration.substructure, kind, out);
    }
}

/// Rewrites `if` and trailing `brace` nodes into the branch they stand for.
///
/// `braces` is the number of brace siblings already seen in the same list.
#[must_use]
pub fn classify(
    kind: ComponentType,
    parent: ComponentType,
    braces: usize,
    is_last: bool,
) -> ComponentType {
    let parent_is_branch = matches!(parent, ComponentType::If | ComponentType::ElseIf);
    match kind {
        ComponentType::If if parent_is_branch => ComponentType::ElseIf,
        ComponentType::Brace if parent_is_branch && is_last && braces > 0 => ComponentType::Else,
        other => other,
    }
}
