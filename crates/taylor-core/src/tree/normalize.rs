//! Rewriting passes applied to the working tree after assembly.
//!
//! The passes are order-sensitive; [`super::TreeBuilder`] runs them in the
//! order they appear in this module.

use super::node::{NodeId, WorkingTree};
use crate::component::ComponentType;

/// Drops closure nodes without children, deepest first.
///
/// Plain call expressions are reported as closures by the analysis service;
/// only those with a body survive.
pub fn remove_redundant_closures(tree: &mut WorkingTree) {
    let mut order = tree.descendants(tree.root());
    order.insert(0, tree.root());

    for &id in order.iter().rev() {
        let empty_closures: Vec<NodeId> = tree
            .children(id)
            .iter()
            .copied()
            .filter(|&child| {
                tree.kind(child) == ComponentType::Closure && tree.children(child).is_empty()
            })
            .collect();
        for closure in empty_closures {
            tree.detach(closure);
        }
    }
}

/// Lifts the contents of a leading brace into the construct that owns it.
pub fn unwrap_braces(tree: &mut WorkingTree) {
    unwrap_braces_below(tree, tree.root());
}

fn unwrap_braces_below(tree: &mut WorkingTree, id: NodeId) {
    let mut index = 0;
    while let Some(&child) = tree.children(id).get(index) {
        index += 1;
        if tree.kind(child).is_braced() {
            let first = tree.children(child).first().copied();
            if let Some(brace) = first.filter(|&f| tree.kind(f) == ComponentType::Brace) {
                unwrap_brace(tree, id, child, brace);
            }
        }
        unwrap_braces_below(tree, child);
    }
}

fn unwrap_brace(tree: &mut WorkingTree, parent: NodeId, node: NodeId, brace: NodeId) {
    // The second child is the next branch, which belongs beside the node.
    if let Some(&next) = tree.children(node).get(1) {
        tree.append_child(parent, next);
    }

    for grandchild in tree.children(brace).to_vec() {
        tree.append_child(node, grandchild);
    }

    if tree.kind(node) != ComponentType::Repeat {
        let end = tree.node(brace).range.end;
        tree.node_mut(node).range.end = end;
    }
    tree.detach(brace);
}

/// Turns computed properties into functions and parameter-bearing braces into closures.
pub fn promote_variables(tree: &mut WorkingTree) {
    promote_variables_below(tree, tree.root());
}

fn promote_variables_below(tree: &mut WorkingTree, id: NodeId) {
    for child in tree.children(id).to_vec() {
        let next = promote(tree, child);
        promote_variables_below(tree, next);
    }
}

/// Rewrites one node and returns the node whose subtree should be visited next.
fn promote(tree: &mut WorkingTree, id: NodeId) -> NodeId {
    let kind = tree.kind(id);
    let children = tree.children(id);

    if kind != ComponentType::Variable || !children.iter().any(|&c| tree.kind(c).is_significant()) {
        if kind == ComponentType::Brace && has_child(tree, id, ComponentType::Parameter) {
            tree.node_mut(id).kind = ComponentType::Closure;
        }
        return id;
    }

    tree.node_mut(id).kind = ComponentType::Function;

    // A lone closure child is the initializer of a stored property.
    let lone_closure = match tree.children(id) {
        [only] if tree.kind(*only) == ComponentType::Closure => Some(*only),
        _ => None,
    };
    let (Some(closure), Some(parent)) = (lone_closure, tree.parent(id)) else {
        return id;
    };

    let name = tree.node(id).name.clone();
    tree.node_mut(closure).name = name;
    tree.append_child(parent, closure);
    tree.detach(id);
    closure
}

fn has_child(tree: &WorkingTree, id: NodeId, kind: ComponentType) -> bool {
    tree.children(id).iter().any(|&child| tree.kind(child) == kind)
}

/// Resolves parameters reported inside other parameters.
pub fn dedupe_parameters(tree: &mut WorkingTree) {
    dedupe_parameters_below(tree, tree.root());
}

fn dedupe_parameters_below(tree: &mut WorkingTree, id: NodeId) {
    let is_parameter = tree.kind(id) == ComponentType::Parameter;

    for child in tree.children(id).to_vec() {
        if is_parameter && tree.kind(child) == ComponentType::Parameter {
            let grandparent = tree.parent(id);
            if tree.node(id).range == tree.node(child).range {
                if let Some(grandparent) = grandparent {
                    tree.append_child(grandparent, child);
                }
            } else {
                if let Some(grandparent) = grandparent {
                    tree.append_child(grandparent, child);
                    tree.detach(id);
                }
                dedupe_parameters_below(tree, child);
                break;
            }
        }
        dedupe_parameters_below(tree, child);
    }
}

/// Removes positional closure arguments that were reported as parameters.
pub fn remove_spurious_parameters(tree: &mut WorkingTree) {
    for id in tree.descendants(tree.root()) {
        if is_spurious_parameter(tree, id) {
            tree.detach(id);
        }
    }
}

fn is_spurious_parameter(tree: &WorkingTree, id: NodeId) -> bool {
    let node = tree.node(id);
    if !node.is_a(ComponentType::Parameter) {
        return false;
    }
    let Some(name) = node.name.as_deref() else {
        return false;
    };
    let Some(parent) = tree.parent(id) else {
        return false;
    };

    let positional = name.starts_with('$');
    let untyped_or_self_typed = node.type_name.as_deref().map_or(true, |t| t == name);
    positional && untyped_or_self_typed && tree.kind(parent) != ComponentType::Closure
}

/// Orders every child list by start offset.
pub fn sort_children(tree: &mut WorkingTree) {
    let mut order = tree.descendants(tree.root());
    order.push(tree.root());
    for id in order {
        tree.sort_children(id);
    }
}
