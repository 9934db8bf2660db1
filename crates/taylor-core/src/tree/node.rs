//! Arena-backed, offset-addressed tree used during construction.
//!
//! Nodes own their children through index lists; the parent link is a plain
//! back-reference used for re-parenting. Detached nodes stay in the arena
//! but are no longer reachable from the root.

use super::offset::OffsetRange;
use crate::component::ComponentType;

/// Handle of a node inside a [`WorkingTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// A mutable node of the working tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingNode {
    /// Node kind, rewritten by the normalization passes.
    pub kind: ComponentType,
    /// Byte range.
    pub range: OffsetRange,
    /// Declared name.
    pub name: Option<String>,
    /// Declared type name.
    pub type_name: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl WorkingNode {
    /// Creates an unnamed, detached node.
    #[must_use]
    pub fn new(kind: ComponentType, range: OffsetRange) -> Self {
        Self {
            kind,
            range,
            name: None,
            type_name: None,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Sets the name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the declared type name.
    #[must_use]
    pub fn typed(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// Returns true if the node is of the given kind.
    #[must_use]
    pub fn is_a(&self, kind: ComponentType) -> bool {
        self.kind == kind
    }
}

/// Working tree of one file.
#[derive(Debug, Clone)]
pub struct WorkingTree {
    nodes: Vec<WorkingNode>,
    root: NodeId,
}

impl WorkingTree {
    /// Creates a tree holding only `root`.
    #[must_use]
    pub fn new(root: WorkingNode) -> Self {
        Self {
            nodes: vec![root],
            root: NodeId(0),
        }
    }

    /// The root node.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Borrows a node.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &WorkingNode {
        &self.nodes[id.0]
    }

    /// Mutably borrows a node.
    pub fn node_mut(&mut self, id: NodeId) -> &mut WorkingNode {
        &mut self.nodes[id.0]
    }

    /// Kind of a node.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> ComponentType {
        self.nodes[id.0].kind
    }

    /// Children of a node in their current order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Parent of a node, if attached.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Adds a detached node to the arena.
    pub fn alloc(&mut self, mut node: WorkingNode) -> NodeId {
        node.parent = None;
        node.children.clear();
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// Appends `child` to the children of `parent`, detaching it first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Removes a node from its parent's children.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|&child| child != id);
        }
    }

    /// Sorts the children of `id` by start offset.
    pub(crate) fn sort_children(&mut self, id: NodeId) {
        let mut children = std::mem::take(&mut self.nodes[id.0].children);
        children.sort_by_key(|&child| self.nodes[child.0].range.start);
        self.nodes[id.0].children = children;
    }

    /// Inserts `node` below the root by range containment.
    ///
    /// At each level the node descends into the first child containing it.
    /// Children it contains are moved under it before it is attached.
    pub fn insert(&mut self, node: WorkingNode) -> NodeId {
        let range = node.range;
        let id = self.alloc(node);
        let mut current = self.root;

        'descend: loop {
            let snapshot = self.children(current).to_vec();
            for child in snapshot {
                let child_range = self.nodes[child.0].range;
                if child_range.contains(&range) {
                    current = child;
                    continue 'descend;
                }
                if range.contains(&child_range) {
                    self.append_child(id, child);
                }
            }
            self.append_child(current, id);
            return id;
        }
    }

    /// Inserts every node in order.
    pub fn insert_all(&mut self, nodes: impl IntoIterator<Item = WorkingNode>) {
        for node in nodes {
            self.insert(node);
        }
    }

    /// Descendants of `id` in pre-order, excluding `id` itself.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            order.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(kind: ComponentType, start: usize, end: usize) -> WorkingNode {
        WorkingNode::new(kind, OffsetRange::new(start, end))
    }

    fn tree() -> WorkingTree {
        WorkingTree::new(node(ComponentType::Other, 0, 1000))
    }

    #[test]
    fn test_insert_descends_into_container() {
        let mut tree = tree();
        let class = tree.insert(node(ComponentType::Class, 0, 100));
        let function = tree.insert(node(ComponentType::Function, 10, 50));

        assert_eq!(tree.children(tree.root()), &[class]);
        assert_eq!(tree.children(class), &[function]);
        assert_eq!(tree.parent(function), Some(class));
    }

    #[test]
    fn test_insert_adopts_contained_children() {
        let mut tree = tree();
        let first = tree.insert(node(ComponentType::Function, 10, 20));
        let second = tree.insert(node(ComponentType::Function, 30, 40));
        let outside = tree.insert(node(ComponentType::Function, 200, 300));
        let class = tree.insert(node(ComponentType::Class, 0, 100));

        assert_eq!(tree.children(tree.root()), &[outside, class]);
        assert_eq!(tree.children(class), &[first, second]);
        assert_eq!(tree.parent(first), Some(class));
    }

    #[test]
    fn test_equal_ranges_nest_into_existing() {
        let mut tree = tree();
        let outer = tree.insert(node(ComponentType::Parameter, 5, 9));
        let inner = tree.insert(node(ComponentType::Parameter, 5, 9));

        assert_eq!(tree.children(outer), &[inner]);
    }

    #[test]
    fn test_detach_and_descendants() {
        let mut tree = tree();
        let class = tree.insert(node(ComponentType::Class, 0, 100));
        let function = tree.insert(node(ComponentType::Function, 10, 50));
        let branch = tree.insert(node(ComponentType::If, 20, 30));
        let other = tree.insert(node(ComponentType::Function, 60, 70));

        assert_eq!(tree.descendants(tree.root()), vec![class, function, branch, other]);

        tree.detach(function);
        assert_eq!(tree.parent(function), None);
        assert_eq!(tree.descendants(tree.root()), vec![class, other]);
    }

    #[test]
    fn test_sort_children() {
        let mut tree = tree();
        let late = tree.insert(node(ComponentType::Function, 50, 60));
        let early = tree.insert(node(ComponentType::Function, 10, 20));
        assert_eq!(tree.children(tree.root()), &[late, early]);

        tree.sort_children(tree.root());
        assert_eq!(tree.children(tree.root()), &[early, late]);
    }
}
