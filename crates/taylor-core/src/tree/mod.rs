//! Construction of the component tree from structural input.
//!
//! [`TreeBuilder`] reconciles the declaration tree and token stream of one
//! file into a nested, line-addressed [`Component`] tree:
//!
//! 1. declarations are flattened, classified and inserted by containment,
//!    together with accessor blocks found in variable bodies;
//! 2. the normalization passes in [`normalize`] rewrite the working tree;
//! 3. the result is translated from byte offsets to lines through [`Chunks`].

pub mod assemble;
pub mod chunk;
pub mod convert;
pub mod finder;
pub mod kind;
pub mod node;
pub mod normalize;
pub mod offset;

use tracing::debug;

use crate::component::{Component, ComponentType};
use crate::source::SourceFile;

pub use chunk::Chunks;
pub use finder::Finder;
pub use node::{NodeId, WorkingNode, WorkingTree};
pub use offset::OffsetRange;

/// Builds the component tree of a single source file.
pub struct TreeBuilder<'a> {
    source: &'a SourceFile,
    chunks: Chunks,
}

impl<'a> TreeBuilder<'a> {
    /// Prepares a builder, splitting the file into parts.
    #[must_use]
    pub fn new(source: &'a SourceFile) -> Self {
        Self {
            source,
            chunks: Chunks::split(&source.text),
        }
    }

    /// Parts used for offset to line translation.
    #[must_use]
    pub fn chunks(&self) -> &Chunks {
        &self.chunks
    }

    /// Builds the line-addressed component tree.
    #[must_use]
    pub fn build(&self) -> Component {
        let tree = self.working_tree();
        convert::convert(&tree, &self.chunks)
    }

    /// Assembles and normalizes the offset-addressed working tree.
    #[must_use]
    pub fn working_tree(&self) -> WorkingTree {
        let structure = &self.source.structure;
        let mut tree = WorkingTree::new(WorkingNode::new(
            ComponentType::Other,
            OffsetRange::declaration(structure.offset, structure.length),
        ));
        let finder = Finder::new(&self.source.text, &self.chunks, &self.source.tokens);

        let declarations = assemble::flatten(&structure.substructure, ComponentType::Other);
        let accessors = finder.accessors(&declarations);
        debug!(
            "{}: {} declarations, {} accessors",
            self.source.path.display(),
            declarations.len(),
            accessors.len()
        );
        tree.insert_all(declarations);
        tree.insert_all(accessors);

        normalize::remove_redundant_closures(&mut tree);
        normalize::unwrap_braces(&mut tree);

        let lexical = finder.lexical();
        debug!(
            "{}: {} lexical nodes",
            self.source.path.display(),
            lexical.len()
        );
        tree.insert_all(lexical);

        normalize::promote_variables(&mut tree);
        normalize::dedupe_parameters(&mut tree);
        normalize::remove_spurious_parameters(&mut tree);
        normalize::sort_children(&mut tree);
        tree
    }
}
