//! Configuration for outline walks

use crate::ast::NodeKind;

#[derive(Debug, Clone, Default)]
pub struct OutlineConfig {
    /// Deepest level shown; the root is level 0.
    pub max_depth: Option<usize>,
    /// Kinds shown as a single line without their subtree.
    pub collapse: Vec<NodeKind>,
    /// Show absent child slots as `null` literals.
    pub walk_nulls: bool,
}

impl OutlineConfig {
    pub fn is_collapsed(&self, kind: &NodeKind) -> bool {
        self.collapse.contains(kind)
    }

    pub fn at_max_depth(&self, depth: usize) -> bool {
        self.max_depth.is_some_and(|max| depth >= max)
    }
}
