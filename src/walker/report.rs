//! Summary of a single walk

use serde::Serialize;

use crate::ast::NodeId;

/// A node whose kind has no walk order; its subtree was pruned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnknownKind {
    pub kind: String,
    pub node: NodeId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WalkReport {
    /// Nodes passed to `before_visit`, placeholders included.
    pub visited: usize,
    /// Nodes whose pre-visit hook returned `SkipSubtree`.
    pub skipped: usize,
    /// Null placeholders created because walking nulls was enabled.
    pub synthesized: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unknown_kinds: Vec<UnknownKind>,
}

impl WalkReport {
    /// True when every node reached had a known kind.
    pub fn is_clean(&self) -> bool {
        self.unknown_kinds.is_empty()
    }
}
