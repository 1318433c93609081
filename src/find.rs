//! Label search over a walked tree

use regex::Regex;
use serde::Serialize;

use crate::ast::{Ast, NodeId};
use crate::error::{Error, Result};
use crate::walker::{FnVisitor, TreeWalker, Visit, WalkReport};

/// A node whose label matched the search pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FindMatch {
    pub kind: String,
    pub label: String,
    /// Kinds of the enclosing nodes, outermost first.
    pub path: Vec<String>,
}

impl FindMatch {
    pub fn display_path(&self) -> String {
        let mut parts = self.path.clone();
        parts.push(format!("{} {}", self.kind, self.label));
        parts.join(" > ")
    }
}

pub fn compile_pattern(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| Error::Pattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

/// Collect every node under `root` whose label matches `pattern`.
///
/// Ancestor paths follow the parent links the walk writes.
pub fn find_labels(ast: &mut Ast, root: NodeId, pattern: &Regex) -> (Vec<FindMatch>, WalkReport) {
    let mut matches = Vec::new();
    let mut walker = TreeWalker::new(FnVisitor::before_only(|ast: &Ast, id: NodeId| {
        let node = ast.node(id);
        if let Some(label) = node.label().filter(|label| pattern.is_match(label)) {
            let mut path: Vec<String> = ast
                .ancestors(id)
                .map(|ancestor| ast.kind(ancestor).to_string())
                .collect();
            path.reverse();
            matches.push(FindMatch {
                kind: node.kind.to_string(),
                label,
                path,
            });
        }
        Visit::Continue
    }));
    let report = walker.walk(ast, root);
    drop(walker);
    (matches, report)
}
