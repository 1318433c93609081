//! TreeWalker - pre/post-order traversal with an explicit stack

use tracing::{debug, warn};

use crate::ast::{Ast, NodeId};

use super::report::{UnknownKind, WalkReport};
use super::visitor::{FnVisitor, Visit, Visitor};

enum Step {
    Enter {
        slot: Option<NodeId>,
        parent: Option<NodeId>,
    },
    Leave(NodeId),
}

/// Depth-first walker over an [`Ast`].
///
/// Holds only its visitor and the walk-nulls flag, so it can be reused on
/// any number of roots. Traversal uses a heap-allocated stack; tree depth
/// is not limited by the thread's call stack.
pub struct TreeWalker<V> {
    visitor: V,
    walk_nulls: bool,
}

impl<V: Visitor> TreeWalker<V> {
    pub fn new(visitor: V) -> Self {
        Self {
            visitor,
            walk_nulls: false,
        }
    }

    /// When enabled, absent child slots are visited as `null` literal
    /// placeholders instead of being skipped.
    pub fn set_walk_nulls(&mut self, value: bool) {
        self.walk_nulls = value;
    }

    pub fn with_walk_nulls(mut self, value: bool) -> Self {
        self.walk_nulls = value;
        self
    }

    pub fn walk_nulls(&self) -> bool {
        self.walk_nulls
    }

    pub fn visitor(&self) -> &V {
        &self.visitor
    }

    pub fn visitor_mut(&mut self) -> &mut V {
        &mut self.visitor
    }

    pub fn into_visitor(self) -> V {
        self.visitor
    }

    /// Walk the subtree rooted at `root`.
    ///
    /// Every reached node has its parent written before `before_visit`
    /// runs; the root's parent is cleared. Null placeholders exist only
    /// for the duration of the walk and are dropped from the arena before
    /// this returns.
    pub fn walk(&mut self, ast: &mut Ast, root: NodeId) -> WalkReport {
        let arena_len = ast.len();
        let mut report = WalkReport::default();
        let mut stack = vec![Step::Enter {
            slot: Some(root),
            parent: None,
        }];

        while let Some(step) = stack.pop() {
            let (slot, parent) = match step {
                Step::Leave(id) => {
                    self.visitor.after_visit(ast, id);
                    continue;
                }
                Step::Enter { slot, parent } => (slot, parent),
            };

            let id = match (slot, parent) {
                (Some(id), _) => {
                    ast.set_parent(id, parent);
                    id
                }
                (None, Some(parent)) if self.walk_nulls => {
                    report.synthesized += 1;
                    ast.push_null_placeholder(parent)
                }
                _ => continue,
            };

            report.visited += 1;
            if self.visitor.before_visit(ast, id) == Visit::SkipSubtree {
                report.skipped += 1;
                self.visitor.after_visit(ast, id);
                continue;
            }

            let Some(slots) = ast.child_slots(id) else {
                let kind = ast.kind(id).to_string();
                warn!(kind = %kind, node = id.index(), "walk order not defined for node kind");
                report.unknown_kinds.push(UnknownKind { kind, node: id });
                self.visitor.after_visit(ast, id);
                continue;
            };

            stack.push(Step::Leave(id));
            stack.extend(slots.into_iter().rev().map(|slot| Step::Enter {
                slot,
                parent: Some(id),
            }));
        }

        ast.truncate(arena_len);
        debug!(
            visited = report.visited,
            skipped = report.skipped,
            unknown = report.unknown_kinds.len(),
            "walk finished"
        );
        report
    }
}

impl<B, A> TreeWalker<FnVisitor<B, A>>
where
    B: FnMut(&Ast, NodeId) -> Visit,
    A: FnMut(&Ast, NodeId),
{
    /// Build a walker from a pre-visit and a post-visit closure.
    pub fn from_fns(before: B, after: A) -> Self {
        Self::new(FnVisitor::new(before, after))
    }
}
