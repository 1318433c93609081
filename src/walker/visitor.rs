//! Visitor callbacks driven by [`TreeWalker`](super::TreeWalker)

use crate::ast::{Ast, NodeId};

/// What the walker should do after a node's pre-visit hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visit {
    /// Descend into the node's children.
    #[default]
    Continue,
    /// Do not visit any descendant. `after_visit` still fires for the node.
    SkipSubtree,
}

/// Hooks invoked around every node a walk reaches.
///
/// The walker writes the node's parent before calling `before_visit`, so
/// `ast.parent(node)` is valid in both hooks.
pub trait Visitor {
    fn before_visit(&mut self, ast: &Ast, node: NodeId) -> Visit;

    fn after_visit(&mut self, _ast: &Ast, _node: NodeId) {}
}

impl<V: Visitor + ?Sized> Visitor for &mut V {
    fn before_visit(&mut self, ast: &Ast, node: NodeId) -> Visit {
        (**self).before_visit(ast, node)
    }

    fn after_visit(&mut self, ast: &Ast, node: NodeId) {
        (**self).after_visit(ast, node)
    }
}

/// Adapts a pair of closures into a [`Visitor`].
pub struct FnVisitor<B, A> {
    before: B,
    after: A,
}

fn noop(_: &Ast, _: NodeId) {}

impl<B, A> FnVisitor<B, A>
where
    B: FnMut(&Ast, NodeId) -> Visit,
    A: FnMut(&Ast, NodeId),
{
    pub fn new(before: B, after: A) -> Self {
        Self { before, after }
    }
}

impl<B> FnVisitor<B, fn(&Ast, NodeId)>
where
    B: FnMut(&Ast, NodeId) -> Visit,
{
    /// Visitor with only a pre-visit hook.
    pub fn before_only(before: B) -> Self {
        Self {
            before,
            after: noop,
        }
    }
}

impl<B, A> Visitor for FnVisitor<B, A>
where
    B: FnMut(&Ast, NodeId) -> Visit,
    A: FnMut(&Ast, NodeId),
{
    fn before_visit(&mut self, ast: &Ast, node: NodeId) -> Visit {
        (self.before)(ast, node)
    }

    fn after_visit(&mut self, ast: &Ast, node: NodeId) {
        (self.after)(ast, node)
    }
}
