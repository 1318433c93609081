//! Depth-first ESTree traversal
//!
//! [`TreeWalker`] visits nodes in pre-order, calling a [`Visitor`] before a
//! node's children and again after them. The pre-visit hook can prune a
//! subtree by returning [`Visit::SkipSubtree`].

mod report;
mod visitor;
mod walker;

pub use report::{UnknownKind, WalkReport};
pub use visitor::{FnVisitor, Visit, Visitor};
pub use walker::TreeWalker;
