//! ESTree syntax trees
//!
//! - `kind` - node kinds and the walk-order table
//! - `node` - the node arena, JSON loading and child-slot resolution

mod kind;
mod node;

pub use kind::{NodeKind, walk_order};
pub use node::{Ancestors, Ast, Child, Node, NodeId};
