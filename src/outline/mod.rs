//! Outline building on top of the tree walker

mod config;
mod visitor;

pub use config::OutlineConfig;
pub use visitor::{Outline, OutlineEntry, OutlineVisitor, outline};
