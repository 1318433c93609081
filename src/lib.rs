//! eswalk - walk ESTree syntax trees with visitor control and weighted
//! progress reporting

pub mod ast;
pub mod error;
pub mod find;
pub mod logging;
pub mod outline;
pub mod output;
pub mod progress;
pub mod source;
pub mod stats;
pub mod walker;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use ast::{Ast, Child, Node, NodeId, NodeKind, walk_order};
pub use error::{Error, Result};
pub use find::{FindMatch, compile_pattern, find_labels};
pub use logging::init_logging;
pub use outline::{Outline, OutlineConfig, OutlineEntry, OutlineVisitor, outline};
pub use output::{
    DocumentReport, OutlineFormatter, OutputConfig, print_json, print_matches, print_summary,
};
pub use progress::{
    CancelToken, CompositeProgress, NoProgress, Progress, ProgressProxy, SubProgress,
    TerminalProgress,
};
pub use source::{Document, SourceConfig, discover, load_all, load_document};
pub use stats::{KindStats, StatsCollector, StatsConfig, print_stats, print_stats_json};
pub use walker::{FnVisitor, TreeWalker, UnknownKind, Visit, Visitor, WalkReport};
