//! Progress reporting
//!
//! A [`Progress`] sink receives work totals, work done, titles and a final
//! `done`. [`CompositeProgress`] splits one sink into weighted
//! [`SubProgress`] handles; [`ProgressProxy`] forwards to an optional sink
//! and runs a hook on completion; [`TerminalProgress`] draws a bar.

mod composite;
mod proxy;
mod sink;
mod terminal;

pub use composite::{CompositeProgress, SubProgress};
pub use proxy::ProgressProxy;
pub use sink::{CancelToken, NoProgress, Progress};
pub use terminal::TerminalProgress;
