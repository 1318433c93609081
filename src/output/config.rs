//! Output configuration types

/// Configuration for output formatting.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub use_color: bool,
    /// Append `(+N hidden)` to collapsed nodes.
    pub show_hidden_counts: bool,
}

impl OutputConfig {
    pub fn color_choice(&self) -> termcolor::ColorChoice {
        if self.use_color {
            termcolor::ColorChoice::Auto
        } else {
            termcolor::ColorChoice::Never
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            use_color: true,
            show_hidden_counts: true,
        }
    }
}
