//! Tree formatter for outlines
//!
//! Renders an [`Outline`] with the same connectors `tree` uses. Colored and
//! plain output share one writer; plain text goes through `NoColor`.

use std::io::{self, Write};
use termcolor::{Color, ColorSpec, NoColor, StandardStream, WriteColor};

use crate::outline::{Outline, OutlineEntry};

use super::config::OutputConfig;

/// Formatter for outlines.
pub struct OutlineFormatter {
    config: OutputConfig,
}

impl OutlineFormatter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Plain-text rendering, one line per entry.
    pub fn format(&self, outline: &Outline) -> String {
        let mut out = NoColor::new(Vec::new());
        // Writing into a Vec cannot fail.
        let _ = self.write_outline(&mut out, outline);
        String::from_utf8_lossy(&out.into_inner()).into_owned()
    }

    /// Print a titled outline to stdout.
    pub fn print(&self, title: &str, outline: &Outline) -> io::Result<()> {
        let mut stdout = StandardStream::stdout(self.config.color_choice());
        let mut bold = ColorSpec::new();
        bold.set_bold(true);
        stdout.set_color(&bold)?;
        writeln!(stdout, "{}", title)?;
        stdout.reset()?;
        self.write_outline(&mut stdout, outline)?;
        writeln!(stdout)?;
        Ok(())
    }

    pub fn write_outline<W: WriteColor>(&self, out: &mut W, outline: &Outline) -> io::Result<()> {
        for entry in &outline.entries {
            self.write_entry(out, entry)?;
        }
        if outline.canceled {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
            writeln!(out, "(walk canceled)")?;
            out.reset()?;
        }
        Ok(())
    }

    fn write_entry<W: WriteColor>(&self, out: &mut W, entry: &OutlineEntry) -> io::Result<()> {
        if entry.depth > 0 {
            let connector = if entry.is_last { "└── " } else { "├── " };
            write!(out, "{}{}", entry.prefix, connector)?;
        }

        let mut kind_color = ColorSpec::new();
        if entry.synthetic {
            kind_color.set_fg(Some(Color::Magenta)).set_dimmed(true);
        } else if entry.depth == 0 {
            kind_color.set_fg(Some(Color::Blue)).set_bold(true);
        } else {
            kind_color.set_fg(Some(Color::Cyan));
        }
        out.set_color(&kind_color)?;
        write!(out, "{}", entry.kind)?;
        out.reset()?;

        if let Some(label) = &entry.label {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
            write!(out, " {}", label)?;
            out.reset()?;
        }

        if entry.hidden > 0 && self.config.show_hidden_counts {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
            write!(out, " (+{} hidden)", entry.hidden)?;
            out.reset()?;
        }

        writeln!(out)
    }
}

/// Print the closing summary line.
pub fn print_summary(use_color: bool, documents: usize, nodes: usize) -> io::Result<()> {
    let config = OutputConfig {
        use_color,
        ..Default::default()
    };
    let mut stdout = StandardStream::stdout(config.color_choice());
    writeln!(
        stdout,
        "{} {}, {} {}",
        documents,
        if documents == 1 { "document" } else { "documents" },
        nodes,
        if nodes == 1 { "node" } else { "nodes" }
    )
}
