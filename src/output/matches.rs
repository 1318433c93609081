//! Formatting for `--find` results

use std::io::{self, Write};
use std::path::Path;
use termcolor::{Color, ColorSpec, StandardStream, WriteColor};

use crate::find::FindMatch;

use super::config::OutputConfig;

pub fn write_matches<W: WriteColor>(
    out: &mut W,
    path: &Path,
    matches: &[FindMatch],
) -> io::Result<()> {
    for found in matches {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
        write!(out, "{}", path.display())?;
        out.reset()?;
        write!(out, ": ")?;
        for kind in &found.path {
            write!(out, "{} > ", kind)?;
        }
        out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
        write!(out, "{}", found.kind)?;
        out.reset()?;
        out.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true))?;
        write!(out, " {}", found.label)?;
        out.reset()?;
        writeln!(out)?;
    }
    Ok(())
}

pub fn print_matches(config: &OutputConfig, path: &Path, matches: &[FindMatch]) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(config.color_choice());
    write_matches(&mut stdout, path, matches)
}
