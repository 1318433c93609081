//! Progress bar rendered on a terminal stream

use std::io::{self, Write};

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use tracing::trace;

use super::sink::{CancelToken, Progress};

const BAR_WIDTH: usize = 24;

/// Single-line progress bar: `title [#########...............]  37%`.
///
/// The line is redrawn in place with `\r` only when the whole percentage
/// or the title changes. Write failures are logged and otherwise ignored.
pub struct TerminalProgress<W: WriteColor> {
    out: W,
    total_work: f64,
    worked: f64,
    title: String,
    last_drawn: Option<(u32, String)>,
    finished: bool,
    cancel: CancelToken,
}

impl TerminalProgress<StandardStream> {
    /// Progress bar on stderr.
    pub fn stderr(color: ColorChoice) -> Self {
        Self::new(StandardStream::stderr(color))
    }
}

impl<W: WriteColor> TerminalProgress<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            total_work: 0.0,
            worked: 0.0,
            title: String::new(),
            last_drawn: None,
            finished: false,
            cancel: CancelToken::new(),
        }
    }

    /// Observe `token` for cancellation instead of a private one.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn percent(&self) -> u32 {
        if self.total_work <= 0.0 {
            return 0;
        }
        let ratio = (self.worked / self.total_work).clamp(0.0, 1.0);
        (ratio * 100.0).floor() as u32
    }

    fn redraw(&mut self) {
        if self.finished {
            return;
        }
        let percent = self.percent();
        let state = (percent, self.title.clone());
        if self.last_drawn.as_ref() == Some(&state) {
            return;
        }
        if let Err(e) = self.draw(percent) {
            trace!(error = %e, "progress redraw failed");
        }
        self.last_drawn = Some(state);
    }

    fn draw(&mut self, percent: u32) -> io::Result<()> {
        let filled = (percent as usize * BAR_WIDTH) / 100;
        write!(self.out, "\r")?;
        if !self.title.is_empty() {
            self.out
                .set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
            write!(self.out, "{} ", self.title)?;
            self.out.reset()?;
        }
        write!(
            self.out,
            "[{}{}] {:>3}%",
            "#".repeat(filled),
            ".".repeat(BAR_WIDTH - filled),
            percent
        )?;
        self.out.flush()
    }
}

impl<W: WriteColor> Progress for TerminalProgress<W> {
    fn set_total_work(&mut self, total_work: f64) {
        self.total_work = total_work;
        self.redraw();
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
        self.redraw();
    }

    fn set_worked(&mut self, worked: f64, title: Option<&str>) {
        self.worked = worked;
        if let Some(title) = title {
            self.title = title.to_string();
        }
        self.redraw();
    }

    fn worked(&mut self, amount: f64) {
        self.worked += amount;
        self.redraw();
    }

    fn done(&mut self) {
        if self.finished {
            return;
        }
        self.worked = self.total_work;
        self.redraw();
        if let Err(e) = writeln!(self.out) {
            trace!(error = %e, "progress finish failed");
        }
        self.finished = true;
    }

    fn is_canceled(&self) -> bool {
        self.cancel.is_canceled()
    }
}
