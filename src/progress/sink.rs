//! The progress sink capability

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Receiver of progress reports.
///
/// Every method has a no-op default, so an implementation only overrides
/// what it displays. Cancellation is cooperative: producers poll
/// [`Progress::is_canceled`] and stop on their own.
pub trait Progress {
    fn set_total_work(&mut self, _total_work: f64) {}

    fn set_title(&mut self, _title: &str) {}

    /// Set the absolute amount of work done, optionally replacing the title.
    fn set_worked(&mut self, _worked: f64, _title: Option<&str>) {}

    /// Add `amount` to the work done so far.
    fn worked(&mut self, _amount: f64) {}

    /// Add one unit of work.
    fn tick(&mut self) {
        self.worked(1.0);
    }

    fn done(&mut self) {}

    fn is_canceled(&self) -> bool {
        false
    }
}

impl<P: Progress + ?Sized> Progress for Box<P> {
    fn set_total_work(&mut self, total_work: f64) {
        (**self).set_total_work(total_work)
    }

    fn set_title(&mut self, title: &str) {
        (**self).set_title(title)
    }

    fn set_worked(&mut self, worked: f64, title: Option<&str>) {
        (**self).set_worked(worked, title)
    }

    fn worked(&mut self, amount: f64) {
        (**self).worked(amount)
    }

    fn tick(&mut self) {
        (**self).tick()
    }

    fn done(&mut self) {
        (**self).done()
    }

    fn is_canceled(&self) -> bool {
        (**self).is_canceled()
    }
}

/// Sink that ignores every report and is never canceled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {}

/// Shared cancellation flag that any number of sinks can observe.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_canceled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// A bare token is a sink that drops reports and only answers cancellation.
impl Progress for CancelToken {
    fn is_canceled(&self) -> bool {
        CancelToken::is_canceled(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_progress_is_never_canceled() {
        let mut sink = NoProgress;
        sink.set_total_work(10.0);
        sink.tick();
        sink.done();
        assert!(!sink.is_canceled());
    }

    #[test]
    fn test_cancel_token_is_shared() {
        let token = CancelToken::new();
        let observer = token.clone();
        assert!(!observer.is_canceled());
        token.cancel();
        assert!(observer.is_canceled());
    }

    #[test]
    fn test_token_as_sink_reports_cancellation() {
        let token = CancelToken::new();
        let mut sink: Box<dyn Progress> = Box::new(token.clone());
        sink.set_total_work(3.0);
        sink.tick();
        assert!(!sink.is_canceled());
        token.cancel();
        assert!(sink.is_canceled());
    }
}
