//! Forwarding sink with an optional completion hook

use super::sink::Progress;

/// Forwards every report to an optional delegate and runs a callback once
/// the first time `done` is called.
///
/// Without a delegate every report is dropped and `is_canceled` is false;
/// the callback still runs.
#[derive(Default)]
pub struct ProgressProxy {
    delegate: Option<Box<dyn Progress>>,
    on_done: Option<Box<dyn FnOnce()>>,
}

impl ProgressProxy {
    pub fn new(delegate: Option<Box<dyn Progress>>) -> Self {
        Self {
            delegate,
            on_done: None,
        }
    }

    pub fn wrapping(delegate: impl Progress + 'static) -> Self {
        Self::new(Some(Box::new(delegate)))
    }

    /// Run `callback` after the delegate has been told `done`.
    pub fn on_done(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.on_done = Some(Box::new(callback));
        self
    }
}

impl Progress for ProgressProxy {
    fn set_total_work(&mut self, total_work: f64) {
        if let Some(delegate) = &mut self.delegate {
            delegate.set_total_work(total_work);
        }
    }

    fn set_title(&mut self, title: &str) {
        if let Some(delegate) = &mut self.delegate {
            delegate.set_title(title);
        }
    }

    fn set_worked(&mut self, worked: f64, title: Option<&str>) {
        if let Some(delegate) = &mut self.delegate {
            delegate.set_worked(worked, title);
        }
    }

    fn worked(&mut self, amount: f64) {
        if let Some(delegate) = &mut self.delegate {
            delegate.worked(amount);
        }
    }

    fn done(&mut self) {
        if let Some(delegate) = &mut self.delegate {
            delegate.done();
        }
        if let Some(callback) = self.on_done.take() {
            callback();
        }
    }

    fn is_canceled(&self) -> bool {
        self.delegate
            .as_ref()
            .is_some_and(|delegate| delegate.is_canceled())
    }
}
