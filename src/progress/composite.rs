//! Weighted aggregation of sub-task progress into one root sink

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, warn};

use super::sink::Progress;

#[derive(Debug, Clone)]
struct ChildState {
    weight: f64,
    worked: f64,
    total_work: f64,
    done: bool,
}

impl ChildState {
    fn new(weight: f64) -> Self {
        Self {
            weight,
            worked: 0.0,
            total_work: 0.0,
            done: false,
        }
    }

    /// Completion in `[0, 1]`. Work reported past the total counts as done.
    fn share(&self) -> f64 {
        if self.total_work == 0.0 {
            0.0
        } else {
            (self.worked / self.total_work).clamp(0.0, 1.0)
        }
    }
}

#[derive(Default)]
struct Bookkeeping {
    children: Vec<ChildState>,
    children_done: usize,
    completed: bool,
}

impl Bookkeeping {
    /// Weighted mean of child completion. Children without a total yet
    /// count as zero but still carry their weight.
    fn fraction(&self) -> f64 {
        let total_weight: f64 = self.children.iter().map(|c| c.weight).sum();
        if total_weight == 0.0 {
            return 0.0;
        }
        let done: f64 = self.children.iter().map(|c| c.weight * c.share()).sum();
        done / total_weight
    }
}

/// Child bookkeeping and the root sink live in separate cells. No borrow of
/// the bookkeeping is held while the sink runs, so a sink may read the
/// composite back.
struct Shared {
    state: RefCell<Bookkeeping>,
    sink: RefCell<Box<dyn Progress>>,
}

impl Shared {
    fn push_update(&self) {
        let fraction = {
            let state = self.state.borrow();
            if state.completed {
                debug!("progress reported after completion; not forwarded");
                return;
            }
            state.fraction()
        };
        self.sink.borrow_mut().set_worked(fraction, None);
    }

    fn push_title(&self, title: &str) {
        if self.state.borrow().completed {
            debug!(title, "title reported after completion; not forwarded");
            return;
        }
        self.sink.borrow_mut().set_title(title);
    }

    fn child_done(&self, index: usize) {
        let finishes_all = {
            let mut state = self.state.borrow_mut();
            let child = &mut state.children[index];
            if child.done {
                warn!(child = index, "sub-progress finished more than once; ignoring");
                return;
            }
            child.worked = child.total_work;
            child.done = true;
            state.children_done += 1;
            state.children_done == state.children.len() && !state.completed
        };
        self.push_update();

        if finishes_all {
            let children = {
                let mut state = self.state.borrow_mut();
                state.completed = true;
                state.children.len()
            };
            debug!(children, "all sub-progresses done");
            self.sink.borrow_mut().done();
        }
    }

    /// A sink asking about cancellation from inside one of its own reports
    /// sees `false`.
    fn is_canceled(&self) -> bool {
        self.sink
            .try_borrow()
            .is_ok_and(|sink| sink.is_canceled())
    }
}

/// Progress sink fan-in: any number of [`SubProgress`] handles report into
/// one root sink, which sees a single fraction in `[0, 1]`.
///
/// On creation the root receives a total of `1` and worked `0`. The root's
/// `done` fires once, when every sub-progress created so far has finished.
/// Handles share state through `Rc`, so a composite and its children stay
/// on one thread.
pub struct CompositeProgress {
    shared: Rc<Shared>,
}

impl CompositeProgress {
    pub fn new(sink: impl Progress + 'static) -> Self {
        let mut sink: Box<dyn Progress> = Box::new(sink);
        sink.set_total_work(1.0);
        sink.set_worked(0.0, None);
        Self {
            shared: Rc::new(Shared {
                state: RefCell::new(Bookkeeping::default()),
                sink: RefCell::new(sink),
            }),
        }
    }

    /// Register a child with weight 1.
    pub fn sub_progress(&self) -> SubProgress {
        self.weighted_sub_progress(1.0)
    }

    /// Register a child whose completion counts `weight` times. Weights that
    /// are not finite and positive fall back to 1.
    pub fn weighted_sub_progress(&self, weight: f64) -> SubProgress {
        let weight = if weight.is_finite() && weight > 0.0 {
            weight
        } else {
            debug!(weight, "invalid sub-progress weight, using 1");
            1.0
        };

        let mut state = self.shared.state.borrow_mut();
        if state.completed {
            warn!("sub-progress created after the composite completed");
        }
        state.children.push(ChildState::new(weight));
        SubProgress {
            shared: Rc::clone(&self.shared),
            index: state.children.len() - 1,
        }
    }

    /// Current aggregate fraction.
    pub fn fraction(&self) -> f64 {
        self.shared.state.borrow().fraction()
    }

    pub fn child_count(&self) -> usize {
        self.shared.state.borrow().children.len()
    }

    /// True once the root sink has received `done`.
    pub fn is_done(&self) -> bool {
        self.shared.state.borrow().completed
    }

    pub fn is_canceled(&self) -> bool {
        self.shared.is_canceled()
    }
}

/// One weighted contributor to a [`CompositeProgress`].
pub struct SubProgress {
    shared: Rc<Shared>,
    index: usize,
}

impl SubProgress {
    fn child(&self) -> ChildState {
        self.shared.state.borrow().children[self.index].clone()
    }

    pub fn weight(&self) -> f64 {
        self.child().weight
    }

    pub fn current_worked(&self) -> f64 {
        self.child().worked
    }

    pub fn total_work(&self) -> f64 {
        self.child().total_work
    }

    pub fn is_done(&self) -> bool {
        self.child().done
    }
}

impl Progress for SubProgress {
    fn set_total_work(&mut self, total_work: f64) {
        self.shared.state.borrow_mut().children[self.index].total_work = total_work;
        self.shared.push_update();
    }

    fn set_title(&mut self, title: &str) {
        self.shared.push_title(title);
    }

    fn set_worked(&mut self, worked: f64, title: Option<&str>) {
        self.shared.state.borrow_mut().children[self.index].worked = worked;
        if let Some(title) = title {
            self.shared.push_title(title);
        }
        self.shared.push_update();
    }

    fn worked(&mut self, amount: f64) {
        let current = self.current_worked();
        self.set_worked(current + amount, None);
    }

    fn done(&mut self) {
        self.shared.child_done(self.index);
    }

    fn is_canceled(&self) -> bool {
        self.shared.is_canceled()
    }
}
