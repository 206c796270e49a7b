//! "Run after layout" scheduling.

use std::cell::RefCell;

pub type Task = Box<dyn FnOnce()>;

/// Runs work once the current layout pass has settled.
///
/// Tasks run in the order they were scheduled and cannot be cancelled.
pub trait LayoutScheduler {
    fn after_layout(&self, task: Task);
}

/// Holds tasks until [`QueuedScheduler::run_pending`] is called.
///
/// Lets a synchronous driver (or a test) decide when layout has settled.
#[derive(Default)]
pub struct QueuedScheduler {
    tasks: RefCell<Vec<Task>>,
}

impl QueuedScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }

    /// Run every queued task, including tasks scheduled while running.
    /// Returns how many ran.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        loop {
            let batch = std::mem::take(&mut *self.tasks.borrow_mut());
            if batch.is_empty() {
                return ran;
            }
            for task in batch {
                task();
                ran += 1;
            }
        }
    }
}

impl LayoutScheduler for QueuedScheduler {
    fn after_layout(&self, task: Task) {
        self.tasks.borrow_mut().push(task);
    }
}
