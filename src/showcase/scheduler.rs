//! Cancellable delayed tasks on the UI thread.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

pub type Task = Box<dyn FnOnce()>;

pub trait Scheduler {
    /// Runs `task` once after `delay`, unless cancelled first.
    fn schedule(&self, delay: Duration, task: Task) -> TaskId;
    /// Returns true if the task was still pending.
    fn cancel(&self, id: TaskId) -> bool;
}

/// Scheduler backed by glib main-loop timeouts.
#[derive(Default)]
pub struct GlibScheduler {
    next_id: Cell<u64>,
    sources: Rc<RefCell<HashMap<TaskId, glib::SourceId>>>,
}

impl GlibScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for GlibScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TaskId {
        let id = TaskId(self.next_id.get());
        self.next_id.set(id.0 + 1);

        let sources = Rc::clone(&self.sources);
        let source = glib::timeout_add_local_once(delay, move || {
            // The source is gone once this fires; forget it before running the task.
            sources.borrow_mut().remove(&id);
            task();
        });
        self.sources.borrow_mut().insert(id, source);
        trace!(?id, ?delay, "Scheduled task");
        id
    }

    fn cancel(&self, id: TaskId) -> bool {
        let source = self.sources.borrow_mut().remove(&id);
        match source {
            Some(source) => {
                source.remove();
                true
            }
            None => false,
        }
    }
}

/// Deterministic scheduler driven by an explicit virtual clock.
#[cfg(test)]
#[derive(Default)]
pub struct ManualScheduler {
    now: Cell<Duration>,
    next_id: Cell<u64>,
    queue: RefCell<Vec<(Duration, TaskId, Task)>>,
}

#[cfg(test)]
impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now.get()
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Moves the clock forward, running every task that falls due in order.
    pub fn advance(&self, by: Duration) {
        let target = self.now.get() + by;
        loop {
            let next = {
                let mut queue = self.queue.borrow_mut();
                let due = queue
                    .iter()
                    .enumerate()
                    .filter(|(_, (at, _, _))| *at <= target)
                    .min_by_key(|(_, (at, id, _))| (*at, *id))
                    .map(|(index, _)| index);
                due.map(|index| queue.remove(index))
            };
            match next {
                Some((at, _, task)) => {
                    self.now.set(at);
                    task();
                }
                None => break,
            }
        }
        self.now.set(target);
    }
}

#[cfg(test)]
impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TaskId {
        let id = TaskId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.queue
            .borrow_mut()
            .push((self.now.get() + delay, id, task));
        id
    }

    fn cancel(&self, id: TaskId) -> bool {
        let mut queue = self.queue.borrow_mut();
        let before = queue.len();
        queue.retain(|(_, queued, _)| *queued != id);
        queue.len() != before
    }
}
