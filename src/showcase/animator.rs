//! One-shot staggered entrance animation for the showcase columns.
//!
//! Columns slide up one after another once the showcase becomes visible,
//! then slide back down with the same stagger. The sequence runs at most
//! once per animator instance.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::debug;

use super::mount::{StyleTarget, ANIMATE_DOWN_CLASS, ANIMATE_UP_CLASS};
use super::scheduler::{Scheduler, TaskId};
use crate::config::AnimationTiming;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationPhase {
    Idle,
    Animating,
}

pub struct ColumnAnimator {
    columns: Rc<[Rc<dyn StyleTarget>]>,
    timing: AnimationTiming,
    scheduler: Rc<dyn Scheduler>,
    phase: Cell<AnimationPhase>,
    pending: Rc<RefCell<Vec<TaskId>>>,
}

impl ColumnAnimator {
    /// Returns `None` when there is nothing to observe: no showcase or no columns.
    pub fn attach(
        showcase_present: bool,
        columns: Vec<Rc<dyn StyleTarget>>,
        timing: AnimationTiming,
        scheduler: Rc<dyn Scheduler>,
    ) -> Option<Self> {
        if !showcase_present || columns.is_empty() {
            debug!(
                showcase_present,
                columns = columns.len(),
                "Column animation not attached"
            );
            return None;
        }
        Some(Self {
            columns: columns.into(),
            timing,
            scheduler,
            phase: Cell::new(AnimationPhase::Idle),
            pending: Rc::new(RefCell::new(Vec::new())),
        })
    }

    #[cfg(test)]
    pub fn phase(&self) -> AnimationPhase {
        self.phase.get()
    }

    /// Feeds the visible fraction of the showcase. Returns true if this call
    /// started the animation.
    pub fn on_visibility(&self, ratio: f64) -> bool {
        if self.phase.get() != AnimationPhase::Idle {
            return false;
        }
        if ratio.is_nan() || ratio < self.timing.visibility_threshold {
            return false;
        }
        self.phase.set(AnimationPhase::Animating);
        debug!(ratio, columns = self.columns.len(), "Starting column animation");

        for (index, column) in self.columns.iter().enumerate() {
            let column = Rc::clone(column);
            let id = self.scheduler.schedule(
                self.timing.column_delay(index),
                Box::new(move || column.add_class(ANIMATE_UP_CLASS)),
            );
            self.pending.borrow_mut().push(id);
        }

        let columns = Rc::clone(&self.columns);
        let scheduler = Rc::clone(&self.scheduler);
        let pending = Rc::clone(&self.pending);
        let timing = self.timing;
        let id = self.scheduler.schedule(
            timing.settle_delay(self.columns.len()),
            Box::new(move || {
                debug!("Column animation settling");
                for (index, column) in columns.iter().enumerate() {
                    column.remove_class(ANIMATE_UP_CLASS);
                    let column = Rc::clone(column);
                    let id = scheduler.schedule(
                        timing.column_delay(index),
                        Box::new(move || column.add_class(ANIMATE_DOWN_CLASS)),
                    );
                    pending.borrow_mut().push(id);
                }
            }),
        );
        self.pending.borrow_mut().push(id);
        true
    }

    /// Cancels every visual change that has not happened yet.
    pub fn cancel(&self) -> usize {
        let ids: Vec<TaskId> = self.pending.borrow_mut().drain(..).collect();
        ids.into_iter()
            .filter(|id| self.scheduler.cancel(*id))
            .count()
    }
}

impl Drop for ColumnAnimator {
    fn drop(&mut self) {
        let cancelled = self.cancel();
        if cancelled > 0 {
            debug!(cancelled, "Cancelled pending column animation steps");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::showcase::mount::fakes::FakeElement;
    use crate::showcase::scheduler::ManualScheduler;
    use std::time::Duration;

    fn setup(count: usize) -> (Rc<ManualScheduler>, Vec<FakeElement>, Option<ColumnAnimator>) {
        let scheduler = Rc::new(ManualScheduler::new());
        let elements: Vec<FakeElement> = (0..count).map(|_| FakeElement::default()).collect();
        let columns: Vec<Rc<dyn StyleTarget>> = elements
            .iter()
            .map(|e| Rc::new(e.clone()) as Rc<dyn StyleTarget>)
            .collect();
        let animator = ColumnAnimator::attach(
            true,
            columns,
            AnimationTiming::default(),
            scheduler.clone(),
        );
        (scheduler, elements, animator)
    }

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_no_observer_without_showcase_or_columns() {
        let scheduler: Rc<dyn Scheduler> = Rc::new(ManualScheduler::new());
        let timing = AnimationTiming::default();
        assert!(ColumnAnimator::attach(true, Vec::new(), timing, scheduler.clone()).is_none());

        let column: Rc<dyn StyleTarget> = Rc::new(FakeElement::default());
        assert!(ColumnAnimator::attach(false, vec![column], timing, scheduler).is_none());
    }

    #[test]
    fn test_below_threshold_does_not_trigger() {
        let (scheduler, _, animator) = setup(4);
        let animator = animator.unwrap();
        assert!(!animator.on_visibility(0.19));
        assert!(!animator.on_visibility(f64::NAN));
        assert_eq!(animator.phase(), AnimationPhase::Idle);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_triggers_exactly_once() {
        let (scheduler, elements, animator) = setup(4);
        let animator = animator.unwrap();

        assert!(animator.on_visibility(0.2));
        assert!(!animator.on_visibility(0.9));
        assert_eq!(animator.phase(), AnimationPhase::Animating);
        // 4 up steps + 1 settle step
        assert_eq!(scheduler.pending(), 5);

        scheduler.advance(ms(10_000));
        for element in &elements {
            assert_eq!(
                element.history(),
                vec!["+animate-up", "-animate-up", "+animate-down"]
            );
        }
        assert!(!animator.on_visibility(1.0));
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_stagger_and_settle_timing() {
        let (scheduler, elements, animator) = setup(4);
        let animator = animator.unwrap();
        animator.on_visibility(0.5);

        scheduler.advance(ms(0));
        assert!(elements[0].has_class(ANIMATE_UP_CLASS));
        assert!(!elements[1].has_class(ANIMATE_UP_CLASS));

        scheduler.advance(ms(250));
        assert!(elements[1].has_class(ANIMATE_UP_CLASS));
        assert!(!elements[2].has_class(ANIMATE_UP_CLASS));

        scheduler.advance(ms(500));
        assert!(elements.iter().all(|e| e.has_class(ANIMATE_UP_CLASS)));

        // Settle fires at 3*250 + 1200 + 100 = 2050ms.
        scheduler.advance(ms(2049 - 750));
        assert!(elements.iter().all(|e| e.has_class(ANIMATE_UP_CLASS)));
        scheduler.advance(ms(1));
        assert!(elements.iter().all(|e| !e.has_class(ANIMATE_UP_CLASS)));
        assert!(elements[0].has_class(ANIMATE_DOWN_CLASS));
        assert!(!elements[1].has_class(ANIMATE_DOWN_CLASS));

        scheduler.advance(ms(750));
        assert!(elements.iter().all(|e| e.has_class(ANIMATE_DOWN_CLASS)));
    }

    #[test]
    fn test_cancel_revokes_pending_steps() {
        let (scheduler, elements, animator) = setup(4);
        let animator = animator.unwrap();
        animator.on_visibility(1.0);

        scheduler.advance(ms(300));
        assert!(elements[1].has_class(ANIMATE_UP_CLASS));

        // columns 2 and 3 plus the settle step
        assert_eq!(animator.cancel(), 3);
        scheduler.advance(ms(10_000));
        assert!(!elements[2].has_class(ANIMATE_UP_CLASS));
        assert!(elements.iter().all(|e| !e.has_class(ANIMATE_DOWN_CLASS)));
    }

    #[test]
    fn test_drop_cancels_down_pass() {
        let (scheduler, elements, animator) = setup(2);
        let animator = animator.unwrap();
        animator.on_visibility(1.0);

        // Settle at 250 + 1200 + 100 = 1550ms, second down step at 1800ms.
        scheduler.advance(ms(1600));
        assert!(elements[0].has_class(ANIMATE_DOWN_CLASS));
        drop(animator);
        scheduler.advance(ms(1000));
        assert!(!elements[1].has_class(ANIMATE_DOWN_CLASS));
        assert_eq!(scheduler.pending(), 0);
    }
}
