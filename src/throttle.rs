use std::{cell::Cell, rc::Rc, time::Duration};

use crate::scheduler::Scheduler;

pub const SCROLL_THROTTLE: Duration = Duration::from_millis(16);
pub const RESIZE_THROTTLE: Duration = Duration::from_millis(100);

/// Leading-edge rate limiter: the first call in a window runs, every other
/// call in that window is dropped. Nothing is replayed when the window ends.
pub struct Throttled<A> {
    callback: Rc<dyn Fn(A)>,
    scheduler: Rc<dyn Scheduler>,
    interval: Duration,
    in_throttle: Rc<Cell<bool>>,
}

impl<A> Clone for Throttled<A> {
    fn clone(&self) -> Self {
        Self {
            callback: self.callback.clone(),
            scheduler: self.scheduler.clone(),
            interval: self.interval,
            in_throttle: self.in_throttle.clone(),
        }
    }
}

pub fn throttle<A, F>(scheduler: Rc<dyn Scheduler>, interval: Duration, callback: F) -> Throttled<A>
where
    F: Fn(A) + 'static,
{
    Throttled {
        callback: Rc::new(callback),
        scheduler,
        interval,
        in_throttle: Rc::new(Cell::new(false)),
    }
}

impl<A> Throttled<A> {
    /// Returns whether the call was accepted.
    pub fn call(&self, args: A) -> bool {
        if self.in_throttle.get() {
            return false;
        }

        self.in_throttle.set(true);
        let latch = self.in_throttle.clone();
        self.scheduler
            .set_timeout(self.interval, Box::new(move || latch.set(false)));
        (self.callback)(args);
        true
    }
}

/// Collapses a burst of requests into one callback on the next animation
/// frame. The latch is cleared inside the frame, before the work runs.
#[derive(Clone)]
pub struct FrameGate {
    scheduler: Rc<dyn Scheduler>,
    pending: Rc<Cell<bool>>,
}

impl FrameGate {
    pub fn new(scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            scheduler,
            pending: Rc::new(Cell::new(false)),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }

    pub fn request(&self, work: Rc<dyn Fn()>) -> bool {
        if self.pending.get() {
            return false;
        }

        self.pending.set(true);
        let pending = self.pending.clone();
        self.scheduler.request_frame(Box::new(move || {
            pending.set(false);
            work();
        }));
        true
    }
}
