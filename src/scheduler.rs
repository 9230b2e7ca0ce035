use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    time::Duration,
};

pub type Task = Box<dyn FnOnce()>;

/// Deferred work on the page's single thread. Neither call blocks; the task
/// runs later as its own turn of the event loop.
pub trait Scheduler {
    fn set_timeout(&self, delay: Duration, task: Task);
    fn request_frame(&self, task: Task);
}

struct TimedTask {
    due: Duration,
    seq: u64,
    task: Task,
}

/// Virtual-clock scheduler. Time only moves through [`ManualScheduler::advance`]
/// and frames only render through [`ManualScheduler::run_frame`].
#[derive(Default)]
pub struct ManualScheduler {
    now: Cell<Duration>,
    next_seq: Cell<u64>,
    timers: RefCell<Vec<TimedTask>>,
    frames: RefCell<VecDeque<Task>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elapsed(&self) -> Duration {
        self.now.get()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.borrow().len()
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.borrow().len()
    }

    /// Moves the clock forward, running every timer that falls due in
    /// deadline order. Timers scheduled by those tasks run too if they land
    /// inside the window.
    pub fn advance(&self, by: Duration) {
        let target = self.now.get() + by;

        while let Some(timer) = self.pop_due(target) {
            self.now.set(timer.due.max(self.now.get()));
            (timer.task)();
        }

        self.now.set(target);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }

    /// Runs the callbacks queued before this frame; callbacks they request
    /// wait for the next one.
    pub fn run_frame(&self) -> usize {
        let batch: Vec<Task> = self.frames.borrow_mut().drain(..).collect();
        let count = batch.len();
        for task in batch {
            task();
        }
        count
    }

    fn pop_due(&self, target: Duration) -> Option<TimedTask> {
        let mut timers = self.timers.borrow_mut();
        let index = timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.due <= target)
            .min_by_key(|(_, timer)| (timer.due, timer.seq))
            .map(|(index, _)| index)?;
        Some(timers.swap_remove(index))
    }
}

impl Scheduler for ManualScheduler {
    fn set_timeout(&self, delay: Duration, task: Task) {
        let seq = self.next_seq.get();
        self.next_seq.set(seq + 1);
        self.timers.borrow_mut().push(TimedTask {
            due: self.now.get() + delay,
            seq,
            task,
        });
    }

    fn request_frame(&self, task: Task) {
        self.frames.borrow_mut().push_back(task);
    }
}
