use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::animation::{GearTask, SlideTask};
use crate::canvas::Canvas;

/// Outcome of a single task step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Run the task again after the given number of milliseconds.
    Again(u64),
    Finished,
}

/// Unit of cooperative work driven by the [`Scheduler`].
#[derive(Debug, Clone)]
pub enum Task {
    Slide(SlideTask),
    Gear(GearTask),
}

impl Task {
    fn step(&mut self, canvas: &mut Canvas) -> Step {
        match self {
            Task::Slide(task) => task.step(canvas),
            Task::Gear(task) => task.step(canvas),
        }
    }
}

#[derive(Debug)]
struct Pending {
    due_ms: u64,
    seq: u64,
    task: Task,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.due_ms == other.due_ms && self.seq == other.seq
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    // Reversed so the max-heap pops the earliest deadline, then the oldest entry.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due_ms
            .cmp(&self.due_ms)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Single-threaded "run after N milliseconds" loop over a virtual clock.
///
/// Every step runs to completion against the canvas before the next one is
/// picked, so tasks never observe each other mid-update.
#[derive(Debug, Default)]
pub struct Scheduler {
    now_ms: u64,
    next_seq: u64,
    queue: BinaryHeap<Pending>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of tasks waiting for their next tick.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Queues `task` to run `delay_ms` from now. A deadline past the end of
    /// the clock can never fire, so the task is dropped instead.
    pub fn after(&mut self, delay_ms: u64, task: Task) {
        let Some(due_ms) = self.now_ms.checked_add(delay_ms) else {
            tracing::debug!(now_ms = self.now_ms, delay_ms, "dropping task past end of clock");
            return;
        };
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Pending { due_ms, seq, task });
    }

    /// Runs the first tick of `task` right away and queues the follow-up.
    pub fn start(&mut self, mut task: Task, canvas: &mut Canvas) {
        if let Step::Again(delay) = task.step(canvas) {
            self.after(delay, task);
        }
    }

    /// Moves the clock forward, running every tick that falls due on the way.
    /// Returns the number of ticks executed.
    pub fn advance(&mut self, elapsed_ms: u64, canvas: &mut Canvas) -> usize {
        let target = self.now_ms.saturating_add(elapsed_ms);
        let mut ran = 0;

        while self.queue.peek().is_some_and(|next| next.due_ms <= target) {
            let Some(mut pending) = self.queue.pop() else {
                break;
            };
            self.now_ms = pending.due_ms;
            ran += 1;
            if let Step::Again(delay) = pending.task.step(canvas) {
                self.after(delay, pending.task);
            }
        }

        self.now_ms = target;
        if ran > 0 {
            tracing::trace!(now_ms = self.now_ms, ran, "scheduler advanced");
        }
        ran
    }
}
