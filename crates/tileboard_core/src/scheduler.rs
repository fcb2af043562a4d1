//! # Frame Scheduler
//!
//! A logical clock synchronized to the host's refresh cadence, plus a
//! delayed-task queue built on it.
//!
//! ```text
//! tick(now):
//!   1. clock = max(clock, now)
//!   2. take every task with deadline <= clock OUT of the queue
//!   3. fire them in (deadline, insertion) order, isolating failures
//!   4. render pass at the clock, exactly once
//! ```
//!
//! Tasks enqueued while firing land in the queue for a later tick, even
//! when their deadline is already due. A task can never fire twice.
//!
//! A task that panics counts as failed like one returning `Err`. This
//! needs unwinding: under `panic = "abort"` the process aborts instead.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;

use crate::error::{TaskError, TaskResult};

type TaskFn<C> = Box<dyn FnOnce(&mut C, &mut FrameScheduler<C>) -> TaskResult>;

/// A one-shot callback plus an absolute deadline on the scheduler clock.
struct DelayedTask<C> {
    deadline: Duration,
    seq: u64,
    callback: TaskFn<C>,
}

// Reversed so the max-heap pops the earliest (deadline, seq) first.
impl<C> Ord for DelayedTask<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .deadline
            .cmp(&self.deadline)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<C> PartialOrd for DelayedTask<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C> PartialEq for DelayedTask<C> {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.seq == other.seq
    }
}

impl<C> Eq for DelayedTask<C> {}

/// Outcome of one frame tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Frame number of this tick (first tick is 1).
    pub frame: u64,
    /// Tasks fired this tick, including failed ones.
    pub fired: u32,
    /// Tasks that returned an error or panicked this tick.
    pub failed: u32,
}

/// Lifetime counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulerStats {
    /// Tasks ever enqueued.
    pub scheduled: u64,
    /// Tasks ever fired.
    pub fired: u64,
    /// Tasks that returned an error.
    pub failed: u64,
    /// Host timestamps rejected because they went backwards.
    pub clock_regressions: u64,
}

/// Frame-driven logical clock with a delayed-task queue.
///
/// `C` is the state tasks mutate when they fire. Tasks also receive the
/// scheduler itself so they can enqueue follow-up work.
pub struct FrameScheduler<C> {
    /// Current logical time.
    now: Duration,
    /// Number of ticks so far.
    frame: u64,
    /// Insertion counter, breaks deadline ties.
    next_seq: u64,
    /// Pending tasks, earliest first.
    pending: BinaryHeap<DelayedTask<C>>,
    /// Lifetime counters.
    stats: SchedulerStats,
}

impl<C> FrameScheduler<C> {
    /// Creates a scheduler with its clock at zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            frame: 0,
            next_seq: 0,
            pending: BinaryHeap::with_capacity(64),
            stats: SchedulerStats::default(),
        }
    }

    /// Returns the current logical time.
    #[inline]
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Returns the number of ticks run so far.
    #[inline]
    #[must_use]
    pub const fn frame(&self) -> u64 {
        self.frame
    }

    /// Returns the number of tasks waiting to fire.
    #[inline]
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Returns the earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.peek().map(|task| task.deadline)
    }

    /// Returns lifetime counters.
    #[must_use]
    pub const fn stats(&self) -> SchedulerStats {
        self.stats
    }

    /// Enqueues `task` to fire once the clock reaches `now + delay`.
    ///
    /// Completion is observed only through the callback.
    pub fn delay<F>(&mut self, delay: Duration, task: F)
    where
        F: FnOnce(&mut C, &mut Self) -> TaskResult + 'static,
    {
        let deadline = self.now.saturating_add(delay);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.stats.scheduled += 1;

        tracing::trace!(seq, deadline_ms = deadline.as_millis() as u64, "task scheduled");

        self.pending.push(DelayedTask {
            deadline,
            seq,
            callback: Box::new(task),
        });
    }

    /// Moves the clock to the host timestamp.
    ///
    /// The clock is monotonic: an earlier timestamp is ignored.
    pub fn advance(&mut self, now: Duration) {
        if now < self.now {
            self.stats.clock_regressions += 1;
            tracing::debug!(
                now_ms = now.as_millis() as u64,
                clock_ms = self.now.as_millis() as u64,
                "host timestamp went backwards; clock held"
            );
            return;
        }
        self.now = now;
    }

    /// Takes every due task out of the queue, earliest first.
    fn take_due(&mut self) -> Vec<DelayedTask<C>> {
        let mut due = Vec::new();
        while self
            .pending
            .peek()
            .is_some_and(|task| task.deadline <= self.now)
        {
            if let Some(task) = self.pending.pop() {
                due.push(task);
            }
        }
        due
    }

    /// Fires every task that is due at the current clock.
    ///
    /// A failing or panicking task is logged and counted; the remaining
    /// tasks still fire.
    pub fn run_due(&mut self, ctx: &mut C) -> TickReport {
        let mut report = TickReport {
            frame: self.frame,
            ..TickReport::default()
        };

        for task in self.take_due() {
            let DelayedTask {
                deadline,
                seq,
                callback,
            } = task;

            report.fired += 1;
            self.stats.fired += 1;

            let outcome = panic::catch_unwind(AssertUnwindSafe(|| callback(ctx, self)))
                .unwrap_or_else(|payload| Err(TaskError::panicked(&*payload)));

            if let Err(error) = outcome {
                report.failed += 1;
                self.stats.failed += 1;
                tracing::warn!(
                    seq,
                    deadline_ms = deadline.as_millis() as u64,
                    %error,
                    "delayed task failed"
                );
            }
        }

        report
    }

    /// Runs one frame: advance the clock, fire due tasks, then render once.
    ///
    /// `render` receives the logical clock, never the raw host timestamp.
    pub fn tick<R>(&mut self, now: Duration, ctx: &mut C, render: R) -> TickReport
    where
        R: FnOnce(&mut C, Duration),
    {
        self.frame += 1;
        self.advance(now);
        let report = self.run_due(ctx);
        render(ctx, self.now);

        if report.fired > 0 {
            tracing::trace!(
                frame = report.frame,
                fired = report.fired,
                failed = report.failed,
                pending = self.pending.len(),
                "frame tick"
            );
        }
        report
    }
}

impl<C> Default for FrameScheduler<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for FrameScheduler<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameScheduler")
            .field("now", &self.now)
            .field("frame", &self.frame)
            .field("pending", &self.pending.len())
            .field("stats", &self.stats)
            .finish()
    }
}
