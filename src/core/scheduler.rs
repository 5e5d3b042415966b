//! Cooperative frame scheduler.
//!
//! Tasks park themselves with [`FrameScheduler::request`] and are resumed once
//! on the next frame with that frame's timestamp.  A task that returns
//! [`FrameStatus::Pending`] is parked again for the frame after; this is the
//! "request the next animation frame from inside the callback" pattern made
//! explicit.  Everything runs on the UI loop with no locking and no cancellation.

use std::time::Duration;

/// Outcome of resuming a task for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// Wants another frame.
    Pending,
    /// Finished; drop from the schedule.
    Done,
}

/// Keys of tasks waiting for the next frame.
#[derive(Debug, Clone)]
pub struct FrameScheduler<K> {
    waiting: Vec<K>,
}

impl<K> Default for FrameScheduler<K> {
    fn default() -> Self {
        Self { waiting: Vec::new() }
    }
}

impl<K: Copy + PartialEq> FrameScheduler<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Park `key` until the next frame.  Requesting an already-parked key is
    /// a no-op, so a task is resumed at most once per frame.
    pub fn request(&mut self, key: K) {
        if !self.waiting.contains(&key) {
            self.waiting.push(key);
        }
    }

    /// Resume every parked task with `now`, in request order.
    pub fn run_frame<F>(&mut self, now: Duration, mut resume: F)
    where
        F: FnMut(K, Duration) -> FrameStatus,
    {
        let batch = std::mem::take(&mut self.waiting);
        for key in batch {
            if resume(key, now) == FrameStatus::Pending {
                self.request(key);
            }
        }
    }

    /// `true` while any task is waiting; the UI should keep frames coming.
    pub fn is_busy(&self) -> bool {
        !self.waiting.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_tasks_are_resumed_next_frame() {
        let mut sched = FrameScheduler::new();
        sched.request(1usize);
        let mut resumed = Vec::new();

        for frame in 0..3u64 {
            sched.run_frame(Duration::from_millis(frame * 16), |k, now| {
                resumed.push((k, now));
                if frame < 2 { FrameStatus::Pending } else { FrameStatus::Done }
            });
        }

        assert_eq!(resumed.len(), 3);
        assert_eq!(resumed[2].1, Duration::from_millis(32));
        assert!(!sched.is_busy());
    }

    #[test]
    fn duplicate_requests_collapse() {
        let mut sched = FrameScheduler::new();
        sched.request('a');
        sched.request('a');
        sched.request('b');

        let mut count = 0;
        sched.run_frame(Duration::ZERO, |_, _| {
            count += 1;
            FrameStatus::Done
        });
        assert_eq!(count, 2);
    }

    #[test]
    fn tasks_finish_independently() {
        let mut sched = FrameScheduler::new();
        sched.request(0u8);
        sched.request(1u8);
        sched.run_frame(Duration::ZERO, |k, _| {
            if k == 0 { FrameStatus::Done } else { FrameStatus::Pending }
        });
        let mut next = Vec::new();
        sched.run_frame(Duration::from_millis(16), |k, _| {
            next.push(k);
            FrameStatus::Done
        });
        assert_eq!(next, vec![1]);
    }
}
