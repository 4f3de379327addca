use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use super::TickToken;

/// Defers a tick until `delay` has elapsed, on the thread that owns the surface.
pub trait Scheduler {
    fn schedule(&mut self, delay: Duration, token: TickToken);
}

struct Entry {
    deadline: Instant,
    seq: u64,
    token: TickToken,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.seq == other.seq
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.deadline
            .cmp(&other.deadline)
            .then(self.seq.cmp(&other.seq))
    }
}

/// Deadline-ordered tick queue drained by the event loop.
///
/// Equal deadlines fire in scheduling order.
#[derive(Default)]
pub struct TickQueue {
    heap: BinaryHeap<Reverse<Entry>>,
    next_seq: u64,
}

impl TickQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule_at(&mut self, deadline: Instant, token: TickToken) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Entry {
            deadline,
            seq,
            token,
        }));
    }

    /// Earliest pending deadline, for `ControlFlow::WaitUntil`.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.heap.peek().map(|Reverse(e)| e.deadline)
    }

    /// Pop the earliest tick if its deadline has passed.
    pub fn pop_due(&mut self, now: Instant) -> Option<TickToken> {
        if self.next_deadline()? <= now {
            self.pop_next()
        } else {
            None
        }
    }

    /// Pop the earliest tick regardless of its deadline.
    pub fn pop_next(&mut self) -> Option<TickToken> {
        self.heap.pop().map(|Reverse(e)| e.token)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Ticks whose driver is still playing.
    #[cfg(test)]
    pub fn live_count(&self) -> usize {
        self.heap.iter().filter(|Reverse(e)| e.token.is_live()).count()
    }
}

impl Scheduler for TickQueue {
    fn schedule(&mut self, delay: Duration, token: TickToken) {
        self.schedule_at(Instant::now() + delay, token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::PlaybackHandle;

    #[test]
    fn pops_in_deadline_order() {
        let a = PlaybackHandle::new();
        let b = PlaybackHandle::new();
        let now = Instant::now();
        let mut queue = TickQueue::new();
        queue.schedule_at(now + Duration::from_millis(30), a.token());
        queue.schedule_at(now + Duration::from_millis(10), b.token());

        assert_eq!(queue.next_deadline(), Some(now + Duration::from_millis(10)));
        assert!(queue.pop_next().unwrap().belongs_to(&b));
        assert!(queue.pop_next().unwrap().belongs_to(&a));
        assert!(queue.pop_next().is_none());
    }

    #[test]
    fn equal_deadlines_keep_scheduling_order() {
        let a = PlaybackHandle::new();
        let b = PlaybackHandle::new();
        let now = Instant::now();
        let mut queue = TickQueue::new();
        queue.schedule_at(now, a.token());
        queue.schedule_at(now, b.token());
        assert!(queue.pop_next().unwrap().belongs_to(&a));
        assert!(queue.pop_next().unwrap().belongs_to(&b));
    }

    #[test]
    fn pop_due_waits_for_deadline() {
        let handle = PlaybackHandle::new();
        let now = Instant::now();
        let mut queue = TickQueue::new();
        queue.schedule_at(now + Duration::from_millis(33), handle.token());

        assert!(queue.pop_due(now).is_none());
        assert_eq!(queue.len(), 1);
        assert!(queue.pop_due(now + Duration::from_millis(33)).is_some());
        assert!(queue.is_empty());
    }

    #[test]
    fn live_count_ignores_cancelled_ticks() {
        let a = PlaybackHandle::new();
        let b = PlaybackHandle::new();
        let mut queue = TickQueue::new();
        queue.schedule(Duration::ZERO, a.token());
        queue.schedule(Duration::ZERO, b.token());
        a.cancel();
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.live_count(), 1);
    }
}
