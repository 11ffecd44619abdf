use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Duration;

use super::task::TaskId;

// Field order matters: the derived ordering compares deadline, then seq.
// `seq` is unique, so two entries never fall through to comparing tasks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct TimerEntry {
    deadline: Duration,
    seq: u64,
    task: TaskId,
}

/// Min-heap of sleeping tasks keyed by `(deadline, sequence)`.
#[derive(Debug, Default)]
pub(crate) struct TimerHeap {
    heap: BinaryHeap<Reverse<TimerEntry>>,
    next_seq: u64,
}

impl TimerHeap {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, deadline: Duration, task: TaskId) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(TimerEntry {
            deadline,
            seq,
            task,
        }));
    }

    pub(crate) fn peek_deadline(&self) -> Option<Duration> {
        self.heap.peek().map(|Reverse(e)| e.deadline)
    }

    pub(crate) fn pop(&mut self) -> Option<(Duration, TaskId)> {
        self.heap.pop().map(|Reverse(e)| (e.deadline, e.task))
    }

    /// Pop the earliest entry if it is due at `now`.
    pub(crate) fn pop_due(&mut self, now: Duration) -> Option<TaskId> {
        if self.peek_deadline()? > now {
            return None;
        }
        self.pop().map(|(_, task)| task)
    }

    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }

    pub(crate) fn clear(&mut self) {
        self.heap.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scheduler/timer.rs"]
mod tests;
