//! Delayed actions
//!
//! Effects that land some time after their cause (a platform vanishing after
//! being stood on, the perfect-landing flash expiring) are queued here with a
//! due tick and fired from inside the tick loop. No wall clock involved.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Something to do at a later tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ScheduledAction {
    /// Make a disappearing platform invisible
    HidePlatform { id: u32 },
    /// Clear the perfect-landing flash if `token` is still the current one
    EndComboFlash { token: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Entry {
    due: u64,
    /// Insertion order breaks ties so equal-due actions fire FIFO
    seq: u64,
    action: ScheduledAction,
}

/// Min-queue of actions keyed by due tick
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    heap: BinaryHeap<Reverse<Entry>>,
    next_seq: u64,
}

impl Schedule {
    pub fn push(&mut self, due: u64, action: ScheduledAction) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Entry { due, seq, action }));
    }

    /// Remove and return every action due at or before `now`, in order
    pub fn take_due(&mut self, now: u64) -> Vec<ScheduledAction> {
        let mut due = Vec::new();
        while let Some(Reverse(entry)) = self.heap.peek() {
            if entry.due > now {
                break;
            }
            if let Some(Reverse(entry)) = self.heap.pop() {
                due.push(entry.action);
            }
        }
        due
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
