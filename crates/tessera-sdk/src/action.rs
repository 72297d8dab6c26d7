// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Timed engine actions.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Duration;
use thiserror::Error;

/// Something the engine does at a given point of its clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Stops the engine for good.
    Quit,
    /// Suspends per-frame updates.
    Pause,
    /// Leaves the paused state.
    Resume,
    /// Flips between paused and running.
    PauseToggle,
    /// An application-defined action, handed to the engine's action handler.
    Custom(u32),
}

/// Errors raised by the [`ActionQueue`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// The queue already holds as many actions as it may.
    #[error("Action queue is full ({capacity} pending actions)")]
    QueueFull {
        /// Capacity of the queue that rejected the action.
        capacity: usize,
    },
}

#[derive(Debug)]
struct Scheduled {
    at: Duration,
    seq: u64,
    action: Action,
}

impl PartialEq for Scheduled {
    fn eq(&self, other: &Self) -> bool {
        self.at == other.at && self.seq == other.seq
    }
}

impl Eq for Scheduled {}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scheduled {
    // Reversed so the max-heap pops the earliest action, and the first
    // queued one among equal timestamps.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .at
            .cmp(&self.at)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// A bounded queue of actions ordered by timestamp.
///
/// Actions sharing a timestamp come out in the order they were pushed.
#[derive(Debug)]
pub struct ActionQueue {
    heap: BinaryHeap<Scheduled>,
    capacity: usize,
    next_seq: u64,
}

impl ActionQueue {
    /// Creates an empty queue holding at most `capacity` actions.
    pub fn new(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            capacity,
            next_seq: 0,
        }
    }

    /// Schedules `action` at time `at`.
    pub fn push(&mut self, action: Action, at: Duration) -> Result<(), ActionError> {
        if self.heap.len() >= self.capacity {
            return Err(ActionError::QueueFull {
                capacity: self.capacity,
            });
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Scheduled { at, seq, action });
        Ok(())
    }

    /// Removes and returns the earliest action due at or before `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<Action> {
        if self.heap.peek()?.at > now {
            return None;
        }
        self.heap.pop().map(|scheduled| scheduled.action)
    }

    /// Number of pending actions.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Maximum number of pending actions.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_pops_in_timestamp_order() {
        let mut queue = ActionQueue::new(8);
        queue.push(Action::Custom(3), ms(30)).unwrap();
        queue.push(Action::Custom(1), ms(10)).unwrap();
        queue.push(Action::Custom(2), ms(20)).unwrap();

        assert_eq!(queue.pop_due(ms(100)), Some(Action::Custom(1)));
        assert_eq!(queue.pop_due(ms(100)), Some(Action::Custom(2)));
        assert_eq!(queue.pop_due(ms(100)), Some(Action::Custom(3)));
        assert_eq!(queue.pop_due(ms(100)), None);
    }

    #[test]
    fn test_equal_timestamps_are_fifo() {
        let mut queue = ActionQueue::new(8);
        for id in 0..5 {
            queue.push(Action::Custom(id), ms(5)).unwrap();
        }
        let order: Vec<_> = std::iter::from_fn(|| queue.pop_due(ms(5))).collect();
        assert_eq!(order, (0..5).map(Action::Custom).collect::<Vec<_>>());
    }

    #[test]
    fn test_future_actions_stay_queued() {
        let mut queue = ActionQueue::new(2);
        queue.push(Action::Quit, ms(50)).unwrap();
        assert_eq!(queue.pop_due(ms(49)), None);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.pop_due(ms(50)), Some(Action::Quit));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_overflow_is_rejected() {
        let mut queue = ActionQueue::new(1);
        queue.push(Action::Pause, ms(0)).unwrap();
        assert_eq!(
            queue.push(Action::Resume, ms(0)),
            Err(ActionError::QueueFull { capacity: 1 })
        );
        assert_eq!(queue.pop_due(ms(0)), Some(Action::Pause));
        assert!(queue.push(Action::Resume, ms(0)).is_ok());
    }
}
