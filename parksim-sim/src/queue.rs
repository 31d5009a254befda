//! FIFO queues of cars waiting to enter or just leaving the lot.

use std::collections::VecDeque;

use parksim_core::Spot;

/// First-in, first-out queue of spot records, ordered by event time.
#[derive(Debug, Clone, Default)]
pub struct SpotQueue {
    entries: VecDeque<Spot>,
}

impl SpotQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `spot` at the back.
    pub fn enqueue(&mut self, spot: Spot) {
        self.entries.push_back(spot);
    }

    /// Removes and returns the front entry.
    pub fn dequeue(&mut self) -> Option<Spot> {
        self.entries.pop_front()
    }

    /// Returns the front entry without removing it.
    pub fn peek(&self) -> Option<&Spot> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use parksim_core::{Car, CarType};

    use super::*;

    fn spot(id: u64) -> Spot {
        Spot::new(Car::new(id, CarType::Small), id)
    }

    #[test]
    fn test_fifo_order_and_length() {
        let mut queue = SpotQueue::new();
        queue.enqueue(spot(1));
        queue.enqueue(spot(2));
        queue.enqueue(spot(3));

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.peek().map(|s| s.car().id()), Some(1));
        assert_eq!(queue.len(), 3);

        assert_eq!(queue.dequeue().map(|s| s.car().id()), Some(1));
        assert_eq!(queue.dequeue().map(|s| s.car().id()), Some(2));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_empty_queue() {
        let mut queue = SpotQueue::new();
        assert!(queue.is_empty());
        assert!(queue.peek().is_none());
        assert!(queue.dequeue().is_none());
    }
}
