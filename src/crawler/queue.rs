//! Shared work queue of article identifiers

use std::collections::VecDeque;
use std::sync::Mutex;

/// FIFO queue of identifiers shared by all workers
///
/// Seeded once with the full ascending range before any worker starts.
/// Dequeue is exclusive: each identifier is handed to exactly one worker.
/// The lock is a std Mutex because it is never held across an await.
#[derive(Debug)]
pub struct WorkQueue {
    items: Mutex<VecDeque<i64>>,
}

impl WorkQueue {
    /// Seeds the queue with every identifier from start to end, inclusive,
    /// in ascending order
    pub fn seed(start_id: i64, end_id: i64) -> Self {
        Self {
            items: Mutex::new((start_id..=end_id).collect()),
        }
    }

    /// Removes and returns the next identifier, or `None` once drained
    pub fn dequeue(&self) -> Option<i64> {
        match self.items.lock() {
            Ok(mut items) => items.pop_front(),
            // A poisoned lock means a worker panicked mid-pop; treat the
            // queue as drained so the remaining workers wind down.
            Err(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        self.items.lock().map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn test_seed_ascending() {
        let queue = WorkQueue::seed(5, 8);
        assert_eq!(queue.len(), 4);

        assert_eq!(queue.dequeue(), Some(5));
        assert_eq!(queue.dequeue(), Some(6));
        assert_eq!(queue.dequeue(), Some(7));
        assert_eq!(queue.dequeue(), Some(8));
        assert_eq!(queue.dequeue(), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_single_id_range() {
        let queue = WorkQueue::seed(42, 42);
        assert_eq!(queue.dequeue(), Some(42));
        assert_eq!(queue.dequeue(), None);
    }

    #[test]
    fn test_concurrent_dequeue_is_exclusive() {
        let queue = Arc::new(WorkQueue::seed(1, 1000));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let queue = Arc::clone(&queue);
                std::thread::spawn(move || {
                    let mut seen = Vec::new();
                    while let Some(id) = queue.dequeue() {
                        seen.push(id);
                    }
                    seen
                })
            })
            .collect();

        let mut all = Vec::new();
        for handle in handles {
            all.extend(handle.join().unwrap());
        }

        // Every identifier handed out exactly once
        assert_eq!(all.len(), 1000);
        let unique: HashSet<_> = all.iter().copied().collect();
        assert_eq!(unique.len(), 1000);
    }
}
