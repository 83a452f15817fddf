use std::{cmp::Reverse, hash::Hash};

use ahash::{HashMap, HashMapExt};

use crate::error::GraphError;

struct HeapEntry<T, P> {
    item: T,
    priority: P,
    sequence: u64,
}

/// Binary min-heap with a position index, so that the priority of a queued
/// item can be changed in `O(log n)`.
///
/// Every item is queued at most once. Among equal priorities the item that
/// was first inserted earliest is extracted first; changing the priority of
/// a queued item keeps its place in that order.
///
/// For a highest first queue wrap the priorities in [`Reverse`], see
/// [`MaxPriorityQueue`].
pub struct IndexedPriorityQueue<T, P> {
    heap: Vec<HeapEntry<T, P>>,
    positions: HashMap<T, usize>,
    next_sequence: u64,
}

/// Extracts the largest priority first. Priorities go in and come out
/// wrapped in [`Reverse`], and `decrease_priority` only ever raises the
/// inner value.
pub type MaxPriorityQueue<T, P> = IndexedPriorityQueue<T, Reverse<P>>;

impl<T: Clone + Eq + Hash, P: Ord + Copy> Default for IndexedPriorityQueue<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Eq + Hash, P: Ord + Copy> IndexedPriorityQueue<T, P> {
    pub fn new() -> Self {
        IndexedPriorityQueue {
            heap: Vec::new(),
            positions: HashMap::new(),
            next_sequence: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn contains(&self, item: &T) -> bool {
        self.positions.contains_key(item)
    }

    /// Current priority of `item`, if it is queued.
    pub fn priority(&self, item: &T) -> Option<P> {
        let &index = self.positions.get(item)?;
        Some(self.heap[index].priority)
    }

    pub fn peek(&self) -> Option<(&T, P)> {
        self.heap.first().map(|entry| (&entry.item, entry.priority))
    }

    /// Queues `item`, or moves it to `priority` if it is already queued.
    /// Both lowering and raising the priority are allowed.
    pub fn push(&mut self, item: T, priority: P) {
        if let Some(&index) = self.positions.get(&item) {
            let old_priority = self.heap[index].priority;
            self.heap[index].priority = priority;
            if priority < old_priority {
                self.sift_up(index);
            } else {
                self.sift_down(index);
            }
            return;
        }

        let index = self.heap.len();
        self.positions.insert(item.clone(), index);
        self.heap.push(HeapEntry {
            item,
            priority,
            sequence: self.next_sequence,
        });
        self.next_sequence += 1;
        self.sift_up(index);
    }

    /// Queues `item` unless it is already queued with a priority that is
    /// less or equal. Returns whether the queue changed.
    pub fn decrease_priority(&mut self, item: T, priority: P) -> bool {
        if let Some(current) = self.priority(&item) {
            if current <= priority {
                return false;
            }
        }
        self.push(item, priority);
        true
    }

    /// Removes and returns the item with the smallest priority.
    pub fn pop(&mut self) -> Option<(T, P)> {
        if self.heap.is_empty() {
            return None;
        }

        let last = self.heap.len() - 1;
        self.swap_entries(0, last);
        let entry = self.heap.pop()?;
        self.positions.remove(&entry.item);

        if !self.heap.is_empty() {
            self.sift_down(0);
        }

        Some((entry.item, entry.priority))
    }

    /// Like [`IndexedPriorityQueue::pop`], but treats an empty queue as the
    /// caller's mistake.
    pub fn extract_min(&mut self) -> Result<T, GraphError> {
        self.pop()
            .map(|(item, _)| item)
            .ok_or(GraphError::EmptyQueue)
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.positions.clear();
        self.next_sequence = 0;
    }

    fn less(&self, a: usize, b: usize) -> bool {
        let a = &self.heap[a];
        let b = &self.heap[b];
        (a.priority, a.sequence) < (b.priority, b.sequence)
    }

    fn swap_entries(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.heap.swap(a, b);
        for index in [a, b] {
            if let Some(position) = self.positions.get_mut(&self.heap[index].item) {
                *position = index;
            }
        }
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if !self.less(index, parent) {
                break;
            }
            self.swap_entries(index, parent);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        loop {
            let left = 2 * index + 1;
            let right = left + 1;

            let mut smallest = index;
            if left < self.heap.len() && self.less(left, smallest) {
                smallest = left;
            }
            if right < self.heap.len() && self.less(right, smallest) {
                smallest = right;
            }
            if smallest == index {
                break;
            }

            self.swap_entries(index, smallest);
            index = smallest;
        }
    }
}
