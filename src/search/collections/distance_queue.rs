use std::{cmp::Ordering, collections::BinaryHeap};

use clap::ValueEnum;
use radix_heap::RadixHeapMap;

use super::priority_queue::IndexedPriorityQueue;
use crate::graphs::{Distance, Vertex};

/// A priority queue of vertices keyed by their tentative distance.
///
/// Implementations may or may not use a decrease key operation. Lazy ones
/// keep stale entries around and the search skips vertices it has already
/// settled.
pub trait DistanceQueue<T> {
    /// Clears all stored data, preparing for a new search.
    fn clear(&mut self);

    fn insert(&mut self, vertex: T, distance: Distance);

    /// Removes and returns the vertex with the smallest distance or `None`
    /// if the queue is empty.
    fn pop(&mut self) -> Option<(T, Distance)>;

    fn is_empty(&self) -> bool;
}

#[derive(Debug, ValueEnum, Clone, Copy, PartialEq, Eq)]
pub enum QueueKind {
    Indexed,
    BinaryHeap,
    Radix,
}

impl QueueKind {
    pub const ALL: [QueueKind; 3] = [QueueKind::Indexed, QueueKind::BinaryHeap, QueueKind::Radix];

    pub fn new_queue<T: Vertex + 'static>(&self) -> Box<dyn DistanceQueue<T>> {
        match self {
            QueueKind::Indexed => Box::new(IndexedPriorityQueue::<T, Distance>::new()),
            QueueKind::BinaryHeap => Box::new(BinaryHeapQueue::<T>::new()),
            QueueKind::Radix => Box::new(RadixQueue::<T>::new()),
        }
    }
}

impl<T: Vertex> DistanceQueue<T> for IndexedPriorityQueue<T, Distance> {
    fn clear(&mut self) {
        IndexedPriorityQueue::clear(self);
    }

    fn insert(&mut self, vertex: T, distance: Distance) {
        self.decrease_priority(vertex, distance);
    }

    fn pop(&mut self) -> Option<(T, Distance)> {
        IndexedPriorityQueue::pop(self)
    }

    fn is_empty(&self) -> bool {
        IndexedPriorityQueue::is_empty(self)
    }
}

struct QueueElement<T> {
    distance: Distance,
    sequence: u64,
    vertex: T,
}

impl<T> PartialEq for QueueElement<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for QueueElement<T> {}

// `BinaryHeap` is a max-heap, so flip the ordering on distances. Ties are
// broken by insertion order, the vertex itself does not need to be `Ord`.
impl<T> Ord for QueueElement<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .cmp(&self.distance)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl<T> PartialOrd for QueueElement<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Lazy queue on top of `std::collections::BinaryHeap`. Inserting a vertex
/// twice keeps both entries.
pub struct BinaryHeapQueue<T> {
    heap: BinaryHeap<QueueElement<T>>,
    next_sequence: u64,
}

impl<T> Default for BinaryHeapQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BinaryHeapQueue<T> {
    pub fn new() -> BinaryHeapQueue<T> {
        BinaryHeapQueue {
            heap: BinaryHeap::new(),
            next_sequence: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

impl<T> DistanceQueue<T> for BinaryHeapQueue<T> {
    fn clear(&mut self) {
        self.heap.clear();
        self.next_sequence = 0;
    }

    fn insert(&mut self, vertex: T, distance: Distance) {
        self.heap.push(QueueElement {
            distance,
            sequence: self.next_sequence,
            vertex,
        });
        self.next_sequence += 1;
    }

    fn pop(&mut self) -> Option<(T, Distance)> {
        let QueueElement {
            distance, vertex, ..
        } = self.heap.pop()?;
        Some((vertex, distance))
    }

    fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

/// Lazy monotone queue on top of a radix heap.
///
/// A radix heap only accepts keys that are not smaller than the last popped
/// one. Dijkstra with non-negative weights never violates that, other users
/// must make sure they do not either.
pub struct RadixQueue<T> {
    heap: RadixHeapMap<i64, T>,
}

impl<T> Default for RadixQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RadixQueue<T> {
    pub fn new() -> RadixQueue<T> {
        RadixQueue {
            heap: RadixHeapMap::new(),
        }
    }
}

impl<T> DistanceQueue<T> for RadixQueue<T> {
    fn clear(&mut self) {
        self.heap = RadixHeapMap::new();
    }

    fn insert(&mut self, vertex: T, distance: Distance) {
        // the radix heap is a max-heap
        self.heap.push(-(distance as i64), vertex);
    }

    fn pop(&mut self) -> Option<(T, Distance)> {
        let (negative_distance, vertex) = self.heap.pop()?;
        Some((vertex, -negative_distance as Distance))
    }

    fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
