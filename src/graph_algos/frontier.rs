use std::{collections::BinaryHeap, cmp::Ordering};

use crate::graph::EdgeId;
use super::reservations::Traversal;


/// How a node was reached: parent index in the search tables plus the edge taken
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Incoming {
    pub parent: usize,
    pub edge: EdgeId,
    pub traversal: Traversal,
}

/// Candidate expansion waiting in the open set
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct SearchRecord {
    pub index: usize, // index in the search tables - maps to the Id of the node
    pub g: f64, // distance from the source
    pub r: f64, // risk from the source
    pub t: f64, // elapsed time when leaving the incoming edge
    pub incoming: Option<Incoming>, // None marks the source
}


/// Heap entry, ordered by priority and then by insertion sequence
#[derive(Debug)]
struct Entry {
    priority: f64, // g + alpha * r + h
    sequence: u64,
    record: SearchRecord,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max heap, reverse so the smallest priority pops first
        // and the earlier insertion wins a tie
        other.priority.total_cmp(&self.priority)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}
impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for Entry {}


/// Open list of the search, a min priority queue without decrease-key
/// A node may sit in here several times, stale copies are filtered by the search loop
#[derive(Debug, Default)]
pub(crate) struct Frontier {
    heap: BinaryHeap<Entry>,
    sequence: u64,
}

impl Frontier {

    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, priority: f64, record: SearchRecord) {
        let sequence = self.sequence;
        self.sequence += 1;
        self.heap.push(Entry { priority, sequence, record });
    }

    /// Remove the entry with the smallest priority
    pub fn pop(&mut self) -> Option<(f64, SearchRecord)> {
        self.heap.pop().map(|entry| (entry.priority, entry.record))
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}
