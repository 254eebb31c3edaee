use std::hash::Hash;

use crate::collections::FxIndexMap;
use super::frontier::Incoming;


/// Best known way of reaching a node: distance, cached heuristic and risk
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Enqueued {
    pub g: f64,
    pub h: f64,
    pub r: f64,
}

impl Enqueued {
    /// Objective minimized instead of plain distance
    pub fn combined(&self, alpha: f64) -> f64 {
        self.g + alpha * self.r
    }
}

/// Predecessor chosen when a node was finalized
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Explored {
    Source,
    Via(Incoming),
}

#[derive(Debug, Default)]
struct NodeState {
    enqueued: Option<Enqueued>,
    explored: Option<Explored>,
}


/// Enqueued and explored tables of one search invocation
/// Nodes are interned once, the frontier refers to them by index
#[derive(Debug)]
pub(crate) struct SearchTables<N> {
    nodes: FxIndexMap<N, NodeState>,
}

impl<N> SearchTables<N>
where
    N: Eq + Hash,
{

    pub fn new() -> Self {
        Self { nodes: FxIndexMap::default() }
    }

    /// Index of `node`, inserting it if it was undiscovered
    pub fn intern(&mut self, node: N) -> usize {
        match self.nodes.get_index_of(&node) {
            Some(index) => index,
            None => self.nodes.insert_full(node, NodeState::default()).0,
        }
    }

    pub fn index_of(&self, node: &N) -> Option<usize> {
        self.nodes.get_index_of(node)
    }

    pub fn node(&self, index: usize) -> Option<&N> {
        self.nodes.get_index(index).map(|(node, _)| node)
    }

    pub fn enqueued(&self, index: usize) -> Option<Enqueued> {
        self.nodes.get_index(index).and_then(|(_, state)| state.enqueued)
    }

    pub fn set_enqueued(&mut self, index: usize, entry: Enqueued) {
        if let Some((_, state)) = self.nodes.get_index_mut(index) {
            state.enqueued = Some(entry);
        }
    }

    pub fn explored(&self, index: usize) -> Option<Explored> {
        self.nodes.get_index(index).and_then(|(_, state)| state.explored)
    }

    /// Record the predecessor of a finalized node, the source keeps `Source` forever
    pub fn finalize(&mut self, index: usize, explored: Explored) {
        if let Some((_, state)) = self.nodes.get_index_mut(index) {
            if state.explored != Some(Explored::Source) {
                state.explored = Some(explored);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}
