use std::hash::Hash;

use tracing::trace;

use crate::collections::FxHashMap;
use crate::graph::Positioned;


/// Estimate of the remaining cost from `node` to `target`
/// Must be admissible and consistent for the returned path to be optimal
pub trait Heuristic<N, G: ?Sized> {
    fn estimate(&mut self, graph: &G, node: &N, target: &N) -> f64;
}

impl<N, G, F> Heuristic<N, G> for F
where
    G: ?Sized,
    F: FnMut(&G, &N, &N) -> f64,
{
    fn estimate(&mut self, graph: &G, node: &N, target: &N) -> f64 {
        self(graph, node, target)
    }
}


/// h = 0, turns the search into a risk and time aware Dijkstra
#[derive(Clone, Copy, Debug, Default)]
pub struct ZeroHeuristic;

impl<N, G: ?Sized> Heuristic<N, G> for ZeroHeuristic {
    fn estimate(&mut self, _graph: &G, _node: &N, _target: &N) -> f64 {
        0.0
    }
}


/// Straight line distance between node positions
/// Distances are memoized per instance, so a fresh instance should be used per graph
/// Nodes without a position estimate 0, which keeps the heuristic admissible
#[derive(Clone, Debug)]
pub struct Euclidean<N> {
    memo: FxHashMap<(N, N), f64>,
}

impl<N> Euclidean<N> {

    pub fn new() -> Self {
        Self { memo: FxHashMap::default() }
    }

    /// Number of memoized node pairs
    pub fn cached(&self) -> usize {
        self.memo.len()
    }

    pub fn clear(&mut self) {
        self.memo.clear();
    }
}

impl<N> Default for Euclidean<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, G> Heuristic<N, G> for Euclidean<N>
where
    N: Eq + Hash + Clone + std::fmt::Debug,
    G: Positioned<N> + ?Sized,
{
    fn estimate(&mut self, graph: &G, node: &N, target: &N) -> f64 {
        let key = (node.clone(), target.clone());
        if let Some(&distance) = self.memo.get(&key) {
            return distance;
        }

        let distance = match (graph.position(node), graph.position(target)) {
            (Some(from), Some(to)) => from.distance(&to),
            _ => {
                trace!(?node, ?target, "missing position, estimating 0");
                0.0
            }
        };
        self.memo.insert(key, distance);
        distance
    }
}
