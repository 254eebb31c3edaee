pub mod attributes;

use std::{fmt, hash::Hash};

use crate::collections::FxIndexMap;
use crate::errors::{PathPlannerError, PlannerResult};
use crate::geometry::Point;
use crate::graph_algos::reservations::Reservations;

pub use attributes::{AttrValue, Attributes, TimeWindow};


/// Identifier of a physical edge - parallel edges of a multigraph get distinct ids
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(usize);

impl EdgeId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}


/// What the planners need from a graph
pub trait Network<N> {

    /// Node membership test
    fn contains_node(&self, node: &N) -> bool;

    /// True if several edges may join the same pair of nodes
    fn is_multigraph(&self) -> bool;

    /// Neighbors of `node`, each with the ids of the edges leading to it
    /// Simple graphs always yield exactly one id per neighbor
    fn adjacent<'a>(&'a self, node: &N) -> impl Iterator<Item = (&'a N, &'a [EdgeId])>
    where
        N: 'a;

    /// Attribute bag of an edge
    fn edge(&self, id: EdgeId) -> Option<&Attributes>;
}

/// Graphs that know where their nodes are
pub trait Positioned<N> {
    fn position(&self, node: &N) -> Option<Point>;
}


/// Attributed graph - directed or undirected, simple or multi
/// Undirected edges are stored once and shared by both directions
#[derive(Clone, Debug)]
pub struct Graph<N> {
    directed: bool,
    multi: bool,
    nodes: FxIndexMap<N, Option<Point>>,
    adjacency: FxIndexMap<N, FxIndexMap<N, Vec<EdgeId>>>,
    edges: Vec<(N, N, Attributes)>,
}

impl<N> Graph<N>
where
    N: Eq + Hash + Clone + fmt::Debug,
{

    /// Undirected simple graph
    pub fn new() -> Self {
        Self::with_kind(false, false)
    }

    /// Directed simple graph
    pub fn directed() -> Self {
        Self::with_kind(true, false)
    }

    /// Undirected graph allowing parallel edges
    pub fn multigraph() -> Self {
        Self::with_kind(false, true)
    }

    /// Directed graph allowing parallel edges
    pub fn multi_directed() -> Self {
        Self::with_kind(true, true)
    }

    fn with_kind(directed: bool, multi: bool) -> Self {
        Self {
            directed,
            multi,
            nodes: FxIndexMap::default(),
            adjacency: FxIndexMap::default(),
            edges: Vec::new(),
        }
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Add a node without a position, existing nodes are left untouched
    pub fn add_node(&mut self, node: N) {
        if !self.nodes.contains_key(&node) {
            self.nodes.insert(node.clone(), None);
            self.adjacency.insert(node, FxIndexMap::default());
        }
    }

    /// Add a node or move an existing one to `position`
    pub fn add_node_at(&mut self, node: N, position: impl Into<Point>) {
        self.add_node(node.clone());
        self.nodes.insert(node, Some(position.into()));
    }

    /// Add an edge, creating missing endpoints
    /// On a simple graph an existing edge gets its attributes updated instead
    pub fn add_edge(&mut self, u: N, v: N, attributes: Attributes) -> EdgeId {
        self.add_node(u.clone());
        self.add_node(v.clone());

        if !self.multi {
            if let Some(&id) = self.edges_between(&u, &v).first() {
                self.edges[id.index()].2.merge(attributes);
                return id;
            }
        }

        let id = EdgeId(self.edges.len());
        self.edges.push((u.clone(), v.clone(), attributes));
        self.link(&u, &v, id);
        if !self.directed && u != v {
            self.link(&v, &u, id);
        }
        id
    }

    fn link(&mut self, from: &N, to: &N, id: EdgeId) {
        if let Some(neighbors) = self.adjacency.get_mut(from) {
            neighbors.entry(to.clone()).or_default().push(id);
        }
    }

    /// Ids of the edges usable to go from `u` to `v`
    pub fn edges_between(&self, u: &N, v: &N) -> &[EdgeId] {
        self.adjacency
            .get(u)
            .and_then(|neighbors| neighbors.get(v))
            .map(|ids| ids.as_slice())
            .unwrap_or(&[])
    }

    /// Endpoints of an edge as they were added
    pub fn endpoints(&self, id: EdgeId) -> Option<(&N, &N)> {
        self.edges.get(id.index()).map(|(u, v, _)| (u, v))
    }

    pub fn edge_mut(&mut self, id: EdgeId) -> Option<&mut Attributes> {
        self.edges.get_mut(id.index()).map(|(_, _, attributes)| attributes)
    }

    /// Merge the reservations of a planned path into the claimed edges' busy windows
    /// This is how a later agent learns about the earlier ones
    pub fn book(&mut self, reservations: &Reservations<N>, key: &str) -> PlannerResult<()> {
        for reservation in reservations.values() {
            let window = reservation.window();
            if window.is_empty() {
                continue;
            }

            let attributes = self.edge_mut(reservation.edge)
                .ok_or(PathPlannerError::EdgeNotFound(reservation.edge))?;
            attributes.windows_mut(key)?.push(window);
        }
        Ok(())
    }
}

impl<N> Default for Graph<N>
where
    N: Eq + Hash + Clone + fmt::Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<N> Network<N> for Graph<N>
where
    N: Eq + Hash,
{
    fn contains_node(&self, node: &N) -> bool {
        self.nodes.contains_key(node)
    }

    fn is_multigraph(&self) -> bool {
        self.multi
    }

    fn adjacent<'a>(&'a self, node: &N) -> impl Iterator<Item = (&'a N, &'a [EdgeId])>
    where
        N: 'a,
    {
        self.adjacency
            .get(node)
            .into_iter()
            .flat_map(|neighbors| neighbors.iter().map(|(n, ids)| (n, ids.as_slice())))
    }

    fn edge(&self, id: EdgeId) -> Option<&Attributes> {
        self.edges.get(id.index()).map(|(_, _, attributes)| attributes)
    }
}

impl<N> Positioned<N> for Graph<N>
where
    N: Eq + Hash,
{
    fn position(&self, node: &N) -> Option<Point> {
        self.nodes.get(node).copied().flatten()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn weight(w: f64) -> Attributes {
        Attributes::new().with("weight", w)
    }

    #[test]
    fn test_undirected_edges_are_shared() {
        let mut graph = Graph::new();
        let id = graph.add_edge("A", "B", weight(1.0));

        assert_eq!(graph.edges_between(&"A", &"B"), &[id]);
        assert_eq!(graph.edges_between(&"B", &"A"), &[id]);
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.contains_node(&"A"));
        assert!(!graph.contains_node(&"C"));
    }

    #[test]
    fn test_directed_edges_one_way() {
        let mut graph = Graph::directed();
        graph.add_edge("A", "B", weight(1.0));

        assert_eq!(graph.edges_between(&"A", &"B").len(), 1);
        assert!(graph.edges_between(&"B", &"A").is_empty());
        assert_eq!(graph.adjacent(&"B").count(), 0);
    }

    #[test]
    fn test_simple_graph_updates_existing_edge() {
        let mut graph = Graph::new();
        let first = graph.add_edge(1, 2, weight(1.0));
        let second = graph.add_edge(2, 1, Attributes::new().with("risk", 4.0));

        assert_eq!(first, second);
        let attrs = graph.edge(first).unwrap();
        assert_eq!(attrs.number("weight").unwrap(), Some(1.0));
        assert_eq!(attrs.number("risk").unwrap(), Some(4.0));
    }

    #[test]
    fn test_multigraph_keeps_parallel_edges() {
        let mut graph = Graph::multigraph();
        graph.add_edge(1, 2, weight(1.0));
        graph.add_edge(1, 2, weight(2.0));

        assert!(graph.is_multigraph());
        let (neighbor, ids) = graph.adjacent(&1).next().unwrap();
        assert_eq!(*neighbor, 2);
        assert_eq!(ids.len(), 2);
    }

    #[test]
    fn test_positions() {
        let mut graph: Graph<u32> = Graph::new();
        graph.add_node_at(0, (1.0, 2.0));
        graph.add_node(1);

        assert_eq!(graph.position(&0), Some(Point::new(1.0, 2.0)));
        assert_eq!(graph.position(&1), None);
        assert_eq!(graph.position(&7), None);
    }
}
