use crate::errors::{PathPlannerError, PlannerResult};
use crate::graph::{Network, TimeWindow};
use super::frontier::{Frontier, Incoming, SearchRecord};
use super::heuristics::{Heuristic, ZeroHeuristic};
use super::limits::{LimitMonitor, SearchLimits};
use super::reservations::resolve_conflict;
use super::resolvers::{Attribute, EdgeResolver};
use super::shortest_path::{shortest_path, PathResult};
use super::tables::{Enqueued, Explored, SearchTables};

use std::{hash::Hash, fmt::Debug};
use tracing::{debug, trace};


/// A* that trades distance against risk and waits for busy edges
///
/// The objective is `g + alpha * r`, where `g` is the accumulated weight and `r` the
/// accumulated risk. Edges carry busy time windows booked by earlier agents; an agent
/// arriving while an edge is busy waits on the edge it came from. The planned path is
/// returned with the reservations it creates, ready to be booked for the next agent.
pub struct CollisionAStar<'a, N> {
    alpha: f64,
    weight: Attribute<'a, N, Option<f64>>,
    risk: Attribute<'a, N, f64>,
    time: Attribute<'a, N, Option<f64>>,
    time_windows: Attribute<'a, N, Vec<TimeWindow>>,
    limits: SearchLimits,
}

impl<'a, N> CollisionAStar<'a, N>
where
    N: Eq + Hash + Clone + Debug,
{

    /// Planner reading `weight`, `risk`, `time` and `time_windows` from the edges, alpha = 0
    pub fn new() -> Self {
        Self {
            alpha: 0.0,
            weight: Attribute::key("weight"),
            risk: Attribute::key("risk"),
            time: Attribute::key("time"),
            time_windows: Attribute::key("time_windows"),
            limits: SearchLimits::none(),
        }
    }

    /// Weight given to the risk in the objective
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn weight(mut self, weight: impl Into<Attribute<'a, N, Option<f64>>>) -> Self {
        self.weight = weight.into();
        self
    }

    pub fn risk(mut self, risk: impl Into<Attribute<'a, N, f64>>) -> Self {
        self.risk = risk.into();
        self
    }

    pub fn time(mut self, time: impl Into<Attribute<'a, N, Option<f64>>>) -> Self {
        self.time = time.into();
        self
    }

    pub fn time_windows(mut self, time_windows: impl Into<Attribute<'a, N, Vec<TimeWindow>>>) -> Self {
        self.time_windows = time_windows.into();
        self
    }

    pub fn limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Plan without a heuristic - behaves like Dijkstra on the combined objective
    pub fn plan<G>(&self, graph: &G, source: N, target: N) -> PlannerResult<PathResult<N>>
    where
        G: Network<N>,
    {
        self.plan_with(graph, source, target, &mut ZeroHeuristic)
    }

    /// Plan from `source` to `target`
    /// The heuristic must be admissible and consistent for the path to be optimal
    pub fn plan_with<G, H>(&self, graph: &G, source: N, target: N, heuristic: &mut H) -> PlannerResult<PathResult<N>>
    where
        G: Network<N>,
        H: Heuristic<N, G>,
    {
        self.validate()?;

        if !graph.contains_node(&source) {
            return Err(PathPlannerError::NodeNotFound(format!("{:?}", source)));
        }
        if !graph.contains_node(&target) {
            return Err(PathPlannerError::NodeNotFound(format!("{:?}", target)));
        }

        debug!(?source, ?target, alpha = self.alpha, "planning path");
        self.search(graph, source, target, heuristic)
    }

    /// Reject bad settings before touching the graph
    fn validate(&self) -> PlannerResult<()> {
        if !self.alpha.is_finite() || self.alpha < 0.0 {
            return Err(PathPlannerError::InvalidConfiguration(
                format!("alpha must be finite and non-negative, got {}", self.alpha),
            ));
        }
        self.weight.validate("weight")?;
        self.risk.validate("risk")?;
        self.time.validate("time")?;
        self.time_windows.validate("time_windows")?;
        Ok(())
    }

    /// Search loop
    /// Pops the cheapest candidate, stops at the target, otherwise relaxes the outgoing edges
    fn search<G, H>(&self, graph: &G, source: N, target: N, heuristic: &mut H) -> PlannerResult<PathResult<N>>
    where
        G: Network<N>,
        H: Heuristic<N, G>,
    {
        let alpha = self.alpha;
        let resolver = EdgeResolver::new(&self.weight, &self.risk, &self.time, &self.time_windows);
        let mut monitor = LimitMonitor::start(self.limits);

        // Open list - nodes that need to be evaluated, sorted by g + alpha * r + h
        let mut frontier = Frontier::new();

        // Best known (g, h, r) per node and the predecessor of finalized nodes
        let mut tables: SearchTables<N> = SearchTables::new();

        // The source is enqueued up front so edges leading back to it are never an improvement
        let source_h = heuristic.estimate(graph, &source, &target);
        let source_index = tables.intern(source);
        tables.set_enqueued(source_index, Enqueued { g: 0.0, h: source_h, r: 0.0 });
        frontier.push(0.0, SearchRecord {
            index: source_index,
            g: 0.0,
            r: 0.0,
            t: 0.0,
            incoming: None,
        });

        while let Some((_, record)) = frontier.pop() {
            monitor.on_expansion()?;

            let SearchRecord { index, g, r, t, incoming } = record;
            let current = tables.node(index).cloned().ok_or(PathPlannerError::NoPathFound)?;
            let explored = match incoming {
                Some(incoming) => Explored::Via(incoming),
                None => Explored::Source,
            };

            // Check if we've reached the goal
            if current == target {
                tables.finalize(index, explored);
                let result = shortest_path(&tables, &record)?;
                debug!(
                    nodes = result.path.len(),
                    expansions = monitor.expansions(),
                    open = frontier.len(),
                    cost = result.cost,
                    risk = result.risk,
                    arrival = result.arrival,
                    "path found"
                );
                return Ok(result);
            }

            match tables.explored(index) {
                // Do not override the parent of the source
                Some(Explored::Source) if incoming.is_some() => continue,
                // Skip candidates enqueued before a better path was found
                Some(Explored::Via(_)) => {
                    let stale = tables.enqueued(index)
                        .is_some_and(|best| best.combined(alpha) < g + alpha * r);
                    if stale {
                        trace!(node = ?current, "stale frontier entry");
                        continue;
                    }
                }
                _ => {}
            }

            tables.finalize(index, explored);

            for (neighbor, ids) in graph.adjacent(&current) {
                let Some(edge) = resolver.resolve(graph, &current, neighbor, ids)? else {
                    trace!(from = ?current, to = ?neighbor, "edge cannot be traversed");
                    continue;
                };

                let new_g = g + edge.weight;
                let new_r = r + edge.risk;
                let combined = new_g + alpha * new_r;

                // Only strictly better paths get in, ties keep the first one found
                let neighbor_index = tables.index_of(neighbor);
                let h = match neighbor_index.and_then(|i| tables.enqueued(i)) {
                    Some(best) if best.combined(alpha) <= combined => continue,
                    Some(best) => best.h,
                    None => heuristic.estimate(graph, neighbor, &target),
                };

                let traversal = resolve_conflict(t, edge.time, &edge.windows);
                if traversal.entry > t {
                    debug!(
                        from = ?current,
                        to = ?neighbor,
                        arrival = t,
                        entry = traversal.entry,
                        "edge busy, waiting"
                    );
                }

                let neighbor_index = match neighbor_index {
                    Some(i) => i,
                    None => tables.intern(neighbor.clone()),
                };
                tables.set_enqueued(neighbor_index, Enqueued { g: new_g, h, r: new_r });

                frontier.push(combined + h, SearchRecord {
                    index: neighbor_index,
                    g: new_g,
                    r: new_r,
                    t: traversal.exit,
                    incoming: Some(Incoming {
                        parent: index,
                        edge: edge.id,
                        traversal,
                    }),
                });
            }
        }

        debug!(
            ?target,
            expansions = monitor.expansions(),
            discovered = tables.len(),
            "frontier exhausted"
        );
        Err(PathPlannerError::NoPathFound)
    }
}

impl<'a, N> Default for CollisionAStar<'a, N>
where
    N: Eq + Hash + Clone + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}
