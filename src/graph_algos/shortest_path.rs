use std::hash::Hash;

use crate::errors::PathPlannerError;
use super::frontier::{Incoming, SearchRecord};
use super::reservations::{ReservationLedger, Reservations};
use super::tables::{Explored, SearchTables};


/// Planned path with the edge occupancy it creates
#[derive(Clone, Debug)]
pub struct PathResult<N> {
    pub path: Vec<N>, // source to target
    pub reservations: Reservations<N>, // only edges of the path, in path order
    pub cost: f64, // total weight
    pub risk: f64, // total risk
    pub arrival: f64, // time at which the target is reached
}

impl<N> PathResult<N> {

    /// Consecutive node pairs of the path
    pub fn edges(&self) -> impl Iterator<Item = (&N, &N)> + '_ {
        self.path.windows(2).map(|pair| (&pair[0], &pair[1]))
    }
}


/// Construct the path from the goal node back to the source
/// Replays the traversals of the path into a fresh ledger, so waiting before an edge
/// extends the reservation of the edge before it
/// goal: SearchRecord - the popped record of the goal, already finalized
pub(crate) fn shortest_path<N>(tables: &SearchTables<N>, goal: &SearchRecord) -> Result<PathResult<N>, PathPlannerError>
where
    N: Eq + Hash + Clone,
{
    // Trace back from goal to source
    let mut chain: Vec<(usize, Option<Incoming>)> = Vec::new();
    let mut current_index = goal.index;
    loop {
        match tables.explored(current_index) {
            Some(Explored::Source) => {
                chain.push((current_index, None));
                break;
            }
            Some(Explored::Via(incoming)) => {
                chain.push((current_index, Some(incoming)));
                current_index = incoming.parent;
            }
            None => return Err(PathPlannerError::NoPathFound),
        }

        // a chain longer than the tables means the predecessors loop
        if chain.len() > tables.len() {
            return Err(PathPlannerError::NoPathFound);
        }
    }

    // The chain is in reverse order
    chain.reverse();

    let mut path = Vec::with_capacity(chain.len());
    let mut ledger = ReservationLedger::new();
    let mut previous: Option<(N, N)> = None;

    for (index, incoming) in chain {
        let node = tables.node(index).cloned().ok_or(PathPlannerError::NoPathFound)?;

        if let Some(incoming) = incoming {
            let parent = tables.node(incoming.parent).cloned().ok_or(PathPlannerError::NoPathFound)?;
            let edge = (parent, node.clone());
            ledger.record(previous.as_ref(), edge.clone(), incoming.edge, incoming.traversal);
            previous = Some(edge);
        }
        path.push(node);
    }

    Ok(PathResult {
        path,
        reservations: ledger.into_reservations(),
        cost: goal.g,
        risk: goal.r,
        arrival: goal.t,
    })
}
