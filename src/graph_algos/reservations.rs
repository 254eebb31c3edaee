use std::hash::Hash;

use crate::collections::FxIndexMap;
use crate::graph::{EdgeId, TimeWindow};


/// Interval `[entry, exit)` during which a path occupies an edge
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reservation {
    pub edge: EdgeId, // physical edge claimed, matters for parallel edges
    pub entry: f64,
    pub exit: f64,
}

impl Reservation {

    /// Occupancy as a busy window, ready to be booked on the graph
    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.entry, self.exit)
    }

    pub fn duration(&self) -> f64 {
        self.exit - self.entry
    }
}

/// Reservations keyed by directed edge `(u, v)`, in path order
pub type Reservations<N> = FxIndexMap<(N, N), Reservation>;


/// Outcome of entering an edge at some arrival time
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Traversal {
    pub entry: f64,
    pub exit: f64,
}

/// Decide when an agent arriving at `ctime` can enter an edge with travel time `time`
/// While a busy window contains the entry time the agent waits for that window to end
pub fn resolve_conflict(ctime: f64, time: f64, busy: &[TimeWindow]) -> Traversal {
    let mut entry = ctime;

    // entry strictly grows and a window left behind never matches again, so this ends
    while let Some(window) = busy.iter().find(|window| window.contains(entry)) {
        entry = window.end;
    }

    Traversal {
        entry,
        exit: entry + time,
    }
}


/// Per-edge map of the time intervals claimed by a path
#[derive(Debug)]
pub struct ReservationLedger<N> {
    entries: Reservations<N>,
}

impl<N> ReservationLedger<N>
where
    N: Eq + Hash,
{

    pub fn new() -> Self {
        Self { entries: FxIndexMap::default() }
    }

    /// Claim `edge` for `traversal`
    /// Waiting before the edge is charged to `previous`, whose exit is pushed to the entry time
    pub fn record(&mut self, previous: Option<&(N, N)>, edge: (N, N), id: EdgeId, traversal: Traversal) {
        if let Some(prev) = previous {
            if let Some(reservation) = self.entries.get_mut(prev) {
                if traversal.entry > reservation.exit {
                    reservation.exit = traversal.entry;
                }
            }
        }

        self.entries.insert(edge, Reservation {
            edge: id,
            entry: traversal.entry,
            exit: traversal.exit,
        });
    }

    pub fn get(&self, edge: &(N, N)) -> Option<&Reservation> {
        self.entries.get(edge)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_reservations(self) -> Reservations<N> {
        self.entries
    }
}

impl<N> Default for ReservationLedger<N>
where
    N: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}
