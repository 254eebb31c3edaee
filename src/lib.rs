//! Risk and time-window aware A* path planning
//!
//! Plans a route that minimizes `distance + alpha * risk` on an attributed graph while
//! waiting out edges already booked by other agents. Each plan returns the reservations
//! it makes, so agents can be planned one after the other on the same graph.

pub mod collections;
pub mod errors;
pub mod geometry;
pub mod graph;
pub mod graph_algos;

pub use errors::PathPlannerError;
pub use graph::{AttrValue, Attributes, EdgeId, Graph, Network, Positioned, TimeWindow};
pub use graph_algos::{CollisionAStar, PathResult};
