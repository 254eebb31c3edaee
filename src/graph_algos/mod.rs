pub mod collision_a_star;
pub mod heuristics;
pub mod limits;
pub mod reservations;
pub mod resolvers;
mod frontier;
mod tables;
mod shortest_path;

pub use collision_a_star::CollisionAStar;
pub use heuristics::{Euclidean, Heuristic, ZeroHeuristic};
pub use limits::SearchLimits;
pub use reservations::{Reservation, Reservations};
pub use resolvers::Attribute;
pub use shortest_path::PathResult;
