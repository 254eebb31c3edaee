use std::time::Duration;
use thiserror::Error;

use crate::graph::EdgeId;


#[derive(Debug, Error)]
pub enum PathPlannerError {
    /// Source or target is not part of the graph
    #[error("node {0} not found in graph")]
    NodeNotFound(String),

    #[error("edge {0} not found in graph")]
    EdgeNotFound(EdgeId),

    /// Frontier exhausted before reaching the target
    #[error("no path found to the target")]
    NoPathFound,

    /// Rejected before the search starts
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A keyed attribute holds a value of the wrong kind
    #[error("edge attribute `{key}` is not a {expected}")]
    AttributeType { key: String, expected: &'static str },

    #[error("expansion limit of {0} reached")]
    ExpansionLimit(usize),

    #[error("deadline of {0:?} exceeded")]
    DeadlineExceeded(Duration),
}

pub type PlannerResult<T> = Result<T, PathPlannerError>;
