use std::{borrow::Cow, fmt};

use crate::errors::{PathPlannerError, PlannerResult};
use crate::graph::{AttrValue, Attributes, EdgeId, Network, TimeWindow};


/// Callback reading a value from an edge: `(u, v, edge attributes) -> value`
pub type EdgeFn<'a, N, T> = Box<dyn Fn(&N, &N, &Attributes) -> T + 'a>;

/// Where an edge value comes from - a key in the attribute bag or a callback
///
/// The callback return types are:
/// - weight: `Option<f64>`, `None` hides the edge
/// - risk: `f64`
/// - time: `Option<f64>`, `None` falls back to the weight
/// - time windows: `Vec<TimeWindow>`
pub enum Attribute<'a, N, T> {
    Key(String),
    Function(EdgeFn<'a, N, T>),
}

impl<'a, N, T> Attribute<'a, N, T> {

    pub fn key(key: &str) -> Self {
        Attribute::Key(key.to_string())
    }

    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&N, &N, &Attributes) -> T + 'a,
    {
        Attribute::Function(Box::new(f))
    }

    /// Keys must name something
    pub(crate) fn validate(&self, name: &str) -> PlannerResult<()> {
        match self {
            Attribute::Key(key) if key.trim().is_empty() => Err(PathPlannerError::InvalidConfiguration(
                format!("{name} attribute key is empty"),
            )),
            _ => Ok(()),
        }
    }
}

impl<'a, N, T> From<&str> for Attribute<'a, N, T> {
    fn from(key: &str) -> Self {
        Attribute::key(key)
    }
}

impl<'a, N, T> fmt::Debug for Attribute<'a, N, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attribute::Key(key) => f.debug_tuple("Key").field(key).finish(),
            Attribute::Function(_) => f.write_str("Function(..)"),
        }
    }
}


/// Everything the search needs to know about one traversable edge
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedEdge<'e> {
    pub id: EdgeId,
    pub weight: f64,
    pub risk: f64,
    pub time: f64,
    pub windows: Cow<'e, [TimeWindow]>,
}


/// Uniform accessors for weight, risk, time and busy windows of an edge
pub(crate) struct EdgeResolver<'c, 'a, N> {
    weight: &'c Attribute<'a, N, Option<f64>>,
    risk: &'c Attribute<'a, N, f64>,
    time: &'c Attribute<'a, N, Option<f64>>,
    time_windows: &'c Attribute<'a, N, Vec<TimeWindow>>,
}

impl<'c, 'a, N> EdgeResolver<'c, 'a, N> {

    pub fn new(
        weight: &'c Attribute<'a, N, Option<f64>>,
        risk: &'c Attribute<'a, N, f64>,
        time: &'c Attribute<'a, N, Option<f64>>,
        time_windows: &'c Attribute<'a, N, Vec<TimeWindow>>,
    ) -> Self {
        Self { weight, risk, time, time_windows }
    }

    /// Resolve the edge used to go from `u` to `v`
    /// With parallel edges the lightest usable one is picked (first on ties) and
    /// risk, time and windows are all read from that same edge
    /// Returns `None` if no edge can be traversed
    pub fn resolve<'g, G>(&self, graph: &'g G, u: &N, v: &N, ids: &[EdgeId]) -> PlannerResult<Option<ResolvedEdge<'g>>>
    where
        G: Network<N>,
    {
        let candidates = if graph.is_multigraph() { ids } else { &ids[..ids.len().min(1)] };

        let mut best: Option<(EdgeId, &'g Attributes, f64)> = None;
        for &id in candidates {
            let Some(attributes) = graph.edge(id) else {
                continue;
            };
            let Some(weight) = self.weight(u, v, attributes)? else {
                continue;
            };
            if best.is_none_or(|(_, _, lightest)| weight < lightest) {
                best = Some((id, attributes, weight));
            }
        }

        let Some((id, attributes, weight)) = best else {
            return Ok(None);
        };

        Ok(Some(ResolvedEdge {
            id,
            weight,
            risk: self.risk(u, v, attributes)?,
            time: self.time(u, v, attributes)?.unwrap_or(weight),
            windows: self.time_windows(u, v, attributes)?,
        }))
    }

    /// Missing weight counts as 1, `Closed` hides the edge
    fn weight(&self, u: &N, v: &N, attributes: &Attributes) -> PlannerResult<Option<f64>> {
        match self.weight {
            Attribute::Function(f) => Ok(f(u, v, attributes)),
            Attribute::Key(key) => match attributes.get(key) {
                None => Ok(Some(1.0)),
                Some(AttrValue::Number(weight)) => Ok(Some(*weight)),
                Some(AttrValue::Closed) => Ok(None),
                Some(_) => Err(PathPlannerError::AttributeType {
                    key: key.clone(),
                    expected: "number",
                }),
            },
        }
    }

    /// Missing risk counts as 0
    fn risk(&self, u: &N, v: &N, attributes: &Attributes) -> PlannerResult<f64> {
        match self.risk {
            Attribute::Function(f) => Ok(f(u, v, attributes)),
            Attribute::Key(key) => Ok(attributes.number(key)?.unwrap_or(0.0)),
        }
    }

    fn time(&self, u: &N, v: &N, attributes: &Attributes) -> PlannerResult<Option<f64>> {
        match self.time {
            Attribute::Function(f) => Ok(f(u, v, attributes)),
            Attribute::Key(key) => attributes.number(key),
        }
    }

    fn time_windows<'e>(&self, u: &N, v: &N, attributes: &'e Attributes) -> PlannerResult<Cow<'e, [TimeWindow]>> {
        match self.time_windows {
            Attribute::Function(f) => Ok(Cow::Owned(f(u, v, attributes))),
            Attribute::Key(key) => Ok(Cow::Borrowed(attributes.windows(key)?)),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;

    struct Keys<'a> {
        weight: Attribute<'a, u32, Option<f64>>,
        risk: Attribute<'a, u32, f64>,
        time: Attribute<'a, u32, Option<f64>>,
        time_windows: Attribute<'a, u32, Vec<TimeWindow>>,
    }

    impl<'a> Keys<'a> {
        fn new() -> Self {
            Self {
                weight: "weight".into(),
                risk: "risk".into(),
                time: "time".into(),
                time_windows: "time_windows".into(),
            }
        }

        fn resolver(&self) -> EdgeResolver<'_, 'a, u32> {
            EdgeResolver::new(&self.weight, &self.risk, &self.time, &self.time_windows)
        }
    }

    fn resolve_first(graph: &Graph<u32>, keys: &Keys, u: u32, v: u32) -> Option<ResolvedEdge<'static>> {
        let ids = graph.edges_between(&u, &v);
        keys.resolver()
            .resolve(graph, &u, &v, ids)
            .unwrap()
            .map(|edge| ResolvedEdge {
                id: edge.id,
                weight: edge.weight,
                risk: edge.risk,
                time: edge.time,
                windows: Cow::Owned(edge.windows.into_owned()),
            })
    }

    #[test]
    fn test_defaults_for_missing_attributes() {
        let mut graph: Graph<u32> = Graph::new();
        graph.add_edge(0, 1, Attributes::new());
        graph.add_edge(1, 2, Attributes::new().with("weight", 4.0));

        let keys = Keys::new();
        let bare = resolve_first(&graph, &keys, 0, 1).unwrap();
        assert_eq!(bare.weight, 1.0);
        assert_eq!(bare.risk, 0.0);
        assert_eq!(bare.time, 1.0);
        assert!(bare.windows.is_empty());

        // time falls back to the weight
        let weighted = resolve_first(&graph, &keys, 1, 2).unwrap();
        assert_eq!(weighted.time, 4.0);
    }

    #[test]
    fn test_closed_edge_is_unusable() {
        let mut graph: Graph<u32> = Graph::new();
        graph.add_edge(0, 1, Attributes::new().with("weight", AttrValue::Closed));

        let keys = Keys::new();
        assert!(resolve_first(&graph, &keys, 0, 1).is_none());
    }

    #[test]
    fn test_callbacks_replace_keys() {
        let mut graph: Graph<u32> = Graph::new();
        graph.add_edge(0, 1, Attributes::new().with("length", 10.0).with("danger", 2.0));
        graph.add_edge(1, 2, Attributes::new().with("length", 10.0));

        let mut keys = Keys::new();
        keys.weight = Attribute::function(|_: &u32, _: &u32, attrs: &Attributes| attrs.number("length").ok().flatten());
        keys.risk = Attribute::key("danger");
        keys.time = Attribute::function(|_: &u32, _: &u32, _: &Attributes| Some(0.5));
        keys.time_windows = Attribute::function(|u: &u32, _: &u32, _: &Attributes| {
            if *u == 1 { vec![TimeWindow::new(0.0, 3.0)] } else { vec![] }
        });

        let first = resolve_first(&graph, &keys, 0, 1).unwrap();
        assert_eq!((first.weight, first.risk, first.time), (10.0, 2.0, 0.5));
        assert!(first.windows.is_empty());

        let second = resolve_first(&graph, &keys, 1, 2).unwrap();
        assert_eq!(second.windows.len(), 1);

        // callbacks returning None hide the edge
        keys.weight = Attribute::function(|_: &u32, _: &u32, _: &Attributes| None);
        assert!(resolve_first(&graph, &keys, 0, 1).is_none());
    }

    #[test]
    fn test_parallel_edges_read_from_lightest_edge() {
        let mut graph: Graph<u32> = Graph::multigraph();
        graph.add_edge(0, 1, Attributes::new().with("weight", 5.0).with("risk", 0.0));
        let light = graph.add_edge(0, 1, Attributes::new()
            .with("weight", 2.0)
            .with("risk", 9.0)
            .with("time", 7.0)
            .with("time_windows", vec![TimeWindow::new(0.0, 1.0), TimeWindow::new(2.0, 3.0)]));
        graph.add_edge(0, 1, Attributes::new().with("weight", AttrValue::Closed).with("risk", 0.0));

        let keys = Keys::new();
        let edge = resolve_first(&graph, &keys, 0, 1).unwrap();

        // risk is not mixed in from the low risk but heavier edge
        assert_eq!(edge.id, light);
        assert_eq!(edge.weight, 2.0);
        assert_eq!(edge.risk, 9.0);
        assert_eq!(edge.time, 7.0);
        assert_eq!(edge.windows.len(), 2);
    }

    #[test]
    fn test_wrong_attribute_kind_is_an_error() {
        let mut graph: Graph<u32> = Graph::new();
        graph.add_edge(0, 1, Attributes::new().with("risk", vec![TimeWindow::new(0.0, 1.0)]));

        let keys = Keys::new();
        let result = keys.resolver().resolve(&graph, &0, &1, graph.edges_between(&0, &1));
        assert!(matches!(result, Err(PathPlannerError::AttributeType { .. })));
    }

    #[test]
    fn test_empty_key_fails_validation() {
        let weight: Attribute<u32, Option<f64>> = Attribute::key("  ");
        assert!(matches!(weight.validate("weight"), Err(PathPlannerError::InvalidConfiguration(_))));
        assert!(Attribute::<u32, f64>::key("risk").validate("risk").is_ok());
    }
}
