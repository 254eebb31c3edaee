use crate::collections::FxIndexMap;
use crate::errors::{PathPlannerError, PlannerResult};


/// Half-open interval `[start, end)` during which an edge is occupied
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeWindow {
    pub start: f64,
    pub end: f64,
}

impl TimeWindow {

    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// True if `t` falls inside the window, `end` excluded
    pub fn contains(&self, t: f64) -> bool {
        self.start <= t && t < self.end
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

impl From<(f64, f64)> for TimeWindow {
    fn from((start, end): (f64, f64)) -> Self {
        Self { start, end }
    }
}


/// Value stored in an edge attribute bag
#[derive(Clone, Debug, PartialEq)]
pub enum AttrValue {
    Number(f64),
    Windows(Vec<TimeWindow>),
    Closed, // explicit "no edge" marker, the edge cannot be traversed
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Number(value)
    }
}

impl From<Vec<TimeWindow>> for AttrValue {
    fn from(windows: Vec<TimeWindow>) -> Self {
        AttrValue::Windows(windows)
    }
}


/// Attribute bag carried by each edge
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Attributes {
    values: FxIndexMap<String, AttrValue>,
}

impl Attributes {

    pub fn new() -> Self {
        Self::default()
    }

    /// Builder style insert
    pub fn with(mut self, key: &str, value: impl Into<AttrValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<AttrValue>) -> Option<AttrValue> {
        self.values.insert(key.to_string(), value.into())
    }

    /// Overwrite with every value of `other`
    pub fn merge(&mut self, other: Attributes) {
        self.values.extend(other.values);
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.values.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Numeric attribute, `None` when absent
    pub fn number(&self, key: &str) -> PlannerResult<Option<f64>> {
        match self.values.get(key) {
            None => Ok(None),
            Some(AttrValue::Number(value)) => Ok(Some(*value)),
            Some(_) => Err(PathPlannerError::AttributeType {
                key: key.to_string(),
                expected: "number",
            }),
        }
    }

    /// Busy windows of the edge, empty when absent
    pub fn windows(&self, key: &str) -> PlannerResult<&[TimeWindow]> {
        match self.values.get(key) {
            None => Ok(&[]),
            Some(AttrValue::Windows(windows)) => Ok(windows.as_slice()),
            Some(_) => Err(PathPlannerError::AttributeType {
                key: key.to_string(),
                expected: "list of time windows",
            }),
        }
    }

    /// Mutable window list, created on first use
    pub fn windows_mut(&mut self, key: &str) -> PlannerResult<&mut Vec<TimeWindow>> {
        let value = self.values
            .entry(key.to_string())
            .or_insert_with(|| AttrValue::Windows(Vec::new()));

        match value {
            AttrValue::Windows(windows) => Ok(windows),
            _ => Err(PathPlannerError::AttributeType {
                key: key.to_string(),
                expected: "list of time windows",
            }),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_window_is_half_open() {
        let window = TimeWindow::new(0.0, 5.0);
        assert!(window.contains(0.0));
        assert!(window.contains(4.999));
        assert!(!window.contains(5.0));
        assert!(!window.contains(-0.1));
        assert!(TimeWindow::new(3.0, 3.0).is_empty());
    }

    #[test]
    fn test_attribute_lookups() {
        let attrs = Attributes::new()
            .with("weight", 2.5)
            .with("time_windows", vec![TimeWindow::new(1.0, 2.0)]);

        assert_eq!(attrs.number("weight").unwrap(), Some(2.5));
        assert_eq!(attrs.number("risk").unwrap(), None);
        assert_eq!(attrs.windows("time_windows").unwrap().len(), 1);
        assert!(attrs.windows("missing").unwrap().is_empty());
    }

    #[test]
    fn test_attribute_wrong_kind() {
        let attrs = Attributes::new()
            .with("weight", vec![TimeWindow::new(1.0, 2.0)])
            .with("time_windows", 4.0);

        assert!(matches!(attrs.number("weight"), Err(PathPlannerError::AttributeType { .. })));
        assert!(matches!(attrs.windows("time_windows"), Err(PathPlannerError::AttributeType { .. })));
    }

    #[test]
    fn test_windows_mut_creates_list() {
        let mut attrs = Attributes::new();
        attrs.windows_mut("time_windows").unwrap().push(TimeWindow::new(0.0, 1.0));
        attrs.windows_mut("time_windows").unwrap().push(TimeWindow::new(2.0, 3.0));

        assert_eq!(attrs.windows("time_windows").unwrap().len(), 2);
    }
}
