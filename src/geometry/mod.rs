use num_traits::{Num, Signed, Float};


/// Manhattan distance
pub fn manhattan_distance<T>(x1: T, y1: T, x2: T, y2: T) -> T
where
    T: Num + Copy + Signed,
    {
    (x1 - x2).abs() + (y1 - y2).abs()
}

/// Euclidean distance
pub fn euclidean<T>(x1: T, y1: T, x2: T, y2: T) -> T
where
    T: Float,
    {
    ((x1 - x2).powi(2) + (y1 - y2).powi(2)).sqrt()
}


/// 2D Point - node position used by distance based heuristics
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Straight line distance to another point
    pub fn distance(&self, other: &Point) -> f64 {
        euclidean(self.x, self.y, other.x, other.y)
    }

    /// Grid distance to another point
    pub fn manhattan(&self, other: &Point) -> f64 {
        manhattan_distance(self.x, self.y, other.x, other.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_distances() {
        let a = Point::new(0.0, 0.0);
        let b = Point::from((3.0, 4.0));

        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(b.distance(&a), 5.0);
        assert_eq!(a.manhattan(&b), 7.0);
    }

    #[test]
    fn test_integer_manhattan() {
        assert_eq!(manhattan_distance(1i32, -2, -3, 4), 10);
    }
}
