use std::fmt;
use std::str::FromStr;

use pathviz_core::Point;

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> f64 {
    ((a.x - b.x).abs() + (a.y - b.y).abs()) as f64
}

/// Euclidean (L2) distance between two points.
#[inline]
pub fn euclidean(a: Point, b: Point) -> f64 {
    let dx = (a.x - b.x) as f64;
    let dy = (a.y - b.y) as f64;
    (dx * dx + dy * dy).sqrt()
}

/// Distance estimate used by the informed strategies.
///
/// Both variants ignore barriers. Manhattan is exact on an open
/// 4-connected grid; Euclidean never exceeds it, so both are admissible
/// and consistent here.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Heuristic {
    #[default]
    Manhattan,
    Euclidean,
}

impl Heuristic {
    /// Estimated remaining cost from `from` to `to`.
    #[inline]
    pub fn estimate(self, from: Point, to: Point) -> f64 {
        match self {
            Self::Manhattan => manhattan(from, to),
            Self::Euclidean => euclidean(from, to),
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Manhattan => "manhattan",
            Self::Euclidean => "euclidean",
        })
    }
}

impl FromStr for Heuristic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, String> {
        match s.to_ascii_lowercase().as_str() {
            "manhattan" | "l1" => Ok(Self::Manhattan),
            "euclidean" | "euclidian" | "l2" => Ok(Self::Euclidean),
            other => Err(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_sums_axes() {
        assert_eq!(manhattan(Point::new(0, 0), Point::new(4, 4)), 8.0);
        assert_eq!(manhattan(Point::new(3, -1), Point::new(0, 1)), 5.0);
        assert_eq!(manhattan(Point::new(2, 2), Point::new(2, 2)), 0.0);
    }

    #[test]
    fn euclidean_is_straight_line() {
        assert_eq!(euclidean(Point::new(0, 0), Point::new(3, 4)), 5.0);
        let (a, b) = (Point::new(1, 1), Point::new(4, 5));
        assert!(euclidean(a, b) <= manhattan(a, b));
    }

    #[test]
    fn heuristic_dispatch_and_parse() {
        let (a, b) = (Point::new(0, 0), Point::new(3, 4));
        assert_eq!(Heuristic::default().estimate(a, b), 7.0);
        assert_eq!(Heuristic::Euclidean.estimate(a, b), 5.0);
        assert_eq!("L2".parse(), Ok(Heuristic::Euclidean));
        assert_eq!("manhattan".parse(), Ok(Heuristic::Manhattan));
        assert!("chebyshev".parse::<Heuristic>().is_err());
    }
}
