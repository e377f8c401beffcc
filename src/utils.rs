use std::cmp::Ordering;

use geo::Coordinate;

/// The point type used throughout the crate.
pub type Coord = Coordinate<f64>;

/// Tolerance used for parameter comparisons (`t` values on a curve).
pub const EPSILON: f64 = 1e-6;

/// A coordinate axis of the plane.
///
/// The sweep advances along one axis (the *sweep axis*) while the
/// active sections are ordered along the other (the *transverse
/// axis*).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dim2 {
    X,
    Y,
}

impl Dim2 {
    /// The other axis.
    #[inline]
    pub fn other(self) -> Self {
        match self {
            Dim2::X => Dim2::Y,
            Dim2::Y => Dim2::X,
        }
    }

    /// The component of `c` along this axis.
    #[inline]
    pub fn of(self, c: Coord) -> f64 {
        match self {
            Dim2::X => c.x,
            Dim2::Y => c.y,
        }
    }
}

#[inline]
pub fn are_near(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

/// Whether two points are within euclidean distance `tol`.
#[inline]
pub fn are_near_points(a: Coord, b: Coord, tol: f64) -> bool {
    length(a - b) <= tol
}

#[inline]
pub fn length(v: Coord) -> f64 {
    v.x.hypot(v.y)
}

#[inline]
pub fn dot(a: Coord, b: Coord) -> f64 {
    a.x * b.x + a.y * b.y
}

/// Lexicographic "less than" of two points, comparing along `d` first
/// and then along the other axis.
#[inline]
pub fn lexo_point(a: Coord, b: Coord, d: Dim2) -> bool {
    lexo_cmp(a, b, d) == Ordering::Less
}

/// Lexicographic comparison of two points, comparing along `d` first.
///
/// Incomparable (`NaN`) components compare as equal; inputs are
/// checked for finiteness before any sweep begins.
pub fn lexo_cmp(a: Coord, b: Coord, d: Dim2) -> Ordering {
    let o = d.other();
    d.of(a)
        .partial_cmp(&d.of(b))
        .unwrap_or(Ordering::Equal)
        .then_with(|| o.of(a).partial_cmp(&o.of(b)).unwrap_or(Ordering::Equal))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexo_point() {
        let p = Coord { x: 0., y: 1. };
        let q = Coord { x: 1., y: 0. };
        assert!(lexo_point(p, q, Dim2::X));
        assert!(!lexo_point(q, p, Dim2::X));
        assert!(lexo_point(q, p, Dim2::Y));

        let r = Coord { x: 0., y: 2. };
        assert!(lexo_point(p, r, Dim2::X));
        assert!(!lexo_point(p, p, Dim2::X));
    }

    #[test]
    fn test_near() {
        assert!(are_near(1., 1. + 1e-7, EPSILON));
        assert!(!are_near(1., 1.1, EPSILON));
        assert!(are_near_points(
            Coord { x: 0., y: 0. },
            Coord { x: 3e-6, y: 4e-6 },
            5e-6
        ));
    }
}
