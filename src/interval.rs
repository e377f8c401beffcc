//! Closed intervals and axis-aligned rectangles.

use geo::{line_intersection::line_intersection, Line};
use smallvec::SmallVec;

use crate::utils::{Coord, Dim2};

/// A closed interval `[min, max]`.
///
/// Zero-width intervals are legal and represent a single value. The
/// distinguished [`Interval::EMPTY`] contains nothing and is the
/// identity of [`Interval::union`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    min: f64,
    max: f64,
}

impl Interval {
    pub const EMPTY: Interval = Interval {
        min: f64::INFINITY,
        max: f64::NEG_INFINITY,
    };

    /// Interval spanning `a` and `b`, in either order.
    #[inline]
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Interval { min: a, max: b }
        } else {
            Interval { min: b, max: a }
        }
    }

    #[inline]
    pub fn from_point(v: f64) -> Self {
        Interval { min: v, max: v }
    }

    #[inline]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> f64 {
        self.max
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    /// Width of the interval; zero if empty.
    pub fn extent(&self) -> f64 {
        if self.is_empty() {
            0.
        } else {
            self.max - self.min
        }
    }

    pub fn middle(&self) -> f64 {
        (self.min + self.max) / 2.
    }

    #[inline]
    pub fn contains(&self, v: f64) -> bool {
        self.min <= v && v <= self.max
    }

    /// Containment with the interval widened by `tol` on both sides.
    #[inline]
    pub fn contains_with(&self, v: f64, tol: f64) -> bool {
        self.min - tol <= v && v <= self.max + tol
    }

    pub fn contains_interval(&self, other: &Interval) -> bool {
        other.is_empty() || (self.min <= other.min && other.max <= self.max)
    }

    #[inline]
    pub fn intersects(&self, other: &Interval) -> bool {
        !self.is_empty() && !other.is_empty() && self.min <= other.max && other.min <= self.max
    }

    pub fn intersection(&self, other: &Interval) -> Option<Interval> {
        if self.intersects(other) {
            Some(Interval {
                min: self.min.max(other.min),
                max: self.max.min(other.max),
            })
        } else {
            None
        }
    }

    pub fn union(&self, other: &Interval) -> Interval {
        Interval {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Grow the interval to include `v`.
    pub fn extend(&mut self, v: f64) {
        self.min = self.min.min(v);
        self.max = self.max.max(v);
    }

    pub fn expand_by(&self, amount: f64) -> Interval {
        if self.is_empty() {
            return *self;
        }
        Interval::new(self.min - amount, self.max + amount)
    }
}

impl Default for Interval {
    fn default() -> Self {
        Interval::EMPTY
    }
}

/// An axis-aligned rectangle, as a pair of [`Interval`]s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    x: Interval,
    y: Interval,
}

impl Rect {
    pub const EMPTY: Rect = Rect {
        x: Interval::EMPTY,
        y: Interval::EMPTY,
    };

    pub fn new(x: Interval, y: Interval) -> Self {
        Rect { x, y }
    }

    /// Smallest rectangle containing both points.
    pub fn from_points(a: Coord, b: Coord) -> Self {
        Rect {
            x: Interval::new(a.x, b.x),
            y: Interval::new(a.y, b.y),
        }
    }

    /// Smallest rectangle containing every point of `iter`.
    pub fn from_coords<I: IntoIterator<Item = Coord>>(iter: I) -> Self {
        let mut rect = Rect::EMPTY;
        for c in iter {
            rect.extend(c);
        }
        rect
    }

    /// The interval spanned along `d`.
    #[inline]
    pub fn index(&self, d: Dim2) -> Interval {
        match d {
            Dim2::X => self.x,
            Dim2::Y => self.y,
        }
    }

    #[inline]
    pub fn x(&self) -> Interval {
        self.x
    }

    #[inline]
    pub fn y(&self) -> Interval {
        self.y
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty() || self.y.is_empty()
    }

    pub fn min(&self) -> Coord {
        Coord {
            x: self.x.min(),
            y: self.y.min(),
        }
    }

    pub fn max(&self) -> Coord {
        Coord {
            x: self.x.max(),
            y: self.y.max(),
        }
    }

    /// Larger of the two side lengths.
    pub fn max_extent(&self) -> f64 {
        self.x.extent().max(self.y.extent())
    }

    /// The `i`-th corner, counting counter-clockwise from the minimum
    /// corner (assuming y points up). Indices wrap around modulo 4.
    pub fn corner(&self, i: usize) -> Coord {
        match i % 4 {
            0 => Coord {
                x: self.x.min(),
                y: self.y.min(),
            },
            1 => Coord {
                x: self.x.max(),
                y: self.y.min(),
            },
            2 => Coord {
                x: self.x.max(),
                y: self.y.max(),
            },
            _ => Coord {
                x: self.x.min(),
                y: self.y.max(),
            },
        }
    }

    pub fn extend(&mut self, c: Coord) {
        self.x.extend(c.x);
        self.y.extend(c.y);
    }

    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            x: self.x.union(&other.x),
            y: self.y.union(&other.y),
        }
    }

    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        Some(Rect {
            x: self.x.intersection(&other.x)?,
            y: self.y.intersection(&other.y)?,
        })
    }

    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x.intersects(&other.x) && self.y.intersects(&other.y)
    }

    #[inline]
    pub fn contains(&self, c: Coord) -> bool {
        self.x.contains(c.x) && self.y.contains(c.y)
    }

    pub fn contains_rect(&self, other: &Rect) -> bool {
        self.x.contains_interval(&other.x) && self.y.contains_interval(&other.y)
    }

    pub fn expand_by(&self, amount: f64) -> Rect {
        Rect {
            x: self.x.expand_by(amount),
            y: self.y.expand_by(amount),
        }
    }

    /// Indices of the edges crossed or touched by `line`.
    ///
    /// Edge `i` runs from `corner(i)` to `corner(i + 1)`. A line
    /// through a corner reports both edges meeting there.
    pub fn crossed_edges(&self, line: Line<f64>) -> SmallVec<[usize; 4]> {
        let mut edges = SmallVec::new();
        if self.is_empty() {
            return edges;
        }
        for i in 0..4 {
            let edge = Line::new(self.corner(i), self.corner(i + 1));
            if line_intersection(edge, line).is_some() {
                edges.push(i);
            }
        }
        edges
    }
}

impl Default for Rect {
    fn default() -> Self {
        Rect::EMPTY
    }
}

impl From<geo::Rect<f64>> for Rect {
    fn from(r: geo::Rect<f64>) -> Self {
        Rect::from_points(r.min(), r.max())
    }
}
