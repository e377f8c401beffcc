//! Curve segments consumed by the sweep.
//!
//! The sweep only needs a handful of queries from a curve: evaluation,
//! the derivative curve, axis-aligned roots, tangents, a fast bounding
//! box and sub-curve extraction. [`Segment`] provides these for line
//! segments, quadratic and cubic béziers.

mod bezier;
pub use bezier::{CubicBezier, QuadraticBezier};

pub(crate) mod roots;
use roots::{unit_roots, Roots};

use geo::Line;
use smallvec::SmallVec;

use crate::{
    interval::Rect,
    utils::{length, Coord, Dim2},
};

/// A single curve of a [`Path`](crate::Path).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    Line(Line<f64>),
    Quadratic(QuadraticBezier),
    Cubic(CubicBezier),
}

impl From<Line<f64>> for Segment {
    fn from(l: Line<f64>) -> Self {
        Segment::Line(l)
    }
}

impl From<QuadraticBezier> for Segment {
    fn from(q: QuadraticBezier) -> Self {
        Segment::Quadratic(q)
    }
}

impl From<CubicBezier> for Segment {
    fn from(c: CubicBezier) -> Self {
        Segment::Cubic(c)
    }
}

impl Segment {
    pub fn line(from: Coord, to: Coord) -> Self {
        Segment::Line(Line::new(from, to))
    }

    pub fn quadratic(from: Coord, ctrl: Coord, to: Coord) -> Self {
        Segment::Quadratic(QuadraticBezier::new(from, ctrl, to))
    }

    pub fn cubic(from: Coord, ctrl1: Coord, ctrl2: Coord, to: Coord) -> Self {
        Segment::Cubic(CubicBezier::new(from, ctrl1, ctrl2, to))
    }

    pub fn initial_point(&self) -> Coord {
        match self {
            Segment::Line(l) => l.start,
            Segment::Quadratic(q) => q.from,
            Segment::Cubic(c) => c.from,
        }
    }

    pub fn final_point(&self) -> Coord {
        match self {
            Segment::Line(l) => l.end,
            Segment::Quadratic(q) => q.to,
            Segment::Cubic(c) => c.to,
        }
    }

    /// Control points, start and end included.
    pub fn control_points(&self) -> SmallVec<[Coord; 4]> {
        match self {
            Segment::Line(l) => SmallVec::from_slice(&[l.start, l.end]),
            Segment::Quadratic(q) => SmallVec::from_slice(&[q.from, q.ctrl, q.to]),
            Segment::Cubic(c) => SmallVec::from_slice(&[c.from, c.ctrl1, c.ctrl2, c.to]),
        }
    }

    pub fn point_at(&self, t: f64) -> Coord {
        match self {
            Segment::Line(l) => l.start + (l.end - l.start) * t,
            Segment::Quadratic(q) => q.sample(t),
            Segment::Cubic(c) => c.sample(t),
        }
    }

    /// The derivative curve, one degree lower. The derivative of a line
    /// segment is a constant, represented as a zero-length line.
    pub fn derivative(&self) -> Segment {
        match self {
            Segment::Line(l) => {
                let d = l.end - l.start;
                Segment::line(d, d)
            }
            Segment::Quadratic(q) => Segment::line((q.ctrl - q.from) * 2., (q.to - q.ctrl) * 2.),
            Segment::Cubic(c) => Segment::Quadratic(c.hodograph()),
        }
    }

    /// Power-basis coefficients of the coordinate along `d`, lowest
    /// degree first.
    pub fn coefficients(&self, d: Dim2) -> SmallVec<[f64; 4]> {
        match self {
            Segment::Line(l) => {
                let (a, b) = (d.of(l.start), d.of(l.end));
                SmallVec::from_slice(&[a, b - a])
            }
            Segment::Quadratic(q) => SmallVec::from_slice(&QuadraticBezier::coefficients(
                d.of(q.from),
                d.of(q.ctrl),
                d.of(q.to),
            )),
            Segment::Cubic(c) => SmallVec::from_slice(&CubicBezier::coefficients(
                d.of(c.from),
                d.of(c.ctrl1),
                d.of(c.ctrl2),
                d.of(c.to),
            )),
        }
    }

    /// Parameters in `[0, 1]`, increasing, at which the coordinate
    /// along `d` equals `value`. A curve that is constant along `d` has
    /// no roots.
    pub fn roots(&self, value: f64, d: Dim2) -> Roots {
        let mut coeffs = self.coefficients(d);
        coeffs[0] -= value;
        unit_roots(&coeffs)
    }

    /// Unit tangent at `t`.
    ///
    /// Where the first derivative vanishes, the first non-vanishing
    /// higher derivative gives the direction (negated for even orders
    /// past the middle of the curve). Falls back to the chord, and to
    /// the zero vector for a curve collapsed to a point.
    pub fn unit_tangent_at(&self, t: f64) -> Coord {
        const TINY: f64 = 1e-12;

        let mut deriv = self.derivative();
        for order in 1..=3 {
            let v = deriv.point_at(t);
            let len = length(v);
            if len > TINY {
                let v = v / len;
                return if order % 2 == 0 && t > 0.5 { -v } else { v };
            }
            deriv = deriv.derivative();
        }
        let chord = self.final_point() - self.initial_point();
        let len = length(chord);
        if len > TINY {
            chord / len
        } else {
            Coord { x: 0., y: 0. }
        }
    }

    /// Bounding box of the control polygon; contains the curve.
    pub fn bounds_fast(&self) -> Rect {
        Rect::from_coords(self.control_points())
    }

    /// The sub-curve between parameters `from` and `to`. If `from > to`
    /// the result runs backwards.
    pub fn portion(&self, from: f64, to: f64) -> Segment {
        match self {
            Segment::Line(_) => Segment::line(self.point_at(from), self.point_at(to)),
            Segment::Quadratic(q) => Segment::Quadratic(q.split_range(from, to)),
            Segment::Cubic(c) => Segment::Cubic(c.split_range(from, to)),
        }
    }

    pub fn reverse(&self) -> Segment {
        match self {
            Segment::Line(l) => Segment::line(l.end, l.start),
            Segment::Quadratic(q) => Segment::Quadratic(q.flip()),
            Segment::Cubic(c) => Segment::Cubic(c.flip()),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.control_points()
            .iter()
            .all(|c| c.x.is_finite() && c.y.is_finite())
    }
}
