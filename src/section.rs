//! Monotonic sections of curves, the unit of work of the sweep.

use itertools::Itertools;
use log::trace;

use crate::{
    curve::Segment,
    interval::{Interval, Rect},
    path::{CurveIndex, Path},
    utils::{are_near, are_near_points, lexo_point, Coord, Dim2, EPSILON},
};

/// A sub-interval `[f, t]` of a curve that is monotonic along both
/// axes.
///
/// The end points are stored in sweep order: `fp` never comes after
/// `tp` lexicographically along the sweep axis. Hence `f > t` when the
/// curve runs against the sweep over this section.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub curve: CurveIndex,
    pub f: f64,
    pub t: f64,
    pub fp: Coord,
    pub tp: Coord,
    /// Winding contribution of each path to the region just before
    /// this section along the transverse axis. Filled in when the
    /// section is retired from the sweep.
    pub windings: Vec<i32>,
}

impl Section {
    /// The section of `curve` between `f` and `t`, with the end
    /// points swapped if needed to put them in sweep order along `d`.
    pub fn new(curve: CurveIndex, f: f64, t: f64, paths: &[Path], d: Dim2) -> Self {
        let seg = curve.curve(paths);
        Section::from_parts(curve, f, t, seg.point_at(f), seg.point_at(t), d)
    }

    pub fn from_parts(curve: CurveIndex, f: f64, t: f64, fp: Coord, tp: Coord, d: Dim2) -> Self {
        let (f, t, fp, tp) = if lexo_point(tp, fp, d) {
            (t, f, tp, fp)
        } else {
            (f, t, fp, tp)
        };
        Section {
            curve,
            f,
            t,
            fp,
            tp,
            windings: vec![],
        }
    }

    /// Box spanned by the end points; contains the section since it is
    /// monotonic.
    pub fn bbox(&self) -> Rect {
        Rect::from_points(self.fp, self.tp)
    }

    /// The parameter interval, ordered.
    pub fn param_range(&self) -> Interval {
        Interval::new(self.f, self.t)
    }

    /// `+1` if the curve runs along the sweep over this section, `-1`
    /// if against it, and `0` if the section is flat along the sweep
    /// axis.
    pub fn direction(&self, d: Dim2) -> i32 {
        if d.of(self.fp) == d.of(self.tp) {
            0
        } else if self.f < self.t {
            1
        } else if self.f > self.t {
            -1
        } else {
            0
        }
    }

    /// A section that covers no parameter range or no distance.
    pub fn is_degenerate(&self) -> bool {
        self.f == self.t || self.fp == self.tp
    }

    /// The sub-curve covered by this section, running from `fp` to
    /// `tp`.
    pub fn portion(&self, paths: &[Path]) -> Segment {
        self.curve.curve(paths).portion(self.f, self.t)
    }

    /// Whether both sections cover the same part of the same curve.
    pub fn same_geometry(&self, other: &Section) -> bool {
        self.curve == other.curve
            && ((are_near(self.f, other.f, EPSILON) && are_near(self.t, other.t, EPSILON))
                || (are_near(self.f, other.t, EPSILON) && are_near(self.t, other.f, EPSILON)))
    }
}

impl Section {
    /// Whether both sections trace the same points within `tol`: the
    /// same end points, and the middle of each lies on the other.
    /// Sections of different curves may coincide, e.g. an edge shared
    /// by two polygons.
    pub fn coincides(&self, other: &Section, paths: &[Path], tol: f64) -> bool {
        if self.same_geometry(other) {
            return true;
        }
        are_near_points(self.fp, other.fp, tol)
            && are_near_points(self.tp, other.tp, tol)
            && self.middle_lies_on(other, paths, tol)
            && other.middle_lies_on(self, paths, tol)
    }

    fn middle_lies_on(&self, other: &Section, paths: &[Path], tol: f64) -> bool {
        let p = self.curve.curve(paths).point_at((self.f + self.t) / 2.);
        let r = other.bbox();
        let d = if r.x().extent() >= r.y().extent() {
            Dim2::X
        } else {
            Dim2::Y
        };
        section_root(other, paths, d.of(p), d)
            .map_or(false, |t| are_near_points(other.curve.curve(paths).point_at(t), p, tol))
    }
}

/// Normalize a list of cut parameters for the range from `f` to `t`.
///
/// Cuts outside the closed range are dropped, `f` and `t` are added,
/// and near-duplicates (within [`EPSILON`]) are merged. The result
/// runs from `f` to `t`, so it is descending if `f > t`. Its first and
/// last entries are exactly `f` and `t`.
pub fn process_splits(splits: &mut Vec<f64>, f: f64, t: f64) {
    let (lo, hi) = if f <= t { (f, t) } else { (t, f) };
    splits.retain(|s| s.is_finite() && *s > lo && *s < hi);
    splits.push(lo);
    splits.push(hi);
    splits.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    splits.dedup_by(|a, b| are_near(*a, *b, EPSILON));
    if splits.len() < 2 {
        splits.clear();
        splits.push(lo);
        splits.push(hi);
    }
    if let Some(last) = splits.last_mut() {
        *last = hi;
    }
    if f > t {
        splits.reverse();
    }
}

/// Split every curve of `paths` into sections that are monotonic along
/// both axes, with end points in sweep order along `d`.
///
/// Curves are cut wherever the derivative vanishes along either axis.
/// Degenerate pieces, including whole curves collapsed to a point,
/// are not emitted.
pub fn mono_sections(paths: &[Path], d: Dim2) -> Vec<Section> {
    let mut monos = vec![];
    for (i, path) in paths.iter().enumerate() {
        for (j, seg) in path.segments().iter().enumerate() {
            let deriv = seg.derivative();
            let mut splits: Vec<f64> = deriv
                .roots(0., Dim2::X)
                .into_iter()
                .chain(deriv.roots(0., Dim2::Y))
                .collect();
            process_splits(&mut splits, 0., 1.);

            let curve = CurveIndex::new(i, j);
            for (f, t) in splits.into_iter().tuple_windows() {
                let section = Section::new(curve, f, t, paths, d);
                if section.is_degenerate() {
                    trace!("skipping degenerate section {:?}", section);
                    continue;
                }
                monos.push(section);
            }
        }
    }
    monos
}

/// Parameter within the section at which its curve reaches `v` along
/// `d`, if any.
pub fn section_root(s: &Section, paths: &[Path], v: f64, d: Dim2) -> Option<f64> {
    let range = s.param_range();
    s.curve
        .curve(paths)
        .roots(v, d)
        .into_iter()
        .find(|r| range.contains_with(*r, EPSILON))
        .map(|r| r.max(range.min()).min(range.max()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn c(x: f64, y: f64) -> Coord {
        Coord { x, y }
    }

    #[test]
    fn test_process_splits() {
        let mut s = vec![0.5, 0.2, 0.5 + 1e-9, 1.5, -0.1];
        process_splits(&mut s, 0., 1.);
        assert_eq!(s, vec![0., 0.2, 0.5, 1.]);

        let mut s = vec![0.3, 0.7];
        process_splits(&mut s, 0.8, 0.2);
        assert_eq!(s, vec![0.8, 0.7, 0.3, 0.2]);

        // a cut close to the end point collapses onto it
        let mut s = vec![1. - 1e-9];
        process_splits(&mut s, 0., 1.);
        assert_eq!(s, vec![0., 1.]);

        let mut s = vec![];
        process_splits(&mut s, 0.4, 0.4);
        assert_eq!(s, vec![0.4, 0.4]);
    }

    #[test]
    fn test_section_sweep_order() {
        let paths = vec![Path::from_segments(vec![Segment::line(c(3., 1.), c(0., 0.))])];
        let s = Section::new(CurveIndex::new(0, 0), 0., 1., &paths, Dim2::X);
        assert_eq!(s.fp, c(0., 0.));
        assert_eq!((s.f, s.t), (1., 0.));
        assert_eq!(s.direction(Dim2::X), -1);

        let s = Section::new(CurveIndex::new(0, 0), 0., 1., &paths, Dim2::Y);
        assert_eq!(s.fp, c(0., 0.));

        // the portion runs from fp to tp
        assert_eq!(s.portion(&paths).initial_point(), c(0., 0.));
    }

    #[test]
    fn test_mono_sections() {
        let paths = vec![
            Path::from_segments(vec![
                // one extremum in y
                Segment::quadratic(c(0., 0.), c(1., 2.), c(2., 0.)),
                // one in x, one in y
                Segment::cubic(c(0., 0.), c(3., 0.), c(3., 3.), c(0., 3.)),
            ]),
            // collapsed to a point
            Path::from_segments(vec![Segment::line(c(5., 5.), c(5., 5.))]),
        ];
        let monos = mono_sections(&paths, Dim2::X);
        assert_eq!(
            monos.iter().filter(|s| s.curve == CurveIndex::new(0, 0)).count(),
            2
        );
        assert_eq!(
            monos.iter().filter(|s| s.curve == CurveIndex::new(0, 1)).count(),
            2
        );
        assert!(monos.iter().all(|s| s.curve.path == 0));

        // every section is monotonic along the sweep axis
        for s in &monos {
            let seg = s.curve.curve(&paths);
            let mut prev = s.fp.x;
            for i in 1..=16 {
                let p = seg.point_at(s.f + (s.t - s.f) * i as f64 / 16.);
                assert!(p.x >= prev - 1e-12);
                prev = p.x;
            }
        }
    }

    #[test]
    fn test_coincides() {
        let paths = vec![
            Path::from_segments(vec![Segment::line(c(0., 0.), c(2., 2.))]),
            Path::from_segments(vec![Segment::line(c(2., 2.), c(0., 0.))]),
            // same end points, bulging away from the line
            Path::from_segments(vec![Segment::quadratic(c(0., 0.), c(2., 0.), c(2., 2.))]),
            // the line again, as a quadratic
            Path::from_segments(vec![Segment::quadratic(c(0., 0.), c(1., 1.), c(2., 2.))]),
        ];
        let s: Vec<_> = (0..paths.len())
            .map(|i| Section::new(CurveIndex::new(i, 0), 0., 1., &paths, Dim2::X))
            .collect();
        assert!(s[0].coincides(&s[1], &paths, 1e-6));
        assert!(s[1].coincides(&s[0], &paths, 1e-6));
        assert!(!s[0].coincides(&s[2], &paths, 1e-6));
        assert!(s[0].coincides(&s[3], &paths, 1e-6));
        assert!(!s[0].same_geometry(&s[1]));
    }

    #[test]
    fn test_section_root() {
        let paths = vec![Path::from_segments(vec![Segment::line(c(0., 0.), c(4., 4.))])];
        let s = Section::new(CurveIndex::new(0, 0), 0.25, 0.75, &paths, Dim2::X);
        assert_relative_eq!(section_root(&s, &paths, 2., Dim2::Y).unwrap(), 0.5);
        assert!(section_root(&s, &paths, 3.5, Dim2::Y).is_none());
    }
}
