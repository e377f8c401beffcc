//! Crossings between two monotonic curve restrictions.

use geo::{
    line_intersection::{line_intersection, LineIntersection},
    Line,
};
use log::trace;

use crate::{
    curve::Segment,
    interval::{Interval, Rect},
    utils::{are_near, are_near_points, dot, length, Coord, EPSILON},
};

/// Bisection depth limit; `2^-40` of the parameter span is far below
/// any useful tolerance.
const MAX_DEPTH: usize = 40;

/// Newton iterations polishing a crossing found by bisection.
const NEWTON_STEPS: usize = 12;

/// A crossing of two curves: parameter `ta` on the first, `tb` on the
/// second, and the (averaged) location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossing {
    pub ta: f64,
    pub tb: f64,
    pub point: Coord,
}

/// Crossings of `a` restricted to `a_range` with `b` restricted to
/// `b_range`, ordered by `ta`.
///
/// Both restrictions must be monotonic in both coordinates: the box
/// spanned by the end points of any sub-range then contains the curve
/// over that sub-range, which is what the bisection relies on. Points
/// closer than `tol` are considered to touch. Collinear or coincident
/// stretches report their two end points.
pub fn mono_intersect(
    a: &Segment,
    a_range: Interval,
    b: &Segment,
    b_range: Interval,
    tol: f64,
) -> Vec<Crossing> {
    if a_range.is_empty() || b_range.is_empty() {
        return vec![];
    }
    let xs = match (a, b) {
        (Segment::Line(la), Segment::Line(lb)) => line_crossings(*la, a_range, *lb, b_range, tol),
        _ => {
            let mut leaves = vec![];
            bisect(
                a,
                (a_range.min(), a_range.max()),
                b,
                (b_range.min(), b_range.max()),
                tol,
                0,
                &mut leaves,
            );
            let mut xs: Vec<Crossing> = cluster(leaves, tol)
                .into_iter()
                .map(|x| refine(a, a_range, b, b_range, x, tol))
                .collect();
            xs.sort_by(|x, y| x.ta.partial_cmp(&y.ta).unwrap_or(std::cmp::Ordering::Equal));
            xs.dedup_by(|x, y| are_near_points(x.point, y.point, tol));
            xs
        }
    };
    if !xs.is_empty() {
        trace!("mono_intersect: {} crossings: {:?}", xs.len(), xs);
    }
    xs
}

/// Parameter of the projection of `p` on the infinite line through `l`.
fn line_param(l: Line<f64>, p: Coord) -> f64 {
    let d = l.end - l.start;
    let len2 = dot(d, d);
    if len2 == 0. {
        0.
    } else {
        dot(p - l.start, d) / len2
    }
}

fn clamp(v: f64, range: Interval) -> f64 {
    v.max(range.min()).min(range.max())
}

fn point_segment_distance(p: Coord, l: Line<f64>) -> f64 {
    let t = line_param(l, p).max(0.).min(1.);
    length(p - (l.start + (l.end - l.start) * t))
}

fn line_crossings(
    la: Line<f64>,
    a_range: Interval,
    lb: Line<f64>,
    b_range: Interval,
    tol: f64,
) -> Vec<Crossing> {
    let lerp = |l: Line<f64>, t: f64| l.start + (l.end - l.start) * t;
    let sub_a = Line::new(lerp(la, a_range.min()), lerp(la, a_range.max()));
    let sub_b = Line::new(lerp(lb, b_range.min()), lerp(lb, b_range.max()));

    let at = |p: Coord| Crossing {
        ta: clamp(line_param(la, p), a_range),
        tb: clamp(line_param(lb, p), b_range),
        point: p,
    };

    let mut xs: Vec<Crossing> = match line_intersection(sub_a, sub_b) {
        Some(LineIntersection::SinglePoint { intersection, .. }) => vec![at(intersection)],
        Some(LineIntersection::Collinear { intersection }) => {
            if intersection.start == intersection.end {
                vec![at(intersection.start)]
            } else {
                vec![at(intersection.start), at(intersection.end)]
            }
        }
        None => {
            // Near misses: an end point within `tol` of the other line.
            let mut near = vec![];
            for &p in &[sub_a.start, sub_a.end] {
                if point_segment_distance(p, sub_b) <= tol {
                    near.push(at(p));
                }
            }
            for &p in &[sub_b.start, sub_b.end] {
                if point_segment_distance(p, sub_a) <= tol {
                    near.push(at(p));
                }
            }
            near
        }
    };
    xs.sort_by(|x, y| x.ta.partial_cmp(&y.ta).unwrap_or(std::cmp::Ordering::Equal));
    xs.dedup_by(|x, y| are_near_points(x.point, y.point, tol));
    xs
}

fn bisect(
    a: &Segment,
    (a0, a1): (f64, f64),
    b: &Segment,
    (b0, b1): (f64, f64),
    tol: f64,
    depth: usize,
    out: &mut Vec<Crossing>,
) {
    let (pa0, pa1) = (a.point_at(a0), a.point_at(a1));
    let (pb0, pb1) = (b.point_at(b0), b.point_at(b1));
    let ra = Rect::from_points(pa0, pa1);
    let rb = Rect::from_points(pb0, pb1);
    if !ra.expand_by(tol / 2.).intersects(&rb.expand_by(tol / 2.)) {
        return;
    }

    let (ea, eb) = (ra.max_extent(), rb.max_extent());
    if (ea <= tol && eb <= tol) || depth >= MAX_DEPTH {
        let (ta, tb) = ((a0 + a1) / 2., (b0 + b1) / 2.);
        let (pa, pb) = (a.point_at(ta), b.point_at(tb));
        out.push(Crossing {
            ta,
            tb,
            point: (pa + pb) / 2.,
        });
        return;
    }

    let am = (a0 + a1) / 2.;
    let bm = (b0 + b1) / 2.;
    if ea > tol && eb > tol {
        bisect(a, (a0, am), b, (b0, bm), tol, depth + 1, out);
        bisect(a, (a0, am), b, (bm, b1), tol, depth + 1, out);
        bisect(a, (am, a1), b, (b0, bm), tol, depth + 1, out);
        bisect(a, (am, a1), b, (bm, b1), tol, depth + 1, out);
    } else if ea > tol {
        bisect(a, (a0, am), b, (b0, b1), tol, depth + 1, out);
        bisect(a, (am, a1), b, (b0, b1), tol, depth + 1, out);
    } else {
        bisect(a, (a0, a1), b, (b0, bm), tol, depth + 1, out);
        bisect(a, (a0, a1), b, (bm, b1), tol, depth + 1, out);
    }
}

/// Polish a crossing with Newton's method on `a(ta) - b(tb)`, so that
/// both curves are cut at the same point rather than somewhere within
/// `tol` of it. Parameters within [`EPSILON`] of a range end are
/// snapped to it.
///
/// Where the curves are tangent the system is singular, and the
/// crossing is returned as found.
fn refine(a: &Segment, a_range: Interval, b: &Segment, b_range: Interval, x: Crossing, tol: f64) -> Crossing {
    let (da, db) = (a.derivative(), b.derivative());
    let (mut ta, mut tb) = (x.ta, x.tb);
    for _ in 0..NEWTON_STEPS {
        let r = a.point_at(ta) - b.point_at(tb);
        let (ja, jb) = (da.point_at(ta), db.point_at(tb));
        // solve ja * dta - jb * dtb = -r
        let det = jb.x * ja.y - ja.x * jb.y;
        if det.abs() <= 1e-9 * length(ja) * length(jb) {
            return x;
        }
        let dta = (r.x * jb.y - jb.x * r.y) / det;
        let dtb = (r.x * ja.y - ja.x * r.y) / det;
        if !(dta.is_finite() && dtb.is_finite()) {
            return x;
        }
        ta += dta;
        tb += dtb;
        if dta.abs() + dtb.abs() <= f64::EPSILON {
            break;
        }
    }

    let ta = snap(clamp(ta, a_range), a_range);
    let tb = snap(clamp(tb, b_range), b_range);
    let (pa, pb) = (a.point_at(ta), b.point_at(tb));
    if !are_near_points(pa, pb, tol) {
        return x;
    }
    Crossing {
        ta,
        tb,
        point: (pa + pb) / 2.,
    }
}

fn snap(t: f64, range: Interval) -> f64 {
    if are_near(t, range.min(), EPSILON) {
        range.min()
    } else if are_near(t, range.max(), EPSILON) {
        range.max()
    } else {
        t
    }
}

/// Merge the bisection leaves into crossings. Leaves chained at most
/// a few `tol` apart form one cluster. A short cluster is one
/// crossing; a longer one is a coincident stretch and reports its two
/// ends.
fn cluster(mut leaves: Vec<Crossing>, tol: f64) -> Vec<Crossing> {
    let reach = 4. * tol;
    leaves.sort_by(|x, y| x.ta.partial_cmp(&y.ta).unwrap_or(std::cmp::Ordering::Equal));

    let mut xs = vec![];
    let mut i = 0;
    while i < leaves.len() {
        let mut j = i + 1;
        while j < leaves.len() && are_near_points(leaves[j - 1].point, leaves[j].point, reach) {
            j += 1;
        }
        let (first, last) = (leaves[i], leaves[j - 1]);
        if are_near_points(first.point, last.point, 2. * reach) {
            xs.push(leaves[(i + j - 1) / 2]);
        } else {
            xs.push(first);
            xs.push(last);
        }
        i = j;
    }
    xs
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn c(x: f64, y: f64) -> Coord {
        Coord { x, y }
    }

    const TOL: f64 = 1e-6;

    #[test]
    fn test_lines_cross() {
        let a = Segment::line(c(0., 0.), c(10., 10.));
        let b = Segment::line(c(0., 10.), c(10., 0.));
        let xs = mono_intersect(&a, Interval::new(0., 1.), &b, Interval::new(0., 1.), TOL);
        assert_eq!(xs.len(), 1);
        assert_relative_eq!(xs[0].ta, 0.5);
        assert_relative_eq!(xs[0].tb, 0.5);
        assert_relative_eq!(xs[0].point.x, 5.);

        // restricting `a` to its first half excludes the crossing
        let xs = mono_intersect(&a, Interval::new(0., 0.4), &b, Interval::new(0., 1.), TOL);
        assert!(xs.is_empty());
    }

    #[test]
    fn test_lines_collinear() {
        let a = Segment::line(c(0., 0.), c(4., 0.));
        let b = Segment::line(c(2., 0.), c(6., 0.));
        let xs = mono_intersect(&a, Interval::new(0., 1.), &b, Interval::new(0., 1.), TOL);
        assert_eq!(xs.len(), 2);
        assert_relative_eq!(xs[0].ta, 0.5);
        assert_relative_eq!(xs[0].tb, 0.);
        assert_relative_eq!(xs[1].ta, 1.);
        assert_relative_eq!(xs[1].tb, 0.5);
    }

    #[test]
    fn test_lines_near_miss() {
        let a = Segment::line(c(0., 0.), c(4., 0.));
        let b = Segment::line(c(2., 1e-8), c(2., 3.));
        let xs = mono_intersect(&a, Interval::new(0., 1.), &b, Interval::new(0., 1.), TOL);
        assert_eq!(xs.len(), 1);
        assert_relative_eq!(xs[0].ta, 0.5);
        assert_relative_eq!(xs[0].tb, 0.);
    }

    #[test]
    fn test_curve_line() {
        // monotonic quarter of a quadratic arc crossing a diagonal
        let q = Segment::quadratic(c(0., 0.), c(0., 2.), c(2., 2.));
        let l = Segment::line(c(0., 2.), c(2., 0.));
        let xs = mono_intersect(&q, Interval::new(0., 1.), &l, Interval::new(0., 1.), TOL);
        assert_eq!(xs.len(), 1);
        let p = q.point_at(xs[0].ta);
        assert_relative_eq!(p.x + p.y, 2., epsilon = 1e-5);
        let p = l.point_at(xs[0].tb);
        assert_relative_eq!(p.x + p.y, 2., epsilon = 1e-5);
    }

    #[test]
    fn test_curves_cross_precisely() {
        // quarter arcs of two unit circles, centred at the origin and
        // at (1, 0), meeting at (1/2, sqrt(3)/2)
        const K: f64 = 0.552_284_749_830_793_4;
        let a = Segment::cubic(c(1., 0.), c(1., K), c(K, 1.), c(0., 1.));
        let b = Segment::cubic(c(0., 0.), c(0., K), c(1. - K, 1.), c(1., 1.));
        let tol = 1e-5;
        let xs = mono_intersect(&a, Interval::new(0., 1.), &b, Interval::new(0., 1.), tol);
        assert_eq!(xs.len(), 1);
        let (pa, pb) = (a.point_at(xs[0].ta), b.point_at(xs[0].tb));
        // far closer than the tolerance the bisection stops at
        assert!(are_near_points(pa, pb, 1e-10));
        assert_relative_eq!(pa.x, 0.5, epsilon = 1e-3);
        assert_relative_eq!(pa.y, 0.866, epsilon = 1e-3);
    }

    #[test]
    fn test_shared_end_point_snaps() {
        // a curve and a line closing it, touching only at their ends
        let q = Segment::quadratic(c(0., 0.), c(0., 2.), c(2., 2.));
        let l = Segment::line(c(2., 2.), c(0., 0.));
        let xs = mono_intersect(&q, Interval::new(0., 1.), &l, Interval::new(0., 1.), 1e-5);
        assert!(!xs.is_empty());
        for x in &xs {
            assert!(x.ta == 0. || x.ta == 1., "{:?}", x);
            assert!(x.tb == 0. || x.tb == 1., "{:?}", x);
        }
    }

    #[test]
    fn test_curves_disjoint() {
        let a = Segment::cubic(c(0., 0.), c(1., 0.), c(2., 1.), c(3., 3.));
        let b = Segment::cubic(c(0., 1.), c(1., 1.), c(2., 2.), c(3., 4.));
        let xs = mono_intersect(&a, Interval::new(0., 1.), &b, Interval::new(0., 1.), TOL);
        assert!(xs.is_empty());
    }
}
