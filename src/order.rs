//! Orderings of sections used by the sweep.

use std::cmp::Ordering;

use crate::{
    path::Path,
    section::{section_root, Section},
    utils::{are_near, lexo_cmp, lexo_point, Dim2},
};

/// Largest parameter offset used to sample past the start of a
/// section.
const SAMPLE_OFFSET: f64 = 0.01;

/// Orders sections along the transverse axis `dim`, i.e. bottom to top
/// across the sweep line when sweeping along `x`.
///
/// The order is only meaningful between sections that are active at
/// the same time. It is heuristic near tangencies: when two sections
/// meet at a point with matching tangents it may fail to be
/// transitive.
#[derive(Debug, Clone, Copy)]
pub struct SectionSorter<'a> {
    paths: &'a [Path],
    dim: Dim2,
    tol: f64,
}

impl<'a> SectionSorter<'a> {
    /// Sorter for the transverse axis `dim`.
    pub fn new(paths: &'a [Path], dim: Dim2, tol: f64) -> Self {
        SectionSorter { paths, dim, tol }
    }

    /// Whether `a` comes strictly before `b`.
    pub fn less(&self, a: &Section, b: &Section) -> bool {
        if std::ptr::eq(a, b) {
            return false;
        }
        let dim = self.dim;
        let sweep = dim.other();
        let (ra, rb) = (a.bbox(), b.bbox());

        // Both hold for sections flat at the same transverse coordinate.
        let a_below = ra.index(dim).max() <= rb.index(dim).min();
        let b_below = rb.index(dim).max() <= ra.index(dim).min();
        if a_below != b_below {
            return a_below;
        }

        if ra.index(sweep).intersects(&rb.index(sweep)) {
            let (af, bf) = (sweep.of(a.fp), sweep.of(b.fp));
            if are_near(af, bf, self.tol) {
                return self.section_order(a, nudge(a), b, nudge(b));
            } else if af < bf {
                // b starts within a's span
                let ta = section_root(a, self.paths, bf, sweep).unwrap_or((a.f + a.t) / 2.);
                return self.section_order(a, ta, b, b.f);
            } else {
                let tb = section_root(b, self.paths, af, sweep).unwrap_or((b.f + b.t) / 2.);
                return self.section_order(a, a.f, b, tb);
            }
        }

        lexo_point(a.fp, b.fp, dim)
    }

    /// [`Self::less`], with ties between sections that neither precedes
    /// (coincident ones) broken by their keys `ka` and `kb`.
    pub fn less_keyed(&self, a: &Section, ka: usize, b: &Section, kb: usize) -> bool {
        if self.less(a, b) {
            return true;
        }
        ka < kb && !self.less(b, a)
    }

    /// Three-way comparison built from [`Self::less`].
    pub fn compare(&self, a: &Section, b: &Section) -> Ordering {
        if self.less(a, b) {
            Ordering::Less
        } else if self.less(b, a) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }

    /// Compare `a` at parameter `at` with `b` at `bt`.
    fn section_order(&self, a: &Section, at: f64, b: &Section, bt: f64) -> bool {
        let dim = self.dim;
        let ca = a.curve.curve(self.paths);
        let cb = b.curve.curve(self.paths);
        let (ap, bp) = (ca.point_at(at), cb.point_at(bt));

        if !are_near(dim.of(ap), dim.of(bp), self.tol) {
            return dim.of(ap) < dim.of(bp);
        }

        // Monotonic sections that meet here and end on opposite sides
        // are ordered by where they end.
        if dim.of(a.tp) < dim.of(ap) && dim.of(b.tp) > dim.of(bp) {
            return true;
        }
        if dim.of(a.tp) > dim.of(ap) && dim.of(b.tp) < dim.of(bp) {
            return false;
        }

        // TODO: compare curvature when the unit tangents agree.
        // tangents pointing from `fp` towards `tp`
        let mut ad = ca.unit_tangent_at(a.f);
        let mut bd = cb.unit_tangent_at(b.f);
        if a.f > a.t {
            ad = -ad;
        }
        if b.f > b.t {
            bd = -bd;
        }
        dim.of(ad) < dim.of(bd)
    }
}

/// A parameter slightly past the start of the section.
fn nudge(s: &Section) -> f64 {
    let off = SAMPLE_OFFSET.min((s.t - s.f).abs() / 2.);
    if s.f > s.t {
        s.f - off
    } else {
        s.f + off
    }
}

/// Orders sections by their starting point, lexicographically along the
/// sweep axis.
#[derive(Debug, Clone, Copy)]
pub struct SweepSorter {
    dim: Dim2,
}

impl SweepSorter {
    pub fn new(dim: Dim2) -> Self {
        SweepSorter { dim }
    }

    pub fn compare(&self, a: &Section, b: &Section) -> Ordering {
        lexo_cmp(a.fp, b.fp, self.dim)
    }

    pub fn less(&self, a: &Section, b: &Section) -> bool {
        lexo_point(a.fp, b.fp, self.dim)
    }
}
