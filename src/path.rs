//! Paths: ordered sequences of curve segments.

use std::fmt;

use geo::{algorithm::area::Area, LineString, Polygon};

use crate::{
    curve::Segment,
    interval::Rect,
    utils::{are_near_points, Coord},
};

/// How [`Path::append`] treats a segment that does not start where the
/// path currently ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stitch {
    /// Insert a connecting line segment across the gap.
    Discontinuous,
    /// Append as-is.
    Continuous,
}

/// An ordered sequence of curve segments.
///
/// The segments are expected to be end-to-end, but this is not
/// enforced; the sweep treats every segment independently.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn from_segments(segments: Vec<Segment>) -> Self {
        Path { segments }
    }

    /// A path of line segments through `points`. Repeated consecutive
    /// points are skipped. If `closed`, a closing segment back to the
    /// first point is added unless the points already end there.
    pub fn from_polyline(points: &[Coord], closed: bool) -> Self {
        let mut segments = vec![];
        for w in points.windows(2) {
            if w[0] != w[1] {
                segments.push(Segment::line(w[0], w[1]));
            }
        }
        if closed && points.len() > 2 {
            let (first, last) = (points[0], points[points.len() - 1]);
            if first != last {
                segments.push(Segment::line(last, first));
            }
        }
        Path { segments }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[inline]
    pub fn get(&self, ix: usize) -> Option<&Segment> {
        self.segments.get(ix)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    pub fn initial_point(&self) -> Option<Coord> {
        self.segments.first().map(|s| s.initial_point())
    }

    pub fn final_point(&self) -> Option<Coord> {
        self.segments.last().map(|s| s.final_point())
    }

    /// Append a segment. With [`Stitch::Discontinuous`], a gap larger
    /// than `tol` between the current end and the new segment is
    /// bridged by a line.
    pub fn append(&mut self, segment: Segment, stitch: Stitch, tol: f64) {
        if let (Stitch::Discontinuous, Some(end)) = (stitch, self.final_point()) {
            let start = segment.initial_point();
            if !are_near_points(end, start, tol) {
                self.segments.push(Segment::line(end, start));
            }
        }
        self.segments.push(segment);
    }

    /// Whether the path is non-empty and ends within `tol` of where it
    /// starts.
    pub fn is_closed(&self, tol: f64) -> bool {
        match (self.initial_point(), self.final_point()) {
            (Some(a), Some(b)) => are_near_points(a, b, tol),
            _ => false,
        }
    }

    pub fn reverse(&self) -> Path {
        Path {
            segments: self.segments.iter().rev().map(|s| s.reverse()).collect(),
        }
    }

    pub fn bounds_fast(&self) -> Rect {
        self.segments
            .iter()
            .fold(Rect::EMPTY, |r, s| r.union(&s.bounds_fast()))
    }

    /// Approximate the path by a polyline. Line segments contribute
    /// their end points; curves are sampled `samples` times each.
    pub fn flatten(&self, samples: usize) -> LineString<f64> {
        let samples = samples.max(1);
        let mut coords = vec![];
        if let Some(p) = self.initial_point() {
            coords.push(p);
        }
        for seg in &self.segments {
            match seg {
                Segment::Line(l) => coords.push(l.end),
                _ => {
                    for i in 1..=samples {
                        coords.push(seg.point_at(i as f64 / samples as f64));
                    }
                }
            }
        }
        coords.dedup();
        LineString(coords)
    }

    /// Signed area enclosed by the flattened path, positive when it
    /// runs counter-clockwise.
    pub fn signed_area(&self) -> f64 {
        Polygon::new(self.flatten(16), vec![]).signed_area()
    }
}

impl From<&LineString<f64>> for Path {
    fn from(ls: &LineString<f64>) -> Self {
        Path::from_polyline(&ls.0, false)
    }
}

impl From<Vec<Segment>> for Path {
    fn from(segments: Vec<Segment>) -> Self {
        Path { segments }
    }
}

/// The rings of a polygon as closed paths: the exterior first, then
/// the interiors.
pub fn paths_from_polygon(poly: &Polygon<f64>) -> Vec<Path> {
    std::iter::once(poly.exterior())
        .chain(poly.interiors())
        .filter(|ring| ring.0.len() > 1)
        .map(|ring| Path::from_polyline(&ring.0, true))
        .collect()
}

/// Identifies a curve as `(path index, index within the path)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CurveIndex {
    pub path: usize,
    pub ix: usize,
}

impl CurveIndex {
    pub fn new(path: usize, ix: usize) -> Self {
        CurveIndex { path, ix }
    }

    pub fn get<'a>(&self, paths: &'a [Path]) -> Option<&'a Segment> {
        paths.get(self.path).and_then(|p| p.get(self.ix))
    }

    /// The referenced curve.
    ///
    /// # Panics
    ///
    /// If the index does not exist in `paths`. Indices handed out by a
    /// graph are valid for the paths the graph was built from.
    pub fn curve<'a>(&self, paths: &'a [Path]) -> &'a Segment {
        match self.get(paths) {
            Some(s) => s,
            None => panic!("curve index {} out of bounds", self),
        }
    }
}

impl fmt::Display for CurveIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path, self.ix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use geo::{line_string, polygon};

    #[test]
    fn test_polyline() {
        let pts = [
            Coord { x: 0., y: 0. },
            Coord { x: 1., y: 0. },
            Coord { x: 1., y: 0. },
            Coord { x: 1., y: 1. },
        ];
        let open = Path::from_polyline(&pts, false);
        assert_eq!(open.len(), 2);
        assert!(!open.is_closed(1e-9));

        let closed = Path::from_polyline(&pts, true);
        assert_eq!(closed.len(), 3);
        assert!(closed.is_closed(1e-9));
        assert_relative_eq!(closed.signed_area(), 0.5);
        assert_relative_eq!(closed.reverse().signed_area(), -0.5);
    }

    #[test]
    fn test_from_geo() {
        let ls = line_string![(x: 0., y: 0.), (x: 2., y: 0.), (x: 2., y: 2.), (x: 0., y: 0.)];
        let path = Path::from(&ls);
        assert_eq!(path.len(), 3);
        assert!(path.is_closed(0.));

        let poly = polygon!(
            exterior: [(x: 0., y: 0.), (x: 4., y: 0.), (x: 4., y: 4.), (x: 0., y: 4.)],
            interiors: [[(x: 1., y: 1.), (x: 1., y: 2.), (x: 2., y: 2.), (x: 2., y: 1.)]],
        );
        let paths = paths_from_polygon(&poly);
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].len(), 4);
        assert_relative_eq!(paths[0].signed_area(), 16.);
        assert_relative_eq!(paths[1].signed_area(), -1.);
    }

    #[test]
    fn test_append_stitches_gaps() {
        let mut path = Path::new();
        let a = Segment::line(Coord { x: 0., y: 0. }, Coord { x: 1., y: 0. });
        let b = Segment::line(Coord { x: 1., y: 1. }, Coord { x: 0., y: 1. });
        path.append(a, Stitch::Discontinuous, 1e-6);
        path.append(b, Stitch::Discontinuous, 1e-6);
        assert_eq!(path.len(), 3);
        assert_eq!(path.get(1).map(|s| s.initial_point()), Some(Coord { x: 1., y: 0. }));

        path.append(a, Stitch::Continuous, 1e-6);
        assert_eq!(path.len(), 4);
    }

    #[test]
    fn test_curve_index() {
        let paths = vec![Path::from_polyline(
            &[Coord { x: 0., y: 0. }, Coord { x: 1., y: 0. }],
            false,
        )];
        assert!(CurveIndex::new(0, 0).get(&paths).is_some());
        assert!(CurveIndex::new(0, 1).get(&paths).is_none());
        assert!(CurveIndex::new(1, 0).get(&paths).is_none());
    }
}
