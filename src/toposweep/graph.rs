use std::f64::consts::PI;

use slab::Slab;

use crate::{
    error::{Result, TopoError},
    path::Path,
    section::Section,
    utils::{are_near_points, Coord, Dim2, EPSILON},
};

/// Angles closer than this are considered equal when ordering the
/// edges around a vertex.
const ANGLE_RESOLUTION: f64 = 1e-9;

/// A half-edge: one end of a graph edge, held by the vertex at that
/// end.
///
/// Both halves of an edge refer to the same section, and to each other
/// through `other_edge`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub(super) section: usize,
    pub(super) other_edge: usize,
    pub(super) other_vert: usize,
}

impl Edge {
    /// Get the key of the edge's section.
    #[must_use]
    pub fn section(&self) -> usize {
        self.section
    }

    /// Get the key of the dual half-edge.
    #[must_use]
    pub fn other_edge(&self) -> usize {
        self.other_edge
    }

    /// Get the index of the vertex at the other end.
    #[must_use]
    pub fn other_vert(&self) -> usize {
        self.other_vert
    }
}

/// A vertex of the arrangement.
///
/// Holds the half-edges of the sections ending here (`enters`) and
/// starting here (`exits`), where start and end are in sweep order.
/// Once the sweep is done, `enters ++ exits` lists the incident edges
/// counter-clockwise around the vertex in the (sweep axis, transverse
/// axis) frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    pub(super) avg: Coord,
    pub(super) enters: Vec<usize>,
    pub(super) exits: Vec<usize>,
}

impl Vertex {
    pub(crate) fn new(avg: Coord) -> Self {
        Vertex {
            avg,
            enters: vec![],
            exits: vec![],
        }
    }

    /// Get the vertex's location: the first end point that created it,
    /// not an average. Every incident section ends within the graph
    /// tolerance of it.
    #[must_use]
    pub fn avg(&self) -> Coord {
        self.avg
    }

    /// Get the vertex's entering half-edges.
    #[must_use]
    pub fn enters(&self) -> &[usize] {
        &self.enters
    }

    /// Get the vertex's exiting half-edges.
    #[must_use]
    pub fn exits(&self) -> &[usize] {
        &self.exits
    }

    #[inline]
    pub fn degree(&self) -> usize {
        self.enters.len() + self.exits.len()
    }

    /// The half-edge at position `ix` (modulo the degree) of
    /// `enters ++ exits`.
    ///
    /// # Panics
    ///
    /// If the vertex has no edges.
    pub fn slot(&self, ix: usize) -> usize {
        let ix = ix % self.degree();
        if ix < self.enters.len() {
            self.enters[ix]
        } else {
            self.exits[ix - self.enters.len()]
        }
    }

    /// Whether position `ix` of `enters ++ exits` holds an exiting
    /// half-edge.
    pub fn is_exit_slot(&self, ix: usize) -> bool {
        ix % self.degree().max(1) >= self.enters.len()
    }

    /// Position of the half-edge `edge` in `enters ++ exits`.
    pub fn find(&self, edge: usize) -> Option<usize> {
        self.enters
            .iter()
            .position(|&e| e == edge)
            .or_else(|| {
                self.exits
                    .iter()
                    .position(|&e| e == edge)
                    .map(|i| i + self.enters.len())
            })
    }

    fn remove_half(&mut self, edge: usize) -> bool {
        if let Some(i) = self.enters.iter().position(|&e| e == edge) {
            self.enters.remove(i);
            true
        } else if let Some(i) = self.exits.iter().position(|&e| e == edge) {
            self.exits.remove(i);
            true
        } else {
            false
        }
    }
}

/// The planar arrangement built by the sweep.
///
/// Vertices live in a vector and are addressed by index; half-edges and
/// sections live in slabs and are addressed by key. Passes that remove
/// vertices renumber the rest (see [`TopoGraph::canonicalize`]); edge
/// and section keys are stable.
#[derive(Debug, Clone)]
pub struct TopoGraph {
    pub(super) vertices: Vec<Vertex>,
    pub(super) edges: Slab<Edge>,
    pub(super) sections: Slab<Section>,
    pub(super) axis: Dim2,
    pub(super) tol: f64,
}

impl TopoGraph {
    pub(super) fn empty(axis: Dim2, tol: f64) -> Self {
        TopoGraph {
            vertices: vec![],
            edges: Slab::new(),
            sections: Slab::new(),
            axis,
            tol,
        }
    }

    /// Number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn vertex(&self, ix: usize) -> Option<&Vertex> {
        self.vertices.get(ix)
    }

    pub fn edge(&self, key: usize) -> Option<&Edge> {
        self.edges.get(key)
    }

    /// The half-edge at position `slot` of vertex `ix`.
    ///
    /// # Panics
    ///
    /// If the vertex does not exist or has no edges.
    pub fn get_edge(&self, ix: usize, slot: usize) -> &Edge {
        &self.edges[self.vertices[ix].slot(slot)]
    }

    pub fn section(&self, key: usize) -> Option<&Section> {
        self.sections.get(key)
    }

    /// All sections in the graph, one per edge.
    pub fn sections(&self) -> impl Iterator<Item = (usize, &Section)> {
        self.sections.iter()
    }

    /// Number of (full) edges.
    pub fn num_edges(&self) -> usize {
        self.edges.len() / 2
    }

    /// Sum of the vertex degrees.
    pub fn degree_sum(&self) -> usize {
        self.vertices.iter().map(Vertex::degree).sum()
    }

    /// Get the graph's sweep axis.
    #[must_use]
    pub fn axis(&self) -> Dim2 {
        self.axis
    }

    /// Get the graph's tolerance.
    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tol
    }

    /// Wire `section` as an edge from vertex `start` to vertex `end`:
    /// an exiting half at `start` and an entering half at `end`.
    pub(super) fn connect(&mut self, section: usize, start: usize, end: usize) -> (usize, usize) {
        let exit = self.edges.insert(Edge {
            section,
            other_edge: usize::MAX,
            other_vert: end,
        });
        let enter = self.edges.insert(Edge {
            section,
            other_edge: exit,
            other_vert: start,
        });
        self.edges[exit].other_edge = enter;
        self.vertices[start].exits.push(exit);
        self.vertices[end].enters.push(enter);
        (exit, enter)
    }

    /// Remove the edge that `half` belongs to, both halves and its
    /// section. Returns the vertex at the far end of `half`.
    pub(super) fn remove_edge_pair(&mut self, here: usize, half: usize) -> Result<usize> {
        let e = self
            .edges
            .try_remove(half)
            .ok_or_else(|| TopoError::invariant(format!("missing half-edge {}", half)))?;
        let there = e.other_vert;
        self.edges.try_remove(e.other_edge);
        self.sections.try_remove(e.section);
        let removed_here = self.vertices[here].remove_half(half);
        let removed_there = self.vertices[there].remove_half(e.other_edge);
        if !(removed_here && removed_there) {
            return Err(TopoError::invariant(format!(
                "edge {} not held by vertices {} and {}",
                half, here, there
            )));
        }
        Ok(there)
    }

    /// Insert `half` next to `reference` at vertex `v`, in the same
    /// list, before or after it.
    pub(super) fn insert_half_at(
        &mut self,
        v: usize,
        reference: usize,
        half: usize,
        after: bool,
    ) -> Result<()> {
        let vert = &mut self.vertices[v];
        for list in [&mut vert.enters, &mut vert.exits] {
            if let Some(i) = list.iter().position(|&e| e == reference) {
                list.insert(if after { i + 1 } else { i }, half);
                return Ok(());
            }
        }
        Err(TopoError::invariant(format!(
            "half-edge {} not found at vertex {}",
            reference, v
        )))
    }

    /// Put the half-edges of vertex `v` in rotational order: each list
    /// counter-clockwise by the direction in which its section leaves
    /// the vertex, so that `enters ++ exits` is counter-clockwise.
    pub(super) fn order_edges(&mut self, paths: &[Path], v: usize) {
        let enters = std::mem::take(&mut self.vertices[v].enters);
        let exits = std::mem::take(&mut self.vertices[v].exits);
        let enters = self.sorted_by_rotation(paths, enters, true);
        let exits = self.sorted_by_rotation(paths, exits, false);

        let vert = &mut self.vertices[v];
        vert.enters = enters;
        vert.exits = exits;
    }

    fn sorted_by_rotation(&self, paths: &[Path], halves: Vec<usize>, entering: bool) -> Vec<usize> {
        let mut keyed: Vec<_> = halves
            .into_iter()
            .map(|h| (self.rotation_key(paths, h, entering), h))
            .collect();
        keyed.sort_by_key(|&(key, _)| key);
        keyed.into_iter().map(|(_, h)| h).collect()
    }

    /// Angle at which the section of `half` leaves its vertex, in the
    /// (sweep, transverse) frame, then the angle of its chord, then
    /// the section key.
    ///
    /// Entering sections leave backwards: their angles are in
    /// `[pi/2, 3pi/2]`; exiting ones in `[-pi/2, pi/2]`. Coincident
    /// sections are ordered by key, ascending on exits and descending
    /// on enters, so that the lower key is on the same side at both
    /// ends and the two bound a face of their own.
    fn rotation_key(&self, paths: &[Path], half: usize, entering: bool) -> (i64, i64, i64) {
        let d = self.axis;
        let key = self.edges[half].section;
        let s = &self.sections[key];
        let seg = s.curve.curve(paths);
        let (param, away, chord) = if entering {
            (s.t, s.f - s.t, s.fp - s.tp)
        } else {
            (s.f, s.t - s.f, s.tp - s.fp)
        };
        let mut dir = seg.unit_tangent_at(param);
        if away < 0. {
            dir = -dir;
        }

        let angle = |v: Coord| {
            let (u, w) = (d.of(v), d.other().of(v));
            let a = if entering {
                let a = w.atan2(u.min(0.));
                if a < 0. {
                    a + 2. * PI
                } else {
                    a
                }
            } else {
                w.atan2(u.max(0.))
            };
            (a / ANGLE_RESOLUTION).round() as i64
        };
        let tie = if entering { -(key as i64) } else { key as i64 };
        (angle(dir), angle(chord), tie)
    }

    /// Drop vertices without edges and renumber the rest.
    pub fn canonicalize(&mut self) {
        let mut remap = vec![usize::MAX; self.vertices.len()];
        let mut kept = Vec::with_capacity(self.vertices.len());
        for (i, v) in self.vertices.drain(..).enumerate() {
            if v.degree() > 0 {
                remap[i] = kept.len();
                kept.push(v);
            }
        }
        for (_, e) in self.edges.iter_mut() {
            e.other_vert = remap[e.other_vert];
        }
        self.vertices = kept;
    }

    /// Check the structure of the graph: every half-edge is held by
    /// exactly one vertex and paired with a dual at the vertex it
    /// points to, both halves share a live section, and that section
    /// ends near both vertices.
    pub fn check_invariants(&self) -> Result<()> {
        let slack = self.tol * (1. + EPSILON);
        let mut held = vec![false; self.edges.capacity()];
        let mut count = 0;

        for (vix, v) in self.vertices.iter().enumerate() {
            for slot in 0..v.degree() {
                let half = v.slot(slot);
                let e = self.edges.get(half).ok_or_else(|| {
                    TopoError::invariant(format!("vertex {} holds dead half-edge {}", vix, half))
                })?;
                if std::mem::replace(&mut held[half], true) {
                    return Err(TopoError::invariant(format!(
                        "half-edge {} held more than once",
                        half
                    )));
                }
                count += 1;

                let dual = self.edges.get(e.other_edge).ok_or_else(|| {
                    TopoError::invariant(format!("half-edge {} has no dual", half))
                })?;
                if dual.other_edge != half || dual.section != e.section {
                    return Err(TopoError::invariant(format!(
                        "half-edges {} and {} are not paired",
                        half, e.other_edge
                    )));
                }
                if dual.other_vert != vix {
                    return Err(TopoError::invariant(format!(
                        "dual of half-edge {} points to vertex {} instead of {}",
                        half, dual.other_vert, vix
                    )));
                }
                let there = self.vertices.get(e.other_vert).ok_or_else(|| {
                    TopoError::invariant(format!("half-edge {} points past the graph", half))
                })?;
                if there.find(e.other_edge).is_none() {
                    return Err(TopoError::invariant(format!(
                        "vertex {} does not hold half-edge {}",
                        e.other_vert, e.other_edge
                    )));
                }

                let s = self.sections.get(e.section).ok_or_else(|| {
                    TopoError::invariant(format!("half-edge {} has no section", half))
                })?;
                let end = if v.is_exit_slot(slot) { s.fp } else { s.tp };
                if !are_near_points(end, v.avg, slack) {
                    return Err(TopoError::invariant(format!(
                        "section {} ends at {:?}, away from vertex {} at {:?}",
                        e.section, end, vix, v.avg
                    )));
                }
            }
        }

        if count != self.edges.len() {
            return Err(TopoError::invariant(format!(
                "{} half-edges are not held by any vertex",
                self.edges.len() - count
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_slots() {
        let mut v = Vertex::new(Coord { x: 0., y: 0. });
        v.enters = vec![4, 7];
        v.exits = vec![2];
        assert_eq!(v.degree(), 3);
        assert_eq!(v.slot(1), 7);
        assert_eq!(v.slot(2), 2);
        assert_eq!(v.slot(4), 7);
        assert!(v.is_exit_slot(2));
        assert!(!v.is_exit_slot(3));
        assert_eq!(v.find(2), Some(2));
        assert_eq!(v.find(5), None);

        assert!(v.remove_half(7));
        assert!(!v.remove_half(7));
        assert_eq!(v.slot(1), 2);
    }

    #[test]
    fn test_connect_and_remove() {
        let mut g = TopoGraph::empty(Dim2::X, 1e-6);
        let p = Coord { x: 0., y: 0. };
        let q = Coord { x: 1., y: 0. };
        g.vertices.push(Vertex::new(p));
        g.vertices.push(Vertex::new(q));
        let s = g.sections.insert(Section::from_parts(
            crate::path::CurveIndex::new(0, 0),
            0.,
            1.,
            p,
            q,
            Dim2::X,
        ));
        let (exit, enter) = g.connect(s, 0, 1);
        assert_eq!(g.vertices[0].exits(), &[exit]);
        assert_eq!(g.vertices[1].enters(), &[enter]);
        assert_eq!(g.edge(exit).map(|e| e.other_vert()), Some(1));
        assert_eq!(g.num_edges(), 1);
        assert_eq!(g.check_invariants(), Ok(()));

        assert_eq!(g.remove_edge_pair(1, enter), Ok(0));
        assert_eq!(g.degree_sum(), 0);
        assert!(g.section(s).is_none());
        g.canonicalize();
        assert!(g.is_empty());
    }

    #[test]
    fn test_invariant_violation() {
        let mut g = TopoGraph::empty(Dim2::X, 1e-6);
        let p = Coord { x: 0., y: 0. };
        let q = Coord { x: 1., y: 0. };
        g.vertices.push(Vertex::new(p));
        // the end vertex is far from the section's end
        g.vertices.push(Vertex::new(Coord { x: 5., y: 0. }));
        let s = g.sections.insert(Section::from_parts(
            crate::path::CurveIndex::new(0, 0),
            0.,
            1.,
            p,
            q,
            Dim2::X,
        ));
        g.connect(s, 0, 1);
        assert!(matches!(
            g.check_invariants(),
            Err(TopoError::InvariantViolation(_))
        ));
    }
}
