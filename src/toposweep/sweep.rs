use std::collections::BinaryHeap;

use log::{debug, trace};

use super::{graph::Vertex, vertices::VertexIndex, SweepOptions, TopoGraph};
use crate::{
    active::ActiveSections,
    error::{Result, TopoError},
    events::{Event, SweepPoint},
    intersect::mono_intersect,
    order::{SectionSorter, SweepSorter},
    path::{CurveIndex, Path},
    section::{mono_sections, process_splits, Section},
    utils::{are_near, are_near_points, Coord, Dim2},
};

impl TopoGraph {
    /// Sweep `paths` into a planar graph.
    ///
    /// The curves are cut into monotonic sections which are swept along
    /// `options.axis`. Sections that cross are split at the crossings,
    /// and every piece becomes an edge between the vertices at its end
    /// points. End points closer than `options.tolerance` share a
    /// vertex.
    ///
    /// The result may contain dangling edges, self-loops and vertices
    /// of degree two; see the cleanup passes.
    pub fn new(paths: &[Path], options: SweepOptions) -> Result<Self> {
        options.validate()?;
        for (i, path) in paths.iter().enumerate() {
            for (j, seg) in path.segments().iter().enumerate() {
                if !seg.is_finite() {
                    return Err(TopoError::degenerate_curve(
                        CurveIndex::new(i, j),
                        "curve has a non-finite coordinate",
                    ));
                }
            }
        }

        let mut sweep = Sweep::new(paths, options);
        sweep.run()?;
        // vertices of dropped degenerate sections
        sweep.graph.canonicalize();
        Ok(sweep.graph)
    }

    /// Sweep `paths` with the default options.
    pub fn with_defaults(paths: &[Path]) -> Result<Self> {
        TopoGraph::new(paths, SweepOptions::default())
    }
}

/// State of a sweep in progress.
struct Sweep<'a> {
    paths: &'a [Path],
    axis: Dim2,
    tol: f64,
    graph: TopoGraph,
    /// Input sections, in sweep order of their starting points.
    input: Vec<usize>,
    next_input: usize,
    /// Fragments split off during the sweep.
    chops: BinaryHeap<Event>,
    context: ActiveSections,
    /// Sections retired near the current sweep position.
    recent: Vec<usize>,
    /// Vertices whose edges are not yet in rotational order.
    pending: Vec<usize>,
    index: VertexIndex,
}

impl<'a> Sweep<'a> {
    fn new(paths: &'a [Path], options: SweepOptions) -> Self {
        let SweepOptions { axis, tolerance } = options;
        let mut graph = TopoGraph::empty(axis, tolerance);

        let mut monos = mono_sections(paths, axis);
        let sorter = SweepSorter::new(axis);
        monos.sort_by(|a, b| sorter.compare(a, b));
        let input: Vec<_> = monos
            .into_iter()
            .map(|s| graph.sections.insert(s))
            .collect();
        debug!("sweep: {} monotonic sections", input.len());

        Sweep {
            paths,
            axis,
            tol: tolerance,
            graph,
            input,
            next_input: 0,
            chops: BinaryHeap::new(),
            context: ActiveSections::default(),
            recent: vec![],
            pending: vec![],
            index: VertexIndex::new(tolerance),
        }
    }

    fn run(&mut self) -> Result<()> {
        loop {
            let next = self.next_section();
            if next.is_none() && self.context.is_empty() && self.pending.is_empty() {
                break;
            }
            let lim = match next {
                Some(key) => self.axis.of(self.graph.sections[key].fp),
                None => f64::INFINITY,
            };
            trace!("sweep: position {}, next {:?}", lim, next);

            self.finalize_vertices(lim);
            self.retire_sections(lim);
            if let Some(key) = next {
                self.admit(key)?;
            }
        }
        debug!(
            "sweep: {} vertices, {} edges",
            self.graph.len(),
            self.graph.num_edges()
        );
        Ok(())
    }

    /// The earliest of the next input section and the next chop; a tie
    /// goes to the chop.
    fn next_section(&mut self) -> Option<usize> {
        let take_input = match (self.input.get(self.next_input), self.chops.peek()) {
            (Some(&key), Some(chop)) => {
                SweepPoint::new(self.graph.sections[key].fp, self.axis) < chop.point
            }
            (Some(_), None) => true,
            _ => false,
        };
        if take_input {
            self.next_input += 1;
            Some(self.input[self.next_input - 1])
        } else {
            self.chops.pop().map(|e| e.section_key)
        }
    }

    /// Order the edges of the vertices the sweep has moved past.
    fn finalize_vertices(&mut self, lim: f64) {
        let mut i = self.pending.len();
        while i > 0 {
            i -= 1;
            let v = self.pending[i];
            if self.axis.of(self.graph.vertices[v].avg()) + self.tol <= lim {
                self.graph.order_edges(self.paths, v);
                self.pending.remove(i);
            }
        }
    }

    /// Turn the active sections ending at or before `lim` into edges.
    fn retire_sections(&mut self, lim: f64) {
        let d = self.axis;
        self.prune_recent();
        let mut i = self.context.len();
        while i > 0 {
            i -= 1;
            let key = self.context.key(i);
            let tp = self.graph.sections[key].tp;
            if !(d.of(tp) < lim || are_near(d.of(tp), lim, self.tol)) {
                continue;
            }

            let windings = self.windings_below(i);
            self.graph.sections[key].windings = windings;

            let (key, start) = self.context.remove(i);
            let end = self.vertex_at(tp);
            if start == end && are_near_points(self.graph.sections[key].fp, tp, self.tol) {
                debug!("dropping degenerate section {}", key);
                self.graph.sections.remove(key);
                continue;
            }
            trace!("retire section {} from vertex {} to {}", key, start, end);
            self.graph.connect(key, start, end);
            self.recent.push(key);
            self.mark_pending(start);
            self.mark_pending(end);
        }
    }

    /// Forget the retired sections that end more than `tol` before
    /// every active one.
    fn prune_recent(&mut self) {
        let d = self.axis;
        let sections = &self.graph.sections;
        let horizon = self
            .context
            .keys()
            .iter()
            .map(|&k| d.of(sections[k].tp))
            .fold(f64::INFINITY, f64::min);
        let tol = self.tol;
        self.recent
            .retain(|&k| d.of(sections[k].tp) >= horizon - tol);
    }

    /// Winding contributions of the sections below the active section
    /// at `ix`, just before its end.
    ///
    /// These are the active sections before it that started earlier,
    /// and the sections already retired at its end that lie below it.
    fn windings_below(&self, ix: usize) -> Vec<i32> {
        let d = self.axis;
        let sections = &self.graph.sections;
        let key = self.context.key(ix);
        let s = &sections[key];
        let end = d.of(s.tp) - self.tol;
        let sorter = SectionSorter::new(self.paths, d.other(), self.tol);

        let active = self.context.keys()[..ix]
            .iter()
            .copied()
            .filter(|&k| d.of(sections[k].fp) < end);
        let retired = self.recent.iter().copied().filter(|&k| {
            let e = &sections[k];
            d.of(e.fp) < end && d.of(e.tp) >= end && sorter.less_keyed(e, k, s, key)
        });

        let mut windings = vec![0; self.paths.len()];
        for k in active.chain(retired) {
            let e = &sections[k];
            let p = e.curve.path;
            if p >= windings.len() {
                windings.resize(p + 1, 0);
            }
            windings[p] += e.direction(d);
        }
        windings
    }

    /// Make `key` active, and split it and its neighbours where they
    /// cross.
    fn admit(&mut self, key: usize) -> Result<()> {
        let d = self.axis;
        let fp = self.graph.sections[key].fp;
        let start = self.vertex_at(fp);

        let ix = {
            let sorter = SectionSorter::new(self.paths, d.other(), self.tol);
            let sections = &self.graph.sections;
            let s = &sections[key];
            self.context
                .insert(key, start, |k| sorter.less_keyed(&sections[k], k, s, key))
        };
        trace!("admit section {} at {}: {:?}", key, ix, self.graph.sections[key]);

        let (curve, range, span) = {
            let s = &self.graph.sections[key];
            (
                s.curve.curve(self.paths),
                s.param_range(),
                s.bbox().index(d.other()).expand_by(self.tol),
            )
        };

        let mut this_splits = vec![];
        for i in 0..self.context.len() {
            if i == ix {
                continue;
            }
            let other = self.context.key(i);
            let (other_curve, other_range) = {
                let s = &self.graph.sections[other];
                if !span.intersects(&s.bbox().index(d.other())) {
                    continue;
                }
                (s.curve.curve(self.paths), s.param_range())
            };

            let xs = mono_intersect(curve, range, other_curve, other_range, self.tol);
            if xs.is_empty() {
                continue;
            }
            debug!(
                "found crossings:\n\tsection1: {:?}\n\tsection2: {:?}\n\tcrossings: {:?}",
                self.graph.sections[key], self.graph.sections[other], xs
            );
            this_splits.extend(xs.iter().map(|x| x.ta));
            let other_splits = xs.iter().map(|x| x.tb).collect();
            self.push_chops(other, other_splits)?;
        }
        if !this_splits.is_empty() {
            self.push_chops(key, this_splits)?;
        }
        Ok(())
    }

    fn push_chops(&mut self, key: usize, cuts: Vec<f64>) -> Result<()> {
        for frag in split_section(&mut self.graph, self.paths, key, cuts)? {
            let point = SweepPoint::new(self.graph.sections[frag].fp, self.axis);
            self.chops.push(Event {
                point,
                section_key: frag,
            });
        }
        Ok(())
    }

    /// The vertex at `p`, created if none is within tolerance.
    fn vertex_at(&mut self, p: Coord) -> usize {
        if let Some(v) = self.index.find(p) {
            return v;
        }
        let v = self.graph.vertices.len();
        self.graph.vertices.push(Vertex::new(p));
        self.index.insert(p, v);
        self.pending.push(v);
        trace!("new vertex {} at {:?}", v, p);
        v
    }

    fn mark_pending(&mut self, v: usize) {
        if !self.pending.contains(&v) {
            self.pending.push(v);
        }
    }
}

/// Split the section `key` at the parameters `cuts`.
///
/// The section keeps the first piece; the other pieces are stored as
/// new sections, whose keys are returned last piece first. Cuts that
/// land within tolerance of the previous cut or of the section's end
/// are ignored.
pub(super) fn split_section(
    graph: &mut TopoGraph,
    paths: &[Path],
    key: usize,
    mut cuts: Vec<f64>,
) -> Result<Vec<usize>> {
    let (d, tol) = (graph.axis, graph.tol);
    let (curve_ix, f, t, fp, tp) = {
        let s = &graph.sections[key];
        (s.curve, s.f, s.t, s.fp, s.tp)
    };
    let curve = curve_ix
        .get(paths)
        .ok_or_else(|| TopoError::degenerate_curve(curve_ix, "section refers to a missing curve"))?;

    process_splits(&mut cuts, f, t);
    let mut kept = vec![f];
    let mut last = fp;
    for &cut in &cuts[1..cuts.len() - 1] {
        let p = curve.point_at(cut);
        if are_near_points(p, last, tol) || are_near_points(p, tp, tol) {
            continue;
        }
        kept.push(cut);
        last = p;
    }
    kept.push(t);
    if kept.len() <= 2 {
        return Ok(vec![]);
    }

    let new_tp = curve.point_at(kept[1]);
    if d.of(new_tp) < d.of(fp) - tol {
        return Err(TopoError::invariant(format!(
            "split of section {} at {} runs against the sweep",
            key, kept[1]
        )));
    }
    {
        let s = &mut graph.sections[key];
        s.t = kept[1];
        s.tp = new_tp;
    }

    let frags: Vec<usize> = (1..kept.len() - 1)
        .rev()
        .map(|i| {
            let frag = Section::new(curve_ix, kept[i], kept[i + 1], paths, d);
            graph.sections.insert(frag)
        })
        .collect();
    trace!("split section {} at {:?} into {:?}", key, &kept[1..kept.len() - 1], frags);
    Ok(frags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::Segment;

    fn c(x: f64, y: f64) -> Coord {
        Coord { x, y }
    }

    #[test]
    fn test_split_section() {
        let paths = vec![Path::from_segments(vec![Segment::line(c(4., 0.), c(0., 0.))])];
        let mut g = TopoGraph::empty(Dim2::X, 1e-6);
        let key = g
            .sections
            .insert(Section::new(CurveIndex::new(0, 0), 0., 1., &paths, Dim2::X));
        // runs against the curve: f = 1 at (0, 0)
        assert_eq!(g.sections[key].f, 1.);

        let frags = split_section(&mut g, &paths, key, vec![0.25, 0.5, 0.5 + 1e-8, 1.]).unwrap();
        assert_eq!(frags.len(), 2);
        assert_eq!((g.sections[key].f, g.sections[key].t), (1., 0.5));
        assert_eq!(g.sections[key].tp, c(2., 0.));

        // last piece first
        let last = &g.sections[frags[0]];
        assert_eq!((last.f, last.t), (0.25, 0.));
        assert_eq!(last.fp, c(3., 0.));
        let middle = &g.sections[frags[1]];
        assert_eq!((middle.fp, middle.tp), (c(2., 0.), c(3., 0.)));
    }

    #[test]
    fn test_split_at_end_points_is_noop() {
        let paths = vec![Path::from_segments(vec![Segment::line(c(0., 0.), c(1., 1.))])];
        let mut g = TopoGraph::empty(Dim2::X, 1e-6);
        let key = g
            .sections
            .insert(Section::new(CurveIndex::new(0, 0), 0., 1., &paths, Dim2::X));
        let frags = split_section(&mut g, &paths, key, vec![0., 1. - 1e-7]).unwrap();
        assert!(frags.is_empty());
        assert_eq!(g.sections[key].t, 1.);
    }
}
