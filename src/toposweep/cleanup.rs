use log::debug;

use super::{graph::Edge, TopoGraph};
use crate::{
    error::{Result, TopoError},
    section::Section,
    utils::{are_near, EPSILON},
};

impl TopoGraph {
    /// Remove dangling edges.
    ///
    /// Every vertex of degree one loses its edge; this repeats along
    /// the chain until no vertex of degree one is left. Vertices left
    /// without edges are dropped.
    pub fn trim_whiskers(&mut self) -> Result<()> {
        let mut affected: Vec<usize> = (0..self.vertices.len())
            .filter(|&v| self.vertices[v].degree() == 1)
            .collect();
        let mut removed = 0;
        while let Some(v) = affected.pop() {
            if self.vertices[v].degree() != 1 {
                continue;
            }
            let half = self.vertices[v].slot(0);
            let other = self.remove_edge_pair(v, half)?;
            removed += 1;
            if self.vertices[other].degree() == 1 {
                affected.push(other);
            }
        }
        if removed > 0 {
            debug!("trim_whiskers: removed {} edges", removed);
        }
        self.canonicalize();
        Ok(())
    }

    /// Double the edges of dangling chains.
    ///
    /// Starting from each vertex of degree one, the edge is duplicated,
    /// and so are the following edges as long as the chain passes
    /// through vertices of degree two. A face walk then goes around the
    /// whisker instead of stopping at its tip.
    pub fn double_whiskers(&mut self) -> Result<()> {
        let mut doubled = 0;
        for tip in 0..self.vertices.len() {
            if self.vertices[tip].degree() != 1 {
                continue;
            }
            let mut v = tip;
            let mut half = self.vertices[tip].slot(0);
            loop {
                let Edge {
                    section,
                    other_edge: dual,
                    other_vert: other,
                } = self.edges[half];
                let next = {
                    let there = &self.vertices[other];
                    let at = there.find(dual).ok_or_else(|| {
                        TopoError::invariant(format!(
                            "vertex {} does not hold half-edge {}",
                            other, dual
                        ))
                    })?;
                    there.slot(at + 1)
                };

                let copy = self.sections[section].clone();
                let copy = self.sections.insert(copy);
                let here_half = self.edges.insert(Edge {
                    section: copy,
                    other_edge: usize::MAX,
                    other_vert: other,
                });
                let there_half = self.edges.insert(Edge {
                    section: copy,
                    other_edge: here_half,
                    other_vert: v,
                });
                self.edges[here_half].other_edge = there_half;
                self.insert_half_at(v, half, here_half, true)?;
                self.insert_half_at(other, dual, there_half, false)?;
                doubled += 1;

                if self.vertices[other].degree() == 3 {
                    v = other;
                    half = next;
                } else {
                    break;
                }
            }
        }
        if doubled > 0 {
            debug!("double_whiskers: doubled {} edges", doubled);
        }
        Ok(())
    }

    /// Merge the two edges at vertices where a curve was split but
    /// nothing else meets: exactly one entering and one exiting edge,
    /// consecutive pieces of the same curve. Pieces split at an
    /// extremum of the curve are kept apart, so that every section
    /// stays monotonic.
    pub fn remove_vestigial(&mut self) -> Result<()> {
        let mut merged = 0;
        for v in 0..self.vertices.len() {
            let (e1, e2) = {
                let vert = &self.vertices[v];
                if vert.enters().len() != 1 || vert.exits().len() != 1 {
                    continue;
                }
                (vert.enters()[0], vert.exits()[0])
            };
            let (a, b) = (self.edges[e1], self.edges[e2]);
            if a.section == b.section || a.other_vert == v || b.other_vert == v {
                continue;
            }
            let joined = {
                let (sa, sb) = (&self.sections[a.section], &self.sections[b.section]);
                if sa.curve != sb.curve || !are_near(sa.t, sb.f, EPSILON) {
                    continue;
                }
                // a turn along the transverse axis would leave the
                // merged section non-monotonic
                let o = self.axis.other();
                let (ra, rb) = (o.of(sa.tp) - o.of(sa.fp), o.of(sb.tp) - o.of(sb.fp));
                if ra * rb < 0. {
                    continue;
                }
                Section {
                    curve: sa.curve,
                    f: sa.f,
                    t: sb.t,
                    fp: sa.fp,
                    tp: sb.tp,
                    windings: sa.windings.clone(),
                }
            };

            // a runs from v1 into v, b from v to v2; keep a's key
            let (d1, d2) = (a.other_edge, b.other_edge);
            let (v1, v2) = (a.other_vert, b.other_vert);
            self.sections[a.section] = joined;
            self.sections.remove(b.section);
            self.edges[d1] = Edge {
                section: a.section,
                other_edge: d2,
                other_vert: v2,
            };
            self.edges[d2] = Edge {
                section: a.section,
                other_edge: d1,
                other_vert: v1,
            };
            self.edges.remove(e1);
            self.edges.remove(e2);
            let vert = &mut self.vertices[v];
            vert.enters.clear();
            vert.exits.clear();
            merged += 1;
        }
        if merged > 0 {
            debug!("remove_vestigial: merged {} vertices", merged);
        }
        self.canonicalize();
        Ok(())
    }
}
