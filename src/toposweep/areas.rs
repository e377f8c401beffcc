use log::debug;

use super::TopoGraph;
use crate::{
    error::{Result, TopoError},
    path::{Path, Stitch},
};

/// One edge of a face boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AreaEdge {
    /// Key of the edge's section in the graph.
    pub section: usize,
    /// Whether the boundary walk runs along the section from `fp` to
    /// `tp`.
    pub forward: bool,
}

/// The boundary of a face of the arrangement, as the sequence of
/// sections met when walking it with the face on the right.
///
/// Holds section keys: it is only meaningful together with the graph
/// it was traversed from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Area {
    pub edges: Vec<AreaEdge>,
}

pub type Areas = Vec<Area>;

impl Area {
    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Winding numbers of each path around the face.
    ///
    /// Read off the first boundary section that is not flat along the
    /// sweep axis: its windings describe the region just before it in
    /// transverse order, which is the face when the walk runs forward.
    /// `None` if every boundary section is flat.
    pub fn windings(&self, graph: &TopoGraph) -> Option<Vec<i32>> {
        self.edges.iter().find_map(|ae| {
            let s = graph.sections.get(ae.section)?;
            let dir = s.direction(graph.axis);
            if dir == 0 {
                return None;
            }
            let mut windings = s.windings.clone();
            if !ae.forward {
                let k = s.curve.path;
                if k >= windings.len() {
                    windings.resize(k + 1, 0);
                }
                windings[k] += dir;
            }
            Some(windings)
        })
    }
}

/// The union of two groups of paths: paths before `split` form the
/// first operand, the rest the second. Each operand uses the non-zero
/// fill rule, or even-odd if its flag is unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnionOp {
    pub split: usize,
    pub nonzero_a: bool,
    pub nonzero_b: bool,
}

impl UnionOp {
    pub fn new(split: usize, nonzero_a: bool, nonzero_b: bool) -> Self {
        UnionOp {
            split,
            nonzero_a,
            nonzero_b,
        }
    }

    /// Whether a face with these windings is inside the union.
    pub fn contains(&self, windings: &[i32]) -> bool {
        let split = self.split.min(windings.len());
        let (a, b) = windings.split_at(split);
        let inside = |w: &[i32], nonzero: bool| {
            let w: i32 = w.iter().sum();
            if nonzero {
                w != 0
            } else {
                w % 2 != 0
            }
        };
        inside(a, self.nonzero_a) || inside(b, self.nonzero_b)
    }
}

impl TopoGraph {
    /// Walk the boundary of every face.
    ///
    /// Every half-edge is departed exactly once; after arriving at a
    /// vertex, the walk leaves by the next half-edge counter-clockwise.
    /// The outer face of each connected component is included, walked
    /// clockwise.
    pub fn traverse_areas(&self) -> Result<Areas> {
        let mut visited: Vec<Vec<bool>> = self
            .vertices
            .iter()
            .map(|v| vec![false; v.degree()])
            .collect();
        let mut areas = vec![];

        for start in 0..self.vertices.len() {
            for start_slot in 0..self.vertices[start].degree() {
                if visited[start][start_slot] {
                    continue;
                }
                let mut area = Area::default();
                let (mut v, mut slot) = (start, start_slot);
                while !visited[v][slot] {
                    visited[v][slot] = true;
                    let vert = &self.vertices[v];
                    let e = self.edges[vert.slot(slot)];
                    area.edges.push(AreaEdge {
                        section: e.section,
                        forward: vert.is_exit_slot(slot),
                    });

                    let there = &self.vertices[e.other_vert];
                    let arrived = there.find(e.other_edge).ok_or_else(|| {
                        TopoError::invariant(format!(
                            "vertex {} does not hold half-edge {}",
                            e.other_vert, e.other_edge
                        ))
                    })?;
                    v = e.other_vert;
                    slot = (arrived + 1) % there.degree();
                }
                if (v, slot) != (start, start_slot) {
                    return Err(TopoError::invariant(format!(
                        "face walk from vertex {} did not close",
                        start
                    )));
                }
                areas.push(area);
            }
        }
        debug!("traverse_areas: {} areas", areas.len());
        Ok(areas)
    }

    /// Drop the two-edge areas bounded by coincident sections: the
    /// slivers between the halves of a doubled whisker, or between two
    /// paths running along the same stretch.
    pub fn remove_area_whiskers(&self, paths: &[Path], areas: &mut Areas) {
        let before = areas.len();
        areas.retain(|area| {
            if area.len() != 2 {
                return true;
            }
            match (
                self.sections.get(area.edges[0].section),
                self.sections.get(area.edges[1].section),
            ) {
                (Some(a), Some(b)) => !a.coincides(b, paths, self.tol),
                _ => true,
            }
        });
        if areas.len() < before {
            debug!("remove_area_whiskers: dropped {}", before - areas.len());
        }
    }

    /// The areas whose face windings satisfy `pred`.
    pub fn filter_areas<F>(&self, areas: &[Area], pred: F) -> Areas
    where
        F: Fn(&[i32]) -> bool,
    {
        areas
            .iter()
            .filter(|area| area.len() >= 2)
            .filter(|area| area.windings(self).map_or(false, |w| pred(&w)))
            .cloned()
            .collect()
    }

    /// The boundary of `area` as a path of sub-curves of `paths`, in
    /// the direction of the walk. Gaps between consecutive sections
    /// are bridged by lines.
    pub fn area_to_path(&self, paths: &[Path], area: &Area) -> Result<Path> {
        let mut path = Path::new();
        for ae in &area.edges {
            let s = self.sections.get(ae.section).ok_or_else(|| {
                TopoError::invariant(format!("area refers to missing section {}", ae.section))
            })?;
            let curve = s
                .curve
                .get(paths)
                .ok_or_else(|| TopoError::degenerate_curve(s.curve, "curve not in paths"))?;
            let seg = if ae.forward {
                curve.portion(s.f, s.t)
            } else {
                curve.portion(s.t, s.f)
            };
            path.append(seg, Stitch::Discontinuous, self.tol);
        }
        Ok(path)
    }

    pub fn areas_to_paths(&self, paths: &[Path], areas: &[Area]) -> Result<Vec<Path>> {
        areas
            .iter()
            .map(|area| self.area_to_path(paths, area))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_op() {
        let op = UnionOp::new(1, true, false);
        assert!(op.contains(&[1, 0]));
        assert!(op.contains(&[-2, 0]));
        assert!(!op.contains(&[0, 2]));
        assert!(op.contains(&[0, -1]));
        assert!(!op.contains(&[0, 0]));
        // split past the end: everything is in the first operand
        assert!(UnionOp::new(4, false, false).contains(&[1, 2]));
        assert!(!UnionOp::new(4, false, false).contains(&[1, 1]));
    }
}
