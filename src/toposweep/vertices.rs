use rstar::{RTree, RTreeObject, AABB};

use crate::utils::{are_near_points, Coord};

/// Location of a vertex, as stored in the R-tree.
#[derive(Debug, Clone, Copy)]
struct VertexLocation {
    point: [f64; 2],
    key: usize,
}

impl RTreeObject for VertexLocation {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

/// Spatial index of vertex locations, answering "which vertex is
/// within `tol` of this point".
pub(super) struct VertexIndex {
    tree: RTree<VertexLocation>,
    tol: f64,
}

impl VertexIndex {
    pub(super) fn new(tol: f64) -> Self {
        VertexIndex {
            tree: RTree::new(),
            tol,
        }
    }

    /// The earliest inserted vertex within `tol` of `p`.
    pub(super) fn find(&self, p: Coord) -> Option<usize> {
        let tol = self.tol;
        let envelope = AABB::from_corners([p.x - tol, p.y - tol], [p.x + tol, p.y + tol]);
        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .filter(|loc| {
                let q = Coord {
                    x: loc.point[0],
                    y: loc.point[1],
                };
                are_near_points(p, q, tol)
            })
            .map(|loc| loc.key)
            .min()
    }

    pub(super) fn insert(&mut self, p: Coord, key: usize) {
        self.tree.insert(VertexLocation {
            point: [p.x, p.y],
            key,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_within_tolerance() {
        let mut index = VertexIndex::new(0.1);
        index.insert(Coord { x: 0., y: 0. }, 0);
        index.insert(Coord { x: 0.05, y: 0. }, 1);
        index.insert(Coord { x: 1., y: 1. }, 2);

        assert_eq!(index.find(Coord { x: 0.04, y: 0. }), Some(0));
        assert_eq!(index.find(Coord { x: 0.14, y: 0. }), Some(1));
        assert_eq!(index.find(Coord { x: 1., y: 1.05 }), Some(2));
        // inside the query box, but too far
        assert_eq!(index.find(Coord { x: 1.09, y: 1.09 }), None);
    }
}
