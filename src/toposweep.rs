//! Topological sweep: the planar arrangement of a set of paths.
//!
//! [`TopoGraph::new`] cuts the input curves into monotonic sections,
//! sweeps them along an axis and splits them where they cross. The
//! result is a graph whose vertices are the crossing and end points,
//! and whose edges are the pieces of curve between them, with the
//! edges around each vertex in rotational order.
//!
//! The graph can then be cleaned up (see [`TopoGraph::trim_whiskers`],
//! [`TopoGraph::double_whiskers`] and [`TopoGraph::remove_vestigial`])
//! and its faces extracted as closed paths, each with the winding
//! numbers of the input paths around it.
//!
//! ```rust
//! use geo::polygon;
//! use geo_toposweep::{paths_from_polygon, TopoGraph};
//!
//! let square = polygon![(x: 0., y: 0.), (x: 2., y: 0.), (x: 2., y: 2.), (x: 0., y: 2.)];
//! let paths = paths_from_polygon(&square);
//! let graph = TopoGraph::with_defaults(&paths).unwrap();
//! assert_eq!(graph.len(), 4);
//!
//! let areas = graph.traverse_areas().unwrap();
//! let inside = graph.filter_areas(&areas, |w| w[0] != 0);
//! assert_eq!(inside.len(), 1);
//! ```
use crate::{
    error::{Result, TopoError},
    utils::Dim2,
};

mod graph;
pub use graph::{Edge, TopoGraph, Vertex};

mod vertices;

mod sweep;

mod cleanup;

mod areas;
pub use areas::{Area, AreaEdge, Areas, UnionOp};

/// Parameters of a sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepOptions {
    /// The axis the sweep line moves along.
    pub axis: Dim2,
    /// Points closer than this are the same vertex.
    pub tolerance: f64,
}

impl Default for SweepOptions {
    fn default() -> Self {
        SweepOptions {
            axis: Dim2::X,
            tolerance: 1e-5,
        }
    }
}

impl SweepOptions {
    pub fn with_axis(mut self, axis: Dim2) -> Self {
        self.axis = axis;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() || self.tolerance <= 0. {
            return Err(TopoError::degenerate(format!(
                "tolerance must be a positive number, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}
