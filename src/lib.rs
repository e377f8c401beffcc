//! Planar arrangements of curves by topological sweep.
//!
//! 1. [Monotonic Sections](#monotonic-sections)
//! 1. [Topological Sweep](#topological-sweep)
//! 1. [Faces](#faces)
//!
//! # Monotonic Sections
//!
//! The input is a list of [`Path`]s, each a sequence of [`Segment`]s
//! (line segments, quadratic and cubic béziers). Every curve is cut at
//! the parameters where its derivative vanishes along either axis, so
//! that each [`Section`] is monotonic in both `x` and `y`. See
//! [`mono_sections`].
//!
//! # Topological Sweep
//!
//! [`TopoGraph::new`] sweeps the sections along an axis, keeping the
//! sections crossing the sweep line ordered along the other axis with
//! [`SectionSorter`]. When a section becomes active it is tested for
//! crossings against its overlapping neighbours, and both are split at
//! the crossings. Each piece becomes an edge of the graph; points
//! within the sweep tolerance share a vertex.
//!
//! ```rust
//! use geo_toposweep::{Coord, Path, SweepOptions, TopoGraph};
//!
//! let c = |x, y| Coord { x, y };
//! let paths = vec![
//!     Path::from_polyline(&[c(0., 0.), c(10., 10.)], false),
//!     Path::from_polyline(&[c(0., 10.), c(10., 0.)], false),
//! ];
//! let graph = TopoGraph::new(&paths, SweepOptions::default()).unwrap();
//! // four end points and the crossing
//! assert_eq!(graph.len(), 5);
//! ```
//!
//! # Faces
//!
//! Walking around the graph yields the boundary of every face as an
//! [`Area`], together with the winding number of each input path
//! around it. Faces can be selected by their windings (for instance
//! with [`UnionOp`]) and turned back into paths with
//! [`TopoGraph::areas_to_paths`].
pub mod utils;
pub use utils::{Coord, Dim2};

mod interval;
pub use interval::{Interval, Rect};

pub mod curve;
pub use curve::{CubicBezier, QuadraticBezier, Segment};

mod path;
pub use path::{paths_from_polygon, CurveIndex, Path, Stitch};

mod intersect;
pub use intersect::{mono_intersect, Crossing};

mod error;
pub use error::{Result, TopoError};

mod events;
mod active;

mod section;
pub use section::{mono_sections, process_splits, section_root, Section};

mod order;
pub use order::{SectionSorter, SweepSorter};

pub mod toposweep;
pub use toposweep::{Area, AreaEdge, Areas, Edge, SweepOptions, TopoGraph, UnionOp, Vertex};

#[cfg(test)]
#[path = "../benches/utils/random.rs"]
pub mod random;

#[cfg(test)]
pub(crate) fn init_log() {
    let _ = env_logger::builder().is_test(true).try_init();
}
