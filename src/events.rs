use std::cmp::Ordering;

use crate::utils::{lexo_cmp, Coord, Dim2};

/// A pending section fragment in the sweep's chop queue.
#[derive(Debug, Clone)]
pub(crate) struct Event {
    pub(crate) point: SweepPoint,
    pub(crate) section_key: usize,
}

/// Equality consistent with the `Ord` impl below.
impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.point == other.point && self.section_key == other.section_key
    }
}

/// Assert total equality
impl Eq for Event {}

/// Ordering for use with a max-heap (`BinaryHeap`): the event at the
/// earliest sweep point is the greatest. Ties are broken on the
/// section key so that the heap pops deterministically.
impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        self.point
            .cmp(&other.point)
            .then_with(|| self.section_key.cmp(&other.section_key))
            .reverse()
    }
}

/// Wraps a [`Coord`] to support lexicographic ordering along a sweep
/// axis.
///
/// The ordering is by the sweep-axis component and then by the other
/// one. Implements `PartialOrd`, `Ord` and `Eq` even though `Coord`
/// doesn't implement these. This is necessary to support insertion to
/// ordered collections, especially `BinaryHeap` as required by the
/// sweep.
///
/// Points of different axes must not be compared; every point in one
/// sweep carries the same axis.
#[derive(Debug, PartialEq, Clone, Copy)]
pub(crate) struct SweepPoint {
    coord: Coord,
    axis: Dim2,
}

impl SweepPoint {
    /// Create from `Coord` while checking the components are finite.
    pub(crate) fn new(coord: Coord, axis: Dim2) -> Self {
        debug_assert!(
            coord.x.is_finite() && coord.y.is_finite(),
            "sweep point requires finite coordinates"
        );
        SweepPoint { coord, axis }
    }
}

impl PartialOrd for SweepPoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SweepPoint {
    fn cmp(&self, other: &Self) -> Ordering {
        debug_assert_eq!(self.axis, other.axis);
        lexo_cmp(self.coord, other.coord, self.axis)
    }
}

/// We derive `Eq` manually; components are checked to be finite.
impl Eq for SweepPoint {}

#[cfg(test)]
mod tests {
    use std::{collections::BinaryHeap, iter::from_fn};

    use super::*;

    fn sp(x: f64, y: f64, axis: Dim2) -> SweepPoint {
        SweepPoint::new(Coord { x, y }, axis)
    }

    #[test]
    fn test_sweep_point_ordering() {
        let p1 = sp(0., 0., Dim2::X);
        let p2 = sp(1., 0., Dim2::X);
        let p3 = sp(1., 1., Dim2::X);
        let p4 = sp(1., 1., Dim2::X);

        assert!(p1 < p2);
        assert!(p1 < p3);
        assert!(p2 < p3);
        assert!(p3 <= p4);

        // sweeping along y swaps the priority of the components
        assert!(sp(1., 0., Dim2::Y) < sp(0., 1., Dim2::Y));
        assert!(sp(0., 1., Dim2::Y) < sp(1., 1., Dim2::Y));
    }

    #[test]
    fn test_event_ordering() {
        let events = vec![
            (sp(1., 1., Dim2::X), 3),
            (sp(0., 0., Dim2::X), 0),
            (sp(1., 0., Dim2::X), 2),
            (sp(1., 0., Dim2::X), 1),
        ];

        let mut heap: BinaryHeap<_> = events
            .into_iter()
            .map(|(point, section_key)| Event { point, section_key })
            .collect();

        let order: Vec<_> = from_fn(|| heap.pop()).map(|e| e.section_key).collect();
        assert_eq!(order, vec![0, 1, 2, 3]);
    }
}
