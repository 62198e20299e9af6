//! R-tree based neighbour index using the rstar crate.
//!
//! Points are identified by their slot in the calculation set, so results can
//! be mapped straight back onto a tick's per-slot force buffer.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

/// A point in the spatial index with the slot it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotPoint {
    /// Position of the node in the calculation set.
    pub slot: usize,
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl SlotPoint {
    /// Create a new SlotPoint.
    pub fn new(slot: usize, x: f32, y: f32) -> Self {
        Self { slot, x, y }
    }
}

impl RTreeObject for SlotPoint {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.x, self.y])
    }
}

impl PointDistance for SlotPoint {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.x - point[0];
        let dy = self.y - point[1];
        dx * dx + dy * dy
    }

    fn contains_point(&self, point: &[f32; 2]) -> bool {
        (self.x - point[0]).abs() < f32::EPSILON && (self.y - point[1]).abs() < f32::EPSILON
    }
}

/// Spatial index over one tick's node positions.
///
/// Uses an R*-tree for radius queries.
pub struct SpatialIndex {
    tree: RTree<SlotPoint>,
}

impl SpatialIndex {
    /// Create a new empty spatial index.
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Rebuild the index from a list of (slot, x, y) tuples.
    pub fn rebuild(&mut self, points: &[(usize, f32, f32)]) {
        let slot_points: Vec<_> = points
            .iter()
            .map(|&(slot, x, y)| SlotPoint::new(slot, x, y))
            .collect();

        self.tree = RTree::bulk_load(slot_points);
    }

    /// Find all slots within a radius of a point, the boundary included.
    pub fn in_radius(&self, x: f32, y: f32, radius: f32) -> impl Iterator<Item = usize> + '_ {
        let radius_sq = radius * radius;
        self.tree
            .locate_within_distance([x, y], radius_sq)
            .map(|point| point.slot)
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}
