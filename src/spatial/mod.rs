//! Spatial indexing for neighbour queries.
//!
//! This module provides an R-tree based spatial index used to find the node
//! pairs close enough to repel each other.

mod rtree;

pub use rtree::SpatialIndex;
