//! Tile grids: classification sweep, boundary stitching, and the tile map.
#![forbid(unsafe_code)]

pub mod case;
pub mod grid;
pub mod map;

pub use case::CellCase;
pub use grid::{GridConfig, NeighborEdges, VoxelGrid};
pub use map::{MapConfig, VoxelMap};
