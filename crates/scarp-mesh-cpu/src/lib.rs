//! CPU mesh accumulation: per-material surface and wall caches (engine-only).
#![forbid(unsafe_code)]

pub mod fill;
pub mod mesh_build;
pub mod surface;
pub mod wall;

pub use fill::{FillOp, SlotCache};
pub use mesh_build::MeshBuild;
pub use surface::SurfaceCache;
pub use wall::WallCache;
