use scarp_edit::Stencil;
use scarp_geom::Vec2;

use crate::grid::{GridConfig, NeighborEdges, VoxelGrid};

/// Layout parameters: a square arrangement of `chunk_resolution^2` tiles
/// covering `size` world units, each tile `voxel_resolution` voxels across.
#[derive(Clone, Copy, Debug)]
pub struct MapConfig {
    pub size: f32,
    pub chunk_resolution: usize,
    pub voxel_resolution: usize,
    pub max_feature_angle: f32,
    pub max_parallel_angle: f32,
    pub wall_bottom: f32,
    pub wall_top: f32,
    /// Snap edit centers to the voxel lattice before applying.
    pub snap_to_grid: bool,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            size: 2.0,
            chunk_resolution: 2,
            voxel_resolution: 8,
            max_feature_angle: 135.0,
            max_parallel_angle: 8.0,
            wall_bottom: -1.0,
            wall_top: 0.0,
            snap_to_grid: false,
        }
    }
}

/// Owns the tile array and the static adjacency between tiles. World space is
/// `[0, size)` on both axes with tile (0,0) at the origin; every tile's
/// voxels, crossings, and meshes live in tile-local coordinates.
pub struct VoxelMap {
    chunk_resolution: usize,
    voxel_resolution: usize,
    chunk_size: f32,
    voxel_size: f32,
    snap_to_grid: bool,
    chunks: Vec<VoxelGrid>,
}

impl VoxelMap {
    /// Builds the tiles, wires neighbor indices once, and triangulates the
    /// (initially empty) map. `slot_count` is material count + 1.
    pub fn new(config: &MapConfig, slot_count: usize) -> Self {
        assert!(config.chunk_resolution >= 1, "need at least one chunk");
        let chunk_resolution = config.chunk_resolution;
        let chunk_size = config.size / chunk_resolution as f32;
        let voxel_size = chunk_size / config.voxel_resolution as f32;

        let grid_config = GridConfig {
            resolution: config.voxel_resolution,
            size: chunk_size,
            max_feature_angle: config.max_feature_angle,
            max_parallel_angle: config.max_parallel_angle,
            wall_bottom: config.wall_bottom,
            wall_top: config.wall_top,
        };
        let mut chunks: Vec<VoxelGrid> = (0..chunk_resolution * chunk_resolution)
            .map(|_| VoxelGrid::new(&grid_config, slot_count))
            .collect();

        for y in 0..chunk_resolution {
            for x in 0..chunk_resolution {
                let i = y * chunk_resolution + x;
                let east = x + 1 < chunk_resolution;
                let north = y + 1 < chunk_resolution;
                chunks[i].set_neighbors(
                    east.then_some(i + 1),
                    north.then_some(i + chunk_resolution),
                    (east && north).then_some(i + chunk_resolution + 1),
                );
            }
        }

        let mut map = Self {
            chunk_resolution,
            voxel_resolution: config.voxel_resolution,
            chunk_size,
            voxel_size,
            snap_to_grid: config.snap_to_grid,
            chunks,
        };
        map.retriangulate_all();
        map
    }

    #[inline]
    pub fn chunk_resolution(&self) -> usize {
        self.chunk_resolution
    }

    #[inline]
    pub fn voxel_resolution(&self) -> usize {
        self.voxel_resolution
    }

    #[inline]
    pub fn chunk_size(&self) -> f32 {
        self.chunk_size
    }

    #[inline]
    pub fn voxel_size(&self) -> f32 {
        self.voxel_size
    }

    pub fn chunks(&self) -> &[VoxelGrid] {
        &self.chunks
    }

    #[inline]
    pub fn chunk(&self, x: usize, y: usize) -> &VoxelGrid {
        &self.chunks[y * self.chunk_resolution + x]
    }

    /// Owned copies of the boundary voxels tile `i` may read while rebuilding.
    pub fn snapshot_edges(&self, i: usize) -> NeighborEdges {
        let grid = &self.chunks[i];
        NeighborEdges {
            x_column: grid.neighbor_x().map(|j| self.chunks[j].first_column()),
            y_row: grid.neighbor_y().map(|j| self.chunks[j].first_row()),
            corner: grid.neighbor_t().map(|j| self.chunks[j].origin_voxel()),
        }
    }

    /// Populates every voxel's state from map-wide voxel coordinates, then
    /// seeds crossings and rebuilds all meshes. Fields settle first across
    /// the whole map, meshes second, so every tile stitches against final
    /// neighbor data.
    pub fn fill_states(&mut self, state_at: impl Fn(usize, usize) -> i32) {
        let vr = self.voxel_resolution;
        for cy in 0..self.chunk_resolution {
            for cx in 0..self.chunk_resolution {
                let chunk = &mut self.chunks[cy * self.chunk_resolution + cx];
                let states: Vec<i32> = (0..vr * vr)
                    .map(|i| state_at(cx * vr + i % vr, cy * vr + i / vr))
                    .collect();
                chunk.set_states(&states);
            }
        }
        for i in 0..self.chunks.len() {
            let edges = self.snapshot_edges(i);
            self.chunks[i].seed_crossings(&edges);
        }
        self.retriangulate_all();
    }

    /// Applies a world-space brush to every tile it can affect.
    ///
    /// The affected tile range is widened by one voxel so boundary crossings
    /// owned by the -X/-Y tile get refreshed, and tiles are visited in
    /// descending row-major order: a tile reads its +X/+Y neighbors' boundary
    /// voxels, so those neighbors must carry their new states first.
    pub fn apply(&mut self, stencil: &Stencil) {
        let mut center = stencil.center;
        if self.snap_to_grid {
            center.x = ((center.x / self.voxel_size) as i32 as f32 + 0.5) * self.voxel_size;
            center.y = ((center.y / self.voxel_size) as i32 as f32 + 0.5) * self.voxel_size;
        }
        let stencil = stencil.with_center(center);

        let chunk_resolution = self.chunk_resolution as i32;
        let mut x_start = ((stencil.x_start() - self.voxel_size) / self.chunk_size) as i32;
        if x_start < 0 {
            x_start = 0;
        }
        let mut x_end = ((stencil.x_end() + self.voxel_size) / self.chunk_size) as i32;
        if x_end >= chunk_resolution {
            x_end = chunk_resolution - 1;
        }
        let mut y_start = ((stencil.y_start() - self.voxel_size) / self.chunk_size) as i32;
        if y_start < 0 {
            y_start = 0;
        }
        let mut y_end = ((stencil.y_end() + self.voxel_size) / self.chunk_size) as i32;
        if y_end >= chunk_resolution {
            y_end = chunk_resolution - 1;
        }

        log::debug!(
            target: "edits",
            "apply {:?} r={} fill={} at ({:.3}, {:.3}): chunks x {}..={} y {}..={}",
            stencil.shape, stencil.radius, stencil.fill, center.x, center.y,
            x_start, x_end, y_start, y_end
        );

        for y in (y_start..=y_end).rev() {
            for x in (x_start..=x_end).rev() {
                let i = (y * chunk_resolution + x) as usize;
                let local = stencil.with_center(
                    center - Vec2::new(x as f32 * self.chunk_size, y as f32 * self.chunk_size),
                );
                let edges = self.snapshot_edges(i);
                self.chunks[i].apply(&local, &edges);
            }
        }
    }

    fn retriangulate_all(&mut self) {
        for i in 0..self.chunks.len() {
            let edges = self.snapshot_edges(i);
            self.chunks[i].triangulate(&edges);
        }
    }
}
