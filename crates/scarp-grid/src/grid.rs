use scarp_edit::Stencil;
use scarp_geom::Vec2;
use scarp_mesh_cpu::{FillOp, MeshBuild, SlotCache};
use scarp_voxel::{Cell, FeaturePoint, NO_CROSSING, Voxel};

use crate::case::CellCase;

/// Construction parameters for one tile grid. Angles are in degrees and are
/// converted to cosine thresholds once at construction.
#[derive(Clone, Copy, Debug)]
pub struct GridConfig {
    pub resolution: usize,
    pub size: f32,
    pub max_feature_angle: f32,
    pub max_parallel_angle: f32,
    pub wall_bottom: f32,
    pub wall_top: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            resolution: 8,
            size: 1.0,
            max_feature_angle: 135.0,
            max_parallel_angle: 8.0,
            wall_bottom: -1.0,
            wall_top: 0.0,
        }
    }
}

/// Snapshot of the neighbor boundary voxels a tile may read while rebuilding:
/// the +X neighbor's first column, the +Y neighbor's first row, and the
/// diagonal neighbor's origin voxel. A missing component leaves that side as
/// a hard, open boundary. Captured by the owning map right before the rebuild
/// so cross-tile access stays read-only.
#[derive(Default, Clone, Debug)]
pub struct NeighborEdges {
    pub x_column: Option<Vec<Voxel>>,
    pub y_row: Option<Vec<Voxel>>,
    pub corner: Option<Voxel>,
}

/// Fixed pool of three scratch voxels used to materialize neighbor boundary
/// voxels in local space. Roles rotate by index; gap cells need the previous
/// dummy (as corner b or c) alongside the fresh one, so the spare slot always
/// holds the dummy retired last.
struct DummyPool {
    slots: [Voxel; 3],
    x: usize,
    y: usize,
    t: usize,
}

impl DummyPool {
    fn new() -> Self {
        Self {
            slots: [Voxel::default(); 3],
            x: 0,
            y: 1,
            t: 2,
        }
    }

    fn x(&self) -> Voxel {
        self.slots[self.x]
    }

    fn y(&self) -> Voxel {
        self.slots[self.y]
    }

    fn t(&self) -> Voxel {
        self.slots[self.t]
    }

    fn set_x(&mut self, src: &Voxel, offset: f32) {
        self.slots[self.x].become_x_dummy_of(src, offset);
    }

    fn set_y(&mut self, src: &Voxel, offset: f32) {
        self.slots[self.y].become_y_dummy_of(src, offset);
    }

    fn set_t(&mut self, src: &Voxel, offset: f32) {
        self.slots[self.t].become_t_dummy_of(src, offset);
    }

    /// Writes the next X dummy into the spare slot and promotes it; the
    /// previous X dummy becomes the spare, still readable via `t()`.
    fn advance_x(&mut self, src: &Voxel, offset: f32) {
        self.slots[self.t].become_x_dummy_of(src, offset);
        std::mem::swap(&mut self.x, &mut self.t);
    }

    fn advance_y(&mut self, src: &Voxel, offset: f32) {
        self.slots[self.t].become_y_dummy_of(src, offset);
        std::mem::swap(&mut self.y, &mut self.t);
    }
}

/// One tile: an N x N voxel field, its per-material mesh caches, and the
/// classification sweep that turns one into the other.
///
/// Neighbor links are indices into the tile array owned by the map; they are
/// wired once at assembly and only ever resolved into `NeighborEdges`
/// snapshots, so adjacency stays a read-only graph with no ownership cycles.
pub struct VoxelGrid {
    resolution: usize,
    voxel_size: f32,
    grid_size: f32,
    sharp_feature_limit: f32,
    parallel_limit: f32,

    voxels: Vec<Voxel>,
    /// Indexed by material state; slot 0 is reserved for empty and never
    /// receives geometry.
    slots: Vec<SlotCache>,
    dummies: DummyPool,

    neighbor_x: Option<usize>,
    neighbor_y: Option<usize>,
    neighbor_t: Option<usize>,
}

impl VoxelGrid {
    /// `slot_count` is the number of fill states including the reserved
    /// empty slot 0, i.e. material count + 1.
    pub fn new(config: &GridConfig, slot_count: usize) -> Self {
        assert!(config.resolution >= 2, "grid needs at least one cell");
        assert!(slot_count >= 1, "slot 0 is reserved and must exist");
        let resolution = config.resolution;
        let voxel_size = config.size / resolution as f32;
        let mut voxels = Vec::with_capacity(resolution * resolution);
        for y in 0..resolution {
            for x in 0..resolution {
                voxels.push(Voxel::new(x, y, voxel_size));
            }
        }
        let slots = (0..slot_count)
            .map(|_| SlotCache::new(resolution, config.wall_bottom, config.wall_top))
            .collect();
        Self {
            resolution,
            voxel_size,
            grid_size: config.size,
            sharp_feature_limit: config.max_feature_angle.to_radians().cos(),
            parallel_limit: config.max_parallel_angle.to_radians().cos(),
            voxels,
            slots,
            dummies: DummyPool::new(),
            neighbor_x: None,
            neighbor_y: None,
            neighbor_t: None,
        }
    }

    #[inline]
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    #[inline]
    pub fn voxel_size(&self) -> f32 {
        self.voxel_size
    }

    #[inline]
    pub fn grid_size(&self) -> f32 {
        self.grid_size
    }

    #[inline]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn voxels(&self) -> &[Voxel] {
        &self.voxels
    }

    pub fn voxels_mut(&mut self) -> &mut [Voxel] {
        &mut self.voxels
    }

    #[inline]
    pub fn voxel(&self, x: usize, y: usize) -> &Voxel {
        &self.voxels[y * self.resolution + x]
    }

    /// Wired once during tile-map assembly; read-only afterwards.
    pub fn set_neighbors(&mut self, x: Option<usize>, y: Option<usize>, t: Option<usize>) {
        self.neighbor_x = x;
        self.neighbor_y = y;
        self.neighbor_t = t;
    }

    pub fn neighbor_x(&self) -> Option<usize> {
        self.neighbor_x
    }

    pub fn neighbor_y(&self) -> Option<usize> {
        self.neighbor_y
    }

    pub fn neighbor_t(&self) -> Option<usize> {
        self.neighbor_t
    }

    /// Copy of the west boundary column, bottom to top — what an -X neighbor
    /// reads while stitching.
    pub fn first_column(&self) -> Vec<Voxel> {
        (0..self.resolution)
            .map(|y| self.voxels[y * self.resolution])
            .collect()
    }

    /// Copy of the south boundary row, west to east.
    pub fn first_row(&self) -> Vec<Voxel> {
        self.voxels[..self.resolution].to_vec()
    }

    pub fn origin_voxel(&self) -> Voxel {
        self.voxels[0]
    }

    /// Overwrites all voxel states from a row-major array.
    pub fn set_states(&mut self, states: &[i32]) {
        assert_eq!(states.len(), self.voxels.len(), "state array length");
        for (v, s) in self.voxels.iter_mut().zip(states) {
            v.state = *s;
        }
    }

    pub fn surface_mesh(&self, state: i32) -> &MeshBuild {
        self.slots[state as usize].surface_mesh()
    }

    pub fn wall_mesh(&self, state: i32) -> &MeshBuild {
        self.slots[state as usize].wall_mesh()
    }

    /// Derives crossings for every adjacent differing pair from states alone:
    /// midpoint position, axis normal oriented from the higher state toward
    /// the lower. Used when a tile is populated from initial data instead of
    /// through a stencil; stencil edits refine these with the brush
    /// silhouette afterwards.
    pub fn seed_crossings(&mut self, edges: &NeighborEdges) {
        let res = self.resolution;
        for y in 0..res {
            for x in 0..res {
                let i = y * res + x;
                if x + 1 < res {
                    let b = self.voxels[i + 1];
                    seed_x_pair(&mut self.voxels[i], &b);
                } else if let Some(col) = &edges.x_column {
                    self.dummies.set_x(&col[y], self.grid_size);
                    let dummy = self.dummies.x();
                    seed_x_pair(&mut self.voxels[i], &dummy);
                }
                if y + 1 < res {
                    let c = self.voxels[i + res];
                    seed_y_pair(&mut self.voxels[i], &c);
                } else if let Some(row) = &edges.y_row {
                    self.dummies.set_y(&row[x], self.grid_size);
                    let dummy = self.dummies.y();
                    seed_y_pair(&mut self.voxels[i], &dummy);
                }
            }
        }
    }

    /// Applies a brush in tile-local space and rebuilds all meshes.
    ///
    /// The footprint is clamped to the voxel range (an edit that misses the
    /// tile is a no-op apart from boundary-crossing upkeep), crossings are
    /// recomputed in a one-voxel-wider dirty rectangle that follows the
    /// stitching dummies across tile edges, and the whole tile is re-swept.
    /// Full re-sweep over true delta triangulation is deliberate: N is small
    /// per tile and rebuild cost stays O(N^2).
    pub fn apply(&mut self, stencil: &Stencil, edges: &NeighborEdges) {
        let resolution = self.resolution as i32;
        let mut x_start = (stencil.x_start() / self.voxel_size) as i32;
        if x_start < 0 {
            x_start = 0;
        }
        x_start = x_start.min(resolution - 1);
        let mut x_end = (stencil.x_end() / self.voxel_size) as i32;
        if x_end >= resolution {
            x_end = resolution - 1;
        }
        x_end = x_end.max(-1);
        let mut y_start = (stencil.y_start() / self.voxel_size) as i32;
        if y_start < 0 {
            y_start = 0;
        }
        y_start = y_start.min(resolution - 1);
        let mut y_end = (stencil.y_end() / self.voxel_size) as i32;
        if y_end >= resolution {
            y_end = resolution - 1;
        }
        y_end = y_end.max(-1);

        for y in y_start..=y_end {
            let mut i = (y * resolution + x_start) as usize;
            for _ in x_start..=x_end {
                stencil.apply_to(&mut self.voxels[i]);
                i += 1;
            }
        }
        log::trace!(
            target: "edits",
            "stencil fill={} touched voxels x {}..={} y {}..={}",
            stencil.fill, x_start, x_end, y_start, y_end
        );

        self.set_crossings(stencil, x_start, x_end, y_start, y_end, edges);
        self.triangulate(edges);
    }

    /// Clears, re-sweeps, and republishes every material's caches.
    pub fn triangulate(&mut self, edges: &NeighborEdges) {
        for slot in &mut self.slots[1..] {
            slot.clear();
        }

        self.fill_first_row_cache(edges);
        self.triangulate_cell_rows(edges);
        if edges.y_row.is_some() {
            self.triangulate_gap_row(edges);
        }

        for slot in &mut self.slots[1..] {
            slot.apply();
        }
    }

    // --- crossing recomputation (dirty rectangle) ---

    fn set_crossings(
        &mut self,
        stencil: &Stencil,
        mut x_start: i32,
        mut x_end: i32,
        mut y_start: i32,
        mut y_end: i32,
        edges: &NeighborEdges,
    ) {
        let resolution = self.resolution as i32;
        let mut cross_horizontal_gap = false;
        let mut include_last_vertical_row = false;
        let mut cross_vertical_gap = false;

        if x_start > 0 {
            x_start -= 1;
        }
        if x_end == resolution - 1 {
            x_end -= 1;
            cross_horizontal_gap = edges.x_column.is_some();
        }
        if y_start > 0 {
            y_start -= 1;
        }
        if y_end == resolution - 1 {
            y_end -= 1;
            include_last_vertical_row = true;
            cross_vertical_gap = edges.y_row.is_some();
        }

        for y in y_start..=y_end {
            let mut i = (y * resolution + x_start) as usize;
            for _ in x_start..=x_end {
                let b = self.voxels[i + 1];
                stencil.set_horizontal_crossing(&mut self.voxels[i], &b);
                let up = self.voxels[i + self.resolution];
                stencil.set_vertical_crossing(&mut self.voxels[i], &up);
                i += 1;
            }

            let up = self.voxels[i + self.resolution];
            stencil.set_vertical_crossing(&mut self.voxels[i], &up);
            if cross_horizontal_gap {
                if let Some(col) = &edges.x_column {
                    self.dummies.set_x(&col[y as usize], self.grid_size);
                    let dummy = self.dummies.x();
                    stencil.set_horizontal_crossing(&mut self.voxels[i], &dummy);
                }
            }
        }

        if include_last_vertical_row {
            let mut i = self.voxels.len() - self.resolution + x_start as usize;
            for x in x_start..=x_end {
                let b = self.voxels[i + 1];
                stencil.set_horizontal_crossing(&mut self.voxels[i], &b);
                if cross_vertical_gap {
                    if let Some(row) = &edges.y_row {
                        self.dummies.set_y(&row[x as usize], self.grid_size);
                        let dummy = self.dummies.y();
                        stencil.set_vertical_crossing(&mut self.voxels[i], &dummy);
                    }
                }
                i += 1;
            }

            if cross_vertical_gap {
                if let Some(row) = &edges.y_row {
                    self.dummies.set_y(&row[(x_end + 1) as usize], self.grid_size);
                    let dummy = self.dummies.y();
                    stencil.set_vertical_crossing(&mut self.voxels[i], &dummy);
                }
            }
            if cross_horizontal_gap {
                if let Some(col) = &edges.x_column {
                    self.dummies
                        .set_x(&col[self.resolution - 1], self.grid_size);
                    let dummy = self.dummies.x();
                    stencil.set_horizontal_crossing(&mut self.voxels[i], &dummy);
                }
            }
        }
    }

    // --- triangulation sweep ---

    fn fill_first_row_cache(&mut self, edges: &NeighborEdges) {
        self.cache_first_corner(self.voxels[0]);
        let mut i = 0;
        while i < self.resolution - 1 {
            self.cache_next_edge_and_corner(i, self.voxels[i], self.voxels[i + 1]);
            i += 1;
        }

        if let Some(col) = &edges.x_column {
            self.dummies.set_x(&col[0], self.grid_size);
            let dummy = self.dummies.x();
            self.cache_next_edge_and_corner(i, self.voxels[i], dummy);
        }
    }

    fn cache_first_corner(&mut self, voxel: Voxel) {
        if voxel.filled() {
            self.slots[voxel.state as usize].cache_first_corner(&voxel);
        }
    }

    fn cache_next_edge_and_corner(&mut self, i: usize, x_min: Voxel, x_max: Voxel) {
        if x_min.state != x_max.state {
            if x_min.filled() {
                if x_max.filled() {
                    // Both materials share the crossing vertex, each in its
                    // own buffers; no wall between two filled regions.
                    self.slots[x_min.state as usize].cache_x_edge(i, &x_min);
                    self.slots[x_max.state as usize].cache_x_edge(i, &x_min);
                } else {
                    self.slots[x_min.state as usize].cache_x_edge_with_wall(i, &x_min);
                }
            } else {
                self.slots[x_max.state as usize].cache_x_edge_with_wall(i, &x_min);
            }
        }

        if x_max.filled() {
            self.slots[x_max.state as usize].cache_next_corner(i, &x_max);
        }
    }

    fn cache_next_middle_edge(&mut self, y_min: Voxel, y_max: Voxel) {
        for slot in &mut self.slots[1..] {
            slot.prepare_next_cell();
        }

        if y_min.state != y_max.state {
            if y_min.filled() {
                if y_max.filled() {
                    self.slots[y_min.state as usize].cache_y_edge(&y_min);
                    self.slots[y_max.state as usize].cache_y_edge(&y_min);
                } else {
                    self.slots[y_min.state as usize].cache_y_edge_with_wall(&y_min);
                }
            } else {
                self.slots[y_max.state as usize].cache_y_edge_with_wall(&y_min);
            }
        }
    }

    fn swap_row_caches(&mut self) {
        for slot in &mut self.slots[1..] {
            slot.prepare_next_row();
        }
    }

    fn triangulate_cell_rows(&mut self, edges: &NeighborEdges) {
        let resolution = self.resolution;
        let cells = resolution - 1;
        let mut i = 0;
        for y in 0..cells {
            self.swap_row_caches();
            self.cache_first_corner(self.voxels[i + resolution]);
            self.cache_next_middle_edge(self.voxels[i], self.voxels[i + resolution]);

            for x in 0..cells {
                let a = self.voxels[i];
                let b = self.voxels[i + 1];
                let c = self.voxels[i + resolution];
                let d = self.voxels[i + resolution + 1];

                self.cache_next_edge_and_corner(x, c, d);
                self.cache_next_middle_edge(b, d);
                self.triangulate_cell(x, a, b, c, d);
                i += 1;
            }

            if let Some(col) = &edges.x_column {
                self.triangulate_gap_cell(col, i, y);
            }
            i += 1;
        }
    }

    /// Closes a row against the +X neighbor by substituting dummies for the
    /// missing east voxels; the same cell path as the interior runs unchanged.
    fn triangulate_gap_cell(&mut self, x_column: &[Voxel], i: usize, y: usize) {
        self.dummies.advance_x(&x_column[y + 1], self.grid_size);

        let cache_index = self.resolution - 1;
        let dummy_t = self.dummies.t();
        let dummy_x = self.dummies.x();
        self.cache_next_edge_and_corner(cache_index, self.voxels[i + self.resolution], dummy_x);
        self.cache_next_middle_edge(dummy_t, dummy_x);
        self.triangulate_cell(
            cache_index,
            self.voxels[i],
            dummy_t,
            self.voxels[i + self.resolution],
            dummy_x,
        );
    }

    /// Triangulates the extra row between this tile's top edge and the +Y
    /// neighbor's first row, plus the single corner cell against the diagonal
    /// neighbor when the +X edge is also stitched.
    fn triangulate_gap_row(&mut self, edges: &NeighborEdges) {
        let Some(row) = &edges.y_row else {
            return;
        };
        self.dummies.set_y(&row[0], self.grid_size);

        let cells = self.resolution - 1;
        let offset = cells * self.resolution;
        self.swap_row_caches();
        self.cache_first_corner(self.dummies.y());
        self.cache_next_middle_edge(self.voxels[cells * self.resolution], self.dummies.y());

        for x in 0..cells {
            self.dummies.advance_y(&row[x + 1], self.grid_size);

            let dummy_t = self.dummies.t();
            let dummy_y = self.dummies.y();
            self.cache_next_edge_and_corner(x, dummy_t, dummy_y);
            self.cache_next_middle_edge(self.voxels[x + offset + 1], dummy_y);
            self.triangulate_cell(
                x,
                self.voxels[x + offset],
                self.voxels[x + offset + 1],
                dummy_t,
                dummy_y,
            );
        }

        if edges.x_column.is_some() {
            if let Some(corner) = &edges.corner {
                self.dummies.set_t(corner, self.grid_size);
                let dummy_x = self.dummies.x();
                let dummy_y = self.dummies.y();
                let dummy_t = self.dummies.t();
                self.cache_next_edge_and_corner(cells, dummy_y, dummy_t);
                self.cache_next_middle_edge(dummy_x, dummy_t);
                self.triangulate_cell(
                    cells,
                    self.voxels[self.voxels.len() - 1],
                    dummy_x,
                    dummy_y,
                    dummy_t,
                );
            }
        }
    }

    fn triangulate_cell(&mut self, x: usize, a: Voxel, b: Voxel, c: Voxel, d: Voxel) {
        let cell = Cell::new(x, a, b, c, d, self.sharp_feature_limit, self.parallel_limit);
        match CellCase::classify(a.state, b.state, c.state, d.state) {
            CellCase::Uniform => {
                self.fill(FillOp::Abcd, &cell, FeaturePoint::NONE);
            }
            CellCase::CornerD => {
                let f = cell.feature_ne();
                self.fill(FillOp::Abc, &cell, f);
                self.fill(FillOp::D, &cell, f);
            }
            CellCase::CornerC => {
                let f = cell.feature_nw();
                self.fill(FillOp::Abd, &cell, f);
                self.fill(FillOp::C, &cell, f);
            }
            CellCase::CornerB => {
                let f = cell.feature_se();
                self.fill(FillOp::Acd, &cell, f);
                self.fill(FillOp::B, &cell, f);
            }
            CellCase::CornerA => {
                let f = cell.feature_sw();
                self.fill(FillOp::A, &cell, f);
                self.fill(FillOp::Bcd, &cell, f);
            }
            CellCase::SplitHorizontal => {
                let f = cell.feature_ew();
                self.fill(FillOp::Ab, &cell, f);
                self.fill(FillOp::Cd, &cell, f);
            }
            CellCase::SplitVertical => {
                let f = cell.feature_ns();
                self.fill(FillOp::Ac, &cell, f);
                self.fill(FillOp::Bd, &cell, f);
            }
            CellCase::PairAb => {
                let f = cell.feature_new();
                self.fill(FillOp::Ab, &cell, f);
                self.fill(FillOp::C, &cell, f);
                self.fill(FillOp::D, &cell, f);
            }
            CellCase::PairAc => {
                let f = cell.feature_nse();
                self.fill(FillOp::Ac, &cell, f);
                self.fill(FillOp::B, &cell, f);
                self.fill(FillOp::D, &cell, f);
            }
            CellCase::PairBd => {
                let f = cell.feature_nsw();
                self.fill(FillOp::A, &cell, f);
                self.fill(FillOp::Bd, &cell, f);
                self.fill(FillOp::C, &cell, f);
            }
            CellCase::PairCd => {
                let f = cell.feature_sew();
                self.fill(FillOp::A, &cell, f);
                self.fill(FillOp::B, &cell, f);
                self.fill(FillOp::Cd, &cell, f);
            }
            CellCase::Diagonal => self.triangulate_diagonal(&cell),
            CellCase::DiagonalBc => self.triangulate_diagonal_bc(&cell),
            CellCase::DiagonalAd => self.triangulate_diagonal_ad(&cell),
            CellCase::Distinct => {
                self.fill_joined_corners(
                    &cell,
                    cell.feature_sw(),
                    cell.feature_se(),
                    cell.feature_nw(),
                    cell.feature_ne(),
                );
            }
        }
    }

    /// Double saddle (a=d vs b=c): both connection tests get a say, then the
    /// two-filled fallback merges everything around an averaged center.
    fn triangulate_diagonal(&mut self, cell: &Cell) {
        let f_a = cell.feature_sw();
        let mut f_b = cell.feature_se();
        let mut f_c = cell.feature_nw();
        let f_d = cell.feature_ne();

        if cell.has_connection_ad(f_a, f_d) {
            f_b.exists &= cell.is_inside_abd(f_b.position);
            f_c.exists &= cell.is_inside_acd(f_c.position);
            self.fill(FillOp::AdToB, cell, f_b);
            self.fill(FillOp::AdToC, cell, f_c);
            self.fill(FillOp::B, cell, f_b);
            self.fill(FillOp::C, cell, f_c);
        } else if cell.has_connection_bc(f_b, f_c) {
            let mut f_a = f_a;
            let mut f_d = f_d;
            f_a.exists &= cell.is_inside_abc(f_a.position);
            f_d.exists &= cell.is_inside_bcd(f_d.position);
            self.fill(FillOp::A, cell, f_a);
            self.fill(FillOp::D, cell, f_d);
            self.fill(FillOp::BcToA, cell, f_a);
            self.fill(FillOp::BcToD, cell, f_d);
        } else if cell.a.filled() && cell.b.filled() {
            self.fill_joined_corners(cell, f_a, f_b, f_c, f_d);
        } else {
            self.fill(FillOp::A, cell, f_a);
            self.fill(FillOp::B, cell, f_b);
            self.fill(FillOp::C, cell, f_c);
            self.fill(FillOp::D, cell, f_d);
        }
    }

    /// Single saddle b=c with distinct a and d.
    fn triangulate_diagonal_bc(&mut self, cell: &Cell) {
        let mut f_a = cell.feature_sw();
        let f_b = cell.feature_se();
        let f_c = cell.feature_nw();
        let mut f_d = cell.feature_ne();

        if cell.has_connection_bc(f_b, f_c) {
            f_a.exists &= cell.is_inside_abc(f_a.position);
            f_d.exists &= cell.is_inside_bcd(f_d.position);
            self.fill(FillOp::A, cell, f_a);
            self.fill(FillOp::D, cell, f_d);
            self.fill(FillOp::BcToA, cell, f_a);
            self.fill(FillOp::BcToD, cell, f_d);
        } else if cell.b.filled() || cell.has_connection_ad(f_a, f_d) {
            self.fill_joined_corners(cell, f_a, f_b, f_c, f_d);
        } else {
            self.fill(FillOp::A, cell, f_a);
            self.fill(FillOp::D, cell, f_d);
        }
    }

    /// Single saddle a=d with distinct b and c.
    fn triangulate_diagonal_ad(&mut self, cell: &Cell) {
        let f_a = cell.feature_sw();
        let mut f_b = cell.feature_se();
        let mut f_c = cell.feature_nw();
        let f_d = cell.feature_ne();

        if cell.has_connection_ad(f_a, f_d) {
            f_b.exists &= cell.is_inside_abd(f_b.position);
            f_c.exists &= cell.is_inside_acd(f_c.position);
            self.fill(FillOp::AdToB, cell, f_b);
            self.fill(FillOp::AdToC, cell, f_c);
            self.fill(FillOp::B, cell, f_b);
            self.fill(FillOp::C, cell, f_c);
        } else if cell.a.filled() || cell.has_connection_bc(f_b, f_c) {
            self.fill_joined_corners(cell, f_a, f_b, f_c, f_d);
        } else {
            self.fill(FillOp::B, cell, f_b);
            self.fill(FillOp::C, cell, f_c);
        }
    }

    fn fill_joined_corners(
        &mut self,
        cell: &Cell,
        f_a: FeaturePoint,
        f_b: FeaturePoint,
        f_c: FeaturePoint,
        f_d: FeaturePoint,
    ) {
        let mut point = FeaturePoint::average(&[f_a, f_b, f_c, f_d]);
        if !point.exists {
            point.position = cell.average_nesw();
            point.exists = true;
        }

        self.fill(FillOp::A, cell, point);
        self.fill(FillOp::B, cell, point);
        self.fill(FillOp::C, cell, point);
        self.fill(FillOp::D, cell, point);
    }

    /// Routes a fill op to the cache pair of its anchor corner's material;
    /// empty anchors emit nothing.
    fn fill(&mut self, op: FillOp, cell: &Cell, f: FeaturePoint) {
        let state = op.owner_state(cell);
        if state > 0 {
            self.slots[state as usize].fill(op, cell, f);
        }
    }
}

fn seed_x_pair(a: &mut Voxel, b: &Voxel) {
    if a.state == b.state {
        a.x_edge = NO_CROSSING;
        return;
    }
    a.x_edge = 0.5 * (a.position.x + b.position.x);
    a.x_normal = Vec2::new(if a.state > b.state { 1.0 } else { -1.0 }, 0.0);
}

fn seed_y_pair(a: &mut Voxel, c: &Voxel) {
    if a.state == c.state {
        a.y_edge = NO_CROSSING;
        return;
    }
    a.y_edge = 0.5 * (a.position.y + c.position.y);
    a.y_normal = Vec2::new(0.0, if a.state > c.state { 1.0 } else { -1.0 });
}
