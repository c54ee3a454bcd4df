use scarp_geom::{Vec2, Vec3};
use scarp_voxel::Voxel;

use crate::mesh_build::MeshBuild;

/// Accumulates the extruded side geometry for one material slot.
///
/// Every cached crossing contributes a bottom/top vertex pair carrying the
/// crossing normal; sections are quads spanning two cached pairs, wound so
/// the face normal agrees with the stored crossing normal. Walls only appear
/// where a filled corner borders empty space, which is why the cache mirrors
/// the surface vocabulary but is fed from the `*_with_wall` cache calls only.
pub struct WallCache {
    bottom: f32,
    top: f32,

    build: MeshBuild,
    mesh: MeshBuild,

    x_edges_min: Vec<u32>,
    x_edges_max: Vec<u32>,
    y_edge_min: u32,
    y_edge_max: u32,
}

impl WallCache {
    pub fn new(resolution: usize, bottom: f32, top: f32) -> Self {
        Self {
            bottom,
            top,
            build: MeshBuild::default(),
            mesh: MeshBuild::default(),
            x_edges_min: vec![0; resolution],
            x_edges_max: vec![0; resolution],
            y_edge_min: 0,
            y_edge_max: 0,
        }
    }

    pub fn clear(&mut self) {
        self.build.clear();
    }

    pub fn apply(&mut self) {
        self.mesh.clone_from(&self.build);
    }

    pub fn mesh(&self) -> &MeshBuild {
        &self.mesh
    }

    // --- crossing caches ---

    pub fn cache_x_edge(&mut self, i: usize, voxel: &Voxel) {
        self.x_edges_max[i] = self.add_pair(voxel.x_edge_point(), voxel.x_normal.into());
    }

    pub fn cache_y_edge(&mut self, voxel: &Voxel) {
        self.y_edge_max = self.add_pair(voxel.y_edge_point(), voxel.y_normal.into());
    }

    pub fn prepare_next_cell(&mut self) {
        self.y_edge_min = self.y_edge_max;
    }

    pub fn prepare_next_row(&mut self) {
        std::mem::swap(&mut self.x_edges_min, &mut self.x_edges_max);
    }

    // --- full sections between two cached crossings ---

    pub fn add_ab_ac(&mut self, i: usize) {
        self.section(self.x_edges_min[i], self.y_edge_min);
    }

    pub fn add_ab_ac_split(&mut self, i: usize, extra: Vec2) {
        self.split_section(self.x_edges_min[i], self.y_edge_min, extra);
    }

    pub fn add_ab_bd(&mut self, i: usize) {
        self.section(self.x_edges_min[i], self.y_edge_max);
    }

    pub fn add_ab_cd(&mut self, i: usize) {
        self.section(self.x_edges_min[i], self.x_edges_max[i]);
    }

    pub fn add_ac_ab(&mut self, i: usize) {
        self.section(self.y_edge_min, self.x_edges_min[i]);
    }

    pub fn add_ac_bd(&mut self) {
        self.section(self.y_edge_min, self.y_edge_max);
    }

    pub fn add_ac_cd(&mut self, i: usize) {
        self.section(self.y_edge_min, self.x_edges_max[i]);
    }

    pub fn add_ac_cd_split(&mut self, i: usize, extra: Vec2) {
        self.split_section(self.y_edge_min, self.x_edges_max[i], extra);
    }

    pub fn add_bd_ab(&mut self, i: usize) {
        self.section(self.y_edge_max, self.x_edges_min[i]);
    }

    pub fn add_bd_ab_split(&mut self, i: usize, extra: Vec2) {
        self.split_section(self.y_edge_max, self.x_edges_min[i], extra);
    }

    pub fn add_bd_ac(&mut self) {
        self.section(self.y_edge_max, self.y_edge_min);
    }

    pub fn add_bd_cd(&mut self, i: usize) {
        self.section(self.y_edge_max, self.x_edges_max[i]);
    }

    pub fn add_cd_ab(&mut self, i: usize) {
        self.section(self.x_edges_max[i], self.x_edges_min[i]);
    }

    pub fn add_cd_ac(&mut self, i: usize) {
        self.section(self.x_edges_max[i], self.y_edge_min);
    }

    pub fn add_cd_bd(&mut self, i: usize) {
        self.section(self.x_edges_max[i], self.y_edge_max);
    }

    pub fn add_cd_bd_split(&mut self, i: usize, extra: Vec2) {
        self.split_section(self.x_edges_max[i], self.y_edge_max, extra);
    }

    // --- half sections between a cached crossing and a feature vertex ---

    pub fn add_from_ab(&mut self, i: usize, extra: Vec2) {
        self.half_section_from(self.x_edges_min[i], extra);
    }

    pub fn add_to_ab(&mut self, i: usize, extra: Vec2) {
        self.half_section_to(extra, self.x_edges_min[i]);
    }

    pub fn add_from_ac(&mut self, extra: Vec2) {
        self.half_section_from(self.y_edge_min, extra);
    }

    pub fn add_to_ac(&mut self, extra: Vec2) {
        self.half_section_to(extra, self.y_edge_min);
    }

    pub fn add_from_bd(&mut self, extra: Vec2) {
        self.half_section_from(self.y_edge_max, extra);
    }

    pub fn add_to_bd(&mut self, extra: Vec2) {
        self.half_section_to(extra, self.y_edge_max);
    }

    pub fn add_from_cd(&mut self, i: usize, extra: Vec2) {
        self.half_section_from(self.x_edges_max[i], extra);
    }

    pub fn add_to_cd(&mut self, i: usize, extra: Vec2) {
        self.half_section_to(extra, self.x_edges_max[i]);
    }

    // --- primitives ---

    /// Bottom vertex first; the top partner is always at `index + 1`.
    fn add_pair(&mut self, p: Vec2, n: Vec3) -> u32 {
        let i = self.build.add_vertex(p, self.bottom, n);
        self.build.add_vertex(p, self.top, n);
        i
    }

    /// Inserts an extrusion pair for a feature vertex, reusing the normal of
    /// an already cached vertex.
    fn add_point(&mut self, extra: Vec2, normal_index: u32) -> u32 {
        let n = self.build.normal(normal_index);
        let i = self.build.add_vertex(extra, self.bottom, n);
        self.build.add_vertex(extra, self.top, n);
        i
    }

    /// One quad from pair `from` to pair `to`. With `bottom < top` this winds
    /// so the face normal is the counter-clockwise perpendicular of the
    /// `from -> to` direction, matching the outward crossing normals.
    fn section(&mut self, from: u32, to: u32) {
        self.build.add_triangle(from, from + 1, to + 1);
        self.build.add_triangle(from, to + 1, to);
    }

    fn split_section(&mut self, from: u32, to: u32, extra: Vec2) {
        let mid = self.add_point(extra, from);
        self.section(from, mid);
        let mid = self.add_point(extra, to);
        self.section(mid, to);
    }

    fn half_section_from(&mut self, from: u32, extra: Vec2) {
        let mid = self.add_point(extra, from);
        self.section(from, mid);
    }

    fn half_section_to(&mut self, extra: Vec2, to: u32) {
        let mid = self.add_point(extra, to);
        self.section(mid, to);
    }
}
