use scarp_geom::{Vec2, Vec3};
use scarp_voxel::Voxel;

use crate::mesh_build::MeshBuild;

const SURFACE_NORMAL: Vec3 = Vec3 {
    x: 0.0,
    y: 0.0,
    z: 1.0,
};

/// Accumulates the top-face geometry for one material slot.
///
/// Vertex indices for the crossings and corners of the current cell row are
/// cached so the sweep shares vertices instead of recomputing them:
/// `corners_min/max` hold the row's voxel corners (bottom/top), `x_edges_*`
/// the horizontal-edge crossings per cell column, `y_edge_min/max` the
/// vertical-edge crossings on the left/right of the cell in flight.
///
/// Within a cell, A/B/C/D are the SW/SE/NW/NE corners, `ab`/`cd` the
/// bottom/top crossings, `ac`/`bd` the left/right crossings. Polygons are
/// wound counter-clockwise in the XY plane; the published normal is +Z.
pub struct SurfaceCache {
    build: MeshBuild,
    mesh: MeshBuild,

    corners_min: Vec<u32>,
    corners_max: Vec<u32>,
    x_edges_min: Vec<u32>,
    x_edges_max: Vec<u32>,
    y_edge_min: u32,
    y_edge_max: u32,
}

impl SurfaceCache {
    pub fn new(resolution: usize) -> Self {
        Self {
            build: MeshBuild::default(),
            mesh: MeshBuild::default(),
            corners_min: vec![0; resolution + 1],
            corners_max: vec![0; resolution + 1],
            x_edges_min: vec![0; resolution],
            x_edges_max: vec![0; resolution],
            y_edge_min: 0,
            y_edge_max: 0,
        }
    }

    pub fn clear(&mut self) {
        self.build.clear();
    }

    /// Publishes the accumulated buffers as the renderable mesh.
    pub fn apply(&mut self) {
        self.mesh.clone_from(&self.build);
    }

    pub fn mesh(&self) -> &MeshBuild {
        &self.mesh
    }

    // --- row/edge vertex caching ---

    pub fn cache_first_corner(&mut self, voxel: &Voxel) {
        self.corners_max[0] = self.add_point(voxel.position);
    }

    pub fn cache_next_corner(&mut self, i: usize, voxel: &Voxel) {
        self.corners_max[i + 1] = self.add_point(voxel.position);
    }

    pub fn cache_x_edge(&mut self, i: usize, voxel: &Voxel) {
        self.x_edges_max[i] = self.add_point(voxel.x_edge_point());
    }

    pub fn cache_y_edge(&mut self, voxel: &Voxel) {
        self.y_edge_max = self.add_point(voxel.y_edge_point());
    }

    pub fn prepare_next_cell(&mut self) {
        self.y_edge_min = self.y_edge_max;
    }

    pub fn prepare_next_row(&mut self) {
        std::mem::swap(&mut self.corners_min, &mut self.corners_max);
        std::mem::swap(&mut self.x_edges_min, &mut self.x_edges_max);
    }

    // --- single-corner fills ---

    pub fn add_triangle_a(&mut self, i: usize) {
        self.triangle(self.corners_min[i], self.x_edges_min[i], self.y_edge_min);
    }

    pub fn add_quad_a(&mut self, i: usize, f: Vec2) {
        let f = self.add_point(f);
        self.quad(self.corners_min[i], self.x_edges_min[i], f, self.y_edge_min);
    }

    pub fn add_triangle_b(&mut self, i: usize) {
        self.triangle(self.corners_min[i + 1], self.y_edge_max, self.x_edges_min[i]);
    }

    pub fn add_quad_b(&mut self, i: usize, f: Vec2) {
        let f = self.add_point(f);
        self.quad(
            self.corners_min[i + 1],
            self.y_edge_max,
            f,
            self.x_edges_min[i],
        );
    }

    pub fn add_triangle_c(&mut self, i: usize) {
        self.triangle(self.corners_max[i], self.y_edge_min, self.x_edges_max[i]);
    }

    pub fn add_quad_c(&mut self, i: usize, f: Vec2) {
        let f = self.add_point(f);
        self.quad(self.corners_max[i], self.y_edge_min, f, self.x_edges_max[i]);
    }

    pub fn add_triangle_d(&mut self, i: usize) {
        self.triangle(self.corners_max[i + 1], self.x_edges_max[i], self.y_edge_max);
    }

    pub fn add_quad_d(&mut self, i: usize, f: Vec2) {
        let f = self.add_point(f);
        self.quad(
            self.corners_max[i + 1],
            self.x_edges_max[i],
            f,
            self.y_edge_max,
        );
    }

    // --- three-corner fills (one corner cut off) ---

    pub fn add_pentagon_abc(&mut self, i: usize) {
        self.pentagon(
            self.corners_min[i],
            self.corners_min[i + 1],
            self.y_edge_max,
            self.x_edges_max[i],
            self.corners_max[i],
        );
    }

    pub fn add_hexagon_abc(&mut self, i: usize, f: Vec2) {
        let f = self.add_point(f);
        self.hexagon(
            self.corners_min[i],
            self.corners_min[i + 1],
            self.y_edge_max,
            f,
            self.x_edges_max[i],
            self.corners_max[i],
        );
    }

    pub fn add_pentagon_abd(&mut self, i: usize) {
        self.pentagon(
            self.corners_min[i],
            self.corners_min[i + 1],
            self.corners_max[i + 1],
            self.x_edges_max[i],
            self.y_edge_min,
        );
    }

    pub fn add_hexagon_abd(&mut self, i: usize, f: Vec2) {
        let f = self.add_point(f);
        self.hexagon(
            self.corners_min[i],
            self.corners_min[i + 1],
            self.corners_max[i + 1],
            self.x_edges_max[i],
            f,
            self.y_edge_min,
        );
    }

    pub fn add_pentagon_acd(&mut self, i: usize) {
        self.pentagon(
            self.corners_min[i],
            self.x_edges_min[i],
            self.y_edge_max,
            self.corners_max[i + 1],
            self.corners_max[i],
        );
    }

    pub fn add_hexagon_acd(&mut self, i: usize, f: Vec2) {
        let f = self.add_point(f);
        self.hexagon(
            self.corners_min[i],
            self.x_edges_min[i],
            f,
            self.y_edge_max,
            self.corners_max[i + 1],
            self.corners_max[i],
        );
    }

    pub fn add_pentagon_bcd(&mut self, i: usize) {
        self.pentagon(
            self.corners_min[i + 1],
            self.corners_max[i + 1],
            self.corners_max[i],
            self.y_edge_min,
            self.x_edges_min[i],
        );
    }

    pub fn add_hexagon_bcd(&mut self, i: usize, f: Vec2) {
        let f = self.add_point(f);
        self.hexagon(
            self.corners_min[i + 1],
            self.corners_max[i + 1],
            self.corners_max[i],
            self.y_edge_min,
            f,
            self.x_edges_min[i],
        );
    }

    // --- half-cell fills (two adjacent corners) ---

    pub fn add_quad_ab(&mut self, i: usize) {
        self.quad(
            self.corners_min[i],
            self.corners_min[i + 1],
            self.y_edge_max,
            self.y_edge_min,
        );
    }

    pub fn add_pentagon_ab(&mut self, i: usize, f: Vec2) {
        let f = self.add_point(f);
        self.pentagon(
            self.corners_min[i],
            self.corners_min[i + 1],
            self.y_edge_max,
            f,
            self.y_edge_min,
        );
    }

    pub fn add_quad_ac(&mut self, i: usize) {
        self.quad(
            self.corners_min[i],
            self.x_edges_min[i],
            self.x_edges_max[i],
            self.corners_max[i],
        );
    }

    pub fn add_pentagon_ac(&mut self, i: usize, f: Vec2) {
        let f = self.add_point(f);
        self.pentagon(
            self.corners_min[i],
            self.x_edges_min[i],
            f,
            self.x_edges_max[i],
            self.corners_max[i],
        );
    }

    pub fn add_quad_bd(&mut self, i: usize) {
        self.quad(
            self.x_edges_min[i],
            self.corners_min[i + 1],
            self.corners_max[i + 1],
            self.x_edges_max[i],
        );
    }

    pub fn add_pentagon_bd(&mut self, i: usize, f: Vec2) {
        let f = self.add_point(f);
        self.pentagon(
            self.x_edges_min[i],
            self.corners_min[i + 1],
            self.corners_max[i + 1],
            self.x_edges_max[i],
            f,
        );
    }

    pub fn add_quad_cd(&mut self, i: usize) {
        self.quad(
            self.y_edge_min,
            self.y_edge_max,
            self.corners_max[i + 1],
            self.corners_max[i],
        );
    }

    pub fn add_pentagon_cd(&mut self, i: usize, f: Vec2) {
        let f = self.add_point(f);
        self.pentagon(
            self.y_edge_min,
            f,
            self.y_edge_max,
            self.corners_max[i + 1],
            self.corners_max[i],
        );
    }

    // --- resolved-diagonal partial fills ---

    pub fn add_quad_ad_to_b(&mut self, i: usize) {
        self.quad(
            self.corners_min[i],
            self.x_edges_min[i],
            self.y_edge_max,
            self.corners_max[i + 1],
        );
    }

    pub fn add_pentagon_ad_to_b(&mut self, i: usize, f: Vec2) {
        let f = self.add_point(f);
        self.pentagon(
            self.corners_min[i],
            self.x_edges_min[i],
            f,
            self.y_edge_max,
            self.corners_max[i + 1],
        );
    }

    pub fn add_quad_ad_to_c(&mut self, i: usize) {
        self.quad(
            self.corners_max[i + 1],
            self.x_edges_max[i],
            self.y_edge_min,
            self.corners_min[i],
        );
    }

    pub fn add_pentagon_ad_to_c(&mut self, i: usize, f: Vec2) {
        let f = self.add_point(f);
        self.pentagon(
            self.corners_max[i + 1],
            self.x_edges_max[i],
            f,
            self.y_edge_min,
            self.corners_min[i],
        );
    }

    pub fn add_quad_bc_to_a(&mut self, i: usize) {
        self.quad(
            self.corners_max[i],
            self.y_edge_min,
            self.x_edges_min[i],
            self.corners_min[i + 1],
        );
    }

    pub fn add_pentagon_bc_to_a(&mut self, i: usize, f: Vec2) {
        let f = self.add_point(f);
        self.pentagon(
            self.corners_max[i],
            self.y_edge_min,
            f,
            self.x_edges_min[i],
            self.corners_min[i + 1],
        );
    }

    pub fn add_quad_bc_to_d(&mut self, i: usize) {
        self.quad(
            self.corners_min[i + 1],
            self.y_edge_max,
            self.x_edges_max[i],
            self.corners_max[i],
        );
    }

    pub fn add_pentagon_bc_to_d(&mut self, i: usize, f: Vec2) {
        let f = self.add_point(f);
        self.pentagon(
            self.corners_min[i + 1],
            self.y_edge_max,
            f,
            self.x_edges_max[i],
            self.corners_max[i],
        );
    }

    // --- full cell ---

    pub fn add_quad_abcd(&mut self, i: usize) {
        self.quad(
            self.corners_min[i],
            self.corners_min[i + 1],
            self.corners_max[i + 1],
            self.corners_max[i],
        );
    }

    // --- primitives ---

    fn add_point(&mut self, p: Vec2) -> u32 {
        self.build.add_vertex(p, 0.0, SURFACE_NORMAL)
    }

    fn triangle(&mut self, a: u32, b: u32, c: u32) {
        self.build.add_triangle(a, b, c);
    }

    fn quad(&mut self, a: u32, b: u32, c: u32, d: u32) {
        self.build.add_triangle(a, b, c);
        self.build.add_triangle(a, c, d);
    }

    fn pentagon(&mut self, a: u32, b: u32, c: u32, d: u32, e: u32) {
        self.build.add_triangle(a, b, c);
        self.build.add_triangle(a, c, d);
        self.build.add_triangle(a, d, e);
    }

    #[allow(clippy::too_many_arguments)]
    fn hexagon(&mut self, a: u32, b: u32, c: u32, d: u32, e: u32, f: u32) {
        self.build.add_triangle(a, b, c);
        self.build.add_triangle(a, c, d);
        self.build.add_triangle(a, d, e);
        self.build.add_triangle(a, e, f);
    }
}
