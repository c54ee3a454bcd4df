use scarp_voxel::{Cell, FeaturePoint};

use crate::mesh_build::MeshBuild;
use crate::surface::SurfaceCache;
use crate::wall::WallCache;

/// The closed vocabulary of per-cell fill operations. Single letters fill one
/// corner, letter groups fill merged corner regions, and the `*To*` variants
/// are the two halves of a resolved diagonal band. Each operation is a pure
/// transformation of (cell, feature point) into buffer writes on the cache
/// pair owned by the operation's anchor corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FillOp {
    A,
    B,
    C,
    D,
    Abc,
    Abd,
    Acd,
    Bcd,
    Ab,
    Ac,
    Bd,
    Cd,
    AdToB,
    AdToC,
    BcToA,
    BcToD,
    Abcd,
}

impl FillOp {
    /// The material state that selects which slot's caches receive the fill.
    #[inline]
    pub fn owner_state(self, cell: &Cell) -> i32 {
        use FillOp::*;
        match self {
            A | Abc | Abd | Acd | Ab | Ac | AdToB | AdToC | Abcd => cell.a.state,
            B | Bcd | Bd | BcToA | BcToD => cell.b.state,
            C | Cd => cell.c.state,
            D => cell.d.state,
        }
    }
}

/// Surface and wall cache pair for one material slot.
pub struct SlotCache {
    surface: SurfaceCache,
    wall: WallCache,
}

impl SlotCache {
    pub fn new(resolution: usize, wall_bottom: f32, wall_top: f32) -> Self {
        Self {
            surface: SurfaceCache::new(resolution),
            wall: WallCache::new(resolution, wall_bottom, wall_top),
        }
    }

    pub fn clear(&mut self) {
        self.surface.clear();
        self.wall.clear();
    }

    pub fn apply(&mut self) {
        self.surface.apply();
        self.wall.apply();
    }

    pub fn surface_mesh(&self) -> &MeshBuild {
        self.surface.mesh()
    }

    pub fn wall_mesh(&self) -> &MeshBuild {
        self.wall.mesh()
    }

    pub fn prepare_next_cell(&mut self) {
        self.surface.prepare_next_cell();
        self.wall.prepare_next_cell();
    }

    pub fn prepare_next_row(&mut self) {
        self.surface.prepare_next_row();
        self.wall.prepare_next_row();
    }

    pub fn cache_first_corner(&mut self, voxel: &scarp_voxel::Voxel) {
        self.surface.cache_first_corner(voxel);
    }

    pub fn cache_next_corner(&mut self, i: usize, voxel: &scarp_voxel::Voxel) {
        self.surface.cache_next_corner(i, voxel);
    }

    pub fn cache_x_edge(&mut self, i: usize, voxel: &scarp_voxel::Voxel) {
        self.surface.cache_x_edge(i, voxel);
    }

    /// A horizontal crossing against empty space also anchors wall geometry.
    pub fn cache_x_edge_with_wall(&mut self, i: usize, voxel: &scarp_voxel::Voxel) {
        self.surface.cache_x_edge(i, voxel);
        self.wall.cache_x_edge(i, voxel);
    }

    pub fn cache_y_edge(&mut self, voxel: &scarp_voxel::Voxel) {
        self.surface.cache_y_edge(voxel);
    }

    pub fn cache_y_edge_with_wall(&mut self, voxel: &scarp_voxel::Voxel) {
        self.surface.cache_y_edge(voxel);
        self.wall.cache_y_edge(voxel);
    }

    /// Executes one fill against this slot's caches. The feature point decides
    /// between the sharp (quad/pentagon/hexagon plus split walls) and smooth
    /// (triangle/quad/pentagon plus straight walls) emission; walls are added
    /// only toward corners that are empty, other materials cover their own
    /// side.
    pub fn fill(&mut self, op: FillOp, cell: &Cell, f: FeaturePoint) {
        let i = cell.index;
        match op {
            FillOp::A => {
                if f.exists {
                    self.surface.add_quad_a(i, f.position);
                    if !cell.c.filled() {
                        self.wall.add_from_ac(f.position);
                    }
                    if !cell.b.filled() {
                        self.wall.add_to_ab(i, f.position);
                    }
                } else {
                    self.surface.add_triangle_a(i);
                    if !cell.b.filled() {
                        self.wall.add_ac_ab(i);
                    }
                }
            }
            FillOp::B => {
                if f.exists {
                    self.surface.add_quad_b(i, f.position);
                    if !cell.a.filled() {
                        self.wall.add_from_ab(i, f.position);
                    }
                    if !cell.d.filled() {
                        self.wall.add_to_bd(f.position);
                    }
                } else {
                    self.surface.add_triangle_b(i);
                    if !cell.a.filled() {
                        self.wall.add_ab_bd(i);
                    }
                }
            }
            FillOp::C => {
                if f.exists {
                    self.surface.add_quad_c(i, f.position);
                    if !cell.d.filled() {
                        self.wall.add_from_cd(i, f.position);
                    }
                    if !cell.a.filled() {
                        self.wall.add_to_ac(f.position);
                    }
                } else {
                    self.surface.add_triangle_c(i);
                    if !cell.a.filled() {
                        self.wall.add_cd_ac(i);
                    }
                }
            }
            FillOp::D => {
                if f.exists {
                    self.surface.add_quad_d(i, f.position);
                    if !cell.b.filled() {
                        self.wall.add_from_bd(f.position);
                    }
                    if !cell.c.filled() {
                        self.wall.add_to_cd(i, f.position);
                    }
                } else {
                    self.surface.add_triangle_d(i);
                    if !cell.b.filled() {
                        self.wall.add_bd_cd(i);
                    }
                }
            }
            FillOp::Abc => {
                if f.exists {
                    self.surface.add_hexagon_abc(i, f.position);
                    if !cell.d.filled() {
                        self.wall.add_cd_bd_split(i, f.position);
                    }
                } else {
                    self.surface.add_pentagon_abc(i);
                    if !cell.d.filled() {
                        self.wall.add_cd_bd(i);
                    }
                }
            }
            FillOp::Abd => {
                if f.exists {
                    self.surface.add_hexagon_abd(i, f.position);
                    if !cell.c.filled() {
                        self.wall.add_ac_cd_split(i, f.position);
                    }
                } else {
                    self.surface.add_pentagon_abd(i);
                    if !cell.c.filled() {
                        self.wall.add_ac_cd(i);
                    }
                }
            }
            FillOp::Acd => {
                if f.exists {
                    self.surface.add_hexagon_acd(i, f.position);
                    if !cell.b.filled() {
                        self.wall.add_bd_ab_split(i, f.position);
                    }
                } else {
                    self.surface.add_pentagon_acd(i);
                    if !cell.b.filled() {
                        self.wall.add_bd_ab(i);
                    }
                }
            }
            FillOp::Bcd => {
                if f.exists {
                    self.surface.add_hexagon_bcd(i, f.position);
                    if !cell.a.filled() {
                        self.wall.add_ab_ac_split(i, f.position);
                    }
                } else {
                    self.surface.add_pentagon_bcd(i);
                    if !cell.a.filled() {
                        self.wall.add_ab_ac(i);
                    }
                }
            }
            FillOp::Ab => {
                if f.exists {
                    self.surface.add_pentagon_ab(i, f.position);
                    if !cell.c.filled() {
                        self.wall.add_from_ac(f.position);
                    }
                    if !cell.d.filled() {
                        self.wall.add_to_bd(f.position);
                    }
                } else {
                    self.surface.add_quad_ab(i);
                    if !cell.c.filled() {
                        self.wall.add_ac_bd();
                    }
                }
            }
            FillOp::Ac => {
                if f.exists {
                    self.surface.add_pentagon_ac(i, f.position);
                    if !cell.d.filled() {
                        self.wall.add_from_cd(i, f.position);
                    }
                    if !cell.b.filled() {
                        self.wall.add_to_ab(i, f.position);
                    }
                } else {
                    self.surface.add_quad_ac(i);
                    if !cell.b.filled() {
                        self.wall.add_cd_ab(i);
                    }
                }
            }
            FillOp::Bd => {
                if f.exists {
                    self.surface.add_pentagon_bd(i, f.position);
                    if !cell.a.filled() {
                        self.wall.add_from_ab(i, f.position);
                    }
                    if !cell.c.filled() {
                        self.wall.add_to_cd(i, f.position);
                    }
                } else {
                    self.surface.add_quad_bd(i);
                    if !cell.a.filled() {
                        self.wall.add_ab_cd(i);
                    }
                }
            }
            FillOp::Cd => {
                if f.exists {
                    self.surface.add_pentagon_cd(i, f.position);
                    if !cell.b.filled() {
                        self.wall.add_from_bd(f.position);
                    }
                    if !cell.a.filled() {
                        self.wall.add_to_ac(f.position);
                    }
                } else {
                    self.surface.add_quad_cd(i);
                    if !cell.a.filled() {
                        self.wall.add_bd_ac();
                    }
                }
            }
            FillOp::AdToB => {
                if f.exists {
                    self.surface.add_pentagon_ad_to_b(i, f.position);
                    if !cell.b.filled() {
                        self.wall.add_bd_ab_split(i, f.position);
                    }
                } else {
                    self.surface.add_quad_ad_to_b(i);
                    if !cell.b.filled() {
                        self.wall.add_bd_ab(i);
                    }
                }
            }
            FillOp::AdToC => {
                if f.exists {
                    self.surface.add_pentagon_ad_to_c(i, f.position);
                    if !cell.c.filled() {
                        self.wall.add_ac_cd_split(i, f.position);
                    }
                } else {
                    self.surface.add_quad_ad_to_c(i);
                    if !cell.c.filled() {
                        self.wall.add_ac_cd(i);
                    }
                }
            }
            FillOp::BcToA => {
                if f.exists {
                    self.surface.add_pentagon_bc_to_a(i, f.position);
                    if !cell.a.filled() {
                        self.wall.add_ab_ac_split(i, f.position);
                    }
                } else {
                    self.surface.add_quad_bc_to_a(i);
                    if !cell.a.filled() {
                        self.wall.add_ab_ac(i);
                    }
                }
            }
            FillOp::BcToD => {
                if f.exists {
                    self.surface.add_pentagon_bc_to_d(i, f.position);
                    if !cell.d.filled() {
                        self.wall.add_cd_bd_split(i, f.position);
                    }
                } else {
                    self.surface.add_quad_bc_to_d(i);
                    if !cell.d.filled() {
                        self.wall.add_cd_bd(i);
                    }
                }
            }
            FillOp::Abcd => {
                self.surface.add_quad_abcd(i);
            }
        }
    }
}
