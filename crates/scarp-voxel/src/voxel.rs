use scarp_geom::Vec2;

/// Sentinel for "no boundary crossing on this edge". Crossings store the
/// absolute coordinate of the crossing along the axis, so any real crossing
/// compares strictly greater than this.
pub const NO_CROSSING: f32 = f32::MIN;

/// One grid sample: a material state plus the two outgoing boundary-crossing
/// records toward the +X and +Y neighbors. Crossing fields are meaningful only
/// between voxels of differing state; same-state neighbors carry the sentinel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Voxel {
    pub position: Vec2,
    /// Material slot; 0 is empty, >0 selects a mesh-cache pair.
    pub state: i32,
    /// Absolute X of the crossing toward the +X neighbor, or `NO_CROSSING`.
    pub x_edge: f32,
    /// Absolute Y of the crossing toward the +Y neighbor, or `NO_CROSSING`.
    pub y_edge: f32,
    pub x_normal: Vec2,
    pub y_normal: Vec2,
}

impl Default for Voxel {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            state: 0,
            x_edge: NO_CROSSING,
            y_edge: NO_CROSSING,
            x_normal: Vec2::ZERO,
            y_normal: Vec2::ZERO,
        }
    }
}

impl Voxel {
    /// Places the voxel at the center of grid cell (x, y).
    pub fn new(x: usize, y: usize, size: f32) -> Self {
        Self {
            position: Vec2::new((x as f32 + 0.5) * size, (y as f32 + 0.5) * size),
            ..Self::default()
        }
    }

    #[inline]
    pub fn filled(&self) -> bool {
        self.state > 0
    }

    #[inline]
    pub fn has_x_crossing(&self) -> bool {
        self.x_edge > NO_CROSSING
    }

    #[inline]
    pub fn has_y_crossing(&self) -> bool {
        self.y_edge > NO_CROSSING
    }

    /// The crossing point on the edge toward the +X neighbor.
    #[inline]
    pub fn x_edge_point(&self) -> Vec2 {
        Vec2::new(self.x_edge, self.position.y)
    }

    /// The crossing point on the edge toward the +Y neighbor.
    #[inline]
    pub fn y_edge_point(&self) -> Vec2 {
        Vec2::new(self.position.x, self.y_edge)
    }

    /// Materializes a +X neighbor's boundary voxel into this tile's local
    /// space. The Y crossing keeps its coordinate; its normal rides along for
    /// the gap cell's east edge.
    pub fn become_x_dummy_of(&mut self, voxel: &Voxel, offset: f32) {
        self.state = voxel.state;
        self.position = voxel.position;
        self.position.x += offset;

        self.x_edge = voxel.x_edge + offset;
        self.y_edge = voxel.y_edge;

        self.y_normal = voxel.y_normal;
    }

    /// Materializes a +Y neighbor's boundary voxel into this tile's local
    /// space; the X crossing keeps its coordinate and normal.
    pub fn become_y_dummy_of(&mut self, voxel: &Voxel, offset: f32) {
        self.state = voxel.state;
        self.position = voxel.position;
        self.position.y += offset;

        self.x_edge = voxel.x_edge;
        self.y_edge = voxel.y_edge + offset;

        self.x_normal = voxel.x_normal;
    }

    /// Materializes the diagonal neighbor's origin voxel; only its state and
    /// position are ever read, so no normals are carried.
    pub fn become_t_dummy_of(&mut self, voxel: &Voxel, offset: f32) {
        self.state = voxel.state;

        self.position = voxel.position;
        self.position.x += offset;
        self.position.y += offset;

        self.x_edge = voxel.x_edge + offset;
        self.y_edge = voxel.y_edge + offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_voxel_sits_at_cell_center_with_no_crossings() {
        let v = Voxel::new(2, 3, 0.5);
        assert_eq!(v.position, Vec2::new(1.25, 1.75));
        assert!(!v.filled());
        assert!(!v.has_x_crossing());
        assert!(!v.has_y_crossing());
    }

    #[test]
    fn x_dummy_translates_x_axis_only() {
        let mut src = Voxel::new(0, 1, 1.0);
        src.state = 2;
        src.x_edge = 0.75;
        src.y_edge = 1.9;
        src.x_normal = Vec2::new(1.0, 0.0);
        src.y_normal = Vec2::new(0.0, -1.0);

        let mut dummy = Voxel::default();
        dummy.become_x_dummy_of(&src, 8.0);
        assert_eq!(dummy.state, 2);
        assert_eq!(dummy.position, Vec2::new(8.5, 1.5));
        assert_eq!(dummy.x_edge, 8.75);
        assert_eq!(dummy.y_edge, 1.9);
        assert_eq!(dummy.y_normal, src.y_normal);
    }

    #[test]
    fn y_dummy_translates_y_axis_only() {
        let mut src = Voxel::new(3, 0, 1.0);
        src.state = 1;
        src.x_edge = 3.8;
        src.x_normal = Vec2::new(-1.0, 0.0);

        let mut dummy = Voxel::default();
        dummy.become_y_dummy_of(&src, 8.0);
        assert_eq!(dummy.position, Vec2::new(3.5, 8.5));
        assert_eq!(dummy.x_edge, 3.8);
        assert_eq!(dummy.x_normal, src.x_normal);
    }

    #[test]
    fn dummy_offset_preserves_sentinel() {
        // f32::MIN absorbs any tile-sized offset, so a missing crossing on the
        // source must still read as missing on the dummy.
        let src = Voxel::new(0, 0, 1.0);
        let mut dummy = Voxel::default();
        dummy.become_t_dummy_of(&src, 64.0);
        assert!(!dummy.has_x_crossing());
        assert!(!dummy.has_y_crossing());
    }
}
