use scarp_geom::{Vec2, Vec3};

/// Flat vertex/normal/index buffers in the layout the renderer consumes.
#[derive(Default, Clone, PartialEq, Debug)]
pub struct MeshBuild {
    pub pos: Vec<f32>,
    pub norm: Vec<f32>,
    pub idx: Vec<u32>,
}

impl MeshBuild {
    /// Appends one vertex and returns its index.
    #[inline]
    pub fn add_vertex(&mut self, p: Vec2, z: f32, n: Vec3) -> u32 {
        let i = (self.pos.len() / 3) as u32;
        self.pos.extend_from_slice(&[p.x, p.y, z]);
        self.norm.extend_from_slice(&[n.x, n.y, n.z]);
        i
    }

    #[inline]
    pub fn add_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.idx.extend_from_slice(&[a, b, c]);
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos.len() / 3
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.idx.len() / 3
    }

    #[inline]
    pub fn position(&self, i: u32) -> Vec3 {
        let at = i as usize * 3;
        Vec3::new(self.pos[at], self.pos[at + 1], self.pos[at + 2])
    }

    #[inline]
    pub fn normal(&self, i: u32) -> Vec3 {
        let at = i as usize * 3;
        Vec3::new(self.norm[at], self.norm[at + 1], self.norm[at + 2])
    }

    pub fn clear(&mut self) {
        self.pos.clear();
        self.norm.clear();
        self.idx.clear();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.idx.is_empty()
    }
}
