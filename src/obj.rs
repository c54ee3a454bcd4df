use std::io::{self, Write};
use std::path::Path;

use scarp_geom::Vec2;
use scarp_mesh_cpu::MeshBuild;

/// Writes tile meshes merged into one Wavefront OBJ object, offsetting each
/// tile by its world origin. Positions and normals only; indices are 1-based
/// `v//vn` triples per OBJ convention.
pub fn write_obj(path: &Path, parts: &[(&MeshBuild, Vec2)]) -> io::Result<()> {
    let file = std::fs::File::create(path)?;
    let mut out = io::BufWriter::new(file);
    writeln!(out, "# scarp contour mesh")?;

    for (mesh, origin) in parts {
        for i in 0..mesh.vertex_count() {
            let p = mesh.position(i as u32);
            writeln!(out, "v {} {} {}", p.x + origin.x, p.y + origin.y, p.z)?;
        }
    }
    for (mesh, _) in parts {
        for i in 0..mesh.vertex_count() {
            let n = mesh.normal(i as u32);
            writeln!(out, "vn {} {} {}", n.x, n.y, n.z)?;
        }
    }

    let mut base = 1usize;
    for (mesh, _) in parts {
        for t in 0..mesh.triangle_count() {
            let a = base + mesh.idx[t * 3] as usize;
            let b = base + mesh.idx[t * 3 + 1] as usize;
            let c = base + mesh.idx[t * 3 + 2] as usize;
            writeln!(out, "f {a}//{a} {b}//{b} {c}//{c}")?;
        }
        base += mesh.vertex_count();
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scarp_geom::Vec3;

    #[test]
    fn two_parts_share_one_index_space() {
        let mut m1 = MeshBuild::default();
        let n = Vec3::new(0.0, 0.0, 1.0);
        let a = m1.add_vertex(Vec2::new(0.0, 0.0), 0.0, n);
        let b = m1.add_vertex(Vec2::new(1.0, 0.0), 0.0, n);
        let c = m1.add_vertex(Vec2::new(0.0, 1.0), 0.0, n);
        m1.add_triangle(a, b, c);
        let m2 = m1.clone();

        let dir = std::env::temp_dir().join("scarp_obj_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("mesh.obj");
        write_obj(&path, &[(&m1, Vec2::ZERO), (&m2, Vec2::new(2.0, 0.0))]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let verts = text.lines().filter(|l| l.starts_with("v ")).count();
        let faces: Vec<&str> = text.lines().filter(|l| l.starts_with("f ")).collect();
        assert_eq!(verts, 6);
        assert_eq!(faces.len(), 2);
        // Second part's face references vertices 4..6.
        assert_eq!(faces[1], "f 4//4 5//5 6//6");
        // Offset applied to the second part's positions.
        assert!(text.lines().any(|l| l == "v 2 0 0" || l == "v 2 0 -0"));
    }
}
