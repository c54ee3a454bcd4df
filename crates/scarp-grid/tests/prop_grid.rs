use proptest::prelude::*;
use scarp_edit::Stencil;
use scarp_geom::Vec2;
use scarp_grid::{GridConfig, MapConfig, NeighborEdges, VoxelGrid, VoxelMap};

fn mesh_is_coherent(m: &scarp_mesh_cpu::MeshBuild) -> bool {
    let verts = m.vertex_count();
    m.idx.iter().all(|&i| (i as usize) < verts)
        && m.pos.iter().all(|v| v.is_finite())
        && m.norm.iter().all(|v| v.is_finite())
        && m.pos.len() == m.norm.len()
        && m.idx.len() % 3 == 0
}

proptest! {
    // Any state field triangulates into index- and value-coherent buffers.
    #[test]
    fn random_fields_sweep_cleanly(
        resolution in 2usize..=5,
        seed in proptest::collection::vec(0i32..3, 25),
    ) {
        let config = GridConfig {
            resolution,
            size: resolution as f32,
            ..GridConfig::default()
        };
        let mut g = VoxelGrid::new(&config, 3);
        let states: Vec<i32> = (0..resolution * resolution)
            .map(|i| seed[i % seed.len()])
            .collect();
        g.set_states(&states);
        let edges = NeighborEdges::default();
        g.seed_crossings(&edges);
        g.triangulate(&edges);
        for slot in 1..3 {
            prop_assert!(mesh_is_coherent(g.surface_mesh(slot)));
            prop_assert!(mesh_is_coherent(g.wall_mesh(slot)));
        }
    }

    // Random brush sequences over a stitched map never break the buffers,
    // and every surface vertex stays inside its tile's stitched bounds
    // (one gap row/column past the tile's own voxel range).
    #[test]
    fn random_edits_keep_meshes_coherent(
        edits in proptest::collection::vec(
            (0.0f32..4.0, 0.0f32..4.0, 0.1f32..1.0, 0i32..3, any::<bool>()),
            1..8,
        ),
    ) {
        let config = MapConfig {
            size: 4.0,
            chunk_resolution: 2,
            voxel_resolution: 4,
            ..MapConfig::default()
        };
        let mut map = VoxelMap::new(&config, 3);
        for (x, y, r, fill, round) in edits {
            let center = Vec2::new(x, y);
            let stencil = if round {
                Stencil::circle(center, r, fill)
            } else {
                Stencil::square(center, r, fill)
            };
            map.apply(&stencil);
        }
        let reach = map.chunk_size() + map.voxel_size();
        for chunk in map.chunks() {
            for slot in 1..3 {
                let m = chunk.surface_mesh(slot);
                prop_assert!(mesh_is_coherent(m));
                for i in 0..m.vertex_count() {
                    let p = m.position(i as u32);
                    prop_assert!(p.x >= 0.0 && p.x <= reach, "vertex {p:?} outside tile");
                    prop_assert!(p.y >= 0.0 && p.y <= reach, "vertex {p:?} outside tile");
                }
                prop_assert!(mesh_is_coherent(chunk.wall_mesh(slot)));
            }
        }
    }

    // Re-running the exact same brush is observationally idempotent.
    #[test]
    fn repeated_edit_is_idempotent(
        x in 0.5f32..3.5,
        y in 0.5f32..3.5,
        r in 0.3f32..1.2,
        fill in 1i32..3,
    ) {
        let config = MapConfig {
            size: 4.0,
            chunk_resolution: 2,
            voxel_resolution: 4,
            ..MapConfig::default()
        };
        let mut map = VoxelMap::new(&config, 3);
        let stencil = Stencil::circle(Vec2::new(x, y), r, fill);
        map.apply(&stencil);
        let before: Vec<_> = map
            .chunks()
            .iter()
            .map(|c| (c.surface_mesh(fill).clone(), c.wall_mesh(fill).clone()))
            .collect();
        map.apply(&stencil);
        for (chunk, (surface, wall)) in map.chunks().iter().zip(&before) {
            prop_assert_eq!(chunk.surface_mesh(fill), surface);
            prop_assert_eq!(chunk.wall_mesh(fill), wall);
        }
    }
}
