use criterion::{Criterion, black_box, criterion_group, criterion_main};

use scarp_edit::Stencil;
use scarp_geom::Vec2;
use scarp_grid::{GridConfig, MapConfig, NeighborEdges, VoxelGrid, VoxelMap};

/// Bands of two materials with a carved hole: exercises multi-material cells,
/// saddles, and walls in one field.
fn banded_grid(resolution: usize) -> VoxelGrid {
    let config = GridConfig {
        resolution,
        size: resolution as f32,
        ..GridConfig::default()
    };
    let mut g = VoxelGrid::new(&config, 3);
    let states: Vec<i32> = (0..resolution * resolution)
        .map(|i| {
            let y = i / resolution;
            match (y / 3) % 3 {
                0 => 0,
                1 => 1,
                _ => 2,
            }
        })
        .collect();
    g.set_states(&states);
    g.seed_crossings(&NeighborEdges::default());
    g
}

fn bench_full_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_sweep");
    for resolution in [8usize, 32, 64] {
        let mut g = banded_grid(resolution);
        let edges = NeighborEdges::default();
        group.bench_function(format!("banded_{resolution}x{resolution}"), |b| {
            b.iter(|| {
                g.triangulate(&edges);
                black_box(g.surface_mesh(1).triangle_count());
            })
        });
    }
    group.finish();
}

fn bench_stencil_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("stencil_apply");
    let mut g = banded_grid(32);
    let edges = NeighborEdges::default();
    let dig = Stencil::circle(Vec2::new(16.0, 16.0), 5.0, 0);
    let fill = Stencil::circle(Vec2::new(16.0, 16.0), 5.0, 2);
    group.bench_function("carve_and_refill_32", |b| {
        b.iter(|| {
            g.apply(&dig, &edges);
            g.apply(&fill, &edges);
            black_box(g.wall_mesh(2).triangle_count());
        })
    });
    group.finish();
}

fn bench_map_edit(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_edit");
    let config = MapConfig {
        size: 8.0,
        chunk_resolution: 2,
        voxel_resolution: 16,
        ..MapConfig::default()
    };
    let mut map = VoxelMap::new(&config, 3);
    map.fill_states(|_, y| if y < 20 { 1 } else { 0 });
    // Brush on the four-corner point: all four tiles rebuild with stitching.
    let dig = Stencil::circle(Vec2::new(4.0, 4.0), 1.2, 0);
    let fill = Stencil::circle(Vec2::new(4.0, 4.0), 1.2, 2);
    group.bench_function("cross_seam_carve_refill_2x2x16", |b| {
        b.iter(|| {
            map.apply(&dig);
            map.apply(&fill);
            black_box(map.chunk(0, 0).surface_mesh(2).triangle_count());
        })
    });
    group.finish();
}

criterion_group!(benches, bench_full_sweep, bench_stencil_apply, bench_map_edit);
criterion_main!(benches);
