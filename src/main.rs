//! CLI demo: generate a layered terrain, apply scripted brush edits, and
//! export the per-material contour meshes as OBJ files.

mod config;
mod obj;
mod worldgen;

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use hashbrown::HashMap;
use scarp_geom::Vec2;
use scarp_grid::VoxelMap;
use scarp_materials::MaterialCatalog;

use config::{DEFAULT_MATERIALS, DEFAULT_SCENE, SceneConfig};
use worldgen::TerrainGen;

#[derive(Parser, Debug)]
#[command(name = "scarp", about = "2D multi-material contouring engine demo")]
struct Args {
    /// Scene description (TOML); built-in demo scene when omitted.
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Material catalog (TOML); built-in two-material set when omitted.
    #[arg(long)]
    materials: Option<PathBuf>,

    /// Output directory for per-material OBJ meshes.
    #[arg(long, default_value = "out")]
    out: PathBuf,

    /// Seed for the initial terrain noise.
    #[arg(long, default_value_t = 1337)]
    seed: i32,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    if let Err(e) = run(&args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let catalog = match &args.materials {
        Some(path) => MaterialCatalog::from_path(path)?,
        None => MaterialCatalog::from_toml_str(DEFAULT_MATERIALS)?,
    };
    let scene = match &args.scene {
        Some(path) => SceneConfig::from_path(path)?,
        None => SceneConfig::from_toml_str(DEFAULT_SCENE)?,
    };

    let mut map = VoxelMap::new(&scene.map.to_map_config(), catalog.slot_count());
    log::info!(
        "map: {}x{} chunks of {}x{} voxels, {} materials",
        map.chunk_resolution(),
        map.chunk_resolution(),
        map.voxel_resolution(),
        map.voxel_resolution(),
        catalog.materials.len()
    );

    if let Some(section) = &scene.terrain {
        let terrain = TerrainGen::new(section, &catalog, args.seed)?;
        terrain.generate(&mut map);
        log::info!("terrain generated with {} layers", section.layers.len());
    }

    for edit in &scene.edits {
        map.apply(&edit.to_stencil(&catalog)?);
    }
    log::info!("applied {} edits", scene.edits.len());

    std::fs::create_dir_all(&args.out)?;
    let chunk_count = map.chunk_resolution() * map.chunk_resolution();
    let origins: Vec<Vec2> = (0..chunk_count)
        .map(|i| {
            Vec2::new(
                (i % map.chunk_resolution()) as f32 * map.chunk_size(),
                (i / map.chunk_resolution()) as f32 * map.chunk_size(),
            )
        })
        .collect();

    let mut stats: HashMap<&str, (usize, usize)> = HashMap::new();
    for material in &catalog.materials {
        let slot = material.id.0 as i32;
        let surface_parts: Vec<_> = map
            .chunks()
            .iter()
            .zip(&origins)
            .map(|(c, o)| (c.surface_mesh(slot), *o))
            .collect();
        let wall_parts: Vec<_> = map
            .chunks()
            .iter()
            .zip(&origins)
            .map(|(c, o)| (c.wall_mesh(slot), *o))
            .collect();

        let surface_tris: usize = surface_parts.iter().map(|(m, _)| m.triangle_count()).sum();
        let wall_tris: usize = wall_parts.iter().map(|(m, _)| m.triangle_count()).sum();
        stats.insert(&material.key, (surface_tris, wall_tris));

        obj::write_obj(
            &args.out.join(format!("{}_surface.obj", material.key)),
            &surface_parts,
        )?;
        obj::write_obj(
            &args.out.join(format!("{}_wall.obj", material.key)),
            &wall_parts,
        )?;
    }

    for (key, (surface, wall)) in &stats {
        log::info!("{key}: {surface} surface tris, {wall} wall tris");
    }
    log::info!("meshes written to {}", args.out.display());
    Ok(())
}
