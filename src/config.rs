use std::error::Error;
use std::fs;
use std::path::Path;

use scarp_edit::Stencil;
use scarp_geom::Vec2;
use scarp_grid::MapConfig;
use scarp_materials::MaterialCatalog;
use serde::Deserialize;

/// Built-in material set used when no catalog file is given.
pub const DEFAULT_MATERIALS: &str = r#"
[materials.dirt]
surface = { color = [0.45, 0.31, 0.18] }
wall = { color = [0.35, 0.24, 0.14] }

[materials.stone]
surface = { color = [0.55, 0.55, 0.58], render_tag = "rock" }
wall = { color = [0.42, 0.42, 0.45], render_tag = "rock" }
"#;

/// Built-in demo scene: layered terrain with a few carves and fills.
pub const DEFAULT_SCENE: &str = r#"
[map]
size = 8.0
chunk_resolution = 2
voxel_resolution = 16

[terrain]
frequency = 0.09
layers = [
    { threshold = 0.35, material = "stone" },
    { threshold = 0.65, material = "dirt" },
]

[[edits]]
shape = "circle"
center = [4.0, 4.0]
radius = 1.1

[[edits]]
shape = "square"
center = [2.2, 5.5]
radius = 0.6
material = "stone"

[[edits]]
shape = "circle"
center = [6.1, 2.4]
radius = 0.8
material = "dirt"
"#;

#[derive(Deserialize, Debug)]
pub struct SceneConfig {
    #[serde(default)]
    pub map: MapSection,
    pub terrain: Option<TerrainSection>,
    #[serde(default)]
    pub edits: Vec<EditSection>,
}

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct MapSection {
    pub size: f32,
    pub chunk_resolution: usize,
    pub voxel_resolution: usize,
    pub max_feature_angle: f32,
    pub max_parallel_angle: f32,
    pub wall_bottom: f32,
    pub wall_top: f32,
    pub snap_to_grid: bool,
}

impl Default for MapSection {
    fn default() -> Self {
        let d = MapConfig::default();
        Self {
            size: d.size,
            chunk_resolution: d.chunk_resolution,
            voxel_resolution: d.voxel_resolution,
            max_feature_angle: d.max_feature_angle,
            max_parallel_angle: d.max_parallel_angle,
            wall_bottom: d.wall_bottom,
            wall_top: d.wall_top,
            snap_to_grid: d.snap_to_grid,
        }
    }
}

impl MapSection {
    pub fn to_map_config(&self) -> MapConfig {
        MapConfig {
            size: self.size,
            chunk_resolution: self.chunk_resolution,
            voxel_resolution: self.voxel_resolution,
            max_feature_angle: self.max_feature_angle,
            max_parallel_angle: self.max_parallel_angle,
            wall_bottom: self.wall_bottom,
            wall_top: self.wall_top,
            snap_to_grid: self.snap_to_grid,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct TerrainSection {
    pub frequency: f32,
    /// Checked in order; the first layer whose threshold is not exceeded by
    /// the normalized noise value assigns the material. Values above every
    /// threshold stay empty.
    pub layers: Vec<LayerSection>,
}

#[derive(Deserialize, Debug)]
pub struct LayerSection {
    pub threshold: f32,
    pub material: String,
}

#[derive(Deserialize, Debug)]
pub struct EditSection {
    #[serde(default = "default_shape")]
    pub shape: String,
    pub center: [f32; 2],
    pub radius: f32,
    /// Material key to write; absent means carve to empty.
    pub material: Option<String>,
}

fn default_shape() -> String {
    "circle".to_string()
}

impl EditSection {
    pub fn to_stencil(&self, catalog: &MaterialCatalog) -> Result<Stencil, Box<dyn Error>> {
        let fill = match &self.material {
            None => 0,
            Some(key) => {
                catalog
                    .get_id(key)
                    .ok_or_else(|| format!("unknown material {key:?} in edit"))?
                    .0 as i32
            }
        };
        let center = Vec2::new(self.center[0], self.center[1]);
        match self.shape.as_str() {
            "circle" => Ok(Stencil::circle(center, self.radius, fill)),
            "square" => Ok(Stencil::square(center, self.radius, fill)),
            other => Err(format!("unknown stencil shape {other:?}").into()),
        }
    }
}

impl SceneConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, Box<dyn Error>> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }
}
