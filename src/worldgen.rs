use fastnoise_lite::{FastNoiseLite, NoiseType};
use scarp_grid::VoxelMap;
use scarp_materials::MaterialCatalog;

use crate::config::TerrainSection;

/// Resolved terrain layers: noise threshold to material slot, in order.
pub struct TerrainGen {
    noise: FastNoiseLite,
    layers: Vec<(f32, i32)>,
}

impl TerrainGen {
    pub fn new(
        section: &TerrainSection,
        catalog: &MaterialCatalog,
        seed: i32,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let mut noise = FastNoiseLite::with_seed(seed);
        noise.set_noise_type(Some(NoiseType::OpenSimplex2));
        noise.set_frequency(Some(section.frequency));
        let mut layers = Vec::with_capacity(section.layers.len());
        for layer in &section.layers {
            let id = catalog
                .get_id(&layer.material)
                .ok_or_else(|| format!("unknown material {:?} in terrain layer", layer.material))?;
            layers.push((layer.threshold, id.0 as i32));
        }
        Ok(Self { noise, layers })
    }

    /// Normalized noise at a world position mapped through the layer table;
    /// values above every threshold stay empty.
    pub fn state_at(&self, x: f32, y: f32) -> i32 {
        let v = (self.noise.get_noise_2d(x, y) + 1.0) * 0.5;
        for (threshold, slot) in &self.layers {
            if v <= *threshold {
                return *slot;
            }
        }
        0
    }

    /// Populates the whole map and rebuilds its meshes.
    pub fn generate(&self, map: &mut VoxelMap) {
        let voxel_size = map.voxel_size();
        map.fill_states(|gx, gy| {
            self.state_at(
                (gx as f32 + 0.5) * voxel_size,
                (gy as f32 + 0.5) * voxel_size,
            )
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_MATERIALS, LayerSection};

    fn gen_with_layers(layers: Vec<LayerSection>) -> TerrainGen {
        let catalog = MaterialCatalog::from_toml_str(DEFAULT_MATERIALS).unwrap();
        let section = TerrainSection {
            frequency: 0.05,
            layers,
        };
        TerrainGen::new(&section, &catalog, 42).unwrap()
    }

    #[test]
    fn layer_order_decides_the_material() {
        let g = gen_with_layers(vec![
            LayerSection {
                threshold: 1.1,
                material: "stone".into(),
            },
            LayerSection {
                threshold: 2.0,
                material: "dirt".into(),
            },
        ]);
        // Normalized noise is always <= 1.1, so the first layer always wins.
        for i in 0..16 {
            let s = g.state_at(i as f32 * 0.7, i as f32 * 1.3);
            assert_eq!(s, 2, "stone is slot 2 in the sorted catalog");
        }
    }

    #[test]
    fn values_above_all_thresholds_stay_empty() {
        let g = gen_with_layers(vec![LayerSection {
            threshold: -0.5,
            material: "dirt".into(),
        }]);
        assert_eq!(g.state_at(3.0, 4.0), 0);
    }

    #[test]
    fn unknown_layer_material_fails() {
        let catalog = MaterialCatalog::from_toml_str(DEFAULT_MATERIALS).unwrap();
        let section = TerrainSection {
            frequency: 0.05,
            layers: vec![LayerSection {
                threshold: 0.5,
                material: "obsidian".into(),
            }],
        };
        assert!(TerrainGen::new(&section, &catalog, 1).is_err());
    }
}
