//! Material-slot catalog: maps fill states to externally bound appearances.
#![forbid(unsafe_code)]

use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Index of a material slot. Slot 0 is reserved for empty space and never
/// appears in the catalog; filled voxels carry slots `1..=len`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialId(pub u16);

impl MaterialId {
    pub const EMPTY: MaterialId = MaterialId(0);

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// How one face family of a material slot should look; the engine never
/// interprets these fields, it only hands them to the renderer.
#[derive(Clone, Debug, Default)]
pub struct Appearance {
    pub texture: Option<PathBuf>,
    pub color: Option<[f32; 3]>,
    pub render_tag: Option<String>,
}

/// One catalog entry: a top-surface appearance and a wall appearance,
/// bound to the same fill state.
#[derive(Clone, Debug)]
pub struct Material {
    pub id: MaterialId,
    pub key: String,
    pub surface: Appearance,
    pub wall: Appearance,
}

#[derive(Default, Clone, Debug)]
pub struct MaterialCatalog {
    pub materials: Vec<Material>,
    pub by_key: HashMap<String, MaterialId>,
}

impl MaterialCatalog {
    pub fn new() -> Self {
        Self {
            materials: Vec::new(),
            by_key: HashMap::new(),
        }
    }

    /// Number of fill states the engine must allocate caches for,
    /// including the reserved empty slot 0.
    pub fn slot_count(&self) -> usize {
        self.materials.len() + 1
    }

    pub fn get_id(&self, key: &str) -> Option<MaterialId> {
        self.by_key.get(key).copied()
    }

    pub fn get(&self, id: MaterialId) -> Option<&Material> {
        if id.is_empty() {
            return None;
        }
        self.materials.get(id.0 as usize - 1)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: MaterialsConfig = toml::from_str(toml_str)?;
        let mut catalog = MaterialCatalog::new();
        let mut entries: Vec<(String, MaterialEntry)> = cfg.materials.into_iter().collect();
        // HashMap iteration order is nondeterministic; sort keys so slot assignment is stable.
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        for (key, entry) in entries {
            let (surface, wall) = match entry {
                MaterialEntry::Shared(a) => {
                    let app = a.into_appearance();
                    (app.clone(), app)
                }
                MaterialEntry::Split { surface, wall } => {
                    (surface.into_appearance(), wall.into_appearance())
                }
            };
            // Slot 0 stays reserved for empty space.
            let id = MaterialId(catalog.materials.len() as u16 + 1);
            catalog.by_key.insert(key.clone(), id);
            catalog.materials.push(Material {
                id,
                key,
                surface,
                wall,
            });
        }
        Ok(catalog)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }
}

// --- Config ---

#[derive(Deserialize)]
pub struct MaterialsConfig {
    pub materials: HashMap<String, MaterialEntry>,
}

#[derive(Deserialize)]
#[serde(untagged)]
pub enum MaterialEntry {
    // Simple: material = "assets/foo.png" (same look for surface and wall)
    Shared(AppearanceEntry),
    // Split: material = { surface = "...", wall = { texture = "...", render_tag = "rock" } }
    Split {
        surface: AppearanceEntry,
        wall: AppearanceEntry,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
pub enum AppearanceEntry {
    Texture(String),
    Detail {
        texture: Option<String>,
        color: Option<[f32; 3]>,
        render_tag: Option<String>,
    },
}

impl AppearanceEntry {
    fn into_appearance(self) -> Appearance {
        match self {
            AppearanceEntry::Texture(p) => Appearance {
                texture: Some(PathBuf::from(p)),
                color: None,
                render_tag: None,
            },
            AppearanceEntry::Detail {
                texture,
                color,
                render_tag,
            } => Appearance {
                texture: texture.map(PathBuf::from),
                color,
                render_tag,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [materials]
        dirt = "assets/dirt.png"

        [materials.stone]
        surface = { texture = "assets/stone_top.png", render_tag = "rock" }
        wall = { color = [0.4, 0.4, 0.45] }
    "#;

    #[test]
    fn slots_are_stable_and_one_based() {
        let cat = MaterialCatalog::from_toml_str(SAMPLE).unwrap();
        assert_eq!(cat.slot_count(), 3);
        // Sorted by key: dirt before stone, starting at slot 1.
        assert_eq!(cat.get_id("dirt"), Some(MaterialId(1)));
        assert_eq!(cat.get_id("stone"), Some(MaterialId(2)));
        assert!(cat.get(MaterialId::EMPTY).is_none());
    }

    #[test]
    fn shared_entry_applies_to_both_faces() {
        let cat = MaterialCatalog::from_toml_str(SAMPLE).unwrap();
        let dirt = cat.get(cat.get_id("dirt").unwrap()).unwrap();
        assert_eq!(
            dirt.surface.texture.as_deref(),
            Some(Path::new("assets/dirt.png"))
        );
        assert_eq!(dirt.surface.texture, dirt.wall.texture);
    }

    #[test]
    fn split_entry_keeps_faces_apart() {
        let cat = MaterialCatalog::from_toml_str(SAMPLE).unwrap();
        let stone = cat.get(cat.get_id("stone").unwrap()).unwrap();
        assert_eq!(stone.surface.render_tag.as_deref(), Some("rock"));
        assert!(stone.wall.texture.is_none());
        assert_eq!(stone.wall.color, Some([0.4, 0.4, 0.45]));
    }
}
