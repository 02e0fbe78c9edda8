use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Complete asset catalog as a Bevy asset. Mirrors the JSON structure exactly.
#[derive(Asset, Debug, Clone, Serialize, Deserialize, TypePath)]
pub struct AssetCatalog {
    pub groups: Vec<AssetGroupDef>,
}

/// Named group of template nodes instantiated together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetGroupDef {
    pub id: String,
    pub nodes: Vec<TemplateNodeDef>,
}

/// One template node: primitive shape, base colour, and local offset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateNodeDef {
    pub name: String,
    pub shape: TemplateShape,
    /// Linear RGBA in [0.0, 1.0].
    pub color: [f32; 4],
    #[serde(default)]
    pub offset: [f32; 3],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TemplateShape {
    Cuboid { size: [f32; 3] },
    Quad { width: f32, height: f32 },
}

impl TemplateShape {
    /// Axis-aligned bounding size of the shape, for hit-test boxes.
    pub fn bounds(&self) -> Vec3 {
        match self {
            Self::Cuboid { size } => Vec3::from_array(*size),
            Self::Quad { width, height } => Vec3::new(*width, *height, 0.01),
        }
    }
}

impl TemplateNodeDef {
    pub fn offset_vec(&self) -> Vec3 {
        Vec3::from_array(self.offset)
    }

    pub fn base_color(&self) -> Color {
        Color::srgba(self.color[0], self.color[1], self.color[2], self.color[3])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_round_trips_from_json() {
        let raw = r#"{
            "groups": [
                {
                    "id": "box",
                    "nodes": [
                        {
                            "name": "box_body",
                            "shape": { "kind": "cuboid", "size": [1.0, 1.0, 1.0] },
                            "color": [0.6, 0.6, 0.6, 1.0]
                        }
                    ]
                }
            ]
        }"#;
        let catalog: AssetCatalog = serde_json::from_str(raw).unwrap();
        assert_eq!(catalog.groups.len(), 1);
        assert_eq!(catalog.groups[0].id, "box");
        assert_eq!(
            catalog.groups[0].nodes[0].shape.bounds(),
            Vec3::new(1.0, 1.0, 1.0)
        );
        // Offset is optional in the file and defaults to the origin.
        assert_eq!(catalog.groups[0].nodes[0].offset_vec(), Vec3::ZERO);
    }

    #[test]
    fn quad_bounds_carry_a_thin_depth() {
        let quad = TemplateShape::Quad {
            width: 0.4,
            height: 0.25,
        };
        let bounds = quad.bounds();
        assert_eq!(bounds.x, 0.4);
        assert_eq!(bounds.y, 0.25);
        assert!(bounds.z > 0.0);
    }
}
