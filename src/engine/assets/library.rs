use std::collections::HashMap;

use bevy::prelude::*;

use crate::constants::placement_settings::ASSET_CATALOG_PATH;
use crate::engine::assets::catalog::{AssetCatalog, AssetGroupDef, TemplateShape};

/// One realised template node: shared handles plus placement metadata.
/// The backing mesh/material assets are never mutated after realisation.
#[derive(Debug, Clone)]
pub struct AssetTemplate {
    pub name: String,
    pub offset: Vec3,
    /// Local bounding size used for gesture hit-test boxes.
    pub bounds: Vec3,
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
}

#[derive(Debug, Clone, Default)]
pub struct AssetGroup {
    pub templates: Vec<AssetTemplate>,
}

/// Immutable lookup of template groups by catalog identifier.
#[derive(Resource, Default)]
pub struct AssetLibrary {
    groups: HashMap<String, AssetGroup>,
}

impl AssetLibrary {
    pub fn contains(&self, id: &str) -> bool {
        self.groups.contains_key(id)
    }

    pub fn group(&self, id: &str) -> Option<&AssetGroup> {
        self.groups.get(id)
    }

    pub fn insert_group(&mut self, id: impl Into<String>, group: AssetGroup) {
        self.groups.insert(id.into(), group);
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

/// Tracks the in-flight catalog load.
#[derive(Resource, Default)]
pub struct CatalogLoader {
    handle: Option<Handle<AssetCatalog>>,
    loaded: bool,
}

/// Kick off the catalog load, then realise every group once the JSON lands.
pub fn load_asset_catalog(
    mut loader: ResMut<CatalogLoader>,
    asset_server: Res<AssetServer>,
    catalogs: Res<Assets<AssetCatalog>>,
    mut library: ResMut<AssetLibrary>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if loader.handle.is_none() {
        info!("loading asset catalog from: {ASSET_CATALOG_PATH}");
        loader.handle = Some(asset_server.load(ASSET_CATALOG_PATH));
        return;
    }

    if loader.loaded {
        return;
    }
    let Some(catalog) = loader.handle.as_ref().and_then(|handle| catalogs.get(handle)) else {
        return;
    };

    for group_def in &catalog.groups {
        let group = realise_group(group_def, &mut meshes, &mut materials);
        library.insert_group(group_def.id.clone(), group);
    }
    loader.loaded = true;
    info!("asset catalog realised: {} group(s)", library.group_count());
}

fn realise_group(
    def: &AssetGroupDef,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) -> AssetGroup {
    let templates = def
        .nodes
        .iter()
        .map(|node| {
            let mesh = match &node.shape {
                TemplateShape::Cuboid { size } => {
                    meshes.add(Cuboid::new(size[0], size[1], size[2]))
                }
                TemplateShape::Quad { width, height } => {
                    meshes.add(Rectangle::new(*width, *height))
                }
            };
            let material = materials.add(StandardMaterial {
                base_color: node.base_color(),
                ..default()
            });
            AssetTemplate {
                name: node.name.clone(),
                offset: node.offset_vec(),
                bounds: node.shape.bounds(),
                mesh,
                material,
            }
        })
        .collect();
    AssetGroup { templates }
}
