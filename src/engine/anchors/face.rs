//! Face-anchor content path.
//!
//! Dormant by default: none of these systems are registered unless the plugin
//! is built with face tracking enabled, and the default anchor handlers spawn
//! nothing for `Face` anchors. Kept wired-but-unregistered because reviving
//! face support is plausible future work.

use bevy::prelude::*;

use crate::constants::placement_settings::{
    FACE_IDLE_TEXTURE_PATH, FACE_SMILE_TEXTURE_PATH, JAW_OPEN_THRESHOLD,
};
use crate::engine::anchors::registry::AnchorRegistry;
use crate::engine::session::{AnchorAdded, AnchorId, AnchorKind, AnchorUpdated, JAW_OPEN};

/// Which of the two fixed images the face mesh currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceImage {
    Idle,
    Smile,
}

/// Strictly greater-than the jaw-open threshold selects the alternate image.
pub fn face_image_for(jaw_open: f32) -> FaceImage {
    if jaw_open > JAW_OPEN_THRESHOLD {
        FaceImage::Smile
    } else {
        FaceImage::Idle
    }
}

#[derive(Resource)]
pub struct FaceImages {
    pub idle: Handle<Image>,
    pub smile: Handle<Image>,
}

impl FaceImages {
    pub fn handle_for(&self, image: FaceImage) -> Handle<Image> {
        match image {
            FaceImage::Idle => self.idle.clone(),
            FaceImage::Smile => self.smile.clone(),
        }
    }
}

/// Textured stand-in for the fitted face mesh.
#[derive(Component)]
pub struct FaceMesh(pub AnchorId);

const FACE_QUAD_SIZE: Vec2 = Vec2::new(0.18, 0.24);

pub fn load_face_images(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.insert_resource(FaceImages {
        idle: asset_server.load(FACE_IDLE_TEXTURE_PATH),
        smile: asset_server.load(FACE_SMILE_TEXTURE_PATH),
    });
}

/// Spawn the face mesh for added face anchors. Runs after the default anchor
/// executor so the anchor root and registry record already exist.
pub fn spawn_face_content(
    mut events: EventReader<AnchorAdded>,
    mut registry: ResMut<AnchorRegistry>,
    images: Res<FaceImages>,
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for event in events.read() {
        let AnchorKind::Face(_) = event.kind else {
            continue;
        };
        let Some(record) = registry.record_mut(&event.id) else {
            continue;
        };
        let face = commands
            .spawn((
                FaceMesh(event.id),
                Mesh3d(meshes.add(Rectangle::new(FACE_QUAD_SIZE.x, FACE_QUAD_SIZE.y))),
                // Each face gets its own material, so the image swap below
                // mutates in place without touching anything shared.
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color_texture: Some(images.idle.clone()),
                    unlit: true,
                    ..default()
                })),
                Transform::IDENTITY,
                Name::new("face_mesh"),
            ))
            .id();
        commands.entity(record.anchor_entity).add_child(face);
        record.spawned.push(face);
    }
}

/// Swap the face image on blend-shape updates.
pub fn update_face_materials(
    mut events: EventReader<AnchorUpdated>,
    images: Res<FaceImages>,
    faces: Query<(&FaceMesh, &MeshMaterial3d<StandardMaterial>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for event in events.read() {
        let AnchorKind::Face(ref shapes) = event.kind else {
            continue;
        };
        let image = face_image_for(shapes.coefficient(JAW_OPEN));
        for (face, material) in &faces {
            if face.0 != event.id {
                continue;
            }
            if let Some(material) = materials.get_mut(&material.0) {
                material.base_color_texture = Some(images.handle_for(image));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jaw_open_threshold_is_strictly_greater_than() {
        assert_eq!(face_image_for(0.0), FaceImage::Idle);
        assert_eq!(face_image_for(0.6), FaceImage::Idle);
        assert_eq!(face_image_for(0.601), FaceImage::Smile);
        assert_eq!(face_image_for(1.0), FaceImage::Smile);
    }
}
