//! Per-frame proximity classification for tracked dynamic nodes.

use bevy::prelude::*;

use crate::constants::placement_settings::NEAR_DISTANCE;
use crate::engine::material_state::{self, VisualState};
use crate::engine::session::AnchorId;

/// Marker state for a node whose visual state follows camera proximity.
/// Owned by the anchor registry; lives as long as its anchor record.
#[derive(Component, Debug)]
pub struct TrackedDynamic {
    pub anchor: AnchorId,
    /// `None` until the first frame classifies the node.
    pub last_state: Option<VisualState>,
    /// Set once the node owns private clones of its render resources.
    pub exclusive_resources: bool,
}

impl TrackedDynamic {
    pub fn new(anchor: AnchorId) -> Self {
        Self {
            anchor,
            last_state: None,
            exclusive_resources: false,
        }
    }

    /// Reclassify against the camera position, returning the new state only
    /// when it differs from the last applied one.
    pub fn reclassify(&mut self, camera_position: Vec3, node_position: Vec3) -> Option<VisualState> {
        let state = classify(camera_position, node_position);
        if self.last_state == Some(state) {
            return None;
        }
        self.last_state = Some(state);
        Some(state)
    }
}

/// Near iff the camera sits strictly inside the near radius. The distance is
/// normalised through `abs` even though the metric cannot go negative.
pub fn classify(camera_position: Vec3, node_position: Vec3) -> VisualState {
    let distance = camera_position.distance(node_position).abs();
    if distance < NEAR_DISTANCE {
        VisualState::Near
    } else {
        VisualState::Far
    }
}

/// Frame tick: recompute every tracked node's state from the camera position
/// and push changed states through the material controller.
pub fn update_proximity_states(
    cameras: Query<&GlobalTransform, With<Camera3d>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut tracked: Query<(
        &GlobalTransform,
        &mut TrackedDynamic,
        Option<&mut Mesh3d>,
        Option<&mut MeshMaterial3d<StandardMaterial>>,
    )>,
) {
    let Ok(camera) = cameras.single() else {
        return;
    };
    let camera_position = camera.translation();

    for (node_transform, mut node, mesh, material) in &mut tracked {
        let Some(state) = node.reclassify(camera_position, node_transform.translation()) else {
            continue;
        };
        // A node missing geometry or material cannot show its state; not an error.
        let (Some(mut mesh), Some(mut material)) = (mesh, material) else {
            continue;
        };
        material_state::apply_visual_state(
            &mut meshes,
            &mut materials,
            &mut mesh,
            &mut material,
            &mut node.exclusive_resources,
            state,
        );
    }
}
