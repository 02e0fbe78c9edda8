//! Per-node visual state with copy-on-first-write render resources.
//!
//! Template instances share mesh and material handles until the first state
//! change; at that point the node gets private clones of both assets so
//! recolouring one instance can never bleed into its template siblings.

use bevy::prelude::*;

use crate::constants::placement_settings::{FAR_BASELINE_COLOR, NEAR_HIGHLIGHT_COLOR};

/// Discrete visual state recomputed per frame from camera proximity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualState {
    Near,
    Far,
}

impl VisualState {
    pub fn color(self) -> Color {
        match self {
            Self::Near => NEAR_HIGHLIGHT_COLOR,
            Self::Far => FAR_BASELINE_COLOR,
        }
    }
}

/// Apply a visual state to one node's render resources.
///
/// On the first change (`exclusive` false) the mesh and material assets are
/// cloned into fresh handles before the colour is written; afterwards the
/// private material is mutated in place. A node whose backing assets are gone
/// is left untouched. Returns whether the state was actually represented.
pub fn apply_visual_state(
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    mesh: &mut Mesh3d,
    material: &mut MeshMaterial3d<StandardMaterial>,
    exclusive: &mut bool,
    state: VisualState,
) -> bool {
    if !*exclusive {
        let Some(mesh_copy) = meshes.get(&mesh.0).cloned() else {
            return false;
        };
        let Some(material_copy) = materials.get(&material.0).cloned() else {
            return false;
        };
        mesh.0 = meshes.add(mesh_copy);
        material.0 = materials.add(material_copy);
        *exclusive = true;
    }

    let Some(private) = materials.get_mut(&material.0) else {
        return false;
    };
    private.base_color = state.color();
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template_instance(
        meshes: &mut Assets<Mesh>,
        materials: &mut Assets<StandardMaterial>,
    ) -> (Mesh3d, MeshMaterial3d<StandardMaterial>) {
        let mesh = meshes.add(Cuboid::new(1.0, 1.0, 1.0));
        let material = materials.add(StandardMaterial {
            base_color: Color::srgb(0.6, 0.6, 0.6),
            ..default()
        });
        (Mesh3d(mesh), MeshMaterial3d(material))
    }

    #[test]
    fn changing_one_instance_leaves_template_siblings_untouched() {
        let mut meshes = Assets::<Mesh>::default();
        let mut materials = Assets::<StandardMaterial>::default();

        let (mut mesh_a, mut material_a) = template_instance(&mut meshes, &mut materials);
        // Sibling shares the same handles, as instantiation does.
        let mesh_b = Mesh3d(mesh_a.0.clone());
        let material_b = MeshMaterial3d(material_a.0.clone());
        let mut exclusive = false;

        assert!(apply_visual_state(
            &mut meshes,
            &mut materials,
            &mut mesh_a,
            &mut material_a,
            &mut exclusive,
            VisualState::Near,
        ));

        assert!(exclusive);
        assert_ne!(material_a.0.id(), material_b.0.id());
        assert_ne!(mesh_a.0.id(), mesh_b.0.id());
        let sibling = materials.get(&material_b.0).unwrap();
        assert_eq!(sibling.base_color, Color::srgb(0.6, 0.6, 0.6));
        let changed = materials.get(&material_a.0).unwrap();
        assert_eq!(changed.base_color, VisualState::Near.color());
    }

    #[test]
    fn second_state_change_reuses_the_private_clone() {
        let mut meshes = Assets::<Mesh>::default();
        let mut materials = Assets::<StandardMaterial>::default();

        let (mut mesh, mut material) = template_instance(&mut meshes, &mut materials);
        let mut exclusive = false;

        apply_visual_state(
            &mut meshes,
            &mut materials,
            &mut mesh,
            &mut material,
            &mut exclusive,
            VisualState::Near,
        );
        let cloned_material = material.0.id();
        let materials_after_first = materials.len();

        apply_visual_state(
            &mut meshes,
            &mut materials,
            &mut mesh,
            &mut material,
            &mut exclusive,
            VisualState::Far,
        );

        assert_eq!(material.0.id(), cloned_material);
        assert_eq!(materials.len(), materials_after_first);
        assert_eq!(
            materials.get(&material.0).unwrap().base_color,
            VisualState::Far.color()
        );
    }

    #[test]
    fn missing_backing_assets_are_a_no_op() {
        let mut meshes = Assets::<Mesh>::default();
        let mut materials = Assets::<StandardMaterial>::default();

        let mut mesh = Mesh3d(Handle::default());
        let mut material = MeshMaterial3d(Handle::default());
        let mut exclusive = false;

        assert!(!apply_visual_state(
            &mut meshes,
            &mut materials,
            &mut mesh,
            &mut material,
            &mut exclusive,
            VisualState::Near,
        ));
        assert!(!exclusive);
    }
}
