use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;
use bevy::render::alpha::AlphaMode;

use crate::constants::placement_settings::{
    DEBUG_PLANE_COLOR, DEBUG_PLANE_HIT_DEPTH, PLACED_GROUP_SCALE, PLAQUE_TEXTURE_PATH,
};
use crate::engine::anchors::registry::{AnchorRecord, AnchorRegistry, SpawnDirective};
use crate::engine::assets::library::{AssetGroup, AssetLibrary};
use crate::engine::proximity::TrackedDynamic;
use crate::engine::session::{AnchorAdded, AnchorId, AnchorRemoved, AnchorUpdated, SessionReset};

/// Root entity mirroring one live anchor's pose.
#[derive(Component)]
pub struct AnchorRoot(pub AnchorId);

/// Marker for the continuously-resized plane visual.
#[derive(Component)]
pub struct DebugPlane;

/// Participates in gesture hit-testing.
#[derive(Component)]
pub struct Hittable;

/// Local OBB size used for gesture raycasts.
#[derive(Component, Clone, Copy)]
pub struct BoundsSize(pub Vec3);

/// Local position for content spawned under a tap anchor: X and Y are held at
/// the origin, only the anchor's depth offset is taken.
pub fn tap_child_position(anchor_transform: &Transform) -> Vec3 {
    Vec3::new(0.0, 0.0, anchor_transform.translation.z)
}

/// Anchor-added executor: plans directives against the registry latches and
/// spawns an anchor root plus the decided content under it.
pub fn handle_anchor_added(
    mut events: EventReader<AnchorAdded>,
    mut registry: ResMut<AnchorRegistry>,
    library: Res<AssetLibrary>,
    asset_server: Res<AssetServer>,
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for event in events.read() {
        let directives = registry.plan_added(&event.kind, &library);

        let anchor_entity = commands
            .spawn((
                AnchorRoot(event.id),
                event.transform,
                Visibility::default(),
                Name::new(format!("anchor_{}", event.id.0)),
            ))
            .id();
        let mut record = AnchorRecord::new(event.kind.clone(), anchor_entity);

        for directive in directives {
            match directive {
                SpawnDirective::DebugPlane { extent, center } => {
                    let plane = spawn_debug_plane(
                        &mut commands,
                        &mut meshes,
                        &mut materials,
                        extent,
                        center,
                    );
                    commands.entity(anchor_entity).add_child(plane);
                    record.debug_plane = Some(plane);
                }
                SpawnDirective::PrimaryAsset { group } => {
                    let Some(templates) = library.group(group) else {
                        continue;
                    };
                    info!("placing primary asset group '{group}' on anchor {:?}", event.id);
                    let root = spawn_group_root(&mut commands, group);
                    spawn_template_children(&mut commands, root, templates, None, None);
                    commands.entity(anchor_entity).add_child(root);
                    record.spawned.push(root);
                }
                SpawnDirective::Plaque {
                    width,
                    height,
                    center,
                } => {
                    let plaque = spawn_plaque(
                        &mut commands,
                        &mut meshes,
                        &mut materials,
                        &asset_server,
                        width,
                        height,
                        center,
                    );
                    commands.entity(anchor_entity).add_child(plaque);
                    record.spawned.push(plaque);
                }
                SpawnDirective::TapGroup { group } => {
                    let Some(templates) = library.group(group) else {
                        continue;
                    };
                    let root = spawn_group_root(&mut commands, group);
                    spawn_template_children(
                        &mut commands,
                        root,
                        templates,
                        Some(tap_child_position(&event.transform)),
                        Some(event.id),
                    );
                    commands.entity(anchor_entity).add_child(root);
                    record.spawned.push(root);
                }
            }
        }

        registry.insert(event.id, record);
    }
}

fn spawn_debug_plane(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    extent: Vec2,
    center: Vec3,
) -> Entity {
    commands
        .spawn((
            Mesh3d(meshes.add(Rectangle::new(extent.x, extent.y))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: DEBUG_PLANE_COLOR,
                alpha_mode: AlphaMode::Blend,
                unlit: true,
                ..default()
            })),
            // Lie flat against the surface: -90 degrees about local X.
            Transform::from_translation(Vec3::new(center.x, 0.0, center.z))
                .with_rotation(Quat::from_rotation_x(-FRAC_PI_2)),
            DebugPlane,
            Hittable,
            BoundsSize(Vec3::new(extent.x, extent.y, DEBUG_PLANE_HIT_DEPTH)),
            Name::new("debug_plane"),
        ))
        .id()
}

fn spawn_group_root(commands: &mut Commands, group: &'static str) -> Entity {
    commands
        .spawn((
            Transform::from_scale(Vec3::splat(PLACED_GROUP_SCALE)),
            Visibility::default(),
            Name::new(format!("{group}_group")),
        ))
        .id()
}

/// Instantiate a group's templates as children of `root`, sharing the
/// template handles. Tap groups override each child's position and register
/// every child as a tracked dynamic node.
fn spawn_template_children(
    commands: &mut Commands,
    root: Entity,
    group: &AssetGroup,
    position_override: Option<Vec3>,
    track_for: Option<AnchorId>,
) {
    for template in &group.templates {
        let position = position_override.unwrap_or(template.offset);
        let child = commands
            .spawn((
                Mesh3d(template.mesh.clone()),
                MeshMaterial3d(template.material.clone()),
                Transform::from_translation(position),
                Name::new(template.name.clone()),
            ))
            .id();
        if let Some(anchor) = track_for {
            commands.entity(child).insert((
                TrackedDynamic::new(anchor),
                Hittable,
                BoundsSize(template.bounds),
            ));
        }
        commands.entity(root).add_child(child);
    }
}

fn spawn_plaque(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    asset_server: &AssetServer,
    width: f32,
    height: f32,
    center: Vec3,
) -> Entity {
    commands
        .spawn((
            Mesh3d(meshes.add(Rectangle::new(width, height))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color_texture: Some(asset_server.load(PLAQUE_TEXTURE_PATH)),
                unlit: true,
                ..default()
            })),
            Transform::from_translation(Vec3::new(center.x, 0.0, center.z))
                .with_rotation(Quat::from_rotation_x(-FRAC_PI_2)),
            Name::new("logo_plaque"),
        ))
        .id()
}

/// Anchor-updated executor: follow the refined pose and re-derive the debug
/// plane's size and centre, unconditionally on every update.
pub fn handle_anchor_updated(
    mut events: EventReader<AnchorUpdated>,
    mut registry: ResMut<AnchorRegistry>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut anchors: Query<&mut Transform, With<AnchorRoot>>,
    mut planes: Query<
        (&mut Transform, &Mesh3d, &mut BoundsSize),
        (With<DebugPlane>, Without<AnchorRoot>),
    >,
) {
    for event in events.read() {
        let Some(record) = registry.record_mut(&event.id) else {
            continue;
        };
        record.kind = event.kind.clone();
        if let Ok(mut transform) = anchors.get_mut(record.anchor_entity) {
            *transform = event.transform;
        }

        let Some(geometry) = event.kind.plane_geometry() else {
            continue;
        };
        let Some(plane) = record.debug_plane else {
            continue;
        };
        if let Ok((mut transform, mesh, mut bounds)) = planes.get_mut(plane) {
            if let Some(mesh) = meshes.get_mut(&mesh.0) {
                *mesh = Rectangle::new(geometry.extent.x, geometry.extent.y).into();
            }
            transform.translation = Vec3::new(geometry.center.x, 0.0, geometry.center.z);
            bounds.0 = Vec3::new(geometry.extent.x, geometry.extent.y, DEBUG_PLANE_HIT_DEPTH);
        }
    }
}

/// Anchor-removed executor: drop the record and detach everything spawned for
/// the anchor from the scene graph.
pub fn handle_anchor_removed(
    mut events: EventReader<AnchorRemoved>,
    mut registry: ResMut<AnchorRegistry>,
    mut commands: Commands,
) {
    for event in events.read() {
        let Some(record) = registry.remove(&event.id) else {
            continue;
        };
        info!("anchor {:?} removed, detaching {} node(s)", event.id, record.spawned.len());
        if let Ok(mut anchor) = commands.get_entity(record.anchor_entity) {
            anchor.despawn();
        }
    }
}

/// Full session reset: despawn all anchored content and reopen the latches.
pub fn handle_session_reset(
    mut events: EventReader<SessionReset>,
    mut registry: ResMut<AnchorRegistry>,
    mut commands: Commands,
) {
    if events.is_empty() {
        return;
    }
    events.clear();
    let drained = registry.reset();
    info!("session reset: clearing {} anchor(s)", drained.len());
    for record in drained {
        if let Ok(mut anchor) = commands.get_entity(record.anchor_entity) {
            anchor.despawn();
        }
    }
}
