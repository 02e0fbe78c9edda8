//! Gesture routing: screen-space taps and long presses become semantic
//! actions against the anchor scene.
//!
//! Gestures arrive asynchronously from the windowing layer but are routed as
//! events on the `Update` schedule, so they never mutate the registry or the
//! scene graph concurrently with frame work.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::constants::placement_settings::{LONG_PRESS_SECS, TAP_ANCHOR_DISTANCE};
use crate::engine::anchors::spawn::{BoundsSize, Hittable};
use crate::engine::proximity::TrackedDynamic;
use crate::engine::session::CreateAnchorRequest;
use crate::tools::animation::{run_spin_animations, start_spin};
use crate::tools::ray::ray_hits_obb;

/// Quick pointer release at a screen point.
#[derive(Event, Debug, Clone, Copy)]
pub struct TapGesture {
    pub position: Vec2,
}

/// Pointer held past the long-press threshold, released at a screen point.
#[derive(Event, Debug, Clone, Copy)]
pub struct LongPressGesture {
    pub position: Vec2,
}

#[derive(Resource, Default)]
pub struct PointerPressState {
    pressed: Option<(f32, Vec2)>,
}

pub struct GestureToolsPlugin;

impl Plugin for GestureToolsPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<TapGesture>()
            .add_event::<LongPressGesture>()
            .init_resource::<PointerPressState>()
            .add_systems(
                Update,
                (
                    gesture_pointer_input,
                    route_tap_gestures,
                    route_long_press_gestures,
                    run_spin_animations,
                ),
            );
    }
}

/// Classify pointer presses into taps and long presses by hold duration.
pub fn gesture_pointer_input(
    time: Res<Time>,
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut state: ResMut<PointerPressState>,
    mut taps: EventWriter<TapGesture>,
    mut presses: EventWriter<LongPressGesture>,
) {
    let Ok(window) = windows.single() else {
        return;
    };

    if buttons.just_pressed(MouseButton::Left) {
        if let Some(position) = window.cursor_position() {
            state.pressed = Some((time.elapsed_secs(), position));
        }
    }
    if buttons.just_released(MouseButton::Left) {
        let Some((pressed_at, position)) = state.pressed.take() else {
            return;
        };
        if time.elapsed_secs() - pressed_at >= LONG_PRESS_SECS {
            presses.write(LongPressGesture { position });
        } else {
            taps.write(TapGesture { position });
        }
    }
}

/// World transform two units straight ahead of the camera: a translation down
/// the camera's local -Z, composed with the camera's current pose.
pub fn anchor_in_front_of(camera: &GlobalTransform) -> Transform {
    camera
        .mul_transform(Transform::from_xyz(0.0, 0.0, -TAP_ANCHOR_DISTANCE))
        .compute_transform()
}

/// Tap: ask the session for a new anchor in front of the camera. Content is
/// spawned later, when the session reports the anchor as added.
pub fn route_tap_gestures(
    mut taps: EventReader<TapGesture>,
    cameras: Query<&GlobalTransform, With<Camera3d>>,
    mut requests: EventWriter<CreateAnchorRequest>,
) {
    for _tap in taps.read() {
        let Ok(camera) = cameras.single() else {
            continue;
        };
        requests.write(CreateAnchorRequest {
            transform: anchor_in_front_of(camera),
        });
    }
}

/// Nearest positive OBB hit along the ray, over all hittable geometry.
fn resolve_press_hit(
    origin: Vec3,
    dir: Vec3,
    hittables: impl Iterator<Item = (Entity, GlobalTransform, Vec3)>,
) -> Option<(Entity, f32)> {
    let mut best: Option<(Entity, f32)> = None;
    for (entity, xf, size) in hittables {
        if let Some(t) = ray_hits_obb(origin, dir, xf, size) {
            if t > 0.0 && best.is_none_or(|(_, best_t)| t < best_t) {
                best = Some((entity, t));
            }
        }
    }
    best
}

/// Long press: hit-test the scene and restart the spin on the hit node, but
/// only when the nearest hit is a tracked dynamic node. Empty hits and
/// untracked geometry (debug planes) are silently ignored.
pub fn route_long_press_gestures(
    mut presses: EventReader<LongPressGesture>,
    cameras: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    hittables: Query<(Entity, &GlobalTransform, &BoundsSize), With<Hittable>>,
    tracked: Query<(), With<TrackedDynamic>>,
    mut commands: Commands,
) {
    for press in presses.read() {
        let Ok((camera, camera_transform)) = cameras.single() else {
            continue;
        };
        let Ok(ray) = camera.viewport_to_world(camera_transform, press.position) else {
            continue;
        };
        let hit = resolve_press_hit(
            ray.origin,
            ray.direction.as_vec3(),
            hittables.iter().map(|(e, xf, size)| (e, *xf, size.0)),
        );
        let Some((entity, _)) = hit else {
            continue;
        };
        if tracked.contains(entity) {
            start_spin(&mut commands, entity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tap_anchor_transform_is_camera_pose_composed_with_minus_two_z() {
        let pose = Transform::from_xyz(1.0, 2.0, 3.0)
            .with_rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
        let camera = GlobalTransform::from(pose);

        let anchor = anchor_in_front_of(&camera);

        let expected =
            pose.compute_matrix() * Mat4::from_translation(Vec3::new(0.0, 0.0, -2.0));
        let expected = Transform::from_matrix(expected);
        assert!((anchor.translation - expected.translation).length() < 1e-5);
        assert!(anchor.rotation.angle_between(expected.rotation) < 1e-5);
    }

    #[test]
    fn identity_camera_requests_an_anchor_two_units_ahead() {
        let anchor = anchor_in_front_of(&GlobalTransform::IDENTITY);
        assert!((anchor.translation - Vec3::new(0.0, 0.0, -2.0)).length() < 1e-6);
    }

    #[test]
    fn nearest_hit_wins_even_when_it_is_untracked_geometry() {
        let plane = Entity::from_raw(1);
        let tracked_box = Entity::from_raw(2);
        // Debug plane sits between the camera and the tracked box.
        let hittables = vec![
            (
                plane,
                GlobalTransform::from(Transform::from_xyz(0.0, 0.0, -1.0)),
                Vec3::new(2.0, 2.0, 0.01),
            ),
            (
                tracked_box,
                GlobalTransform::from(Transform::from_xyz(0.0, 0.0, -3.0)),
                Vec3::splat(1.0),
            ),
        ];

        let hit = resolve_press_hit(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), hittables.into_iter());
        // The router then ignores the press: the plane is not tracked.
        assert_eq!(hit.map(|(e, _)| e), Some(plane));
    }

    #[test]
    fn ray_past_everything_resolves_to_no_hit() {
        let hittables = vec![(
            Entity::from_raw(1),
            GlobalTransform::from(Transform::from_xyz(5.0, 0.0, -3.0)),
            Vec3::splat(1.0),
        )];
        let hit = resolve_press_hit(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), hittables.into_iter());
        assert!(hit.is_none());
    }
}
