//! Free-fly camera for the demo viewer.

use bevy::{input::mouse::MouseMotion, prelude::*};

#[derive(Component)]
pub struct FlyCamera {
    pub speed: f32,
    pub sensitivity: f32,
    pub pitch: f32,
    pub yaw: f32,
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self {
            speed: 2.5,
            sensitivity: 0.003,
            pitch: 0.0,
            yaw: 0.0,
        }
    }
}

/// WASD + QE movement, look around while holding the right mouse button.
pub fn camera_controller(
    time: Res<Time>,
    keys: Res<ButtonInput<KeyCode>>,
    buttons: Res<ButtonInput<MouseButton>>,
    mut motion: EventReader<MouseMotion>,
    mut cameras: Query<(&mut Transform, &mut FlyCamera)>,
) {
    let Ok((mut transform, mut camera)) = cameras.single_mut() else {
        return;
    };

    if buttons.pressed(MouseButton::Right) {
        for event in motion.read() {
            camera.yaw -= event.delta.x * camera.sensitivity;
            camera.pitch -= event.delta.y * camera.sensitivity;
        }
        camera.pitch = camera.pitch.clamp(-1.5, 1.5);
        transform.rotation =
            Quat::from_rotation_y(camera.yaw) * Quat::from_rotation_x(camera.pitch);
    } else {
        motion.clear();
    }

    let mut movement = Vec3::ZERO;
    if keys.pressed(KeyCode::KeyW) {
        movement += *transform.forward();
    }
    if keys.pressed(KeyCode::KeyS) {
        movement += *transform.back();
    }
    if keys.pressed(KeyCode::KeyA) {
        movement += *transform.left();
    }
    if keys.pressed(KeyCode::KeyD) {
        movement += *transform.right();
    }
    if keys.pressed(KeyCode::KeyQ) {
        movement -= Vec3::Y;
    }
    if keys.pressed(KeyCode::KeyE) {
        movement += Vec3::Y;
    }
    if movement != Vec3::ZERO {
        let step = movement.normalize() * camera.speed * time.delta_secs();
        transform.translation += step;
    }
}
