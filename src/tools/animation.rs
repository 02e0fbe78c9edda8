//! Continuous rotation animation for selected tracked nodes.

use std::f32::consts::PI;

use bevy::prelude::*;

use crate::constants::placement_settings::SPIN_PERIOD_SECS;

/// Indefinitely repeating rotation about the node's local Y axis.
/// Inserting it replaces any running spin, so animations never stack.
#[derive(Component, Debug, Clone, Copy)]
pub struct SpinAnimation {
    pub radians_per_sec: f32,
}

impl Default for SpinAnimation {
    fn default() -> Self {
        // Half a turn per period.
        Self {
            radians_per_sec: PI / SPIN_PERIOD_SECS,
        }
    }
}

/// Start (or restart) the spin on a node.
pub fn start_spin(commands: &mut Commands, entity: Entity) {
    commands.entity(entity).insert(SpinAnimation::default());
}

pub fn run_spin_animations(time: Res<Time>, mut spinning: Query<(&SpinAnimation, &mut Transform)>) {
    for (spin, mut transform) in &mut spinning {
        transform.rotate_y(spin.radians_per_sec * time.delta_secs());
    }
}
