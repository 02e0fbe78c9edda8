//! Scripted stand-in for a device tracking session.
//!
//! Detects a growing horizontal plane and a vertical plane on a timer and
//! fulfils `CreateAnchorRequest`s by minting fresh anchor ids, so the whole
//! anchor pipeline can be exercised without tracking hardware.

use bevy::prelude::*;

use super::{
    AnchorAdded, AnchorId, AnchorKind, AnchorUpdated, CreateAnchorRequest, PlaneGeometry,
    SessionConfig, SessionReset,
};

const HORIZONTAL_DETECT_AT: f32 = 1.0;
const VERTICAL_DETECT_AT: f32 = 3.0;
const PLANE_INITIAL_EXTENT: f32 = 0.4;
const PLANE_GROWTH_PER_SEC: f32 = 0.4;
const PLANE_MAX_EXTENT: f32 = 2.4;

#[derive(Resource)]
pub struct SimulatedSession {
    next_id: u64,
    clock: f32,
    horizontal: Option<(AnchorId, f32)>,
    vertical_emitted: bool,
}

impl Default for SimulatedSession {
    fn default() -> Self {
        Self {
            next_id: 1,
            clock: 0.0,
            horizontal: None,
            vertical_emitted: false,
        }
    }
}

impl SimulatedSession {
    fn allocate(&mut self) -> AnchorId {
        let id = AnchorId(self.next_id);
        self.next_id += 1;
        id
    }
}

pub struct SimulatedSessionPlugin;

impl Plugin for SimulatedSessionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulatedSession>().add_systems(
            Update,
            (
                drive_simulated_planes,
                fulfil_create_anchor_requests,
                reset_simulated_session,
            ),
        );
    }
}

/// Emit scripted plane detections; the horizontal plane keeps refining its
/// extent every frame until it reaches full size.
pub fn drive_simulated_planes(
    time: Res<Time>,
    config: Res<SessionConfig>,
    mut session: ResMut<SimulatedSession>,
    mut added: EventWriter<AnchorAdded>,
    mut updated: EventWriter<AnchorUpdated>,
) {
    session.clock += time.delta_secs();

    if config.detect_horizontal_planes
        && session.horizontal.is_none()
        && session.clock >= HORIZONTAL_DETECT_AT
    {
        let id = session.allocate();
        session.horizontal = Some((id, PLANE_INITIAL_EXTENT));
        info!("simulated session: horizontal plane {id:?} detected");
        added.write(AnchorAdded {
            id,
            kind: AnchorKind::PlaneHorizontal(PlaneGeometry {
                extent: Vec2::splat(PLANE_INITIAL_EXTENT),
                center: Vec3::ZERO,
            }),
            transform: Transform::IDENTITY,
        });
        return;
    }

    if let Some((id, extent)) = session.horizontal {
        if extent < PLANE_MAX_EXTENT {
            let grown = (extent + PLANE_GROWTH_PER_SEC * time.delta_secs()).min(PLANE_MAX_EXTENT);
            session.horizontal = Some((id, grown));
            updated.write(AnchorUpdated {
                id,
                kind: AnchorKind::PlaneHorizontal(PlaneGeometry {
                    extent: Vec2::splat(grown),
                    center: Vec3::ZERO,
                }),
                transform: Transform::IDENTITY,
            });
        }
    }

    if config.detect_vertical_planes
        && !session.vertical_emitted
        && session.clock >= VERTICAL_DETECT_AT
    {
        session.vertical_emitted = true;
        let id = session.allocate();
        info!("simulated session: vertical plane {id:?} detected");
        added.write(AnchorAdded {
            id,
            kind: AnchorKind::PlaneVertical(PlaneGeometry {
                extent: Vec2::new(1.2, 0.8),
                center: Vec3::ZERO,
            }),
            transform: Transform::from_xyz(0.0, 1.2, -2.5)
                .with_rotation(Quat::from_rotation_x(std::f32::consts::FRAC_PI_2)),
        });
    }
}

/// Turn anchor requests into `UserTap` anchor additions on the next tick.
pub fn fulfil_create_anchor_requests(
    mut requests: EventReader<CreateAnchorRequest>,
    mut session: ResMut<SimulatedSession>,
    mut added: EventWriter<AnchorAdded>,
) {
    for request in requests.read() {
        let id = session.allocate();
        info!("simulated session: tap anchor {id:?} created");
        added.write(AnchorAdded {
            id,
            kind: AnchorKind::UserTap,
            transform: request.transform,
        });
    }
}

/// Restart the detection script when the session is reset.
pub fn reset_simulated_session(
    mut resets: EventReader<SessionReset>,
    mut session: ResMut<SimulatedSession>,
) {
    if !resets.is_empty() {
        resets.clear();
        *session = SimulatedSession::default();
    }
}
