//! Interface to the tracking-session collaborator.
//!
//! The session reports real-world anchors (planes, tap anchors, faces) as a
//! stream of lifecycle events, all delivered on the `Update` schedule so anchor
//! handling is never concurrent with frame work. Anchor creation requested from
//! gestures is asynchronous: the request is fired here and fulfilment arrives
//! later as a regular `AnchorAdded` event.

use std::collections::HashMap;

use bevy::prelude::*;

pub mod simulated;

/// Opaque handle identifying an anchor for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnchorId(pub u64);

/// Extent and local centre of a detected plane, in anchor-local space.
/// `extent.x` spans the plane's local X, `extent.y` its local Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneGeometry {
    pub extent: Vec2,
    pub center: Vec3,
}

/// Named blend-shape coefficients reported with face anchors.
#[derive(Debug, Clone, Default)]
pub struct FaceBlendShapes(HashMap<String, f32>);

/// Coefficient name driving the face material swap.
pub const JAW_OPEN: &str = "jawOpen";

impl FaceBlendShapes {
    pub fn set(&mut self, name: &str, value: f32) {
        self.0.insert(name.to_owned(), value);
    }

    /// Coefficient value, defaulting to 0.0 when the session did not report it.
    pub fn coefficient(&self, name: &str) -> f32 {
        self.0.get(name).copied().unwrap_or(0.0)
    }
}

/// Kind-specific payload carried by every anchor event.
#[derive(Debug, Clone)]
pub enum AnchorKind {
    PlaneHorizontal(PlaneGeometry),
    PlaneVertical(PlaneGeometry),
    UserTap,
    Face(FaceBlendShapes),
}

impl AnchorKind {
    pub fn plane_geometry(&self) -> Option<&PlaneGeometry> {
        match self {
            Self::PlaneHorizontal(geometry) | Self::PlaneVertical(geometry) => Some(geometry),
            _ => None,
        }
    }
}

/// A new anchor was detected (or a requested one was created).
#[derive(Event, Debug, Clone)]
pub struct AnchorAdded {
    pub id: AnchorId,
    pub kind: AnchorKind,
    pub transform: Transform,
}

/// An existing anchor's pose or geometry was refined.
#[derive(Event, Debug, Clone)]
pub struct AnchorUpdated {
    pub id: AnchorId,
    pub kind: AnchorKind,
    pub transform: Transform,
}

/// An anchor left tracking; everything spawned for it must be detached.
#[derive(Event, Debug, Clone)]
pub struct AnchorRemoved {
    pub id: AnchorId,
}

/// Ask the session to create a `UserTap` anchor at a world transform.
/// The result arrives as a later `AnchorAdded`, never as a direct return.
#[derive(Event, Debug, Clone)]
pub struct CreateAnchorRequest {
    pub transform: Transform,
}

/// Full session reset: placement latches clear and anchored content despawns.
#[derive(Event, Debug, Clone)]
pub struct SessionReset;

/// Which tracking capabilities the session runs with.
#[derive(Resource, Debug, Clone)]
pub struct SessionConfig {
    pub detect_horizontal_planes: bool,
    pub detect_vertical_planes: bool,
    /// Face tracking stays off unless explicitly enabled; the face content
    /// path is dormant by default.
    pub face_tracking: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            detect_horizontal_planes: true,
            detect_vertical_planes: true,
            face_tracking: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_shape_coefficient_defaults_to_zero() {
        let mut shapes = FaceBlendShapes::default();
        assert_eq!(shapes.coefficient(JAW_OPEN), 0.0);
        shapes.set(JAW_OPEN, 0.7);
        assert_eq!(shapes.coefficient(JAW_OPEN), 0.7);
    }

    #[test]
    fn plane_geometry_only_on_plane_kinds() {
        let geometry = PlaneGeometry {
            extent: Vec2::splat(1.0),
            center: Vec3::ZERO,
        };
        assert!(AnchorKind::PlaneHorizontal(geometry).plane_geometry().is_some());
        assert!(AnchorKind::PlaneVertical(geometry).plane_geometry().is_some());
        assert!(AnchorKind::UserTap.plane_geometry().is_none());
        assert!(
            AnchorKind::Face(FaceBlendShapes::default())
                .plane_geometry()
                .is_none()
        );
    }
}
