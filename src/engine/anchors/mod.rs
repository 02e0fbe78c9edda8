//! Anchor-to-scene-graph lifecycle management.
//!
//! The registry decides, for each anchor the session reports, what content to
//! instantiate and keeps the spawned-node bookkeeping in sync with live
//! anchors. Plane categories carry one-shot placement latches; tap anchors
//! spawn tracked dynamic nodes whose visual state follows camera proximity.

use bevy::prelude::*;

/// Keyed anchor registry, placement latches, and spawn planning.
pub mod registry;

/// Executor systems turning spawn directives into scene-graph entities.
pub mod spawn;

/// Dormant face-anchor content path (off unless explicitly enabled).
pub mod face;

use crate::engine::assets::library::{AssetLibrary, CatalogLoader, load_asset_catalog};
use crate::engine::proximity::update_proximity_states;
use crate::engine::session::{
    AnchorAdded, AnchorRemoved, AnchorUpdated, CreateAnchorRequest, SessionConfig, SessionReset,
};
use registry::AnchorRegistry;
use spawn::{
    handle_anchor_added, handle_anchor_removed, handle_anchor_updated, handle_session_reset,
};

/// Wires the anchor lifecycle: session events, the registry and asset
/// library, anchor executors, and per-frame proximity evaluation.
#[derive(Default)]
pub struct AnchorLifecyclePlugin {
    /// Registers the face content systems when set. Off by default.
    pub face_tracking: bool,
}

impl Plugin for AnchorLifecyclePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<AnchorAdded>()
            .add_event::<AnchorUpdated>()
            .add_event::<AnchorRemoved>()
            .add_event::<CreateAnchorRequest>()
            .add_event::<SessionReset>()
            .insert_resource(SessionConfig {
                face_tracking: self.face_tracking,
                ..Default::default()
            })
            .init_resource::<AnchorRegistry>()
            .init_resource::<AssetLibrary>()
            .init_resource::<CatalogLoader>()
            .add_systems(
                Update,
                (
                    load_asset_catalog,
                    (
                        handle_anchor_added,
                        handle_anchor_updated,
                        handle_anchor_removed,
                        handle_session_reset,
                    )
                        .chain(),
                    update_proximity_states,
                ),
            );

        if self.face_tracking {
            app.add_systems(Startup, face::load_face_images).add_systems(
                Update,
                (face::spawn_face_content, face::update_face_materials)
                    .after(handle_anchor_added),
            );
        }
    }
}
