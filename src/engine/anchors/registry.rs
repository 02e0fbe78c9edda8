use std::collections::HashMap;

use bevy::prelude::*;

use crate::constants::placement_settings::{
    PLAQUE_HEIGHT, PLAQUE_WIDTH, PRIMARY_ASSET_GROUP, TAP_ASSET_GROUP,
};
use crate::engine::assets::library::AssetLibrary;
use crate::engine::session::{AnchorId, AnchorKind};

/// One-shot placement gates, one per plane category. Set on the first
/// successful placement for the category, cleared only by a session reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlacementLatches {
    pub horizontal: bool,
    pub vertical: bool,
}

/// Scene-graph bookkeeping for one live anchor.
#[derive(Debug)]
pub struct AnchorRecord {
    pub kind: AnchorKind,
    pub anchor_entity: Entity,
    /// The continuously-resized debug visual, when the anchor is a plane.
    pub debug_plane: Option<Entity>,
    /// Content entities spawned under the anchor (group roots, plaque).
    pub spawned: Vec<Entity>,
}

impl AnchorRecord {
    pub fn new(kind: AnchorKind, anchor_entity: Entity) -> Self {
        Self {
            kind,
            anchor_entity,
            debug_plane: None,
            spawned: Vec::new(),
        }
    }
}

/// What to instantiate for an anchor event. Planning is pure; executor
/// systems turn directives into entities.
#[derive(Debug, Clone, PartialEq)]
pub enum SpawnDirective {
    /// Translucent plane sized to the anchor extent, every plane add.
    DebugPlane { extent: Vec2, center: Vec3 },
    /// Decorative group on the first horizontal plane of the session.
    PrimaryAsset { group: &'static str },
    /// Logo plaque on the first vertical plane of the session.
    Plaque { width: f32, height: f32, center: Vec3 },
    /// Fresh tracked group for every tap anchor.
    TapGroup { group: &'static str },
}

/// Keyed map of live anchors to their spawned nodes, plus the placement
/// latches. The sole owner of anchor-to-node associations.
#[derive(Resource, Default)]
pub struct AnchorRegistry {
    records: HashMap<AnchorId, AnchorRecord>,
    latches: PlacementLatches,
}

impl AnchorRegistry {
    pub fn latches(&self) -> PlacementLatches {
        self.latches
    }

    /// Decide what an added anchor spawns. Latch state advances here, but a
    /// latch is only consumed when the asset group it guards is available;
    /// a missing group leaves the latch open for a later anchor to retry.
    pub fn plan_added(&mut self, kind: &AnchorKind, library: &AssetLibrary) -> Vec<SpawnDirective> {
        match kind {
            AnchorKind::PlaneHorizontal(geometry) => {
                let mut directives = vec![SpawnDirective::DebugPlane {
                    extent: geometry.extent,
                    center: geometry.center,
                }];
                if !self.latches.horizontal {
                    if library.contains(PRIMARY_ASSET_GROUP) {
                        self.latches.horizontal = true;
                        directives.push(SpawnDirective::PrimaryAsset {
                            group: PRIMARY_ASSET_GROUP,
                        });
                    } else {
                        warn!(
                            "asset group '{PRIMARY_ASSET_GROUP}' not loaded; horizontal placement stays open"
                        );
                    }
                }
                directives
            }
            AnchorKind::PlaneVertical(geometry) => {
                let mut directives = vec![SpawnDirective::DebugPlane {
                    extent: geometry.extent,
                    center: geometry.center,
                }];
                if !self.latches.vertical {
                    self.latches.vertical = true;
                    directives.push(SpawnDirective::Plaque {
                        width: PLAQUE_WIDTH,
                        height: PLAQUE_HEIGHT,
                        center: geometry.center,
                    });
                }
                directives
            }
            AnchorKind::UserTap => {
                if library.contains(TAP_ASSET_GROUP) {
                    vec![SpawnDirective::TapGroup {
                        group: TAP_ASSET_GROUP,
                    }]
                } else {
                    warn!("asset group '{TAP_ASSET_GROUP}' not loaded; tap anchor spawns nothing");
                    Vec::new()
                }
            }
            // Face content is handled by the dormant face path, never here.
            AnchorKind::Face(_) => Vec::new(),
        }
    }

    pub fn insert(&mut self, id: AnchorId, record: AnchorRecord) {
        self.records.insert(id, record);
    }

    pub fn record(&self, id: &AnchorId) -> Option<&AnchorRecord> {
        self.records.get(id)
    }

    pub fn record_mut(&mut self, id: &AnchorId) -> Option<&mut AnchorRecord> {
        self.records.get_mut(id)
    }

    pub fn remove(&mut self, id: &AnchorId) -> Option<AnchorRecord> {
        self.records.remove(id)
    }

    pub fn anchor_count(&self) -> usize {
        self.records.len()
    }

    /// Session reset: drain every record and reopen both latches.
    pub fn reset(&mut self) -> Vec<AnchorRecord> {
        self.latches = PlacementLatches::default();
        self.records.drain().map(|(_, record)| record).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::library::AssetGroup;
    use crate::engine::session::{FaceBlendShapes, PlaneGeometry};

    fn library_with(ids: &[&str]) -> AssetLibrary {
        let mut library = AssetLibrary::default();
        for id in ids {
            library.insert_group(*id, AssetGroup::default());
        }
        library
    }

    fn horizontal() -> AnchorKind {
        AnchorKind::PlaneHorizontal(PlaneGeometry {
            extent: Vec2::splat(1.0),
            center: Vec3::new(0.2, 0.0, -0.1),
        })
    }

    fn vertical() -> AnchorKind {
        AnchorKind::PlaneVertical(PlaneGeometry {
            extent: Vec2::new(1.2, 0.8),
            center: Vec3::ZERO,
        })
    }

    fn has_primary(directives: &[SpawnDirective]) -> bool {
        directives
            .iter()
            .any(|d| matches!(d, SpawnDirective::PrimaryAsset { .. }))
    }

    fn has_debug_plane(directives: &[SpawnDirective]) -> bool {
        directives
            .iter()
            .any(|d| matches!(d, SpawnDirective::DebugPlane { .. }))
    }

    #[test]
    fn primary_asset_placed_exactly_once_across_horizontal_adds() {
        let mut registry = AnchorRegistry::default();
        let library = library_with(&[PRIMARY_ASSET_GROUP, TAP_ASSET_GROUP]);

        let first = registry.plan_added(&horizontal(), &library);
        assert!(has_debug_plane(&first));
        assert!(has_primary(&first));
        assert!(registry.latches().horizontal);

        for _ in 0..3 {
            let later = registry.plan_added(&horizontal(), &library);
            // Debug plane still spawns for every add; the decorative asset never again.
            assert!(has_debug_plane(&later));
            assert!(!has_primary(&later));
        }
    }

    #[test]
    fn missing_primary_group_leaves_the_latch_open_for_retry() {
        let mut registry = AnchorRegistry::default();
        let empty = AssetLibrary::default();

        let directives = registry.plan_added(&horizontal(), &empty);
        assert!(has_debug_plane(&directives));
        assert!(!has_primary(&directives));
        assert!(!registry.latches().horizontal);

        // A later anchor retries once the group has loaded.
        let loaded = library_with(&[PRIMARY_ASSET_GROUP]);
        let retried = registry.plan_added(&horizontal(), &loaded);
        assert!(has_primary(&retried));
        assert!(registry.latches().horizontal);
    }

    #[test]
    fn plaque_placed_once_with_fixed_dimensions() {
        let mut registry = AnchorRegistry::default();
        let library = AssetLibrary::default();

        let first = registry.plan_added(&vertical(), &library);
        assert!(first.iter().any(|d| matches!(
            d,
            SpawnDirective::Plaque {
                width,
                height,
                ..
            } if *width == PLAQUE_WIDTH && *height == PLAQUE_HEIGHT
        )));
        assert!(registry.latches().vertical);

        let second = registry.plan_added(&vertical(), &library);
        assert!(has_debug_plane(&second));
        assert!(!second.iter().any(|d| matches!(d, SpawnDirective::Plaque { .. })));
    }

    #[test]
    fn every_tap_anchor_spawns_a_fresh_group() {
        let mut registry = AnchorRegistry::default();
        let library = library_with(&[TAP_ASSET_GROUP]);

        for _ in 0..3 {
            let directives = registry.plan_added(&AnchorKind::UserTap, &library);
            assert_eq!(
                directives,
                vec![SpawnDirective::TapGroup {
                    group: TAP_ASSET_GROUP
                }]
            );
        }
    }

    #[test]
    fn tap_without_loaded_group_spawns_nothing() {
        let mut registry = AnchorRegistry::default();
        let directives = registry.plan_added(&AnchorKind::UserTap, &AssetLibrary::default());
        assert!(directives.is_empty());
    }

    #[test]
    fn face_anchors_spawn_nothing_from_the_default_path() {
        let mut registry = AnchorRegistry::default();
        let library = library_with(&[PRIMARY_ASSET_GROUP, TAP_ASSET_GROUP]);
        let directives =
            registry.plan_added(&AnchorKind::Face(FaceBlendShapes::default()), &library);
        assert!(directives.is_empty());
    }

    #[test]
    fn reset_reopens_latches_and_drains_records() {
        let mut registry = AnchorRegistry::default();
        let library = library_with(&[PRIMARY_ASSET_GROUP]);

        registry.plan_added(&horizontal(), &library);
        registry.plan_added(&vertical(), &library);
        registry.insert(
            AnchorId(1),
            AnchorRecord::new(horizontal(), Entity::PLACEHOLDER),
        );
        assert_eq!(registry.anchor_count(), 1);

        let drained = registry.reset();
        assert_eq!(drained.len(), 1);
        assert_eq!(registry.anchor_count(), 0);
        assert_eq!(registry.latches(), PlacementLatches::default());

        // Fresh session places the primary asset again.
        let directives = registry.plan_added(&horizontal(), &library);
        assert!(has_primary(&directives));
    }
}
