use bevy::prelude::*;

/// Camera-to-node distance below which a tracked node is considered near.
pub const NEAR_DISTANCE: f32 = 2.0;

/// Highlight colour applied to tracked nodes inside the near radius.
pub const NEAR_HIGHLIGHT_COLOR: Color = Color::srgb(0.0, 0.0, 1.0);

/// Baseline colour applied to tracked nodes outside the near radius.
pub const FAR_BASELINE_COLOR: Color = Color::srgb(1.0, 0.0, 0.0);

/// Translucent white for the debug planes spawned on every plane anchor.
pub const DEBUG_PLANE_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.75);

/// Synthetic thickness given to debug-plane hit boxes for OBB raycasts.
pub const DEBUG_PLANE_HIT_DEPTH: f32 = 0.01;

/// Catalog identifier of the decorative group placed on the first horizontal plane.
pub const PRIMARY_ASSET_GROUP: &str = "emblem";

/// Catalog identifier of the group spawned for every tap anchor.
pub const TAP_ASSET_GROUP: &str = "box";

/// Uniform scale applied to instantiated asset groups.
pub const PLACED_GROUP_SCALE: f32 = 0.1;

/// Plaque quad dimensions in scene units (first vertical plane only).
pub const PLAQUE_WIDTH: f32 = 0.4;
pub const PLAQUE_HEIGHT: f32 = 0.25;

/// Static logo image shown on the vertical-plane plaque.
pub const PLAQUE_TEXTURE_PATH: &str = "textures/plaque_logo.png";

/// Jaw-open blend-shape coefficient above which the face swaps to the alternate image.
pub const JAW_OPEN_THRESHOLD: f32 = 0.6;

/// Face images: the idle logo and the jaw-open alternate.
pub const FACE_IDLE_TEXTURE_PATH: &str = "textures/plaque_logo.png";
pub const FACE_SMILE_TEXTURE_PATH: &str = "textures/face_smile.png";

/// Distance in front of the camera at which tap gestures request a new anchor.
pub const TAP_ANCHOR_DISTANCE: f32 = 2.0;

/// Spin animation: half a turn about local Y every period.
pub const SPIN_PERIOD_SECS: f32 = 5.0;

/// Pointer hold duration separating a long press from a tap.
pub const LONG_PRESS_SECS: f32 = 0.45;

/// Asset catalog location relative to the asset root.
pub const ASSET_CATALOG_PATH: &str = "scene/anchor_catalog.json";
