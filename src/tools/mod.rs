//! Interactive tools layered over the anchor scene.
//!
//! Gestures run independently of the frame loop: taps request new anchors
//! from the session, long presses pick tracked nodes via OBB raycasts and
//! drive the spin animation.

/// Spin animation applied to long-pressed tracked nodes.
pub mod animation;

/// Tap / long-press routing from pointer input to semantic actions.
pub mod gestures;

/// Ray intersection helpers for gesture hit-testing.
pub mod ray;
