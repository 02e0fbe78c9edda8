/// Shared tunables for anchor placement, proximity feedback, and gestures.
pub mod placement_settings;
