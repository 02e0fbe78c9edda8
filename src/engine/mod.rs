pub mod anchors;
pub mod assets;
pub mod camera;
pub mod material_state;
pub mod proximity;
pub mod session;
