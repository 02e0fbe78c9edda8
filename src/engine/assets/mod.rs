//! Template asset loading for anchor placement.
//!
//! Asset groups are described by a JSON catalog and realised once into shared
//! mesh/material handles; instantiation clones handles only, so instances keep
//! sharing render resources until the copy-on-write rule splits them.

/// Serde types for the JSON asset catalog. Mirrors the file structure exactly.
pub mod catalog;

/// Cache of realised template groups keyed by catalog identifier.
pub mod library;
