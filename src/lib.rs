//! Polygon mesh topology and in-place modifiers: subdivision schemes,
//! extrusion, bevels, solidify and face selection.

pub mod error;
pub mod math;
pub mod operations;
pub mod selection;
pub mod tessellation;
pub mod topology;

pub use error::{MeshError, Result};
pub use operations::{FaceModifier, MeshCreator, MeshModifier};
pub use topology::{AdjacencyMap, Face, FaceId, HalfEdge, Mesh};
