mod bevel_edges;
mod bevel_vertices;
mod remove_double_vertices;

pub use bevel_edges::{BevelEdges, BevelWidth};
pub use bevel_vertices::BevelVertices;
pub use remove_double_vertices::RemoveDoubleVertices;
