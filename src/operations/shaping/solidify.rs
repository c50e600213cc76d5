use tracing::debug;

use crate::error::{OperationError, Result};
use crate::operations::MeshModifier;
use crate::topology::{AdjacencyMap, Face, Mesh};

/// Gives a surface a thickness.
///
/// The whole mesh is duplicated with reversed winding and the copy is pushed
/// back by `thickness` against the per-vertex normals. Every boundary edge of
/// the original is joined to its copy with a quad, so an open sheet becomes a
/// closed shell. A thickness of zero leaves the mesh untouched.
#[derive(Debug, Clone, Copy)]
pub struct Solidify {
    thickness: f64,
}

impl Solidify {
    /// Creates a new `Solidify` modifier.
    #[must_use]
    pub fn new(thickness: f64) -> Self {
        Self { thickness }
    }
}

impl MeshModifier for Solidify {
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] for a non-finite thickness
    /// and topology errors for faces referencing missing vertices.
    fn modify<'m>(&self, mesh: &'m mut Mesh) -> Result<&'m mut Mesh> {
        if !self.thickness.is_finite() {
            return Err(OperationError::InvalidInput("thickness must be finite".into()).into());
        }
        if self.thickness == 0.0 {
            return Ok(mesh);
        }

        let adjacency = AdjacencyMap::new(mesh);
        let normals = mesh.vertex_normals()?;
        let base = mesh.vertex_count();

        for i in 0..base {
            let shifted = mesh.vertex(i)? - normals[i] * self.thickness;
            mesh.add_vertex(shifted);
        }

        let mut copies = Vec::with_capacity(adjacency.faces().len());
        for (id, _) in adjacency.faces() {
            let mut copy = mesh.face(*id)?.reversed();
            for index in &mut copy.indices {
                *index += base;
            }
            copy.uv_indices = None;
            copies.push(copy);
        }
        for copy in copies {
            mesh.add_face_data(copy);
        }

        let boundary = adjacency.boundary_edges();
        for edge in &boundary {
            let tag = adjacency
                .face_id_by_edge(*edge)
                .map(|id| mesh.face(id).map(|f| f.tag.clone()))
                .transpose()?
                .flatten();
            mesh.add_face_data(
                Face::new(vec![edge.to, edge.from, edge.from + base, edge.to + base])
                    .with_tag_opt(tag),
            );
        }

        debug!(
            thickness = self.thickness,
            boundary_edges = boundary.len(),
            faces = mesh.face_count(),
            "solidify"
        );
        Ok(mesh)
    }
}
