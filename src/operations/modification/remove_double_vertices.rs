use tracing::debug;

use crate::error::{Result, TopologyError};
use crate::math::{PositionIndex, Precision};
use crate::operations::MeshModifier;
use crate::topology::Mesh;

/// Merges vertices that share a position.
///
/// The first vertex at a position survives, keeping its relative order.
/// Face indices are remapped in place, so face handles, tags and texture
/// indices are preserved. Faces that become degenerate are kept.
#[derive(Debug, Clone, Copy)]
pub struct RemoveDoubleVertices {
    precision: Precision,
}

impl RemoveDoubleVertices {
    /// Creates a modifier that merges bit-identical positions.
    #[must_use]
    pub fn new() -> Self {
        Self {
            precision: Precision::Exact,
        }
    }

    /// Compares positions after rounding with `precision`.
    #[must_use]
    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }
}

impl Default for RemoveDoubleVertices {
    fn default() -> Self {
        Self::new()
    }
}

impl MeshModifier for RemoveDoubleVertices {
    /// # Errors
    ///
    /// Returns [`TopologyError::InvalidVertexIndex`] if a face references a missing vertex.
    fn modify<'m>(&self, mesh: &'m mut Mesh) -> Result<&'m mut Mesh> {
        let before = mesh.vertex_count();
        let mut positions = PositionIndex::new(self.precision);
        let mut kept = Vec::new();
        let remap: Vec<usize> = mesh
            .vertices()
            .iter()
            .map(|p| {
                positions.get_or_insert_with(p, |p| {
                    kept.push(p);
                    kept.len() - 1
                })
            })
            .collect();

        for id in mesh.face_ids() {
            let face = mesh.face_mut(id)?;
            for index in &mut face.indices {
                *index = *remap.get(*index).ok_or(TopologyError::InvalidVertexIndex {
                    index: *index,
                    vertex_count: before,
                })?;
            }
        }

        mesh.clear_vertices();
        for p in kept {
            mesh.add_vertex(p);
        }
        debug!(
            before,
            after = mesh.vertex_count(),
            precision = ?self.precision,
            "removed double vertices"
        );
        Ok(mesh)
    }
}
