use tracing::debug;

use crate::error::Result;
use crate::operations::FaceModifier;
use crate::topology::{FaceId, Mesh};

use super::{center_vertex, replace_faces};

/// Splits each face into a triangle fan around a new center vertex.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanarVertexCenter;

impl PlanarVertexCenter {
    /// Creates a new `PlanarVertexCenter` modifier.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl FaceModifier for PlanarVertexCenter {
    fn modify_faces<'m>(&self, mesh: &'m mut Mesh, faces: &[FaceId]) -> Result<&'m mut Mesh> {
        debug!(faces = faces.len(), "planar vertex center split");
        replace_faces(mesh, faces, |mesh, _, face| {
            let center = center_vertex(mesh, face)?;
            let v = &face.indices;
            let n = v.len();
            Ok((0..n).map(|i| vec![v[i], v[(i + 1) % n], center]).collect())
        })?;
        Ok(mesh)
    }
}
