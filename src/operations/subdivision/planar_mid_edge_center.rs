use tracing::debug;

use crate::error::Result;
use crate::operations::FaceModifier;
use crate::topology::{FaceId, Mesh};

use super::{center_vertex, edge_midpoints, replace_faces};

/// Splits each face into one quad per corner through its center and edge
/// midpoints. Vertices do not move.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanarMidEdgeCenter;

impl PlanarMidEdgeCenter {
    /// Creates a new `PlanarMidEdgeCenter` modifier.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl FaceModifier for PlanarMidEdgeCenter {
    fn modify_faces<'m>(&self, mesh: &'m mut Mesh, faces: &[FaceId]) -> Result<&'m mut Mesh> {
        debug!(faces = faces.len(), "planar mid-edge center split");
        replace_faces(mesh, faces, |mesh, shared, face| {
            let mids = edge_midpoints(mesh, shared, face)?;
            let center = center_vertex(mesh, face)?;
            let v = &face.indices;
            let n = v.len();
            Ok((0..n)
                .map(|i| vec![v[i], mids[i], center, mids[(i + n - 1) % n]])
                .collect())
        })?;
        Ok(mesh)
    }
}
