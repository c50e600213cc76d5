use tracing::debug;

use crate::error::Result;
use crate::operations::FaceModifier;
use crate::topology::{FaceId, Mesh};

use super::{center_vertex, edge_midpoints, replace_faces};

/// Splits each face into two triangles per edge, fanned around a new center
/// vertex through the edge midpoints.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanarVertexMidEdgeCenter;

impl PlanarVertexMidEdgeCenter {
    /// Creates a new `PlanarVertexMidEdgeCenter` modifier.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl FaceModifier for PlanarVertexMidEdgeCenter {
    fn modify_faces<'m>(&self, mesh: &'m mut Mesh, faces: &[FaceId]) -> Result<&'m mut Mesh> {
        debug!(faces = faces.len(), "planar vertex mid-edge center split");
        replace_faces(mesh, faces, |mesh, shared, face| {
            let mids = edge_midpoints(mesh, shared, face)?;
            let center = center_vertex(mesh, face)?;
            let v = &face.indices;
            let n = v.len();
            let mut pieces = Vec::with_capacity(2 * n);
            for i in 0..n {
                pieces.push(vec![v[i], mids[i], center]);
                pieces.push(vec![mids[i], v[(i + 1) % n], center]);
            }
            Ok(pieces)
        })?;
        Ok(mesh)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::creation::MakeCube;
    use crate::operations::{MeshCreator, MeshModifier};
    use crate::topology::AdjacencyMap;

    #[test]
    fn quad_becomes_eight_triangles() {
        let mut mesh = Mesh::new();
        mesh.add_vertex_xyz(0.0, 0.0, 0.0);
        mesh.add_vertex_xyz(1.0, 0.0, 0.0);
        mesh.add_vertex_xyz(1.0, 1.0, 0.0);
        mesh.add_vertex_xyz(0.0, 1.0, 0.0);
        mesh.add_face([0, 1, 2, 3]);
        PlanarVertexMidEdgeCenter::new().modify(&mut mesh).unwrap();
        assert_eq!(mesh.face_count(), 8);
        assert_eq!(mesh.vertex_count(), 9);
        for id in mesh.face_ids() {
            assert!(mesh.calculate_face_normal(id).unwrap().z > 0.99);
        }
    }

    #[test]
    fn cube_stays_closed() {
        let mut mesh = MakeCube::new(2.0).create().unwrap();
        PlanarVertexMidEdgeCenter::new().modify(&mut mesh).unwrap();
        assert_eq!(mesh.face_count(), 48);
        assert_eq!(mesh.vertex_count(), 8 + 12 + 6);
        assert!(AdjacencyMap::new(&mesh).boundary_edges().is_empty());
    }
}
