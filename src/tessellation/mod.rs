//! Conversion of polygon meshes into indexed triangle lists for rendering.

mod triangulate;

pub use triangulate::Triangulate;

use crate::error::{Result, TessellationError};
use crate::math::{Point2, Point3, Vector3};

/// A triangle mesh ready to be handed to a renderer.
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Vertex normals, parallel to `vertices`.
    pub normals: Vec<Vector3>,
    /// UV coordinates, parallel to `vertices` or empty.
    pub uvs: Vec<Point2>,
    /// Triangle indices (each triple defines a triangle).
    pub indices: Vec<[u32; 3]>,
}

impl TriangleMesh {
    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// Appends another triangle mesh, rebasing its indices.
    ///
    /// UVs are only kept when both meshes carry them.
    ///
    /// # Errors
    ///
    /// Returns [`TessellationError::Failed`] if the merged vertex count no
    /// longer fits a `u32` index.
    pub fn merge(&mut self, other: &Self) -> Result<()> {
        let base = to_index(self.vertices.len())?;
        to_index(self.vertices.len() + other.vertices.len())?;

        let keep_uvs = self.uvs.len() == self.vertices.len()
            && other.uvs.len() == other.vertices.len()
            && (!self.uvs.is_empty() || self.vertices.is_empty());
        self.vertices.extend_from_slice(&other.vertices);
        self.normals.extend_from_slice(&other.normals);
        if keep_uvs {
            self.uvs.extend_from_slice(&other.uvs);
        } else {
            self.uvs.clear();
        }
        self.indices.extend(
            other
                .indices
                .iter()
                .map(|[a, b, c]| [a + base, b + base, c + base]),
        );
        Ok(())
    }
}

fn to_index(i: usize) -> Result<u32> {
    u32::try_from(i).map_err(|_| {
        TessellationError::Failed(format!("vertex index {i} does not fit a u32")).into()
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn triangle() -> TriangleMesh {
        TriangleMesh {
            vertices: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            normals: vec![Vector3::z(); 3],
            uvs: vec![
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 0.0),
                Point2::new(0.0, 1.0),
            ],
            indices: vec![[0, 1, 2]],
        }
    }

    #[test]
    fn merge_rebases_indices() {
        let mut mesh = triangle();
        mesh.merge(&triangle()).unwrap();
        assert_eq!(mesh.vertices.len(), 6);
        assert_eq!(mesh.uvs.len(), 6);
        assert_eq!(mesh.indices, vec![[0, 1, 2], [3, 4, 5]]);
    }

    #[test]
    fn merge_into_empty_keeps_uvs() {
        let mut mesh = TriangleMesh::default();
        mesh.merge(&triangle()).unwrap();
        assert_eq!(mesh.uvs.len(), 3);
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn merge_drops_partial_uvs() {
        let mut mesh = triangle();
        let mut bare = triangle();
        bare.uvs.clear();
        mesh.merge(&bare).unwrap();
        assert!(mesh.uvs.is_empty());
        assert_eq!(mesh.normals.len(), 6);
    }
}
