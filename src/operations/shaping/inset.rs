use tracing::debug;

use crate::error::{OperationError, Result};
use crate::math::polygon_3d;
use crate::operations::util::bridge_loops;
use crate::operations::FaceModifier;
use crate::topology::{Face, FaceId, Mesh};

/// Insets faces by a fixed distance.
///
/// Every edge of a target face is moved inward by `inset` within the face
/// plane; the outer boundary and the new inner polygon are joined by quads
/// and the inner polygon replaces the original face.
#[derive(Debug, Clone, Copy)]
pub struct Inset {
    inset: f64,
}

impl Inset {
    /// Creates a new `Inset` modifier.
    #[must_use]
    pub fn new(inset: f64) -> Self {
        Self { inset }
    }
}

impl FaceModifier for Inset {
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] for a non-finite distance and
    /// topology errors for stale handles or missing vertices.
    fn modify_faces<'m>(&self, mesh: &'m mut Mesh, faces: &[FaceId]) -> Result<&'m mut Mesh> {
        if !self.inset.is_finite() {
            return Err(OperationError::InvalidInput("inset must be finite".into()).into());
        }
        debug!(faces = faces.len(), inset = self.inset, "inset");
        for &id in faces {
            let source = mesh.face(id)?.clone();
            let points = mesh.points_of(&source.indices)?;
            let normal = polygon_3d::corner_normal(&points);
            let inner: Vec<usize> = polygon_3d::inset_polygon(&points, &normal, self.inset)
                .into_iter()
                .map(|p| mesh.add_vertex(p))
                .collect();

            for side in bridge_loops(mesh, &source.indices, &inner)? {
                mesh.face_mut(side)?.tag.clone_from(&source.tag);
            }
            mesh.remove_face(id);
            mesh.add_face_data(Face::new(inner).with_tag_opt(source.tag));
        }
        Ok(mesh)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;
    use crate::operations::creation::MakeGrid;
    use crate::operations::{MeshCreator, MeshModifier};
    use approx::assert_relative_eq;

    #[test]
    fn square_inset_keeps_an_inner_face() {
        let mut mesh = MakeGrid::new(2.0, 2.0, 1).create().unwrap();
        Inset::new(0.25).modify(&mut mesh).unwrap();
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.face_count(), 5);

        let inner = mesh.faces().last().unwrap().1.clone();
        let points = mesh.points_of(&inner.indices).unwrap();
        for p in points {
            assert_relative_eq!(p.x.abs(), 0.75, epsilon = 1e-12);
            assert_relative_eq!(p.z.abs(), 0.75, epsilon = 1e-12);
        }
    }

    #[test]
    fn inset_preserves_orientation() {
        let mut mesh = MakeGrid::new(2.0, 2.0, 1).create().unwrap();
        Inset::new(0.25).modify(&mut mesh).unwrap();
        for id in mesh.face_ids() {
            assert!(mesh.calculate_face_normal(id).unwrap().y > 0.99);
        }
    }

    #[test]
    fn triangle_inset_is_uniform() {
        let mut mesh = Mesh::new();
        mesh.add_vertex_xyz(0.0, 0.0, 0.0);
        mesh.add_vertex_xyz(4.0, 0.0, 0.0);
        mesh.add_vertex_xyz(0.0, 4.0, 0.0);
        let face = mesh.add_face([0, 1, 2]);
        Inset::new(0.5).modify_faces(&mut mesh, &[face]).unwrap();
        // Corner at the right angle moves diagonally by the inset on both axes.
        assert_relative_eq!(mesh.vertex(3).unwrap(), Point3::new(0.5, 0.5, 0.0), epsilon = 1e-12);
    }
}
