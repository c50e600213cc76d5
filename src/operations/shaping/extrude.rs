use tracing::debug;

use crate::error::{OperationError, Result};
use crate::operations::util::extrude_face;
use crate::operations::FaceModifier;
use crate::topology::{FaceId, Mesh};

/// Extrudes faces along their normals.
///
/// Each target face is replaced by a ring of side quads joining its boundary
/// to a copy scaled about the face center by `scale` and moved by `amount`
/// along the face normal. The copy closes the extrusion unless
/// `remove_faces` is set, in which case the extrusion is left open.
#[derive(Debug, Clone, Copy)]
pub struct Extrude {
    scale: f64,
    amount: f64,
    remove_faces: bool,
}

impl Extrude {
    /// Creates a new `Extrude` modifier that keeps the extruded caps.
    #[must_use]
    pub fn new(scale: f64, amount: f64) -> Self {
        Self {
            scale,
            amount,
            remove_faces: false,
        }
    }

    /// Drops the extruded caps when set.
    #[must_use]
    pub fn with_remove_faces(mut self, remove_faces: bool) -> Self {
        self.remove_faces = remove_faces;
        self
    }
}

impl FaceModifier for Extrude {
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] for non-finite parameters and
    /// topology errors for stale handles or missing vertices.
    fn modify_faces<'m>(&self, mesh: &'m mut Mesh, faces: &[FaceId]) -> Result<&'m mut Mesh> {
        if !self.scale.is_finite() || !self.amount.is_finite() {
            return Err(
                OperationError::InvalidInput("extrude scale and amount must be finite".into())
                    .into(),
            );
        }
        debug!(
            faces = faces.len(),
            scale = self.scale,
            amount = self.amount,
            remove_faces = self.remove_faces,
            "extrude"
        );
        for &face in faces {
            extrude_face(mesh, face, self.scale, self.amount, !self.remove_faces)?;
        }
        Ok(mesh)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;
    use crate::operations::creation::MakeCube;
    use crate::operations::{MeshCreator, MeshModifier};
    use crate::selection::FaceSelector;
    use crate::topology::AdjacencyMap;

    #[test]
    fn extruding_top_face_adds_four_sides() {
        let mut mesh = MakeCube::new(2.0).create().unwrap();
        let top = FaceSelector::new(&mesh).select_top_faces().unwrap();
        Extrude::new(1.0, 1.0)
            .modify_faces(&mut mesh, top.faces())
            .unwrap();
        assert_eq!(mesh.vertex_count(), 12);
        assert_eq!(mesh.face_count(), 10);
        assert!(AdjacencyMap::new(&mesh).boundary_edges().is_empty());

        let new_top = FaceSelector::new(&mesh).select_top_faces().unwrap();
        assert_eq!(new_top.len(), 1);
        let center = mesh.calculate_face_center(new_top.faces()[0]).unwrap();
        assert!((center.y - 2.0).abs() < 1e-12);
    }

    #[test]
    fn remove_faces_leaves_an_open_rim() {
        let mut mesh = MakeCube::new(2.0).create().unwrap();
        let top = FaceSelector::new(&mesh).select_top_faces().unwrap();
        Extrude::new(0.5, 0.0)
            .with_remove_faces(true)
            .modify_faces(&mut mesh, top.faces())
            .unwrap();
        assert_eq!(mesh.face_count(), 9);
        assert_eq!(AdjacencyMap::new(&mesh).boundary_edges().len(), 4);
    }

    #[test]
    fn scale_shrinks_about_center() {
        let mut mesh = MakeCube::new(2.0).create().unwrap();
        let top = FaceSelector::new(&mesh).select_top_faces().unwrap();
        Extrude::new(0.5, 0.0)
            .modify_faces(&mut mesh, top.faces())
            .unwrap();
        let cap = FaceSelector::new(&mesh).select_top_faces().unwrap();
        // Side quads of a zero-height extrusion are coplanar with the cap.
        assert_eq!(cap.len(), 5);
        let inner: Vec<Point3> = mesh.vertices()[8..].to_vec();
        assert!(inner
            .iter()
            .all(|p| (p.x.abs() - 0.5).abs() < 1e-12 && (p.z.abs() - 0.5).abs() < 1e-12));
    }

    #[test]
    fn extruding_everything() {
        let mut mesh = MakeCube::new(2.0).create().unwrap();
        Extrude::new(0.8, 0.2).modify(&mut mesh).unwrap();
        assert_eq!(mesh.face_count(), 6 * 5);
        assert_eq!(mesh.vertex_count(), 8 + 24);
    }

    #[test]
    fn non_finite_amount_is_rejected() {
        let mut mesh = MakeCube::new(2.0).create().unwrap();
        assert!(Extrude::new(1.0, f64::NAN).modify(&mut mesh).is_err());
    }
}
