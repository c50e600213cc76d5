use tracing::debug;

use crate::error::{OperationError, Result};
use crate::operations::util::extrude_face;
use crate::operations::{FaceModifier, MeshModifier};
use crate::topology::{FaceId, Mesh};

use super::Solidify;

/// Punches a hole into each target face.
///
/// The face is shrunk about its center by `scale` and the shrunk copy is
/// removed, leaving a rim of quads around the opening. A non-zero thickness
/// then solidifies the whole mesh.
#[derive(Debug, Clone, Copy)]
pub struct Holes {
    scale: f64,
    thickness: f64,
}

impl Holes {
    /// Creates a new `Holes` modifier without thickness.
    #[must_use]
    pub fn new(scale: f64) -> Self {
        Self {
            scale,
            thickness: 0.0,
        }
    }

    /// Solidifies the result with the given thickness.
    #[must_use]
    pub fn with_thickness(mut self, thickness: f64) -> Self {
        self.thickness = thickness;
        self
    }
}

impl FaceModifier for Holes {
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] for non-finite parameters and
    /// topology errors for stale handles or missing vertices.
    fn modify_faces<'m>(&self, mesh: &'m mut Mesh, faces: &[FaceId]) -> Result<&'m mut Mesh> {
        if !self.scale.is_finite() {
            return Err(OperationError::InvalidInput("hole scale must be finite".into()).into());
        }
        debug!(
            faces = faces.len(),
            scale = self.scale,
            thickness = self.thickness,
            "holes"
        );
        for &face in faces {
            extrude_face(mesh, face, self.scale, 0.0, false)?;
        }
        Solidify::new(self.thickness).modify(mesh)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::creation::{MakeCube, MakeGrid};
    use crate::operations::MeshCreator;
    use crate::selection::FaceSelector;
    use crate::topology::AdjacencyMap;

    #[test]
    fn hole_in_a_single_quad() {
        let mut mesh = MakeGrid::new(2.0, 2.0, 1).create().unwrap();
        Holes::new(0.5).modify(&mut mesh).unwrap();
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.face_count(), 4);
        // Outer square and inner opening.
        assert_eq!(AdjacencyMap::new(&mesh).boundary_edges().len(), 8);
    }

    #[test]
    fn hole_in_cube_top_then_thicken() {
        let mut mesh = MakeCube::new(2.0).create().unwrap();
        let top = FaceSelector::new(&mesh).select_top_faces().unwrap();
        Holes::new(0.5)
            .with_thickness(0.1)
            .modify_faces(&mut mesh, top.faces())
            .unwrap();
        // 9 outer faces, 9 inner copies, 4 quads bridging the opening
        assert_eq!(mesh.face_count(), 22);
        assert!(AdjacencyMap::new(&mesh).boundary_edges().is_empty());
    }
}
