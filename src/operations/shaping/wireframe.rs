use tracing::debug;

use crate::error::Result;
use crate::operations::{FaceModifier, MeshModifier};
use crate::topology::Mesh;

use super::Holes;

/// Turns a mesh into a frame of struts along its edges.
///
/// Every face is opened with [`Holes`] at the given scale and the remaining
/// rims are solidified with `thickness`.
#[derive(Debug, Clone, Copy)]
pub struct Wireframe {
    scale: f64,
    thickness: f64,
}

impl Wireframe {
    /// Creates a new `Wireframe` modifier.
    #[must_use]
    pub fn new(scale: f64, thickness: f64) -> Self {
        Self { scale, thickness }
    }
}

impl MeshModifier for Wireframe {
    fn modify<'m>(&self, mesh: &'m mut Mesh) -> Result<&'m mut Mesh> {
        debug!(scale = self.scale, thickness = self.thickness, "wireframe");
        Holes::new(self.scale)
            .with_thickness(self.thickness)
            .modify_all(mesh)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::creation::MakeCube;
    use crate::operations::MeshCreator;
    use crate::topology::AdjacencyMap;

    #[test]
    fn cube_frame_is_closed() {
        let mut mesh = MakeCube::new(2.0).create().unwrap();
        Wireframe::new(0.6, 0.1).modify(&mut mesh).unwrap();
        // 24 rim quads outside, 24 inside, 24 bridging the six openings
        assert_eq!(mesh.face_count(), 72);
        assert_eq!(mesh.vertex_count(), 64);
        assert!(AdjacencyMap::new(&mesh).boundary_edges().is_empty());
        mesh.validate().unwrap();
    }

    #[test]
    fn zero_thickness_leaves_open_rims() {
        let mut mesh = MakeCube::new(2.0).create().unwrap();
        Wireframe::new(0.6, 0.0).modify(&mut mesh).unwrap();
        assert_eq!(mesh.face_count(), 24);
        assert_eq!(AdjacencyMap::new(&mesh).boundary_edges().len(), 24);
    }
}
