use crate::error::{OperationError, Result};
use crate::math::TOLERANCE;
use crate::operations::MeshCreator;
use crate::topology::Mesh;

/// Creates an axis-aligned cube centred at the origin.
///
/// Eight vertices and six outward-facing quads; every edge is shared by two
/// faces.
#[derive(Debug, Clone, Copy)]
pub struct MakeCube {
    size: f64,
}

impl MakeCube {
    /// Creates a new `MakeCube` creator with the given edge length.
    #[must_use]
    pub fn new(size: f64) -> Self {
        Self { size }
    }
}

impl Default for MakeCube {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl MeshCreator for MakeCube {
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if the size is not positive.
    fn create(&self) -> Result<Mesh> {
        if self.size < TOLERANCE {
            return Err(OperationError::InvalidInput("cube size must be positive".into()).into());
        }
        let h = self.size * 0.5;
        let mut mesh = Mesh::new();
        for (x, y, z) in [
            (-h, -h, -h),
            (h, -h, -h),
            (h, h, -h),
            (-h, h, -h),
            (-h, -h, h),
            (h, -h, h),
            (h, h, h),
            (-h, h, h),
        ] {
            mesh.add_vertex_xyz(x, y, z);
        }
        mesh.add_face([0, 3, 2, 1]);
        mesh.add_face([4, 5, 6, 7]);
        mesh.add_face([0, 1, 5, 4]);
        mesh.add_face([2, 3, 7, 6]);
        mesh.add_face([0, 4, 7, 3]);
        mesh.add_face([1, 2, 6, 5]);
        Ok(mesh)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;

    #[test]
    fn cube_has_8_vertices_and_6_quads() {
        let mesh = MakeCube::new(1.0).create().unwrap();
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.face_count(), 6);
        assert!(mesh.faces().all(|(_, f)| f.len() == 4));
    }

    #[test]
    fn all_face_normals_point_outward() {
        let mesh = MakeCube::new(2.0).create().unwrap();
        for id in mesh.face_ids() {
            let normal = mesh.calculate_face_normal(id).unwrap();
            let center = mesh.calculate_face_center(id).unwrap();
            assert!(normal.dot(&(center - Point3::origin())) > 0.0);
        }
    }

    #[test]
    fn zero_size_returns_error() {
        assert!(MakeCube::new(0.0).create().is_err());
    }
}
