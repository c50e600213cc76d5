use crate::error::{OperationError, Result};
use crate::math::TOLERANCE;
use crate::operations::MeshCreator;
use crate::topology::Mesh;

/// Creates a flat, open grid of quads in the XZ plane facing `+Y`.
#[derive(Debug, Clone, Copy)]
pub struct MakeGrid {
    width: f64,
    depth: f64,
    segments: u32,
}

impl MakeGrid {
    /// Creates a new `MakeGrid` creator. `segments` is the number of quads
    /// along each side.
    #[must_use]
    pub fn new(width: f64, depth: f64, segments: u32) -> Self {
        Self {
            width,
            depth,
            segments,
        }
    }
}

impl MeshCreator for MakeGrid {
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] for non-positive extents or
    /// zero segments.
    fn create(&self) -> Result<Mesh> {
        if self.width < TOLERANCE || self.depth < TOLERANCE {
            return Err(
                OperationError::InvalidInput("grid extents must be positive".into()).into(),
            );
        }
        if self.segments == 0 {
            return Err(
                OperationError::InvalidInput("grid needs at least one segment".into()).into(),
            );
        }

        let n = self.segments;
        let stride = n as usize + 1;
        let mut mesh = Mesh::new();
        for row in 0..=n {
            let z = -self.depth * 0.5 + self.depth * f64::from(row) / f64::from(n);
            for col in 0..=n {
                let x = -self.width * 0.5 + self.width * f64::from(col) / f64::from(n);
                mesh.add_vertex_xyz(x, 0.0, z);
            }
        }
        for row in 0..n as usize {
            for col in 0..n as usize {
                let a = row * stride + col;
                mesh.add_face([a, a + stride, a + stride + 1, a + 1]);
            }
        }
        Ok(mesh)
    }
}
