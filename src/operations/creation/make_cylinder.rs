use std::f64::consts::TAU;

use crate::error::{OperationError, Result};
use crate::math::TOLERANCE;
use crate::operations::util::bridge_loops;
use crate::operations::MeshCreator;
use crate::topology::{Face, Mesh};

/// Creates a cylinder standing on the XZ plane along `+Y`.
///
/// The side is built by bridging a bottom and a top vertex loop. Caps are
/// added by default, which makes the result closed.
#[derive(Debug, Clone, Copy)]
pub struct MakeCylinder {
    radius: f64,
    height: f64,
    segments: u32,
    caps: bool,
}

impl MakeCylinder {
    /// Creates a new `MakeCylinder` creator.
    #[must_use]
    pub fn new(radius: f64, height: f64, segments: u32) -> Self {
        Self {
            radius,
            height,
            segments,
            caps: true,
        }
    }

    /// Enables or disables the top and bottom caps.
    #[must_use]
    pub fn with_caps(mut self, caps: bool) -> Self {
        self.caps = caps;
        self
    }
}

impl MeshCreator for MakeCylinder {
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if the radius is not positive,
    /// the height is zero or fewer than three segments are requested.
    fn create(&self) -> Result<Mesh> {
        if self.radius < TOLERANCE {
            return Err(
                OperationError::InvalidInput("cylinder radius must be positive".into()).into(),
            );
        }
        if self.height.abs() < TOLERANCE {
            return Err(
                OperationError::InvalidInput("cylinder height must be non-zero".into()).into(),
            );
        }
        if self.segments < 3 {
            return Err(
                OperationError::InvalidInput("cylinder needs at least 3 segments".into()).into(),
            );
        }

        let mut mesh = Mesh::new();
        let ring = |mesh: &mut Mesh, y: f64| -> Vec<usize> {
            (0..self.segments)
                .map(|i| {
                    let angle = TAU * f64::from(i) / f64::from(self.segments);
                    mesh.add_vertex_xyz(self.radius * angle.cos(), y, -self.radius * angle.sin())
                })
                .collect()
        };
        let bottom = ring(&mut mesh, 0.0);
        let top = ring(&mut mesh, self.height);

        bridge_loops(&mut mesh, &bottom, &top)?;

        if self.caps {
            mesh.add_face_data(Face::new(top).with_tag("top"));
            let mut bottom = bottom;
            bottom.reverse();
            mesh.add_face_data(Face::new(bottom).with_tag("bottom"));
        }
        Ok(mesh)
    }
}
