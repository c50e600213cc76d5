use tracing::{debug, trace};

use crate::error::Result;
use crate::math::{polygon_3d, Point3};
use crate::operations::util::rebuild_from_corners;
use crate::operations::MeshModifier;
use crate::topology::{AdjacencyMap, Mesh};

/// Doo-Sabin subdivision.
///
/// Each face corner produces a new point at the average of the corner, the
/// midpoints of its two edges and the face centroid. The mesh is rebuilt from
/// these points with one face per old face, one quad per old edge and one
/// face per old vertex. Only defined on closed manifold meshes.
#[derive(Debug, Clone, Copy)]
pub struct DooSabin {
    iterations: u32,
}

impl DooSabin {
    /// Creates a new `DooSabin` modifier.
    #[must_use]
    pub fn new(iterations: u32) -> Self {
        Self { iterations }
    }
}

impl Default for DooSabin {
    fn default() -> Self {
        Self::new(1)
    }
}

impl MeshModifier for DooSabin {
    fn modify<'m>(&self, mesh: &'m mut Mesh) -> Result<&'m mut Mesh> {
        debug!(
            faces = mesh.face_count(),
            vertices = mesh.vertex_count(),
            iterations = self.iterations,
            "doo-sabin subdivision"
        );
        for i in 0..self.iterations {
            subdivide_once(mesh)?;
            trace!(iteration = i + 1, faces = mesh.face_count(), "doo-sabin iteration done");
        }
        Ok(mesh)
    }
}

fn subdivide_once(mesh: &mut Mesh) -> Result<()> {
    let adjacency = AdjacencyMap::new(mesh);
    let mut corners = Vec::with_capacity(adjacency.faces().len());
    for (_, indices) in adjacency.faces() {
        let points = mesh.points_of(indices)?;
        let center = polygon_3d::centroid(&points);
        let n = points.len();
        let face_corners: Vec<Point3> = (0..n)
            .map(|i| {
                let prev = nalgebra::center(&points[(i + n - 1) % n], &points[i]);
                let next = nalgebra::center(&points[i], &points[(i + 1) % n]);
                Point3::from((points[i].coords + prev.coords + next.coords + center.coords) * 0.25)
            })
            .collect();
        corners.push(face_corners);
    }
    rebuild_from_corners(mesh, &adjacency, &corners)
}
