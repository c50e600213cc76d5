use tracing::debug;

use crate::error::Result;
use crate::operations::MeshModifier;
use crate::topology::Mesh;

use super::{center_vertex, edge_midpoints, replace_faces};

/// Topology-only refinement without smoothing.
///
/// Triangles are split 1-to-4 through their edge midpoints; larger faces get
/// a center vertex and become one quad per corner. Midpoints are looked up by
/// position, so neighbouring faces share them. Non-convex faces can produce
/// overlapping quads.
#[derive(Debug, Clone, Copy)]
pub struct LinearSubdivision {
    iterations: u32,
}

impl LinearSubdivision {
    /// Creates a new `LinearSubdivision` modifier.
    #[must_use]
    pub fn new(iterations: u32) -> Self {
        Self { iterations }
    }
}

impl Default for LinearSubdivision {
    fn default() -> Self {
        Self::new(1)
    }
}

impl MeshModifier for LinearSubdivision {
    fn modify<'m>(&self, mesh: &'m mut Mesh) -> Result<&'m mut Mesh> {
        debug!(
            faces = mesh.face_count(),
            iterations = self.iterations,
            "linear subdivision"
        );
        for _ in 0..self.iterations {
            let targets = mesh.face_ids();
            replace_faces(mesh, &targets, |mesh, shared, face| {
                let mids = edge_midpoints(mesh, shared, face)?;
                let v = &face.indices;
                if v.len() == 3 {
                    return Ok(vec![
                        vec![v[0], mids[0], mids[2]],
                        vec![v[1], mids[1], mids[0]],
                        vec![v[2], mids[2], mids[1]],
                        vec![mids[0], mids[1], mids[2]],
                    ]);
                }
                let center = center_vertex(mesh, face)?;
                let n = v.len();
                Ok((0..n)
                    .map(|i| vec![v[i], mids[i], center, mids[(i + n - 1) % n]])
                    .collect())
            })?;
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
    use crate::operations::MeshCreator;
    use crate::topology::AdjacencyMap;

    fn tetrahedron() -> Mesh {
        let mut mesh = Mesh::new();
        mesh.add_vertex_xyz(1.0, 1.0, 1.0);
        mesh.add_vertex_xyz(-1.0, -1.0, 1.0);
        mesh.add_vertex_xyz(-1.0, 1.0, -1.0);
        mesh.add_vertex_xyz(1.0, -1.0, -1.0);
        mesh.add_face([0, 1, 3]);
        mesh.add_face([0, 2, 1]);
        mesh.add_face([0, 3, 2]);
        mesh.add_face([1, 2, 3]);
        mesh
    }

    #[test]
    fn tetrahedron_splits_one_to_four() {
        let mut mesh = tetrahedron();
        LinearSubdivision::new(1).modify(&mut mesh).unwrap();
        // 4 corners + 6 shared edge midpoints
        assert_eq!(mesh.vertex_count(), 10);
        assert_eq!(mesh.face_count(), 16);
        assert!(mesh.faces().all(|(_, f)| f.len() == 3));
        assert!(AdjacencyMap::new(&mesh).boundary_edges().is_empty());
    }

    #[test]
    fn cube_splits_into_quads_around_centers() {
        let mut mesh = MakeCube::new(2.0).create().unwrap();
        LinearSubdivision::new(1).modify(&mut mesh).unwrap();
        // 8 corners + 12 midpoints + 6 centers
        assert_eq!(mesh.vertex_count(), 26);
        assert_eq!(mesh.face_count(), 24);
        assert!(AdjacencyMap::new(&mesh).boundary_edges().is_empty());
    }

    #[test]
    fn original_vertices_do_not_move() {
        let mut mesh = MakeCube::new(2.0).create().unwrap();
        let before: Vec<Point3> = mesh.vertices().to_vec();
        LinearSubdivision::new(2).modify(&mut mesh).unwrap();
        assert_eq!(&mesh.vertices()[..8], before.as_slice());
        assert_eq!(mesh.face_count(), 96);
    }

    #[test]
    fn tiny_cube_keeps_distinct_midpoints() {
        let mut mesh = MakeCube::new(1e-9).create().unwrap();
        LinearSubdivision::new(1).modify(&mut mesh).unwrap();
        assert_eq!(mesh.vertex_count(), 26);
        assert_eq!(mesh.face_count(), 24);
        assert!(AdjacencyMap::new(&mesh).boundary_edges().is_empty());
    }
}
