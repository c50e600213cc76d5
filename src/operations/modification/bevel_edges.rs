use std::f64::consts::{FRAC_1_SQRT_2, SQRT_2};

use tracing::debug;

use crate::error::{OperationError, Result};
use crate::math::{polygon_3d, Point3};
use crate::operations::util::rebuild_from_corners;
use crate::operations::MeshModifier;
use crate::topology::{AdjacencyMap, Mesh};

/// How the bevel amount is measured.
///
/// The three modes differ only in the factor applied to the amount before
/// the corners are moved along their edges. The factors are exact for edges
/// with a right-angle dihedral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BevelWidth {
    /// Distance each corner moves along an adjacent edge.
    #[default]
    Offset,
    /// Width of the new chamfer face across the edge.
    Width,
    /// Depth of the cut measured perpendicular to the chamfer.
    Depth,
}

impl BevelWidth {
    /// Factor turning a bevel amount into an offset along the edges.
    #[must_use]
    pub fn factor(self) -> f64 {
        match self {
            Self::Offset => 1.0,
            Self::Width => FRAC_1_SQRT_2,
            Self::Depth => SQRT_2,
        }
    }
}

/// Chamfers every edge of a closed mesh.
///
/// Each face is shrunk by pulling every corner along both of its adjacent
/// edges. Old edges become quads between neighbouring shrunk faces and old
/// vertices become faces through the corners around them.
#[derive(Debug, Clone, Copy)]
pub struct BevelEdges {
    amount: f64,
    width: BevelWidth,
}

impl BevelEdges {
    /// Creates a new `BevelEdges` modifier.
    #[must_use]
    pub fn new(amount: f64, width: BevelWidth) -> Self {
        Self { amount, width }
    }
}

impl MeshModifier for BevelEdges {
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] for a non-finite amount and a
    /// topology error when the mesh is open or non-manifold.
    fn modify<'m>(&self, mesh: &'m mut Mesh) -> Result<&'m mut Mesh> {
        if !self.amount.is_finite() {
            return Err(OperationError::InvalidInput("bevel amount must be finite".into()).into());
        }
        let offset = self.amount * self.width.factor();
        debug!(
            faces = mesh.face_count(),
            vertices = mesh.vertex_count(),
            offset,
            "bevel edges"
        );

        let adjacency = AdjacencyMap::new(mesh);
        let mut corners = Vec::with_capacity(adjacency.faces().len());
        for (_, indices) in adjacency.faces() {
            let points = mesh.points_of(indices)?;
            let n = points.len();
            let face_corners: Vec<Point3> = (0..n)
                .map(|i| {
                    let p = points[i];
                    let prev = points[(i + n - 1) % n];
                    let next = points[(i + 1) % n];
                    let towards_prev = polygon_3d::step_towards(&p, &prev, offset) - p;
                    let towards_next = polygon_3d::step_towards(&p, &next, offset) - p;
                    p + towards_prev + towards_next
                })
                .collect();
            corners.push(face_corners);
        }
        rebuild_from_corners(mesh, &adjacency, &corners)?;

        debug!(
            faces = mesh.face_count(),
            vertices = mesh.vertex_count(),
            "bevel edges done"
        );
        Ok(mesh)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::creation::{MakeCube, MakeGrid};
    use crate::operations::MeshCreator;
    use approx::assert_relative_eq;

    fn beveled_cube(amount: f64, width: BevelWidth) -> Mesh {
        let mut mesh = MakeCube::new(2.0).create().unwrap();
        BevelEdges::new(amount, width).modify(&mut mesh).unwrap();
        mesh
    }

    #[test]
    fn cube_gains_chamfers_and_corner_triangles() {
        let mesh = beveled_cube(0.2, BevelWidth::Offset);
        assert_eq!(mesh.vertex_count(), 24);
        // 6 shrunk faces, 12 chamfers, 8 corners
        assert_eq!(mesh.face_count(), 26);
        let triangles = mesh.faces().filter(|(_, f)| f.len() == 3).count();
        assert_eq!(triangles, 8);
        assert!(AdjacencyMap::new(&mesh).boundary_edges().is_empty());
        mesh.validate().unwrap();
    }

    #[test]
    fn corners_move_along_the_edges() {
        let mesh = beveled_cube(0.2, BevelWidth::Offset);
        for p in mesh.vertices() {
            let mut coords = [p.x.abs(), p.y.abs(), p.z.abs()];
            coords.sort_by(f64::total_cmp);
            assert_relative_eq!(coords[0], 0.8, epsilon = 1e-12);
            assert_relative_eq!(coords[1], 0.8, epsilon = 1e-12);
            assert_relative_eq!(coords[2], 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn width_mode_sets_chamfer_width() {
        let mesh = beveled_cube(0.2, BevelWidth::Width);
        let chamfer = mesh
            .faces()
            .map(|(_, f)| mesh.points_of(&f.indices).unwrap())
            .find(|points| {
                let n = polygon_3d::corner_normal(points);
                points.len() == 4 && n.x.abs() > 0.1 && n.y.abs() > 0.1
            })
            .unwrap();
        // The short sides of a chamfer quad span the cut.
        let sides = [
            (chamfer[1] - chamfer[0]).norm(),
            (chamfer[2] - chamfer[1]).norm(),
        ];
        let short = sides[0].min(sides[1]);
        assert_relative_eq!(short, 0.2, epsilon = 1e-12);
    }

    #[test]
    fn chamfers_face_outward() {
        let mesh = beveled_cube(0.3, BevelWidth::Depth);
        for id in mesh.face_ids() {
            let normal = mesh.calculate_face_normal(id).unwrap();
            let center = mesh.calculate_face_center(id).unwrap();
            assert!(normal.dot(&center.coords) > 0.0);
        }
    }

    #[test]
    fn open_mesh_is_rejected() {
        let mut mesh = MakeGrid::new(1.0, 1.0, 2).create().unwrap();
        assert!(BevelEdges::new(0.1, BevelWidth::Offset)
            .modify(&mut mesh)
            .is_err());
    }
}
