use std::collections::HashMap;

use tracing::{debug, trace};

use crate::error::{OperationError, Result};
use crate::operations::MeshModifier;
use crate::topology::{AdjacencyMap, Face, HalfEdge, Mesh};

/// Cuts off every vertex of a closed mesh.
///
/// Each edge `a -> b` is marked by two points, `a + (b - a) * amount` and
/// `b + (a - b) * amount`. Each point is keyed by the directed edge it sits
/// on, near that edge's start, so both faces sharing an edge reuse it. Every
/// face becomes the polygon through its edge points and every old vertex
/// becomes a face through the points next to it on its outgoing edges. The
/// old vertices are discarded.
///
/// Amounts are meant to lie in `(0, 0.5)`; at `0.5` the two points of an
/// edge merge and the result has degenerate faces.
#[derive(Debug, Clone, Copy)]
pub struct BevelVertices {
    amount: f64,
}

impl BevelVertices {
    /// Creates a new `BevelVertices` modifier.
    #[must_use]
    pub fn new(amount: f64) -> Self {
        Self { amount }
    }
}

impl MeshModifier for BevelVertices {
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] for a non-finite amount and a
    /// topology error when the mesh is open or non-manifold.
    fn modify<'m>(&self, mesh: &'m mut Mesh) -> Result<&'m mut Mesh> {
        if !self.amount.is_finite() {
            return Err(OperationError::InvalidInput("bevel amount must be finite".into()).into());
        }
        debug!(
            faces = mesh.face_count(),
            vertices = mesh.vertex_count(),
            amount = self.amount,
            "bevel vertices"
        );

        let adjacency = AdjacencyMap::new(mesh);
        let source = mesh.clone();
        let mut tags = Vec::with_capacity(adjacency.faces().len());
        for (id, _) in adjacency.faces() {
            tags.push(source.face(*id)?.tag.clone());
        }
        let mut used: Vec<usize> = adjacency
            .faces()
            .iter()
            .flat_map(|(_, indices)| indices.iter().copied())
            .collect();
        used.sort_unstable();
        used.dedup();
        let fans = used
            .iter()
            .map(|&vertex| adjacency.fan(vertex).map(|fan| (vertex, fan)))
            .collect::<Result<Vec<_>>>()?;

        mesh.clear_faces();
        mesh.clear_vertices();
        let mut edge_points: HashMap<HalfEdge, usize> = HashMap::new();

        // Index of the point on `edge` next to its start.
        let mut near_start = |mesh: &mut Mesh, edge: HalfEdge| -> Result<usize> {
            if let Some(&index) = edge_points.get(&edge) {
                return Ok(index);
            }
            let from = source.vertex(edge.from)?;
            let to = source.vertex(edge.to)?;
            let index = mesh.add_vertex(from + (to - from) * self.amount);
            edge_points.insert(edge, index);
            Ok(index)
        };

        for ((_, indices), tag) in adjacency.faces().iter().zip(tags) {
            let n = indices.len();
            let mut outline = Vec::with_capacity(2 * n);
            for i in 0..n {
                let edge = HalfEdge::new(indices[i], indices[(i + 1) % n]);
                outline.push(near_start(mesh, edge)?);
                outline.push(near_start(mesh, edge.pair())?);
            }
            mesh.add_face_data(Face::new(outline).with_tag_opt(tag));
        }

        for (vertex, fan) in fans {
            if fan.len() < 3 {
                trace!(vertex, valence = fan.len(), "skipping vertex face");
                continue;
            }
            let mut ring = Vec::with_capacity(fan.len());
            for edge in fan {
                ring.push(near_start(mesh, edge)?);
            }
            mesh.add_face(ring);
        }

        debug!(
            faces = mesh.face_count(),
            vertices = mesh.vertex_count(),
            "bevel vertices done"
        );
        Ok(mesh)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;
    use crate::operations::creation::{MakeCube, MakeGrid};
    use crate::operations::MeshCreator;

    #[test]
    fn cube_becomes_truncated() {
        let mut mesh = MakeCube::new(2.0).create().unwrap();
        BevelVertices::new(0.25).modify(&mut mesh).unwrap();
        // Two points per edge, shared by both faces.
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.face_count(), 6 + 8);
        assert_eq!(mesh.faces().filter(|(_, f)| f.len() == 8).count(), 6);
        assert_eq!(mesh.faces().filter(|(_, f)| f.len() == 3).count(), 8);
        assert!(AdjacencyMap::new(&mesh).boundary_edges().is_empty());
    }

    #[test]
    fn edge_points_split_edges_by_amount() {
        let mut mesh = MakeCube::new(2.0).create().unwrap();
        BevelVertices::new(0.25).modify(&mut mesh).unwrap();
        // Each point has two coordinates on the cube edge and one at +-0.5.
        for p in mesh.vertices() {
            let halves = [p.x, p.y, p.z]
                .iter()
                .filter(|c| (c.abs() - 0.5).abs() < 1e-12)
                .count();
            let ones = [p.x, p.y, p.z]
                .iter()
                .filter(|c| (c.abs() - 1.0).abs() < 1e-12)
                .count();
            assert_eq!((halves, ones), (1, 2));
        }
    }

    #[test]
    fn vertex_faces_point_away_from_center() {
        let mut mesh = MakeCube::new(2.0).create().unwrap();
        BevelVertices::new(0.3).modify(&mut mesh).unwrap();
        for id in mesh.face_ids() {
            let normal = mesh.calculate_face_normal(id).unwrap();
            let center: Point3 = mesh.calculate_face_center(id).unwrap();
            assert!(normal.dot(&center.coords) > 0.0);
        }
    }

    #[test]
    fn open_mesh_is_rejected() {
        let mut mesh = MakeGrid::new(1.0, 1.0, 1).create().unwrap();
        assert!(BevelVertices::new(0.2).modify(&mut mesh).is_err());
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.vertex_count(), 4);
    }

    #[test]
    fn tiny_cube_keeps_every_edge_point() {
        let mut mesh = MakeCube::new(1e-9).create().unwrap();
        BevelVertices::new(0.25).modify(&mut mesh).unwrap();
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.face_count(), 14);
        assert!(AdjacencyMap::new(&mesh).boundary_edges().is_empty());
    }
}
