use std::collections::HashMap;

use tracing::{debug, trace};

use crate::error::Result;
use crate::math::{polygon_3d, Point3, Vector3};
use crate::operations::MeshModifier;
use crate::topology::{Face, HalfEdge, Mesh};

/// Catmull-Clark smoothing subdivision.
///
/// Every n-gon becomes n quads. One iteration on a closed mesh with `V`
/// vertices, `E` edges and `F` faces yields `V + E + F` vertices.
///
/// On open meshes an edge with a single face gets its plain midpoint and
/// vertices on such edges keep their position.
#[derive(Debug, Clone, Copy)]
pub struct CatmullClark {
    iterations: u32,
}

impl CatmullClark {
    /// Creates a new `CatmullClark` modifier.
    #[must_use]
    pub fn new(iterations: u32) -> Self {
        Self { iterations }
    }
}

impl Default for CatmullClark {
    fn default() -> Self {
        Self::new(1)
    }
}

impl MeshModifier for CatmullClark {
    fn modify<'m>(&self, mesh: &'m mut Mesh) -> Result<&'m mut Mesh> {
        debug!(
            faces = mesh.face_count(),
            vertices = mesh.vertex_count(),
            iterations = self.iterations,
            "catmull-clark subdivision"
        );
        for i in 0..self.iterations {
            subdivide_once(mesh)?;
            trace!(
                iteration = i + 1,
                faces = mesh.face_count(),
                vertices = mesh.vertex_count(),
                "catmull-clark iteration done"
            );
        }
        Ok(mesh)
    }
}

/// Accumulated state of one undirected edge.
struct EdgePoint {
    ends: (usize, usize),
    /// Starts as half the midpoint; each adjacent face adds a quarter of its
    /// face point.
    sum: Vector3,
    faces: u32,
    index: usize,
}

#[derive(Default, Clone)]
struct VertexStar {
    face_sum: Vector3,
    faces: u32,
    edge_sum: Vector3,
    edges: u32,
    boundary: bool,
}

fn subdivide_once(mesh: &mut Mesh) -> Result<()> {
    let original: Vec<Point3> = mesh.vertices().to_vec();
    let faces: Vec<Face> = mesh.faces().map(|(_, face)| face.clone()).collect();

    // Face points.
    let mut face_points = Vec::with_capacity(faces.len());
    for face in &faces {
        let point = polygon_3d::centroid(&mesh.points_of(&face.indices)?);
        face_points.push((mesh.add_vertex(point), point));
    }

    // Edge points, shared by the two faces of an edge.
    let mut edges: Vec<EdgePoint> = Vec::new();
    let mut edge_slot: HashMap<(usize, usize), usize> = HashMap::new();
    for (face, &(_, face_point)) in faces.iter().zip(&face_points) {
        for edge in face.half_edges() {
            let slot = *edge_slot.entry(edge.undirected()).or_insert_with(|| {
                let mid = nalgebra::center(&original[edge.from], &original[edge.to]);
                edges.push(EdgePoint {
                    ends: (edge.from, edge.to),
                    sum: mid.coords * 0.5,
                    faces: 0,
                    index: 0,
                });
                edges.len() - 1
            });
            edges[slot].sum += face_point.coords * 0.25;
            edges[slot].faces += 1;
        }
    }

    let mut stars = vec![VertexStar::default(); original.len()];
    for edge in &mut edges {
        let (a, b) = edge.ends;
        let position = if edge.faces == 1 {
            stars[a].boundary = true;
            stars[b].boundary = true;
            nalgebra::center(&original[a], &original[b])
        } else {
            Point3::from(edge.sum)
        };
        edge.index = mesh.add_vertex(position);
        for v in [a, b] {
            stars[v].edge_sum += position.coords;
            stars[v].edges += 1;
        }
    }

    for (face, &(_, face_point)) in faces.iter().zip(&face_points) {
        for &v in &face.indices {
            stars[v].face_sum += face_point.coords;
            stars[v].faces += 1;
        }
    }

    // New topology, built before any original vertex moves.
    mesh.clear_faces();
    for (face, &(center, _)) in faces.iter().zip(&face_points) {
        let n = face.len();
        let edge_index = |e: HalfEdge| edges[edge_slot[&e.undirected()]].index;
        for i in 0..n {
            let v = face.indices[i];
            let next = edge_index(HalfEdge::new(v, face.indices[(i + 1) % n]));
            let prev = edge_index(HalfEdge::new(face.indices[(i + n - 1) % n], v));
            mesh.add_face_data(
                Face::new(vec![v, next, center, prev]).with_tag_opt(face.tag.clone()),
            );
        }
    }

    // Smooth the original vertices.
    for (v, star) in stars.iter().enumerate() {
        if star.boundary || star.edges == 0 || star.faces == 0 {
            continue;
        }
        let n = f64::from(star.edges);
        let face_avg = star.face_sum / f64::from(star.faces);
        let edge_avg = star.edge_sum / n;
        let smoothed = (original[v].coords * (n - 3.0) + face_avg + edge_avg * 2.0) / n;
        mesh.set_vertex(v, Point3::from(smoothed))?;
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::creation::{MakeCube, MakeGrid};
    use crate::operations::MeshCreator;
    use crate::topology::AdjacencyMap;
    use approx::assert_relative_eq;

    #[test]
    fn cube_gives_26_vertices_and_24_quads() {
        let mut mesh = MakeCube::new(2.0).create().unwrap();
        CatmullClark::new(1).modify(&mut mesh).unwrap();
        assert_eq!(mesh.vertex_count(), 26);
        assert_eq!(mesh.face_count(), 24);
        assert!(mesh.faces().all(|(_, f)| f.len() == 4));
        mesh.validate().unwrap();
    }

    #[test]
    fn result_stays_closed() {
        let mut mesh = MakeCube::new(2.0).create().unwrap();
        CatmullClark::new(1).modify(&mut mesh).unwrap();
        assert!(AdjacencyMap::new(&mesh).boundary_edges().is_empty());
    }

    #[test]
    fn two_iterations_follow_euler_counts() {
        let mut mesh = MakeCube::new(2.0).create().unwrap();
        CatmullClark::new(2).modify(&mut mesh).unwrap();
        // V = 26 + 24 + 48, F = 24 * 4
        assert_eq!(mesh.vertex_count(), 98);
        assert_eq!(mesh.face_count(), 96);
    }

    #[test]
    fn cube_corner_moves_inward() {
        let mut mesh = MakeCube::new(2.0).create().unwrap();
        CatmullClark::new(1).modify(&mut mesh).unwrap();
        // (P * 0 + F + 2E) / 3 with F = (1/3, 1/3, 1/3) and E = (1/2, 1/2, 1/2)
        let corner = mesh.vertex(6).unwrap();
        let expected = 4.0 / 9.0;
        assert_relative_eq!(corner, Point3::new(expected, expected, expected), epsilon = 1e-12);
    }

    #[test]
    fn edge_point_averages_midpoint_and_face_points() {
        let mut mesh = MakeCube::new(2.0).create().unwrap();
        CatmullClark::new(1).modify(&mut mesh).unwrap();
        // Edge between (1,1,1) and (1,1,-1): midpoint (1,1,0), face points
        // (1,0,0) and (0,1,0) -> (0.75, 0.75, 0).
        let expected = Point3::new(0.75, 0.75, 0.0);
        assert!(mesh
            .vertices()
            .iter()
            .any(|p| (p - expected).norm() < 1e-12));
    }

    #[test]
    fn zero_iterations_is_identity() {
        let mut mesh = MakeCube::new(2.0).create().unwrap();
        let before = mesh.clone();
        CatmullClark::new(0).modify(&mut mesh).unwrap();
        assert_eq!(mesh.vertices(), before.vertices());
        assert_eq!(mesh.face_count(), before.face_count());
    }

    #[test]
    fn open_grid_keeps_boundary_vertices() {
        let mut mesh = MakeGrid::new(2.0, 2.0, 1).create().unwrap();
        let corners = mesh.vertices().to_vec();
        CatmullClark::new(1).modify(&mut mesh).unwrap();
        assert_eq!(mesh.vertex_count(), 4 + 1 + 4);
        assert_eq!(mesh.face_count(), 4);
        assert_eq!(&mesh.vertices()[..4], corners.as_slice());
    }

    #[test]
    fn tags_are_inherited() {
        let mut mesh = MakeCube::new(2.0).create().unwrap();
        let first = mesh.face_ids()[0];
        mesh.face_mut(first).unwrap().tag = Some("bottom".into());
        CatmullClark::new(1).modify(&mut mesh).unwrap();
        let tagged = mesh.faces().filter(|(_, f)| f.has_tag("bottom")).count();
        assert_eq!(tagged, 4);
    }
}
