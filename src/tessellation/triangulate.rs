use std::collections::{HashMap, HashSet};

use spade::handles::{FixedFaceHandle, FixedVertexHandle, InnerTag};
use spade::{
    ConstrainedDelaunayTriangulation, InsertionError, Point2 as SpadePoint2, Triangulation,
};
use tracing::{debug, trace};

use crate::error::{Result, TessellationError, TopologyError};
use crate::math::{Point3, Vector3, TOLERANCE};
use crate::topology::Mesh;

use super::{to_index, TriangleMesh};

type Cdt = ConstrainedDelaunayTriangulation<SpadePoint2<f64>>;

/// Converts every face of a mesh into triangles.
///
/// Triangles pass through unchanged. Larger polygons are projected onto
/// their plane and split with a constrained Delaunay triangulation, so
/// non-convex faces keep their outline; faces without a usable plane fall
/// back to a fan from the first corner. Winding is preserved.
///
/// Vertices are shared and carry the mesh's vertex normals. When every face
/// has texture indices the output is unrolled to one vertex per face corner
/// so that each corner can carry its own UV.
pub struct Triangulate<'m> {
    mesh: &'m Mesh,
}

impl<'m> Triangulate<'m> {
    /// Creates a new `Triangulate` operation.
    #[must_use]
    pub fn new(mesh: &'m Mesh) -> Self {
        Self { mesh }
    }

    /// Executes the triangulation.
    ///
    /// # Errors
    ///
    /// Returns a topology error for faces with fewer than three corners or
    /// missing vertices, and [`TessellationError::Failed`] for out-of-range
    /// texture indices or meshes too large for `u32` indices.
    pub fn execute(&self) -> Result<TriangleMesh> {
        let mesh = self.mesh;
        let normals = mesh.vertex_normals()?;
        let with_uvs = mesh.face_count() > 0
            && mesh.faces().all(|(_, f)| {
                f.uv_indices
                    .as_ref()
                    .is_some_and(|uv| uv.len() == f.indices.len())
            });

        let mut out = TriangleMesh::default();
        if !with_uvs {
            to_index(mesh.vertex_count())?;
            out.vertices = mesh.vertices().to_vec();
            out.normals = normals.clone();
        }

        for (_, face) in mesh.faces() {
            let points = mesh.points_of(&face.indices)?;
            let triangles = triangulate_polygon(&points)?;
            trace!(corners = points.len(), triangles = triangles.len(), "face triangulated");

            if with_uvs {
                let base = out.vertices.len();
                let uv_indices = face.uv_indices.as_deref().unwrap_or_default();
                for (corner, &vertex) in face.indices.iter().enumerate() {
                    let uv = mesh.uvs().get(uv_indices[corner]).ok_or_else(|| {
                        TessellationError::Failed(format!(
                            "uv index {} is out of range",
                            uv_indices[corner]
                        ))
                    })?;
                    out.vertices.push(points[corner]);
                    out.normals.push(normals[vertex]);
                    out.uvs.push(*uv);
                }
                for [a, b, c] in triangles {
                    out.indices.push([
                        to_index(base + a)?,
                        to_index(base + b)?,
                        to_index(base + c)?,
                    ]);
                }
            } else {
                for [a, b, c] in triangles {
                    out.indices.push([
                        to_index(face.indices[a])?,
                        to_index(face.indices[b])?,
                        to_index(face.indices[c])?,
                    ]);
                }
            }
        }

        debug!(
            faces = mesh.face_count(),
            vertices = out.vertices.len(),
            triangles = out.indices.len(),
            with_uvs,
            "triangulated mesh"
        );
        Ok(out)
    }
}

/// Splits a polygon into triangles given as corner positions within it.
fn triangulate_polygon(points: &[Point3]) -> Result<Vec<[usize; 3]>> {
    let n = points.len();
    if n < 3 {
        return Err(TopologyError::DegenerateFace { arity: n }.into());
    }
    if n == 3 {
        return Ok(vec![[0, 1, 2]]);
    }
    let Some(normal) = newell_normal(points) else {
        return Ok(fan(n));
    };

    // Right-handed in-plane basis, so counter-clockwise in 2D is
    // counter-clockwise about the normal.
    let helper = if normal.x.abs() <= normal.y.abs() && normal.x.abs() <= normal.z.abs() {
        Vector3::x()
    } else if normal.y.abs() <= normal.z.abs() {
        Vector3::y()
    } else {
        Vector3::z()
    };
    let u_dir = normal.cross(&helper).normalize();
    let v_dir = normal.cross(&u_dir);
    let origin = points[0];
    let projected: Vec<SpadePoint2<f64>> = points
        .iter()
        .map(|p| {
            let d = p - origin;
            SpadePoint2::new(d.dot(&u_dir), d.dot(&v_dir))
        })
        .collect();

    let mut cdt = Cdt::new();
    let mut corner_of_vertex: HashMap<usize, usize> = HashMap::new();
    let mut handles = Vec::with_capacity(n);
    for (corner, &pt) in projected.iter().enumerate() {
        let handle = cdt.insert(pt).map_err(|e: InsertionError| {
            TessellationError::Failed(format!("CDT insert: {e}"))
        })?;
        corner_of_vertex.entry(handle.index()).or_insert(corner);
        handles.push(handle);
    }
    for i in 0..n {
        let from = handles[i];
        let to = handles[(i + 1) % n];
        if from == to {
            continue;
        }
        // A self-intersecting outline cannot be constrained.
        if !cdt.can_add_constraint(from, to) {
            trace!(corners = n, "outline intersects itself, using a fan");
            return Ok(fan(n));
        }
        cdt.add_constraint(from, to);
    }

    let interior = faces_inside_outline(&cdt, &handles);
    if interior.is_empty() {
        trace!(corners = n, "no outline edge survived, using a fan");
        return Ok(fan(n));
    }
    let mut triangles = Vec::with_capacity(n - 2);
    for face in cdt.inner_faces() {
        if !interior.contains(&face.fix().index()) {
            continue;
        }
        let mut corners = [0usize; 3];
        for (slot, vertex) in face.vertices().iter().enumerate() {
            corners[slot] = corner_of_vertex
                .get(&vertex.fix().index())
                .copied()
                .ok_or_else(|| TessellationError::Failed("unknown CDT vertex".into()))?;
        }
        triangles.push(corners);
    }
    Ok(triangles)
}

fn fan(n: usize) -> Vec<[usize; 3]> {
    (1..n - 1).map(|i| [0, i, i + 1]).collect()
}

/// Area-weighted polygon normal, robust to reflex first corners.
fn newell_normal(points: &[Point3]) -> Option<Vector3> {
    let n = points.len();
    let mut sum = Vector3::zeros();
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        sum.x += (a.y - b.y) * (a.z + b.z);
        sum.y += (a.z - b.z) * (a.x + b.x);
        sum.z += (a.x - b.x) * (a.y + b.y);
    }
    sum.try_normalize(TOLERANCE)
}

/// Inner faces enclosed by `outline`.
///
/// The outline winds counter-clockwise in the projected plane, so the face
/// left of each outline edge is inside. The region grows from those faces
/// and stops at constraint edges.
fn faces_inside_outline(cdt: &Cdt, outline: &[FixedVertexHandle]) -> HashSet<usize> {
    let n = outline.len();
    let mut pending: Vec<FixedFaceHandle<InnerTag>> = (0..n)
        .filter_map(|i| cdt.get_edge_from_neighbors(outline[i], outline[(i + 1) % n]))
        .filter_map(|edge| edge.face().as_inner())
        .map(|face| face.fix())
        .collect();

    let mut inside = HashSet::new();
    while let Some(face) = pending.pop() {
        if !inside.insert(face.index()) {
            continue;
        }
        for edge in cdt.face(face).adjacent_edges() {
            if cdt.is_constraint_edge(edge.as_undirected().fix()) {
                continue;
            }
            if let Some(neighbor) = edge.rev().face().as_inner() {
                pending.push(neighbor.fix());
            }
        }
    }
    inside
}
