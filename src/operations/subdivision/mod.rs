mod catmull_clark;
mod doo_sabin;
mod linear;
mod planar_mid_edge_center;
mod planar_vertex_center;
mod planar_vertex_mid_edge_center;
mod quads_to_triangles;

pub use catmull_clark::CatmullClark;
pub use doo_sabin::DooSabin;
pub use linear::LinearSubdivision;
pub use planar_mid_edge_center::PlanarMidEdgeCenter;
pub use planar_vertex_center::PlanarVertexCenter;
pub use planar_vertex_mid_edge_center::PlanarVertexMidEdgeCenter;
pub use quads_to_triangles::QuadsToTriangles;

use std::collections::HashMap;

use crate::error::Result;
use crate::topology::{Face, FaceId, HalfEdge, Mesh};

/// Vertex created on each undirected edge during one modifier call.
type EdgeVertices = HashMap<(usize, usize), usize>;

/// Replaces each of `targets` by the faces `split` returns for it.
///
/// The replacement faces inherit the source face's tag and are appended after
/// the untouched faces. `split` receives an edge map shared across the call so
/// that a point generated on an edge is created once for both of its faces.
fn replace_faces<F>(mesh: &mut Mesh, targets: &[FaceId], mut split: F) -> Result<()>
where
    F: FnMut(&mut Mesh, &mut EdgeVertices, &Face) -> Result<Vec<Vec<usize>>>,
{
    let mut shared = EdgeVertices::new();
    for &id in targets {
        let source = mesh.face(id)?.clone();
        let pieces = split(mesh, &mut shared, &source)?;
        mesh.remove_face(id);
        for indices in pieces {
            mesh.add_face_data(Face::new(indices).with_tag_opt(source.tag.clone()));
        }
    }
    Ok(())
}

/// Index of the vertex at the midpoint of `a` and `b`, created on first use.
fn midpoint_vertex(
    mesh: &mut Mesh,
    shared: &mut EdgeVertices,
    a: usize,
    b: usize,
) -> Result<usize> {
    let key = HalfEdge::new(a, b).undirected();
    if let Some(&index) = shared.get(&key) {
        return Ok(index);
    }
    let mid = nalgebra::center(&mesh.vertex(a)?, &mesh.vertex(b)?);
    let index = mesh.add_vertex(mid);
    shared.insert(key, index);
    Ok(index)
}

/// Midpoint vertices of every edge of `face`; entry `i` sits between corner
/// `i` and corner `i + 1`.
fn edge_midpoints(mesh: &mut Mesh, shared: &mut EdgeVertices, face: &Face) -> Result<Vec<usize>> {
    let n = face.len();
    (0..n)
        .map(|i| midpoint_vertex(mesh, shared, face.indices[i], face.indices[(i + 1) % n]))
        .collect()
}

/// Appends a vertex at the center of `face`.
fn center_vertex(mesh: &mut Mesh, face: &Face) -> Result<usize> {
    let center = crate::math::polygon_3d::centroid(&mesh.points_of(&face.indices)?);
    Ok(mesh.add_vertex(center))
}
