//! Building blocks shared by several modifiers.

use std::collections::HashMap;

use crate::error::{OperationError, Result, TopologyError};
use crate::math::{polygon_3d, Point3};
use crate::topology::{AdjacencyMap, Face, FaceId, HalfEdge, Mesh};

/// Connects two equally long vertex loops with quads.
///
/// Quad `i` is `lower[i], lower[i + 1], upper[i + 1], upper[i]`, so for a
/// counter-clockwise `lower` loop and an `upper` loop lying along its normal,
/// the quads face outward.
///
/// # Errors
///
/// Returns [`OperationError::InvalidInput`] if the loops differ in length or
/// have fewer than two vertices.
pub fn bridge_loops(mesh: &mut Mesh, lower: &[usize], upper: &[usize]) -> Result<Vec<FaceId>> {
    if lower.len() != upper.len() {
        return Err(OperationError::InvalidInput(format!(
            "cannot bridge loops of {} and {} vertices",
            lower.len(),
            upper.len()
        ))
        .into());
    }
    if lower.len() < 2 {
        return Err(
            OperationError::InvalidInput("bridged loops need at least 2 vertices".into()).into(),
        );
    }

    let n = lower.len();
    let faces = (0..n)
        .map(|i| {
            let j = (i + 1) % n;
            mesh.add_face([lower[i], lower[j], upper[j], upper[i]])
        })
        .collect();
    Ok(faces)
}

/// Extrudes a single face.
///
/// Every corner is scaled about the face center by `scale` and moved by
/// `amount` along the face normal. The original face is replaced by a ring of
/// side quads; the transformed cap is added when `keep_cap` is set and its
/// handle returned. Side quads and cap inherit the face's tag.
///
/// # Errors
///
/// Returns an error if the face is stale or references a missing vertex.
pub fn extrude_face(
    mesh: &mut Mesh,
    face: FaceId,
    scale: f64,
    amount: f64,
    keep_cap: bool,
) -> Result<Option<FaceId>> {
    let source = mesh.face(face)?.clone();
    let points = mesh.points_of(&source.indices)?;
    let center = polygon_3d::centroid(&points);
    let offset = polygon_3d::corner_normal(&points) * amount;

    let cap: Vec<usize> = points
        .iter()
        .map(|p| mesh.add_vertex(center + (p - center) * scale + offset))
        .collect();

    for side in bridge_loops(mesh, &source.indices, &cap)? {
        mesh.face_mut(side)?.tag.clone_from(&source.tag);
    }
    mesh.remove_face(face);

    if keep_cap {
        let cap_face = Face::new(cap).with_tag_opt(source.tag);
        Ok(Some(mesh.add_face_data(cap_face)))
    } else {
        Ok(None)
    }
}

/// Replaces a closed mesh by the "corner cut" topology shared by Doo-Sabin
/// and edge bevelling.
///
/// `corners[slot][i]` is the new position generated for corner `i` of the
/// face in `adjacency.faces()[slot]`. The old vertices and faces are
/// discarded. The result holds, in order: one face per old face through its
/// corner points, one quad per old edge joining the corner points on both
/// sides, and one face per old vertex through the corner points around it in
/// fan order. Vertices of valence two would yield two-sided faces and are
/// skipped.
///
/// # Errors
///
/// Fails on boundary or non-manifold input, where an edge has no pair or a
/// vertex fan does not close.
pub fn rebuild_from_corners(
    mesh: &mut Mesh,
    adjacency: &AdjacencyMap,
    corners: &[Vec<Point3>],
) -> Result<()> {
    let snapshot = adjacency.faces();
    let mut tags = Vec::with_capacity(snapshot.len());
    for (id, _) in snapshot {
        tags.push(mesh.face(*id)?.tag.clone());
    }

    let mut used_vertices: Vec<usize> = snapshot
        .iter()
        .flat_map(|(_, indices)| indices.iter().copied())
        .collect();
    used_vertices.sort_unstable();
    used_vertices.dedup();
    // Walked up front so that non-manifold input fails before the mesh is cleared.
    let fans = used_vertices
        .iter()
        .map(|&vertex| adjacency.fan(vertex))
        .collect::<Result<Vec<_>>>()?;

    mesh.clear_faces();
    mesh.clear_vertices();

    // New vertex index of every (slot, corner).
    let mut corner_index: Vec<Vec<usize>> = Vec::with_capacity(snapshot.len());
    for points in corners {
        corner_index.push(points.iter().map(|p| mesh.add_vertex(*p)).collect());
    }

    // Half-edge -> (slot, corner at its start).
    let mut corner_of_edge: HashMap<HalfEdge, (usize, usize)> = HashMap::new();
    for (slot, (_, indices)) in snapshot.iter().enumerate() {
        let n = indices.len();
        for i in 0..n {
            corner_of_edge.insert(HalfEdge::new(indices[i], indices[(i + 1) % n]), (slot, i));
        }
    }

    for (slot, indices) in corner_index.iter().enumerate() {
        mesh.add_face_data(Face::new(indices.clone()).with_tag_opt(tags[slot].clone()));
    }

    for (slot, (_, indices)) in snapshot.iter().enumerate() {
        let n = indices.len();
        for i in 0..n {
            let edge = HalfEdge::new(indices[i], indices[(i + 1) % n]);
            if edge.from > edge.to {
                continue;
            }
            let &(other, j) =
                corner_of_edge
                    .get(&edge.pair())
                    .ok_or(TopologyError::MissingHalfEdge {
                        from: edge.to,
                        to: edge.from,
                    })?;
            let m = snapshot[other].1.len();
            let fa = corner_index[slot][i];
            let fb = corner_index[slot][(i + 1) % n];
            let gb = corner_index[other][j];
            let ga = corner_index[other][(j + 1) % m];
            mesh.add_face([fb, fa, ga, gb]);
        }
    }

    for fan in fans {
        if fan.len() < 3 {
            continue;
        }
        let mut ring = Vec::with_capacity(fan.len());
        for edge in fan {
            let &(slot, i) = corner_of_edge
                .get(&edge)
                .ok_or(TopologyError::MissingHalfEdge {
                    from: edge.from,
                    to: edge.to,
                })?;
            ring.push(corner_index[slot][i]);
        }
        mesh.add_face(ring);
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Vector3;
    use approx::assert_relative_eq;

    fn unit_square() -> (Mesh, FaceId) {
        let mut mesh = Mesh::new();
        mesh.add_vertex_xyz(0.0, 0.0, 0.0);
        mesh.add_vertex_xyz(1.0, 0.0, 0.0);
        mesh.add_vertex_xyz(1.0, 1.0, 0.0);
        mesh.add_vertex_xyz(0.0, 1.0, 0.0);
        let face = mesh.add_face_data(Face::new(vec![0, 1, 2, 3]).with_tag("lid"));
        (mesh, face)
    }

    #[test]
    fn bridging_two_loops_adds_one_quad_per_vertex() {
        let n = 12;
        let mut mesh = Mesh::new();
        let mut lower = Vec::new();
        let mut upper = Vec::new();
        for i in 0..n {
            let angle = std::f64::consts::TAU * f64::from(i) / f64::from(n);
            lower.push(mesh.add_vertex_xyz(angle.cos(), 0.0, angle.sin()));
        }
        for i in 0..n {
            let angle = std::f64::consts::TAU * f64::from(i) / f64::from(n);
            upper.push(mesh.add_vertex_xyz(angle.cos(), 2.0, angle.sin()));
        }
        let sides = bridge_loops(&mut mesh, &lower, &upper).unwrap();
        assert_eq!(sides.len(), 12);
        for id in sides {
            let face = mesh.face(id).unwrap();
            assert_eq!(face.len(), 4);
            assert!(face.indices.iter().all(|&i| i < 24));
        }
        mesh.validate().unwrap();
    }

    #[test]
    fn bridging_mismatched_loops_fails() {
        let mut mesh = Mesh::new();
        assert!(bridge_loops(&mut mesh, &[0, 1, 2], &[3, 4]).is_err());
    }

    #[test]
    fn extrude_face_builds_a_box_without_bottom() {
        let (mut mesh, face) = unit_square();
        let cap = extrude_face(&mut mesh, face, 1.0, 2.0, true).unwrap().unwrap();
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.face_count(), 5);
        assert!(mesh.face(face).is_err());
        let cap_points = mesh.face_points(cap).unwrap();
        assert!(cap_points.iter().all(|p| (p.z - 2.0).abs() < 1e-12));
        assert!(mesh.face(cap).unwrap().has_tag("lid"));
    }

    #[test]
    fn extruded_sides_face_outward() {
        let (mut mesh, face) = unit_square();
        extrude_face(&mut mesh, face, 1.0, 1.0, false).unwrap();
        let center = Point3::new(0.5, 0.5, 0.5);
        for id in mesh.face_ids() {
            let normal = mesh.calculate_face_normal(id).unwrap();
            let to_face = mesh.calculate_face_center(id).unwrap() - center;
            assert!(normal.dot(&to_face) > 0.0);
        }
    }

    #[test]
    fn extrude_with_scale_shrinks_cap() {
        let (mut mesh, face) = unit_square();
        let cap = extrude_face(&mut mesh, face, 0.5, 0.0, true).unwrap().unwrap();
        let points = mesh.face_points(cap).unwrap();
        assert_relative_eq!(points[0], Point3::new(0.25, 0.25, 0.0));
        assert_relative_eq!(
            mesh.calculate_face_normal(cap).unwrap(),
            Vector3::z()
        );
    }
}
