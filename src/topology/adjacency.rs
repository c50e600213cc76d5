use std::collections::HashMap;

use crate::error::{Result, TopologyError};

use super::edge::HalfEdge;
use super::face::{half_edges_of, FaceId};
use super::Mesh;

/// Read-only half-edge view over a snapshot of a mesh's faces.
///
/// Maps every directed edge to the face that winds through it and every
/// vertex to one of its outgoing edges. The snapshot is taken at construction
/// time and goes stale as soon as the mesh's faces change, so modifiers build
/// a fresh map per call from the pre-modification face list.
#[derive(Debug, Clone)]
pub struct AdjacencyMap {
    faces: Vec<(FaceId, Vec<usize>)>,
    face_by_edge: HashMap<HalfEdge, usize>,
    outgoing: HashMap<usize, HalfEdge>,
    outgoing_count: HashMap<usize, usize>,
}

impl AdjacencyMap {
    /// Builds the map from the current faces of `mesh`.
    ///
    /// When several faces wind through the same directed edge (non-manifold
    /// or inconsistently oriented input) the last one wins.
    #[must_use]
    pub fn new(mesh: &Mesh) -> Self {
        let faces: Vec<(FaceId, Vec<usize>)> = mesh
            .faces()
            .map(|(id, face)| (id, face.indices.clone()))
            .collect();

        let mut face_by_edge = HashMap::new();
        let mut outgoing = HashMap::new();
        let mut outgoing_count: HashMap<usize, usize> = HashMap::new();
        for (slot, (_, indices)) in faces.iter().enumerate() {
            for edge in half_edges_of(indices) {
                if face_by_edge.insert(edge, slot).is_none() {
                    *outgoing_count.entry(edge.from).or_default() += 1;
                }
                outgoing.entry(edge.from).or_insert(edge);
            }
        }

        Self {
            faces,
            face_by_edge,
            outgoing,
            outgoing_count,
        }
    }

    /// The face snapshot, in mesh order. Slots returned by
    /// [`face_by_edge`](Self::face_by_edge) index into this slice.
    #[must_use]
    pub fn faces(&self) -> &[(FaceId, Vec<usize>)] {
        &self.faces
    }

    /// Snapshot slot of the face owning `edge`, if any.
    #[must_use]
    pub fn face_by_edge(&self, edge: HalfEdge) -> Option<usize> {
        self.face_by_edge.get(&edge).copied()
    }

    /// Handle of the face owning `edge`, if any.
    #[must_use]
    pub fn face_id_by_edge(&self, edge: HalfEdge) -> Option<FaceId> {
        self.face_by_edge(edge).map(|slot| self.faces[slot].0)
    }

    /// Returns `true` if no face owns the pair of `edge`.
    #[must_use]
    pub fn is_boundary(&self, edge: HalfEdge) -> bool {
        !self.face_by_edge.contains_key(&edge.pair())
    }

    /// Every owned half-edge whose pair is not owned, in face order.
    #[must_use]
    pub fn boundary_edges(&self) -> Vec<HalfEdge> {
        self.faces
            .iter()
            .flat_map(|(_, indices)| half_edges_of(indices).collect::<Vec<_>>())
            .filter(|edge| self.is_boundary(*edge))
            .collect()
    }

    /// One outgoing half-edge of `vertex`.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::IsolatedVertex`] if no face uses the vertex.
    pub fn outgoing(&self, vertex: usize) -> Result<HalfEdge> {
        self.outgoing
            .get(&vertex)
            .copied()
            .ok_or_else(|| TopologyError::IsolatedVertex { vertex }.into())
    }

    /// The next outgoing half-edge around `edge.from`.
    ///
    /// Finds the face owning `edge`, takes that face's edge arriving at
    /// `edge.from` and returns its pair. Repeating the step walks the face fan
    /// of the vertex counter-clockwise when seen from outside.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::MissingHalfEdge`] if `edge` has no owning face
    /// or the arriving edge has no pair, which happens on boundary vertices.
    pub fn pair_next(&self, edge: HalfEdge) -> Result<HalfEdge> {
        let slot = self
            .face_by_edge(edge)
            .ok_or(TopologyError::MissingHalfEdge {
                from: edge.from,
                to: edge.to,
            })?;
        let indices = &self.faces[slot].1;
        let n = indices.len();
        let corner = (0..n)
            .find(|&i| indices[i] == edge.from && indices[(i + 1) % n] == edge.to)
            .ok_or(TopologyError::MissingHalfEdge {
                from: edge.from,
                to: edge.to,
            })?;
        let prev = indices[(corner + n - 1) % n];
        let next = HalfEdge::new(edge.from, prev);
        if self.face_by_edge.contains_key(&next) {
            Ok(next)
        } else {
            Err(TopologyError::MissingHalfEdge {
                from: next.from,
                to: next.to,
            }
            .into())
        }
    }

    /// Walks the full cycle of outgoing half-edges around `vertex`.
    ///
    /// The first element is [`outgoing`](Self::outgoing)`(vertex)`; the walk
    /// follows [`pair_next`](Self::pair_next) until it returns to it. A closed
    /// walk must cover every owned outgoing half-edge of the vertex.
    ///
    /// # Errors
    ///
    /// - [`TopologyError::MissingHalfEdge`] on boundary vertices.
    /// - [`TopologyError::OpenVertexFan`] when the walk revisits an edge
    ///   without returning to the start (inconsistent winding).
    /// - [`TopologyError::NonManifoldVertex`] when the walk closes but leaves
    ///   other outgoing half-edges unvisited, as at the pinch of a bowtie.
    pub fn fan(&self, vertex: usize) -> Result<Vec<HalfEdge>> {
        let start = self.outgoing(vertex)?;
        let count = self.outgoing_count.get(&vertex).copied().unwrap_or(0);
        let mut fan = vec![start];
        let mut current = self.pair_next(start)?;
        while current != start {
            if fan.len() >= count {
                return Err(TopologyError::OpenVertexFan { vertex }.into());
            }
            fan.push(current);
            current = self.pair_next(current)?;
        }
        if fan.len() < count {
            return Err(TopologyError::NonManifoldVertex { vertex }.into());
        }
        Ok(fan)
    }
}
