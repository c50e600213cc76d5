pub mod adjacency;
pub mod edge;
pub mod face;

pub use adjacency::AdjacencyMap;
pub use edge::HalfEdge;
pub use face::{Face, FaceId};

use crate::error::{Result, TopologyError};
use crate::math::{polygon_3d, Point2, Point3, Vector3};
use crate::operations::MeshModifier;
use slotmap::SlotMap;

/// A mutable polygon mesh.
///
/// Vertices are addressed by their position in the vertex sequence and are
/// only ever appended; faces live in a generational arena so that handles held
/// by a selection stay unambiguous after other faces are removed. Faces are
/// iterated in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    vertices: Vec<Point3>,
    uvs: Vec<Point2>,
    faces: SlotMap<FaceId, Face>,
    /// Insertion order. May hold handles of removed faces until the next
    /// compaction; readers skip them.
    order: Vec<FaceId>,
}

impl Mesh {
    /// Creates a new, empty mesh.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Vertex operations ---

    /// Appends a vertex and returns its index.
    pub fn add_vertex(&mut self, point: Point3) -> usize {
        self.vertices.push(point);
        self.vertices.len() - 1
    }

    /// Appends a vertex given by its coordinates and returns its index.
    pub fn add_vertex_xyz(&mut self, x: f64, y: f64, z: f64) -> usize {
        self.add_vertex(Point3::new(x, y, z))
    }

    /// Returns the position of a vertex.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::InvalidVertexIndex`] if `index` is out of range.
    pub fn vertex(&self, index: usize) -> Result<Point3> {
        self.vertices
            .get(index)
            .copied()
            .ok_or_else(|| self.invalid_index(index).into())
    }

    /// Moves an existing vertex.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::InvalidVertexIndex`] if `index` is out of range.
    pub fn set_vertex(&mut self, index: usize, point: Point3) -> Result<()> {
        let vertex_count = self.vertices.len();
        let slot = self.vertices.get_mut(index).ok_or(
            TopologyError::InvalidVertexIndex {
                index,
                vertex_count,
            },
        )?;
        *slot = point;
        Ok(())
    }

    /// All vertex positions in index order.
    #[must_use]
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Removes every vertex. Faces are left untouched and must be rebuilt.
    pub fn clear_vertices(&mut self) {
        self.vertices.clear();
    }

    // --- Texture coordinate operations ---

    /// Appends a texture coordinate and returns its index.
    pub fn add_uv(&mut self, uv: Point2) -> usize {
        self.uvs.push(uv);
        self.uvs.len() - 1
    }

    /// All texture coordinates in index order.
    #[must_use]
    pub fn uvs(&self) -> &[Point2] {
        &self.uvs
    }

    // --- Face operations ---

    /// Appends a face over the given vertex indices.
    ///
    /// Indices are not validated; a face pointing outside the vertex sequence
    /// fails when it is first read.
    pub fn add_face(&mut self, indices: impl Into<Vec<usize>>) -> FaceId {
        self.add_face_data(Face::new(indices.into()))
    }

    /// Appends a fully specified face.
    pub fn add_face_data(&mut self, face: Face) -> FaceId {
        let id = self.faces.insert(face);
        self.order.push(id);
        id
    }

    /// Returns a reference to a face, or an error if it was removed.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::FaceNotFound`] for a stale handle.
    pub fn face(&self, id: FaceId) -> Result<&Face> {
        self.faces
            .get(id)
            .ok_or_else(|| TopologyError::FaceNotFound.into())
    }

    /// Returns a mutable reference to a face, or an error if it was removed.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::FaceNotFound`] for a stale handle.
    pub fn face_mut(&mut self, id: FaceId) -> Result<&mut Face> {
        self.faces
            .get_mut(id)
            .ok_or_else(|| TopologyError::FaceNotFound.into())
    }

    /// Returns `true` if the handle refers to a live face.
    #[must_use]
    pub fn contains_face(&self, id: FaceId) -> bool {
        self.faces.contains_key(id)
    }

    /// Iterates faces in insertion order.
    pub fn faces(&self) -> impl Iterator<Item = (FaceId, &Face)> + '_ {
        self.order
            .iter()
            .filter_map(move |&id| self.faces.get(id).map(|face| (id, face)))
    }

    /// Handles of all faces in insertion order.
    #[must_use]
    pub fn face_ids(&self) -> Vec<FaceId> {
        self.faces().map(|(id, _)| id).collect()
    }

    /// Number of faces.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Removes a single face. Returns the removed face, if it was live.
    ///
    /// The handle stays in the insertion order until stale handles outnumber
    /// live faces, so removing faces one at a time is amortized O(1).
    pub fn remove_face(&mut self, id: FaceId) -> Option<Face> {
        let removed = self.faces.remove(id);
        if removed.is_some() && self.order.len() > 2 * self.faces.len() + 16 {
            self.compact_order();
        }
        removed
    }

    /// Removes every face in `ids`. Stale handles are ignored.
    pub fn remove_faces(&mut self, ids: &[FaceId]) {
        for &id in ids {
            self.faces.remove(id);
        }
        self.compact_order();
    }

    fn compact_order(&mut self) {
        let faces = &self.faces;
        self.order.retain(|&id| faces.contains_key(id));
    }

    /// Removes every face. Vertices are left untouched.
    pub fn clear_faces(&mut self) {
        self.faces.clear();
        self.order.clear();
    }

    // --- Geometric queries ---

    /// Positions of a face's corners in winding order.
    ///
    /// # Errors
    ///
    /// Returns an error if the face is stale or references a missing vertex.
    pub fn face_points(&self, id: FaceId) -> Result<Vec<Point3>> {
        self.points_of(&self.face(id)?.indices)
    }

    /// Positions of the given vertex indices.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::InvalidVertexIndex`] for an out-of-range index.
    pub fn points_of(&self, indices: &[usize]) -> Result<Vec<Point3>> {
        indices.iter().map(|&i| self.vertex(i)).collect()
    }

    /// Arithmetic mean of a face's corner positions.
    ///
    /// # Errors
    ///
    /// Returns an error if the face is stale or references a missing vertex.
    pub fn calculate_face_center(&self, id: FaceId) -> Result<Point3> {
        Ok(polygon_3d::centroid(&self.face_points(id)?))
    }

    /// Unit normal of a face, taken from its first three corners.
    ///
    /// Degenerate corners yield the zero vector.
    ///
    /// # Errors
    ///
    /// Returns an error if the face is stale or references a missing vertex.
    pub fn calculate_face_normal(&self, id: FaceId) -> Result<Vector3> {
        Ok(polygon_3d::corner_normal(&self.face_points(id)?))
    }

    /// Per-vertex normals: the normalized sum of the normals of every face
    /// touching the vertex. Unreferenced vertices get the zero vector.
    ///
    /// # Errors
    ///
    /// Returns an error if a face references a missing vertex.
    pub fn vertex_normals(&self) -> Result<Vec<Vector3>> {
        let mut sums = vec![Vector3::zeros(); self.vertices.len()];
        for (_, face) in self.faces() {
            let normal = polygon_3d::corner_normal(&self.points_of(&face.indices)?);
            for &i in &face.indices {
                sums[i] += normal;
            }
        }
        Ok(sums
            .into_iter()
            .map(|n| n.try_normalize(crate::math::TOLERANCE).unwrap_or(n))
            .collect())
    }

    // --- Bulk operations ---

    /// Concatenates other meshes into this one.
    ///
    /// Incoming vertex and texture indices are rebased by this mesh's current
    /// counts, so independently built meshes never collide.
    pub fn append(&mut self, others: &[&Mesh]) {
        for other in others {
            let vertex_base = self.vertices.len();
            let uv_base = self.uvs.len();
            self.vertices.extend_from_slice(&other.vertices);
            self.uvs.extend_from_slice(&other.uvs);
            for (_, face) in other.faces() {
                let mut face = face.clone();
                for i in &mut face.indices {
                    *i += vertex_base;
                }
                if let Some(uv) = face.uv_indices.as_mut() {
                    for i in uv {
                        *i += uv_base;
                    }
                }
                self.add_face_data(face);
            }
        }
    }

    /// Applies a modifier and returns the mesh for chaining.
    ///
    /// # Errors
    ///
    /// Propagates the modifier's error.
    pub fn apply<M: MeshModifier + ?Sized>(&mut self, modifier: &M) -> Result<&mut Self> {
        modifier.modify(self)
    }

    /// Checks that every face has at least three corners and only references
    /// existing vertices. Modifiers never call this themselves.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<()> {
        for (_, face) in self.faces() {
            if face.len() < 3 {
                return Err(TopologyError::DegenerateFace { arity: face.len() }.into());
            }
            if let Some(&index) = face.indices.iter().find(|&&i| i >= self.vertices.len()) {
                return Err(self.invalid_index(index).into());
            }
        }
        Ok(())
    }

    fn invalid_index(&self, index: usize) -> TopologyError {
        TopologyError::InvalidVertexIndex {
            index,
            vertex_count: self.vertices.len(),
        }
    }
}
