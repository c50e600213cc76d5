use super::edge::HalfEdge;

slotmap::new_key_type! {
    /// Unique identifier for a face in a mesh.
    pub struct FaceId;
}

/// A polygon of a mesh.
///
/// The corners are indices into the owning mesh's vertex sequence. Their
/// cyclic order is the winding of the face: counter-clockwise when looking
/// against the outward normal.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Face {
    /// Vertex indices in winding order.
    pub indices: Vec<usize>,
    /// Texture coordinate indices, parallel to `indices` when present.
    pub uv_indices: Option<Vec<usize>>,
    /// Free-form label used by selection queries.
    pub tag: Option<String>,
}

impl Face {
    /// Creates an untagged face without texture coordinates.
    #[must_use]
    pub fn new(indices: Vec<usize>) -> Self {
        Self {
            indices,
            uv_indices: None,
            tag: None,
        }
    }

    /// Sets the selection tag.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Sets an optional selection tag, typically inherited from a source face.
    #[must_use]
    pub fn with_tag_opt(mut self, tag: Option<String>) -> Self {
        self.tag = tag;
        self
    }

    /// Attaches texture coordinate indices.
    #[must_use]
    pub fn with_uv_indices(mut self, uv_indices: Vec<usize>) -> Self {
        self.uv_indices = Some(uv_indices);
        self
    }

    /// Number of corners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns `true` if the face has no corners.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Returns `true` if the face carries the given tag.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tag.as_deref() == Some(tag)
    }

    /// Directed edges of the face in winding order, starting at corner 0.
    pub fn half_edges(&self) -> impl Iterator<Item = HalfEdge> + '_ {
        half_edges_of(&self.indices)
    }

    /// Returns a copy with the winding (and texture winding) reversed.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let mut indices = self.indices.clone();
        indices.reverse();
        let uv_indices = self.uv_indices.as_ref().map(|uv| {
            let mut uv = uv.clone();
            uv.reverse();
            uv
        });
        Self {
            indices,
            uv_indices,
            tag: self.tag.clone(),
        }
    }
}

/// Directed edges of a closed index loop.
pub fn half_edges_of(indices: &[usize]) -> impl Iterator<Item = HalfEdge> + '_ {
    let n = indices.len();
    (0..n).map(move |i| HalfEdge::new(indices[i], indices[(i + 1) % n]))
}
