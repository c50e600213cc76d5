/// A directed edge between two vertex indices.
///
/// Every face owns the half-edges that follow its winding. On a manifold mesh
/// the reversed half-edge, its pair, is owned by at most one other face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HalfEdge {
    /// Start vertex index.
    pub from: usize,
    /// End vertex index.
    pub to: usize,
}

impl HalfEdge {
    /// Creates a half-edge from `from` to `to`.
    #[must_use]
    pub const fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }

    /// The same two vertices in the opposite direction.
    #[must_use]
    pub const fn pair(self) -> Self {
        Self {
            from: self.to,
            to: self.from,
        }
    }

    /// Direction-independent key, smaller index first.
    #[must_use]
    pub const fn undirected(self) -> (usize, usize) {
        if self.from <= self.to {
            (self.from, self.to)
        } else {
            (self.to, self.from)
        }
    }
}
