//! Predicate-based face queries.
//!
//! A [`FaceSelector`] borrows a mesh and evaluates each predicate once against
//! its current faces. The returned [`Selection`] is an owned snapshot of face
//! handles; it does not follow later edits of the mesh.

use std::collections::HashSet;

use crate::error::Result;
use crate::math::{polygon_3d, Axis, Vector3, TOLERANCE};
use crate::topology::{Face, FaceId, Mesh};

/// Up direction used by [`FaceSelector::select_top_faces`].
pub const UP: Vector3 = Vector3::new(0.0, 1.0, 0.0);

/// Default dot-product tolerance for the top/bottom face queries.
pub const DEFAULT_NORMAL_TOLERANCE: f64 = 1e-3;

/// An ordered snapshot of face handles drawn from one mesh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    faces: Vec<FaceId>,
}

impl Selection {
    /// The selected faces, in mesh order.
    #[must_use]
    pub fn faces(&self) -> &[FaceId] {
        &self.faces
    }

    /// Consumes the selection, returning its handles.
    #[must_use]
    pub fn into_faces(self) -> Vec<FaceId> {
        self.faces
    }

    /// Number of selected faces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Returns `true` if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Returns `true` if `face` is selected.
    #[must_use]
    pub fn contains(&self, face: FaceId) -> bool {
        self.faces.contains(&face)
    }

    /// Faces selected in either selection, keeping the order of `self` first.
    #[must_use]
    pub fn union(&self, other: &Selection) -> Selection {
        let mut seen: HashSet<FaceId> = self.faces.iter().copied().collect();
        let mut faces = self.faces.clone();
        faces.extend(other.faces.iter().copied().filter(|id| seen.insert(*id)));
        Selection { faces }
    }

    /// Faces of `self` that are not in `other`.
    #[must_use]
    pub fn difference(&self, other: &Selection) -> Selection {
        let excluded: HashSet<FaceId> = other.faces.iter().copied().collect();
        Selection {
            faces: self
                .faces
                .iter()
                .copied()
                .filter(|id| !excluded.contains(id))
                .collect(),
        }
    }
}

impl IntoIterator for Selection {
    type Item = FaceId;
    type IntoIter = std::vec::IntoIter<FaceId>;

    fn into_iter(self) -> Self::IntoIter {
        self.faces.into_iter()
    }
}

/// Evaluates selection predicates against a mesh.
#[derive(Debug, Clone, Copy)]
pub struct FaceSelector<'m> {
    mesh: &'m Mesh,
}

impl<'m> FaceSelector<'m> {
    /// Creates a selector over the current faces of `mesh`.
    #[must_use]
    pub fn new(mesh: &'m Mesh) -> Self {
        Self { mesh }
    }

    fn filter<F>(&self, predicate: F) -> Selection
    where
        F: Fn(&Face) -> bool,
    {
        Selection {
            faces: self
                .mesh
                .faces()
                .filter(|(_, face)| predicate(face))
                .map(|(id, _)| id)
                .collect(),
        }
    }

    fn try_filter<F>(&self, predicate: F) -> Result<Selection>
    where
        F: Fn(&Face) -> Result<bool>,
    {
        let mut faces = Vec::new();
        for (id, face) in self.mesh.faces() {
            if predicate(face)? {
                faces.push(id);
            }
        }
        Ok(Selection { faces })
    }

    /// Every face of the mesh.
    #[must_use]
    pub fn select_all(&self) -> Selection {
        self.filter(|_| true)
    }

    /// Faces whose tag equals `tag`.
    #[must_use]
    pub fn select_by_tag(&self, tag: &str) -> Selection {
        self.filter(|face| face.has_tag(tag))
    }

    /// Faces with exactly `count` corners.
    #[must_use]
    pub fn select_by_vertex_count(&self, count: usize) -> Selection {
        self.filter(|face| face.len() == count)
    }

    /// Faces with three corners.
    #[must_use]
    pub fn select_triangles(&self) -> Selection {
        self.select_by_vertex_count(3)
    }

    /// Faces with four corners.
    #[must_use]
    pub fn select_quads(&self) -> Selection {
        self.select_by_vertex_count(4)
    }

    /// Faces whose unit normal `n` satisfies `n · d >= 1 - tolerance`, where
    /// `d` is `direction` normalized. A zero direction selects nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if a face references a missing vertex.
    pub fn select_similar_normal(&self, direction: &Vector3, tolerance: f64) -> Result<Selection> {
        let Some(direction) = direction.try_normalize(TOLERANCE) else {
            return Ok(Selection::default());
        };
        self.try_filter(|face| {
            let normal = polygon_3d::corner_normal(&self.mesh.points_of(&face.indices)?);
            Ok(normal.dot(&direction) >= 1.0 - tolerance)
        })
    }

    /// Faces facing straight up (`+Y`).
    ///
    /// # Errors
    ///
    /// Returns an error if a face references a missing vertex.
    pub fn select_top_faces(&self) -> Result<Selection> {
        self.select_similar_normal(&UP, DEFAULT_NORMAL_TOLERANCE)
    }

    /// Faces facing straight down (`-Y`).
    ///
    /// # Errors
    ///
    /// Returns an error if a face references a missing vertex.
    pub fn select_bottom_faces(&self) -> Result<Selection> {
        self.select_similar_normal(&(-UP), DEFAULT_NORMAL_TOLERANCE)
    }

    /// Faces whose center lies strictly above `threshold` along `axis`.
    ///
    /// # Errors
    ///
    /// Returns an error if a face references a missing vertex.
    pub fn select_above(&self, axis: Axis, threshold: f64) -> Result<Selection> {
        self.try_filter(|face| {
            let center = polygon_3d::centroid(&self.mesh.points_of(&face.indices)?);
            Ok(axis.component(&center) > threshold)
        })
    }

    /// Faces whose center lies strictly below `threshold` along `axis`.
    ///
    /// # Errors
    ///
    /// Returns an error if a face references a missing vertex.
    pub fn select_below(&self, axis: Axis, threshold: f64) -> Result<Selection> {
        self.try_filter(|face| {
            let center = polygon_3d::centroid(&self.mesh.points_of(&face.indices)?);
            Ok(axis.component(&center) < threshold)
        })
    }
}
