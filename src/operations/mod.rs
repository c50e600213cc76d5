pub mod creation;
pub mod modification;
pub mod shaping;
pub mod subdivision;
pub mod util;

use crate::error::Result;
use crate::topology::{FaceId, Mesh};

/// A structural edit applied in place to a whole mesh.
///
/// Implementations hold only their configuration; all working state lives
/// inside a single call. On success the same mesh is handed back so calls can
/// be chained. On error the mesh is left in whatever state the modifier had
/// reached.
pub trait MeshModifier {
    /// Applies the modifier to `mesh`.
    ///
    /// # Errors
    ///
    /// Returns an error if the mesh is malformed for this modifier.
    fn modify<'m>(&self, mesh: &'m mut Mesh) -> Result<&'m mut Mesh>;
}

/// A modifier that can be restricted to a subset of faces.
///
/// Implementors get [`MeshModifier`] for free through
/// [`modify_all`](FaceModifier::modify_all), which targets every face.
pub trait FaceModifier {
    /// Applies the modifier to the given faces only.
    ///
    /// # Errors
    ///
    /// Returns an error if a handle is stale or the faces are malformed.
    fn modify_faces<'m>(&self, mesh: &'m mut Mesh, faces: &[FaceId]) -> Result<&'m mut Mesh>;

    /// Applies the modifier to every face of the mesh.
    ///
    /// # Errors
    ///
    /// Returns an error if the faces are malformed.
    fn modify_all<'m>(&self, mesh: &'m mut Mesh) -> Result<&'m mut Mesh> {
        let faces = mesh.face_ids();
        self.modify_faces(mesh, &faces)
    }
}

impl<T: FaceModifier> MeshModifier for T {
    fn modify<'m>(&self, mesh: &'m mut Mesh) -> Result<&'m mut Mesh> {
        self.modify_all(mesh)
    }
}

/// Builds a fresh mesh from its own configuration.
pub trait MeshCreator {
    /// Creates the mesh.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    fn create(&self) -> Result<Mesh>;
}
