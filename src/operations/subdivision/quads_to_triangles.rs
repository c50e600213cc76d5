use tracing::debug;

use crate::error::Result;
use crate::operations::FaceModifier;
use crate::topology::{Face, FaceId, Mesh};

/// Splits every quad `(a, b, c, d)` into `(a, b, c)` and `(c, d, a)` along
/// its `(0, 2)` diagonal. Faces of any other arity are left untouched.
/// Tags and texture indices follow the split.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuadsToTriangles;

impl QuadsToTriangles {
    /// Creates a new `QuadsToTriangles` modifier.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl FaceModifier for QuadsToTriangles {
    fn modify_faces<'m>(&self, mesh: &'m mut Mesh, faces: &[FaceId]) -> Result<&'m mut Mesh> {
        let mut split = 0usize;
        for &id in faces {
            let face = mesh.face(id)?;
            if face.len() != 4 {
                continue;
            }
            let face = face.clone();
            mesh.remove_face(id);
            for corners in [[0, 1, 2], [2, 3, 0]] {
                let mut triangle =
                    Face::new(corners.iter().map(|&c| face.indices[c]).collect())
                        .with_tag_opt(face.tag.clone());
                if let Some(uv) = &face.uv_indices {
                    triangle = triangle.with_uv_indices(corners.iter().map(|&c| uv[c]).collect());
                }
                mesh.add_face_data(triangle);
            }
            split += 1;
        }
        debug!(quads = split, "quads split into triangles");
        Ok(mesh)
    }
}
