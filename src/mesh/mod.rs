//! `Mesh` struct and the facet types it is built from.

use crate::errors::ParseError;
use crate::io::{self, Format};
use crate::validate::{self, ValidationReport};

pub mod aabb;
pub mod triangle;

pub use aabb::Aabb;
pub use triangle::{Triangle, TriangleEpsilon};

/// A decoded STL body: an optional name plus triangles in file order.
///
/// `Mesh` is a plain value. Decoding produces one, encoding reads one, and
/// nothing mutates a mesh behind the caller's back, so meshes can be shared
/// and compared freely. Facet order is preserved exactly as read, which is
/// what lets a binary encode reproduce its input byte for byte. A mesh with
/// zero triangles is a valid mesh.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    /// Free-text name: the `solid` line of an ASCII file, or the best-effort
    /// text of a binary header. `None` when absent or blank.
    pub name: Option<String>,

    /// Facets in file order.
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    /// An empty, unnamed mesh.
    pub fn new() -> Self {
        Mesh::default()
    }

    /// Build a Mesh from an existing triangle list.
    pub fn from_triangles(triangles: Vec<Triangle>) -> Self {
        Mesh { name: None, triangles }
    }

    /// The same mesh with a name attached.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Number of facets.
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// `true` when the mesh holds no facets.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Iterate facets in file order.
    pub fn iter(&self) -> std::slice::Iter<'_, Triangle> {
        self.triangles.iter()
    }

    /// Componentwise min/max over every vertex of every facet, or `None`
    /// for an empty mesh.
    pub fn bounding_box(&self) -> Option<Aabb> {
        Aabb::from_points(
            self.triangles
                .iter()
                .flat_map(|triangle| triangle.vertices.iter().copied()),
        )
    }

    /// Decode STL bytes of either variant. See [`crate::io::decode`].
    pub fn from_stl(bytes: &[u8]) -> Result<Self, ParseError> {
        io::decode(bytes)
    }

    /// Encode to the chosen variant. See [`crate::io::encode`].
    pub fn to_stl(&self, format: Format) -> Vec<u8> {
        io::encode(self, format)
    }

    /// Advisory integrity report. See [`crate::validate::validate`].
    pub fn validate(&self) -> ValidationReport {
        validate::validate(self)
    }
}
