//! Advisory mesh integrity reporting.
//!
//! Validation never fails and never mutates. It summarizes what a decode
//! accepted so the caller, an upload handler or a converter, can apply its
//! own policy: reject, warn, or store as-is. Degenerate facets in
//! particular are reported rather than rejected, because decoding already
//! accepted them on purpose.

use crate::mesh::{Aabb, Mesh};

/// What [`validate`] found. Purely descriptive; no field is an error by
/// itself.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    /// Total facets in the mesh.
    pub triangle_count: usize,
    /// Facets enclosing no area: coincident or collinear corners.
    pub degenerate_count: usize,
    /// Componentwise vertex extremes, `None` for an empty mesh.
    pub bounding_box: Option<Aabb>,
}

/// Summarize a mesh. Pure: equal meshes yield equal reports, and running
/// it twice changes nothing.
pub fn validate(mesh: &Mesh) -> ValidationReport {
    ValidationReport {
        triangle_count: mesh.len(),
        degenerate_count: mesh.iter().filter(|t| t.is_degenerate()).count(),
        bounding_box: mesh.bounding_box(),
    }
}
