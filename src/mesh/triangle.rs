//! Struct and functions for working with `Triangle`s, the facet unit every
//! STL variant stores.

use crate::float_types::{Real, tolerance};
use nalgebra::{Point3, Vector3};

/// A triangular facet, holding a normal and three corner positions.
///
/// The normal is **copied verbatim**: files in the wild carry non-unit,
/// zero, or plain wrong normals, and rejecting them would reject real
/// models. Use [`Triangle::from_vertices`] to derive a normal from the
/// corner winding instead.
#[derive(Debug, Clone, PartialEq, Copy)]
pub struct Triangle {
    /// Facet normal as stored in the file; need not be unit length.
    pub normal: Vector3<Real>,
    /// Corner positions in winding order.
    pub vertices: [Point3<Real>; 3],
}

impl Triangle {
    /// Create a new [`Triangle`] from an explicit normal and corners.
    #[inline]
    pub const fn new(normal: Vector3<Real>, vertices: [Point3<Real>; 3]) -> Self {
        Triangle { normal, vertices }
    }

    /// Create a [`Triangle`] whose normal is derived from the corner
    /// winding by the right-hand rule. Facets enclosing no area get a
    /// zero normal.
    pub fn from_vertices(vertices: [Point3<Real>; 3]) -> Self {
        let cross = edge_cross(&vertices);
        let norm = cross.norm();
        let normal = if norm > tolerance() {
            cross / norm
        } else {
            Vector3::zeros()
        };
        Triangle { normal, vertices }
    }

    /// Surface area: half the magnitude of the edge cross product.
    /// ```text
    /// A = |(b - a) × (c - a)| / 2
    /// ```
    pub fn area(&self) -> Real {
        edge_cross(&self.vertices).norm() / 2.0
    }

    /// A facet is degenerate when it encloses no area: two corners
    /// coincide, or all three corners are collinear.
    pub fn is_degenerate(&self) -> bool {
        let [a, b, c] = self.vertices;
        a == b || b == c || a == c || edge_cross(&self.vertices).norm() <= tolerance()
    }
}

fn edge_cross(vertices: &[Point3<Real>; 3]) -> Vector3<Real> {
    (vertices[1] - vertices[0]).cross(&(vertices[2] - vertices[0]))
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct TriangleEpsilon {
    pub position: <Point3<Real> as approx::AbsDiffEq>::Epsilon,
    pub normal: <Vector3<Real> as approx::AbsDiffEq>::Epsilon,
}

impl approx::AbsDiffEq for Triangle {
    type Epsilon = TriangleEpsilon;

    fn default_epsilon() -> Self::Epsilon {
        Self::Epsilon {
            position: Point3::<Real>::default_epsilon(),
            normal: Vector3::<Real>::default_epsilon(),
        }
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        approx::AbsDiffEq::abs_diff_eq(&self.normal, &other.normal, epsilon.normal)
            && self
                .vertices
                .iter()
                .zip(other.vertices.iter())
                .all(|(a, b)| approx::AbsDiffEq::abs_diff_eq(a, b, epsilon.position))
    }
}

impl approx::RelativeEq for Triangle {
    fn default_max_relative() -> Self::Epsilon {
        Self::Epsilon {
            position: Point3::<Real>::default_max_relative(),
            normal: Vector3::<Real>::default_max_relative(),
        }
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        approx::RelativeEq::relative_eq(
            &self.normal,
            &other.normal,
            epsilon.normal,
            max_relative.normal,
        ) && self.vertices.iter().zip(other.vertices.iter()).all(|(a, b)| {
            approx::RelativeEq::relative_eq(a, b, epsilon.position, max_relative.position)
        })
    }
}

impl approx::UlpsEq for Triangle {
    fn default_max_ulps() -> u32 {
        debug_assert_eq!(
            Point3::<Real>::default_max_ulps(),
            Vector3::<Real>::default_max_ulps()
        );

        Point3::<Real>::default_max_ulps()
    }

    fn ulps_eq(&self, other: &Self, epsilon: Self::Epsilon, max_ulps: u32) -> bool {
        approx::UlpsEq::ulps_eq(&self.normal, &other.normal, epsilon.normal, max_ulps)
            && self
                .vertices
                .iter()
                .zip(other.vertices.iter())
                .all(|(a, b)| approx::UlpsEq::ulps_eq(a, b, epsilon.position, max_ulps))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_triangle_new() {
        let normal = Vector3::new(0.0, 0.0, 1.0);
        let vertices = [
            Point3::origin(),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let t = Triangle::new(normal, vertices);
        assert_eq!(t.normal, normal);
        assert_eq!(t.vertices, vertices);
    }

    #[test]
    fn test_from_vertices_winding() {
        // Counter-clockwise in the xy plane points +z by the right-hand rule
        let t = Triangle::from_vertices([
            Point3::origin(),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]);
        approx::assert_relative_eq!(t.normal.x, 0.0);
        approx::assert_relative_eq!(t.normal.y, 0.0);
        approx::assert_relative_eq!(t.normal.z, 1.0);

        // Reversed winding flips the normal
        let t = Triangle::from_vertices([
            Point3::origin(),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
        ]);
        approx::assert_relative_eq!(t.normal.z, -1.0);
    }

    #[test]
    fn test_area() {
        let t = Triangle::from_vertices([
            Point3::origin(),
            Point3::new(3.0, 0.0, 0.0),
            Point3::new(0.0, 4.0, 0.0),
        ]);
        assert!((t.area() - 6.0).abs() < 1e-6, "right triangle area is 3*4/2");
    }

    #[test]
    fn test_degenerate_cases() {
        let a = Point3::new(1.0, 2.0, 3.0);
        let b = Point3::new(4.0, 5.0, 6.0);

        // all three corners equal
        assert!(Triangle::from_vertices([a, a, a]).is_degenerate());
        // two corners equal
        assert!(Triangle::from_vertices([a, a, b]).is_degenerate());
        // collinear corners
        let mid = Point3::new(2.5, 3.5, 4.5);
        assert!(Triangle::from_vertices([a, mid, b]).is_degenerate());
        // an honest triangle is not
        let t = Triangle::from_vertices([
            Point3::origin(),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]);
        assert!(!t.is_degenerate());
    }

    #[test]
    fn test_degenerate_keeps_stored_normal() {
        // A zero-area facet can still carry whatever normal the file had
        let a = Point3::new(1.0, 1.0, 1.0);
        let t = Triangle::new(Vector3::x(), [a, a, a]);
        assert!(t.is_degenerate());
        assert_eq!(t.normal, Vector3::x());
    }
}
