//! Axis-aligned bounding boxes over facet geometry.

use crate::float_types::Real;
use nalgebra::{Point3, Vector3};

/// Axis-aligned box spanning a set of points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub mins: Point3<Real>,
    pub maxs: Point3<Real>,
}

impl Aabb {
    #[inline]
    pub const fn new(mins: Point3<Real>, maxs: Point3<Real>) -> Self {
        Self { mins, maxs }
    }

    /// Smallest box containing every point of the iterator, or `None` when
    /// the iterator yields nothing.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point3<Real>>,
    {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut aabb = Self::new(first, first);
        for point in points {
            aabb.grow(point);
        }
        Some(aabb)
    }

    /// Extend the box to cover `point`.
    #[inline]
    pub fn grow(&mut self, point: Point3<Real>) {
        for axis in 0..3 {
            self.mins[axis] = self.mins[axis].min(point[axis]);
            self.maxs[axis] = self.maxs[axis].max(point[axis]);
        }
    }

    /// Size along each axis.
    #[inline]
    pub fn extents(&self) -> Vector3<Real> {
        self.maxs - self.mins
    }

    #[inline]
    pub fn center(&self) -> Point3<Real> {
        Point3::new(
            (self.mins.x + self.maxs.x) / 2.0,
            (self.mins.y + self.maxs.y) / 2.0,
            (self.mins.z + self.maxs.z) / 2.0,
        )
    }
}
