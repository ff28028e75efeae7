//! Ray/triangle intersection.

use deform_types::Triangle;
use nalgebra::{Point3, Vector3};

/// A single ray/surface intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Ray parameter at the intersection (distance for a unit direction).
    pub distance: f64,
    /// The intersection point.
    pub position: Point3<f64>,
    /// Unit normal of the hit triangle (CCW orientation, not flipped
    /// toward the ray origin).
    pub normal: Vector3<f64>,
    /// Index of the hit triangle within the surface.
    pub face: usize,
}

/// Test if a ray intersects a triangle.
///
/// Uses the Möller–Trumbore algorithm. Only intersections in the ray's
/// positive direction (`t > epsilon`) are reported; degenerate triangles
/// and rays parallel to the triangle plane never hit.
///
/// # Arguments
///
/// * `origin` - Origin of the ray
/// * `direction` - Direction of the ray (should be normalized for `t` to be
///   a distance)
/// * `triangle` - The triangle to test
/// * `epsilon` - Parallelism and self-intersection threshold
///
/// # Returns
///
/// `Some(t)` where `t` is the ray parameter at intersection, or `None`.
#[must_use]
pub fn ray_triangle_intersect(
    origin: &Point3<f64>,
    direction: &Vector3<f64>,
    triangle: &Triangle,
    epsilon: f64,
) -> Option<f64> {
    let edge1 = triangle.v1 - triangle.v0;
    let edge2 = triangle.v2 - triangle.v0;

    let h = direction.cross(&edge2);
    let a = edge1.dot(&h);

    // Ray is parallel to triangle
    if a.abs() < epsilon {
        return None;
    }

    let f = 1.0 / a;
    let s = origin - triangle.v0;
    let u = f * s.dot(&h);

    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(&edge1);
    let v = f * direction.dot(&q);

    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(&q);

    if t > epsilon {
        Some(t)
    } else {
        None
    }
}
