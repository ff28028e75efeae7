//! Pre-processed collision surface.

use crate::bvh::Bvh;
use crate::ray::RayHit;
use deform_types::{Aabb, SurfaceMesh, Triangle};
use nalgebra::{Point3, Vector3};

/// Epsilon used for BVH padding, parallelism tests, and self-intersection
/// rejection.
const RAY_EPSILON: f64 = 1e-9;

/// An immutable, pre-processed projection target.
///
/// Built once per evaluation from a [`SurfaceMesh`] snapshot and discarded
/// when the evaluation completes. Faces whose indices fall outside the
/// snapshot's position array are dropped during the build; degenerate
/// (zero-area) triangles are kept but can never report hits.
///
/// Construction is infallible: an empty snapshot yields an empty surface
/// that every ray misses. Callers that require a projectable surface check
/// [`CollisionSurface::is_empty`].
///
/// # Example
///
/// ```
/// use deform_raycast::CollisionSurface;
/// use deform_types::{Point3, SurfaceMesh, Vector3};
///
/// let mesh = SurfaceMesh::from_parts(
///     vec![
///         Point3::new(-1.0, -1.0, 0.0),
///         Point3::new(2.0, -1.0, 0.0),
///         Point3::new(0.0, 2.0, 0.0),
///     ],
///     vec![[0, 1, 2]],
/// );
/// let surface = CollisionSurface::build(&mesh);
///
/// assert!(!surface.is_empty());
/// assert_eq!(surface.triangle_count(), 1);
/// ```
#[derive(Debug)]
pub struct CollisionSurface {
    triangles: Vec<Triangle>,
    bvh: Bvh,
}

impl CollisionSurface {
    /// Build a collision surface from a mesh snapshot.
    #[must_use]
    pub fn build(mesh: &SurfaceMesh) -> Self {
        let triangles: Vec<Triangle> = mesh.triangles().collect();
        let bvh = Bvh::build(&triangles, RAY_EPSILON);
        Self { triangles, bvh }
    }

    /// Number of resolved triangles.
    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Whether the surface has no triangles.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Bounding box of the surface.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        let mut aabb = Aabb::empty();
        for tri in &self.triangles {
            aabb.expand_to_include_box(&tri.bounds());
        }
        aabb
    }

    /// Cast a ray and return the closest hit in the positive direction.
    ///
    /// Of all intersections with `t > epsilon`, the nearest is returned.
    /// The hit normal is the triangle's CCW geometric normal; it is not
    /// flipped toward the ray origin. Returns `None` when the ray misses
    /// every triangle, which is an expected outcome rather than an error.
    ///
    /// `direction` should be normalized for [`RayHit::distance`] to be a
    /// metric distance.
    #[must_use]
    pub fn cast_ray(&self, origin: &Point3<f64>, direction: &Vector3<f64>) -> Option<RayHit> {
        let (distance, face) =
            self.bvh
                .closest_hit(&self.triangles, origin, direction, RAY_EPSILON)?;

        // A zero-area triangle cannot produce a Möller–Trumbore hit, so the
        // normal is always available here; guard anyway rather than unwrap.
        let normal = self.triangles[face].normal()?;

        Some(RayHit {
            distance,
            position: origin + direction * distance,
            normal,
            face,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn unit_square_mesh() -> SurfaceMesh {
        SurfaceMesh::from_parts(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2], [0, 2, 3]],
        )
    }

    #[test]
    fn build_empty_surface() {
        let surface = CollisionSurface::build(&SurfaceMesh::new());
        assert!(surface.is_empty());
        assert!(surface
            .cast_ray(&Point3::new(0.0, 0.0, 1.0), &Vector3::new(0.0, 0.0, -1.0))
            .is_none());
    }

    #[test]
    fn closest_hit_position_and_normal() {
        let surface = CollisionSurface::build(&unit_square_mesh());

        let hit = surface
            .cast_ray(&Point3::new(0.5, 0.25, 2.0), &Vector3::new(0.0, 0.0, -1.0))
            .unwrap();

        assert!((hit.distance - 2.0).abs() < 1e-10);
        assert!((hit.position.z - 0.0).abs() < 1e-10);
        assert!((hit.normal.z - 1.0).abs() < 1e-10);
    }

    #[test]
    fn miss_is_none() {
        let surface = CollisionSurface::build(&unit_square_mesh());
        let hit = surface.cast_ray(&Point3::new(0.5, 0.5, 2.0), &Vector3::new(0.0, 0.0, 1.0));
        assert!(hit.is_none());
    }

    #[test]
    fn invalid_faces_are_dropped() {
        let mesh = SurfaceMesh::from_parts(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.5, 1.0, 0.0),
            ],
            vec![[0, 1, 2], [0, 1, 9]],
        );
        let surface = CollisionSurface::build(&mesh);
        assert_eq!(surface.triangle_count(), 1);
    }

    #[test]
    fn surface_bounds() {
        let surface = CollisionSurface::build(&unit_square_mesh());
        let bounds = surface.bounds();
        assert!((bounds.min.x - 0.0).abs() < 1e-8);
        assert!((bounds.max.y - 1.0).abs() < 1e-8);
    }
}
