//! Collision surface snapshots and accelerated closest-hit ray casting.
//!
//! This crate provides [`CollisionSurface`], an immutable per-evaluation
//! representation of a target mesh: the resolved triangle list plus a BVH
//! for ray queries. A surface is built once from a
//! [`SurfaceMesh`](deform_types::SurfaceMesh), queried for the duration of
//! one evaluation, and dropped.
//!
//! # Example
//!
//! ```
//! use deform_raycast::CollisionSurface;
//! use deform_types::{Point3, SurfaceMesh, Vector3};
//!
//! // A single triangle in the z=0 plane
//! let mesh = SurfaceMesh::from_parts(
//!     vec![
//!         Point3::new(-1.0, -1.0, 0.0),
//!         Point3::new(2.0, -1.0, 0.0),
//!         Point3::new(0.0, 2.0, 0.0),
//!     ],
//!     vec![[0, 1, 2]],
//! );
//!
//! let surface = CollisionSurface::build(&mesh);
//! let hit = surface
//!     .cast_ray(&Point3::new(0.0, 0.0, 5.0), &Vector3::new(0.0, 0.0, -1.0))
//!     .unwrap();
//!
//! assert!((hit.distance - 5.0).abs() < 1e-10);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod bvh;
mod ray;
mod surface;

pub use ray::{ray_triangle_intersect, RayHit};
pub use surface::CollisionSurface;
