//! Point projection onto a collision surface.
//!
//! This crate is the projection engine: given a pre-processed
//! [`CollisionSurface`](deform_raycast::CollisionSurface) and a mutable set
//! of points, [`project`] moves each point onto the surface along parallel
//! or radial rays, with an offset along the hit normal, distance blending,
//! and optional falloff attenuation.
//!
//! # Quick Start
//!
//! ```
//! use deform_project::{project, ProjectionMode, ProjectionParams};
//! use deform_raycast::CollisionSurface;
//! use deform_types::{Isometry3, Point3, SurfaceMesh, Vector3};
//!
//! // Target surface: a triangle in the z=0 plane
//! let mesh = SurfaceMesh::from_parts(
//!     vec![
//!         Point3::new(-10.0, -10.0, 0.0),
//!         Point3::new(10.0, -10.0, 0.0),
//!         Point3::new(0.0, 10.0, 0.0),
//!     ],
//!     vec![[0, 1, 2]],
//! );
//! let surface = CollisionSurface::build(&mesh);
//!
//! // Project a point cloud radially from above
//! let transform = Isometry3::translation(0.0, 0.0, 10.0);
//! let params = ProjectionParams::new(transform)
//!     .with_mode(ProjectionMode::Radial)
//!     .with_blend(1.0);
//!
//! let mut points = vec![Point3::new(0.5, 0.5, 5.0), Point3::new(-0.5, 0.0, 2.0)];
//! let output = project(&surface, &mut points, &params).unwrap();
//!
//! assert_eq!(output.points_projected, 2);
//! assert!(points.iter().all(|p| p.z.abs() < 1e-9));
//! ```
//!
//! # Per-point policy
//!
//! Only structural problems fail an evaluation (a surface with no
//! triangles). A ray that misses, or a radial point sitting exactly on the
//! projector origin, leaves that point where it was and is tallied in the
//! [`ProjectionOutput`]; partial coverage is the normal case, not an error.
//!
//! # Falloff
//!
//! Two independent attenuations compose multiplicatively:
//!
//! - **Geometric falloff**: a linear ramp over the distance the point would
//!   travel, configured with a radius on the parameters.
//! - **Falloff field**: an external [`FalloffField`] capability sampled at
//!   the point's original position, attached when the environment provides
//!   one.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod falloff;
mod guides;
mod params;
mod project;
mod result;

pub use error::{ProjectionError, ProjectionResult};
pub use falloff::{FalloffField, SphereFalloff};
pub use guides::{projection_guides, GuideLine};
pub use params::{ProjectionMode, ProjectionParams};
pub use project::project;
pub use result::ProjectionOutput;
