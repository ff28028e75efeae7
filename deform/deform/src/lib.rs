//! Point projection onto collision surfaces.
//!
//! This umbrella crate re-exports the deform-* crates, providing a unified
//! API for projecting the points of one object onto the surface of another:
//! along parallel rays or radially from a center, with an offset along the
//! hit normal, distance blending, optional falloff attenuation, and the
//! dirty-signal tracking a host needs to decide when to re-evaluate.
//!
//! # Quick Start
//!
//! ```
//! use deform::prelude::*;
//!
//! // Target surface: one triangle in the z=0 plane
//! let mesh = SurfaceMesh::from_parts(
//!     vec![
//!         Point3::new(-10.0, -10.0, 0.0),
//!         Point3::new(10.0, -10.0, 0.0),
//!         Point3::new(0.0, 10.0, 0.0),
//!     ],
//!     vec![[0, 1, 2]],
//! );
//!
//! // Project a point cloud down onto it
//! let surface = CollisionSurface::build(&mesh);
//! let params = ProjectionParams::new(Isometry3::identity());
//! let mut points = vec![Point3::new(0.0, 0.0, -5.0), Point3::new(1.0, 0.0, -2.0)];
//!
//! let output = project(&surface, &mut points, &params).unwrap();
//! assert_eq!(output.points_projected, 2);
//! ```
//!
//! # Module Organization
//!
//! - [`types`] - Core data structures: `SurfaceMesh`, `Triangle`, `Aabb`
//! - [`raycast`] - Collision surfaces and closest-hit ray casting
//! - [`project`] - The projection engine: parameters, falloff, metrics,
//!   guide geometry
//! - [`modifier`] - Dirty-signal tracking and modifier state
//!
//! # Feature Flags
//!
//! - `serde` - Serialization derives on the core types

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

// =============================================================================
// Re-exports
// =============================================================================

/// Core data structures: `SurfaceMesh`, `Triangle`, `Aabb`.
pub use deform_types as types;

/// Collision surfaces and closest-hit ray casting.
pub use deform_raycast as raycast;

/// The projection engine: parameters, falloff, metrics, guide geometry.
pub use deform_project as project;

/// Dirty-signal tracking and modifier state.
pub use deform_modifier as modifier;

// =============================================================================
// Prelude
// =============================================================================

/// Common imports for surface projection.
///
/// # Usage
///
/// ```
/// use deform::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use deform_types::{Aabb, Isometry3, Point3, SurfaceMesh, Triangle, Vector3};

    // Collision surface
    pub use deform_raycast::{CollisionSurface, RayHit};

    // Engine
    pub use deform_project::{
        project, FalloffField, ProjectionMode, ProjectionOutput, ProjectionParams, SphereFalloff,
    };

    // Modifier state
    pub use deform_modifier::{DirtyTracker, ProjectorConfig, ProjectorModifier};
}

// =============================================================================
// Tests
// =============================================================================
