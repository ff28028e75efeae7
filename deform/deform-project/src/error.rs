//! Error types for projection operations.

use thiserror::Error;

/// Errors that can occur during point projection.
///
/// Only structural precondition failures are errors; per-point geometric
/// edge cases (a ray that misses the surface, a radial direction that
/// cannot be formed) leave the individual point untouched and are reported
/// through the output counters instead.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProjectionError {
    /// The collision surface has no triangles to project onto.
    #[error("collision surface has no triangles")]
    EmptySurface,
}

/// Result type for projection operations.
pub type ProjectionResult<T> = Result<T, ProjectionError>;
