//! Projection parameters and configuration.
//!
//! This module provides the [`ProjectionParams`] struct for configuring one
//! projection evaluation.

use crate::FalloffField;
use nalgebra::Isometry3;

/// How projection rays are formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum ProjectionMode {
    /// All points are projected along one fixed direction: the projector
    /// transform's local +Z axis.
    #[default]
    Parallel,

    /// Each point is projected along the direction from the projector
    /// transform's origin through that point.
    Radial,
}

/// Parameters for one projection evaluation.
///
/// An immutable value bundle assembled fresh per evaluation and dropped with
/// it. Use the builder methods to configure the operation.
///
/// # Examples
///
/// ```
/// use deform_project::{ProjectionMode, ProjectionParams};
/// use deform_types::Isometry3;
///
/// let params = ProjectionParams::new(Isometry3::identity())
///     .with_mode(ProjectionMode::Radial)
///     .with_offset(2.0)
///     .with_blend(0.5);
///
/// assert_eq!(params.mode, ProjectionMode::Radial);
/// ```
///
/// With a geometric falloff radius and an external falloff field:
///
/// ```
/// use deform_project::{ProjectionParams, SphereFalloff};
/// use deform_types::{Isometry3, Point3};
///
/// let field = SphereFalloff::new(Point3::origin(), 10.0);
/// let params = ProjectionParams::new(Isometry3::identity())
///     .with_geometry_falloff(150.0)
///     .with_falloff_field(&field);
///
/// assert!(params.falloff.is_some());
/// ```
#[derive(Clone, Copy)]
pub struct ProjectionParams<'a> {
    /// The projector's placement in the common space. Its local +Z axis is
    /// the parallel direction; its translation is the radial origin.
    pub transform: Isometry3<f64>,
    /// Ray formation mode.
    pub mode: ProjectionMode,
    /// Linear offset applied along the hit triangle's surface normal.
    pub offset: f64,
    /// Blend factor between the original and the projected position.
    ///
    /// Expected in `[0, 1]` but accepted outside the range; `0.0` leaves
    /// positions unchanged and `1.0` yields the fully projected position.
    pub blend: f64,
    /// Linear falloff radius for distance-based attenuation, or `None` when
    /// geometric falloff is disabled.
    pub geometry_falloff: Option<f64>,
    /// Optional external falloff-field capability, absent when the falloff
    /// subsystem is unavailable.
    pub falloff: Option<&'a dyn FalloffField>,
}

impl std::fmt::Debug for ProjectionParams<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectionParams")
            .field("transform", &self.transform)
            .field("mode", &self.mode)
            .field("offset", &self.offset)
            .field("blend", &self.blend)
            .field("geometry_falloff", &self.geometry_falloff)
            .field("falloff", &self.falloff.map(|_| "dyn FalloffField"))
            .finish()
    }
}

impl<'a> ProjectionParams<'a> {
    /// Creates parameters with the given projector transform and defaults
    /// for everything else: parallel mode, no offset, full blend, no
    /// falloff of either kind.
    #[must_use]
    pub fn new(transform: Isometry3<f64>) -> Self {
        Self {
            transform,
            mode: ProjectionMode::Parallel,
            offset: 0.0,
            blend: 1.0,
            geometry_falloff: None,
            falloff: None,
        }
    }

    /// Sets the ray formation mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: ProjectionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the offset along the hit normal.
    #[must_use]
    pub const fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Sets the blend factor.
    #[must_use]
    pub const fn with_blend(mut self, blend: f64) -> Self {
        self.blend = blend;
        self
    }

    /// Enables geometric falloff with the given linear radius.
    #[must_use]
    pub const fn with_geometry_falloff(mut self, distance: f64) -> Self {
        self.geometry_falloff = Some(distance);
        self
    }

    /// Disables geometric falloff.
    #[must_use]
    pub const fn without_geometry_falloff(mut self) -> Self {
        self.geometry_falloff = None;
        self
    }

    /// Attaches an external falloff field.
    #[must_use]
    pub fn with_falloff_field(mut self, field: &'a dyn FalloffField) -> Self {
        self.falloff = Some(field);
        self
    }
}
