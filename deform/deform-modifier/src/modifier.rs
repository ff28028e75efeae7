//! Stateful projector modifier.
//!
//! [`ProjectorModifier`] is the piece a scene-evaluation host holds on to
//! between evaluations: the user-facing configuration plus the persisted
//! dirty signal. Everything per-evaluation (the collision surface, the
//! parameter bundle) is built inside [`ProjectorModifier::evaluate`] and
//! dropped when it returns.

use crate::DirtyTracker;
use deform_project::{
    project, FalloffField, ProjectionMode, ProjectionOutput, ProjectionParams, ProjectionResult,
};
use deform_raycast::CollisionSurface;
use deform_types::{Isometry3, Point3, SurfaceMesh};
use tracing::debug;

/// User-facing projector configuration.
///
/// Mirrors the modifier's parameter panel: mode, offset, blend, and the
/// geometric-falloff toggle with its distance. The distance is kept even
/// while the toggle is off, the way a panel remembers a grayed-out value.
///
/// # Example
///
/// ```
/// use deform_modifier::ProjectorConfig;
/// use deform_project::ProjectionMode;
///
/// let config = ProjectorConfig::default();
/// assert_eq!(config.mode, ProjectionMode::Parallel);
/// assert!((config.blend - 1.0).abs() < f64::EPSILON);
/// assert!(!config.geometry_falloff_enabled);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectorConfig {
    /// Ray formation mode.
    pub mode: ProjectionMode,
    /// Offset along the hit normal.
    pub offset: f64,
    /// Blend factor in `[0, 1]`.
    pub blend: f64,
    /// Whether distance-based attenuation is active.
    pub geometry_falloff_enabled: bool,
    /// Linear falloff radius used when the toggle is on.
    pub geometry_falloff_distance: f64,
}

impl Default for ProjectorConfig {
    fn default() -> Self {
        Self {
            mode: ProjectionMode::Parallel,
            offset: 0.0,
            blend: 1.0,
            geometry_falloff_enabled: false,
            geometry_falloff_distance: 150.0,
        }
    }
}

impl ProjectorConfig {
    /// Set the ray formation mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: ProjectionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the offset along the hit normal.
    #[must_use]
    pub const fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Set the blend factor.
    #[must_use]
    pub const fn with_blend(mut self, blend: f64) -> Self {
        self.blend = blend;
        self
    }

    /// Enable geometric falloff with the given radius.
    #[must_use]
    pub const fn with_geometry_falloff(mut self, distance: f64) -> Self {
        self.geometry_falloff_enabled = true;
        self.geometry_falloff_distance = distance;
        self
    }

    /// Whether the falloff-distance control currently has any effect.
    ///
    /// A UI grays the distance out when the toggle is off.
    #[must_use]
    pub const fn falloff_distance_active(&self) -> bool {
        self.geometry_falloff_enabled
    }

    /// Assemble per-evaluation parameters from this configuration.
    ///
    /// `transform` is the projector's current placement; `falloff` is the
    /// external field capability when the environment provides one.
    #[must_use]
    pub fn params<'a>(
        &self,
        transform: Isometry3<f64>,
        falloff: Option<&'a dyn FalloffField>,
    ) -> ProjectionParams<'a> {
        let mut params = ProjectionParams::new(transform)
            .with_mode(self.mode)
            .with_offset(self.offset)
            .with_blend(self.blend);
        if self.geometry_falloff_enabled {
            params = params.with_geometry_falloff(self.geometry_falloff_distance);
        }
        if let Some(field) = falloff {
            params = params.with_falloff_field(field);
        }
        params
    }
}

/// A projector modifier: configuration plus persisted dirty state.
///
/// Cloning a modifier duplicates both, so a duplicated scene object starts
/// from the same change-detection baseline as its source.
///
/// # Example
///
/// ```
/// use deform_modifier::{ProjectorConfig, ProjectorModifier};
/// use deform_types::{Isometry3, Point3, SurfaceMesh};
///
/// let mesh = SurfaceMesh::from_parts(
///     vec![
///         Point3::new(-10.0, -10.0, 0.0),
///         Point3::new(10.0, -10.0, 0.0),
///         Point3::new(0.0, 10.0, 0.0),
///     ],
///     vec![[0, 1, 2]],
/// );
///
/// let mut modifier = ProjectorModifier::default();
///
/// // Dependency-graph validation pass
/// if modifier.needs_update(&[1], &[0]) {
///     // Evaluation pass: project a point down onto the triangle
///     let mut points = vec![Point3::new(0.0, 0.0, -4.0)];
///     let output = modifier
///         .evaluate(&mesh, &mut points, Isometry3::identity(), None)
///         .unwrap();
///     assert!(output.any_moved());
/// }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProjectorModifier {
    config: ProjectorConfig,
    tracker: DirtyTracker,
}

impl ProjectorModifier {
    /// Create a modifier with the given configuration and a fresh dirty
    /// state.
    #[must_use]
    pub fn new(config: ProjectorConfig) -> Self {
        Self {
            config,
            tracker: DirtyTracker::new(),
        }
    }

    /// The current configuration.
    #[must_use]
    pub const fn config(&self) -> &ProjectorConfig {
        &self.config
    }

    /// Mutable access to the configuration.
    pub fn config_mut(&mut self) -> &mut ProjectorConfig {
        &mut self.config
    }

    /// Decide whether cached results are stale.
    ///
    /// Called during dependency-graph validation with the version chains of
    /// the linked collision object and of the modifier itself. Updates the
    /// persisted signal; see [`DirtyTracker::check`].
    pub fn needs_update(&mut self, linked_chain: &[u32], modifier_chain: &[u32]) -> bool {
        self.tracker.check(linked_chain, modifier_chain)
    }

    /// Run one projection evaluation.
    ///
    /// Builds a fresh collision surface from `snapshot`, assembles
    /// parameters from the stored configuration, and projects `points` in
    /// place. When the returned output reports
    /// [`any_moved`](ProjectionOutput::any_moved), the caller should notify
    /// its downstream consumers that point data changed.
    ///
    /// # Errors
    ///
    /// Propagates [`deform_project::ProjectionError`] for structural
    /// failures; `points` is untouched in that case.
    pub fn evaluate(
        &self,
        snapshot: &SurfaceMesh,
        points: &mut [Point3<f64>],
        transform: Isometry3<f64>,
        falloff: Option<&dyn FalloffField>,
    ) -> ProjectionResult<ProjectionOutput> {
        debug!(
            faces = snapshot.face_count(),
            points = points.len(),
            falloff = falloff.is_some(),
            "evaluating projector modifier"
        );

        let surface = CollisionSurface::build(snapshot);
        let params = self.config.params(transform, falloff);
        project(&surface, points, &params)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use deform_project::{ProjectionError, SphereFalloff};

    fn plane_snapshot() -> SurfaceMesh {
        SurfaceMesh::from_parts(
            vec![
                Point3::new(-5.0, -5.0, 0.0),
                Point3::new(5.0, -5.0, 0.0),
                Point3::new(5.0, 5.0, 0.0),
                Point3::new(-5.0, 5.0, 0.0),
            ],
            vec![[0, 1, 2], [0, 2, 3]],
        )
    }

    #[test]
    fn default_config_matches_panel_defaults() {
        let config = ProjectorConfig::default();
        assert_eq!(config.mode, ProjectionMode::Parallel);
        assert!((config.offset - 0.0).abs() < f64::EPSILON);
        assert!((config.blend - 1.0).abs() < f64::EPSILON);
        assert!(!config.geometry_falloff_enabled);
        assert!((config.geometry_falloff_distance - 150.0).abs() < f64::EPSILON);
    }

    #[test]
    fn falloff_distance_gating() {
        let config = ProjectorConfig::default();
        assert!(!config.falloff_distance_active());

        let config = config.with_geometry_falloff(80.0);
        assert!(config.falloff_distance_active());
        assert!((config.geometry_falloff_distance - 80.0).abs() < f64::EPSILON);
    }

    #[test]
    fn params_reflect_config() {
        let field = SphereFalloff::new(Point3::origin(), 10.0);
        let config = ProjectorConfig::default()
            .with_mode(ProjectionMode::Radial)
            .with_offset(2.0)
            .with_blend(0.5)
            .with_geometry_falloff(40.0);

        let params = config.params(Isometry3::identity(), Some(&field));
        assert_eq!(params.mode, ProjectionMode::Radial);
        assert!((params.offset - 2.0).abs() < f64::EPSILON);
        assert!((params.blend - 0.5).abs() < f64::EPSILON);
        assert_eq!(params.geometry_falloff, Some(40.0));
        assert!(params.falloff.is_some());
    }

    #[test]
    fn disabled_falloff_is_absent_from_params() {
        let config = ProjectorConfig::default();
        let params = config.params(Isometry3::identity(), None);
        assert!(params.geometry_falloff.is_none());
        assert!(params.falloff.is_none());
    }

    #[test]
    fn evaluate_projects_points() {
        let modifier = ProjectorModifier::default();
        let mut points = vec![Point3::new(1.0, 1.0, -3.0)];

        let output = modifier
            .evaluate(&plane_snapshot(), &mut points, Isometry3::identity(), None)
            .unwrap();

        assert_eq!(output.points_projected, 1);
        assert_relative_eq!(points[0].z, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn evaluate_rejects_empty_snapshot() {
        let modifier = ProjectorModifier::default();
        let mut points = vec![Point3::new(0.0, 0.0, 1.0)];
        let before = points.clone();

        let result =
            modifier.evaluate(&SurfaceMesh::new(), &mut points, Isometry3::identity(), None);
        assert!(matches!(result, Err(ProjectionError::EmptySurface)));
        assert_eq!(points, before);
    }

    #[test]
    fn clone_carries_dirty_state() {
        let mut modifier = ProjectorModifier::default();
        assert!(modifier.needs_update(&[3], &[1]));
        assert!(!modifier.needs_update(&[3], &[2]));

        // A duplicate starts from the same baseline: an unchanged scene
        // reads clean for it too
        let mut duplicate = modifier;
        assert!(!duplicate.needs_update(&[3], &[2]));
    }

    #[test]
    fn config_mut_changes_behavior() {
        let mut modifier = ProjectorModifier::default();
        modifier.config_mut().blend = 0.0;

        let mut points = vec![Point3::new(1.0, 1.0, -3.0)];
        let output = modifier
            .evaluate(&plane_snapshot(), &mut points, Isometry3::identity(), None)
            .unwrap();

        assert!(!output.any_moved());
        assert_eq!(points[0], Point3::new(1.0, 1.0, -3.0));
    }
}
