//! Falloff-field capability.

use nalgebra::Point3;

/// An external capability mapping a spatial position to an attenuation
/// scalar.
///
/// Implementations are supplied by the environment (for example a
/// motion-graphics effector system) and queried only when present; the
/// engine composes the sampled value multiplicatively with its own
/// geometric attenuation.
///
/// # Contract
///
/// `strength` must return a value in `[0, 1]`: `1.0` for full projection
/// strength, `0.0` to suppress the projection entirely at that position.
/// Fields are sampled from parallel point loops, hence the `Sync` bound.
pub trait FalloffField: Sync {
    /// Sample the field at a position.
    fn strength(&self, position: &Point3<f64>) -> f64;
}

/// A spherical falloff field with a linear ramp.
///
/// Full strength inside the inner region, zero at and beyond the radius,
/// linearly interpolated in between. The size of the full-strength core is
/// controlled by `ramp_start` as a fraction of the radius.
///
/// # Example
///
/// ```
/// use deform_project::{FalloffField, SphereFalloff};
/// use deform_types::Point3;
///
/// let field = SphereFalloff::new(Point3::origin(), 10.0);
///
/// assert!((field.strength(&Point3::new(0.0, 0.0, 0.0)) - 1.0).abs() < 1e-12);
/// assert!((field.strength(&Point3::new(20.0, 0.0, 0.0)) - 0.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereFalloff {
    /// Center of the field.
    pub center: Point3<f64>,
    /// Radius beyond which the field contributes nothing.
    pub radius: f64,
    /// Fraction of the radius at which the ramp begins, in `[0, 1]`.
    /// `0.0` ramps from the center outward; `1.0` makes a hard sphere.
    pub ramp_start: f64,
}

impl SphereFalloff {
    /// Create a field that ramps linearly from the center to `radius`.
    #[must_use]
    pub const fn new(center: Point3<f64>, radius: f64) -> Self {
        Self {
            center,
            radius,
            ramp_start: 0.0,
        }
    }

    /// Set where the ramp begins, as a fraction of the radius.
    #[must_use]
    pub const fn with_ramp_start(mut self, ramp_start: f64) -> Self {
        self.ramp_start = ramp_start;
        self
    }
}

impl FalloffField for SphereFalloff {
    fn strength(&self, position: &Point3<f64>) -> f64 {
        if self.radius <= 0.0 {
            return 0.0;
        }

        let distance = (position - self.center).norm();
        if distance >= self.radius {
            return 0.0;
        }

        let inner = self.radius * self.ramp_start.clamp(0.0, 1.0);
        if distance <= inner {
            return 1.0;
        }

        let span = self.radius - inner;
        if span <= f64::EPSILON {
            return 1.0;
        }

        (1.0 - (distance - inner) / span).clamp(0.0, 1.0)
    }
}
