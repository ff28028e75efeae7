//! Guide geometry for visualizing a projector.
//!
//! Produces the line segments a host viewport would draw for a projector:
//! a ring of arrows pointing along the projection axis in parallel mode, a
//! star radiating from the origin in radial mode. Segments are expressed in
//! the projector's local space; the host applies the projector transform
//! and does the actual drawing.

use crate::ProjectionMode;
use nalgebra::Point3;

/// A single guide line segment in projector-local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuideLine {
    /// Segment start.
    pub start: Point3<f64>,
    /// Segment end.
    pub end: Point3<f64>,
}

impl GuideLine {
    const fn new(start: Point3<f64>, end: Point3<f64>) -> Self {
        Self { start, end }
    }
}

/// Overall size of the guide figure, in projector-local units.
const GUIDE_SIZE: f64 = 100.0;

/// Lateral placement of the arrows in parallel mode.
const ARROW_SPACING: f64 = 50.0;

/// Build the guide segments for a projection mode.
///
/// Parallel mode yields four arrows (five segments each: shaft plus four
/// tip barbs) arranged around the projection axis at `±x` and `±y`; radial
/// mode yields a star of three axis lines and four diagonals.
///
/// # Example
///
/// ```
/// use deform_project::{projection_guides, ProjectionMode};
///
/// let arrows = projection_guides(ProjectionMode::Parallel);
/// assert_eq!(arrows.len(), 20);
///
/// let star = projection_guides(ProjectionMode::Radial);
/// assert_eq!(star.len(), 7);
/// ```
#[must_use]
pub fn projection_guides(mode: ProjectionMode) -> Vec<GuideLine> {
    match mode {
        ProjectionMode::Parallel => {
            let mut lines = Vec::with_capacity(20);
            arrow(&mut lines, Point3::new(ARROW_SPACING, 0.0, 0.0), GUIDE_SIZE);
            arrow(&mut lines, Point3::new(-ARROW_SPACING, 0.0, 0.0), GUIDE_SIZE);
            arrow(&mut lines, Point3::new(0.0, ARROW_SPACING, 0.0), GUIDE_SIZE);
            arrow(&mut lines, Point3::new(0.0, -ARROW_SPACING, 0.0), GUIDE_SIZE);
            lines
        }
        ProjectionMode::Radial => star(GUIDE_SIZE),
    }
}

/// An arrow along +Z: shaft from `pos` plus four barbs at the tip.
fn arrow(lines: &mut Vec<GuideLine>, pos: Point3<f64>, length: f64) {
    let barb_back = length * 0.25;
    let barb_side = length * 0.125;
    let tip = Point3::new(pos.x, pos.y, pos.z + length);

    lines.push(GuideLine::new(pos, tip));
    lines.push(GuideLine::new(
        tip,
        Point3::new(tip.x + barb_side, tip.y, tip.z - barb_back),
    ));
    lines.push(GuideLine::new(
        tip,
        Point3::new(tip.x - barb_side, tip.y, tip.z - barb_back),
    ));
    lines.push(GuideLine::new(
        tip,
        Point3::new(tip.x, tip.y + barb_side, tip.z - barb_back),
    ));
    lines.push(GuideLine::new(
        tip,
        Point3::new(tip.x, tip.y - barb_side, tip.z - barb_back),
    ));
}

/// A star at the origin: one line per axis plus the four cube diagonals.
fn star(size: f64) -> Vec<GuideLine> {
    let d = size * 0.7;

    vec![
        // Axis lines
        GuideLine::new(Point3::new(0.0, -size, 0.0), Point3::new(0.0, size, 0.0)),
        GuideLine::new(Point3::new(-size, 0.0, 0.0), Point3::new(size, 0.0, 0.0)),
        GuideLine::new(Point3::new(0.0, 0.0, -size), Point3::new(0.0, 0.0, size)),
        // Diagonals
        GuideLine::new(Point3::new(-d, -d, -d), Point3::new(d, d, d)),
        GuideLine::new(Point3::new(-d, d, -d), Point3::new(d, -d, d)),
        GuideLine::new(Point3::new(-d, -d, d), Point3::new(d, d, -d)),
        GuideLine::new(Point3::new(d, -d, -d), Point3::new(-d, d, d)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parallel_guides_are_four_arrows() {
        let lines = projection_guides(ProjectionMode::Parallel);
        assert_eq!(lines.len(), 20);

        // Every shaft points along +Z from its base
        for shaft in lines.chunks(5).map(|chunk| chunk[0]) {
            assert!((shaft.end.z - shaft.start.z - GUIDE_SIZE).abs() < 1e-12);
            assert!((shaft.end.x - shaft.start.x).abs() < 1e-12);
        }
    }

    #[test]
    fn radial_guides_are_a_star() {
        let lines = projection_guides(ProjectionMode::Radial);
        assert_eq!(lines.len(), 7);

        // Axis lines are symmetric about the origin
        for line in &lines[..3] {
            assert!((line.start.coords + line.end.coords).norm() < 1e-12);
        }

        // Diagonals sit at 0.7 of the figure size
        assert!((lines[3].end.x - GUIDE_SIZE * 0.7).abs() < 1e-12);
    }

    #[test]
    fn arrows_flank_the_axis() {
        let lines = projection_guides(ProjectionMode::Parallel);
        let bases: Vec<Point3<f64>> = lines.chunks(5).map(|chunk| chunk[0].start).collect();

        assert!(bases.contains(&Point3::new(ARROW_SPACING, 0.0, 0.0)));
        assert!(bases.contains(&Point3::new(-ARROW_SPACING, 0.0, 0.0)));
        assert!(bases.contains(&Point3::new(0.0, ARROW_SPACING, 0.0)));
        assert!(bases.contains(&Point3::new(0.0, -ARROW_SPACING, 0.0)));
    }
}
