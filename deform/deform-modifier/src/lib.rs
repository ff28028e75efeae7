//! Dirty-signal tracking and modifier state for projection re-evaluation.
//!
//! Two pieces live here:
//!
//! - [`check_dirty`] / [`DirtyTracker`] - change detection over the version
//!   chains of a linked object and a modifier, deciding when cached
//!   projection results are stale
//! - [`ProjectorConfig`] / [`ProjectorModifier`] - the state a
//!   scene-evaluation host keeps between evaluations, and the glue that
//!   turns a mesh snapshot plus configuration into one projection call
//!
//! # Example
//!
//! ```
//! use deform_modifier::ProjectorModifier;
//! use deform_types::{Isometry3, Point3, SurfaceMesh};
//!
//! let mesh = SurfaceMesh::from_parts(
//!     vec![
//!         Point3::new(-10.0, -10.0, 0.0),
//!         Point3::new(10.0, -10.0, 0.0),
//!         Point3::new(0.0, 10.0, 0.0),
//!     ],
//!     vec![[0, 1, 2]],
//! );
//!
//! let mut modifier = ProjectorModifier::default();
//!
//! // Validation pass: anything changed since last time?
//! if modifier.needs_update(&[1, 4], &[2]) {
//!     // Evaluation pass: re-project the deformed object's points
//!     let mut points = vec![Point3::new(0.0, 0.0, -2.0)];
//!     let output = modifier
//!         .evaluate(&mesh, &mut points, Isometry3::identity(), None)
//!         .unwrap();
//!     assert!(output.any_moved());
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod dirty;
mod modifier;

pub use dirty::{chain_signal, check_dirty, DirtySignal, DirtyTracker};
pub use modifier::{ProjectorConfig, ProjectorModifier};
