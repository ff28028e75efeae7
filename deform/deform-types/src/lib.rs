//! Core geometry types for the deform crates.
//!
//! This crate provides the foundational types for surface projection:
//!
//! - [`SurfaceMesh`] - An immutable triangle-mesh snapshot used as a
//!   projection target
//! - [`Triangle`] - A concrete triangle with vertex positions
//! - [`Aabb`] - Axis-aligned bounding box
//!
//! # Units
//!
//! This library is **unit-agnostic**. All coordinates are `f64`.
//!
//! # Coordinate System
//!
//! Uses a **right-handed coordinate system**. Face winding is
//! **counter-clockwise (CCW) when viewed from outside**, so normals point
//! outward by the right-hand rule.
//!
//! Input points, surface snapshots, and projector transforms are all
//! expressed in one common space; placing a projector is a matter of the
//! transform handed to the engine, not of per-type coordinate frames.
//!
//! # Example
//!
//! ```
//! use deform_types::{Point3, SurfaceMesh};
//!
//! let mut mesh = SurfaceMesh::new();
//! mesh.positions.push(Point3::new(0.0, 0.0, 0.0));
//! mesh.positions.push(Point3::new(1.0, 0.0, 0.0));
//! mesh.positions.push(Point3::new(0.5, 1.0, 0.0));
//! mesh.faces.push([0, 1, 2]);
//!
//! assert_eq!(mesh.face_count(), 1);
//! assert!(!mesh.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod bounds;
mod surface;
mod triangle;

pub use bounds::Aabb;
pub use surface::SurfaceMesh;
pub use triangle::Triangle;

// Re-export nalgebra types for convenience
pub use nalgebra::{Isometry3, Point3, Vector3};
