//! Immutable triangle-mesh snapshot.

use crate::{Aabb, Triangle};
use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A triangle-mesh snapshot used as a projection target.
///
/// This is the input half of a projection evaluation: a host supplies one
/// `SurfaceMesh` per evaluation, a collision structure is built from it, and
/// both are discarded when the evaluation completes. It stores positions and
/// faces separately, with faces referencing positions by index.
///
/// # Winding Order
///
/// Faces use **counter-clockwise (CCW) winding** when viewed from outside,
/// so normals point outward by the right-hand rule.
///
/// # Example
///
/// ```
/// use deform_types::{Point3, SurfaceMesh};
///
/// let mut mesh = SurfaceMesh::new();
/// mesh.positions.push(Point3::new(0.0, 0.0, 0.0));
/// mesh.positions.push(Point3::new(1.0, 0.0, 0.0));
/// mesh.positions.push(Point3::new(0.0, 1.0, 0.0));
/// mesh.faces.push([0, 1, 2]);
///
/// assert_eq!(mesh.position_count(), 3);
/// assert_eq!(mesh.face_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SurfaceMesh {
    /// Vertex positions.
    pub positions: Vec<Point3<f64>>,

    /// Triangle faces as indices into the position array.
    /// Each face is `[v0, v1, v2]` with counter-clockwise winding.
    pub faces: Vec<[u32; 3]>,
}

impl SurfaceMesh {
    /// Create a new empty snapshot.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            positions: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a snapshot from positions and faces.
    ///
    /// # Example
    ///
    /// ```
    /// use deform_types::{Point3, SurfaceMesh};
    ///
    /// let positions = vec![
    ///     Point3::new(0.0, 0.0, 0.0),
    ///     Point3::new(1.0, 0.0, 0.0),
    ///     Point3::new(0.0, 1.0, 0.0),
    /// ];
    /// let mesh = SurfaceMesh::from_parts(positions, vec![[0, 1, 2]]);
    /// assert_eq!(mesh.face_count(), 1);
    /// ```
    #[inline]
    #[must_use]
    pub const fn from_parts(positions: Vec<Point3<f64>>, faces: Vec<[u32; 3]>) -> Self {
        Self { positions, faces }
    }

    /// Create a snapshot from raw coordinate and index data.
    ///
    /// # Arguments
    ///
    /// * `coords` - Flat array of positions `[x0, y0, z0, x1, y1, z1, ...]`
    /// * `indices` - Flat array of face indices `[v0a, v1a, v2a, v0b, ...]`
    ///
    /// Returns an empty snapshot if either array's length is not divisible
    /// by 3.
    ///
    /// # Example
    ///
    /// ```
    /// use deform_types::SurfaceMesh;
    ///
    /// let coords = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
    /// let mesh = SurfaceMesh::from_raw(&coords, &[0, 1, 2]);
    /// assert_eq!(mesh.position_count(), 3);
    /// ```
    #[must_use]
    pub fn from_raw(coords: &[f64], indices: &[u32]) -> Self {
        if coords.len() % 3 != 0 || indices.len() % 3 != 0 {
            return Self::new();
        }

        let positions = coords
            .chunks_exact(3)
            .map(|c| Point3::new(c[0], c[1], c[2]))
            .collect();

        let faces = indices.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect();

        Self { positions, faces }
    }

    /// Number of vertex positions.
    #[inline]
    #[must_use]
    pub fn position_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangle faces.
    #[inline]
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Whether the snapshot carries no projectable surface.
    ///
    /// A snapshot with positions but no faces is still empty for projection
    /// purposes: there is nothing a ray could hit.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Resolve a face into a concrete [`Triangle`].
    ///
    /// Returns `None` when `face_index` is out of range or the face
    /// references a missing position.
    #[must_use]
    pub fn triangle(&self, face_index: usize) -> Option<Triangle> {
        let &[i0, i1, i2] = self.faces.get(face_index)?;
        Some(Triangle {
            v0: *self.positions.get(i0 as usize)?,
            v1: *self.positions.get(i1 as usize)?,
            v2: *self.positions.get(i2 as usize)?,
        })
    }

    /// Iterate over all faces as concrete triangles.
    ///
    /// Faces with out-of-range indices are skipped.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        (0..self.faces.len()).filter_map(|i| self.triangle(i))
    }

    /// Bounding box of all positions.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(self.positions.iter())
    }
}
