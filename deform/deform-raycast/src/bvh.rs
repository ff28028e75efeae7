//! Bounding volume hierarchy for ray queries.
//!
//! Median split along the longest axis, one triangle per leaf, leaf boxes
//! padded by epsilon for numerical robustness.

use deform_types::{Aabb, Triangle};
use nalgebra::{Point3, Vector3};

/// Ray/AABB slab intersection test.
///
/// `dir_inv` holds per-axis reciprocals of the ray direction, with near-zero
/// components mapped to `f64::MAX` by the caller.
fn ray_box_intersect(aabb: &Aabb, origin: &Point3<f64>, dir_inv: &Vector3<f64>) -> Option<f64> {
    let t1 = (aabb.min.x - origin.x) * dir_inv.x;
    let t2 = (aabb.max.x - origin.x) * dir_inv.x;
    let t3 = (aabb.min.y - origin.y) * dir_inv.y;
    let t4 = (aabb.max.y - origin.y) * dir_inv.y;
    let t5 = (aabb.min.z - origin.z) * dir_inv.z;
    let t6 = (aabb.max.z - origin.z) * dir_inv.z;

    let t_min = t1.min(t2).max(t3.min(t4)).max(t5.min(t6));
    let t_max = t1.max(t2).min(t3.max(t4)).min(t5.max(t6));

    if t_max >= t_min && t_max >= 0.0 {
        Some(t_min.max(0.0))
    } else {
        None
    }
}

/// Precompute the reciprocal direction used by the slab test.
pub(crate) fn direction_inverse(direction: &Vector3<f64>, epsilon: f64) -> Vector3<f64> {
    Vector3::new(
        if direction.x.abs() > epsilon {
            1.0 / direction.x
        } else {
            f64::MAX
        },
        if direction.y.abs() > epsilon {
            1.0 / direction.y
        } else {
            f64::MAX
        },
        if direction.z.abs() > epsilon {
            1.0 / direction.z
        } else {
            f64::MAX
        },
    )
}

#[derive(Debug)]
enum BvhNode {
    Leaf {
        aabb: Aabb,
        face: usize,
    },
    Internal {
        aabb: Aabb,
        left: Box<BvhNode>,
        right: Box<BvhNode>,
    },
}

impl BvhNode {
    fn build(triangles: &[Triangle], indices: &mut [usize], epsilon: f64) -> Option<Self> {
        if indices.is_empty() {
            return None;
        }

        if indices.len() == 1 {
            let face = indices[0];
            return Some(Self::Leaf {
                aabb: triangles[face].bounds().padded(epsilon),
                face,
            });
        }

        let mut combined = Aabb::empty();
        for &idx in indices.iter() {
            combined.expand_to_include_box(&triangles[idx].bounds());
        }
        let combined = combined.padded(epsilon);

        // Sort by centroid along the longest axis, split at the median
        let axis = combined.longest_axis();
        indices.sort_by(|&a, &b| {
            let ca = triangles[a].centroid();
            let cb = triangles[b].centroid();
            let (va, vb) = match axis {
                0 => (ca.x, cb.x),
                1 => (ca.y, cb.y),
                _ => (ca.z, cb.z),
            };
            va.partial_cmp(&vb).unwrap_or(std::cmp::Ordering::Equal)
        });

        let mid = indices.len() / 2;
        let (left_indices, right_indices) = indices.split_at_mut(mid);

        let left = Self::build(triangles, left_indices, epsilon);
        let right = Self::build(triangles, right_indices, epsilon);

        match (left, right) {
            (Some(l), Some(r)) => Some(Self::Internal {
                aabb: combined,
                left: Box::new(l),
                right: Box::new(r),
            }),
            (Some(node), None) | (None, Some(node)) => Some(node),
            (None, None) => None,
        }
    }

    const fn aabb(&self) -> &Aabb {
        match self {
            Self::Leaf { aabb, .. } | Self::Internal { aabb, .. } => aabb,
        }
    }
}

/// Acceleration structure over a triangle list.
#[derive(Debug)]
pub(crate) struct Bvh {
    root: Option<BvhNode>,
}

impl Bvh {
    /// Build a BVH over `triangles`. An empty slice yields an empty tree
    /// that every query misses.
    pub(crate) fn build(triangles: &[Triangle], epsilon: f64) -> Self {
        let mut indices: Vec<usize> = (0..triangles.len()).collect();
        Self {
            root: BvhNode::build(triangles, &mut indices, epsilon),
        }
    }

    /// Find the closest intersection along a ray, if any.
    ///
    /// Returns `(t, face_index)` for the nearest hit with `t > epsilon`.
    pub(crate) fn closest_hit(
        &self,
        triangles: &[Triangle],
        origin: &Point3<f64>,
        direction: &Vector3<f64>,
        epsilon: f64,
    ) -> Option<(f64, usize)> {
        let root = self.root.as_ref()?;
        let dir_inv = direction_inverse(direction, epsilon);
        trace_closest(root, triangles, origin, direction, &dir_inv, f64::MAX, epsilon)
    }
}

fn trace_closest(
    node: &BvhNode,
    triangles: &[Triangle],
    origin: &Point3<f64>,
    direction: &Vector3<f64>,
    dir_inv: &Vector3<f64>,
    max_dist: f64,
    epsilon: f64,
) -> Option<(f64, usize)> {
    match ray_box_intersect(node.aabb(), origin, dir_inv) {
        Some(t_near) if t_near <= max_dist => {}
        _ => return None,
    }

    match node {
        BvhNode::Leaf { face, .. } => {
            crate::ray::ray_triangle_intersect(origin, direction, &triangles[*face], epsilon)
                .filter(|&t| t <= max_dist)
                .map(|t| (t, *face))
        }
        BvhNode::Internal { left, right, .. } => {
            let hit_left =
                trace_closest(left, triangles, origin, direction, dir_inv, max_dist, epsilon);
            // A left hit tightens the search distance for the right subtree
            let max_dist_right = hit_left.map_or(max_dist, |(t, _)| t);
            let hit_right = trace_closest(
                right,
                triangles,
                origin,
                direction,
                dir_inv,
                max_dist_right,
                epsilon,
            );

            match (hit_left, hit_right) {
                (Some((t1, f1)), Some((t2, f2))) => {
                    if t1 <= t2 {
                        Some((t1, f1))
                    } else {
                        Some((t2, f2))
                    }
                }
                (Some(hit), None) | (None, Some(hit)) => Some(hit),
                (None, None) => None,
            }
        }
    }
}
