//! # Voxel Raycasting
//!
//! Grid traversal (Amanatides & Woo) that walks a ray cell by cell through the
//! world and reports the first solid cell it enters.
//!
//! Each axis tracks `t_max`, the ray distance at which the next cell boundary on
//! that axis is crossed, and `t_delta`, the distance between two such crossings.
//! Every iteration steps along the axis with the smallest `t_max`. On exactly
//! equal values the axis order is X, then Z, then Y.

use cgmath::{InnerSpace, Point3, Vector3};

use super::coords::world_block_from_position;
use super::world::VoxelQuery;

/// The first solid cell along a ray.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RayHit {
    /// The solid cell that was hit.
    pub block: Point3<i32>,
    /// The last empty cell before `block`, where a new block would be placed.
    ///
    /// Equal to `block` when the ray starts inside a solid cell.
    pub previous: Point3<i32>,
    /// Outward normal of the face of `block` the ray entered through.
    ///
    /// Zero when the ray starts inside a solid cell.
    pub normal: Vector3<i32>,
}

/// Casts a ray through the voxel grid.
///
/// # Arguments
/// * `world` - Cells to test for solidity
/// * `origin` - Ray start in world units
/// * `direction` - Ray direction; normalized internally, need not be unit length
/// * `max_distance` - Travel distance after which the ray gives up
///
/// # Returns
/// The first solid cell hit, or `None` if the direction is zero or not finite, the
/// distance is not a finite non-negative number, or nothing solid lies within
/// `max_distance`.
pub fn raycast_voxels<Q: VoxelQuery + ?Sized>(
    world: &Q,
    origin: Point3<f32>,
    direction: Vector3<f32>,
    max_distance: f32,
) -> Option<RayHit> {
    if !max_distance.is_finite() || max_distance < 0.0 {
        return None;
    }
    // Scale by the largest component first so huge directions do not overflow.
    let finite = direction.x.is_finite() && direction.y.is_finite() && direction.z.is_finite();
    let largest = direction.x.abs().max(direction.y.abs()).max(direction.z.abs());
    if !finite || largest <= 0.0 {
        return None;
    }
    let direction = (direction / largest).normalize();

    let mut current = world_block_from_position(origin);
    if world.is_solid(current) {
        return Some(RayHit {
            block: current,
            previous: current,
            normal: Vector3::new(0, 0, 0),
        });
    }

    let mut step = Vector3::new(0, 0, 0);
    let mut t_max = Vector3::new(f32::INFINITY, f32::INFINITY, f32::INFINITY);
    let mut t_delta = Vector3::new(f32::INFINITY, f32::INFINITY, f32::INFINITY);
    for axis in 0..3 {
        let d = direction[axis];
        let cell = current[axis] as f32;
        if d > 0.0 {
            step[axis] = 1;
            t_max[axis] = (cell + 1.0 - origin[axis]) / d;
            t_delta[axis] = 1.0 / d;
        } else if d < 0.0 {
            step[axis] = -1;
            t_max[axis] = (origin[axis] - cell) / -d;
            t_delta[axis] = 1.0 / -d;
        }
    }

    let mut distance = 0.0;
    while distance <= max_distance {
        let axis = if t_max.x <= t_max.z && t_max.x <= t_max.y {
            0
        } else if t_max.z <= t_max.y {
            2
        } else {
            1
        };

        let previous = current;
        current[axis] += step[axis];
        distance = t_max[axis];
        t_max[axis] += t_delta[axis];

        if distance > max_distance {
            break;
        }

        if world.is_solid(current) {
            let mut normal = Vector3::new(0, 0, 0);
            normal[axis] = -step[axis];
            return Some(RayHit {
                block: current,
                previous,
                normal,
            });
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::engine_state::voxels::block::block_type::BlockType;

    struct Cells(HashSet<Point3<i32>>);

    impl VoxelQuery for Cells {
        fn block_at(&self, cell: Point3<i32>) -> BlockType {
            if self.0.contains(&cell) {
                BlockType::STONE
            } else {
                BlockType::AIR
            }
        }
    }

    fn cells(solid: &[(i32, i32, i32)]) -> Cells {
        Cells(solid.iter().map(|&(x, y, z)| Point3::new(x, y, z)).collect())
    }

    fn floor_at_zero() -> Cells {
        let mut set = HashSet::new();
        for x in -4..=4 {
            for z in -4..=4 {
                set.insert(Point3::new(x, 0, z));
            }
        }
        Cells(set)
    }

    #[test]
    fn straight_down_hits_the_floor() {
        let hit = raycast_voxels(
            &floor_at_zero(),
            Point3::new(0.5, 3.5, 0.5),
            Vector3::new(0.0, -1.0, 0.0),
            8.0,
        )
        .unwrap();
        assert_eq!(hit.block, Point3::new(0, 0, 0));
        assert_eq!(hit.previous, Point3::new(0, 1, 0));
        assert_eq!(hit.normal, Vector3::new(0, 1, 0));
    }

    #[test]
    fn out_of_reach_is_a_miss() {
        let hit = raycast_voxels(
            &floor_at_zero(),
            Point3::new(0.5, 3.5, 0.5),
            Vector3::new(0.0, -1.0, 0.0),
            2.0,
        );
        assert!(hit.is_none());
    }

    #[test]
    fn zero_direction_is_a_miss() {
        let world = cells(&[(0, 0, 0)]);
        let hit = raycast_voxels(
            &world,
            Point3::new(0.5, 0.5, 0.5),
            Vector3::new(0.0, 0.0, 0.0),
            8.0,
        );
        assert!(hit.is_none());
    }

    #[test]
    fn starting_inside_solid_hits_immediately() {
        let world = cells(&[(2, 2, 2)]);
        let hit = raycast_voxels(
            &world,
            Point3::new(2.3, 2.9, 2.1),
            Vector3::new(1.0, 0.0, 0.0),
            8.0,
        )
        .unwrap();
        assert_eq!(hit.block, Point3::new(2, 2, 2));
        assert_eq!(hit.previous, hit.block);
        assert_eq!(hit.normal, Vector3::new(0, 0, 0));
    }

    #[test]
    fn unnormalized_direction_behaves_like_unit() {
        let world = cells(&[(5, 0, 0)]);
        let origin = Point3::new(0.5, 0.5, 0.5);
        let short = raycast_voxels(&world, origin, Vector3::new(1.0, 0.0, 0.0), 8.0);
        let long = raycast_voxels(&world, origin, Vector3::new(40.0, 0.0, 0.0), 8.0);
        assert_eq!(short, long);
        assert_eq!(short.map(|h| h.previous), Some(Point3::new(4, 0, 0)));
    }

    #[test]
    fn huge_direction_components_still_hit() {
        let origin = Point3::new(0.5, 3.5, 0.5);
        let huge = raycast_voxels(
            &floor_at_zero(),
            origin,
            Vector3::new(0.0, -1e30, 1e30),
            8.0,
        );
        let unit = raycast_voxels(&floor_at_zero(), origin, Vector3::new(0.0, -1.0, 1.0), 8.0);
        assert_eq!(huge, unit);
        assert_eq!(huge.map(|h| h.block.y), Some(0));
    }

    #[test]
    fn non_finite_direction_is_a_miss() {
        let origin = Point3::new(0.5, 3.5, 0.5);
        for direction in [
            Vector3::new(f32::NAN, -1.0, 0.0),
            Vector3::new(0.0, f32::NEG_INFINITY, 0.0),
        ] {
            assert!(raycast_voxels(&floor_at_zero(), origin, direction, 8.0).is_none());
        }
    }

    #[test]
    fn diagonal_hits_are_adjacent_to_previous() {
        let world = cells(&[(3, 2, 4), (-2, 1, 3), (4, -1, -3)]);
        let origin = Point3::new(0.25, 0.75, 0.4);
        for target in [
            Point3::new(3.5, 2.5, 4.5),
            Point3::new(-1.5, 1.5, 3.5),
            Point3::new(4.5, -0.5, -2.5),
        ] {
            let direction = target - origin;
            let hit = raycast_voxels(&world, origin, direction, 20.0).unwrap();
            let delta = hit.block - hit.previous;
            assert_eq!(delta.x.abs() + delta.y.abs() + delta.z.abs(), 1);
            assert!(!world.is_solid(hit.previous));
            assert_eq!(hit.normal, -delta);
        }
    }

    #[test]
    fn exact_diagonal_tie_steps_x_first() {
        let world = cells(&[(1, 0, 1)]);
        let hit = raycast_voxels(
            &world,
            Point3::new(0.5, 0.5, 0.5),
            Vector3::new(1.0, 0.0, 1.0),
            8.0,
        )
        .unwrap();
        assert_eq!(hit.block, Point3::new(1, 0, 1));
        assert_eq!(hit.previous, Point3::new(1, 0, 0));
        assert_eq!(hit.normal, Vector3::new(0, 0, -1));
    }
}
