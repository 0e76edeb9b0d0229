//! Swept AABB collision against the voxel grid.
//!
//! Motion is resolved one axis at a time. For a move along an axis, the rows of
//! cells the box's leading face would pass through are scanned in order, each
//! row spanning the cells the box occupies on the two other axes. The first row
//! holding a solid cell stops the box `epsilon` short of it.

use cgmath::Point3;

use crate::engine_state::voxels::{aabb::Aabb, world::VoxelQuery};

/// Inclusive range of cells a box covers on one axis.
///
/// Bounds are pulled in by `epsilon` so a box resting exactly on a cell boundary
/// does not count the cell beyond it. Empty when `max < min`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CellSpan {
    pub min: i32,
    pub max: i32,
}

impl CellSpan {
    pub(crate) fn of(aabb: &Aabb, axis: usize, epsilon: f32) -> Self {
        CellSpan {
            min: (aabb.min_on(axis) + epsilon).floor() as i32,
            max: (aabb.max_on(axis) - epsilon).floor() as i32,
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.max < self.min
    }
}

/// Whether no solid cell overlaps the box.
pub(crate) fn is_aabb_clear<Q: VoxelQuery + ?Sized>(world: &Q, aabb: &Aabb, epsilon: f32) -> bool {
    let spans = [
        CellSpan::of(aabb, 0, epsilon),
        CellSpan::of(aabb, 1, epsilon),
        CellSpan::of(aabb, 2, epsilon),
    ];
    if spans.iter().any(CellSpan::is_empty) {
        return true;
    }
    for x in spans[0].min..=spans[0].max {
        for y in spans[1].min..=spans[1].max {
            for z in spans[2].min..=spans[2].max {
                if world.is_solid(Point3::new(x, y, z)) {
                    return false;
                }
            }
        }
    }
    true
}

/// Whether any cell of the row at `row` along `axis` is solid, within the given
/// spans on the other two axes.
fn is_row_blocked<Q: VoxelQuery + ?Sized>(
    world: &Q,
    axis: usize,
    row: i32,
    (first_axis, first): (usize, CellSpan),
    (second_axis, second): (usize, CellSpan),
) -> bool {
    for a in first.min..=first.max {
        for b in second.min..=second.max {
            let mut cell = Point3::new(0, 0, 0);
            cell[axis] = row;
            cell[first_axis] = a;
            cell[second_axis] = b;
            if world.is_solid(cell) {
                return true;
            }
        }
    }
    false
}

/// Clamps a move of `delta` along `axis` against solid cells.
///
/// # Returns
/// The distance the box may actually move and whether a solid row was met. A
/// box with an empty cross-section moves the full `delta` without a hit.
pub(crate) fn sweep_axis<Q: VoxelQuery + ?Sized>(
    world: &Q,
    aabb: &Aabb,
    axis: usize,
    delta: f32,
    epsilon: f32,
) -> (f32, bool) {
    if delta == 0.0 {
        return (0.0, false);
    }

    let first_axis = (axis + 1) % 3;
    let second_axis = (axis + 2) % 3;
    let first = CellSpan::of(aabb, first_axis, epsilon);
    let second = CellSpan::of(aabb, second_axis, epsilon);
    if first.is_empty() || second.is_empty() {
        return (delta, false);
    }
    let blocked =
        |row: i32| is_row_blocked(world, axis, row, (first_axis, first), (second_axis, second));

    if delta > 0.0 {
        let leading = aabb.max_on(axis);
        let start = (leading + epsilon).floor() as i32;
        let end = (leading + delta).floor() as i32;
        if let Some(row) = (start..=end).find(|&row| blocked(row)) {
            let allowed = (row as f32 - leading - epsilon).max(0.0);
            return (delta.min(allowed), true);
        }
    } else {
        let leading = aabb.min_on(axis);
        let start = (leading - epsilon).floor() as i32;
        let end = (leading + delta).floor() as i32;
        if let Some(row) = (end..=start).rev().find(|&row| blocked(row)) {
            let allowed = (row as f32 + 1.0 + epsilon - leading).min(0.0);
            return (delta.max(allowed), true);
        }
    }
    (delta, false)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::engine_state::voxels::block::block_type::BlockType;

    const EPS: f32 = 0.001;

    struct Cells(HashSet<Point3<i32>>);

    impl VoxelQuery for Cells {
        fn block_at(&self, cell: Point3<i32>) -> BlockType {
            if self.0.contains(&cell) {
                BlockType::DIRT
            } else {
                BlockType::AIR
            }
        }
    }

    fn wall_at_x(x: i32) -> Cells {
        let mut set = HashSet::new();
        for y in -2..4 {
            for z in -2..4 {
                set.insert(Point3::new(x, y, z));
            }
        }
        Cells(set)
    }

    fn unit_box_at(x: f32) -> Aabb {
        Aabb::new(Point3::new(x, 0.0, 0.0), Point3::new(x + 0.6, 1.0, 0.6))
    }

    #[test]
    fn span_ignores_touching_cells() {
        let aabb = Aabb::new(Point3::new(1.0, 0.0, 0.2), Point3::new(2.0, 1.8, 0.8));
        assert_eq!(CellSpan::of(&aabb, 0, EPS), CellSpan { min: 1, max: 1 });
        assert_eq!(CellSpan::of(&aabb, 1, EPS), CellSpan { min: 0, max: 1 });
    }

    #[test]
    fn positive_move_stops_short_of_wall() {
        let world = wall_at_x(3);
        let (moved, hit) = sweep_axis(&world, &unit_box_at(1.0), 0, 5.0, EPS);
        assert!(hit);
        assert!((moved - (3.0 - 1.6 - EPS)).abs() < 1e-5);
    }

    #[test]
    fn negative_move_stops_short_of_wall() {
        let world = wall_at_x(-1);
        let (moved, hit) = sweep_axis(&world, &unit_box_at(1.0), 0, -5.0, EPS);
        assert!(hit);
        assert!((moved - (0.0 + EPS - 1.0)).abs() < 1e-5);
    }

    #[test]
    fn short_move_before_wall_is_unclamped() {
        let world = wall_at_x(3);
        let (moved, hit) = sweep_axis(&world, &unit_box_at(1.0), 0, 0.2, EPS);
        assert!(!hit);
        assert_eq!(moved, 0.2);
    }

    #[test]
    fn box_flush_against_wall_cannot_move_into_it() {
        let world = wall_at_x(3);
        let aabb = unit_box_at(3.0 - 0.6 - EPS);
        let (moved, hit) = sweep_axis(&world, &aabb, 0, 0.5, EPS);
        assert!(hit);
        assert_eq!(moved, 0.0);
    }

    #[test]
    fn degenerate_cross_section_moves_freely() {
        let world = wall_at_x(3);
        let flat = Aabb::new(Point3::new(1.0, 0.5, 0.0), Point3::new(1.6, 0.5, 0.6));
        assert_eq!(sweep_axis(&world, &flat, 0, 5.0, EPS), (5.0, false));
    }

    #[test]
    fn clear_box_check() {
        let world = wall_at_x(3);
        assert!(is_aabb_clear(&world, &unit_box_at(1.0), EPS));
        assert!(!is_aabb_clear(&world, &unit_box_at(2.7), EPS));
    }
}
