//! First-fit origin search.

use crate::grid::SpatialGrid;
use crate::validator::can_place;
use u_stacking_core::{BoxSpec, Origin};

/// Scans candidate origins and returns the first legal one.
///
/// Scan order is fixed: `x` descending from the far wall, then `y` ascending,
/// then `z` ascending. The result depends only on the grid and the box.
pub fn find_position(grid: &SpatialGrid, item: &BoxSpec) -> Option<Origin> {
    let (width, depth, height) = grid.dimensions();

    for x in (0..width).rev() {
        for y in 0..depth {
            for z in 0..height {
                let origin = Origin::new(x, y, z);
                if can_place(grid, origin, item) {
                    return Some(origin);
                }
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use u_stacking_core::Room;

    #[test]
    fn test_prefers_far_wall() {
        let grid = SpatialGrid::new(Room::cube(10)).unwrap();
        assert_eq!(
            find_position(&grid, &BoxSpec::cube("B", 3)),
            Some(Origin::new(7, 0, 0))
        );
    }

    #[test]
    fn test_stacks_before_moving_along_x() {
        let mut grid = SpatialGrid::new(Room::cube(10)).unwrap();
        let first = BoxSpec::cube("A", 3);
        grid.occupy(Origin::new(7, 0, 0), &first).unwrap();

        // z is the innermost loop, so the top of A wins over y=3 or x=6.
        assert_eq!(
            find_position(&grid, &BoxSpec::cube("B", 3)),
            Some(Origin::new(7, 0, 3))
        );
    }

    #[test]
    fn test_box_larger_than_room() {
        let grid = SpatialGrid::new(Room::cube(2)).unwrap();
        assert_eq!(find_position(&grid, &BoxSpec::new("B", 3, 1, 1)), None);
    }

    #[test]
    fn test_full_room() {
        let mut grid = SpatialGrid::new(Room::cube(1)).unwrap();
        grid.occupy(Origin::default(), &BoxSpec::cube("A", 1)).unwrap();
        assert_eq!(find_position(&grid, &BoxSpec::cube("B", 1)), None);
    }

    #[test]
    fn test_search_is_deterministic() {
        let mut grid = SpatialGrid::new(Room::new(5, 4, 3)).unwrap();
        grid.occupy(Origin::new(3, 0, 0), &BoxSpec::new("A", 2, 2, 1))
            .unwrap();
        let item = BoxSpec::new("B", 2, 1, 2);
        let first = find_position(&grid, &item);
        for _ in 0..5 {
            assert_eq!(find_position(&grid, &item), first);
        }
    }
}
