use std::collections::VecDeque;

use dungeon_crawler_core::{Coordinate, Grid};
use dungeon_crawler_system_pathfinding::find_path;
use proptest::prelude::*;

const WIDTH: u32 = 6;
const HEIGHT: u32 = 6;

fn bfs_distance(grid: &Grid, start: Coordinate, goal: Coordinate) -> Option<usize> {
    let mut distances = vec![None; grid.cell_count()];
    let mut queue = VecDeque::new();
    distances[grid.index(start)?] = Some(0usize);
    queue.push_back(start);

    while let Some(cell) = queue.pop_front() {
        let distance = distances[grid.index(cell)?]?;
        if cell == goal {
            return Some(distance);
        }
        for neighbor in grid.passable_neighbors(cell) {
            let index = grid.index(neighbor)?;
            if distances[index].is_none() {
                distances[index] = Some(distance + 1);
                queue.push_back(neighbor);
            }
        }
    }

    None
}

fn grid_from_walls(walls: &[bool]) -> Grid {
    let mut grid = Grid::open(WIDTH, HEIGHT);
    for (index, wall) in walls.iter().enumerate() {
        if *wall {
            if let Some(cell) = grid.coordinate(index) {
                grid.set_passable(cell, false);
            }
        }
    }
    grid
}

proptest! {
    #[test]
    fn path_length_matches_breadth_first_distance(
        walls in prop::collection::vec(prop::bool::weighted(0.3), (WIDTH * HEIGHT) as usize),
        start_x in 0..WIDTH as i32,
        start_y in 0..HEIGHT as i32,
        goal_x in 0..WIDTH as i32,
        goal_y in 0..HEIGHT as i32,
    ) {
        let mut grid = grid_from_walls(&walls);
        let start = Coordinate::new(start_x, start_y);
        let goal = Coordinate::new(goal_x, goal_y);
        grid.set_passable(start, true);
        grid.set_passable(goal, true);

        let path = find_path(start, goal, &grid);

        match bfs_distance(&grid, start, goal) {
            Some(0) | None => prop_assert!(path.is_empty()),
            Some(distance) => {
                prop_assert_eq!(path.len(), distance);
                prop_assert_eq!(path.last().copied(), Some(goal));
                let mut previous = start;
                for cell in &path {
                    prop_assert_eq!(previous.manhattan_distance(*cell), 1);
                    prop_assert!(grid.is_passable(*cell));
                    previous = *cell;
                }
            }
        }
    }
}
