#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Grid A* search used by autonomous agents.
//!
//! The search frontier is an unbounded binary heap. Entries are ordered by
//! `f = g + h`, ties prefer the lower heuristic and then the earlier insertion,
//! so identical inputs always produce identical paths.

use std::{
    cmp::{Ordering, Reverse},
    collections::BinaryHeap,
};

use dungeon_crawler_core::{Coordinate, Grid};

/// Computes a shortest 4-connected path from `start` to `goal`.
///
/// The returned path excludes `start` and includes `goal`. It is empty when
/// the endpoints coincide, when either endpoint is outside the grid or
/// impassable, and when the goal is unreachable.
#[must_use]
pub fn find_path(start: Coordinate, goal: Coordinate, grid: &Grid) -> Vec<Coordinate> {
    if start == goal || !grid.is_passable(start) || !grid.is_passable(goal) {
        return Vec::new();
    }

    let (Some(start_index), Some(goal_index)) = (grid.index(start), grid.index(goal)) else {
        return Vec::new();
    };

    let cell_count = grid.cell_count();
    let mut best_cost = vec![u32::MAX; cell_count];
    let mut came_from: Vec<Option<usize>> = vec![None; cell_count];
    let mut closed = vec![false; cell_count];
    let mut frontier = BinaryHeap::new();
    let mut sequence: u64 = 0;

    best_cost[start_index] = 0;
    frontier.push(Reverse(FrontierEntry {
        estimate: start.manhattan_distance(goal),
        heuristic: start.manhattan_distance(goal),
        sequence,
        cell: start,
        index: start_index,
    }));

    while let Some(Reverse(entry)) = frontier.pop() {
        if closed[entry.index] {
            continue;
        }
        closed[entry.index] = true;

        if entry.index == goal_index {
            return reconstruct(grid, &came_from, start_index, goal_index);
        }

        let next_cost = best_cost[entry.index].saturating_add(1);
        for neighbor in grid.passable_neighbors(entry.cell) {
            let Some(neighbor_index) = grid.index(neighbor) else {
                continue;
            };

            if closed[neighbor_index] || next_cost >= best_cost[neighbor_index] {
                continue;
            }

            best_cost[neighbor_index] = next_cost;
            came_from[neighbor_index] = Some(entry.index);
            sequence += 1;
            let heuristic = neighbor.manhattan_distance(goal);
            frontier.push(Reverse(FrontierEntry {
                estimate: next_cost.saturating_add(heuristic),
                heuristic,
                sequence,
                cell: neighbor,
                index: neighbor_index,
            }));
        }
    }

    Vec::new()
}

fn reconstruct(
    grid: &Grid,
    came_from: &[Option<usize>],
    start_index: usize,
    goal_index: usize,
) -> Vec<Coordinate> {
    let mut path = Vec::new();
    let mut current = goal_index;

    while current != start_index {
        let Some(cell) = grid.coordinate(current) else {
            return Vec::new();
        };
        path.push(cell);

        let Some(previous) = came_from.get(current).copied().flatten() else {
            return Vec::new();
        };
        current = previous;
    }

    path.reverse();
    path
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct FrontierEntry {
    estimate: u32,
    heuristic: u32,
    sequence: u64,
    cell: Coordinate,
    index: usize,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.estimate, self.heuristic, self.sequence).cmp(&(
            other.estimate,
            other.heuristic,
            other.sequence,
        ))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_routes_around_single_wall() {
        let mut grid = Grid::open(10, 10);
        let wall = Coordinate::new(5, 5);
        grid.set_passable(wall, false);

        let path = find_path(Coordinate::new(0, 0), Coordinate::new(9, 9), &grid);

        assert_eq!(path.len(), 18);
        assert_eq!(path.last(), Some(&Coordinate::new(9, 9)));
        assert!(!path.contains(&wall));
        assert!(!path.contains(&Coordinate::new(0, 0)));
    }

    #[test]
    fn consecutive_waypoints_are_adjacent() {
        let mut grid = Grid::open(8, 6);
        for y in 0..5 {
            grid.set_passable(Coordinate::new(4, y), false);
        }
        let start = Coordinate::new(0, 0);

        let path = find_path(start, Coordinate::new(7, 0), &grid);

        let mut previous = start;
        for cell in &path {
            assert_eq!(previous.manhattan_distance(*cell), 1);
            assert!(grid.is_passable(*cell));
            previous = *cell;
        }
        assert_eq!(path.len(), 17);
    }

    #[test]
    fn walled_off_goal_yields_empty_path() {
        let mut grid = Grid::open(7, 7);
        let goal = Coordinate::new(3, 3);
        for neighbor in goal.neighbors() {
            grid.set_passable(neighbor, false);
        }

        assert!(find_path(Coordinate::new(0, 0), goal, &grid).is_empty());
    }

    #[test]
    fn degenerate_requests_yield_empty_path() {
        let mut grid = Grid::open(4, 4);
        grid.set_passable(Coordinate::new(2, 2), false);
        let start = Coordinate::new(0, 0);

        assert!(find_path(start, start, &grid).is_empty());
        assert!(find_path(start, Coordinate::new(2, 2), &grid).is_empty());
        assert!(find_path(start, Coordinate::new(4, 0), &grid).is_empty());
        assert!(find_path(Coordinate::new(-1, 0), start, &grid).is_empty());
    }

    #[test]
    fn identical_inputs_produce_identical_paths() {
        let grid = Grid::open(12, 12);
        let first = find_path(Coordinate::new(1, 1), Coordinate::new(10, 7), &grid);
        let second = find_path(Coordinate::new(1, 1), Coordinate::new(10, 7), &grid);
        assert_eq!(first, second);
        assert_eq!(first.len(), 15);
    }
}
