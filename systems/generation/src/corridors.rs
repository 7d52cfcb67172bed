//! L-shaped corridors between consecutive rooms.

use dungeon_crawler_core::{Coordinate, Direction, Grid, Room};

/// Carves corridors joining each room to the next one in generation order.
///
/// Each corridor runs horizontally along the first room's center row and then
/// vertically along the second room's center column. The pair is recorded as
/// east/west neighbours. Repeating the call leaves grid and rooms unchanged.
pub fn connect(grid: &mut Grid, rooms: &mut [Room]) {
    for index in 1..rooms.len() {
        let (before, after) = rooms.split_at_mut(index);
        let (Some(from), Some(to)) = (before.last_mut(), after.first_mut()) else {
            continue;
        };

        carve_corridor(grid, from.center(), to.center());
        from.connect(Direction::East, to.id());
        to.connect(Direction::West, from.id());
    }
}

fn carve_corridor(grid: &mut Grid, from: Coordinate, to: Coordinate) {
    for x in from.x().min(to.x())..=from.x().max(to.x()) {
        grid.carve(Coordinate::new(x, from.y()));
    }
    for y in from.y().min(to.y())..=from.y().max(to.y()) {
        grid.carve(Coordinate::new(to.x(), y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dungeon_crawler_core::{Rect, RoomId};

    fn rooms() -> Vec<Room> {
        vec![
            Room::new(RoomId::new(0), Rect::new(Coordinate::new(1, 1), 4, 4)),
            Room::new(RoomId::new(1), Rect::new(Coordinate::new(10, 8), 4, 4)),
        ]
    }

    #[test]
    fn corridor_bends_at_second_room_column() {
        let mut grid = Grid::new(16, 14);
        let mut rooms = rooms();

        connect(&mut grid, &mut rooms);

        for x in 3..=12 {
            assert!(grid.is_passable(Coordinate::new(x, 3)), "row cell {x}");
        }
        for y in 3..=10 {
            assert!(grid.is_passable(Coordinate::new(12, y)), "column cell {y}");
        }
        assert!(!grid.is_passable(Coordinate::new(3, 10)));
        assert_eq!(grid.passable_count(), 10 + 7);
    }

    #[test]
    fn connections_are_recorded_both_ways() {
        let mut grid = Grid::new(16, 14);
        let mut rooms = rooms();

        connect(&mut grid, &mut rooms);

        assert_eq!(
            rooms[0].connections().get(&Direction::East),
            Some(&RoomId::new(1))
        );
        assert_eq!(
            rooms[1].connections().get(&Direction::West),
            Some(&RoomId::new(0))
        );
    }

    #[test]
    fn connecting_twice_is_idempotent() {
        let mut grid = Grid::new(16, 14);
        let mut rooms = rooms();
        connect(&mut grid, &mut rooms);
        let (grid_once, rooms_once) = (grid.clone(), rooms.clone());

        connect(&mut grid, &mut rooms);

        assert_eq!(grid, grid_once);
        assert_eq!(rooms, rooms_once);
    }
}
