//! Rooms and the dungeon layout produced by the generation pipeline.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Coordinate, Direction, DungeonGenerationError, EnemyId, Grid, Item, ItemId, Rect};

/// Identifier of a room. Matches the room's position in generation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomId(u32);

impl RoomId {
    /// Creates a new room identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Axis-aligned rectangular room carved into the dungeon grid.
///
/// Connections and enemy references are handles into collections owned
/// elsewhere. Items lying in the room are owned by the room until the player
/// picks them up.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    id: RoomId,
    bounds: Rect,
    connections: BTreeMap<Direction, RoomId>,
    items: Vec<Item>,
    enemies: Vec<EnemyId>,
    explored: bool,
}

impl Room {
    /// Creates an unexplored, unconnected, empty room.
    #[must_use]
    pub fn new(id: RoomId, bounds: Rect) -> Self {
        Self {
            id,
            bounds,
            connections: BTreeMap::new(),
            items: Vec::new(),
            enemies: Vec::new(),
            explored: false,
        }
    }

    /// Identifier of the room.
    #[must_use]
    pub const fn id(&self) -> RoomId {
        self.id
    }

    /// Footprint of the room.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Center tile of the room.
    #[must_use]
    pub const fn center(&self) -> Coordinate {
        self.bounds.center()
    }

    /// Adjacent rooms keyed by the direction recorded when corridors were carved.
    #[must_use]
    pub fn connections(&self) -> &BTreeMap<Direction, RoomId> {
        &self.connections
    }

    /// Records that `other` lies in `direction` from this room.
    pub fn connect(&mut self, direction: Direction, other: RoomId) {
        let _ = self.connections.insert(direction, other);
    }

    /// Items still lying in the room.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Places an item in the room.
    pub fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Removes the item from the room, transferring ownership to the caller.
    pub fn take_item(&mut self, item: ItemId) -> Option<Item> {
        let index = self.items.iter().position(|candidate| candidate.id() == item)?;
        Some(self.items.remove(index))
    }

    /// Living enemies spawned in the room.
    #[must_use]
    pub fn enemies(&self) -> &[EnemyId] {
        &self.enemies
    }

    /// Records an enemy spawned in the room.
    pub fn add_enemy(&mut self, enemy: EnemyId) {
        self.enemies.push(enemy);
    }

    /// Forgets a defeated enemy. Returns whether the room listed it.
    pub fn remove_enemy(&mut self, enemy: EnemyId) -> bool {
        let before = self.enemies.len();
        self.enemies.retain(|candidate| *candidate != enemy);
        self.enemies.len() != before
    }

    /// Reports whether the player has entered the room.
    #[must_use]
    pub const fn explored(&self) -> bool {
        self.explored
    }

    /// Marks the room explored, returning `true` when it was not explored before.
    pub fn mark_explored(&mut self) -> bool {
        let newly_explored = !self.explored;
        self.explored = true;
        newly_explored
    }
}

/// Generated dungeon: the passability grid plus rooms in generation order.
///
/// The first room hosts the player start and the last room hosts the exit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dungeon {
    grid: Grid,
    rooms: Vec<Room>,
    player_start: Coordinate,
    exit: Coordinate,
}

impl Dungeon {
    /// Assembles a dungeon, deriving the player start and exit from the room order.
    pub fn new(grid: Grid, rooms: Vec<Room>) -> Result<Self, DungeonGenerationError> {
        let (Some(first), Some(last)) = (rooms.first(), rooms.last()) else {
            return Err(DungeonGenerationError::NoRooms);
        };
        let player_start = first.center();
        let exit = last.center();

        Ok(Self {
            grid,
            rooms,
            player_start,
            exit,
        })
    }

    /// Passability grid of the dungeon.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Rooms in generation order.
    #[must_use]
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Mutable access to a single room.
    pub fn room_mut(&mut self, room: RoomId) -> Option<&mut Room> {
        let index = usize::try_from(room.get()).ok()?;
        self.rooms.get_mut(index)
    }

    /// Cell the player starts on.
    #[must_use]
    pub const fn player_start(&self) -> Coordinate {
        self.player_start
    }

    /// Cell the player must reach to win.
    #[must_use]
    pub const fn exit(&self) -> Coordinate {
        self.exit
    }

    /// Width and height of the grid.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.grid.width(), self.grid.height())
    }

    /// Room whose footprint contains the cell, if any.
    #[must_use]
    pub fn room_at(&self, cell: Coordinate) -> Option<RoomId> {
        self.rooms
            .iter()
            .find(|room| room.bounds().contains(cell))
            .map(Room::id)
    }
}
