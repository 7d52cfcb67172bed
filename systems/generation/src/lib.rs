#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Procedural dungeon generation pipeline.
//!
//! Generation runs once per session: rooms are placed by recursive division,
//! joined by L-shaped corridors, and finally populated with enemies and items.
//! Every random draw comes from the caller's generator, so a seeded generator
//! reproduces the same dungeon.

mod corridors;
mod populate;
mod rooms;

use dungeon_crawler_core::{Coordinate, Dungeon, DungeonGenerationError, EnemySpawn, Rect};
use rand::Rng;
use serde::{Deserialize, Serialize};

pub use corridors::connect;
pub use populate::{populate, random_item};
pub use rooms::RoomGenerator;

/// Tunable parameters of the generation pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Grid width in cells.
    pub width: u32,
    /// Grid height in cells.
    pub height: u32,
    /// Smallest room side.
    pub min_room_size: u32,
    /// Largest room side.
    pub max_room_size: u32,
    /// Upper bound on committed rooms.
    pub max_rooms: usize,
    /// Probability that a room receives an enemy.
    pub enemy_spawn_rate: f64,
    /// Probability that a room receives an item.
    pub item_spawn_rate: f64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 40,
            min_room_size: 4,
            max_room_size: 8,
            max_rooms: 15,
            enemy_spawn_rate: 0.3,
            item_spawn_rate: 0.25,
        }
    }
}

impl GenerationConfig {
    /// Rectangle covering the whole grid.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        Rect::new(Coordinate::new(0, 0), self.width, self.height)
    }

    /// Rejects parameters that cannot produce rooms.
    pub fn validate(&self) -> Result<(), DungeonGenerationError> {
        let reason = if self.min_room_size == 0 {
            "min_room_size must be positive"
        } else if self.max_room_size < self.min_room_size {
            "max_room_size must not be smaller than min_room_size"
        } else if self.max_rooms == 0 {
            "max_rooms must be positive"
        } else if !(0.0..=1.0).contains(&self.enemy_spawn_rate) {
            "enemy_spawn_rate must lie in [0, 1]"
        } else if !(0.0..=1.0).contains(&self.item_spawn_rate) {
            "item_spawn_rate must lie in [0, 1]"
        } else {
            return Ok(());
        };

        Err(DungeonGenerationError::InvalidConfig { reason })
    }
}

/// Runs the full pipeline: rooms, corridors, then population.
///
/// Returns the dungeon together with the enemies the world should spawn.
/// No partial dungeon is produced on failure.
pub fn generate_dungeon<R: Rng + ?Sized>(
    config: &GenerationConfig,
    rng: &mut R,
) -> Result<(Dungeon, Vec<EnemySpawn>), DungeonGenerationError> {
    let (mut grid, mut rooms) = RoomGenerator::new(config).generate(config.bounds(), rng)?;
    connect(&mut grid, &mut rooms);
    let spawns = populate(&mut rooms, config, rng);

    let room_count = rooms.len();
    let item_count: usize = rooms.iter().map(|room| room.items().len()).sum();
    let dungeon = Dungeon::new(grid, rooms)?;

    log::info!(
        "generated {}x{} dungeon with {} rooms, {} enemies and {} items",
        config.width,
        config.height,
        room_count,
        spawns.len(),
        item_count
    );

    Ok((dungeon, spawns))
}
