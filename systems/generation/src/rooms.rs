//! Recursive subdivision room placement.

use dungeon_crawler_core::{Coordinate, DungeonGenerationError, Grid, Rect, Room, RoomId};
use rand::Rng;

use crate::GenerationConfig;

/// Places non-overlapping rooms by recursively dividing the grid bounds.
#[derive(Debug)]
pub struct RoomGenerator<'a> {
    config: &'a GenerationConfig,
    rooms: Vec<Room>,
}

impl<'a> RoomGenerator<'a> {
    /// Creates a generator bound to the provided configuration.
    #[must_use]
    pub fn new(config: &'a GenerationConfig) -> Self {
        Self {
            config,
            rooms: Vec::new(),
        }
    }

    /// Subdivides `bounds`, returning a grid with every committed room carved.
    ///
    /// The grid always spans the configured width and height, so `bounds` must
    /// lie inside it. Rooms are returned in commit order and their identifiers
    /// match their index. Fails when no room could be committed.
    pub fn generate<R: Rng + ?Sized>(
        mut self,
        bounds: Rect,
        rng: &mut R,
    ) -> Result<(Grid, Vec<Room>), DungeonGenerationError> {
        self.config.validate()?;
        if !self.config.bounds().contains_rect(&bounds) {
            return Err(DungeonGenerationError::InvalidConfig {
                reason: "generation bounds extend past the grid",
            });
        }

        self.divide(bounds, rng);
        if self.rooms.is_empty() {
            return Err(DungeonGenerationError::NoRooms);
        }

        let mut grid = Grid::new(self.config.width, self.config.height);
        for room in &self.rooms {
            grid.carve_rect(room.bounds());
        }

        Ok((grid, self.rooms))
    }

    fn divide<R: Rng + ?Sized>(&mut self, region: Rect, rng: &mut R) {
        let min = self.config.min_room_size;
        let doubled = min.saturating_mul(2);
        if self.rooms.len() >= self.config.max_rooms
            || region.width() <= doubled
            || region.height() <= doubled
        {
            return;
        }

        let origin = region.origin();
        let split = Coordinate::new(
            offset(origin.x(), min + rng.gen_range(0..=region.width() - doubled)),
            offset(origin.y(), min + rng.gen_range(0..=region.height() - doubled)),
        );

        let left = span(origin.x(), split.x());
        let top = span(origin.y(), split.y());
        let right = region.width() - left;
        let bottom = region.height() - top;

        let room_width = rng.gen_range(min..=self.size_limit(region.width(), right));
        let room_height = rng.gen_range(min..=self.size_limit(region.height(), bottom));
        let candidate = Rect::new(split, room_width, room_height);

        if !self
            .rooms
            .iter()
            .any(|room| room.bounds().intersects(&candidate))
        {
            let id = RoomId::new(u32::try_from(self.rooms.len()).unwrap_or(u32::MAX));
            self.rooms.push(Room::new(id, candidate));
        }

        self.divide(Rect::new(origin, left, top), rng);
        self.divide(
            Rect::new(Coordinate::new(split.x(), origin.y()), right, top),
            rng,
        );
        self.divide(
            Rect::new(Coordinate::new(origin.x(), split.y()), left, bottom),
            rng,
        );
        self.divide(Rect::new(split, right, bottom), rng);
    }

    /// Largest room side that fits both half the region and the space after the split.
    fn size_limit(&self, extent: u32, remaining: u32) -> u32 {
        self.config
            .max_room_size
            .min(extent / 2)
            .min(remaining)
            .max(self.config.min_room_size)
    }
}

fn offset(base: i32, amount: u32) -> i32 {
    base.saturating_add(i32::try_from(amount).unwrap_or(i32::MAX))
}

fn span(from: i32, to: i32) -> u32 {
    u32::try_from(i64::from(to) - i64::from(from)).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn generate(config: &GenerationConfig, seed: u64) -> (Grid, Vec<Room>) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        RoomGenerator::new(config)
            .generate(config.bounds(), &mut rng)
            .expect("default config produces rooms")
    }

    #[test]
    fn rooms_respect_size_limits() {
        let config = GenerationConfig::default();
        let (_, rooms) = generate(&config, 11);

        assert!(!rooms.is_empty());
        assert!(rooms.len() <= config.max_rooms);
        for room in &rooms {
            let bounds = room.bounds();
            assert!(bounds.width() >= config.min_room_size);
            assert!(bounds.height() >= config.min_room_size);
            assert!(bounds.width() <= config.max_room_size);
            assert!(bounds.height() <= config.max_room_size);
        }
    }

    #[test]
    fn room_ids_follow_commit_order() {
        let config = GenerationConfig::default();
        let (_, rooms) = generate(&config, 3);

        for (index, room) in rooms.iter().enumerate() {
            assert_eq!(room.id().get() as usize, index);
        }
    }

    #[test]
    fn carved_cells_match_room_footprints() {
        let config = GenerationConfig::default();
        let (grid, rooms) = generate(&config, 29);

        let footprint: usize = rooms
            .iter()
            .map(|room| (room.bounds().width() * room.bounds().height()) as usize)
            .sum();
        assert_eq!(grid.passable_count(), footprint);
    }

    #[test]
    fn region_too_small_to_split_yields_no_rooms() {
        let config = GenerationConfig {
            width: 8,
            height: 40,
            ..GenerationConfig::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let result = RoomGenerator::new(&config).generate(config.bounds(), &mut rng);

        assert_eq!(result, Err(DungeonGenerationError::NoRooms));
    }

    #[test]
    fn offset_bounds_keep_rooms_inside_and_carved() {
        let config = GenerationConfig::default();
        let bounds = Rect::new(Coordinate::new(20, 10), 60, 30);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let (grid, rooms) = RoomGenerator::new(&config)
            .generate(bounds, &mut rng)
            .expect("offset region produces rooms");

        assert_eq!((grid.width(), grid.height()), (80, 40));
        for room in &rooms {
            assert!(bounds.contains_rect(&room.bounds()));
            assert!(room.bounds().cells().all(|cell| grid.is_passable(cell)));
        }
    }

    #[test]
    fn bounds_past_the_grid_are_rejected_before_drawing() {
        let config = GenerationConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut untouched = rng.clone();

        let result = RoomGenerator::new(&config)
            .generate(Rect::new(Coordinate::new(20, 10), 80, 40), &mut rng);

        assert!(matches!(
            result,
            Err(DungeonGenerationError::InvalidConfig { .. })
        ));
        assert_eq!(rng.gen::<u64>(), untouched.gen::<u64>());
    }

    #[test]
    fn room_cap_is_honoured() {
        let config = GenerationConfig {
            max_rooms: 1,
            ..GenerationConfig::default()
        };
        let (_, rooms) = generate(&config, 5);
        assert_eq!(rooms.len(), 1);
    }
}
