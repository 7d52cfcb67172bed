use dungeon_crawler_core::{Coordinate, Dungeon, Grid};
use dungeon_crawler_system_generation::{generate_dungeon, GenerationConfig};
use dungeon_crawler_system_pathfinding::find_path;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn generate(seed: u64) -> Dungeon {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let (dungeon, _) =
        generate_dungeon(&GenerationConfig::default(), &mut rng).expect("default config");
    dungeon
}

fn connected(grid: &Grid, from: Coordinate, to: Coordinate) -> bool {
    from == to || !find_path(from, to, grid).is_empty()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn rooms_are_disjoint_and_inside_the_grid(seed in any::<u64>()) {
        let dungeon = generate(seed);
        let grid_bounds = dungeon.grid().bounds();
        let rooms = dungeon.rooms();

        for (index, room) in rooms.iter().enumerate() {
            prop_assert!(grid_bounds.contains_rect(&room.bounds()));
            for cell in room.bounds().cells() {
                prop_assert!(dungeon.grid().is_passable(cell));
            }
            for other in &rooms[index + 1..] {
                prop_assert!(!room.bounds().intersects(&other.bounds()));
            }
        }

        prop_assert_eq!(dungeon.player_start(), rooms[0].center());
        prop_assert_eq!(dungeon.exit(), rooms[rooms.len() - 1].center());
    }

    #[test]
    fn consecutive_rooms_are_connected(seed in any::<u64>()) {
        let dungeon = generate(seed);

        for pair in dungeon.rooms().windows(2) {
            prop_assert!(connected(dungeon.grid(), pair[0].center(), pair[1].center()));
        }
    }
}

#[test]
fn same_seed_produces_byte_identical_dungeons() {
    let first = bincode::serialize(&generate(0x5eed)).expect("serialize");
    let second = bincode::serialize(&generate(0x5eed)).expect("serialize");
    assert_eq!(first, second);

    let other = bincode::serialize(&generate(0x5eee)).expect("serialize");
    assert_ne!(first, other);
}
