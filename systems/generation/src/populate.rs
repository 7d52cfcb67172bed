//! Stochastic placement of enemies and items.

use dungeon_crawler_core::{
    Coordinate, EnemyId, EnemySpawn, EnemyType, Item, ItemId, ItemKind, Room,
};
use rand::Rng;

use crate::GenerationConfig;

const WEAPON_MATERIALS: [&str; 3] = ["Iron", "Steel", "Mithril"];
const WEAPON_FORMS: [&str; 3] = ["Sword", "Axe", "Dagger"];
const ARMOR_MATERIALS: [&str; 3] = ["Leather", "Chainmail", "Plate"];
const ARMOR_FORMS: [&str; 3] = ["Armor", "Helmet", "Shield"];
const POTION_EFFECTS: [&str; 3] = ["Healing", "Mana", "Strength"];
const QUEST_ADJECTIVES: [&str; 3] = ["Ancient", "Cursed", "Sacred"];
const QUEST_NOUNS: [&str; 3] = ["Artifact", "Relic", "Scroll"];

/// Rolls one enemy and one item chance per room, in room order.
///
/// Spawned enemies are recorded on their room and returned for the world to
/// take ownership of. Items are stored directly in the room. Identifiers are
/// allocated sequentially per kind.
pub fn populate<R: Rng + ?Sized>(
    rooms: &mut [Room],
    config: &GenerationConfig,
    rng: &mut R,
) -> Vec<EnemySpawn> {
    let mut spawns = Vec::new();
    let mut next_item: u32 = 0;

    for room in rooms.iter_mut() {
        let center = room.center();

        if rng.gen::<f64>() < config.enemy_spawn_rate {
            let kind = pick(rng, &EnemyType::ALL);
            let id = EnemyId::new(u32::try_from(spawns.len()).unwrap_or(u32::MAX));
            room.add_enemy(id);
            spawns.push(EnemySpawn {
                id,
                kind,
                position: center,
                room: room.id(),
            });
        }

        if rng.gen::<f64>() < config.item_spawn_rate {
            room.add_item(random_item(ItemId::new(next_item), center, rng));
            next_item = next_item.saturating_add(1);
        }
    }

    spawns
}

/// Creates an item of a uniformly chosen kind with a pooled name and magnitude.
pub fn random_item<R: Rng + ?Sized>(id: ItemId, position: Coordinate, rng: &mut R) -> Item {
    let (name, kind) = match rng.gen_range(0..4) {
        0 => (
            format!(
                "{} {}",
                pick(rng, &WEAPON_MATERIALS),
                pick(rng, &WEAPON_FORMS)
            ),
            ItemKind::Weapon {
                damage: rng.gen_range(5..=15),
            },
        ),
        1 => (
            format!(
                "{} {}",
                pick(rng, &ARMOR_MATERIALS),
                pick(rng, &ARMOR_FORMS)
            ),
            ItemKind::Armor {
                defense: rng.gen_range(3..=10),
            },
        ),
        2 => (
            format!("{} Potion", pick(rng, &POTION_EFFECTS)),
            ItemKind::Potion {
                heal: rng.gen_range(10..=30),
            },
        ),
        _ => (
            format!(
                "{} {}",
                pick(rng, &QUEST_ADJECTIVES),
                pick(rng, &QUEST_NOUNS)
            ),
            ItemKind::QuestItem {
                value: rng.gen_range(50..=100),
            },
        ),
    };

    Item::new(id, position, name, kind)
}

fn pick<T: Copy, R: Rng + ?Sized, const N: usize>(rng: &mut R, pool: &[T; N]) -> T {
    pool[rng.gen_range(0..N)]
}
