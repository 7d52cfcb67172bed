//! Headless stand-in for a human player.

use anyhow::{bail, Result};
use dungeon_crawler_core::{Direction, EquipSlot, Event, ItemId, ItemKind, MovementIntent};
use dungeon_crawler_system_clock::SimulationClock;
use dungeon_crawler_world::{query, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const WALK_SEED_SALT: u64 = 0x05ee_d0fa_11ce;

/// Supplies one movement intent per tick.
#[derive(Debug)]
pub(crate) enum IntentSource {
    /// Replays a fixed list of steps, then idles.
    Scripted {
        steps: Vec<Option<MovementIntent>>,
        cursor: usize,
    },
    /// Steps onto a random passable neighbour every tick.
    RandomWalk { rng: ChaCha8Rng },
}

impl IntentSource {
    /// Parses `N`, `E`, `S` and `W` steps; `.` waits for a tick and whitespace is skipped.
    pub(crate) fn scripted(script: &str) -> Result<Self> {
        let mut steps = Vec::with_capacity(script.len());
        for (index, symbol) in script.chars().enumerate() {
            let direction = match symbol.to_ascii_uppercase() {
                'N' => Direction::North,
                'E' => Direction::East,
                'S' => Direction::South,
                'W' => Direction::West,
                '.' => {
                    steps.push(None);
                    continue;
                }
                symbol if symbol.is_whitespace() => continue,
                other => bail!("unsupported script step '{other}' at position {index}"),
            };
            steps.push(Some(MovementIntent::step(direction)));
        }
        Ok(Self::Scripted { steps, cursor: 0 })
    }

    pub(crate) fn random_walk(seed: u64) -> Self {
        Self::RandomWalk {
            rng: ChaCha8Rng::seed_from_u64(seed ^ WALK_SEED_SALT),
        }
    }

    /// Intent for the upcoming tick.
    pub(crate) fn next_intent(&mut self, world: &World) -> Option<MovementIntent> {
        match self {
            Self::Scripted { steps, cursor } => {
                let step = steps.get(*cursor).copied().flatten();
                *cursor += 1;
                step
            }
            Self::RandomWalk { rng } => {
                let position = query::player(world).position;
                let options: Vec<_> = query::dungeon(world)
                    .grid()
                    .passable_neighbors(position)
                    .collect();
                if options.is_empty() {
                    return None;
                }
                let target = options[rng.gen_range(0..options.len())];
                MovementIntent::from_delta(target - position)
            }
        }
    }
}

/// Equips upgrades and drinks a potion once hit points fall below half.
pub(crate) fn manage_items(clock: &mut SimulationClock, out: &mut Vec<Event>) {
    let (upgrades, potion) = {
        let world = clock.world();
        let inventory = query::inventory(world);
        let mut best = [EquipSlot::Weapon, EquipSlot::Armor].map(|slot| {
            inventory
                .equipped(slot)
                .and_then(|id| inventory.get(id))
                .map_or(0, |item| item.kind().magnitude())
        });

        let mut upgrades = Vec::new();
        for item in inventory.items() {
            let index = match item.kind().slot() {
                Some(EquipSlot::Weapon) => 0,
                Some(EquipSlot::Armor) => 1,
                None => continue,
            };
            if !item.is_equipped() && item.kind().magnitude() > best[index] {
                best[index] = item.kind().magnitude();
                upgrades.push(item.id());
            }
        }

        let stats = query::player(world).stats;
        let potion = if stats.hp() * 2 < stats.max_hp() {
            strongest_potion(world)
        } else {
            None
        };
        (upgrades, potion)
    };

    for item in upgrades {
        clock.equip(item, out);
    }
    if let Some(potion) = potion {
        clock.use_item(potion, out);
    }
}

fn strongest_potion(world: &World) -> Option<ItemId> {
    query::inventory(world)
        .items()
        .iter()
        .filter_map(|item| match item.kind() {
            ItemKind::Potion { heal } => Some((heal, item.id())),
            _ => None,
        })
        .max_by_key(|(heal, id)| (*heal, std::cmp::Reverse(*id)))
        .map(|(_, id)| id)
}
