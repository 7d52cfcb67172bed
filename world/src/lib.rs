#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for the dungeon crawler.

mod inventory;

use std::collections::VecDeque;

use dungeon_crawler_core::{
    CombatStats, Combatant, Command, Coordinate, Dungeon, EnemyId, EnemySpawn, EnemyState,
    EnemyType, Event, GameSnapshot, InvalidGameStateError, ItemId, MovementIntent, RoomId,
    SimulationState,
};
use dungeon_crawler_system_combat::{heal, resolve_damage};

pub use inventory::Inventory;

const PLAYER_BASE_STATS: CombatStats = CombatStats::new(100, 10, 5);
const EXPERIENCE_PER_LEVEL: u32 = 100;
const LEVEL_UP_MAX_HP: u32 = 10;
const LEVEL_UP_ATTACK: u32 = 2;

/// Represents the authoritative dungeon crawler world state.
#[derive(Debug)]
pub struct World {
    dungeon: Dungeon,
    player: Player,
    enemies: Vec<Enemy>,
    state: SimulationState,
    tick_index: u64,
}

impl World {
    /// Creates a world in the main menu with the player on the dungeon's start cell.
    ///
    /// The room containing the start cell counts as explored.
    #[must_use]
    pub fn new(mut dungeon: Dungeon, spawns: Vec<EnemySpawn>) -> Self {
        let start = dungeon.player_start();
        if let Some(room) = dungeon.room_at(start) {
            if let Some(room) = dungeon.room_mut(room) {
                let _ = room.mark_explored();
            }
        }

        let mut enemies: Vec<Enemy> = spawns.into_iter().map(Enemy::from_spawn).collect();
        enemies.sort_by_key(|enemy| enemy.id);

        Self {
            dungeon,
            player: Player::new(start),
            enemies,
            state: SimulationState::MainMenu,
            tick_index: 0,
        }
    }

    fn enemy_index(&self, enemy: EnemyId) -> Option<usize> {
        self.enemies
            .binary_search_by_key(&enemy, |candidate| candidate.id)
            .ok()
    }

    fn enemy_mut(&mut self, enemy: EnemyId) -> Option<&mut Enemy> {
        let index = self.enemy_index(enemy)?;
        self.enemies.get_mut(index)
    }

    fn move_player(&mut self, intent: MovementIntent, out_events: &mut Vec<Event>) {
        if self.player.stats.is_defeated() {
            log::debug!("ignoring movement from defeated player");
            return;
        }

        let from = self.player.position;
        let to = from + intent.delta();
        if !self.dungeon.grid().is_passable(to) {
            log::debug!("dropping movement from {from} into blocked cell {to}");
            return;
        }

        self.player.position = to;
        out_events.push(Event::PlayerMoved { from, to });

        let Some(room_id) = self.dungeon.room_at(to) else {
            return;
        };
        let Some(room) = self.dungeon.room_mut(room_id) else {
            return;
        };

        if room.mark_explored() {
            out_events.push(Event::RoomExplored { room: room_id });
        }

        let lying_here: Vec<ItemId> = room
            .items()
            .iter()
            .filter(|item| item.position() == to)
            .map(|item| item.id())
            .collect();

        for item_id in lying_here {
            if !self.player.inventory.has_room() {
                out_events.push(Event::InventoryFull { item: item_id });
                continue;
            }

            let Some(item) = room.take_item(item_id) else {
                continue;
            };
            let name = item.name().to_owned();
            match self.player.inventory.insert(item) {
                Ok(()) => out_events.push(Event::ItemPickedUp {
                    item: item_id,
                    name,
                }),
                Err(item) => {
                    room.add_item(item);
                    out_events.push(Event::InventoryFull { item: item_id });
                }
            }
        }
    }

    fn set_enemy_path(&mut self, enemy: EnemyId, path: Vec<Coordinate>) {
        let Some(index) = self.enemy_index(enemy) else {
            log::debug!("ignoring path for unknown enemy {}", enemy.get());
            return;
        };
        let grid = self.dungeon.grid();
        let entry = &mut self.enemies[index];

        let mut previous = entry.position;
        let valid = path.iter().all(|cell| {
            let step_ok = previous.manhattan_distance(*cell) == 1 && grid.is_passable(*cell);
            previous = *cell;
            step_ok
        });

        if valid {
            entry.path = path.into();
        } else {
            log::debug!("dropping invalid path for enemy {}", enemy.get());
            entry.path.clear();
        }
    }

    fn advance_enemy(&mut self, enemy: EnemyId, out_events: &mut Vec<Event>) {
        let Some(index) = self.enemy_index(enemy) else {
            return;
        };
        let grid = self.dungeon.grid();
        let entry = &mut self.enemies[index];

        let Some(next) = entry.path.pop_front() else {
            return;
        };

        let from = entry.position;
        if from.manhattan_distance(next) != 1 || !grid.is_passable(next) {
            log::debug!(
                "enemy {} cannot step from {from} to {next}; dropping path",
                enemy.get()
            );
            entry.path.clear();
            return;
        }

        entry.position = next;
        out_events.push(Event::EnemyMoved {
            enemy,
            from,
            to: next,
        });
    }

    fn strike(&mut self, attacker: Combatant, defender: Combatant, out_events: &mut Vec<Event>) {
        match (attacker, defender) {
            (Combatant::Player, Combatant::Enemy(enemy)) => self.player_strikes(enemy, out_events),
            (Combatant::Enemy(enemy), Combatant::Player) => self.enemy_strikes(enemy, out_events),
            _ => log::debug!("ignoring strike from {attacker:?} against {defender:?}"),
        }
    }

    fn player_strikes(&mut self, enemy: EnemyId, out_events: &mut Vec<Event>) {
        if self.player.stats.is_defeated() {
            return;
        }
        let attack = self.player.effective_attack();
        let Some(index) = self.enemy_index(enemy) else {
            log::debug!("ignoring strike against absent enemy {}", enemy.get());
            return;
        };

        let target = &mut self.enemies[index];
        let outcome = resolve_damage(attack, target.stats.defense(), target.stats.hp());
        target.stats.set_hp(outcome.hp);
        out_events.push(Event::EnemyDamaged {
            enemy,
            amount: outcome.damage,
            hp: outcome.hp,
        });

        if !outcome.died {
            return;
        }

        let from = target.state;
        target.state = EnemyState::Dead;
        target.path.clear();
        let kind = target.kind;
        let room = target.room;
        out_events.push(Event::EnemyStateChanged {
            enemy,
            from,
            to: EnemyState::Dead,
        });
        out_events.push(Event::EnemyDefeated { enemy, kind });
        let _ = self.enemies.remove(index);
        if let Some(room) = self.dungeon.room_mut(room) {
            let _ = room.remove_enemy(enemy);
        }

        self.player.gain_experience(kind.experience_reward(), out_events);
    }

    fn enemy_strikes(&mut self, enemy: EnemyId, out_events: &mut Vec<Event>) {
        let Some(index) = self.enemy_index(enemy) else {
            log::debug!("ignoring strike from absent enemy {}", enemy.get());
            return;
        };
        if self.player.stats.is_defeated() {
            return;
        }

        let attack = self.enemies[index].stats.attack();
        let outcome = resolve_damage(
            attack,
            self.player.effective_defense(),
            self.player.stats.hp(),
        );
        self.player.stats.set_hp(outcome.hp);
        out_events.push(Event::PlayerDamaged {
            source: enemy,
            amount: outcome.damage,
            hp: outcome.hp,
        });
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick => {
            if world.state != SimulationState::Playing {
                log::debug!("ignoring tick while {:?}", world.state);
                return;
            }
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TimeAdvanced {
                tick: world.tick_index,
            });
        }
        Command::SetSimulationState { state } => {
            let current = world.state;
            if current.can_transition_to(state) {
                world.state = state;
                out_events.push(Event::StateChanged {
                    from: current,
                    to: state,
                });
            } else {
                log::debug!("rejecting state transition {current:?} -> {state:?}");
                out_events.push(Event::StateTransitionRejected {
                    current,
                    requested: state,
                });
            }
        }
        Command::MovePlayer { intent } => world.move_player(intent, out_events),
        Command::SetEnemyState { enemy, state } => {
            if state == EnemyState::Dead {
                log::debug!("enemy {} can only die through combat", enemy.get());
                return;
            }
            if let Some(entry) = world.enemy_mut(enemy) {
                let from = entry.state;
                if from != state {
                    entry.state = state;
                    out_events.push(Event::EnemyStateChanged {
                        enemy,
                        from,
                        to: state,
                    });
                }
            }
        }
        Command::SetEnemyPath { enemy, path } => world.set_enemy_path(enemy, path),
        Command::AdvanceEnemy { enemy } => world.advance_enemy(enemy, out_events),
        Command::Strike { attacker, defender } => world.strike(attacker, defender, out_events),
        Command::EquipItem { item } => match world.player.inventory.equip(item) {
            Some(slot) => out_events.push(Event::ItemEquipped { item, slot }),
            None => log::debug!("item {} cannot be equipped", item.get()),
        },
        Command::UseItem { item } => {
            let Some(amount) = world.player.inventory.consume_potion(item) else {
                log::debug!("item {} is not a carried potion", item.get());
                return;
            };
            let before = world.player.stats.hp();
            let after = heal(before, world.player.stats.max_hp(), amount);
            world.player.stats.set_hp(after);
            out_events.push(Event::PlayerHealed {
                amount: after - before,
                hp: after,
            });
        }
    }
}

/// Applies a snapshot after validating it against the active dungeon.
///
/// Base stats are rebuilt for the snapshot's level before the hit points are
/// checked, and the current experience is clamped into that level's band so
/// the next reward cannot skip levels. The world is left untouched when
/// validation fails.
pub fn restore(world: &mut World, snapshot: &GameSnapshot) -> Result<(), InvalidGameStateError> {
    let (width, height) = world.dungeon.dimensions();
    if (snapshot.dungeon_width, snapshot.dungeon_height) != (width, height) {
        return Err(InvalidGameStateError::DimensionMismatch {
            width,
            height,
            found_width: snapshot.dungeon_width,
            found_height: snapshot.dungeon_height,
        });
    }
    if !world.dungeon.grid().contains(snapshot.player_position) {
        return Err(InvalidGameStateError::PositionOutOfBounds {
            position: snapshot.player_position,
            width,
            height,
        });
    }
    if snapshot.player_level < 1 {
        return Err(InvalidGameStateError::InvalidLevel {
            level: snapshot.player_level,
        });
    }
    let stats = Player::stats_for_level(snapshot.player_level);
    if snapshot.player_hp > stats.max_hp() {
        return Err(InvalidGameStateError::HpOutOfRange {
            hp: snapshot.player_hp,
            max_hp: stats.max_hp(),
        });
    }

    world.player.position = snapshot.player_position;
    world.player.stats = stats.with_hp(snapshot.player_hp);
    world.player.level = snapshot.player_level;
    world.player.experience = Player::experience_within_level(
        world.player.experience,
        snapshot.player_level,
    );
    world.tick_index = snapshot.tick;
    Ok(())
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{Inventory, World};
    use dungeon_crawler_core::{
        Dungeon, EnemySnapshot, EnemyView, GameSnapshot, PlayerSnapshot, SimulationState,
    };

    /// Provides read-only access to the dungeon layout.
    #[must_use]
    pub fn dungeon(world: &World) -> &Dungeon {
        &world.dungeon
    }

    /// Current global simulation state.
    #[must_use]
    pub fn simulation_state(world: &World) -> SimulationState {
        world.state
    }

    /// Number of ticks processed so far.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Captures the player's position, stats and progression.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        let player = &world.player;
        PlayerSnapshot {
            position: player.position,
            stats: player.stats,
            attack: player.effective_attack(),
            defense: player.effective_defense(),
            level: player.level,
            experience: player.experience,
        }
    }

    /// Provides read-only access to the player's inventory.
    #[must_use]
    pub fn inventory(world: &World) -> &Inventory {
        &world.player.inventory
    }

    /// Captures a read-only view of the living enemies.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        let snapshots: Vec<EnemySnapshot> = world
            .enemies
            .iter()
            .map(|enemy| EnemySnapshot {
                id: enemy.id,
                kind: enemy.kind,
                position: enemy.position,
                stats: enemy.stats,
                state: enemy.state,
                next_waypoint: enemy.path.front().copied(),
                path_len: enemy.path.len(),
            })
            .collect();
        EnemyView::from_snapshots(snapshots)
    }

    /// Captures the persistable summary of the session.
    #[must_use]
    pub fn snapshot(world: &World) -> GameSnapshot {
        let (dungeon_width, dungeon_height) = world.dungeon.dimensions();
        GameSnapshot {
            player_position: world.player.position,
            player_hp: world.player.stats.hp(),
            player_level: world.player.level,
            dungeon_width,
            dungeon_height,
            tick: world.tick_index,
        }
    }
}

#[derive(Clone, Debug)]
struct Player {
    position: Coordinate,
    stats: CombatStats,
    inventory: Inventory,
    experience: u32,
    level: u32,
}

impl Player {
    fn new(position: Coordinate) -> Self {
        Self {
            position,
            stats: PLAYER_BASE_STATS,
            inventory: Inventory::default(),
            experience: 0,
            level: 1,
        }
    }

    fn stats_for_level(level: u32) -> CombatStats {
        let gained = level.saturating_sub(1);
        let mut stats = PLAYER_BASE_STATS;
        stats.raise_max_hp(LEVEL_UP_MAX_HP.saturating_mul(gained));
        stats.raise_attack(LEVEL_UP_ATTACK.saturating_mul(gained));
        stats
    }

    /// Clamps `experience` into `[100 * (level - 1), 100 * level)`.
    fn experience_within_level(experience: u32, level: u32) -> u32 {
        let floor = EXPERIENCE_PER_LEVEL.saturating_mul(level.saturating_sub(1));
        let ceiling = EXPERIENCE_PER_LEVEL
            .saturating_mul(level)
            .saturating_sub(1);
        experience.clamp(floor, ceiling.max(floor))
    }

    fn effective_attack(&self) -> u32 {
        self.stats
            .attack()
            .saturating_add(self.inventory.weapon_bonus())
    }

    fn effective_defense(&self) -> u32 {
        self.stats
            .defense()
            .saturating_add(self.inventory.armor_bonus())
    }

    fn gain_experience(&mut self, amount: u32, out_events: &mut Vec<Event>) {
        self.experience = self.experience.saturating_add(amount);
        while self.experience >= EXPERIENCE_PER_LEVEL.saturating_mul(self.level) {
            self.level = self.level.saturating_add(1);
            self.stats.raise_max_hp(LEVEL_UP_MAX_HP);
            self.stats.raise_attack(LEVEL_UP_ATTACK);
            out_events.push(Event::PlayerLeveledUp { level: self.level });
        }
    }
}

#[derive(Clone, Debug)]
struct Enemy {
    id: EnemyId,
    kind: EnemyType,
    room: RoomId,
    position: Coordinate,
    stats: CombatStats,
    state: EnemyState,
    path: VecDeque<Coordinate>,
}

impl Enemy {
    fn from_spawn(spawn: EnemySpawn) -> Self {
        Self {
            id: spawn.id,
            kind: spawn.kind,
            room: spawn.room,
            position: spawn.position,
            stats: spawn.kind.base_stats(),
            state: EnemyState::Patrolling,
            path: VecDeque::new(),
        }
    }
}
