#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fixed-timestep orchestration of the dungeon crawler simulation.
//!
//! The clock owns the world together with the enemy AI and combat systems.
//! Each tick feeds the player's movement intent to the world, lets the systems
//! respond with commands, applies those commands, and finally checks whether
//! the session has been won or lost.

use std::time::Duration;

use dungeon_crawler_core::{
    Command, DungeonGenerationError, Event, GameSnapshot, InvalidGameStateError, ItemId,
    MovementIntent, SimulationState,
};
use dungeon_crawler_system_combat::Combat;
use dungeon_crawler_system_enemy_ai::{AiConfig, EnemyAi};
use dungeon_crawler_system_generation::{generate_dungeon, GenerationConfig};
use dungeon_crawler_world::{self as world, query, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

const AI_SEED_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Timing and behaviour parameters of the simulation loop.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Number of fixed ticks per simulated second.
    pub ticks_per_second: u32,
    /// Manhattan distance within which enemies notice the player.
    pub vision_range: u32,
    /// Probability that a chasing enemy recomputes a cached path each tick.
    pub repath_chance: f64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            ticks_per_second: 60,
            vision_range: 5,
            repath_chance: 0.1,
        }
    }
}

impl ClockConfig {
    /// Duration of a single tick. A zero rate is treated as one tick per second.
    #[must_use]
    pub fn tick_duration(&self) -> Duration {
        let rate = u64::from(self.ticks_per_second.max(1));
        Duration::from_nanos(1_000_000_000 / rate)
    }

    /// Enemy behaviour derived from this configuration.
    #[must_use]
    pub fn ai_config(&self) -> AiConfig {
        AiConfig::new(self.vision_range, self.repath_chance)
    }
}

/// Drives the world in fixed ticks and enforces the session state machine.
#[derive(Debug)]
pub struct SimulationClock {
    world: World,
    tick_duration: Duration,
    accumulator: Duration,
    enemy_ai: EnemyAi,
    combat: Combat,
    commands: Vec<Command>,
}

impl SimulationClock {
    /// Wraps an existing world. `seed` feeds the enemy AI generator.
    #[must_use]
    pub fn new(world: World, config: &ClockConfig, seed: u64) -> Self {
        Self {
            world,
            tick_duration: config.tick_duration(),
            accumulator: Duration::ZERO,
            enemy_ai: EnemyAi::new(config.ai_config(), seed ^ AI_SEED_SALT),
            combat: Combat::new(),
            commands: Vec::new(),
        }
    }

    /// Generates a dungeon from `seed` and wraps a fresh world around it.
    pub fn generate(
        generation: &GenerationConfig,
        config: &ClockConfig,
        seed: u64,
    ) -> Result<Self, DungeonGenerationError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let (dungeon, spawns) = generate_dungeon(generation, &mut rng)?;
        Ok(Self::new(World::new(dungeon, spawns), config, seed))
    }

    /// Read-only access to the simulated world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Current global simulation state.
    #[must_use]
    pub fn state(&self) -> SimulationState {
        query::simulation_state(&self.world)
    }

    /// Duration of a single tick.
    #[must_use]
    pub const fn tick_duration(&self) -> Duration {
        self.tick_duration
    }

    /// Leaves the main menu and begins ticking.
    pub fn start(&mut self, out: &mut Vec<Event>) {
        self.transition(SimulationState::Playing, out);
    }

    /// Suspends ticking.
    pub fn pause(&mut self, out: &mut Vec<Event>) {
        self.transition(SimulationState::Paused, out);
    }

    /// Resumes ticking after a pause.
    pub fn resume(&mut self, out: &mut Vec<Event>) {
        if self.state() == SimulationState::Paused {
            self.accumulator = Duration::ZERO;
        }
        self.transition(SimulationState::Playing, out);
    }

    /// Equips a carried weapon or armor.
    pub fn equip(&mut self, item: ItemId, out: &mut Vec<Event>) {
        world::apply(&mut self.world, Command::EquipItem { item }, out);
    }

    /// Drinks a carried potion.
    pub fn use_item(&mut self, item: ItemId, out: &mut Vec<Event>) {
        world::apply(&mut self.world, Command::UseItem { item }, out);
    }

    /// Accumulates `dt` and runs one tick per elapsed tick duration.
    ///
    /// `next_intent` is consulted once per tick. Leftover time carries over to
    /// the next call. Ticking stops as soon as the session leaves `Playing`,
    /// discarding the remaining time. Returns the number of ticks run.
    pub fn advance<F>(&mut self, dt: Duration, mut next_intent: F, out: &mut Vec<Event>) -> u32
    where
        F: FnMut(&World) -> Option<MovementIntent>,
    {
        if self.state() != SimulationState::Playing {
            return 0;
        }

        self.accumulator = self.accumulator.saturating_add(dt);
        let mut ticks = 0;
        while self.accumulator >= self.tick_duration {
            self.accumulator -= self.tick_duration;
            let intent = next_intent(&self.world);
            self.tick(intent, out);
            ticks += 1;

            if self.state() != SimulationState::Playing {
                self.accumulator = Duration::ZERO;
                break;
            }
        }
        ticks
    }

    /// Runs a single tick. Ignored unless the session is `Playing`.
    pub fn tick(&mut self, intent: Option<MovementIntent>, out: &mut Vec<Event>) {
        if self.state() != SimulationState::Playing {
            log::debug!("ignoring tick while {:?}", self.state());
            return;
        }

        world::apply(&mut self.world, Command::Tick, out);

        if let Some(intent) = intent {
            world::apply(&mut self.world, Command::MovePlayer { intent }, out);
        }

        let player = query::player(&self.world);
        self.enemy_ai.handle(
            player.position,
            &query::enemy_view(&self.world),
            query::dungeon(&self.world).grid(),
            &mut self.commands,
        );
        self.flush(out);

        let player = query::player(&self.world);
        self.combat
            .handle(&player, &query::enemy_view(&self.world), &mut self.commands);
        self.flush(out);

        let player = query::player(&self.world);
        if player.position == query::dungeon(&self.world).exit() {
            self.transition(SimulationState::Victory, out);
        } else if player.stats.is_defeated() {
            self.transition(SimulationState::GameOver, out);
        }
    }

    /// Captures the persistable summary of the session.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        query::snapshot(&self.world)
    }

    /// Restores a previously captured snapshot into the current world.
    pub fn restore(&mut self, snapshot: &GameSnapshot) -> Result<(), InvalidGameStateError> {
        world::restore(&mut self.world, snapshot)?;
        self.accumulator = Duration::ZERO;
        log::info!(
            "restored snapshot at tick {} with player at {}",
            snapshot.tick,
            snapshot.player_position
        );
        Ok(())
    }

    fn flush(&mut self, out: &mut Vec<Event>) {
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, out);
        }
    }

    fn transition(&mut self, state: SimulationState, out: &mut Vec<Event>) {
        let from = self.state();
        world::apply(&mut self.world, Command::SetSimulationState { state }, out);
        if self.state() == state && from != state {
            log::info!(
                "simulation {from:?} -> {state:?} at tick {}",
                query::tick_index(&self.world)
            );
        }
    }
}
