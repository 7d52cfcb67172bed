#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Enemy state machine that chases the player along A* paths.

use dungeon_crawler_core::{Command, Coordinate, EnemySnapshot, EnemyState, EnemyView, Grid};
use dungeon_crawler_system_pathfinding::find_path;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Tuning parameters for enemy behaviour.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AiConfig {
    vision_range: u32,
    repath_chance: f64,
}

impl AiConfig {
    /// Creates a configuration from a vision range and a per-tick repath probability.
    ///
    /// The probability is clamped into `[0, 1]`.
    #[must_use]
    pub fn new(vision_range: u32, repath_chance: f64) -> Self {
        let repath_chance = if repath_chance.is_nan() {
            0.0
        } else {
            repath_chance.clamp(0.0, 1.0)
        };
        Self {
            vision_range,
            repath_chance,
        }
    }

    /// Manhattan distance within which enemies notice the player.
    #[must_use]
    pub const fn vision_range(&self) -> u32 {
        self.vision_range
    }

    /// Probability that a chasing enemy with a cached path recomputes it.
    #[must_use]
    pub const fn repath_chance(&self) -> f64 {
        self.repath_chance
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::new(5, 0.1)
    }
}

/// Pure system that emits enemy state, path and movement commands.
#[derive(Debug)]
pub struct EnemyAi {
    config: AiConfig,
    rng: ChaCha8Rng,
    scratch: Vec<Command>,
}

impl EnemyAi {
    /// Creates the system with a generator seeded from `seed`.
    #[must_use]
    pub fn new(config: AiConfig, seed: u64) -> Self {
        Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
            scratch: Vec::new(),
        }
    }

    /// Emits commands for every living enemy in identifier order.
    pub fn handle(
        &mut self,
        player: Coordinate,
        enemies: &EnemyView,
        grid: &Grid,
        out: &mut Vec<Command>,
    ) {
        self.scratch.clear();

        for enemy in enemies.iter() {
            if enemy.state == EnemyState::Dead {
                continue;
            }
            self.update_enemy(enemy, player, grid);
        }

        if self.scratch.is_empty() {
            return;
        }

        out.reserve(self.scratch.len());
        out.append(&mut self.scratch);
    }

    fn update_enemy(&mut self, enemy: &EnemySnapshot, player: Coordinate, grid: &Grid) {
        let distance = enemy.position.manhattan_distance(player);

        // Enemies already locked in melee on the player's cell stay in combat.
        let desired = if distance == 0 && enemy.state == EnemyState::Combat {
            EnemyState::Combat
        } else if distance <= self.config.vision_range {
            EnemyState::Chasing
        } else {
            EnemyState::Patrolling
        };

        if desired != enemy.state {
            self.scratch.push(Command::SetEnemyState {
                enemy: enemy.id,
                state: desired,
            });
        }

        let mut has_path = enemy.path_len > 0;
        if desired == EnemyState::Chasing && self.should_repath(has_path) {
            let path = find_path(enemy.position, player, grid);
            has_path = !path.is_empty();
            self.scratch.push(Command::SetEnemyPath {
                enemy: enemy.id,
                path,
            });
        }

        if has_path {
            self.scratch.push(Command::AdvanceEnemy { enemy: enemy.id });
        }
    }

    fn should_repath(&mut self, has_path: bool) -> bool {
        !has_path || self.rng.gen::<f64>() < self.config.repath_chance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dungeon_crawler_core::{EnemyId, EnemyType};

    fn snapshot(
        id: u32,
        position: Coordinate,
        state: EnemyState,
        next_waypoint: Option<Coordinate>,
        path_len: usize,
    ) -> EnemySnapshot {
        EnemySnapshot {
            id: EnemyId::new(id),
            kind: EnemyType::Orc,
            position,
            stats: EnemyType::Orc.base_stats(),
            state,
            next_waypoint,
            path_len,
        }
    }

    #[test]
    fn distant_enemy_without_path_holds_position() {
        let mut ai = EnemyAi::new(AiConfig::default(), 1);
        let view = EnemyView::from_snapshots(vec![snapshot(
            0,
            Coordinate::new(0, 0),
            EnemyState::Patrolling,
            None,
            0,
        )]);
        let mut out = Vec::new();

        ai.handle(Coordinate::new(9, 0), &view, &Grid::open(10, 1), &mut out);

        assert!(out.is_empty());
    }

    #[test]
    fn enemy_in_range_starts_chasing_along_fresh_path() {
        let mut ai = EnemyAi::new(AiConfig::default(), 1);
        let view = EnemyView::from_snapshots(vec![snapshot(
            3,
            Coordinate::new(0, 0),
            EnemyState::Patrolling,
            None,
            0,
        )]);
        let mut out = Vec::new();

        ai.handle(Coordinate::new(3, 0), &view, &Grid::open(6, 1), &mut out);

        let enemy = EnemyId::new(3);
        assert_eq!(
            out,
            vec![
                Command::SetEnemyState {
                    enemy,
                    state: EnemyState::Chasing,
                },
                Command::SetEnemyPath {
                    enemy,
                    path: vec![
                        Coordinate::new(1, 0),
                        Coordinate::new(2, 0),
                        Coordinate::new(3, 0),
                    ],
                },
                Command::AdvanceEnemy { enemy },
            ]
        );
    }

    #[test]
    fn enemy_leaving_range_patrols_along_stale_path() {
        let mut ai = EnemyAi::new(AiConfig::default(), 1);
        let view = EnemyView::from_snapshots(vec![snapshot(
            1,
            Coordinate::new(0, 0),
            EnemyState::Chasing,
            Some(Coordinate::new(1, 0)),
            2,
        )]);
        let mut out = Vec::new();

        ai.handle(Coordinate::new(9, 0), &view, &Grid::open(10, 1), &mut out);

        let enemy = EnemyId::new(1);
        assert_eq!(
            out,
            vec![
                Command::SetEnemyState {
                    enemy,
                    state: EnemyState::Patrolling,
                },
                Command::AdvanceEnemy { enemy },
            ]
        );
    }

    #[test]
    fn cached_path_is_kept_when_repath_never_fires() {
        let mut ai = EnemyAi::new(AiConfig::new(5, 0.0), 1);
        let view = EnemyView::from_snapshots(vec![snapshot(
            2,
            Coordinate::new(0, 0),
            EnemyState::Chasing,
            Some(Coordinate::new(1, 0)),
            3,
        )]);
        let mut out = Vec::new();

        ai.handle(Coordinate::new(3, 0), &view, &Grid::open(6, 1), &mut out);

        assert_eq!(
            out,
            vec![Command::AdvanceEnemy {
                enemy: EnemyId::new(2)
            }]
        );
    }

    #[test]
    fn certain_repath_replaces_cached_path() {
        let mut ai = EnemyAi::new(AiConfig::new(5, 1.0), 1);
        let view = EnemyView::from_snapshots(vec![snapshot(
            2,
            Coordinate::new(0, 0),
            EnemyState::Chasing,
            Some(Coordinate::new(1, 0)),
            3,
        )]);
        let mut out = Vec::new();

        ai.handle(Coordinate::new(2, 0), &view, &Grid::open(6, 1), &mut out);

        assert!(out.contains(&Command::SetEnemyPath {
            enemy: EnemyId::new(2),
            path: vec![Coordinate::new(1, 0), Coordinate::new(2, 0)],
        }));
    }

    #[test]
    fn unreachable_player_leaves_enemy_idle() {
        let mut grid = Grid::open(5, 1);
        grid.set_passable(Coordinate::new(2, 0), false);
        let mut ai = EnemyAi::new(AiConfig::default(), 1);
        let view = EnemyView::from_snapshots(vec![snapshot(
            0,
            Coordinate::new(0, 0),
            EnemyState::Chasing,
            None,
            0,
        )]);
        let mut out = Vec::new();

        ai.handle(Coordinate::new(4, 0), &view, &grid, &mut out);

        assert_eq!(
            out,
            vec![Command::SetEnemyPath {
                enemy: EnemyId::new(0),
                path: Vec::new(),
            }]
        );
    }

    #[test]
    fn melee_enemies_keep_combat_state() {
        let mut ai = EnemyAi::new(AiConfig::default(), 1);
        let view = EnemyView::from_snapshots(vec![snapshot(
            0,
            Coordinate::new(2, 0),
            EnemyState::Combat,
            None,
            0,
        )]);
        let mut out = Vec::new();

        ai.handle(Coordinate::new(2, 0), &view, &Grid::open(5, 1), &mut out);

        assert!(out.is_empty());
    }

    #[test]
    fn repath_chance_is_clamped() {
        assert_eq!(AiConfig::new(5, 3.0).repath_chance(), 1.0);
        assert_eq!(AiConfig::new(5, -1.0).repath_chance(), 0.0);
        assert_eq!(AiConfig::new(5, f64::NAN).repath_chance(), 0.0);
    }
}
