#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Combat resolution rules and the encounter system that emits strike commands.

use dungeon_crawler_core::{Combatant, Command, EnemyState, EnemyView, PlayerSnapshot};

/// Result of resolving a single attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageOutcome {
    /// Damage dealt, never below one.
    pub damage: u32,
    /// Defender hit points after the attack.
    pub hp: u32,
    /// Indicates whether the defender's hit points reached zero.
    pub died: bool,
}

/// Resolves one attack against a defender.
///
/// Every attack lands for at least one point of damage and hit points never
/// drop below zero.
#[must_use]
pub fn resolve_damage(attack: u32, defense: u32, hp: u32) -> DamageOutcome {
    let damage = attack.saturating_sub(defense).max(1);
    let hp = hp.saturating_sub(damage);
    DamageOutcome {
        damage,
        hp,
        died: hp == 0,
    }
}

/// Restores hit points without exceeding the maximum.
#[must_use]
pub fn heal(hp: u32, max_hp: u32, amount: u32) -> u32 {
    hp.saturating_add(amount).min(max_hp)
}

/// Encounter system that queues one exchange of blows per overlapping enemy.
#[derive(Debug, Default)]
pub struct Combat {
    scratch: Vec<Command>,
}

impl Combat {
    /// Creates a new combat system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits state and strike commands for every living enemy sharing the player's cell.
    ///
    /// The player strikes first. The enemy's counterattack is queued
    /// unconditionally and discarded by the world if the first strike killed it.
    pub fn handle(&mut self, player: &PlayerSnapshot, enemies: &EnemyView, out: &mut Vec<Command>) {
        if player.stats.is_defeated() {
            return;
        }

        self.scratch.clear();

        for enemy in enemies.iter() {
            if enemy.position != player.position || enemy.state == EnemyState::Dead {
                continue;
            }

            if enemy.state != EnemyState::Combat {
                self.scratch.push(Command::SetEnemyState {
                    enemy: enemy.id,
                    state: EnemyState::Combat,
                });
            }
            self.scratch.push(Command::Strike {
                attacker: Combatant::Player,
                defender: Combatant::Enemy(enemy.id),
            });
            self.scratch.push(Command::Strike {
                attacker: Combatant::Enemy(enemy.id),
                defender: Combatant::Player,
            });
        }

        if self.scratch.is_empty() {
            return;
        }

        out.reserve(self.scratch.len());
        out.append(&mut self.scratch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dungeon_crawler_core::{CombatStats, Coordinate, EnemyId, EnemySnapshot, EnemyType};
    use proptest::prelude::*;

    #[test]
    fn defense_above_attack_still_deals_one_damage() {
        assert_eq!(
            resolve_damage(10, 15, 5),
            DamageOutcome {
                damage: 1,
                hp: 4,
                died: false,
            }
        );
    }

    #[test]
    fn overkill_clamps_hp_at_zero() {
        assert_eq!(
            resolve_damage(20, 5, 10),
            DamageOutcome {
                damage: 15,
                hp: 0,
                died: true,
            }
        );
    }

    #[test]
    fn heal_clamps_to_maximum() {
        assert_eq!(heal(90, 100, 30), 100);
        assert_eq!(heal(40, 100, 30), 70);
    }

    #[test]
    fn overlapping_enemies_trade_blows() {
        let mut system = Combat::new();
        let view = EnemyView::from_snapshots(vec![
            enemy(4, Coordinate::new(3, 3), EnemyState::Chasing),
            enemy(1, Coordinate::new(2, 3), EnemyState::Chasing),
            enemy(2, Coordinate::new(3, 3), EnemyState::Combat),
        ]);
        let mut out = Vec::new();

        system.handle(&player(Coordinate::new(3, 3), 100), &view, &mut out);

        assert_eq!(
            out,
            vec![
                Command::Strike {
                    attacker: Combatant::Player,
                    defender: Combatant::Enemy(EnemyId::new(2)),
                },
                Command::Strike {
                    attacker: Combatant::Enemy(EnemyId::new(2)),
                    defender: Combatant::Player,
                },
                Command::SetEnemyState {
                    enemy: EnemyId::new(4),
                    state: EnemyState::Combat,
                },
                Command::Strike {
                    attacker: Combatant::Player,
                    defender: Combatant::Enemy(EnemyId::new(4)),
                },
                Command::Strike {
                    attacker: Combatant::Enemy(EnemyId::new(4)),
                    defender: Combatant::Player,
                },
            ]
        );
    }

    #[test]
    fn defeated_player_is_silent() {
        let mut system = Combat::new();
        let view = EnemyView::from_snapshots(vec![enemy(
            1,
            Coordinate::new(0, 0),
            EnemyState::Chasing,
        )]);
        let mut out = Vec::new();

        system.handle(&player(Coordinate::new(0, 0), 0), &view, &mut out);

        assert!(out.is_empty());
    }

    proptest! {
        #[test]
        fn resolved_hp_stays_within_bounds(attack in 0u32..500, defense in 0u32..500, hp in 0u32..500) {
            let outcome = resolve_damage(attack, defense, hp);
            prop_assert!(outcome.damage >= 1);
            prop_assert!(outcome.hp <= hp);
            prop_assert_eq!(outcome.died, outcome.hp == 0);
        }

        #[test]
        fn heal_never_exceeds_maximum(max_hp in 0u32..1_000, hp_ratio in 0u32..=100, amount in 0u32..1_000) {
            let hp = max_hp * hp_ratio / 100;
            let healed = heal(hp, max_hp, amount);
            prop_assert!(healed <= max_hp);
            prop_assert!(healed >= hp);
        }
    }

    fn enemy(id: u32, position: Coordinate, state: EnemyState) -> EnemySnapshot {
        EnemySnapshot {
            id: EnemyId::new(id),
            kind: EnemyType::Goblin,
            position,
            stats: EnemyType::Goblin.base_stats(),
            state,
            next_waypoint: None,
            path_len: 0,
        }
    }

    fn player(position: Coordinate, hp: u32) -> PlayerSnapshot {
        let stats = CombatStats::new(100, 10, 5).with_hp(hp);
        PlayerSnapshot {
            position,
            stats,
            attack: stats.attack(),
            defense: stats.defense(),
            level: 1,
            experience: 0,
        }
    }
}
