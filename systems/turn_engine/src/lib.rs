#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that resolves a round of throws into health deltas.
//!
//! The engine never touches health pools directly. It reports the deltas a
//! round produced, mutates the shared [`EffectsState`] as statuses are
//! inflicted or consumed, and narrates those status changes as [`Event`]
//! values so the battle can forward them to adapters.

use plant_duel_core::{
    BossKind, EffectsState, EnemyType, Event, Move, Outcome, Side, StatusKind, TurnResult, Unlocks,
};
use serde::{Deserialize, Serialize};

/// Damage figures applied when resolving rounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DamageTable {
    /// Damage dealt by a winning player throw.
    pub player_damage: u32,
    /// Damage dealt by a winning grunt throw.
    pub normal_damage: u32,
    /// Damage dealt by a winning boss throw.
    pub boss_damage: u32,
    /// Extra damage a Sun hit deals against a soaked target.
    pub soak_bonus: u32,
    /// Number of end-of-round ticks a fresh burn lasts.
    pub burn_turns: u32,
    /// Damage dealt by each burn tick.
    pub burn_damage: u32,
}

impl Default for DamageTable {
    fn default() -> Self {
        Self {
            player_damage: 1,
            normal_damage: 1,
            boss_damage: 1,
            soak_bonus: 2,
            burn_turns: 2,
            burn_damage: 1,
        }
    }
}

/// Everything the engine needs to know about a single exchange of throws.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Exchange {
    /// Move thrown by the player.
    pub player_move: Move,
    /// Move thrown by the enemy.
    pub enemy_move: Move,
    /// Whether the enemy is a grunt or a boss.
    pub enemy_type: EnemyType,
    /// Boss currently active in the rotation. Ignored for grunts.
    pub boss_kind: BossKind,
}

/// Compares both throws. Soil beats Sun, Sun beats Water, Water beats Soil.
#[must_use]
pub const fn resolve(player: Move, enemy: Move) -> Outcome {
    if player.beats(enemy) {
        Outcome::PlayerWins
    } else if enemy.beats(player) {
        Outcome::EnemyWins
    } else {
        Outcome::Tie
    }
}

/// Reports whether `chosen` is the element wielded by `boss`.
#[must_use]
pub fn move_matches_boss(chosen: Move, boss: BossKind) -> bool {
    boss.element() == Some(chosen)
}

/// Turn resolution system.
#[derive(Clone, Debug, Default)]
pub struct TurnEngine {
    damage: DamageTable,
}

impl TurnEngine {
    /// Creates a turn engine using the provided damage table.
    #[must_use]
    pub const fn new(damage: DamageTable) -> Self {
        Self { damage }
    }

    /// Damage table the engine resolves rounds with.
    #[must_use]
    pub const fn damage(&self) -> &DamageTable {
        &self.damage
    }

    /// Resolves an exchange, including the end-of-round burn ticks.
    ///
    /// Player statuses are gated on `unlocks`; enemy statuses are only ever
    /// inflicted by bosses, and only with their own element unless the boss
    /// is the final one.
    pub fn apply_outcome(
        &self,
        exchange: Exchange,
        unlocks: Unlocks,
        effects: &mut EffectsState,
        out: &mut Vec<Event>,
    ) -> TurnResult {
        let mut result = TurnResult::default();

        match resolve(exchange.player_move, exchange.enemy_move) {
            Outcome::PlayerWins => {
                let mut damage = self.damage.player_damage;
                if unlocks.has(StatusKind::Soak)
                    && exchange.player_move == Move::Sun
                    && effects.enemy.soaked
                {
                    damage = damage.saturating_add(self.damage.soak_bonus);
                    effects.enemy.soaked = false;
                    out.push(Event::StatusConsumed {
                        side: Side::Enemy,
                        status: StatusKind::Soak,
                    });
                }
                result.damage(Side::Enemy, damage);

                if unlocks.has(exchange.player_move.status()) {
                    self.inflict(effects, Side::Enemy, exchange.player_move, out);
                }
            }
            Outcome::EnemyWins => {
                let mut damage = match exchange.enemy_type {
                    EnemyType::Boss => self.damage.boss_damage,
                    EnemyType::Normal => self.damage.normal_damage,
                };
                if effects.player.soaked && exchange.enemy_move == Move::Sun {
                    damage = damage.saturating_add(self.damage.soak_bonus);
                    effects.player.soaked = false;
                    out.push(Event::StatusConsumed {
                        side: Side::Player,
                        status: StatusKind::Soak,
                    });
                }

                if exchange.enemy_type == EnemyType::Boss
                    && (exchange.boss_kind.is_final()
                        || move_matches_boss(exchange.enemy_move, exchange.boss_kind))
                {
                    self.inflict(effects, Side::Player, exchange.enemy_move, out);
                }
                result.damage(Side::Player, damage);
            }
            Outcome::Tie => {}
        }

        self.tick_burns(effects, &mut result, out);
        result
    }

    /// Applies one burn tick to every burning side, enemy first.
    pub fn tick_burns(
        &self,
        effects: &mut EffectsState,
        result: &mut TurnResult,
        out: &mut Vec<Event>,
    ) {
        for side in [Side::Enemy, Side::Player] {
            let affected = effects.side_mut(side);
            if !affected.is_burning() {
                continue;
            }

            affected.burn_turns -= 1;
            result.damage(side, self.damage.burn_damage);
            out.push(Event::BurnTicked {
                side,
                damage: self.damage.burn_damage,
                remaining: affected.burn_turns,
            });
        }
    }

    fn inflict(&self, effects: &mut EffectsState, side: Side, element: Move, out: &mut Vec<Event>) {
        let target = effects.side_mut(side);
        match element {
            Move::Water => target.soaked = true,
            Move::Soil => target.sun_locked = true,
            Move::Sun => target.burn_turns = self.damage.burn_turns,
        }
        out.push(Event::StatusApplied {
            side,
            status: element.status(),
        });
    }
}
