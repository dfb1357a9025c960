#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawning system that drives enemy progression.
//!
//! A cycle is `normals_per_cycle` grunts followed by one boss. Bosses are
//! drawn from a per-set queue holding each elemental boss exactly once in
//! shuffled order; once the queue is exhausted the final boss closes the set
//! and the next set begins with scaled-up health.

use std::collections::VecDeque;

use plant_duel_core::{BossKind, Enemy, EnemyType};
use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base health of a grunt in the first set.
    pub normal_health: u32,
    /// Base health of an elemental boss in the first set.
    pub boss_health: u32,
    /// Grunts fought before each boss.
    pub normals_per_cycle: u32,
    /// Factor applied to the health scale every time a set is cleared.
    pub hp_scale_per_set: f32,
    /// Extra health factor applied to the final boss.
    pub final_boss_hp_multiplier: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            normal_health: 5,
            boss_health: 10,
            normals_per_cycle: 1,
            hp_scale_per_set: 1.25,
            final_boss_hp_multiplier: 1.3,
        }
    }
}

/// Enemy produced by [`Spawning::spawn_next`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Spawned {
    /// The freshly created enemy at full health.
    pub enemy: Enemy,
    /// Boss identity when the enemy is a boss.
    pub boss: Option<BossKind>,
}

/// Progression change reported after a boss falls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BossAdvance {
    /// An elemental boss was removed from the set's queue.
    Elemental(BossKind),
    /// The final boss fell; a new, tougher set was started.
    SetCleared {
        /// Set that was just completed.
        completed: u32,
        /// Set that begins now.
        next: u32,
    },
}

/// Pure system that tracks waves, cycles, sets and the boss rotation.
#[derive(Debug)]
pub struct Spawning {
    config: Config,
    rng: ChaCha8Rng,
    pending_bosses: VecDeque<BossKind>,
    current_boss: BossKind,
    boss_is_final: bool,
    normals_remaining: u32,
    cycle_number: u32,
    set_number: u32,
    hp_scale: f32,
    wave: u32,
}

impl Spawning {
    /// Creates a spawning system positioned at the start of the first set.
    #[must_use]
    pub fn new(config: Config, rng_seed: u64) -> Self {
        let mut spawning = Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(rng_seed),
            pending_bosses: VecDeque::with_capacity(BossKind::ELEMENTAL.len()),
            current_boss: BossKind::Sun,
            boss_is_final: false,
            normals_remaining: 0,
            cycle_number: 1,
            set_number: 1,
            hp_scale: 1.0,
            wave: 1,
        };
        spawning.start_new_set();
        spawning
    }

    /// Refills the boss queue with every elemental boss in shuffled order.
    pub fn start_new_set(&mut self) {
        let mut bosses = BossKind::ELEMENTAL;
        bosses.shuffle(&mut self.rng);
        self.pending_bosses.clear();
        self.pending_bosses.extend(bosses);
        self.boss_is_final = false;
        self.cycle_number = 1;
        self.wave = 1;
    }

    /// Queues the grunts of a fresh cycle.
    pub fn start_new_cycle(&mut self) {
        self.normals_remaining = self.config.normals_per_cycle;
    }

    /// Produces the next enemy: a grunt while any remain, otherwise a boss.
    pub fn spawn_next(&mut self) -> Spawned {
        if self.normals_remaining > 0 {
            self.normals_remaining -= 1;
            let health = scaled_health(self.config.normal_health, self.hp_scale);
            return Spawned {
                enemy: Enemy::new(EnemyType::Normal, health),
                boss: None,
            };
        }

        if !self.boss_is_final {
            match self.pending_bosses.front() {
                Some(kind) => self.current_boss = *kind,
                None => {
                    self.boss_is_final = true;
                    self.current_boss = BossKind::Final;
                }
            }
        }

        let multiplier = if self.boss_is_final {
            self.config.final_boss_hp_multiplier
        } else {
            1.0
        };
        let health = scaled_health(self.config.boss_health, self.hp_scale * multiplier);
        self.wave = self.wave.saturating_add(1);

        Spawned {
            enemy: Enemy::new(EnemyType::Boss, health),
            boss: Some(self.current_boss),
        }
    }

    /// Advances the rotation after the current boss was defeated.
    ///
    /// The cycle counter moves forward after every boss, so the opening cycle
    /// of a freshly started set is numbered 2.
    pub fn advance_after_boss_defeat(&mut self) -> BossAdvance {
        let advance = if self.boss_is_final {
            let completed = self.set_number;
            self.set_number = self.set_number.saturating_add(1);
            self.hp_scale *= self.config.hp_scale_per_set;
            self.start_new_set();
            BossAdvance::SetCleared {
                completed,
                next: self.set_number,
            }
        } else {
            let defeated = self.current_boss;
            let _ = self.pending_bosses.pop_front();
            BossAdvance::Elemental(defeated)
        };
        self.cycle_number = self.cycle_number.saturating_add(1);
        advance
    }

    /// Rewinds progression to the first set after the player was defeated.
    pub fn reset_progress(&mut self) {
        self.set_number = 1;
        self.hp_scale = 1.0;
        self.start_new_set();
    }

    /// Current set, starting at 1.
    #[must_use]
    pub const fn set_number(&self) -> u32 {
        self.set_number
    }

    /// Current cycle within the set, starting at 1.
    #[must_use]
    pub const fn cycle_number(&self) -> u32 {
        self.cycle_number
    }

    /// Health multiplier applied to every spawn of the current set.
    #[must_use]
    pub const fn hp_scale(&self) -> f32 {
        self.hp_scale
    }

    /// Number of bosses spawned in the set so far, plus one.
    #[must_use]
    pub const fn wave(&self) -> u32 {
        self.wave
    }

    /// Boss most recently selected from the rotation.
    #[must_use]
    pub const fn current_boss(&self) -> BossKind {
        self.current_boss
    }

    /// Reports whether the final boss of the set has been reached.
    #[must_use]
    pub const fn boss_is_final(&self) -> bool {
        self.boss_is_final
    }

    /// Grunts left before this cycle's boss.
    #[must_use]
    pub const fn normals_remaining(&self) -> u32 {
        self.normals_remaining
    }

    /// Elemental bosses still waiting in this set, in fight order.
    pub fn pending_bosses(&self) -> impl Iterator<Item = BossKind> + '_ {
        self.pending_bosses.iter().copied()
    }
}

/// Scales a base health value, rounding half to even and never below 1.
fn scaled_health(base: u32, factor: f32) -> u32 {
    let value = (base as f32 * factor).round_ties_even();
    if !value.is_finite() || value < 1.0 {
        return 1;
    }
    value as u32
}
