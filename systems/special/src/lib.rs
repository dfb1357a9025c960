#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Special meter system: fills once per round and powers a heavy attack.

use plant_duel_core::{Event, MeterSnapshot, SideEffects};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Tuning for the special attack and its meter.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Meter value required to unleash the special.
    pub meter_max: u32,
    /// Flat damage dealt by a connecting special.
    pub damage: u32,
    /// Extra damage against a soaked target.
    pub bonus_vs_soaked: u32,
    /// Extra damage against a rooted target.
    pub bonus_vs_rooted: u32,
    /// Extra damage against a burning target.
    pub bonus_vs_burning: u32,
    /// Whether a connecting special washes away the target's soak.
    pub consumes_soaked: bool,
    /// Hit chance with no prior consecutive hits.
    pub base_hit_chance: f32,
    /// Hit chance gained per consecutive hit.
    pub hit_chance_per_streak: f32,
    /// Upper bound for the hit chance.
    pub max_hit_chance: f32,
    /// Skips the hit roll entirely so every special connects.
    pub always_hit: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            meter_max: 7,
            damage: 5,
            bonus_vs_soaked: 2,
            bonus_vs_rooted: 1,
            bonus_vs_burning: 1,
            consumes_soaked: true,
            base_hit_chance: 0.30,
            hit_chance_per_streak: 0.10,
            max_hit_chance: 0.95,
            always_hit: true,
        }
    }
}

/// Special meter and hit-streak bookkeeping.
#[derive(Clone, Debug)]
pub struct Special {
    config: Config,
    meter: u32,
    hit_streak: u32,
    was_ready: bool,
}

impl Special {
    /// Creates an empty meter.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self {
            config,
            meter: 0,
            hit_streak: 0,
            was_ready: false,
        }
    }

    /// Tuning the system was created with.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Current meter value.
    #[must_use]
    pub const fn meter(&self) -> u32 {
        self.meter
    }

    /// Consecutive specials that connected.
    #[must_use]
    pub const fn hit_streak(&self) -> u32 {
        self.hit_streak
    }

    /// Reports whether the meter is full.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.meter >= self.config.meter_max
    }

    /// Adds `amount` to the meter, clamped to capacity.
    ///
    /// Emits [`Event::SpecialReady`] only on the transition into the full
    /// state, so repeated increments at capacity stay silent.
    pub fn increment(&mut self, amount: u32, out: &mut Vec<Event>) {
        self.meter = self.meter.saturating_add(amount).min(self.config.meter_max);
        self.refresh(out);
    }

    /// Empties the meter after the special was unleashed.
    pub fn consume(&mut self, out: &mut Vec<Event>) {
        self.meter = 0;
        self.refresh(out);
    }

    /// Empties the meter and forgets the hit streak after the player fell.
    pub fn reset(&mut self, out: &mut Vec<Event>) {
        self.hit_streak = 0;
        self.consume(out);
    }

    /// Damage a connecting special deals against a target with `effects`.
    #[must_use]
    pub fn calculate_damage(&self, effects: &SideEffects) -> u32 {
        let mut damage = self.config.damage;
        if effects.soaked {
            damage = damage.saturating_add(self.config.bonus_vs_soaked);
        }
        if effects.sun_locked {
            damage = damage.saturating_add(self.config.bonus_vs_rooted);
        }
        if effects.is_burning() {
            damage = damage.saturating_add(self.config.bonus_vs_burning);
        }
        damage
    }

    /// Probability that the next special connects.
    #[must_use]
    pub fn hit_chance(&self) -> f32 {
        let streak = self.hit_streak as f32;
        let chance = self.config.base_hit_chance + self.config.hit_chance_per_streak * streak;
        chance.min(self.config.max_hit_chance).clamp(0.0, 1.0)
    }

    /// Decides whether the next special connects.
    ///
    /// No randomness is drawn while `always_hit` is set.
    pub fn roll_hit<R>(&self, rng: &mut R) -> bool
    where
        R: Rng + ?Sized,
    {
        if self.config.always_hit {
            return true;
        }
        rng.gen::<f32>() < self.hit_chance()
    }

    /// Records a connecting special.
    pub fn record_hit(&mut self) {
        self.hit_streak = self.hit_streak.saturating_add(1);
    }

    /// Records a missed special.
    pub fn record_miss(&mut self) {
        self.hit_streak = 0;
    }

    /// Read-only view of the meter for presentation.
    #[must_use]
    pub fn snapshot(&self) -> MeterSnapshot {
        MeterSnapshot {
            value: self.meter,
            max: self.config.meter_max,
            ready: self.is_ready(),
            hit_chance: self.hit_chance(),
        }
    }

    fn refresh(&mut self, out: &mut Vec<Event>) {
        out.push(Event::SpecialMeterChanged {
            value: self.meter,
            max: self.config.meter_max,
        });

        let ready = self.is_ready();
        if ready && !self.was_ready {
            out.push(Event::SpecialReady);
        }
        self.was_ready = ready;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_chance_grows_with_streak_up_to_the_cap() {
        let mut special = Special::new(Config::default());
        assert!((special.hit_chance() - 0.30).abs() < 1e-6);

        special.record_hit();
        special.record_hit();
        assert!((special.hit_chance() - 0.50).abs() < 1e-6);

        for _ in 0..20 {
            special.record_hit();
        }
        assert!((special.hit_chance() - 0.95).abs() < 1e-6);

        special.record_miss();
        assert_eq!(special.hit_streak(), 0);
    }
}
