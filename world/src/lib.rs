#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative battle state for Plant Duel.
//!
//! The world owns the player, the current enemy and every system involved in
//! a fight. Adapters mutate it exclusively through [`apply`] and observe it
//! through the [`query`] module and the emitted [`Event`] stream.

mod config;
mod round;

use std::time::Duration;

use plant_duel_core::{
    apply_health_delta, BossKind, Command, EffectsState, Enemy, EnemyType, Event, Move,
    PlayerAction, RejectionReason, Side, StatusKind, TurnResult, Unlocks, WELCOME_BANNER,
};
use plant_duel_system_special::Special;
use plant_duel_system_spawning::{BossAdvance, Spawning};
use plant_duel_system_turn_engine::{resolve, Exchange, TurnEngine};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

pub use config::{BattleConfig, ConfigError, PlayerConfig, TimingConfig, DEFAULT_SEED};

use round::{PendingRound, Stage};

/// Keeps the boss rotation independent from enemy picks drawn off the same seed.
const SPAWNING_SEED_SALT: u64 = 0x42f0_e1eb_d4a5_3c21;

const MOVES_WHILE_ROOTED: [Move; 2] = [Move::Water, Move::Soil];

/// Represents the authoritative Plant Duel battle state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    config: BattleConfig,
    player_health: u32,
    enemy: Enemy,
    boss: Option<BossKind>,
    effects: EffectsState,
    unlocks: Unlocks,
    engine: TurnEngine,
    spawning: Spawning,
    special: Special,
    rng: ChaCha8Rng,
    round: Option<PendingRound>,
}

impl World {
    /// Creates a battle and starts its first cycle.
    ///
    /// The opening `CycleStarted` and `EnemySpawned` events are appended to
    /// `out_events` so adapters can present the first enemy.
    #[must_use]
    pub fn new(config: BattleConfig, out_events: &mut Vec<Event>) -> Self {
        let seed = config.seed();
        let mut world = Self {
            banner: WELCOME_BANNER,
            player_health: config.player.max_health,
            enemy: Enemy::new(EnemyType::Normal, config.spawning.normal_health),
            boss: None,
            effects: EffectsState::default(),
            unlocks: config.player.starting_unlocks,
            engine: TurnEngine::new(config.damage),
            spawning: Spawning::new(config.spawning, seed ^ SPAWNING_SEED_SALT),
            special: Special::new(config.special),
            rng: ChaCha8Rng::seed_from_u64(seed),
            round: None,
            config,
        };
        world.start_cycle(out_events);
        world
    }

    fn begin_round(&mut self, action: PlayerAction, out_events: &mut Vec<Event>) {
        if self.round.is_some() {
            self.reject(RejectionReason::InputLocked, out_events);
            return;
        }

        match action {
            PlayerAction::Throw(Move::Sun) if self.effects.player.sun_locked => {
                self.reject(RejectionReason::MoveLocked { blocked: Move::Sun }, out_events);
                return;
            }
            PlayerAction::Special if !self.special.is_ready() => {
                self.reject(RejectionReason::SpecialNotReady, out_events);
                return;
            }
            _ => {}
        }

        self.lift_root(Side::Player, out_events);
        let enemy_rooted = self.effects.enemy.sun_locked;
        let enemy_move = self.pick_enemy_move(out_events);

        out_events.push(Event::InputLocked);
        self.round = Some(PendingRound::new(action, enemy_move, enemy_rooted));
        self.advance_round(Duration::ZERO, out_events);
    }

    fn pick_enemy_move(&mut self, out_events: &mut Vec<Event>) -> Move {
        let allowed: &[Move] = if self.effects.enemy.sun_locked {
            &MOVES_WHILE_ROOTED
        } else {
            &Move::ALL
        };
        let chosen = allowed[self.rng.gen_range(0..allowed.len())];
        self.lift_root(Side::Enemy, out_events);
        chosen
    }

    /// A root blocks exactly one pick, so it lifts as soon as a pick is made.
    fn lift_root(&mut self, side: Side, out_events: &mut Vec<Event>) {
        let affected = self.effects.side_mut(side);
        if affected.sun_locked {
            affected.sun_locked = false;
            out_events.push(Event::StatusConsumed {
                side,
                status: StatusKind::Root,
            });
        }
    }

    fn advance_round(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        let beat = self.config.timing.beat();
        let Some(round) = self.round.as_mut() else {
            return;
        };

        let mut due = Vec::new();
        round.advance(dt, beat, &mut due);

        for stage in due {
            match stage {
                Stage::Cue { player, enemy } => {
                    out_events.push(Event::CadenceBeat { player, enemy });
                }
                Stage::Resolve => {
                    if let Some(round) = self.round.take() {
                        self.resolve_round(round, out_events);
                    }
                }
            }
        }
    }

    fn resolve_round(&mut self, round: PendingRound, out_events: &mut Vec<Event>) {
        match round.action() {
            PlayerAction::Throw(player_move) => {
                self.resolve_throw(player_move, round.enemy_move(), out_events);
            }
            PlayerAction::Special => self.resolve_special(round.enemy_rooted(), out_events),
        }
        self.check_round_over(out_events);
        out_events.push(Event::InputUnlocked);
    }

    fn resolve_throw(&mut self, player_move: Move, enemy_move: Move, out_events: &mut Vec<Event>) {
        let exchange = Exchange {
            player_move,
            enemy_move,
            enemy_type: self.enemy.enemy_type(),
            boss_kind: self.spawning.current_boss(),
        };
        let result = self
            .engine
            .apply_outcome(exchange, self.unlocks, &mut self.effects, out_events);
        self.apply_result(result, out_events);

        let outcome = resolve(player_move, enemy_move);
        debug!(
            ?player_move,
            ?enemy_move,
            ?outcome,
            player_health = self.player_health,
            enemy_health = self.enemy.health(),
            "round resolved"
        );
        out_events.push(Event::RoundResolved {
            player_move,
            enemy_move,
            outcome,
            result,
        });
        self.special.increment(1, out_events);
    }

    /// `enemy_rooted` counts a root the enemy's pick already consumed this round.
    fn resolve_special(&mut self, enemy_rooted: bool, out_events: &mut Vec<Event>) {
        let hit = self.special.roll_hit(&mut self.rng);
        let damage = if hit {
            let mut target = self.effects.enemy;
            target.sun_locked |= enemy_rooted;
            self.special.calculate_damage(&target)
        } else {
            0
        };
        self.special.consume(out_events);

        let mut result = TurnResult::default();
        if hit {
            self.special.record_hit();
            result.damage(Side::Enemy, damage);
            if self.special.config().consumes_soaked && self.effects.enemy.soaked {
                self.effects.enemy.soaked = false;
                out_events.push(Event::StatusConsumed {
                    side: Side::Enemy,
                    status: StatusKind::Soak,
                });
            }
        } else {
            self.special.record_miss();
        }
        debug!(hit, damage, "special unleashed");
        out_events.push(Event::SpecialUnleashed { hit, damage });

        self.engine
            .tick_burns(&mut self.effects, &mut result, out_events);
        self.apply_result(result, out_events);
    }

    fn apply_result(&mut self, result: TurnResult, out_events: &mut Vec<Event>) {
        if result.enemy_hp_delta < 0 {
            let before = self.enemy.health();
            self.enemy.apply_delta(result.enemy_hp_delta);
            out_events.push(Event::CombatantStruck {
                side: Side::Enemy,
                amount: before - self.enemy.health(),
                remaining: self.enemy.health(),
            });
        }

        if result.player_hp_delta < 0 {
            let before = self.player_health;
            self.player_health = apply_health_delta(
                self.player_health,
                self.config.player.max_health,
                result.player_hp_delta,
            );
            out_events.push(Event::CombatantStruck {
                side: Side::Player,
                amount: before - self.player_health,
                remaining: self.player_health,
            });
        }
    }

    fn check_round_over(&mut self, out_events: &mut Vec<Event>) {
        if self.player_health == 0 {
            info!(
                set = self.spawning.set_number(),
                cycle = self.spawning.cycle_number(),
                "player defeated; progress restarts from the first set"
            );
            out_events.push(Event::PlayerDefeated);
            self.special.reset(out_events);
            self.spawning.reset_progress();
            self.start_cycle(out_events);
            return;
        }

        if !self.enemy.is_defeated() {
            return;
        }

        let enemy_type = self.enemy.enemy_type();
        out_events.push(Event::EnemyDefeated {
            enemy_type,
            boss: self.boss,
        });

        match enemy_type {
            EnemyType::Normal => self.spawn_next(out_events),
            EnemyType::Boss => {
                match self.spawning.advance_after_boss_defeat() {
                    BossAdvance::Elemental(kind) => {
                        info!(?kind, "boss defeated");
                        if let Some(ability) = kind.unlock() {
                            if self.unlocks.grant(ability) {
                                info!(?ability, "ability unlocked");
                                out_events.push(Event::AbilityUnlocked { ability });
                            }
                        }
                    }
                    BossAdvance::SetCleared { completed, next } => {
                        info!(completed, next, "final boss defeated; set cleared");
                        out_events.push(Event::SetCleared { completed, next });
                    }
                }
                self.start_cycle(out_events);
            }
        }
    }

    fn start_cycle(&mut self, out_events: &mut Vec<Event>) {
        self.spawning.start_new_cycle();
        self.player_health = self.config.player.max_health;
        self.effects.reset_all();
        out_events.push(Event::CycleStarted {
            set: self.spawning.set_number(),
            cycle: self.spawning.cycle_number(),
        });
        self.spawn_next(out_events);
    }

    fn spawn_next(&mut self, out_events: &mut Vec<Event>) {
        let spawned = self.spawning.spawn_next();
        self.enemy = spawned.enemy;
        self.boss = spawned.boss;
        out_events.push(Event::EnemySpawned {
            enemy: spawned.enemy,
            boss: spawned.boss,
        });
        if let Some(kind) = spawned.boss {
            out_events.push(Event::BossAppeared { kind });
        }
    }

    fn reject(&self, reason: RejectionReason, out_events: &mut Vec<Event>) {
        debug!(?reason, "command rejected");
        out_events.push(Event::CommandRejected { reason });
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ChooseMove { chosen } => {
            world.begin_round(PlayerAction::Throw(chosen), out_events);
        }
        Command::UnleashSpecial => world.begin_round(PlayerAction::Special, out_events),
        Command::Tick { dt } => world.advance_round(dt, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use plant_duel_core::{
        BattleSnapshot, BossKind, Controls, EffectsState, Enemy, MeterSnapshot, Unlocks,
    };

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Health the player has left.
    #[must_use]
    pub fn player_health(world: &World) -> u32 {
        world.player_health
    }

    /// Health the player starts every cycle with.
    #[must_use]
    pub fn player_max_health(world: &World) -> u32 {
        world.config.player.max_health
    }

    /// Enemy currently occupying the arena.
    #[must_use]
    pub fn enemy(world: &World) -> Enemy {
        world.enemy
    }

    /// Identity of the current enemy when it is a boss.
    #[must_use]
    pub fn boss(world: &World) -> Option<BossKind> {
        world.boss
    }

    /// Status effects active on both combatants.
    #[must_use]
    pub fn effects(world: &World) -> &EffectsState {
        &world.effects
    }

    /// Abilities the player has earned.
    #[must_use]
    pub fn unlocks(world: &World) -> Unlocks {
        world.unlocks
    }

    /// Current state of the special meter.
    #[must_use]
    pub fn special(world: &World) -> MeterSnapshot {
        world.special.snapshot()
    }

    /// Reports whether a round is being presented and input is locked.
    #[must_use]
    pub fn is_input_locked(world: &World) -> bool {
        world.round.is_some()
    }

    /// Inputs the player may currently press.
    #[must_use]
    pub fn controls(world: &World) -> Controls {
        if is_input_locked(world) {
            return Controls::locked();
        }

        Controls {
            sun: !world.effects.player.sun_locked,
            water: true,
            soil: true,
            special: world.special.is_ready(),
        }
    }

    /// Position within the set and boss rotation.
    #[must_use]
    pub fn progress(world: &World) -> Progress {
        Progress {
            set_number: world.spawning.set_number(),
            cycle_number: world.spawning.cycle_number(),
            hp_scale: world.spawning.hp_scale(),
            normals_remaining: world.spawning.normals_remaining(),
            pending_bosses: world.spawning.pending_bosses().collect(),
        }
    }

    /// Captures everything presentation adapters need in one value.
    #[must_use]
    pub fn snapshot(world: &World) -> BattleSnapshot {
        BattleSnapshot {
            player_health: world.player_health,
            player_max_health: world.config.player.max_health,
            enemy: world.enemy,
            boss: world.boss,
            effects: world.effects,
            unlocks: world.unlocks,
            special: world.special.snapshot(),
            set_number: world.spawning.set_number(),
            cycle_number: world.spawning.cycle_number(),
            controls: controls(world),
        }
    }

    /// Read-only description of the player's progression.
    #[derive(Clone, Debug, PartialEq)]
    pub struct Progress {
        /// Current set, starting at 1.
        pub set_number: u32,
        /// Current cycle within the set, starting at 1.
        pub cycle_number: u32,
        /// Health multiplier applied to every spawn of the set.
        pub hp_scale: f32,
        /// Grunts left before this cycle's boss.
        pub normals_remaining: u32,
        /// Elemental bosses still waiting in this set, in fight order.
        pub pending_bosses: Vec<BossKind>,
    }
}
