#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Plant Duel engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative battle, and pure systems. Adapters submit [`Command`] values
//! describing player intent, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values that adapters
//! translate into text, sound and animation. Systems operate on the plain
//! data types declared here and never reach for presentation concerns.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Plant Duel.";

/// Order in which the countdown words are called before every reveal.
pub const CADENCE: [Move; 3] = [Move::Sun, Move::Soil, Move::Water];

/// Elements a combatant may throw during a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    /// Scorching throw; beats Water, loses to Soil.
    Sun,
    /// Drenching throw; beats Soil, loses to Sun.
    Water,
    /// Smothering throw; beats Sun, loses to Water.
    Soil,
}

impl Move {
    /// Every move in declaration order.
    pub const ALL: [Move; 3] = [Move::Sun, Move::Water, Move::Soil];

    /// Reports whether `self` defeats `other`.
    ///
    /// The cycle is Soil > Sun > Water > Soil; identical moves never beat
    /// each other.
    #[must_use]
    pub const fn beats(self, other: Move) -> bool {
        matches!(
            (self, other),
            (Move::Soil, Move::Sun) | (Move::Sun, Move::Water) | (Move::Water, Move::Soil)
        )
    }

    /// Status effect a winning throw of this element can inflict.
    #[must_use]
    pub const fn status(self) -> StatusKind {
        match self {
            Self::Sun => StatusKind::Burn,
            Self::Water => StatusKind::Soak,
            Self::Soil => StatusKind::Root,
        }
    }

    /// Human readable name of the move.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sun => "Sun",
            Self::Water => "Water",
            Self::Soil => "Soil",
        }
    }
}

/// Result of comparing both throws of a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The player's move beat the enemy's move.
    PlayerWins,
    /// The enemy's move beat the player's move.
    EnemyWins,
    /// Both sides threw the same move.
    Tie,
}

/// Identifies one of the two combatants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The human-controlled combatant.
    Player,
    /// The currently spawned plant.
    Enemy,
}

/// Status effects that can be inflicted by winning throws.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusKind {
    /// Damage over time applied at the end of each round.
    Burn,
    /// Makes the target take bonus damage from the next Sun hit.
    Soak,
    /// Locks the target out of throwing Sun for its next pick.
    Root,
}

impl StatusKind {
    /// Human readable name of the status.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Burn => "Burning",
            Self::Soak => "Soaked",
            Self::Root => "Rooted",
        }
    }
}

/// Distinguishes grunts from boss encounters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyType {
    /// Regular enemy fought before the boss of each cycle.
    Normal,
    /// Boss enemy closing a cycle.
    Boss,
}

/// Bosses rotated through during a set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BossKind {
    /// Sun elemental boss; unlocks Burn.
    Sun,
    /// Water elemental boss; unlocks Soak.
    Water,
    /// Soil elemental boss; unlocks Root.
    Soil,
    /// Closing boss of a set; wields every element.
    Final,
}

impl BossKind {
    /// Elemental bosses that make up the shuffled portion of each set.
    pub const ELEMENTAL: [BossKind; 3] = [BossKind::Sun, BossKind::Water, BossKind::Soil];

    /// Element wielded by the boss, or `None` for the final boss.
    #[must_use]
    pub const fn element(self) -> Option<Move> {
        match self {
            Self::Sun => Some(Move::Sun),
            Self::Water => Some(Move::Water),
            Self::Soil => Some(Move::Soil),
            Self::Final => None,
        }
    }

    /// Permanent ability granted to the player after defeating the boss.
    #[must_use]
    pub const fn unlock(self) -> Option<StatusKind> {
        match self.element() {
            Some(element) => Some(element.status()),
            None => None,
        }
    }

    /// Reports whether this is the set-closing final boss.
    #[must_use]
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Final)
    }
}

/// Abilities the player has earned by defeating elemental bosses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Unlocks {
    burn: bool,
    soak: bool,
    root: bool,
}

impl Unlocks {
    /// Creates an empty set of unlocks.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            burn: false,
            soak: false,
            root: false,
        }
    }

    /// Creates a set containing every unlock.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            burn: true,
            soak: true,
            root: true,
        }
    }

    /// Reports whether the provided ability has been earned.
    #[must_use]
    pub const fn has(&self, status: StatusKind) -> bool {
        match status {
            StatusKind::Burn => self.burn,
            StatusKind::Soak => self.soak,
            StatusKind::Root => self.root,
        }
    }

    /// Grants the ability, returning `true` when it was not held before.
    pub fn grant(&mut self, status: StatusKind) -> bool {
        let slot = match status {
            StatusKind::Burn => &mut self.burn,
            StatusKind::Soak => &mut self.soak,
            StatusKind::Root => &mut self.root,
        };
        let newly_granted = !*slot;
        *slot = true;
        newly_granted
    }
}

/// Applies a signed delta to a health pool, clamping into `0..=max`.
#[must_use]
pub fn apply_health_delta(health: u32, max: u32, delta: i32) -> u32 {
    let next = i64::from(health) + i64::from(delta);
    let clamped = next.clamp(0, i64::from(max));
    u32::try_from(clamped).unwrap_or(0)
}

/// Enemy currently occupying the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Enemy {
    enemy_type: EnemyType,
    max_health: u32,
    health: u32,
}

impl Enemy {
    /// Creates an enemy at full health.
    #[must_use]
    pub const fn new(enemy_type: EnemyType, max_health: u32) -> Self {
        Self {
            enemy_type,
            max_health,
            health: max_health,
        }
    }

    /// Whether the enemy is a grunt or a boss.
    #[must_use]
    pub const fn enemy_type(&self) -> EnemyType {
        self.enemy_type
    }

    /// Health the enemy spawned with.
    #[must_use]
    pub const fn max_health(&self) -> u32 {
        self.max_health
    }

    /// Health the enemy has left.
    #[must_use]
    pub const fn health(&self) -> u32 {
        self.health
    }

    /// Applies a signed health delta, clamped into `0..=max_health`.
    pub fn apply_delta(&mut self, delta: i32) {
        self.health = apply_health_delta(self.health, self.max_health, delta);
    }

    /// Reports whether the enemy has no health left.
    #[must_use]
    pub const fn is_defeated(&self) -> bool {
        self.health == 0
    }
}

/// Status effects currently affecting a single combatant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideEffects {
    /// Next Sun hit against this side deals bonus damage.
    pub soaked: bool,
    /// This side may not throw Sun on its next pick.
    pub sun_locked: bool,
    /// Remaining end-of-round burn ticks.
    pub burn_turns: u32,
}

impl SideEffects {
    /// Reports whether at least one burn tick is pending.
    #[must_use]
    pub const fn is_burning(&self) -> bool {
        self.burn_turns > 0
    }

    /// Reports whether no status is active.
    #[must_use]
    pub const fn is_clear(&self) -> bool {
        !self.soaked && !self.sun_locked && self.burn_turns == 0
    }

    /// Reports whether the provided status is active.
    #[must_use]
    pub const fn has(&self, status: StatusKind) -> bool {
        match status {
            StatusKind::Burn => self.is_burning(),
            StatusKind::Soak => self.soaked,
            StatusKind::Root => self.sun_locked,
        }
    }
}

/// Status flags for both combatants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EffectsState {
    /// Effects on the player.
    pub player: SideEffects,
    /// Effects on the enemy.
    pub enemy: SideEffects,
}

impl EffectsState {
    /// Clears every flag and counter on both sides.
    pub fn reset_all(&mut self) {
        *self = Self::default();
    }

    /// Effects affecting the provided side.
    #[must_use]
    pub const fn side(&self, side: Side) -> &SideEffects {
        match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        }
    }

    /// Mutable effects affecting the provided side.
    pub fn side_mut(&mut self, side: Side) -> &mut SideEffects {
        match side {
            Side::Player => &mut self.player,
            Side::Enemy => &mut self.enemy,
        }
    }
}

/// Health deltas produced by resolving a round. Negative values are damage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnResult {
    /// Change applied to the player's health.
    pub player_hp_delta: i32,
    /// Change applied to the enemy's health.
    pub enemy_hp_delta: i32,
}

impl TurnResult {
    /// Delta recorded for the provided side.
    #[must_use]
    pub const fn delta(&self, side: Side) -> i32 {
        match side {
            Side::Player => self.player_hp_delta,
            Side::Enemy => self.enemy_hp_delta,
        }
    }

    /// Records `amount` points of damage against the provided side.
    pub fn damage(&mut self, side: Side, amount: u32) {
        let amount = i32::try_from(amount).unwrap_or(i32::MAX);
        let slot = match side {
            Side::Player => &mut self.player_hp_delta,
            Side::Enemy => &mut self.enemy_hp_delta,
        };
        *slot = slot.saturating_sub(amount);
    }
}

/// What the player committed to for a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerAction {
    /// A regular elemental throw.
    Throw(Move),
    /// The special attack, available only with a full meter.
    Special,
}

/// Text cue displayed on one side during a round's countdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CadenceCue {
    /// Countdown word, rendered as `"Sun..."`.
    Count(Move),
    /// Final reveal of a throw, rendered as `"Sun!"`.
    Reveal(Move),
    /// Reveal of the player's special attack.
    Special,
}

/// Reasons a command may be rejected by the battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectionReason {
    /// A round is still being presented; input is locked until it resolves.
    InputLocked,
    /// The special meter is not full.
    SpecialNotReady,
    /// The requested move is blocked by a status effect.
    MoveLocked {
        /// Move the player attempted to throw.
        blocked: Move,
    },
}

/// Commands that express all permissible battle mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Starts a round in which the player throws the provided move.
    ChooseMove {
        /// Element thrown by the player.
        chosen: Move,
    },
    /// Starts a round in which the player unleashes the special attack.
    UnleashSpecial,
    /// Advances the presentation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
}

/// Events broadcast by the battle after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// A fresh cycle began; the player is back at full health.
    CycleStarted {
        /// Set the cycle belongs to.
        set: u32,
        /// Index of the cycle within the set, starting at 1.
        cycle: u32,
    },
    /// A new enemy entered the arena.
    EnemySpawned {
        /// The freshly spawned enemy.
        enemy: Enemy,
        /// Boss identity when the enemy is a boss.
        boss: Option<BossKind>,
    },
    /// A boss announced itself.
    BossAppeared {
        /// Boss that appeared.
        kind: BossKind,
    },
    /// Player input was locked while a round is presented.
    InputLocked,
    /// Player input became available again.
    InputUnlocked,
    /// A countdown beat elapsed and both sides show a new cue.
    CadenceBeat {
        /// Cue displayed on the player's side.
        player: CadenceCue,
        /// Cue displayed on the enemy's side.
        enemy: CadenceCue,
    },
    /// A status effect took hold of a combatant.
    StatusApplied {
        /// Side affected by the status.
        side: Side,
        /// Status that was applied.
        status: StatusKind,
    },
    /// A status effect was consumed by a hit exploiting it.
    StatusConsumed {
        /// Side that lost the status.
        side: Side,
        /// Status that was consumed.
        status: StatusKind,
    },
    /// A burn ticked at the end of a round.
    BurnTicked {
        /// Side that took burn damage.
        side: Side,
        /// Damage dealt by the tick.
        damage: u32,
        /// Burn ticks still pending afterwards.
        remaining: u32,
    },
    /// A combatant lost health.
    CombatantStruck {
        /// Side that took damage.
        side: Side,
        /// Health actually removed after clamping.
        amount: u32,
        /// Health left after the hit.
        remaining: u32,
    },
    /// A round of regular throws was resolved.
    RoundResolved {
        /// Move thrown by the player.
        player_move: Move,
        /// Move thrown by the enemy.
        enemy_move: Move,
        /// Winner of the exchange.
        outcome: Outcome,
        /// Health deltas produced by the round, before clamping.
        result: TurnResult,
    },
    /// The special meter changed value.
    SpecialMeterChanged {
        /// Current meter value.
        value: u32,
        /// Meter capacity.
        max: u32,
    },
    /// The special meter just became full.
    SpecialReady,
    /// The player's special attack was resolved.
    SpecialUnleashed {
        /// Whether the attack connected.
        hit: bool,
        /// Damage dealt to the enemy.
        damage: u32,
    },
    /// The current enemy ran out of health.
    EnemyDefeated {
        /// Type of the defeated enemy.
        enemy_type: EnemyType,
        /// Boss identity when the enemy was a boss.
        boss: Option<BossKind>,
    },
    /// The player earned a permanent ability.
    AbilityUnlocked {
        /// Ability that was unlocked.
        ability: StatusKind,
    },
    /// The final boss fell and the next, tougher set begins.
    SetCleared {
        /// Set that was just completed.
        completed: u32,
        /// Set that begins now.
        next: u32,
    },
    /// The player ran out of health; progress restarts from the first set.
    PlayerDefeated,
    /// Reports that a command was rejected.
    CommandRejected {
        /// Specific reason the command failed.
        reason: RejectionReason,
    },
}

/// Availability of each input the player can press.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Controls {
    /// Whether Sun may be thrown.
    pub sun: bool,
    /// Whether Water may be thrown.
    pub water: bool,
    /// Whether Soil may be thrown.
    pub soil: bool,
    /// Whether the special attack may be unleashed.
    pub special: bool,
}

impl Controls {
    /// Controls with every input disabled.
    #[must_use]
    pub const fn locked() -> Self {
        Self {
            sun: false,
            water: false,
            soil: false,
            special: false,
        }
    }

    /// Reports whether the provided move may be thrown.
    #[must_use]
    pub const fn allows(&self, chosen: Move) -> bool {
        match chosen {
            Move::Sun => self.sun,
            Move::Water => self.water,
            Move::Soil => self.soil,
        }
    }
}

/// Read-only view of the special meter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeterSnapshot {
    /// Current meter value.
    pub value: u32,
    /// Meter capacity.
    pub max: u32,
    /// Whether the special attack is available.
    pub ready: bool,
    /// Probability the next special connects, in `0.0..=1.0`.
    pub hit_chance: f32,
}

/// Immutable snapshot of the battle used by presentation adapters.
#[derive(Clone, Debug, PartialEq)]
pub struct BattleSnapshot {
    /// Player health left.
    pub player_health: u32,
    /// Player health capacity.
    pub player_max_health: u32,
    /// Enemy currently in the arena.
    pub enemy: Enemy,
    /// Boss identity when the enemy is a boss.
    pub boss: Option<BossKind>,
    /// Active status effects on both sides.
    pub effects: EffectsState,
    /// Abilities earned by the player.
    pub unlocks: Unlocks,
    /// Special meter state.
    pub special: MeterSnapshot,
    /// Current set, starting at 1.
    pub set_number: u32,
    /// Current cycle within the set, starting at 1.
    pub cycle_number: u32,
    /// Inputs currently available to the player.
    pub controls: Controls,
}
