#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Presentation contracts for Plant Duel adapters.
//!
//! The battle never talks to widgets, speakers or sprites. Adapters implement
//! the collaborator traits declared here and hand them to a [`Director`],
//! which turns the battle's event stream into collaborator calls.

mod text;

use std::time::Duration;

use plant_duel_core::{
    BattleSnapshot, BossKind, CadenceCue, Controls, Event, MeterSnapshot, Side,
};
use serde::{Deserialize, Deserializer, Serialize};

pub use text::{
    boss_title, cadence_text, hp_text, meter_text, set_cleared_text, status_text, unlock_text,
    wave_text, DEFEAT_TEXT,
};

/// Sound effects the battle requests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AudioCue {
    /// A regular throw or burn landed.
    NormalHit,
    /// The special attack connected.
    Special,
}

/// Sprite set shown for the current enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyVisual {
    /// Regular grunt.
    Grunt,
    /// One of the bosses.
    Boss(BossKind),
}

/// Element of the scene a shake is applied to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShakeTarget {
    /// The player's health readout.
    PlayerHealth,
    /// The enemy's health readout.
    EnemyHealth,
    /// The whole screen.
    Screen,
}

/// Shake parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Shake {
    /// How long the shake lasts, in milliseconds.
    pub duration_ms: u64,
    /// Peak displacement of the shake.
    pub magnitude: f32,
}

impl Shake {
    /// Default shake for a regular hit.
    pub const HIT: Self = Self {
        duration_ms: 1_200,
        magnitude: 12.0,
    };

    /// Default shake for a connecting special.
    pub const SPECIAL: Self = Self {
        duration_ms: 1_500,
        magnitude: 30.0,
    };

    /// How long the shake lasts.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

/// Shake table as written in TOML, where either key may be left out.
#[derive(Deserialize)]
struct PartialShake {
    duration_ms: Option<u64>,
    magnitude: Option<f32>,
}

impl PartialShake {
    fn or(self, fallback: Shake) -> Shake {
        Shake {
            duration_ms: self.duration_ms.unwrap_or(fallback.duration_ms),
            magnitude: self.magnitude.unwrap_or(fallback.magnitude),
        }
    }
}

fn hit_shake<'de, D>(deserializer: D) -> Result<Shake, D::Error>
where
    D: Deserializer<'de>,
{
    PartialShake::deserialize(deserializer).map(|partial| partial.or(Shake::HIT))
}

fn special_shake<'de, D>(deserializer: D) -> Result<Shake, D::Error>
where
    D: Deserializer<'de>,
{
    PartialShake::deserialize(deserializer).map(|partial| partial.or(Shake::SPECIAL))
}

/// Display names used for boss announcements.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BossNames {
    /// Sun elemental boss.
    pub sun: String,
    /// Water elemental boss.
    pub water: String,
    /// Soil elemental boss.
    pub soil: String,
    /// Set-closing boss.
    pub final_boss: String,
}

impl Default for BossNames {
    fn default() -> Self {
        Self {
            sun: "Sunny".to_owned(),
            water: "Watero".to_owned(),
            soil: "Soiler".to_owned(),
            final_boss: "The Overgrowth".to_owned(),
        }
    }
}

impl BossNames {
    /// Name of the provided boss.
    #[must_use]
    pub fn name(&self, kind: BossKind) -> &str {
        match kind {
            BossKind::Sun => &self.sun,
            BossKind::Water => &self.water,
            BossKind::Soil => &self.soil,
            BossKind::Final => &self.final_boss,
        }
    }
}

/// Tuning for the presentation layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationConfig {
    /// Boss display names.
    pub boss_names: BossNames,
    /// Shake played when a regular hit lands.
    #[serde(deserialize_with = "hit_shake")]
    pub hit_shake: Shake,
    /// Shake played when the special connects.
    #[serde(deserialize_with = "special_shake")]
    pub special_shake: Shake,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            boss_names: BossNames::default(),
            hit_shake: Shake::HIT,
            special_shake: Shake::SPECIAL,
        }
    }
}

/// Text widgets and buttons of the battle screen.
pub trait Hud {
    /// Updates both health readouts.
    fn show_health(&mut self, player: &str, enemy: &str);

    /// Updates both status readouts.
    fn show_status(&mut self, player: &str, enemy: &str);

    /// Displays a countdown or reveal cue on each side.
    fn show_cadence(&mut self, player: &str, enemy: &str);

    /// Clears the countdown cues.
    fn clear_cadence(&mut self);

    /// Updates the wave banner.
    fn show_wave(&mut self, wave: &str);

    /// Announces a boss.
    fn show_boss_title(&mut self, title: &str);

    /// Removes any boss announcement.
    fn clear_boss_title(&mut self);

    /// Shows a one-off milestone message.
    fn announce(&mut self, text: &str);

    /// Updates the special meter readout.
    fn show_meter(&mut self, text: &str, meter: &MeterSnapshot);

    /// Enables or disables the input buttons.
    fn set_controls(&mut self, controls: Controls);
}

/// Plays one-shot sound effects.
pub trait AudioSink {
    /// Plays the provided cue.
    fn play(&mut self, cue: AudioCue);
}

/// Drives the player and enemy animations.
pub trait Animator {
    /// Toggles the player's attack pose.
    fn set_attacking(&mut self, attacking: bool);

    /// Toggles the player's special pose.
    fn set_specialing(&mut self, specialing: bool);

    /// Returns the player to the idle pose.
    fn idle(&mut self);

    /// Swaps the enemy sprite set.
    fn swap_enemy(&mut self, visual: EnemyVisual);

    /// Shakes part of the scene.
    fn shake(&mut self, target: ShakeTarget, shake: Shake);
}

/// Routes battle events to whichever collaborators are attached.
///
/// Every collaborator is optional; calls aimed at a missing one are skipped.
pub struct Director {
    config: PresentationConfig,
    hud: Option<Box<dyn Hud>>,
    audio: Option<Box<dyn AudioSink>>,
    animator: Option<Box<dyn Animator>>,
}

impl std::fmt::Debug for Director {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Director")
            .field("config", &self.config)
            .field("hud", &self.hud.is_some())
            .field("audio", &self.audio.is_some())
            .field("animator", &self.animator.is_some())
            .finish()
    }
}

impl Director {
    /// Creates a director with no collaborators attached.
    #[must_use]
    pub fn new(config: PresentationConfig) -> Self {
        Self {
            config,
            hud: None,
            audio: None,
            animator: None,
        }
    }

    /// Attaches the HUD collaborator.
    #[must_use]
    pub fn with_hud(mut self, hud: Box<dyn Hud>) -> Self {
        self.hud = Some(hud);
        self
    }

    /// Attaches the audio collaborator.
    #[must_use]
    pub fn with_audio(mut self, audio: Box<dyn AudioSink>) -> Self {
        self.audio = Some(audio);
        self
    }

    /// Attaches the animation collaborator.
    #[must_use]
    pub fn with_animator(mut self, animator: Box<dyn Animator>) -> Self {
        self.animator = Some(animator);
        self
    }

    /// Tuning the director was created with.
    #[must_use]
    pub const fn config(&self) -> &PresentationConfig {
        &self.config
    }

    /// Presents a batch of events, then refreshes the HUD from `snapshot`.
    ///
    /// `snapshot` must be captured after the events were produced.
    pub fn present(&mut self, snapshot: &BattleSnapshot, events: &[Event]) {
        let mut cycle = snapshot.cycle_number;
        let mut special_landed = false;

        for event in events {
            match *event {
                Event::CycleStarted { cycle: started, .. } => {
                    cycle = started;
                    self.with_hud_do(|hud| {
                        hud.clear_boss_title();
                        hud.clear_cadence();
                    });
                }
                Event::EnemySpawned { boss, .. } => {
                    let visual = boss.map_or(EnemyVisual::Grunt, EnemyVisual::Boss);
                    self.with_animator_do(|animator| animator.swap_enemy(visual));
                    let wave = wave_text(cycle, boss.is_some());
                    self.with_hud_do(|hud| hud.show_wave(&wave));
                }
                Event::BossAppeared { kind } => {
                    let title = boss_title(self.config.boss_names.name(kind));
                    self.with_hud_do(|hud| hud.show_boss_title(&title));
                }
                Event::InputLocked => special_landed = false,
                Event::CadenceBeat { player, enemy } => {
                    let (player_text, enemy_text) = (cadence_text(player), cadence_text(enemy));
                    self.with_hud_do(|hud| hud.show_cadence(&player_text, &enemy_text));
                    match player {
                        CadenceCue::Reveal(_) => {
                            self.with_animator_do(|animator| animator.set_attacking(true));
                        }
                        CadenceCue::Special => {
                            self.with_animator_do(|animator| animator.set_specialing(true));
                        }
                        CadenceCue::Count(_) => {}
                    }
                }
                Event::CombatantStruck { side, .. } => {
                    if special_landed && side == Side::Enemy {
                        continue;
                    }
                    let target = match side {
                        Side::Player => ShakeTarget::PlayerHealth,
                        Side::Enemy => ShakeTarget::EnemyHealth,
                    };
                    let shake = self.config.hit_shake;
                    self.with_animator_do(|animator| animator.shake(target, shake));
                    self.with_audio_do(|audio| audio.play(AudioCue::NormalHit));
                }
                Event::SpecialUnleashed { hit: true, .. } => {
                    special_landed = true;
                    let shake = self.config.special_shake;
                    self.with_animator_do(|animator| animator.shake(ShakeTarget::Screen, shake));
                    self.with_audio_do(|audio| audio.play(AudioCue::Special));
                }
                Event::AbilityUnlocked { ability } => {
                    let text = unlock_text(ability);
                    self.with_hud_do(|hud| hud.announce(&text));
                }
                Event::SetCleared { completed, next } => {
                    let text = set_cleared_text(completed, next);
                    self.with_hud_do(|hud| hud.announce(&text));
                }
                Event::PlayerDefeated => self.with_hud_do(|hud| hud.announce(DEFEAT_TEXT)),
                Event::InputUnlocked => {
                    self.with_animator_do(|animator| {
                        animator.set_attacking(false);
                        animator.set_specialing(false);
                        animator.idle();
                    });
                }
                _ => {}
            }
        }

        self.refresh_hud(snapshot);
    }

    fn refresh_hud(&mut self, snapshot: &BattleSnapshot) {
        let Some(hud) = self.hud.as_mut() else {
            return;
        };

        let player_hp = hp_text("Player", snapshot.player_health, snapshot.player_max_health);
        let enemy_hp = hp_text("Enemy", snapshot.enemy.health(), snapshot.enemy.max_health());
        hud.show_health(&player_hp, &enemy_hp);
        hud.show_status(
            &status_text(&snapshot.effects.player),
            &status_text(&snapshot.effects.enemy),
        );
        hud.show_meter(&meter_text(&snapshot.special), &snapshot.special);
        hud.set_controls(snapshot.controls);
    }

    fn with_hud_do(&mut self, action: impl FnOnce(&mut dyn Hud)) {
        if let Some(hud) = self.hud.as_deref_mut() {
            action(hud);
        }
    }

    fn with_audio_do(&mut self, action: impl FnOnce(&mut dyn AudioSink)) {
        if let Some(audio) = self.audio.as_deref_mut() {
            action(audio);
        }
    }

    fn with_animator_do(&mut self, action: impl FnOnce(&mut dyn Animator)) {
        if let Some(animator) = self.animator.as_deref_mut() {
            action(animator);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use plant_duel_core::{EffectsState, Enemy, EnemyType, Move, StatusKind, Unlocks};

    type Log = Rc<RefCell<Vec<String>>>;

    struct Recorder(Log);

    impl Recorder {
        fn push(&self, line: String) {
            self.0.borrow_mut().push(line);
        }
    }

    impl Hud for Recorder {
        fn show_health(&mut self, player: &str, enemy: &str) {
            self.push(format!("health {player} | {enemy}"));
        }
        fn show_status(&mut self, player: &str, enemy: &str) {
            self.push(format!("status {player} | {enemy}"));
        }
        fn show_cadence(&mut self, player: &str, enemy: &str) {
            self.push(format!("cadence {player} | {enemy}"));
        }
        fn clear_cadence(&mut self) {
            self.push("clear cadence".to_owned());
        }
        fn show_wave(&mut self, wave: &str) {
            self.push(format!("wave {wave}"));
        }
        fn show_boss_title(&mut self, title: &str) {
            self.push(format!("title {title}"));
        }
        fn clear_boss_title(&mut self) {
            self.push("clear title".to_owned());
        }
        fn announce(&mut self, text: &str) {
            self.push(format!("announce {text}"));
        }
        fn show_meter(&mut self, text: &str, _meter: &MeterSnapshot) {
            self.push(format!("meter {text}"));
        }
        fn set_controls(&mut self, controls: Controls) {
            self.push(format!("controls sun={}", controls.sun));
        }
    }

    impl AudioSink for Recorder {
        fn play(&mut self, cue: AudioCue) {
            self.push(format!("audio {cue:?}"));
        }
    }

    impl Animator for Recorder {
        fn set_attacking(&mut self, attacking: bool) {
            self.push(format!("attacking {attacking}"));
        }
        fn set_specialing(&mut self, specialing: bool) {
            self.push(format!("specialing {specialing}"));
        }
        fn idle(&mut self) {
            self.push("idle".to_owned());
        }
        fn swap_enemy(&mut self, visual: EnemyVisual) {
            self.push(format!("swap {visual:?}"));
        }
        fn shake(&mut self, target: ShakeTarget, shake: Shake) {
            self.push(format!("shake {target:?} {}", shake.duration_ms));
        }
    }

    fn snapshot() -> BattleSnapshot {
        BattleSnapshot {
            player_health: 9,
            player_max_health: 10,
            enemy: Enemy::new(EnemyType::Boss, 10),
            boss: Some(BossKind::Final),
            effects: EffectsState::default(),
            unlocks: Unlocks::none(),
            special: MeterSnapshot {
                value: 1,
                max: 7,
                ready: false,
                hit_chance: 0.3,
            },
            set_number: 1,
            cycle_number: 4,
            controls: Controls {
                sun: true,
                water: true,
                soil: true,
                special: false,
            },
        }
    }

    fn full_director(log: &Log) -> Director {
        Director::new(PresentationConfig::default())
            .with_hud(Box::new(Recorder(Rc::clone(log))))
            .with_audio(Box::new(Recorder(Rc::clone(log))))
            .with_animator(Box::new(Recorder(Rc::clone(log))))
    }

    #[test]
    fn boss_arrival_swaps_visuals_and_announces_the_name() {
        let log = Log::default();
        let mut director = full_director(&log);

        director.present(
            &snapshot(),
            &[
                Event::CycleStarted { set: 1, cycle: 4 },
                Event::EnemySpawned {
                    enemy: Enemy::new(EnemyType::Boss, 13),
                    boss: Some(BossKind::Final),
                },
                Event::BossAppeared {
                    kind: BossKind::Final,
                },
            ],
        );

        let log = log.borrow();
        assert_eq!(
            log[..5],
            [
                "clear title",
                "clear cadence",
                "swap Boss(Final)",
                "wave Cycle 4 \u{2022} BOSS",
                "title The Overgrowth Appears!",
            ]
        );
        assert!(log.contains(&"health Player HP: 9/10 | Enemy HP: 10/10".to_owned()));
    }

    #[test]
    fn regular_hits_shake_and_play_the_hit_cue() {
        let log = Log::default();
        let mut director = full_director(&log);

        director.present(
            &snapshot(),
            &[
                Event::CadenceBeat {
                    player: CadenceCue::Reveal(Move::Sun),
                    enemy: CadenceCue::Reveal(Move::Soil),
                },
                Event::CombatantStruck {
                    side: Side::Player,
                    amount: 1,
                    remaining: 9,
                },
                Event::InputUnlocked,
            ],
        );

        let log = log.borrow();
        assert_eq!(
            log[..8],
            [
                "cadence Sun! | Soil!",
                "attacking true",
                "shake PlayerHealth 1200",
                "audio NormalHit",
                "attacking false",
                "specialing false",
                "idle",
                "health Player HP: 9/10 | Enemy HP: 10/10",
            ]
        );
    }

    #[test]
    fn special_hits_use_the_heavy_shake_only() {
        let log = Log::default();
        let mut director = full_director(&log);

        director.present(
            &snapshot(),
            &[
                Event::InputLocked,
                Event::CadenceBeat {
                    player: CadenceCue::Special,
                    enemy: CadenceCue::Reveal(Move::Water),
                },
                Event::SpecialUnleashed {
                    hit: true,
                    damage: 5,
                },
                Event::CombatantStruck {
                    side: Side::Enemy,
                    amount: 5,
                    remaining: 5,
                },
            ],
        );

        let log = log.borrow();
        assert!(log.contains(&"shake Screen 1500".to_owned()));
        assert!(log.contains(&"audio Special".to_owned()));
        assert!(!log.contains(&"audio NormalHit".to_owned()));
    }

    #[test]
    fn burn_after_a_missed_special_still_shakes() {
        let log = Log::default();
        let mut director = full_director(&log);

        director.present(
            &snapshot(),
            &[
                Event::InputLocked,
                Event::CadenceBeat {
                    player: CadenceCue::Special,
                    enemy: CadenceCue::Reveal(Move::Sun),
                },
                Event::SpecialUnleashed {
                    hit: false,
                    damage: 0,
                },
                Event::CombatantStruck {
                    side: Side::Enemy,
                    amount: 1,
                    remaining: 9,
                },
            ],
        );

        let log = log.borrow();
        assert!(log.contains(&"shake EnemyHealth 1200".to_owned()));
        assert!(log.contains(&"audio NormalHit".to_owned()));
        assert!(!log.contains(&"audio Special".to_owned()));
    }

    #[test]
    fn milestones_are_announced() {
        let log = Log::default();
        let mut director = full_director(&log);

        director.present(
            &snapshot(),
            &[
                Event::AbilityUnlocked {
                    ability: StatusKind::Burn,
                },
                Event::SetCleared {
                    completed: 1,
                    next: 2,
                },
                Event::PlayerDefeated,
            ],
        );

        let log = log.borrow();
        assert_eq!(
            log[..3],
            [
                "announce Burn unlocked!",
                "announce Set 1 cleared! Set 2 begins.",
                "announce You were defeated. Back to set 1.",
            ]
        );
    }

    #[test]
    fn missing_collaborators_are_skipped() {
        let log = Log::default();
        let mut director =
            Director::new(PresentationConfig::default()).with_hud(Box::new(Recorder(Rc::clone(&log))));

        director.present(
            &snapshot(),
            &[Event::CombatantStruck {
                side: Side::Enemy,
                amount: 1,
                remaining: 9,
            }],
        );

        let log = log.borrow();
        assert_eq!(log.len(), 4, "only the HUD refresh is recorded: {log:?}");
    }
}
