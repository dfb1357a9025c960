//! Plain-text collaborators that print the battle to stdout.

use plant_duel_core::{Controls, MeterSnapshot};
use plant_duel_presentation::{Animator, AudioCue, AudioSink, EnemyVisual, Hud, Shake, ShakeTarget};
use tracing::trace;

/// Prints HUD lines, skipping refreshes that changed nothing.
#[derive(Debug, Default)]
pub(crate) struct TerminalHud {
    health: String,
    status: String,
    meter: String,
    controls: Option<Controls>,
}

impl TerminalHud {
    fn print_if_changed(slot: &mut String, line: String) {
        if *slot != line {
            println!("{line}");
            *slot = line;
        }
    }
}

impl Hud for TerminalHud {
    fn show_health(&mut self, player: &str, enemy: &str) {
        Self::print_if_changed(&mut self.health, format!("{player}    {enemy}"));
    }

    fn show_status(&mut self, player: &str, enemy: &str) {
        let line = if player.is_empty() && enemy.is_empty() {
            String::new()
        } else {
            format!("You: {}    Enemy: {}", or_dash(player), or_dash(enemy))
        };
        if line.is_empty() {
            self.status.clear();
            return;
        }
        Self::print_if_changed(&mut self.status, line);
    }

    fn show_cadence(&mut self, player: &str, enemy: &str) {
        println!("  {player:<10} vs  {enemy}");
    }

    fn clear_cadence(&mut self) {}

    fn show_wave(&mut self, wave: &str) {
        println!();
        println!("== {wave} ==");
    }

    fn show_boss_title(&mut self, title: &str) {
        println!("*** {title} ***");
    }

    fn clear_boss_title(&mut self) {}

    fn announce(&mut self, text: &str) {
        println!(">>> {text}");
    }

    fn show_meter(&mut self, text: &str, _meter: &MeterSnapshot) {
        Self::print_if_changed(&mut self.meter, text.to_owned());
    }

    fn set_controls(&mut self, controls: Controls) {
        if self.controls == Some(controls) {
            return;
        }
        self.controls = Some(controls);
        if controls == Controls::locked() {
            return;
        }

        let mut options = Vec::new();
        if controls.sun {
            options.push("[1] sun");
        }
        if controls.water {
            options.push("[2] water");
        }
        if controls.soil {
            options.push("[3] soil");
        }
        if controls.special {
            options.push("[x] SPECIAL");
        }
        println!("> {}", options.join("  "));
    }
}

fn or_dash(text: &str) -> &str {
    if text.is_empty() {
        "-"
    } else {
        text
    }
}

/// Spells sound effects out as onomatopoeia.
#[derive(Debug, Default)]
pub(crate) struct TerminalAudio;

impl AudioSink for TerminalAudio {
    fn play(&mut self, cue: AudioCue) {
        match cue {
            AudioCue::NormalHit => println!("    *thwack*"),
            AudioCue::Special => println!("    *KRA-KOOM*"),
        }
    }
}

/// Narrates the enemy swaps and heavy shakes; poses are only traced.
#[derive(Debug, Default)]
pub(crate) struct TerminalAnimator;

impl Animator for TerminalAnimator {
    fn set_attacking(&mut self, attacking: bool) {
        trace!(attacking, "player attack pose");
    }

    fn set_specialing(&mut self, specialing: bool) {
        trace!(specialing, "player special pose");
    }

    fn idle(&mut self) {
        trace!("player idle");
    }

    fn swap_enemy(&mut self, visual: EnemyVisual) {
        match visual {
            EnemyVisual::Grunt => println!("A wild sprout pushes through the soil."),
            EnemyVisual::Boss(kind) => trace!(?kind, "boss sprite swapped in"),
        }
    }

    fn shake(&mut self, target: ShakeTarget, shake: Shake) {
        match target {
            ShakeTarget::Screen => println!("    ~~ the ground trembles ~~"),
            ShakeTarget::PlayerHealth | ShakeTarget::EnemyHealth => {
                trace!(?target, duration = ?shake.duration(), "health readout shake");
            }
        }
    }
}
