//! Formatting helpers shared by every HUD implementation.

use plant_duel_core::{CadenceCue, MeterSnapshot, SideEffects, StatusKind};

/// Health line such as `"Player HP: 7/10"`.
#[must_use]
pub fn hp_text(label: &str, health: u32, max: u32) -> String {
    format!("{label} HP: {health}/{max}")
}

/// Comma separated list of the active statuses, empty when none are active.
#[must_use]
pub fn status_text(effects: &SideEffects) -> String {
    let mut parts = Vec::new();
    if effects.is_burning() {
        parts.push(format!(
            "{} ({})",
            StatusKind::Burn.label(),
            effects.burn_turns
        ));
    }
    if effects.soaked {
        parts.push(StatusKind::Soak.label().to_owned());
    }
    if effects.sun_locked {
        parts.push(StatusKind::Root.label().to_owned());
    }
    parts.join(", ")
}

/// Wave banner for the current enemy.
#[must_use]
pub fn wave_text(cycle: u32, boss: bool) -> String {
    if boss {
        format!("Cycle {cycle} \u{2022} BOSS")
    } else {
        format!("Wave: {cycle}")
    }
}

/// Meter line such as `"Special: 3/7 • Building • 30%"`.
#[must_use]
pub fn meter_text(meter: &MeterSnapshot) -> String {
    let state = if meter.ready { "Ready" } else { "Building" };
    let percent = (meter.hit_chance * 100.0).round_ties_even() as u32;
    format!(
        "Special: {}/{} \u{2022} {state} \u{2022} {percent}%",
        meter.value, meter.max
    )
}

/// Word displayed for a countdown cue.
#[must_use]
pub fn cadence_text(cue: CadenceCue) -> String {
    match cue {
        CadenceCue::Count(word) => format!("{}...", word.label()),
        CadenceCue::Reveal(thrown) => format!("{}!", thrown.label()),
        CadenceCue::Special => "Special!".to_owned(),
    }
}

/// Title announced when a boss enters the arena.
#[must_use]
pub fn boss_title(name: &str) -> String {
    format!("{name} Appears!")
}

/// Announcement for a newly earned ability.
#[must_use]
pub fn unlock_text(ability: StatusKind) -> String {
    let name = match ability {
        StatusKind::Soak => "Soak",
        StatusKind::Root => "Root",
        StatusKind::Burn => "Burn",
    };
    format!("{name} unlocked!")
}

/// Announcement for a cleared set.
#[must_use]
pub fn set_cleared_text(completed: u32, next: u32) -> String {
    format!("Set {completed} cleared! Set {next} begins.")
}

/// Announcement shown when the player falls.
pub const DEFEAT_TEXT: &str = "You were defeated. Back to set 1.";
