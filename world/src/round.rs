//! Countdown bookkeeping for the round currently being presented.

use std::time::Duration;

use plant_duel_core::{CadenceCue, Move, PlayerAction, CADENCE};

/// Beats between the first countdown word and the resolution.
const RESOLVE_BEAT: u32 = CADENCE.len() as u32 + 1;

/// Presentation step that became due while the clock advanced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Stage {
    /// Both sides display a new cue.
    Cue {
        player: CadenceCue,
        enemy: CadenceCue,
    },
    /// The throws are compared and damage is applied.
    Resolve,
}

/// Round whose throws are locked in but not yet resolved.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PendingRound {
    action: PlayerAction,
    enemy_move: Move,
    enemy_rooted: bool,
    elapsed: Duration,
    next_beat: u32,
}

impl PendingRound {
    /// `enemy_rooted` records the lock the enemy's pick consumed.
    pub(crate) const fn new(action: PlayerAction, enemy_move: Move, enemy_rooted: bool) -> Self {
        Self {
            action,
            enemy_move,
            enemy_rooted,
            elapsed: Duration::ZERO,
            next_beat: 0,
        }
    }

    pub(crate) const fn action(&self) -> PlayerAction {
        self.action
    }

    pub(crate) const fn enemy_move(&self) -> Move {
        self.enemy_move
    }

    pub(crate) const fn enemy_rooted(&self) -> bool {
        self.enemy_rooted
    }

    /// Advances the round clock, appending every stage that became due.
    ///
    /// Beat `n` is due once `n * beat` has elapsed, so a single large step
    /// releases several stages in order.
    pub(crate) fn advance(&mut self, dt: Duration, beat: Duration, due: &mut Vec<Stage>) {
        self.elapsed = self.elapsed.saturating_add(dt);
        while self.next_beat <= RESOLVE_BEAT && self.elapsed >= beat.saturating_mul(self.next_beat) {
            due.push(self.stage(self.next_beat));
            self.next_beat += 1;
        }
    }

    fn stage(&self, beat: u32) -> Stage {
        if beat == RESOLVE_BEAT {
            return Stage::Resolve;
        }

        match CADENCE.get(beat as usize) {
            Some(word) => Stage::Cue {
                player: CadenceCue::Count(*word),
                enemy: CadenceCue::Count(*word),
            },
            None => Stage::Cue {
                player: match self.action {
                    PlayerAction::Throw(chosen) => CadenceCue::Reveal(chosen),
                    PlayerAction::Special => CadenceCue::Special,
                },
                enemy: CadenceCue::Reveal(self.enemy_move),
            },
        }
    }
}
