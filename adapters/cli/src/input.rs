//! Parsing of the lines typed by the player.

use plant_duel_core::{Command, Move, RejectionReason};

/// Reminder printed at startup and on request.
pub(crate) const HELP: &str =
    "Commands: sun (1), water (2), soil (3), special (x), help (h), quit (q)";

/// Meaning of a single input line.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Input {
    /// A command for the battle.
    Battle(Command),
    /// Print the command reminder.
    Help,
    /// Leave the game.
    Quit,
}

/// Interprets a line of player input, ignoring case and surrounding spaces.
pub(crate) fn parse_input(line: &str) -> Option<Input> {
    let input = match line.trim().to_ascii_lowercase().as_str() {
        "sun" | "1" => Input::Battle(Command::ChooseMove { chosen: Move::Sun }),
        "water" | "2" => Input::Battle(Command::ChooseMove {
            chosen: Move::Water,
        }),
        "soil" | "3" => Input::Battle(Command::ChooseMove { chosen: Move::Soil }),
        "special" | "x" => Input::Battle(Command::UnleashSpecial),
        "help" | "h" | "?" => Input::Help,
        "quit" | "q" | "exit" => Input::Quit,
        _ => return None,
    };
    Some(input)
}

/// Explains to the player why their input was ignored.
pub(crate) fn rejection_text(reason: RejectionReason) -> String {
    match reason {
        RejectionReason::InputLocked => "Wait for the round to finish.".to_owned(),
        RejectionReason::SpecialNotReady => "The special meter is not full yet.".to_owned(),
        RejectionReason::MoveLocked { blocked } => {
            format!("You are rooted and cannot throw {} this round.", blocked.label())
        }
    }
}
