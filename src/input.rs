//! Translation of host events into [`Command`]s.

use log::warn;

use crate::config::SpeedSetting;
use crate::game::Command;

/// Map a `KeyboardEvent.key` value to a command. Unhandled keys map to `None`.
pub fn command_for_key(key: &str) -> Option<Command> {
    match key {
        "ArrowLeft" => Some(Command::MoveLeft),
        "ArrowRight" => Some(Command::MoveRight),
        "ArrowDown" => Some(Command::SoftDrop),
        "ArrowUp" => Some(Command::Rotate),
        _ => None,
    }
}

/// Map the value of the speed slider to a command.
pub fn command_for_slider(value: &str) -> Option<Command> {
    match SpeedSetting::parse(value) {
        Some(speed) => Some(Command::SetSpeed(speed)),
        None => {
            warn!("ignoring speed slider value {value:?}");
            None
        }
    }
}
