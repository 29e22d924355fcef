//! Cursor bookkeeping and absolute/relative rewriting
//!
//! The cursor before (`base`) and after (`coords`) each command is derived
//! data. It is produced here by one pass over a whole program and returned
//! next to the commands, never stored inside them, so a rewrite can never
//! leave a stale position behind.

use crate::codec::{Command, Opcode};
use pathopt_core::Point;

/// A command together with the cursor before and after it
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedCommand {
    pub command: Command,
    /// Absolute cursor before the command
    pub base: Point,
    /// Absolute cursor after the command
    pub coords: Point,
}

/// Tracks the cursor and the current sub-path start across a program
#[derive(Debug, Clone, Copy, Default)]
pub struct Cursor {
    pub position: Point,
    pub start: Point,
}

impl Cursor {
    /// Advance past `command`, returning the new position
    pub fn advance(&mut self, command: &Command) -> Point {
        let end = command.end_point(self.position, self.start);
        if command.is_move() {
            self.start = end;
        }
        self.position = end;
        end
    }
}

/// Annotate each command with its cursor positions without rewriting it.
pub fn positioned(commands: &[Command]) -> Vec<PositionedCommand> {
    let mut cursor = Cursor::default();
    commands
        .iter()
        .map(|command| {
            let base = cursor.position;
            let coords = cursor.advance(command);
            PositionedCommand {
                command: command.clone(),
                base,
                coords,
            }
        })
        .collect()
}

/// Rewrite every relative command to its absolute form.
///
/// Only positional arguments move; arc radii, rotation and flags are kept.
/// `H`/`V` stay one-coordinate commands.
pub fn to_absolute(commands: &[Command]) -> Vec<Command> {
    let mut cursor = Cursor::default();
    commands
        .iter()
        .map(|command| {
            let mut absolute = command.clone();
            if command.relative {
                if !command.is_close() {
                    absolute.translate(cursor.position);
                }
                absolute.relative = false;
            }
            cursor.advance(command);
            absolute
        })
        .collect()
}

/// Rewrite every command except the first to its relative form.
///
/// The first command stays an absolute move. Closing commands become `z`.
pub fn to_relative(commands: &[Command]) -> Vec<PositionedCommand> {
    let mut cursor = Cursor::default();
    commands
        .iter()
        .enumerate()
        .map(|(index, command)| {
            let base = cursor.position;
            let coords = cursor.advance(command);
            let mut relative = command.clone();
            if index == 0 && command.is_move() {
                if command.relative {
                    relative.translate(base);
                }
                relative.relative = false;
            } else if !command.relative {
                if command.opcode != Opcode::ClosePath {
                    relative.translate(-base);
                }
                relative.relative = true;
            }
            PositionedCommand {
                command: relative,
                base,
                coords,
            }
        })
        .collect()
}
