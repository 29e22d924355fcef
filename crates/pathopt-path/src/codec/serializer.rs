//! Path data writer
//!
//! Consecutive commands with the same letter share one letter (`l1,2,3,4`),
//! and lines directly after a move ride on the move's letter (`M0,0,10,0`).

use super::command::{round_args, Command, Opcode};
use pathopt_core::NumericFormatter;

/// A letter and the arguments of every command merged under it
struct Run {
    letter: char,
    opcode: Opcode,
    args: Vec<f64>,
}

impl Run {
    fn from_command(command: &Command, letter: char) -> Self {
        Self {
            letter,
            opcode: command.opcode,
            args: command.args.to_vec(),
        }
    }

    fn accepts(&self, command: &Command) -> bool {
        let letter = command.letter();
        match self.letter {
            'M' => letter == 'L',
            'm' => letter == 'l',
            current => current == letter,
        }
    }
}

/// Serialize commands to path data text.
///
/// Numbers are rounded by `formatter` except arc flags, which are written
/// as `0`/`1` unchanged.
pub fn serialize(commands: &[Command], formatter: &NumericFormatter) -> String {
    let mut runs: Vec<Run> = Vec::new();

    for (index, command) in commands.iter().enumerate() {
        if let Some(run) = runs.last_mut() {
            if run.accepts(command) {
                run.args.extend_from_slice(&command.args);
                continue;
            }
        }

        let mut letter = command.letter();
        if index == 0 && command.is_move() {
            // The first move is absolute either way, so its case is free to
            // follow the line after it.
            match commands.get(1).map(Command::letter) {
                Some('l') => letter = 'm',
                Some('L') => letter = 'M',
                _ => {}
            }
        }
        runs.push(Run::from_command(command, letter));
    }

    let mut out = String::new();
    for run in runs {
        out.push(run.letter);
        let mut args = run.args;
        round_args(run.opcode, &mut args, formatter);
        let arc = run.opcode == Opcode::ArcTo;
        out.push_str(&pathopt_core::cleanup_out_data(&args, &formatter.output, arc));
    }
    out
}
