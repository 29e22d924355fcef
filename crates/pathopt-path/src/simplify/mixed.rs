//! Per-command choice between absolute and relative form

use crate::codec::{Command, Opcode};
use crate::normalize::{positioned, PositionedCommand};
use pathopt_core::NumericFormatter;
use pathopt_settings::PathDataSettings;

/// Write each command in whichever of its absolute or relative forms is
/// shorter, or absolute everywhere with `force_absolute_path`.
///
/// The first command and closing commands are left alone. A relative
/// command that continues a run of the same relative letter stays relative
/// when the absolute text would only save the separator the run already
/// saves.
pub(crate) fn convert_to_mixed(
    commands: Vec<Command>,
    settings: &PathDataSettings,
    formatter: &NumericFormatter,
) -> Vec<Command> {
    let mut out: Vec<Command> = Vec::with_capacity(commands.len());

    for PositionedCommand { command, base, .. } in positioned(&commands) {
        let Some(prev) = out.last() else {
            out.push(command);
            continue;
        };
        if command.is_close() || !command.relative {
            out.push(command);
            continue;
        }

        let arc = command.opcode == Opcode::ArcTo;
        let mut absolute = command.clone();
        absolute.translate(base);
        absolute.relative = false;
        absolute.round_args(formatter);

        let absolute_text = formatter.format(&absolute.args, arc);
        let relative_text = formatter.format(&command.args, arc);

        let first = command.args.first().copied().unwrap_or(0.0);
        let prev_fractional = prev.args.last().is_some_and(|v| v % 1.0 != 0.0);
        let fits_run = settings.negative_extra_space
            && prev.relative
            && prev.letter() == command.letter()
            && absolute_text.len() + 1 == relative_text.len()
            && (first < 0.0 || (first > 0.0 && first < 1.0 && prev_fractional));

        if settings.force_absolute_path || (absolute_text.len() < relative_text.len() && !fits_run) {
            out.push(absolute);
        } else {
            out.push(command);
        }
    }
    out
}
