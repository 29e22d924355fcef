//! Path data scanner
//!
//! Reads the path mini-language left to right and stops at the first byte it
//! cannot interpret, keeping every command completed so far. Renderers treat
//! broken path data the same way, so the partial program draws what a
//! browser would draw.

use super::command::{Args, Command, Opcode, PathProgram};
use pathopt_core::ParseError;

/// Parse path data, discarding the reason parsing stopped (if it did).
pub fn parse_path(text: &str) -> PathProgram {
    let (program, error) = parse_path_with_diagnostics(text);
    if let Some(err) = error {
        tracing::debug!("path data truncated: {}", err);
    }
    program
}

/// Parse path data and report where and why parsing stopped.
pub fn parse_path_with_diagnostics(text: &str) -> (PathProgram, Option<ParseError>) {
    let mut parser = PathParser::new(text);
    let error = parser.run().err();
    (PathProgram::from_commands(parser.commands), error)
}

fn is_wsp(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | b'\r' | 0x0c)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberState {
    None,
    Sign,
    Whole,
    DecimalPoint,
    Decimal,
    E,
    ExponentSign,
    Exponent,
}

/// Read a number starting at `start`.
///
/// Returns the parsed value and the index just past the consumed bytes.
/// A dangling exponent marker (`1e`, `1e+`) is consumed but ignored.
pub(crate) fn read_number(bytes: &[u8], start: usize) -> Option<(f64, usize)> {
    let mut state = NumberState::None;
    let mut mantissa_end = start;
    let mut i = start;

    while i < bytes.len() {
        let c = bytes[i];
        let next = match c {
            b'+' | b'-' => match state {
                NumberState::None => Some(NumberState::Sign),
                NumberState::E => Some(NumberState::ExponentSign),
                _ => None,
            },
            b'0'..=b'9' => match state {
                NumberState::None | NumberState::Sign | NumberState::Whole => {
                    Some(NumberState::Whole)
                }
                NumberState::DecimalPoint | NumberState::Decimal => Some(NumberState::Decimal),
                NumberState::E | NumberState::ExponentSign | NumberState::Exponent => {
                    Some(NumberState::Exponent)
                }
            },
            b'.' => match state {
                NumberState::None | NumberState::Sign | NumberState::Whole => {
                    Some(NumberState::DecimalPoint)
                }
                _ => None,
            },
            b'e' | b'E' => match state {
                NumberState::Whole | NumberState::DecimalPoint | NumberState::Decimal => {
                    Some(NumberState::E)
                }
                _ => None,
            },
            _ => None,
        };
        let Some(next) = next else { break };
        state = next;
        i += 1;
        if !matches!(
            state,
            NumberState::E | NumberState::ExponentSign | NumberState::Exponent
        ) {
            mantissa_end = i;
        }
    }

    let text_end = if state == NumberState::Exponent {
        i
    } else {
        mantissa_end
    };
    let text = std::str::from_utf8(&bytes[start..text_end]).ok()?;
    let has_digit = text.bytes().any(|b| b.is_ascii_digit());
    if !has_digit {
        return None;
    }
    text.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .map(|value| (value, i))
}

struct PathParser<'a> {
    text: &'a str,
    bytes: &'a [u8],
    commands: Vec<Command>,
    current: Option<(Opcode, bool)>,
    args: Args,
    can_have_comma: bool,
    had_comma: bool,
}

impl<'a> PathParser<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            commands: Vec::new(),
            current: None,
            args: Args::new(),
            can_have_comma: false,
            had_comma: false,
        }
    }

    fn char_at(&self, i: usize) -> char {
        self.text
            .get(i..)
            .and_then(|rest| rest.chars().next())
            .unwrap_or('\u{fffd}')
    }

    fn run(&mut self) -> Result<(), ParseError> {
        let mut i = 0;
        while i < self.bytes.len() {
            let c = self.bytes[i];

            if is_wsp(c) {
                i += 1;
                continue;
            }

            if c == b',' {
                if !self.can_have_comma || self.had_comma {
                    return Err(ParseError::UnexpectedComma { offset: i });
                }
                self.had_comma = true;
                i += 1;
                continue;
            }

            if let Some((opcode, relative)) = Opcode::from_letter(c as char) {
                self.start_command(i, c as char, opcode, relative)?;
                i += 1;
                continue;
            }

            let Some((opcode, relative)) = self.current else {
                return Err(ParseError::MissingMoveTo {
                    offset: i,
                    found: self.char_at(i),
                });
            };

            if opcode == Opcode::ClosePath {
                return Err(ParseError::UnexpectedArgument {
                    offset: i,
                    command: if relative { 'z' } else { 'Z' },
                });
            }

            let (value, next) = self.read_argument(i, opcode)?;
            self.args.push(value);
            self.can_have_comma = true;
            self.had_comma = false;
            i = next;

            if self.args.len() == opcode.arity() {
                let args = std::mem::take(&mut self.args);
                self.commands.push(Command {
                    opcode,
                    relative,
                    args,
                });
                if opcode == Opcode::MoveTo {
                    self.current = Some((Opcode::LineTo, relative));
                }
            }
        }

        if let Some((opcode, relative)) = self.current {
            if !self.args.is_empty() {
                let letter = Command::new(opcode, relative, &[]).letter();
                return Err(ParseError::IncompleteCommand {
                    offset: self.bytes.len(),
                    command: letter,
                    missing: opcode.arity() - self.args.len(),
                });
            }
        }
        if self.had_comma {
            return Err(ParseError::UnexpectedComma {
                offset: self.bytes.len(),
            });
        }
        Ok(())
    }

    fn start_command(
        &mut self,
        offset: usize,
        letter: char,
        opcode: Opcode,
        relative: bool,
    ) -> Result<(), ParseError> {
        if self.had_comma {
            return Err(ParseError::UnexpectedComma { offset });
        }
        match self.current {
            None if opcode != Opcode::MoveTo => {
                return Err(ParseError::MissingMoveTo {
                    offset,
                    found: letter,
                });
            }
            Some((current, current_relative)) if !self.args.is_empty() => {
                return Err(ParseError::IncompleteCommand {
                    offset,
                    command: Command::new(current, current_relative, &[]).letter(),
                    missing: current.arity() - self.args.len(),
                });
            }
            _ => {}
        }

        self.current = Some((opcode, relative));
        self.args.clear();
        self.can_have_comma = false;
        if opcode.arity() == 0 {
            self.commands.push(Command::new(opcode, relative, &[]));
        }
        Ok(())
    }

    fn read_argument(&self, i: usize, opcode: Opcode) -> Result<(f64, usize), ParseError> {
        let c = self.bytes[i];
        if opcode == Opcode::ArcTo {
            match self.args.len() {
                0 | 1 if c == b'+' || c == b'-' => {
                    return Err(ParseError::InvalidNumber { offset: i });
                }
                3 | 4 => {
                    return match c {
                        b'0' => Ok((0.0, i + 1)),
                        b'1' => Ok((1.0, i + 1)),
                        _ => Err(ParseError::InvalidFlag {
                            offset: i,
                            found: self.char_at(i),
                        }),
                    };
                }
                _ => {}
            }
        }

        read_number(self.bytes, i).ok_or_else(|| {
            if c.is_ascii_digit() || matches!(c, b'+' | b'-' | b'.') {
                ParseError::InvalidNumber { offset: i }
            } else {
                ParseError::UnexpectedCharacter {
                    offset: i,
                    found: self.char_at(i),
                }
            }
        })
    }
}
