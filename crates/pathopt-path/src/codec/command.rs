//! Path command model
//!
//! A path is an ordered list of [`Command`]s. Each command is an opcode, a
//! case flag (lowercase letters are relative to the cursor) and a fixed
//! number of arguments. Arc flags are stored as exactly `0.0` or `1.0` and
//! are never rounded.

use pathopt_core::{NumericFormatter, Point};
use smallvec::SmallVec;
use std::fmt;

/// Argument storage; seven slots cover the widest command (arc).
pub type Args = SmallVec<[f64; 7]>;

/// Drawing operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    MoveTo,
    LineTo,
    HorizontalLineTo,
    VerticalLineTo,
    CurveTo,
    SmoothCurveTo,
    QuadTo,
    SmoothQuadTo,
    ArcTo,
    ClosePath,
}

/// Coordinate axis of a positional argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Opcode {
    /// Number of arguments one segment of this command takes
    pub fn arity(self) -> usize {
        match self {
            Self::MoveTo | Self::LineTo | Self::SmoothQuadTo => 2,
            Self::HorizontalLineTo | Self::VerticalLineTo => 1,
            Self::CurveTo => 6,
            Self::SmoothCurveTo | Self::QuadTo => 4,
            Self::ArcTo => 7,
            Self::ClosePath => 0,
        }
    }

    /// Uppercase letter of this opcode
    pub fn letter(self) -> char {
        match self {
            Self::MoveTo => 'M',
            Self::LineTo => 'L',
            Self::HorizontalLineTo => 'H',
            Self::VerticalLineTo => 'V',
            Self::CurveTo => 'C',
            Self::SmoothCurveTo => 'S',
            Self::QuadTo => 'Q',
            Self::SmoothQuadTo => 'T',
            Self::ArcTo => 'A',
            Self::ClosePath => 'Z',
        }
    }

    /// Opcode and relative flag for a command letter
    pub fn from_letter(c: char) -> Option<(Opcode, bool)> {
        let opcode = match c.to_ascii_uppercase() {
            'M' => Self::MoveTo,
            'L' => Self::LineTo,
            'H' => Self::HorizontalLineTo,
            'V' => Self::VerticalLineTo,
            'C' => Self::CurveTo,
            'S' => Self::SmoothCurveTo,
            'Q' => Self::QuadTo,
            'T' => Self::SmoothQuadTo,
            'A' => Self::ArcTo,
            'Z' => Self::ClosePath,
            _ => return None,
        };
        Some((opcode, c.is_ascii_lowercase()))
    }

    /// Axis of the argument at `index`, or `None` for radii, rotation and flags
    pub fn axis_of(self, index: usize) -> Option<Axis> {
        match self {
            Self::HorizontalLineTo => Some(Axis::X),
            Self::VerticalLineTo => Some(Axis::Y),
            Self::ArcTo => match index % 7 {
                5 => Some(Axis::X),
                6 => Some(Axis::Y),
                _ => None,
            },
            Self::ClosePath => None,
            _ if index % 2 == 0 => Some(Axis::X),
            _ => Some(Axis::Y),
        }
    }

    /// Whether the argument at `index` is an arc flag
    pub fn is_flag_index(self, index: usize) -> bool {
        self == Self::ArcTo && matches!(index % 7, 3 | 4)
    }
}

/// One drawing command
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub opcode: Opcode,
    /// Lowercase letter: coordinates are offsets from the cursor
    pub relative: bool,
    pub args: Args,
}

impl Command {
    pub fn new(opcode: Opcode, relative: bool, args: &[f64]) -> Self {
        Self {
            opcode,
            relative,
            args: Args::from_slice(args),
        }
    }

    pub fn absolute(opcode: Opcode, args: &[f64]) -> Self {
        Self::new(opcode, false, args)
    }

    pub fn relative(opcode: Opcode, args: &[f64]) -> Self {
        Self::new(opcode, true, args)
    }

    pub fn close() -> Self {
        Self::new(Opcode::ClosePath, true, &[])
    }

    /// Command letter, lowercase when relative
    pub fn letter(&self) -> char {
        let letter = self.opcode.letter();
        if self.relative {
            letter.to_ascii_lowercase()
        } else {
            letter
        }
    }

    pub fn is(&self, opcode: Opcode) -> bool {
        self.opcode == opcode
    }

    pub fn is_move(&self) -> bool {
        self.opcode == Opcode::MoveTo
    }

    pub fn is_close(&self) -> bool {
        self.opcode == Opcode::ClosePath
    }

    /// Large-arc and sweep flags of an arc command
    pub fn arc_flags(&self) -> Option<(bool, bool)> {
        if self.opcode == Opcode::ArcTo && self.args.len() >= 5 {
            Some((self.args[3] != 0.0, self.args[4] != 0.0))
        } else {
            None
        }
    }

    /// Last coordinate pair as written (an offset when relative)
    pub fn last_pair(&self) -> Option<Point> {
        match self.opcode {
            Opcode::HorizontalLineTo | Opcode::VerticalLineTo | Opcode::ClosePath => None,
            _ => {
                let n = self.args.len();
                (n >= 2).then(|| Point::new(self.args[n - 2], self.args[n - 1]))
            }
        }
    }

    /// Cursor position after this command
    pub fn end_point(&self, cursor: Point, start: Point) -> Point {
        let origin = if self.relative { cursor } else { Point::ZERO };
        match self.opcode {
            Opcode::ClosePath => start,
            Opcode::HorizontalLineTo => Point::new(origin.x + self.args[0], cursor.y),
            Opcode::VerticalLineTo => Point::new(cursor.x, origin.y + self.args[0]),
            _ => self.last_pair().map_or(cursor, |p| origin + p),
        }
    }

    /// Add `offset` to every positional argument
    pub fn translate(&mut self, offset: Point) {
        let opcode = self.opcode;
        for (i, value) in self.args.iter_mut().enumerate() {
            match opcode.axis_of(i) {
                Some(Axis::X) => *value += offset.x,
                Some(Axis::Y) => *value += offset.y,
                None => {}
            }
        }
    }

    /// Round every argument except arc flags
    pub fn round_args(&mut self, formatter: &NumericFormatter) {
        round_args(self.opcode, &mut self.args, formatter);
    }
}

/// Round `args` of `opcode` in place, leaving arc flags untouched
pub fn round_args(opcode: Opcode, args: &mut [f64], formatter: &NumericFormatter) {
    for (i, value) in args.iter_mut().enumerate() {
        if !opcode.is_flag_index(i) {
            *value = formatter.round(*value);
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())?;
        for (i, value) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}

/// An ordered list of commands
///
/// The first command of a non-empty program is an absolute move.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathProgram {
    pub commands: Vec<Command>,
}

impl PathProgram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap `commands`, turning a leading relative move into an absolute one.
    pub fn from_commands(mut commands: Vec<Command>) -> Self {
        if let Some(first) = commands.first_mut() {
            if first.is_move() {
                first.relative = false;
            }
        }
        Self { commands }
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Command> {
        self.commands.iter()
    }

    pub fn as_slice(&self) -> &[Command] {
        &self.commands
    }

    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    pub fn into_commands(self) -> Vec<Command> {
        self.commands
    }

    /// Equivalent program using only absolute `M`, `L`, `C` and `Z`
    pub fn to_absolute_curves(&self) -> Vec<Command> {
        crate::curves::to_absolute_curves(&self.commands)
    }
}

impl From<Vec<Command>> for PathProgram {
    fn from(commands: Vec<Command>) -> Self {
        Self::from_commands(commands)
    }
}

impl IntoIterator for PathProgram {
    type Item = Command;
    type IntoIter = std::vec::IntoIter<Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.into_iter()
    }
}

impl<'a> IntoIterator for &'a PathProgram {
    type Item = &'a Command;
    type IntoIter = std::slice::Iter<'a, Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}
