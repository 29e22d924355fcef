//! Single forward pass of per-command rewrites
//!
//! Input is a relative program (first command an absolute move) with the
//! cursor before and after each command. Commands are visited left to
//! right and kept ones are appended to an output vector, so the previous
//! command is always the last output. Rewrites that look ahead (arc
//! fitting consuming the following curves, long-hand expansion of a
//! following shorthand) only ever touch input slots not yet visited.

use super::arcs::{find_arc_angle, is_convex, ArcFitter, Circle};
use super::SimplifyContext;
use crate::codec::{round_args, Args, Command, Opcode};
use crate::normalize::PositionedCommand;
use pathopt_core::{NumericFormatter, Point};
use pathopt_settings::PathDataSettings;
use std::f64::consts::{PI, TAU};

/// Angle slack when chaining curves into one arc
const ANGLE_EPSILON: f64 = 1e-3;

/// Working record of one command
#[derive(Debug, Clone)]
struct Item {
    command: Command,
    base: Point,
    coords: Point,
    /// Long-hand cubic data of a curve that was turned into an arc, so a
    /// following curve can still extend it.
    sdata: Option<Args>,
}

impl From<PositionedCommand> for Item {
    fn from(positioned: PositionedCommand) -> Self {
        Self {
            command: positioned.command,
            base: positioned.base,
            coords: positioned.coords,
            sdata: None,
        }
    }
}

/// Arc being assembled from one or more curves
#[derive(Debug, Clone)]
struct ArcDraft {
    args: [f64; 7],
    base: Point,
    coords: Point,
}

impl ArcDraft {
    fn set_end(&mut self, coords: Point) {
        self.coords = coords;
        self.args[5] = coords.x - self.base.x;
        self.args[6] = coords.y - self.base.y;
    }

    fn into_item(self) -> Item {
        Item {
            command: Command::relative(Opcode::ArcTo, &self.args),
            base: self.base,
            coords: self.coords,
            sdata: None,
        }
    }
}

enum ArcOutcome {
    /// Curves did not fit or the arc text was not shorter
    Unchanged,
    /// The current command becomes this arc
    Arc(Args),
    /// The current command was absorbed into the previous one
    Absorbed,
}

/// Run every enabled rewrite over `input`.
pub(crate) fn filter_commands(
    input: Vec<PositionedCommand>,
    settings: &PathDataSettings,
    context: &SimplifyContext,
    formatter: &NumericFormatter,
) -> Vec<Command> {
    let mut pass = FilterPass {
        settings,
        context,
        formatter,
        fitter: settings
            .make_arcs
            .then(|| ArcFitter::new(&settings.arc_fitting, formatter.error())),
        error: formatter.error(),
        rel_subpoint: Point::ZERO,
        path_base: Point::ZERO,
    };
    pass.run(input.into_iter().map(Item::from).collect())
}

struct FilterPass<'a> {
    settings: &'a PathDataSettings,
    context: &'a SimplifyContext,
    formatter: &'a NumericFormatter,
    fitter: Option<ArcFitter>,
    error: f64,
    /// Absolute position the rounded output has reached
    rel_subpoint: Point,
    /// `rel_subpoint` at the last move
    path_base: Point,
}

impl FilterPass<'_> {
    fn run(&mut self, mut input: Vec<Item>) -> Vec<Command> {
        let mut out: Vec<Item> = Vec::with_capacity(input.len());
        let mut prev_q_control: Option<Point> = None;
        let mut index = 0;

        while index < input.len() {
            let q_control = prev_q_control.take();
            if let Some(item) = self.visit(index, &mut input, &mut out, q_control) {
                prev_q_control = match item.command.opcode {
                    Opcode::QuadTo => {
                        let args = &item.command.args;
                        Some(item.base + Point::new(args[0], args[1]))
                    }
                    Opcode::SmoothQuadTo => {
                        Some(q_control.map_or(item.base, |control| control.reflect(item.base)))
                    }
                    _ => None,
                };
                out.push(item);
            }
            index += 1;
        }

        out.into_iter().map(|item| item.command).collect()
    }

    /// Rewrite the command at `index`; `None` drops it.
    fn visit(
        &mut self,
        index: usize,
        input: &mut Vec<Item>,
        out: &mut [Item],
        q_control: Option<Point>,
    ) -> Option<Item> {
        let mut item = input[index].clone();

        if item.command.is_close() {
            self.rel_subpoint = self.path_base;
            if out.last().is_some_and(|prev| prev.command.is_close()) {
                return None;
            }
            return Some(item);
        }

        let relative = item.command.relative;
        let mut opcode = item.command.opcode;
        let mut data = item.command.args.clone();

        let sdata: Args = if opcode == Opcode::SmoothCurveTo {
            let mut long = reflected_control(out.last(), Opcode::CurveTo);
            long.extend_from_slice(&data);
            long
        } else {
            data.clone()
        };

        if let Some(fitter) = self.fitter {
            if matches!(opcode, Opcode::CurveTo | Opcode::SmoothCurveTo) && is_convex(&sdata) {
                if let Some(circle) = fitter.find_circle(&sdata) {
                    match self.make_arc(&fitter, index, &mut item, &sdata, circle, input, out) {
                        ArcOutcome::Unchanged => {}
                        ArcOutcome::Arc(args) => {
                            opcode = Opcode::ArcTo;
                            data = args;
                        }
                        ArcOutcome::Absorbed => return None,
                    }
                }
            }
        }

        if self.formatter.precision.is_some() {
            self.round_tracking_error(&item, relative, opcode, &mut data);
        }

        if self.settings.straight_curves {
            let prev_opcode = out.last().map(|prev| prev.command.opcode);
            let straight = match opcode {
                Opcode::CurveTo => is_curve_straight_line(&data, self.error),
                Opcode::SmoothCurveTo => is_curve_straight_line(&sdata, self.error),
                Opcode::QuadTo => is_curve_straight_line(&data, self.error),
                Opcode::SmoothQuadTo => !matches!(
                    prev_opcode,
                    Some(Opcode::QuadTo | Opcode::SmoothQuadTo)
                ),
                Opcode::ArcTo => data[0] == 0.0 || data[1] == 0.0,
                _ => false,
            };
            if straight {
                match opcode {
                    Opcode::CurveTo | Opcode::SmoothCurveTo => {
                        make_next_longhand(input, index, Opcode::SmoothCurveTo, &data)
                    }
                    Opcode::QuadTo => make_next_longhand(input, index, Opcode::SmoothQuadTo, &data),
                    Opcode::SmoothQuadTo => {
                        // The following `t` reflected a control point at
                        // this segment's start.
                        let mut control = Args::from_slice(&[0.0, 0.0]);
                        control.extend_from_slice(&data);
                        make_next_longhand(input, index, Opcode::SmoothQuadTo, &control)
                    }
                    _ => {}
                }
                opcode = Opcode::LineTo;
                data = Args::from_slice(&data[data.len() - 2..]);
            }
        }

        if self.settings.line_shorthands && opcode == Opcode::LineTo && relative {
            if data[1] == 0.0 {
                opcode = Opcode::HorizontalLineTo;
                data.pop();
            } else if data[0] == 0.0 {
                opcode = Opcode::VerticalLineTo;
                data.remove(0);
            }
        }

        if self.settings.collapse_repeated
            && !self.context.has_marker_mid
            && matches!(
                opcode,
                Opcode::MoveTo | Opcode::HorizontalLineTo | Opcode::VerticalLineTo
            )
        {
            if let Some(prev) = out.last_mut() {
                let same_direction =
                    opcode == Opcode::MoveTo || (prev.command.args[0] >= 0.0) == (data[0] >= 0.0);
                if prev.command.opcode == opcode && same_direction {
                    for (sum, value) in prev.command.args.iter_mut().zip(data.iter()) {
                        *sum += value;
                    }
                    prev.coords = item.coords;
                    return None;
                }
            }
        }

        if self.settings.curve_smooth_shorthands {
            if let Some(prev) = out.last() {
                if is_smooth(opcode, &data, prev, item.base, q_control) {
                    opcode = match opcode {
                        Opcode::CurveTo => Opcode::SmoothCurveTo,
                        _ => Opcode::SmoothQuadTo,
                    };
                    data = Args::from_slice(&data[2..]);
                }
            }
        }

        if self.settings.remove_useless && !self.context.stroke_cap_risk && relative {
            let useless = match opcode {
                Opcode::LineTo
                | Opcode::HorizontalLineTo
                | Opcode::VerticalLineTo
                | Opcode::QuadTo
                | Opcode::CurveTo => is_zero(&data),
                // A shorthand also starts with the reflected control point,
                // which draws a loop unless it sits on the current point
                Opcode::SmoothCurveTo => {
                    is_zero(&data)
                        && is_zero(&reflected_control(out.last(), Opcode::CurveTo))
                }
                Opcode::SmoothQuadTo => {
                    is_zero(&data)
                        && !out
                            .last()
                            .is_some_and(|prev| prev.command.opcode == Opcode::SmoothQuadTo)
                        && is_zero(&reflected_control(out.last(), Opcode::QuadTo))
                }
                Opcode::ArcTo => data[5] == 0.0 && data[6] == 0.0,
                _ => false,
            };
            // A zero-length `t` still carries a control point for the next `t`
            let next_is_t = next_opcode(input, index) == Some(Opcode::SmoothQuadTo);
            if useless && !(opcode == Opcode::SmoothQuadTo && next_is_t) {
                let zero = Args::from_slice(&[0.0, 0.0, 0.0, 0.0]);
                make_next_longhand(input, index, Opcode::SmoothCurveTo, &zero);
                make_next_longhand(input, index, Opcode::SmoothQuadTo, &zero);
                return None;
            }
        }

        item.command = Command {
            opcode,
            relative,
            args: data,
        };
        Some(item)
    }

    /// Fit the curve at `index`, with its neighbours, to one circular arc.
    #[allow(clippy::too_many_arguments)]
    fn make_arc(
        &mut self,
        fitter: &ArcFitter,
        index: usize,
        item: &mut Item,
        sdata: &Args,
        circle: Circle,
        input: &mut Vec<Item>,
        out: &mut [Item],
    ) -> ArcOutcome {
        let radius = self.formatter.round(circle.radius);
        let mut angle = find_arc_angle(sdata, &circle);
        let sweep = if sdata[5] * sdata[0] - sdata[4] * sdata[1] > 0.0 {
            1.0
        } else {
            0.0
        };
        let mut output = vec![ArcDraft {
            args: [radius, radius, 0.0, 0.0, sweep, sdata[4], sdata[5]],
            base: item.base,
            coords: item.coords,
        }];
        // Circle centre relative to the end of the last accepted curve
        let mut rel_center = circle.center - Point::new(sdata[4], sdata[5]);
        let mut replaced: Vec<Command> = vec![item.command.clone()];
        let mut has_prev = false;
        let mut suffix = String::new();

        if let Some(prev) = out.last() {
            let prev_data = match prev.command.opcode {
                Opcode::CurveTo if is_convex(&prev.command.args) => Some(&prev.command.args),
                Opcode::ArcTo => prev.sdata.as_ref(),
                _ => None,
            };
            if let Some(prev_data) = prev_data.filter(|d| fitter.is_arc_prev(d, &circle)) {
                replaced.insert(0, prev.command.clone());
                let first = &mut output[0];
                first.base = prev.base;
                first.set_end(first.coords);
                let prev_circle = Circle {
                    center: Point::new(prev_data[4], prev_data[5]) + circle.center,
                    radius: circle.radius,
                };
                angle += find_arc_angle(prev_data, &prev_circle);
                if angle > PI {
                    first.args[3] = 1.0;
                }
                has_prev = true;
            }
        }

        let mut j = index + 1;
        while let Some(next) = input.get(j) {
            let next_data: Args = match next.command.opcode {
                Opcode::CurveTo => next.command.args.clone(),
                Opcode::SmoothCurveTo => {
                    let long = longhand(&input[j - 1].command.args, &next.command.args);
                    // Cost of writing this `s` out as a `c` if it is left behind
                    suffix = format!("c{}", self.formatter.format(&long[..2], false));
                    long
                }
                _ => break,
            };
            let rel_circle = Circle {
                center: rel_center,
                radius: circle.radius,
            };
            if !(is_convex(&next_data) && fitter.is_arc(&next_data, &rel_circle)) {
                break;
            }
            angle += find_arc_angle(&next_data, &rel_circle);
            if angle - TAU > ANGLE_EPSILON {
                break;
            }
            replaced.push(next.command.clone());
            let next_coords = next.coords;
            let Some(arc) = output.last_mut() else { break };
            if angle > PI {
                arc.args[3] = 1.0;
            }
            if TAU - angle > ANGLE_EPSILON {
                arc.set_end(next_coords);
            } else {
                // Full circle: end this arc half way and add a second one
                arc.args[5] = 2.0 * (rel_center.x - next_data[4]);
                arc.args[6] = 2.0 * (rel_center.y - next_data[5]);
                arc.coords = arc.base + Point::new(arc.args[5], arc.args[6]);
                let half = arc.coords;
                output.push(ArcDraft {
                    args: [
                        radius,
                        radius,
                        0.0,
                        0.0,
                        sweep,
                        next_coords.x - half.x,
                        next_coords.y - half.y,
                    ],
                    base: half,
                    coords: next_coords,
                });
                j += 1;
                break;
            }
            rel_center = rel_center - Point::new(next_data[4], next_data[5]);
            j += 1;
        }

        let arc_text: String = output
            .iter()
            .map(|arc| format!("a{}", self.formatter.format(&arc.args, true)))
            .collect();
        let curves_text: String = replaced
            .iter()
            .map(|command| {
                let arc = command.opcode == Opcode::ArcTo;
                format!("{}{}", command.letter(), self.formatter.format(&command.args, arc))
            })
            .collect();
        if (arc_text + &suffix).len() >= curves_text.len() {
            return ArcOutcome::Unchanged;
        }

        if j < input.len() && input[j].command.opcode == Opcode::SmoothCurveTo {
            let prev_args = input[j - 1].command.args.clone();
            make_longhand(&mut input[j].command, &prev_args);
        }

        let mut arcs = output.into_iter();
        if has_prev {
            if let (Some(mut prev_arc), Some(prev)) = (arcs.next(), out.last_mut()) {
                round_args(Opcode::ArcTo, &mut prev_arc.args, self.formatter);
                let end = prev.command.last_pair().unwrap_or(Point::ZERO);
                self.rel_subpoint =
                    self.rel_subpoint + Point::new(prev_arc.args[5], prev_arc.args[6]) - end;
                prev.command = Command::relative(Opcode::ArcTo, &prev_arc.args);
                prev.coords = prev_arc.coords;
                item.base = prev_arc.coords;
            }
        }

        let arc = arcs.next();
        if replaced.len() == 1 {
            item.sdata = Some(sdata.clone());
        } else {
            let consumed = replaced.len() - 1 - usize::from(has_prev);
            if consumed > 0 {
                let end = (index + 1 + consumed).min(input.len());
                input.splice(index + 1..end, arcs.map(ArcDraft::into_item));
            }
        }

        match arc {
            Some(arc) => {
                item.coords = arc.coords;
                ArcOutcome::Arc(Args::from_slice(&arc.args))
            }
            None => ArcOutcome::Absorbed,
        }
    }

    /// Round relative data so that the running sum of rounded offsets stays
    /// on the rounded absolute positions.
    fn round_tracking_error(&mut self, item: &Item, relative: bool, opcode: Opcode, data: &mut Args) {
        let drift = item.base - self.rel_subpoint;
        if relative {
            match opcode {
                Opcode::HorizontalLineTo => data[0] += drift.x,
                Opcode::VerticalLineTo => data[0] += drift.y,
                Opcode::ArcTo => {
                    data[5] += drift.x;
                    data[6] += drift.y;
                }
                _ => {
                    for (i, value) in data.iter_mut().enumerate() {
                        *value += if i % 2 == 0 { drift.x } else { drift.y };
                    }
                }
            }
        }
        round_args(opcode, data, self.formatter);

        match opcode {
            Opcode::HorizontalLineTo => self.rel_subpoint.x += data[0],
            Opcode::VerticalLineTo => self.rel_subpoint.y += data[0],
            _ => {
                let n = data.len();
                self.rel_subpoint = self.rel_subpoint + Point::new(data[n - 2], data[n - 1]);
            }
        }
        self.rel_subpoint = Point::new(
            self.formatter.round(self.rel_subpoint.x),
            self.formatter.round(self.rel_subpoint.y),
        );

        if opcode == Opcode::MoveTo {
            self.path_base = self.rel_subpoint;
        }
    }
}

/// Whether a `c`/`q` repeats the reflected control point of `prev`
fn is_smooth(
    opcode: Opcode,
    data: &[f64],
    prev: &Item,
    base: Point,
    q_control: Option<Point>,
) -> bool {
    let p = &prev.command.args;
    match (opcode, prev.command.opcode) {
        (Opcode::CurveTo, Opcode::CurveTo) => {
            data[0] == -(p[2] - p[4]) && data[1] == -(p[3] - p[5])
        }
        (Opcode::CurveTo, Opcode::SmoothCurveTo) => {
            data[0] == -(p[0] - p[2]) && data[1] == -(p[1] - p[3])
        }
        (Opcode::CurveTo, _) => data[0] == 0.0 && data[1] == 0.0,
        (Opcode::QuadTo, Opcode::QuadTo) => data[0] == p[2] - p[0] && data[1] == p[3] - p[1],
        (Opcode::QuadTo, Opcode::SmoothQuadTo) => q_control
            .is_some_and(|control| control.reflect(base) == base + Point::new(data[0], data[1])),
        _ => false,
    }
}

fn is_zero(data: &[f64]) -> bool {
    data.iter().all(|&v| v == 0.0)
}

fn next_opcode(input: &[Item], index: usize) -> Option<Opcode> {
    input.get(index + 1).map(|next| next.command.opcode)
}

/// Reflected control point a shorthand after `prev` starts with, relative
/// to the current point. Zero unless `prev` is a curve of `family`.
fn reflected_control(prev: Option<&Item>, family: Opcode) -> Args {
    let matches_family = |op: Opcode| match family {
        Opcode::CurveTo => matches!(op, Opcode::CurveTo | Opcode::SmoothCurveTo),
        _ => op == Opcode::QuadTo,
    };
    match prev {
        Some(prev) if matches_family(prev.command.opcode) && prev.command.args.len() >= 4 => {
            let p = &prev.command.args;
            let n = p.len();
            Args::from_slice(&[p[n - 2] - p[n - 4], p[n - 1] - p[n - 3]])
        }
        _ => Args::from_slice(&[0.0, 0.0]),
    }
}

/// Arguments of a shorthand `args` written out in full after a segment
/// with arguments `prev`.
fn longhand(prev: &[f64], args: &[f64]) -> Args {
    let n = prev.len();
    let mut long = Args::new();
    if n >= 4 {
        long.push(prev[n - 2] - prev[n - 4]);
        long.push(prev[n - 1] - prev[n - 3]);
    } else {
        long.extend_from_slice(&[0.0, 0.0]);
    }
    long.extend_from_slice(args);
    long
}

/// Turn an `s`/`t` into `c`/`q`, using the segment before it.
fn make_longhand(command: &mut Command, prev: &[f64]) {
    command.opcode = match command.opcode {
        Opcode::SmoothCurveTo => Opcode::CurveTo,
        Opcode::SmoothQuadTo => Opcode::QuadTo,
        _ => return,
    };
    command.args = longhand(prev, &command.args);
}

/// Long-hand the command after `index` if it is a `shorthand`
fn make_next_longhand(input: &mut [Item], index: usize, shorthand: Opcode, prev: &[f64]) {
    if let Some(next) = input.get_mut(index + 1) {
        if next.command.opcode == shorthand {
            make_longhand(&mut next.command, prev);
        }
    }
}

/// Whether every control point lies within `error` of the chord
fn is_curve_straight_line(data: &[f64], error: f64) -> bool {
    let n = data.len();
    if n <= 2 {
        return false;
    }
    let a = -data[n - 1];
    let b = data[n - 2];
    let d = 1.0 / (a * a + b * b);
    if !d.is_finite() {
        return false;
    }
    data[..n - 2]
        .chunks_exact(2)
        .all(|p| ((a * p[0] + b * p[1]).powi(2) * d).sqrt() <= error)
}
