use pathopt_core::{NumericFormatter, Point};
use pathopt_path::codec::{parse_path, serialize, Command, Opcode, PathProgram};
use pathopt_path::normalize::positioned;
use proptest::prelude::*;

const OPCODES: [Opcode; 10] = [
    Opcode::MoveTo,
    Opcode::LineTo,
    Opcode::HorizontalLineTo,
    Opcode::VerticalLineTo,
    Opcode::CurveTo,
    Opcode::SmoothCurveTo,
    Opcode::QuadTo,
    Opcode::SmoothQuadTo,
    Opcode::ArcTo,
    Opcode::ClosePath,
];

/// Commands whose numbers are exact in three decimals
fn command() -> impl Strategy<Value = Command> {
    (0..OPCODES.len(), any::<bool>(), prop::collection::vec(-800i32..800, 7)).prop_map(
        |(kind, relative, raw)| {
            let opcode = OPCODES[kind];
            let mut args: Vec<f64> = raw.iter().map(|&v| f64::from(v) / 8.0).collect();
            if opcode == Opcode::ArcTo {
                args[0] = args[0].abs() + 1.0;
                args[1] = args[1].abs() + 1.0;
                args[3] = f64::from(raw[3] & 1);
                args[4] = f64::from(raw[4] & 1);
            }
            args.truncate(opcode.arity());
            Command::new(opcode, relative, &args)
        },
    )
}

fn program() -> impl Strategy<Value = PathProgram> {
    (
        (-800i32..800, -800i32..800),
        prop::collection::vec(command(), 0..24),
    )
        .prop_map(|((x, y), rest)| {
            let mut commands = vec![Command::absolute(
                Opcode::MoveTo,
                &[f64::from(x) / 8.0, f64::from(y) / 8.0],
            )];
            commands.extend(rest);
            PathProgram::from_commands(commands)
        })
}

/// Absolute end point of every command, with repeated closes counted once
fn trace(program: &PathProgram) -> Vec<(Opcode, Point)> {
    let mut out: Vec<(Opcode, Point)> = Vec::new();
    for item in positioned(program.as_slice()) {
        let opcode = item.command.opcode;
        if opcode == Opcode::ClosePath
            && out.last().is_some_and(|(last, _)| *last == Opcode::ClosePath)
        {
            continue;
        }
        out.push((opcode, item.coords));
    }
    out
}

proptest! {
    #[test]
    fn test_reparse_keeps_absolute_trace(program in program()) {
        let text = serialize(program.as_slice(), &NumericFormatter::new(Some(3)));
        let reparsed = parse_path(&text);

        let expected = trace(&program);
        let actual = trace(&reparsed);
        prop_assert_eq!(expected.len(), actual.len(), "text: {}", text);
        for ((op_a, a), (op_b, b)) in expected.iter().zip(&actual) {
            prop_assert_eq!(op_a, op_b);
            prop_assert!(a.distance(*b) < 1e-9, "{:?} != {:?} in {}", a, b, text);
        }
    }
}

#[test]
fn test_serialized_text_reparses_to_itself() {
    let formatter = NumericFormatter::new(Some(3));
    let text = "M0,0h10v10h-10zM20,0c5,0,10,5,10,10s-5,10-10,10a5,5,0,1,0,10,0";
    let program = parse_path(text);
    assert_eq!(serialize(program.as_slice(), &formatter), text);
}
