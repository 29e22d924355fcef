use pathopt_core::ParseError;
use pathopt_path::codec::{parse_path, parse_path_with_diagnostics, Command, Opcode};

#[test]
fn test_implicit_lines_after_move() {
    let program = parse_path("M1 2 3 4 5 6");
    assert_eq!(program.len(), 3);
    assert_eq!(program.commands[1], Command::absolute(Opcode::LineTo, &[3.0, 4.0]));
    assert_eq!(program.commands[2], Command::absolute(Opcode::LineTo, &[5.0, 6.0]));
}

#[test]
fn test_compact_numbers() {
    let program = parse_path("M.5-.5l1e1.25-3-4");
    assert_eq!(program.commands[0].args.as_slice(), &[0.5, -0.5]);
    assert_eq!(program.commands[1].args.as_slice(), &[10.0, 0.25]);
    assert_eq!(program.commands[2].args.as_slice(), &[-3.0, -4.0]);
}

#[test]
fn test_compact_arc_flags() {
    let program = parse_path("M0 0a5 5 0 1110 0");
    assert_eq!(
        program.commands[1].args.as_slice(),
        &[5.0, 5.0, 0.0, 1.0, 1.0, 10.0, 0.0]
    );
}

#[test]
fn test_stops_at_garbage() {
    let (program, error) = parse_path_with_diagnostics("M0 0 L10 10 X 5 5");
    assert_eq!(program.len(), 2);
    assert!(matches!(error, Some(ParseError::UnexpectedCharacter { .. })));
}

#[test]
fn test_incomplete_command_dropped() {
    let program = parse_path("M0 0 L10 10 C1 2 3");
    assert_eq!(program.len(), 2);
}
