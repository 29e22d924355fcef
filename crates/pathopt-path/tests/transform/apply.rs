use pathopt_core::Point;
use pathopt_path::codec::parse_path;
use pathopt_path::normalize::positioned;
use pathopt_path::transform::{apply_to_path, parse_transform_list, compose, AffineMatrix};
use proptest::prelude::*;

fn end_points(commands: &[pathopt_path::Command]) -> Vec<Point> {
    positioned(commands).into_iter().map(|p| p.coords).collect()
}

proptest! {
    #[test]
    fn test_end_points_follow_matrix(
        m in prop::array::uniform6(-3.0..3.0f64),
        points in prop::collection::vec((-50.0..50.0f64, -50.0..50.0f64), 1..8),
    ) {
        let matrix = AffineMatrix::from_array(m);
        let mut d = String::from("M1 2");
        for (i, (x, y)) in points.iter().enumerate() {
            match i % 4 {
                0 => d.push_str(&format!(" l{x} {y}")),
                1 => d.push_str(&format!(" H{x}")),
                2 => d.push_str(&format!(" v{y}")),
                _ => d.push_str(&format!(" Q{y} {x} {x} {y}")),
            }
        }
        let program = parse_path(&d);
        let original = end_points(program.as_slice());
        let transformed = end_points(&apply_to_path(&matrix, program.as_slice()));

        prop_assert_eq!(original.len(), transformed.len());
        for (p, q) in original.iter().zip(&transformed) {
            let expected = matrix.apply_point(*p);
            prop_assert!(expected.distance(*q) < 1e-6, "{:?} != {:?}", expected, q);
        }
    }
}

#[test]
fn test_translate_scenario() {
    let matrix = compose(&parse_transform_list("translate(5,5)"));
    let program = parse_path("M0,0 L10,0 L10,10 L0,10 Z");
    let moved = apply_to_path(&matrix, program.as_slice());
    let ends = end_points(&moved);
    assert_eq!(ends[0], Point::new(5.0, 5.0));
    assert_eq!(ends[2], Point::new(15.0, 15.0));
    assert_eq!(ends[4], Point::new(5.0, 5.0));
}

#[test]
fn test_rotated_circle_keeps_radius() {
    let matrix = compose(&parse_transform_list("rotate(45) scale(2)"));
    let program = parse_path("M0 0 a5 5 0 1 0 10 0 a5 5 0 1 0 -10 0");
    let moved = apply_to_path(&matrix, program.as_slice());
    for arc in &moved[1..] {
        assert!((arc.args[0] - 10.0).abs() < 1e-9);
        assert!((arc.args[1] - 10.0).abs() < 1e-9);
    }
}
