use pathopt_core::OutputFormat;
use pathopt_path::transform::{
    optimize_transform_list, parse_transform_list, serialize_transform_list,
};
use pathopt_settings::TransformSettings;

fn optimize(text: &str, settings: &TransformSettings) -> String {
    let list = optimize_transform_list(&parse_transform_list(text), settings);
    serialize_transform_list(&list, &settings.output_format())
}

#[test]
fn test_rotation_about_point_collapses() {
    let settings = TransformSettings::default();
    assert_eq!(
        optimize("translate(10 20) rotate(90) translate(-10 -20)", &settings),
        "rotate(90,10,20)"
    );
}

#[test]
fn test_matrix_rounded_without_decomposition() {
    let settings = TransformSettings {
        matrix_to_transform: false,
        ..TransformSettings::default()
    };
    assert_eq!(
        optimize("matrix(1.000001 0 0 1 10.00049 0)", &settings),
        "matrix(1,0,0,1,10,0)"
    );
}

#[test]
fn test_output_is_stable() {
    let settings = TransformSettings::default();
    for text in [
        "translate(10 20) scale(2)",
        "rotate(30) skewX(10)",
        "matrix(0.5 0.866 -0.866 0.5 3 4)",
        "scale(-1 1)",
    ] {
        let once = optimize(text, &settings);
        let twice = optimize(&once, &settings);
        assert_eq!(once, twice, "{}", text);
    }
}

#[test]
fn test_serialize_uses_compact_separators() {
    let list = parse_transform_list("translate(-5 -.5)");
    assert_eq!(serialize_transform_list(&list, &OutputFormat::default()), "translate(-5-.5)");
}
