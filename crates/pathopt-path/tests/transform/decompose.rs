use pathopt_path::transform::{compose, decompose, AffineMatrix, NamedTransform};
use proptest::prelude::*;

fn named_transform() -> impl Strategy<Value = NamedTransform> {
    prop_oneof![
        (-100.0..100.0f64, -100.0..100.0f64)
            .prop_map(|(tx, ty)| NamedTransform::Translate { tx, ty: Some(ty) }),
        (0.1..5.0f64, 0.1..5.0f64, any::<bool>()).prop_map(|(sx, sy, mirror)| {
            NamedTransform::Scale {
                sx: if mirror { -sx } else { sx },
                sy: Some(sy),
            }
        }),
        (-180.0..180.0f64).prop_map(|angle| NamedTransform::Rotate { angle, center: None }),
        (-180.0..180.0f64, -50.0..50.0f64, -50.0..50.0f64).prop_map(|(angle, cx, cy)| {
            NamedTransform::Rotate {
                angle,
                center: Some((cx, cy)),
            }
        }),
        (-60.0..60.0f64).prop_map(NamedTransform::SkewX),
        (-60.0..60.0f64).prop_map(NamedTransform::SkewY),
    ]
}

proptest! {
    #[test]
    fn test_decomposition_recomposes(list in prop::collection::vec(named_transform(), 1..5)) {
        let matrix = compose(&list);
        let recomposed = compose(&decompose(&matrix));
        prop_assert!(
            recomposed.approx_eq(&matrix, 1e-5),
            "{:?} became {:?}",
            matrix,
            recomposed
        );
    }
}

#[test]
fn test_named_forms_found() {
    let rotate = decompose(&AffineMatrix::rotation(30.0, None));
    assert_eq!(rotate.len(), 1);
    assert!(matches!(rotate[0], NamedTransform::Rotate { angle, center: None } if (angle - 30.0).abs() < 1e-9));

    let translate = decompose(&AffineMatrix::translation(3.0, 4.0));
    assert_eq!(
        translate,
        vec![NamedTransform::Translate {
            tx: 3.0,
            ty: Some(4.0)
        }]
    );

    let skew_y = decompose(&AffineMatrix::skew_y(20.0));
    assert!(matches!(skew_y[..], [NamedTransform::SkewY(k)] if (k - 20.0).abs() < 1e-9));
}
