use pathopt_path::codec::parse_path;
use pathopt_path::intersects;
use proptest::prelude::*;

/// A closed quadrilateral or curved shape built from quarter-unit numbers
fn shape() -> impl Strategy<Value = String> {
    (
        prop::collection::vec(-80i32..80, 8),
        any::<bool>(),
    )
        .prop_map(|(v, curved)| {
            let n: Vec<f64> = v.iter().map(|&k| f64::from(k) / 4.0).collect();
            if curved {
                format!(
                    "M{} {} C{} {} {} {} {} {} Q{} {} {} {} Z",
                    n[0], n[1], n[2], n[3], n[4], n[5], n[6], n[7], n[2], n[7], n[0] + 1.0, n[1]
                )
            } else {
                format!(
                    "M{} {} L{} {} L{} {} L{} {} Z",
                    n[0], n[1], n[2], n[3], n[4], n[5], n[6], n[7]
                )
            }
        })
}

proptest! {
    #[test]
    fn test_argument_order_does_not_matter(a in shape(), b in shape()) {
        let pa = parse_path(&a);
        let pb = parse_path(&b);
        prop_assert_eq!(
            intersects(pa.as_slice(), pb.as_slice()),
            intersects(pb.as_slice(), pa.as_slice())
        );
    }

    #[test]
    fn test_shapes_apart_on_x_never_intersect(
        a in shape(),
        b in shape(),
    ) {
        let pa = parse_path(&a);
        // Shift b beyond a's extent
        let pb = parse_path(&b);
        let shifted = pathopt_path::apply_to_path(
            &pathopt_path::AffineMatrix::translation(100.0, 0.0),
            pb.as_slice(),
        );
        prop_assert!(!intersects(pa.as_slice(), &shifted));
    }
}

#[test]
fn test_shape_overlaps_itself() {
    let square = parse_path("M0 0 h10 v10 h-10 z");
    assert!(intersects(square.as_slice(), square.as_slice()));
}

#[test]
fn test_any_subpath_pair_counts() {
    let a = parse_path("M0 0 h10 v10 h-10 z M50 50 h10 v10 h-10 z");
    let b = parse_path("M55 55 h10 v10 h-10 z");
    let c = parse_path("M20 20 h10 v10 h-10 z");
    assert!(intersects(a.as_slice(), b.as_slice()));
    assert!(!intersects(a.as_slice(), c.as_slice()));
}
