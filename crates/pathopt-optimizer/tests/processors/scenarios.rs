use pathopt_optimizer::{ComputedStyle, Element, ElementOutcome, Optimizer};
use pathopt_settings::Config;

fn optimize(element: &mut Element) -> ElementOutcome {
    let style = ComputedStyle::from_attributes(element, None);
    Optimizer::default().optimize_element(element, &style)
}

#[test]
fn test_translate_folded_into_square() {
    let mut path = Element::new("path")
        .with_attr("d", "M0,0 L10,0 L10,10 L0,10 Z")
        .with_attr("transform", "translate(5,5)");
    assert_eq!(optimize(&mut path), ElementOutcome::Rewritten);
    assert_eq!(path.attr("d"), Some("M5,5h10v10h-10z"));
    assert!(!path.has_attr("transform"));
}

#[test]
fn test_disjoint_squares_merge() {
    let mut siblings = vec![
        Element::new("path")
            .with_attr("d", "M0,0h10v10h-10z")
            .with_attr("fill", "#f00"),
        Element::new("path")
            .with_attr("d", "M20,0h10v10h-10z")
            .with_attr("fill", "#f00"),
    ];
    let removed = Optimizer::default()
        .optimize_siblings(&mut siblings, |e| ComputedStyle::from_attributes(e, None));
    assert_eq!(removed, 1);
    assert_eq!(siblings.len(), 1);
    assert_eq!(siblings[0].attr("d"), Some("M0,0h10v10h-10zM20,0h10v10h-10z"));
    assert_eq!(siblings[0].attr("fill"), Some("#f00"));
}

#[test]
fn test_utilize_absolute() {
    let mut config = Config::default();
    config.path_data.utilize_absolute = true;
    let optimizer = Optimizer::from_config(&config);
    let mut path = Element::new("path").with_attr("d", "M5 5 L15 5 L15 15 L5 15 Z");
    let style = ComputedStyle::from_attributes(&path, None);
    optimizer.optimize_element(&mut path, &style);
    assert_eq!(path.attr("d"), Some("M5,5h10v10H5z"));
}

#[test]
fn test_second_run_changes_nothing() {
    let inputs = [
        ("M0 0 L10 0 L10 10 L0 10 Z", Some("translate(5 5)")),
        ("M0 0 C10 0 20 10 20 20 C20 30 30 40 40 40", None),
        ("M10 10 A5 5 0 0 1 20 10 L20 30", Some("rotate(90)")),
        ("M1.23456 2.34567 l0.0001 0 l3 3", None),
        ("M0 0 Q5 -5 10 0 T20 0 T30 0", Some("scale(2) translate(1 1)")),
    ];
    for (d, transform) in inputs {
        let mut path = Element::new("path").with_attr("d", d);
        if let Some(t) = transform {
            path.set_attr("transform", t);
        }
        optimize(&mut path);
        let once = path.clone();
        assert_eq!(optimize(&mut path), ElementOutcome::Unchanged, "{}", d);
        assert_eq!(path, once, "{}", d);
    }
}

#[test]
fn test_stroke_scaled_with_path() {
    let mut path = Element::new("path")
        .with_attr("d", "M0 0 L10 0")
        .with_attr("stroke", "#000")
        .with_attr("transform", "scale(2)");
    optimize(&mut path);
    assert_eq!(path.attr("d"), Some("M0,0h20"));
    assert_eq!(path.attr("stroke-width"), Some("2"));
    assert!(!path.has_attr("transform"));
}

#[test]
fn test_non_scaling_stroke_width_untouched() {
    let mut path = Element::new("path")
        .with_attr("d", "M0 0 L10 0")
        .with_attr("stroke", "#000")
        .with_attr("stroke-width", "3")
        .with_attr("vector-effect", "non-scaling-stroke")
        .with_attr("transform", "scale(2)");
    optimize(&mut path);
    assert_eq!(path.attr("stroke-width"), Some("3"));
    assert!(!path.has_attr("transform"));
}

#[test]
fn test_stroke_with_uneven_scale_keeps_transform() {
    let mut path = Element::new("path")
        .with_attr("d", "M0 0 L10 0")
        .with_attr("stroke", "#000")
        .with_attr("transform", "scale(2 1)");
    optimize(&mut path);
    assert_eq!(path.attr("d"), Some("M0,0h10"));
    assert_eq!(path.attr("transform"), Some("scale(2,1)"));
}

#[test]
fn test_stroke_folding_can_be_disabled() {
    let mut config = Config::default();
    config.path_data.apply_transforms_stroked = false;
    let optimizer = Optimizer::from_config(&config);
    let mut path = Element::new("path")
        .with_attr("d", "M0 0 L10 0")
        .with_attr("stroke", "#000")
        .with_attr("transform", "translate(5)");
    let style = ComputedStyle::from_attributes(&path, None);
    optimizer.optimize_element(&mut path, &style);
    assert_eq!(path.attr("transform"), Some("translate(5)"));
}

#[test]
fn test_inline_style_keeps_transform() {
    let mut path = Element::new("path")
        .with_attr("d", "M0 0 L10 0")
        .with_attr("style", "stroke: red")
        .with_attr("transform", "translate(5)");
    optimize(&mut path);
    assert_eq!(path.attr("transform"), Some("translate(5)"));
    assert_eq!(path.attr("d"), Some("M0,0h10"));
}

#[test]
fn test_inherited_stroke_blocks_uneven_scale() {
    let group = Element::new("g").with_attr("stroke", "blue");
    let parent = ComputedStyle::from_attributes(&group, None);
    let mut path = Element::new("path")
        .with_attr("d", "M0 0 L10 0")
        .with_attr("transform", "scale(1 3)");
    let style = ComputedStyle::from_attributes(&path, Some(&parent));
    Optimizer::default().optimize_element(&mut path, &style);
    assert!(path.has_attr("transform"));
}
