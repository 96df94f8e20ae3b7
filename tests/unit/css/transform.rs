use super::*;

fn approx_affine(a: Affine, b: Affine) -> bool {
    a.as_coeffs()
        .iter()
        .zip(b.as_coeffs().iter())
        .all(|(x, y)| (x - y).abs() < 1e-9)
}

#[test]
fn none_is_empty() {
    let l = TransformList::parse("none").unwrap();
    assert!(l.is_none());
    assert_eq!(l.to_affine(), Affine::IDENTITY);
}

#[test]
fn translate_functions_accumulate() {
    let l = TransformList::parse("translateX(500px) translateY(500px)").unwrap();
    assert_eq!(l.functions().len(), 2);
    assert_eq!(l.to_affine(), Affine::translate(Vec2::new(500.0, 500.0)));

    let l = TransformList::parse("translate(10px, -4px)").unwrap();
    assert_eq!(l.to_affine(), Affine::translate(Vec2::new(10.0, -4.0)));

    let l = TransformList::parse("translate(7px)").unwrap();
    assert_eq!(l.to_affine(), Affine::translate(Vec2::new(7.0, 0.0)));
}

#[test]
fn functions_apply_right_to_left() {
    // translate then scale: the scale is applied to the point first.
    let l = TransformList::parse("translate(10px, 0) scale(2)").unwrap();
    let p = l.to_affine() * crate::foundation::core::Point::new(1.0, 1.0);
    assert!((p.x - 12.0).abs() < 1e-12);
    assert!((p.y - 2.0).abs() < 1e-12);
}

#[test]
fn rotate_units_convert_to_radians() {
    let deg = TransformList::parse("rotate(90deg)").unwrap().to_affine();
    let turn = TransformList::parse("rotate(0.25turn)").unwrap().to_affine();
    let rad = TransformList::parse(&format!("rotate({}rad)", std::f64::consts::FRAC_PI_2))
        .unwrap()
        .to_affine();
    let grad = TransformList::parse("rotate(100grad)").unwrap().to_affine();
    assert!(approx_affine(deg, turn));
    assert!(approx_affine(deg, rad));
    assert!(approx_affine(deg, grad));
    assert!(approx_affine(deg, Affine::new([0.0, 1.0, -1.0, 0.0, 0.0, 0.0])));
}

#[test]
fn scale_and_skew_forms() {
    assert_eq!(
        TransformList::parse("scale(0.5)").unwrap().to_affine(),
        Affine::scale(0.5)
    );
    assert_eq!(
        TransformList::parse("scaleX(2) scaleY(3)").unwrap().to_affine(),
        Affine::scale_non_uniform(2.0, 3.0)
    );
    let skew = TransformList::parse("skewX(45deg)").unwrap().to_affine();
    assert!(approx_affine(skew, Affine::new([1.0, 0.0, 1.0, 1.0, 0.0, 0.0])));
}

#[test]
fn matrix_function_and_exponents() {
    let l = TransformList::parse("matrix(1, 0, 0, 1, 1e2, -2.5E-1)").unwrap();
    assert_eq!(l.to_affine(), Affine::new([1.0, 0.0, 0.0, 1.0, 100.0, -0.25]));
}

#[test]
fn invalid_transforms_are_rejected() {
    assert!(TransformList::parse("").is_err());
    assert!(TransformList::parse("wobble(3px)").is_err());
    assert!(TransformList::parse("translateX(10%)").is_err());
    assert!(TransformList::parse("translateX(10px))").is_err());
    assert!(TransformList::parse("translate(10px 5px)").is_err());
    assert!(TransformList::parse("rotate(30)").is_err());
    assert!(TransformList::parse("scale(1, 2, 3)").is_err());
    assert!(TransformList::parse("matrix(1, 0, 0, 1)").is_err());
}

#[test]
fn unclosed_functions_close_at_end_of_input() {
    assert_eq!(
        TransformList::parse("translateX(10px").unwrap(),
        TransformList::parse("translateX(10px)").unwrap()
    );
}

#[test]
fn whitespace_and_comments_between_functions() {
    let l = TransformList::parse(" translateX( 4px ) /* then */ scale(2 , 3) ").unwrap();
    assert_eq!(
        l.to_affine(),
        Affine::translate(Vec2::new(4.0, 0.0)) * Affine::scale_non_uniform(2.0, 3.0)
    );
}

#[test]
fn computed_forms_parse() {
    assert_eq!(parse_computed("none").unwrap(), ComputedTransform::None);
    assert_eq!(parse_computed("").unwrap(), ComputedTransform::None);
    assert_eq!(
        parse_computed("matrix(0.5, 0, 0, 0.5, 20, 0)").unwrap(),
        ComputedTransform::Matrix(Affine::new([0.5, 0.0, 0.0, 0.5, 20.0, 0.0]))
    );
    let m3 = parse_computed("matrix3d(1,0,0,0, 0,1,0,0, 0,0,1,0, 5,6,0,1)").unwrap();
    let ComputedTransform::Matrix3d(m) = m3 else {
        panic!("expected matrix3d");
    };
    assert_eq!(m[12], 5.0);
    assert_eq!(m[13], 6.0);
    assert!(parse_computed("translateX(5px)").is_err());
    assert!(parse_computed("matrix(1,0,0,1,0,0) matrix(1,0,0,1,0,0)").is_err());
    assert!(parse_computed("matrix3d(1, 0)").is_err());
}

#[test]
fn serialized_matrix_parses_back() {
    let m = TransformList::parse("rotate(30deg) scale(0.5) translate(3px, 4px)")
        .unwrap()
        .to_affine();
    let s = serialize_matrix(m);
    assert!(s.starts_with("matrix("));
    assert_eq!(parse_computed(&s).unwrap(), ComputedTransform::Matrix(m));
    assert_eq!(
        serialize_matrix(Affine::IDENTITY),
        "matrix(1, 0, 0, 1, 0, 0)"
    );
}
