use super::*;

#[test]
fn position_keywords_round_trip() {
    for p in [
        Position::Static,
        Position::Relative,
        Position::Absolute,
        Position::Fixed,
        Position::Sticky,
    ] {
        assert_eq!(Position::parse(p.as_str()).unwrap(), p);
    }
    assert_eq!(Position::parse("  ABSOLUTE ").unwrap(), Position::Absolute);
}

#[test]
fn unknown_position_is_a_style_error() {
    let err = Position::parse("floating").unwrap_err();
    assert!(matches!(err, SpriteError::Style(_)));
}

#[test]
fn positioned_and_out_of_flow_classification() {
    assert!(!Position::Static.is_positioned());
    assert!(Position::Relative.is_positioned());
    assert!(Position::Sticky.is_positioned());
    assert!(!Position::Relative.is_out_of_flow());
    assert!(Position::Absolute.is_out_of_flow());
    assert!(Position::Fixed.is_out_of_flow());
}

#[test]
fn managed_set_covers_every_written_property() {
    let names: Vec<_> = MANAGED_PROPERTIES.iter().map(|p| p.css_name()).collect();
    assert_eq!(
        names,
        ["position", "top", "left", "width", "height", "transform"]
    );
    assert_eq!(StyleProperty::Transform.to_string(), "transform");
}
