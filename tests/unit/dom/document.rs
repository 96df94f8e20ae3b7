use super::*;

#[test]
fn tree_building_and_lookup() {
    let mut doc = Document::new(320.0, 240.0);
    assert_eq!(doc.viewport(), Size::new(320.0, 240.0));
    let root = doc.root();
    assert_eq!(doc.name(root), "root");

    let a = doc.create_element("a");
    let b = doc.create_element("b");
    assert!(!doc.contains(a));
    doc.append_child(root, a).unwrap();
    doc.append_child(a, b).unwrap();
    assert!(doc.contains(b));
    assert_eq!(doc.parent(b), Some(a));
    assert_eq!(doc.children(root), &[a]);
    assert_eq!(doc.find("b"), Some(b));
    assert_eq!(doc.find("missing"), None);

    doc.append_child(root, b).unwrap();
    assert_eq!(doc.children(root), &[a, b]);
    assert!(doc.children(a).is_empty());
}

#[test]
fn invalid_moves_are_rejected() {
    let mut doc = Document::new(320.0, 240.0);
    let root = doc.root();
    let a = doc.create_element("a");
    let b = doc.create_element("b");
    doc.append_child(root, a).unwrap();
    doc.append_child(a, b).unwrap();

    assert!(matches!(
        doc.append_child(b, a),
        Err(SpriteError::InvalidState(_))
    ));
    assert!(doc.append_child(a, root).is_err());
    assert!(doc.detach(root).is_err());

    doc.detach(a).unwrap();
    assert!(!doc.contains(b));
    assert_eq!(doc.find("b"), None);
}

#[test]
fn inline_style_editing() {
    let mut doc = Document::new(320.0, 240.0);
    let el = doc.create_element("el");
    assert_eq!(doc.style_attribute(el), None);

    doc.set_style(el, "Top", " 5px ");
    assert_eq!(doc.style(el, "top"), Some("5px"));
    doc.set_style(el, "left", "1px");
    doc.set_style(el, "top", "6px");
    assert_eq!(doc.style_attribute(el).as_deref(), Some("top: 6px; left: 1px;"));

    doc.set_style(el, "top", "");
    assert_eq!(doc.style(el, "top"), None);
    doc.remove_style(el, "left");
    assert_eq!(doc.style_attribute(el).as_deref(), Some(""));
    doc.remove_style_attribute(el);
    assert_eq!(doc.style_attribute(el), None);
}

#[test]
fn layout_is_cached_until_mutation() {
    let mut doc = Document::new(320.0, 240.0);
    let root = doc.root();
    let el = doc.create_element("el");
    doc.set_style_attribute(el, "height: 10px");
    doc.append_child(root, el).unwrap();

    assert_eq!(doc.layout_passes(), 0);
    doc.bounding_client_rect(el).unwrap();
    doc.computed_style(el).unwrap();
    assert_eq!(doc.layout_passes(), 1);

    doc.set_style(el, "height", "20px");
    assert_eq!(
        doc.bounding_client_rect(el).unwrap(),
        Rect::new(0.0, 0.0, 320.0, 20.0)
    );
    assert_eq!(doc.layout_passes(), 2);
}

#[test]
fn detached_measurement_fails() {
    let mut doc = Document::new(320.0, 240.0);
    let el = doc.create_element("el");
    assert!(matches!(
        doc.bounding_client_rect(el),
        Err(SpriteError::DetachedElement(_))
    ));
    assert!(!LayoutHost::is_attached(&doc, el));
}

#[test]
fn scroll_only_counts_for_scroll_containers() {
    let mut doc = Document::new(320.0, 240.0);
    let root = doc.root();
    let el = doc.create_element("el");
    doc.append_child(root, el).unwrap();
    doc.set_scroll(el, Vec2::new(-4.0, 30.0));
    assert_eq!(doc.scroll(el), Vec2::new(0.0, 30.0));
    assert_eq!(doc.effective_scroll(el).unwrap(), Vec2::ZERO);

    doc.set_style(el, "overflow", "scroll");
    assert_eq!(doc.effective_scroll(el).unwrap(), Vec2::new(0.0, 30.0));
}

#[test]
fn host_trait_maps_to_inline_styles() {
    let mut doc = Document::new(320.0, 240.0);
    let root = doc.root();
    let op = doc.create_element("op");
    doc.set_style_attribute(op, "position: relative");
    doc.append_child(root, op).unwrap();
    let el = doc.create_element("el");
    doc.append_child(op, el).unwrap();

    LayoutHost::set_inline_style(&mut doc, el, StyleProperty::Width, "12px");
    assert_eq!(
        LayoutHost::inline_style(&doc, el, StyleProperty::Width).as_deref(),
        Some("12px")
    );
    LayoutHost::remove_inline_style(&mut doc, el, StyleProperty::Width);
    assert_eq!(LayoutHost::inline_style(&doc, el, StyleProperty::Width), None);

    assert_eq!(doc.offset_parent(el, Position::Absolute).unwrap(), Some(op));
    assert_eq!(doc.offset_parent(el, Position::Fixed).unwrap(), None);
    assert_eq!(
        doc.padding_box(op).unwrap(),
        Rect::new(0.0, 0.0, 320.0, 0.0)
    );
}
