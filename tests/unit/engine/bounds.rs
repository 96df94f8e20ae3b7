use super::*;
use crate::dom::document::Document;
use crate::foundation::error::SpriteError;

#[test]
fn measures_the_rendered_border_box() {
    let mut doc = Document::new(800.0, 600.0);
    let el = doc.create_element("el");
    doc.set_style_attribute(
        el,
        "margin: 10px 0 0 20px; width: 100px; height: 50px; padding: 5px; border: 1px solid",
    );
    doc.append_child(doc.root(), el).unwrap();

    let b = measure_bounds(&mut doc, el).unwrap();
    assert_eq!(b, Bounds::new(10.0, 20.0, 112.0, 62.0));
}

#[test]
fn transforms_are_included() {
    let mut doc = Document::new(800.0, 600.0);
    let el = doc.create_element("el");
    doc.set_style_attribute(
        el,
        "width: 100px; height: 50px; transform: translate(30px, 40px) scale(2); transform-origin: 0 0",
    );
    doc.append_child(doc.root(), el).unwrap();

    let b = measure_bounds(&mut doc, el).unwrap();
    assert!(b.approx_eq(Bounds::new(40.0, 30.0, 200.0, 100.0), 1e-9));
}

#[test]
fn detached_element_is_an_error() {
    let mut doc = Document::new(800.0, 600.0);
    let el = doc.create_element("el");
    assert!(matches!(
        measure_bounds(&mut doc, el),
        Err(SpriteError::DetachedElement(_))
    ));
}
