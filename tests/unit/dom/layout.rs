use super::*;

fn child(doc: &mut Document, parent: NodeId, css: &str) -> NodeId {
    let n = doc.create_element("n");
    doc.set_style_attribute(n, css);
    doc.append_child(parent, n).unwrap();
    n
}

fn rect_of(tree: &LayoutTree, node: NodeId) -> Rect {
    tree.get(node).unwrap().client_rect()
}

#[test]
fn blocks_stack_vertically() {
    let mut doc = Document::new(500.0, 400.0);
    let root = doc.root();
    let a = child(&mut doc, root, "height: 10px");
    let b = child(&mut doc, root, "height: 20px; margin: 5px; padding: 2px; border: 1px solid");
    let c = child(&mut doc, root, "height: 30px");

    let tree = layout_document(&doc);
    assert_eq!(rect_of(&tree, a), Rect::new(0.0, 0.0, 500.0, 10.0));
    assert_eq!(rect_of(&tree, b), Rect::new(5.0, 15.0, 495.0, 41.0));
    assert_eq!(rect_of(&tree, c), Rect::new(0.0, 46.0, 500.0, 76.0));
    assert_eq!(rect_of(&tree, root), Rect::new(0.0, 0.0, 500.0, 76.0));
}

#[test]
fn relative_offsets_do_not_affect_siblings() {
    let mut doc = Document::new(500.0, 400.0);
    let root = doc.root();
    let a = child(&mut doc, root, "position: relative; top: 7px; left: 3px; height: 10px");
    let b = child(&mut doc, root, "height: 10px");

    let tree = layout_document(&doc);
    assert_eq!(rect_of(&tree, a), Rect::new(3.0, 7.0, 503.0, 17.0));
    assert_eq!(rect_of(&tree, b).y0, 10.0);
}

#[test]
fn absolute_boxes_use_the_padding_box_and_shrink_to_fit() {
    let mut doc = Document::new(500.0, 400.0);
    let root = doc.root();
    let op = child(
        &mut doc,
        root,
        "position: relative; margin-top: 50px; border: 2px solid; padding: 8px; height: 100px",
    );
    let abs = child(&mut doc, op, "position: absolute; top: 5px; left: 6px");
    child(&mut doc, abs, "width: 40px; height: 15px; margin: 0 3px");
    let after = child(&mut doc, op, "height: 10px");

    let tree = layout_document(&doc);
    assert_eq!(rect_of(&tree, abs), Rect::new(8.0, 57.0, 54.0, 72.0));
    // Out-of-flow boxes take no room.
    assert_eq!(rect_of(&tree, after).y0, 60.0);
}

#[test]
fn absolute_static_position_without_offsets() {
    let mut doc = Document::new(500.0, 400.0);
    let root = doc.root();
    child(&mut doc, root, "height: 25px");
    let abs = child(&mut doc, root, "position: absolute; width: 10px; height: 10px");

    let tree = layout_document(&doc);
    assert_eq!(rect_of(&tree, abs), Rect::new(0.0, 25.0, 10.0, 35.0));
}

#[test]
fn containing_block_lookup() {
    let mut doc = Document::new(500.0, 400.0);
    let root = doc.root();
    let positioned = child(&mut doc, root, "position: relative");
    let transformed = child(&mut doc, positioned, "transform: translate(1px, 1px)");
    let plain = child(&mut doc, transformed, "");
    let leaf = child(&mut doc, plain, "");

    let tree = layout_document(&doc);
    let style_of = |id: NodeId| tree.get(id).map(|b| b.style).unwrap_or_default();
    assert_eq!(
        find_containing_block(&doc, leaf, Position::Absolute, style_of),
        Some(transformed)
    );
    assert_eq!(
        find_containing_block(&doc, plain, Position::Fixed, style_of),
        Some(transformed)
    );
    assert_eq!(
        find_containing_block(&doc, transformed, Position::Absolute, style_of),
        Some(positioned)
    );
    assert_eq!(
        find_containing_block(&doc, transformed, Position::Fixed, style_of),
        None
    );
}

#[test]
fn painting_applies_transforms_and_scroll() {
    let mut doc = Document::new(500.0, 400.0);
    let root = doc.root();
    let scaled = child(
        &mut doc,
        root,
        "width: 100px; transform: scale(2); transform-origin: 0 0",
    );
    let scroller = child(&mut doc, scaled, "height: 50px; overflow: auto");
    doc.set_scroll(scroller, Vec2::new(0.0, 10.0));
    let inner = child(&mut doc, scroller, "height: 200px");

    let tree = layout_document(&doc);
    assert_eq!(rect_of(&tree, scroller), Rect::new(0.0, 0.0, 200.0, 100.0));
    assert_eq!(rect_of(&tree, inner), Rect::new(0.0, -20.0, 200.0, 380.0));
}

#[test]
fn computed_style_reports_content_box_and_matrix() {
    let mut doc = Document::new(500.0, 400.0);
    let root = doc.root();
    let el = child(
        &mut doc,
        root,
        "width: 100px; height: 40px; padding: 5px; border: 1px solid; transform: translateX(20px)",
    );
    let tree = layout_document(&doc);
    let cs = tree.get(el).unwrap().computed_style();
    assert_eq!((cs.width, cs.height), (100.0, 40.0));
    assert_eq!(cs.transform, "matrix(1, 0, 0, 1, 20, 0)");
    assert_eq!(cs.transform_origin, Vec2::new(56.0, 26.0));
    assert_eq!(cs.border_box_width(), 112.0);
    assert_eq!(tree.get(el).unwrap().padding_box(), Rect::new(1.0, 1.0, 111.0, 51.0));
}

#[test]
fn detached_nodes_have_no_box() {
    let mut doc = Document::new(500.0, 400.0);
    let loose = doc.create_element("loose");
    let tree = layout_document(&doc);
    assert!(tree.get(loose).is_none());
}
