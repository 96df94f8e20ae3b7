use super::*;

const SCENE: &str = r#"{
    "viewport": { "width": 640, "height": 480 },
    "elements": [
        {
            "name": "list",
            "style": "position: relative; overflow: auto; height: 100px",
            "scroll_top": 15,
            "children": [
                { "name": "first", "style": "height: 30px" },
                { "name": "second" }
            ]
        }
    ]
}"#;

#[test]
fn builds_the_described_tree() {
    let scene = Scene::from_json_str(SCENE).unwrap();
    assert_eq!(scene.elements.len(), 1);
    let mut doc = scene.build().unwrap();
    assert_eq!(doc.viewport().width, 640.0);

    let list = doc.find("list").unwrap();
    let first = doc.find("first").unwrap();
    let second = doc.find("second").unwrap();
    assert_eq!(doc.children(list), &[first, second]);
    assert_eq!(doc.scroll(list), Vec2::new(0.0, 15.0));
    assert_eq!(doc.style_attribute(second), None);
    assert_eq!(doc.style(first, "height"), Some("30px"));
    assert_eq!(doc.bounding_client_rect(first).unwrap().y0, -15.0);
}

#[test]
fn reader_and_str_agree() {
    let a = Scene::from_json_str(SCENE).unwrap();
    let b = Scene::from_reader(SCENE.as_bytes()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn bad_scenes_are_serde_errors() {
    assert!(matches!(
        Scene::from_json_str("{"),
        Err(SpriteError::Serde(_))
    ));
    let zero = Scene::from_json_str(r#"{ "viewport": { "width": 0, "height": 10 } }"#).unwrap();
    assert!(matches!(zero.build(), Err(SpriteError::Serde(_))));
    assert!(Scene::from_path("does/not/exist.json").is_err());
}
