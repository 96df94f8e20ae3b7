use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SpriteError::invalid_state("x")
            .to_string()
            .contains("invalid state:")
    );
    assert!(
        SpriteError::detached("x")
            .to_string()
            .contains("detached element:")
    );
    assert!(
        SpriteError::unsupported_transform("x")
            .to_string()
            .contains("unsupported transform:")
    );
    assert!(SpriteError::style("x").to_string().contains("style error:"));
    assert!(
        SpriteError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SpriteError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
