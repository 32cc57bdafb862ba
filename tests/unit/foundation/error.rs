use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ReelError::malformed("x")
            .to_string()
            .contains("malformed input:")
    );
    assert!(
        ReelError::empty_timeline("x")
            .to_string()
            .contains("empty timeline:")
    );
    assert!(
        ReelError::invalid_config("x")
            .to_string()
            .contains("invalid configuration:")
    );
    assert!(
        ReelError::misuse("x")
            .to_string()
            .contains("playback misuse:")
    );
    assert!(ReelError::capture("x").to_string().contains("capture error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ReelError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
