use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(MaskError::io("x").to_string().contains("io error:"));
    assert!(MaskError::decode("x").to_string().contains("decode error:"));
    assert!(MaskError::not_found("x").to_string().contains("not found:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = MaskError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn anyhow_converts_into_other() {
    fn fails() -> MaskResult<()> {
        Err(anyhow::anyhow!("join failed"))?;
        Ok(())
    }
    assert!(matches!(fails(), Err(MaskError::Other(_))));
}
