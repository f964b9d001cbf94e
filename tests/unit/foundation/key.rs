use std::path::PathBuf;

use super::*;

#[test]
fn fnv_matches_reference_vectors() {
    assert_eq!(Fnv1a64::new_default().finish(), 0xcbf2_9ce4_8422_2325);

    let mut h = Fnv1a64::new_default();
    h.write_bytes(b"a");
    assert_eq!(h.finish(), 0xaf63_dc4c_8601_ec8c);
}

#[test]
fn mask_file_name_is_deterministic() {
    let p = PathBuf::from("photos/cat.png");
    assert_eq!(mask_file_name(&p), mask_file_name(&p));
    assert!(mask_file_name(&p).starts_with("mask.cat.png."));
    assert!(mask_file_name(&p).ends_with(".png"));
}

#[test]
fn same_file_name_in_different_dirs_does_not_collide() {
    let a = mask_file_name(&PathBuf::from("a/cat.png"));
    let b = mask_file_name(&PathBuf::from("b/cat.png"));
    assert_ne!(a, b);
}

#[test]
fn hostile_names_are_sanitized() {
    let name = mask_file_name(&PathBuf::from("../../etc/pa ss?wd"));
    assert!(name.starts_with("mask.pa_ss_wd."));
    assert!(!name.contains('/'));
    assert!(!name.contains('\\'));

    let name = mask_file_name(&PathBuf::from(".."));
    assert!(name.starts_with("mask.image."));
}
