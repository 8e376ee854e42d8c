use crate::TypeMask;

#[test]
fn bottom_is_subset_of_everything() {
    assert!(TypeMask::BOTTOM.is_subset_of(TypeMask::BOTTOM));
    assert!(TypeMask::BOTTOM.is_subset_of(TypeMask::NUMBER));
    assert!(TypeMask::BOTTOM.is_subset_of(TypeMask::TOP));
}

#[test]
fn boolean_is_both_literals() {
    assert!(TypeMask::BOOLEAN.contains(TypeMask::TRUE));
    assert!(TypeMask::BOOLEAN.contains(TypeMask::FALSE));
    assert!(!TypeMask::BOOLEAN.contains(TypeMask::NULL));
}

#[test]
fn top_scalar_covers_every_scalar_slice() {
    for slice in [
        TypeMask::TRUE,
        TypeMask::FALSE,
        TypeMask::NULL,
        TypeMask::NUMBER,
        TypeMask::STRING,
        TypeMask::UNDEFINED,
        TypeMask::TRUTHY,
        TypeMask::FALSY,
    ] {
        assert!(slice.is_subset_of(TypeMask::TOP_SCALAR));
    }
    assert!(!TypeMask::NON_SCALAR.is_subset_of(TypeMask::TOP_SCALAR));
    assert!(TypeMask::TOP_SCALAR.is_subset_of(TypeMask::TOP));
}

#[test]
fn unknown_is_outside_top() {
    assert!(!TypeMask::UNKNOWN.is_subset_of(TypeMask::TOP));
}

#[test]
fn union_and_without_are_inverses_on_disjoint_bits() {
    let m = TypeMask::NUMBER | TypeMask::STRING;
    assert!(m.contains(TypeMask::NUMBER));
    assert_eq!(m.without(TypeMask::STRING), TypeMask::NUMBER);
    assert!(m.intersects(TypeMask::STRING));
    assert!(!m.intersects(TypeMask::NULL));
}
