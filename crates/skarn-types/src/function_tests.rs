use crate::function::create_initial_function_types;
use crate::types::create_scalars;
use crate::{FunctionType, Signature, Type};

fn bounds() -> (FunctionType, FunctionType, FunctionType, FunctionType) {
    let mut table = create_initial_function_types(&Type::bottom(), &Type::top());
    (
        table.remove("BOTTOM_FUNCTION").unwrap(),
        table.remove("QMARK_FUNCTION").unwrap(),
        table.remove("TOP_FUNCTION").unwrap(),
        table.remove("LOOSE_TOP_FUNCTION").unwrap(),
    )
}

fn unary(param: Type, returns: Type) -> FunctionType {
    FunctionType::declared(Signature::new(vec![param], vec![], None, returns))
}

#[test]
fn function_table_is_complete() {
    let table = create_initial_function_types(&Type::bottom(), &Type::top());
    for name in [
        "QMARK_FUNCTION",
        "BOTTOM_FUNCTION",
        "TOP_FUNCTION",
        "LOOSE_TOP_FUNCTION",
    ] {
        assert!(table.contains_key(name), "missing {name}");
    }
}

#[test]
fn bottom_function_is_under_everything() {
    let (bottom, qmark, top, loose_top) = bounds();
    let number = create_scalars().remove("NUMBER").unwrap();
    let f = unary(number.clone(), number);

    assert!(bottom.is_subtype_of(&f));
    assert!(bottom.is_subtype_of(&qmark));
    assert!(bottom.is_subtype_of(&top));
    assert!(bottom.is_subtype_of(&loose_top));
    assert!(!f.is_subtype_of(&bottom));
}

#[test]
fn top_function_is_above_everything() {
    let (bottom, _, top, loose_top) = bounds();
    let number = create_scalars().remove("NUMBER").unwrap();
    let f = unary(number.clone(), number);

    assert!(f.is_subtype_of(&top));
    assert!(f.is_subtype_of(&loose_top));
    assert!(bottom.is_subtype_of(&top));
    assert!(!top.is_subtype_of(&f));
}

#[test]
fn qmark_function_is_compatible_both_ways() {
    let (_, qmark, top, _) = bounds();
    let number = create_scalars().remove("NUMBER").unwrap();
    let f = unary(number.clone(), number);

    assert!(qmark.is_subtype_of(&f));
    assert!(f.is_subtype_of(&qmark));
    assert!(qmark.is_subtype_of(&top));
    assert!(top.is_subtype_of(&qmark));
}

#[test]
fn declared_parameters_are_contravariant() {
    let scalars = create_scalars();
    let number = scalars["NUMBER"].clone();
    let number_or_string = scalars["NUMBER_OR_STRING"].clone();

    let wide = unary(number_or_string.clone(), number.clone());
    let narrow = unary(number.clone(), number.clone());

    assert!(wide.is_subtype_of(&narrow));
    assert!(!narrow.is_subtype_of(&wide));
}

#[test]
fn declared_returns_are_covariant() {
    let scalars = create_scalars();
    let number = scalars["NUMBER"].clone();
    let number_or_string = scalars["NUMBER_OR_STRING"].clone();

    let narrow_ret = unary(number.clone(), number.clone());
    let wide_ret = unary(number.clone(), number_or_string.clone());

    assert!(narrow_ret.is_subtype_of(&wide_ret));
    assert!(!wide_ret.is_subtype_of(&narrow_ret));
}

#[test]
fn extra_required_parameters_break_subtyping() {
    let number = create_scalars().remove("NUMBER").unwrap();
    let nullary = FunctionType::declared(Signature::new(vec![], vec![], None, number.clone()));
    let unary_fn = unary(number.clone(), number);

    assert!(nullary.is_subtype_of(&unary_fn));
    assert!(!unary_fn.is_subtype_of(&nullary));
}

#[test]
fn with_loose_only_affects_the_top_bound() {
    let (bottom, qmark, top, loose_top) = bounds();

    assert_eq!(top.with_loose(), loose_top);
    assert_eq!(bottom.clone().with_loose(), bottom);
    assert_eq!(qmark.clone().with_loose(), qmark);
    assert!(loose_top.is_loose());
    assert!(loose_top.is_top());
}

#[test]
fn rest_parameters_cover_trailing_positions() {
    let scalars = create_scalars();
    let number = scalars["NUMBER"].clone();
    let string = scalars["STRING"].clone();

    let sig = Signature::new(vec![number.clone()], vec![], Some(string.clone()), number);
    assert_eq!(sig.param_at(0), Some(&sig.required[0]));
    assert_eq!(sig.param_at(1), Some(&string));
    assert_eq!(sig.param_at(5), Some(&string));
}
