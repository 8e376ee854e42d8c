use crate::types::create_scalars;
use crate::{Type, TypeVarMap, UnknownTypeEnv};

fn scalar(name: &str) -> Type {
    create_scalars().remove(name).unwrap()
}

#[test]
fn scalar_table_is_complete() {
    let table = create_scalars();
    for name in [
        "BOOLEAN",
        "BOTTOM",
        "FALSE_TYPE",
        "FALSY",
        "NULL",
        "NUMBER",
        "STRING",
        "TOP",
        "TOP_SCALAR",
        "TRUE_TYPE",
        "TRUTHY",
        "UNDEFINED",
        "UNKNOWN",
        "UNDEFINED_OR_BOOLEAN",
        "UNDEFINED_OR_NUMBER",
        "UNDEFINED_OR_STRING",
        "NULL_OR_BOOLEAN",
        "NULL_OR_NUMBER",
        "NULL_OR_STRING",
        "NULL_OR_UNDEFINED",
        "NUMBER_OR_STRING",
    ] {
        assert!(table.contains_key(name), "missing {name}");
    }
}

#[test]
fn literals_sit_under_their_truthiness_unions() {
    assert!(scalar("TRUE_TYPE").is_subtype_of(&scalar("TRUTHY")));
    assert!(scalar("FALSE_TYPE").is_subtype_of(&scalar("FALSY")));
    assert!(!scalar("TRUE_TYPE").is_subtype_of(&scalar("FALSY")));
    assert!(!scalar("NUMBER").is_subtype_of(&scalar("TRUTHY")));
}

#[test]
fn truthiness_unions_sit_under_top_scalar() {
    assert!(scalar("TRUTHY").is_subtype_of(&scalar("TOP_SCALAR")));
    assert!(scalar("FALSY").is_subtype_of(&scalar("TOP_SCALAR")));
    assert!(scalar("TOP_SCALAR").is_subtype_of(&scalar("TOP")));
    assert!(!scalar("TOP").is_subtype_of(&scalar("TOP_SCALAR")));
}

#[test]
fn bottom_is_subtype_of_everything() {
    let bottom = Type::bottom();
    for name in ["NULL", "NUMBER", "STRING", "TOP", "UNKNOWN"] {
        assert!(bottom.is_subtype_of(&scalar(name)), "bottom vs {name}");
    }
}

#[test]
fn unknown_is_compatible_both_ways() {
    let unknown = Type::unknown();
    assert!(unknown.is_subtype_of(&scalar("NUMBER")));
    assert!(scalar("NUMBER").is_subtype_of(&unknown));
    assert!(unknown.is_subtype_of(&Type::bottom()));
}

#[test]
fn join_of_scalars_is_the_bit_union() {
    let joined = Type::join(&scalar("NUMBER"), &scalar("STRING"));
    assert_eq!(joined, scalar("NUMBER_OR_STRING"));
    assert!(scalar("NUMBER").is_subtype_of(&joined));
    assert!(scalar("STRING").is_subtype_of(&joined));
    assert!(!scalar("BOOLEAN").is_subtype_of(&joined));
}

#[test]
fn join_absorbs_unknown_and_top() {
    assert!(Type::join(&scalar("NUMBER"), &Type::unknown()).is_unknown());
    assert!(Type::join(&Type::top(), &scalar("NUMBER")).is_top());
}

#[test]
fn substitute_replaces_a_bound_variable() {
    let t = Type::type_var("T");
    let mut env = TypeVarMap::new();
    env.insert("T".to_owned(), scalar("STRING"));

    assert_eq!(t.substitute_generics(&env), scalar("STRING"));
}

#[test]
fn substitute_keeps_an_unbound_variable() {
    let t = Type::type_var("T");
    let env = TypeVarMap::new();

    assert_eq!(t.substitute_generics(&env), t);
}

#[test]
fn substitute_against_unknown_env_yields_unknown() {
    let t = Type::type_var("T");
    assert!(t.substitute_generics(&UnknownTypeEnv).is_unknown());
}

#[test]
fn substitution_leaves_plain_scalars_alone() {
    let t = scalar("NULL_OR_STRING");
    let mut env = TypeVarMap::new();
    env.insert("T".to_owned(), scalar("NUMBER"));

    assert_eq!(t.substitute_generics(&env), t);
}

#[test]
fn display_names_the_common_unions() {
    assert_eq!(scalar("BOOLEAN").to_string(), "boolean");
    assert_eq!(scalar("NUMBER_OR_STRING").to_string(), "number|string");
    assert_eq!(scalar("UNKNOWN").to_string(), "?");
    assert_eq!(scalar("TOP").to_string(), "*");
    assert_eq!(scalar("BOTTOM").to_string(), "bottom");
    assert_eq!(Type::type_var("T").to_string(), "T");
}

#[test]
fn type_values_serialize() {
    let json = serde_json::to_string(&scalar("NUMBER")).unwrap();
    let back: Type = serde_json::from_str(&json).unwrap();
    assert_eq!(back, scalar("NUMBER"));
}
