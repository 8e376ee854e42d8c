//! The builtin type registry.
//!
//! One instance per compilation. Holds the state that stays fixed
//! throughout a single check run but varies across compilations:
//!
//! - the foundational lattice constants, built here at construction;
//! - the builtin nominal types (`Object`, `Function`, `Array`,
//!   `Arguments`, the indexable-object interface) and the boxed scalar
//!   instances, which are bound from environment declarations as they are
//!   scanned and stay unbound if never declared;
//! - the compatibility flags for the lenient legacy checking mode.
//!
//! The lifecycle is two-phase: the environment scan calls the setters
//! sequentially (phase 1), then the registry is queried read-only by the
//! checking passes (phase 2). Every getter degrades gracefully when a
//! builtin was never declared; an incomplete environment is never an error
//! here.

use std::collections::HashMap;

use crate::env::UnknownTypeEnv;
use crate::function::{self, FunctionType};
use crate::nominal::{NominalType, RawNominalType};
use crate::object::{self, ObjectType};
use crate::property::PropertyMap;
use crate::types::{self, Type, TypeVarMap};

/// Pull one required constant out of a bootstrap table.
///
/// A missing name means the lattice cannot be constructed; that is a broken
/// build, not a degradable condition.
fn take<T>(table: &mut HashMap<&'static str, T>, stage: &str, name: &'static str) -> T {
    table
        .remove(name)
        .unwrap_or_else(|| panic!("{stage} bootstrap is missing {name}"))
}

/// The canonical type registry.
///
/// Public fields are the immutable foundational constants; everything bound
/// after construction sits behind accessors with documented fallbacks.
#[derive(Clone, Debug)]
pub struct TypeRegistry {
    // Scalar constants.
    pub boolean: Type,
    pub bottom: Type,
    pub false_type: Type,
    pub falsy: Type,
    pub null: Type,
    pub number: Type,
    pub string: Type,
    pub top: Type,
    pub top_scalar: Type,
    pub true_type: Type,
    pub truthy: Type,
    pub undefined: Type,
    pub unknown: Type,

    // Precomputed pairwise unions, created once and reused.
    pub number_or_string: Type,
    pub undefined_or_boolean: Type,
    pub undefined_or_number: Type,
    pub undefined_or_string: Type,
    pub null_or_boolean: Type,
    pub null_or_number: Type,
    pub null_or_string: Type,
    pub null_or_undefined: Type,

    // Object bounds. The top object type doubles as the type of an empty
    // object literal.
    top_object_type: ObjectType,
    bottom_property_map: PropertyMap,
    bottom_object: ObjectType,
    pub top_object: Type,
    pub top_struct: Type,
    pub top_dict: Type,

    // Function bounds.
    qmark_function: FunctionType,
    bottom_function: FunctionType,
    top_function: FunctionType,
    loose_top_function: FunctionType,

    // Boxed scalar instances, bound while scanning the environment.
    number_instance: Option<Type>,
    boolean_instance: Option<Type>,
    string_instance: Option<Type>,
    number_instance_obj: Option<ObjectType>,
    boolean_instance_obj: Option<ObjectType>,
    string_instance_obj: Option<ObjectType>,

    // Unions of a scalar and its boxed instance, derived when bound.
    number_or_number: Option<Type>,
    string_or_string: Option<Type>,
    any_num_or_str: Option<Type>,

    regexp_instance: Option<Type>,

    // Builtin nominal types, bound while scanning the environment.
    array_type: Option<RawNominalType>,
    builtin_object: Option<RawNominalType>,
    builtin_function: Option<RawNominalType>,
    arguments_type: Option<RawNominalType>,
    iobject_type: Option<RawNominalType>,

    map_to_unknown: UnknownTypeEnv,

    // All three follow the constructor flag today; they are named
    // separately so they can diverge without an interface change.
    pub allow_methods_as_functions: bool,
    pub loose_subtyping_for_loose_objects: bool,
    pub bivariant_array_generics: bool,
}

impl TypeRegistry {
    /// Bootstrap a registry. This is the only way to obtain one.
    pub fn init(in_compatibility_mode: bool) -> Self {
        let mut scalars = types::create_scalars();
        let boolean = take(&mut scalars, "scalar", "BOOLEAN");
        let bottom = take(&mut scalars, "scalar", "BOTTOM");
        let false_type = take(&mut scalars, "scalar", "FALSE_TYPE");
        let falsy = take(&mut scalars, "scalar", "FALSY");
        let null = take(&mut scalars, "scalar", "NULL");
        let number = take(&mut scalars, "scalar", "NUMBER");
        let string = take(&mut scalars, "scalar", "STRING");
        let top = take(&mut scalars, "scalar", "TOP");
        let top_scalar = take(&mut scalars, "scalar", "TOP_SCALAR");
        let true_type = take(&mut scalars, "scalar", "TRUE_TYPE");
        let truthy = take(&mut scalars, "scalar", "TRUTHY");
        let undefined = take(&mut scalars, "scalar", "UNDEFINED");
        let unknown = take(&mut scalars, "scalar", "UNKNOWN");

        let undefined_or_boolean = take(&mut scalars, "scalar", "UNDEFINED_OR_BOOLEAN");
        let undefined_or_number = take(&mut scalars, "scalar", "UNDEFINED_OR_NUMBER");
        let undefined_or_string = take(&mut scalars, "scalar", "UNDEFINED_OR_STRING");
        let null_or_boolean = take(&mut scalars, "scalar", "NULL_OR_BOOLEAN");
        let null_or_number = take(&mut scalars, "scalar", "NULL_OR_NUMBER");
        let null_or_string = take(&mut scalars, "scalar", "NULL_OR_STRING");
        let null_or_undefined = take(&mut scalars, "scalar", "NULL_OR_UNDEFINED");
        let number_or_string = take(&mut scalars, "scalar", "NUMBER_OR_STRING");

        let mut functions = function::create_initial_function_types(&bottom, &top);
        let qmark_function = take(&mut functions, "function", "QMARK_FUNCTION");
        let bottom_function = take(&mut functions, "function", "BOTTOM_FUNCTION");
        let top_function = take(&mut functions, "function", "TOP_FUNCTION");
        let loose_top_function = take(&mut functions, "function", "LOOSE_TOP_FUNCTION");

        let bottom_property_map = object::bottom_property_map(&bottom);
        let mut objects = object::create_initial_object_types(&bottom_property_map);
        let top_object_type = take(&mut objects, "object", "TOP_OBJECTTYPE");
        let top_object = Type::from_object_type(top_object_type.clone());
        let top_struct = Type::from_object_type(take(&mut objects, "object", "TOP_STRUCT"));
        let top_dict = Type::from_object_type(take(&mut objects, "object", "TOP_DICT"));
        let bottom_object = take(&mut objects, "object", "BOTTOM_OBJECT");

        Self {
            boolean,
            bottom,
            false_type,
            falsy,
            null,
            number,
            string,
            top,
            top_scalar,
            true_type,
            truthy,
            undefined,
            unknown,
            number_or_string,
            undefined_or_boolean,
            undefined_or_number,
            undefined_or_string,
            null_or_boolean,
            null_or_number,
            null_or_string,
            null_or_undefined,
            top_object_type,
            bottom_property_map,
            bottom_object,
            top_object,
            top_struct,
            top_dict,
            qmark_function,
            bottom_function,
            top_function,
            loose_top_function,
            number_instance: None,
            boolean_instance: None,
            string_instance: None,
            number_instance_obj: None,
            boolean_instance_obj: None,
            string_instance_obj: None,
            number_or_number: None,
            string_or_string: None,
            any_num_or_str: None,
            regexp_instance: None,
            array_type: None,
            builtin_object: None,
            builtin_function: None,
            arguments_type: None,
            iobject_type: None,
            map_to_unknown: UnknownTypeEnv,
            allow_methods_as_functions: in_compatibility_mode,
            loose_subtyping_for_loose_objects: in_compatibility_mode,
            bivariant_array_generics: in_compatibility_mode,
        }
    }

    // ------------------------------------------------------------------
    // Function bounds
    // ------------------------------------------------------------------

    /// Wrap a function type as a general type value, tagged with the
    /// builtin `Function` nominal type if one was declared.
    pub fn from_function_type(&self, func: FunctionType) -> Type {
        Type::from_function_type(func, self.get_function_type())
    }

    pub fn top_function(&self) -> Type {
        self.from_function_type(self.top_function.clone())
    }

    pub fn loose_top_function(&self) -> Type {
        self.from_function_type(self.loose_top_function.clone())
    }

    /// A function of unknown signature: subtype and supertype of every
    /// function type.
    pub fn qmark_function(&self) -> Type {
        self.from_function_type(self.qmark_function.clone())
    }

    pub fn bottom_function(&self) -> &FunctionType {
        &self.bottom_function
    }

    // ------------------------------------------------------------------
    // Object bounds
    // ------------------------------------------------------------------

    /// The supertype of all object types; also the type of an empty object
    /// literal.
    pub fn top_object_type(&self) -> &ObjectType {
        &self.top_object_type
    }

    pub fn bottom_object(&self) -> &ObjectType {
        &self.bottom_object
    }

    /// The property mapping seeding the bottom object: one sentinel entry,
    /// bottom-typed.
    pub fn bottom_property_map(&self) -> &PropertyMap {
        &self.bottom_property_map
    }

    // ------------------------------------------------------------------
    // Builtin nominal types
    // ------------------------------------------------------------------

    pub fn get_function_type(&self) -> Option<NominalType> {
        self.builtin_function
            .as_ref()
            .map(RawNominalType::as_nominal_type)
    }

    pub fn get_object_type(&self) -> Option<NominalType> {
        self.builtin_object
            .as_ref()
            .map(RawNominalType::as_nominal_type)
    }

    pub fn get_object_instance(&self) -> Option<Type> {
        self.builtin_object
            .as_ref()
            .map(RawNominalType::instance_as_type)
    }

    pub fn get_iobject_type(&self) -> Option<NominalType> {
        self.iobject_type
            .as_ref()
            .map(RawNominalType::as_nominal_type)
    }

    /// `Array` instance with an unknown element type.
    pub fn get_array_instance(&self) -> Type {
        self.get_array_instance_of(&self.unknown)
    }

    /// `Array` instance with the element type bound, when `Array` declares
    /// exactly one type parameter. Unbound slot degrades to unknown;
    /// malformed 0- or 2+-parameter declarations stay uninstantiated.
    pub fn get_array_instance_of(&self, elem: &Type) -> Type {
        match &self.array_type {
            None => self.unknown.clone(),
            Some(array) => instance_with_sole_param(array, elem),
        }
    }

    /// `Arguments` instance with an unknown element type.
    pub fn get_arguments_array_type(&self) -> Type {
        self.get_arguments_array_type_of(&self.unknown)
    }

    /// Same substitution policy as [`get_array_instance_of`], independent
    /// slot.
    ///
    /// [`get_array_instance_of`]: TypeRegistry::get_array_instance_of
    pub fn get_arguments_array_type_of(&self, elem: &Type) -> Type {
        match &self.arguments_type {
            None => self.unknown.clone(),
            Some(arguments) => instance_with_sole_param(arguments, elem),
        }
    }

    pub fn set_array_type(&mut self, array: RawNominalType) {
        self.array_type = Some(array);
    }

    pub fn set_function_type(&mut self, function: RawNominalType) {
        self.builtin_function = Some(function);
    }

    pub fn set_object_type(&mut self, object: RawNominalType) {
        self.builtin_object = Some(object);
    }

    pub fn set_arguments_type(&mut self, arguments: RawNominalType) {
        self.arguments_type = Some(arguments);
    }

    pub fn set_iobject_type(&mut self, iobject: RawNominalType) {
        self.iobject_type = Some(iobject);
    }

    // ------------------------------------------------------------------
    // Boxed scalar instances
    // ------------------------------------------------------------------

    pub fn get_regexp_type(&self) -> Type {
        self.regexp_instance
            .clone()
            .unwrap_or_else(|| self.unknown.clone())
    }

    pub fn get_number_instance(&self) -> Type {
        self.number_instance
            .clone()
            .unwrap_or_else(|| self.number.clone())
    }

    pub fn get_boolean_instance(&self) -> Type {
        self.boolean_instance
            .clone()
            .unwrap_or_else(|| self.boolean.clone())
    }

    pub fn get_string_instance(&self) -> Type {
        self.string_instance
            .clone()
            .unwrap_or_else(|| self.string.clone())
    }

    pub fn get_number_instance_obj_type(&self) -> &ObjectType {
        self.number_instance_obj
            .as_ref()
            .unwrap_or(&self.top_object_type)
    }

    pub fn get_boolean_instance_obj_type(&self) -> &ObjectType {
        self.boolean_instance_obj
            .as_ref()
            .unwrap_or(&self.top_object_type)
    }

    pub fn get_string_instance_obj_type(&self) -> &ObjectType {
        self.string_instance_obj
            .as_ref()
            .unwrap_or(&self.top_object_type)
    }

    pub fn set_regexp_instance(&mut self, regexp: Type) {
        self.regexp_instance = Some(regexp);
    }

    pub fn set_number_instance(&mut self, t: Type) {
        assert!(
            self.number_instance.is_none(),
            "number instance is already bound"
        );
        self.number_instance_obj = Some(single_instance_obj("number", &t));
        self.number_or_number = Some(Type::join(&self.number, &t));
        self.number_instance = Some(t);
        if self.string_instance.is_some() {
            self.any_num_or_str = Some(self.join_boxed_unions());
        }
    }

    pub fn set_boolean_instance(&mut self, t: Type) {
        assert!(
            self.boolean_instance.is_none(),
            "boolean instance is already bound"
        );
        self.boolean_instance_obj = Some(single_instance_obj("boolean", &t));
        self.boolean_instance = Some(t);
    }

    pub fn set_string_instance(&mut self, t: Type) {
        assert!(
            self.string_instance.is_none(),
            "string instance is already bound"
        );
        self.string_instance_obj = Some(single_instance_obj("string", &t));
        self.string_or_string = Some(Type::join(&self.string, &t));
        self.string_instance = Some(t);
        if self.number_instance.is_some() {
            self.any_num_or_str = Some(self.join_boxed_unions());
        }
    }

    fn join_boxed_unions(&self) -> Type {
        Type::join(
            self.number_or_number.as_ref().unwrap_or(&self.number),
            self.string_or_string.as_ref().unwrap_or(&self.string),
        )
    }

    // ------------------------------------------------------------------
    // Boxing-aware subtype predicates
    // ------------------------------------------------------------------

    /// Whether `t` is a number, boxed or not. Tests against the richest
    /// union available: the scalar alone until the boxed instance is bound.
    pub fn is_number_scalar_or_obj(&self, t: &Type) -> bool {
        match &self.number_or_number {
            Some(union) => t.is_subtype_of(union),
            None => t.is_subtype_of(&self.number),
        }
    }

    /// Whether `t` is a string, boxed or not.
    pub fn is_string_scalar_or_obj(&self, t: &Type) -> bool {
        match &self.string_or_string {
            Some(union) => t.is_subtype_of(union),
            None => t.is_subtype_of(&self.string),
        }
    }

    /// Whether `t` is a number or a string, boxed or not. When only one of
    /// the two instances is bound the other half falls back to its scalar.
    pub fn is_num_str_scalar_or_obj(&self, t: &Type) -> bool {
        match &self.any_num_or_str {
            Some(union) => t.is_subtype_of(union),
            None => {
                if self.number_or_number.is_some() || self.string_or_string.is_some() {
                    t.is_subtype_of(&self.join_boxed_unions())
                } else {
                    t.is_subtype_of(&self.number_or_string)
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Generic substitution environment
    // ------------------------------------------------------------------

    /// The "no bindings known yet" substitution environment: every variable
    /// probes as present and reads as unknown.
    pub fn map_to_unknown(&self) -> &UnknownTypeEnv {
        &self.map_to_unknown
    }
}

/// Bind a nominal type's sole declared type parameter to `arg`.
///
/// Declarations with zero or several parameters occur in legacy environment
/// files; those instances are returned unsubstituted rather than rejected.
fn instance_with_sole_param(raw: &RawNominalType, arg: &Type) -> Type {
    let instance = raw.instance_as_type();
    match raw.type_parameters() {
        [param] => {
            let mut env = TypeVarMap::new();
            env.insert(param.clone(), arg.clone());
            instance.substitute_generics(&env)
        }
        _ => instance,
    }
}

/// The single object type of a boxed scalar instance.
///
/// An instance made of anything but exactly one object type means the
/// environment declaration was mis-bound upstream.
fn single_instance_obj(which: &str, t: &Type) -> ObjectType {
    t.single_obj()
        .unwrap_or_else(|| panic!("boxed {which} instance must be exactly one object type"))
        .clone()
}
