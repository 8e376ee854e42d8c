//! The type value: a scalar mask, a set of object types, and an optional
//! type variable.
//!
//! Values are immutable and cheap to clone; the checker passes them around
//! freely and shares a registry of pre-built constants across passes.

use std::collections::HashMap;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::env::TypeVarEnv;
use crate::function::FunctionType;
use crate::mask::TypeMask;
use crate::nominal::NominalType;
use crate::object::ObjectType;

/// A substitution map from type-variable names to types.
pub type TypeVarMap = IndexMap<String, Type>;

/// A type lattice element.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Type {
    mask: TypeMask,
    /// The non-scalar part. Non-empty only when the mask carries
    /// `NON_SCALAR`; empty *with* `NON_SCALAR` means "any object", which
    /// only the top type uses.
    objs: Vec<ObjectType>,
    typevar: Option<String>,
}

impl Type {
    pub(crate) const fn from_mask(mask: TypeMask) -> Self {
        Self {
            mask,
            objs: Vec::new(),
            typevar: None,
        }
    }

    pub const fn bottom() -> Self {
        Self::from_mask(TypeMask::BOTTOM)
    }

    pub const fn top() -> Self {
        Self::from_mask(TypeMask::TOP)
    }

    pub const fn unknown() -> Self {
        Self::from_mask(TypeMask::UNKNOWN)
    }

    pub fn type_var(name: impl Into<String>) -> Self {
        Self {
            mask: TypeMask::TYPEVAR,
            objs: Vec::new(),
            typevar: Some(name.into()),
        }
    }

    pub fn from_object_type(obj: ObjectType) -> Self {
        Self {
            mask: TypeMask::NON_SCALAR,
            objs: vec![obj],
            typevar: None,
        }
    }

    /// Wrap a function type as a general type value, tagged with the
    /// `Function` nominal type when the environment declared one.
    pub fn from_function_type(func: FunctionType, function_nominal: Option<NominalType>) -> Self {
        Self::from_object_type(ObjectType::from_function(func, function_nominal))
    }

    pub fn objs(&self) -> &[ObjectType] {
        &self.objs
    }

    /// The single object type making up this value, if there is exactly one.
    pub fn single_obj(&self) -> Option<&ObjectType> {
        match self.objs.as_slice() {
            [obj] => Some(obj),
            _ => None,
        }
    }

    /// The nominal tag of the single object part, if any.
    pub fn nominal_type(&self) -> Option<&NominalType> {
        self.single_obj().and_then(|o| o.nominal.as_ref())
    }

    pub fn is_unknown(&self) -> bool {
        self.mask.contains(TypeMask::UNKNOWN)
    }

    pub fn is_top(&self) -> bool {
        self.mask == TypeMask::TOP && self.objs.is_empty() && self.typevar.is_none()
    }

    pub fn is_bottom(&self) -> bool {
        self.mask.is_bottom() && self.objs.is_empty() && self.typevar.is_none()
    }

    pub fn is_type_var(&self) -> bool {
        self.mask == TypeMask::TYPEVAR
    }

    /// Whether a non-scalar (object) part is present.
    pub fn has_non_scalar(&self) -> bool {
        self.mask.contains(TypeMask::NON_SCALAR)
    }

    /// Lenient-mode marker, propagated to the object parts.
    pub fn with_loose(&self) -> Type {
        Type {
            mask: self.mask,
            objs: self.objs.iter().map(ObjectType::with_loose).collect(),
            typevar: self.typevar.clone(),
        }
    }

    /// Least upper bound.
    pub fn join(x: &Type, y: &Type) -> Type {
        if x.is_unknown() || y.is_unknown() {
            return Type::unknown();
        }
        if x.is_top() || y.is_top() {
            return Type::top();
        }
        let typevar = match (&x.typevar, &y.typevar) {
            // Two distinct variables have no representable union; the
            // conservative answer is unknown.
            (Some(a), Some(b)) if a != b => return Type::unknown(),
            (Some(a), _) => Some(a.clone()),
            (None, v) => v.clone(),
        };
        let mut objs = x.objs.clone();
        for obj in &y.objs {
            match objs.iter_mut().find(|o| o.joins_with(obj)) {
                Some(existing) => *existing = ObjectType::join(existing, obj),
                None => objs.push(obj.clone()),
            }
        }
        Type {
            mask: x.mask | y.mask,
            objs,
            typevar,
        }
    }

    /// Structural/nominal subtyping. Unknown is compatible both ways; top
    /// is above everything.
    pub fn is_subtype_of(&self, other: &Type) -> bool {
        if self.is_unknown() || other.is_unknown() {
            return true;
        }
        if other.is_top() {
            return true;
        }
        if self.is_top() {
            return false;
        }
        if !self.mask.is_subset_of(other.mask) {
            return false;
        }
        if self.typevar.is_some() && self.typevar != other.typevar {
            return false;
        }
        if self.mask.contains(TypeMask::NON_SCALAR) && !other.objs.is_empty() {
            // `other` with a NON_SCALAR mask and no object types accepts any
            // object; otherwise every object part needs a supertype.
            for obj in &self.objs {
                if !other.objs.iter().any(|sup| obj.is_subtype_of(sup)) {
                    return false;
                }
            }
        }
        true
    }

    /// Replace bound type variables throughout the value.
    pub fn substitute_generics(&self, env: &impl TypeVarEnv) -> Type {
        if self.typevar.is_none() && self.objs.is_empty() {
            return self.clone();
        }
        let mut out = Type::from_mask(self.mask.without(TypeMask::TYPEVAR | TypeMask::NON_SCALAR));
        if let Some(var) = &self.typevar {
            match env.get(var) {
                Some(bound) => out = Type::join(&out, &bound),
                None => {
                    out.mask = out.mask | TypeMask::TYPEVAR;
                    out.typevar = Some(var.clone());
                }
            }
        }
        for obj in &self.objs {
            let substituted = Type::from_object_type(obj.substitute_generics(env));
            out = Type::join(&out, &substituted);
        }
        out
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unknown() {
            return write!(f, "?");
        }
        if self.is_top() {
            return write!(f, "*");
        }
        if self.is_bottom() {
            return write!(f, "bottom");
        }
        let mut parts: Vec<String> = Vec::new();
        let scalars = self.mask.without(TypeMask::TYPEVAR | TypeMask::NON_SCALAR);
        let mut rest = scalars;
        let mut slice = |mask: TypeMask, name: &str, rest: &mut TypeMask| {
            if rest.contains(mask) {
                parts.push(name.to_owned());
                *rest = rest.without(mask);
            }
        };
        slice(TypeMask::BOOLEAN, "boolean", &mut rest);
        slice(TypeMask::TRUE, "true", &mut rest);
        slice(TypeMask::FALSE, "false", &mut rest);
        slice(TypeMask::NULL, "null", &mut rest);
        slice(TypeMask::NUMBER, "number", &mut rest);
        slice(TypeMask::STRING, "string", &mut rest);
        slice(TypeMask::UNDEFINED, "undefined", &mut rest);
        slice(TypeMask::TRUTHY, "truthy", &mut rest);
        slice(TypeMask::FALSY, "falsy", &mut rest);
        if let Some(var) = &self.typevar {
            parts.push(var.clone());
        }
        for obj in &self.objs {
            parts.push(obj.to_string());
        }
        write!(f, "{}", parts.join("|"))
    }
}

/// Build the scalar lattice constants and the precomputed pairwise unions.
pub(crate) fn create_scalars() -> HashMap<&'static str, Type> {
    let truthy = TypeMask::TRUE | TypeMask::TRUTHY;
    let falsy = TypeMask::FALSE | TypeMask::NULL | TypeMask::UNDEFINED | TypeMask::FALSY;
    HashMap::from([
        ("BOTTOM", Type::from_mask(TypeMask::BOTTOM)),
        ("TRUE_TYPE", Type::from_mask(TypeMask::TRUE)),
        ("FALSE_TYPE", Type::from_mask(TypeMask::FALSE)),
        ("BOOLEAN", Type::from_mask(TypeMask::BOOLEAN)),
        ("NULL", Type::from_mask(TypeMask::NULL)),
        ("NUMBER", Type::from_mask(TypeMask::NUMBER)),
        ("STRING", Type::from_mask(TypeMask::STRING)),
        ("UNDEFINED", Type::from_mask(TypeMask::UNDEFINED)),
        ("TRUTHY", Type::from_mask(truthy)),
        ("FALSY", Type::from_mask(falsy)),
        ("TOP_SCALAR", Type::from_mask(TypeMask::TOP_SCALAR)),
        ("TOP", Type::top()),
        ("UNKNOWN", Type::unknown()),
        (
            "UNDEFINED_OR_BOOLEAN",
            Type::from_mask(TypeMask::UNDEFINED | TypeMask::BOOLEAN),
        ),
        (
            "UNDEFINED_OR_NUMBER",
            Type::from_mask(TypeMask::UNDEFINED | TypeMask::NUMBER),
        ),
        (
            "UNDEFINED_OR_STRING",
            Type::from_mask(TypeMask::UNDEFINED | TypeMask::STRING),
        ),
        (
            "NULL_OR_BOOLEAN",
            Type::from_mask(TypeMask::NULL | TypeMask::BOOLEAN),
        ),
        (
            "NULL_OR_NUMBER",
            Type::from_mask(TypeMask::NULL | TypeMask::NUMBER),
        ),
        (
            "NULL_OR_STRING",
            Type::from_mask(TypeMask::NULL | TypeMask::STRING),
        ),
        (
            "NULL_OR_UNDEFINED",
            Type::from_mask(TypeMask::NULL | TypeMask::UNDEFINED),
        ),
        (
            "NUMBER_OR_STRING",
            Type::from_mask(TypeMask::NUMBER | TypeMask::STRING),
        ),
    ])
}
