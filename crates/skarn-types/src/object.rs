//! Object types: kinds, bounds, and the bottom property seed.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::env::TypeVarEnv;
use crate::function::FunctionType;
use crate::nominal::NominalType;
use crate::property::{Property, PropertyMap};
use crate::types::Type;

/// Sentinel property name seeding the bottom object, so a property lookup on
/// bottom reports a bottom-typed property instead of "no such property".
pub const BOTTOM_PROPERTY: &str = "_";

/// Access discipline of an object type.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum ObjectKind {
    /// No restriction; also the kind of an empty object literal.
    Unrestricted,
    /// Dot access only, on declared properties.
    Struct,
    /// Bracket access only.
    Dict,
}

impl ObjectKind {
    pub fn is_subkind_of(self, other: ObjectKind) -> bool {
        self == other || matches!(other, ObjectKind::Unrestricted)
    }

    pub fn join(a: ObjectKind, b: ObjectKind) -> ObjectKind {
        if a == b { a } else { ObjectKind::Unrestricted }
    }
}

/// A structural object type, possibly tagged with a nominal type and
/// possibly carrying a callable part.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ObjectType {
    pub kind: ObjectKind,
    pub props: PropertyMap,
    pub nominal: Option<NominalType>,
    pub func: Option<Box<FunctionType>>,
    pub is_loose: bool,
}

impl ObjectType {
    pub fn new(kind: ObjectKind) -> Self {
        Self {
            kind,
            props: PropertyMap::new(),
            nominal: None,
            func: None,
            is_loose: false,
        }
    }

    pub fn with_props(kind: ObjectKind, props: PropertyMap) -> Self {
        Self {
            props,
            ..Self::new(kind)
        }
    }

    pub fn with_nominal(kind: ObjectKind, props: PropertyMap, nominal: NominalType) -> Self {
        Self {
            props,
            nominal: Some(nominal),
            ..Self::new(kind)
        }
    }

    pub fn from_function(func: FunctionType, nominal: Option<NominalType>) -> Self {
        Self {
            nominal,
            func: Some(Box::new(func)),
            ..Self::new(ObjectKind::Unrestricted)
        }
    }

    pub fn get_prop(&self, name: &str) -> Option<&Property> {
        self.props.get(name)
    }

    pub fn function_type(&self) -> Option<&FunctionType> {
        self.func.as_deref()
    }

    pub fn is_subtype_of(&self, other: &ObjectType) -> bool {
        if !self.kind.is_subkind_of(other.kind) {
            return false;
        }
        if let Some(other_nominal) = &other.nominal {
            match &self.nominal {
                Some(nominal) => {
                    if !nominal.is_subtype_of(other_nominal) {
                        return false;
                    }
                }
                None => return false,
            }
        }
        // Width subtyping: every property `other` promises must be satisfied.
        for (name, other_prop) in &other.props {
            match self.props.get(name) {
                Some(prop) => {
                    if !prop.inferred.is_subtype_of(&other_prop.inferred) {
                        return false;
                    }
                }
                None => {
                    if !other_prop.optional {
                        return false;
                    }
                }
            }
        }
        match (&self.func, &other.func) {
            (_, None) => true,
            (Some(mine), Some(theirs)) => mine.is_subtype_of(theirs),
            (None, Some(_)) => false,
        }
    }

    /// Whether joining with `other` should merge into one object type
    /// rather than keep both alternatives.
    pub(crate) fn joins_with(&self, other: &ObjectType) -> bool {
        if self == other {
            return true;
        }
        match (&self.nominal, &other.nominal) {
            (Some(a), Some(b)) => a.name() == b.name(),
            _ => false,
        }
    }

    /// Least upper bound of two object types that [`joins_with`] each other.
    ///
    /// [`joins_with`]: ObjectType::joins_with
    pub(crate) fn join(a: &ObjectType, b: &ObjectType) -> ObjectType {
        if a == b {
            return a.clone();
        }
        let nominal = match (&a.nominal, &b.nominal) {
            (Some(x), Some(y)) => Some(NominalType::join(x, y)),
            _ => None,
        };
        // Only properties present on both sides survive a join.
        let mut props = PropertyMap::new();
        for (name, pa) in &a.props {
            if let Some(pb) = b.props.get(name) {
                let mut prop = Property::make(
                    Type::join(&pa.inferred, &pb.inferred),
                    Type::join(&pa.declared, &pb.declared),
                );
                prop.optional = pa.optional || pb.optional;
                props.insert(name.clone(), prop);
            }
        }
        let func = match (&a.func, &b.func) {
            (Some(x), Some(y)) if x == y => Some(x.clone()),
            _ => None,
        };
        ObjectType {
            kind: ObjectKind::join(a.kind, b.kind),
            props,
            nominal,
            func,
            is_loose: a.is_loose || b.is_loose,
        }
    }

    pub(crate) fn substitute_generics(&self, env: &impl TypeVarEnv) -> ObjectType {
        ObjectType {
            kind: self.kind,
            props: self
                .props
                .iter()
                .map(|(name, p)| {
                    let mut prop = Property::make(
                        p.inferred.substitute_generics(env),
                        p.declared.substitute_generics(env),
                    );
                    prop.optional = p.optional;
                    (name.clone(), prop)
                })
                .collect(),
            nominal: self.nominal.as_ref().map(|n| n.substitute_generics(env)),
            func: self
                .func
                .as_ref()
                .map(|f| Box::new(f.substitute_generics(env))),
            is_loose: self.is_loose,
        }
    }

    pub(crate) fn with_loose(&self) -> ObjectType {
        ObjectType {
            is_loose: true,
            func: self
                .func
                .as_ref()
                .map(|f| Box::new(f.as_ref().clone().with_loose())),
            ..self.clone()
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(nominal) = &self.nominal {
            return write!(f, "{nominal}");
        }
        if self.func.is_some() {
            return write!(f, "function");
        }
        write!(f, "{{")?;
        for (i, name) in self.props.keys().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}")?;
        }
        write!(f, "}}")
    }
}

/// The bottom property mapping: exactly one sentinel entry whose declared
/// and inferred types are both bottom.
pub(crate) fn bottom_property_map(bottom: &Type) -> PropertyMap {
    PropertyMap::from([(
        BOTTOM_PROPERTY.to_owned(),
        Property::make(bottom.clone(), bottom.clone()),
    )])
}

/// Build the object-type lattice bounds.
///
/// The top object type has two roles: the supertype of all object types and
/// the type of an empty object literal. Callers must tolerate the overlap
/// rather than assume the two are disjoint.
pub(crate) fn create_initial_object_types(
    bottom_props: &PropertyMap,
) -> HashMap<&'static str, ObjectType> {
    HashMap::from([
        ("TOP_OBJECTTYPE", ObjectType::new(ObjectKind::Unrestricted)),
        ("TOP_STRUCT", ObjectType::new(ObjectKind::Struct)),
        ("TOP_DICT", ObjectType::new(ObjectKind::Dict)),
        (
            "BOTTOM_OBJECT",
            ObjectType::with_props(ObjectKind::Unrestricted, bottom_props.clone()),
        ),
    ])
}
