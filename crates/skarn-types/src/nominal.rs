//! Nominal types declared by the environment.
//!
//! A [`RawNominalType`] is the declaration itself: name, type parameters,
//! access kind, instance properties. A [`NominalType`] is a reference to a
//! declaration together with type arguments; the generic view (arguments are
//! the declaration's own type variables) and fully instantiated references
//! are both represented this way.

use serde::{Deserialize, Serialize};

use crate::env::TypeVarEnv;
use crate::object::{ObjectKind, ObjectType};
use crate::property::{Property, PropertyMap};
use crate::types::{Type, TypeVarMap};

/// Failure to instantiate a nominal type's parameters.
#[derive(Clone, Copy, PartialEq, Eq, Debug, thiserror::Error)]
pub enum InstantiateError {
    #[error("expected {expected} type arguments, got {got}")]
    ArityMismatch { expected: usize, got: usize },
}

/// A nominal type declaration.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct RawNominalType {
    name: String,
    type_params: Vec<String>,
    kind: ObjectKind,
    props: PropertyMap,
    is_interface: bool,
}

impl RawNominalType {
    pub fn make_class(name: impl Into<String>, type_params: Vec<String>) -> Self {
        Self {
            name: name.into(),
            type_params,
            kind: ObjectKind::Unrestricted,
            props: PropertyMap::new(),
            is_interface: false,
        }
    }

    pub fn make_interface(name: impl Into<String>, type_params: Vec<String>) -> Self {
        Self {
            is_interface: true,
            ..Self::make_class(name, type_params)
        }
    }

    /// Restrict instances to struct or dict access.
    pub fn with_kind(self, kind: ObjectKind) -> Self {
        Self { kind, ..self }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_parameters(&self) -> &[String] {
        &self.type_params
    }

    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    pub fn is_interface(&self) -> bool {
        self.is_interface
    }

    pub fn instance_props(&self) -> &PropertyMap {
        &self.props
    }

    /// Declare an instance property. Redeclaration overwrites; environment
    /// files routinely refine earlier declarations.
    pub fn add_instance_property(&mut self, name: &str, prop: Property) {
        self.props.insert(name.to_owned(), prop);
    }

    /// The generic view of this declaration: type arguments are the
    /// declaration's own type variables.
    pub fn as_nominal_type(&self) -> NominalType {
        let type_args = self
            .type_params
            .iter()
            .map(|p| Type::type_var(p.clone()))
            .collect();
        NominalType {
            raw: self.clone(),
            type_args,
        }
    }

    /// Bind every type parameter, checking arity.
    pub fn instantiate(&self, args: &[Type]) -> Result<NominalType, InstantiateError> {
        if args.len() != self.type_params.len() {
            return Err(InstantiateError::ArityMismatch {
                expected: self.type_params.len(),
                got: args.len(),
            });
        }
        Ok(NominalType {
            raw: self.clone(),
            type_args: args.to_vec(),
        })
    }

    /// The instance type of the generic view.
    pub fn instance_as_type(&self) -> Type {
        self.as_nominal_type().instance_as_type()
    }
}

/// A reference to a nominal declaration with type arguments.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct NominalType {
    raw: RawNominalType,
    type_args: Vec<Type>,
}

impl NominalType {
    pub fn name(&self) -> &str {
        self.raw.name()
    }

    pub fn raw(&self) -> &RawNominalType {
        &self.raw
    }

    pub fn type_args(&self) -> &[Type] {
        &self.type_args
    }

    /// Whether any argument is still an unsubstituted type variable.
    pub fn is_generic(&self) -> bool {
        self.type_args.iter().any(Type::is_type_var)
    }

    /// The instance type: the declaration's properties under this
    /// reference's argument bindings, tagged with the reference itself.
    pub fn instance_as_type(&self) -> Type {
        let props = if self.raw.type_params.is_empty() {
            self.raw.props.clone()
        } else {
            let env: TypeVarMap = self
                .raw
                .type_params
                .iter()
                .cloned()
                .zip(self.type_args.iter().cloned())
                .collect();
            self.raw
                .props
                .iter()
                .map(|(name, p)| {
                    let mut prop = Property::make(
                        p.inferred.substitute_generics(&env),
                        p.declared.substitute_generics(&env),
                    );
                    prop.optional = p.optional;
                    (name.clone(), prop)
                })
                .collect()
        };
        Type::from_object_type(ObjectType::with_nominal(
            self.raw.kind,
            props,
            self.clone(),
        ))
    }

    /// Nominal subtyping: same declaration, compatible arguments.
    /// Arguments are invariant; unknown is compatible either way.
    pub fn is_subtype_of(&self, other: &NominalType) -> bool {
        if self.name() != other.name() {
            return false;
        }
        if self.type_args.len() != other.type_args.len() {
            // One side uninstantiated; the names agreeing is all we can ask.
            return true;
        }
        self.type_args.iter().zip(&other.type_args).all(|(a, b)| {
            a.is_unknown() || b.is_unknown() || (a.is_subtype_of(b) && b.is_subtype_of(a))
        })
    }

    pub(crate) fn join(a: &NominalType, b: &NominalType) -> NominalType {
        debug_assert_eq!(a.name(), b.name());
        if a.type_args.len() != b.type_args.len() {
            return a.raw.as_nominal_type();
        }
        NominalType {
            raw: a.raw.clone(),
            type_args: a
                .type_args
                .iter()
                .zip(&b.type_args)
                .map(|(x, y)| Type::join(x, y))
                .collect(),
        }
    }

    pub(crate) fn substitute_generics(&self, env: &impl TypeVarEnv) -> NominalType {
        NominalType {
            raw: self.raw.clone(),
            type_args: self
                .type_args
                .iter()
                .map(|t| t.substitute_generics(env))
                .collect(),
        }
    }
}

impl std::fmt::Display for NominalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())?;
        if !self.type_args.is_empty() {
            write!(f, "<")?;
            for (i, arg) in self.type_args.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{arg}")?;
            }
            write!(f, ">")?;
        }
        Ok(())
    }
}
