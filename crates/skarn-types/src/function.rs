//! Function types: the lattice bounds and declared signatures.
//!
//! The bounds are the interesting part. The theoretical top function takes
//! infinitely many bottom-typed required parameters and returns top, so
//! calling it is always a type error; we keep it representable instead of
//! collapsing it to the universal top type, because a union such as
//! `number | top-function` may later specialize back down to a concrete
//! function type and must not warn spuriously along the way.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::env::TypeVarEnv;
use crate::types::Type;

/// A function type: one of the four lattice bounds, or a declared signature.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum FunctionType {
    /// Subtype of every function type.
    Bottom,
    /// A function of unknown signature: both a subtype and a supertype of
    /// every function type.
    Qmark,
    /// Supertype of every function signature. Calling it is always an error.
    Top,
    /// The top bound under lenient subtyping.
    LooseTop,
    Declared(Box<Signature>),
}

/// A declared function signature.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Signature {
    pub required: Vec<Type>,
    pub optional: Vec<Type>,
    pub rest: Option<Type>,
    pub returns: Type,
}

impl Signature {
    pub fn new(required: Vec<Type>, optional: Vec<Type>, rest: Option<Type>, returns: Type) -> Self {
        Self {
            required,
            optional,
            rest,
            returns,
        }
    }

    /// The parameter type at call position `i`, if the signature accepts one.
    pub fn param_at(&self, i: usize) -> Option<&Type> {
        self.required
            .get(i)
            .or_else(|| self.optional.get(i.wrapping_sub(self.required.len())))
            .or(self.rest.as_ref())
    }

    /// Number of call positions with a declared parameter type (rest excluded).
    pub fn declared_arity(&self) -> usize {
        self.required.len() + self.optional.len()
    }

    fn is_subtype_of(&self, other: &Signature) -> bool {
        // Every call that is valid for `other` must be valid for `self`:
        // `self` may not require more arguments than `other` does,
        if self.required.len() > other.required.len() {
            return false;
        }
        // parameters are contravariant at each position `other` declares,
        for i in 0..other.declared_arity() {
            match (self.param_at(i), other.param_at(i)) {
                (Some(mine), Some(theirs)) => {
                    if !theirs.is_subtype_of(mine) {
                        return false;
                    }
                }
                // `self` ignores the extra argument; fine.
                (None, _) | (_, None) => {}
            }
        }
        if let (Some(mine), Some(theirs)) = (&self.rest, &other.rest) {
            if !theirs.is_subtype_of(mine) {
                return false;
            }
        }
        // and the return type is covariant.
        self.returns.is_subtype_of(&other.returns)
    }

    fn substitute_generics(&self, env: &impl TypeVarEnv) -> Signature {
        Signature {
            required: self
                .required
                .iter()
                .map(|t| t.substitute_generics(env))
                .collect(),
            optional: self
                .optional
                .iter()
                .map(|t| t.substitute_generics(env))
                .collect(),
            rest: self.rest.as_ref().map(|t| t.substitute_generics(env)),
            returns: self.returns.substitute_generics(env),
        }
    }
}

impl FunctionType {
    pub fn declared(sig: Signature) -> Self {
        Self::Declared(Box::new(sig))
    }

    pub fn is_top(&self) -> bool {
        matches!(self, Self::Top | Self::LooseTop)
    }

    pub fn is_loose(&self) -> bool {
        matches!(self, Self::LooseTop)
    }

    pub fn is_qmark(&self) -> bool {
        matches!(self, Self::Qmark)
    }

    pub fn is_bottom(&self) -> bool {
        matches!(self, Self::Bottom)
    }

    /// The same bound under lenient subtyping. Only the top bound has a
    /// loose counterpart; everything else is unchanged.
    pub fn with_loose(self) -> Self {
        match self {
            Self::Top => Self::LooseTop,
            other => other,
        }
    }

    pub fn is_subtype_of(&self, other: &FunctionType) -> bool {
        use FunctionType::*;
        match (self, other) {
            (Bottom, _) => true,
            (Qmark, _) | (_, Qmark) => true,
            (_, Top | LooseTop) => true,
            (Top | LooseTop, _) => false,
            (Declared(_), Bottom) => false,
            (Declared(a), Declared(b)) => a.is_subtype_of(b),
        }
    }

    pub(crate) fn substitute_generics(&self, env: &impl TypeVarEnv) -> FunctionType {
        match self {
            Self::Declared(sig) => Self::declared(sig.substitute_generics(env)),
            bound => bound.clone(),
        }
    }
}

/// Build the function-type lattice bounds.
///
/// `bottom` and `top` are the scalar extremes the bounds are defined
/// against; the caller supplies them so construction order stays explicit.
pub(crate) fn create_initial_function_types(
    bottom: &Type,
    top: &Type,
) -> HashMap<&'static str, FunctionType> {
    debug_assert!(bottom.is_bottom() && top.is_top());
    HashMap::from([
        ("QMARK_FUNCTION", FunctionType::Qmark),
        ("BOTTOM_FUNCTION", FunctionType::Bottom),
        ("TOP_FUNCTION", FunctionType::Top),
        ("LOOSE_TOP_FUNCTION", FunctionType::LooseTop),
    ])
}
