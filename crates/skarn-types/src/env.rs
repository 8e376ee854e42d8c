//! Generic-substitution environments.
//!
//! Substitution only needs two probes from an environment: is a variable
//! bound, and to what. The [`TypeVarEnv`] trait provides exactly those, so
//! the ordinary substitution map and the total-unknown view are
//! interchangeable at every substitution site.

use indexmap::IndexMap;

use crate::types::{Type, TypeVarMap};

/// Read-probe capability over type-variable bindings.
pub trait TypeVarEnv {
    fn contains_var(&self, var: &str) -> bool;
    fn get(&self, var: &str) -> Option<Type>;
}

impl TypeVarEnv for TypeVarMap {
    fn contains_var(&self, var: &str) -> bool {
        self.contains_key(var)
    }

    fn get(&self, var: &str) -> Option<Type> {
        IndexMap::get(self, var).cloned()
    }
}

/// The "no bindings known yet" environment: every variable is present and
/// bound to unknown.
///
/// This is a probe-only value. It is intentionally not enumerable and not
/// mutable; the mapping surface below exists so call sites read like a map,
/// and every such call is a contract violation.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct UnknownTypeEnv;

impl TypeVarEnv for UnknownTypeEnv {
    fn contains_var(&self, _var: &str) -> bool {
        true
    }

    fn get(&self, _var: &str) -> Option<Type> {
        Some(Type::unknown())
    }
}

impl UnknownTypeEnv {
    /// Only the unknown type is ever a value of this environment.
    pub fn contains_value(&self, t: &Type) -> bool {
        t.is_unknown()
    }

    pub const fn is_empty(&self) -> bool {
        false
    }

    pub fn insert(&mut self, _var: &str, _t: Type) -> Option<Type> {
        panic!("UnknownTypeEnv is probe-only: insert is unsupported");
    }

    pub fn remove(&mut self, _var: &str) -> Option<Type> {
        panic!("UnknownTypeEnv is probe-only: remove is unsupported");
    }

    pub fn clear(&mut self) {
        panic!("UnknownTypeEnv is probe-only: clear is unsupported");
    }

    pub fn extend<I: IntoIterator<Item = (String, Type)>>(&mut self, _entries: I) {
        panic!("UnknownTypeEnv is probe-only: bulk insert is unsupported");
    }

    pub fn len(&self) -> usize {
        panic!("UnknownTypeEnv is not enumerable: len is unsupported");
    }

    pub fn iter(&self) -> std::iter::Empty<(String, Type)> {
        panic!("UnknownTypeEnv is not enumerable: iteration is unsupported");
    }
}
