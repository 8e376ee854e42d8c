//! Properties of object types.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::types::Type;

/// Insertion-ordered map from property name to property.
pub type PropertyMap = IndexMap<String, Property>;

/// A single property on an object type.
///
/// Carries both the inferred type (what flow analysis saw) and the declared
/// type (what an annotation promised). For properties without an annotation
/// the two coincide.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Property {
    pub inferred: Type,
    pub declared: Type,
    /// Whether the property may be absent.
    pub optional: bool,
}

impl Property {
    pub fn make(inferred: Type, declared: Type) -> Self {
        Self {
            inferred,
            declared,
            optional: false,
        }
    }

    pub fn optional(inferred: Type, declared: Type) -> Self {
        Self {
            inferred,
            declared,
            optional: true,
        }
    }

    /// Both types bound to the same value, the common case for unannotated
    /// properties.
    pub fn with_type(t: Type) -> Self {
        Self::make(t.clone(), t)
    }

    pub fn make_optional(self) -> Self {
        Self {
            optional: true,
            ..self
        }
    }
}
