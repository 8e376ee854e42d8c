#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Type lattice and builtin type registry for the Skarn checker.
//!
//! This crate provides the type values the checker computes with and the
//! [`TypeRegistry`]: one object per compilation holding the foundational
//! lattice constants, the builtin nominal types discovered while scanning
//! environment declarations, and the compatibility flags for the lenient
//! legacy mode.
//!
//! # Example
//!
//! ```
//! use skarn_types::{RawNominalType, TypeRegistry};
//!
//! let mut registry = TypeRegistry::init(false);
//!
//! // Builtins an environment never declared degrade gracefully.
//! assert!(registry.get_regexp_type().is_unknown());
//! assert!(registry.get_array_instance().is_unknown());
//!
//! // Once the environment scan binds `Array`, instances parameterize.
//! registry.set_array_type(RawNominalType::make_class("Array", vec!["T".into()]));
//! let strings = registry.get_array_instance_of(&registry.string);
//! assert_eq!(strings.to_string(), "Array<string>");
//! ```

pub mod env;
pub mod function;
pub mod mask;
pub mod nominal;
pub mod object;
pub mod property;
pub mod registry;
pub mod types;

#[cfg(test)]
mod function_tests;
#[cfg(test)]
mod mask_tests;
#[cfg(test)]
mod types_tests;

pub use env::{TypeVarEnv, UnknownTypeEnv};
pub use function::{FunctionType, Signature};
pub use mask::TypeMask;
pub use nominal::{InstantiateError, NominalType, RawNominalType};
pub use object::{BOTTOM_PROPERTY, ObjectKind, ObjectType};
pub use property::{Property, PropertyMap};
pub use registry::TypeRegistry;
pub use types::{Type, TypeVarMap};
