//! Bit-level representation of the scalar lattice.
//!
//! Every scalar slice of the lattice gets one bit; named scalar unions are
//! bit unions. Subtyping between purely scalar types is subset testing on
//! the bits, so the common case never allocates or recurses.

use serde::{Deserialize, Serialize};

/// Bitset over the slices of the scalar lattice.
///
/// The unknown bit is deliberately not part of [`TypeMask::TOP`]: unknown is
/// compatible with everything in both directions and is special-cased by the
/// subtype check rather than ordered by the bits.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct TypeMask(u16);

impl TypeMask {
    /// The empty mask: no values at all.
    pub const BOTTOM: Self = Self(0);
    /// The literal `true`.
    pub const TRUE: Self = Self(1 << 0);
    /// The literal `false`.
    pub const FALSE: Self = Self(1 << 1);
    pub const NULL: Self = Self(1 << 2);
    pub const NUMBER: Self = Self(1 << 3);
    pub const STRING: Self = Self(1 << 4);
    pub const UNDEFINED: Self = Self(1 << 5);
    /// Truthy values with no dedicated bit: nonzero numbers, nonempty
    /// strings, objects.
    pub const TRUTHY: Self = Self(1 << 6);
    /// Falsy values with no dedicated bit: zero, NaN, the empty string.
    pub const FALSY: Self = Self(1 << 7);
    /// A type variable occurs at the top level of the type.
    pub const TYPEVAR: Self = Self(1 << 8);
    /// A non-scalar (object) part is present.
    pub const NON_SCALAR: Self = Self(1 << 9);
    /// The unknown type.
    pub const UNKNOWN: Self = Self(1 << 10);

    pub const BOOLEAN: Self = Self(Self::TRUE.0 | Self::FALSE.0);
    /// Every scalar slice: the supertype of all scalars.
    pub const TOP_SCALAR: Self = Self(
        Self::BOOLEAN.0
            | Self::NULL.0
            | Self::NUMBER.0
            | Self::STRING.0
            | Self::UNDEFINED.0
            | Self::TRUTHY.0
            | Self::FALSY.0,
    );
    /// Every scalar slice plus the non-scalar slice.
    pub const TOP: Self = Self(Self::TOP_SCALAR.0 | Self::NON_SCALAR.0);

    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[inline]
    pub const fn without(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn is_subset_of(self, other: Self) -> bool {
        self.0 & !other.0 == 0
    }

    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    #[inline]
    pub const fn is_bottom(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for TypeMask {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}
