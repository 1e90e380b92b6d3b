//! Data type system for declops variables
//!
//! This module provides the `DType` enum for the element type a variable
//! actually holds, the `DTypeSet` bitset used for membership tests, and
//! `TypeConstraint`, which adds the `Any` wildcard that operation
//! descriptors use to declare what they accept.

mod dispatch;
mod element;
mod promotion;

pub(crate) use dispatch::dispatch_dtype;
pub use element::Element;
pub use promotion::promote;

use std::fmt;

// ============================================================================
// DType Enum
// ============================================================================

/// Data types a variable can hold at runtime
///
/// There is no `Any` member: the wildcard only exists in
/// [`TypeConstraint`], so a variable can never claim to be "any" type.
///
/// # Discriminant Values (Serialization Stability)
///
/// - Floats: 0-9 (F64=0, F32=1, F16=2, BF16=3)
/// - Signed ints: 10-19 (I64=10, I32=11, I16=12, I8=13)
/// - Unsigned ints: 20-29 (U64=20, U32=21, U16=22, U8=23)
/// - Bool: 30
///
/// Existing values are never changed. `DTypeSet` relies on every
/// discriminant being below 64.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[non_exhaustive]
#[repr(u8)]
pub enum DType {
    // Floating point types (0-9)
    /// 64-bit floating point
    F64 = 0,
    /// 32-bit floating point
    F32 = 1,
    /// 16-bit floating point (IEEE 754)
    F16 = 2,
    /// 16-bit brain floating point
    BF16 = 3,

    // Integer types
    /// 64-bit signed integer
    I64 = 10,
    /// 32-bit signed integer
    I32 = 11,
    /// 16-bit signed integer
    I16 = 12,
    /// 8-bit signed integer
    I8 = 13,

    // Unsigned integer types
    /// 64-bit unsigned integer
    U64 = 20,
    /// 32-bit unsigned integer
    U32 = 21,
    /// 16-bit unsigned integer
    U16 = 22,
    /// 8-bit unsigned integer
    U8 = 23,

    /// Boolean type, stored as one byte (0 = false, anything else = true)
    Bool = 30,
}

impl DType {
    /// Every dtype, in discriminant order
    pub const ALL: [DType; 13] = [
        Self::F64,
        Self::F32,
        Self::F16,
        Self::BF16,
        Self::I64,
        Self::I32,
        Self::I16,
        Self::I8,
        Self::U64,
        Self::U32,
        Self::U16,
        Self::U8,
        Self::Bool,
    ];

    /// Size of one element in bytes
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            Self::F64 | Self::I64 | Self::U64 => 8,
            Self::F32 | Self::I32 | Self::U32 => 4,
            Self::F16 | Self::BF16 | Self::I16 | Self::U16 => 2,
            Self::I8 | Self::U8 | Self::Bool => 1,
        }
    }

    /// Returns true if this is a floating point type
    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::F64 | Self::F32 | Self::F16 | Self::BF16)
    }

    /// Returns true if this is a signed integer type
    #[inline]
    pub const fn is_signed_int(self) -> bool {
        matches!(self, Self::I64 | Self::I32 | Self::I16 | Self::I8)
    }

    /// Returns true if this is an unsigned integer type
    #[inline]
    pub const fn is_unsigned_int(self) -> bool {
        matches!(self, Self::U64 | Self::U32 | Self::U16 | Self::U8)
    }

    /// Returns true if this is any integer type (signed or unsigned)
    #[inline]
    pub const fn is_int(self) -> bool {
        self.is_signed_int() || self.is_unsigned_int()
    }

    /// Returns true if this is a boolean type
    #[inline]
    pub const fn is_bool(self) -> bool {
        matches!(self, Self::Bool)
    }

    /// Short name for display (e.g., "f32", "i64")
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::F64 => "f64",
            Self::F32 => "f32",
            Self::F16 => "f16",
            Self::BF16 => "bf16",
            Self::I64 => "i64",
            Self::I32 => "i32",
            Self::I16 => "i16",
            Self::I8 => "i8",
            Self::U64 => "u64",
            Self::U32 => "u32",
            Self::U16 => "u16",
            Self::U8 => "u8",
            Self::Bool => "bool",
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

// ============================================================================
// DTypeSet
// ============================================================================

/// Set of dtypes for efficient membership testing
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DTypeSet {
    bits: u64,
}

impl DTypeSet {
    /// Empty set
    pub const EMPTY: Self = Self { bits: 0 };

    /// All floating point types
    pub const FLOATS: Self = Self {
        bits: (1 << DType::F64 as u8)
            | (1 << DType::F32 as u8)
            | (1 << DType::F16 as u8)
            | (1 << DType::BF16 as u8),
    };

    /// All signed integer types
    pub const SIGNED_INTS: Self = Self {
        bits: (1 << DType::I64 as u8)
            | (1 << DType::I32 as u8)
            | (1 << DType::I16 as u8)
            | (1 << DType::I8 as u8),
    };

    /// All unsigned integer types
    pub const UNSIGNED_INTS: Self = Self {
        bits: (1 << DType::U64 as u8)
            | (1 << DType::U32 as u8)
            | (1 << DType::U16 as u8)
            | (1 << DType::U8 as u8),
    };

    /// All integer types
    pub const INTS: Self = Self {
        bits: Self::SIGNED_INTS.bits | Self::UNSIGNED_INTS.bits,
    };

    /// All numeric types (floats + ints)
    pub const NUMERIC: Self = Self {
        bits: Self::FLOATS.bits | Self::INTS.bits,
    };

    /// Boolean only
    pub const BOOL: Self = Self::single(DType::Bool);

    /// Every concrete dtype
    pub const ALL: Self = Self {
        bits: Self::NUMERIC.bits | Self::BOOL.bits,
    };

    /// Create a set containing a single dtype
    #[inline]
    pub const fn single(dtype: DType) -> Self {
        Self {
            bits: 1 << dtype as u8,
        }
    }

    /// Create a set from a list of dtypes
    pub fn of(dtypes: &[DType]) -> Self {
        dtypes
            .iter()
            .fold(Self::EMPTY, |set, &dt| set.union(Self::single(dt)))
    }

    /// Check if the set contains a dtype
    #[inline]
    pub const fn contains(self, dtype: DType) -> bool {
        self.bits & (1 << dtype as u8) != 0
    }

    /// Union of two sets
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    /// Intersection of two sets
    #[inline]
    pub const fn intersection(self, other: Self) -> Self {
        Self {
            bits: self.bits & other.bits,
        }
    }

    /// Check if set is empty
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Number of dtypes in the set
    #[inline]
    pub const fn len(self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Iterate members in discriminant order
    pub fn iter(self) -> impl Iterator<Item = DType> {
        DType::ALL.into_iter().filter(move |&dt| self.contains(dt))
    }
}

impl From<DType> for DTypeSet {
    fn from(dtype: DType) -> Self {
        Self::single(dtype)
    }
}

impl fmt::Display for DTypeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, dt) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{dt}")?;
        }
        write!(f, "}}")
    }
}

// ============================================================================
// TypeConstraint
// ============================================================================

/// Allowed element types for one operand or output of an operation
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeConstraint {
    /// Wildcard: every dtype is admitted
    Any,
    /// Only the listed dtypes are admitted
    OneOf(DTypeSet),
}

impl TypeConstraint {
    /// Membership test used by the type-checking gate
    #[inline]
    pub const fn admits(self, dtype: DType) -> bool {
        match self {
            Self::Any => true,
            Self::OneOf(set) => set.contains(dtype),
        }
    }

    /// Concrete set of admitted dtypes (`Any` expands to every dtype)
    #[inline]
    pub const fn admitted(self) -> DTypeSet {
        match self {
            Self::Any => DTypeSet::ALL,
            Self::OneOf(set) => set,
        }
    }

    /// Returns true for the wildcard
    #[inline]
    pub const fn is_any(self) -> bool {
        matches!(self, Self::Any)
    }
}

impl From<DType> for TypeConstraint {
    fn from(dtype: DType) -> Self {
        Self::OneOf(DTypeSet::single(dtype))
    }
}

impl From<DTypeSet> for TypeConstraint {
    fn from(set: DTypeSet) -> Self {
        Self::OneOf(set)
    }
}

impl fmt::Display for TypeConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => write!(f, "any"),
            Self::OneOf(set) => write!(f, "{set}"),
        }
    }
}
