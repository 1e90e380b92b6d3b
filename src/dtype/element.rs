//! Element trait for mapping Rust types to DType

use super::DType;
use bytemuck::Pod;

/// Trait for types that can be stored in, or extracted from, a variable
///
/// This trait connects Rust's type system to the runtime dtype system.
/// Scalar extraction coerces between element types through `f64`, the
/// same way the comparison kernels widen their operands.
///
/// # Bounds
/// - `Copy + Send + Sync + 'static` - Basic trait requirements
/// - `Pod` - Safe reads out of raw variable bytes (bytemuck)
/// - `PartialOrd` - Needed by the comparison evaluators
///
/// Note: `bool` doesn't implement `Pod`, so boolean variables store `u8`
/// internally and are read through [`crate::tensor::Variable::element_bool`].
pub trait Element: Copy + Send + Sync + Pod + PartialOrd + 'static {
    /// The corresponding DType for this Rust type
    const DTYPE: DType;

    /// Convert to f64 for generic numeric operations
    fn to_f64(self) -> f64;

    /// Convert to f32 in a single rounding step
    ///
    /// Going through [`Self::to_f64`] first would round 64-bit integers
    /// twice.
    fn to_f32(self) -> f32;

    /// Convert from f64 to this type
    ///
    /// Integer targets truncate toward zero and saturate at the type bounds
    /// (Rust `as` semantics).
    fn from_f64(v: f64) -> Self;
}

macro_rules! impl_element_primitive {
    ($($ty:ty => $dtype:ident),* $(,)?) => {
        $(
            impl Element for $ty {
                const DTYPE: DType = DType::$dtype;

                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }

                #[inline]
                fn to_f32(self) -> f32 {
                    self as f32
                }

                #[inline]
                fn from_f64(v: f64) -> Self {
                    v as $ty
                }
            }
        )*
    };
}

impl_element_primitive! {
    f64 => F64,
    f32 => F32,
    i64 => I64,
    i32 => I32,
    i16 => I16,
    i8 => I8,
    u64 => U64,
    u32 => U32,
    u16 => U16,
    u8 => U8,
}

// ============================================================================
// Half-precision floating point types (requires "f16" feature)
// ============================================================================

#[cfg(feature = "f16")]
impl Element for half::f16 {
    const DTYPE: DType = DType::F16;

    #[inline]
    fn to_f64(self) -> f64 {
        self.to_f64()
    }

    #[inline]
    fn to_f32(self) -> f32 {
        self.to_f32()
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        half::f16::from_f64(v)
    }
}

#[cfg(feature = "f16")]
impl Element for half::bf16 {
    const DTYPE: DType = DType::BF16;

    #[inline]
    fn to_f64(self) -> f64 {
        self.to_f64()
    }

    #[inline]
    fn to_f32(self) -> f32 {
        self.to_f32()
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        half::bf16::from_f64(v)
    }
}
