//! Runtime dtype dispatch
//!
//! `dispatch_dtype!` binds the Rust type stored under a `DType` to an alias
//! and runs a generic body with it, which is how variables decode their raw
//! element bytes:
//!
//! ```ignore
//! fn read(bytes: &[u8], dtype: DType) -> Result<f64> {
//!     dispatch_dtype!(dtype, T => {
//!         Ok(bytemuck::pod_read_unaligned::<T>(bytes).to_f64())
//!     }, "read")
//! }
//! ```
//!
//! `F16`/`BF16` bind `half::f16`/`half::bf16` with the `f16` feature and
//! return `UnsupportedDType` without it. `Bool` always returns
//! `UnsupportedDType`, since `bool` is not `Pod`; callers handle it first.

/// Dispatch on a `DType`, binding `$T` to its element type.
macro_rules! dispatch_dtype {
    ($dtype:expr, $T:ident => $body:block, $error_op:expr) => {{
        use $crate::dtype::DType;
        match $dtype {
            DType::F64 => { type $T = f64; $body }
            DType::F32 => { type $T = f32; $body }
            #[cfg(feature = "f16")]
            DType::F16 => { type $T = half::f16; $body }
            #[cfg(feature = "f16")]
            DType::BF16 => { type $T = half::bf16; $body }
            DType::I64 => { type $T = i64; $body }
            DType::I32 => { type $T = i32; $body }
            DType::I16 => { type $T = i16; $body }
            DType::I8 => { type $T = i8; $body }
            DType::U64 => { type $T = u64; $body }
            DType::U32 => { type $T = u32; $body }
            DType::U16 => { type $T = u16; $body }
            DType::U8 => { type $T = u8; $body }
            #[allow(unreachable_patterns)]
            unsupported @ (DType::F16 | DType::BF16 | DType::Bool) => {
                return Err($crate::error::Error::UnsupportedDType {
                    dtype: unsupported,
                    op: $error_op,
                });
            }
        }
    }};
}

pub(crate) use dispatch_dtype;
