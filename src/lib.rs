//! # declops
//!
//! **Declarative operation registry with type-checked boolean comparisons.**
//!
//! declops describes operations as data (canonical name, synonyms, arity,
//! per-operand dtype constraints), keeps them in a registry addressable by
//! any of their names, and runs a type-checking gate before each evaluator.
//!
//! ## Features
//!
//! - **Descriptors**: builder-style declaration of arity and allowed dtypes,
//!   including an `Any` wildcard
//! - **Registry**: two-phase (build, then freeze), atomic registration,
//!   lock-free concurrent lookup
//! - **Gate**: arity and dtype checks with descriptive errors
//! - **Comparisons**: `eq_scalar`, `neq_scalar`, `gt_scalar`, `gte_scalar`,
//!   `lt_scalar`, `lte_scalar` and their synonyms
//! - **Multiple dtypes**: f64, f32, f16, bf16, integers, bool
//!
//! ## Quick Start
//!
//! ```
//! use declops::prelude::*;
//!
//! let registry = OpRegistry::with_builtin_ops()?;
//!
//! let x = Variable::scalar(5i64);
//! let y = Variable::scalar(5.0f32);
//! assert_eq!(registry.evaluate("gte_scalar", &[&x, &y])?, Status::True);
//! assert_eq!(registry.evaluate("GreaterOrEquals", &[&x, &y])?, Status::True);
//! # Ok::<(), declops::error::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `f16`: Half-precision element types (F16, BF16) via the `half` crate

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dtype;
pub mod error;
pub mod ops;
pub mod tensor;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::dtype::{DType, DTypeSet, TypeConstraint};
    pub use crate::error::{Error, Result};
    pub use crate::ops::{BooleanOp, OpDescriptor, OpRegistry, OpRegistryBuilder, Status};
    pub use crate::tensor::Variable;
}
