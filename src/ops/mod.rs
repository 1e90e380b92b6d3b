//! Operation declarations and evaluation
//!
//! This module defines how operations are described, looked up and run:
//!
//! - [`OpDescriptor`]: name, synonyms, arity and dtype constraints
//! - [`gate`]: the type check every operation passes before its evaluator runs
//! - [`OpRegistryBuilder`] / [`OpRegistry`]: name and synonym lookup table
//! - [`BooleanOp`] / [`ScalarComparison`]: boolean scalar comparisons
//!
//! # Lifecycle
//!
//! ```
//! use declops::ops::{OpRegistryBuilder, register_boolean_ops};
//! use declops::tensor::Variable;
//!
//! let mut builder = OpRegistryBuilder::new();
//! register_boolean_ops(&mut builder)?;
//! let registry = builder.build();
//!
//! let a = Variable::scalar(3.0f64);
//! let b = Variable::scalar(3.0f64);
//! assert!(registry.evaluate("Equals", &[&a, &b])?.is_true());
//! # Ok::<(), declops::error::Error>(())
//! ```

mod boolean;
mod descriptor;
pub mod gate;
mod registry;

pub use boolean::{
    BooleanOp, CompareOp, ComparePrecision, ScalarComparison, Status, register_boolean_ops,
};
pub use descriptor::{OpDescriptor, OpDescriptorBuilder};
pub use registry::{OpRegistry, OpRegistryBuilder, RegisteredOp};
