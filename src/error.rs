//! Error types for declops

use crate::dtype::{DType, TypeConstraint};
use thiserror::Error;

/// Result type alias using declops' Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while registering, resolving or evaluating operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A canonical name or synonym is already taken by a registered operation
    #[error("Operation name '{name}' is already registered (by '{existing}')")]
    DuplicateName {
        /// The colliding name
        name: String,
        /// Canonical name of the operation that already owns it
        existing: String,
    },

    /// No operation is registered under the requested name
    #[error("Unknown operation '{name}'")]
    UnknownOperation {
        /// The name that failed to resolve
        name: String,
    },

    /// Wrong number of operands supplied to an operation
    #[error("Operation '{op}' expects {expected} inputs, got {got}")]
    ArityMismatch {
        /// Canonical operation name
        op: String,
        /// Declared arity
        expected: usize,
        /// Number of operands supplied
        got: usize,
    },

    /// Operand element type is not admitted by the operation's constraint
    #[error("Operation '{op}' input {index}: dtype {dtype} not in allowed types {allowed}")]
    TypeMismatch {
        /// Canonical operation name
        op: String,
        /// Operand index
        index: usize,
        /// Runtime dtype of the operand
        dtype: DType,
        /// Declared constraint for that operand
        allowed: TypeConstraint,
    },

    /// Descriptor failed validation at build time
    #[error("Invalid descriptor for '{op}': {reason}")]
    InvalidDescriptor {
        /// Operation name (may be empty when the name itself is invalid)
        op: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Data length does not match the requested shape
    #[error("Shape mismatch: shape {shape:?} holds {expected} elements, got {got}")]
    ShapeMismatch {
        /// Requested shape
        shape: Vec<usize>,
        /// Element count implied by the shape
        expected: usize,
        /// Element count actually supplied
        got: usize,
    },

    /// Index out of bounds
    #[error("Index {index} out of bounds for variable of {len} elements")]
    IndexOutOfBounds {
        /// The invalid index
        index: usize,
        /// Number of elements
        len: usize,
    },

    /// Invalid argument provided to an operation
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// The argument name
        arg: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// Element type not available in this build
    #[error("Unsupported dtype {dtype} for '{op}'")]
    UnsupportedDType {
        /// The unsupported dtype
        dtype: DType,
        /// The operation name
        op: &'static str,
    },
}

impl Error {
    /// Create a duplicate name error
    pub fn duplicate_name(name: impl Into<String>, existing: impl Into<String>) -> Self {
        Self::DuplicateName {
            name: name.into(),
            existing: existing.into(),
        }
    }

    /// Create an unknown operation error
    pub fn unknown_operation(name: impl Into<String>) -> Self {
        Self::UnknownOperation { name: name.into() }
    }

    /// Create an arity mismatch error
    pub fn arity_mismatch(op: impl Into<String>, expected: usize, got: usize) -> Self {
        Self::ArityMismatch {
            op: op.into(),
            expected,
            got,
        }
    }

    /// Create a type mismatch error
    pub fn type_mismatch(
        op: impl Into<String>,
        index: usize,
        dtype: DType,
        allowed: TypeConstraint,
    ) -> Self {
        Self::TypeMismatch {
            op: op.into(),
            index,
            dtype,
            allowed,
        }
    }

    /// Create an invalid descriptor error
    pub fn invalid_descriptor(op: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDescriptor {
            op: op.into(),
            reason: reason.into(),
        }
    }

    /// Create a shape mismatch error
    pub fn shape_mismatch(shape: &[usize], expected: usize, got: usize) -> Self {
        Self::ShapeMismatch {
            shape: shape.to_vec(),
            expected,
            got,
        }
    }

    /// Returns true for errors raised while building the registry.
    ///
    /// These indicate a broken operation table and should abort startup.
    /// Everything else is a per-call failure the caller can report and continue.
    pub fn is_registration_error(&self) -> bool {
        matches!(self, Self::DuplicateName { .. } | Self::InvalidDescriptor { .. })
    }
}
