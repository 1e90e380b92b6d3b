//! Boolean scalar comparison operations
//!
//! Each comparison reads element 0 of its two operands, widens both to the
//! comparison's precision and reports whether the comparator holds.
//!
//! | canonical    | synonyms                             | comparator | precision |
//! |--------------|--------------------------------------|------------|-----------|
//! | `eq_scalar`  | `Equals`                             | `==`       | f64       |
//! | `neq_scalar` | `NotEquals`, `notEquals`             | `!=`       | f64       |
//! | `gt_scalar`  | `GreaterThan`, `greaterThan`         | `>`        | f32       |
//! | `gte_scalar` | `GreaterOrEquals`, `greaterOrEquals` | `>=`       | f32       |
//! | `lt_scalar`  | `LessThan`, `lessThan`               | `<`        | f32       |
//! | `lte_scalar` | `LessOrEquals`, `lessOrEquals`       | `<=`       | f32       |
//!
//! Equality-style comparisons run in f64 and ordering comparisons in f32.
//! TODO: unify ordering on f64 once graphs relying on f32 rounding are migrated.

use std::fmt;

use crate::dtype::{DType, TypeConstraint};
use crate::error::{Error, Result};
use crate::tensor::Variable;

use super::{OpDescriptor, OpRegistryBuilder};

/// Outcome of a boolean operation
///
/// Failures never show up here: they are the `Err` side of
/// `Result<Status>`, so a type or arity problem can't be mistaken for
/// `False`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    /// The condition holds
    True,
    /// The condition does not hold
    False,
}

impl Status {
    /// Returns true for [`Status::True`]
    #[inline]
    pub const fn is_true(self) -> bool {
        matches!(self, Self::True)
    }
}

impl From<bool> for Status {
    #[inline]
    fn from(value: bool) -> Self {
        if value { Self::True } else { Self::False }
    }
}

impl From<Status> for bool {
    #[inline]
    fn from(status: Status) -> Self {
        status.is_true()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::True => write!(f, "TRUE"),
            Self::False => write!(f, "FALSE"),
        }
    }
}

/// Executable behaviour of a boolean operation
///
/// Implementations receive operands that already passed the type-checking
/// gate for their descriptor. They must be pure: no mutation of the
/// operands and the same inputs always give the same status.
pub trait BooleanOp: Send + Sync {
    /// Evaluate on gate-validated operands
    fn evaluate(&self, inputs: &[&Variable]) -> Result<Status>;
}

/// Comparison kind
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CompareOp {
    /// Equal: a == b
    Eq,
    /// Not equal: a != b
    Ne,
    /// Less than: a < b
    Lt,
    /// Less than or equal: a <= b
    Le,
    /// Greater than: a > b
    Gt,
    /// Greater than or equal: a >= b
    Ge,
}

/// Numeric representation operands are widened to before comparing
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ComparePrecision {
    /// Compare as f64
    F64,
    /// Compare as f32
    F32,
}

impl CompareOp {
    /// Every comparison, in registration order
    pub const ALL: [CompareOp; 6] = [
        Self::Eq,
        Self::Ne,
        Self::Gt,
        Self::Ge,
        Self::Lt,
        Self::Le,
    ];

    /// Canonical name of the scalar operation
    pub const fn scalar_op_name(self) -> &'static str {
        match self {
            Self::Eq => "eq_scalar",
            Self::Ne => "neq_scalar",
            Self::Lt => "lt_scalar",
            Self::Le => "lte_scalar",
            Self::Gt => "gt_scalar",
            Self::Ge => "gte_scalar",
        }
    }

    /// Alternate names of the scalar operation
    pub const fn synonyms(self) -> &'static [&'static str] {
        match self {
            Self::Eq => &["Equals"],
            Self::Ne => &["NotEquals", "notEquals"],
            Self::Lt => &["LessThan", "lessThan"],
            Self::Le => &["LessOrEquals", "lessOrEquals"],
            Self::Gt => &["GreaterThan", "greaterThan"],
            Self::Ge => &["GreaterOrEquals", "greaterOrEquals"],
        }
    }

    /// Precision the built-in operation compares in
    pub const fn default_precision(self) -> ComparePrecision {
        match self {
            Self::Eq | Self::Ne => ComparePrecision::F64,
            Self::Lt | Self::Le | Self::Gt | Self::Ge => ComparePrecision::F32,
        }
    }

    /// Apply the comparator (IEEE semantics for NaN)
    #[inline]
    pub fn apply<T: PartialOrd>(self, a: T, b: T) -> bool {
        match self {
            Self::Eq => a == b,
            Self::Ne => a != b,
            Self::Lt => a < b,
            Self::Le => a <= b,
            Self::Gt => a > b,
            Self::Ge => a >= b,
        }
    }

    /// Descriptor of the built-in scalar operation
    pub fn descriptor(self) -> Result<OpDescriptor> {
        self.synonyms()
            .iter()
            .fold(
                OpDescriptor::builder(self.scalar_op_name(), 2),
                |builder, &syn| builder.synonym(syn),
            )
            .allowed_input_types(0, TypeConstraint::Any)
            .allowed_input_types(1, TypeConstraint::Any)
            .allowed_output_types(0, DType::Bool)
            .scalar(true)
            .build()
    }
}

/// Evaluator comparing element 0 of two operands
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScalarComparison {
    op: CompareOp,
    precision: ComparePrecision,
}

impl ScalarComparison {
    /// Comparison in the operation's default precision
    pub const fn new(op: CompareOp) -> Self {
        Self {
            op,
            precision: op.default_precision(),
        }
    }

    /// Comparison in an explicit precision
    pub const fn with_precision(op: CompareOp, precision: ComparePrecision) -> Self {
        Self { op, precision }
    }

    /// Comparison kind
    pub const fn op(&self) -> CompareOp {
        self.op
    }

    /// Precision operands are widened to
    pub const fn precision(&self) -> ComparePrecision {
        self.precision
    }
}

impl BooleanOp for ScalarComparison {
    fn evaluate(&self, inputs: &[&Variable]) -> Result<Status> {
        let [x, y] = inputs else {
            return Err(Error::arity_mismatch(
                self.op.scalar_op_name(),
                2,
                inputs.len(),
            ));
        };

        let holds = match self.precision {
            ComparePrecision::F64 => self.op.apply(x.element::<f64>(0)?, y.element::<f64>(0)?),
            ComparePrecision::F32 => self.op.apply(x.element::<f32>(0)?, y.element::<f32>(0)?),
        };

        tracing::trace!(
            op = self.op.scalar_op_name(),
            x = %x.id(),
            y = %y.id(),
            result = holds,
            "scalar comparison"
        );
        Ok(Status::from(holds))
    }
}

/// Register every built-in boolean scalar comparison
pub fn register_boolean_ops(registry: &mut OpRegistryBuilder) -> Result<()> {
    for op in CompareOp::ALL {
        registry.register(op.descriptor()?, ScalarComparison::new(op))?;
    }
    Ok(())
}
