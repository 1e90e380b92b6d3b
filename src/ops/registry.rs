//! Operation registry
//!
//! The registry has two phases, each with its own type:
//!
//! ```text
//! OpRegistryBuilder   (initialization: register, may fail on name collisions)
//!     │ build()
//!     ▼
//! OpRegistry          (steady state: resolve / evaluate, immutable, Send + Sync)
//! ```
//!
//! Once built, the registry has no interior mutability, so any number of
//! threads can resolve through a shared reference (or an `Arc<OpRegistry>`)
//! without locking.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::tensor::Variable;

use super::{BooleanOp, OpDescriptor, Status, gate, register_boolean_ops};

/// A descriptor paired with its evaluator
pub struct RegisteredOp {
    descriptor: OpDescriptor,
    evaluator: Arc<dyn BooleanOp>,
}

impl RegisteredOp {
    /// Static metadata
    #[inline]
    pub fn descriptor(&self) -> &OpDescriptor {
        &self.descriptor
    }

    /// Executable behaviour
    #[inline]
    pub fn evaluator(&self) -> &dyn BooleanOp {
        self.evaluator.as_ref()
    }

    /// Run the type-checking gate, then the evaluator
    pub fn evaluate(&self, inputs: &[&Variable]) -> Result<Status> {
        gate::check_inputs(&self.descriptor, inputs)?;
        self.evaluator.evaluate(inputs)
    }
}

impl fmt::Debug for RegisteredOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredOp")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

/// Initialization-phase registry
///
/// Collects operations and rejects name collisions. Call [`Self::build`]
/// once every operation is registered.
#[derive(Default)]
pub struct OpRegistryBuilder {
    ops: Vec<RegisteredOp>,
    index: HashMap<String, usize>,
}

impl OpRegistryBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an operation under its canonical name and every synonym
    ///
    /// Registration is all-or-nothing: if any of the names is already taken
    /// (or repeated within the descriptor) nothing is inserted and
    /// `DuplicateName` is returned.
    ///
    /// The descriptor's first output must admit `Bool`, since boolean
    /// evaluators always produce one.
    pub fn register(
        &mut self,
        descriptor: OpDescriptor,
        evaluator: impl BooleanOp + 'static,
    ) -> Result<()> {
        let admits_bool = descriptor
            .output_constraints()
            .first()
            .is_some_and(|c| c.admits(DType::Bool));
        if !admits_bool {
            return Err(Error::invalid_descriptor(
                descriptor.name(),
                "boolean operation output 0 must admit bool",
            ));
        }

        let mut pending: Vec<&str> = Vec::with_capacity(descriptor.synonyms().len() + 1);
        for name in descriptor.names() {
            let existing = match self.index.get(name) {
                Some(&slot) => Some(self.ops[slot].descriptor.name()),
                None if pending.contains(&name) => Some(descriptor.name()),
                None => None,
            };
            if let Some(existing) = existing {
                tracing::warn!(
                    op = descriptor.name(),
                    name,
                    existing,
                    "operation name collision"
                );
                return Err(Error::duplicate_name(name, existing));
            }
            pending.push(name);
        }

        let slot = self.ops.len();
        for name in pending {
            self.index.insert(name.to_owned(), slot);
        }
        tracing::debug!(
            op = descriptor.name(),
            arity = descriptor.arity(),
            synonyms = ?descriptor.synonyms(),
            "registered operation"
        );
        self.ops.push(RegisteredOp {
            descriptor,
            evaluator: Arc::new(evaluator),
        });
        Ok(())
    }

    /// True if `name` is taken by a canonical name or synonym
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of registered operations
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// True if nothing is registered yet
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Freeze the table
    pub fn build(self) -> OpRegistry {
        tracing::debug!(
            operations = self.ops.len(),
            names = self.index.len(),
            "operation registry frozen"
        );
        OpRegistry {
            ops: self.ops,
            index: self.index,
        }
    }
}

impl fmt::Debug for OpRegistryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpRegistryBuilder")
            .field("operations", &self.ops.len())
            .finish()
    }
}

/// Steady-state registry: immutable lookup table from name to operation
///
/// # Example
///
/// ```
/// use declops::ops::{OpRegistry, Status};
/// use declops::tensor::Variable;
///
/// let registry = OpRegistry::with_builtin_ops()?;
///
/// let x = Variable::scalar(5.5f64);
/// let y = Variable::scalar(5i32);
/// assert_eq!(registry.evaluate("greaterOrEquals", &[&x, &y])?, Status::True);
/// # Ok::<(), declops::error::Error>(())
/// ```
pub struct OpRegistry {
    ops: Vec<RegisteredOp>,
    index: HashMap<String, usize>,
}

impl OpRegistry {
    /// Build a registry holding every built-in operation
    ///
    /// An error here means the built-in table itself is inconsistent and
    /// startup should abort.
    pub fn with_builtin_ops() -> Result<Self> {
        let mut builder = OpRegistryBuilder::new();
        register_boolean_ops(&mut builder)?;
        Ok(builder.build())
    }

    /// Look up an operation by canonical name or synonym (case-sensitive)
    pub fn resolve(&self, name: &str) -> Result<&RegisteredOp> {
        match self.index.get(name) {
            Some(&slot) => {
                let op = &self.ops[slot];
                tracing::trace!(name, op = op.descriptor.name(), "resolved operation");
                Ok(op)
            }
            None => Err(Error::unknown_operation(name)),
        }
    }

    /// Resolve, type-check and evaluate a boolean operation
    pub fn evaluate(&self, name: &str, inputs: &[&Variable]) -> Result<Status> {
        self.resolve(name)?.evaluate(inputs)
    }

    /// Like [`Self::evaluate`], but returns the result as a scalar `Bool` variable
    pub fn execute(&self, name: &str, inputs: &[&Variable]) -> Result<Variable> {
        let status = self.evaluate(name, inputs)?;
        Ok(Variable::scalar_bool(status.is_true()))
    }

    /// True if `name` resolves
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of registered operations (synonyms not counted)
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// True if no operation is registered
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Registered operations in registration order
    pub fn operations(&self) -> impl Iterator<Item = &RegisteredOp> {
        self.ops.iter()
    }

    /// Every resolvable name, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.index.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for OpRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.ops.iter().map(|op| op.descriptor.name()))
            .finish()
    }
}
