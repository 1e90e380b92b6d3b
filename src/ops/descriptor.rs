//! Operation descriptors: static metadata for one registered operation

use crate::dtype::{DType, TypeConstraint, promote};
use crate::error::{Error, Result};

use super::gate;

/// Immutable metadata describing one operation
///
/// A descriptor carries everything the registry and the type-checking gate
/// need to know about an operation without running it: the canonical name,
/// alternate names, operand count and per-operand / per-output dtype
/// constraints.
///
/// Descriptors are created through [`OpDescriptor::builder`], which enforces
/// that every operand index has exactly one constraint.
///
/// ```
/// use declops::dtype::{DType, TypeConstraint};
/// use declops::ops::OpDescriptor;
///
/// let desc = OpDescriptor::builder("eq_scalar", 2)
///     .synonym("Equals")
///     .allowed_input_types(0, TypeConstraint::Any)
///     .allowed_input_types(1, TypeConstraint::Any)
///     .allowed_output_types(0, DType::Bool)
///     .scalar(true)
///     .build()?;
///
/// assert_eq!(desc.arity(), 2);
/// assert_eq!(desc.synonyms(), ["Equals"]);
/// # Ok::<(), declops::error::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct OpDescriptor {
    name: String,
    arity: usize,
    input_constraints: Vec<TypeConstraint>,
    output_constraints: Vec<TypeConstraint>,
    synonyms: Vec<String>,
    scalar: bool,
}

impl OpDescriptor {
    /// Start describing an operation with the given canonical name and arity
    pub fn builder(name: impl Into<String>, arity: usize) -> OpDescriptorBuilder {
        OpDescriptorBuilder {
            name: name.into(),
            arity,
            inputs: Vec::new(),
            outputs: Vec::new(),
            synonyms: Vec::new(),
            scalar: false,
        }
    }

    /// Canonical name
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Required number of operands
    #[inline]
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Allowed dtypes per operand index (length equals [`Self::arity`])
    #[inline]
    pub fn input_constraints(&self) -> &[TypeConstraint] {
        &self.input_constraints
    }

    /// Constraint for operand `index`, if it exists
    #[inline]
    pub fn input_constraint(&self, index: usize) -> Option<TypeConstraint> {
        self.input_constraints.get(index).copied()
    }

    /// Allowed dtypes per output index
    #[inline]
    pub fn output_constraints(&self) -> &[TypeConstraint] {
        &self.output_constraints
    }

    /// Alternate names, in declaration order
    #[inline]
    pub fn synonyms(&self) -> &[String] {
        &self.synonyms
    }

    /// True if the operation only looks at element 0 of each operand
    #[inline]
    pub fn is_scalar(&self) -> bool {
        self.scalar
    }

    /// Canonical name followed by every synonym
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.synonyms.iter().map(String::as_str))
    }

    /// Infer output dtypes from input dtypes
    ///
    /// This is the type propagation hook for graph builders. Inputs are
    /// checked with the same rules as the type-checking gate. For each
    /// output:
    /// - a constraint admitting exactly one dtype yields that dtype
    /// - otherwise the promoted input dtype is used when admitted
    /// - otherwise the first admitted dtype in discriminant order
    pub fn output_dtypes(&self, input_dtypes: &[DType]) -> Result<Vec<DType>> {
        gate::check_dtypes(self, input_dtypes)?;

        let promoted = input_dtypes.iter().copied().reduce(promote);

        self.output_constraints
            .iter()
            .enumerate()
            .map(|(index, constraint)| {
                let admitted = constraint.admitted();
                let first = admitted.iter().next();
                let picked = match promoted {
                    Some(dt) if admitted.len() > 1 && admitted.contains(dt) => Some(dt),
                    _ => first,
                };
                picked.ok_or_else(|| {
                    Error::invalid_descriptor(
                        &self.name,
                        format!("output {index} admits no dtype"),
                    )
                })
            })
            .collect()
    }
}

/// Chained builder for [`OpDescriptor`]
#[derive(Clone, Debug)]
#[must_use = "call build() to obtain the descriptor"]
pub struct OpDescriptorBuilder {
    name: String,
    arity: usize,
    inputs: Vec<Option<TypeConstraint>>,
    outputs: Vec<Option<TypeConstraint>>,
    synonyms: Vec<String>,
    scalar: bool,
}

impl OpDescriptorBuilder {
    /// Add an alternate name
    pub fn synonym(mut self, name: impl Into<String>) -> Self {
        self.synonyms.push(name.into());
        self
    }

    /// Set the allowed dtypes for operand `index`
    ///
    /// Setting the same index twice keeps the last constraint.
    pub fn allowed_input_types(mut self, index: usize, allowed: impl Into<TypeConstraint>) -> Self {
        set_slot(&mut self.inputs, index, allowed.into());
        self
    }

    /// Set the same constraint for every operand
    pub fn allowed_input_types_all(mut self, allowed: impl Into<TypeConstraint>) -> Self {
        self.inputs = vec![Some(allowed.into()); self.arity];
        self
    }

    /// Set the allowed dtypes for output `index`
    pub fn allowed_output_types(
        mut self,
        index: usize,
        allowed: impl Into<TypeConstraint>,
    ) -> Self {
        set_slot(&mut self.outputs, index, allowed.into());
        self
    }

    /// Mark the operation as reading only element 0 of each operand
    pub fn scalar(mut self, scalar: bool) -> Self {
        self.scalar = scalar;
        self
    }

    /// Validate and freeze the descriptor
    pub fn build(self) -> Result<OpDescriptor> {
        let name = self.name;
        if name.is_empty() {
            return Err(Error::invalid_descriptor("", "name must not be empty"));
        }
        if self.arity == 0 {
            return Err(Error::invalid_descriptor(name, "arity must be at least 1"));
        }
        if self.inputs.len() > self.arity {
            return Err(Error::invalid_descriptor(
                name,
                format!(
                    "input constraint for index {} exceeds arity {}",
                    self.inputs.len() - 1,
                    self.arity
                ),
            ));
        }
        if self.synonyms.iter().any(String::is_empty) {
            return Err(Error::invalid_descriptor(name, "synonym must not be empty"));
        }

        let mut input_constraints = Vec::with_capacity(self.arity);
        for index in 0..self.arity {
            match self.inputs.get(index).copied().flatten() {
                Some(constraint) => input_constraints.push(constraint),
                None => {
                    return Err(Error::invalid_descriptor(
                        name,
                        format!("no allowed types declared for input {index}"),
                    ));
                }
            }
        }

        if self.outputs.is_empty() {
            return Err(Error::invalid_descriptor(name, "no output types declared"));
        }
        let mut output_constraints = Vec::with_capacity(self.outputs.len());
        for (index, slot) in self.outputs.into_iter().enumerate() {
            match slot {
                Some(constraint) if !constraint.admitted().is_empty() => {
                    output_constraints.push(constraint)
                }
                Some(_) => {
                    return Err(Error::invalid_descriptor(
                        name,
                        format!("output {index} admits no dtype"),
                    ));
                }
                None => {
                    return Err(Error::invalid_descriptor(
                        name,
                        format!("no allowed types declared for output {index}"),
                    ));
                }
            }
        }

        Ok(OpDescriptor {
            name,
            arity: self.arity,
            input_constraints,
            output_constraints,
            synonyms: self.synonyms,
            scalar: self.scalar,
        })
    }
}

fn set_slot(slots: &mut Vec<Option<TypeConstraint>>, index: usize, value: TypeConstraint) {
    if slots.len() <= index {
        slots.resize(index + 1, None);
    }
    slots[index] = Some(value);
}
