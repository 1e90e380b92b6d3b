//! Type-checking gate run before any evaluator
//!
//! The gate enforces the contract declared by an [`OpDescriptor`]: the operand
//! count must equal the arity, and every operand's runtime dtype must be
//! admitted by the constraint declared for its index. The operand count is
//! checked first; operands are then checked in index order and the first
//! failure is reported.

use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::tensor::Variable;

use super::OpDescriptor;

/// Validate concrete operands against a descriptor
pub fn check_inputs(desc: &OpDescriptor, inputs: &[&Variable]) -> Result<()> {
    check_arity(desc, inputs.len())?;
    for (index, var) in inputs.iter().enumerate() {
        check_operand(desc, index, var.dtype())?;
    }
    Ok(())
}

/// Validate bare operand dtypes against a descriptor
///
/// Same rules as [`check_inputs`], for callers that only know the types,
/// e.g. while building a graph.
pub fn check_dtypes(desc: &OpDescriptor, dtypes: &[DType]) -> Result<()> {
    check_arity(desc, dtypes.len())?;
    for (index, &dtype) in dtypes.iter().enumerate() {
        check_operand(desc, index, dtype)?;
    }
    Ok(())
}

#[inline]
fn check_arity(desc: &OpDescriptor, got: usize) -> Result<()> {
    if got != desc.arity() {
        return Err(Error::arity_mismatch(desc.name(), desc.arity(), got));
    }
    Ok(())
}

#[inline]
fn check_operand(desc: &OpDescriptor, index: usize, dtype: DType) -> Result<()> {
    // Arity was checked first, so every index has a constraint.
    let allowed = desc.input_constraints()[index];
    if !allowed.admits(dtype) {
        return Err(Error::type_mismatch(desc.name(), index, dtype, allowed));
    }
    Ok(())
}
