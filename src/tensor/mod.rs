//! Variable types
//!
//! This module provides `Variable`, the array handle operations consume.
//! Storage is host-resident and immutable; device placement and strided
//! layouts belong to the engine that feeds variables in.

mod id;
mod shape;
mod variable;

pub use id::VariableId;
pub use shape::Shape;
pub use variable::Variable;
