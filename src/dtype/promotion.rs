//! Pairwise dtype promotion
//!
//! Used by [`crate::ops::OpDescriptor::output_dtypes`] when an output
//! constraint admits more than one dtype: the input dtypes are folded with
//! [`promote`] and the result is picked if the constraint admits it.
//! Boolean comparisons always resolve to `Bool` without consulting it.

use super::DType;

/// Common dtype of two operands
///
/// - Float beats integer and bool; between floats the wider wins, and
///   `BF16` beats `F16`
/// - Integers of the same signedness: the wider wins
/// - Signed with unsigned: the signed type if strictly wider, otherwise the
///   next signed width up (capped at `I64`)
/// - `Bool` yields the other operand
pub fn promote(lhs: DType, rhs: DType) -> DType {
    if lhs == rhs {
        return lhs;
    }
    match (lhs.is_float(), rhs.is_float()) {
        (true, true) => wider_float(lhs, rhs),
        (true, false) => lhs,
        (false, true) => rhs,
        (false, false) => promote_int(lhs, rhs),
    }
}

fn wider_float(a: DType, b: DType) -> DType {
    match a.size_in_bytes().cmp(&b.size_in_bytes()) {
        std::cmp::Ordering::Greater => a,
        std::cmp::Ordering::Less => b,
        // Only F16 and BF16 share a width
        std::cmp::Ordering::Equal => DType::BF16,
    }
}

fn promote_int(a: DType, b: DType) -> DType {
    if a.is_bool() {
        return b;
    }
    if b.is_bool() {
        return a;
    }
    match (a.is_signed_int(), b.is_signed_int()) {
        (true, false) => signed_over_unsigned(a, b),
        (false, true) => signed_over_unsigned(b, a),
        _ if a.size_in_bytes() >= b.size_in_bytes() => a,
        _ => b,
    }
}

fn signed_over_unsigned(signed: DType, unsigned: DType) -> DType {
    if signed.size_in_bytes() > unsigned.size_in_bytes() {
        return signed;
    }
    match unsigned.size_in_bytes() {
        1 => DType::I16,
        2 => DType::I32,
        _ => DType::I64,
    }
}
