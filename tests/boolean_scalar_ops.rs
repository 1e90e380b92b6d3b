//! Integration tests for boolean scalar comparisons
//!
//! Tests verify correctness across:
//! - Canonical names and synonyms
//! - Mixed operand dtypes
//! - Comparison precision (f64 equality, f32 ordering)
//! - Gate failures (arity)
//! - Result materialization and type propagation

mod common;

use common::{builtin_registry, f64_pair};
use declops::dtype::DType;
use declops::error::Error;
use declops::ops::Status;
use declops::tensor::Variable;

// ============================================================================
// Equality
// ============================================================================

#[test]
fn test_eq_scalar() {
    let registry = builtin_registry();

    let (a, b) = f64_pair(3.0, 3.0);
    assert_eq!(registry.evaluate("eq_scalar", &[&a, &b]).unwrap(), Status::True);
    assert_eq!(registry.evaluate("Equals", &[&a, &b]).unwrap(), Status::True);

    let (a, b) = f64_pair(3.0, 3.0000001);
    assert_eq!(registry.evaluate("eq_scalar", &[&a, &b]).unwrap(), Status::False);
    assert_eq!(registry.evaluate("NotEquals", &[&a, &b]).unwrap(), Status::True);
}

#[test]
fn test_eq_scalar_mixed_dtypes() {
    let registry = builtin_registry();
    let i = Variable::scalar(7i64);
    let f = Variable::scalar(7.0f32);
    let u = Variable::scalar(7u16);
    assert_eq!(registry.evaluate("Equals", &[&i, &f]).unwrap(), Status::True);
    assert_eq!(registry.evaluate("Equals", &[&u, &i]).unwrap(), Status::True);

    let t = Variable::scalar_bool(true);
    let one = Variable::scalar(1.0f64);
    assert_eq!(registry.evaluate("eq_scalar", &[&t, &one]).unwrap(), Status::True);
}

// ============================================================================
// Ordering
// ============================================================================

#[test]
fn test_gte_scalar() {
    let registry = builtin_registry();
    let cases = [
        (5.0, 5.0, Status::True),
        (4.0, 5.0, Status::False),
        (5.5, 5.0, Status::True),
    ];
    for name in ["gte_scalar", "GreaterOrEquals", "greaterOrEquals"] {
        for (x, y, expected) in cases {
            let (a, b) = f64_pair(x, y);
            assert_eq!(
                registry.evaluate(name, &[&a, &b]).unwrap(),
                expected,
                "{name}({x}, {y})"
            );
        }
    }
}

#[test]
fn test_gte_scalar_int_operands() {
    let registry = builtin_registry();
    let x = Variable::scalar(5.5f64);
    let y = Variable::scalar(5i32);
    assert_eq!(registry.evaluate("gte_scalar", &[&x, &y]).unwrap(), Status::True);
    assert_eq!(registry.evaluate("gte_scalar", &[&y, &x]).unwrap(), Status::False);
}

#[test]
fn test_ordering_family() {
    let registry = builtin_registry();
    let (lo, hi) = f64_pair(1.0, 2.0);
    assert_eq!(registry.evaluate("gt_scalar", &[&hi, &lo]).unwrap(), Status::True);
    assert_eq!(registry.evaluate("GreaterThan", &[&lo, &hi]).unwrap(), Status::False);
    assert_eq!(registry.evaluate("lt_scalar", &[&lo, &hi]).unwrap(), Status::True);
    assert_eq!(registry.evaluate("lessThan", &[&hi, &lo]).unwrap(), Status::False);
    assert_eq!(registry.evaluate("lte_scalar", &[&lo, &lo]).unwrap(), Status::True);
    assert_eq!(registry.evaluate("LessOrEquals", &[&hi, &lo]).unwrap(), Status::False);
}

#[test]
fn test_ordering_compares_in_f32() {
    let registry = builtin_registry();
    // 3.0000001 rounds to 3.0 in f32
    let (a, b) = f64_pair(3.0, 3.0000001);
    assert_eq!(registry.evaluate("gte_scalar", &[&a, &b]).unwrap(), Status::True);
    assert_eq!(registry.evaluate("lt_scalar", &[&a, &b]).unwrap(), Status::False);
}

#[test]
fn test_ordering_large_ints_in_f32() {
    let registry = builtin_registry();
    let x = Variable::scalar((1i64 << 60) + (1i64 << 36) + 1);
    let y = Variable::scalar((1i64 << 60) + (1i64 << 37));
    assert_eq!(registry.evaluate("gte_scalar", &[&x, &y]).unwrap(), Status::True);
    assert_eq!(registry.evaluate("greaterOrEquals", &[&x, &y]).unwrap(), Status::True);
    assert_eq!(registry.evaluate("gt_scalar", &[&y, &x]).unwrap(), Status::False);
    // equality stays in f64, where the two differ
    assert_eq!(registry.evaluate("eq_scalar", &[&x, &y]).unwrap(), Status::False);
}

#[test]
fn test_only_first_element_read() {
    let registry = builtin_registry();
    let x = Variable::from_slice(&[4.0f32, 100.0, 100.0], &[3]).unwrap();
    let y = Variable::from_slice(&[5i32, 0], &[2, 1]).unwrap();
    assert_eq!(registry.evaluate("gte_scalar", &[&x, &y]).unwrap(), Status::False);
}

#[test]
fn test_nan_operands() {
    let registry = builtin_registry();
    let (nan, one) = f64_pair(f64::NAN, 1.0);
    for name in ["eq_scalar", "gt_scalar", "gte_scalar", "lt_scalar", "lte_scalar"] {
        assert_eq!(
            registry.evaluate(name, &[&nan, &one]).unwrap(),
            Status::False,
            "{name}"
        );
    }
    assert_eq!(registry.evaluate("neq_scalar", &[&nan, &nan]).unwrap(), Status::True);
}

// ============================================================================
// Gate failures
// ============================================================================

#[test]
fn test_wrong_arity() {
    let registry = builtin_registry();
    let (a, b) = f64_pair(1.0, 1.0);
    let c = Variable::scalar(1.0f64);

    for name in ["eq_scalar", "Equals", "gte_scalar", "greaterOrEquals"] {
        let canonical = registry.resolve(name).unwrap().descriptor().name().to_owned();
        assert_eq!(
            registry.evaluate(name, &[&a]).unwrap_err(),
            Error::arity_mismatch(canonical.as_str(), 2, 1)
        );
        assert_eq!(
            registry.evaluate(name, &[&a, &b, &c]).unwrap_err(),
            Error::arity_mismatch(canonical.as_str(), 2, 3)
        );
    }
}

#[test]
fn test_error_is_not_false() {
    let registry = builtin_registry();
    let a = Variable::scalar(1.0f64);
    let result = registry.evaluate("eq_scalar", &[&a]);
    assert!(result.is_err());
    assert_ne!(result, Ok(Status::False));
}

#[test]
fn test_empty_operand() {
    let registry = builtin_registry();
    let empty = Variable::from_slice::<f64>(&[], &[0]).unwrap();
    let one = Variable::scalar(1.0f64);
    assert_eq!(
        registry.evaluate("Equals", &[&empty, &one]).unwrap_err(),
        Error::IndexOutOfBounds { index: 0, len: 0 }
    );
}

#[test]
fn test_evaluation_is_idempotent() {
    let registry = builtin_registry();
    let (a, b) = f64_pair(2.5, 2.5);
    let first = registry.evaluate("gte_scalar", &[&a, &b]).unwrap();
    for _ in 0..5 {
        assert_eq!(registry.evaluate("gte_scalar", &[&a, &b]).unwrap(), first);
    }
    assert_eq!(a.element::<f64>(0).unwrap(), 2.5);
    assert_eq!(b.element::<f64>(0).unwrap(), 2.5);
}

// ============================================================================
// Execute / type propagation
// ============================================================================

#[test]
fn test_execute_returns_bool_scalar() {
    let registry = builtin_registry();
    let (a, b) = f64_pair(5.0, 4.0);

    let out = registry.execute("greaterOrEquals", &[&a, &b]).unwrap();
    assert_eq!(out.dtype(), DType::Bool);
    assert!(out.is_scalar());
    assert!(out.element_bool(0).unwrap());

    let out = registry.execute("Equals", &[&a, &b]).unwrap();
    assert!(!out.item::<u8>().map(|v| v != 0).unwrap());
}

#[test]
fn test_output_dtypes() {
    let registry = builtin_registry();
    for op in registry.operations() {
        let desc = op.descriptor();
        assert_eq!(
            desc.output_dtypes(&[DType::F64, DType::I32]).unwrap(),
            [DType::Bool],
            "{}",
            desc.name()
        );
    }
}
