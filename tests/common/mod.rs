//! Common test utilities
#![allow(dead_code)]

use declops::ops::OpRegistry;
use declops::tensor::Variable;

/// Install a tracing subscriber that writes through the test harness
///
/// Repeated calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

/// Registry holding every built-in operation
pub fn builtin_registry() -> OpRegistry {
    init_tracing();
    OpRegistry::with_builtin_ops().expect("built-in operations must register cleanly")
}

/// Scalar f64 operand pair
pub fn f64_pair(x: f64, y: f64) -> (Variable, Variable) {
    (Variable::scalar(x), Variable::scalar(y))
}
