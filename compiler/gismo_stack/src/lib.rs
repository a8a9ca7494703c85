//! Stack growth for deeply recursive code.
//!
//! Gismo programs are trees, and both the parser and the evaluator walk them
//! recursively. A macro that expands into a call of itself recurses once per
//! expansion, so guest recursion depth turns directly into host stack depth.
//! Instead of imposing a depth limit, recursive entry points call
//! [`ensure_sufficient_stack`], which switches to a freshly allocated stack
//! segment whenever the current one runs low.
//!
//! On `wasm32` the helper is a plain call.

/// Remaining stack below which a new segment is allocated.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
///
/// ```text
/// fn eval(&mut self, expr: &Value, scope: &ScopeRef) -> EvalResult {
///     ensure_sufficient_stack(|| self.eval_inner(expr, scope))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
