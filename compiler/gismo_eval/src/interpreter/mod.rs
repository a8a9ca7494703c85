//! Tree-walking evaluator.
//!
//! A handful of special forms are recognized by the head symbol of a cons
//! cell before anything else:
//!
//! - `(@call f args)`: evaluate `f`; a callable gets the raw `args`
//! - `(@callCurly f s...)`: rewritten to `(@call f (@begin s...))`
//! - `(::= key body)`: store a definition, yield `nil`
//! - `(@begin s...)` / `(Module s...)`: run statements in a child scope
//!
//! Every other cons cell goes to signature dispatch (see `dispatch`). A bare
//! symbol evaluates to its definition, or to itself when there is none.

mod builder;

use std::path::PathBuf;

use gismo_ir::{Name, Span};
use gismo_stack::ensure_sufficient_stack;
use rustc_hash::FxHashMap;

pub use builder::InterpreterBuilder;

use crate::loader::ModuleLoader;
use crate::output::OutputSink;
use crate::print_handler::SharedPrintHandler;
use crate::substitute::{substitute, SubstitutionMode};
use crate::{
    primitives, Callable, EvalError, EvalResult, PrimitiveCall, ScopeRef, SignatureKey, Value,
};

/// Evaluation state that outlives a single expression.
pub struct Interpreter {
    print: SharedPrintHandler,
    output: OutputSink,
    loader: Box<dyn ModuleLoader>,
    /// Lowered programs by canonical path, for `$LOAD`.
    load_cache: FxHashMap<PathBuf, Value>,
    iota: i64,
    /// Whether `$SCOPE` dumps use ANSI colors.
    colors: bool,
}

impl Default for Interpreter {
    fn default() -> Self {
        InterpreterBuilder::new().build()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A root scope holding every primitive under its `$NAME`.
    pub fn builtin_scope(&self) -> ScopeRef {
        let scope = ScopeRef::root();
        for primitive in primitives::PRIMITIVES {
            scope.insert_definition(
                SignatureKey::variable(Name::intern(primitive.name)),
                Value::Callable(Callable::Primitive(*primitive)),
            );
        }
        scope
    }

    /// Run a lowered `(Module ...)` program in a fresh builtin scope.
    ///
    /// Output written by the program is flushed before returning, also
    /// when evaluation fails.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run_program(&mut self, program: &Value) -> EvalResult {
        let scope = self.builtin_scope();
        let result = self.eval(program, &scope);
        let flushed = self.output.flush();
        let value = result?;
        flushed?;
        Ok(value)
    }

    /// Evaluate `expr` in `scope`.
    pub fn eval(&mut self, expr: &Value, scope: &ScopeRef) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_inner(expr, scope))
    }

    fn eval_inner(&mut self, expr: &Value, scope: &ScopeRef) -> EvalResult {
        match expr {
            Value::Symbol(symbol) => Ok(scope.lookup(symbol.name).unwrap_or_else(|| expr.clone())),
            Value::Cons(cell) => match cell.head.as_symbol() {
                Some(Name::CALL) => self.eval_call(expr, scope),
                Some(Name::CALL_CURLY) => {
                    let rewritten = desugar_curly_call(expr)?;
                    self.eval_call(&rewritten, scope)
                }
                Some(Name::DEFINE) => {
                    let (Some(key), Some(body)) = (expr.nth(1), expr.nth(2)) else {
                        return Err(EvalError::malformed(
                            "`::=` needs a key and a body",
                        )
                        .with_span_opt(cell.span));
                    };
                    self.define(key, body, scope)?;
                    Ok(Value::Nil)
                }
                Some(Name::BEGIN | Name::MODULE) => self.eval_block(expr.iter().skip(1), scope),
                _ => self.eval_dispatch(expr, scope),
            },
            _ => Ok(expr.clone()),
        }
    }

    fn eval_call(&mut self, expr: &Value, scope: &ScopeRef) -> EvalResult {
        let span = expr.span();
        let Some(raw_callee) = expr.nth(1) else {
            return Err(EvalError::malformed("call without a callee").with_span_opt(span));
        };
        let callee = self.eval(raw_callee, scope)?;
        let args = expr.nth(2).cloned().unwrap_or(Value::Nil);

        match callee {
            Value::Callable(callable) => self.call(&callable, &args, scope, span),
            // Not callable: `@call` is dispatched like any other operator,
            // reusing the callee value instead of evaluating it again.
            callee => {
                if expr.list_len() >= 3 {
                    self.dispatch_binary(Name::CALL, callee, &args, span, scope)
                } else {
                    self.dispatch_unary(Name::CALL, callee, span, scope)
                }
            }
        }
    }

    /// Invoke `callable` with a raw argument tree.
    pub fn call(
        &mut self,
        callable: &Callable,
        args: &Value,
        scope: &ScopeRef,
        span: Option<Span>,
    ) -> EvalResult {
        match callable {
            Callable::Primitive(primitive) => {
                tracing::trace!(primitive = primitive.name, "call");
                (primitive.func)(self, PrimitiveCall { args, scope, span })
            }
            Callable::Closure(closure) => {
                let argument = self.eval(args, scope)?;
                let quoted = Value::form(
                    Name::CALL,
                    [Value::symbol(Name::QUOTE), argument],
                    span,
                );
                let body = substitute(&closure.body, closure.param, &quoted, SubstitutionMode::Full);
                self.eval(&body, &closure.scope)
            }
        }
    }

    /// Store `key ::= body` in `scope`.
    ///
    /// A plain variable is evaluated now; a signature keeps its raw body
    /// until a dispatch matches it.
    pub fn define(&mut self, key: &Value, body: &Value, scope: &ScopeRef) -> Result<(), EvalError> {
        let key = SignatureKey::from_key_expr(key)?;
        let value = if key.is_variable() {
            self.eval(body, scope)?
        } else {
            body.clone()
        };
        tracing::trace!(key = %key, "define");
        scope.insert_definition(key, value);
        Ok(())
    }

    /// Run statements in a new child scope that accepts exports while they
    /// run. Yields the last statement's value.
    pub fn eval_block<'v>(
        &mut self,
        statements: impl Iterator<Item = &'v Value>,
        scope: &ScopeRef,
    ) -> EvalResult {
        let block = scope.child();
        block.set_accepts_exports(true);
        let mut result = Ok(Value::Nil);
        for statement in statements {
            result = self.eval(statement, &block);
            if result.is_err() {
                break;
            }
        }
        block.set_accepts_exports(false);
        result
    }

    fn eval_dispatch(&mut self, expr: &Value, scope: &ScopeRef) -> EvalResult {
        let Some(cell) = expr.as_cons() else {
            return Ok(expr.clone());
        };
        let operator = cell
            .head
            .as_symbol()
            .unwrap_or_else(|| Name::intern(&cell.head.to_string()));
        let span = cell.span.or_else(|| cell.head.span());

        match (expr.nth(1), expr.nth(2)) {
            (Some(raw_left), Some(raw_right)) => {
                let left = self.eval(raw_left, scope)?;
                self.dispatch_binary(operator, left, raw_right, span, scope)
            }
            (Some(raw_operand), None) => {
                let operand = self.eval(raw_operand, scope)?;
                self.dispatch_unary(operator, operand, span, scope)
            }
            _ => Err(EvalError::malformed(format!("`{expr}` has no operands")).with_span_opt(span)),
        }
    }

    // Services for primitives

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print
    }

    pub fn output(&mut self) -> &mut OutputSink {
        &mut self.output
    }

    pub fn loader(&self) -> &dyn ModuleLoader {
        self.loader.as_ref()
    }

    pub fn cached_program(&self, path: &std::path::Path) -> Option<Value> {
        self.load_cache.get(path).cloned()
    }

    pub fn cache_program(&mut self, path: PathBuf, program: Value) {
        self.load_cache.insert(path, program);
    }

    /// Current counter value; the next call yields one more.
    pub fn next_iota(&mut self) -> i64 {
        let value = self.iota;
        self.iota = self.iota.wrapping_add(1);
        value
    }

    pub fn colors(&self) -> bool {
        self.colors
    }
}

/// `(@callCurly f s1 s2)` => `(@call f (@begin s1 s2))`
fn desugar_curly_call(expr: &Value) -> EvalResult {
    let span = expr.span();
    let Some(callee) = expr.nth(1) else {
        return Err(EvalError::malformed("curly call without a callee").with_span_opt(span));
    };
    let block = Value::form(Name::BEGIN, expr.iter().skip(2).cloned(), span);
    Ok(Value::form(Name::CALL, [callee.clone(), block], span))
}
