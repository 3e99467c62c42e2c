//! Operation Registry - manages the fixed operation set

use super::builtin;
use rcalc_foundation::{Error, Result};
use std::collections::HashMap;
use tracing::{debug, error};

/// Evaluation rule with explicit arity.
///
/// Unary operations take exactly one operand - there is no placeholder
/// second argument anywhere in the call chain.
#[derive(Clone, Copy)]
pub enum Evaluator {
    Unary(fn(f64) -> Result<f64>),
    Binary(fn(f64, f64) -> Result<f64>),
}

/// A named, fixed-arity numeric operation
#[derive(Clone, Copy)]
pub struct Operation {
    name: &'static str,
    eval: Evaluator,
}

impl Operation {
    pub const fn new(name: &'static str, eval: Evaluator) -> Self {
        Self { name, eval }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Required operand count, derived from the evaluator variant
    pub fn arity(&self) -> usize {
        match self.eval {
            Evaluator::Unary(_) => 1,
            Evaluator::Binary(_) => 2,
        }
    }
}

/// Registry of available operations
pub struct OperationRegistry {
    operations: HashMap<&'static str, Operation>,
}

impl OperationRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            operations: HashMap::new(),
        }
    }

    /// Create a registry with the builtin operation set
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();

        registry.register(Operation::new("add", Evaluator::Binary(builtin::add)));
        registry.register(Operation::new("sub", Evaluator::Binary(builtin::sub)));
        registry.register(Operation::new("mul", Evaluator::Binary(builtin::mul)));
        registry.register(Operation::new("div", Evaluator::Binary(builtin::div)));
        registry.register(Operation::new("sqrt", Evaluator::Unary(builtin::sqrt)));
        registry.register(Operation::new("square", Evaluator::Unary(builtin::square)));
        registry.register(Operation::new("cube", Evaluator::Unary(builtin::cube)));
        registry.register(Operation::new("log", Evaluator::Unary(builtin::log)));

        registry
    }

    /// Register an operation
    pub fn register(&mut self, operation: Operation) {
        self.operations.insert(operation.name(), operation);
    }

    /// Get an operation by name
    pub fn get(&self, name: &str) -> Option<&Operation> {
        self.operations.get(name)
    }

    /// Check if an operation exists
    pub fn contains(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }

    /// Required operand count for an operation, if registered
    pub fn arity(&self, name: &str) -> Option<usize> {
        self.operations.get(name).map(|op| op.arity())
    }

    /// All operation names with the given arity, sorted
    pub fn names_with_arity(&self, arity: usize) -> Vec<&'static str> {
        let mut names: Vec<_> = self
            .operations
            .values()
            .filter(|op| op.arity() == arity)
            .map(|op| op.name())
            .collect();
        names.sort_unstable();
        names
    }

    /// Evaluate an operation against arity-correct arguments
    pub fn evaluate(&self, name: &str, args: &[f64]) -> Result<f64> {
        let operation = self.operations.get(name).ok_or_else(|| {
            error!("Unknown operation requested: {}", name);
            Error::UnknownOperation(name.to_string())
        })?;

        if args.len() < operation.arity() {
            return Err(Error::Arity {
                command: name.to_string(),
                required: operation.arity(),
            });
        }

        let result = match operation.eval {
            Evaluator::Unary(f) => f(args[0])?,
            Evaluator::Binary(f) => f(args[0], args[1])?,
        };
        debug!("Operation {} {:?} -> {}", name, args, result);
        Ok(result)
    }

    /// Get the number of registered operations
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl Default for OperationRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
